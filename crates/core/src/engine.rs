use crate::{
    classify_with_tables, BonusCardAbility, CardIdentity, HandResult, Outcome, ScoreTables,
    ScoringContext, TriggerPhase,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub hand: HandResult,
    pub final_chips: i64,
    pub final_mult: i64,
    pub final_score: i64,
    pub trigger_log: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscardSummary {
    pub dollars_gained: i64,
    /// Incidental chips/mult from discard effects; never applied to a score.
    pub chips_gained: i64,
    pub mult_gained: i64,
    pub trigger_log: Vec<String>,
}

/// Resolves plays and discards against the owned bonus cards. Holds only the
/// category table, so every call starts from nothing and returns everything
/// it produced.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    tables: ScoreTables,
}

struct Tally {
    chips: i64,
    mult: i64,
    log: Vec<String>,
}

impl Tally {
    fn apply(&mut self, owner: &BonusCardAbility, outcome: Outcome, prefix: &str) {
        if outcome.chips_add > 0 {
            self.chips = self.chips.saturating_add(outcome.chips_add);
        }
        if outcome.mult_add > 0 {
            self.mult = self.mult.saturating_add(outcome.mult_add);
        }
        if outcome.has_factor() {
            self.mult = (self.mult as f64 * outcome.mult_factor).floor() as i64;
            self.log.push(format!(
                "{prefix} ({}): X{}",
                owner.name, outcome.mult_factor
            ));
        } else {
            self.log
                .push(format!("{prefix} ({}): {}", owner.name, outcome.message));
        }
    }
}

impl ScoringEngine {
    pub fn new(tables: ScoreTables) -> Self {
        Self { tables }
    }

    /// Scores a submitted hand. `held` is the rest of the hand; any held card
    /// that is also in the scoring subset is skipped by the held pass.
    /// `bonus_cards` is evaluated in the given board order.
    pub fn resolve_played_hand(
        &self,
        selected: &[CardIdentity],
        held: &[CardIdentity],
        bonus_cards: &[BonusCardAbility],
    ) -> ScoreSummary {
        let hand = classify_with_tables(selected, &self.tables);
        let scoring = hand.scoring_cards(selected);
        let mut tally = Tally {
            chips: hand.base_chips,
            mult: hand.base_mult,
            log: Vec::new(),
        };
        tally
            .log
            .push(format!("Base: {} x {}", tally.chips, tally.mult));

        for card in &scoring {
            tally.chips = tally.chips.saturating_add(card.base_chips);
        }

        let context = |phase: TriggerPhase, chips: i64, mult: i64| ScoringContext {
            phase,
            current: None,
            scoring: &scoring,
            held,
            bonus_cards,
            chips,
            mult,
        };

        for card in &scoring {
            for owner in bonus_cards {
                let ctx = context(TriggerPhase::Individual, tally.chips, tally.mult).with_card(card);
                if let Some(outcome) = owner.evaluate(&ctx) {
                    tally.apply(owner, outcome, "Joker");
                }
            }
        }

        for card in held.iter().filter(|card| !scoring.contains(card)) {
            for owner in bonus_cards {
                let ctx = context(TriggerPhase::HeldInHand, tally.chips, tally.mult).with_card(card);
                if let Some(outcome) = owner.evaluate(&ctx) {
                    tally.apply(owner, outcome, "Held");
                }
            }
        }

        for owner in bonus_cards {
            let ctx = context(TriggerPhase::Global, tally.chips, tally.mult);
            if let Some(outcome) = owner.evaluate(&ctx) {
                tally.apply(owner, outcome, "Global");
            }
        }

        let final_score = tally.chips.saturating_mul(tally.mult);
        tally.log.push(format!(
            "Final: {} x {} = {}",
            tally.chips, tally.mult, final_score
        ));
        ScoreSummary {
            hand,
            final_chips: tally.chips,
            final_mult: tally.mult,
            final_score,
            trigger_log: tally.log,
        }
    }

    pub fn resolve_discard(
        &self,
        discarded: &[CardIdentity],
        bonus_cards: &[BonusCardAbility],
    ) -> DiscardSummary {
        let mut summary = DiscardSummary::default();
        for card in discarded {
            for owner in bonus_cards {
                let ctx = ScoringContext {
                    phase: TriggerPhase::Discard,
                    current: Some(card),
                    scoring: discarded,
                    held: &[],
                    bonus_cards,
                    chips: 0,
                    mult: 0,
                };
                let Some(outcome) = owner.evaluate(&ctx) else {
                    continue;
                };
                if outcome.dollars_add > 0 {
                    summary.dollars_gained = summary.dollars_gained.saturating_add(outcome.dollars_add);
                    summary.trigger_log.push(format!(
                        "Discard ({}): +${}",
                        owner.name, outcome.dollars_add
                    ));
                }
                if outcome.chips_add > 0 {
                    summary.chips_gained = summary.chips_gained.saturating_add(outcome.chips_add);
                }
                if outcome.mult_add > 0 {
                    summary.mult_gained = summary.mult_gained.saturating_add(outcome.mult_add);
                }
            }
        }
        summary
    }
}

pub fn resolve_played_hand(
    selected: &[CardIdentity],
    held: &[CardIdentity],
    bonus_cards: &[BonusCardAbility],
) -> ScoreSummary {
    ScoringEngine::default().resolve_played_hand(selected, held, bonus_cards)
}

pub fn resolve_discard(discarded: &[CardIdentity], bonus_cards: &[BonusCardAbility]) -> DiscardSummary {
    ScoringEngine::default().resolve_discard(discarded, bonus_cards)
}
