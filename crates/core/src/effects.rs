use crate::{BonusCardAbility, CardIdentity, Rank, Suit};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TriggerPhase {
    /// Once per scoring card, with that card as the current card.
    Individual,
    /// Once per held card that did not score.
    HeldInHand,
    /// Once per bonus card after all card passes.
    Global,
    /// Once per discarded card.
    Discard,
}

/// Closed set of bonus card behaviours. Each variant is plain parameters;
/// evaluation reads only the owner and the context.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum EffectVariant {
    FlatMult { amount: i64 },
    SuitConditionalMult { amount: i64, suit: Suit },
    CountScaledMult { per_unit: i64 },
    DiscardRankRebate { dollars: i64, rank: Rank },
    FlatChips { amount: i64 },
    MultFactor { factor: f64 },
    HeldRankMult { amount: i64, rank: Rank },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub chips_add: i64,
    pub mult_add: i64,
    pub mult_factor: f64,
    pub dollars_add: i64,
    pub message: String,
}

impl Default for Outcome {
    fn default() -> Self {
        Self {
            chips_add: 0,
            mult_add: 0,
            mult_factor: 1.0,
            dollars_add: 0,
            message: String::new(),
        }
    }
}

impl Outcome {
    pub fn mult(amount: i64, message: String) -> Self {
        Self {
            mult_add: amount,
            message,
            ..Self::default()
        }
    }

    pub fn chips(amount: i64, message: String) -> Self {
        Self {
            chips_add: amount,
            message,
            ..Self::default()
        }
    }

    pub fn factor(factor: f64, message: String) -> Self {
        Self {
            mult_factor: factor,
            message,
            ..Self::default()
        }
    }

    pub fn dollars(amount: i64, message: String) -> Self {
        Self {
            dollars_add: amount,
            message,
            ..Self::default()
        }
    }

    pub fn has_factor(&self) -> bool {
        self.mult_factor > 1.0
    }
}

/// Read-only view handed to every evaluation. Built fresh per call.
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext<'a> {
    pub phase: TriggerPhase,
    pub current: Option<&'a CardIdentity>,
    pub scoring: &'a [CardIdentity],
    pub held: &'a [CardIdentity],
    pub bonus_cards: &'a [BonusCardAbility],
    pub chips: i64,
    pub mult: i64,
}

impl<'a> ScoringContext<'a> {
    pub fn new(phase: TriggerPhase, bonus_cards: &'a [BonusCardAbility]) -> Self {
        Self {
            phase,
            current: None,
            scoring: &[],
            held: &[],
            bonus_cards,
            chips: 0,
            mult: 0,
        }
    }

    pub fn with_card(mut self, card: &'a CardIdentity) -> Self {
        self.current = Some(card);
        self
    }
}

impl EffectVariant {
    pub fn phase(&self) -> TriggerPhase {
        match self {
            EffectVariant::FlatMult { .. }
            | EffectVariant::CountScaledMult { .. }
            | EffectVariant::FlatChips { .. }
            | EffectVariant::MultFactor { .. } => TriggerPhase::Global,
            EffectVariant::SuitConditionalMult { .. } => TriggerPhase::Individual,
            EffectVariant::HeldRankMult { .. } => TriggerPhase::HeldInHand,
            EffectVariant::DiscardRankRebate { .. } => TriggerPhase::Discard,
        }
    }

    pub fn evaluate(&self, _owner: &BonusCardAbility, ctx: &ScoringContext<'_>) -> Option<Outcome> {
        if ctx.phase != self.phase() {
            return None;
        }
        match *self {
            EffectVariant::FlatMult { amount } => {
                Some(Outcome::mult(amount, format!("+{amount} Mult")))
            }
            EffectVariant::SuitConditionalMult { amount, suit } => {
                let card = ctx.current?;
                (card.suit == suit)
                    .then(|| Outcome::mult(amount, format!("+{amount} Mult ({})", suit.name())))
            }
            EffectVariant::CountScaledMult { per_unit } => {
                let count = ctx.bonus_cards.len() as i64;
                let total = per_unit.saturating_mul(count);
                Some(Outcome::mult(
                    total,
                    format!("+{total} Mult ({count} Jokers)"),
                ))
            }
            EffectVariant::DiscardRankRebate { dollars, rank } => {
                let card = ctx.current?;
                (card.rank == rank).then(|| Outcome::dollars(dollars, format!("+${dollars}")))
            }
            EffectVariant::FlatChips { amount } => {
                Some(Outcome::chips(amount, format!("+{amount} Chips")))
            }
            EffectVariant::MultFactor { factor } => {
                Some(Outcome::factor(factor, format!("X{factor} Mult")))
            }
            EffectVariant::HeldRankMult { amount, rank } => {
                let card = ctx.current?;
                (card.rank == rank).then(|| {
                    Outcome::mult(amount, format!("+{amount} Mult ({} held)", rank.name()))
                })
            }
        }
    }
}
