use super::*;
use crate::{DiscardSummary, Event, EventBus, ScoreSummary};

impl RunState {
    pub fn start_round(&mut self, events: &mut EventBus) -> Result<(), RunError> {
        if !matches!(self.progress.phase, RunPhase::Setup | RunPhase::Shop) {
            return Err(RunError::InvalidPhase(self.progress.phase));
        }
        let rules = &self.config.run;
        self.progress.score = 0;
        self.progress.hands_left = rules.hands_per_round;
        self.progress.discards_left = rules.discards_per_round;
        self.progress.phase = RunPhase::Play;
        self.shop.cancel();
        self.hand.clear();
        self.selection.clear();
        self.deck = Deck::standard(&self.rank_chips);
        self.deck.shuffle(&mut self.rng);
        events.push(Event::RoundStarted {
            round: self.progress.round,
            target: self.progress.target,
            hands: self.progress.hands_left,
            discards: self.progress.discards_left,
        });
        self.refill_hand(events);
        Ok(())
    }

    pub fn refill_hand(&mut self, events: &mut EventBus) {
        let needed = self.hand.free_slots();
        if needed == 0 {
            return;
        }
        let drawn = self.deck.draw(needed);
        let count = drawn.len();
        for card in drawn {
            if self.hand.push(card).is_err() {
                break;
            }
        }
        if count > 0 {
            events.push(Event::HandDealt { count });
        }
    }

    /// Returns whether the card is selected afterwards.
    pub fn toggle_select(&mut self, index: usize) -> Result<bool, RunError> {
        self.require_phase(RunPhase::Play)?;
        if self.hand.get(index).is_none() {
            return Err(RunError::InvalidCardIndex(index));
        }
        if let Some(pos) = self.selection.iter().position(|idx| *idx == index) {
            self.selection.remove(pos);
            return Ok(false);
        }
        let limit = self.config.run.max_selection;
        if self.selection.len() >= limit {
            return Err(RunError::SelectionFull(limit));
        }
        self.selection.push(index);
        self.selection.sort_unstable();
        Ok(true)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn play_selected(&mut self, events: &mut EventBus) -> Result<ScoreSummary, RunError> {
        self.require_phase(RunPhase::Play)?;
        if self.progress.hands_left == 0 {
            return Err(RunError::NoHandsLeft);
        }
        if self.selection.is_empty() {
            return Err(RunError::EmptySelection);
        }
        let selected = self.selected_cards();
        let held = self.unselected_cards();
        let summary = self
            .engine
            .resolve_played_hand(&selected, &held, self.jokers.as_slice());

        let indices = std::mem::take(&mut self.selection);
        self.hand.take_many(&indices)?;
        self.progress.score = self.progress.score.saturating_add(summary.final_score);
        self.progress.hands_left -= 1;
        log::debug!(
            "{} scored {} ({} x {})",
            summary.hand.category.display_name(),
            summary.final_score,
            summary.final_chips,
            summary.final_mult
        );
        events.push(Event::HandScored {
            hand: summary.hand.category,
            chips: summary.final_chips,
            mult: summary.final_mult,
            total: summary.final_score,
        });
        self.refill_hand(events);

        if self.progress.score >= self.progress.target {
            self.clear_round(events);
        } else if self.progress.hands_left == 0 {
            self.progress.phase = RunPhase::GameOver;
            log::info!(
                "run over in round {}: {} of {}",
                self.progress.round,
                self.progress.score,
                self.progress.target
            );
            events.push(Event::GameOver {
                score: self.progress.score,
                target: self.progress.target,
            });
        }
        Ok(summary)
    }

    pub fn discard_selected(&mut self, events: &mut EventBus) -> Result<DiscardSummary, RunError> {
        self.require_phase(RunPhase::Play)?;
        if self.progress.discards_left == 0 {
            return Err(RunError::NoDiscardsLeft);
        }
        if self.selection.is_empty() {
            return Err(RunError::EmptySelection);
        }
        let discarded = self.selected_cards();
        let summary = self
            .engine
            .resolve_discard(&discarded, self.jokers.as_slice());

        let indices = std::mem::take(&mut self.selection);
        self.hand.take_many(&indices)?;
        self.progress.money = self.progress.money.saturating_add(summary.dollars_gained);
        self.progress.discards_left -= 1;
        events.push(Event::Discarded {
            count: discarded.len(),
            dollars: summary.dollars_gained,
        });
        self.refill_hand(events);
        Ok(summary)
    }

    fn clear_round(&mut self, events: &mut EventBus) {
        let rules = &self.config.run;
        let reward = rules.clear_reward;
        self.progress.money = self.progress.money.saturating_add(reward);
        events.push(Event::RoundCleared {
            score: self.progress.score,
            reward,
            money: self.progress.money,
        });
        log::info!(
            "round {} cleared with {} (target {})",
            self.progress.round,
            self.progress.score,
            self.progress.target
        );
        self.progress.target = rules.next_target(self.progress.target);
        self.progress.round += 1;
        self.progress.phase = RunPhase::Shop;
        self.selection.clear();
        let offers = self.shop.restock(&self.catalog, &mut self.rng);
        events.push(Event::ShopRestocked {
            offers,
            money: self.progress.money,
        });
    }
}
