use super::*;
use crate::{Event, EventBus, PurchaseOutcome};

impl RunState {
    pub fn buy_offer(
        &mut self,
        offer: usize,
        events: &mut EventBus,
    ) -> Result<PurchaseOutcome, RunError> {
        self.require_phase(RunPhase::Shop)?;
        let id = self
            .shop
            .offers
            .get(offer)
            .map(|ability| (ability.id.clone(), ability.cost));
        let outcome = self
            .shop
            .buy(offer, &mut self.jokers, &mut self.progress.money)?;
        if let (PurchaseOutcome::Bought { .. }, Some((id, cost))) = (outcome, id) {
            events.push(Event::JokerBought {
                id,
                cost,
                money: self.progress.money,
            });
        }
        Ok(outcome)
    }

    pub fn replace_joker(
        &mut self,
        joker_index: usize,
        events: &mut EventBus,
    ) -> Result<(), RunError> {
        self.require_phase(RunPhase::Shop)?;
        let money_before = self.progress.money;
        let removed = self
            .shop
            .replace(joker_index, &mut self.jokers, &mut self.progress.money)?;
        let bought = self
            .jokers
            .get(joker_index)
            .map(|ability| ability.id.clone())
            .unwrap_or_default();
        events.push(Event::JokerReplaced {
            sold: removed.id,
            bought,
            cost: money_before - self.progress.money,
            money: self.progress.money,
        });
        Ok(())
    }

    pub fn cancel_purchase(&mut self) {
        self.shop.cancel();
    }

    pub fn reroll_shop(&mut self, events: &mut EventBus) -> Result<usize, RunError> {
        self.require_phase(RunPhase::Shop)?;
        let offers = self
            .shop
            .reroll(&self.catalog, &mut self.rng, &mut self.progress.money)?;
        events.push(Event::ShopRestocked {
            offers,
            money: self.progress.money,
        });
        Ok(offers)
    }

    pub fn sell_joker(&mut self, index: usize, events: &mut EventBus) -> Result<i64, RunError> {
        if self.progress.phase == RunPhase::GameOver {
            return Err(RunError::InvalidPhase(self.progress.phase));
        }
        let sold = self
            .jokers
            .take(index)
            .map_err(|_| RunError::InvalidJokerIndex(index))?;
        // Slot indices shift after a sale; a pending replace target may be stale.
        self.shop.cancel();
        let value = sold.sell_value();
        self.progress.money = self.progress.money.saturating_add(value);
        events.push(Event::JokerSold {
            id: sold.id,
            value,
            money: self.progress.money,
        });
        Ok(value)
    }

    pub fn next_round(&mut self, events: &mut EventBus) -> Result<(), RunError> {
        self.require_phase(RunPhase::Shop)?;
        self.start_round(events)
    }
}
