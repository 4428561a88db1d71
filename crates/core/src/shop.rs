use crate::{AbilityCatalog, AreaError, BonusCardAbility, CardArea, RngState, RunRules};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShopError {
    #[error("not enough money: need {cost}, have {money}")]
    NotEnoughMoney { cost: i64, money: i64 },
    #[error("invalid shop offer index {0}")]
    InvalidOffer(usize),
    #[error("no purchase waiting for a replacement")]
    NoPendingPurchase,
    #[error("area error: {0}")]
    Area(#[from] AreaError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseOutcome {
    /// Moved into the joker slot at `slot`.
    Bought { slot: usize },
    /// Joker slots are full; the offer is now pending until a replace or cancel.
    NeedsReplacement { offer: usize },
}

#[derive(Debug, Clone)]
pub struct ShopState {
    pub offers: CardArea<BonusCardAbility>,
    /// Offer index chosen while every joker slot was taken.
    pub pending: Option<usize>,
    pub reroll_cost: i64,
}

impl ShopState {
    pub fn new(rules: &RunRules) -> Self {
        Self {
            offers: CardArea::with_capacity(rules.shop_slots),
            pending: None,
            reroll_cost: rules.reroll_cost,
        }
    }

    pub fn restock(&mut self, catalog: &AbilityCatalog, rng: &mut RngState) -> usize {
        self.offers.clear();
        self.pending = None;
        if catalog.is_empty() {
            log::warn!("ability catalog is empty, shop left without offers");
            return 0;
        }
        while !self.offers.is_full() {
            let Some(ability) = catalog.pick(rng) else {
                break;
            };
            if self.offers.push(ability.clone()).is_err() {
                break;
            }
        }
        self.offers.len()
    }

    pub fn buy(
        &mut self,
        offer: usize,
        jokers: &mut CardArea<BonusCardAbility>,
        money: &mut i64,
    ) -> Result<PurchaseOutcome, ShopError> {
        let cost = self
            .offers
            .get(offer)
            .map(|ability| ability.cost)
            .ok_or(ShopError::InvalidOffer(offer))?;
        if *money < cost {
            return Err(ShopError::NotEnoughMoney {
                cost,
                money: *money,
            });
        }
        if jokers.is_full() {
            self.pending = Some(offer);
            return Ok(PurchaseOutcome::NeedsReplacement { offer });
        }
        let ability = self.offers.take(offer)?;
        let slot = jokers.push(ability)?;
        *money -= cost;
        self.pending = None;
        Ok(PurchaseOutcome::Bought { slot })
    }

    /// Completes a pending purchase by swapping out the joker at `joker_index`.
    /// Returns the joker that left the board.
    pub fn replace(
        &mut self,
        joker_index: usize,
        jokers: &mut CardArea<BonusCardAbility>,
        money: &mut i64,
    ) -> Result<BonusCardAbility, ShopError> {
        let offer = self.pending.ok_or(ShopError::NoPendingPurchase)?;
        let cost = self
            .offers
            .get(offer)
            .map(|ability| ability.cost)
            .ok_or(ShopError::InvalidOffer(offer))?;
        if *money < cost {
            return Err(ShopError::NotEnoughMoney {
                cost,
                money: *money,
            });
        }
        if jokers.get(joker_index).is_none() {
            return Err(AreaError::InvalidIndex(joker_index).into());
        }
        let bought = self.offers.take(offer)?;
        let removed = jokers.replace(joker_index, bought)?;
        *money -= cost;
        self.pending = None;
        Ok(removed)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn reroll(
        &mut self,
        catalog: &AbilityCatalog,
        rng: &mut RngState,
        money: &mut i64,
    ) -> Result<usize, ShopError> {
        if *money < self.reroll_cost {
            return Err(ShopError::NotEnoughMoney {
                cost: self.reroll_cost,
                money: *money,
            });
        }
        *money -= self.reroll_cost;
        Ok(self.restock(catalog, rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EffectVariant;

    fn catalog() -> AbilityCatalog {
        AbilityCatalog::new([
            BonusCardAbility::new("j_joker", "Joker", EffectVariant::FlatMult { amount: 4 })
                .with_cost(2),
            BonusCardAbility::new("j_blue", "Blue", EffectVariant::FlatChips { amount: 30 })
                .with_cost(5),
        ])
    }

    fn stocked() -> ShopState {
        let mut shop = ShopState::new(&RunRules::default());
        shop.restock(&catalog(), &mut RngState::from_seed(3));
        shop
    }

    #[test]
    fn restock_fills_every_slot() {
        assert_eq!(stocked().offers.len(), 3);
        let mut empty = ShopState::new(&RunRules::default());
        assert_eq!(empty.restock(&AbilityCatalog::default(), &mut RngState::from_seed(1)), 0);
    }

    #[test]
    fn buy_moves_offer_into_free_slot() {
        let mut shop = stocked();
        let mut jokers = CardArea::with_capacity(5);
        let mut money = 100;
        let cost = shop.offers.get(0).map(|a| a.cost).unwrap_or_default();
        assert_eq!(
            shop.buy(0, &mut jokers, &mut money),
            Ok(PurchaseOutcome::Bought { slot: 0 })
        );
        assert_eq!(money, 100 - cost);
        assert_eq!(shop.offers.len(), 2);
        assert_eq!(jokers.len(), 1);
    }

    #[test]
    fn buy_without_money_changes_nothing() {
        let mut shop = stocked();
        let mut jokers = CardArea::with_capacity(5);
        let mut money = 1;
        assert!(matches!(
            shop.buy(0, &mut jokers, &mut money),
            Err(ShopError::NotEnoughMoney { .. })
        ));
        assert_eq!(money, 1);
        assert_eq!(shop.offers.len(), 3);
    }

    #[test]
    fn full_board_goes_through_pending_replace() {
        let mut shop = stocked();
        let mut jokers = CardArea::with_capacity(1);
        jokers
            .push(BonusCardAbility::inert("j_old", "Old"))
            .expect("push");
        let mut money = 100;
        assert_eq!(
            shop.buy(1, &mut jokers, &mut money),
            Ok(PurchaseOutcome::NeedsReplacement { offer: 1 })
        );
        assert_eq!(money, 100);
        let bought_id = shop.offers.get(1).map(|a| a.id.clone());
        let removed = shop.replace(0, &mut jokers, &mut money).expect("replace");
        assert_eq!(removed.id, "j_old");
        assert_eq!(jokers.get(0).map(|a| a.id.clone()), bought_id);
        assert_eq!(shop.pending, None);
        assert_eq!(
            shop.replace(0, &mut jokers, &mut money),
            Err(ShopError::NoPendingPurchase)
        );
    }

    #[test]
    fn reroll_charges_and_clears_pending() {
        let mut shop = stocked();
        shop.pending = Some(0);
        let mut money = 6;
        assert_eq!(shop.reroll(&catalog(), &mut RngState::from_seed(9), &mut money), Ok(3));
        assert_eq!(money, 1);
        assert_eq!(shop.pending, None);
        assert!(shop
            .reroll(&catalog(), &mut RngState::from_seed(9), &mut money)
            .is_err());
    }
}
