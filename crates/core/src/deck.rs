use crate::{CardIdentity, Rank, RankChips, RngState, Suit};

/// The draw pile. Cards are issued with unique ids so the held pass can tell
/// two copies of the same rank and suit apart.
#[derive(Debug, Default, Clone)]
pub struct Deck {
    cards: Vec<CardIdentity>,
    next_id: u32,
}

impl Deck {
    pub fn standard(chips: &RankChips) -> Self {
        let mut deck = Self {
            cards: Vec::with_capacity(52),
            next_id: 1,
        };
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                deck.add_card(suit, rank, chips);
            }
        }
        deck
    }

    pub fn add_card(&mut self, suit: Suit, rank: Rank, chips: &RankChips) -> CardIdentity {
        let card = CardIdentity::new(suit, rank, chips.chips_for(rank)).with_id(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        self.cards.push(card);
        card
    }

    pub fn shuffle(&mut self, rng: &mut RngState) {
        rng.shuffle(&mut self.cards);
    }

    /// Draws from the top (end) of the pile; returns fewer when it runs out.
    pub fn draw(&mut self, count: usize) -> Vec<CardIdentity> {
        let keep = self.cards.len().saturating_sub(count);
        let mut drawn = self.cards.split_off(keep);
        drawn.reverse();
        drawn
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[CardIdentity] {
        &self.cards
    }
}
