use crate::HandCategory;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    RoundStarted {
        round: u32,
        target: i64,
        hands: u8,
        discards: u8,
    },
    HandDealt { count: usize },
    HandScored {
        hand: HandCategory,
        chips: i64,
        mult: i64,
        total: i64,
    },
    Discarded { count: usize, dollars: i64 },
    RoundCleared { score: i64, reward: i64, money: i64 },
    GameOver { score: i64, target: i64 },
    ShopRestocked { offers: usize, money: i64 },
    JokerBought { id: String, cost: i64, money: i64 },
    JokerReplaced {
        sold: String,
        bought: String,
        cost: i64,
        money: i64,
    },
    JokerSold { id: String, value: i64, money: i64 },
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
