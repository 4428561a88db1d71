use crate::HandCategory;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HandRule {
    pub category: HandCategory,
    pub base_chips: i64,
    pub base_mult: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RunRules {
    pub hands_per_round: u8,
    pub discards_per_round: u8,
    pub hand_size: usize,
    pub max_selection: usize,
    pub starting_money: i64,
    pub starting_target: i64,
    pub target_growth: f64,
    pub clear_reward: i64,
    pub joker_slots: usize,
    pub shop_slots: usize,
    pub reroll_cost: i64,
}

impl Default for RunRules {
    fn default() -> Self {
        Self {
            hands_per_round: 4,
            discards_per_round: 3,
            hand_size: 8,
            max_selection: 5,
            starting_money: 4,
            starting_target: 300,
            target_growth: 1.5,
            clear_reward: 5,
            joker_slots: 5,
            shop_slots: 3,
            reroll_cost: 5,
        }
    }
}

impl RunRules {
    pub fn next_target(&self, target: i64) -> i64 {
        (target as f64 * self.target_growth).floor() as i64
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GameConfig {
    #[serde(default)]
    pub run: RunRules,
    #[serde(default)]
    pub hands: Vec<HandRule>,
}
