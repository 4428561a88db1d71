use crate::{GameConfig, HandCategory, Rank};
use std::collections::{BTreeMap, HashMap};

/// Base chips and mult per hand category, with config overrides on top of
/// the static table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreTables {
    hand_rules: HashMap<HandCategory, (i64, i64)>,
}

impl ScoreTables {
    pub fn standard() -> Self {
        Self::default()
    }

    pub fn from_config(config: &GameConfig) -> Self {
        let mut hand_rules = HashMap::new();
        for hand in &config.hands {
            hand_rules.insert(hand.category, (hand.base_chips, hand.base_mult));
        }
        Self { hand_rules }
    }

    pub fn hand_base(&self, category: HandCategory) -> (i64, i64) {
        self.hand_rules
            .get(&category)
            .copied()
            .unwrap_or_else(|| category.base())
    }
}

/// Rank to intrinsic chip value lookup. Missing ranks score 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankChips {
    chips: BTreeMap<Rank, i64>,
}

impl RankChips {
    pub fn new(chips: BTreeMap<Rank, i64>) -> Self {
        Self { chips }
    }

    pub fn standard() -> Self {
        let chips = Rank::ALL
            .into_iter()
            .map(|rank| {
                let value = match rank {
                    Rank::Jack | Rank::Queen | Rank::King => 10,
                    Rank::Ace => 11,
                    other => other.value() as i64,
                };
                (rank, value)
            })
            .collect();
        Self { chips }
    }

    pub fn insert(&mut self, rank: Rank, chips: i64) {
        self.chips.insert(rank, chips);
    }

    pub fn get(&self, rank: Rank) -> Option<i64> {
        self.chips.get(&rank).copied()
    }

    pub fn chips_for(&self, rank: Rank) -> i64 {
        match self.chips.get(&rank) {
            Some(chips) => *chips,
            None => {
                log::warn!("no chip value for rank {}, using 0", rank.name());
                0
            }
        }
    }

    pub fn missing(&self) -> Vec<Rank> {
        Rank::ALL
            .into_iter()
            .filter(|rank| !self.chips.contains_key(rank))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.chips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chips.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HandRule;

    #[test]
    fn config_overrides_only_listed_categories() {
        let config = GameConfig {
            hands: vec![HandRule {
                category: HandCategory::Pair,
                base_chips: 15,
                base_mult: 3,
            }],
            ..GameConfig::default()
        };
        let tables = ScoreTables::from_config(&config);
        assert_eq!(tables.hand_base(HandCategory::Pair), (15, 3));
        assert_eq!(tables.hand_base(HandCategory::FourOfAKind), (60, 7));
    }

    #[test]
    fn missing_rank_degrades_to_zero() {
        let mut chips = RankChips::default();
        chips.insert(Rank::Ace, 11);
        assert_eq!(chips.chips_for(Rank::Ace), 11);
        assert_eq!(chips.chips_for(Rank::Two), 0);
        assert_eq!(chips.missing().len(), 12);
    }

    #[test]
    fn standard_rank_chips_match_face_values() {
        let chips = RankChips::standard();
        assert_eq!(chips.chips_for(Rank::Seven), 7);
        assert_eq!(chips.chips_for(Rank::Queen), 10);
        assert_eq!(chips.chips_for(Rank::Ace), 11);
        assert!(chips.missing().is_empty());
    }
}
