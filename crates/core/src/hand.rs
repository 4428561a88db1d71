use crate::{CardIdentity, Rank, ScoreTables, Suit};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HandCategory {
    HighCard,
    Pair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
    RoyalFlush,
}

impl HandCategory {
    pub const ALL: [HandCategory; 10] = [
        HandCategory::HighCard,
        HandCategory::Pair,
        HandCategory::TwoPair,
        HandCategory::ThreeOfAKind,
        HandCategory::Straight,
        HandCategory::Flush,
        HandCategory::FullHouse,
        HandCategory::FourOfAKind,
        HandCategory::StraightFlush,
        HandCategory::RoyalFlush,
    ];

    pub fn id(self) -> &'static str {
        match self {
            HandCategory::HighCard => "high_card",
            HandCategory::Pair => "pair",
            HandCategory::TwoPair => "two_pair",
            HandCategory::ThreeOfAKind => "three_of_a_kind",
            HandCategory::Straight => "straight",
            HandCategory::Flush => "flush",
            HandCategory::FullHouse => "full_house",
            HandCategory::FourOfAKind => "four_of_a_kind",
            HandCategory::StraightFlush => "straight_flush",
            HandCategory::RoyalFlush => "royal_flush",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            HandCategory::HighCard => "High Card",
            HandCategory::Pair => "Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "3 of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "4 of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
            HandCategory::RoyalFlush => "Royal Flush",
        }
    }

    pub fn from_id(value: &str) -> Option<Self> {
        let key = value.trim().to_lowercase();
        Self::ALL.into_iter().find(|category| category.id() == key)
    }

    /// Level-one `(chips, mult)` for the category.
    pub fn base(self) -> (i64, i64) {
        match self {
            HandCategory::HighCard => (5, 1),
            HandCategory::Pair => (10, 2),
            HandCategory::TwoPair => (20, 2),
            HandCategory::ThreeOfAKind => (30, 3),
            HandCategory::Straight => (30, 4),
            HandCategory::Flush => (35, 4),
            HandCategory::FullHouse => (40, 4),
            HandCategory::FourOfAKind => (60, 7),
            HandCategory::StraightFlush | HandCategory::RoyalFlush => (100, 8),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandResult {
    pub category: HandCategory,
    pub base_chips: i64,
    pub base_mult: i64,
    /// Positions into the submitted cards, in submission order.
    pub scoring_indices: Vec<usize>,
}

impl HandResult {
    pub fn scoring_cards(&self, cards: &[CardIdentity]) -> Vec<CardIdentity> {
        self.scoring_indices
            .iter()
            .filter_map(|idx| cards.get(*idx).copied())
            .collect()
    }
}

pub fn classify(cards: &[CardIdentity]) -> HandResult {
    classify_with_tables(cards, &ScoreTables::standard())
}

pub fn classify_with_tables(cards: &[CardIdentity], tables: &ScoreTables) -> HandResult {
    if cards.is_empty() {
        return HandResult {
            category: HandCategory::HighCard,
            base_chips: 0,
            base_mult: 0,
            scoring_indices: Vec::new(),
        };
    }

    let mut sorted: Vec<CardIdentity> = cards.to_vec();
    sorted.sort_by_key(|card| card.rank);

    let mut rank_counts: BTreeMap<Rank, usize> = BTreeMap::new();
    let mut suit_counts: BTreeMap<Suit, usize> = BTreeMap::new();
    for card in &sorted {
        *rank_counts.entry(card.rank).or_insert(0) += 1;
        *suit_counts.entry(card.suit).or_insert(0) += 1;
    }

    let flush = sorted.len() == 5 && suit_counts.len() == 1;
    let straight = is_straight(&sorted);
    let groups_of = |size: usize| rank_counts.values().filter(|&&c| c == size).count();
    let pairs = groups_of(2);
    let threes = groups_of(3);
    let fours = groups_of(4);

    let category = if straight && flush {
        if is_royal(&sorted) {
            HandCategory::RoyalFlush
        } else {
            HandCategory::StraightFlush
        }
    } else if fours > 0 {
        HandCategory::FourOfAKind
    } else if threes > 0 && pairs > 0 {
        HandCategory::FullHouse
    } else if flush {
        HandCategory::Flush
    } else if straight {
        HandCategory::Straight
    } else if threes > 0 {
        HandCategory::ThreeOfAKind
    } else if pairs >= 2 {
        HandCategory::TwoPair
    } else if pairs == 1 {
        HandCategory::Pair
    } else {
        HandCategory::HighCard
    };

    let scoring_indices = match category {
        HandCategory::FourOfAKind => indices_with_multiplicity(cards, &rank_counts, 4),
        HandCategory::ThreeOfAKind => indices_with_multiplicity(cards, &rank_counts, 3),
        HandCategory::TwoPair | HandCategory::Pair => {
            indices_with_multiplicity(cards, &rank_counts, 2)
        }
        HandCategory::HighCard => highest_card_index(cards).into_iter().collect(),
        HandCategory::Straight
        | HandCategory::Flush
        | HandCategory::FullHouse
        | HandCategory::StraightFlush
        | HandCategory::RoyalFlush => (0..cards.len()).collect(),
    };

    let (base_chips, base_mult) = tables.hand_base(category);
    HandResult {
        category,
        base_chips,
        base_mult,
        scoring_indices,
    }
}

/// Expects `sorted` ascending by rank.
fn is_straight(sorted: &[CardIdentity]) -> bool {
    if sorted.len() != 5 {
        return false;
    }
    let values: Vec<u8> = sorted.iter().map(|card| card.rank.value()).collect();
    if values == [2, 3, 4, 5, 14] {
        return true;
    }
    values.windows(2).all(|w| w[1] == w[0] + 1)
}

fn is_royal(sorted: &[CardIdentity]) -> bool {
    matches!(
        (sorted.first(), sorted.last()),
        (Some(low), Some(high)) if low.rank == Rank::Ten && high.rank == Rank::Ace
    )
}

fn indices_with_multiplicity(
    cards: &[CardIdentity],
    rank_counts: &BTreeMap<Rank, usize>,
    count: usize,
) -> Vec<usize> {
    cards
        .iter()
        .enumerate()
        .filter(|(_, card)| rank_counts.get(&card.rank) == Some(&count))
        .map(|(idx, _)| idx)
        .collect()
}

fn highest_card_index(cards: &[CardIdentity]) -> Option<usize> {
    let mut best: Option<(usize, Rank)> = None;
    for (idx, card) in cards.iter().enumerate() {
        if best.map(|(_, rank)| card.rank > rank).unwrap_or(true) {
            best = Some((idx, card.rank));
        }
    }
    best.map(|(idx, _)| idx)
}
