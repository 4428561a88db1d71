use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suit {
    Spades,
    Hearts,
    Clubs,
    Diamonds,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Clubs, Suit::Diamonds];

    pub fn name(self) -> &'static str {
        match self {
            Suit::Spades => "Spades",
            Suit::Hearts => "Hearts",
            Suit::Clubs => "Clubs",
            Suit::Diamonds => "Diamonds",
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Suit::Spades => '♠',
            Suit::Hearts => '♥',
            Suit::Clubs => '♣',
            Suit::Diamonds => '♦',
        }
    }

    pub fn from_key(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "spades" | "spade" | "s" | "♠" => Some(Self::Spades),
            "hearts" | "heart" | "h" | "♥" => Some(Self::Hearts),
            "clubs" | "club" | "c" | "♣" => Some(Self::Clubs),
            "diamonds" | "diamond" | "d" | "♦" => Some(Self::Diamonds),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Ordinal value with Ace high (2..=14).
    pub fn value(self) -> u8 {
        match self {
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten => 10,
            Rank::Jack => 11,
            Rank::Queen => 12,
            Rank::King => 13,
            Rank::Ace => 14,
        }
    }

    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            1 | 14 => Some(Rank::Ace),
            2..=13 => Some(Self::ALL[(value - 2) as usize]),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "Jack",
            Rank::Queen => "Queen",
            Rank::King => "King",
            Rank::Ace => "Ace",
        }
    }

    pub fn short(self) -> &'static str {
        match self {
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
            other => other.name(),
        }
    }

    pub fn from_key(value: &str) -> Option<Self> {
        let key = value.trim().to_lowercase();
        match key.as_str() {
            "jack" | "j" => Some(Rank::Jack),
            "queen" | "q" => Some(Rank::Queen),
            "king" | "k" => Some(Rank::King),
            "ace" | "a" => Some(Rank::Ace),
            "t" => Some(Rank::Ten),
            _ => key.parse::<u8>().ok().and_then(Self::from_value),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CardIdentity {
    #[serde(default)]
    pub id: u32,
    pub suit: Suit,
    pub rank: Rank,
    pub base_chips: i64,
}

impl CardIdentity {
    pub fn new(suit: Suit, rank: Rank, base_chips: i64) -> Self {
        Self {
            id: 0,
            suit,
            rank,
            base_chips,
        }
    }

    pub fn with_id(mut self, id: u32) -> Self {
        self.id = id;
        self
    }

    /// Parses short notation such as `10D`, `QS` or `Ah`; chips are left at 0.
    pub fn parse_short(value: &str) -> Option<(Suit, Rank)> {
        let value = value.trim();
        let split = value.char_indices().last()?.0;
        if split == 0 {
            return None;
        }
        let (rank, suit) = value.split_at(split);
        Some((Suit::from_key(suit)?, Rank::from_key(rank)?))
    }
}

impl fmt::Display for CardIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.short(), self.suit.symbol())
    }
}
