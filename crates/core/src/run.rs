use crate::{
    AbilityCatalog, AreaError, BonusCardAbility, CardArea, CardIdentity, Deck, GameConfig,
    RankChips, RngState, ScoreTables, ScoringEngine, ShopError, ShopState,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod round;
mod shop;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("invalid phase: {0:?}")]
    InvalidPhase(RunPhase),
    #[error("no hands left")]
    NoHandsLeft,
    #[error("no discards left")]
    NoDiscardsLeft,
    #[error("no cards selected")]
    EmptySelection,
    #[error("cannot select more than {0} cards")]
    SelectionFull(usize),
    #[error("invalid card index {0}")]
    InvalidCardIndex(usize),
    #[error("invalid joker index {0}")]
    InvalidJokerIndex(usize),
    #[error("shop error: {0}")]
    Shop(#[from] ShopError),
    #[error("area error: {0}")]
    Area(#[from] AreaError),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RunPhase {
    Setup,
    Play,
    Shop,
    GameOver,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunProgress {
    pub phase: RunPhase,
    pub round: u32,
    pub score: i64,
    pub target: i64,
    pub hands_left: u8,
    pub discards_left: u8,
    pub money: i64,
}

/// The game-state controller around the scoring engine: owns every card area
/// and applies engine summaries to score and money.
#[derive(Debug)]
pub struct RunState {
    pub config: GameConfig,
    pub engine: ScoringEngine,
    pub rank_chips: RankChips,
    pub catalog: AbilityCatalog,
    pub rng: RngState,
    pub deck: Deck,
    pub hand: CardArea<CardIdentity>,
    pub jokers: CardArea<BonusCardAbility>,
    pub shop: ShopState,
    /// Hand positions, kept ascending.
    pub selection: Vec<usize>,
    pub progress: RunProgress,
}

impl RunState {
    pub fn new(config: GameConfig, rank_chips: RankChips, catalog: AbilityCatalog, seed: u64) -> Self {
        let rules = &config.run;
        let progress = RunProgress {
            phase: RunPhase::Setup,
            round: 1,
            score: 0,
            target: rules.starting_target,
            hands_left: rules.hands_per_round,
            discards_left: rules.discards_per_round,
            money: rules.starting_money,
        };
        Self {
            engine: ScoringEngine::new(ScoreTables::from_config(&config)),
            hand: CardArea::with_capacity(rules.hand_size),
            jokers: CardArea::with_capacity(rules.joker_slots),
            shop: ShopState::new(rules),
            deck: Deck::default(),
            rng: RngState::from_seed(seed),
            selection: Vec::new(),
            progress,
            rank_chips,
            catalog,
            config,
        }
    }

    pub fn phase(&self) -> RunPhase {
        self.progress.phase
    }

    pub fn selected_cards(&self) -> Vec<CardIdentity> {
        self.selection
            .iter()
            .filter_map(|idx| self.hand.get(*idx).copied())
            .collect()
    }

    pub fn unselected_cards(&self) -> Vec<CardIdentity> {
        self.hand
            .iter()
            .enumerate()
            .filter(|(idx, _)| !self.selection.contains(idx))
            .map(|(_, card)| *card)
            .collect()
    }

    /// Adds a joker straight onto the board, outside the shop.
    pub fn add_joker(&mut self, id: &str) -> Option<usize> {
        let ability = self.catalog.instantiate(id)?;
        self.jokers.push(ability).ok()
    }

    fn require_phase(&self, phase: RunPhase) -> Result<(), RunError> {
        if self.progress.phase != phase {
            return Err(RunError::InvalidPhase(self.progress.phase));
        }
        Ok(())
    }
}
