//! Core game logic: hand classification, bonus card effects and scoring.
//! Keep this crate free of IO and platform concerns.

pub mod area;
pub mod cards;
pub mod config;
pub mod content;
pub mod deck;
pub mod effects;
pub mod engine;
pub mod events;
pub mod hand;
pub mod rng;
pub mod run;
pub mod scoring;
pub mod shop;

pub use area::*;
pub use cards::*;
pub use config::*;
pub use content::*;
pub use deck::*;
pub use effects::*;
pub use engine::*;
pub use events::*;
pub use hand::*;
pub use rng::*;
pub use run::*;
pub use scoring::*;
pub use shop::*;
