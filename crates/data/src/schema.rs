use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use jester_core::{GameConfig, HandRule, RunRules};

/// One entry of `jokers.json`, keyed by ability id in the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawAbilityRecord {
    #[serde(default = "unknown_name")]
    pub name: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub cost: i64,
    #[serde(default)]
    pub atlas_id: u32,
    #[serde(default)]
    pub effect_id: String,
    #[serde(default)]
    pub params: Value,
}

/// One entry of `ranks.json`, keyed by rank name in the file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RawRankEntry {
    #[serde(default)]
    pub chips: i64,
}

fn unknown_name() -> String {
    "Unknown".to_string()
}
