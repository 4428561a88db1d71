use crate::schema::{GameConfig, RawAbilityRecord, RawRankEntry};
use anyhow::{bail, Context};
use jester_core::{AbilityCatalog, BonusCardAbility, EffectVariant, Rank, RankChips, Suit};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub const GAME_FILE: &str = "game.json";
pub const RANKS_FILE: &str = "ranks.json";
pub const JOKERS_FILE: &str = "jokers.json";

/// Everything a run needs from an assets directory, plus the degraded
/// entries that were tolerated along the way. A missing or broken rank
/// table or catalog degrades to an empty one; only `game.json` is fatal.
#[derive(Debug)]
pub struct LoadReport {
    pub config: GameConfig,
    pub rank_chips: RankChips,
    pub catalog: AbilityCatalog,
    pub warnings: Vec<String>,
}

pub fn load_assets(dir: &Path) -> anyhow::Result<LoadReport> {
    let mut warnings = Vec::new();
    let config = load_game_config(dir)?;
    let rank_chips = match load_rank_chips(&dir.join(RANKS_FILE), &mut warnings) {
        Ok(chips) => chips,
        Err(err) => {
            warn(&mut warnings, format!("{err:#}; every rank scores 0"));
            let chips = RankChips::default();
            warn_missing_ranks(&chips, &mut warnings);
            chips
        }
    };
    let catalog = match load_catalog(&dir.join(JOKERS_FILE), &mut warnings) {
        Ok(catalog) => catalog,
        Err(err) => {
            warn(&mut warnings, format!("{err:#}; no jokers available"));
            AbilityCatalog::default()
        }
    };
    log::info!(
        "loaded {} abilities and {} rank chip entries from {}",
        catalog.len(),
        rank_chips.len(),
        dir.display()
    );
    Ok(LoadReport {
        config,
        rank_chips,
        catalog,
        warnings,
    })
}

/// Reads `game.json` from `dir`; a missing file means the default rules.
pub fn load_game_config(dir: &Path) -> anyhow::Result<GameConfig> {
    let path = dir.join(GAME_FILE);
    if !path.exists() {
        log::debug!("no {} in {}, using default rules", GAME_FILE, dir.display());
        return Ok(GameConfig::default());
    }
    load_json(&path)
}

pub fn load_rank_chips(path: &Path, warnings: &mut Vec<String>) -> anyhow::Result<RankChips> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse_rank_chips(&raw, warnings).with_context(|| format!("parse {}", path.display()))
}

pub fn parse_rank_chips(raw: &str, warnings: &mut Vec<String>) -> anyhow::Result<RankChips> {
    let entries: BTreeMap<String, RawRankEntry> = serde_json::from_str(raw)?;
    let mut chips = RankChips::default();
    for (key, entry) in entries {
        match Rank::from_key(&key) {
            Some(rank) => chips.insert(rank, entry.chips),
            None => warn(warnings, format!("unknown rank key {key:?} in rank table")),
        }
    }
    warn_missing_ranks(&chips, warnings);
    Ok(chips)
}

fn warn_missing_ranks(chips: &RankChips, warnings: &mut Vec<String>) {
    for rank in chips.missing() {
        warn(
            warnings,
            format!("rank {} has no chip value and will score 0", rank.name()),
        );
    }
}

pub fn load_catalog(path: &Path, warnings: &mut Vec<String>) -> anyhow::Result<AbilityCatalog> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse_catalog(&raw, warnings).with_context(|| format!("parse {}", path.display()))
}

pub fn parse_catalog(raw: &str, warnings: &mut Vec<String>) -> anyhow::Result<AbilityCatalog> {
    let records: BTreeMap<String, RawAbilityRecord> = serde_json::from_str(raw)?;
    let mut abilities = Vec::with_capacity(records.len());
    for (id, record) in &records {
        abilities.push(build_ability(id, record, warnings)?);
    }
    Ok(AbilityCatalog::new(abilities))
}

/// Turns one record into an ability. Records whose effect cannot be built
/// become inert abilities and leave a warning behind.
pub fn build_ability(
    id: &str,
    record: &RawAbilityRecord,
    warnings: &mut Vec<String>,
) -> anyhow::Result<BonusCardAbility> {
    if id.trim().is_empty() {
        bail!("ability id cannot be empty");
    }
    let params = match &record.params {
        Value::Null => Map::new(),
        Value::Object(map) => map.clone(),
        other => bail!("params for {} must be an object, found {}", id, other),
    };
    let mut ability = match build_effect(&record.effect_id, &params) {
        Ok(effect) => BonusCardAbility::new(id, record.name.clone(), effect),
        Err(reason) => {
            warn(warnings, format!("ability {id} is inert: {reason}"));
            BonusCardAbility::inert(id, record.name.clone())
        }
    };
    ability.cost = record.cost;
    ability.atlas_index = record.atlas_id;
    Ok(ability.with_description(record.text.clone()))
}

fn build_effect(effect_id: &str, params: &Map<String, Value>) -> Result<EffectVariant, String> {
    let effect = match effect_id {
        "SimpleMult" | "FlatMult" => EffectVariant::FlatMult {
            amount: int_param(params, "amount")?,
        },
        "SuitMult" | "SuitConditionalMult" => EffectVariant::SuitConditionalMult {
            amount: int_param(params, "amount")?,
            suit: suit_param(params, "suit")?,
        },
        "AbstractJoker" | "CountScaledMult" => EffectVariant::CountScaledMult {
            per_unit: match params.get("per_unit") {
                Some(_) => int_param(params, "per_unit")?,
                None => int_param(params, "amount")?,
            },
        },
        "DiscardRebate" | "DiscardRankRebate" => EffectVariant::DiscardRankRebate {
            dollars: int_param(params, "dollars")?,
            rank: rank_param(params, "rank")?,
        },
        "FlatChips" => EffectVariant::FlatChips {
            amount: int_param(params, "amount")?,
        },
        "XMult" | "MultFactor" => EffectVariant::MultFactor {
            factor: float_param(params, "factor")?,
        },
        "HeldRankMult" => EffectVariant::HeldRankMult {
            amount: int_param(params, "amount")?,
            rank: rank_param(params, "rank")?,
        },
        "" => return Err("no effect id".to_string()),
        other => return Err(format!("unknown effect id {other:?}")),
    };
    Ok(effect)
}

fn int_param(params: &Map<String, Value>, key: &str) -> Result<i64, String> {
    match params.get(key) {
        None => Ok(0),
        Some(value) => value
            .as_i64()
            .or_else(|| {
                value
                    .as_f64()
                    .filter(|number| number.fract() == 0.0)
                    .map(|number| number as i64)
            })
            .ok_or_else(|| format!("param {key} is not an integer: {value}")),
    }
}

fn float_param(params: &Map<String, Value>, key: &str) -> Result<f64, String> {
    match params.get(key) {
        None => Ok(1.0),
        Some(value) => value
            .as_f64()
            .ok_or_else(|| format!("param {key} is not a number: {value}")),
    }
}

/// A missing suit falls back to Spades; a present but unknown one is an error.
fn suit_param(params: &Map<String, Value>, key: &str) -> Result<Suit, String> {
    match params.get(key) {
        None => Ok(Suit::Spades),
        Some(Value::String(name)) => {
            Suit::from_key(name).ok_or_else(|| format!("unknown suit {name:?}"))
        }
        Some(other) => Err(format!("param {key} is not a suit name: {other}")),
    }
}

fn rank_param(params: &Map<String, Value>, key: &str) -> Result<Rank, String> {
    match params.get(key) {
        None => Err(format!("missing param {key}")),
        Some(Value::String(name)) => {
            Rank::from_key(name).ok_or_else(|| format!("unknown rank {name:?}"))
        }
        Some(Value::Number(value)) => value
            .as_u64()
            .and_then(|value| u8::try_from(value).ok())
            .and_then(Rank::from_value)
            .ok_or_else(|| format!("unknown rank {value}")),
        Some(other) => Err(format!("param {key} is not a rank: {other}")),
    }
}

fn warn(warnings: &mut Vec<String>, message: String) {
    log::warn!("{message}");
    warnings.push(message);
}

fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value = serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(value)
}
