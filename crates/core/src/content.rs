use crate::{EffectVariant, Outcome, ScoringContext};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An owned bonus card: display metadata plus at most one effect. Abilities
/// built from an unknown effect id carry no effect and never trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusCardAbility {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cost: i64,
    #[serde(default)]
    pub atlas_index: u32,
    #[serde(default)]
    pub effect: Option<EffectVariant>,
}

impl BonusCardAbility {
    pub fn new(id: impl Into<String>, name: impl Into<String>, effect: EffectVariant) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            cost: 0,
            atlas_index: 0,
            effect: Some(effect),
        }
    }

    pub fn inert(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            cost: 0,
            atlas_index: 0,
            effect: None,
        }
    }

    pub fn with_cost(mut self, cost: i64) -> Self {
        self.cost = cost;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn is_inert(&self) -> bool {
        self.effect.is_none()
    }

    pub fn evaluate(&self, ctx: &ScoringContext<'_>) -> Option<Outcome> {
        self.effect.as_ref()?.evaluate(self, ctx)
    }

    pub fn sell_value(&self) -> i64 {
        (self.cost / 2).max(1)
    }
}

/// Every ability the game knows about, keyed by id. Built once by the
/// loader and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AbilityCatalog {
    abilities: BTreeMap<String, BonusCardAbility>,
}

impl AbilityCatalog {
    pub fn new(abilities: impl IntoIterator<Item = BonusCardAbility>) -> Self {
        Self {
            abilities: abilities
                .into_iter()
                .map(|ability| (ability.id.clone(), ability))
                .collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&BonusCardAbility> {
        self.abilities.get(id)
    }

    pub fn instantiate(&self, id: &str) -> Option<BonusCardAbility> {
        self.get(id).cloned()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.abilities.keys().map(|id| id.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &BonusCardAbility> + '_ {
        self.abilities.values()
    }

    pub fn len(&self) -> usize {
        self.abilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.abilities.is_empty()
    }

    pub fn pick(&self, rng: &mut crate::RngState) -> Option<&BonusCardAbility> {
        let idx = rng.below(self.abilities.len())?;
        self.abilities.values().nth(idx)
    }
}
