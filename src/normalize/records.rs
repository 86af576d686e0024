//! Per-category record adapters.
//!
//! Each category has its own record shape. Decoding goes through one typed
//! struct per category, wrapped in [`RawRecord`], so the rest of the crate
//! only ever sees a name and a description. Only `name` is strictly typed;
//! a fallback field holding anything but a string counts as absent.

use crate::index::types::EntryType;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatureRecord {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub species: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemRecord {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub effect: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AbilityRecord {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub effect: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub short_effect: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MoveRecord {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub battle_effect: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub secondary_effect: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub category: Option<String>,
}

/// A decoded record, tagged by category
#[derive(Debug, Clone)]
pub enum RawRecord {
    Creature(CreatureRecord),
    Item(ItemRecord),
    Ability(AbilityRecord),
    Move(MoveRecord),
}

impl RawRecord {
    /// Decode a JSON value with the adapter for `category`.
    pub fn decode(category: EntryType, value: &Value) -> Result<Self, serde_json::Error> {
        Ok(match category {
            EntryType::Creature => RawRecord::Creature(CreatureRecord::deserialize(value)?),
            EntryType::Item => RawRecord::Item(ItemRecord::deserialize(value)?),
            EntryType::Ability => RawRecord::Ability(AbilityRecord::deserialize(value)?),
            EntryType::Move => RawRecord::Move(MoveRecord::deserialize(value)?),
        })
    }

    pub fn entry_type(&self) -> EntryType {
        match self {
            RawRecord::Creature(_) => EntryType::Creature,
            RawRecord::Item(_) => EntryType::Item,
            RawRecord::Ability(_) => EntryType::Ability,
            RawRecord::Move(_) => EntryType::Move,
        }
    }

    /// Display name, if the record has a non-blank one
    pub fn name(&self) -> Option<&str> {
        let name = match self {
            RawRecord::Creature(r) => r.name.as_deref(),
            RawRecord::Item(r) => r.name.as_deref(),
            RawRecord::Ability(r) => r.name.as_deref(),
            RawRecord::Move(r) => r.name.as_deref(),
        };
        present(name)
    }

    /// Description through the category's fallback chain
    pub fn description(&self) -> Option<&str> {
        match self {
            RawRecord::Creature(r) => first_present([&r.description, &r.species]),
            RawRecord::Item(r) => first_present([&r.effect, &r.category]),
            RawRecord::Ability(r) => {
                first_present([&r.effect, &r.short_effect, &r.description])
            }
            RawRecord::Move(r) => {
                first_present([&r.battle_effect, &r.secondary_effect, &r.category])
            }
        }
    }
}

/// Keep a string field, treat any other JSON shape as missing
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        _ => None,
    })
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn first_present<'a, const N: usize>(chain: [&'a Option<String>; N]) -> Option<&'a str> {
    chain.into_iter().find_map(|v| present(v.as_deref()))
}
