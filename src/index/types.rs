use crate::error::SearchError;
use crate::utils::{collapse_whitespace, entry_tokens, normalize_key};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Dense identifier for an entry within one generation (position in the store)
pub type DocId = u32;

/// Dense identifier for a token within one generation (position in the vocabulary)
pub type TokenId = u32;

/// A shingle is three characters packed into a u64 (21 bits per `char`)
pub type Shingle = u64;

/// Record category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum EntryType {
    #[serde(alias = "pokemon")]
    Creature = 0,
    Item = 1,
    Ability = 2,
    Move = 3,
}

impl EntryType {
    /// All categories, in build order.
    pub const ALL: [EntryType; 4] = [
        EntryType::Creature,
        EntryType::Item,
        EntryType::Ability,
        EntryType::Move,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Creature => "creature",
            EntryType::Item => "item",
            EntryType::Ability => "ability",
            EntryType::Move => "move",
        }
    }

    /// Plural form, as used for data file keys ("items", "moves", ...)
    pub fn plural(&self) -> &'static str {
        match self {
            EntryType::Creature => "creatures",
            EntryType::Item => "items",
            EntryType::Ability => "abilities",
            EntryType::Move => "moves",
        }
    }

    /// Slot index for per-category arrays.
    #[inline]
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryType {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "creature" | "creatures" | "pokemon" | "pokémon" => Ok(EntryType::Creature),
            "item" | "items" => Ok(EntryType::Item),
            "ability" | "abilities" => Ok(EntryType::Ability),
            "move" | "moves" => Ok(EntryType::Move),
            other => Err(SearchError::InvalidArgument(format!(
                "unknown entry type {other:?}"
            ))),
        }
    }
}

/// A normalized, searchable record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexEntry {
    /// `"<type>:<lowercased name with collapsed whitespace>"`
    pub id: String,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    /// Display name
    pub name: String,
    pub description: Option<String>,
    /// Sorted, deduplicated tokens from name and description
    pub tokens: Vec<String>,
    /// Comparison form of `name` (see `normalize_key`)
    #[serde(skip)]
    pub(crate) name_key: String,
    /// Lowercased description for substring checks
    #[serde(skip)]
    pub(crate) description_key: String,
}

impl IndexEntry {
    /// Build an entry, deriving its id, tokens and comparison keys.
    pub fn new(entry_type: EntryType, name: &str, description: Option<&str>) -> Self {
        let name = name.trim().to_string();
        let description = description
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        Self {
            id: Self::make_id(entry_type, &name),
            entry_type,
            tokens: entry_tokens(&name, description.as_deref()),
            name_key: normalize_key(&name),
            description_key: description
                .as_deref()
                .map(str::to_lowercase)
                .unwrap_or_default(),
            name,
            description,
        }
    }

    /// Id for a (type, name) pair: lowercase with whitespace collapsed.
    pub fn make_id(entry_type: EntryType, name: &str) -> String {
        format!("{}:{}", entry_type, collapse_whitespace(name))
    }

    /// Comparison form of the name
    pub fn name_key(&self) -> &str {
        &self.name_key
    }

    /// Lowercased description, empty when there is none
    pub fn description_key(&self) -> &str {
        &self.description_key
    }
}

/// One ranked search hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub score: f32,
}

/// Set of entry types a search is restricted to. Empty means every type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TypeFilter(u8);

impl TypeFilter {
    /// Filter admitting every type.
    pub fn all() -> Self {
        Self(0)
    }

    pub fn only(types: &[EntryType]) -> Self {
        types.iter().copied().collect()
    }

    /// Parse filter tokens, ignoring unknown ones.
    pub fn parse<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut filter = Self::all();
        for token in tokens {
            match token.as_ref().parse::<EntryType>() {
                Ok(entry_type) => filter.insert(entry_type),
                Err(e) => tracing::debug!("ignoring type filter token: {}", e),
            }
        }
        filter
    }

    pub fn insert(&mut self, entry_type: EntryType) {
        self.0 |= 1 << entry_type.index();
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Whether `entry_type` passes the filter.
    pub fn admits(&self, entry_type: EntryType) -> bool {
        self.is_empty() || self.0 & (1 << entry_type.index()) != 0
    }

    /// Explicitly selected types (empty for an unrestricted filter).
    pub fn types(&self) -> impl Iterator<Item = EntryType> + '_ {
        EntryType::ALL
            .into_iter()
            .filter(|t| self.0 & (1 << t.index()) != 0)
    }
}

impl FromIterator<EntryType> for TypeFilter {
    fn from_iter<I: IntoIterator<Item = EntryType>>(iter: I) -> Self {
        let mut filter = Self::all();
        for entry_type in iter {
            filter.insert(entry_type);
        }
        filter
    }
}
