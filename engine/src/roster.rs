//! Roster definitions and their stores.
//!
//! Actions, monsters, and players are authored outside the battle and fed to
//! the engine read-only. Each roster persists as a JSON array under its own
//! record key; the engine never writes back to a template mid-encounter.

use std::fmt;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::snapshot::{RecordStore, StoreError};

pub const ACTIONS_KEY: &str = "actions";
pub const MONSTERS_KEY: &str = "monsters";
pub const PLAYERS_KEY: &str = "players";

/// Die sizes the roster editor offers. The engine itself accepts any
/// positive number of sides.
pub const STANDARD_DICE: [u32; 7] = [4, 6, 8, 10, 12, 20, 100];

/// The six stats every stat block carries. Serialized names are the stable
/// domain vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatKey {
    Strength,
    Constitution,
    Dexterity,
    Intelligence,
    Wisdom,
    Charisma,
}

impl StatKey {
    pub const ALL: [StatKey; 6] = [
        StatKey::Strength,
        StatKey::Constitution,
        StatKey::Dexterity,
        StatKey::Intelligence,
        StatKey::Wisdom,
        StatKey::Charisma,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StatKey::Strength => "Strength",
            StatKey::Constitution => "Constitution",
            StatKey::Dexterity => "Dexterity",
            StatKey::Intelligence => "Intelligence",
            StatKey::Wisdom => "Wisdom",
            StatKey::Charisma => "Charisma",
        }
    }
}

impl fmt::Display for StatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StatBlock {
    pub strength: i32,
    pub constitution: i32,
    pub dexterity: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub charisma: i32,
}

impl StatBlock {
    pub fn score(&self, key: StatKey) -> i32 {
        match key {
            StatKey::Strength => self.strength,
            StatKey::Constitution => self.constitution,
            StatKey::Dexterity => self.dexterity,
            StatKey::Intelligence => self.intelligence,
            StatKey::Wisdom => self.wisdom,
            StatKey::Charisma => self.charisma,
        }
    }

    pub fn modifier(&self, key: StatKey) -> i32 {
        crate::stat_mod(self.score(key))
    }
}

/// Immutable attack/ability definition owned by the action roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub id: String,
    pub name: String,
    pub dice_count: u32,
    pub dice_sides: u32,
    pub modifier: i32,
    pub stat_key: StatKey,
    /// None = no cooldown; Some(n) locks the action for n full turns after use.
    #[serde(default)]
    pub cooldown: Option<u32>,
    #[serde(default)]
    pub hit_modifier: i32,
    #[serde(default)]
    pub requires_target: bool,
}

impl Action {
    /// One-line form for roster panels, e.g. `Bite : 1d6 + Strength + 2`.
    pub fn summary(&self) -> String {
        let flat = if self.modifier > 0 {
            format!(" + {}", self.modifier)
        } else {
            String::new()
        };
        format!(
            "{} : {}d{} + {}{}",
            self.name, self.dice_count, self.dice_sides, self.stat_key, flat
        )
    }
}

/// NPC combatant template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Monster {
    pub id: String,
    pub name: String,
    pub stats: StatBlock,
    #[serde(default)]
    pub action_ids: Vec<String>,
}

impl Monster {
    pub fn modifier(&self, key: StatKey) -> i32 {
        self.stats.modifier(key)
    }
}

/// PC stand-in: the table rolls for players, the tracker only needs a
/// defense threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: String,
    pub name: String,
    pub armor_class: i32,
}

/// Action definitions keyed by id, insertion order preserved for display.
pub type ActionIndex = IndexMap<String, Action>;

pub fn index_actions(actions: Vec<Action>) -> ActionIndex {
    actions.into_iter().map(|a| (a.id.clone(), a)).collect()
}

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Error)]
pub enum RosterError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("malformed roster payload: expected a JSON array of records")]
    Malformed,
}

/// Load-all / save-all access to the three roster keys.
pub struct RosterStore<S> {
    store: S,
}

impl<S: RecordStore> RosterStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn load_actions(&self) -> Result<Vec<Action>, RosterError> {
        self.load_list(ACTIONS_KEY)
    }

    pub fn save_actions(&mut self, actions: &[Action]) -> Result<(), RosterError> {
        self.save_list(ACTIONS_KEY, actions)
    }

    /// Monsters may reference actions that were since deleted; dangling ids
    /// are dropped here so they never reach the engine.
    pub fn load_monsters(&self, actions: &ActionIndex) -> Result<Vec<Monster>, RosterError> {
        let mut monsters: Vec<Monster> = self.load_list(MONSTERS_KEY)?;
        for monster in &mut monsters {
            monster.action_ids.retain(|id| actions.contains_key(id));
        }
        Ok(monsters)
    }

    pub fn save_monsters(&mut self, monsters: &[Monster]) -> Result<(), RosterError> {
        self.save_list(MONSTERS_KEY, monsters)
    }

    pub fn load_players(&self) -> Result<Vec<Player>, RosterError> {
        self.load_list(PLAYERS_KEY)
    }

    pub fn save_players(&mut self, players: &[Player]) -> Result<(), RosterError> {
        self.save_list(PLAYERS_KEY, players)
    }

    fn load_list<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, RosterError> {
        match self.store.read(key)? {
            Some(text) => parse_records(&text),
            None => Ok(Vec::new()),
        }
    }

    fn save_list<T: Serialize>(&mut self, key: &str, items: &[T]) -> Result<(), RosterError> {
        let text = serde_json::to_string(items).map_err(StoreError::from)?;
        self.store.write(key, &text)?;
        Ok(())
    }
}

/// Structural gate for imported payloads: the text must parse as a JSON
/// array of records. Any failure aborts the whole import; nothing is
/// partially applied.
pub fn parse_records<T: DeserializeOwned>(text: &str) -> Result<Vec<T>, RosterError> {
    let value: serde_json::Value = serde_json::from_str(text).map_err(|_| RosterError::Malformed)?;
    if !value.is_array() {
        return Err(RosterError::Malformed);
    }
    serde_json::from_value(value).map_err(|_| RosterError::Malformed)
}

/// Pretty JSON for the clipboard-export path.
pub fn export_records<T: Serialize>(items: &[T]) -> Result<String, StoreError> {
    Ok(serde_json::to_string_pretty(items)?)
}
