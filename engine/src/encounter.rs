//! Encounter state and turn order.
//!
//! The encounter owns an initiative-ordered list of combat characters, the
//! current turn counter (0 = not started), the id of the acting combatant,
//! and the append-only combat log. All mutations keep the list sorted
//! descending by initiative with a stable sort, so ties hold their relative
//! order across edits.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::roster::{new_id, Monster, Player, StatBlock, StatKey};

/// What a combatant carries into the fight. Monster-backed instances act
/// with a stat block and an action list; player-backed ones only defend
/// with an armor class.
///
/// Serialized untagged: a persisted record with a `stats` field reloads as
/// Monster, one with `armorClass` as Player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Sheet {
    Monster(MonsterSheet),
    Player(PlayerSheet),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonsterSheet {
    pub id: String,
    pub name: String,
    pub stats: StatBlock,
    #[serde(default)]
    pub action_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSheet {
    pub id: String,
    pub name: String,
    pub armor_class: i32,
}

impl Sheet {
    pub fn id(&self) -> &str {
        match self {
            Sheet::Monster(m) => &m.id,
            Sheet::Player(p) => &p.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Sheet::Monster(m) => &m.name,
            Sheet::Player(p) => &p.name,
        }
    }

    pub fn set_name(&mut self, name: String) {
        match self {
            Sheet::Monster(m) => m.name = name,
            Sheet::Player(p) => p.name = name,
        }
    }

    pub fn stats(&self) -> Option<&StatBlock> {
        match self {
            Sheet::Monster(m) => Some(&m.stats),
            Sheet::Player(_) => None,
        }
    }

    pub fn armor_class(&self) -> Option<i32> {
        match self {
            Sheet::Monster(_) => None,
            Sheet::Player(p) => Some(p.armor_class),
        }
    }

    /// Empty for player-backed combatants.
    pub fn action_ids(&self) -> &[String] {
        match self {
            Sheet::Monster(m) => &m.action_ids,
            Sheet::Player(_) => &[],
        }
    }
}

/// A template placed into the encounter. Gets a fresh id so several
/// instances of the same template stay independent; removing it never
/// touches the roster template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatCharacter {
    pub character: Sheet,
    pub initiative: i32,
    /// Action id → turn it was last used on. Only cooldown actions record here.
    #[serde(default)]
    pub used_actions: HashMap<String, u32>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Encounter {
    #[serde(default)]
    pub combatants: Vec<CombatCharacter>,
    /// 0 until the battle starts; increments each time the actor list wraps.
    #[serde(default)]
    pub current_turn: u32,
    #[serde(default)]
    pub log: Vec<String>,
    #[serde(default)]
    pub current_character_id: Option<String>,
}

impl Encounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn started(&self) -> bool {
        self.current_turn != 0
    }

    pub fn combatant(&self, id: &str) -> Option<&CombatCharacter> {
        self.combatants.iter().find(|c| c.character.id() == id)
    }

    pub(crate) fn combatant_mut(&mut self, id: &str) -> Option<&mut CombatCharacter> {
        self.combatants.iter_mut().find(|c| c.character.id() == id)
    }

    pub fn current_actor(&self) -> Option<&CombatCharacter> {
        self.current_character_id
            .as_deref()
            .and_then(|id| self.combatant(id))
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.combatants.iter().position(|c| c.character.id() == id)
    }

    /// Stable descending sort; equal initiatives keep their prior order.
    pub(crate) fn sort_by_initiative(&mut self) {
        self.combatants.sort_by(|a, b| b.initiative.cmp(&a.initiative));
    }

    /// Each template becomes a fresh instance with initiative d20 + DEX mod.
    pub fn add_monsters(&mut self, templates: &[Monster], mut roll: impl FnMut(u32) -> i32) {
        for template in templates {
            let initiative = roll(20) + template.stats.modifier(StatKey::Dexterity);
            self.combatants.push(CombatCharacter {
                character: Sheet::Monster(MonsterSheet {
                    id: new_id(),
                    name: template.name.clone(),
                    stats: template.stats,
                    action_ids: template.action_ids.clone(),
                }),
                initiative,
                used_actions: HashMap::new(),
            });
        }
        self.sort_by_initiative();
    }

    /// Players join at initiative 0: they roll at the table and the number
    /// is entered by hand via [`Encounter::set_initiative`].
    pub fn add_players(&mut self, templates: &[Player]) {
        for template in templates {
            self.combatants.push(CombatCharacter {
                character: Sheet::Player(PlayerSheet {
                    id: new_id(),
                    name: template.name.clone(),
                    armor_class: template.armor_class,
                }),
                initiative: 0,
                used_actions: HashMap::new(),
            });
        }
        self.sort_by_initiative();
    }

    /// Hand the turn to the next combatant, opening the battle on the first
    /// call. A wrap back to the head of the list starts a new turn. No-op
    /// while the list is empty.
    pub fn advance_turn(&mut self) {
        if self.combatants.is_empty() {
            return;
        }

        if self.current_turn == 0 {
            self.sort_by_initiative();
            self.current_turn = 1;
            let head = &self.combatants[0];
            self.current_character_id = Some(head.character.id().to_string());
            self.log.push(format!("===== TURN {} =====", self.current_turn));
            self.log.push(format!("----- ACTING: {} -----", head.character.name()));
            return;
        }

        let here = self
            .current_character_id
            .as_deref()
            .and_then(|id| self.position(id));
        let next = here.map_or(0, |i| (i + 1) % self.combatants.len());
        if next == 0 {
            self.current_turn += 1;
            self.log.push(format!("===== TURN {} =====", self.current_turn));
        }
        let actor = &self.combatants[next];
        self.current_character_id = Some(actor.character.id().to_string());
        self.log.push(format!("----- ACTING: {} -----", actor.character.name()));
    }

    /// Manual initiative edit; re-sorts the order.
    pub fn set_initiative(&mut self, id: &str, value: i32) {
        if let Some(combatant) = self.combatant_mut(id) {
            combatant.initiative = value;
            self.sort_by_initiative();
        }
    }

    /// Display-name edit; order is untouched.
    pub fn rename(&mut self, id: &str, name: &str) {
        if let Some(combatant) = self.combatant_mut(id) {
            combatant.character.set_name(name.to_string());
        }
    }

    /// Remove a combatant ("dies"). If it is the acting combatant, the turn
    /// passes to its successor first: the next in order, the new-last when
    /// the old-last dies, or nobody when it was alone. The replacement is
    /// looked up against pre-removal indices.
    pub fn remove_combatant(&mut self, id: &str) {
        if self.current_character_id.as_deref() == Some(id) {
            if let Some(index) = self.position(id) {
                let last = self.combatants.len() - 1;
                self.current_character_id = if self.combatants.len() == 1 {
                    None
                } else if index == last {
                    Some(self.combatants[last - 1].character.id().to_string())
                } else {
                    Some(self.combatants[index + 1].character.id().to_string())
                };
            }
        }
        self.combatants.retain(|c| c.character.id() != id);
    }
}
