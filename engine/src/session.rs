//! The battle session: single owner of the authoritative encounter.
//!
//! All engine operations run synchronously to completion in response to one
//! external call; there is exactly one mutator. Constructing the session
//! performs the snapshot load, so no operation can run before stored state
//! is in memory. Every mutation is followed by a best-effort save: the
//! in-memory encounter stays authoritative for the session, so a failed
//! write is logged and play continues.

use tracing::warn;

use crate::cooldown;
use crate::encounter::{CombatCharacter, Encounter};
use crate::resolve::{use_action, UseActionError};
use crate::roster::{Action, Monster, Player};
use crate::snapshot::{self, RecordStore, StoreError};
use crate::Dice;

pub struct BattleSession<S: RecordStore> {
    encounter: Encounter,
    store: S,
    dice: Dice,
}

impl<S: RecordStore> BattleSession<S> {
    /// Load the persisted snapshot (or start empty) before accepting any
    /// operation.
    pub fn open(store: S, dice: Dice) -> Result<Self, StoreError> {
        let encounter = snapshot::load_encounter(&store)?;
        Ok(Self { encounter, store, dice })
    }

    pub fn encounter(&self) -> &Encounter {
        &self.encounter
    }

    pub fn log(&self) -> &[String] {
        &self.encounter.log
    }

    pub fn current_actor(&self) -> Option<&CombatCharacter> {
        self.encounter.current_actor()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn add_monsters(&mut self, templates: &[Monster]) {
        let dice = &mut self.dice;
        self.encounter.add_monsters(templates, |sides| dice.roll_die(sides));
        self.persist();
    }

    pub fn add_players(&mut self, templates: &[Player]) {
        self.encounter.add_players(templates);
        self.persist();
    }

    pub fn advance_turn(&mut self) {
        self.encounter.advance_turn();
        self.persist();
    }

    pub fn set_initiative(&mut self, id: &str, value: i32) {
        self.encounter.set_initiative(id, value);
        self.persist();
    }

    pub fn rename(&mut self, id: &str, name: &str) {
        self.encounter.rename(id, name);
        self.persist();
    }

    pub fn remove_combatant(&mut self, id: &str) {
        self.encounter.remove_combatant(id);
        self.persist();
    }

    /// Warnings leave the encounter untouched and skip the save.
    pub fn use_action(
        &mut self,
        actor_id: &str,
        action: &Action,
        target_id: Option<&str>,
    ) -> Result<(), UseActionError> {
        let dice = &mut self.dice;
        let outcome = use_action(&mut self.encounter, actor_id, action, target_id, |sides| {
            dice.roll_die(sides)
        });
        if outcome.is_ok() {
            self.persist();
        }
        outcome
    }

    /// The user-visible "reset battle": drop everything and persist the
    /// empty encounter.
    pub fn reset(&mut self) {
        self.encounter = Encounter::default();
        self.persist();
    }

    /// Cooldown status for a roster panel: availability plus remaining
    /// turns clamped for display.
    pub fn action_status(&self, combatant_id: &str, action: &Action) -> (bool, u32) {
        let last_used = self
            .encounter
            .combatant(combatant_id)
            .and_then(|c| c.used_actions.get(&action.id).copied());
        let available = cooldown::is_available(action, last_used, self.encounter.current_turn);
        let remaining =
            cooldown::remaining_turns(action, self.encounter.current_turn, last_used).max(0) as u32;
        (available, remaining)
    }

    fn persist(&mut self) {
        if let Err(err) = snapshot::save_encounter(&mut self.store, &self.encounter) {
            warn!(%err, "failed to persist encounter snapshot");
        }
    }
}
