//! Action resolution: damage rolls, attack rolls, critical outcomes, and
//! the log lines they produce.

use thiserror::Error;

use crate::cooldown;
use crate::encounter::{Encounter, Sheet};
use crate::roster::Action;
use crate::roll_damage;

/// Rejections the table sees as transient warnings. The encounter is
/// untouched; the user may retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UseActionError {
    #[error("this combatant cannot use actions right now")]
    NotActing,
    #[error("{action} is on cooldown for {remaining} more turns")]
    OnCooldown { action: String, remaining: i32 },
    #[error("unknown combatant: {0}")]
    UnknownCombatant(String),
    #[error("unknown target: {0}")]
    UnknownTarget(String),
    #[error("{0} has no stat block to act with")]
    NoStatBlock(String),
}

/// Resolve one action use by the acting combatant.
///
/// Untargeted actions (or targeted ones used without a defending target)
/// log a single damage line. Targeted actions against a player-backed
/// combatant roll a raw d20 first: 20 is a critical success with doubled
/// damage, 1 a critical miss, anything else hits when
/// `roll + stat mod + hit modifier >= armor class` (equality hits).
///
/// On success the cooldown use is recorded under the action's real id at
/// the current turn, and the list is re-sorted like every other mutation
/// (a no-op for order here).
pub fn use_action(
    encounter: &mut Encounter,
    actor_id: &str,
    action: &Action,
    target_id: Option<&str>,
    mut roll: impl FnMut(u32) -> i32,
) -> Result<(), UseActionError> {
    if !encounter.started() || encounter.current_character_id.as_deref() != Some(actor_id) {
        return Err(UseActionError::NotActing);
    }

    let actor = encounter
        .combatant(actor_id)
        .ok_or_else(|| UseActionError::UnknownCombatant(actor_id.to_string()))?;
    let stats = match &actor.character {
        Sheet::Monster(m) => m.stats,
        Sheet::Player(p) => return Err(UseActionError::NoStatBlock(p.name.clone())),
    };
    let actor_name = actor.character.name().to_string();

    let last_used = actor.used_actions.get(&action.id).copied();
    if !cooldown::is_available(action, last_used, encounter.current_turn) {
        return Err(UseActionError::OnCooldown {
            action: action.name.clone(),
            remaining: cooldown::remaining_turns(action, encounter.current_turn, last_used),
        });
    }

    let stat_modifier = stats.modifier(action.stat_key);

    // Attack-roll resolution only applies when the action wants a target
    // and the chosen combatant defends with an armor class.
    let defender = match (action.requires_target, target_id) {
        (true, Some(tid)) => {
            let target = encounter
                .combatant(tid)
                .ok_or_else(|| UseActionError::UnknownTarget(tid.to_string()))?;
            match &target.character {
                Sheet::Player(p) => Some((p.name.clone(), p.armor_class)),
                Sheet::Monster(_) => None,
            }
        }
        _ => None,
    };

    match defender {
        None => {
            let total = roll_damage(action, stat_modifier, &mut roll);
            encounter
                .log
                .push(format!("{} used {}: {}", actor_name, action.name, total));
        }
        Some((target_name, armor_class)) => {
            let raw = roll(20);
            if raw == 20 {
                encounter.log.push(format!(
                    "{} used {} on {} [Hit]: (20) CRITICAL SUCCESS",
                    actor_name, action.name, target_name
                ));
                // Rolled once, then doubled.
                let total = roll_damage(action, stat_modifier, &mut roll);
                encounter.log.push(format!(
                    "{} used {} on {} [Damage x2]: {}",
                    actor_name,
                    action.name,
                    target_name,
                    2 * total
                ));
            } else if raw == 1 {
                encounter.log.push(format!(
                    "{} used {} on {} [Hit]: (1) CRITICAL MISS",
                    actor_name, action.name, target_name
                ));
            } else {
                let total = raw + stat_modifier + action.hit_modifier;
                if total >= armor_class {
                    encounter.log.push(format!(
                        "{} used {} on {} [Hit]: {}",
                        actor_name, action.name, target_name, total
                    ));
                    let damage = roll_damage(action, stat_modifier, &mut roll);
                    encounter.log.push(format!(
                        "{} used {} on {} [Damage]: {}",
                        actor_name, action.name, target_name, damage
                    ));
                } else {
                    encounter.log.push(format!(
                        "{} used {} on {} [Hit]: {} (MISS)",
                        actor_name, action.name, target_name, total
                    ));
                }
            }
        }
    }

    if action.cooldown.is_some() {
        let turn = encounter.current_turn;
        if let Some(actor) = encounter.combatant_mut(actor_id) {
            actor.used_actions.insert(action.id.clone(), turn);
        }
    }
    // Order cannot change here; the sort mirrors the other mutation paths.
    encounter.sort_by_initiative();
    Ok(())
}
