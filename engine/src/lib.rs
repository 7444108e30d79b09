use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub mod cooldown;
pub mod encounter;
pub mod resolve;
pub mod roster;
pub mod session;
pub mod snapshot;

pub use encounter::{CombatCharacter, Encounter, MonsterSheet, PlayerSheet, Sheet};
pub use resolve::{use_action, UseActionError};
pub use roster::{Action, ActionIndex, Monster, Player, StatBlock, StatKey};
pub use session::BattleSession;
pub use snapshot::{DirStore, MemStore, RecordStore, StoreError};

/// Seedable dice source; every random outcome in the engine flows through one of these.
pub struct Dice {
    rng: ChaCha8Rng,
}

impl Dice {
    pub fn from_seed(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    pub fn from_entropy() -> Self {
        Self { rng: ChaCha8Rng::from_entropy() }
    }

    /// Uniform roll in [1, sides].
    pub fn roll_die(&mut self, sides: u32) -> i32 {
        self.rng.gen_range(1..=sides) as i32
    }

    pub fn d20(&mut self) -> i32 {
        self.roll_die(20)
    }

    /// d20 + dexterity modifier, rolled when a monster joins an encounter.
    pub fn roll_initiative(&mut self, dex_mod: i32) -> i32 {
        self.d20() + dex_mod
    }
}

/// Stat modifier = floor((score - 10) / 2) for integer scores.
pub fn stat_mod(score: i32) -> i32 {
    // `div_euclid` with positive divisor matches mathematical floor division.
    (score - 10).div_euclid(2)
}

/// Damage total: flat modifier + governing stat modifier + the action's dice.
///
/// The die roller is injected as a closure so resolution can run against a
/// seeded [`Dice`] in production and scripted faces in tests.
pub fn roll_damage(action: &Action, stat_modifier: i32, mut roll: impl FnMut(u32) -> i32) -> i32 {
    let mut total = action.modifier + stat_modifier;
    for _ in 0..action.dice_count {
        total += roll(action.dice_sides);
    }
    total
}
