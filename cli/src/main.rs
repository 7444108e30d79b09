use std::path::PathBuf;

use clap::{Parser, Subcommand};
use engine::snapshot::{clear_encounter, load_encounter};
use engine::{
    Action, BattleSession, Dice, DirStore, MemStore, Monster, Player, Sheet, StatBlock, StatKey,
};

#[derive(Subcommand)]
enum Cmd {
    /// Roll dice with a seeded source
    Roll {
        /// RNG seed for determinism
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Die size
        #[arg(long, default_value_t = 20)]
        sides: u32,
        /// Number of rolls
        #[arg(long, default_value_t = 5)]
        count: u32,
    },
    /// Run a seeded demo battle in memory and print the combat log
    Demo {
        /// RNG seed for determinism
        #[arg(long, default_value_t = 2025)]
        seed: u64,
        /// Turns to play before stopping
        #[arg(long, default_value_t = 3)]
        turns: u32,
    },
    /// Print the persisted encounter snapshot
    Show {
        /// Directory holding the tracker's record files
        #[arg(long, default_value = ".tracker")]
        data_dir: PathBuf,
        /// Emit the raw snapshot as pretty JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Reset the persisted encounter to an empty battle
    Reset {
        /// Directory holding the tracker's record files
        #[arg(long, default_value = ".tracker")]
        data_dir: PathBuf,
    },
}

#[derive(Parser)]
#[command(name = "tracker-cli")]
#[command(about = "Combat tracker CLI harness")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

fn sample_actions() -> Vec<Action> {
    vec![
        Action {
            id: "bite".to_string(),
            name: "Bite".to_string(),
            dice_count: 1,
            dice_sides: 6,
            modifier: 2,
            stat_key: StatKey::Strength,
            cooldown: None,
            hit_modifier: 4,
            requires_target: true,
        },
        Action {
            id: "fire-breath".to_string(),
            name: "Fire Breath".to_string(),
            dice_count: 2,
            dice_sides: 6,
            modifier: 3,
            stat_key: StatKey::Constitution,
            cooldown: Some(2),
            hit_modifier: 3,
            requires_target: true,
        },
        Action {
            id: "howl".to_string(),
            name: "Howl".to_string(),
            dice_count: 1,
            dice_sides: 4,
            modifier: 0,
            stat_key: StatKey::Charisma,
            cooldown: Some(1),
            requires_target: false,
            hit_modifier: 0,
        },
    ]
}

fn sample_goblin() -> Monster {
    Monster {
        id: "goblin".to_string(),
        name: "Goblin".to_string(),
        stats: StatBlock {
            strength: 12,
            constitution: 14,
            dexterity: 14,
            intelligence: 8,
            wisdom: 10,
            charisma: 8,
        },
        action_ids: sample_actions().into_iter().map(|a| a.id).collect(),
    }
}

fn sample_player() -> Player {
    Player {
        id: "sera".to_string(),
        name: "Sera".to_string(),
        armor_class: 14,
    }
}

fn run_demo(seed: u64, turns: u32) -> anyhow::Result<()> {
    let actions = sample_actions();
    let mut session = BattleSession::open(MemStore::default(), Dice::from_seed(seed))?;
    session.add_monsters(&[sample_goblin()]);
    session.add_players(&[sample_player()]);

    while session.encounter().current_turn < turns {
        session.advance_turn();

        let Some(actor) = session.current_actor() else { break };
        let actor_id = actor.character.id().to_string();
        let action_ids: Vec<String> = actor.character.action_ids().to_vec();
        if action_ids.is_empty() {
            continue; // players act at the table
        }

        let target_id = session
            .encounter()
            .combatants
            .iter()
            .find(|c| matches!(c.character, Sheet::Player(_)))
            .map(|c| c.character.id().to_string());

        for action in actions.iter().filter(|a| action_ids.contains(&a.id)) {
            let (available, _) = session.action_status(&actor_id, action);
            if !available {
                continue;
            }
            let target = if action.requires_target {
                target_id.as_deref()
            } else {
                None
            };
            if let Err(warning) = session.use_action(&actor_id, action, target) {
                println!("! {warning}");
            }
        }
    }

    for line in session.log() {
        println!("{line}");
    }
    Ok(())
}

fn show(data_dir: PathBuf, json: bool) -> anyhow::Result<()> {
    let store = DirStore::new(data_dir);
    let enc = load_encounter(&store)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&enc)?);
        return Ok(());
    }
    println!("turn: {}", enc.current_turn);
    for combatant in &enc.combatants {
        let marker = if enc.current_character_id.as_deref() == Some(combatant.character.id()) {
            "*"
        } else {
            " "
        };
        println!(
            "{} {} (initiative {})",
            marker,
            combatant.character.name(),
            combatant.initiative
        );
    }
    for line in &enc.log {
        println!("{line}");
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Roll { seed, sides, count } => {
            let mut dice = Dice::from_seed(seed);
            for _ in 0..count {
                println!("d{} -> {}", sides, dice.roll_die(sides));
            }
            Ok(())
        }
        Cmd::Demo { seed, turns } => run_demo(seed, turns),
        Cmd::Show { data_dir, json } => show(data_dir, json),
        Cmd::Reset { data_dir } => {
            let mut store = DirStore::new(data_dir);
            clear_encounter(&mut store)?;
            println!("battle reset");
            Ok(())
        }
    }
}
