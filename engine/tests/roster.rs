use engine::roster::{
    export_records, index_actions, new_id, parse_records, RosterError, RosterStore,
};
use engine::{Action, MemStore, Monster, Player, StatBlock, StatKey};

fn bite() -> Action {
    Action {
        id: "a1".to_string(),
        name: "Bite".to_string(),
        dice_count: 1,
        dice_sides: 6,
        modifier: 2,
        stat_key: StatKey::Strength,
        cooldown: None,
        hit_modifier: 1,
        requires_target: true,
    }
}

#[test]
fn action_records_are_camel_case() {
    let value = serde_json::to_value(bite()).unwrap();
    assert_eq!(value["diceCount"], 1);
    assert_eq!(value["diceSides"], 6);
    assert_eq!(value["statKey"], "Strength");
    assert_eq!(value["hitModifier"], 1);
    assert_eq!(value["requiresTarget"], true);
    assert_eq!(value["cooldown"], serde_json::Value::Null);
}

#[test]
fn stat_block_serializes_under_the_six_stat_names() {
    let stats = StatBlock {
        strength: 16,
        constitution: 14,
        dexterity: 12,
        intelligence: 10,
        wisdom: 9,
        charisma: 8,
    };
    let value = serde_json::to_value(stats).unwrap();
    assert_eq!(value["Strength"], 16);
    assert_eq!(value["Charisma"], 8);
    assert_eq!(stats.modifier(StatKey::Strength), 3);
    assert_eq!(stats.modifier(StatKey::Wisdom), -1);
}

#[test]
fn action_summary_shows_the_dice_formula() {
    assert_eq!(bite().summary(), "Bite : 1d6 + Strength + 2");

    let mut claw = bite();
    claw.name = "Claw".to_string();
    claw.modifier = 0;
    claw.stat_key = StatKey::Dexterity;
    assert_eq!(claw.summary(), "Claw : 1d6 + Dexterity");
}

#[test]
fn parse_records_requires_a_json_array() {
    assert!(matches!(
        parse_records::<Action>("{\"id\":\"a1\"}"),
        Err(RosterError::Malformed)
    ));
    assert!(matches!(
        parse_records::<Action>("not json at all"),
        Err(RosterError::Malformed)
    ));
    assert!(matches!(
        parse_records::<Action>("42"),
        Err(RosterError::Malformed)
    ));
}

#[test]
fn a_bad_record_aborts_the_whole_import() {
    let text = r#"[
        {"id":"a1","name":"Bite","diceCount":1,"diceSides":6,"modifier":2,"statKey":"Strength"},
        {"name":"missing everything"}
    ]"#;
    assert!(matches!(
        parse_records::<Action>(text),
        Err(RosterError::Malformed)
    ));
}

#[test]
fn export_then_import_round_trips() {
    let actions = vec![bite()];
    let text = export_records(&actions).unwrap();
    let back: Vec<Action> = parse_records(&text).unwrap();
    assert_eq!(back, actions);
}

#[test]
fn roster_store_round_trips_each_roster() {
    let mut store = RosterStore::new(MemStore::default());
    let actions = vec![bite()];
    let players = vec![Player {
        id: "p1".to_string(),
        name: "Sera".to_string(),
        armor_class: 15,
    }];
    store.save_actions(&actions).unwrap();
    store.save_players(&players).unwrap();
    assert_eq!(store.load_actions().unwrap(), actions);
    assert_eq!(store.load_players().unwrap(), players);
}

#[test]
fn empty_store_loads_empty_rosters() {
    let store = RosterStore::new(MemStore::default());
    assert!(store.load_actions().unwrap().is_empty());
    assert!(store.load_players().unwrap().is_empty());
}

#[test]
fn dangling_action_ids_are_filtered_on_monster_load() {
    let mut store = RosterStore::new(MemStore::default());
    let monster = Monster {
        id: "m1".to_string(),
        name: "Goblin".to_string(),
        stats: StatBlock::default(),
        action_ids: vec!["a1".to_string(), "deleted".to_string()],
    };
    store.save_monsters(&[monster]).unwrap();

    let index = index_actions(vec![bite()]);
    let monsters = store.load_monsters(&index).unwrap();
    assert_eq!(monsters[0].action_ids, vec!["a1".to_string()]);
}

#[test]
fn new_ids_are_unique() {
    assert_ne!(new_id(), new_id());
}
