use engine::{roll_damage, stat_mod, Action, Dice, StatKey};

fn smash(count: u32, sides: u32, modifier: i32) -> Action {
    Action {
        id: "a1".to_string(),
        name: "Smash".to_string(),
        dice_count: count,
        dice_sides: sides,
        modifier,
        stat_key: StatKey::Strength,
        cooldown: None,
        hit_modifier: 0,
        requires_target: false,
    }
}

#[test]
fn stat_mod_rounds_down() {
    assert_eq!(stat_mod(7), -2);
    assert_eq!(stat_mod(8), -1);
    assert_eq!(stat_mod(9), -1);
    assert_eq!(stat_mod(10), 0);
    assert_eq!(stat_mod(11), 0);
    assert_eq!(stat_mod(12), 1);
    assert_eq!(stat_mod(15), 2);
}

#[test]
fn roll_die_stays_in_bounds() {
    let mut dice = Dice::from_seed(42);
    for _ in 0..200 {
        let face = dice.roll_die(6);
        assert!((1..=6).contains(&face));
    }
}

#[test]
fn one_sided_die_always_rolls_one() {
    let mut dice = Dice::from_seed(7);
    for _ in 0..20 {
        assert_eq!(dice.roll_die(1), 1);
    }
}

#[test]
fn initiative_is_d20_plus_dex_mod() {
    let mut dice = Dice::from_seed(9);
    for _ in 0..50 {
        let roll = dice.roll_initiative(2);
        assert!((3..=22).contains(&roll));
    }
}

#[test]
fn damage_roll_is_within_bounds() {
    let action = smash(2, 6, 3);
    let mut dice = Dice::from_seed(42);
    let total = roll_damage(&action, 2, |sides| dice.roll_die(sides));
    // 2d6 in 2..12, +3 flat, +2 stat => 7..17
    assert!((7..=17).contains(&total));
}

#[test]
fn single_sided_damage_is_deterministic() {
    // 1d1 always rolls 1, so the total is modifier + stat mod + 1.
    let action = smash(1, 1, 5);
    let mut dice = Dice::from_seed(0);
    assert_eq!(roll_damage(&action, 0, |sides| dice.roll_die(sides)), 6);
}

#[test]
fn same_seed_gives_same_sequence() {
    let mut a = Dice::from_seed(2025);
    let mut b = Dice::from_seed(2025);
    for _ in 0..50 {
        assert_eq!(a.d20(), b.d20());
    }
}
