use puckdeck_server::game::{
    battle::{battle_stats, consume_game, ItemEffect, CHEMISTRY_BONUS},
    card::{ContractState, OwnedCard},
    stats::{compute_modified_stats, SkillBoost},
    types::{ModifiedStats, Position, StatLine},
};
use uuid::Uuid;

const ACTIVE: ContractState = ContractState {
    games_remaining: 10,
    renewals_left: 3,
};

const EXPIRED: ContractState = ContractState {
    games_remaining: 0,
    renewals_left: 3,
};

fn forward() -> ModifiedStats {
    let base = StatLine {
        attack: 85,
        defense: 60,
        speed: 85,
        stamina: 70,
        skating: 85,
        shooting: 70,
        passing: 65,
        defense_skill: 60,
        physical: 65,
        puck_control: 80,
        ..Default::default()
    };
    compute_modified_stats(&base, Position::Forward, &Vec::<SkillBoost>::new())
}

fn pct(stat: &str, value: f64) -> ItemEffect {
    ItemEffect::StatBoost {
        stat_name: stat.into(),
        value_percent: Some(value),
        value_flat: None,
    }
}

fn flat(stat: &str, value: i32) -> ItemEffect {
    ItemEffect::StatBoost {
        stat_name: stat.into(),
        value_percent: None,
        value_flat: Some(value),
    }
}

#[test]
fn active_contract_partial_chemistry_is_identity() {
    let m = forward();
    let out = battle_stats(&m, Position::Forward, ACTIVE, 5, &[]);
    assert_eq!(out, m);
}

#[test]
fn expired_contract_halves_attributes() {
    let m = forward();
    let out = battle_stats(&m, Position::Forward, EXPIRED, 0, &[]);
    assert_eq!(out.stats.attack, 42);
    assert_eq!(out.stats.speed, 42);
    assert_eq!(out.stats.passing, 32);
    // 360 / 10
    assert_eq!(out.current_ovr, 36);
}

#[test]
fn negative_games_count_as_expired() {
    let m = forward();
    let contract = ContractState {
        games_remaining: -3,
        renewals_left: 0,
    };
    assert_eq!(
        battle_stats(&m, Position::Forward, contract, 0, &[]).stats.attack,
        42
    );
}

#[test]
fn full_chemistry_adds_flat_bonus() {
    let m = forward();
    let out = battle_stats(&m, Position::Forward, ACTIVE, 6, &[]);
    assert_eq!(out.stats.attack, 85 + CHEMISTRY_BONUS);
    assert_eq!(out.stats.reflexes, CHEMISTRY_BONUS);
    assert_eq!(out.current_ovr, m.current_ovr + CHEMISTRY_BONUS);
}

#[test]
fn halving_happens_before_chemistry_bonus() {
    let m = forward();
    let out = battle_stats(&m, Position::Forward, EXPIRED, 6, &[]);
    assert_eq!(out.stats.attack, 42 + 5);
}

#[test]
fn effects_fold_left_in_list_order() {
    let m = forward();
    // 70 → floor(77.0) = 77 → 80
    let a = battle_stats(
        &m,
        Position::Forward,
        ACTIVE,
        0,
        &[pct("shooting", 10.0), flat("shooting", 3)],
    );
    assert_eq!(a.stats.shooting, 80);

    // 70 → 73 → floor(80.3) = 80
    let b = battle_stats(
        &m,
        Position::Forward,
        ACTIVE,
        0,
        &[flat("shooting", 3), pct("shooting", 10.0)],
    );
    assert_eq!(b.stats.shooting, 80);

    // 65 → floor(71.5) = 71 → floor(78.1) = 78
    let c = battle_stats(
        &m,
        Position::Forward,
        ACTIVE,
        0,
        &[pct("passing", 10.0), pct("passing", 10.0)],
    );
    assert_eq!(c.stats.passing, 78);
}

#[test]
fn percent_and_flat_in_one_effect_apply_percent_first() {
    let m = forward();
    let effect = ItemEffect::StatBoost {
        stat_name: "base_physical".into(),
        value_percent: Some(50.0),
        value_flat: Some(1),
    };
    let out = battle_stats(&m, Position::Forward, ACTIVE, 0, &[effect]);
    // 65 → floor(97.5) = 97 → 98
    assert_eq!(out.stats.physical, 98);
}

#[test]
fn unknown_stats_and_effect_kinds_are_ignored() {
    let m = forward();
    let effects: Vec<ItemEffect> = serde_json::from_value(serde_json::json!([
        { "type": "stat_boost", "stat_name": "charisma", "value_flat": 10 },
        { "type": "morale_swing", "amount": 3 }
    ]))
    .unwrap();
    assert_eq!(effects[1], ItemEffect::Unsupported);
    let out = battle_stats(&m, Position::Forward, ACTIVE, 0, &effects);
    assert_eq!(out, m);
}

#[test]
fn input_stats_are_not_mutated() {
    let m = forward();
    let snapshot = m;
    let _ = battle_stats(&m, Position::Forward, EXPIRED, 6, &[flat("attack", 10)]);
    assert_eq!(m, snapshot);
}

#[test]
fn consume_game_clamps_at_zero() {
    let mut card = OwnedCard::new(Uuid::new_v4(), 1, 1, 0);
    consume_game(&mut card);
    assert_eq!(card.games_remaining, 0);
    consume_game(&mut card);
    assert_eq!(card.games_remaining, 0);

    card.games_remaining = -2;
    consume_game(&mut card);
    assert_eq!(card.games_remaining, 0);
}
