use std::collections::HashSet;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rogue_defence_core::{CellCoord, EngineConfig};
use rogue_defence_system_upgrades::{
    apply, catalog, draw_options, UpgradeCard, UpgradeKind, OPTIONS_PER_DRAW,
};
use rogue_defence_world::{GameModifiers, GameState};

fn card(kind: UpgradeKind) -> UpgradeCard {
    catalog()
        .into_iter()
        .find(|card| card.kind == kind)
        .expect("catalog lists every kind")
}

fn state() -> GameState {
    GameState::new(
        &EngineConfig::default(),
        vec![CellCoord::new(0, 1), CellCoord::new(16, 1)],
        Vec::new(),
    )
}

fn applied(kind: UpgradeKind) -> (GameState, GameModifiers) {
    let mut state = state();
    let mut modifiers = GameModifiers::default();
    apply(card(kind).effect, &mut state, &mut modifiers);
    (state, modifiers)
}

#[test]
fn draws_three_distinct_cards() {
    for seed in 0..100 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let options = draw_options(&mut rng);
        assert_eq!(options.len(), OPTIONS_PER_DRAW);
        let unique: HashSet<UpgradeKind> = options.iter().map(|card| card.kind).collect();
        assert_eq!(unique.len(), OPTIONS_PER_DRAW, "seed {seed}");
    }
}

#[test]
fn modifier_cards_touch_only_modifiers() {
    let (state_after, modifiers) = applied(UpgradeKind::DmgUp);
    assert_eq!(state_after, state());
    assert!((modifiers.damage_mul - 1.2).abs() < 1e-6);

    let (_, modifiers) = applied(UpgradeKind::SpdUp);
    assert!((modifiers.speed_mul - 1.15).abs() < 1e-6);

    let (_, modifiers) = applied(UpgradeKind::RngUp);
    assert!((modifiers.range_add - 1.0).abs() < 1e-6);

    let (_, modifiers) = applied(UpgradeKind::SniperBuff);
    assert!((modifiers.sniper_mul - 2.0).abs() < 1e-6);

    let (_, modifiers) = applied(UpgradeKind::SplashBuff);
    assert!((modifiers.splash_radius_mul - 1.5).abs() < 1e-6);

    let (_, modifiers) = applied(UpgradeKind::Greed);
    assert!((modifiers.gold_on_hit_chance - 0.05).abs() < 1e-6);

    let (_, modifiers) = applied(UpgradeKind::Crit);
    assert!((modifiers.crit_chance - 0.15).abs() < 1e-6);
    assert!((modifiers.crit_dmg - 1.5).abs() < 1e-6);

    let (_, modifiers) = applied(UpgradeKind::Explode);
    assert!((modifiers.explode_on_death - 20.0).abs() < 1e-6);
}

#[test]
fn economy_cards_touch_only_state() {
    let (state_after, modifiers) = applied(UpgradeKind::EcoUp);
    assert_eq!(state_after.money, 800);
    assert_eq!(modifiers, GameModifiers::default());

    let (state_after, _) = applied(UpgradeKind::IntUp);
    assert_eq!(state_after.money, 715);

    let (state_after, _) = applied(UpgradeKind::BaseHp);
    assert_eq!(state_after.lives, 25);
}

#[test]
fn interest_is_floored() {
    let mut state = state();
    state.money = 59;
    let mut modifiers = GameModifiers::default();
    apply(card(UpgradeKind::IntUp).effect, &mut state, &mut modifiers);
    assert_eq!(state.money, 64);
}

#[test]
fn execute_sets_rather_than_stacks() {
    let mut state = state();
    let mut modifiers = GameModifiers::default();
    let effect = card(UpgradeKind::Execute).effect;
    apply(effect, &mut state, &mut modifiers);
    apply(effect, &mut state, &mut modifiers);
    assert!((modifiers.execute_threshold - 0.15).abs() < 1e-6);
}

#[test]
fn multiplicative_cards_compound() {
    let mut state = state();
    let mut modifiers = GameModifiers::default();
    let effect = card(UpgradeKind::SniperBuff).effect;
    apply(effect, &mut state, &mut modifiers);
    apply(effect, &mut state, &mut modifiers);
    assert!((modifiers.sniper_mul - 4.0).abs() < 1e-6);
}

#[test]
fn catalog_survives_serialization() {
    let cards = catalog();
    let bytes = bincode::serialize(&cards).expect("serialize");
    let restored: Vec<UpgradeCard> = bincode::deserialize(&bytes).expect("deserialize");
    assert_eq!(restored, cards);
}
