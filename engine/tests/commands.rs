use rogue_defence_core::{CellCoord, EngineConfig, Event, TowerKind};
use rogue_defence_engine::Engine;

fn free_cell(engine: &Engine) -> CellCoord {
    (0..engine.config().playable_rows)
        .flat_map(|row| (0..engine.config().grid_w).map(move |column| CellCoord::new(column, row)))
        .find(|cell| engine.is_valid_placement(*cell))
        .expect("free cell")
}

#[test]
fn archer_round_trip_through_the_economy() {
    let mut engine = Engine::with_seed(0xA11CE);
    assert_eq!(engine.state().money, 650);
    let cell = free_cell(&engine);

    assert!(engine.place_tower(cell, TowerKind::Archer));
    assert_eq!(engine.state().money, 600);
    let tower = engine.state().grid.tower(cell).expect("archer placed");
    assert_eq!(tower.kind, TowerKind::Archer);
    assert_eq!(tower.level, 1);
    assert_eq!(tower.total_invested, 50);

    assert_eq!(engine.sell_tower(cell), Some(35));
    assert_eq!(engine.state().money, 635);
    assert!(engine.state().grid.tower(cell).is_none());
    assert!(engine.is_valid_placement(cell));
}

#[test]
fn fresh_towers_refund_seventy_percent_floored() {
    let mut engine = Engine::with_seed(17);
    let cell = free_cell(&engine);
    for kind in TowerKind::ALL {
        let cost = engine.config().towers.get(kind).cost;
        let before = engine.state().money;
        assert!(engine.place_tower(cell, kind));
        assert_eq!(engine.sell_value(cell), Some(cost * 7 / 10));
        assert_eq!(engine.sell_tower(cell), Some(cost * 7 / 10));
        assert_eq!(engine.state().money, before - cost + cost * 7 / 10);
    }
}

#[test]
fn placement_queries_are_idempotent() {
    let engine = Engine::with_seed(3);
    for row in 0..engine.config().grid_h {
        for column in 0..=engine.config().grid_w {
            let cell = CellCoord::new(column, row);
            let first = engine.placement_error(cell);
            assert_eq!(engine.placement_error(cell), first);
            assert_eq!(engine.is_valid_placement(cell), first.is_none());
        }
    }
}

#[test]
fn path_and_obstacle_cells_never_accept_towers() {
    for seed in 0..20 {
        let mut engine = Engine::with_seed(seed);
        let blocked: Vec<CellCoord> = engine
            .state()
            .path
            .iter()
            .chain(engine.state().obstacles.iter())
            .copied()
            .collect();
        for cell in blocked {
            assert!(!engine.place_tower(cell, TowerKind::Archer), "seed {seed} cell {cell:?}");
        }
        assert_eq!(engine.state().money, 650);
    }
}

#[test]
fn commands_record_events() {
    let mut engine = Engine::with_seed(5);
    let cell = free_cell(&engine);
    let tower = engine.try_place_tower(cell, TowerKind::Mage).expect("placed");
    assert_eq!(engine.try_upgrade_tower(cell), Ok(2));
    assert_eq!(engine.sell_tower(cell), Some(((150 + 225) * 7) / 10));

    let events = engine.drain_events();
    assert_eq!(
        events,
        vec![
            Event::TowerPlaced {
                tower,
                kind: TowerKind::Mage,
                cell,
            },
            Event::TowerUpgraded {
                tower,
                level: 2,
                cost: 225,
            },
            Event::TowerSold { tower, refund: 262 },
        ]
    );
    assert!(engine.drain_events().is_empty());
}

#[test]
fn invalid_configuration_is_rejected() {
    let config = EngineConfig {
        playable_rows: 12,
        ..EngineConfig::default()
    };
    assert!(Engine::new(config, 1).is_err());
    assert!(Engine::new(EngineConfig::default(), 1).is_ok());
}

#[test]
fn orbital_strike_needs_energy() {
    let mut engine = Engine::with_seed(5);
    assert!(!engine.activate_orbital_strike());
    assert_eq!(engine.state().energy, 0);
    assert_eq!(engine.state().orbital_strike_tick, 0);
}
