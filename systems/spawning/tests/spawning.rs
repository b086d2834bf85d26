use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rogue_defence_core::{EnemyKind, Point};
use rogue_defence_system_spawning::{Spawning, SPAWN_INTERVAL_TICKS};

fn prepared(wave: u32, seed: u64) -> Spawning {
    let mut spawning = Spawning::new();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let _ = spawning.prepare_wave(wave, Point::new(0.0, 3.0), &mut rng);
    spawning
}

#[test]
fn boss_wave_ends_with_exactly_one_boss() {
    for seed in 0..50 {
        let spawning = prepared(5, seed);
        let kinds: Vec<EnemyKind> = spawning.pending().map(|enemy| enemy.kind).collect();
        assert_eq!(kinds.len(), 12);
        assert_eq!(kinds.last(), Some(&EnemyKind::Boss));
        let bosses = kinds.iter().filter(|kind| **kind == EnemyKind::Boss).count();
        assert_eq!(bosses, 1, "seed {seed}");
    }
}

#[test]
fn regular_waves_contain_no_boss() {
    for wave in [1, 2, 3, 4, 6, 7] {
        let spawning = prepared(wave, u64::from(wave));
        assert!(spawning.pending().all(|enemy| enemy.kind != EnemyKind::Boss));
    }
}

#[test]
fn early_waves_never_roll_swarms() {
    for seed in 0..30 {
        let spawning = prepared(3, seed);
        assert!(spawning.pending().all(|enemy| enemy.kind != EnemyKind::Swarm));
    }
}

#[test]
fn releases_one_enemy_per_interval() {
    let mut spawning = prepared(1, 9);
    let total = spawning.len();
    let mut released = Vec::new();

    for tick in 1..=(SPAWN_INTERVAL_TICKS * total as u32 + 10) {
        if let Some(enemy) = spawning.tick() {
            assert_eq!(tick % SPAWN_INTERVAL_TICKS, 0, "spawned off cadence at {tick}");
            released.push(enemy);
        }
    }

    assert_eq!(released.len(), total);
    assert!(spawning.is_empty());
    assert!(released
        .iter()
        .all(|enemy| enemy.position == Point::new(0.0, 3.0) && enemy.hp == enemy.max_hp));
}

#[test]
fn enemy_ids_stay_unique_across_waves() {
    let mut spawning = Spawning::new();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let _ = spawning.prepare_wave(1, Point::default(), &mut rng);
    let first: Vec<u32> = spawning.pending().map(|enemy| enemy.id.get()).collect();
    let _ = spawning.prepare_wave(2, Point::default(), &mut rng);
    let second: Vec<u32> = spawning.pending().map(|enemy| enemy.id.get()).collect();
    assert!(second.iter().all(|id| !first.contains(id)));
}

#[test]
fn identical_seeds_replay_identical_queues() {
    let first: Vec<_> = prepared(9, 0x1234).pending().cloned().collect();
    let second: Vec<_> = prepared(9, 0x1234).pending().cloned().collect();
    assert_eq!(first, second);
}
