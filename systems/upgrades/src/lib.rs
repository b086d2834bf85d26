#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Static catalog of upgrade cards and artifacts chosen between waves.
//!
//! Cards are data: each carries an [`UpgradeKind`] identifier and an
//! [`Effect`] payload, and [`apply`] is the single dispatcher that mutates
//! either the run-wide [`GameModifiers`] or the economy fields of
//! [`GameState`].

use rand::{seq::SliceRandom, Rng};
use rogue_defence_world::{GameModifiers, GameState};
use serde::{Deserialize, Serialize};

/// Number of cards offered after each wave.
pub const OPTIONS_PER_DRAW: usize = 3;

/// Fixed catalog identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeKind {
    /// Tower damage bonus.
    DmgUp,
    /// Tower attack speed bonus.
    SpdUp,
    /// Immediate gold grant.
    EcoUp,
    /// Tower range bonus.
    RngUp,
    /// Interest on the current gold.
    IntUp,
    /// Sniper damage doubling.
    SniperBuff,
    /// Larger splash radius.
    SplashBuff,
    /// Restores lives.
    BaseHp,
    /// Executes weakened non-boss enemies.
    Execute,
    /// Chance to earn gold on every hit.
    Greed,
    /// Chance for shots to deal critical damage.
    Crit,
    /// Enemies explode on death.
    Explode,
}

impl UpgradeKind {
    /// Catalog identifier of the card.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::DmgUp => "dmg_up",
            Self::SpdUp => "spd_up",
            Self::EcoUp => "eco_up",
            Self::RngUp => "rng_up",
            Self::IntUp => "int_up",
            Self::SniperBuff => "sniper_buff",
            Self::SplashBuff => "splash_buff",
            Self::BaseHp => "base_hp",
            Self::Execute => "execute",
            Self::Greed => "greed",
            Self::Crit => "crit",
            Self::Explode => "explode",
        }
    }
}

/// Rarity tier displayed on a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rarity {
    /// Frequent, modest effects.
    Common,
    /// Stronger effects.
    Rare,
    /// Run-defining artifacts.
    Legendary,
}

/// Numeric effect carried by a card.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    /// Adds to the damage multiplier.
    AddDamageMul(f32),
    /// Adds to the attack speed multiplier.
    AddSpeedMul(f32),
    /// Grants flat gold.
    GrantMoney(u32),
    /// Adds cells of range.
    AddRange(f32),
    /// Grants the floored fraction of the current gold.
    Interest(f32),
    /// Multiplies sniper damage.
    MultiplySniper(f32),
    /// Multiplies splash radii.
    MultiplySplash(f32),
    /// Restores lives.
    GrantLives(u32),
    /// Sets the execute health threshold.
    SetExecuteThreshold(f32),
    /// Adds to the gold-on-hit chance.
    AddGoldOnHit(f32),
    /// Adds to the critical hit chance.
    AddCritChance(f32),
    /// Adds to the damage dealt by death explosions.
    AddExplodeOnDeath(f32),
}

/// Upgrade card offered to the player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UpgradeCard {
    /// Catalog identifier.
    pub kind: UpgradeKind,
    /// Display title.
    pub title: String,
    /// Display description.
    pub description: String,
    /// Rarity tier.
    pub rarity: Rarity,
    /// Effect applied when the card is chosen.
    pub effect: Effect,
}

fn card(
    kind: UpgradeKind,
    title: &str,
    description: &str,
    rarity: Rarity,
    effect: Effect,
) -> UpgradeCard {
    UpgradeCard {
        kind,
        title: title.to_owned(),
        description: description.to_owned(),
        rarity,
        effect,
    }
}

/// Returns the full catalog in its canonical order.
#[must_use]
pub fn catalog() -> Vec<UpgradeCard> {
    use Effect::*;
    use Rarity::*;
    use UpgradeKind::*;

    vec![
        card(DmgUp, "Tempered Arrowheads", "All towers deal +20% damage", Common, AddDamageMul(0.2)),
        card(SpdUp, "Oiled Gears", "All towers attack 15% faster", Common, AddSpeedMul(0.15)),
        card(EcoUp, "Royal Grant", "Gain 150 gold immediately", Common, GrantMoney(150)),
        card(RngUp, "Watchtower", "All towers gain +1 range", Rare, AddRange(1.0)),
        card(IntUp, "Goblin Investment", "Gain 10% of your current gold", Rare, Interest(0.1)),
        card(SniperBuff, "Weak Spot", "Snipers deal double damage", Legendary, MultiplySniper(2.0)),
        card(SplashBuff, "High Explosives", "Cannon blast radius +50%", Rare, MultiplySplash(1.5)),
        card(BaseHp, "Wall Repairs", "Restore 5 lives", Common, GrantLives(5)),
        card(
            Execute,
            "Executioner's Blade",
            "Instantly kill enemies below 15% health",
            Legendary,
            SetExecuteThreshold(0.15),
        ),
        card(Greed, "Hand of Greed", "Hits have a 5% chance to grant 2 gold", Rare, AddGoldOnHit(0.05)),
        card(
            Crit,
            "Deadly Rhythm",
            "Attacks gain 15% critical chance for 150% damage",
            Rare,
            AddCritChance(0.15),
        ),
        card(
            Explode,
            "Corpse Explosion",
            "Enemies deal 20 damage around them on death",
            Legendary,
            AddExplodeOnDeath(20.0),
        ),
    ]
}

/// Draws [`OPTIONS_PER_DRAW`] distinct cards from the catalog.
pub fn draw_options<R: Rng + ?Sized>(rng: &mut R) -> Vec<UpgradeCard> {
    catalog()
        .choose_multiple(rng, OPTIONS_PER_DRAW)
        .cloned()
        .collect()
}

/// Applies a card effect to the run.
pub fn apply(effect: Effect, state: &mut GameState, modifiers: &mut GameModifiers) {
    match effect {
        Effect::AddDamageMul(amount) => modifiers.damage_mul += amount,
        Effect::AddSpeedMul(amount) => modifiers.speed_mul += amount,
        Effect::GrantMoney(amount) => state.money = state.money.saturating_add(amount),
        Effect::AddRange(amount) => modifiers.range_add += amount,
        Effect::Interest(rate) => {
            let interest = (state.money as f32 * rate).floor() as u32;
            state.money = state.money.saturating_add(interest);
        }
        Effect::MultiplySniper(factor) => modifiers.sniper_mul *= factor,
        Effect::MultiplySplash(factor) => modifiers.splash_radius_mul *= factor,
        Effect::GrantLives(amount) => state.lives = state.lives.saturating_add(amount),
        Effect::SetExecuteThreshold(threshold) => modifiers.execute_threshold = threshold,
        Effect::AddGoldOnHit(chance) => modifiers.gold_on_hit_chance += chance,
        Effect::AddCritChance(chance) => modifiers.crit_chance += chance,
        Effect::AddExplodeOnDeath(damage) => modifiers.explode_on_death += damage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_lists_each_kind_once() {
        let cards = catalog();
        assert_eq!(cards.len(), 12);
        let unique: HashSet<UpgradeKind> = cards.iter().map(|card| card.kind).collect();
        assert_eq!(unique.len(), cards.len());
    }

    #[test]
    fn identifiers_are_unique() {
        let ids: HashSet<&str> = catalog().iter().map(|card| card.kind.id()).collect();
        assert_eq!(ids.len(), 12);
        assert!(ids.contains("sniper_buff"));
    }

    #[test]
    fn execute_is_a_legendary_threshold() {
        let execute = catalog()
            .into_iter()
            .find(|card| card.kind == UpgradeKind::Execute)
            .expect("execute card");
        assert_eq!(execute.effect, Effect::SetExecuteThreshold(0.15));
        assert_eq!(execute.rarity, Rarity::Legendary);
    }
}
