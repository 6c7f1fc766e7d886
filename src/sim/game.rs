use super::achievements::{self, Achievement};
use super::economy;
use super::factories::{self, FACTORY_DEFS, Factory, PERSONAL_COMPUTER};
use super::format::{format_duration, format_number};
use super::prestige::{self, PrestigeEffect, PrestigeUpgrade};
use super::resources::{Resource, ResourceKind, ResourceLedger};
use super::upgrades::{self, SpecialUpgrade, Upgrade, UpgradeEffect};
use crate::config::EconomyConfig;
use crate::persist::{PersistError, StateStore};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::VecDeque;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

const MAX_MESSAGES: usize = 8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub ledger: ResourceLedger,
    pub factories: Vec<Factory>,
    pub upgrades: Vec<Upgrade>,
    pub prestige_upgrades: Vec<PrestigeUpgrade>,
    pub achievements: Vec<Achievement>,
    pub quantum_unlocked: bool,
    pub personal_computer_unlocked: bool,
    pub prestige_points: u64,
    pub prestige_multiplier: f64,
    pub total_bits_earned: f64,
    pub total_qubits_earned: f64,
    #[serde(default = "default_multiplier")]
    pub factory_efficiency_multiplier: f64,
    #[serde(default)]
    pub offline_efficiency: Option<f64>,
    #[serde(default)]
    pub times_prestiged: u32,
    #[serde(default = "Utc::now")]
    pub last_update_time: DateTime<Utc>,
}

fn default_multiplier() -> f64 {
    1.0
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(&EconomyConfig::default())
    }
}

impl GameState {
    pub fn new(config: &EconomyConfig) -> Self {
        Self {
            ledger: ResourceLedger::new(config.base_bits_per_click),
            factories: factories::build_factories(1.0),
            upgrades: upgrades::build_upgrades(),
            prestige_upgrades: prestige::build_prestige_upgrades(),
            achievements: achievements::build_achievements(),
            quantum_unlocked: false,
            personal_computer_unlocked: false,
            prestige_points: 0,
            prestige_multiplier: 1.0,
            total_bits_earned: 0.0,
            total_qubits_earned: 0.0,
            factory_efficiency_multiplier: 1.0,
            offline_efficiency: None,
            times_prestiged: 0,
            last_update_time: Utc::now(),
        }
    }

    pub fn resource(&self, kind: ResourceKind) -> &Resource {
        self.ledger.get(kind)
    }

    pub fn factory(&self, id: &str) -> Option<&Factory> {
        self.factories.iter().find(|factory| factory.id == id)
    }

    pub fn factory_count(&self, id: &str) -> u32 {
        self.factory(id).map(|factory| factory.count).unwrap_or(0)
    }

    pub fn total_factory_count(&self) -> u32 {
        self.factories.iter().map(|factory| factory.count).sum()
    }

    pub fn upgrade(&self, id: &str) -> Option<&Upgrade> {
        self.upgrades.iter().find(|upgrade| upgrade.id == id)
    }

    pub fn prestige_upgrade(&self, id: &str) -> Option<&PrestigeUpgrade> {
        self.prestige_upgrades.iter().find(|upgrade| upgrade.id == id)
    }

    pub fn has_prestige_effect(&self, predicate: impl Fn(&PrestigeEffect) -> bool) -> bool {
        self.prestige_upgrades
            .iter()
            .any(|upgrade| upgrade.bought && predicate(&upgrade.effect))
    }

    /// Classical computers first, then quantum ones once unlocked, each group
    /// cheapest first.
    pub fn visible_factories(&self) -> Vec<&Factory> {
        let mut classical: Vec<&Factory> =
            self.factories.iter().filter(|f| !f.is_quantum()).collect();
        classical.sort_by(|a, b| by_cost(a.initial_cost, b.initial_cost));
        if self.quantum_unlocked {
            let mut quantum: Vec<&Factory> =
                self.factories.iter().filter(|f| f.is_quantum()).collect();
            quantum.sort_by(|a, b| by_cost(a.initial_cost, b.initial_cost));
            classical.extend(quantum);
        }
        classical
    }

    pub fn visible_upgrades(&self) -> Vec<&Upgrade> {
        let mut visible: Vec<&Upgrade> = self
            .upgrades
            .iter()
            .filter(|upgrade| upgrade.visible_when.is_met(self))
            .collect();
        visible.sort_by(|a, b| by_cost(a.cost, b.cost));
        visible
    }

    fn credit(&mut self, kind: ResourceKind, delta: f64) {
        if delta <= 0.0 || !delta.is_finite() {
            return;
        }
        self.ledger.get_mut(kind).amount += delta;
        match kind {
            ResourceKind::Bits => self.total_bits_earned += delta,
            ResourceKind::Qubits => self.total_qubits_earned += delta,
        }
    }

    fn add_per_second(&mut self, kind: ResourceKind, delta: f64) {
        let resource = self.ledger.get_mut(kind);
        resource.per_second = (resource.per_second + delta).max(0.0);
    }

    fn add_factory_units(&mut self, index: usize, quantity: u32, growth: f64) {
        for _ in 0..quantity {
            let factory = &self.factories[index];
            let output = economy::unit_output(
                factory,
                self.prestige_multiplier,
                self.factory_efficiency_multiplier,
            );
            let resource = factory.output_resource();
            self.add_per_second(resource, output);
            let factory = &mut self.factories[index];
            factory.count += 1;
            factory.cost *= growth;
        }
        if self.factories[index].id == PERSONAL_COMPUTER {
            self.personal_computer_unlocked = true;
        }
    }

    /// Multiply one factory's efficiency, topping up the output its owned
    /// units already feed into `per_second`.
    fn scale_factory_efficiency(&mut self, id: &str, multiplier: f64) {
        let Some(index) = self.factories.iter().position(|f| f.id == id) else {
            return;
        };
        let factory = &self.factories[index];
        let extra = economy::owned_output(
            factory,
            self.prestige_multiplier,
            self.factory_efficiency_multiplier,
        ) * (multiplier - 1.0);
        let resource = factory.output_resource();
        self.add_per_second(resource, extra);
        self.factories[index].efficiency *= multiplier;
    }

    fn scale_global_output(&mut self, multiplier: f64) {
        let extras: Vec<(ResourceKind, f64)> = self
            .factories
            .iter()
            .filter(|factory| factory.count > 0)
            .map(|factory| {
                let owned = economy::owned_output(
                    factory,
                    self.prestige_multiplier,
                    self.factory_efficiency_multiplier,
                );
                (factory.output_resource(), owned * (multiplier - 1.0))
            })
            .collect();
        for (resource, extra) in extras {
            self.add_per_second(resource, extra);
        }
        self.factory_efficiency_multiplier *= multiplier;
    }

    fn unlock_resource(&mut self, kind: ResourceKind, seed_per_click: f64) {
        match kind {
            ResourceKind::Qubits => {
                self.quantum_unlocked = true;
                let qubits = self.ledger.get_mut(ResourceKind::Qubits);
                if qubits.per_click <= 0.0 {
                    qubits.per_click = seed_per_click;
                }
            }
            ResourceKind::Bits => {}
        }
    }

    fn apply_upgrade_effect(&mut self, effect: &UpgradeEffect, config: &EconomyConfig) {
        match effect {
            UpgradeEffect::FactoryEfficiency {
                factory,
                multiplier,
            } => self.scale_factory_efficiency(factory, *multiplier),
            UpgradeEffect::ResourcePerClick { resource, amount } => {
                self.ledger.get_mut(*resource).per_click += amount;
            }
            UpgradeEffect::ResourcePerSecond { resource, amount } => {
                self.add_per_second(*resource, *amount);
            }
            UpgradeEffect::UnlockResource(kind) => {
                self.unlock_resource(*kind, config.quantum_seed_per_click)
            }
            UpgradeEffect::Other(special) => match special {
                SpecialUpgrade::DoubleClick => {
                    self.ledger.get_mut(ResourceKind::Bits).per_click *= 2.0;
                }
                SpecialUpgrade::TripleClick => {
                    self.ledger.get_mut(ResourceKind::Bits).per_click *= 3.0;
                }
                SpecialUpgrade::GridSynchronization => self.scale_global_output(1.25),
            },
        }
    }

    fn apply_prestige_effect(&mut self, effect: PrestigeEffect) {
        match effect {
            PrestigeEffect::QuickReset | PrestigeEffect::ExtendedOffline => {}
            PrestigeEffect::OfflineEfficiency(efficiency) => {
                self.offline_efficiency = Some(efficiency);
            }
            PrestigeEffect::StartingBits(bits) => {
                self.ledger.get_mut(ResourceKind::Bits).amount += bits;
            }
            PrestigeEffect::ClickMultiplier(multiplier) => {
                self.ledger.get_mut(ResourceKind::Bits).per_click *= multiplier;
            }
            PrestigeEffect::FactoryMultiplier(multiplier) => self.scale_global_output(multiplier),
        }
    }
}

fn by_cost(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PurchaseError {
    #[error("not enough {resource} (requires {cost:.2}, have {available:.2})")]
    InsufficientFunds {
        resource: ResourceKind,
        cost: f64,
        available: f64,
    },
    #[error("not enough prestige points (requires {cost}, have {available})")]
    InsufficientPrestigePoints { cost: u64, available: u64 },
    #[error("unknown computer {0}")]
    UnknownFactory(String),
    #[error("unknown upgrade {0}")]
    UnknownUpgrade(String),
    #[error("unknown prestige upgrade {0}")]
    UnknownPrestigeUpgrade(String),
    #[error("{0} already bought")]
    AlreadyBought(String),
    #[error("quantity must be at least one")]
    ZeroQuantity,
    #[error("cannot own that many {0}")]
    TooManyUnits(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrestigeSummary {
    pub points_gained: u64,
    pub prestige_multiplier: f64,
    pub times_prestiged: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OfflineReport {
    pub time_away: Duration,
    /// Portion of `time_away` left after the offline cap.
    pub credited: Duration,
    pub bits: f64,
    pub qubits: f64,
}

/// Owns the [`GameState`] and is the only thing that mutates it.
pub struct Game {
    state: GameState,
    config: EconomyConfig,
    store: Box<dyn StateStore>,
    tick_timer: Duration,
    messages: VecDeque<String>,
}

impl Game {
    pub fn fresh(config: EconomyConfig, store: Box<dyn StateStore>) -> Self {
        let state = GameState::new(&config);
        Self::from_state(state, config, store)
    }

    /// Resume from the store's save slot, or start over when it is empty.
    pub fn load(config: EconomyConfig, store: Box<dyn StateStore>) -> Result<Self, PersistError> {
        match store.load()? {
            Some(state) => {
                info!(times_prestiged = state.times_prestiged, "save loaded");
                let mut game = Self::from_state(state, config, store);
                game.add_message("Loaded save state.");
                Ok(game)
            }
            None => {
                info!("no save found, starting fresh");
                let mut game = Self::fresh(config, store);
                game.add_message("Welcome to Quantum Clicker.");
                Ok(game)
            }
        }
    }

    pub fn from_state(
        mut state: GameState,
        config: EconomyConfig,
        store: Box<dyn StateStore>,
    ) -> Self {
        state.ledger.normalize();
        if !state.prestige_multiplier.is_finite() || state.prestige_multiplier < 1.0 {
            state.prestige_multiplier = 1.0;
        }
        if !state.factory_efficiency_multiplier.is_finite()
            || state.factory_efficiency_multiplier <= 0.0
        {
            state.factory_efficiency_multiplier = 1.0;
        }
        for def in &FACTORY_DEFS {
            if state.factory(def.id).is_none() {
                state
                    .factories
                    .push(Factory::from_def(def, state.prestige_multiplier));
            }
        }
        for fresh in prestige::build_prestige_upgrades() {
            if state.prestige_upgrade(&fresh.id).is_none() {
                state.prestige_upgrades.push(fresh);
            }
        }
        for fresh in achievements::build_achievements() {
            if !state.achievements.iter().any(|a| a.id == fresh.id) {
                state.achievements.push(fresh);
            }
        }
        Self {
            state,
            config,
            store,
            tick_timer: Duration::default(),
            messages: VecDeque::with_capacity(MAX_MESSAGES),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &EconomyConfig {
        &self.config
    }

    pub fn click(&mut self) {
        let bits = self.state.resource(ResourceKind::Bits).per_click;
        self.state.credit(ResourceKind::Bits, bits);
        if self.state.quantum_unlocked {
            let qubits = self.state.resource(ResourceKind::Qubits).per_click;
            self.state.credit(ResourceKind::Qubits, qubits);
        }
    }

    /// One passive accrual step. Stored `per_second` rates already include
    /// the prestige multiplier from purchase time; it is applied again here.
    pub fn tick(&mut self) {
        let multiplier = self.state.prestige_multiplier;
        for kind in ResourceKind::ALL {
            let delta = self.state.resource(kind).per_second * multiplier;
            self.state.credit(kind, delta);
        }
        self.check_achievements();
        self.persist();
    }

    /// Feed wall-clock time; runs one [`Game::tick`] per elapsed interval.
    pub fn update(&mut self, delta: Duration) {
        let interval = self.config.tick_interval();
        self.tick_timer += delta;
        while self.tick_timer >= interval {
            self.tick_timer -= interval;
            self.tick();
        }
    }

    pub fn tick_progress(&self) -> f64 {
        let interval = self.config.tick_interval().as_secs_f64();
        (self.tick_timer.as_secs_f64() / interval).min(1.0)
    }

    pub fn factory_total_cost(&self, id: &str, quantity: u32) -> Option<f64> {
        let factory = self.state.factory(id)?;
        Some(economy::geometric_total_cost(
            factory.cost,
            self.config.cost_growth,
            quantity,
        ))
    }

    pub fn can_afford_factory(&self, id: &str, quantity: u32) -> bool {
        match (self.state.factory(id), self.factory_total_cost(id, quantity)) {
            (Some(factory), Some(cost))
                if quantity > 0 && factory.count.checked_add(quantity).is_some() =>
            {
                self.state.resource(factory.cost_resource).can_afford(cost)
            }
            _ => false,
        }
    }

    pub fn can_afford_upgrade(&self, id: &str) -> bool {
        self.state
            .upgrade(id)
            .is_some_and(|upgrade| self.state.resource(upgrade.cost_resource).can_afford(upgrade.cost))
    }

    pub fn can_buy_prestige_upgrade(&self, id: &str) -> bool {
        self.state
            .prestige_upgrade(id)
            .is_some_and(|upgrade| !upgrade.bought && self.state.prestige_points >= upgrade.cost)
    }

    pub fn buy_factory(&mut self, id: &str, quantity: u32) -> Result<(), PurchaseError> {
        let index = self
            .state
            .factories
            .iter()
            .position(|factory| factory.id == id)
            .ok_or_else(|| PurchaseError::UnknownFactory(id.to_string()))?;
        if quantity == 0 {
            return Err(PurchaseError::ZeroQuantity);
        }
        let factory = &self.state.factories[index];
        if factory.count.checked_add(quantity).is_none() {
            return Err(PurchaseError::TooManyUnits(factory.name.clone()));
        }
        let resource = factory.cost_resource;
        let total = economy::geometric_total_cost(factory.cost, self.config.cost_growth, quantity);
        let funds = self.state.resource(resource);
        if !funds.can_afford(total) {
            return Err(PurchaseError::InsufficientFunds {
                resource,
                cost: total,
                available: funds.amount,
            });
        }

        self.state.ledger.get_mut(resource).spend(total);
        self.state
            .add_factory_units(index, quantity, self.config.cost_growth);
        let factory = &self.state.factories[index];
        debug!(factory = %factory.id, quantity, cost = total, "factory bought");
        let message = format!(
            "Bought {quantity}x {} for {} {resource}.",
            factory.name,
            format_number(total)
        );
        self.push_message(message);
        self.check_achievements();
        self.persist();
        Ok(())
    }

    pub fn buy_upgrade(&mut self, id: &str) -> Result<(), PurchaseError> {
        let index = self
            .state
            .upgrades
            .iter()
            .position(|upgrade| upgrade.id == id)
            .ok_or_else(|| PurchaseError::UnknownUpgrade(id.to_string()))?;
        let upgrade = &self.state.upgrades[index];
        let funds = self.state.resource(upgrade.cost_resource);
        if !funds.can_afford(upgrade.cost) {
            return Err(PurchaseError::InsufficientFunds {
                resource: upgrade.cost_resource,
                cost: upgrade.cost,
                available: funds.amount,
            });
        }

        let upgrade = self.state.upgrades.remove(index);
        self.state
            .ledger
            .get_mut(upgrade.cost_resource)
            .spend(upgrade.cost);
        self.state.apply_upgrade_effect(&upgrade.effect, &self.config);
        debug!(upgrade = %upgrade.id, cost = upgrade.cost, "upgrade bought");
        self.push_message(format!("Installed {}: {}.", upgrade.name, upgrade.overview));
        self.persist();
        Ok(())
    }

    pub fn buy_prestige_upgrade(&mut self, id: &str) -> Result<(), PurchaseError> {
        let index = self
            .state
            .prestige_upgrades
            .iter()
            .position(|upgrade| upgrade.id == id)
            .ok_or_else(|| PurchaseError::UnknownPrestigeUpgrade(id.to_string()))?;
        let upgrade = &self.state.prestige_upgrades[index];
        if upgrade.bought {
            return Err(PurchaseError::AlreadyBought(upgrade.name.clone()));
        }
        if self.state.prestige_points < upgrade.cost {
            return Err(PurchaseError::InsufficientPrestigePoints {
                cost: upgrade.cost,
                available: self.state.prestige_points,
            });
        }

        let effect = upgrade.effect;
        let cost = upgrade.cost;
        self.state.prestige_points -= cost;
        self.state.prestige_upgrades[index].bought = true;
        self.state.apply_prestige_effect(effect);
        let name = self.state.prestige_upgrades[index].name.clone();
        debug!(upgrade = %id, cost, "prestige upgrade bought");
        self.push_message(format!("Prestige upgrade acquired: {name}."));
        self.persist();
        Ok(())
    }

    pub fn prestige_threshold(&self) -> f64 {
        if self
            .state
            .has_prestige_effect(|effect| matches!(effect, PrestigeEffect::QuickReset))
        {
            self.config.quick_reset_threshold
        } else {
            self.config.prestige_threshold
        }
    }

    pub fn available_prestige_points(&self) -> u64 {
        prestige::available_points(self.state.total_qubits_earned, self.prestige_threshold())
    }

    /// Trade lifetime Qubits for prestige points and start the run over.
    pub fn perform_prestige(&mut self) -> PrestigeSummary {
        let points = self.available_prestige_points();
        let state = &mut self.state;

        state.times_prestiged += 1;
        state.prestige_points += points;
        state.prestige_multiplier += points as f64 * self.config.prestige_bonus_per_point;

        for resource in state.ledger.iter_mut() {
            resource.amount = 0.0;
            resource.per_second = 0.0;
            resource.per_click = match resource.kind {
                ResourceKind::Bits => self.config.base_bits_per_click * state.prestige_multiplier,
                ResourceKind::Qubits => 0.0,
            };
        }
        for factory in &mut state.factories {
            factory.reset();
        }
        state.personal_computer_unlocked = false;
        state.quantum_unlocked = false;
        state.factory_efficiency_multiplier = 1.0;

        let bought: Vec<PrestigeEffect> = state
            .prestige_upgrades
            .iter()
            .filter(|upgrade| upgrade.bought)
            .map(|upgrade| upgrade.effect)
            .collect();
        for effect in bought {
            state.apply_prestige_effect(effect);
        }

        state.total_bits_earned = 0.0;
        state.total_qubits_earned = 0.0;
        state.factories = factories::build_factories(state.prestige_multiplier);
        state.upgrades = upgrades::build_upgrades();

        let summary = PrestigeSummary {
            points_gained: points,
            prestige_multiplier: state.prestige_multiplier,
            times_prestiged: state.times_prestiged,
        };
        info!(
            points = summary.points_gained,
            multiplier = summary.prestige_multiplier,
            times = summary.times_prestiged,
            "prestige performed"
        );
        self.push_message(format!(
            "Prestiged: +{points} points, multiplier now x{:.2}.",
            summary.prestige_multiplier
        ));
        self.check_achievements();
        self.persist();
        summary
    }

    /// Credit passive output for time spent away, capped and discounted.
    pub fn offline_progress(&mut self, time_away: Duration) -> OfflineReport {
        let extended = self
            .state
            .has_prestige_effect(|effect| matches!(effect, PrestigeEffect::ExtendedOffline));
        let credited = economy::credited_offline_time(time_away, self.config.offline_cap(extended));
        let efficiency = self
            .state
            .offline_efficiency
            .unwrap_or(self.config.offline_efficiency);

        let bits = economy::offline_accrual(
            self.state.resource(ResourceKind::Bits).per_second,
            credited,
            efficiency,
        );
        let qubits = economy::offline_accrual(
            self.state.resource(ResourceKind::Qubits).per_second,
            credited,
            efficiency,
        );
        self.state.credit(ResourceKind::Bits, bits);
        self.state.credit(ResourceKind::Qubits, qubits);

        let report = OfflineReport {
            time_away,
            credited,
            bits,
            qubits,
        };
        if bits > 0.0 || qubits > 0.0 {
            info!(
                away_secs = time_away.as_secs(),
                credited_secs = credited.as_secs(),
                bits,
                qubits,
                "offline progress applied"
            );
            self.push_message(format!(
                "Away for {}: earned {} Bits and {} Qubits.",
                format_duration(time_away),
                format_number(bits),
                format_number(qubits)
            ));
        }
        self.check_achievements();
        self.persist();
        report
    }

    /// Apply offline progress for the time since the last `mark_active`.
    pub fn resume(&mut self, now: DateTime<Utc>) -> OfflineReport {
        let time_away = (now - self.state.last_update_time)
            .to_std()
            .unwrap_or_default();
        self.state.last_update_time = now;
        self.offline_progress(time_away)
    }

    pub fn mark_active(&mut self, now: DateTime<Utc>) {
        self.state.last_update_time = now;
    }

    pub fn check_achievements(&mut self) -> Vec<String> {
        let unlocked = achievements::check_achievements(&mut self.state);
        for title in &unlocked {
            info!(achievement = %title, "achievement unlocked");
            self.push_message(format!("Achievement unlocked: {title}"));
        }
        unlocked
    }

    pub fn save(&self) -> Result<(), PersistError> {
        self.store.save(&self.state)
    }

    fn persist(&self) {
        if let Err(err) = self.save() {
            warn!(error = %err, "failed to save game state");
        }
    }

    pub fn messages(&self) -> impl Iterator<Item = &String> {
        self.messages.iter()
    }

    pub fn add_message<S: Into<String>>(&mut self, message: S) {
        self.push_message(message.into());
    }

    fn push_message(&mut self, message: String) {
        if self.messages.len() >= MAX_MESSAGES {
            self.messages.pop_front();
        }
        self.messages.push_back(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::MemoryStore;
    use std::io;

    fn new_game() -> (Game, MemoryStore) {
        let store = MemoryStore::new();
        let game = Game::fresh(EconomyConfig::default(), Box::new(store.clone()));
        (game, store)
    }

    fn bits(game: &Game) -> f64 {
        game.state.resource(ResourceKind::Bits).amount
    }

    struct FailingStore;

    impl StateStore for FailingStore {
        fn save(&self, _state: &GameState) -> Result<(), PersistError> {
            Err(PersistError::Io(io::Error::other("disk full")))
        }

        fn load(&self) -> Result<Option<GameState>, PersistError> {
            Ok(None)
        }
    }

    #[test]
    fn ten_clicks_then_unaffordable_computer() {
        let (mut game, _) = new_game();
        for _ in 0..10 {
            game.click();
        }
        assert!((bits(&game) - 1.0).abs() < 1e-9);
        assert!((game.state.total_bits_earned - 1.0).abs() < 1e-9);

        let before = game.state.clone();
        let result = game.buy_factory(PERSONAL_COMPUTER, 1);
        assert!(matches!(
            result,
            Err(PurchaseError::InsufficientFunds {
                resource: ResourceKind::Bits,
                ..
            })
        ));
        assert_eq!(game.state, before);
    }

    #[test]
    fn qubits_only_click_once_unlocked() {
        let (mut game, _) = new_game();
        game.state.ledger.get_mut(ResourceKind::Qubits).per_click = 1.0;
        game.click();
        assert_eq!(game.state.resource(ResourceKind::Qubits).amount, 0.0);

        game.state.quantum_unlocked = true;
        game.click();
        assert_eq!(game.state.resource(ResourceKind::Qubits).amount, 1.0);
        assert_eq!(game.state.total_qubits_earned, 1.0);
    }

    #[test]
    fn buying_deducts_geometric_series() {
        let (mut game, store) = new_game();
        game.state.ledger.get_mut(ResourceKind::Bits).amount = 100.0;

        game.buy_factory(PERSONAL_COMPUTER, 1).expect("first unit");
        assert!((bits(&game) - 85.0).abs() < 1e-9);

        game.state.ledger.get_mut(ResourceKind::Bits).amount = 100.0;
        let pc_cost = game.state.factory(PERSONAL_COMPUTER).map(|f| f.cost);
        assert!((pc_cost.unwrap_or_default() - 18.0).abs() < 1e-9);
        game.buy_factory(PERSONAL_COMPUTER, 2).expect("two more units");
        let spent = 100.0 - bits(&game);
        assert!((spent - (18.0 + 21.6)).abs() < 1e-9, "spent {spent}");

        let pc = game.state.factory(PERSONAL_COMPUTER).expect("pc");
        assert_eq!(pc.count, 3);
        assert!((pc.cost - 15.0 * 1.2f64.powi(3)).abs() < 1e-9);
        assert!((game.state.resource(ResourceKind::Bits).per_second - 0.3).abs() < 1e-9);
        assert!(game.state.personal_computer_unlocked);
        assert!(!store.is_empty());
    }

    #[test]
    fn two_units_from_scratch_cost_thirty_three() {
        let (mut game, _) = new_game();
        game.state.ledger.get_mut(ResourceKind::Bits).amount = 33.0;
        game.buy_factory(PERSONAL_COMPUTER, 2).expect("exactly affordable");
        assert_eq!(bits(&game), 0.0);
    }

    #[test]
    fn zero_quantity_and_unknown_ids_change_nothing() {
        let (mut game, _) = new_game();
        game.state.ledger.get_mut(ResourceKind::Bits).amount = 1_000.0;
        let before = game.state.clone();
        assert_eq!(
            game.buy_factory(PERSONAL_COMPUTER, 0),
            Err(PurchaseError::ZeroQuantity)
        );
        assert_eq!(
            game.buy_factory("toaster", 1),
            Err(PurchaseError::UnknownFactory("toaster".to_string()))
        );
        assert_eq!(
            game.buy_upgrade("toaster"),
            Err(PurchaseError::UnknownUpgrade("toaster".to_string()))
        );
        assert_eq!(
            game.buy_prestige_upgrade("toaster"),
            Err(PurchaseError::UnknownPrestigeUpgrade("toaster".to_string()))
        );
        assert_eq!(game.state, before);
    }

    #[test]
    fn oversized_quantities_are_refused_without_side_effects() {
        let (mut game, _) = new_game();
        let before = game.state.clone();
        assert!(!game.can_afford_factory(PERSONAL_COMPUTER, 1 << 31));
        assert!(matches!(
            game.buy_factory(PERSONAL_COMPUTER, 1 << 31),
            Err(PurchaseError::InsufficientFunds { .. })
        ));
        assert!(matches!(
            game.buy_factory(PERSONAL_COMPUTER, u32::MAX),
            Err(PurchaseError::InsufficientFunds { .. })
        ));
        assert_eq!(game.state, before);

        game.state.factories[0].count = u32::MAX;
        game.state.ledger.get_mut(ResourceKind::Bits).amount = 1e9;
        let before = game.state.clone();
        assert!(!game.can_afford_factory(PERSONAL_COMPUTER, 1));
        assert_eq!(
            game.buy_factory(PERSONAL_COMPUTER, 1),
            Err(PurchaseError::TooManyUnits("Personal Computer".to_string()))
        );
        assert_eq!(game.state, before);
    }

    #[test]
    fn balance_just_short_of_price_cannot_buy() {
        let (mut game, _) = new_game();
        game.state.ledger.get_mut(ResourceKind::Bits).amount = 33.0 - 1e-12;
        let before = game.state.clone();
        assert!(game.buy_factory(PERSONAL_COMPUTER, 2).is_err());
        assert_eq!(game.state, before);
    }

    #[test]
    fn upgrades_are_consumed() {
        let (mut game, _) = new_game();
        game.state.ledger.get_mut(ResourceKind::Bits).amount = 50.0;
        game.buy_upgrade("faster_fingers").expect("affordable");
        assert!(game.state.upgrade("faster_fingers").is_none());
        assert!((game.state.resource(ResourceKind::Bits).per_click - 0.2).abs() < 1e-9);
        assert!((bits(&game) - 40.0).abs() < 1e-9);
        assert_eq!(
            game.buy_upgrade("faster_fingers"),
            Err(PurchaseError::UnknownUpgrade("faster_fingers".to_string()))
        );
    }

    #[test]
    fn efficiency_upgrade_boosts_owned_units() {
        let (mut game, _) = new_game();
        game.state.ledger.get_mut(ResourceKind::Bits).amount = 100_000.0;
        game.buy_factory("workstation", 2).expect("two workstations");
        assert!((game.state.resource(ResourceKind::Bits).per_second - 2.0).abs() < 1e-9);

        game.state.personal_computer_unlocked = true;
        game.buy_upgrade("ram_upgrade").expect("ram upgrade");
        // RAM upgrade targets personal computers, none owned.
        assert!((game.state.resource(ResourceKind::Bits).per_second - 2.0).abs() < 1e-9);

        game.buy_upgrade("processor_overclock").expect("overclock");
        assert!((game.state.resource(ResourceKind::Bits).per_second - 4.0).abs() < 1e-9);
        game.buy_factory("workstation", 1).expect("third workstation");
        assert!((game.state.resource(ResourceKind::Bits).per_second - 6.0).abs() < 1e-9);
    }

    #[test]
    fn special_upgrades_dispatch_by_variant() {
        let (mut game, _) = new_game();
        game.state.ledger.get_mut(ResourceKind::Bits).amount = 1e7;
        game.buy_factory("mini_server", 1).expect("mini server");
        game.buy_upgrade("double_click").expect("double click");
        assert!((game.state.resource(ResourceKind::Bits).per_click - 0.2).abs() < 1e-9);
        game.buy_upgrade("triple_click").expect("triple click");
        assert!((game.state.resource(ResourceKind::Bits).per_click - 0.6).abs() < 1e-9);
        game.buy_upgrade("data_compression").expect("flat rate");
        assert!((game.state.resource(ResourceKind::Bits).per_second - 58.0).abs() < 1e-9);
    }

    #[test]
    fn quantum_research_unlocks_qubits() {
        let (mut game, _) = new_game();
        game.state.ledger.get_mut(ResourceKind::Bits).amount = 2e9;
        assert_eq!(game.state.visible_factories().len(), 10);
        game.buy_upgrade(upgrades::QUANTUM_RESEARCH_LAB)
            .expect("research lab");
        assert!(game.state.quantum_unlocked);
        assert_eq!(game.state.resource(ResourceKind::Qubits).per_click, 1.0);
        assert_eq!(game.state.visible_factories().len(), FACTORY_DEFS.len());

        game.click();
        game.click();
        assert_eq!(game.state.resource(ResourceKind::Qubits).amount, 2.0);
        assert!(matches!(
            game.buy_factory("basic_quantum_computer", 1),
            Err(PurchaseError::InsufficientFunds {
                resource: ResourceKind::Qubits,
                ..
            })
        ));
    }

    #[test]
    fn tick_applies_prestige_multiplier_to_stored_rate() {
        let (mut game, _) = new_game();
        game.state.prestige_multiplier = 1.5;
        game.state.ledger.get_mut(ResourceKind::Bits).per_second = 2.0;
        game.tick();
        assert!((bits(&game) - 3.0).abs() < 1e-9);
        assert!((game.state.total_bits_earned - 3.0).abs() < 1e-9);
    }

    #[test]
    fn update_runs_one_tick_per_interval() {
        let (mut game, _) = new_game();
        game.state.ledger.get_mut(ResourceKind::Bits).per_second = 1.0;
        game.update(Duration::from_millis(600));
        assert_eq!(bits(&game), 0.0);
        game.update(Duration::from_millis(2_500));
        assert!((bits(&game) - 3.0).abs() < 1e-9);
        assert!(game.tick_progress() > 0.0);
    }

    #[test]
    fn prestige_resets_run_and_raises_multiplier() {
        let (mut game, _) = new_game();
        game.state.ledger.get_mut(ResourceKind::Bits).amount = 1e6;
        game.buy_factory("workstation", 5).expect("workstations");
        game.state.quantum_unlocked = true;
        game.state.upgrades.clear();
        game.state.total_bits_earned = 5e6;
        game.state.total_qubits_earned = 3.5e12;

        assert_eq!(game.available_prestige_points(), 3);
        let summary = game.perform_prestige();

        assert_eq!(summary.points_gained, 3);
        assert_eq!(summary.times_prestiged, 1);
        assert!((game.state.prestige_multiplier - 1.3).abs() < 1e-9);
        assert_eq!(game.state.prestige_points, 3);
        assert!(game.state.ledger.iter().all(|r| r.amount == 0.0 && r.per_second == 0.0));
        assert!((game.state.resource(ResourceKind::Bits).per_click - 0.13).abs() < 1e-9);
        assert_eq!(game.state.resource(ResourceKind::Qubits).per_click, 0.0);
        assert!(
            game.state
                .factories
                .iter()
                .all(|f| f.count == 0 && f.cost == f.initial_cost)
        );
        assert_eq!(game.state.upgrades.len(), upgrades::build_upgrades().len());
        assert!(!game.state.quantum_unlocked);
        assert!(!game.state.personal_computer_unlocked);
        assert_eq!(game.state.total_bits_earned, 0.0);
        assert_eq!(game.state.total_qubits_earned, 0.0);
        assert!(
            game.state
                .achievements
                .iter()
                .any(|a| a.id == "first_prestige" && a.is_unlocked)
        );
    }

    #[test]
    fn prestige_upgrades_persist_and_reapply() {
        let (mut game, _) = new_game();
        game.state.prestige_points = 10;
        game.buy_prestige_upgrade("head_start").expect("head start");
        game.buy_prestige_upgrade("nimble_fingers").expect("nimble fingers");
        assert_eq!(game.state.prestige_points, 6);
        assert_eq!(bits(&game), 1_000.0);
        assert!((game.state.resource(ResourceKind::Bits).per_click - 0.2).abs() < 1e-9);
        assert_eq!(
            game.buy_prestige_upgrade("head_start"),
            Err(PurchaseError::AlreadyBought("Head Start".to_string()))
        );

        game.perform_prestige();
        assert_eq!(bits(&game), 1_000.0);
        assert!((game.state.resource(ResourceKind::Bits).per_click - 0.2).abs() < 1e-9);
        assert!(
            game.state
                .prestige_upgrades
                .iter()
                .filter(|u| u.bought)
                .count()
                == 2
        );
    }

    #[test]
    fn prestige_upgrade_requires_points() {
        let (mut game, _) = new_game();
        game.state.prestige_points = 4;
        let before = game.state.clone();
        assert_eq!(
            game.buy_prestige_upgrade("overclocked_grid"),
            Err(PurchaseError::InsufficientPrestigePoints {
                cost: 5,
                available: 4
            })
        );
        assert_eq!(game.state, before);
    }

    #[test]
    fn factory_multiplier_scales_existing_output() {
        let (mut game, _) = new_game();
        game.state.ledger.get_mut(ResourceKind::Bits).amount = 1_000.0;
        game.buy_factory("workstation", 2).expect("workstations");
        game.state.prestige_points = 5;
        game.buy_prestige_upgrade("overclocked_grid").expect("grid");
        assert!((game.state.factory_efficiency_multiplier - 1.5).abs() < 1e-9);
        assert!((game.state.resource(ResourceKind::Bits).per_second - 3.0).abs() < 1e-9);

        game.perform_prestige();
        assert!((game.state.factory_efficiency_multiplier - 1.5).abs() < 1e-9);
        assert_eq!(game.state.resource(ResourceKind::Bits).per_second, 0.0);
    }

    #[test]
    fn quick_reset_lowers_threshold() {
        let (mut game, _) = new_game();
        game.state.total_qubits_earned = 2.5e6;
        assert_eq!(game.available_prestige_points(), 0);
        game.state.prestige_points = 1;
        game.buy_prestige_upgrade("quick_reset").expect("quick reset");
        assert_eq!(game.available_prestige_points(), 2);
    }

    #[test]
    fn offline_progress_is_capped_and_discounted() {
        let (mut game, _) = new_game();
        game.state.ledger.get_mut(ResourceKind::Bits).per_second = 2.0;
        let report = game.offline_progress(Duration::from_secs(24 * 3_600));
        assert_eq!(report.credited, Duration::from_secs(8 * 3_600));
        assert!((report.bits - 2.0 * 8.0 * 3_600.0 * 0.5).abs() < 1e-6);
        assert_eq!(report.qubits, 0.0);
        assert!((bits(&game) - report.bits).abs() < 1e-6);
    }

    #[test]
    fn offline_prestige_upgrades_extend_window_and_efficiency() {
        let (mut game, _) = new_game();
        game.state.prestige_points = 4;
        game.buy_prestige_upgrade("efficient_dreams").expect("dreams");
        game.buy_prestige_upgrade("long_nap").expect("nap");
        assert_eq!(game.state.offline_efficiency, Some(0.75));

        game.state.ledger.get_mut(ResourceKind::Bits).per_second = 1.0;
        let report = game.offline_progress(Duration::from_secs(24 * 3_600));
        assert_eq!(report.credited, Duration::from_secs(10 * 3_600));
        assert!((report.bits - 10.0 * 3_600.0 * 0.75).abs() < 1e-6);
    }

    #[test]
    fn resume_measures_time_since_last_active() {
        let (mut game, _) = new_game();
        game.state.ledger.get_mut(ResourceKind::Bits).per_second = 1.0;
        let then = Utc::now();
        game.mark_active(then);
        let report = game.resume(then + chrono::Duration::seconds(100));
        assert_eq!(report.time_away, Duration::from_secs(100));
        assert!((report.bits - 50.0).abs() < 1e-9);

        let earlier = then - chrono::Duration::seconds(30);
        let report = game.resume(earlier);
        assert_eq!(report.time_away, Duration::ZERO);
    }

    #[test]
    fn save_failure_keeps_mutation() {
        let mut game = Game::fresh(EconomyConfig::default(), Box::new(FailingStore));
        game.state.ledger.get_mut(ResourceKind::Bits).amount = 20.0;
        game.buy_factory(PERSONAL_COMPUTER, 1).expect("purchase despite save failure");
        assert_eq!(game.state.factory_count(PERSONAL_COMPUTER), 1);
        assert!(game.save().is_err());
    }

    #[test]
    fn load_restores_saved_game() {
        let store = MemoryStore::new();
        let mut game = Game::load(EconomyConfig::default(), Box::new(store.clone()))
            .expect("fresh game");
        game.state.ledger.get_mut(ResourceKind::Bits).amount = 500.0;
        game.buy_factory("workstation", 1).expect("workstation");

        let reloaded =
            Game::load(EconomyConfig::default(), Box::new(store)).expect("reload");
        assert_eq!(reloaded.state, game.state);
        assert!(reloaded.messages().any(|m| m == "Loaded save state."));
    }

    #[test]
    fn from_state_repairs_catalogs() {
        let mut state = GameState::default();
        state.factories.truncate(3);
        state.achievements.clear();
        state.prestige_multiplier = 0.0;
        let game = Game::from_state(state, EconomyConfig::default(), Box::new(MemoryStore::new()));
        assert_eq!(game.state.factories.len(), FACTORY_DEFS.len());
        assert_eq!(
            game.state.achievements.len(),
            achievements::build_achievements().len()
        );
        assert_eq!(game.state.prestige_multiplier, 1.0);
    }

    #[test]
    fn visible_upgrades_follow_predicates_and_cost() {
        let (mut game, _) = new_game();
        let visible: Vec<&str> = game
            .state
            .visible_upgrades()
            .iter()
            .map(|u| u.id.as_str())
            .collect();
        assert_eq!(visible, vec!["faster_fingers"]);

        game.state.ledger.get_mut(ResourceKind::Bits).amount = 20.0;
        game.buy_factory(PERSONAL_COMPUTER, 1).expect("pc");
        let visible: Vec<&str> = game
            .state
            .visible_upgrades()
            .iter()
            .map(|u| u.id.as_str())
            .collect();
        assert_eq!(visible, vec!["faster_fingers", "ram_upgrade", "cpu_upgrade"]);
    }

    #[test]
    fn messages_are_bounded() {
        let (mut game, _) = new_game();
        for index in 0..20 {
            game.add_message(format!("message {index}"));
        }
        assert_eq!(game.messages().count(), MAX_MESSAGES);
        assert_eq!(game.messages().last().map(String::as_str), Some("message 19"));
    }
}
