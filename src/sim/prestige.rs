use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PrestigeEffect {
    /// Prestige points accrue per `quick_reset_threshold` lifetime Qubits.
    QuickReset,
    OfflineEfficiency(f64),
    /// Offline accrual is capped at the extended window.
    ExtendedOffline,
    StartingBits(f64),
    ClickMultiplier(f64),
    FactoryMultiplier(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrestigeUpgrade {
    pub id: String,
    pub icon: String,
    pub name: String,
    pub overview: String,
    pub cost: u64,
    pub bought: bool,
    pub effect: PrestigeEffect,
}

struct PrestigeUpgradeDef {
    id: &'static str,
    icon: &'static str,
    name: &'static str,
    overview: &'static str,
    cost: u64,
    effect: PrestigeEffect,
}

const PRESTIGE_UPGRADE_DEFS: [PrestigeUpgradeDef; 6] = [
    PrestigeUpgradeDef {
        id: "quick_reset",
        icon: "arrow.counterclockwise",
        name: "Quick Reset",
        overview: "Earn prestige points every million Qubits instead of every trillion",
        cost: 1,
        effect: PrestigeEffect::QuickReset,
    },
    PrestigeUpgradeDef {
        id: "head_start",
        icon: "flag.checkered",
        name: "Head Start",
        overview: "Begin every run with 1K Bits",
        cost: 1,
        effect: PrestigeEffect::StartingBits(1_000.0),
    },
    PrestigeUpgradeDef {
        id: "efficient_dreams",
        icon: "moon.zzz",
        name: "Efficient Dreams",
        overview: "Computers run at 75% speed while you are away",
        cost: 2,
        effect: PrestigeEffect::OfflineEfficiency(0.75),
    },
    PrestigeUpgradeDef {
        id: "long_nap",
        icon: "bed.double",
        name: "Long Nap",
        overview: "Time away is capped at 10 hours instead of 8",
        cost: 2,
        effect: PrestigeEffect::ExtendedOffline,
    },
    PrestigeUpgradeDef {
        id: "nimble_fingers",
        icon: "hand.tap.fill",
        name: "Nimble Fingers",
        overview: "Bits per click x2",
        cost: 3,
        effect: PrestigeEffect::ClickMultiplier(2.0),
    },
    PrestigeUpgradeDef {
        id: "overclocked_grid",
        icon: "bolt.fill",
        name: "Overclocked Grid",
        overview: "All computer output x1.5",
        cost: 5,
        effect: PrestigeEffect::FactoryMultiplier(1.5),
    },
];

pub fn build_prestige_upgrades() -> Vec<PrestigeUpgrade> {
    PRESTIGE_UPGRADE_DEFS
        .iter()
        .map(|def| PrestigeUpgrade {
            id: def.id.to_string(),
            icon: def.icon.to_string(),
            name: def.name.to_string(),
            overview: def.overview.to_string(),
            cost: def.cost,
            bought: false,
            effect: def.effect,
        })
        .collect()
}

/// Prestige points a reset would award for `total_qubits_earned`.
pub fn available_points(total_qubits_earned: f64, threshold: f64) -> u64 {
    if threshold <= 0.0 || !total_qubits_earned.is_finite() || total_qubits_earned <= 0.0 {
        return 0;
    }
    (total_qubits_earned / threshold).floor() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_are_floored() {
        assert_eq!(available_points(0.0, 1e12), 0);
        assert_eq!(available_points(9.99e11, 1e12), 0);
        assert_eq!(available_points(2.5e12, 1e12), 2);
        assert_eq!(available_points(3_500_000.0, 1e6), 3);
    }

    #[test]
    fn nonsense_thresholds_award_nothing() {
        assert_eq!(available_points(1e15, 0.0), 0);
        assert_eq!(available_points(f64::NAN, 1e6), 0);
    }

    #[test]
    fn catalog_starts_unbought() {
        let upgrades = build_prestige_upgrades();
        assert_eq!(upgrades.len(), PRESTIGE_UPGRADE_DEFS.len());
        assert!(upgrades.iter().all(|u| !u.bought && u.cost > 0));
    }
}
