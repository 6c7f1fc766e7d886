use crate::sim::game::GameState;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AchievementGoal {
    BitsEarned(f64),
    QubitsEarned(f64),
    FactoriesOwned(u32),
    QuantumUnlocked,
    TimesPrestiged(u32),
}

impl AchievementGoal {
    pub fn is_met(&self, state: &GameState) -> bool {
        match *self {
            AchievementGoal::BitsEarned(bits) => state.total_bits_earned >= bits,
            AchievementGoal::QubitsEarned(qubits) => state.total_qubits_earned >= qubits,
            AchievementGoal::FactoriesOwned(count) => state.total_factory_count() >= count,
            AchievementGoal::QuantumUnlocked => state.quantum_unlocked,
            AchievementGoal::TimesPrestiged(times) => state.times_prestiged >= times,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub overview: String,
    pub is_unlocked: bool,
    pub order: u32,
    pub goal: AchievementGoal,
}

struct AchievementDef {
    id: &'static str,
    title: &'static str,
    overview: &'static str,
    goal: AchievementGoal,
}

const ACHIEVEMENT_DEFS: [AchievementDef; 12] = [
    AchievementDef {
        id: "first_bit",
        title: "Hello, World",
        overview: "Earn your first Bit",
        goal: AchievementGoal::BitsEarned(1.0),
    },
    AchievementDef {
        id: "kilobit",
        title: "Kilobit",
        overview: "Earn 1K Bits",
        goal: AchievementGoal::BitsEarned(1e3),
    },
    AchievementDef {
        id: "megabit",
        title: "Megabit",
        overview: "Earn 1M Bits",
        goal: AchievementGoal::BitsEarned(1e6),
    },
    AchievementDef {
        id: "gigabit",
        title: "Gigabit",
        overview: "Earn 1B Bits",
        goal: AchievementGoal::BitsEarned(1e9),
    },
    AchievementDef {
        id: "terabit",
        title: "Terabit",
        overview: "Earn 1T Bits",
        goal: AchievementGoal::BitsEarned(1e12),
    },
    AchievementDef {
        id: "small_fleet",
        title: "Small Fleet",
        overview: "Own 10 computers",
        goal: AchievementGoal::FactoriesOwned(10),
    },
    AchievementDef {
        id: "data_center",
        title: "Data Center",
        overview: "Own 100 computers",
        goal: AchievementGoal::FactoriesOwned(100),
    },
    AchievementDef {
        id: "hyperscaler",
        title: "Hyperscaler",
        overview: "Own 500 computers",
        goal: AchievementGoal::FactoriesOwned(500),
    },
    AchievementDef {
        id: "quantum_leap",
        title: "Quantum Leap",
        overview: "Unlock quantum computing",
        goal: AchievementGoal::QuantumUnlocked,
    },
    AchievementDef {
        id: "first_qubit",
        title: "Superposition",
        overview: "Earn your first Qubit",
        goal: AchievementGoal::QubitsEarned(1.0),
    },
    AchievementDef {
        id: "first_prestige",
        title: "Reboot",
        overview: "Prestige for the first time",
        goal: AchievementGoal::TimesPrestiged(1),
    },
    AchievementDef {
        id: "serial_rebooter",
        title: "Serial Rebooter",
        overview: "Prestige 10 times",
        goal: AchievementGoal::TimesPrestiged(10),
    },
];

pub fn build_achievements() -> Vec<Achievement> {
    ACHIEVEMENT_DEFS
        .iter()
        .enumerate()
        .map(|(index, def)| Achievement {
            id: def.id.to_string(),
            title: def.title.to_string(),
            overview: def.overview.to_string(),
            is_unlocked: false,
            order: index as u32 + 1,
            goal: def.goal,
        })
        .collect()
}

/// Unlock every achievement whose goal is met. Returns the titles newly
/// unlocked; already-unlocked entries are never touched.
pub fn check_achievements(state: &mut GameState) -> Vec<String> {
    let met: Vec<usize> = state
        .achievements
        .iter()
        .enumerate()
        .filter(|(_, achievement)| !achievement.is_unlocked && achievement.goal.is_met(state))
        .map(|(index, _)| index)
        .collect();
    met.into_iter()
        .map(|index| {
            let achievement = &mut state.achievements[index];
            achievement.is_unlocked = true;
            achievement.title.clone()
        })
        .collect()
}
