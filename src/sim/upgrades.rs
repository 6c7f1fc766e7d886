use crate::sim::factories::PERSONAL_COMPUTER;
use crate::sim::game::GameState;
use crate::sim::resources::ResourceKind;
use serde::{Deserialize, Serialize};

pub const QUANTUM_RESEARCH_LAB: &str = "quantum_research_lab";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UpgradeEffect {
    FactoryEfficiency { factory: String, multiplier: f64 },
    ResourcePerClick { resource: ResourceKind, amount: f64 },
    ResourcePerSecond { resource: ResourceKind, amount: f64 },
    UnlockResource(ResourceKind),
    Other(SpecialUpgrade),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpecialUpgrade {
    /// Doubles Bits per click.
    DoubleClick,
    /// Triples Bits per click.
    TripleClick,
    /// Raises the global factory efficiency multiplier by a quarter.
    GridSynchronization,
}

/// When an upgrade should be listed. Purely cosmetic: the engine only checks
/// affordability when buying.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Visibility {
    Always,
    PersonalComputerUnlocked,
    QuantumUnlocked,
    BitsEarned(f64),
    FactoryCount {
        factory: String,
        at_least: u32,
    },
    BitsEarnedAndFactoryCount {
        bits_earned: f64,
        factory: String,
        at_least: u32,
    },
}

impl Visibility {
    pub fn is_met(&self, state: &GameState) -> bool {
        match self {
            Visibility::Always => true,
            Visibility::PersonalComputerUnlocked => state.personal_computer_unlocked,
            Visibility::QuantumUnlocked => state.quantum_unlocked,
            Visibility::BitsEarned(bits) => state.total_bits_earned >= *bits,
            Visibility::FactoryCount { factory, at_least } => {
                state.factory_count(factory) >= *at_least
            }
            Visibility::BitsEarnedAndFactoryCount {
                bits_earned,
                factory,
                at_least,
            } => state.total_bits_earned >= *bits_earned && state.factory_count(factory) >= *at_least,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Upgrade {
    pub id: String,
    pub icon: String,
    pub name: String,
    pub cost: f64,
    pub cost_resource: ResourceKind,
    pub overview: String,
    pub effect: UpgradeEffect,
    pub visible_when: Visibility,
}

#[allow(clippy::too_many_arguments)]
fn upgrade(
    id: &str,
    icon: &str,
    name: &str,
    cost: f64,
    cost_resource: ResourceKind,
    overview: &str,
    effect: UpgradeEffect,
    visible_when: Visibility,
) -> Upgrade {
    Upgrade {
        id: id.to_string(),
        icon: icon.to_string(),
        name: name.to_string(),
        cost,
        cost_resource,
        overview: overview.to_string(),
        effect,
        visible_when,
    }
}

fn efficiency(factory: &str, multiplier: f64) -> UpgradeEffect {
    UpgradeEffect::FactoryEfficiency {
        factory: factory.to_string(),
        multiplier,
    }
}

fn count_at_least(factory: &str, at_least: u32) -> Visibility {
    Visibility::FactoryCount {
        factory: factory.to_string(),
        at_least,
    }
}

fn earned_and_count(bits_earned: f64, factory: &str, at_least: u32) -> Visibility {
    Visibility::BitsEarnedAndFactoryCount {
        bits_earned,
        factory: factory.to_string(),
        at_least,
    }
}

/// Five doubling upgrades for one server-class factory, priced at 10x, 50x,
/// 100x, 500x and 1000x its base cost and revealed at 5/10/15/20/25 owned.
fn factory_tier(
    factory: &str,
    factory_name: &str,
    base_cost: f64,
    names: [(&str, &str); 5],
    bits_earned: [f64; 5],
) -> Vec<Upgrade> {
    const PRICE_STEPS: [f64; 5] = [10.0, 50.0, 100.0, 500.0, 1000.0];
    const COUNT_STEPS: [u32; 5] = [5, 10, 15, 20, 25];
    names
        .iter()
        .enumerate()
        .map(|(step, (id, name))| {
            upgrade(
                id,
                "wrench.and.screwdriver",
                name,
                base_cost * PRICE_STEPS[step],
                ResourceKind::Bits,
                &format!("{factory_name} output x2"),
                efficiency(factory, 2.0),
                earned_and_count(bits_earned[step], factory, COUNT_STEPS[step]),
            )
        })
        .collect()
}

/// Build the full upgrade list, as at first launch or right after a prestige.
pub fn build_upgrades() -> Vec<Upgrade> {
    use ResourceKind::{Bits, Qubits};

    let mut upgrades = vec![
        upgrade(
            "faster_fingers",
            "hand.point.up",
            "Faster Fingers",
            10.0,
            Bits,
            "+0.1 Bits per click",
            UpgradeEffect::ResourcePerClick {
                resource: Bits,
                amount: 0.1,
            },
            Visibility::Always,
        ),
        upgrade(
            "ram_upgrade",
            "memorychip",
            "RAM Upgrade",
            100.0,
            Bits,
            "Personal Computer output x2",
            efficiency(PERSONAL_COMPUTER, 2.0),
            Visibility::PersonalComputerUnlocked,
        ),
        upgrade(
            "cpu_upgrade",
            "cpu",
            "CPU Upgrade",
            500.0,
            Bits,
            "Personal Computer output x2",
            efficiency(PERSONAL_COMPUTER, 2.0),
            count_at_least(PERSONAL_COMPUTER, 1),
        ),
        upgrade(
            "cooling_system_upgrade",
            "fan",
            "Cooling System Upgrade",
            5_000.0,
            Bits,
            "Personal Computer output x2",
            efficiency(PERSONAL_COMPUTER, 2.0),
            count_at_least(PERSONAL_COMPUTER, 10),
        ),
        upgrade(
            "storage_upgrade",
            "externaldrive",
            "Storage Upgrade",
            50_000.0,
            Bits,
            "Personal Computer output x2",
            efficiency(PERSONAL_COMPUTER, 2.0),
            count_at_least(PERSONAL_COMPUTER, 15),
        ),
        upgrade(
            "double_click",
            "cursorarrow.click.2",
            "Double Click",
            1_000.0,
            Bits,
            "Bits per click x2",
            UpgradeEffect::Other(SpecialUpgrade::DoubleClick),
            count_at_least("workstation", 1),
        ),
        upgrade(
            "processor_overclock",
            "speedometer",
            "Processor Overclock",
            10_000.0,
            Bits,
            "Workstation output x2",
            efficiency("workstation", 2.0),
            count_at_least("workstation", 10),
        ),
        upgrade(
            "ram_expansion",
            "memorychip",
            "RAM Expansion",
            100_000.0,
            Bits,
            "Workstation output x2",
            efficiency("workstation", 2.0),
            count_at_least("workstation", 25),
        ),
        upgrade(
            "graphics_accelerator",
            "display",
            "Graphics Accelerator",
            1_000_000.0,
            Bits,
            "Workstation output x2",
            efficiency("workstation", 2.0),
            count_at_least("workstation", 50),
        ),
        upgrade(
            "high_speed_network_interface",
            "network",
            "High-Speed Network Interface",
            10_000_000.0,
            Bits,
            "Workstation output x2",
            efficiency("workstation", 2.0),
            count_at_least("workstation", 100),
        ),
        upgrade(
            "improved_bandwidth",
            "antenna.radiowaves.left.and.right",
            "Improved Bandwidth",
            11_000.0,
            Bits,
            "Mini Server output x2",
            efficiency("mini_server", 2.0),
            earned_and_count(25_000.0, "mini_server", 1),
        ),
        upgrade(
            "energy_efficiency",
            "leaf",
            "Energy Efficiency",
            55_000.0,
            Bits,
            "Mini Server output x2",
            efficiency("mini_server", 2.0),
            count_at_least("mini_server", 5),
        ),
        upgrade(
            "advanced_cooling_system",
            "snowflake",
            "Advanced Cooling System",
            110_000.0,
            Bits,
            "Mini Server output x2",
            efficiency("mini_server", 2.0),
            earned_and_count(50_000.0, "mini_server", 10),
        ),
        upgrade(
            "data_compression",
            "archivebox",
            "Data Compression",
            550_000.0,
            Bits,
            "+50 Bits per second",
            UpgradeEffect::ResourcePerSecond {
                resource: Bits,
                amount: 50.0,
            },
            earned_and_count(100_000.0, "mini_server", 15),
        ),
        upgrade(
            "security_enhancements",
            "lock.shield",
            "Security Enhancements",
            1_100_000.0,
            Bits,
            "Mini Server output x2",
            efficiency("mini_server", 2.0),
            earned_and_count(150_000.0, "mini_server", 20),
        ),
        upgrade(
            "high_performance_cpus",
            "cpu",
            "High Performance CPUs",
            120_000.0,
            Bits,
            "Server Rack output x2",
            efficiency("server_rack", 2.0),
            earned_and_count(100_000.0, "server_rack", 1),
        ),
        upgrade(
            "solid_state_drives",
            "internaldrive",
            "Solid-State Drives",
            600_000.0,
            Bits,
            "Server Rack output x2",
            efficiency("server_rack", 2.0),
            earned_and_count(150_000.0, "server_rack", 10),
        ),
        upgrade(
            "enhanced_network_interface_cards",
            "cable.connector",
            "Enhanced Network Interface Cards",
            1_200_000.0,
            Bits,
            "Server Rack output x2",
            efficiency("server_rack", 2.0),
            earned_and_count(200_000.0, "server_rack", 15),
        ),
        upgrade(
            "power_distribution_unit_upgrade",
            "powerplug",
            "Power Distribution Unit Upgrade",
            6_000_000.0,
            Bits,
            "+500 Bits per second",
            UpgradeEffect::ResourcePerSecond {
                resource: Bits,
                amount: 500.0,
            },
            earned_and_count(250_000.0, "server_rack", 20),
        ),
        upgrade(
            "redundant_array_of_independent_disks",
            "square.stack",
            "Redundant Array of Independent Disks",
            12_000_000.0,
            Bits,
            "Server Rack output x2",
            efficiency("server_rack", 2.0),
            earned_and_count(300_000.0, "server_rack", 25),
        ),
        upgrade(
            "triple_click",
            "cursorarrow.click.badge.clock",
            "Triple Click",
            500_000.0,
            Bits,
            "Bits per click x3",
            UpgradeEffect::Other(SpecialUpgrade::TripleClick),
            count_at_least("server_farm", 1),
        ),
        upgrade(
            QUANTUM_RESEARCH_LAB,
            "atom",
            "Quantum Research Lab",
            1_000_000_000.0,
            Bits,
            "Unlock Qubits and quantum computers",
            UpgradeEffect::UnlockResource(Qubits),
            Visibility::BitsEarned(500_000_000.0),
        ),
        upgrade(
            "quantum_clicker",
            "hand.tap",
            "Quantum Clicker",
            50.0,
            Qubits,
            "+1 Qubit per click",
            UpgradeEffect::ResourcePerClick {
                resource: Qubits,
                amount: 1.0,
            },
            Visibility::QuantumUnlocked,
        ),
        upgrade(
            "improved_qubit_coherence",
            "waveform",
            "Improved Qubit Coherence",
            100.0,
            Qubits,
            "Basic Quantum Computer output x2",
            efficiency("basic_quantum_computer", 2.0),
            count_at_least("basic_quantum_computer", 1),
        ),
        upgrade(
            "enhanced_quantum_gates",
            "square.on.circle",
            "Enhanced Quantum Gates",
            500.0,
            Qubits,
            "Basic Quantum Computer output x2",
            efficiency("basic_quantum_computer", 2.0),
            count_at_least("basic_quantum_computer", 5),
        ),
        upgrade(
            "entanglement_grid",
            "link",
            "Entanglement Grid",
            1_000_000.0,
            Qubits,
            "All computer output x1.25",
            UpgradeEffect::Other(SpecialUpgrade::GridSynchronization),
            count_at_least("topological_quantum_system", 1),
        ),
        upgrade(
            "quantum_error_correction",
            "checkmark.shield",
            "Quantum Error Correction",
            6e19,
            Qubits,
            "Planck-Scale Quantum Processor output x2",
            efficiency("planck_scale_quantum_processor", 2.0),
            count_at_least("planck_scale_quantum_processor", 20),
        ),
    ];

    upgrades.extend(factory_tier(
        "server_farm",
        "Server Farm",
        130_000.0,
        [
            ("high_performance_servers", "High-Performance Servers"),
            ("data_center_optimization", "Data Center Optimization"),
            ("enhanced_power_supply", "Enhanced Power Supply"),
            ("ai_driven_maintenance", "AI-Driven Maintenance"),
            ("scalable_storage_solutions", "Scalable Storage Solutions"),
        ],
        [1e6, 1.5e6, 2e6, 2.5e6, 3e6],
    ));
    upgrades.extend(factory_tier(
        "mainframe",
        "Mainframe",
        1_400_000.0,
        [
            ("parallel_processing_units", "Parallel Processing Units"),
            ("enhanced_memory_architecture", "Enhanced Memory Architecture"),
            ("advanced_cooling_solutions", "Advanced Cooling Solutions"),
            ("high_speed_data_bus", "High-Speed Data Bus"),
            (
                "artificial_intelligence_integration",
                "Artificial Intelligence Integration",
            ),
        ],
        [1e7, 1.5e7, 2e7, 2.5e7, 3e7],
    ));
    upgrades.extend(factory_tier(
        "vector_processor",
        "Vector Processor",
        20_000_000.0,
        [
            ("enhanced_vector_units", "Enhanced Vector Units"),
            ("high_bandwidth_memory", "High-Bandwidth Memory"),
            ("multi_core_architecture", "Multi-Core Architecture"),
            ("advanced_pipeline_optimization", "Advanced Pipeline Optimization"),
            ("quantum_inspired_algorithms", "Quantum-Inspired Algorithms"),
        ],
        [5e7, 1e8, 2e8, 4e8, 8e8],
    ));
    upgrades.extend(factory_tier(
        "parallel_processing_array",
        "Parallel Processing Array",
        330_000_000.0,
        [
            ("enhanced_interconnect", "Enhanced Interconnect"),
            ("scalable_architecture", "Scalable Architecture"),
            ("heterogeneous_computing", "Heterogeneous Computing"),
            ("load_balancing_algorithms", "Load Balancing Algorithms"),
            ("optical_interconnects", "Optical Interconnects"),
        ],
        [5e8, 1e9, 2e9, 4e9, 8e9],
    ));
    upgrades.extend(factory_tier(
        "neural_network_computer",
        "Neural Network Computer",
        5_100_000_000.0,
        [
            ("advanced_neural_architecture", "Advanced Neural Architecture"),
            ("spiking_neural_networks", "Spiking Neural Networks"),
            ("neuromorphic_hardware", "Neuromorphic Hardware"),
            ("adaptive_learning_algorithms", "Adaptive Learning Algorithms"),
            (
                "quantum_enhanced_machine_learning",
                "Quantum-Enhanced Machine Learning",
            ),
        ],
        [5e9, 1e10, 2e10, 4e10, 8e10],
    ));
    upgrades.extend(factory_tier(
        "supercomputer",
        "Supercomputer",
        75_000_000_000.0,
        [
            ("exascale_computing", "Exascale Computing"),
            ("advanced_cooling_systems", "Advanced Cooling Systems"),
            ("3d_chip_stacking", "3D Chip Stacking"),
            ("photonic_computing", "Photonic Computing"),
            ("quantum_classical_hybrid", "Quantum-Classical Hybrid"),
        ],
        [5e10, 1e11, 2e11, 4e11, 8e11],
    ));

    upgrades
}
