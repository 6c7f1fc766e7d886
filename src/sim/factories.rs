use crate::sim::format::format_number;
use crate::sim::resources::ResourceKind;
use serde::{Deserialize, Serialize};

pub const PERSONAL_COMPUTER: &str = "personal_computer";

#[derive(Debug, Clone, Copy)]
pub struct FactoryDef {
    pub id: &'static str,
    pub icon: &'static str,
    pub name: &'static str,
    pub cost: f64,
    pub resource: ResourceKind,
    pub base_output: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Factory {
    pub id: String,
    pub icon: String,
    pub name: String,
    pub cost: f64,
    pub initial_cost: f64,
    pub count: u32,
    /// Resource spent to buy a unit; also the resource a unit produces.
    pub cost_resource: ResourceKind,
    pub base_output: f64,
    #[serde(default = "default_efficiency")]
    pub efficiency: f64,
    pub overview: String,
}

fn default_efficiency() -> f64 {
    1.0
}

impl Factory {
    pub fn from_def(def: &FactoryDef, prestige_multiplier: f64) -> Self {
        Self {
            id: def.id.to_string(),
            icon: def.icon.to_string(),
            name: def.name.to_string(),
            cost: def.cost,
            initial_cost: def.cost,
            count: 0,
            cost_resource: def.resource,
            base_output: def.base_output,
            efficiency: 1.0,
            overview: overview(def.base_output, def.resource, prestige_multiplier),
        }
    }

    pub fn output_resource(&self) -> ResourceKind {
        self.cost_resource
    }

    pub fn is_quantum(&self) -> bool {
        self.cost_resource == ResourceKind::Qubits
    }

    pub fn reset(&mut self) {
        self.count = 0;
        self.cost = self.initial_cost;
    }
}

fn overview(base_output: f64, resource: ResourceKind, prestige_multiplier: f64) -> String {
    let rate = format_number(base_output * prestige_multiplier);
    if prestige_multiplier > 1.0 {
        format!("Generates {rate} {resource}/s (x{prestige_multiplier:.2} prestige)")
    } else {
        format!("Generates {rate} {resource}/s")
    }
}

pub fn factory_def(id: &str) -> Option<&'static FactoryDef> {
    FACTORY_DEFS.iter().find(|def| def.id == id)
}

/// Build the full factory list, as at first launch or right after a prestige.
pub fn build_factories(prestige_multiplier: f64) -> Vec<Factory> {
    FACTORY_DEFS
        .iter()
        .map(|def| Factory::from_def(def, prestige_multiplier))
        .collect()
}

pub const FACTORY_DEFS: [FactoryDef; 26] = [
    FactoryDef {
        id: PERSONAL_COMPUTER,
        icon: "desktopcomputer",
        name: "Personal Computer",
        cost: 15.0,
        resource: ResourceKind::Bits,
        base_output: 0.1,
    },
    FactoryDef {
        id: "workstation",
        icon: "pc",
        name: "Workstation",
        cost: 100.0,
        resource: ResourceKind::Bits,
        base_output: 1.0,
    },
    FactoryDef {
        id: "mini_server",
        icon: "server.rack",
        name: "Mini Server",
        cost: 1_100.0,
        resource: ResourceKind::Bits,
        base_output: 8.0,
    },
    FactoryDef {
        id: "server_rack",
        icon: "square.stack.3d.up",
        name: "Server Rack",
        cost: 12_000.0,
        resource: ResourceKind::Bits,
        base_output: 47.0,
    },
    FactoryDef {
        id: "server_farm",
        icon: "building.2",
        name: "Server Farm",
        cost: 130_000.0,
        resource: ResourceKind::Bits,
        base_output: 260.0,
    },
    FactoryDef {
        id: "mainframe",
        icon: "cpu",
        name: "Mainframe",
        cost: 1_400_000.0,
        resource: ResourceKind::Bits,
        base_output: 1_400.0,
    },
    FactoryDef {
        id: "vector_processor",
        icon: "arrow.up.right",
        name: "Vector Processor",
        cost: 20_000_000.0,
        resource: ResourceKind::Bits,
        base_output: 7_800.0,
    },
    FactoryDef {
        id: "parallel_processing_array",
        icon: "square.grid.3x3",
        name: "Parallel Processing Array",
        cost: 330_000_000.0,
        resource: ResourceKind::Bits,
        base_output: 44_000.0,
    },
    FactoryDef {
        id: "neural_network_computer",
        icon: "brain",
        name: "Neural Network Computer",
        cost: 5_100_000_000.0,
        resource: ResourceKind::Bits,
        base_output: 260_000.0,
    },
    FactoryDef {
        id: "supercomputer",
        icon: "bolt.horizontal",
        name: "Supercomputer",
        cost: 75_000_000_000.0,
        resource: ResourceKind::Bits,
        base_output: 1_600_000.0,
    },
    FactoryDef {
        id: "basic_quantum_computer",
        icon: "atom",
        name: "Basic Quantum Computer",
        cost: 10.0,
        resource: ResourceKind::Qubits,
        base_output: 0.5,
    },
    FactoryDef {
        id: "quantum_annealer",
        icon: "thermometer.snowflake",
        name: "Quantum Annealer",
        cost: 150.0,
        resource: ResourceKind::Qubits,
        base_output: 5.0,
    },
    FactoryDef {
        id: "trapped_ion_quantum_computer",
        icon: "circle.hexagongrid",
        name: "Trapped Ion Quantum Computer",
        cost: 2_000.0,
        resource: ResourceKind::Qubits,
        base_output: 50.0,
    },
    FactoryDef {
        id: "superconducting_quantum_processor",
        icon: "bolt.circle",
        name: "Superconducting Quantum Processor",
        cost: 30_000.0,
        resource: ResourceKind::Qubits,
        base_output: 400.0,
    },
    FactoryDef {
        id: "topological_quantum_system",
        icon: "point.3.connected.trianglepath.dotted",
        name: "Topological Quantum System",
        cost: 450_000.0,
        resource: ResourceKind::Qubits,
        base_output: 3_000.0,
    },
    FactoryDef {
        id: "quantum_error_correction_engine",
        icon: "checkmark.shield",
        name: "Quantum Error Correction Engine",
        cost: 7_000_000.0,
        resource: ResourceKind::Qubits,
        base_output: 25_000.0,
    },
    FactoryDef {
        id: "quantum_network_node",
        icon: "network",
        name: "Quantum Network Node",
        cost: 100_000_000.0,
        resource: ResourceKind::Qubits,
        base_output: 200_000.0,
    },
    FactoryDef {
        id: "quantum_simulator_array",
        icon: "square.3.layers.3d",
        name: "Quantum Simulator Array",
        cost: 1_500_000_000.0,
        resource: ResourceKind::Qubits,
        base_output: 1_600_000.0,
    },
    FactoryDef {
        id: "universal_fault_tolerant_quantum_computer",
        icon: "shield.lefthalf.filled",
        name: "Universal Fault-Tolerant Quantum Computer",
        cost: 25_000_000_000.0,
        resource: ResourceKind::Qubits,
        base_output: 13_000_000.0,
    },
    FactoryDef {
        id: "quantum_multiverse_engine",
        icon: "infinity",
        name: "Quantum Multiverse Engine",
        cost: 400_000_000_000.0,
        resource: ResourceKind::Qubits,
        base_output: 100_000_000.0,
    },
    FactoryDef {
        id: "distributed_quantum_cloud",
        icon: "cloud",
        name: "Distributed Quantum Cloud",
        cost: 6e12,
        resource: ResourceKind::Qubits,
        base_output: 8e8,
    },
    FactoryDef {
        id: "quantum_ai_nexus",
        icon: "sparkles",
        name: "Quantum AI Nexus",
        cost: 1e14,
        resource: ResourceKind::Qubits,
        base_output: 6.5e9,
    },
    FactoryDef {
        id: "quantum_classical_hybrid_megastructure",
        icon: "building.columns",
        name: "Quantum-Classical Hybrid Megastructure",
        cost: 1.5e15,
        resource: ResourceKind::Qubits,
        base_output: 5e10,
    },
    FactoryDef {
        id: "quantum_dimension_gateway",
        icon: "circle.dashed",
        name: "Quantum Dimension Gateway",
        cost: 2.5e16,
        resource: ResourceKind::Qubits,
        base_output: 4e11,
    },
    FactoryDef {
        id: "cosmic_quantum_computer",
        icon: "moon.stars",
        name: "Cosmic Quantum Computer",
        cost: 4e17,
        resource: ResourceKind::Qubits,
        base_output: 3.2e12,
    },
    FactoryDef {
        id: "planck_scale_quantum_processor",
        icon: "smallcircle.filled.circle",
        name: "Planck-Scale Quantum Processor",
        cost: 6e18,
        resource: ResourceKind::Qubits,
        base_output: 2.5e13,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_ids_are_unique() {
        for (index, def) in FACTORY_DEFS.iter().enumerate() {
            assert!(
                FACTORY_DEFS[index + 1..].iter().all(|other| other.id != def.id),
                "duplicate factory id {}",
                def.id
            );
        }
    }

    #[test]
    fn fresh_factories_start_at_initial_cost() {
        let factories = build_factories(1.0);
        assert_eq!(factories.len(), FACTORY_DEFS.len());
        assert!(factories.iter().all(|f| f.count == 0 && f.cost == f.initial_cost));
        assert_eq!(factories[0].overview, "Generates 0.1 Bits/s");
    }

    #[test]
    fn overview_mentions_prestige_multiplier() {
        let factory = Factory::from_def(&FACTORY_DEFS[1], 1.5);
        assert_eq!(factory.overview, "Generates 1.5 Bits/s (x1.50 prestige)");
    }

    #[test]
    fn quantum_factories_spend_and_produce_qubits() {
        let def = factory_def("quantum_annealer").expect("annealer present");
        let factory = Factory::from_def(def, 1.0);
        assert!(factory.is_quantum());
        assert_eq!(factory.output_resource(), ResourceKind::Qubits);
    }
}
