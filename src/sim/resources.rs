use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Bits,
    Qubits,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 2] = [ResourceKind::Bits, ResourceKind::Qubits];

    pub fn name(self) -> &'static str {
        match self {
            ResourceKind::Bits => "Bits",
            ResourceKind::Qubits => "Qubits",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub kind: ResourceKind,
    pub amount: f64,
    pub per_click: f64,
    pub per_second: f64,
}

impl Resource {
    pub fn new(kind: ResourceKind, per_click: f64) -> Self {
        Self {
            kind,
            amount: 0.0,
            per_click,
            per_second: 0.0,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Strict pre-check: a purchase needs the whole price on hand. Non-finite
    /// or negative prices are never affordable.
    pub fn can_afford(&self, cost: f64) -> bool {
        cost.is_finite() && cost >= 0.0 && self.amount >= cost
    }

    /// Remove `cost` from the balance. Only call after `can_afford(cost)`, which
    /// keeps the result non-negative without any clamping.
    pub fn spend(&mut self, cost: f64) {
        debug_assert!(self.can_afford(cost), "spending {cost} from {}", self.amount);
        self.amount -= cost;
    }

    fn sanitize(&mut self, kind: ResourceKind) {
        self.kind = kind;
        for value in [&mut self.amount, &mut self.per_click, &mut self.per_second] {
            if !value.is_finite() || *value < 0.0 {
                *value = 0.0;
            }
        }
    }
}

/// The player's balances, one slot per [`ResourceKind`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceLedger {
    bits: Resource,
    #[serde(default = "empty_qubits")]
    qubits: Resource,
}

fn empty_qubits() -> Resource {
    Resource::new(ResourceKind::Qubits, 0.0)
}

impl ResourceLedger {
    pub fn new(bits_per_click: f64) -> Self {
        Self {
            bits: Resource::new(ResourceKind::Bits, bits_per_click),
            qubits: empty_qubits(),
        }
    }

    pub fn get(&self, kind: ResourceKind) -> &Resource {
        match kind {
            ResourceKind::Bits => &self.bits,
            ResourceKind::Qubits => &self.qubits,
        }
    }

    pub fn get_mut(&mut self, kind: ResourceKind) -> &mut Resource {
        match kind {
            ResourceKind::Bits => &mut self.bits,
            ResourceKind::Qubits => &mut self.qubits,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Resource> {
        [&self.bits, &self.qubits].into_iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Resource> {
        [&mut self.bits, &mut self.qubits].into_iter()
    }

    pub fn amount(&self, kind: ResourceKind) -> f64 {
        self.get(kind).amount
    }

    /// Repair a ledger read from disk: slot kinds are fixed and corrupt or
    /// negative values become zero.
    pub fn normalize(&mut self) {
        self.bits.sanitize(ResourceKind::Bits);
        self.qubits.sanitize(ResourceKind::Qubits);
    }
}
