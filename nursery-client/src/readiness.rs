use std::collections::HashSet;

/// Fetches that must settle before the page leaves its loading placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gate {
    Settings,
    Categories,
    Sponsors,
}

/// A set of named gates that each settle once, successfully or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Readiness {
    pending: HashSet<Gate>,
}

impl Readiness {
    pub fn new(gates: impl IntoIterator<Item = Gate>) -> Self {
        Self { pending: gates.into_iter().collect() }
    }

    pub fn home_page() -> Self {
        Self::new([Gate::Settings, Gate::Categories, Gate::Sponsors])
    }

    /// Returns `false` if the gate had already settled or was never tracked.
    pub fn settle(&mut self, gate: Gate) -> bool {
        self.pending.remove(&gate)
    }

    pub fn is_pending(&self, gate: Gate) -> bool {
        self.pending.contains(&gate)
    }

    pub fn is_ready(&self) -> bool {
        self.pending.is_empty()
    }
}
