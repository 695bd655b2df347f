use std::collections::BTreeSet;

use super::types::OperatorName;

/// Tracks which roster members have been consumed by crane assignments.
/// Consumption is one-way for the life of the process: stopping a crane does
/// not return its operator to the pool.
#[derive(Debug, Clone, Default)]
pub struct OperatorPool {
    used: BTreeSet<OperatorName>,
}

impl OperatorPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Roster members not yet consumed, in roster order.
    pub fn available<'a>(&self, roster: &'a [OperatorName]) -> Vec<&'a OperatorName> {
        roster.iter().filter(|name| !self.used.contains(*name)).collect()
    }

    pub fn mark_used(&mut self, name: &str) {
        self.used.insert(name.to_string());
    }

    pub fn is_used(&self, name: &str) -> bool {
        self.used.contains(name)
    }
}
