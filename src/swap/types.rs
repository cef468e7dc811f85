use std::collections::BTreeSet;

/// A named reason a swap request cannot proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Violation {
    InvalidAmount,
    InsufficientBalance,
    MissingTokenSelection,
    IdenticalTokens,
}

/// Every violation found for one request. Empty means executable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationOutcome {
    violations: BTreeSet<Violation>,
    /// Source symbol at validation time, used in the balance message.
    source_symbol: Option<String>,
}

impl ValidationOutcome {
    pub(crate) fn new(source_symbol: Option<String>) -> Self {
        Self {
            violations: BTreeSet::new(),
            source_symbol,
        }
    }

    pub(crate) fn insert(&mut self, violation: Violation) {
        self.violations.insert(violation);
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn contains(&self, violation: Violation) -> bool {
        self.violations.contains(&violation)
    }

    pub fn iter(&self) -> impl Iterator<Item = Violation> + '_ {
        self.violations.iter().copied()
    }

    /// User-facing text for every violation, in a fixed order.
    pub fn messages(&self) -> Vec<String> {
        self.iter()
            .map(|v| match v {
                Violation::InvalidAmount => "Please enter a valid amount".to_string(),
                Violation::InsufficientBalance => format!(
                    "Insufficient {} balance",
                    self.source_symbol.as_deref().unwrap_or_default()
                ),
                Violation::MissingTokenSelection => "Please select both tokens".to_string(),
                Violation::IdenticalTokens => "Cannot swap the same token".to_string(),
            })
            .collect()
    }
}
