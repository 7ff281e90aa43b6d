use serde::{Deserialize, Serialize};

/// Outcome of a rate-limit check. A rejected request must leave the counter
/// untouched; `remaining` reports how many requests are left in the window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum QuotaDecision {
    Allowed { remaining: i32 },
    Exceeded,
}

impl QuotaDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, QuotaDecision::Allowed { .. })
    }

    pub fn is_exceeded(&self) -> bool {
        matches!(self, QuotaDecision::Exceeded)
    }

    pub fn remaining(&self) -> Option<i32> {
        match self {
            QuotaDecision::Allowed { remaining } => Some(*remaining),
            QuotaDecision::Exceeded => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_predicates() {
        let allowed = QuotaDecision::Allowed { remaining: 4 };
        let exceeded = QuotaDecision::Exceeded;

        assert!(allowed.is_allowed());
        assert!(!allowed.is_exceeded());
        assert_eq!(allowed.remaining(), Some(4));

        assert!(exceeded.is_exceeded());
        assert_eq!(exceeded.remaining(), None);
    }
}
