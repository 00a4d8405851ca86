//! Success-or-fallback results of the provider aggregators

use crate::external::ProviderError;

/// Value obtained from a provider, or the fallback computed in its place
#[derive(Debug, Clone, PartialEq)]
pub enum Sourced<T> {
    Live(T),
    Fallback { value: T, reason: ProviderError },
}

impl<T> Sourced<T> {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Sourced::Fallback { .. })
    }

    pub fn value(&self) -> &T {
        match self {
            Sourced::Live(value) | Sourced::Fallback { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Sourced::Live(value) | Sourced::Fallback { value, .. } => value,
        }
    }

    /// Why the fallback was used, if it was
    pub fn reason(&self) -> Option<&ProviderError> {
        match self {
            Sourced::Live(_) => None,
            Sourced::Fallback { reason, .. } => Some(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_live_value() {
        let sourced = Sourced::Live(42);
        assert!(!sourced.is_fallback());
        assert_eq!(sourced.reason(), None);
        assert_eq!(sourced.into_value(), 42);
    }

    #[test]
    fn test_fallback_keeps_reason() {
        let sourced = Sourced::Fallback {
            value: 1500,
            reason: ProviderError::Timeout(12),
        };
        assert!(sourced.is_fallback());
        assert_eq!(sourced.reason(), Some(&ProviderError::Timeout(12)));
        assert_eq!(*sourced.value(), 1500);
    }
}
