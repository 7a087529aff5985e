//! Request identifiers for the submit/response cycle

use std::fmt;

/// Identifier of one submitted request within a tool session
///
/// Identifiers are handed out in strictly increasing order, so a response can
/// be checked against the most recent request and dropped if it is older.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl RequestId {
    /// The first identifier a session hands out
    ///
    /// # Examples
    ///
    /// ```
    /// use definecraft_domain::RequestId;
    ///
    /// let first = RequestId::first();
    /// assert!(first.next() > Some(first));
    /// ```
    pub fn first() -> Self {
        Self(1)
    }

    /// Create a RequestId from a raw value
    pub fn from_value(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw value
    pub fn value(&self) -> u64 {
        self.0
    }

    /// The identifier that follows this one
    ///
    /// `None` at `u64::MAX`; ids are never reused.
    pub fn next(&self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::first()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "req-{}", self.0)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: next() is strictly greater whenever it exists
        #[test]
        fn test_next_is_monotonic(value: u64) {
            let id = RequestId::from_value(value);
            match id.next() {
                Some(next) => prop_assert!(next > id),
                None => prop_assert_eq!(value, u64::MAX),
            }
        }

        /// Property: ordering matches the raw value ordering
        #[test]
        fn test_ordering_property(a: u64, b: u64) {
            let id_a = RequestId::from_value(a);
            let id_b = RequestId::from_value(b);

            prop_assert_eq!(id_a < id_b, a < b);
            prop_assert_eq!(id_a == id_b, a == b);
        }
    }
}
