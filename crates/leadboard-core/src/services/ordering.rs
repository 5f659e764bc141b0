//! Sibling order assignment

use leadboard_shared::constants::FIRST_ORDER;
use tracing::warn;

use crate::error::DomainError;

/// Position after the highest active sibling, or the first position.
pub fn next_order(current_max: Option<i32>) -> i32 {
    match current_max {
        Some(max) => max.saturating_add(1).max(FIRST_ORDER),
        None => FIRST_ORDER,
    }
}

/// Keeps an explicit order; otherwise derives one from the sibling lookup.
/// A failed lookup counts as "no siblings".
pub fn resolve_order(explicit: Option<i32>, sibling_max: Result<Option<i32>, DomainError>) -> i32 {
    if let Some(order) = explicit {
        return order;
    }
    match sibling_max {
        Ok(max) => next_order(max),
        Err(e) => {
            warn!("Sibling order lookup failed, starting at {}: {}", FIRST_ORDER, e);
            FIRST_ORDER
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_order() {
        assert_eq!(next_order(None), 1);
        assert_eq!(next_order(Some(0)), 1);
        assert_eq!(next_order(Some(1)), 2);
        assert_eq!(next_order(Some(41)), 42);
        assert_eq!(next_order(Some(i32::MAX)), i32::MAX);
    }

    #[test]
    fn test_resolve_order() {
        assert_eq!(resolve_order(Some(7), Ok(Some(3))), 7);
        assert_eq!(resolve_order(Some(0), Ok(None)), 0);
        assert_eq!(resolve_order(None, Ok(Some(3))), 4);
        assert_eq!(resolve_order(None, Err(DomainError::DatabaseError("down".into()))), 1);
    }
}
