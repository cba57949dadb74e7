//! Self-checks for computed embeddings, drawings and colorings.
//!
//! Every result type can re-verify what its producing algorithm guarantees
//! (rotation system and Euler's formula, grid bounds, proper coloring). The
//! algorithms call [`debug_invariants!`](crate::debug_invariants) at the end of
//! each successful run, so the checks cost nothing in release builds unless
//! the `check-invariants` or `strict-invariants` feature is enabled.

use crate::planarity_error::PlanarityError;

/// Validation of the guarantees a computed result must satisfy.
pub trait DebugInvariants {
    /// Validate invariants and return the first violation encountered.
    fn validate_invariants(&self) -> Result<(), PlanarityError>;

    /// Panic on a violation in debug builds or when invariant checking is
    /// enabled; a no-op otherwise.
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "result invalid");
    }

    /// Whether every invariant holds.
    fn is_valid(&self) -> bool {
        self.validate_invariants().is_ok()
    }
}

/// Run a fallible check and panic with `[invariants] <context>: <error>` on
/// failure when invariant checking is enabled.
#[macro_export]
macro_rules! debug_invariants {
    ($expr:expr, $($ctx:tt)*) => {
        #[cfg(any(debug_assertions, feature = "strict-invariants", feature = "check-invariants"))]
        if let Err(e) = $expr {
            panic!(concat!("[invariants] ", $($ctx)*, ": {}"), e);
        }
    };
}
