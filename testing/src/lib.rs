//! # Dashboard Testing
//!
//! Testing utilities and helpers for the dashboard state machine.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - A Given-When-Then harness for reducers
//! - Helpers that resolve effect descriptions into the actions they produce
//! - Assertion helpers for effects
//!
//! ## Example
//!
//! ```ignore
//! use dashboard_testing::{ReducerTest, assertions};
//!
//! ReducerTest::new(DashboardReducer::new())
//!     .with_env(test_environment())
//!     .given_state(AppState::default())
//!     .when_action(AppAction::HideDrawer)
//!     .then_state(|state| assert!(!state.drawer_open))
//!     .then_effects(assertions::assert_no_effects)
//!     .run();
//! ```

use chrono::{DateTime, Utc};
use dashboard_core::environment::Clock;

pub mod effects;
pub mod reducer_test;

/// Mock implementations for testing.
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use dashboard_testing::mocks::FixedClock;
    /// use dashboard_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(DateTime::<Utc>::UNIX_EPOCH + chrono::Duration::days(20_089))
    }
}

// Re-export commonly used items
pub use effects::{resolve_effects, resolve_effects_blocking};
pub use mocks::{FixedClock, test_clock};
pub use reducer_test::{ReducerTest, assertions};
