//! # Dashboard Core
//!
//! Core traits and types for the dashboard state machine.
//!
//! This crate provides the fundamental abstractions the dashboard is built on:
//! a single reducer interprets every action, and side effects are returned as
//! descriptions for the runtime to execute.
//!
//! ## Core Concepts
//!
//! - **State**: The aggregate application state owned by the store
//! - **Action**: All possible inputs to a reducer (user events, fetch results)
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Side effect descriptions (not execution)
//! - **Environment**: Injected dependencies via traits
//!
//! ## Example
//!
//! ```ignore
//! use dashboard_core::*;
//!
//! #[derive(Clone, Debug, Default)]
//! struct DrawerState {
//!     open: bool,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum DrawerAction {
//!     Show,
//!     Hide,
//! }
//!
//! impl Reducer for DrawerReducer {
//!     type State = DrawerState;
//!     type Action = DrawerAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut DrawerState,
//!         action: DrawerAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect<DrawerAction>; 4]> {
//!         state.open = matches!(action, DrawerAction::Show);
//!         smallvec![Effect::None]
//!     }
//! }
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use smallvec::{SmallVec, smallvec};

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`
///
/// They contain all state transition logic and are deterministic and testable.
pub mod reducer {
    use super::SmallVec;
    use super::effect::Effect;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Updates state in place
        /// 2. Returns effect descriptions to be executed
        ///
        /// It must not perform I/O or read anything outside its arguments.
        /// Anything asynchronous is described by the returned effects.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe side effects to be performed by the runtime.
/// They are values (not execution) and are composable.
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;

    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed immediately. They are descriptions of what should happen,
    /// returned from reducers and executed by the Store runtime.
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Run effects concurrently
        Parallel(Vec<Effect<Action>>),

        /// Arbitrary async computation
        ///
        /// Returns `Option<Action>` - if Some, the action is fed back into the reducer
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Parallel(effects) => {
                    f.debug_tuple("Effect::Parallel").field(effects).finish()
                },
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Returns true if executing this effect does nothing
        #[must_use]
        pub fn is_none(&self) -> bool {
            match self {
                Effect::None => true,
                Effect::Parallel(effects) => effects.iter().all(Effect::is_none),
                Effect::Future(_) => false,
            }
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected
/// via the Environment parameter.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::effect::Effect;

    #[test]
    fn none_and_empty_parallel_are_no_ops() {
        assert!(Effect::<()>::None.is_none());
        assert!(Effect::<()>::Parallel(vec![Effect::None, Effect::None]).is_none());
    }

    #[test]
    fn future_is_not_a_no_op() {
        let effect: Effect<u8> = Effect::Parallel(vec![
            Effect::None,
            Effect::Future(Box::pin(async { Some(1) })),
        ]);
        assert!(!effect.is_none());
    }

    #[test]
    fn debug_hides_future_body() {
        let effect: Effect<u8> = Effect::Future(Box::pin(async { None }));
        assert_eq!(format!("{effect:?}"), "Effect::Future(<future>)");
    }
}
