//! Given-When-Then harness for a single reducer transition.

#![allow(clippy::module_name_repetitions)]

use crate::effects::resolve_effects_blocking;
use dashboard_core::{effect::Effect, reducer::Reducer};

/// One `then_*` check, kept in the order it was registered
enum Expectation<S, A> {
    State(Box<dyn FnOnce(&S)>),
    Effects(Box<dyn FnOnce(&[Effect<A>])>),
    ResolvedActions(Box<dyn FnOnce(&[A])>),
}

/// Drives one action through a reducer and checks the outcome
///
/// ```ignore
/// use dashboard_testing::ReducerTest;
///
/// ReducerTest::new(DashboardReducer::new())
///     .with_env(test_environment())
///     .given_state(AppState::default())
///     .when_action(AppAction::Login { email, password })
///     .then_state(|state| assert!(state.session.is_logged_in))
///     .then_resolved_actions(|actions| assert_eq!(actions.len(), 1))
///     .run();
/// ```
pub struct ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    reducer: R,
    environment: Option<E>,
    state: Option<S>,
    action: Option<A>,
    expectations: Vec<Expectation<S, A>>,
}

impl<R, S, A, E> ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    /// Start a test around `reducer`
    #[must_use]
    pub const fn new(reducer: R) -> Self {
        Self {
            reducer,
            environment: None,
            state: None,
            action: None,
            expectations: Vec::new(),
        }
    }

    /// Environment handed to the reducer
    #[must_use]
    pub fn with_env(mut self, env: E) -> Self {
        self.environment = Some(env);
        self
    }

    /// State before the action
    #[must_use]
    pub fn given_state(mut self, state: S) -> Self {
        self.state = Some(state);
        self
    }

    /// The action under test
    #[must_use]
    pub fn when_action(mut self, action: A) -> Self {
        self.action = Some(action);
        self
    }

    /// Check the state after the transition
    #[must_use]
    pub fn then_state<F>(mut self, check: F) -> Self
    where
        F: FnOnce(&S) + 'static,
    {
        self.expectations.push(Expectation::State(Box::new(check)));
        self
    }

    /// Check the effect descriptions the transition returned
    #[must_use]
    pub fn then_effects<F>(mut self, check: F) -> Self
    where
        F: FnOnce(&[Effect<A>]) + 'static,
    {
        self.expectations.push(Expectation::Effects(Box::new(check)));
        self
    }

    /// Check the actions the effects produce once driven to completion
    ///
    /// Effects are resolved once, on a throwaway runtime, after every state
    /// and effect check has run.
    #[must_use]
    pub fn then_resolved_actions<F>(mut self, check: F) -> Self
    where
        F: FnOnce(&[A]) + 'static,
    {
        self.expectations.push(Expectation::ResolvedActions(Box::new(check)));
        self
    }

    /// Reduce the action and run every check
    ///
    /// # Panics
    ///
    /// Panics if the state, action or environment was never given, or if a
    /// check fails.
    #[allow(clippy::panic)]
    pub fn run(self) {
        let Some(mut state) = self.state else {
            panic!("ReducerTest needs given_state()");
        };
        let Some(action) = self.action else {
            panic!("ReducerTest needs when_action()");
        };
        let Some(env) = self.environment else {
            panic!("ReducerTest needs with_env()");
        };

        let effects = self.reducer.reduce(&mut state, action, &env);

        let mut deferred = Vec::new();
        for expectation in self.expectations {
            match expectation {
                Expectation::State(check) => check(&state),
                Expectation::Effects(check) => check(&effects),
                Expectation::ResolvedActions(check) => deferred.push(check),
            }
        }

        if !deferred.is_empty() {
            let actions = resolve_effects_blocking(effects);
            for check in deferred {
                check(&actions);
            }
        }
    }
}

/// Effect checks usable with [`ReducerTest::then_effects`]
pub mod assertions {
    use dashboard_core::effect::Effect;

    /// Nothing would happen if the effects were executed
    ///
    /// # Panics
    ///
    /// Panics if any effect does work.
    #[allow(clippy::panic)]
    pub fn assert_no_effects<A: std::fmt::Debug>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().all(Effect::is_none),
            "expected no effects, got {effects:?}"
        );
    }

    /// Exactly `expected` top-level effects
    ///
    /// # Panics
    ///
    /// Panics on a different count.
    #[allow(clippy::panic)]
    pub fn assert_effects_count<A>(effects: &[Effect<A>], expected: usize) {
        assert_eq!(effects.len(), expected, "unexpected number of effects");
    }

    /// Some effect, possibly nested in `Parallel`, is a future
    ///
    /// # Panics
    ///
    /// Panics if there is none.
    #[allow(clippy::panic)]
    pub fn assert_has_future_effect<A>(effects: &[Effect<A>]) {
        fn is_future<A>(effect: &Effect<A>) -> bool {
            match effect {
                Effect::Future(_) => true,
                Effect::Parallel(children) => children.iter().any(is_future),
                Effect::None => false,
            }
        }

        assert!(effects.iter().any(is_future), "expected a future effect");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_core::{SmallVec, smallvec};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Debug, Default)]
    struct Inbox {
        drawer_open: bool,
        unread: Vec<u32>,
    }

    #[derive(Clone, Debug, PartialEq)]
    enum InboxAction {
        ShowDrawer,
        Read(u32),
        Refresh,
        Loaded(Vec<u32>),
    }

    struct InboxReducer;

    struct Feed {
        pages: Vec<Vec<u32>>,
    }

    impl Reducer for InboxReducer {
        type State = Inbox;
        type Action = InboxAction;
        type Environment = Feed;

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                InboxAction::ShowDrawer => {
                    state.drawer_open = true;
                    smallvec![Effect::None]
                },
                InboxAction::Read(id) => {
                    state.unread.retain(|unread| *unread != id);
                    smallvec![Effect::None]
                },
                InboxAction::Refresh => {
                    let fetches = env
                        .pages
                        .iter()
                        .cloned()
                        .map(|page| Effect::Future(Box::pin(async move { Some(InboxAction::Loaded(page)) })))
                        .chain(std::iter::once(Effect::Future(Box::pin(async { None }))))
                        .collect();
                    smallvec![Effect::Parallel(fetches)]
                },
                InboxAction::Loaded(ids) => {
                    state.unread = ids;
                    smallvec![Effect::None]
                },
            }
        }
    }

    fn feed() -> Feed {
        Feed {
            pages: vec![vec![1, 2], vec![3]],
        }
    }

    #[test]
    fn show_drawer_only_flips_the_flag() {
        ReducerTest::new(InboxReducer)
            .with_env(feed())
            .given_state(Inbox {
                drawer_open: false,
                unread: vec![4],
            })
            .when_action(InboxAction::ShowDrawer)
            .then_state(|inbox| {
                assert!(inbox.drawer_open);
                assert_eq!(inbox.unread, [4]);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn reading_an_entry_removes_it() {
        ReducerTest::new(InboxReducer)
            .with_env(feed())
            .given_state(Inbox {
                drawer_open: true,
                unread: vec![1, 2, 3],
            })
            .when_action(InboxAction::Read(2))
            .then_state(|inbox| assert_eq!(inbox.unread, [1, 3]))
            .run();
    }

    #[test]
    fn refresh_resolves_to_loads_in_declaration_order() {
        ReducerTest::new(InboxReducer)
            .with_env(feed())
            .given_state(Inbox::default())
            .when_action(InboxAction::Refresh)
            .then_effects(assertions::assert_has_future_effect)
            .then_effects(|effects| assertions::assert_effects_count(effects, 1))
            .then_resolved_actions(|actions| {
                assert_eq!(
                    actions,
                    [InboxAction::Loaded(vec![1, 2]), InboxAction::Loaded(vec![3])]
                );
            })
            .run();
    }

    #[test]
    fn resolved_actions_are_checked_after_state_and_effects() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let (first, second, third) = (Rc::clone(&order), Rc::clone(&order), Rc::clone(&order));

        ReducerTest::new(InboxReducer)
            .with_env(feed())
            .given_state(Inbox::default())
            .when_action(InboxAction::Refresh)
            .then_resolved_actions(move |_| first.borrow_mut().push("actions"))
            .then_state(move |_| second.borrow_mut().push("state"))
            .then_effects(move |_| third.borrow_mut().push("effects"))
            .run();

        assert_eq!(*order.borrow(), ["state", "effects", "actions"]);
    }

    #[test]
    #[should_panic(expected = "ReducerTest needs when_action()")]
    fn missing_action_panics() {
        ReducerTest::new(InboxReducer)
            .with_env(feed())
            .given_state(Inbox::default())
            .run();
    }
}
