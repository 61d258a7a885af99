//! Resolve effect descriptions into the actions they produce
//!
//! Reducer tests usually care about what an effect *would* dispatch, not about
//! the runtime plumbing. These helpers drive effects to completion without a
//! `Store` and collect the resulting actions in declaration order.

use dashboard_core::effect::Effect;
use std::collections::VecDeque;

/// Drive effects to completion and collect the actions they produce
///
/// Futures are awaited one after another, depth-first in the order they were
/// declared, so the result is deterministic even for `Effect::Parallel`.
pub async fn resolve_effects<A, I>(effects: I) -> Vec<A>
where
    I: IntoIterator<Item = Effect<A>>,
{
    let mut queue: VecDeque<Effect<A>> = effects.into_iter().collect();
    let mut actions = Vec::new();

    while let Some(effect) = queue.pop_front() {
        match effect {
            Effect::None => {},
            Effect::Parallel(children) => {
                for child in children.into_iter().rev() {
                    queue.push_front(child);
                }
            },
            Effect::Future(fut) => {
                if let Some(action) = fut.await {
                    actions.push(action);
                }
            },
        }
    }

    actions
}

/// Blocking variant of [`resolve_effects`] for synchronous tests
pub fn resolve_effects_blocking<A, I>(effects: I) -> Vec<A>
where
    I: IntoIterator<Item = Effect<A>>,
{
    tokio_test::block_on(resolve_effects(effects))
}
