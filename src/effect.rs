//! Effects observing state after every changed batch.

use crate::Dispatch;

/// A callback run with the latest state after every batch that changed it.
///
/// Effects are where the application reacts to state: they may dispatch
/// follow-up actions, talk to external collaborators or keep private
/// bookkeeping between runs. They are returned once from
/// [`Component::effects`](crate::Component::effects) and then invoked in
/// declaration order by the runtime, after the batch has been applied and
/// before the view is rendered.
///
/// Actions dispatched from an effect are queued and applied in the next
/// batch, never in the one that triggered the effect.
///
/// # Example
///
/// ```rust
/// use pyramid_mvu::Effect;
///
/// #[derive(Clone, PartialEq)]
/// struct State { count: u32 }
///
/// enum Action { Reset }
///
/// // Dispatch a follow-up action once the count grows too large
/// let effect = Effect::new(|state: &State, dispatch: &pyramid_mvu::Dispatch<Action>| {
///     if state.count > 10 {
///         dispatch.dispatch(Action::Reset);
///     }
/// });
///
/// // Combine multiple effects
/// let effect = Effect::batch(vec![effect, Effect::none()]);
/// ```
#[allow(clippy::type_complexity)]
pub struct Effect<Action, State>(Box<dyn FnMut(&State, &Dispatch<Action>) + Send + 'static>);

impl<Action: 'static, State: 'static> Effect<Action, State> {
    /// Create an effect from a callback.
    pub fn new<F>(run: F) -> Self
    where
        F: FnMut(&State, &Dispatch<Action>) + Send + 'static,
    {
        Self(Box::new(run))
    }

    /// Run the effect against a state snapshot.
    pub fn run(&mut self, state: &State, dispatch: &Dispatch<Action>) {
        (self.0)(state, dispatch);
    }

    /// Create an empty effect.
    ///
    /// Prefer this when semantically indicating "no side effects", e.g. for a
    /// misconfigured router.
    pub fn none() -> Self {
        Self(Box::new(|_: &State, _: &Dispatch<Action>| {}))
    }

    /// Combine multiple effects into a single effect.
    ///
    /// The effects run in the order given.
    pub fn batch(effects: Vec<Effect<Action, State>>) -> Self {
        let mut effects = effects;
        Self(Box::new(move |state: &State, dispatch: &Dispatch<Action>| {
            for effect in &mut effects {
                effect.run(state, dispatch);
            }
        }))
    }
}
