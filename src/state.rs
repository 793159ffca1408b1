//! Router state embedded in the application state.

use std::fmt;

use crate::{Dispatch, Error, RouteComponent, RouteRecord, RouteStatus, RouterAction};

/// The router's share of the application state.
///
/// Embed it as a field of your state and expose it through
/// `AsRef<RouterState<C>>` so the [router effect](crate::Router::effect) can
/// observe it. Like the rest of the state it is a value: router actions
/// return a new `RouterState` instead of mutating this one.
///
/// While a transition is in flight both slots are filled; otherwise only the
/// current route is. The transition lock is derived from the incoming slot,
/// so it can never disagree with it.
pub struct RouterState<C: ?Sized + RouteComponent> {
    initialized: bool,
    current: Option<RouteRecord<C>>,
    incoming: Option<RouteRecord<C>>,
    dispatch: Option<Dispatch<RouterAction<C::Action>>>,
}

impl<C: ?Sized + RouteComponent> RouterState<C> {
    /// An uninitialized router: no route until the router effect's first run.
    pub fn new() -> Self {
        Self {
            initialized: false,
            current: None,
            incoming: None,
            dispatch: None,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Whether a navigation is in flight.
    pub fn is_transition_locked(&self) -> bool {
        self.incoming.is_some()
    }

    /// The route on screen.
    pub fn current(&self) -> Option<&RouteRecord<C>> {
        self.current.as_ref()
    }

    /// The route being navigated to, present only mid-transition.
    pub fn incoming(&self) -> Option<&RouteRecord<C>> {
        self.incoming.as_ref()
    }

    /// Settle the transition in one step: the current route becomes
    /// `Inactive` and the incoming route `Active`.
    ///
    /// This is what most handlers of
    /// [`RouterAction::HandleNavigation`] do once they are ready for the
    /// router to finish navigating.
    pub fn complete_transition(&self) -> Result<Self, Error> {
        self.with_current_status(RouteStatus::Inactive)?
            .with_incoming_status(RouteStatus::Active)
    }

    /// Move the current route to `status`.
    pub fn with_current_status(&self, status: RouteStatus) -> Result<Self, Error> {
        let mut next = self.clone();
        next.current
            .as_mut()
            .ok_or(Error::NoTransition)?
            .set_status(status)?;
        Ok(next)
    }

    /// Move the incoming route to `status`.
    pub fn with_incoming_status(&self, status: RouteStatus) -> Result<Self, Error> {
        let mut next = self.clone();
        next.incoming
            .as_mut()
            .ok_or(Error::NoTransition)?
            .set_status(status)?;
        Ok(next)
    }

    pub(crate) fn dispatch(&self) -> Option<&Dispatch<RouterAction<C::Action>>> {
        self.dispatch.as_ref()
    }

    pub(crate) fn initialize(
        current: RouteRecord<C>,
        dispatch: Dispatch<RouterAction<C::Action>>,
    ) -> Self {
        Self {
            initialized: true,
            current: Some(current),
            incoming: None,
            dispatch: Some(dispatch),
        }
    }

    pub(crate) fn current_mut(&mut self) -> Option<&mut RouteRecord<C>> {
        self.current.as_mut()
    }

    pub(crate) fn incoming_mut(&mut self) -> Option<&mut RouteRecord<C>> {
        self.incoming.as_mut()
    }

    pub(crate) fn begin_transition(&mut self, incoming: RouteRecord<C>) {
        self.incoming = Some(incoming);
    }

    /// Promote the incoming route to current, unlocking the router.
    pub(crate) fn promote(&mut self, incoming: RouteRecord<C>) {
        self.current = Some(incoming);
        self.incoming = None;
    }

    pub(crate) fn take_incoming(&mut self) -> Option<RouteRecord<C>> {
        self.incoming.take()
    }
}

impl<C: ?Sized + RouteComponent> Default for RouterState<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ?Sized + RouteComponent> Clone for RouterState<C> {
    fn clone(&self) -> Self {
        Self {
            initialized: self.initialized,
            current: self.current.clone(),
            incoming: self.incoming.clone(),
            dispatch: self.dispatch.clone(),
        }
    }
}

/// The stored dispatch is plumbing, not state, and takes no part in equality.
impl<C: ?Sized + RouteComponent> PartialEq for RouterState<C> {
    fn eq(&self, other: &Self) -> bool {
        self.initialized == other.initialized
            && self.current == other.current
            && self.incoming == other.incoming
    }
}

impl<C: ?Sized + RouteComponent> fmt::Debug for RouterState<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterState")
            .field("initialized", &self.initialized)
            .field("transition_locked", &self.is_transition_locked())
            .field("current", &self.current)
            .field("incoming", &self.incoming)
            .finish()
    }
}
