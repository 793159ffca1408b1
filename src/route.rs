//! Route records and the factory building them from a path.

use std::fmt;
use std::sync::Arc;

use crate::matcher::RouteTable;
use crate::{Dispatch, Error, Location, RouteComponent, RouteContext, RouteParams, RouterAction};

/// Lifecycle of a route record.
///
/// A record is created either `Active` (the startup route) or `Entering`
/// (the target of a navigation) and then only moves forward along
/// `Entering → Active → Exiting → Inactive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteStatus {
    Entering,
    Active,
    Exiting,
    Inactive,
}

impl RouteStatus {
    /// Whether a record in this status may move to `next`.
    pub fn can_become(self, next: RouteStatus) -> bool {
        matches!(
            (self, next),
            (RouteStatus::Entering, RouteStatus::Active)
                | (RouteStatus::Active, RouteStatus::Exiting)
                | (RouteStatus::Exiting, RouteStatus::Inactive)
        )
    }
}

/// The router slot a record occupies, and therefore where its delegated
/// actions are routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteSlot {
    Current,
    Incoming,
}

impl RouteSlot {
    pub(crate) fn tag<A>(self, action: A) -> RouterAction<A> {
        match self {
            RouteSlot::Current => RouterAction::Current(action),
            RouteSlot::Incoming => RouterAction::Incoming(action),
        }
    }
}

/// One navigable screen instance.
///
/// Records are values: every change produces a new record inside a new
/// [`RouterState`](crate::RouterState). Two records are equal when they match
/// field by field, with the component compared by identity and the delegated
/// dispatch compared through its slot.
pub struct RouteRecord<C: ?Sized + RouteComponent> {
    status: RouteStatus,
    path: String,
    params: RouteParams,
    location: Location,
    pattern: Arc<str>,
    component: Arc<C>,
    state: C::State,
    dispatch: Dispatch<C::Action>,
    slot: RouteSlot,
    from_history: bool,
}

impl<C: ?Sized + RouteComponent> RouteRecord<C> {
    /// Match `path` against `routes` and build a record for it.
    ///
    /// Returns `None` when no route matches; whether that is fatal is up to
    /// the caller. `router` is the dispatch the delegated dispatch forwards
    /// to once it has tagged an action with `slot`.
    pub(crate) fn create(
        routes: &RouteTable<C>,
        path: &str,
        status: RouteStatus,
        slot: RouteSlot,
        router: &Dispatch<RouterAction<C::Action>>,
        from_history: bool,
    ) -> Option<Self> {
        let matched = routes.match_path(path)?;
        let context = RouteContext {
            path: path.to_string(),
            params: matched.params,
            location: matched.location,
        };
        let state = matched.component.init(&context);

        Some(Self {
            status,
            path: context.path,
            params: context.params,
            location: context.location,
            pattern: Arc::from(matched.pattern),
            component: matched.component.clone(),
            state,
            dispatch: router.delegate(move |action: C::Action| slot.tag(action)),
            slot,
            from_history,
        })
    }

    pub fn status(&self) -> RouteStatus {
        self.status
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn params(&self) -> &RouteParams {
        &self.params
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    /// The pattern of the route definition this record was created from.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn component(&self) -> &Arc<C> {
        &self.component
    }

    /// The component-local state.
    pub fn state(&self) -> &C::State {
        &self.state
    }

    /// The delegated dispatch handed to the component.
    pub fn dispatch(&self) -> &Dispatch<C::Action> {
        &self.dispatch
    }

    pub fn slot(&self) -> RouteSlot {
        self.slot
    }

    /// Whether the record was created for a back/forward navigation.
    pub fn is_from_history(&self) -> bool {
        self.from_history
    }

    /// Render the component with its local state and delegated dispatch.
    pub fn render(&self) -> C::View {
        self.component.render(&self.state, &self.dispatch)
    }

    /// Move the record to `next`, rejecting moves outside the lifecycle.
    pub(crate) fn set_status(&mut self, next: RouteStatus) -> Result<(), Error> {
        if !self.status.can_become(next) {
            return Err(Error::InvalidStatusTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }

    /// Apply a delegated action to the local state.
    ///
    /// Returns `false` when the component does not handle the action.
    pub(crate) fn apply(&mut self, action: C::Action) -> bool {
        match self.component.update(action, &self.state) {
            Some(state) => {
                self.state = state;
                true
            }
            None => false,
        }
    }

    /// Point the delegated dispatch at another slot.
    pub(crate) fn rebind(&mut self, slot: RouteSlot, router: &Dispatch<RouterAction<C::Action>>) {
        self.slot = slot;
        self.dispatch = router.delegate(move |action: C::Action| slot.tag(action));
    }
}

impl<C: ?Sized + RouteComponent> Clone for RouteRecord<C> {
    fn clone(&self) -> Self {
        Self {
            status: self.status,
            path: self.path.clone(),
            params: self.params.clone(),
            location: self.location.clone(),
            pattern: self.pattern.clone(),
            component: self.component.clone(),
            state: self.state.clone(),
            dispatch: self.dispatch.clone(),
            slot: self.slot,
            from_history: self.from_history,
        }
    }
}

impl<C: ?Sized + RouteComponent> PartialEq for RouteRecord<C> {
    fn eq(&self, other: &Self) -> bool {
        self.status == other.status
            && self.slot == other.slot
            && self.from_history == other.from_history
            && self.pattern == other.pattern
            && self.path == other.path
            && self.params == other.params
            && self.location == other.location
            && Arc::as_ptr(&self.component).cast::<()>() == Arc::as_ptr(&other.component).cast::<()>()
            && self.state == other.state
    }
}

impl<C: ?Sized + RouteComponent> fmt::Debug for RouteRecord<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteRecord")
            .field("status", &self.status)
            .field("pattern", &self.pattern)
            .field("path", &self.path)
            .field("params", &self.params)
            .field("slot", &self.slot)
            .field("from_history", &self.from_history)
            .finish_non_exhaustive()
    }
}
