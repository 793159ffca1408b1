//! Declarative router: route table, navigation actions and router effect.
//!
//! A navigation moves through four steps, each one a separate batch:
//!
//! 1. [`RouterAction::StartNavigation`] marks the current route `Exiting`
//!    and creates the incoming route as `Entering`, locking the router.
//! 2. The router effect sees `(Exiting, Entering)` and dispatches
//!    [`RouterAction::HandleNavigation`], which the application handles
//!    itself, e.g. after an exit animation.
//! 3. Once the application has moved the routes to `(Inactive, Active)`, the
//!    router effect dispatches [`RouterAction::FinishNavigation`].
//! 4. FinishNavigation pushes a history entry (unless the navigation came from
//!    history), promotes the incoming route to current and unlocks the router.

use std::sync::Arc;

use crate::history::{HistoryBridge, HistoryEntry};
use crate::matcher::{Route, RouteTable};
use crate::{
    Dispatch, Effect, Error, History, RouteComponent, RouteRecord, RouteSlot, RouteStatus,
    RouterState,
};

/// Actions understood by the router.
///
/// Wrap them in your application action type and implement
/// `From<RouterAction<_>>` for it, so the router effect can dispatch them.
/// `A` is the local action type of the routed components.
#[derive(Debug, Clone)]
pub enum RouterAction<A> {
    /// Derive the current route from the startup location.
    ///
    /// Dispatched by the router effect on its first run; `dispatch` is the
    /// handle later used to build every route's delegated dispatch.
    Initialize { dispatch: Dispatch<RouterAction<A>> },
    /// Begin navigating to `path`.
    StartNavigation { path: String, from_history: bool },
    /// The routes are `(Exiting, Entering)`: the application decides when to
    /// move them to `(Inactive, Active)`.
    HandleNavigation,
    /// The routes are `(Inactive, Active)`: promote the incoming route.
    FinishNavigation,
    /// An action for the current route's component.
    Current(A),
    /// An action for the incoming route's component.
    Incoming(A),
}

impl<A> RouterAction<A> {
    /// A user-initiated navigation to `path`.
    pub fn navigate(path: impl Into<String>) -> Self {
        RouterAction::StartNavigation {
            path: path.into(),
            from_history: false,
        }
    }

    pub(crate) fn name(&self) -> &'static str {
        match self {
            RouterAction::Initialize { .. } => "Initialize",
            RouterAction::StartNavigation { .. } => "StartNavigation",
            RouterAction::HandleNavigation => "HandleNavigation",
            RouterAction::FinishNavigation => "FinishNavigation",
            RouterAction::Current(_) => "Current",
            RouterAction::Incoming(_) => "Incoming",
        }
    }
}

/// The router configuration.
///
/// Holds the compiled route table and the history backend. Routes are tried
/// in declaration order, first match wins.
///
/// A route table with an invalid pattern does not make construction fail:
/// [`Router::new`] logs the problem and the router degrades to a no-op
/// [`effect`](Self::effect), so a misconfigured router never takes the host
/// application down. Use [`Router::try_new`] to get the error instead.
pub struct Router<C: ?Sized + RouteComponent> {
    routes: Arc<Result<RouteTable<C>, Error>>,
    history: HistoryBridge,
}

impl<C: ?Sized + RouteComponent> Clone for Router<C> {
    fn clone(&self) -> Self {
        Self {
            routes: self.routes.clone(),
            history: self.history.clone(),
        }
    }
}

impl<C: ?Sized + RouteComponent> Router<C> {
    /// Compile the route table, logging configuration errors.
    pub fn new(routes: Vec<Route<C>>) -> Self {
        let routes = RouteTable::compile(routes);
        match &routes {
            Ok(table) => {
                debug_log!("router configured with {} route(s)", table.len());
            }
            Err(err) => {
                error_log!("router configuration is invalid: {}", err);
            }
        }
        Self {
            routes: Arc::new(routes),
            history: HistoryBridge::default(),
        }
    }

    /// Compile the route table, returning the first configuration error.
    pub fn try_new(routes: Vec<Route<C>>) -> Result<Self, Error> {
        Ok(Self {
            routes: Arc::new(Ok(RouteTable::compile(routes)?)),
            history: HistoryBridge::default(),
        })
    }

    /// Use `history` for the startup location, history entries and
    /// back/forward events.
    ///
    /// Without a history backend the router starts on `/` and history
    /// operations are no-ops.
    pub fn with_history(mut self, history: Arc<dyn History>) -> Self {
        self.history = HistoryBridge::new(Some(history));
        self
    }

    /// Whether the route table compiled.
    pub fn is_configured(&self) -> bool {
        self.routes.is_ok()
    }

    fn table(&self) -> Result<&RouteTable<C>, Error> {
        match &*self.routes {
            Ok(table) => Ok(table),
            Err(err) => Err(err.clone()),
        }
    }

    /// Apply a router action to the router state.
    ///
    /// Call this from your application's update function for every wrapped
    /// [`RouterAction`] except [`RouterAction::HandleNavigation`], which is
    /// yours to handle and is rejected here as
    /// [`Error::UnhandledAction`].
    pub fn update(
        &self,
        action: RouterAction<C::Action>,
        state: &RouterState<C>,
    ) -> Result<RouterState<C>, Error> {
        trace_log!("applying router action {}", action.name());
        match action {
            RouterAction::Initialize { dispatch } => self.initialize(state, dispatch),
            RouterAction::StartNavigation { path, from_history } => {
                self.start_navigation(state, path, from_history)
            }
            RouterAction::HandleNavigation => Err(Error::unhandled("HandleNavigation")),
            RouterAction::FinishNavigation => self.finish_navigation(state),
            RouterAction::Current(action) => Ok(delegate(state, RouteSlot::Current, action)),
            RouterAction::Incoming(action) => Ok(delegate(state, RouteSlot::Incoming, action)),
        }
    }

    fn initialize(
        &self,
        state: &RouterState<C>,
        dispatch: Dispatch<RouterAction<C::Action>>,
    ) -> Result<RouterState<C>, Error> {
        if state.is_initialized() {
            return Ok(state.clone());
        }

        let routes = self.table()?;
        let path = self.history.current_path();
        // Tag the startup entry so coming back to it restores the path.
        self.history.replace(&path);

        let Some(current) = RouteRecord::create(
            routes,
            &path,
            RouteStatus::Active,
            RouteSlot::Current,
            &dispatch,
            false,
        ) else {
            return Err(Error::NoRouteForLocation { path });
        };

        info_log!("router initialized on '{}' ({})", path, current.pattern());
        Ok(RouterState::initialize(current, dispatch))
    }

    fn start_navigation(
        &self,
        state: &RouterState<C>,
        path: String,
        from_history: bool,
    ) -> Result<RouterState<C>, Error> {
        let not_initialized = Error::NotInitialized {
            action: "StartNavigation",
        };
        let dispatch = match state.dispatch() {
            Some(dispatch) if state.is_initialized() => dispatch,
            _ => return Err(not_initialized),
        };
        if state.is_transition_locked() {
            return Err(Error::TransitionInProgress { path });
        }

        let routes = self.table()?;
        let Some(incoming) = RouteRecord::create(
            routes,
            &path,
            RouteStatus::Entering,
            RouteSlot::Incoming,
            dispatch,
            from_history,
        ) else {
            return Err(Error::NoRouteForPath { path });
        };

        let mut next = state.clone();
        next.current_mut()
            .ok_or(not_initialized)?
            .set_status(RouteStatus::Exiting)?;
        debug_log!(
            "navigation to '{}' started ({}, from history: {})",
            path,
            incoming.pattern(),
            from_history
        );
        next.begin_transition(incoming);
        Ok(next)
    }

    fn finish_navigation(&self, state: &RouterState<C>) -> Result<RouterState<C>, Error> {
        let Some(dispatch) = state.dispatch() else {
            return Err(Error::NotInitialized {
                action: "FinishNavigation",
            });
        };
        let settled = matches!(
            (
                state.current().map(RouteRecord::status),
                state.incoming().map(RouteRecord::status),
            ),
            (Some(RouteStatus::Inactive), Some(RouteStatus::Active))
        );
        if !settled {
            return Err(Error::NoTransition);
        }

        let mut next = state.clone();
        let mut incoming = next.take_incoming().ok_or(Error::NoTransition)?;
        if !incoming.is_from_history() {
            self.history.push(incoming.path());
        }
        incoming.rebind(RouteSlot::Current, dispatch);

        info_log!("navigated to '{}' ({})", incoming.path(), incoming.pattern());
        next.promote(incoming);
        Ok(next)
    }

    /// The router effect.
    ///
    /// Add it to your application's effects. On its first run it installs
    /// the back/forward listener and dispatches
    /// [`RouterAction::Initialize`]; afterwards it drives transitions forward
    /// and runs the current route's nested effects with the same state and
    /// dispatch it was given.
    ///
    /// A misconfigured router yields a no-op effect.
    pub fn effect(&self) -> Effect<C::AppAction, C::Model>
    where
        C: 'static,
        C::Model: AsRef<RouterState<C>> + 'static,
        C::AppAction: From<RouterAction<C::Action>>,
    {
        if let Err(err) = &*self.routes {
            error_log!("router effect disabled, configuration is invalid: {}", err);
            return Effect::none();
        }

        let router = self.clone();
        Effect::new(move |model: &C::Model, dispatch: &Dispatch<C::AppAction>| {
            router.tick(model, dispatch);
        })
    }

    fn tick(&self, model: &C::Model, dispatch: &Dispatch<C::AppAction>)
    where
        C: 'static,
        C::Model: AsRef<RouterState<C>>,
        C::AppAction: From<RouterAction<C::Action>>,
    {
        let state: &RouterState<C> = model.as_ref();
        let routed =
            dispatch.delegate(|action: RouterAction<C::Action>| C::AppAction::from(action));

        if !state.is_initialized() {
            let navigations = routed.clone();
            self.history.listen(Box::new(move |entry: HistoryEntry| {
                debug_log!("history navigation to '{}'", entry.path);
                navigations.dispatch(RouterAction::StartNavigation {
                    path: entry.path,
                    from_history: true,
                });
            }));
            routed.dispatch(RouterAction::Initialize {
                dispatch: routed.clone(),
            });
            return;
        }

        if let (Some(current), Some(incoming)) = (state.current(), state.incoming()) {
            match (current.status(), incoming.status()) {
                (RouteStatus::Exiting, RouteStatus::Entering) => {
                    routed.dispatch(RouterAction::HandleNavigation);
                }
                (RouteStatus::Inactive, RouteStatus::Active) => {
                    routed.dispatch(RouterAction::FinishNavigation);
                }
                _ => {}
            }
        }

        if let Some(current) = state.current() {
            for effect in current.component().effects() {
                effect(model, dispatch);
            }
        }
    }
}

/// Hand a delegated action to the component in `slot`.
///
/// An empty slot or an action the component does not handle leaves the
/// state untouched.
fn delegate<C: ?Sized + RouteComponent>(
    state: &RouterState<C>,
    slot: RouteSlot,
    action: C::Action,
) -> RouterState<C> {
    let mut next = state.clone();
    let record = match slot {
        RouteSlot::Current => next.current_mut(),
        RouteSlot::Incoming => next.incoming_mut(),
    };
    match record.map(|record| record.apply(action)) {
        Some(true) => next,
        Some(false) => {
            trace_log!("{:?} route ignored a delegated action", slot);
            state.clone()
        }
        None => {
            trace_log!("no {:?} route, delegated action dropped", slot);
            state.clone()
        }
    }
}
