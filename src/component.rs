//! Component contracts for the application and for routed screens.

use crate::{Dispatch, Effect, Error, Location, RouteParams};

/// Top-level application contract.
///
/// Implementations provide four functions:
/// - [`init`](Self::init): Create the seed state
/// - [`update`](Self::update): Transform (Action, State) → State
/// - [`effects`](Self::effects): The effects observing every changed state
/// - [`view`](Self::view): Derive a view from the state with dispatch capability
///
/// See the [crate-level documentation](crate) for a complete example.
pub trait Component<Action: Send, State, View> {
    /// Create the seed state.
    ///
    /// Called once when the runtime is constructed.
    fn init(&self) -> State;

    /// Apply one action to the state.
    ///
    /// All state changes happen through this function. Returning an error
    /// skips the action: the runtime logs it and carries on with the rest of
    /// the batch, unless [`Error::is_fatal`] says otherwise.
    ///
    /// # Arguments
    ///
    /// * `action` - The action to apply
    /// * `state` - The current state
    fn update(&self, action: Action, state: &State) -> Result<State, Error>;

    /// The effects to run after every batch that changed the state.
    ///
    /// Called once when the runtime is constructed; the effects are then kept
    /// for the lifetime of the runtime.
    fn effects(&self) -> Vec<Effect<Action, State>>;

    /// Derive the view from the current state.
    ///
    /// The provided [`Dispatch`] lets the view embed callbacks that submit
    /// new actions.
    ///
    /// # Returns
    ///
    /// A view ready for rendering via [`Renderer::render`](crate::Renderer::render).
    fn view(&self, state: &State, dispatch: &Dispatch<Action>) -> View;
}

/// What a routed component is initialized from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteContext {
    /// The raw navigated path.
    pub path: String,
    /// Parameters captured by the route pattern.
    pub params: RouteParams,
    /// The parsed form of `path`.
    pub location: Location,
}

/// A nested effect of a routed component.
///
/// Nested effects observe the whole application state and dispatch
/// application actions, exactly like top-level effects.
pub type RouteEffect<Model, AppAction> = Box<dyn Fn(&Model, &Dispatch<AppAction>) + Send + Sync>;

/// Contract of a screen mounted by the [`Router`](crate::Router).
///
/// A route component owns a local state which lives inside its route record.
/// The router creates it with [`init`](Self::init) when the route is entered
/// and replaces it whenever an action delegated to the route's slot is handled
/// by [`update`](Self::update).
///
/// All components of one router share the same associated types; applications
/// with several screens typically use an enum for the local state and action.
///
/// # Example
///
/// ```rust
/// use pyramid_mvu::{Dispatch, RouteComponent, RouteContext, RouterAction, RouterState};
///
/// struct TodoPage;
///
/// #[derive(Clone, PartialEq)]
/// struct AppState { router: RouterState<TodoPage> }
///
/// impl AsRef<RouterState<TodoPage>> for AppState {
///     fn as_ref(&self) -> &RouterState<TodoPage> { &self.router }
/// }
///
/// enum AppAction { Router(RouterAction<()>) }
///
/// impl From<RouterAction<()>> for AppAction {
///     fn from(action: RouterAction<()>) -> Self { AppAction::Router(action) }
/// }
///
/// impl RouteComponent for TodoPage {
///     type State = String;
///     type Action = ();
///     type View = String;
///     type Model = AppState;
///     type AppAction = AppAction;
///
///     fn init(&self, context: &RouteContext) -> String {
///         format!("Single Todo: {}", context.params.get("id").map_or("?", |id| id.as_str()))
///     }
///
///     fn update(&self, _action: (), _state: &String) -> Option<String> {
///         None
///     }
///
///     fn render(&self, state: &String, _dispatch: &Dispatch<()>) -> String {
///         state.clone()
///     }
/// }
/// ```
pub trait RouteComponent: Send + Sync {
    /// Component-local state.
    type State: Clone + PartialEq + Send + Sync;
    /// Component-local action.
    type Action: Send + 'static;
    /// What [`render`](Self::render) produces.
    type View;
    /// Application state observed by nested effects.
    type Model;
    /// Application action dispatched by nested effects.
    type AppAction: Send + 'static;

    /// Create the local state for a freshly matched route.
    fn init(&self, context: &RouteContext) -> Self::State;

    /// Apply a delegated action to the local state.
    ///
    /// Return `None` for actions the component does not handle; the router
    /// treats them as a no-op.
    fn update(&self, action: Self::Action, state: &Self::State) -> Option<Self::State>;

    /// Render the local state.
    ///
    /// `dispatch` is the route's delegated dispatch: actions submitted through
    /// it come back to [`update`](Self::update) for the same route slot.
    fn render(&self, state: &Self::State, dispatch: &Dispatch<Self::Action>) -> Self::View;

    /// Nested effects, run by the router effect while this component is the
    /// current route.
    fn effects(&self) -> &[RouteEffect<Self::Model, Self::AppAction>] {
        &[]
    }
}
