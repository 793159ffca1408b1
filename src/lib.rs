//! A serialized update loop with a transition-aware client-side router.
//!
//! The runtime applies actions to an immutable application state in batches,
//! strictly in submission order, and re-runs effects and the view only when a
//! batch actually changed the state. The [`Router`] plugs into that loop as
//! an effect plus a set of actions, and sequences every navigation as
//! exit current → enter incoming → activate incoming → finish, leaving the
//! application free to decide when the middle step happens.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use pyramid_mvu::{
//!     Component, Dispatch, Effect, Error, MemoryHistory, Renderer, Route, RouteComponent,
//!     RouteContext, Router, RouterAction, RouterState, Runtime,
//! };
//!
//! struct Page;
//!
//! impl RouteComponent for Page {
//!     type State = String;
//!     type Action = ();
//!     type View = String;
//!     type Model = State;
//!     type AppAction = Action;
//!
//!     fn init(&self, context: &RouteContext) -> String {
//!         context.path.clone()
//!     }
//!
//!     fn update(&self, _action: (), _state: &String) -> Option<String> {
//!         None
//!     }
//!
//!     fn render(&self, state: &String, _dispatch: &Dispatch<()>) -> String {
//!         state.clone()
//!     }
//! }
//!
//! #[derive(Clone, PartialEq)]
//! struct State { router: RouterState<Page> }
//!
//! impl AsRef<RouterState<Page>> for State {
//!     fn as_ref(&self) -> &RouterState<Page> { &self.router }
//! }
//!
//! enum Action { Router(RouterAction<()>) }
//!
//! impl From<RouterAction<()>> for Action {
//!     fn from(action: RouterAction<()>) -> Self { Action::Router(action) }
//! }
//!
//! struct App { router: Router<Page> }
//!
//! impl Component<Action, State, String> for App {
//!     fn init(&self) -> State {
//!         State { router: RouterState::new() }
//!     }
//!
//!     fn update(&self, action: Action, state: &State) -> Result<State, Error> {
//!         match action {
//!             // No exit animation: settle the transition right away.
//!             Action::Router(RouterAction::HandleNavigation) => Ok(State {
//!                 router: state.router.complete_transition()?,
//!             }),
//!             Action::Router(action) => Ok(State {
//!                 router: self.router.update(action, &state.router)?,
//!             }),
//!         }
//!     }
//!
//!     fn effects(&self) -> Vec<Effect<Action, State>> {
//!         vec![self.router.effect()]
//!     }
//!
//!     fn view(&self, state: &State, _dispatch: &Dispatch<Action>) -> String {
//!         state.router.current().map(|route| route.render()).unwrap_or_default()
//!     }
//! }
//!
//! struct ConsoleRenderer;
//! impl Renderer<String> for ConsoleRenderer {
//!     fn render(&mut self, view: String) { println!("{}", view); }
//! }
//!
//! let page = Arc::new(Page);
//! let router = Router::new(vec![
//!     Route::new("/", page.clone()),
//!     Route::new("/todo/:id", page),
//! ])
//! .with_history(Arc::new(MemoryHistory::new("/")));
//!
//! let mut runtime = Runtime::new(App { router }, ConsoleRenderer);
//! runtime.dispatch().dispatch(Action::Router(RouterAction::navigate("/todo/437")));
//! futures::executor::block_on(runtime.run()).unwrap();
//! ```

#[macro_use]
mod logging;

// Module declarations
mod component;
mod dispatch;
mod effect;
mod error;
mod history;
mod location;
mod matcher;
mod params;
mod renderer;
mod route;
mod router;
mod runtime;
mod state;

// Public re-exports
pub use component::{Component, RouteComponent, RouteContext, RouteEffect};
pub use dispatch::Dispatch;
pub use effect::Effect;
pub use error::{Error, Result};
pub use history::{History, HistoryEntry, MemoryHistory, NavigationListener};
pub use location::Location;
pub use matcher::{PathPattern, Route};
pub use params::RouteParams;
pub use renderer::Renderer;
pub use route::{RouteRecord, RouteSlot, RouteStatus};
pub use router::{Router, RouterAction};
pub use runtime::Runtime;
pub use state::RouterState;

// Test utilities (only available with 'testing' feature or during tests)
#[cfg(any(test, feature = "testing"))]
pub use renderer::TestRenderer;
#[cfg(any(test, feature = "testing"))]
pub use runtime::{TestDriver, TestRuntime, MAX_TEST_TICKS};
