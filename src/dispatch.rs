//! Dispatch handle for submitting updates to the runtime.

use std::fmt;
use std::sync::Arc;

use flume::Sender;

/// Handle that submits actions to the runtime's update queue.
///
/// Clone this handle to create callbacks in your views that trigger
/// actions when invoked (e.g., by user interaction). Dispatching never blocks
/// and never applies the action directly: it is queued and applied by the
/// runtime in submission order.
///
/// A `Dispatch` can be [delegated](Self::delegate) to a child action type.
/// The derived handle wraps every child action into the parent action before
/// forwarding it, which is how nested components dispatch without knowing
/// they are nested.
///
/// # Example
///
/// ```rust
/// use pyramid_mvu::{Component, Dispatch, Effect, Error};
///
/// #[derive(Clone, PartialEq)]
/// struct State { clicks: u32 }
///
/// enum Action { Click }
///
/// struct View { clicks: u32, on_click: Box<dyn Fn()> }
///
/// struct MyApp;
///
/// impl Component<Action, State, View> for MyApp {
///     fn init(&self) -> State {
///         State { clicks: 0 }
///     }
///
///     fn update(&self, action: Action, state: &State) -> Result<State, Error> {
///         match action {
///             Action::Click => Ok(State { clicks: state.clicks + 1 }),
///         }
///     }
///
///     fn effects(&self) -> Vec<Effect<Action, State>> {
///         vec![]
///     }
///
///     fn view(&self, state: &State, dispatch: &Dispatch<Action>) -> View {
///         let dispatch = dispatch.clone();
///         View {
///             clicks: state.clicks,
///             on_click: Box::new(move || dispatch.dispatch(Action::Click)),
///         }
///     }
/// }
/// ```
pub struct Dispatch<Action>(Arc<dyn Fn(Action) + Send + Sync>);

impl<Action> Clone for Dispatch<Action> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<Action> fmt::Debug for Dispatch<Action> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Dispatch(..)")
    }
}

impl<Action: Send + 'static> Dispatch<Action> {
    /// Create a dispatch handle feeding the runtime's queue.
    ///
    /// Once the runtime is gone the sender is disconnected and dispatching
    /// becomes a silent no-op.
    pub(crate) fn from_sender(sender: Sender<Action>) -> Self {
        Self(Arc::new(move |action: Action| {
            sender.send(action).ok();
        }))
    }

    /// Create a dispatch handle from an arbitrary sink.
    ///
    /// Useful for hosts that route actions themselves and for tests that
    /// record what a component dispatched.
    pub fn from_fn<F>(sink: F) -> Self
    where
        F: Fn(Action) + Send + Sync + 'static,
    {
        Self(Arc::new(sink))
    }

    /// Submit an action.
    pub fn dispatch(&self, action: Action) {
        (self.0)(action);
    }

    /// Derive a handle for a child action type.
    ///
    /// Every child action is re-tagged through `wrap` and forwarded to this
    /// handle.
    ///
    /// ```rust
    /// use pyramid_mvu::Dispatch;
    /// use std::sync::{Arc, Mutex};
    ///
    /// #[derive(Debug, PartialEq)]
    /// enum Parent { Child(u8) }
    ///
    /// let seen = Arc::new(Mutex::new(Vec::new()));
    /// let sink = seen.clone();
    /// let parent = Dispatch::from_fn(move |action: Parent| sink.lock().unwrap().push(action));
    ///
    /// let child = parent.delegate(Parent::Child);
    /// child.dispatch(7);
    ///
    /// assert_eq!(*seen.lock().unwrap(), vec![Parent::Child(7)]);
    /// ```
    pub fn delegate<Child, F>(&self, wrap: F) -> Dispatch<Child>
    where
        Child: 'static,
        F: Fn(Child) -> Action + Send + Sync + 'static,
    {
        let parent = self.clone();
        Dispatch(Arc::new(move |child: Child| parent.dispatch(wrap(child))))
    }
}
