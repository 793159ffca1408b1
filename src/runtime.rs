//! The runtime that serializes updates and re-runs effects.

use core::marker::PhantomData;

use flume::Receiver;

use crate::{Component, Dispatch, Effect, Error, Renderer};

/// The runtime that orchestrates the update loop.
///
/// This is the core of the framework. It:
/// 1. Creates the seed state via [`Component::init`]
/// 2. Queues actions submitted through its [`Dispatch`]
/// 3. Applies queued actions in batches through [`Component::update`]
/// 4. Re-runs the effects and re-renders only when a batch changed the state
///
/// A batch is the set of actions queued when the batch starts. Actions
/// dispatched while a batch is being applied, or by the effects that follow
/// it, land in the next batch. Comparing the state before and after each
/// batch keeps a loop of effects dispatching no-op actions from re-running
/// forever.
///
/// For testing with manual control, use [`TestRuntime`] with a
/// [`TestRenderer`](crate::TestRenderer).
///
/// # Type Parameters
///
/// * `Action` - The action type for your application
/// * `State` - The state type for your application
/// * `View` - The view type produced by the view function
/// * `App` - The component implementation type (implements [`Component`])
/// * `Render` - The renderer implementation type (implements [`Renderer`])
pub struct Runtime<Action, State, View, App, Render>
where
    Action: Send,
    State: Clone + PartialEq,
    App: Component<Action, State, View>,
    Render: Renderer<View>,
{
    app: App,
    renderer: Render,
    receiver: Receiver<Action>,
    dispatch: Dispatch<Action>,
    state: State,
    effects: Vec<Effect<Action, State>>,
    _view: PhantomData<View>,
}

impl<Action, State, View, App, Render> Runtime<Action, State, View, App, Render>
where
    Action: Send + 'static,
    State: Clone + PartialEq + 'static,
    App: Component<Action, State, View>,
    Render: Renderer<View>,
{
    /// Create a new runtime.
    ///
    /// The seed state is created immediately; nothing is rendered and no
    /// effect runs until [`Runtime::run`] is called.
    ///
    /// # Arguments
    ///
    /// * `app` - Application logic implementing [`Component`]
    /// * `renderer` - Presentation layer rendering the views
    pub fn new(app: App, renderer: Render) -> Self {
        let (sender, receiver) = flume::unbounded();
        let state = app.init();
        let effects = app.effects();

        Runtime {
            app,
            renderer,
            receiver,
            dispatch: Dispatch::from_sender(sender),
            state,
            effects,
            _view: PhantomData,
        }
    }

    /// The handle through which hosts submit actions.
    pub fn dispatch(&self) -> Dispatch<Action> {
        self.dispatch.clone()
    }

    /// The latest state.
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Run the update loop.
    ///
    /// - Runs the effects and renders the seed state.
    /// - Waits for the next action, then applies it together with everything
    ///   queued behind it as one batch.
    ///
    /// Waiting is the only suspension point: control returns to the host
    /// executor between batches, so external events can queue more actions.
    ///
    /// Returns when an update fails fatally (see [`Error::is_fatal`]). The
    /// runtime keeps its own dispatch handle, so the queue never disconnects
    /// while the loop is running.
    pub async fn run(&mut self) -> Result<(), Error> {
        self.start();

        loop {
            match self.receiver.recv_async().await {
                Ok(action) => {
                    self.apply_batch(Some(action))?;
                }
                Err(_) => return Ok(()),
            }
        }
    }

    fn start(&mut self) {
        trace_log!("runtime starting");
        self.run_effects();
    }

    /// Apply one batch: `first` followed by everything currently queued.
    ///
    /// Returns whether the state changed.
    fn apply_batch(&mut self, first: Option<Action>) -> Result<bool, Error> {
        let previous = self.state.clone();
        let mut state = previous.clone();
        let mut applied = 0usize;

        for action in first.into_iter().chain(self.receiver.drain()) {
            match self.app.update(action, &state) {
                Ok(next) => {
                    state = next;
                    applied += 1;
                }
                Err(err) if err.is_fatal() => {
                    error_log!("fatal update failure: {}", err);
                    return Err(err);
                }
                Err(err) => {
                    warn_log!("skipping update: {}", err);
                }
            }
        }

        let changed = state != previous;
        trace_log!("batch applied {} update(s), changed: {}", applied, changed);

        self.state = state;
        if changed {
            self.run_effects();
        }

        Ok(changed)
    }

    fn run_effects(&mut self) {
        for effect in &mut self.effects {
            effect.run(&self.state, &self.dispatch);
        }

        let view = self.app.view(&self.state, &self.dispatch);
        self.renderer.render(view);
    }
}

#[cfg(any(test, feature = "testing"))]
/// Upper bound on the batches [`TestDriver::process_updates`] applies before
/// giving up on the queue ever draining.
pub const MAX_TEST_TICKS: usize = 256;

#[cfg(any(test, feature = "testing"))]
/// Test runtime driver for manual batch processing control.
///
/// Only available with the `testing` feature or during tests.
///
/// Returned by [`TestRuntime::run`]. Provides methods to process the update
/// queue one batch at a time for precise control in tests.
pub struct TestDriver<Action, State, View, App, Render>
where
    Action: Send + 'static,
    State: Clone + PartialEq + 'static,
    App: Component<Action, State, View>,
    Render: Renderer<View>,
{
    runtime: Runtime<Action, State, View, App, Render>,
}

#[cfg(any(test, feature = "testing"))]
impl<Action, State, View, App, Render> TestDriver<Action, State, View, App, Render>
where
    Action: Send + 'static,
    State: Clone + PartialEq + 'static,
    App: Component<Action, State, View>,
    Render: Renderer<View>,
{
    /// Apply one batch made of everything currently queued.
    ///
    /// Returns whether the state changed. An empty queue is a no-op.
    pub fn tick(&mut self) -> Result<bool, Error> {
        if self.runtime.receiver.is_empty() {
            return Ok(false);
        }
        self.runtime.apply_batch(None)
    }

    /// Apply batches until the queue is empty.
    ///
    /// Returns the number of batches applied.
    ///
    /// # Panics
    ///
    /// Panics if the queue is still not empty after [`MAX_TEST_TICKS`]
    /// batches, which means the effects never reach a fixed point.
    pub fn process_updates(&mut self) -> Result<usize, Error> {
        let mut ticks = 0;
        while !self.runtime.receiver.is_empty() {
            assert!(
                ticks < MAX_TEST_TICKS,
                "update queue did not drain after {} batches",
                MAX_TEST_TICKS
            );
            self.runtime.apply_batch(None)?;
            ticks += 1;
        }
        Ok(ticks)
    }

    /// Number of actions waiting for the next batch.
    pub fn pending(&self) -> usize {
        self.runtime.receiver.len()
    }

    /// The handle through which tests submit actions.
    pub fn dispatch(&self) -> Dispatch<Action> {
        self.runtime.dispatch()
    }

    /// The latest state.
    pub fn state(&self) -> &State {
        self.runtime.state()
    }
}

#[cfg(any(test, feature = "testing"))]
/// Test runtime with manual batch processing control.
///
/// Only available with the `testing` feature or during tests.
///
/// Unlike [`Runtime`], this runtime does not process actions when they are
/// dispatched. Tests call [`tick`](TestDriver::tick) or
/// [`process_updates`](TestDriver::process_updates) on the returned driver.
///
/// ```rust
/// use pyramid_mvu::{Component, Dispatch, Effect, Error, TestRenderer, TestRuntime};
/// # #[derive(Clone, PartialEq)]
/// # struct State { count: i32 }
/// # enum Action { Increment }
/// # struct MyApp;
/// # impl Component<Action, State, i32> for MyApp {
/// #     fn init(&self) -> State { State { count: 0 } }
/// #     fn update(&self, _action: Action, state: &State) -> Result<State, Error> {
/// #         Ok(State { count: state.count + 1 })
/// #     }
/// #     fn effects(&self) -> Vec<Effect<Action, State>> { vec![] }
/// #     fn view(&self, state: &State, _dispatch: &Dispatch<Action>) -> i32 { state.count }
/// # }
/// let renderer = TestRenderer::new();
/// let mut driver = TestRuntime::new(MyApp, renderer.clone()).run();
///
/// driver.dispatch().dispatch(Action::Increment);
/// driver.process_updates().unwrap();
///
/// renderer.with_renders(|renders| assert_eq!(renders, &vec![0, 1]));
/// ```
pub struct TestRuntime<Action, State, View, App, Render>
where
    Action: Send + 'static,
    State: Clone + PartialEq + 'static,
    App: Component<Action, State, View>,
    Render: Renderer<View>,
{
    runtime: Runtime<Action, State, View, App, Render>,
}

#[cfg(any(test, feature = "testing"))]
impl<Action, State, View, App, Render> TestRuntime<Action, State, View, App, Render>
where
    Action: Send + 'static,
    State: Clone + PartialEq + 'static,
    App: Component<Action, State, View>,
    Render: Renderer<View>,
{
    /// Create a new test runtime.
    ///
    /// # Arguments
    ///
    /// * `app` - Application logic implementing [`Component`]
    /// * `renderer` - Presentation layer rendering the views
    pub fn new(app: App, renderer: Render) -> Self {
        TestRuntime {
            runtime: Runtime::new(app, renderer),
        }
    }

    /// Run the initial effects, render the seed state and return a driver
    /// for manual batch processing.
    pub fn run(mut self) -> TestDriver<Action, State, View, App, Render> {
        self.runtime.start();
        TestDriver {
            runtime: self.runtime,
        }
    }
}
