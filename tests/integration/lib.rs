
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use pyramid_mvu::{History, MemoryHistory, Router, TestDriver, TestRenderer, TestRuntime};
pub(crate) use todo_app::*;

mod history_tests;
mod navigation_tests;
mod runtime_loop_tests;

pub(crate) type TodoDriver = TestDriver<AppAction, AppState, String, TodoApp, TestRenderer<String>>;

pub(crate) struct RouterTest {
    pub(crate) driver: TodoDriver,
    pub(crate) renders: TestRenderer<String>,
    pub(crate) history: MemoryHistory,
    list_effect_runs: Arc<AtomicUsize>,
}

impl RouterTest {
    pub(crate) fn list_effect_runs(&self) -> usize {
        self.list_effect_runs.load(Ordering::SeqCst)
    }

    pub(crate) fn last_render(&self) -> String {
        self.renders
            .with_renders(|renders| renders.last().cloned().unwrap_or_default())
    }

    pub(crate) fn history_paths(&self) -> Vec<String> {
        self.history
            .entries()
            .into_iter()
            .map(|entry| entry.path)
            .collect()
    }
}

pub(crate) struct RouterTestBuilder {
    start_path: String,
    animate_exit: bool,
    backend: Option<Arc<dyn History>>,
    attach_history: bool,
}

/// Route the crate's logs to the test output; `RUST_LOG=pyramid_mvu=trace`
/// shows every batch.
pub(crate) fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub(crate) fn build_router_test() -> RouterTestBuilder {
    init_logging();
    RouterTestBuilder {
        start_path: "/".to_string(),
        animate_exit: false,
        backend: None,
        attach_history: true,
    }
}

impl RouterTestBuilder {
    pub(crate) fn given_start_path(mut self, path: &str) -> Self {
        self.start_path = path.to_string();
        self
    }

    pub(crate) fn given_an_exit_animation(mut self) -> Self {
        self.animate_exit = true;
        self
    }

    /// Route history operations to `backend` instead of the in-memory stack.
    pub(crate) fn given_history_backend(mut self, backend: Arc<dyn History>) -> Self {
        self.backend = Some(backend);
        self
    }

    pub(crate) fn given_no_history(mut self) -> Self {
        self.attach_history = false;
        self
    }

    /// Start the runtime. The router's `Initialize` is queued, not applied.
    pub(crate) fn build(self) -> RouterTest {
        let renders = TestRenderer::new();
        let history = MemoryHistory::new(self.start_path);
        let list_effect_runs = Arc::new(AtomicUsize::new(0));

        let mut router = Router::new(todo_routes(list_effect_runs.clone()));
        if self.attach_history {
            let backend = self
                .backend
                .unwrap_or_else(|| Arc::new(history.clone()) as Arc<dyn History>);
            router = router.with_history(backend);
        }

        let app = TodoApp {
            router,
            animate_exit: self.animate_exit,
        };
        let driver = TestRuntime::new(app, renders.clone()).run();

        RouterTest {
            driver,
            renders,
            history,
            list_effect_runs,
        }
    }

    /// Start the runtime and apply the router's initialization.
    pub(crate) fn initialized(self) -> RouterTest {
        let mut test = self.build();
        test.driver
            .process_updates()
            .expect("router initializes on a known route");
        test
    }
}
