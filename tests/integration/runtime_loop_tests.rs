use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

use futures::executor::block_on;
use pyramid_mvu::{Error, MemoryHistory, Route, Router, Runtime, TestRenderer, TestRuntime};

use super::{init_logging, todo_routes, Screen, SingleTodo, TodoApp};

fn todo_app(start_path: &str) -> TodoApp {
    init_logging();
    let router = Router::new(todo_routes(Arc::new(AtomicUsize::new(0))))
        .with_history(Arc::new(MemoryHistory::new(start_path)));
    TodoApp {
        router,
        animate_exit: false,
    }
}

#[test]
fn given_an_unknown_startup_location_when_running_should_stop_with_the_fatal_error() {
    let renders = TestRenderer::new();
    let mut runtime = Runtime::new(todo_app("/missing"), renders.clone());

    let result = block_on(runtime.run());

    assert_eq!(
        result,
        Err(Error::NoRouteForLocation {
            path: "/missing".to_string()
        })
    );
    // Only the seed state was rendered.
    assert_eq!(renders.count(), 1);
    assert!(!runtime.state().router.is_initialized());
}

#[test]
fn given_an_invalid_pattern_when_created_with_try_new_should_return_the_error() {
    let routes: Vec<Route<Screen>> = vec![Route::new(
        "todo/:id",
        Arc::new(SingleTodo) as Arc<Screen>,
    )];

    let result = Router::try_new(routes);

    assert!(matches!(
        result,
        Err(Error::InvalidPattern { ref pattern, .. }) if pattern == "todo/:id"
    ));
}

#[test]
fn given_an_invalid_pattern_should_degrade_to_a_router_that_never_starts() {
    let router = Router::new(vec![
        Route::new("/todo/:id/:id", Arc::new(SingleTodo) as Arc<Screen>),
    ])
    .with_history(Arc::new(MemoryHistory::new("/todo/1")));
    assert!(!router.is_configured());

    let renders = TestRenderer::new();
    let app = TodoApp {
        router,
        animate_exit: false,
    };
    let mut driver = TestRuntime::new(app, renders.clone()).run();

    assert_eq!(driver.pending(), 0);
    assert_eq!(driver.process_updates().unwrap(), 0);
    assert!(!driver.state().router.is_initialized());
    assert_eq!(renders.count(), 1);
}
