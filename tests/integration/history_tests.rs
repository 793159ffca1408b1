use std::sync::Arc;

use mockall::mock;
use pyramid_mvu::{History, HistoryEntry, NavigationListener, RouterAction, RouteStatus};

use super::{build_router_test, AppAction, RouterTest};

mock! {
    pub Backend {}

    impl History for Backend {
        fn current_path(&self) -> String;
        fn push_entry(&self, entry: HistoryEntry);
        fn replace_entry(&self, entry: HistoryEntry);
        fn listen(&self, listener: NavigationListener);
    }
}

fn navigated_to(path: &str) -> RouterTest {
    let mut test = build_router_test().initialized();
    test.driver
        .dispatch()
        .dispatch(AppAction::Router(RouterAction::navigate(path)));
    test.driver.process_updates().unwrap();
    test
}

#[test]
fn given_a_back_event_should_navigate_without_pushing_an_entry() {
    let mut test = navigated_to("/todo/1");

    let entry = test.history.back();
    assert_eq!(entry, Some(HistoryEntry::new("/")));

    let queued = test.driver.pending();
    assert_eq!(queued, 1);
    test.driver.process_updates().unwrap();

    let current = test.driver.state().current();
    assert_eq!(current.path(), "/");
    assert_eq!(current.status(), RouteStatus::Active);
    assert!(current.is_from_history());

    assert_eq!(test.history_paths(), vec!["/", "/todo/1"]);
    assert_eq!(test.history.index(), 0);
    assert_eq!(test.last_render(), "Todo List");
}

#[test]
fn given_back_then_forward_events_should_restore_the_later_route() {
    let mut test = navigated_to("/todo/1");

    test.history.back();
    test.driver.process_updates().unwrap();
    test.history.forward();
    test.driver.process_updates().unwrap();

    let current = test.driver.state().current();
    assert_eq!(current.path(), "/todo/1");
    assert!(current.is_from_history());
    assert_eq!(test.history_paths(), vec!["/", "/todo/1"]);
    assert_eq!(test.history.index(), 1);
}

#[test]
fn given_a_navigation_after_going_back_should_drop_forward_entries() {
    let mut test = navigated_to("/todo/1");

    test.history.back();
    test.driver.process_updates().unwrap();
    test.driver
        .dispatch()
        .dispatch(AppAction::Router(RouterAction::navigate("/todo/2")));
    test.driver.process_updates().unwrap();

    assert!(!test.driver.state().current().is_from_history());
    assert_eq!(test.history_paths(), vec!["/", "/todo/2"]);
}

#[test]
fn given_a_history_backend_should_tag_startup_entry_and_push_each_navigation() {
    let mut backend = MockBackend::new();
    backend
        .expect_current_path()
        .times(1)
        .return_const("/".to_string());
    backend
        .expect_replace_entry()
        .withf(|entry| entry.path == "/")
        .times(1)
        .return_const(());
    backend.expect_listen().times(1).return_const(());
    backend
        .expect_push_entry()
        .withf(|entry| entry.path == "/todo/437")
        .times(1)
        .return_const(());

    let mut test = build_router_test()
        .given_history_backend(Arc::new(backend))
        .initialized();
    test.driver
        .dispatch()
        .dispatch(AppAction::Router(RouterAction::navigate("/todo/437")));
    test.driver.process_updates().unwrap();

    assert_eq!(test.driver.state().current().path(), "/todo/437");
}
