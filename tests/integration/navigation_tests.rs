use pyramid_mvu::{Error, RouteSlot, RouteStatus, RouterAction};

use super::{build_router_test, AppAction};

fn navigate(path: &str) -> AppAction {
    AppAction::Router(RouterAction::navigate(path))
}

#[test]
fn given_startup_when_ran_should_queue_initialization_only() {
    let test = build_router_test().build();

    assert_eq!(test.driver.pending(), 1);
    assert!(!test.driver.state().router.is_initialized());
    assert_eq!(test.renders.count(), 1);
    assert_eq!(test.last_render(), "");
}

#[test]
fn given_startup_on_root_when_initialized_should_activate_list_route() {
    let test = build_router_test().initialized();
    let state = test.driver.state();

    assert!(state.router.is_initialized());
    assert!(!state.router.is_transition_locked());
    assert!(state.router.incoming().is_none());

    let current = state.current();
    assert_eq!(current.status(), RouteStatus::Active);
    assert_eq!(current.path(), "/");
    assert_eq!(current.pattern(), "/");
    assert_eq!(current.slot(), RouteSlot::Current);
    assert!(!current.is_from_history());

    assert_eq!(test.last_render(), "Todo List");
    // The startup entry is tagged in place, never pushed.
    assert_eq!(test.history_paths(), vec!["/"]);
}

#[test]
fn given_a_deep_link_when_initialized_should_start_on_the_matching_route() {
    let test = build_router_test()
        .given_start_path("/todo/9?tab=notes#comments")
        .initialized();
    let current = test.driver.state().current();

    assert_eq!(current.pattern(), "/todo/:id");
    assert_eq!(current.params().get("id").map(String::as_str), Some("9"));
    assert_eq!(current.location().pathname(), "/todo/9");
    assert_eq!(current.location().query("tab"), Some("notes"));
    assert_eq!(current.location().hash(), Some("comments"));
    assert_eq!(test.last_render(), "[ ] Single Todo: 9");
}

#[test]
fn given_no_history_when_initialized_should_start_on_root() {
    let test = build_router_test()
        .given_start_path("/todo/9")
        .given_no_history()
        .initialized();

    assert_eq!(test.driver.state().current().path(), "/");
}

#[test]
fn given_an_unknown_startup_location_when_initializing_should_fail_fatally() {
    let mut test = build_router_test().given_start_path("/missing").build();

    let err = test.driver.tick().unwrap_err();

    assert_eq!(
        err,
        Error::NoRouteForLocation {
            path: "/missing".to_string()
        }
    );
    assert!(err.is_fatal());
    assert!(!test.driver.state().router.is_initialized());
}

#[test]
fn given_a_navigation_when_started_should_lock_router_with_exiting_and_entering_routes() {
    let mut test = build_router_test().initialized();

    test.driver.dispatch().dispatch(navigate("/todo/437"));
    assert!(test.driver.tick().unwrap());

    let state = test.driver.state();
    assert!(state.router.is_transition_locked());
    assert_eq!(state.current().status(), RouteStatus::Exiting);
    assert_eq!(state.current().path(), "/");

    let incoming = state.incoming();
    assert_eq!(incoming.status(), RouteStatus::Entering);
    assert_eq!(incoming.slot(), RouteSlot::Incoming);
    assert_eq!(incoming.params().get("id").map(String::as_str), Some("437"));
    assert_eq!(incoming.state().title, "Single Todo: 437");

    // The router effect hands the transition over to the application.
    assert_eq!(test.driver.pending(), 1);
}

#[test]
fn given_a_navigation_when_processed_should_promote_incoming_route_and_push_history() {
    let mut test = build_router_test().initialized();

    test.driver.dispatch().dispatch(navigate("/todo/437"));
    let ticks = test.driver.process_updates().unwrap();

    // StartNavigation, HandleNavigation, FinishNavigation.
    assert_eq!(ticks, 3);

    let state = test.driver.state();
    assert!(!state.router.is_transition_locked());
    assert!(state.router.incoming().is_none());
    assert_eq!(state.current().status(), RouteStatus::Active);
    assert_eq!(state.current().slot(), RouteSlot::Current);
    assert_eq!(state.current().path(), "/todo/437");

    assert_eq!(test.history_paths(), vec!["/", "/todo/437"]);
    assert_eq!(test.history.index(), 1);
    assert_eq!(test.last_render(), "[ ] Single Todo: 437");
}

#[test]
fn given_an_exit_animation_when_navigating_should_wait_for_the_application() {
    let mut test = build_router_test().given_an_exit_animation().initialized();

    test.driver.dispatch().dispatch(navigate("/todo/1"));
    test.driver.process_updates().unwrap();

    let state = test.driver.state();
    assert!(state.exit_pending);
    assert!(state.router.is_transition_locked());
    assert_eq!(state.current().status(), RouteStatus::Exiting);
    assert_eq!(state.incoming().status(), RouteStatus::Entering);
    assert_eq!(test.history_paths(), vec!["/"]);

    test.driver.dispatch().dispatch(AppAction::ExitAnimationDone);
    assert!(test.driver.tick().unwrap());

    let state = test.driver.state();
    assert_eq!(state.current().status(), RouteStatus::Inactive);
    assert_eq!(state.incoming().status(), RouteStatus::Active);

    test.driver.process_updates().unwrap();
    let state = test.driver.state();
    assert!(!state.exit_pending);
    assert!(!state.router.is_transition_locked());
    assert_eq!(state.current().path(), "/todo/1");
    assert_eq!(test.history_paths(), vec!["/", "/todo/1"]);
}

#[test]
fn given_two_navigations_in_one_batch_should_keep_only_the_first() {
    let mut test = build_router_test().initialized();

    let dispatch = test.driver.dispatch();
    dispatch.dispatch(navigate("/todo/1"));
    dispatch.dispatch(navigate("/todo/2"));
    assert!(test.driver.tick().unwrap());

    assert_eq!(test.driver.state().incoming().path(), "/todo/1");

    test.driver.process_updates().unwrap();
    assert_eq!(test.driver.state().current().path(), "/todo/1");
    assert_eq!(test.history_paths(), vec!["/", "/todo/1"]);
}

#[test]
fn given_a_transition_in_flight_when_navigating_again_should_be_rejected() {
    let mut test = build_router_test().given_an_exit_animation().initialized();

    test.driver.dispatch().dispatch(navigate("/todo/1"));
    test.driver.process_updates().unwrap();
    let locked = test.driver.state().clone();

    test.driver.dispatch().dispatch(navigate("/todo/2"));
    assert!(!test.driver.tick().unwrap());

    assert_eq!(test.driver.state(), &locked);
    assert_eq!(test.driver.state().incoming().path(), "/todo/1");
}

#[test]
fn given_an_unknown_path_when_navigating_should_leave_state_untouched() {
    let mut test = build_router_test().initialized();
    let before = test.driver.state().clone();

    test.driver.dispatch().dispatch(navigate("/nowhere"));

    assert!(!test.driver.tick().unwrap());
    assert_eq!(test.driver.state(), &before);
    assert_eq!(test.driver.pending(), 0);
}

#[test]
fn given_a_first_match_wins_table_when_navigating_should_match_case_insensitively() {
    let mut test = build_router_test().initialized();

    test.driver.dispatch().dispatch(navigate("/TODO/42/"));
    test.driver.process_updates().unwrap();

    let current = test.driver.state().current();
    assert_eq!(current.pattern(), "/todo/:id");
    assert_eq!(current.params().get("id").map(String::as_str), Some("42"));
    assert_eq!(test.history_paths(), vec!["/", "/TODO/42/"]);
}

#[test]
fn given_list_route_when_current_should_run_its_nested_effects() {
    let mut test = build_router_test().initialized();
    assert_eq!(test.list_effect_runs(), 1);

    test.driver.dispatch().dispatch(navigate("/todo/3"));
    test.driver.process_updates().unwrap();

    // Ran after StartNavigation and HandleNavigation, while the list was
    // still the current route.
    assert_eq!(test.list_effect_runs(), 3);

    test.driver.dispatch().dispatch(navigate("/"));
    test.driver.process_updates().unwrap();
    assert_eq!(test.list_effect_runs(), 4);
}

#[test]
fn given_a_path_with_spaces_and_accents_when_navigating_should_pass_params_as_written() {
    let mut test = build_router_test().initialized();

    test.driver.dispatch().dispatch(navigate("/todo/café au lait"));
    test.driver.process_updates().unwrap();

    let current = test.driver.state().current();
    assert_eq!(
        current.params().get("id").map(String::as_str),
        Some("café au lait")
    );
    assert_eq!(test.last_render(), "[ ] Single Todo: café au lait");
}
