//! End-to-end navigation flows through the router facade.

use std::sync::Arc;

use hashroute::{Channel, Handler, Outcome, Platform, Shutdown};

mod common;

use common::{attached_router, Recorder};

#[test]
fn test_all_routes_dispatched_in_length_order() {
    let (_, router) = attached_router("");
    let rec = Recorder::new();
    router.add_route("/", rec.handler("root"), None);
    router.add_route("/a", rec.handler("a"), None);
    router.add_route("/a/:id", rec.handler("id"), None);

    router.set_route("/a/5", false);
    router.process_pending();

    assert_eq!(rec.take(), ["root:routed", "a:routed", "id:routed:id=5"]);
    for pattern in ["/", "/a", "/a/:id"] {
        assert!(router.routes().get(pattern).unwrap().is_active());
    }

    router.set_route("/b", false);
    router.process_pending();
    assert!(router.routes().get("/").unwrap().is_active());
    assert!(!router.routes().get("/a").unwrap().is_active());
}

#[test]
fn test_unmatch_fires_when_leaving_route() {
    let (_, router) = attached_router("");
    let rec = Recorder::new();
    router.add_route("users/:id", rec.handler("user"), Some(rec.handler("user")));

    router.set_route("users/1", false);
    router.process_pending();
    router.set_route("*/2", false);
    router.process_pending();
    router.set_route("home", false);
    router.process_pending();
    router.set_route("about", false);
    router.process_pending();

    assert_eq!(
        rec.take(),
        ["user:routed:id=1", "user:routed:id=2", "user:unrouted"]
    );
}

#[test]
fn test_changed_flag_across_navigation() {
    let (_, router) = attached_router("");
    let entry = router.add_route("items/:id", Handler::new(|_| {}), None);

    router.set_route("items/1/view", false);
    router.process_pending();
    assert!(entry.is_changed());

    router.set_route("**/edit", false);
    router.process_pending();
    assert_eq!(router.current_location(), "items/1/edit");
    assert!(!entry.is_changed());

    router.set_route("items/2", false);
    router.process_pending();
    assert!(entry.is_changed());
}

#[test]
fn test_silent_navigation_then_normal() {
    let (_, router) = attached_router("");
    let rec = Recorder::new();
    router.add_route("page/:n", rec.handler("page"), None);

    router.set_route("page/1", true);
    router.process_pending();
    assert_eq!(router.current_location(), "page/1");
    assert_eq!(router.suppress_count(), 0);
    assert!(rec.take().is_empty());

    router.set_route("*/2", false);
    router.process_pending();
    assert_eq!(rec.take(), ["page:routed:n=2"]);
}

#[test]
fn test_malformed_fragment_is_replaced_not_dispatched() {
    let (platform, router) = attached_router("");
    let rec = Recorder::new();
    router.add_route("x", rec.handler("x"), None);

    platform.set_hash("#  x");
    assert_eq!(
        router.on_location_changed(),
        Outcome::Redirected { to: "x".into() }
    );
    assert!(rec.take().is_empty());
    assert_eq!(platform.hash(), "x");
    assert_eq!(platform.history(), ["", "x"]);
}

#[test]
fn test_route_with_no_handlers_keeps_dispatching() {
    let (_, router) = attached_router("");
    let rec = Recorder::new();
    let on_match = rec.handler("gone");
    let on_unmatch = rec.handler("gone");
    router.add_route("gone", on_match.clone(), Some(on_unmatch.clone()));
    assert!(router.remove_route("gone", &on_match, Some(&on_unmatch)));

    router.set_route("gone", false);
    router.process_pending();

    let entry = router.routes().get("gone").unwrap();
    assert_eq!(router.routes().order(), ["gone"]);
    assert!(entry.is_active());
    assert_eq!(entry.handler_count(Channel::Routed), 0);
    assert!(rec.take().is_empty());
}

#[test]
fn test_add_and_remove_routes_mapping() {
    let (_, router) = attached_router("");
    let rec = Recorder::new();
    let a = rec.handler("a");
    let b = rec.handler("b");
    router.add_routes(vec![("b/:x", b.clone()), ("a", a.clone())]);
    assert_eq!(router.routes().order(), ["a", "b/:x"]);

    router.remove_routes(vec![("a", &a)]);
    router.set_route("b/1", false);
    router.process_pending();
    router.set_route("a", false);
    router.process_pending();

    assert_eq!(rec.take(), ["b:routed:x=1"]);
}

#[test]
fn test_handler_registering_routes_mid_dispatch() {
    let (_, router) = attached_router("");
    let rec = Recorder::new();

    let weak = Arc::downgrade(&router);
    let late = rec.handler("late");
    router.add_route(
        "",
        Handler::new(move |_| {
            if let Some(router) = weak.upgrade() {
                if router.routes().get("late").is_none() {
                    router.add_route("late", late.clone(), None);
                }
            }
        }),
        None,
    );

    router.set_route("late", false);
    router.process_pending();
    assert!(rec.take().is_empty());

    assert_eq!(router.refresh(), Outcome::Dispatched { active: 2 });
    assert_eq!(rec.take(), ["late:routed"]);
}

#[tokio::test]
async fn test_background_loop_dispatches_navigation() {
    let (_, router) = attached_router("");
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    router.add_route(
        "tab/:name",
        Handler::new(move |event| {
            let _ = tx.send(event.params.get("name").unwrap_or_default().to_string());
        }),
        None,
    );

    let shutdown = Shutdown::new();
    let signal = shutdown.listen();
    let loop_router = router.clone();
    let task = tokio::spawn(async move { loop_router.run(signal).await });

    router.set_route("tab/inbox", false);
    assert_eq!(rx.recv().await.as_deref(), Some("inbox"));
    router.set_route("*/sent", false);
    assert_eq!(rx.recv().await.as_deref(), Some("sent"));

    assert_eq!(shutdown.stop(), 1);
    task.await.unwrap();
    assert_eq!(shutdown.running_loops(), 0);
}
