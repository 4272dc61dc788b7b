#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::time::{Duration, Instant};

use goalmap_core::errors::GoalMapError;
use goalmap_engine::{Session, SessionConfig};

fn session() -> Session {
    Session::ephemeral(SessionConfig::default())
}

fn instant_session() -> Session {
    Session::ephemeral(SessionConfig {
        transition_ms: 0,
        ..SessionConfig::default()
    })
}

#[test]
fn test_zero_transition_focuses_immediately() {
    let mut s = instant_session();
    s.request_focus("ux", Instant::now()).unwrap();
    assert_eq!(s.focused_id(), "ux");
    assert!(s.pending_focus_id().is_none());

    let crumbs: Vec<_> = s.breadcrumbs().iter().map(|n| n.id.clone()).collect();
    assert_eq!(crumbs, vec!["root", "product", "ux"]);
}

#[test]
fn test_newer_request_replaces_pending() {
    let mut s = session();
    let t0 = Instant::now();
    s.request_focus("product", t0).unwrap();
    s.request_focus("hr", t0 + Duration::from_millis(10)).unwrap();

    assert!(!s.settle(t0 + Duration::from_millis(350)));
    assert!(s.settle(t0 + Duration::from_millis(360)));
    assert_eq!(s.focused_id(), "hr");
}

#[test]
fn test_request_focus_unknown_node() {
    let mut s = session();
    let err = s.request_focus("ghost", Instant::now()).unwrap_err();
    assert!(matches!(err, GoalMapError::NodeNotFound { .. }));
    assert!(s.pending_focus_id().is_none());
}

#[test]
fn test_breadcrumb_click_on_current_focus_is_noop() {
    let mut s = instant_session();
    s.focus_now("marketing").unwrap();
    assert!(!s.breadcrumb_click("marketing", Instant::now()).unwrap());
    assert!(s.breadcrumb_click("root", Instant::now()).unwrap());
    assert_eq!(s.focused_id(), "root");
}

#[test]
fn test_center_click_focuses_parent() {
    let mut s = session();
    s.focus_now("ux").unwrap();

    let t0 = Instant::now();
    assert!(s.center_click(t0));
    assert!(s.settle(t0 + s.config().transition()));
    assert_eq!(s.focused_id(), "product");
}

#[test]
fn test_select_does_not_move_focus() {
    let mut s = session();
    s.select("seo").unwrap();
    assert_eq!(s.selected_id(), "seo");
    assert_eq!(s.focused_id(), "root");
    assert_eq!(s.parent_of_selected().unwrap().id, "marketing");
    assert_eq!(s.selected_node().unwrap().title, "SEO Improvement");

    assert!(s.select("ghost").is_err());
    assert_eq!(s.selected_id(), "seo");
}

#[test]
fn test_render_follows_focus() {
    let mut s = session();
    let overview = s.render(800.0, 800.0);
    assert_eq!(overview[0].node_id, "root");
    assert_eq!(overview.len(), 14);

    s.focus_now("marketing").unwrap();
    let zoomed = s.render(800.0, 800.0);
    assert_eq!(zoomed[0].node_id, "marketing");
    assert_eq!(zoomed[0].depth, 0);
    assert_eq!(zoomed.len(), 4);
}

#[test]
fn test_render_uses_zoomed_depth_cap() {
    let mut s = Session::ephemeral(SessionConfig {
        layout: goalmap_core::LayoutConfig {
            overview_depth_cap: 1,
            zoomed_depth_cap: 2,
            ..Default::default()
        },
        ..SessionConfig::default()
    });

    let overview = s.render(800.0, 800.0);
    assert!(overview.iter().all(|n| n.depth <= 1));

    s.focus_now("product").unwrap();
    let zoomed = s.render(800.0, 800.0);
    assert_eq!(zoomed.iter().map(|n| n.depth).max(), Some(2));
}
