#![forbid(unsafe_code)]

//! Logging integration tests.
//!
//! These tests verify that list operations emit the expected structured
//! events and spans.
//!
//! With events enabled:
//!   cargo test -p sortflow-widgets --features tracing --test tracing_tests
//!
//! Zero-overhead verification (no feature):
//!   cargo test -p sortflow-widgets --test tracing_tests -- zero_overhead

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
#[cfg(feature = "tracing")]
use std::time::Duration;

use sortflow_core::geometry::{Point, Rect};
use sortflow_widgets::{RearrangeableItem, RearrangeableList};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

// ============================================================================
// Test Infrastructure
// ============================================================================

/// A captured event with its fields.
#[derive(Debug, Clone)]
#[allow(dead_code)]
struct Captured {
    level: tracing::Level,
    message: String,
    fields: HashMap<String, String>,
}

/// A tracing Layer that records events and span names.
struct Capture {
    events: Arc<Mutex<Vec<Captured>>>,
    spans: Arc<Mutex<Vec<String>>>,
}

struct CaptureHandle {
    events: Arc<Mutex<Vec<Captured>>>,
    spans: Arc<Mutex<Vec<String>>>,
}

impl CaptureHandle {
    fn events(&self) -> Vec<Captured> {
        self.events.lock().unwrap().clone()
    }

    #[allow(dead_code)]
    fn spans(&self) -> Vec<String> {
        self.spans.lock().unwrap().clone()
    }

    #[allow(dead_code)]
    fn find(&self, message: &str) -> Option<Captured> {
        self.events().into_iter().find(|e| e.message == message)
    }
}

/// Visitor that extracts event fields; `message` is split out.
struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for Capture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        self.spans
            .lock()
            .unwrap()
            .push(attrs.metadata().name().to_string());
    }

    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        let mut fields: HashMap<String, String> = visitor.0.into_iter().collect();
        let message = fields.remove("message").unwrap_or_default();
        self.events.lock().unwrap().push(Captured {
            level: *event.metadata().level(),
            message,
            fields,
        });
    }
}

fn with_captured<F: FnOnce()>(f: F) -> CaptureHandle {
    let events = Arc::new(Mutex::new(Vec::new()));
    let spans = Arc::new(Mutex::new(Vec::new()));
    let layer = Capture {
        events: events.clone(),
        spans: spans.clone(),
    };
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, f);
    CaptureHandle { events, spans }
}

struct Row(u32);

impl RearrangeableItem for Row {
    type Id = u32;

    fn id(&self) -> u32 {
        self.0
    }

    fn height(&self) -> f32 {
        20.0
    }
}

fn list_of(n: u32) -> RearrangeableList<Row> {
    let mut list = RearrangeableList::new(Rect::new(0.0, 0.0, 200.0, 300.0));
    list.add_items((0..n).map(Row)).unwrap();
    list
}

/// Screen y of the middle of row `i` (padding 5, height 20, spacing 1).
fn row_y(i: u32) -> f32 {
    5.0 + i as f32 * 21.0 + 10.0
}

// ============================================================================
// Tests
// ============================================================================

#[test]
#[cfg(feature = "tracing")]
fn item_lifecycle_is_logged() {
    let handle = with_captured(|| {
        let mut list = list_of(2);
        list.remove_item(&0).unwrap();
        list.clear_items();
    });

    let added: Vec<_> = handle
        .events()
        .into_iter()
        .filter(|e| e.message == "item added")
        .collect();
    assert_eq!(added.len(), 2);
    assert_eq!(added[1].fields.get("slot").map(String::as_str), Some("1"));
    assert!(added.iter().all(|e| e.level == tracing::Level::DEBUG));

    let removed = handle.find("item removed").expect("removal event");
    assert_eq!(removed.fields.get("item").map(String::as_str), Some("0"));
    assert_eq!(removed.fields.get("remaining").map(String::as_str), Some("1"));
    assert!(handle.find("items cleared").is_some());
    assert!(handle.find("slots renumbered").is_some());
}

#[test]
#[cfg(feature = "tracing")]
fn drag_accept_and_reorder_are_logged() {
    let handle = with_captured(|| {
        let mut list = list_of(5);
        list.set_draggable(&0, true).unwrap();
        list.begin_drag(Point::new(10.0, row_y(0)));
        list.drag_to(Point::new(10.0, row_y(3))).unwrap();
        list.end_drag().unwrap();
    });

    let accepted = handle.find("drag accepted").expect("accept event");
    assert_eq!(accepted.fields.get("item").map(String::as_str), Some("0"));

    let reorder = handle.find("live reorder").expect("reorder event");
    assert_eq!(reorder.fields.get("from").map(String::as_str), Some("0"));
    assert_eq!(reorder.fields.get("to").map(String::as_str), Some("3"));
    assert_eq!(reorder.fields.get("slot").map(String::as_str), Some("3"));

    assert!(handle.find("drag ended").is_some());
}

#[test]
#[cfg(feature = "tracing")]
fn declined_drag_is_logged() {
    let handle = with_captured(|| {
        let mut list = list_of(3);
        list.begin_drag(Point::new(10.0, row_y(0)));
    });
    assert!(handle.find("drag declined, no draggable item").is_some());
}

#[test]
#[cfg(feature = "tracing")]
fn dragged_item_removal_is_logged() {
    let handle = with_captured(|| {
        let mut list = list_of(3);
        list.set_draggable(&1, true).unwrap();
        list.begin_drag(Point::new(10.0, row_y(1)));
        list.remove_item(&1).unwrap();
        list.update(Duration::from_millis(16));
    });

    assert!(handle.find("dragged item removed, drag ended").is_some());
    assert!(handle.spans().iter().any(|s| s == "list_update"));
}

#[test]
#[cfg(feature = "tracing")]
fn autoscroll_is_logged_at_trace() {
    let handle = with_captured(|| {
        let mut list = list_of(40);
        list.set_draggable(&0, true).unwrap();
        list.begin_drag(Point::new(10.0, row_y(0)));
        list.drag_to(Point::new(10.0, 299.0)).unwrap();
        list.update(Duration::from_millis(16));
    });

    let scroll = handle.find("autoscroll").expect("autoscroll event");
    assert_eq!(scroll.level, tracing::Level::TRACE);
    let delta: f64 = scroll.fields["delta"].parse().unwrap();
    assert!(delta > 0.0);
}

#[test]
fn zero_overhead_list_works_without_subscriber() {
    let handle = with_captured(|| {
        let mut list = list_of(3);
        list.set_draggable(&2, true).unwrap();
        list.begin_drag(Point::new(10.0, row_y(2)));
        list.drag_to(Point::new(10.0, row_y(0))).unwrap();
        list.end_drag().unwrap();
        assert_eq!(list.rendered_order(), vec![2, 0, 1]);
    });

    #[cfg(not(feature = "tracing"))]
    assert!(handle.events().is_empty());
    #[cfg(feature = "tracing")]
    assert!(!handle.events().is_empty());
}
