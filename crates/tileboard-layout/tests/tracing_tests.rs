#![forbid(unsafe_code)]

//! Tracing instrumentation tests.
//!
//!   cargo test -p tileboard-layout --features tracing --test tracing_tests

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use tileboard_layout::{GridGeometry, PlacementItem, SeededRng, place_report};
use tracing::field::{Field, Visit};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

/// A captured span with its recorded fields.
#[derive(Debug, Clone)]
struct CapturedSpan {
    name: String,
    fields: HashMap<String, String>,
}

#[derive(Default)]
struct FieldVisitor(HashMap<String, String>);

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{value:?}"));
    }
}

/// A tracing Layer that records span creation and event messages.
struct Capture {
    spans: Arc<Mutex<Vec<CapturedSpan>>>,
    events: Arc<Mutex<Vec<String>>>,
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
        let mut visitor = FieldVisitor::default();
        attrs.record(&mut visitor);
        self.spans.lock().unwrap().push(CapturedSpan {
            name: attrs.metadata().name().to_string(),
            fields: visitor.0,
        });
    }

    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        if let Some(message) = visitor.0.remove("message") {
            self.events.lock().unwrap().push(message);
        }
    }
}

fn capture<F: FnOnce()>(f: F) -> (Vec<CapturedSpan>, Vec<String>) {
    let spans = Arc::new(Mutex::new(Vec::new()));
    let events = Arc::new(Mutex::new(Vec::new()));
    let layer = Capture {
        spans: Arc::clone(&spans),
        events: Arc::clone(&events),
    };
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, f);
    let spans = spans.lock().unwrap().clone();
    let events = events.lock().unwrap().clone();
    (spans, events)
}

#[test]
fn placement_opens_span_with_geometry() {
    let items = [PlacementItem::new("a", 2, 1), PlacementItem::new("b", 1, 1)];
    let (spans, _) = capture(|| {
        place_report(GridGeometry::new(3, 3), &items, &mut SeededRng::new(1));
    });
    let span = spans
        .iter()
        .find(|s| s.name == "tile_place")
        .expect("tile_place span");
    assert_eq!(span.fields.get("rows").map(String::as_str), Some("3"));
    assert_eq!(span.fields.get("cols").map(String::as_str), Some("3"));
    assert_eq!(span.fields.get("items").map(String::as_str), Some("2"));
}

#[test]
fn placed_and_dropped_tiles_emit_events() {
    let items = [PlacementItem::new("fits", 1, 1), PlacementItem::new("wide", 5, 1)];
    let (_, events) = capture(|| {
        place_report(GridGeometry::new(3, 3), &items, &mut SeededRng::new(2));
    });
    assert!(events.iter().any(|e| e == "tile placed"), "{events:?}");
    assert!(events.iter().any(|e| e == "tile dropped"), "{events:?}");
    assert!(events.iter().any(|e| e == "placement complete"), "{events:?}");
}
