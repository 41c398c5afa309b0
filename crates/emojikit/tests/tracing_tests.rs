#![forbid(unsafe_code)]

//! Log event and span integration tests.
//!
//! Run:
//!   cargo test -p emojikit --test tracing_tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use emojikit::{Catalogue, EmojiEntry, EmojiKit, MemoryStore, PickerConfig};
use emojikit_detect::ScriptedProbe;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

// ============================================================================
// Test Infrastructure
// ============================================================================

/// A captured event with its level, fields, and enclosing span.
#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    target: String,
    fields: HashMap<String, String>,
    span: Option<String>,
}

impl CapturedEvent {
    fn message(&self) -> &str {
        self.fields.get("message").map(String::as_str).unwrap_or("")
    }
}

/// A tracing Layer that records every event.
struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

/// Visitor that extracts event fields.
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

impl<S> tracing_subscriber::Layer<S> for EventCapture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);

        let span = ctx
            .event_span(event)
            .map(|span_ref| span_ref.name().to_string());

        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            target: event.metadata().target().to_string(),
            fields: visitor.0.into_iter().collect(),
            span,
        });
    }
}

/// Run `f` under a subscriber that captures every event.
fn with_captured_events<F>(f: F) -> Vec<CapturedEvent>
where
    F: FnOnce(),
{
    let events = Arc::new(Mutex::new(Vec::new()));
    let layer = EventCapture {
        events: Arc::clone(&events),
    };
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, f);
    let captured = events.lock().unwrap().clone();
    captured
}

fn kit() -> EmojiKit<ScriptedProbe> {
    let catalogue = Catalogue::from_groups([(
        "Flags",
        vec![EmojiEntry::new("🚩", "triangular flag", false)],
    )]);
    EmojiKit::new(catalogue, ScriptedProbe::default(), MemoryStore::new().shared()).unwrap()
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn missing_group_is_warned_inside_palette_span() {
    let events = with_captured_events(|| {
        let mut kit = kit();
        let config = PickerConfig::default().with_groups(["Flags", "Sparkles"]);
        let palette = kit.palette(&config);
        assert_eq!(palette.sections.len(), 2);
    });

    let warning = events
        .iter()
        .find(|e| e.level == tracing::Level::WARN && e.message().contains("does not exist"))
        .expect("missing group warning");
    assert_eq!(warning.fields.get("group").map(String::as_str), Some("Sparkles"));
    assert_eq!(warning.span.as_deref(), Some("palette"));
}

#[test]
fn fresh_verdicts_are_logged_with_sequence() {
    let events = with_captured_events(|| {
        let mut kit = kit();
        kit.classify("🦄");
    });

    let classified: Vec<_> = events
        .iter()
        .filter(|e| e.message() == "classified")
        .collect();
    assert!(
        classified.iter().any(|e| e.fields.get("sequence").map(String::as_str) == Some("🦄")),
        "expected a classified event for 🦄, got: {classified:?}"
    );
    assert!(classified.iter().all(|e| e.target == "emojikit_detect::classifier"));
}

#[test]
fn priming_reports_probe_count() {
    let events = with_captured_events(|| {
        let _kit = kit();
    });

    let primed = events
        .iter()
        .find(|e| e.message() == "classification cache primed")
        .expect("prime event");
    assert_eq!(primed.level, tracing::Level::INFO);
    assert_eq!(primed.fields.get("probed").map(String::as_str), Some("1"));
}

#[test]
fn unknown_selection_is_warned() {
    let events = with_captured_events(|| {
        let mut kit = kit();
        assert!(!kit.select("🦄"));
    });

    assert!(
        events
            .iter()
            .any(|e| e.level == tracing::Level::WARN && e.message().contains("not in the catalogue")),
        "expected a warning for an unknown selection"
    );
}
