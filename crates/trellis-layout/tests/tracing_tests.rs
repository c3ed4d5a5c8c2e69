#![forbid(unsafe_code)]

//! Tracing integration tests.
//!
//! Resolution spans enabled:
//!   cargo test -p trellis-layout --features tracing --test tracing_tests
//!
//! Zero-overhead verification (no feature):
//!   cargo test -p trellis-layout --test tracing_tests -- zero_overhead

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use trellis_layout::{Grid, Rect, ResolutionContext, Scalar, Size, resolve};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

// ============================================================================
// Test Infrastructure
// ============================================================================

#[derive(Debug, Clone)]
struct CapturedSpan {
    name: String,
    fields: HashMap<String, String>,
    parent_name: Option<String>,
}

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    fields: HashMap<String, String>,
}

#[derive(Clone, Default)]
struct CaptureHandle {
    spans: Arc<Mutex<Vec<CapturedSpan>>>,
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl CaptureHandle {
    fn spans(&self) -> Vec<CapturedSpan> {
        self.spans.lock().unwrap().clone()
    }

    fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Value of `key` on the first span called `name`.
    fn span_field(&self, name: &str, key: &str) -> Option<String> {
        self.spans()
            .into_iter()
            .find(|s| s.name == name)
            .and_then(|s| s.fields.get(key).cloned())
    }

    /// Spans called `name` opened directly inside a span called `parent`.
    fn children_of(&self, parent: &str, name: &str) -> usize {
        self.spans()
            .iter()
            .filter(|s| s.name == name && s.parent_name.as_deref() == Some(parent))
            .count()
    }

    /// Value of `key` on the first event at `level` that carries it.
    fn event_field(&self, level: tracing::Level, key: &str) -> Option<String> {
        self.events()
            .into_iter()
            .filter(|e| e.level == level)
            .find_map(|e| e.fields.get(key).cloned())
    }
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0
            .push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

struct Capture(CaptureHandle);

impl<S> tracing_subscriber::Layer<S> for Capture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(Vec::new());
        attrs.record(&mut visitor);

        let parent_name = ctx
            .current_span()
            .id()
            .and_then(|id| ctx.span(id))
            .map(|span_ref| span_ref.name().to_string());

        self.0.spans.lock().unwrap().push(CapturedSpan {
            name: attrs.metadata().name().to_string(),
            fields: visitor.0.into_iter().collect(),
            parent_name,
        });
    }

    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        self.0.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            fields: visitor.0.into_iter().collect(),
        });
    }
}

fn with_captured<F>(f: F) -> CaptureHandle
where
    F: FnOnce(),
{
    let handle = CaptureHandle::default();
    let subscriber = tracing_subscriber::registry().with(Capture(handle.clone()));
    tracing::subscriber::with_default(subscriber, f);
    handle
}

fn ctx() -> ResolutionContext {
    ResolutionContext::uniform(Size::new(40, 20))
}

fn split_small_grid() {
    let grid = Grid::new()
        .rows([Scalar::flex(1)])
        .columns([Scalar::cells(5), Scalar::flex(1)]);
    let area = Rect::new(0, 0, 40, 10);
    grid.split(area, area.size()).unwrap();
}

// ============================================================================
// Tests
// ============================================================================

#[test]
#[cfg(feature = "tracing")]
fn resolve_span_records_inputs() {
    let handle = with_captured(|| {
        let tracks = [Scalar::cells(3), Scalar::flex(1), Scalar::cells(1)];
        resolve(&tracks, 20, 1, &ctx()).unwrap();
    });

    let field = |key| handle.span_field("resolve_tracks", key);
    assert_eq!(field("tracks").as_deref(), Some("3"));
    assert_eq!(field("total").as_deref(), Some("20"));
    assert_eq!(field("gutter").as_deref(), Some("1"));
}

#[test]
#[cfg(feature = "tracing")]
fn flex_pool_is_traced() {
    let handle = with_captured(|| {
        let tracks = [Scalar::flex(1), Scalar::flex(3)];
        resolve(&tracks, 20, 0, &ctx()).unwrap();
    });

    let field = |key| handle.event_field(tracing::Level::TRACE, key);
    assert_eq!(field("total_weight").as_deref(), Some("4"));
    assert_eq!(field("remaining").as_deref(), Some("20"));
}

#[test]
#[cfg(feature = "tracing")]
fn concrete_overflow_logs_debug() {
    let handle = with_captured(|| {
        let tracks = [Scalar::cells(30), Scalar::flex(1)];
        resolve(&tracks, 20, 0, &ctx()).unwrap();
    });

    assert_eq!(
        handle
            .event_field(tracing::Level::DEBUG, "consumed")
            .as_deref(),
        Some("30"),
        "expected a debug event for concrete overflow"
    );
}

#[test]
#[cfg(feature = "tracing")]
fn grid_split_nests_axis_spans() {
    let handle = with_captured(split_small_grid);

    assert_eq!(
        handle.span_field("grid_split", "cols").as_deref(),
        Some("2")
    );
    assert_eq!(
        handle.children_of("grid_split", "resolve_tracks"),
        2,
        "one resolve span per axis: {:?}",
        handle.spans()
    );
}

/// Without the `tracing` feature the macros expand to nothing, so a
/// subscriber sees none of the resolver's spans or events.
#[test]
#[cfg(not(feature = "tracing"))]
fn zero_overhead_when_disabled() {
    let handle = with_captured(|| {
        let tracks = [Scalar::cells(30), Scalar::flex(1)];
        resolve(&tracks, 20, 1, &ctx()).unwrap();
        split_small_grid();
    });

    assert_eq!(handle.span_field("resolve_tracks", "total"), None);
    assert_eq!(handle.children_of("grid_split", "resolve_tracks"), 0);
    assert_eq!(
        handle.event_field(tracing::Level::DEBUG, "consumed"),
        None
    );
    assert!(handle.spans().is_empty());
    assert!(handle.events().is_empty());
}
