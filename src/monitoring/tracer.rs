/*!
 * Structured Tracing
 * Subscriber setup and the per-session span used by the driver
 */

use std::time::Instant;
use tracing::{info, span, Level};
use tracing_subscriber::{fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

pub const ENV_TRACE_JSON: &str = "INTERLEAVE_TRACE_JSON";

/// Initialize structured tracing
///
/// Logs go to stderr so the board on stdout stays readable.
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - INTERLEAVE_TRACE_JSON: Enable JSON output (default: false)
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var(ENV_TRACE_JSON)
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .init();
        info!("Structured tracing initialized with JSON output");
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .init();
        info!("Structured tracing initialized");
    }
}

/// Generate a unique run id for session correlation
pub fn generate_run_id() -> String {
    Uuid::new_v4().to_string()
}

/// Span covering one driver session, from first tick to shutdown
pub struct SessionSpan {
    span: tracing::Span,
    start: Instant,
    run_id: String,
}

impl SessionSpan {
    pub fn new(task_count: usize) -> Self {
        let run_id = generate_run_id();
        let span = span!(
            Level::INFO,
            "session",
            run_id = %run_id,
            tasks = task_count,
            ticks = tracing::field::Empty,
            completions = tracing::field::Empty,
        );

        Self {
            span,
            start: Instant::now(),
            run_id,
        }
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Record final counters before the span closes
    pub fn record_totals(&self, ticks: u64, completions: u64) {
        self.span.record("ticks", ticks);
        self.span.record("completions", completions);
    }

    pub fn span(&self) -> &tracing::Span {
        &self.span
    }
}

impl Drop for SessionSpan {
    fn drop(&mut self) {
        let _entered = self.span.enter();
        info!(
            run_id = %self.run_id,
            duration_ms = self.start.elapsed().as_millis() as u64,
            "session finished"
        );
    }
}
