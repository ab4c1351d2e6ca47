/*!
 * Monitoring Module
 * Tracing setup for the driver binary
 */

pub mod tracer;

pub use tracer::{generate_run_id, init_tracing, SessionSpan};
