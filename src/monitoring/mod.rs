/*!
 * Monitoring
 * Structured logging setup for applications and tests using this crate
 */

mod tracer;

pub use tracer::{init_test_tracing, init_tracing, TRACE_JSON_ENV};
