//! Observability module for logging.

mod tracing;

pub use self::tracing::{TracingError, env_filter, init_tracing};
