//! Observability setup for Hemonet.

pub mod tracing_setup;
