//! Observability setup for the chatbot backend: the global tracing
//! subscriber and optional OpenTelemetry export.

pub mod tracing_setup;
