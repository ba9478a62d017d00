//! Purpose: Library crate backing the `reqwire` CLI and embedding callers.
//! Exports: `api` (public surface), `core` (options, executor, transport seam, errors).
//! Role: One HTTP request per call over a caller-supplied transport, strict 200 validation.
//! Invariants: No state is kept between calls; concurrency safety is the transport's property.
//! Invariants: Core modules prefer explicit inputs/outputs over hidden state.
pub mod api;
pub mod core;
