//! # Observability & Tracing
//!
//! Every client operation runs in a span named after the method, with the entity kind as a
//! field. The in-process catalog logs each state change at `info` and every rejected request at
//! `warn`. Envelope and payload details are only emitted at `debug`.
//!
//! ```bash
//! # State changes only
//! RUST_LOG=info cargo run
//!
//! # Include request dispatch, resolved URLs and page sizes
//! RUST_LOG=debug cargo run
//!
//! # Only the framework crate
//! RUST_LOG=entity_client=debug cargo run
//! ```
//!
//! With `RUST_LOG=info` a create, publish and withdraw against the in-process catalog reads:
//!
//! ```text
//! INFO Catalog started
//! INFO Created type_name="Topic" guid=5b0c... qualified_name=orders size=1
//! INFO Published type_name="Topic" guid=5b0c...
//! INFO Withdrawn type_name="Topic" guid=5b0c...
//! ```

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG`.
///
/// Call once, at the start of `main`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
