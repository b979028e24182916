//! Opt-in `tracing` setup for hosts embedding the scatter renderer.
//!
//! Draw passes emit `trace!`/`debug!` events describing skip decisions
//! (degenerate series, density gate, culled highlights). Nothing is printed
//! unless the host installs a subscriber, either its own or one of the helpers
//! below.

/// Filter used by [`init_default_tracing`] when `RUST_LOG` is not set.
pub const DEFAULT_TRACING_FILTER: &str = "scatter_rs=info";

/// Installs a compact fmt subscriber filtered by `RUST_LOG`, falling back to
/// [`DEFAULT_TRACING_FILTER`].
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber already exists.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_TRACING_FILTER));
        return install_fmt_subscriber(filter);
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}

/// Installs a compact fmt subscriber with an explicit filter directive such as
/// `"scatter_rs=trace"`, ignoring `RUST_LOG`.
#[must_use]
pub fn init_tracing_with_filter(directive: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        return install_fmt_subscriber(tracing_subscriber::EnvFilter::new(directive));
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = directive;
        false
    }
}

#[cfg(feature = "telemetry")]
fn install_fmt_subscriber(filter: tracing_subscriber::EnvFilter) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .try_init()
        .is_ok()
}
