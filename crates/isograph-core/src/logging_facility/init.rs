//! Logging initialization

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Logging profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output, `isograph=debug`
    Development,
    /// JSON lines, `isograph=info`
    Production,
    /// Bare registry; tests install the capture layer instead
    Test,
}

impl Profile {
    fn default_directive(self) -> &'static str {
        match self {
            Profile::Development => "isograph=debug",
            Profile::Production => "isograph=info",
            Profile::Test => "off",
        }
    }
}

static INIT_ONCE: Once = Once::new();

/// Install the global subscriber for `profile`
///
/// Only the first call has any effect. `RUST_LOG` overrides the profile's
/// default directive. Output goes to stderr.
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        let filter = || {
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(profile.default_directive()))
        };
        // try_init: a test harness may already own the global dispatcher
        let _ = match profile {
            Profile::Development => tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(filter())
                .finish()
                .try_init(),
            Profile::Production => tracing_subscriber::fmt()
                .json()
                .with_writer(std::io::stderr)
                .with_env_filter(filter())
                .finish()
                .try_init(),
            Profile::Test => tracing_subscriber::registry().try_init(),
        };
    });
}
