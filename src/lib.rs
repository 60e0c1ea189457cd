// SUNAT Lookup - Core Library
// Exposes all modules for use in CLI, API server, and tests

pub mod config;
pub mod endpoint;
pub mod external;
pub mod lookup;
pub mod record;
pub mod store;
pub mod validation;

// Only compile the HTTP surface when the server feature is enabled
#[cfg(feature = "server")]
pub mod server;

// Re-export commonly used types
pub use config::Config;
pub use endpoint::{handle, QueryParams, QueryResponse, NAME_SEARCH_DISCLAIMER, NOT_FOUND_MESSAGE};
pub use external::{ApisNetPeClient, ExternalResult, OfflineSource, RegistrySource};
pub use lookup::LookupService;
pub use record::{DataSource, Record};
pub use store::{RecordStore, StoreError};
pub use validation::{validate, QueryKind, ValidationError, MAX_VALUE_CHARS};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Install the tracing subscriber shared by both binaries
pub fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sunat_lookup=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
