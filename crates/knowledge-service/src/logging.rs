//! Tracing initialization for hosts of the knowledge service.
//!
//! `RUST_LOG` wins when set; otherwise the configured log level applies.

use tracing_subscriber::EnvFilter;

use knowledge_types::KnowledgeConfig;

/// Install the global tracing subscriber.
///
/// Safe to call more than once: later calls are no-ops, so embedding
/// hosts and tests can both initialize defensively.
pub fn init_logging(config: &KnowledgeConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_is_idempotent() {
        let config = KnowledgeConfig::default();
        init_logging(&config);
        // A second call must not panic on the already-set subscriber
        init_logging(&config);
    }
}
