//! Error handling and client statistics.
//!
//! This module provides:
//! - The `ClientError` taxonomy returned by the request pipeline
//! - Categorization of transport library errors
//! - Thread-safe counters for errors and pipeline events

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::categorize_reqwest_error;
pub use stats::ClientStats;
pub use types::{ClientError, ErrorKind, InfoType, InitializationError, TransportErrorKind};

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_client_stats_initialization() {
        let stats = ClientStats::new();
        for kind in ErrorKind::iter() {
            assert_eq!(stats.get_error_count(kind), 0);
        }
        for info_type in InfoType::iter() {
            assert_eq!(stats.get_info_count(info_type), 0);
        }
        assert_eq!(stats.total_errors(), 0);
    }

    #[test]
    fn test_client_stats_increment() {
        let stats = ClientStats::new();
        stats.increment_error(ErrorKind::MissingLocation);
        assert_eq!(stats.get_error_count(ErrorKind::MissingLocation), 1);

        stats.increment_info(InfoType::ClientRedirect);
        stats.add_info(InfoType::TransportRedirect, 3);
        assert_eq!(stats.get_info_count(InfoType::ClientRedirect), 1);
        assert_eq!(stats.get_info_count(InfoType::TransportRedirect), 3);
    }

    #[test]
    fn test_client_stats_total_errors() {
        let stats = ClientStats::new();
        stats.increment_error(ErrorKind::Transport);
        stats.increment_error(ErrorKind::Transport);
        stats.increment_error(ErrorKind::MalformedResponse);
        assert_eq!(stats.total_errors(), 3);
    }

    #[test]
    fn test_client_stats_concurrent_increments() {
        use std::sync::Arc;
        use std::thread;

        let stats = Arc::new(ClientStats::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let stats = Arc::clone(&stats);
                thread::spawn(move || {
                    for _ in 0..100 {
                        stats.increment_info(InfoType::ResponseParsed);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("worker thread panicked");
        }
        assert_eq!(stats.get_info_count(InfoType::ResponseParsed), 800);
    }

    #[test]
    fn test_error_kind_mapping() {
        assert_eq!(
            ClientError::RedirectLimitExceeded { max: 3 }.kind(),
            ErrorKind::RedirectLimitExceeded
        );
        assert_eq!(
            ClientError::MissingLocation { status: 302 }.kind(),
            ErrorKind::MissingLocation
        );
        assert_eq!(
            ClientError::UnsupportedProtocolVersion("3.0".into()).kind(),
            ErrorKind::UnsupportedProtocolVersion
        );
        assert_eq!(
            ClientError::Transport {
                kind: TransportErrorKind::Timeout,
                message: "operation timed out".into(),
            }
            .kind(),
            ErrorKind::Transport
        );
    }

    #[test]
    fn test_error_messages() {
        let err = ClientError::Transport {
            kind: TransportErrorKind::Connect,
            message: "connection refused".into(),
        };
        assert_eq!(
            err.to_string(),
            "Transport error: (connect) connection refused"
        );
        assert_eq!(
            ClientError::MissingLocation { status: 301 }.to_string(),
            "Redirect response 301 has no Location header"
        );
    }
}
