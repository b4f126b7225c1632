//! Client statistics tracking.
//!
//! This module provides thread-safe counters for errors and informational
//! events produced by the request pipeline.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::{ErrorKind, InfoType};

/// Thread-safe client statistics tracker.
///
/// Every `ErrorKind` and `InfoType` has a counter initialized to zero on
/// creation, so increments never allocate. The struct can be shared across
/// tasks through `Arc`.
#[derive(Debug)]
pub struct ClientStats {
    errors: HashMap<ErrorKind, AtomicUsize>,
    info: HashMap<InfoType, AtomicUsize>,
}

impl ClientStats {
    pub fn new() -> Self {
        let errors = ErrorKind::iter()
            .map(|kind| (kind, AtomicUsize::new(0)))
            .collect();
        let info = InfoType::iter()
            .map(|info_type| (info_type, AtomicUsize::new(0)))
            .collect();

        ClientStats { errors, info }
    }

    pub fn increment_error(&self, kind: ErrorKind) {
        self.add_error(kind, 1);
    }

    pub fn increment_info(&self, info_type: InfoType) {
        self.add_info(info_type, 1);
    }

    pub fn add_error(&self, kind: ErrorKind, amount: usize) {
        if let Some(counter) = self.errors.get(&kind) {
            counter.fetch_add(amount, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment error counter for {:?} which is not in the map",
                kind
            );
        }
    }

    pub fn add_info(&self, info_type: InfoType, amount: usize) {
        if let Some(counter) = self.info.get(&info_type) {
            counter.fetch_add(amount, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment info counter for {:?} which is not in the map",
                info_type
            );
        }
    }

    pub fn get_error_count(&self, kind: ErrorKind) -> usize {
        self.errors
            .get(&kind)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    pub fn get_info_count(&self, info_type: InfoType) -> usize {
        self.info
            .get(&info_type)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    pub fn total_errors(&self) -> usize {
        ErrorKind::iter().map(|k| self.get_error_count(k)).sum()
    }

    /// Logs every non-zero counter at info level.
    pub fn log_summary(&self) {
        for kind in ErrorKind::iter() {
            let count = self.get_error_count(kind);
            if count > 0 {
                log::info!("{}: {}", kind, count);
            }
        }
        for info_type in InfoType::iter() {
            let count = self.get_info_count(info_type);
            if count > 0 {
                log::info!("{}: {}", info_type, count);
            }
        }
    }
}

impl Default for ClientStats {
    fn default() -> Self {
        Self::new()
    }
}
