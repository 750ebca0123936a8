//! Connection status shared between the monitor and request handlers.
//!
//! The driver's topology monitoring owns every transition; handlers only
//! read. `StatusWatch` keeps the current value in an atomic so the read path
//! takes no locks and does no I/O.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

/// Lifecycle of the connection to the MongoDB deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ConnectionStatus {
    /// No usable connection (initial state, or monitoring reported a failure)
    Disconnected = 0,
    /// Monitoring has started but no heartbeat has succeeded yet
    Connecting = 1,
    /// The deployment answered a heartbeat
    Connected = 2,
    /// Shutdown is closing the client
    Disconnecting = 3,
}

impl ConnectionStatus {
    /// Whether this status maps to the healthy HTTP response.
    pub fn is_connected(self) -> bool {
        matches!(self, ConnectionStatus::Connected)
    }

    fn from_u8(value: u8) -> Self {
        match value {
            1 => ConnectionStatus::Connecting,
            2 => ConnectionStatus::Connected,
            3 => ConnectionStatus::Disconnecting,
            _ => ConnectionStatus::Disconnected,
        }
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConnectionStatus::Disconnected => "disconnected",
            ConnectionStatus::Connecting => "connecting",
            ConnectionStatus::Connected => "connected",
            ConnectionStatus::Disconnecting => "disconnecting",
        };
        f.write_str(name)
    }
}

/// Shared handle to the current connection status.
///
/// Clones observe the same cell. The monitor writes, handlers read; the
/// initial value is `Disconnected`.
#[derive(Debug, Clone, Default)]
pub struct StatusWatch {
    inner: Arc<AtomicU8>,
}

impl StatusWatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current status.
    pub fn current(&self) -> ConnectionStatus {
        ConnectionStatus::from_u8(self.inner.load(Ordering::Relaxed))
    }

    /// Record a new status, returning the one it replaced.
    pub fn store(&self, status: ConnectionStatus) -> ConnectionStatus {
        ConnectionStatus::from_u8(self.inner.swap(status as u8, Ordering::Relaxed))
    }

    /// Move from `Disconnected` to `Connecting`. Returns whether the
    /// transition happened; any other current status is left alone so a
    /// server opening inside an established topology cannot regress it.
    pub(crate) fn mark_connecting(&self) -> bool {
        self.inner
            .compare_exchange(
                ConnectionStatus::Disconnected as u8,
                ConnectionStatus::Connecting as u8,
                Ordering::Relaxed,
                Ordering::Relaxed,
            )
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_status_is_disconnected() {
        let watch = StatusWatch::new();
        assert_eq!(watch.current(), ConnectionStatus::Disconnected);
    }

    #[test]
    fn test_store_returns_previous_status() {
        let watch = StatusWatch::new();

        let previous = watch.store(ConnectionStatus::Connected);
        assert_eq!(previous, ConnectionStatus::Disconnected);
        assert_eq!(watch.current(), ConnectionStatus::Connected);
    }

    #[test]
    fn test_clones_share_the_same_cell() {
        let watch = StatusWatch::new();
        let observer = watch.clone();

        watch.store(ConnectionStatus::Connected);
        assert_eq!(observer.current(), ConnectionStatus::Connected);
    }

    #[test]
    fn test_mark_connecting_upgrades_from_disconnected_only() {
        let watch = StatusWatch::new();
        assert!(watch.mark_connecting());
        assert_eq!(watch.current(), ConnectionStatus::Connecting);

        watch.store(ConnectionStatus::Connected);
        assert!(!watch.mark_connecting());
        assert_eq!(watch.current(), ConnectionStatus::Connected);
    }

    #[test]
    fn test_only_connected_counts_as_connected() {
        assert!(ConnectionStatus::Connected.is_connected());
        for status in [
            ConnectionStatus::Disconnected,
            ConnectionStatus::Connecting,
            ConnectionStatus::Disconnecting,
        ] {
            assert!(!status.is_connected());
        }
    }

    #[test]
    fn test_display_names_are_lowercase() {
        assert_eq!(ConnectionStatus::Disconnected.to_string(), "disconnected");
        assert_eq!(ConnectionStatus::Connecting.to_string(), "connecting");
        assert_eq!(ConnectionStatus::Connected.to_string(), "connected");
        assert_eq!(ConnectionStatus::Disconnecting.to_string(), "disconnecting");
    }
}
