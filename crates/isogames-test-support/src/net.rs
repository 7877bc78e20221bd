//! Network helpers for bootstrap tests.

use std::net::{Ipv4Addr, SocketAddr, TcpListener};

/// A loopback port held open for the lifetime of the value, so that any
/// other attempt to listen on it fails.
#[derive(Debug)]
pub struct OccupiedPort {
    listener: TcpListener,
}

impl OccupiedPort {
    /// Bind an ephemeral loopback port.
    ///
    /// # Panics
    ///
    /// Panics if no loopback port can be bound.
    #[must_use]
    pub fn bind() -> Self {
        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).unwrap();
        Self { listener }
    }

    /// Address held by this listener.
    ///
    /// # Panics
    ///
    /// Panics if the socket address cannot be read.
    #[must_use]
    pub fn addr(&self) -> SocketAddr {
        self.listener.local_addr().unwrap()
    }

    /// Port held by this listener.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.addr().port()
    }
}
