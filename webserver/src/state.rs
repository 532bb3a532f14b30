//! Webserver state management
//!
//! Process-level facts about the running server. Timetable data lives in the
//! engine, not here.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

/// Core webserver state
#[derive(Debug)]
pub struct WebServerState {
    pub bind_address: SocketAddr,
    pub is_running: Arc<AtomicBool>,
    pub server_start_time: Instant,
}

impl WebServerState {
    pub fn new(bind_address: SocketAddr) -> Self {
        Self {
            bind_address,
            is_running: Arc::new(AtomicBool::new(true)),
            server_start_time: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.server_start_time.elapsed().as_secs()
    }

    pub fn is_running(&self) -> bool {
        self.is_running.load(Ordering::Relaxed)
    }

    pub fn set_running(&self, running: bool) {
        self.is_running.store(running, Ordering::Relaxed);
    }
}
