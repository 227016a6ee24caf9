//! Runtime settings of the relay.

use std::time::Duration;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3002;
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
pub const DEFAULT_OUTBOUND_BUFFER: usize = 256;
pub const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_WRITE_TIMEOUT_SECS: u64 = 10;

/// Settings shared by every connection handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    /// Single origin allowed by CORS
    pub cors_origin: String,
    /// Capacity of each connection's outbound queue
    pub outbound_buffer: usize,
    /// Close a connection that sends nothing for this long (`None` = never)
    pub idle_timeout: Option<Duration>,
    /// Close a connection whose socket write stalls for this long
    pub write_timeout: Duration,
}

impl RelayConfig {
    /// Build from raw CLI values. `idle_timeout_secs == 0` disables the idle timeout.
    pub fn from_secs(
        cors_origin: String,
        outbound_buffer: usize,
        idle_timeout_secs: u64,
        write_timeout_secs: u64,
    ) -> Self {
        Self {
            cors_origin,
            // mpsc::channel panics on zero capacity
            outbound_buffer: outbound_buffer.max(1),
            idle_timeout: (idle_timeout_secs > 0).then(|| Duration::from_secs(idle_timeout_secs)),
            write_timeout: Duration::from_secs(write_timeout_secs.max(1)),
        }
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self::from_secs(
            DEFAULT_CORS_ORIGIN.to_string(),
            DEFAULT_OUTBOUND_BUFFER,
            DEFAULT_IDLE_TIMEOUT_SECS,
            DEFAULT_WRITE_TIMEOUT_SECS,
        )
    }
}
