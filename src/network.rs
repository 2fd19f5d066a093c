//! Network availability check run before any retrieval

use std::time::Duration;

#[cfg(feature = "fetch")]
use tracing::{debug, info, warn};

/// Reports whether the network came up within a timeout
#[allow(async_fn_in_trait)]
pub trait Connectivity {
    async fn connect(&mut self, timeout: Duration) -> bool;
}

/// For offline renders from saved data
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConnected;

impl Connectivity for AlwaysConnected {
    async fn connect(&mut self, _timeout: Duration) -> bool {
        true
    }
}

/// Polls a TCP endpoint until it accepts a connection or the timeout runs out
#[cfg(feature = "fetch")]
#[derive(Debug, Clone)]
pub struct TcpProbe {
    addr: String,
    retry_interval: Duration,
}

#[cfg(feature = "fetch")]
impl TcpProbe {
    pub fn new(addr: impl Into<String>) -> Self {
        Self {
            addr: addr.into(),
            retry_interval: Duration::from_millis(500),
        }
    }

    pub fn with_retry_interval(mut self, interval: Duration) -> Self {
        self.retry_interval = interval;
        self
    }
}

#[cfg(feature = "fetch")]
impl Connectivity for TcpProbe {
    async fn connect(&mut self, timeout: Duration) -> bool {
        use tokio::net::TcpStream;
        use tokio::time::{Instant, sleep, timeout as within};

        let deadline = Instant::now() + timeout;
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }

            match within(remaining, TcpStream::connect(self.addr.as_str())).await {
                Ok(Ok(_)) => {
                    info!(addr = %self.addr, attempt, "Network connection ok");
                    return true;
                }
                Ok(Err(e)) => {
                    debug!(addr = %self.addr, attempt, error = %e, "Connect attempt failed")
                }
                Err(_) => break,
            }

            let pause = self
                .retry_interval
                .min(deadline.saturating_duration_since(Instant::now()));
            sleep(pause).await;
        }

        warn!(
            addr = %self.addr,
            ?timeout,
            attempts = attempt,
            "Network connection failed, timeout"
        );
        false
    }
}
