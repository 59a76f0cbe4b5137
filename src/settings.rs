//! esplugin application settings
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const STANDARD_PORT_HTTP: u16 = 8420;
pub const DEFAULT_PORT_HTTP: &str = "8420";
pub const DEFAULT_CALL_TIMEOUT_SECONDS: &str = "60";

#[derive(Clone, Debug)]
pub struct Settings {
    // Server listen address
    pub listen_address: IpAddr,

    // HTTP API listen port
    pub listen_port: u16,

    // Upper bound on one plugin call (validation or tool invocation)
    pub call_timeout: Duration,

    // Emit logs as JSON lines
    pub log_json: bool,
}

impl Settings {
    pub fn socket_address(&self) -> SocketAddr {
        SocketAddr::from((self.listen_address, self.listen_port))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            listen_address: IpAddr::from([0, 0, 0, 0]),
            listen_port: STANDARD_PORT_HTTP,
            call_timeout: Duration::from_secs(60),
            log_json: false,
        }
    }
}
