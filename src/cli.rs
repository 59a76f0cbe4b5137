//! CLI for this application
//!
use std::net::IpAddr;
use std::time::Duration;

use crate::config_error;
use crate::error::Result;
use crate::settings;

#[derive(Clone, Debug, clap::Parser)]
#[command(name = settings::APP_NAME, version = settings::APP_VERSION)]
pub struct Cli {
    // Server listen address
    #[clap(
        long,
        default_value = "0.0.0.0",
        env("ESPLUGIN_LISTEN_ADDRESS"),
        help = "IP Address to listen on"
    )]
    pub listen_address: String,

    // HTTP API listen port
    #[clap(
        long,
        default_value = settings::DEFAULT_PORT_HTTP,
        env("ESPLUGIN_LISTEN_PORT"),
        help = "Port to bind the plugin HTTP API to"
    )]
    pub listen_port: u16,

    // Timeout for one plugin call
    #[clap(
        long,
        default_value = settings::DEFAULT_CALL_TIMEOUT_SECONDS,
        env("ESPLUGIN_CALL_TIMEOUT_SECONDS"),
        help = "Maximum seconds one validation or tool call may take"
    )]
    pub call_timeout_seconds: u64,

    #[clap(long, env("ESPLUGIN_LOG_JSON"), help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl Cli {
    pub fn into_settings(self) -> Result<settings::Settings> {
        let listen_address = self
            .listen_address
            .parse::<IpAddr>()
            .map_err(|e| config_error!("Invalid listen address '{}': {}", self.listen_address, e))?;
        if self.call_timeout_seconds == 0 {
            return Err(config_error!("call timeout must be at least one second"));
        }
        Ok(settings::Settings {
            listen_address,
            listen_port: self.listen_port,
            call_timeout: Duration::from_secs(self.call_timeout_seconds),
            log_json: self.log_json,
        })
    }
}
