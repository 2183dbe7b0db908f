//! Process configuration.
//!
//! Everything is taken from the command line and frozen into a [`Config`]
//! before the listener starts. There is no configuration file.

use clap::Parser;

/// Command-line arguments for the mock server
#[derive(Parser, Debug)]
#[command(name = "mock-upsd")]
#[command(version)]
#[command(about = "A mock NUT server answering a fixed set of upsd queries", long_about = None)]
pub struct CliArgs {
    /// Host to bind to (all interfaces by default)
    #[arg(long, default_value = Config::DEFAULT_HOST)]
    pub host: String,

    /// TCP port to listen on
    #[arg(short, long, default_value_t = Config::DEFAULT_PORT)]
    pub port: u16,

    /// Maximum bytes buffered for a single request line before the client is dropped
    #[arg(long, default_value_t = Config::DEFAULT_MAX_LINE_BYTES)]
    pub max_line_bytes: usize,

    /// Name of the single UPS the server knows about
    #[arg(long, default_value = Config::DEFAULT_UPS_NAME)]
    pub ups_name: String,

    /// Description reported for the UPS in `LIST UPS`
    #[arg(long, default_value = Config::DEFAULT_UPS_DESCRIPTION)]
    pub ups_description: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub max_line_bytes: usize,
    pub ups_name: String,
    pub ups_description: String,
    pub log_level: String,
}

impl Config {
    pub const DEFAULT_HOST: &'static str = "0.0.0.0";
    pub const DEFAULT_PORT: u16 = 3493;
    pub const DEFAULT_MAX_LINE_BYTES: usize = 4096;
    pub const DEFAULT_UPS_NAME: &'static str = "alpha";
    pub const DEFAULT_UPS_DESCRIPTION: &'static str = "desc 1";

    /// Parse the process arguments.
    pub fn load() -> anyhow::Result<Self> {
        Self::from_args(CliArgs::parse())
    }

    pub fn from_args(args: CliArgs) -> anyhow::Result<Self> {
        if args.max_line_bytes == 0 {
            anyhow::bail!("--max-line-bytes must be greater than zero");
        }
        if args.ups_name.is_empty() || args.ups_name.chars().any(char::is_whitespace) {
            anyhow::bail!(
                "--ups-name must be a single word, got {:?}",
                args.ups_name
            );
        }

        Ok(Self {
            host: args.host,
            port: args.port,
            max_line_bytes: args.max_line_bytes,
            ups_name: args.ups_name,
            ups_description: args.ups_description,
            log_level: args.log_level,
        })
    }

    /// Address string suitable for `TcpListener::bind`.
    pub fn listen_addr(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: Self::DEFAULT_HOST.to_string(),
            port: Self::DEFAULT_PORT,
            max_line_bytes: Self::DEFAULT_MAX_LINE_BYTES,
            ups_name: Self::DEFAULT_UPS_NAME.to_string(),
            ups_description: Self::DEFAULT_UPS_DESCRIPTION.to_string(),
            log_level: "info".to_string(),
        }
    }
}
