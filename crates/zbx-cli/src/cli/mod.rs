use clap::Parser;
use zbx_core::enums::{GroupBy, ReportLayout};

pub mod global;

pub use global::{GlobalFlags, OutputFormat};

/// Command-line parser for the `zbx-audit` binary.
#[derive(Debug, Parser)]
#[command(
    name = "zbx-audit",
    version,
    about = "Report unsupported items and discovery rules of a Zabbix installation"
)]
pub struct Cli {
    /// Zabbix frontend URL, e.g. http://localhost/zabbix
    #[arg(long)]
    pub url: Option<String>,

    /// Login name (prompted when not configured)
    #[arg(short, long)]
    pub username: Option<String>,

    /// Group findings by: host, template, both
    #[arg(short, long)]
    pub group_by: Option<GroupBy>,

    /// Report layout: per-kind, combined
    #[arg(long)]
    pub layout: Option<ReportLayout>,

    /// Directory the CSV reports are written to
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Accept invalid TLS certificates
    #[arg(long)]
    pub insecure: bool,

    /// Send the session as an Authorization: Bearer header
    #[arg(long)]
    pub bearer_auth: bool,

    /// Summary format: table, json, raw
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,

    /// Quiet mode (errors only, no progress)
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long)]
    pub verbose: bool,
}

/// Values given on the command line that take precedence over configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub url: Option<String>,
    pub username: Option<String>,
    pub group_by: Option<GroupBy>,
    pub layout: Option<ReportLayout>,
    pub output_dir: Option<String>,
    pub timeout_secs: Option<u64>,
    pub accept_invalid_certs: bool,
    pub bearer_auth: bool,
}

impl Cli {
    #[must_use]
    pub const fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
        }
    }

    #[must_use]
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            url: self.url.clone(),
            username: self.username.clone(),
            group_by: self.group_by,
            layout: self.layout,
            output_dir: self.output_dir.clone(),
            timeout_secs: self.timeout,
            accept_invalid_certs: self.insecure,
            bearer_auth: self.bearer_auth,
        }
    }
}
