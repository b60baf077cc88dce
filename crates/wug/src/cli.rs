//! Clap derive structures for the `wug` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// wug -- reconcile WhatsUp Gold devices and monitors
#[derive(Debug, Parser)]
#[command(
    name = "wug",
    version,
    about = "Reconcile WhatsUp Gold devices and monitors from desired-state manifests",
    long_about = "Create, read, refresh, and delete WhatsUp Gold devices and monitor\n\
        assignments through the REST API.\n\n\
        Every attribute is immutable: a change is applied by deleting the\n\
        object and creating it again from the manifest.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file (defaults to the platform config directory)
    #[arg(long, env = "WUG_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// API root URL, e.g. https://wug.example.net:9644/api/v1
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// API user name
    #[arg(long, short = 'u', global = true)]
    pub user: Option<String>,

    /// API password
    #[arg(long, global = true)]
    pub password: Option<String>,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', global = true)]
    pub insecure: bool,

    /// PEM bundle to trust in addition to the system store
    #[arg(long, global = true)]
    pub ca_cert: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "WUG_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Field/value table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage devices created from templates
    #[command(alias = "dev", alias = "d")]
    Device(DeviceArgs),

    /// Manage monitor assignments on devices
    #[command(alias = "mon", alias = "m")]
    Monitor(MonitorArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared arguments ─────────────────────────────────────────────────

/// Desired-state manifest (.toml, .yaml, .yml, or .json).
#[derive(Debug, Args)]
pub struct ManifestArg {
    /// Desired-state manifest file
    #[arg(long = "file", short = 'f', value_name = "PATH")]
    pub path: PathBuf,
}

// ── Devices ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DeviceArgs {
    #[command(subcommand)]
    pub command: DeviceCommand,
}

#[derive(Debug, Subcommand)]
pub enum DeviceCommand {
    /// Apply a device template and read the new device back
    Create(ManifestArg),

    /// Read a device's current state
    #[command(alias = "get")]
    Read {
        /// Device ID
        id: String,
        #[command(flatten)]
        manifest: ManifestArg,
    },

    /// Refresh a device's state (attributes are immutable; nothing is sent)
    Update {
        /// Device ID
        id: String,
        #[command(flatten)]
        manifest: ManifestArg,
    },

    /// Delete a device
    #[command(alias = "rm")]
    Delete {
        /// Device ID
        id: String,
    },
}

// ── Monitors ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct MonitorArgs {
    #[command(subcommand)]
    pub command: MonitorCommand,
}

#[derive(Debug, Subcommand)]
pub enum MonitorCommand {
    /// Assign a monitor to a device and read the assignment back
    Create(ManifestArg),

    /// Read a monitor assignment's current state
    #[command(alias = "get")]
    Read {
        /// Assignment ID
        id: String,
        #[command(flatten)]
        manifest: ManifestArg,
    },

    /// Refresh a monitor assignment (attributes are immutable; nothing is sent)
    Update {
        /// Assignment ID
        id: String,
        #[command(flatten)]
        manifest: ManifestArg,
    },

    /// Remove a monitor assignment from its device
    #[command(alias = "rm")]
    Delete {
        /// Assignment ID
        id: String,

        /// Device the monitor is assigned to
        #[arg(long)]
        device_id: String,
    },

    /// Find a monitor type in the library by name
    Lookup {
        /// Monitor kind to search
        #[arg(long = "type", value_enum)]
        kind: MonitorKind,

        /// Search term matched against monitor names
        #[arg(long)]
        search: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MonitorKind {
    Active,
    Performance,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_tree_is_consistent() {
        Cli::command().debug_assert();
    }
}
