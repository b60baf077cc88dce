//! Command dispatch: bridges CLI args -> reconciler calls -> output formatting.

pub mod device;
pub mod monitor;
pub mod util;

use clap::CommandFactory;
use wug_config::Overrides;
use wug_core::ConnectionConfig;

use crate::cli::{Cli, Command, CompletionsArgs, GlobalOpts};
use crate::error::CliError;

/// Dispatch a command to the appropriate handler.
///
/// Completions never need a connection. Server-bound handlers validate
/// their manifest before authenticating, so a bad file never costs a
/// round trip.
pub async fn dispatch(cmd: Command, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Device(args) => device::handle(&connection_config(global)?, args, global).await,
        Command::Monitor(args) => monitor::handle(&connection_config(global)?, args, global).await,
        Command::Completions(args) => {
            completions(&args);
            Ok(())
        }
    }
}

fn completions(args: &CompletionsArgs) {
    let mut cmd = Cli::command();
    clap_complete::generate(args.shell, &mut cmd, "wug", &mut std::io::stdout());
}

/// Merge the config file, `WUG_*` variables, and command-line flags into
/// a validated connection config.
fn connection_config(global: &GlobalOpts) -> Result<ConnectionConfig, CliError> {
    let overrides = Overrides {
        url: global.url.clone(),
        user: global.user.clone(),
        password: global.password.clone(),
        allow_unverified_ssl: global.insecure.then_some(true),
        ca_cert: global.ca_cert.clone(),
        timeout: global.timeout,
    };

    let settings = wug_config::load_settings(global.config.as_deref(), &overrides)?;
    Ok(settings.into_connection()?)
}
