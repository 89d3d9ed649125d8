//! Command dispatcher
//!
//! Routes parsed CLI commands to their handlers, wiring in the concrete
//! transport, command runner, and reporter.

use crate::cli::args::{Cli, Command};
use crate::commands::install::{self, FailurePolicy, InstallOptions};
use crate::commands::search::{self, SearchOptions};
use crate::constants::COMMAND_TIMEOUT_SECS;
use crate::error::Result;
use crate::remote::HttpSource;
use crate::system::SystemRunner;
use crate::ui::ConsoleReporter;
use std::time::Duration;

pub fn dispatch(args: &Cli) -> Result<()> {
    match &args.command {
        Command::Install {
            name,
            to,
            keep_going,
        } => {
            let remote = HttpSource::new()?;
            let runner = SystemRunner::new(Duration::from_secs(COMMAND_TIMEOUT_SECS));
            let policy = if *keep_going {
                FailurePolicy::Continue
            } else {
                FailurePolicy::Abort
            };

            install::run(
                &remote,
                &runner,
                &ConsoleReporter,
                &InstallOptions {
                    name: name.clone(),
                    to: to.clone(),
                    policy,
                },
            )?;
            Ok(())
        }

        Command::Search { query } => {
            let remote = HttpSource::new()?;
            search::run(
                &remote,
                &ConsoleReporter,
                &SearchOptions {
                    query: query.join(" "),
                },
            )?;
            Ok(())
        }
    }
}
