//! Workflow-command output
//!
//! The Actions runner scans stdout for `::command::message` lines. Log records
//! are rendered as those commands so levels map onto the runner's annotations.

use env_logger::{Env, Target};
use log::Level;
use std::io::{self, Write};

/// Default filter: everything from this workspace, warnings from dependencies
///
/// The runner hides `::debug::` lines unless step debugging is enabled.
const DEFAULT_FILTER: &str =
    "warn,setup_rome=debug,setup_rome_install=debug,setup_rome_core=debug";

/// Installs the logger; `RUST_LOG` overrides the default filter
pub fn init_logger() {
    env_logger::Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER))
        .target(Target::Stdout)
        .format(|buf, record| {
            let message = record.args().to_string();
            match command_for(record.level()) {
                Some(command) => writeln!(buf, "::{}::{}", command, escape_data(&message)),
                None => writeln!(buf, "{}", message),
            }
        })
        .init();
}

fn command_for(level: Level) -> Option<&'static str> {
    match level {
        Level::Error => Some("error"),
        Level::Warn => Some("warning"),
        Level::Info => None,
        Level::Debug | Level::Trace => Some("debug"),
    }
}

/// Escapes a workflow command message so it stays on one line
pub fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Collapsible section in the job log, closed on drop
pub struct LogGroup;

impl LogGroup {
    pub fn start(title: &str) -> Self {
        let _ = print_text(&format!("::group::{}", escape_data(title)));
        LogGroup
    }
}

impl Drop for LogGroup {
    fn drop(&mut self) {
        let _ = print_text("::endgroup::");
    }
}

/// Marks the step as failed with `message`
///
/// The caller exits with status 1 afterwards.
pub fn set_failed(message: &str) {
    let _ = print_text(&format!("::error::{}", escape_data(message)));
}

pub fn print_text(s: &str) -> io::Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "{s}")
}
