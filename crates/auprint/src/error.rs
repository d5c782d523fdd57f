//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use auprint_config::ConfigError;
use auprint_core::CoreError;

/// Exit codes for process termination.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const COMMAND: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(auprint::auth_failed),
        help("Check your AUID and password, and that print.uni.au.dk is reachable.")
    )]
    AuthFailed { message: String },

    // ── Printers ─────────────────────────────────────────────────────

    #[error("Printer '{name}' not found")]
    #[diagnostic(
        code(auprint::not_found),
        help("Run auprint again to pick from the printers the server lists.")
    )]
    PrinterNotFound { name: String },

    // ── External commands ────────────────────────────────────────────

    #[error("{program} failed: {detail}")]
    #[diagnostic(
        code(auprint::command_failed),
        help("Managing CUPS queues usually needs lpadmin rights (try sudo or the lpadmin group).")
    )]
    CommandFailed { program: String, detail: String },

    #[error("Could not run {program}")]
    #[diagnostic(
        code(auprint::missing_tool),
        help("Install it (smbclient comes with samba, lpadmin/lpr with cups) or point [tools] in the config at it.")
    )]
    MissingTool {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not resolve print server {host}: {reason}")]
    #[diagnostic(
        code(auprint::resolve),
        help("Check your network connection, or pin server.address in the config.")
    )]
    Resolve { host: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error(transparent)]
    #[diagnostic(code(auprint::config))]
    Config(Box<ConfigError>),

    // ── Interactive ──────────────────────────────────────────────────

    #[error("Prompt failed: {0}")]
    #[diagnostic(code(auprint::prompt))]
    Prompt(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::PrinterNotFound { .. } => exit_code::NOT_FOUND,
            Self::CommandFailed { .. } | Self::MissingTool { .. } => exit_code::COMMAND,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError / ConfigError → CliError mapping ──────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Authentication { message } => CliError::AuthFailed { message },
            CoreError::PrinterNotFound { name } => CliError::PrinterNotFound { name },
            CoreError::CommandFailed {
                program,
                code,
                stderr,
            } => CliError::CommandFailed {
                program,
                detail: match (code, stderr.is_empty()) {
                    (Some(c), true) => format!("exit status {c}"),
                    (Some(c), false) => format!("exit status {c}: {stderr}"),
                    (None, true) => "terminated by signal".into(),
                    (None, false) => stderr,
                },
            },
            CoreError::Spawn { program, source } => CliError::MissingTool { program, source },
            CoreError::AddressResolution { host, reason } => CliError::Resolve { host, reason },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Server(core) => core.into(),
            other => CliError::Config(Box::new(other)),
        }
    }
}
