// ── Core error types ──
//
// Domain errors from auprint-core. Callers see authentication and
// not-found conditions as tagged variants; everything else that goes
// wrong with an external program is a `CommandFailed` or `Spawn`.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Lookup ───────────────────────────────────────────────────────
    #[error("Printer not found: {name}")]
    PrinterNotFound { name: String },

    // ── External commands ────────────────────────────────────────────
    #[error("`{program}` exited with {}: {stderr}", exit_label(*.code))]
    CommandFailed {
        program: String,
        /// Exit code, `None` when the process was killed by a signal.
        code: Option<i32>,
        stderr: String,
    },

    #[error("Could not run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    // ── Server address ───────────────────────────────────────────────
    #[error("Could not resolve print server {host}: {reason}")]
    AddressResolution { host: String, reason: String },
}

fn exit_label(code: Option<i32>) -> String {
    code.map_or_else(|| "no exit code".into(), |c| format!("status {c}"))
}

impl CoreError {
    /// Shorthand for a [`CoreError::PrinterNotFound`].
    pub fn printer_not_found(name: impl Into<String>) -> Self {
        Self::PrinterNotFound { name: name.into() }
    }

    /// Returns `true` for errors the login loop recovers from.
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }
}
