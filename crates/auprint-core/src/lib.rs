//! Printer discovery and queue management for the AU print server.
//!
//! Everything here shells out: `smbclient` lists the server's shares and
//! doubles as the credential check, `lpstat`/`lpadmin`/`lpr` manage the
//! local CUPS queues.
//!
//! - **[`PrintSession`]**: authenticated session holding the credentials
//!   and the printer directory fetched at login. Installs, deletes,
//!   re-authenticates and prints through queues.
//! - **[`CommandRunner`]**: seam for running external programs.
//!   [`SystemRunner`] spawns processes, [`ScriptedRunner`] replays canned
//!   output.
//! - **[`BuildingTable`]**: building code ↔ name lookup and friendly
//!   install names.
//! - **Parsers** ([`directory`], [`registry`]): `smbclient -L` and
//!   `lpstat -v` output.

pub mod building;
pub mod config;
pub mod directory;
pub mod encode;
pub mod error;
pub mod model;
pub mod registry;
pub mod runner;
pub mod session;

// ── Primary re-exports ──────────────────────────────────────────────
pub use building::BuildingTable;
pub use config::{Credentials, ServerConfig, Tools, is_valid_auid, is_valid_password};
pub use error::CoreError;
pub use model::{LocalPrinterBinding, PrinterDirectory, RemotePrinter};
pub use runner::{CommandRunner, Invocation, ScriptedRunner, SystemRunner};
pub use session::PrintSession;
