// ── Print session ──
//
// An authenticated session against the print server. Owns the runner,
// server config and credentials, and caches the printer directory
// fetched while authenticating. All queue lifecycle operations live here.

use std::net::IpAddr;
use std::path::Path;

use tracing::info;

use crate::config::{Credentials, ServerConfig};
use crate::directory::list_remote;
use crate::encode::encode_password;
use crate::error::CoreError;
use crate::model::{LocalPrinterBinding, PrinterDirectory, RemotePrinter};
use crate::registry::list_local;
use crate::runner::CommandRunner;

/// Authenticated session: credentials that the server accepted plus the
/// directory it returned.
#[derive(Debug)]
pub struct PrintSession<R> {
    runner: R,
    server: ServerConfig,
    credentials: Credentials,
    printers: PrinterDirectory,
}

impl<R: CommandRunner> PrintSession<R> {
    /// Authenticate by listing the server's printers.
    ///
    /// Fails with [`CoreError::Authentication`] when the listing fails.
    pub fn connect(
        runner: R,
        server: ServerConfig,
        credentials: Credentials,
    ) -> Result<Self, CoreError> {
        let printers = list_remote(&runner, &server, &credentials)?;
        Ok(Self {
            runner,
            server,
            credentials,
            printers,
        })
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Printers fetched when the session was opened.
    pub fn remote_printers(&self) -> &PrinterDirectory {
        &self.printers
    }

    /// Remote printers whose name starts with `prefix`.
    pub fn printers_with_prefix(&self, prefix: &str) -> Vec<RemotePrinter> {
        self.printers.with_prefix(prefix)
    }

    /// Fetch the directory again with the session's credentials.
    pub fn refresh(&mut self) -> Result<&PrinterDirectory, CoreError> {
        self.printers = list_remote(&self.runner, &self.server, &self.credentials)?;
        Ok(&self.printers)
    }

    /// Local queues currently bound to the print server.
    pub fn local_printers(&self) -> Vec<LocalPrinterBinding> {
        list_local(&self.runner, &self.server)
    }

    // ── Queue URL ────────────────────────────────────────────────────

    /// Device URL for share `name`: `smb://DOMAIN\auid:password@ip/name`.
    ///
    /// IPv6 addresses are bracketed.
    pub fn printer_url(&self, name: &str) -> String {
        let host = match self.server.address {
            IpAddr::V4(ip) => ip.to_string(),
            IpAddr::V6(ip) => format!("[{ip}]"),
        };
        format!(
            "smb://{}\\{}:{}@{host}/{name}",
            self.server.domain,
            self.credentials.auid,
            encode_password(self.credentials.expose_password()),
        )
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Create and enable a local queue `install_name` for share `name`.
    pub fn install(&self, name: &str, install_name: &str) -> Result<(), CoreError> {
        if !self.printers.contains(name) {
            return Err(CoreError::printer_not_found(name));
        }

        self.lpadmin(&[
            "-p".into(),
            install_name.into(),
            "-E".into(),
            "-P".into(),
            self.server.ppd.display().to_string(),
            "-v".into(),
            self.printer_url(name),
        ])?;
        info!(printer = name, install_name, "installed printer");
        Ok(())
    }

    /// Point queue `install_name` at share `name` with the current
    /// credentials. The share is not checked against the directory.
    pub fn update_authentication(&self, name: &str, install_name: &str) -> Result<(), CoreError> {
        self.lpadmin(&[
            "-p".into(),
            install_name.into(),
            "-v".into(),
            self.printer_url(name),
        ])?;
        info!(printer = name, install_name, "updated printer credentials");
        Ok(())
    }

    /// Remove local queue `install_name`.
    pub fn delete(&self, install_name: &str) -> Result<(), CoreError> {
        self.require_local(install_name)?;
        self.lpadmin(&["-x".into(), install_name.into()])?;
        info!(install_name, "deleted printer");
        Ok(())
    }

    /// Submit `file` to local queue `install_name`.
    pub fn print(&self, install_name: &str, file: &Path) -> Result<(), CoreError> {
        self.require_local(install_name)?;
        let args = vec![
            "-E".into(),
            "-P".into(),
            install_name.into(),
            file.display().to_string(),
        ];
        self.runner.run(&self.server.tools.lpr, &args)?;
        info!(install_name, file = %file.display(), "submitted print job");
        Ok(())
    }

    fn require_local(&self, install_name: &str) -> Result<(), CoreError> {
        if self
            .local_printers()
            .iter()
            .any(|b| b.install_name == install_name)
        {
            Ok(())
        } else {
            Err(CoreError::printer_not_found(install_name))
        }
    }

    fn lpadmin(&self, args: &[String]) -> Result<(), CoreError> {
        self.runner.run(&self.server.tools.lpadmin, args).map(drop)
    }
}
