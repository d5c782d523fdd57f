//! Remote printer directory: the share listing of the SMB print server.
//!
//! `smbclient -L` doubles as the credential check. It exits non-zero for
//! a wrong password, but also when the server is unreachable or the tool
//! misbehaves; all of those are reported as an authentication failure.

use tracing::{debug, info};

use crate::config::{Credentials, ServerConfig};
use crate::encode::smb_user_spec;
use crate::error::CoreError;
use crate::model::PrinterDirectory;
use crate::runner::CommandRunner;

/// Share type smbclient reports for printer queues.
const PRINTER_TYPE: &str = "Printer";

/// List the printers shared by the server, authenticating as `credentials`.
pub fn list_remote<R: CommandRunner>(
    runner: &R,
    server: &ServerConfig,
    credentials: &Credentials,
) -> Result<PrinterDirectory, CoreError> {
    // The password ends up on the smbclient command line and is visible
    // in the process table while the listing runs.
    let args = vec![
        "-I".to_owned(),
        server.host.clone(),
        "-L".to_owned(),
        server.host.clone(),
        "-U".to_owned(),
        smb_user_spec(&server.domain, credentials),
    ];

    let out = runner
        .run(&server.tools.smbclient, &args)
        .map_err(|err| match err {
            CoreError::CommandFailed { stderr, code, .. } => {
                debug!(?code, "share listing failed");
                CoreError::Authentication {
                    message: if stderr.is_empty() {
                        format!("{} could not list shares", server.tools.smbclient)
                    } else {
                        stderr
                    },
                }
            }
            other => other,
        })?;

    let printers = parse_share_listing(&out);
    info!(
        auid = %credentials.auid,
        printers = printers.len(),
        "authenticated against print server"
    );
    Ok(printers)
}

/// Parse `smbclient -L` output into a printer directory.
///
/// Share rows are tab-indented: `\t<name> <type> <comment...>`. Rows of
/// any other type, rows with fewer than three fields, and unindented
/// lines (headers, the workgroup table) are skipped.
pub fn parse_share_listing(output: &str) -> PrinterDirectory {
    output
        .lines()
        .filter(|line| line.starts_with('\t'))
        .filter_map(|line| {
            let mut fields = split_fields(line.trim(), 3);
            let (name, kind, description) = (fields.next()?, fields.next()?, fields.next()?);
            (kind == PRINTER_TYPE).then_some((name, description))
        })
        .collect()
}

/// Split on whitespace into at most `max` fields; the last field keeps
/// its inner whitespace.
fn split_fields(line: &str, max: usize) -> impl Iterator<Item = &str> {
    let mut rest = line;
    let mut taken = 0;
    std::iter::from_fn(move || {
        rest = rest.trim_start();
        if rest.is_empty() || taken == max {
            return None;
        }
        taken += 1;
        if taken == max {
            let last = rest.trim_end();
            rest = "";
            return Some(last);
        }
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let (field, tail) = rest.split_at(end);
        rest = tail;
        Some(field)
    })
}
