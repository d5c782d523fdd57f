//! Local printer registry: spooler queues that point at the print server.

use std::net::IpAddr;

use tracing::{debug, warn};

use crate::config::ServerConfig;
use crate::model::LocalPrinterBinding;
use crate::runner::CommandRunner;

/// List local queues whose device URL targets `server.address`.
///
/// Any failure to query the spooler yields an empty list.
pub fn list_local<R: CommandRunner>(runner: &R, server: &ServerConfig) -> Vec<LocalPrinterBinding> {
    match runner.run(&server.tools.lpstat, &["-v".to_owned()]) {
        Ok(out) => {
            let bindings = parse_spooler_status(&out, server.address);
            debug!(count = bindings.len(), "found local queues for print server");
            bindings
        }
        Err(err) => {
            warn!(error = %err, "could not list local printers");
            Vec::new()
        }
    }
}

/// Parse `lpstat -v` output, keeping `smb://` queues backed by `address`.
///
/// Lines look like `device for turing-01: smb://uni\au1:pw@10.0.0.1/5341-01`.
pub fn parse_spooler_status(output: &str, address: IpAddr) -> Vec<LocalPrinterBinding> {
    let host = address.to_string();
    output
        .lines()
        .filter_map(|line| {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            let [_, _, install_token, .., url] = tokens.as_slice() else {
                return None;
            };
            if url_host(url)? != host {
                return None;
            }
            let remote_name = url.rsplit('/').next()?;
            let install_name = install_token.split(':').next()?;
            Some(LocalPrinterBinding::new(remote_name, install_name))
        })
        .collect()
}

/// Host part of an `smb://` device URL, without any `userinfo@` or `:port`.
///
/// Other schemes yield `None`.
fn url_host(url: &str) -> Option<&str> {
    let rest = url.strip_prefix("smb://")?;
    let authority = rest.split('/').next()?;
    let host_port = authority.rsplit('@').next()?;
    if let Some(bracketed) = host_port.strip_prefix('[') {
        return bracketed.split(']').next();
    }
    host_port.split(':').next()
}
