mod cli;
mod error;
mod prompt;
mod shell;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use auprint_config::CredentialStore;
use auprint_core::SystemRunner;

use crate::cli::Cli;
use crate::error::CliError;
use crate::prompt::TerminalPrompter;
use crate::shell::Mode;

fn main() {
    let cli = Cli::parse();

    init_tracing();

    if let Err(err) = run(&cli) {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let settings = auprint_config::load_settings()?;
    let server = auprint_config::server_config(&settings)?;
    let buildings = auprint_config::building_table(&settings);
    let mut store = CredentialStore::open(settings.credentials_path())?;
    let mut prompter = TerminalPrompter::new();

    let session = shell::login(&mut store, &mut prompter, &SystemRunner, &server)?;

    let mode = if cli.update_passwords {
        Mode::UpdatePasswords
    } else {
        Mode::Install
    };
    tracing::debug!(?mode, "logged in");
    shell::run(mode, &session, &buildings, &mut prompter)
}
