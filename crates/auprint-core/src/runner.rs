// ── External program execution ──
//
// Every interaction with smbclient and CUPS goes through `CommandRunner`.
// `SystemRunner` spawns real processes; `ScriptedRunner` replays canned
// output so the lifecycle logic can be exercised without a print server.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::process::Command;

use tracing::debug;

use crate::error::CoreError;

/// Runs an external program to completion and returns its stdout.
///
/// A non-zero exit is reported as [`CoreError::CommandFailed`]; a program
/// that cannot be started is [`CoreError::Spawn`].
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<String, CoreError>;
}

impl<T: CommandRunner + ?Sized> CommandRunner for &T {
    fn run(&self, program: &str, args: &[String]) -> Result<String, CoreError> {
        (**self).run(program, args)
    }
}

/// Blocking runner backed by [`std::process::Command`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<String, CoreError> {
        // Arguments may carry credentials; only their count is logged.
        debug!(program, argc = args.len(), "running external command");

        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|source| CoreError::Spawn {
                program: program.into(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_owned();
            debug!(program, code = ?output.status.code(), "external command failed");
            return Err(CoreError::CommandFailed {
                program: program.into(),
                code: output.status.code(),
                stderr,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

// ── Scripted runner ─────────────────────────────────────────────────

/// One recorded call to [`ScriptedRunner::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

/// Canned result for the next call to a program.
#[derive(Debug, Clone)]
enum Reply {
    Stdout(String),
    Exit { code: i32, stderr: String },
    Missing,
}

/// Runner that records invocations and replays queued replies.
///
/// Replies are queued per program and consumed in order; a program with
/// nothing queued succeeds with empty output.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    replies: RefCell<HashMap<String, VecDeque<Reply>>>,
    calls: RefCell<Vec<Invocation>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful run of `program` printing `stdout`.
    pub fn succeed(&self, program: &str, stdout: impl Into<String>) -> &Self {
        self.push(program, Reply::Stdout(stdout.into()))
    }

    /// Queue a run of `program` exiting with `code`.
    pub fn fail(&self, program: &str, code: i32, stderr: impl Into<String>) -> &Self {
        self.push(
            program,
            Reply::Exit {
                code,
                stderr: stderr.into(),
            },
        )
    }

    /// Queue a run of `program` that cannot be started.
    pub fn missing(&self, program: &str) -> &Self {
        self.push(program, Reply::Missing)
    }

    /// Everything run so far, oldest first.
    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.borrow().clone()
    }

    /// Calls made to `program`, oldest first.
    pub fn calls_to(&self, program: &str) -> Vec<Invocation> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.program == program)
            .cloned()
            .collect()
    }

    fn push(&self, program: &str, reply: Reply) -> &Self {
        self.replies
            .borrow_mut()
            .entry(program.to_owned())
            .or_default()
            .push_back(reply);
        self
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<String, CoreError> {
        self.calls.borrow_mut().push(Invocation {
            program: program.to_owned(),
            args: args.to_vec(),
        });

        let reply = self
            .replies
            .borrow_mut()
            .get_mut(program)
            .and_then(VecDeque::pop_front);

        match reply {
            None => Ok(String::new()),
            Some(Reply::Stdout(out)) => Ok(out),
            Some(Reply::Exit { code, stderr }) => Err(CoreError::CommandFailed {
                program: program.into(),
                code: Some(code),
                stderr,
            }),
            Some(Reply::Missing) => Err(CoreError::Spawn {
                program: program.into(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
            }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn scripted_replies_are_consumed_in_order() {
        let runner = ScriptedRunner::new();
        runner.succeed("lpstat", "first").fail("lpstat", 1, "boom");

        assert_eq!(runner.run("lpstat", &args(&["-v"])).unwrap(), "first");
        let err = runner.run("lpstat", &args(&["-v"])).unwrap_err();
        assert!(matches!(err, CoreError::CommandFailed { code: Some(1), .. }));
        assert_eq!(runner.run("lpstat", &args(&["-v"])).unwrap(), "");
        assert_eq!(runner.calls_to("lpstat").len(), 3);
    }

    #[test]
    fn scripted_missing_program() {
        let runner = ScriptedRunner::new();
        runner.missing("smbclient");
        let err = runner.run("smbclient", &[]).unwrap_err();
        assert!(matches!(err, CoreError::Spawn { .. }));
    }

    #[test]
    fn records_arguments() {
        let runner = ScriptedRunner::new();
        runner.run("lpadmin", &args(&["-x", "turing-01"])).unwrap();
        assert_eq!(
            runner.calls(),
            vec![Invocation {
                program: "lpadmin".into(),
                args: args(&["-x", "turing-01"]),
            }]
        );
    }

    #[test]
    fn system_runner_reports_missing_program() {
        let err = SystemRunner
            .run("auprint-definitely-not-a-real-program", &[])
            .unwrap_err();
        assert!(matches!(err, CoreError::Spawn { .. }));
    }
}
