//! Interactive input and output for the shell.

use std::io::{self, BufRead, IsTerminal, Write};

use dialoguer::Input;

use crate::error::CliError;

/// Source of user answers and sink for progress lines.
pub trait Prompter {
    /// Ask for a line of text. The answer is returned as typed.
    fn input(&mut self, prompt: &str) -> Result<String, CliError>;

    /// Ask for a secret without echoing it.
    fn password(&mut self, prompt: &str) -> Result<String, CliError>;

    /// Show one line of output.
    fn say(&mut self, line: &str);
}

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Prompt(e.to_string())
}

/// Prompter on the controlling terminal.
///
/// With a terminal on stdin, text goes through `dialoguer` and passwords
/// through `rpassword`. With piped stdin, answers are read line by line
/// so the tool can be scripted.
pub struct TerminalPrompter {
    interactive: bool,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            interactive: io::stdin().is_terminal(),
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn input(&mut self, prompt: &str) -> Result<String, CliError> {
        if !self.interactive {
            return read_piped(prompt);
        }
        Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_err)
    }

    fn password(&mut self, prompt: &str) -> Result<String, CliError> {
        if !self.interactive {
            return read_piped(prompt);
        }
        rpassword::prompt_password(format!("{prompt}: ")).map_err(prompt_err)
    }

    fn say(&mut self, line: &str) {
        println!("{line}");
    }
}

fn read_piped(prompt: &str) -> Result<String, CliError> {
    let mut stderr = io::stderr();
    write!(stderr, "{prompt}: ").and_then(|()| stderr.flush()).map_err(prompt_err)?;

    let mut line = String::new();
    let read = io::stdin().lock().read_line(&mut line).map_err(prompt_err)?;
    if read == 0 {
        return Err(CliError::Prompt(format!("no answer for '{prompt}' (end of input)")));
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_owned())
}

// ── Scripted prompter ───────────────────────────────────────────────

/// Prompter that answers from a fixed script and records what was shown.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: std::collections::VecDeque<String>,
    pub prompts: Vec<String>,
    pub output: Vec<String>,
}

#[cfg(test)]
impl ScriptedPrompter {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| (*a).to_owned()).collect(),
            ..Self::default()
        }
    }

    fn next(&mut self, prompt: &str) -> Result<String, CliError> {
        self.prompts.push(prompt.to_owned());
        self.answers
            .pop_front()
            .ok_or_else(|| CliError::Prompt(format!("script exhausted at '{prompt}'")))
    }
}

#[cfg(test)]
impl Prompter for ScriptedPrompter {
    fn input(&mut self, prompt: &str) -> Result<String, CliError> {
        self.next(prompt)
    }

    fn password(&mut self, prompt: &str) -> Result<String, CliError> {
        self.next(prompt)
    }

    fn say(&mut self, line: &str) {
        self.output.push(line.to_owned());
    }
}
