//! Inputs, outputs, log commands and failure reporting for a single step.

use std::io::Write;
use std::path::Path;

use crate::command::{self, Command};
use crate::env::{self, ActionEnv};
use crate::error::{ActionError, Result};

const TRUE_VALUES: &[&str] = &["true", "True", "TRUE"];
const FALSE_VALUES: &[&str] = &["false", "False", "FALSE"];

#[derive(Debug, Clone)]
pub struct InputOptions {
    pub required: bool,
    pub trim_whitespace: bool,
}

impl Default for InputOptions {
    fn default() -> Self {
        Self {
            required: false,
            trim_whitespace: true,
        }
    }
}

impl InputOptions {
    pub fn required() -> Self {
        Self {
            required: true,
            ..Self::default()
        }
    }
}

/// Location and title attached to `error`, `warning` and `notice` annotations.
#[derive(Debug, Clone, Default)]
pub struct AnnotationProperties {
    pub title: Option<String>,
    pub file: Option<String>,
    pub start_line: Option<u32>,
    pub end_line: Option<u32>,
    pub start_column: Option<u32>,
    pub end_column: Option<u32>,
}

impl AnnotationProperties {
    fn apply<'a>(&'a self, cmd: Command<'a>) -> Command<'a> {
        let num = |n: Option<u32>| n.map(|n| n.to_string()).unwrap_or_default();
        cmd.property("title", self.title.clone().unwrap_or_default())
            .property("file", self.file.clone().unwrap_or_default())
            .property("line", num(self.start_line))
            .property("endLine", num(self.end_line))
            .property("col", num(self.start_column))
            .property("endColumn", num(self.end_column))
    }
}

pub struct Toolkit<W: Write> {
    env: ActionEnv,
    out: W,
    failure: Option<String>,
}

impl<W: Write> Toolkit<W> {
    pub fn new(env: ActionEnv, out: W) -> Self {
        Self {
            env,
            out,
            failure: None,
        }
    }

    pub fn env(&self) -> &ActionEnv {
        &self.env
    }

    pub fn into_writer(self) -> W {
        self.out
    }

    pub fn input(&self, name: &str, opts: &InputOptions) -> Result<String> {
        let value = self.env.get(&env::input_key(name)).unwrap_or_default();
        if opts.required && value.is_empty() {
            return Err(ActionError::input(format!(
                "Input required and not supplied: {name}"
            )));
        }
        if opts.trim_whitespace {
            Ok(value.trim().to_string())
        } else {
            Ok(value.to_string())
        }
    }

    pub fn boolean_input(&self, name: &str, opts: &InputOptions) -> Result<bool> {
        let value = self.input(name, opts)?;
        if TRUE_VALUES.contains(&value.as_str()) {
            return Ok(true);
        }
        if FALSE_VALUES.contains(&value.as_str()) {
            return Ok(false);
        }
        Err(ActionError::input(format!(
            "Input does not meet YAML 1.2 \"Core Schema\" specification: {name}\n\
             Support boolean input list: `true | True | TRUE | false | False | FALSE`"
        )))
    }

    pub fn multiline_input(&self, name: &str, opts: &InputOptions) -> Result<Vec<String>> {
        let value = self.input(name, opts)?;
        Ok(value
            .split('\n')
            .filter(|line| !line.is_empty())
            .map(|line| {
                if opts.trim_whitespace {
                    line.trim().to_string()
                } else {
                    line.to_string()
                }
            })
            .collect())
    }

    /// Publishes through the `GITHUB_OUTPUT` file when the runner provides
    /// one, otherwise through the legacy `set-output` stdout command.
    pub fn set_output(&mut self, name: &str, value: &str) -> Result<()> {
        if let Some(path) = self.env.non_empty("GITHUB_OUTPUT") {
            tracing::debug!(output = name, path, "writing output file command");
            let message = command::prepare_key_value_message(name, value)?;
            return command::issue_file_command(Path::new(path), &message);
        }
        tracing::debug!(output = name, "writing legacy set-output command");
        writeln!(self.out)?;
        let line = Command::new("set-output", value)
            .property("name", name)
            .render();
        writeln!(self.out, "{line}")?;
        Ok(())
    }

    pub fn is_debug(&self) -> bool {
        self.env.is_debug()
    }

    pub fn debug(&mut self, message: &str) -> Result<()> {
        self.issue(Command::new("debug", message))
    }

    pub fn info(&mut self, message: &str) -> Result<()> {
        writeln!(self.out, "{message}")?;
        Ok(())
    }

    pub fn notice(&mut self, message: &str, props: &AnnotationProperties) -> Result<()> {
        self.issue(props.apply(Command::new("notice", message)))
    }

    pub fn warning(&mut self, message: &str, props: &AnnotationProperties) -> Result<()> {
        self.issue(props.apply(Command::new("warning", message)))
    }

    pub fn error(&mut self, message: &str, props: &AnnotationProperties) -> Result<()> {
        self.issue(props.apply(Command::new("error", message)))
    }

    /// Marks the step failed. Never fails itself: if stdout is gone the
    /// failure is still recorded and the process exits non-zero.
    pub fn set_failed(&mut self, message: &str) {
        if let Err(e) = self.error(message, &AnnotationProperties::default()) {
            tracing::error!(error = %e, "could not write failure annotation");
        }
        self.failure = Some(message.to_string());
    }

    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    fn issue(&mut self, cmd: Command<'_>) -> Result<()> {
        writeln!(self.out, "{}", cmd.render())?;
        Ok(())
    }
}
