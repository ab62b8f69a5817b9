//! Workflow command encoding: the `::name key=value::message` lines the
//! runner parses from stdout, and the `GITHUB_*` file commands.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::error::{ActionError, Result};

const CMD_STRING: &str = "::";

pub struct Command<'a> {
    name: &'a str,
    properties: Vec<(&'a str, String)>,
    message: &'a str,
}

impl<'a> Command<'a> {
    pub fn new(name: &'a str, message: &'a str) -> Self {
        Self {
            name,
            properties: Vec::new(),
            message,
        }
    }

    /// Empty values are dropped when the command is rendered.
    pub fn property(mut self, key: &'a str, value: impl Into<String>) -> Self {
        self.properties.push((key, value.into()));
        self
    }

    pub fn render(&self) -> String {
        let mut out = format!("{CMD_STRING}{}", self.name);
        let props: Vec<String> = self
            .properties
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| format!("{k}={}", escape_property(v)))
            .collect();
        if !props.is_empty() {
            out.push(' ');
            out.push_str(&props.join(","));
        }
        out.push_str(CMD_STRING);
        out.push_str(&escape_data(self.message));
        out
    }
}

pub fn escape_data(s: &str) -> String {
    s.replace('%', "%25").replace('\r', "%0D").replace('\n', "%0A")
}

pub fn escape_property(s: &str) -> String {
    escape_data(s).replace(':', "%3A").replace(',', "%2C")
}

/// Appends `message` plus a newline to the file a file command points at.
/// The runner creates these files; a missing one is an error, not created.
pub fn issue_file_command(path: &Path, message: &str) -> Result<()> {
    if !path.exists() {
        return Err(ActionError::output(format!(
            "Missing file at path: {}",
            path.display()
        )));
    }
    let mut file = OpenOptions::new().append(true).open(path)?;
    writeln!(file, "{message}")?;
    Ok(())
}

/// `key<<delim\nvalue\ndelim` with a fresh random delimiter.
pub fn prepare_key_value_message(key: &str, value: &str) -> Result<String> {
    let delimiter = format!("ghadelimiter_{}", uuid::Uuid::new_v4());
    if key.contains(&delimiter) {
        return Err(ActionError::output(format!(
            "Unexpected input: name should not contain the delimiter \"{delimiter}\""
        )));
    }
    if value.contains(&delimiter) {
        return Err(ActionError::output(format!(
            "Unexpected input: value should not contain the delimiter \"{delimiter}\""
        )));
    }
    Ok(format!("{key}<<{delimiter}\n{value}\n{delimiter}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_bare_command() {
        assert_eq!(Command::new("debug", "hi").render(), "::debug::hi");
    }

    #[test]
    fn renders_properties_and_skips_empty_ones() {
        let cmd = Command::new("error", "boom")
            .property("title", "Build")
            .property("file", "")
            .property("line", "12");
        assert_eq!(cmd.render(), "::error title=Build,line=12::boom");
    }

    #[test]
    fn escapes_message_and_properties() {
        let cmd = Command::new("warning", "50%\r\nnext").property("title", "a:b,c");
        assert_eq!(cmd.render(), "::warning title=a%3Ab%2Cc::50%25%0D%0Anext");
    }

    #[test]
    fn key_value_message_uses_matching_delimiters() {
        let msg = prepare_key_value_message("time", "12:00:00").unwrap();
        let lines: Vec<&str> = msg.lines().collect();
        assert_eq!(lines.len(), 3);
        let delimiter = lines[0].strip_prefix("time<<").unwrap();
        assert!(delimiter.starts_with("ghadelimiter_"));
        assert_eq!(lines[1], "12:00:00");
        assert_eq!(lines[2], delimiter);
    }

    #[test]
    fn file_command_requires_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing");
        let err = issue_file_command(&path, "x").unwrap_err();
        assert!(err.to_string().starts_with("Missing file at path: "));
    }

    #[test]
    fn file_command_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out");
        std::fs::write(&path, "a\n").unwrap();
        issue_file_command(&path, "b").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a\nb\n");
    }
}
