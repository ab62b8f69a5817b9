use std::path::Path;

use clap::Args;
use greet_action::env::{ActionEnv, input_key};
use greet_action::error::{ActionError, Result};
use greet_action::metadata::ActionMetadata;
use greet_action::runner::{RunOutcome, Runner};
use greet_action::toolkit::Toolkit;

#[derive(Args, Default)]
pub struct RunArgs {
    /// Set an input for this run, e.g. `-i name=World`
    #[arg(short, long = "input", value_name = "KEY=VALUE")]
    pub inputs: Vec<String>,

    /// Event payload file (overrides GITHUB_EVENT_PATH)
    #[arg(long)]
    pub event_path: Option<String>,

    /// Event name (overrides GITHUB_EVENT_NAME)
    #[arg(long)]
    pub event_name: Option<String>,
}

fn parse_input(raw: &str) -> Result<(&str, &str)> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value)),
        _ => Err(ActionError::input(format!(
            "Invalid input '{raw}', expected KEY=VALUE"
        ))),
    }
}

/// Builds the step environment from the process, CLI overrides and
/// metadata defaults, in that order of precedence (overrides win).
pub fn build_env(
    mut env: ActionEnv,
    args: &RunArgs,
    metadata: Option<&ActionMetadata>,
) -> Result<ActionEnv> {
    for raw in &args.inputs {
        let (key, value) = parse_input(raw)?;
        env.set(input_key(key), value);
    }
    if let Some(path) = &args.event_path {
        env.set("GITHUB_EVENT_PATH", path.clone());
    }
    if let Some(name) = &args.event_name {
        env.set("GITHUB_EVENT_NAME", name.clone());
    }
    if let Some(meta) = metadata {
        meta.apply_defaults(&mut env);
    }
    Ok(env)
}

pub fn run(args: RunArgs, metadata_path: Option<&Path>) -> Result<RunOutcome> {
    let metadata = metadata_path.map(ActionMetadata::load).transpose()?;
    let env = build_env(ActionEnv::from_process(), &args, metadata.as_ref())?;

    let mut toolkit = Toolkit::new(env, std::io::stdout().lock());
    let mut runner = Runner::new();
    if let Some(meta) = &metadata {
        runner = runner.with_metadata(meta);
    }
    Ok(runner.run(&mut toolkit))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_key_value_inputs() {
        assert_eq!(parse_input("name=World").unwrap(), ("name", "World"));
        assert_eq!(parse_input("msg=a=b").unwrap(), ("msg", "a=b"));
        assert_eq!(parse_input("name=").unwrap(), ("name", ""));
        assert!(parse_input("name").is_err());
        assert!(parse_input("=x").is_err());
    }

    #[test]
    fn overrides_beat_process_env_and_defaults_fill_gaps() {
        let meta = ActionMetadata::parse(
            "name: t\ninputs:\n  name:\n    default: World\n  who to greet:\n    default: you\n",
        )
        .unwrap();
        let args = RunArgs {
            inputs: vec!["name=Octocat".into()],
            event_path: Some("/tmp/event.json".into()),
            event_name: None,
        };
        let base = ActionEnv::from_pairs([("INPUT_NAME", "ignored"), ("GITHUB_EVENT_NAME", "push")]);

        let env = build_env(base, &args, Some(&meta)).unwrap();

        assert_eq!(env.get("INPUT_NAME"), Some("Octocat"));
        assert_eq!(env.get("INPUT_WHO_TO_GREET"), Some("you"));
        assert_eq!(env.get("GITHUB_EVENT_PATH"), Some("/tmp/event.json"));
        assert_eq!(env.get("GITHUB_EVENT_NAME"), Some("push"));
    }

    #[test]
    fn bad_input_flag_is_an_error() {
        let args = RunArgs {
            inputs: vec!["oops".into()],
            ..RunArgs::default()
        };
        let err = build_env(ActionEnv::default(), &args, None).unwrap_err();
        assert_eq!(err.to_string(), "Invalid input 'oops', expected KEY=VALUE");
    }
}
