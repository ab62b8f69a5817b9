//! The step itself: greet, publish the time, dump the event payload.

use std::io::Write;

use chrono::{DateTime, FixedOffset, Local, TimeZone};
use serde::Serialize;

use crate::context::Context;
use crate::error::Result;
use crate::metadata::ActionMetadata;
use crate::toolkit::{InputOptions, Toolkit};

pub const INPUT_NAME: &str = "name";
pub const OUTPUT_TIME: &str = "time";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Succeeded,
    Failed(String),
}

impl RunOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            RunOutcome::Succeeded => 0,
            RunOutcome::Failed(_) => 1,
        }
    }
}

/// Wall-clock time of day, e.g. `14:03:07 GMT+0200`.
pub fn time_of_day<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format("%H:%M:%S GMT%z").to_string()
}

pub fn local_now() -> DateTime<FixedOffset> {
    Local::now().fixed_offset()
}

/// Two-space indented JSON.
pub fn pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub struct Runner<'m> {
    metadata: Option<&'m ActionMetadata>,
    clock: fn() -> DateTime<FixedOffset>,
}

impl Default for Runner<'_> {
    fn default() -> Self {
        Self {
            metadata: None,
            clock: local_now,
        }
    }
}

impl<'m> Runner<'m> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_metadata(mut self, metadata: &'m ActionMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn with_clock(mut self, clock: fn() -> DateTime<FixedOffset>) -> Self {
        self.clock = clock;
        self
    }

    /// Inputs the step reads that the metadata, if any, does not declare.
    pub fn undeclared_inputs(&self) -> Vec<&'static str> {
        match self.metadata {
            Some(meta) => [INPUT_NAME]
                .into_iter()
                .filter(|name| !meta.declares_input(name))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Runs the step once. Any error is reported through `set_failed`;
    /// nothing is re-raised. The outcome follows the failure the toolkit
    /// recorded.
    pub fn run<W: Write>(&self, toolkit: &mut Toolkit<W>) -> RunOutcome {
        tracing::info!("running step");
        if let Err(e) = self.steps(toolkit) {
            let message = e.to_string();
            tracing::error!(error = %message, "step failed");
            toolkit.set_failed(&message);
        }
        match toolkit.failure() {
            Some(message) => RunOutcome::Failed(message.to_string()),
            None => {
                tracing::info!("step succeeded");
                RunOutcome::Succeeded
            }
        }
    }

    fn steps<W: Write>(&self, toolkit: &mut Toolkit<W>) -> Result<()> {
        for input in self.undeclared_inputs() {
            tracing::warn!(input, "input is not declared in action metadata");
        }

        let name = toolkit.input(INPUT_NAME, &InputOptions::default())?;
        toolkit.info(&format!("Hello {name}!"))?;

        let time = time_of_day(&(self.clock)());
        toolkit.set_output(OUTPUT_TIME, &time)?;

        let context = Context::from_env(toolkit.env())?;
        let payload = pretty_json(&context.payload)?;
        toolkit.info(&format!("The event payload: {payload}"))?;
        Ok(())
    }
}
