//! A hello-world CI step and the toolkit it runs on: named inputs and
//! outputs, workflow commands, and the webhook event context.

pub mod command;
pub mod config;
pub mod context;
pub mod env;
pub mod error;
pub mod metadata;
pub mod output;
pub mod runner;
pub mod toolkit;
