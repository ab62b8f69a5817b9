//! The webhook context of the workflow run that started this step.

use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::env::ActionEnv;
use crate::error::{ActionError, Result};

const DEFAULT_API_URL: &str = "https://api.github.com";
const DEFAULT_SERVER_URL: &str = "https://github.com";
const DEFAULT_GRAPHQL_URL: &str = "https://api.github.com/graphql";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Repo {
    pub owner: String,
    pub repo: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub owner: String,
    pub repo: String,
    pub number: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Context {
    pub payload: Value,
    pub event_name: String,
    pub sha: String,
    #[serde(rename = "ref")]
    pub git_ref: String,
    pub workflow: String,
    pub action: String,
    pub actor: String,
    pub job: String,
    pub run_attempt: Option<u64>,
    pub run_number: Option<u64>,
    pub run_id: Option<u64>,
    pub api_url: String,
    pub server_url: String,
    pub graphql_url: String,
    #[serde(skip)]
    repository: Option<String>,
}

impl Context {
    pub fn from_env(env: &ActionEnv) -> Result<Self> {
        let text = |key: &str| env.get(key).unwrap_or_default().to_string();
        let number = |key: &str| env.get(key).and_then(|v| v.parse::<u64>().ok());
        let url = |key: &str, default: &str| env.non_empty(key).unwrap_or(default).to_string();

        Ok(Self {
            payload: load_payload(env.non_empty("GITHUB_EVENT_PATH"))?,
            event_name: text("GITHUB_EVENT_NAME"),
            sha: text("GITHUB_SHA"),
            git_ref: text("GITHUB_REF"),
            workflow: text("GITHUB_WORKFLOW"),
            action: text("GITHUB_ACTION"),
            actor: text("GITHUB_ACTOR"),
            job: text("GITHUB_JOB"),
            run_attempt: number("GITHUB_RUN_ATTEMPT"),
            run_number: number("GITHUB_RUN_NUMBER"),
            run_id: number("GITHUB_RUN_ID"),
            api_url: url("GITHUB_API_URL", DEFAULT_API_URL),
            server_url: url("GITHUB_SERVER_URL", DEFAULT_SERVER_URL),
            graphql_url: url("GITHUB_GRAPHQL_URL", DEFAULT_GRAPHQL_URL),
            repository: env.non_empty("GITHUB_REPOSITORY").map(String::from),
        })
    }

    pub fn repo(&self) -> Result<Repo> {
        if let Some(full) = &self.repository {
            let (owner, repo) = full.split_once('/').unwrap_or((full.as_str(), ""));
            return Ok(Repo {
                owner: owner.to_string(),
                repo: repo.to_string(),
            });
        }

        let repository = &self.payload["repository"];
        match (
            repository["owner"]["login"].as_str(),
            repository["name"].as_str(),
        ) {
            (Some(owner), Some(name)) => Ok(Repo {
                owner: owner.to_string(),
                repo: name.to_string(),
            }),
            _ => Err(ActionError::context(
                "context.repo requires a GITHUB_REPOSITORY environment variable like 'owner/repo'",
            )),
        }
    }

    /// The issue or pull request the event refers to, falling back to a
    /// top-level `number` on the payload.
    pub fn issue(&self) -> Result<Issue> {
        let Repo { owner, repo } = self.repo()?;
        let number = ["issue", "pull_request"]
            .iter()
            .map(|key| &self.payload[*key])
            .find(|v| v.is_object())
            .unwrap_or(&self.payload)["number"]
            .as_u64();
        Ok(Issue {
            owner,
            repo,
            number,
        })
    }
}

fn load_payload(path: Option<&str>) -> Result<Value> {
    let Some(path) = path else {
        return Ok(Value::Object(Map::new()));
    };
    if !Path::new(path).exists() {
        tracing::warn!("GITHUB_EVENT_PATH {path} does not exist");
        return Ok(Value::Object(Map::new()));
    }
    let content = std::fs::read_to_string(path).map_err(|e| {
        ActionError::context(format!("Cannot read event payload {path}: {e}"))
    })?;
    serde_json::from_str(&content)
        .map_err(|e| ActionError::context(format!("Invalid JSON in event payload {path}: {e}")))
}
