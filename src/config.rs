//! Action input configuration
//!
//! GitHub Actions hands inputs to the process as `INPUT_<NAME>` environment
//! variables. This module loads them into a typed struct and parses the
//! committer/author identity strings.

use std::sync::LazyLock;

use config::{Config, Environment};
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Required input '{name}' is missing")]
    MissingInput { name: String },
    #[error("'{value}' does not conform to the 'Display Name <email@example.com>' format")]
    MalformedIdentity { value: String },
    #[error("Failed to read inputs: {source}")]
    Source {
        #[from]
        source: config::ConfigError,
    },
}

/// A git identity parsed from a "Display Name <email@example.com>" string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitIdentity {
    pub name: String,
    pub email: String,
}

static IDENTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([^<>]+?)\s*<\s*([^<>\s]+@[^<>\s]+)\s*>\s*$").unwrap());

impl CommitIdentity {
    /// Parse "Display Name <email@example.com>". Fails if no email can be
    /// extracted.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        let captures = IDENTITY_RE
            .captures(value)
            .ok_or_else(|| ConfigError::MalformedIdentity {
                value: value.to_string(),
            })?;

        Ok(Self {
            name: captures[1].to_string(),
            email: captures[2].to_string(),
        })
    }
}

/// Raw inputs as they arrive from the environment. Everything is a string at
/// this stage; list and bool shapes are normalized into [`Inputs`].
///
/// Actions exports input names verbatim, so `inherit-labels` arrives as
/// `INPUT_INHERIT-LABELS` and surfaces here under its hyphenated key; the
/// aliases accept both spellings.
#[derive(Debug, Default, Deserialize)]
struct RawInputs {
    token: Option<String>,
    committer: Option<String>,
    author: Option<String>,
    branch: Option<String>,
    title: Option<String>,
    body: Option<String>,
    labels: Option<String>,
    #[serde(alias = "inherit-labels")]
    inherit_labels: Option<String>,
    assignees: Option<String>,
    reviewers: Option<String>,
    #[serde(alias = "team-reviewers")]
    team_reviewers: Option<String>,
    #[serde(alias = "cherry-pick-branch")]
    cherry_pick_branch: Option<String>,
    #[serde(alias = "strategy-option")]
    strategy_option: Option<String>,
    force: Option<String>,
    #[serde(alias = "commit-conflicts")]
    commit_conflicts: Option<String>,
}

/// Typed action inputs. Immutable once loaded.
#[derive(Debug, Clone)]
pub struct Inputs {
    pub token: String,
    pub committer: String,
    pub author: String,
    pub branch: String,
    pub title: Option<String>,
    pub body: Option<String>,
    pub labels: Vec<String>,
    pub inherit_labels: bool,
    pub assignees: Vec<String>,
    pub reviewers: Vec<String>,
    pub team_reviewers: Vec<String>,
    pub cherry_pick_branch: Option<String>,
    pub strategy_option: String,
    pub force: bool,
    pub commit_conflicts: bool,
}

impl Inputs {
    /// Load inputs from `INPUT_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let raw: RawInputs = Config::builder()
            .add_source(Environment::with_prefix("INPUT"))
            .build()?
            .try_deserialize()?;

        Self::from_raw(raw)
    }

    fn from_raw(raw: RawInputs) -> Result<Self, ConfigError> {
        Ok(Self {
            token: required("token", raw.token)?,
            committer: required("committer", raw.committer)?,
            author: required("author", raw.author)?,
            branch: required("branch", raw.branch)?,
            title: non_empty(raw.title),
            body: non_empty(raw.body),
            labels: as_list(raw.labels),
            inherit_labels: as_bool(raw.inherit_labels),
            assignees: as_list(raw.assignees),
            reviewers: as_list(raw.reviewers),
            team_reviewers: as_list(raw.team_reviewers),
            cherry_pick_branch: non_empty(raw.cherry_pick_branch),
            strategy_option: non_empty(raw.strategy_option)
                .unwrap_or_else(|| "theirs".to_string()),
            force: as_bool(raw.force),
            commit_conflicts: as_bool(raw.commit_conflicts),
        })
    }
}

fn required(name: &str, value: Option<String>) -> Result<String, ConfigError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::MissingInput {
            name: name.to_string(),
        }),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Actions list inputs are newline-separated (comma accepted as well).
fn as_list(value: Option<String>) -> Vec<String> {
    value
        .map(|v| {
            v.split(['\n', ','])
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

fn as_bool(value: Option<String>) -> bool {
    value.is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
}
