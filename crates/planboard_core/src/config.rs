//! Capacity limit configuration.
//!
//! # Responsibility
//! - Resolve container limits once from the environment (and `.env`).
//! - Keep lookup injectable so tests never touch process env.
//!
//! # Invariants
//! - Missing keys fall back to defaults; malformed values are rejected.

use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Env key capping projects per user.
pub const MAX_PROJECTS_ENV: &str = "MAX_NUMBER_OF_PROJECTS";
/// Env key capping tasks per project.
pub const MAX_TASKS_ENV: &str = "MAX_NUMBER_OF_TASKS";

pub const DEFAULT_MAX_PROJECTS_PER_USER: usize = 30;
pub const DEFAULT_MAX_TASKS_PER_PROJECT: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidNumber { key: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidNumber { key, value } => {
                write!(f, "{key} must be a non-negative integer, got `{value}`")
            }
        }
    }
}

impl Error for ConfigError {}

/// Container capacity limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_projects_per_user: usize,
    pub max_tasks_per_project: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_projects_per_user: DEFAULT_MAX_PROJECTS_PER_USER,
            max_tasks_per_project: DEFAULT_MAX_TASKS_PER_PROJECT,
        }
    }
}

impl Limits {
    pub fn new(max_projects_per_user: usize, max_tasks_per_project: usize) -> Self {
        Self {
            max_projects_per_user,
            max_tasks_per_project,
        }
    }

    /// Loads `.env` when present, then reads limits from process env.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolves limits through `lookup`, applying defaults for absent keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            max_projects_per_user: read_limit(
                &lookup,
                MAX_PROJECTS_ENV,
                DEFAULT_MAX_PROJECTS_PER_USER,
            )?,
            max_tasks_per_project: read_limit(
                &lookup,
                MAX_TASKS_ENV,
                DEFAULT_MAX_TASKS_PER_PROJECT,
            )?,
        })
    }
}

fn read_limit<F>(lookup: &F, key: &'static str, default: usize) -> Result<usize, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<usize>()
            .map_err(|_| ConfigError::InvalidNumber { key, value: raw }),
    }
}
