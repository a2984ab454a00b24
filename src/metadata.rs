// Run metadata - commit identity and timestamps attached to a report

use chrono::{DateTime, FixedOffset, SecondsFormat};

use crate::error::MetadataError;

pub const ENV_COMMIT_SHA: &str = "COMMIT_SHA";
pub const ENV_COMMIT_DATE: &str = "COMMIT_DATE";
pub const ENV_JOB_STARTED: &str = "JOB_STARTED";

/// Identity of the run a report describes.
///
/// Built once before reduction starts and handed to the finalizer; core
/// logic never reads the environment itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunMetadata {
    pub commit_sha: String,
    pub commit_date: DateTime<FixedOffset>,
    pub job_started: DateTime<FixedOffset>,
}

impl RunMetadata {
    pub fn new(
        commit_sha: impl Into<String>,
        commit_date: DateTime<FixedOffset>,
        job_started: DateTime<FixedOffset>,
    ) -> Result<Self, MetadataError> {
        let commit_sha = commit_sha.into();
        if commit_sha.trim().is_empty() {
            return Err(MetadataError::Missing(ENV_COMMIT_SHA));
        }
        Ok(Self {
            commit_sha,
            commit_date,
            job_started,
        })
    }

    /// Build metadata from raw values, the way they arrive from flags or the
    /// environment.
    pub fn parse(
        commit_sha: Option<&str>,
        commit_date: Option<&str>,
        job_started: Option<&str>,
    ) -> Result<Self, MetadataError> {
        let commit_sha = required(ENV_COMMIT_SHA, commit_sha)?;
        let commit_date = parse_timestamp(ENV_COMMIT_DATE, required(ENV_COMMIT_DATE, commit_date)?)?;
        let job_started = parse_timestamp(ENV_JOB_STARTED, required(ENV_JOB_STARTED, job_started)?)?;
        Self::new(commit_sha, commit_date, job_started)
    }

    /// Load from `COMMIT_SHA`, `COMMIT_DATE` and `JOB_STARTED`, letting
    /// explicit values take precedence.
    pub fn from_env_with_overrides(
        commit_sha: Option<&str>,
        commit_date: Option<&str>,
        job_started: Option<&str>,
    ) -> Result<Self, MetadataError> {
        let env_sha = std::env::var(ENV_COMMIT_SHA).ok();
        let env_date = std::env::var(ENV_COMMIT_DATE).ok();
        let env_started = std::env::var(ENV_JOB_STARTED).ok();

        Self::parse(
            commit_sha.or(env_sha.as_deref()),
            commit_date.or(env_date.as_deref()),
            job_started.or(env_started.as_deref()),
        )
    }

    pub fn commit_date_string(&self) -> String {
        self.commit_date.to_rfc3339_opts(SecondsFormat::AutoSi, false)
    }

    pub fn job_started_string(&self) -> String {
        self.job_started.to_rfc3339_opts(SecondsFormat::AutoSi, false)
    }
}

fn required<'a>(name: &'static str, value: Option<&'a str>) -> Result<&'a str, MetadataError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(MetadataError::Missing(name)),
    }
}

fn parse_timestamp(name: &'static str, value: &str) -> Result<DateTime<FixedOffset>, MetadataError> {
    DateTime::parse_from_rfc3339(value).map_err(|source| MetadataError::InvalidTimestamp {
        name,
        value: value.to_string(),
        source,
    })
}
