// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names, default values and the
//! [`AppConfig`] loaded from the environment at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `STORE_PATH` | redb database file | `./data/jobboard.redb` |
//! | `STORE_TIMEOUT_SECS` | Upper bound for a single store operation | `5` |
//! | `IDENTITY_VERIFY_URL` | Identity service verification endpoint | Required |
//! | `IDENTITY_API_KEY` | Service API key presented to the identity service | Required |
//! | `IDENTITY_API_KEY_HEADER` | Header carrying the service API key | `x-api-key` |
//! | `IDENTITY_TIMEOUT_SECS` | Upper bound for a verification call | `10` |
//! | `CORS_ALLOWED_ORIGINS` | Comma-separated allowed origins (`*` for any) | `*` |
//! | `LATEST_JOBS_WINDOW_HOURS` | Window for `/latest-jobs` | `24` |
//! | `ALL_JOBS_MAX_AGE_DAYS` | Cutoff for `/all-jobs`; unset means unfiltered | unset |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use chrono::TimeDelta;
use url::Url;

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const STORE_PATH_ENV: &str = "STORE_PATH";
pub const STORE_TIMEOUT_ENV: &str = "STORE_TIMEOUT_SECS";
pub const IDENTITY_VERIFY_URL_ENV: &str = "IDENTITY_VERIFY_URL";
pub const IDENTITY_API_KEY_ENV: &str = "IDENTITY_API_KEY";
pub const IDENTITY_API_KEY_HEADER_ENV: &str = "IDENTITY_API_KEY_HEADER";
pub const IDENTITY_TIMEOUT_ENV: &str = "IDENTITY_TIMEOUT_SECS";
pub const CORS_ALLOWED_ORIGINS_ENV: &str = "CORS_ALLOWED_ORIGINS";
pub const LATEST_JOBS_WINDOW_ENV: &str = "LATEST_JOBS_WINDOW_HOURS";
pub const ALL_JOBS_MAX_AGE_ENV: &str = "ALL_JOBS_MAX_AGE_DAYS";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_STORE_PATH: &str = "./data/jobboard.redb";
const DEFAULT_STORE_TIMEOUT_SECS: u64 = 5;
const DEFAULT_IDENTITY_API_KEY_HEADER: &str = "x-api-key";
const DEFAULT_IDENTITY_TIMEOUT_SECS: u64 = 10;
const DEFAULT_LATEST_JOBS_WINDOW_HOURS: i64 = 24;

/// Configuration loading error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

/// Policy applied by the "all jobs" listing.
///
/// Deployments historically disagreed on whether "all" meant every posting
/// or only the recent ones; the choice is explicit here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AllJobsPolicy {
    /// Every stored posting, newest first.
    #[default]
    Unfiltered,
    /// Only postings newer than the given age, newest first.
    MaxAge(TimeDelta),
}

/// Allowed cross-origin callers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CorsOrigins {
    #[default]
    Any,
    List(Vec<String>),
}

/// Settings for the external identity-verification call.
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    pub verify_url: Url,
    pub api_key: String,
    pub api_key_header: String,
    pub timeout: Duration,
}

/// Settings for the job listing endpoints.
#[derive(Debug, Clone, Copy)]
pub struct JobsConfig {
    pub latest_window: TimeDelta,
    pub all_jobs: AllJobsPolicy,
}

impl Default for JobsConfig {
    fn default() -> Self {
        Self {
            latest_window: TimeDelta::hours(DEFAULT_LATEST_JOBS_WINDOW_HOURS),
            all_jobs: AllJobsPolicy::Unfiltered,
        }
    }
}

/// Complete service configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub store_path: PathBuf,
    pub store_timeout: Duration,
    pub identity: IdentityConfig,
    pub cors: CorsOrigins,
    pub jobs: JobsConfig,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &'static str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let host = get(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_or(get(PORT_ENV), PORT_ENV, DEFAULT_PORT)?;
        let bind_addr: SocketAddr =
            format!("{host}:{port}")
                .parse()
                .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                    var: HOST_ENV,
                    reason: e.to_string(),
                })?;

        let store_path = PathBuf::from(
            get(STORE_PATH_ENV).unwrap_or_else(|| DEFAULT_STORE_PATH.to_string()),
        );
        let store_timeout = Duration::from_secs(parse_or(
            get(STORE_TIMEOUT_ENV),
            STORE_TIMEOUT_ENV,
            DEFAULT_STORE_TIMEOUT_SECS,
        )?);

        let verify_url = get(IDENTITY_VERIFY_URL_ENV)
            .ok_or(ConfigError::Missing(IDENTITY_VERIFY_URL_ENV))?;
        let verify_url = Url::parse(&verify_url).map_err(|e| ConfigError::Invalid {
            var: IDENTITY_VERIFY_URL_ENV,
            reason: e.to_string(),
        })?;
        let identity = IdentityConfig {
            verify_url,
            api_key: get(IDENTITY_API_KEY_ENV).ok_or(ConfigError::Missing(IDENTITY_API_KEY_ENV))?,
            api_key_header: get(IDENTITY_API_KEY_HEADER_ENV)
                .unwrap_or_else(|| DEFAULT_IDENTITY_API_KEY_HEADER.to_string()),
            timeout: Duration::from_secs(parse_or(
                get(IDENTITY_TIMEOUT_ENV),
                IDENTITY_TIMEOUT_ENV,
                DEFAULT_IDENTITY_TIMEOUT_SECS,
            )?),
        };

        let cors = parse_cors(get(CORS_ALLOWED_ORIGINS_ENV));

        let window_hours: i64 = parse_or(
            get(LATEST_JOBS_WINDOW_ENV),
            LATEST_JOBS_WINDOW_ENV,
            DEFAULT_LATEST_JOBS_WINDOW_HOURS,
        )?;
        let latest_window = positive_delta(window_hours, LATEST_JOBS_WINDOW_ENV, TimeDelta::try_hours)?;

        let all_jobs = match get(ALL_JOBS_MAX_AGE_ENV) {
            None => AllJobsPolicy::Unfiltered,
            Some(raw) => {
                let days: i64 = parse_or(Some(raw), ALL_JOBS_MAX_AGE_ENV, 0)?;
                AllJobsPolicy::MaxAge(positive_delta(days, ALL_JOBS_MAX_AGE_ENV, TimeDelta::try_days)?)
            }
        };

        let log_format = match get(LOG_FORMAT_ENV).as_deref() {
            Some("json") => LogFormat::Json,
            Some("pretty") | None => LogFormat::Pretty,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: LOG_FORMAT_ENV,
                    reason: format!("expected 'json' or 'pretty', got '{other}'"),
                })
            }
        };

        Ok(Self {
            bind_addr,
            store_path,
            store_timeout,
            identity,
            cors,
            jobs: JobsConfig {
                latest_window,
                all_jobs,
            },
            log_format,
        })
    }
}

fn parse_or<T>(raw: Option<String>, var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(value) => value.parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: e.to_string(),
        }),
    }
}

fn positive_delta(
    amount: i64,
    var: &'static str,
    build: fn(i64) -> Option<TimeDelta>,
) -> Result<TimeDelta, ConfigError> {
    if amount <= 0 {
        return Err(ConfigError::Invalid {
            var,
            reason: "must be greater than zero".to_string(),
        });
    }
    build(amount).ok_or_else(|| ConfigError::Invalid {
        var,
        reason: "out of range".to_string(),
    })
}

fn parse_cors(raw: Option<String>) -> CorsOrigins {
    match raw {
        None => CorsOrigins::Any,
        Some(value) if value == "*" => CorsOrigins::Any,
        Some(value) => CorsOrigins::List(
            value
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
        ),
    }
}
