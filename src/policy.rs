// Copyright 2025 Google LLC
// SPDX-License-Identifier: Apache-2.0

use std::{future::Future, time::Duration};

use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use tracing::debug;

use crate::errors::{ErrorKind, Result, TablesClientError};

/// Default per-call timeout applied to every operation of the service.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Library name/version descriptor sent with every call as the
/// `x-goog-api-client` header. Only used for service-side diagnostics,
/// never for behavior decisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInfo {
    pub lib_name: String,
    pub lib_version: String,
}

impl Default for ClientInfo {
    fn default() -> Self {
        Self {
            lib_name: env!("CARGO_PKG_NAME").to_string(),
            lib_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl ClientInfo {
    /// Renders the header value attached to outgoing requests.
    pub(crate) fn to_header_value(&self) -> String {
        format!("gl-rust {}/{}", self.lib_name, self.lib_version)
    }
}

/// Retry configuration for a single method.
///
/// An error is retried only when its [`ErrorKind`] appears in `retryable`;
/// delays grow exponentially from `initial_backoff` up to `max_backoff`, and
/// the whole sequence of attempts must fit within `deadline`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrySettings {
    pub retryable: Vec<ErrorKind>,
    pub initial_backoff: Duration,
    pub backoff_multiplier: f64,
    pub max_backoff: Duration,
    pub deadline: Duration,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            retryable: vec![],
            initial_backoff: Duration::from_millis(100),
            backoff_multiplier: 2.0,
            max_backoff: Duration::from_secs(30),
            deadline: Duration::from_secs(60),
        }
    }
}

/// Timeout and retry policy bound to one method at client construction.
///
/// The service configures no retry for any operation, so a transient failure
/// surfaces immediately unless the caller opts in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodPolicy {
    pub timeout: Duration,
    pub retry: Option<RetrySettings>,
}

impl Default for MethodPolicy {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            retry: None,
        }
    }
}

/// The full set of method bindings, one policy per operation. Built once per
/// client instance and immutable afterward.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MethodPolicies {
    pub get_table: MethodPolicy,
    pub list_tables: MethodPolicy,
    pub get_row: MethodPolicy,
    pub list_rows: MethodPolicy,
    pub create_row: MethodPolicy,
    pub batch_create_rows: MethodPolicy,
    pub update_row: MethodPolicy,
    pub batch_update_rows: MethodPolicy,
    pub delete_row: MethodPolicy,
}

/// Per-call overrides for the bound method policy.
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    pub timeout: Option<Duration>,
    pub retry: Option<RetrySettings>,
}

/// Runs one attempt of `op` with the bound policy, retrying on matching
/// error kinds when a retry policy is configured.
pub(crate) async fn invoke<T, F, Fut>(
    method: &'static str,
    policy: &MethodPolicy,
    options: &CallOptions,
    mut op: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let timeout = options.timeout.unwrap_or(policy.timeout);
    let Some(retry) = options.retry.as_ref().or(policy.retry.as_ref()) else {
        return attempt(timeout, op()).await;
    };

    let started = Instant::now();
    let mut backoff = retry.initial_backoff;
    loop {
        match attempt(timeout, op()).await {
            Ok(value) => return Ok(value),
            Err(error) if retry.retryable.contains(&error.kind()) => {
                if started.elapsed() + backoff >= retry.deadline {
                    return Err(error);
                }
                debug!(
                    method,
                    error = %error,
                    delay_ms = backoff.as_millis() as u64,
                    "retrying after transient failure"
                );
                tokio::time::sleep(backoff).await;
                backoff = Duration::from_secs_f64(
                    (backoff.as_secs_f64() * retry.backoff_multiplier)
                        .min(retry.max_backoff.as_secs_f64()),
                );
            }
            Err(error) => return Err(error),
        }
    }
}

async fn attempt<T>(timeout: Duration, fut: impl Future<Output = Result<T>>) -> Result<T> {
    match tokio::time::timeout(timeout, fut).await {
        Ok(result) => result,
        Err(_) => Err(TablesClientError::DeadlineExceeded(format!(
            "no response within {timeout:?}"
        ))),
    }
}
