// Copyright 2025 Google LLC
// SPDX-License-Identifier: Apache-2.0

use std::{
    future::Future,
    path::PathBuf,
    pin::Pin,
    sync::{Arc, RwLock},
    task::{Context, Poll},
};

use gcp_auth::{CustomServiceAccount, Token, TokenProvider};
use http::{HeaderValue, Request, Response};
use tonic::{body::Body, codegen::Service, transport::Channel};
use tracing::debug;

use crate::errors::{Result, TablesClientError};

/// OAuth scopes the Tables service accepts.
pub const AUTH_SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/drive",
    "https://www.googleapis.com/auth/drive.file",
    "https://www.googleapis.com/auth/drive.readonly",
    "https://www.googleapis.com/auth/spreadsheets",
    "https://www.googleapis.com/auth/spreadsheets.readonly",
];

/// Resolves the identity used for outgoing calls, once, at client
/// construction.
///
/// At most one of `credentials` and `credentials_file` may be given. With
/// neither, ambient discovery (well-known environment variables, metadata
/// server) is attempted. Resolution itself performs no network call; tokens
/// are only fetched when a request goes out.
pub(crate) async fn resolve_credentials(
    credentials: Option<Arc<dyn TokenProvider>>,
    credentials_file: Option<PathBuf>,
) -> Result<Arc<dyn TokenProvider>> {
    match (credentials, credentials_file) {
        (Some(_), Some(_)) => Err(TablesClientError::CredentialSourceConflict),
        (Some(provider), None) => {
            debug!("using explicitly supplied credentials");
            Ok(provider)
        }
        (None, Some(path)) => {
            debug!(path = %path.display(), "loading credentials from file");
            let account = CustomServiceAccount::from_file(&path)
                .map_err(|source| TablesClientError::CredentialLoad { path, source })?;
            Ok(Arc::new(account))
        }
        (None, None) => {
            debug!("discovering ambient credentials");
            gcp_auth::provider()
                .await
                .map_err(TablesClientError::NoCredentialAvailable)
        }
    }
}

/// A thread-safe wrapper around the gRPC channel that injects authentication
/// and diagnostic headers into every outgoing request.
///
/// Tokens are fetched through the resolved [`TokenProvider`], cached, and
/// refreshed only when expired. The `x-goog-api-client` header carries the
/// client-info descriptor; `x-goog-user-project` is added when a quota
/// project is configured. Implements `Service` to act as middleware in the
/// tonic client stack.
#[derive(Clone)]
pub(crate) struct AuthChannel {
    // The underlying gRPC channel used for communication.
    channel: Channel,
    // Scopes requested for every token.
    scopes: Arc<[&'static str]>,
    // Provides tokens for authentication. `None` for plain endpoints
    // (e.g. a local fake of the service).
    token_provider: Option<Arc<dyn TokenProvider>>,
    // Caches the current token.
    token: Arc<RwLock<Option<Arc<Token>>>>,
    // Rendered client-info descriptor.
    api_client_header: HeaderValue,
    // Optional project for quota attribution.
    quota_project_header: Option<HeaderValue>,
}

impl AuthChannel {
    pub(crate) fn new(
        channel: Channel,
        token_provider: Option<Arc<dyn TokenProvider>>,
        scopes: Vec<&'static str>,
        api_client: &str,
        quota_project_id: Option<&str>,
    ) -> Result<Self> {
        Ok(Self {
            channel,
            scopes: scopes.into(),
            token_provider,
            token: Arc::new(RwLock::new(None)),
            api_client_header: HeaderValue::from_str(api_client)?,
            quota_project_header: quota_project_id
                .map(HeaderValue::from_str)
                .transpose()?,
        })
    }

    /// Get a valid cached token if a provider exists.
    fn cached_token(&self) -> Option<Arc<Token>> {
        self.token_provider.as_ref()?;
        self.token
            .read()
            .expect("failed to acquire a read lock")
            .as_ref()
            .filter(|token| !token.has_expired())
            .cloned()
    }
}

impl Service<Request<Body>> for AuthChannel {
    type Response = Response<Body>;
    type Error = TablesClientError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<()>> {
        self.channel.poll_ready(cx).map_err(Into::into)
    }

    // Injects authentication and diagnostic headers, then forwards the
    // request to the underlying channel.
    fn call(&mut self, mut request: Request<Body>) -> Self::Future {
        let cloned_channel = self.channel.clone();
        let cloned_token = self.token.clone();
        let mut inner = std::mem::replace(&mut self.channel, cloned_channel);
        let scopes = self.scopes.clone();
        let token_provider = self.token_provider.clone();
        let api_client_header = self.api_client_header.clone();
        let quota_project_header = self.quota_project_header.clone();

        let auth_token = self.cached_token();

        Box::pin(async move {
            // ensure a valid token when a provider exists: reuse the cached
            // token if still valid, otherwise fetch and cache a new one.
            if let Some(ref provider) = token_provider {
                let token = match auth_token {
                    None => {
                        let new_token = provider.token(&scopes).await?;
                        let mut guard = cloned_token.write().unwrap();
                        *guard = Some(new_token.clone());
                        new_token
                    }
                    Some(token) => token,
                };
                let header = HeaderValue::from_str(&format!("Bearer {}", token.as_str()))?;
                request.headers_mut().insert("authorization", header);
            }
            request
                .headers_mut()
                .insert("x-goog-api-client", api_client_header);
            if let Some(header) = quota_project_header {
                request.headers_mut().insert("x-goog-user-project", header);
            }

            Ok(inner.call(request).await?)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[tokio::test]
    async fn credentials_file_that_cannot_be_read_fails_with_load_error() {
        let err = resolve_credentials(None, Some(PathBuf::from("/definitely/not/here.json")))
            .await
            .map(|_| ())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CredentialLoadFailure);
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
