// Copyright 2025 Google LLC
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use thiserror::Error;
use tonic::Code;

pub type Result<T> = std::result::Result<T, TablesClientError>;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TablesClientError {
    #[error("'credentials' and 'credentials_file' are mutually exclusive")]
    CredentialSourceConflict,
    #[error("failed to load credentials from `{path}`: {source}")]
    CredentialLoad {
        path: PathBuf,
        #[source]
        source: gcp_auth::Error,
    },
    #[error("no credentials available from the environment: `{0}`")]
    NoCredentialAvailable(#[source] gcp_auth::Error),
    #[error("deadline exceeded: {0}")]
    DeadlineExceeded(String),
    #[error("call canceled: `{0}`")]
    Canceled(String),
    #[error("not found: `{0}`")]
    NotFound(String),
    #[error("invalid argument: `{0}`")]
    InvalidArgument(String),
    #[error("gRPC error: `{0}`")]
    Grpc(tonic::Status),
    #[error("gRPC transport error: `{0}`")]
    GrpcTransport(#[from] tonic::transport::Error),
    #[error("invalid URI: `{0}`")]
    InvalidUri(#[from] http::uri::InvalidUri),
    #[error("gcp auth error: `{0}`")]
    Auth(#[from] gcp_auth::Error),
    #[error("header value error: `{0}`")]
    InvalidHeaderValue(#[from] http::header::InvalidHeaderValue),
    #[error("io error: `{0}`")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of an error, used by retry predicates and callers
/// that branch on failure cause without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    CredentialSourceConflict,
    CredentialLoadFailure,
    NoCredentialAvailable,
    DeadlineExceeded,
    Canceled,
    NotFound,
    InvalidArgument,
    TransportFailure,
}

impl TablesClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::CredentialSourceConflict => ErrorKind::CredentialSourceConflict,
            Self::CredentialLoad { .. } => ErrorKind::CredentialLoadFailure,
            Self::NoCredentialAvailable(_) => ErrorKind::NoCredentialAvailable,
            Self::DeadlineExceeded(_) => ErrorKind::DeadlineExceeded,
            Self::Canceled(_) => ErrorKind::Canceled,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::Grpc(_)
            | Self::GrpcTransport(_)
            | Self::InvalidUri(_)
            | Self::Auth(_)
            | Self::InvalidHeaderValue(_)
            | Self::Io(_) => ErrorKind::TransportFailure,
        }
    }
}

impl From<tonic::Status> for TablesClientError {
    fn from(status: tonic::Status) -> Self {
        let message = status.message().to_string();
        match status.code() {
            Code::NotFound => Self::NotFound(message),
            Code::InvalidArgument => Self::InvalidArgument(message),
            Code::DeadlineExceeded => Self::DeadlineExceeded(message),
            Code::Cancelled => Self::Canceled(message),
            _ => Self::Grpc(status),
        }
    }
}
