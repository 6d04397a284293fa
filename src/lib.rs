// Copyright 2025 Google LLC
// SPDX-License-Identifier: Apache-2.0

//! gRPC client for the Area 120 Tables service (table/row CRUD).
//!
//! Construction resolves a credential once (explicit provider, service
//! account file, or ambient discovery), binds each of the nine operations to
//! a timeout/retry policy, and returns an immutable client that is safe to
//! share across tasks. A blocking variant lives in [`blocking`].
//!
//! ```rust,no_run
//! use area120_tables::{CallOptions, TablesClient};
//! use area120_tables::proto::tables::v1alpha1::GetTableRequest;
//!
//! #[tokio::main]
//! async fn main() -> area120_tables::Result<()> {
//!     let client = TablesClient::builder().build().await?;
//!     let table = client
//!         .get_table(
//!             GetTableRequest { name: "tables/my-table".to_string() },
//!             CallOptions::default(),
//!         )
//!         .await?;
//!     println!("{}", table.display_name);
//!     Ok(())
//! }
//! ```

/// Credential resolution and the authenticated channel middleware.
mod auth;
/// Blocking realization of the client.
pub mod blocking;
/// The async client and its builder.
mod client;
/// Client errors.
pub mod errors;
/// Request metrics.
mod metrics;
/// Per-method timeout/retry policies and client-info.
mod policy;
/// Compiled protobuf definitions.
pub mod proto;
/// The transport capability set and its gRPC realization.
mod transport;

pub use auth::AUTH_SCOPES;
pub use client::{TablesClient, TablesClientBuilder};
pub use errors::{ErrorKind, Result, TablesClientError};
pub use policy::{
    CallOptions, ClientInfo, DEFAULT_TIMEOUT, MethodPolicies, MethodPolicy, RetrySettings,
};
pub use transport::{DEFAULT_HOST, GrpcTransport, TablesTransport};
