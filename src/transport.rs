// Copyright 2025 Google LLC
// SPDX-License-Identifier: Apache-2.0

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use gcp_auth::TokenProvider;
use tonic::transport::{Channel, ClientTlsConfig};

use crate::{
    auth::AuthChannel,
    errors::Result,
    proto::tables::v1alpha1::{
        BatchCreateRowsRequest, BatchCreateRowsResponse, BatchUpdateRowsRequest,
        BatchUpdateRowsResponse, CreateRowRequest, DeleteRowRequest, GetRowRequest,
        GetTableRequest, ListRowsRequest, ListRowsResponse, ListTablesRequest,
        ListTablesResponse, Row, Table, UpdateRowRequest,
        tables_service_client::TablesServiceClient,
    },
};

/// Default service host; port 443 is appended when none is given.
pub const DEFAULT_HOST: &str = "area120tables.googleapis.com";

/// The capability set of the Tables service: one operation per RPC, each a
/// pure mapping from a request message to a response message.
///
/// [`GrpcTransport`] is the production realization; any other transport can
/// be substituted through [`TablesClient::with_transport`] provided it
/// upholds the same request/response contracts.
///
/// [`TablesClient::with_transport`]: crate::TablesClient::with_transport
#[async_trait]
pub trait TablesTransport: Send + Sync + 'static {
    async fn get_table(&self, request: GetTableRequest) -> Result<Table>;
    async fn list_tables(&self, request: ListTablesRequest) -> Result<ListTablesResponse>;
    async fn get_row(&self, request: GetRowRequest) -> Result<Row>;
    async fn list_rows(&self, request: ListRowsRequest) -> Result<ListRowsResponse>;
    async fn create_row(&self, request: CreateRowRequest) -> Result<Row>;
    async fn batch_create_rows(
        &self,
        request: BatchCreateRowsRequest,
    ) -> Result<BatchCreateRowsResponse>;
    async fn update_row(&self, request: UpdateRowRequest) -> Result<Row>;
    async fn batch_update_rows(
        &self,
        request: BatchUpdateRowsRequest,
    ) -> Result<BatchUpdateRowsResponse>;
    async fn delete_row(&self, request: DeleteRowRequest) -> Result<()>;
}

/// Appends the default secure port when the host does not name one.
pub(crate) fn endpoint_uri(host: &str) -> String {
    if host.contains(':') {
        format!("https://{host}")
    } else {
        format!("https://{host}:443")
    }
}

/// gRPC realization of [`TablesTransport`] over an authenticated channel.
#[derive(Clone)]
pub struct GrpcTransport {
    client: TablesServiceClient<AuthChannel>,
}

impl GrpcTransport {
    /// Builds the transport with a lazily connected TLS channel. No network
    /// traffic happens until the first call.
    pub(crate) fn connect(
        host: &str,
        token_provider: Option<Arc<dyn TokenProvider>>,
        scopes: Vec<&'static str>,
        api_client: &str,
        quota_project_id: Option<&str>,
    ) -> Result<Self> {
        let tls_config = ClientTlsConfig::new().with_native_roots();
        let channel = Channel::from_shared(endpoint_uri(host))?
            .http2_keep_alive_interval(Duration::from_secs(60))
            .keep_alive_while_idle(true)
            .tls_config(tls_config)?
            .connect_lazy();
        let auth_channel =
            AuthChannel::new(channel, token_provider, scopes, api_client, quota_project_id)?;
        Ok(Self {
            client: TablesServiceClient::new(auth_channel),
        })
    }
}

#[async_trait]
impl TablesTransport for GrpcTransport {
    async fn get_table(&self, request: GetTableRequest) -> Result<Table> {
        Ok(self.client.clone().get_table(request).await?.into_inner())
    }

    async fn list_tables(&self, request: ListTablesRequest) -> Result<ListTablesResponse> {
        Ok(self.client.clone().list_tables(request).await?.into_inner())
    }

    async fn get_row(&self, request: GetRowRequest) -> Result<Row> {
        Ok(self.client.clone().get_row(request).await?.into_inner())
    }

    async fn list_rows(&self, request: ListRowsRequest) -> Result<ListRowsResponse> {
        Ok(self.client.clone().list_rows(request).await?.into_inner())
    }

    async fn create_row(&self, request: CreateRowRequest) -> Result<Row> {
        Ok(self.client.clone().create_row(request).await?.into_inner())
    }

    async fn batch_create_rows(
        &self,
        request: BatchCreateRowsRequest,
    ) -> Result<BatchCreateRowsResponse> {
        Ok(self
            .client
            .clone()
            .batch_create_rows(request)
            .await?
            .into_inner())
    }

    async fn update_row(&self, request: UpdateRowRequest) -> Result<Row> {
        Ok(self.client.clone().update_row(request).await?.into_inner())
    }

    async fn batch_update_rows(
        &self,
        request: BatchUpdateRowsRequest,
    ) -> Result<BatchUpdateRowsResponse> {
        Ok(self
            .client
            .clone()
            .batch_update_rows(request)
            .await?
            .into_inner())
    }

    async fn delete_row(&self, request: DeleteRowRequest) -> Result<()> {
        self.client.clone().delete_row(request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_uri_appends_default_port() {
        assert_eq!(
            endpoint_uri(DEFAULT_HOST),
            "https://area120tables.googleapis.com:443"
        );
        assert_eq!(endpoint_uri("localhost:8080"), "https://localhost:8080");
    }
}
