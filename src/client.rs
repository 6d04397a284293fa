// Copyright 2025 Google LLC
// SPDX-License-Identifier: Apache-2.0

use std::{future::Future, path::PathBuf, sync::Arc, time::Instant};

use gcp_auth::TokenProvider;
use prometheus::Registry;
use tracing::debug;

use crate::{
    auth::{self, AUTH_SCOPES},
    errors::{ErrorKind, Result},
    metrics::Metrics,
    policy::{self, CallOptions, ClientInfo, MethodPolicies, MethodPolicy},
    proto::tables::v1alpha1::{
        BatchCreateRowsRequest, BatchCreateRowsResponse, BatchUpdateRowsRequest,
        BatchUpdateRowsResponse, CreateRowRequest, DeleteRowRequest, GetRowRequest,
        GetTableRequest, ListRowsRequest, ListRowsResponse, ListTablesRequest,
        ListTablesResponse, Row, Table, UpdateRowRequest,
    },
    transport::{DEFAULT_HOST, GrpcTransport, TablesTransport},
};

/// A high-level client for the Tables service.
///
/// Construction resolves credentials and binds each operation to its method
/// policy exactly once; afterwards the client is immutable and can be shared
/// freely across concurrent callers (cloning is cheap).
#[derive(Clone)]
pub struct TablesClient {
    transport: Arc<dyn TablesTransport>,
    policies: Arc<MethodPolicies>,
    client_name: String,
    metrics: Option<Arc<Metrics>>,
}

impl TablesClient {
    pub fn builder() -> TablesClientBuilder {
        TablesClientBuilder::default()
    }

    /// Wraps an arbitrary transport realization with the given method
    /// policies. This is how a different wire protocol (or an in-memory fake
    /// in tests) is substituted without changing caller code.
    pub fn with_transport<T: TablesTransport>(transport: T, policies: MethodPolicies) -> Self {
        Self {
            transport: Arc::new(transport),
            policies: Arc::new(policies),
            client_name: "custom".to_string(),
            metrics: None,
        }
    }

    /// Gets a table. Fails with a not-found kind if the table does not exist.
    pub async fn get_table(
        &self,
        request: GetTableRequest,
        options: CallOptions,
    ) -> Result<Table> {
        let transport = self.transport.clone();
        self.call("get_table", &self.policies.get_table, &options, move || {
            let transport = transport.clone();
            let request = request.clone();
            async move { transport.get_table(request).await }
        })
        .await
    }

    /// Lists a single page of tables.
    pub async fn list_tables(
        &self,
        request: ListTablesRequest,
        options: CallOptions,
    ) -> Result<ListTablesResponse> {
        let transport = self.transport.clone();
        self.call(
            "list_tables",
            &self.policies.list_tables,
            &options,
            move || {
                let transport = transport.clone();
                let request = request.clone();
                async move { transport.list_tables(request).await }
            },
        )
        .await
    }

    /// Gets a row. Fails with a not-found kind if the row does not exist.
    pub async fn get_row(&self, request: GetRowRequest, options: CallOptions) -> Result<Row> {
        let transport = self.transport.clone();
        self.call("get_row", &self.policies.get_row, &options, move || {
            let transport = transport.clone();
            let request = request.clone();
            async move { transport.get_row(request).await }
        })
        .await
    }

    /// Lists a single page of rows in a table.
    pub async fn list_rows(
        &self,
        request: ListRowsRequest,
        options: CallOptions,
    ) -> Result<ListRowsResponse> {
        let transport = self.transport.clone();
        self.call("list_rows", &self.policies.list_rows, &options, move || {
            let transport = transport.clone();
            let request = request.clone();
            async move { transport.list_rows(request).await }
        })
        .await
    }

    /// Creates a row.
    pub async fn create_row(
        &self,
        request: CreateRowRequest,
        options: CallOptions,
    ) -> Result<Row> {
        let transport = self.transport.clone();
        self.call(
            "create_row",
            &self.policies.create_row,
            &options,
            move || {
                let transport = transport.clone();
                let request = request.clone();
                async move { transport.create_row(request).await }
            },
        )
        .await
    }

    /// Creates multiple rows. The response preserves request order.
    pub async fn batch_create_rows(
        &self,
        request: BatchCreateRowsRequest,
        options: CallOptions,
    ) -> Result<BatchCreateRowsResponse> {
        let transport = self.transport.clone();
        self.call(
            "batch_create_rows",
            &self.policies.batch_create_rows,
            &options,
            move || {
                let transport = transport.clone();
                let request = request.clone();
                async move { transport.batch_create_rows(request).await }
            },
        )
        .await
    }

    /// Updates a row. Only the fields named by the update mask are applied;
    /// all others retain their prior values.
    pub async fn update_row(
        &self,
        request: UpdateRowRequest,
        options: CallOptions,
    ) -> Result<Row> {
        let transport = self.transport.clone();
        self.call(
            "update_row",
            &self.policies.update_row,
            &options,
            move || {
                let transport = transport.clone();
                let request = request.clone();
                async move { transport.update_row(request).await }
            },
        )
        .await
    }

    /// Updates multiple rows. The response preserves request order.
    pub async fn batch_update_rows(
        &self,
        request: BatchUpdateRowsRequest,
        options: CallOptions,
    ) -> Result<BatchUpdateRowsResponse> {
        let transport = self.transport.clone();
        self.call(
            "batch_update_rows",
            &self.policies.batch_update_rows,
            &options,
            move || {
                let transport = transport.clone();
                let request = request.clone();
                async move { transport.batch_update_rows(request).await }
            },
        )
        .await
    }

    /// Deletes a row. Fails with a not-found kind if the row does not exist.
    pub async fn delete_row(&self, request: DeleteRowRequest, options: CallOptions) -> Result<()> {
        let transport = self.transport.clone();
        self.call(
            "delete_row",
            &self.policies.delete_row,
            &options,
            move || {
                let transport = transport.clone();
                let request = request.clone();
                async move { transport.delete_row(request).await }
            },
        )
        .await
    }

    /// Follows next-page tokens until exhaustion and returns all tables.
    /// `page_token` in the request is used as the starting cursor.
    pub async fn list_tables_all(&self, mut request: ListTablesRequest) -> Result<Vec<Table>> {
        let mut tables = vec![];
        loop {
            let response = self.list_tables(request.clone(), CallOptions::default()).await?;
            tables.extend(response.tables);
            if response.next_page_token.is_empty() {
                return Ok(tables);
            }
            request.page_token = response.next_page_token;
        }
    }

    /// Follows next-page tokens until exhaustion and returns all rows of a
    /// table. `page_token` in the request is used as the starting cursor.
    pub async fn list_rows_all(&self, mut request: ListRowsRequest) -> Result<Vec<Row>> {
        let mut rows = vec![];
        loop {
            let response = self.list_rows(request.clone(), CallOptions::default()).await?;
            rows.extend(response.rows);
            if response.next_page_token.is_empty() {
                return Ok(rows);
            }
            request.page_token = response.next_page_token;
        }
    }

    async fn call<T, F, Fut>(
        &self,
        method: &'static str,
        policy: &MethodPolicy,
        options: &CallOptions,
        op: F,
    ) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let started = Instant::now();
        let result = policy::invoke(method, policy, options, op).await;
        let Some(metrics) = &self.metrics else {
            return result;
        };
        let labels = [self.client_name.as_str(), method];
        match &result {
            Ok(_) => {
                metrics.request_success.with_label_values(&labels).inc();
                metrics
                    .request_latency_ms
                    .with_label_values(&labels)
                    .observe(started.elapsed().as_millis() as f64);
            }
            Err(error) if error.kind() == ErrorKind::NotFound => {
                metrics.request_not_found.with_label_values(&labels).inc();
            }
            Err(_) => {
                metrics.request_errors.with_label_values(&labels).inc();
            }
        }
        result
    }
}

/// Builder for [`TablesClient`].
///
/// At most one of [`credentials`](Self::credentials) and
/// [`credentials_file`](Self::credentials_file) may be given; with neither,
/// ambient discovery is attempted. All resolution and policy binding happens
/// in [`build`](Self::build); failures there are fatal to client creation and
/// never deferred to the first call.
pub struct TablesClientBuilder {
    host: String,
    credentials: Option<Arc<dyn TokenProvider>>,
    credentials_file: Option<PathBuf>,
    scopes: Vec<&'static str>,
    quota_project_id: Option<String>,
    client_info: ClientInfo,
    client_name: String,
    policies: MethodPolicies,
    metrics: Option<Arc<Metrics>>,
}

impl Default for TablesClientBuilder {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            credentials: None,
            credentials_file: None,
            scopes: AUTH_SCOPES.to_vec(),
            quota_project_id: None,
            client_info: ClientInfo::default(),
            client_name: "default".to_string(),
            policies: MethodPolicies::default(),
            metrics: None,
        }
    }
}

impl TablesClientBuilder {
    /// Overrides the service host. Port 443 is assumed when none is given.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Uses an explicitly supplied token provider. Mutually exclusive with
    /// [`credentials_file`](Self::credentials_file).
    pub fn credentials(mut self, provider: Arc<dyn TokenProvider>) -> Self {
        self.credentials = Some(provider);
        self
    }

    /// Loads credentials from a service account file. Mutually exclusive
    /// with [`credentials`](Self::credentials).
    pub fn credentials_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.credentials_file = Some(path.into());
        self
    }

    /// Replaces the default auth scopes.
    pub fn scopes(mut self, scopes: Vec<&'static str>) -> Self {
        self.scopes = scopes;
        self
    }

    /// Project used for quota and billing attribution.
    pub fn quota_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.quota_project_id = Some(project_id.into());
        self
    }

    /// Library descriptor sent with every call. Only needed when building a
    /// client library on top of this one.
    pub fn client_info(mut self, client_info: ClientInfo) -> Self {
        self.client_info = client_info;
        self
    }

    /// Label under which this client's metrics are reported.
    pub fn client_name(mut self, name: impl Into<String>) -> Self {
        self.client_name = name.into();
        self
    }

    /// Overrides the per-method timeout/retry policies.
    pub fn method_policies(mut self, policies: MethodPolicies) -> Self {
        self.policies = policies;
        self
    }

    /// Registers request metrics with the given registry.
    pub fn metrics_registry(mut self, registry: &Registry) -> Self {
        self.metrics = Some(Metrics::new(registry));
        self
    }

    /// Resolves credentials, binds method policies, and builds the client.
    /// The underlying channel connects lazily on first use.
    pub async fn build(self) -> Result<TablesClient> {
        let provider =
            auth::resolve_credentials(self.credentials, self.credentials_file).await?;
        debug!(host = %self.host, "constructing Tables client");
        let transport = GrpcTransport::connect(
            &self.host,
            Some(provider),
            self.scopes,
            &self.client_info.to_header_value(),
            self.quota_project_id.as_deref(),
        )?;
        Ok(TablesClient {
            transport: Arc::new(transport),
            policies: Arc::new(self.policies),
            client_name: self.client_name,
            metrics: self.metrics,
        })
    }
}
