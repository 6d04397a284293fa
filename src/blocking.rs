// Copyright 2025 Google LLC
// SPDX-License-Identifier: Apache-2.0

//! Blocking variant of the client for callers without an async runtime.
//!
//! Each method drives the async client to completion on an internal
//! current-thread runtime; method policy semantics (timeout, retry,
//! client-info attachment) are identical to the async client.

use std::sync::Arc;

use crate::{
    client,
    errors::Result,
    policy::CallOptions,
    proto::tables::v1alpha1::{
        BatchCreateRowsRequest, BatchCreateRowsResponse, BatchUpdateRowsRequest,
        BatchUpdateRowsResponse, CreateRowRequest, DeleteRowRequest, GetRowRequest,
        GetTableRequest, ListRowsRequest, ListRowsResponse, ListTablesRequest,
        ListTablesResponse, Row, Table, UpdateRowRequest,
    },
    transport::TablesTransport,
};

/// Blocking counterpart of [`crate::TablesClient`].
///
/// Must not be constructed or used from within an async runtime; it blocks
/// the calling thread for the duration of each call.
#[derive(Clone)]
pub struct TablesClient {
    inner: client::TablesClient,
    runtime: Arc<tokio::runtime::Runtime>,
}

impl TablesClient {
    /// Builds a blocking client from the async builder.
    pub fn build(builder: client::TablesClientBuilder) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let inner = runtime.block_on(builder.build())?;
        Ok(Self {
            inner,
            runtime: Arc::new(runtime),
        })
    }

    /// Wraps an already constructed async client.
    pub fn from_async(inner: client::TablesClient) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        Ok(Self {
            inner,
            runtime: Arc::new(runtime),
        })
    }

    pub fn get_table(&self, request: GetTableRequest, options: CallOptions) -> Result<Table> {
        self.runtime.block_on(self.inner.get_table(request, options))
    }

    pub fn list_tables(
        &self,
        request: ListTablesRequest,
        options: CallOptions,
    ) -> Result<ListTablesResponse> {
        self.runtime
            .block_on(self.inner.list_tables(request, options))
    }

    pub fn get_row(&self, request: GetRowRequest, options: CallOptions) -> Result<Row> {
        self.runtime.block_on(self.inner.get_row(request, options))
    }

    pub fn list_rows(
        &self,
        request: ListRowsRequest,
        options: CallOptions,
    ) -> Result<ListRowsResponse> {
        self.runtime.block_on(self.inner.list_rows(request, options))
    }

    pub fn create_row(&self, request: CreateRowRequest, options: CallOptions) -> Result<Row> {
        self.runtime
            .block_on(self.inner.create_row(request, options))
    }

    pub fn batch_create_rows(
        &self,
        request: BatchCreateRowsRequest,
        options: CallOptions,
    ) -> Result<BatchCreateRowsResponse> {
        self.runtime
            .block_on(self.inner.batch_create_rows(request, options))
    }

    pub fn update_row(&self, request: UpdateRowRequest, options: CallOptions) -> Result<Row> {
        self.runtime
            .block_on(self.inner.update_row(request, options))
    }

    pub fn batch_update_rows(
        &self,
        request: BatchUpdateRowsRequest,
        options: CallOptions,
    ) -> Result<BatchUpdateRowsResponse> {
        self.runtime
            .block_on(self.inner.batch_update_rows(request, options))
    }

    pub fn delete_row(&self, request: DeleteRowRequest, options: CallOptions) -> Result<()> {
        self.runtime
            .block_on(self.inner.delete_row(request, options))
    }

    pub fn list_tables_all(&self, request: ListTablesRequest) -> Result<Vec<Table>> {
        self.runtime.block_on(self.inner.list_tables_all(request))
    }

    pub fn list_rows_all(&self, request: ListRowsRequest) -> Result<Vec<Row>> {
        self.runtime.block_on(self.inner.list_rows_all(request))
    }
}

/// Substitutes a custom transport, mirroring
/// [`crate::TablesClient::with_transport`].
pub fn with_transport<T: TablesTransport>(
    transport: T,
    policies: crate::policy::MethodPolicies,
) -> Result<TablesClient> {
    TablesClient::from_async(client::TablesClient::with_transport(transport, policies))
}
