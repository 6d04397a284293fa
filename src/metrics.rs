// Copyright 2025 Google LLC
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use prometheus::{
    HistogramVec, IntCounterVec, Registry, register_histogram_vec_with_registry,
    register_int_counter_vec_with_registry,
};

pub(crate) struct Metrics {
    pub(crate) request_success: IntCounterVec,
    pub(crate) request_not_found: IntCounterVec,
    pub(crate) request_errors: IntCounterVec,
    pub(crate) request_latency_ms: HistogramVec,
}

impl Metrics {
    const LABELS: &[&'static str; 2] = &["client", "method"];

    pub(crate) fn new(registry: &Registry) -> Arc<Self> {
        Arc::new(Self {
            request_success: register_int_counter_vec_with_registry!(
                "tables_request_success",
                "Number of successful calls to the Tables service",
                Self::LABELS,
                registry,
            )
            .unwrap(),
            request_not_found: register_int_counter_vec_with_registry!(
                "tables_request_not_found",
                "Number of calls to the Tables service that returned not found",
                Self::LABELS,
                registry,
            )
            .unwrap(),
            request_errors: register_int_counter_vec_with_registry!(
                "tables_request_errors",
                "Number of calls to the Tables service that returned an error",
                Self::LABELS,
                registry,
            )
            .unwrap(),
            request_latency_ms: register_histogram_vec_with_registry!(
                "tables_request_latency_ms",
                "Latency of calls to the Tables service",
                Self::LABELS,
                prometheus::exponential_buckets(1.0, 1.6, 24)
                    .unwrap()
                    .to_vec(),
                registry,
            )
            .unwrap(),
        })
    }
}
