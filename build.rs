// Copyright 2025 Google LLC
// SPDX-License-Identifier: Apache-2.0

use std::path::Path;

const PROTO_ROOT: &str = "proto";

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

fn main() -> Result<()> {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed={PROTO_ROOT}");

    tonic_build::configure()
        // the service is implemented on the Google side, no server codegen needed.
        .build_server(false)
        // deterministic column iteration order for row values.
        .btree_map([".google.area120.tables.v1alpha1.Row.values"])
        .compile_protos(
            &[Path::new(PROTO_ROOT).join("google/area120/tables/v1alpha1/tables.proto")],
            &[PROTO_ROOT],
        )?;

    Ok(())
}
