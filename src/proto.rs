// Copyright 2025 Google LLC
// SPDX-License-Identifier: Apache-2.0

// for generated code we ignore all clippy warnings
#![allow(clippy::all)]
// also for generated code we ignore all rustdoc warnings
#![allow(rustdoc::invalid_rust_codeblocks)]
mod google {
    pub mod area120 {
        pub mod tables {
            pub mod v1alpha1 {
                tonic::include_proto!("google.area120.tables.v1alpha1");
            }
        }
    }
}

pub use google::area120::tables;
