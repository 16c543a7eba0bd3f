// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Build Script for tuihub-porter-core
//!
//! Compiles the Librarian protocol definitions used by a porter:
//!
//! - `librarian/v1/common.proto` - shared identifiers and payloads
//! - `librarian/porter/v1/porter.proto` - inbound porter service (server stubs)
//! - `librarian/sephirah/v1/sephirah.proto` - outbound identity calls (client stubs)
//!
//! Generated code is placed in `OUT_DIR` and included via `tonic::include_proto!`
//! in `src/infrastructure/proto.rs`. `protoc` is vendored via `protoc-bin-vendored`.

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set PROTOC environment variable to point to the vendored protoc binary
    std::env::set_var("PROTOC", protoc_bin_vendored::protoc_bin_path().unwrap());

    let protos = [
        "../../proto/librarian/v1/common.proto",
        "../../proto/librarian/porter/v1/porter.proto",
        "../../proto/librarian/sephirah/v1/sephirah.proto",
    ];

    tonic_prost_build::configure()
        .build_server(true)
        .build_client(true)
        .compile_protos(&protos, &["../../proto"])?;

    for proto in protos {
        println!("cargo:rerun-if-changed={proto}");
    }

    Ok(())
}
