// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// This file includes the generated protobuf code from tonic/prost

pub mod librarian {
    pub mod v1 {
        tonic::include_proto!("librarian.v1");
    }
    pub mod porter {
        pub mod v1 {
            tonic::include_proto!("librarian.porter.v1");
        }
    }
    pub mod sephirah {
        pub mod v1 {
            tonic::include_proto!("librarian.sephirah.v1");
        }
    }
}
