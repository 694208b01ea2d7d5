//! Test helpers for vigil-server.

#![allow(dead_code, unused_imports)]

pub mod client;

pub use client::{TestClient, TestResponse, client, logged_client, logged_router, memory_layer, only};
