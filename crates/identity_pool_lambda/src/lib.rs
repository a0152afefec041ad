//! AWS-oriented adapters and handlers for the identity pool custom resource.
//!
//! This crate owns runtime integration details (Lambda handler, Cognito
//! Identity client, response upload) on top of the contract and validation
//! primitives in `identity_pool_core`.

pub mod adapters;
pub mod config;
pub mod handlers;
pub mod telemetry;
