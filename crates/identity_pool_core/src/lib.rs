//! Shared identity pool custom resource primitives.
//!
//! This crate owns the CloudFormation custom resource contract, resource
//! property validation and the physical id guard. It intentionally excludes
//! AWS SDK and Lambda runtime concerns.

pub mod contract;
pub mod physical_id;
pub mod properties;
