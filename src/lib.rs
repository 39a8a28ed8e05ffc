//! Read-only IBM Cloud data sources
//!
//! Queries IBM Cloud VPC and Power Virtual Server resources and flattens
//! the responses into attribute trees shaped by static data source schemas.
//!
//! # Module Structure
//!
//! - [`flatten`] - model-to-attribute-tree flattening
//! - [`model`] - typed API response models
//! - [`datasource`] - read orchestration per data source
//! - [`schema`] - embedded data source schemas
//! - [`ibm`] - IAM authentication and the HTTP API client
//! - [`config`] - persistent configuration

pub mod config;
pub mod datasource;
pub mod flatten;
pub mod ibm;
pub mod model;
pub mod schema;
