//! IBM Cloud API interaction module
//!
//! The API client the data sources read through. Flattening never depends
//! on this module; reads receive a client through the [`VpcApi`] and
//! [`PowerApi`] capability traits.
//!
//! # Module Structure
//!
//! - [`auth`] - IAM API-key token exchange with caching
//! - [`client`] - Main client and per-service URL builders
//! - [`http`] - HTTP utilities for REST API calls
//! - [`vpc`] - VPC API capability
//! - [`power`] - Power Virtual Server API capability
//!
//! # Example
//!
//! ```ignore
//! use ibmread::ibm::{ClientSettings, IbmClient, VpcApi};
//!
//! async fn example() -> anyhow::Result<()> {
//!     let client = IbmClient::new(ClientSettings::for_region("us-south"), "api-key")?;
//!     let vni = client.get_virtual_network_interface("0717-abc").await?;
//!     println!("{:?}", vni.result.name);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod http;
pub mod power;
pub mod vpc;

pub use client::{ClientSettings, IbmClient};
pub use http::{format_ibm_error, ApiResponse, TransportMeta};
pub use power::PowerApi;
pub use vpc::VpcApi;
