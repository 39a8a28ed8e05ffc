//! API model nodes
//!
//! Typed snapshots of IBM Cloud API responses. Every value the API may omit
//! is an `Option`, so absence survives decoding and reaches the flatteners
//! as a first-class state.
//!
//! - [`vpc`] - VPC references and the virtual network interface
//! - [`power`] - Power Virtual Server instance snapshots

pub mod power;
pub mod vpc;
