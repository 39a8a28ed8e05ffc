//! Data source reads
//!
//! Each data source performs one API call through an injected capability,
//! aborts on error, materializes every top-level attribute and assigns the
//! result's identifier.
//!
//! - [`virtual_network_interface`] - `ibm_is_virtual_network_interface`
//! - [`pi_snapshot`] - `ibm_pi_pvm_snapshots`

pub mod pi_snapshot;
pub mod virtual_network_interface;

use crate::flatten::AttributeMap;
use serde::Serialize;

/// Outcome of a data source read, handed to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadResult {
    pub id: String,
    pub attributes: AttributeMap,
}
