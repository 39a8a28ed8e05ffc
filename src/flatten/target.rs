//! Virtual network interface target resolution
//!
//! The `target` attribute keeps one name in the parent tree while its
//! record shape follows the concrete variant:
//!
//! | Variant | Wire `resource_type` |
//! |---|---|
//! | share mount target | `share_mount_target` |
//! | plain reference | `instance_network_attachment`, `bare_metal_server_network_attachment` |
//!
//! Both records carry `deleted`, `href`, `id`, `name` and `resource_type`.
//! A target whose `resource_type` is not listed fails the flatten. The
//! variant set is stale against the live API at that point, and an empty
//! record would hide it.

use super::{AttributeMap, Flatten, FlattenError};
use crate::model::vpc::VirtualNetworkInterfaceTarget;

const TARGET_INTERFACE: &str = "VirtualNetworkInterfaceTarget";

impl Flatten for VirtualNetworkInterfaceTarget {
    fn flatten(&self) -> Result<AttributeMap, FlattenError> {
        match self {
            Self::ShareMountTarget(reference) => reference.flatten(),
            Self::Reference(reference) => reference.flatten(),
            Self::Unrecognized { resource_type } => {
                tracing::warn!(
                    "Unrecognized {} subtype: {}",
                    TARGET_INTERFACE,
                    self.resource_type().unwrap_or("<none>")
                );
                Err(FlattenError::UnrecognizedVariant {
                    interface: TARGET_INTERFACE,
                    discriminant: resource_type.clone(),
                })
            },
        }
    }
}
