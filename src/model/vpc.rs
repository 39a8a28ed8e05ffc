//! VPC API models

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

/// `resource_type` of a share mount target
pub const SHARE_MOUNT_TARGET: &str = "share_mount_target";
/// `resource_type` of an instance network attachment
pub const INSTANCE_NETWORK_ATTACHMENT: &str = "instance_network_attachment";
/// `resource_type` of a bare metal server network attachment
pub const BARE_METAL_SERVER_NETWORK_ATTACHMENT: &str = "bare_metal_server_network_attachment";

/// Present when the referenced resource has been deleted
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Deleted {
    /// Link to documentation about deleted resources
    pub more_info: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReservedIpReference {
    pub address: Option<String>,
    pub deleted: Option<Deleted>,
    pub href: Option<String>,
    pub id: Option<String>,
    pub name: Option<String>,
    pub resource_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ResourceGroupReference {
    pub href: Option<String>,
    pub id: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SecurityGroupReference {
    pub crn: Option<String>,
    pub deleted: Option<Deleted>,
    pub href: Option<String>,
    pub id: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SubnetReference {
    pub crn: Option<String>,
    pub deleted: Option<Deleted>,
    pub href: Option<String>,
    pub id: Option<String>,
    pub name: Option<String>,
    pub resource_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct VpcReference {
    pub crn: Option<String>,
    pub deleted: Option<Deleted>,
    pub href: Option<String>,
    pub id: Option<String>,
    pub name: Option<String>,
    pub resource_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ZoneReference {
    pub href: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ShareMountTargetReference {
    pub deleted: Option<Deleted>,
    pub href: Option<String>,
    pub id: Option<String>,
    pub name: Option<String>,
    pub resource_type: Option<String>,
}

/// Plain reference to a target resource, used for every attachment kind
/// that has no dedicated reference shape
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TargetReference {
    pub deleted: Option<Deleted>,
    pub href: Option<String>,
    pub id: Option<String>,
    pub name: Option<String>,
    pub resource_type: Option<String>,
}

/// The resource a virtual network interface is attached to.
///
/// Decoded by the `resource_type` discriminant. A share mount target gets
/// its own shape; instance and bare metal server network attachments decode
/// as a plain [`TargetReference`]. A discriminant this crate does not know
/// is kept as [`VirtualNetworkInterfaceTarget::Unrecognized`] instead of
/// failing the whole response, so the flattener can report it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VirtualNetworkInterfaceTarget {
    ShareMountTarget(ShareMountTargetReference),
    Reference(TargetReference),
    Unrecognized { resource_type: Option<String> },
}

impl VirtualNetworkInterfaceTarget {
    /// Wire discriminant of this target
    pub fn resource_type(&self) -> Option<&str> {
        match self {
            Self::ShareMountTarget(_) => Some(SHARE_MOUNT_TARGET),
            Self::Reference(reference) => reference.resource_type.as_deref(),
            Self::Unrecognized { resource_type } => resource_type.as_deref(),
        }
    }
}

impl<'de> Deserialize<'de> for VirtualNetworkInterfaceTarget {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let resource_type = value
            .get("resource_type")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string());

        let target = match resource_type.as_deref() {
            Some(SHARE_MOUNT_TARGET) => {
                Self::ShareMountTarget(serde_json::from_value(value).map_err(de::Error::custom)?)
            },
            Some(INSTANCE_NETWORK_ATTACHMENT | BARE_METAL_SERVER_NETWORK_ATTACHMENT) => {
                Self::Reference(serde_json::from_value(value).map_err(de::Error::custom)?)
            },
            _ => Self::Unrecognized { resource_type },
        };

        Ok(target)
    }
}

/// A virtual network interface as returned by
/// `GET /v1/virtual_network_interfaces/{id}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct VirtualNetworkInterface {
    pub auto_delete: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
    pub crn: Option<String>,
    pub href: Option<String>,
    pub id: Option<String>,
    pub lifecycle_state: Option<String>,
    pub name: Option<String>,
    pub primary_ip: Option<ReservedIpReference>,
    pub resource_group: Option<ResourceGroupReference>,
    pub resource_type: Option<String>,
    pub security_groups: Option<Vec<SecurityGroupReference>>,
    pub subnet: Option<SubnetReference>,
    pub target: Option<VirtualNetworkInterfaceTarget>,
    pub vpc: Option<VpcReference>,
    pub zone: Option<ZoneReference>,
}
