//! `ibm_is_virtual_network_interface`

use super::ReadResult;
use crate::flatten::{
    format_timestamp, nested_block, nested_list, required, set_opt, AttributeMap, FlattenError,
};
use crate::ibm::VpcApi;
use crate::model::vpc::VirtualNetworkInterface;
use anyhow::{Context, Result};

pub const DATA_SOURCE_NAME: &str = "ibm_is_virtual_network_interface";

/// Argument naming the interface to read
pub const ARG_VIRTUAL_NETWORK_INTERFACE: &str = "virtual_network_interface";

/// Read one virtual network interface.
///
/// The result's identifier is the interface's own API `id`.
pub async fn read<C: VpcApi>(client: &C, virtual_network_interface: &str) -> Result<ReadResult> {
    tracing::info!("Reading virtual network interface {}", virtual_network_interface);

    let response = client
        .get_virtual_network_interface(virtual_network_interface)
        .await
        .with_context(|| {
            format!(
                "GetVirtualNetworkInterface failed for {}",
                virtual_network_interface
            )
        })?;

    tracing::debug!(
        "GetVirtualNetworkInterface: status={}, request_id={:?}",
        response.meta.status,
        response.meta.request_id
    );

    let vni = response.result;
    let id = required(vni.id.as_deref(), "VirtualNetworkInterface", "id")?.to_string();

    let mut attributes = flatten_virtual_network_interface(&vni)?;
    attributes.insert(
        ARG_VIRTUAL_NETWORK_INTERFACE.to_string(),
        virtual_network_interface.into(),
    );

    Ok(ReadResult { id, attributes })
}

/// Materialize every computed attribute of a virtual network interface
pub fn flatten_virtual_network_interface(
    vni: &VirtualNetworkInterface,
) -> Result<AttributeMap, FlattenError> {
    let mut map = AttributeMap::new();

    set_opt(&mut map, "auto_delete", vni.auto_delete);
    set_opt(&mut map, "created_at", vni.created_at.as_ref().map(format_timestamp));
    set_opt(&mut map, "crn", vni.crn.as_deref());
    set_opt(&mut map, "href", vni.href.as_deref());
    set_opt(&mut map, "lifecycle_state", vni.lifecycle_state.as_deref());
    set_opt(&mut map, "name", vni.name.as_deref());
    map.insert("primary_ip".to_string(), nested_block(vni.primary_ip.as_ref())?);
    map.insert(
        "resource_group".to_string(),
        nested_block(vni.resource_group.as_ref())?,
    );
    set_opt(&mut map, "resource_type", vni.resource_type.as_deref());
    map.insert(
        "security_groups".to_string(),
        nested_list(vni.security_groups.as_deref())?,
    );
    map.insert("subnet".to_string(), nested_block(vni.subnet.as_ref())?);
    map.insert("target".to_string(), nested_block(vni.target.as_ref())?);
    map.insert("vpc".to_string(), nested_block(vni.vpc.as_ref())?);
    map.insert("zone".to_string(), nested_block(vni.zone.as_ref())?);

    Ok(map)
}
