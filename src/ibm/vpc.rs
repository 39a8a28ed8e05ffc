//! VPC API capability

use super::client::IbmClient;
use super::http::ApiResponse;
use crate::model::vpc::VirtualNetworkInterface;
use anyhow::Result;

/// Calls the VPC data sources need
#[allow(async_fn_in_trait)]
pub trait VpcApi {
    /// `GET /v1/virtual_network_interfaces/{id}`
    async fn get_virtual_network_interface(
        &self,
        id: &str,
    ) -> Result<ApiResponse<VirtualNetworkInterface>>;
}

impl VpcApi for IbmClient {
    async fn get_virtual_network_interface(
        &self,
        id: &str,
    ) -> Result<ApiResponse<VirtualNetworkInterface>> {
        let url = self.vpc_url(&format!(
            "virtual_network_interfaces/{}",
            urlencoding::encode(id)
        ))?;
        self.get(&url).await
    }
}
