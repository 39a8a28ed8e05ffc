//! Power Virtual Server API capability

use super::client::IbmClient;
use super::http::ApiResponse;
use crate::model::power::Snapshots;
use anyhow::Result;

/// Calls the Power data sources need.
///
/// Every call is scoped to one workspace and sends its CRN.
#[allow(async_fn_in_trait)]
pub trait PowerApi {
    /// `GET /pcloud/v1/cloud-instances/{cloud_instance_id}/pvm-instances/{instance}/snapshots`
    async fn get_instance_snapshots(
        &self,
        cloud_instance_id: &str,
        instance: &str,
    ) -> Result<ApiResponse<Snapshots>>;
}

impl PowerApi for IbmClient {
    async fn get_instance_snapshots(
        &self,
        cloud_instance_id: &str,
        instance: &str,
    ) -> Result<ApiResponse<Snapshots>> {
        let url = self.power_cloud_instance_url(
            cloud_instance_id,
            &format!("pvm-instances/{}/snapshots", urlencoding::encode(instance)),
        )?;
        self.power_get(cloud_instance_id, &url).await
    }
}
