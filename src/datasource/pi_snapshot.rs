//! `ibm_pi_pvm_snapshots`

use super::ReadResult;
use crate::flatten::{
    format_timestamp, nested_list, required, set_opt, string_map, AttributeMap, AttributeValue,
    Flatten, FlattenError,
};
use crate::ibm::PowerApi;
use crate::model::power::Snapshot;
use anyhow::{Context, Result};
use uuid::Uuid;

pub const DATA_SOURCE_NAME: &str = "ibm_pi_pvm_snapshots";

pub const ARG_CLOUD_INSTANCE_ID: &str = "pi_cloud_instance_id";
pub const ARG_INSTANCE_NAME: &str = "pi_instance_name";
pub const ATTR_PVM_SNAPSHOTS: &str = "pvm_snapshots";

/// Read the snapshots of a PVM instance.
///
/// A snapshot list has no natural key of its own, so the result gets a
/// random v4 UUID as its identifier. The identifier changes on every read
/// and means nothing beyond that read.
pub async fn read<C: PowerApi>(
    client: &C,
    cloud_instance_id: &str,
    instance_name: &str,
) -> Result<ReadResult> {
    read_with_id(client, cloud_instance_id, instance_name, Uuid::new_v4).await
}

/// [`read`] with the identifier generator supplied by the caller
pub async fn read_with_id<C, F>(
    client: &C,
    cloud_instance_id: &str,
    instance_name: &str,
    new_id: F,
) -> Result<ReadResult>
where
    C: PowerApi,
    F: FnOnce() -> Uuid,
{
    tracing::info!(
        "Reading snapshots of PVM instance {} in {}",
        instance_name,
        cloud_instance_id
    );

    let response = client
        .get_instance_snapshots(cloud_instance_id, instance_name)
        .await
        .with_context(|| format!("GetSnapShotVM failed for {}", instance_name))?;

    tracing::debug!(
        "GetSnapShotVM: status={}, request_id={:?}",
        response.meta.status,
        response.meta.request_id
    );

    let mut attributes = AttributeMap::new();
    attributes.insert(ARG_CLOUD_INSTANCE_ID.to_string(), cloud_instance_id.into());
    attributes.insert(ARG_INSTANCE_NAME.to_string(), instance_name.into());
    attributes.insert(
        ATTR_PVM_SNAPSHOTS.to_string(),
        flatten_pvm_snapshots(response.result.snapshots.as_deref())?,
    );

    Ok(ReadResult {
        id: new_id().to_string(),
        attributes,
    })
}

/// Flatten a snapshot list, in source order
pub fn flatten_pvm_snapshots(list: Option<&[Snapshot]>) -> Result<AttributeValue, FlattenError> {
    tracing::debug!(
        "Flattening {} PVM snapshots",
        list.map(|l| l.len()).unwrap_or(0)
    );
    nested_list(list)
}

impl Flatten for Snapshot {
    fn flatten(&self) -> Result<AttributeMap, FlattenError> {
        let mut map = AttributeMap::new();
        set_opt(&mut map, "action", self.action.as_deref());
        set_opt(
            &mut map,
            "creation_date",
            self.creation_date.as_ref().map(format_timestamp),
        );
        set_opt(&mut map, "description", self.description.as_deref());
        map.insert(
            "id".to_string(),
            required(self.snapshot_id.as_deref(), "Snapshot", "snapshotID")?.into(),
        );
        set_opt(
            &mut map,
            "last_updated_date",
            self.last_update_date.as_ref().map(format_timestamp),
        );
        map.insert(
            "name".to_string(),
            required(self.name.as_deref(), "Snapshot", "name")?.into(),
        );
        set_opt(&mut map, "percent_complete", self.percent_complete);
        set_opt(&mut map, "status", self.status.as_deref());
        map.insert(
            "volume_snapshots".to_string(),
            string_map(self.volume_snapshots.as_ref()),
        );
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ibm::{ApiResponse, TransportMeta};
    use crate::model::power::Snapshots;
    use crate::schema::get_data_source;
    use chrono::{TimeZone, Utc};
    use std::collections::BTreeMap;

    struct FakePower(Vec<Snapshot>);

    impl PowerApi for FakePower {
        async fn get_instance_snapshots(
            &self,
            _cloud_instance_id: &str,
            _instance: &str,
        ) -> Result<ApiResponse<Snapshots>> {
            Ok(ApiResponse {
                result: Snapshots {
                    snapshots: Some(self.0.clone()),
                },
                meta: TransportMeta {
                    status: 200,
                    request_id: None,
                },
            })
        }
    }

    fn snapshot(id: &str) -> Snapshot {
        let mut volumes = BTreeMap::new();
        volumes.insert("vol-1".to_string(), format!("{}-vol-1", id));
        Snapshot {
            action: Some("snapshot".to_string()),
            creation_date: Some(Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap()),
            name: Some(format!("{}-name", id)),
            percent_complete: Some(100),
            snapshot_id: Some(id.to_string()),
            status: Some("available".to_string()),
            volume_snapshots: Some(volumes),
            ..Default::default()
        }
    }

    #[test]
    fn test_snapshot_record() {
        let map = snapshot("s1").flatten().unwrap();

        assert_eq!(map["id"].as_str(), Some("s1"));
        assert_eq!(map["creation_date"].as_str(), Some("2024-03-01T08:00:00.000Z"));
        assert_eq!(map["percent_complete"], AttributeValue::Int(100));
        assert_eq!(
            map["volume_snapshots"].as_map().unwrap()["vol-1"],
            "s1-vol-1"
        );
        assert!(!map.contains_key("description"));
        assert!(!map.contains_key("last_updated_date"));
    }

    #[test]
    fn test_snapshot_without_id_fails() {
        let mut source = snapshot("s1");
        source.snapshot_id = None;
        assert_eq!(
            source.flatten().unwrap_err(),
            FlattenError::MissingField {
                model: "Snapshot",
                field: "snapshotID",
            }
        );
    }

    #[test]
    fn test_snapshot_without_name_fails() {
        let mut source = snapshot("s1");
        source.name = None;
        assert_eq!(
            source.flatten().unwrap_err(),
            FlattenError::MissingField {
                model: "Snapshot",
                field: "name",
            }
        );
    }

    #[test]
    fn test_read_aborts_on_unnamed_snapshot() {
        let mut unnamed = snapshot("s2");
        unnamed.name = None;
        let client = FakePower(vec![snapshot("s1"), unnamed]);

        let err = tokio_test::block_on(read(&client, "guid", "vm-1")).unwrap_err();
        assert_eq!(
            err.downcast_ref::<FlattenError>(),
            Some(&FlattenError::MissingField {
                model: "Snapshot",
                field: "name",
            })
        );
    }

    #[test]
    fn test_snapshot_without_volumes_binds_empty_map() {
        let mut source = snapshot("s1");
        source.volume_snapshots = None;
        let map = source.flatten().unwrap();
        assert_eq!(map["volume_snapshots"], AttributeValue::Map(BTreeMap::new()));
    }

    #[test]
    fn test_empty_list_still_gets_random_id() {
        let client = FakePower(vec![]);
        let first = tokio_test::block_on(read(&client, "guid", "vm-1")).unwrap();
        let second = tokio_test::block_on(read(&client, "guid", "vm-1")).unwrap();

        assert_eq!(first.attributes[ATTR_PVM_SNAPSHOTS], AttributeValue::List(vec![]));
        assert!(Uuid::parse_str(&first.id).is_ok());
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_read_with_supplied_id() {
        let client = FakePower(vec![snapshot("s1"), snapshot("s2")]);
        let fixed = Uuid::from_u128(7);
        let result = tokio_test::block_on(read_with_id(&client, "guid", "vm-1", || fixed)).unwrap();

        assert_eq!(result.id, fixed.to_string());
        let ids: Vec<_> = result.attributes[ATTR_PVM_SNAPSHOTS]
            .as_list()
            .unwrap()
            .iter()
            .map(|r| r["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["s1", "s2"]);
    }

    #[test]
    fn test_read_conforms_to_schema() {
        let client = FakePower(vec![snapshot("s1")]);
        let result = tokio_test::block_on(read(&client, "guid", "vm-1")).unwrap();

        let schema = get_data_source(DATA_SOURCE_NAME).unwrap();
        assert_eq!(schema.validate(&result.attributes), vec![]);
    }

    #[test]
    fn test_flatten_absent_list_is_empty() {
        assert_eq!(flatten_pvm_snapshots(None).unwrap(), AttributeValue::List(vec![]));
    }
}
