//! Power Virtual Server API models

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::BTreeMap;

/// A PVM instance snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub action: Option<String>,
    pub creation_date: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub last_update_date: Option<DateTime<Utc>>,
    /// Required by the API contract
    pub name: Option<String>,
    pub percent_complete: Option<i64>,
    /// Required by the API contract
    #[serde(rename = "snapshotID")]
    pub snapshot_id: Option<String>,
    pub status: Option<String>,
    /// Volume ID to volume snapshot ID
    pub volume_snapshots: Option<BTreeMap<String, String>>,
}

/// Response of `GET .../pvm-instances/{id}/snapshots`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Snapshots {
    pub snapshots: Option<Vec<Snapshot>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_snapshot_decodes_camel_case_fields() {
        let list: Snapshots = serde_json::from_value(json!({
            "snapshots": [{
                "snapshotID": "snap-1",
                "name": "nightly",
                "percentComplete": 100,
                "creationDate": "2024-01-15T10:30:00.000Z",
                "volumeSnapshots": {"vol-a": "vs-a"}
            }]
        }))
        .unwrap();

        let snapshots = list.snapshots.unwrap();
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].snapshot_id.as_deref(), Some("snap-1"));
        assert_eq!(snapshots[0].percent_complete, Some(100));
        assert!(snapshots[0].last_update_date.is_none());
        assert_eq!(
            snapshots[0].volume_snapshots.as_ref().unwrap().get("vol-a"),
            Some(&"vs-a".to_string())
        );
    }

    #[test]
    fn test_missing_snapshot_list_is_none() {
        let list: Snapshots = serde_json::from_value(json!({})).unwrap();
        assert!(list.snapshots.is_none());
    }
}
