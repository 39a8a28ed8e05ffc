//! Reference flatteners
//!
//! One [`Flatten`] implementation per concrete reference shape. Optional
//! scalars are emitted only when present; a `deleted` marker (or any other
//! nested reference) is always bound, as a 0/1 block.

use super::collection::nested_block;
use super::{set_opt, AttributeMap, Flatten, FlattenError};
use crate::model::vpc::{
    Deleted, ReservedIpReference, ResourceGroupReference, SecurityGroupReference,
    ShareMountTargetReference, SubnetReference, TargetReference, VpcReference, ZoneReference,
};

impl Flatten for Deleted {
    fn flatten(&self) -> Result<AttributeMap, FlattenError> {
        let mut map = AttributeMap::new();
        set_opt(&mut map, "more_info", self.more_info.as_deref());
        Ok(map)
    }
}

impl Flatten for ReservedIpReference {
    fn flatten(&self) -> Result<AttributeMap, FlattenError> {
        let mut map = AttributeMap::new();
        set_opt(&mut map, "address", self.address.as_deref());
        map.insert("deleted".to_string(), nested_block(self.deleted.as_ref())?);
        set_opt(&mut map, "href", self.href.as_deref());
        set_opt(&mut map, "id", self.id.as_deref());
        set_opt(&mut map, "name", self.name.as_deref());
        set_opt(&mut map, "resource_type", self.resource_type.as_deref());
        Ok(map)
    }
}

impl Flatten for ResourceGroupReference {
    fn flatten(&self) -> Result<AttributeMap, FlattenError> {
        let mut map = AttributeMap::new();
        set_opt(&mut map, "href", self.href.as_deref());
        set_opt(&mut map, "id", self.id.as_deref());
        set_opt(&mut map, "name", self.name.as_deref());
        Ok(map)
    }
}

impl Flatten for SecurityGroupReference {
    fn flatten(&self) -> Result<AttributeMap, FlattenError> {
        let mut map = AttributeMap::new();
        set_opt(&mut map, "crn", self.crn.as_deref());
        map.insert("deleted".to_string(), nested_block(self.deleted.as_ref())?);
        set_opt(&mut map, "href", self.href.as_deref());
        set_opt(&mut map, "id", self.id.as_deref());
        set_opt(&mut map, "name", self.name.as_deref());
        Ok(map)
    }
}

impl Flatten for SubnetReference {
    fn flatten(&self) -> Result<AttributeMap, FlattenError> {
        let mut map = AttributeMap::new();
        set_opt(&mut map, "crn", self.crn.as_deref());
        map.insert("deleted".to_string(), nested_block(self.deleted.as_ref())?);
        set_opt(&mut map, "href", self.href.as_deref());
        set_opt(&mut map, "id", self.id.as_deref());
        set_opt(&mut map, "name", self.name.as_deref());
        set_opt(&mut map, "resource_type", self.resource_type.as_deref());
        Ok(map)
    }
}

impl Flatten for VpcReference {
    fn flatten(&self) -> Result<AttributeMap, FlattenError> {
        let mut map = AttributeMap::new();
        set_opt(&mut map, "crn", self.crn.as_deref());
        map.insert("deleted".to_string(), nested_block(self.deleted.as_ref())?);
        set_opt(&mut map, "href", self.href.as_deref());
        set_opt(&mut map, "id", self.id.as_deref());
        set_opt(&mut map, "name", self.name.as_deref());
        set_opt(&mut map, "resource_type", self.resource_type.as_deref());
        Ok(map)
    }
}

impl Flatten for ZoneReference {
    fn flatten(&self) -> Result<AttributeMap, FlattenError> {
        let mut map = AttributeMap::new();
        set_opt(&mut map, "href", self.href.as_deref());
        set_opt(&mut map, "name", self.name.as_deref());
        Ok(map)
    }
}

impl Flatten for ShareMountTargetReference {
    fn flatten(&self) -> Result<AttributeMap, FlattenError> {
        let mut map = AttributeMap::new();
        map.insert("deleted".to_string(), nested_block(self.deleted.as_ref())?);
        set_opt(&mut map, "href", self.href.as_deref());
        set_opt(&mut map, "id", self.id.as_deref());
        set_opt(&mut map, "name", self.name.as_deref());
        set_opt(&mut map, "resource_type", self.resource_type.as_deref());
        Ok(map)
    }
}

impl Flatten for TargetReference {
    fn flatten(&self) -> Result<AttributeMap, FlattenError> {
        let mut map = AttributeMap::new();
        map.insert("deleted".to_string(), nested_block(self.deleted.as_ref())?);
        set_opt(&mut map, "href", self.href.as_deref());
        set_opt(&mut map, "id", self.id.as_deref());
        set_opt(&mut map, "name", self.name.as_deref());
        set_opt(&mut map, "resource_type", self.resource_type.as_deref());
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flatten::AttributeValue;

    fn subnet(deleted: Option<Deleted>) -> SubnetReference {
        SubnetReference {
            crn: Some("crn:v1:bluemix:public:is:us-south-1:a/123::subnet:0717-1".to_string()),
            deleted,
            href: Some("https://us-south.iaas.cloud.ibm.com/v1/subnets/0717-1".to_string()),
            id: Some("0717-1".to_string()),
            name: Some("my-subnet".to_string()),
            resource_type: Some("subnet".to_string()),
        }
    }

    #[test]
    fn test_subnet_without_deleted_binds_empty_block() {
        let map = subnet(None).flatten().unwrap();
        assert_eq!(map["deleted"], AttributeValue::List(vec![]));
        assert_eq!(map["id"].as_str(), Some("0717-1"));
        assert_eq!(map.len(), 6);
    }

    #[test]
    fn test_subnet_with_deleted_binds_single_block() {
        let deleted = Deleted {
            more_info: Some("https://x".to_string()),
        };
        let map = subnet(Some(deleted)).flatten().unwrap();

        let block = map["deleted"].as_list().unwrap();
        assert_eq!(block.len(), 1);
        assert_eq!(block[0]["more_info"].as_str(), Some("https://x"));
    }

    #[test]
    fn test_deleted_without_link_is_empty_record() {
        let map = Deleted::default().flatten().unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn test_absent_scalars_are_omitted() {
        let map = ReservedIpReference::default().flatten().unwrap();
        let keys: Vec<_> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["deleted"]);

        let map = ResourceGroupReference::default().flatten().unwrap();
        assert!(map.is_empty());

        let map = ZoneReference {
            href: None,
            name: Some("us-south-1".to_string()),
        }
        .flatten()
        .unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map["name"].as_str(), Some("us-south-1"));
    }

    #[test]
    fn test_security_group_keys_in_declared_order() {
        let sg = SecurityGroupReference {
            crn: Some("crn".to_string()),
            deleted: None,
            href: Some("href".to_string()),
            id: Some("id".to_string()),
            name: Some("name".to_string()),
        };
        let map = sg.flatten().unwrap();
        let keys: Vec<_> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["crn", "deleted", "href", "id", "name"]);
    }

    #[test]
    fn test_target_reference_has_five_keys() {
        let reference = TargetReference {
            href: Some("https://x/network_attachments/a".to_string()),
            id: Some("a".to_string()),
            name: Some("eth0".to_string()),
            resource_type: Some("instance_network_attachment".to_string()),
            ..Default::default()
        };
        let map = reference.flatten().unwrap();

        let keys: Vec<_> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["deleted", "href", "id", "name", "resource_type"]);
        assert_eq!(map["deleted"], AttributeValue::List(vec![]));
    }
}
