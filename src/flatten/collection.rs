//! Container shapes for nested attributes

use super::{AttributeMap, AttributeValue, Flatten, FlattenError};
use std::collections::BTreeMap;

/// Zero-or-one nested object: absent binds `[]`, present binds `[record]`
pub fn nested_block<T: Flatten>(source: Option<&T>) -> Result<AttributeValue, FlattenError> {
    let block = match source {
        Some(model) => vec![model.flatten()?],
        None => Vec::new(),
    };
    Ok(AttributeValue::List(block))
}

/// Zero-or-many nested objects, in source order.
///
/// An absent or empty source binds `[]`. The first element that fails to
/// flatten fails the whole list.
pub fn nested_list<T: Flatten>(source: Option<&[T]>) -> Result<AttributeValue, FlattenError> {
    let items = source.unwrap_or_default();
    let records = items
        .iter()
        .map(Flatten::flatten)
        .collect::<Result<Vec<AttributeMap>, _>>()?;
    Ok(AttributeValue::List(records))
}

/// Plain string map, passed through unchanged
pub fn string_map(source: Option<&BTreeMap<String, String>>) -> AttributeValue {
    AttributeValue::Map(source.cloned().unwrap_or_default())
}
