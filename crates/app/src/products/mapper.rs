//! Conversions between stored items and DynamoDB attribute maps.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;

use crate::products::{
    models::{DateMarker, Item, ItemKey, ProductId},
    store::StoreError,
};

pub(crate) const ATTR_ID: &str = "id";
pub(crate) const ATTR_DATE_MODIFIED: &str = "dateModified";
pub(crate) const ATTR_NAME: &str = "name";
pub(crate) const ATTR_DESCRIPTION: &str = "description";

pub(crate) type Attributes = HashMap<String, AttributeValue>;

pub(crate) fn item_to_attributes(item: &Item) -> Attributes {
    HashMap::from([
        (ATTR_ID.to_string(), AttributeValue::S(item.id.to_string())),
        (
            ATTR_DATE_MODIFIED.to_string(),
            marker_to_attribute(&item.date_modified),
        ),
        (ATTR_NAME.to_string(), AttributeValue::S(item.name.clone())),
        (
            ATTR_DESCRIPTION.to_string(),
            AttributeValue::S(item.description.clone()),
        ),
    ])
}

pub(crate) fn item_from_attributes(attributes: &Attributes) -> Result<Item, StoreError> {
    Ok(Item {
        id: ProductId::new(string_attribute(attributes, ATTR_ID)?),
        date_modified: marker_from_attribute(required(attributes, ATTR_DATE_MODIFIED)?)?,
        name: string_attribute(attributes, ATTR_NAME)?,
        description: string_attribute(attributes, ATTR_DESCRIPTION)?,
    })
}

pub(crate) fn key_to_attributes(key: &ItemKey) -> Attributes {
    let mut attributes = HashMap::from([(ATTR_ID.to_string(), AttributeValue::S(key.id.to_string()))]);

    if let Some(marker) = &key.date_modified {
        attributes.insert(ATTR_DATE_MODIFIED.to_string(), marker_to_attribute(marker));
    }

    attributes
}

pub(crate) fn marker_to_attribute(marker: &DateMarker) -> AttributeValue {
    match marker {
        DateMarker::EpochSeconds(seconds) => AttributeValue::N(seconds.to_string()),
        DateMarker::Rfc3339(value) => AttributeValue::S(value.clone()),
    }
}

fn marker_from_attribute(value: &AttributeValue) -> Result<DateMarker, StoreError> {
    match value {
        AttributeValue::N(number) => number.parse().map(DateMarker::EpochSeconds).map_err(|error| {
            StoreError::InvalidItem(format!("{ATTR_DATE_MODIFIED} is not an integer: {error}"))
        }),
        AttributeValue::S(text) => Ok(DateMarker::Rfc3339(text.clone())),
        _ => Err(StoreError::InvalidItem(format!(
            "{ATTR_DATE_MODIFIED} must be a number or a string"
        ))),
    }
}

fn required<'a>(attributes: &'a Attributes, name: &str) -> Result<&'a AttributeValue, StoreError> {
    attributes
        .get(name)
        .ok_or_else(|| StoreError::InvalidItem(format!("missing attribute {name}")))
}

fn string_attribute(attributes: &Attributes, name: &str) -> Result<String, StoreError> {
    required(attributes, name)?
        .as_s()
        .cloned()
        .map_err(|_ignored| StoreError::InvalidItem(format!("attribute {name} is not a string")))
}
