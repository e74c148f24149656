//! DynamoDB products store.

use async_trait::async_trait;
use aws_sdk_dynamodb::{
    Client,
    error::{BuildError, DisplayErrorContext},
    operation::{delete_item::DeleteItemError, update_item::UpdateItemError},
    types::{
        AttributeDefinition, AttributeValue, BillingMode, KeySchemaElement, KeyType,
        ScalarAttributeType,
    },
};
use tracing::debug;

use crate::products::{
    keys::KeySchema,
    mapper::{
        ATTR_DATE_MODIFIED, ATTR_DESCRIPTION, ATTR_ID, ATTR_NAME, item_from_attributes,
        item_to_attributes, key_to_attributes,
    },
    models::{Item, ItemKey, MarkerFormat, Product, ProductId},
    store::{ProductsStore, StoreError},
};

const EXISTS_CONDITION: &str = "attribute_exists(#id)";
const UPDATE_EXPRESSION: &str = "SET #name = :name, #description = :description";

/// Products store backed by a single DynamoDB table.
#[derive(Debug, Clone)]
pub struct DynamoProductsStore {
    client: Client,
    table_name: String,
}

impl DynamoProductsStore {
    #[must_use]
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    #[must_use]
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Create the products table for the given key layout, billed per request.
    ///
    /// # Errors
    ///
    /// Returns an error when the table definition cannot be built or DynamoDB
    /// rejects the request, for example because the table already exists.
    pub async fn create_table(
        &self,
        schema: KeySchema,
        marker_format: MarkerFormat,
    ) -> Result<(), StoreError> {
        let (key_schema, attributes) = table_definition(schema, marker_format)
            .map_err(|error| StoreError::request("create table", error.to_string()))?;

        self.client
            .create_table()
            .table_name(&self.table_name)
            .set_key_schema(Some(key_schema))
            .set_attribute_definitions(Some(attributes))
            .billing_mode(BillingMode::PayPerRequest)
            .send()
            .await
            .map_err(|error| {
                StoreError::request("create table", DisplayErrorContext(&error).to_string())
            })?;

        Ok(())
    }
}

/// Key schema and attribute definitions for a products table.
///
/// # Errors
///
/// Returns an error if a definition is missing a required field.
pub fn table_definition(
    schema: KeySchema,
    marker_format: MarkerFormat,
) -> Result<(Vec<KeySchemaElement>, Vec<AttributeDefinition>), BuildError> {
    let mut key_schema = vec![
        KeySchemaElement::builder()
            .attribute_name(ATTR_ID)
            .key_type(KeyType::Hash)
            .build()?,
    ];

    let mut attributes = vec![
        AttributeDefinition::builder()
            .attribute_name(ATTR_ID)
            .attribute_type(ScalarAttributeType::S)
            .build()?,
    ];

    if schema == KeySchema::Composite {
        let marker_type = match marker_format {
            MarkerFormat::EpochSeconds => ScalarAttributeType::N,
            MarkerFormat::Rfc3339 => ScalarAttributeType::S,
        };

        key_schema.push(
            KeySchemaElement::builder()
                .attribute_name(ATTR_DATE_MODIFIED)
                .key_type(KeyType::Range)
                .build()?,
        );

        attributes.push(
            AttributeDefinition::builder()
                .attribute_name(ATTR_DATE_MODIFIED)
                .attribute_type(marker_type)
                .build()?,
        );
    }

    Ok((key_schema, attributes))
}

#[async_trait]
impl ProductsStore for DynamoProductsStore {
    async fn put_item(&self, item: Item) -> Result<(), StoreError> {
        debug!(table = %self.table_name, id = %item.id, "putting item");

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item_to_attributes(&item)))
            .send()
            .await
            .map_err(|error| StoreError::request("put item", DisplayErrorContext(&error).to_string()))?;

        Ok(())
    }

    async fn query_items(&self, id: &ProductId, limit: i32) -> Result<Vec<Item>, StoreError> {
        debug!(table = %self.table_name, %id, limit, "querying items");

        let output = self
            .client
            .query()
            .table_name(&self.table_name)
            .key_condition_expression("#id = :id")
            .expression_attribute_names("#id", ATTR_ID)
            .expression_attribute_values(":id", AttributeValue::S(id.to_string()))
            .limit(limit)
            .send()
            .await
            .map_err(|error| StoreError::request("query", DisplayErrorContext(&error).to_string()))?;

        output.items().iter().map(item_from_attributes).collect()
    }

    async fn update_item_if_exists(
        &self,
        key: &ItemKey,
        product: &Product,
    ) -> Result<(), StoreError> {
        debug!(table = %self.table_name, id = %key.id, "updating item");

        let result = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .set_key(Some(key_to_attributes(key)))
            .update_expression(UPDATE_EXPRESSION)
            .condition_expression(EXISTS_CONDITION)
            .expression_attribute_names("#id", ATTR_ID)
            .expression_attribute_names("#name", ATTR_NAME)
            .expression_attribute_names("#description", ATTR_DESCRIPTION)
            .expression_attribute_values(":name", AttributeValue::S(product.name.clone()))
            .expression_attribute_values(
                ":description",
                AttributeValue::S(product.description.clone()),
            )
            .send()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(error)
                if error
                    .as_service_error()
                    .is_some_and(UpdateItemError::is_conditional_check_failed_exception) =>
            {
                Err(StoreError::ConditionFailed)
            }
            Err(error) => Err(StoreError::request(
                "update item",
                DisplayErrorContext(&error).to_string(),
            )),
        }
    }

    async fn delete_item_if_exists(&self, key: &ItemKey) -> Result<(), StoreError> {
        debug!(table = %self.table_name, id = %key.id, "deleting item");

        let result = self
            .client
            .delete_item()
            .table_name(&self.table_name)
            .set_key(Some(key_to_attributes(key)))
            .condition_expression(EXISTS_CONDITION)
            .expression_attribute_names("#id", ATTR_ID)
            .send()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(error)
                if error
                    .as_service_error()
                    .is_some_and(DeleteItemError::is_conditional_check_failed_exception) =>
            {
                Err(StoreError::ConditionFailed)
            }
            Err(error) => Err(StoreError::request(
                "delete item",
                DisplayErrorContext(&error).to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn test_simple_table_is_keyed_on_id() -> TestResult {
        let (key_schema, attributes) =
            table_definition(KeySchema::Simple, MarkerFormat::EpochSeconds)?;

        let names: Vec<_> = key_schema.iter().map(KeySchemaElement::attribute_name).collect();

        assert_eq!(names, vec![ATTR_ID]);
        assert_eq!(attributes.len(), 1);

        Ok(())
    }

    #[test]
    fn test_composite_table_sorts_on_marker() -> TestResult {
        let (key_schema, attributes) =
            table_definition(KeySchema::Composite, MarkerFormat::Rfc3339)?;

        let keys: Vec<_> = key_schema
            .iter()
            .map(|element| (element.attribute_name(), element.key_type().clone()))
            .collect();

        assert_eq!(
            keys,
            vec![(ATTR_ID, KeyType::Hash), (ATTR_DATE_MODIFIED, KeyType::Range)]
        );

        let marker = attributes
            .iter()
            .find(|attribute| attribute.attribute_name() == ATTR_DATE_MODIFIED)
            .map(|attribute| attribute.attribute_type().clone());

        assert_eq!(marker, Some(ScalarAttributeType::S));

        Ok(())
    }
}
