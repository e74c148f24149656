use clap::Args;
use storefront_app::{config::StoreConfig, products::dynamo::DynamoProductsStore};

#[derive(Debug, Args)]
pub(crate) struct CreateTableArgs {
    #[command(flatten)]
    store: StoreConfig,
}

pub(crate) async fn run(args: CreateTableArgs) -> Result<(), String> {
    let CreateTableArgs { store: config } = args;

    if config.table_name.trim().is_empty() {
        return Err("table name cannot be empty".to_string());
    }

    let client = config.dynamodb_client().await;
    let store = DynamoProductsStore::new(client, &config.table_name);

    store
        .create_table(config.key_schema, config.marker_format)
        .await
        .map_err(|error| format!("failed to create table: {error}"))?;

    println!("table: {}", store.table_name());
    println!("key_schema: {:?}", config.key_schema);
    println!("marker_format: {:?}", config.marker_format);

    Ok(())
}
