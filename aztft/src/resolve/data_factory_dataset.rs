use aztft_core::armid::ResourceId;

use crate::{
    client::{ClientBuilder, models::datafactory::DatasetKind},
    error::{Error, Result},
    util::{client_for, name_at},
};

fn dataset_type(kind: &DatasetKind) -> Option<&'static str> {
    let resource_type = match kind {
        DatasetKind::AzureBlob => "azurerm_data_factory_dataset_azure_blob",
        DatasetKind::AzurePostgreSqlTable => "azurerm_data_factory_dataset_postgresql",
        DatasetKind::Binary => "azurerm_data_factory_dataset_binary",
        DatasetKind::CustomDataset => "azurerm_data_factory_custom_dataset",
        DatasetKind::DelimitedText => "azurerm_data_factory_dataset_delimited_text",
        DatasetKind::DocumentDbCollection => "azurerm_data_factory_dataset_cosmosdb_sqlapi",
        DatasetKind::HttpFile => "azurerm_data_factory_dataset_http",
        DatasetKind::Json => "azurerm_data_factory_dataset_json",
        DatasetKind::MySqlTable => "azurerm_data_factory_dataset_mysql",
        DatasetKind::Parquet => "azurerm_data_factory_dataset_parquet",
        DatasetKind::SnowflakeTable => "azurerm_data_factory_dataset_snowflake",
        DatasetKind::SqlServerTable => "azurerm_data_factory_dataset_sql_server_table",
        DatasetKind::Other(_) => return None,
    };
    Some(resource_type)
}

pub(super) async fn resolve_data_factory_dataset(clients: &ClientBuilder, id: &ResourceId) -> Result<&'static str> {
    let (client, resource_group) = client_for(clients, id).await?;
    let dataset = client
        .get_data_factory_dataset(resource_group.name, name_at(id, 0)?, name_at(id, 1)?)
        .await
        .map_err(Error::retrieval(id))?;
    let kind = dataset
        .properties
        .ok_or_else(|| Error::missing(id, "properties"))?
        .kind
        .ok_or_else(|| Error::missing(id, "properties.type"))?;

    dataset_type(&kind).ok_or_else(|| Error::UnknownDiscriminator {
        id:    id.to_string(),
        field: "properties.type".to_string(),
        value: match kind {
            DatasetKind::Other(kind) => kind,
            known => format!("{:?}", known),
        },
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::{catalog::Catalog, client::MockTransport};

    const DATASET: &str = "/subscriptions/sub1/resourceGroups/rg1/providers/Microsoft.DataFactory/factories/df1/datasets/ds1";

    async fn resolve(kind: &str) -> Result<&'static str> {
        let mock = MockTransport::new();
        mock.insert(DATASET, json!({"properties": {"type": kind, "linkedServiceName": {"referenceName": "ls1"}}}));
        resolve_data_factory_dataset(&ClientBuilder::new(Arc::new(mock)), &ResourceId::parse(DATASET).unwrap()).await
    }

    #[tokio::test]
    async fn test_known_kinds() {
        assert_eq!(resolve("Parquet").await.unwrap(), "azurerm_data_factory_dataset_parquet");
        assert_eq!(
            resolve("DocumentDbCollection").await.unwrap(),
            "azurerm_data_factory_dataset_cosmosdb_sqlapi"
        );
        assert_eq!(resolve("MySqlTable").await.unwrap(), "azurerm_data_factory_dataset_mysql");
    }

    #[tokio::test]
    async fn test_unknown_kind() {
        match resolve("Avro").await {
            Err(Error::UnknownDiscriminator { field, value, .. }) => {
                assert_eq!(field, "properties.type");
                assert_eq!(value, "Avro");
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_every_kind_maps_to_a_distinct_catalog_type() {
        let kinds = [
            DatasetKind::AzureBlob,
            DatasetKind::AzurePostgreSqlTable,
            DatasetKind::Binary,
            DatasetKind::CustomDataset,
            DatasetKind::DelimitedText,
            DatasetKind::DocumentDbCollection,
            DatasetKind::HttpFile,
            DatasetKind::Json,
            DatasetKind::MySqlTable,
            DatasetKind::Parquet,
            DatasetKind::SnowflakeTable,
            DatasetKind::SqlServerTable,
        ];
        let mut seen = std::collections::HashSet::new();
        for kind in &kinds {
            let resource_type = dataset_type(kind).unwrap();
            assert!(Catalog::builtin().lookup(resource_type).is_some(), "{}", resource_type);
            assert!(seen.insert(resource_type));
        }
    }
}
