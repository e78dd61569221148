use aztft_core::armid::{ResourceGroupRef, ResourceId};
use url::Url;

use super::dynamic::StorageItem;
use crate::{
    client::ClientBuilder,
    error::{Error, Result},
    util::{client_for, name_at, parse_reference, resource_group_resource},
};

/// Appends `segments` to the path of `base`, e.g. `https://acct.queue.core.windows.net/` + `q1`.
pub(super) fn join_url(id: &ResourceId, base: &str, segments: &[String]) -> Result<String> {
    let invalid = |reason: String| Error::UnexpectedShape {
        id: id.to_string(),
        reason,
    };
    let mut url = Url::parse(base).map_err(|e| invalid(format!("invalid endpoint {:?}: {}", base, e)))?;
    url.path_segments_mut()
        .map_err(|_| invalid(format!("endpoint {:?} cannot have a path", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url.to_string())
}

/// Doubles single quotes so `s` can sit inside an OData string literal.
fn odata_quote(s: &str) -> String {
    s.replace('\'', "''")
}

/// The path of the item below its service endpoint. Names are `[account, service, ...]`.
fn storage_path(id: &ResourceId, item: StorageItem) -> Result<Vec<String>> {
    let path = match item {
        StorageItem::Table => vec![format!("Tables('{}')", odata_quote(name_at(id, 2)?))],
        StorageItem::TableEntity => vec![format!(
            "{}(PartitionKey='{}',RowKey='{}')",
            name_at(id, 2)?,
            odata_quote(name_at(id, 3)?),
            odata_quote(name_at(id, 4)?)
        )],
        _ => {
            name_at(id, 2)?;
            id.names()[2..].iter().map(|name| name.to_string()).collect()
        }
    };
    Ok(path)
}

pub(super) async fn build_storage_item(clients: &ClientBuilder, id: &ResourceId, item: StorageItem) -> Result<String> {
    let (client, resource_group) = client_for(clients, id).await?;
    let account = client
        .get_storage_account(resource_group.name, name_at(id, 0)?)
        .await
        .map_err(Error::retrieval(id))?;

    let endpoints = account
        .properties
        .ok_or_else(|| Error::missing(id, "properties"))?
        .primary_endpoints
        .ok_or_else(|| Error::missing(id, "properties.primaryEndpoints"))?;

    let (endpoint, field) = match item {
        StorageItem::Queue => (endpoints.queue, "properties.primaryEndpoints.queue"),
        StorageItem::Table | StorageItem::TableEntity => (endpoints.table, "properties.primaryEndpoints.table"),
        StorageItem::Share | StorageItem::ShareDirectory | StorageItem::ShareFile => {
            (endpoints.file, "properties.primaryEndpoints.file")
        }
        StorageItem::Container | StorageItem::Blob => (endpoints.blob, "properties.primaryEndpoints.blob"),
        StorageItem::DataLakeFilesystem | StorageItem::DataLakePath => (endpoints.dfs, "properties.primaryEndpoints.dfs"),
    };
    let endpoint = endpoint.ok_or_else(|| Error::missing(id, field))?;

    join_url(id, &endpoint, &storage_path(id, item)?)
}

fn storage_account_id(resource_group: ResourceGroupRef<'_>, account: &str) -> Result<ResourceId> {
    if account.starts_with('/') {
        parse_reference(account)
    } else {
        Ok(resource_group_resource(resource_group, "Microsoft.Storage", "storageAccounts", account))
    }
}

/// `<source account>/objectReplicationPolicies/<policy>;<destination account>/objectReplicationPolicies/<policy>`
pub(super) async fn build_object_replication(clients: &ClientBuilder, id: &ResourceId) -> Result<String> {
    let (client, resource_group) = client_for(clients, id).await?;
    let account = name_at(id, 0)?;
    let policy_name = name_at(id, 1)?;

    let policy = client
        .get_object_replication_policy(resource_group.name, account, policy_name)
        .await
        .map_err(Error::retrieval(id))?;
    let props = policy.properties.ok_or_else(|| Error::missing(id, "properties"))?;

    let policy_id = props.policy_id.as_deref().unwrap_or(policy_name);
    let source = props
        .source_account
        .as_deref()
        .ok_or_else(|| Error::missing(id, "properties.sourceAccount"))?;
    let destination = props.destination_account.as_deref().unwrap_or(account);

    Ok(format!(
        "{}/objectReplicationPolicies/{};{}/objectReplicationPolicies/{}",
        storage_account_id(resource_group, source)?,
        policy_id,
        storage_account_id(resource_group, destination)?,
        policy_id
    ))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::client::{ClientError, MockTransport};

    const ACCOUNT: &str = "/subscriptions/sub1/resourceGroups/rg1/providers/Microsoft.Storage/storageAccounts/acct";

    fn clients() -> ClientBuilder {
        let mock = MockTransport::new();
        mock.insert(
            ACCOUNT,
            json!({
                "id": ACCOUNT,
                "properties": {
                    "primaryEndpoints": {
                        "blob": "https://acct.blob.core.windows.net/",
                        "queue": "https://acct.queue.core.windows.net/",
                        "table": "https://acct.table.core.windows.net/",
                        "file": "https://acct.file.core.windows.net/",
                        "dfs": "https://acct.dfs.core.windows.net/"
                    }
                }
            }),
        );
        ClientBuilder::new(Arc::new(mock))
    }

    async fn build(path: &str, item: StorageItem) -> Result<String> {
        let id = ResourceId::parse(&format!("{}{}", ACCOUNT, path)).unwrap();
        build_storage_item(&clients(), &id, item).await
    }

    #[tokio::test]
    async fn test_queue() {
        assert_eq!(
            build("/queueServices/default/queues/q1", StorageItem::Queue).await.unwrap(),
            "https://acct.queue.core.windows.net/q1"
        );
    }

    #[tokio::test]
    async fn test_nested_items() {
        assert_eq!(
            build("/blobServices/default/containers/c1/blobs/b1", StorageItem::Blob).await.unwrap(),
            "https://acct.blob.core.windows.net/c1/b1"
        );
        assert_eq!(
            build("/fileServices/default/shares/s1/directories/d1", StorageItem::ShareDirectory)
                .await
                .unwrap(),
            "https://acct.file.core.windows.net/s1/d1"
        );
        assert_eq!(
            build("/dfs/default/filesystems/fs1/paths/p1", StorageItem::DataLakePath).await.unwrap(),
            "https://acct.dfs.core.windows.net/fs1/p1"
        );
    }

    #[tokio::test]
    async fn test_tables() {
        assert_eq!(
            build("/tableServices/default/tables/t1", StorageItem::Table).await.unwrap(),
            "https://acct.table.core.windows.net/Tables('t1')"
        );
        assert_eq!(
            build(
                "/tableServices/default/tables/t1/partitionKeys/pk/rowKeys/rk",
                StorageItem::TableEntity
            )
            .await
            .unwrap(),
            "https://acct.table.core.windows.net/t1(PartitionKey='pk',RowKey='rk')"
        );
    }

    #[tokio::test]
    async fn test_table_entity_keys_with_quotes() {
        assert_eq!(
            build(
                "/tableServices/default/tables/t1/partitionKeys/o'brien/rowKeys/it's",
                StorageItem::TableEntity
            )
            .await
            .unwrap(),
            "https://acct.table.core.windows.net/t1(PartitionKey='o''brien',RowKey='it''s')"
        );
    }

    #[tokio::test]
    async fn test_missing_endpoint() {
        let mock = MockTransport::new();
        mock.insert(ACCOUNT, json!({"properties": {"primaryEndpoints": {"blob": "https://acct.blob.core.windows.net/"}}}));
        let id = ResourceId::parse(&format!("{}/queueServices/default/queues/q1", ACCOUNT)).unwrap();

        let err = build_storage_item(&ClientBuilder::new(Arc::new(mock)), &id, StorageItem::Queue)
            .await
            .unwrap_err();
        match err {
            Error::MissingField { field, .. } => assert_eq!(field, "properties.primaryEndpoints.queue"),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_not_found_is_a_retrieval_error() {
        let mock = MockTransport::new();
        mock.insert_error(ACCOUNT, ClientError::NotFound(ACCOUNT.to_string()));
        let id = ResourceId::parse(&format!("{}/queueServices/default/queues/q1", ACCOUNT)).unwrap();

        let err = build_storage_item(&ClientBuilder::new(Arc::new(mock)), &id, StorageItem::Queue)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Retrieval { source: ClientError::NotFound(_), .. }));
    }

    #[tokio::test]
    async fn test_object_replication() {
        let mock = MockTransport::new();
        mock.insert(
            &format!("{}/objectReplicationPolicies/policy1", ACCOUNT),
            json!({
                "properties": {
                    "policyId": "policy1",
                    "sourceAccount": "/subscriptions/sub1/resourceGroups/rg2/providers/Microsoft.Storage/storageAccounts/src",
                    "destinationAccount": "acct"
                }
            }),
        );
        let id = ResourceId::parse(&format!("{}/objectReplicationPolicies/policy1", ACCOUNT)).unwrap();

        assert_eq!(
            build_object_replication(&ClientBuilder::new(Arc::new(mock)), &id).await.unwrap(),
            format!(
                "/subscriptions/sub1/resourceGroups/rg2/providers/Microsoft.Storage/storageAccounts/src/objectReplicationPolicies/policy1;{}/objectReplicationPolicies/policy1",
                ACCOUNT
            )
        );
    }

    #[test]
    fn test_join_url_keeps_base_path() {
        let id = ResourceId::parse(ACCOUNT).unwrap();
        assert_eq!(
            join_url(&id, "https://host/base/", &["a".to_string(), "b c".to_string()]).unwrap(),
            "https://host/base/a/b%20c"
        );
        assert!(join_url(&id, "not a url", &[]).is_err());
    }
}
