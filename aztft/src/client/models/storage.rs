use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageAccount {
    pub id:         Option<String>,
    pub properties: Option<StorageAccountProperties>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageAccountProperties {
    pub primary_endpoints: Option<Endpoints>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoints {
    pub blob:  Option<String>,
    pub queue: Option<String>,
    pub table: Option<String>,
    pub file:  Option<String>,
    pub dfs:   Option<String>,
    pub web:   Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectReplicationPolicy {
    pub id:         Option<String>,
    pub properties: Option<ObjectReplicationPolicyProperties>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectReplicationPolicyProperties {
    pub policy_id:           Option<String>,
    /// Either a full storage account id or a bare account name.
    pub source_account:      Option<String>,
    pub destination_account: Option<String>,
}
