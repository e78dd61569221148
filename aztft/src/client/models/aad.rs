use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainService {
    pub id:         Option<String>,
    pub properties: Option<DomainServiceProperties>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainServiceProperties {
    #[serde(default)]
    pub replica_sets: Vec<ReplicaSet>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplicaSet {
    pub replica_set_id: Option<String>,
    pub location:       Option<String>,
}
