use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vault {
    pub id:         Option<String>,
    pub properties: Option<VaultProperties>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultProperties {
    /// e.g. `https://vault1.vault.azure.net/`
    pub vault_uri: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultKey {
    pub properties: Option<VaultKeyProperties>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultKeyProperties {
    pub key_uri:              Option<String>,
    pub key_uri_with_version: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultSecret {
    pub properties: Option<VaultSecretProperties>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultSecretProperties {
    pub secret_uri:              Option<String>,
    pub secret_uri_with_version: Option<String>,
}

/// Data plane certificate. `id` is `<vault uri>certificates/<name>/<version>`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CertificateBundle {
    pub id: Option<String>,
}
