use aztft_core::armid::ResourceId;

use super::{build_storage::join_url, dynamic::KeyVaultItem};
use crate::{
    client::ClientBuilder,
    error::{Error, Result},
    util::{client_for, name_at},
};

/// The last path segment of a versioned item url, e.g. `.../keys/key1/<version>`.
fn version_of(id: &ResourceId, uri: &str, field: &str) -> Result<String> {
    match uri.trim_end_matches('/').rsplit_once('/') {
        Some((_, version)) if !version.is_empty() => Ok(version.to_string()),
        _ => Err(Error::UnexpectedShape {
            id:     id.to_string(),
            reason: format!("{} {:?} has no version", field, uri),
        }),
    }
}

/// Key vault items are imported by their data plane url: the vault uri joined with the item path.
pub(super) async fn build_key_vault_item(clients: &ClientBuilder, id: &ResourceId, item: KeyVaultItem) -> Result<String> {
    let (client, resource_group) = client_for(clients, id).await?;
    let vault_name = name_at(id, 0)?;
    let name = name_at(id, 1)?;

    let vault = client
        .get_key_vault(resource_group.name, vault_name)
        .await
        .map_err(Error::retrieval(id))?;
    let vault_uri = vault
        .properties
        .ok_or_else(|| Error::missing(id, "properties"))?
        .vault_uri
        .ok_or_else(|| Error::missing(id, "properties.vaultUri"))?;

    let segments: Vec<String> = match item {
        KeyVaultItem::Key => {
            let key = client
                .get_key_vault_key(resource_group.name, vault_name, name)
                .await
                .map_err(Error::retrieval(id))?;
            let uri = key
                .properties
                .and_then(|p| p.key_uri_with_version)
                .ok_or_else(|| Error::missing(id, "properties.keyUriWithVersion"))?;
            vec!["keys".into(), name.into(), version_of(id, &uri, "keyUriWithVersion")?]
        }
        KeyVaultItem::Secret => {
            let secret = client
                .get_key_vault_secret(resource_group.name, vault_name, name)
                .await
                .map_err(Error::retrieval(id))?;
            let uri = secret
                .properties
                .and_then(|p| p.secret_uri_with_version)
                .ok_or_else(|| Error::missing(id, "properties.secretUriWithVersion"))?;
            vec!["secrets".into(), name.into(), version_of(id, &uri, "secretUriWithVersion")?]
        }
        KeyVaultItem::Certificate => {
            let bundle = client
                .get_key_vault_certificate(&vault_uri, name)
                .await
                .map_err(Error::retrieval(id))?;
            let uri = bundle.id.ok_or_else(|| Error::missing(id, "id"))?;
            vec!["certificates".into(), name.into(), version_of(id, &uri, "id")?]
        }
        KeyVaultItem::CertificateIssuer => vec!["certificates".into(), "issuers".into(), name.into()],
        KeyVaultItem::ManagedStorageAccount => vec!["storage".into(), name.into()],
        KeyVaultItem::SasTokenDefinition => {
            vec!["storage".into(), name.into(), "sas".into(), name_at(id, 2)?.into()]
        }
    };

    join_url(id, &vault_uri, &segments)
}
