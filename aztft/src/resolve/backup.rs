use aztft_core::armid::ResourceId;

use crate::{
    client::{
        ClientBuilder,
        models::backup::{BackupManagementType, DataSourceKind},
    },
    error::{Error, Result},
    util::{client_for, name_at},
};

pub(super) async fn resolve_backup_instance(clients: &ClientBuilder, id: &ResourceId) -> Result<&'static str> {
    let (client, resource_group) = client_for(clients, id).await?;
    let instance = client
        .get_backup_instance(resource_group.name, name_at(id, 0)?, name_at(id, 1)?)
        .await
        .map_err(Error::retrieval(id))?;
    let kind = instance
        .properties
        .ok_or_else(|| Error::missing(id, "properties"))?
        .data_source_info
        .ok_or_else(|| Error::missing(id, "properties.dataSourceInfo"))?
        .datasource_type
        .ok_or_else(|| Error::missing(id, "properties.dataSourceInfo.datasourceType"))?;

    match kind {
        DataSourceKind::PostgreSqlDatabase => Ok("azurerm_data_protection_backup_instance_postgresql"),
        DataSourceKind::Disk => Ok("azurerm_data_protection_backup_instance_disk"),
        DataSourceKind::BlobStorage => Ok("azurerm_data_protection_backup_instance_blob_storage"),
        DataSourceKind::Other(value) => Err(Error::UnknownDiscriminator {
            id: id.to_string(),
            field: "properties.dataSourceInfo.datasourceType".to_string(),
            value,
        }),
    }
}

pub(super) async fn resolve_backup_policy(clients: &ClientBuilder, id: &ResourceId) -> Result<&'static str> {
    let (client, resource_group) = client_for(clients, id).await?;
    let policy = client
        .get_backup_protection_policy(resource_group.name, name_at(id, 0)?, name_at(id, 1)?)
        .await
        .map_err(Error::retrieval(id))?;
    let management_type = policy
        .properties
        .ok_or_else(|| Error::missing(id, "properties"))?
        .backup_management_type
        .ok_or_else(|| Error::missing(id, "properties.backupManagementType"))?;

    match management_type {
        BackupManagementType::AzureIaasVm => Ok("azurerm_backup_policy_vm"),
        BackupManagementType::AzureStorage => Ok("azurerm_backup_policy_file_share"),
        BackupManagementType::AzureWorkload => Ok("azurerm_backup_policy_vm_workload"),
        BackupManagementType::Other(value) => Err(Error::UnknownDiscriminator {
            id: id.to_string(),
            field: "properties.backupManagementType".to_string(),
            value,
        }),
    }
}
