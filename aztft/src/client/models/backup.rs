use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupInstance {
    pub id:         Option<String>,
    pub properties: Option<BackupInstanceProperties>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupInstanceProperties {
    pub data_source_info: Option<DataSourceInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSourceInfo {
    pub datasource_type: Option<DataSourceKind>,
    pub resource_id:     Option<String>,
}

/// `properties.dataSourceInfo.datasourceType`, compared trimmed and case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum DataSourceKind {
    PostgreSqlDatabase,
    Disk,
    BlobStorage,
    Other(String),
}

impl From<String> for DataSourceKind {
    fn from(kind: String) -> Self {
        match kind.trim().to_uppercase().as_str() {
            "MICROSOFT.DBFORPOSTGRESQL/SERVERS/DATABASES" => DataSourceKind::PostgreSqlDatabase,
            "MICROSOFT.COMPUTE/DISKS" => DataSourceKind::Disk,
            "MICROSOFT.STORAGE/STORAGEACCOUNTS/BLOBSERVICES" => DataSourceKind::BlobStorage,
            _ => DataSourceKind::Other(kind),
        }
    }
}

/// A Recovery Services vault backup policy.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtectionPolicy {
    pub id:         Option<String>,
    pub properties: Option<ProtectionPolicyProperties>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtectionPolicyProperties {
    pub backup_management_type: Option<BackupManagementType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum BackupManagementType {
    AzureIaasVm,
    AzureStorage,
    AzureWorkload,
    Other(String),
}

impl From<String> for BackupManagementType {
    fn from(kind: String) -> Self {
        match kind.to_lowercase().as_str() {
            "azureiaasvm" => BackupManagementType::AzureIaasVm,
            "azurestorage" => BackupManagementType::AzureStorage,
            "azureworkload" => BackupManagementType::AzureWorkload,
            _ => BackupManagementType::Other(kind),
        }
    }
}
