use std::collections::HashMap;

use aztft_core::armid::ResourceId;
use lazy_static::lazy_static;

use super::{build_association, build_key_vault, build_storage};
use crate::{client::ClientBuilder, error::Result};

/// Which storage data plane a storage account child lives on, and how its id is shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageItem {
    Queue,
    Table,
    TableEntity,
    Share,
    ShareDirectory,
    ShareFile,
    Container,
    Blob,
    DataLakeFilesystem,
    DataLakePath,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyVaultItem {
    Key,
    Secret,
    Certificate,
    CertificateIssuer,
    ManagedStorageAccount,
    SasTokenDefinition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NicAssociation {
    SecurityGroup,
    ApplicationGatewayBackendAddressPool,
    ApplicationSecurityGroup,
    LoadBalancerBackendAddressPool,
    LoadBalancerNatRule,
}

/// How the import id of a type is assembled from live state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DynamicBuilder {
    Storage(StorageItem),
    StorageObjectReplication,
    KeyVault(KeyVaultItem),
    NetworkInterface(NicAssociation),
    DesktopWorkspaceApplicationGroup,
    ActiveDirectoryDomainService,
}

lazy_static! {
    static ref DYNAMIC_BUILDERS: HashMap<&'static str, DynamicBuilder> = {
        use DynamicBuilder::*;
        HashMap::from([
            ("azurerm_active_directory_domain_service", ActiveDirectoryDomainService),
            ("azurerm_storage_object_replication", StorageObjectReplication),
            ("azurerm_storage_queue", Storage(StorageItem::Queue)),
            ("azurerm_storage_table", Storage(StorageItem::Table)),
            ("azurerm_storage_table_entity", Storage(StorageItem::TableEntity)),
            ("azurerm_storage_share", Storage(StorageItem::Share)),
            ("azurerm_storage_share_directory", Storage(StorageItem::ShareDirectory)),
            ("azurerm_storage_share_file", Storage(StorageItem::ShareFile)),
            ("azurerm_storage_container", Storage(StorageItem::Container)),
            ("azurerm_storage_blob", Storage(StorageItem::Blob)),
            ("azurerm_storage_data_lake_gen2_filesystem", Storage(StorageItem::DataLakeFilesystem)),
            ("azurerm_storage_data_lake_gen2_path", Storage(StorageItem::DataLakePath)),
            ("azurerm_key_vault_key", KeyVault(KeyVaultItem::Key)),
            ("azurerm_key_vault_secret", KeyVault(KeyVaultItem::Secret)),
            ("azurerm_key_vault_certificate", KeyVault(KeyVaultItem::Certificate)),
            ("azurerm_key_vault_certificate_issuer", KeyVault(KeyVaultItem::CertificateIssuer)),
            ("azurerm_key_vault_managed_storage_account", KeyVault(KeyVaultItem::ManagedStorageAccount)),
            (
                "azurerm_key_vault_managed_storage_account_sas_token_definition",
                KeyVault(KeyVaultItem::SasTokenDefinition),
            ),
            (
                "azurerm_network_interface_security_group_association",
                NetworkInterface(NicAssociation::SecurityGroup),
            ),
            (
                "azurerm_network_interface_application_gateway_backend_address_pool_association",
                NetworkInterface(NicAssociation::ApplicationGatewayBackendAddressPool),
            ),
            (
                "azurerm_network_interface_application_security_group_association",
                NetworkInterface(NicAssociation::ApplicationSecurityGroup),
            ),
            (
                "azurerm_network_interface_backend_address_pool_association",
                NetworkInterface(NicAssociation::LoadBalancerBackendAddressPool),
            ),
            (
                "azurerm_network_interface_nat_rule_association",
                NetworkInterface(NicAssociation::LoadBalancerNatRule),
            ),
            (
                "azurerm_virtual_desktop_workspace_application_group_association",
                DesktopWorkspaceApplicationGroup,
            ),
        ])
    };
}

pub fn builder_for(resource_type: &str) -> Option<DynamicBuilder> {
    DYNAMIC_BUILDERS.get(resource_type).copied()
}

impl DynamicBuilder {
    pub async fn build(self, clients: &ClientBuilder, id: &ResourceId, resource_type: &str, spec: &str) -> Result<String> {
        match self {
            DynamicBuilder::Storage(item) => build_storage::build_storage_item(clients, id, item).await,
            DynamicBuilder::StorageObjectReplication => build_storage::build_object_replication(clients, id).await,
            DynamicBuilder::KeyVault(item) => build_key_vault::build_key_vault_item(clients, id, item).await,
            DynamicBuilder::NetworkInterface(association) => {
                build_association::build_network_interface_association(clients, id, association).await
            }
            DynamicBuilder::DesktopWorkspaceApplicationGroup => {
                build_association::build_desktop_workspace_application_group(clients, id).await
            }
            DynamicBuilder::ActiveDirectoryDomainService => {
                build_association::build_active_directory_domain_service(clients, id, resource_type, spec).await
            }
        }
    }
}
