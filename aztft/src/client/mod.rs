//! Read-only access to the Azure management plane (and the key vault data plane).
//!
//! Everything goes through an [`ArmTransport`]: [`HttpTransport`] talks to Azure,
//! [`MockTransport`] serves canned responses. [`ArmClient`] layers the typed getters
//! the resolvers, builders and populators need on top of a transport.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use serde::de::DeserializeOwned;

pub mod builder;
pub mod credential;
pub mod http;
pub mod mock;
pub mod models;

pub use builder::ClientBuilder;
pub use credential::Credential;
pub use http::HttpTransport;
pub use mock::MockTransport;

use models::{
    aad::DomainService,
    backup::{BackupInstance, ProtectionPolicy},
    compute::{DevTestVirtualMachine, VirtualMachine, VirtualMachineScaleSet},
    datafactory::Dataset,
    desktop::Workspace,
    keyvault::{CertificateBundle, Vault, VaultKey, VaultSecret},
    network::NetworkInterface,
    storage::{ObjectReplicationPolicy, StorageAccount},
};

const COMPUTE_API_VERSION: &str = "2024-07-01";
const DEVTESTLAB_API_VERSION: &str = "2018-09-15";
const STORAGE_API_VERSION: &str = "2023-05-01";
const KEYVAULT_API_VERSION: &str = "2023-07-01";
const KEYVAULT_DATA_API_VERSION: &str = "7.4";
const NETWORK_API_VERSION: &str = "2024-05-01";
const DATAFACTORY_API_VERSION: &str = "2018-06-01";
const DATAPROTECTION_API_VERSION: &str = "2024-04-01";
const RECOVERYSERVICES_API_VERSION: &str = "2024-04-01";
const DESKTOP_API_VERSION: &str = "2024-04-03";
const AAD_API_VERSION: &str = "2022-12-01";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    #[error("authentication failed: {0}")]
    Authentication(String),
    #[error("authorization denied: {0}")]
    AuthorizationDenied(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("throttled, retry after {0} seconds")]
    Throttled(u64),
    #[error("request failed: {0}")]
    RequestFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("acquiring credential: {0}")]
    Credential(String),
}

/// A single GET against either plane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// `path` is an ARM resource path, e.g. `/subscriptions/.../providers/Microsoft.Compute/virtualMachines/vm1`.
    Management { path: String, api_version: &'static str },
    /// `url` is an absolute key vault data plane url.
    KeyVault { url: String, api_version: &'static str },
}

impl Request {
    pub fn target(&self) -> &str {
        match self {
            Request::Management { path, .. } => path,
            Request::KeyVault { url, .. } => url,
        }
    }

    pub fn api_version(&self) -> &'static str {
        match self {
            Request::Management { api_version, .. } | Request::KeyVault { api_version, .. } => api_version,
        }
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GET {}?api-version={}", self.target(), self.api_version())
    }
}

#[async_trait]
pub trait ArmTransport: Send + Sync {
    async fn get(&self, request: &Request) -> Result<serde_json::Value, ClientError>;
}

/// Typed read operations for one subscription.
pub struct ArmClient {
    transport:       Arc<dyn ArmTransport>,
    subscription_id: String,
}

impl ArmClient {
    pub fn new(transport: Arc<dyn ArmTransport>, subscription_id: impl Into<String>) -> Self {
        Self {
            transport,
            subscription_id: subscription_id.into(),
        }
    }

    pub fn subscription_id(&self) -> &str {
        &self.subscription_id
    }

    fn management(&self, resource_group: &str, provider_path: &str, api_version: &'static str) -> Request {
        Request::Management {
            path: format!(
                "/subscriptions/{}/resourceGroups/{}/providers/{}",
                self.subscription_id, resource_group, provider_path
            ),
            api_version,
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, request: Request) -> Result<T, ClientError> {
        tracing::debug!("{}", request);
        let value = self.transport.get(&request).await?;
        serde_json::from_value(value).map_err(|e| ClientError::InvalidResponse(format!("decoding {}: {}", request.target(), e)))
    }

    pub async fn get_virtual_machine(&self, resource_group: &str, name: &str) -> Result<VirtualMachine, ClientError> {
        self.fetch(self.management(
            resource_group,
            &format!("Microsoft.Compute/virtualMachines/{}", name),
            COMPUTE_API_VERSION,
        ))
        .await
    }

    pub async fn get_virtual_machine_scale_set(
        &self,
        resource_group: &str,
        name: &str,
    ) -> Result<VirtualMachineScaleSet, ClientError> {
        self.fetch(self.management(
            resource_group,
            &format!("Microsoft.Compute/virtualMachineScaleSets/{}", name),
            COMPUTE_API_VERSION,
        ))
        .await
    }

    pub async fn get_dev_test_virtual_machine(
        &self,
        resource_group: &str,
        lab: &str,
        name: &str,
    ) -> Result<DevTestVirtualMachine, ClientError> {
        self.fetch(self.management(
            resource_group,
            &format!("Microsoft.DevTestLab/labs/{}/virtualmachines/{}", lab, name),
            DEVTESTLAB_API_VERSION,
        ))
        .await
    }

    pub async fn get_storage_account(&self, resource_group: &str, name: &str) -> Result<StorageAccount, ClientError> {
        self.fetch(self.management(
            resource_group,
            &format!("Microsoft.Storage/storageAccounts/{}", name),
            STORAGE_API_VERSION,
        ))
        .await
    }

    pub async fn get_object_replication_policy(
        &self,
        resource_group: &str,
        account: &str,
        policy: &str,
    ) -> Result<ObjectReplicationPolicy, ClientError> {
        self.fetch(self.management(
            resource_group,
            &format!("Microsoft.Storage/storageAccounts/{}/objectReplicationPolicies/{}", account, policy),
            STORAGE_API_VERSION,
        ))
        .await
    }

    pub async fn get_key_vault(&self, resource_group: &str, name: &str) -> Result<Vault, ClientError> {
        self.fetch(self.management(
            resource_group,
            &format!("Microsoft.KeyVault/vaults/{}", name),
            KEYVAULT_API_VERSION,
        ))
        .await
    }

    pub async fn get_key_vault_key(&self, resource_group: &str, vault: &str, name: &str) -> Result<VaultKey, ClientError> {
        self.fetch(self.management(
            resource_group,
            &format!("Microsoft.KeyVault/vaults/{}/keys/{}", vault, name),
            KEYVAULT_API_VERSION,
        ))
        .await
    }

    pub async fn get_key_vault_secret(
        &self,
        resource_group: &str,
        vault: &str,
        name: &str,
    ) -> Result<VaultSecret, ClientError> {
        self.fetch(self.management(
            resource_group,
            &format!("Microsoft.KeyVault/vaults/{}/secrets/{}", vault, name),
            KEYVAULT_API_VERSION,
        ))
        .await
    }

    /// Certificates only exist on the data plane; `vault_uri` is the vault's `properties.vaultUri`.
    pub async fn get_key_vault_certificate(&self, vault_uri: &str, name: &str) -> Result<CertificateBundle, ClientError> {
        let url = url::Url::parse(vault_uri)
            .and_then(|base| base.join(&format!("certificates/{}", name)))
            .map_err(|e| ClientError::InvalidResponse(format!("vault uri {:?}: {}", vault_uri, e)))?;
        self.fetch(Request::KeyVault {
            url:         url.to_string(),
            api_version: KEYVAULT_DATA_API_VERSION,
        })
        .await
    }

    pub async fn get_network_interface(&self, resource_group: &str, name: &str) -> Result<NetworkInterface, ClientError> {
        self.fetch(self.management(
            resource_group,
            &format!("Microsoft.Network/networkInterfaces/{}", name),
            NETWORK_API_VERSION,
        ))
        .await
    }

    pub async fn get_data_factory_dataset(
        &self,
        resource_group: &str,
        factory: &str,
        name: &str,
    ) -> Result<Dataset, ClientError> {
        self.fetch(self.management(
            resource_group,
            &format!("Microsoft.DataFactory/factories/{}/datasets/{}", factory, name),
            DATAFACTORY_API_VERSION,
        ))
        .await
    }

    pub async fn get_backup_instance(
        &self,
        resource_group: &str,
        vault: &str,
        name: &str,
    ) -> Result<BackupInstance, ClientError> {
        self.fetch(self.management(
            resource_group,
            &format!("Microsoft.DataProtection/backupVaults/{}/backupInstances/{}", vault, name),
            DATAPROTECTION_API_VERSION,
        ))
        .await
    }

    pub async fn get_backup_protection_policy(
        &self,
        resource_group: &str,
        vault: &str,
        name: &str,
    ) -> Result<ProtectionPolicy, ClientError> {
        self.fetch(self.management(
            resource_group,
            &format!("Microsoft.RecoveryServices/vaults/{}/backupPolicies/{}", vault, name),
            RECOVERYSERVICES_API_VERSION,
        ))
        .await
    }

    pub async fn get_desktop_workspace(&self, resource_group: &str, name: &str) -> Result<Workspace, ClientError> {
        self.fetch(self.management(
            resource_group,
            &format!("Microsoft.DesktopVirtualization/workspaces/{}", name),
            DESKTOP_API_VERSION,
        ))
        .await
    }

    pub async fn get_domain_service(&self, resource_group: &str, name: &str) -> Result<DomainService, ClientError> {
        self.fetch(self.management(
            resource_group,
            &format!("Microsoft.AAD/domainServices/{}", name),
            AAD_API_VERSION,
        ))
        .await
    }
}
