use std::{path::Path, str::FromStr};

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};

use crate::util::RON;

#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CloudEnvironment {
    #[default]
    Public,
    UsGovernment,
    China,
}

impl FromStr for CloudEnvironment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "public" => Ok(CloudEnvironment::Public),
            "usgovernment" => Ok(CloudEnvironment::UsGovernment),
            "china" => Ok(CloudEnvironment::China),
            _ => bail!("unknown environment specified: {:?}", s),
        }
    }
}

impl CloudEnvironment {
    pub fn authority_host(&self) -> &'static str {
        match self {
            CloudEnvironment::Public => "https://login.microsoftonline.com",
            CloudEnvironment::UsGovernment => "https://login.microsoftonline.us",
            CloudEnvironment::China => "https://login.chinacloudapi.cn",
        }
    }

    pub fn resource_manager_endpoint(&self) -> &'static str {
        match self {
            CloudEnvironment::Public => "https://management.azure.com",
            CloudEnvironment::UsGovernment => "https://management.usgovcloudapi.net",
            CloudEnvironment::China => "https://management.chinacloudapi.cn",
        }
    }

    /// Token audience of the key vault data plane.
    pub fn key_vault_audience(&self) -> &'static str {
        match self {
            CloudEnvironment::Public => "https://vault.azure.net",
            CloudEnvironment::UsGovernment => "https://vault.usgovcloudapi.net",
            CloudEnvironment::China => "https://vault.azure.cn",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AzureConfig {
    pub environment:     CloudEnvironment,
    pub tenant_id:       Option<String>,
    pub client_id:       Option<String>,
    pub client_secret:   Option<String>,
    pub subscription_id: Option<String>,
    pub timeout_secs:    u64,
}

impl Default for AzureConfig {
    fn default() -> Self {
        Self {
            environment:     Default::default(),
            tenant_id:       Default::default(),
            client_id:       Default::default(),
            client_secret:   Default::default(),
            subscription_id: Default::default(),
            timeout_secs:    30,
        }
    }
}

impl AzureConfig {
    pub fn try_load(prefix: &Path) -> anyhow::Result<AzureConfig> {
        let config_path = prefix.join("azure/config.ron");
        if config_path.is_file() {
            tracing::info!("Loading Azure config file at {:?}", config_path);
            let config: AzureConfig = RON
                .from_str(&std::fs::read_to_string(&config_path)?)
                .with_context(|| format!("parsing {:?}", config_path))?;
            Ok(config)
        } else {
            tracing::info!("Azure config file at {:?} not present, skipping.", config_path);
            Ok(AzureConfig::default())
        }
    }

    /// Applies the `ARM_*` environment variables the azurerm provider honours.
    pub fn with_env_overrides(self) -> anyhow::Result<AzureConfig> {
        self.apply_env(|key| std::env::var(key).ok().filter(|v| !v.is_empty()))
    }

    fn apply_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<AzureConfig> {
        if let Some(env) = lookup("ARM_ENVIRONMENT") {
            self.environment = env.parse()?;
        }
        if let Some(tenant_id) = lookup("ARM_TENANT_ID") {
            self.tenant_id = Some(tenant_id);
        }
        if let Some(client_id) = lookup("ARM_CLIENT_ID") {
            self.client_id = Some(client_id);
        }
        if let Some(client_secret) = lookup("ARM_CLIENT_SECRET") {
            self.client_secret = Some(client_secret);
        }
        if let Some(subscription_id) = lookup("ARM_SUBSCRIPTION_ID") {
            self.subscription_id = Some(subscription_id);
        }
        Ok(self)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        for (field, value) in [
            ("tenant_id", &self.tenant_id),
            ("client_id", &self.client_id),
            ("subscription_id", &self.subscription_id),
        ] {
            if let Some(value) = value {
                uuid::Uuid::parse_str(value).with_context(|| format!("{} {:?} is not a UUID", field, value))?;
            }
        }

        if self.client_secret.is_some() && (self.tenant_id.is_none() || self.client_id.is_none()) {
            bail!("A client secret was configured without both tenant_id and client_id");
        }

        if self.timeout_secs == 0 {
            bail!("timeout_secs must be greater than zero");
        }

        Ok(())
    }
}
