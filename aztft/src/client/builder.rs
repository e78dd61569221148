use std::{collections::HashMap, sync::Arc};

use aztft_core::config::AzureConfig;
use tokio::sync::Mutex;

use super::{ArmClient, ArmTransport, ClientError, HttpTransport};

/// Hands out one [`ArmClient`] per subscription, all sharing the same transport.
pub struct ClientBuilder {
    transport:    Arc<dyn ArmTransport>,
    client_cache: Mutex<HashMap<String, Arc<ArmClient>>>,
}

impl ClientBuilder {
    pub fn new(transport: Arc<dyn ArmTransport>) -> Self {
        Self {
            transport,
            client_cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn from_config(config: &AzureConfig) -> Result<Self, ClientError> {
        Ok(Self::new(Arc::new(HttpTransport::new(config)?)))
    }

    pub async fn get_or_init_client(&self, subscription_id: &str) -> Arc<ArmClient> {
        let mut cache = self.client_cache.lock().await;

        cache
            .entry(subscription_id.to_lowercase())
            .or_insert_with(|| {
                tracing::debug!("Creating ARM client for subscription {}", subscription_id);
                Arc::new(ArmClient::new(self.transport.clone(), subscription_id))
            })
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockTransport;

    #[tokio::test]
    async fn test_clients_are_cached_per_subscription() {
        let builder = ClientBuilder::new(Arc::new(MockTransport::new()));
        let a = builder.get_or_init_client("sub1").await;
        let b = builder.get_or_init_client("SUB1").await;
        let c = builder.get_or_init_client("sub2").await;
        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(c.subscription_id(), "sub2");
    }
}
