use std::{collections::HashMap, time::Duration};

use async_trait::async_trait;
use aztft_core::config::{AzureConfig, CloudEnvironment};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tokio::sync::RwLock;
use url::Url;

use super::{
    ArmTransport, ClientError, Request,
    credential::{AccessToken, Credential},
};

/// Talks to Azure over HTTPS with bearer tokens, cached per audience.
/// Every request is tried once; retrying is up to the caller.
pub struct HttpTransport {
    http:        Client,
    environment: CloudEnvironment,
    credential:  Credential,
    tokens:      RwLock<HashMap<String, AccessToken>>,
}

impl HttpTransport {
    pub fn new(config: &AzureConfig) -> Result<Self, ClientError> {
        let http = Client::builder()
            .user_agent(concat!("aztft/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClientError::RequestFailed(format!("building http client: {}", e)))?;

        Ok(Self {
            http,
            environment: config.environment,
            credential: Credential::from_config(config),
            tokens: RwLock::new(HashMap::new()),
        })
    }

    async fn token(&self, audience: &str) -> Result<String, ClientError> {
        if let Some(token) = self.tokens.read().await.get(audience) {
            if token.is_fresh() {
                return Ok(token.token.clone());
            }
        }

        let token = self.credential.fetch_token(&self.http, self.environment, audience).await?;
        let value = token.token.clone();
        self.tokens.write().await.insert(audience.to_string(), token);
        Ok(value)
    }

    fn url_for(&self, request: &Request) -> Result<(Url, &'static str), ClientError> {
        let (mut url, audience) = match request {
            Request::Management { path, .. } => {
                let endpoint = self.environment.resource_manager_endpoint();
                let url = Url::parse(endpoint)
                    .and_then(|base| base.join(path))
                    .map_err(|e| ClientError::RequestFailed(format!("invalid path {:?}: {}", path, e)))?;
                (url, endpoint)
            }
            Request::KeyVault { url, .. } => {
                let url = Url::parse(url).map_err(|e| ClientError::RequestFailed(format!("invalid url {:?}: {}", url, e)))?;
                (url, self.environment.key_vault_audience())
            }
        };
        url.query_pairs_mut().append_pair("api-version", request.api_version());
        Ok((url, audience))
    }
}

#[async_trait]
impl ArmTransport for HttpTransport {
    async fn get(&self, request: &Request) -> Result<Value, ClientError> {
        let (url, audience) = self.url_for(request)?;
        let token = self.token(audience).await?;

        tracing::debug!("GET {}", url);
        let response = self
            .http
            .get(url.clone())
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ClientError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(60);
            tracing::warn!("Throttled on {}, retry after {} seconds", request.target(), retry_after);
            return Err(ClientError::Throttled(retry_after));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match status {
                StatusCode::UNAUTHORIZED => ClientError::Authentication(body),
                StatusCode::FORBIDDEN => ClientError::AuthorizationDenied(body),
                StatusCode::NOT_FOUND => ClientError::NotFound(request.target().to_string()),
                _ => ClientError::RequestFailed(format!("{}: {}", status, body)),
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
        serde_json::from_str(&text).map_err(|e| {
            ClientError::InvalidResponse(format!(
                "{} (status {}): {} - Body: {}",
                url,
                status,
                e,
                text.chars().take(500).collect::<String>()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_management_url() {
        let transport = HttpTransport::new(&AzureConfig::default()).unwrap();
        let (url, audience) = transport
            .url_for(&Request::Management {
                path:        "/subscriptions/sub1/resourceGroups/rg1".into(),
                api_version: "2024-07-01",
            })
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://management.azure.com/subscriptions/sub1/resourceGroups/rg1?api-version=2024-07-01"
        );
        assert_eq!(audience, "https://management.azure.com");
    }

    #[test]
    fn test_key_vault_url_in_sovereign_cloud() {
        let config = AzureConfig {
            environment: CloudEnvironment::China,
            ..Default::default()
        };
        let transport = HttpTransport::new(&config).unwrap();
        let (url, audience) = transport
            .url_for(&Request::KeyVault {
                url:         "https://vault1.vault.azure.cn/certificates/cert1".into(),
                api_version: "7.4",
            })
            .unwrap();
        assert_eq!(url.as_str(), "https://vault1.vault.azure.cn/certificates/cert1?api-version=7.4");
        assert_eq!(audience, "https://vault.azure.cn");
    }
}
