use std::{
    fmt,
    time::{Duration, Instant, SystemTime, UNIX_EPOCH},
};

use aztft_core::config::{AzureConfig, CloudEnvironment};
use serde::Deserialize;

use super::ClientError;

/// How bearer tokens are obtained.
#[derive(Clone)]
pub enum Credential {
    /// OAuth2 client credentials flow for a service principal.
    ClientSecret {
        tenant_id:     String,
        client_id:     String,
        client_secret: String,
    },
    /// Whatever account the local `az` CLI is logged in with.
    AzureCli,
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credential::ClientSecret { tenant_id, client_id, .. } => f
                .debug_struct("ClientSecret")
                .field("tenant_id", tenant_id)
                .field("client_id", client_id)
                .field("client_secret", &"[REDACTED]")
                .finish(),
            Credential::AzureCli => write!(f, "AzureCli"),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct AccessToken {
    pub token:      String,
    pub expires_at: Instant,
}

impl AccessToken {
    /// Tokens are refreshed a minute before they actually expire.
    pub fn is_fresh(&self) -> bool {
        self.expires_at > Instant::now() + Duration::from_secs(60)
    }
}

impl Credential {
    pub fn from_config(config: &AzureConfig) -> Credential {
        match (&config.tenant_id, &config.client_id, &config.client_secret) {
            (Some(tenant_id), Some(client_id), Some(client_secret)) => Credential::ClientSecret {
                tenant_id:     tenant_id.clone(),
                client_id:     client_id.clone(),
                client_secret: client_secret.clone(),
            },
            _ => Credential::AzureCli,
        }
    }

    pub(crate) async fn fetch_token(
        &self,
        http: &reqwest::Client,
        environment: CloudEnvironment,
        audience: &str,
    ) -> Result<AccessToken, ClientError> {
        match self {
            Credential::ClientSecret {
                tenant_id,
                client_id,
                client_secret,
            } => {
                tracing::info!("Fetching token for {} as client {}", audience, client_id);
                let token_url = format!("{}/{}/oauth2/v2.0/token", environment.authority_host(), tenant_id);
                let scope = format!("{}/.default", audience.trim_end_matches('/'));
                let params = [
                    ("grant_type", "client_credentials"),
                    ("client_id", client_id.as_str()),
                    ("client_secret", client_secret.as_str()),
                    ("scope", scope.as_str()),
                ];

                let response = http
                    .post(&token_url)
                    .form(&params)
                    .send()
                    .await
                    .map_err(|e| ClientError::Credential(e.to_string()))?;

                if !response.status().is_success() {
                    return Err(ClientError::Authentication(format!(
                        "token request to {} failed: {}",
                        token_url,
                        response.status()
                    )));
                }

                #[derive(Deserialize)]
                struct TokenResponse {
                    access_token: String,
                    expires_in:   u64,
                }

                let token: TokenResponse = response
                    .json()
                    .await
                    .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;

                Ok(AccessToken {
                    token:      token.access_token,
                    expires_at: expiry(token.expires_in)?,
                })
            }
            Credential::AzureCli => {
                tracing::info!("Fetching token for {} from the Azure CLI", audience);
                let output = tokio::process::Command::new("az")
                    .args(["account", "get-access-token", "--output", "json", "--resource", audience])
                    .output()
                    .await
                    .map_err(|e| ClientError::Credential(format!("running az: {}", e)))?;

                if !output.status.success() {
                    return Err(ClientError::Credential(format!(
                        "az account get-access-token: {}",
                        String::from_utf8_lossy(&output.stderr).trim()
                    )));
                }

                parse_cli_token(&output.stdout, SystemTime::now())
            }
        }
    }
}

fn parse_cli_token(stdout: &[u8], now: SystemTime) -> Result<AccessToken, ClientError> {
    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct CliToken {
        access_token: String,
        #[serde(rename = "expires_on")]
        expires_on:   Option<u64>,
    }

    let token: CliToken = serde_json::from_slice(stdout).map_err(|e| ClientError::Credential(format!("az output: {}", e)))?;

    let now_secs = now.duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or_default();
    // Older CLI versions only print a local-time `expiresOn`; assume the usual five minutes of validity.
    let lifetime = match token.expires_on {
        Some(expires_on) => expires_on.saturating_sub(now_secs),
        None => 300,
    };

    Ok(AccessToken {
        token:      token.access_token,
        expires_at: expiry(lifetime)?,
    })
}

fn expiry(lifetime_secs: u64) -> Result<Instant, ClientError> {
    Instant::now()
        .checked_add(Duration::from_secs(lifetime_secs))
        .ok_or_else(|| ClientError::InvalidResponse(format!("token lifetime of {} seconds is out of range", lifetime_secs)))
}
