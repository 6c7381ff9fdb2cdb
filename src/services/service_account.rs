use std::{
    path::Path,
    time::{Duration, Instant, SystemTime, UNIX_EPOCH},
};

use anyhow::Context;
use async_trait::async_trait;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

pub const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: u64 = 3600;
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

#[async_trait]
pub trait AccessTokenSource: Send + Sync {
    async fn access_token(&self) -> anyhow::Result<String>;
}

/// The fields of a Google service-account key file that the token exchange needs.
#[derive(Deserialize, Clone)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

impl ServiceAccountKey {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read credentials file {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Invalid service account key in {}", path.display()))
    }
}

#[derive(Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: u64,
    exp: u64,
}

#[derive(Serialize)]
struct TokenRequest<'a> {
    grant_type: &'a str,
    assertion: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    ASSERTION_LIFETIME_SECS
}

struct CachedToken {
    token: String,
    expires_at: Instant,
}

pub struct ServiceAccountAuth {
    client: Client,
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    scope: String,
    cached: Mutex<Option<CachedToken>>,
}

impl ServiceAccountAuth {
    pub fn new(key: ServiceAccountKey, scope: &str) -> anyhow::Result<Self> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .context("Service account private key is not a valid RSA PEM key")?;

        Ok(ServiceAccountAuth {
            client: Client::new(),
            key,
            encoding_key,
            scope: scope.to_string(),
            cached: Mutex::new(None),
        })
    }

    fn signed_assertion(&self) -> anyhow::Result<String> {
        let iat = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .context("System clock is before the unix epoch")?
            .as_secs();
        let claims = Claims {
            iss: &self.key.client_email,
            scope: &self.scope,
            aud: &self.key.token_uri,
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };

        jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &self.encoding_key)
            .context("Failed to sign service account assertion")
    }

    async fn request_token(&self) -> anyhow::Result<TokenResponse> {
        let assertion = self.signed_assertion()?;

        let response = self
            .client
            .post(&self.key.token_uri)
            .form(&TokenRequest {
                grant_type: JWT_BEARER_GRANT,
                assertion: &assertion,
            })
            .send()
            .await
            .context("Token request failed")?
            .error_for_status()
            .context("Token endpoint rejected the assertion")?
            .json::<TokenResponse>()
            .await
            .context("Invalid token response")?;

        Ok(response)
    }
}

#[async_trait]
impl AccessTokenSource for ServiceAccountAuth {
    async fn access_token(&self) -> anyhow::Result<String> {
        let mut cached = self.cached.lock().await;

        if let Some(ref token) = *cached {
            if Instant::now() + EXPIRY_MARGIN < token.expires_at {
                return Ok(token.token.clone());
            }
        }

        let response = self.request_token().await?;
        log::debug!("Obtained access token for {}", self.key.client_email);

        *cached = Some(CachedToken {
            token: response.access_token.clone(),
            expires_at: Instant::now() + Duration::from_secs(response.expires_in),
        });

        Ok(response.access_token)
    }
}
