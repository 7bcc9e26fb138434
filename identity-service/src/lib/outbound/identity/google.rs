use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::GoogleConfig;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::GoogleProfile;
use crate::domain::user::ports::IdentityProvider;
use crate::user::errors::IdentityProviderError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Verifies Google ID tokens through the `tokeninfo` endpoint.
pub struct GoogleIdentityProvider {
    client: reqwest::Client,
    tokeninfo_url: String,
    client_id: Option<String>,
}

/// Subset of the `tokeninfo` response used for sign-in.
#[derive(Debug, Deserialize)]
struct TokenInfo {
    sub: Option<String>,
    email: Option<String>,
    name: Option<String>,
    picture: Option<String>,
    aud: Option<String>,
    error: Option<String>,
}

impl GoogleIdentityProvider {
    pub fn new(config: &GoogleConfig) -> Result<Self, IdentityProviderError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| IdentityProviderError::Unavailable(e.to_string()))?;

        Ok(Self {
            client,
            tokeninfo_url: config.tokeninfo_url.clone(),
            client_id: config.client_id.clone(),
        })
    }

    fn profile_from(&self, info: TokenInfo) -> Option<GoogleProfile> {
        if let Some(error) = info.error {
            tracing::warn!(error = %error, "Google rejected credential");
            return None;
        }

        if let Some(expected) = &self.client_id {
            if info.aud.as_deref() != Some(expected.as_str()) {
                tracing::warn!(aud = ?info.aud, "Google credential issued for another client");
                return None;
            }
        }

        let subject = info.sub?;
        let email = info
            .email
            .and_then(|email| EmailAddress::new(email).ok())?;

        Some(GoogleProfile {
            subject,
            email,
            name: info.name,
            picture: info.picture,
        })
    }
}

#[async_trait]
impl IdentityProvider for GoogleIdentityProvider {
    async fn verify(&self, credential: &str) -> Result<Option<GoogleProfile>, IdentityProviderError> {
        let response = self
            .client
            .get(&self.tokeninfo_url)
            .query(&[("id_token", credential)])
            .send()
            .await
            .map_err(|e| IdentityProviderError::Unavailable(e.to_string()))?;

        let status = response.status();
        if status.is_server_error() {
            return Err(IdentityProviderError::Unavailable(format!(
                "tokeninfo returned {}",
                status
            )));
        }

        // Google answers 400 with an `error` body for invalid credentials
        let info: TokenInfo = response
            .json()
            .await
            .map_err(|e| IdentityProviderError::InvalidResponse(e.to_string()))?;

        Ok(self.profile_from(info))
    }
}
