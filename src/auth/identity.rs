/**
 * External Identity Verification
 *
 * This module verifies bearer credentials against the external identity
 * provider. Verification is an HTTPS call to the provider's token-lookup
 * endpoint; the outcome is a tagged verdict so callers can distinguish a
 * rejected credential from a provider that was never configured.
 *
 * # Verdict Chain
 *
 * The middleware tries this verifier first and falls back to the local
 * signed-token scheme on any failure. `VerifyFailure::NotConfigured` and
 * `VerifyFailure::Rejected` both take the fallback path, but are logged
 * separately so outages are visible in the logs.
 *
 * # Configuration
 *
 * The provider API key is read from `IDENTITY_PROVIDER_API_KEY`, or from a
 * JSON credential file (`{"api_key": "..."}`) named by
 * `IDENTITY_PROVIDER_CREDENTIALS_PATH`. Absent credentials disable the
 * remote path; that is not an authentication failure.
 */

use serde::Deserialize;

/// Endpoint used when `IDENTITY_PROVIDER_URL` is absent
pub const DEFAULT_IDENTITY_PROVIDER_URL: &str = "https://identitytoolkit.googleapis.com";

/// A verified external identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalIdentity {
    /// Provider-scoped stable subject identifier
    pub subject: String,
    /// Email attached to the identity, if the provider knows one
    pub email: Option<String>,
    /// Display name attached to the identity, if any
    pub display_name: Option<String>,
}

/// Outcome of one verification attempt
#[derive(Debug, Clone)]
pub enum Verdict {
    /// The credential was accepted by the provider
    Verified(ExternalIdentity),
    /// The credential was not accepted; see the failure for why
    Failed(VerifyFailure),
}

/// Why remote verification did not produce an identity
#[derive(Debug, Clone)]
pub enum VerifyFailure {
    /// No provider credentials are configured; only the local path applies
    NotConfigured,
    /// The provider rejected the credential or could not be reached
    Rejected(String),
}

/// Client for the external identity provider
#[derive(Clone)]
pub struct IdentityProvider {
    api_key: Option<String>,
    base_url: String,
    http: reqwest::Client,
}

#[derive(Deserialize)]
struct Credentials {
    api_key: String,
}

#[derive(Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Deserialize)]
struct LookupUser {
    #[serde(rename = "localId")]
    local_id: Option<String>,
    email: Option<String>,
    #[serde(rename = "displayName")]
    display_name: Option<String>,
}

impl IdentityProvider {
    /// Create a provider client
    ///
    /// `api_key` of `None` disables remote verification entirely.
    pub fn new(api_key: Option<String>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            api_key,
            base_url,
            http: reqwest::Client::new(),
        }
    }

    /// Load provider configuration from the environment
    ///
    /// Prefers `IDENTITY_PROVIDER_API_KEY`; falls back to the credential
    /// file named by `IDENTITY_PROVIDER_CREDENTIALS_PATH`.
    pub fn from_env() -> Self {
        let api_key = std::env::var("IDENTITY_PROVIDER_API_KEY")
            .ok()
            .or_else(read_credentials_file);

        match &api_key {
            Some(_) => tracing::info!("Identity provider configured"),
            None => tracing::warn!(
                "Identity provider credentials not found, remote verification disabled"
            ),
        }

        let base_url = std::env::var("IDENTITY_PROVIDER_URL")
            .unwrap_or_else(|_| DEFAULT_IDENTITY_PROVIDER_URL.to_string());

        Self::new(api_key, base_url)
    }

    /// Whether remote verification is available
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Verify a bearer credential against the provider
    ///
    /// Never returns an error: every failure mode collapses into a
    /// [`Verdict::Failed`] so the caller can chain the local fallback.
    pub async fn verify(&self, token: &str) -> Verdict {
        let Some(api_key) = &self.api_key else {
            return Verdict::Failed(VerifyFailure::NotConfigured);
        };

        let url = format!("{}/v1/accounts:lookup?key={}", self.base_url, api_key);
        let body = serde_json::json!({ "idToken": token });

        let response = match self.http.post(&url).json(&body).send().await {
            Ok(response) => response,
            Err(e) => {
                return Verdict::Failed(VerifyFailure::Rejected(format!(
                    "provider unreachable: {}",
                    e
                )));
            }
        };

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Verdict::Failed(VerifyFailure::Rejected(format!(
                "provider returned {}: {}",
                status, detail
            )));
        }

        let lookup: LookupResponse = match response.json().await {
            Ok(lookup) => lookup,
            Err(e) => {
                return Verdict::Failed(VerifyFailure::Rejected(format!(
                    "malformed provider response: {}",
                    e
                )));
            }
        };

        let Some(user) = lookup.users.into_iter().next() else {
            return Verdict::Failed(VerifyFailure::Rejected(
                "provider response contained no users".to_string(),
            ));
        };

        let Some(subject) = user.local_id else {
            return Verdict::Failed(VerifyFailure::Rejected(
                "provider response missing subject id".to_string(),
            ));
        };

        Verdict::Verified(ExternalIdentity {
            subject,
            email: user.email,
            display_name: user.display_name,
        })
    }
}

fn read_credentials_file() -> Option<String> {
    let path = std::env::var("IDENTITY_PROVIDER_CREDENTIALS_PATH").ok()?;
    let raw = match std::fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!("Failed to read identity credentials at {}: {}", path, e);
            return None;
        }
    };
    match serde_json::from_str::<Credentials>(&raw) {
        Ok(credentials) => Some(credentials.api_key),
        Err(e) => {
            tracing::warn!("Malformed identity credentials at {}: {}", path, e);
            None
        }
    }
}
