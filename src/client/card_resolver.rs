//! Agent card discovery and resolution.
//!
//! An agent publishes its card at a well-known path relative to its base
//! URL. The card carries the JSON-RPC endpoint and the capability flags the
//! client consults in [`A2AClient::supports()`](super::A2AClient::supports).

use std::sync::Arc;

use reqwest::header::ACCEPT;

use crate::error::{A2AError, A2AResult};
use crate::types::AgentCard;
use crate::utils::constants::AGENT_CARD_WELL_KNOWN_PATH;

use super::transport::{HttpRequest, HttpTransport, ReqwestTransport, RequestOptions};

/// Resolves [`AgentCard`]s from agent base URLs.
///
/// Fetches `{base_url}/.well-known/agent.json` (or a custom path) with a
/// single GET and deserializes it.
///
/// # Example
///
/// ```no_run
/// use a2a_rpc_client::client::CardResolver;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let resolver = CardResolver::new();
/// let card = resolver.resolve("http://localhost:7420").await?;
/// println!("Agent: {} at {}", card.name, card.url);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct CardResolver {
    transport: Arc<dyn HttpTransport>,
    card_path: String,
}

impl std::fmt::Debug for CardResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardResolver")
            .field("card_path", &self.card_path)
            .finish_non_exhaustive()
    }
}

impl CardResolver {
    /// Create a resolver using a default `reqwest` transport.
    pub fn new() -> Self {
        Self::with_transport(Arc::new(ReqwestTransport::new()))
    }

    /// Create a resolver that sends requests through `transport`.
    pub fn with_transport(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            card_path: AGENT_CARD_WELL_KNOWN_PATH.to_string(),
        }
    }

    /// Override the agent card path (instead of `/.well-known/agent.json`).
    pub fn with_card_path(mut self, path: impl Into<String>) -> Self {
        self.card_path = path.into();
        self
    }

    /// The path this resolver fetches relative to the base URL.
    pub fn card_path(&self) -> &str {
        &self.card_path
    }

    /// The full card URL for `base_url`.
    ///
    /// One trailing `/` is stripped from the base and one leading `/` from
    /// the path before joining them.
    pub fn card_url(&self, base_url: &str) -> String {
        let base = base_url.strip_suffix('/').unwrap_or(base_url);
        let path = self
            .card_path
            .strip_prefix('/')
            .unwrap_or(&self.card_path);
        format!("{base}/{path}")
    }

    /// Fetch and parse the agent card from the given base URL.
    ///
    /// # Errors
    ///
    /// Returns [`A2AError::Http`] on non-2xx responses and transport faults
    /// (status 503), and [`A2AError::Decode`] when the body is not a card.
    pub async fn resolve(&self, base_url: &str) -> A2AResult<AgentCard> {
        self.resolve_with_options(base_url, &RequestOptions::default())
            .await
    }

    /// Like [`resolve()`](Self::resolve), merging extra headers into the
    /// request. `Accept: application/json` is always sent.
    pub async fn resolve_with_options(
        &self,
        base_url: &str,
        options: &RequestOptions,
    ) -> A2AResult<AgentCard> {
        let url = self.card_url(base_url);

        tracing::debug!(url = %url, "resolving agent card");

        let mut request = HttpRequest::get(&url);
        request.headers = options.merged_with(&[(ACCEPT, "application/json")]);

        let response = self.transport.execute(request).await?;
        if !response.is_success() {
            return Err(response.into_http_error().await);
        }

        let bytes = response.bytes().await?;
        let card: AgentCard = serde_json::from_slice(&bytes)
            .map_err(|e| A2AError::decode(format!("failed to parse agent card: {e}")))?;

        tracing::debug!(name = %card.name, endpoint = %card.url, "resolved agent card");

        Ok(card)
    }
}

impl Default for CardResolver {
    fn default() -> Self {
        Self::new()
    }
}
