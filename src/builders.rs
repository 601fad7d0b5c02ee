//! Builder patterns for ergonomic construction of A2A types.

use std::fmt;
use std::sync::Arc;

use crate::client::{A2AClient, HttpTransport, ReqwestTransport, RequestOptions};
use crate::error::ConfigError;
use crate::types::*;
use crate::utils::constants::AGENT_CARD_WELL_KNOWN_PATH;

/// Builder for constructing [`AgentCard`] with sensible defaults.
///
/// # Example
///
/// ```
/// use a2a_rpc_client::builders::AgentCardBuilder;
///
/// let card = AgentCardBuilder::new("My Agent", "An example agent", "1.0.0")
///     .with_url("http://localhost:8080/a2a")
///     .with_skill("chat", "Chat", "Conversational AI", vec!["conversation".to_string()])
///     .with_streaming(true)
///     .build();
/// assert_eq!(card.capabilities.streaming, Some(true));
/// ```
#[derive(Debug, Clone)]
pub struct AgentCardBuilder {
    name: String,
    description: String,
    version: String,
    url: String,
    provider: Option<AgentProvider>,
    documentation_url: Option<String>,
    capabilities: AgentCapabilities,
    default_input_modes: Vec<String>,
    default_output_modes: Vec<String>,
    skills: Vec<AgentSkill>,
}

impl AgentCardBuilder {
    /// Create a new builder with required fields.
    ///
    /// # Arguments
    ///
    /// * `name` - Human-readable agent name
    /// * `description` - Description of agent capabilities
    /// * `version` - Version string (e.g., "1.0.0")
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            version: version.into(),
            url: String::new(),
            provider: None,
            documentation_url: None,
            capabilities: AgentCapabilities::default(),
            default_input_modes: vec!["text/plain".to_string()],
            default_output_modes: vec!["text/plain".to_string()],
            skills: Vec::new(),
        }
    }

    /// Set the JSON-RPC endpoint clients should call.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Set the provider information.
    pub fn with_provider(
        mut self,
        organization: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        self.provider = Some(AgentProvider {
            organization: organization.into(),
            url: url.into(),
        });
        self
    }

    /// Set the documentation URL.
    pub fn with_documentation_url(mut self, url: impl Into<String>) -> Self {
        self.documentation_url = Some(url.into());
        self
    }

    /// Enable or disable streaming support.
    pub fn with_streaming(mut self, enabled: bool) -> Self {
        self.capabilities.streaming = Some(enabled);
        self
    }

    /// Enable or disable push notifications support.
    pub fn with_push_notifications(mut self, enabled: bool) -> Self {
        self.capabilities.push_notifications = Some(enabled);
        self
    }

    /// Add a skill to the agent card.
    pub fn with_skill(
        mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        tags: Vec<String>,
    ) -> Self {
        self.skills.push(AgentSkill {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            tags,
            examples: None,
        });
        self
    }

    /// Set the default input MIME types.
    pub fn with_input_modes(mut self, modes: Vec<String>) -> Self {
        self.default_input_modes = modes;
        self
    }

    /// Set the default output MIME types.
    pub fn with_output_modes(mut self, modes: Vec<String>) -> Self {
        self.default_output_modes = modes;
        self
    }

    /// Build the [`AgentCard`].
    pub fn build(self) -> AgentCard {
        AgentCard {
            name: self.name,
            description: self.description,
            url: self.url,
            version: self.version,
            capabilities: self.capabilities,
            skills: self.skills,
            provider: self.provider,
            documentation_url: self.documentation_url,
            default_input_modes: self.default_input_modes,
            default_output_modes: self.default_output_modes,
        }
    }
}

/// Builder for constructing [`A2AClient`] with custom configuration.
///
/// Either an agent card or an explicit URL is required. When both are given
/// the URL is the call target and the card only seeds the cache.
///
/// # Example
///
/// ```
/// use a2a_rpc_client::builders::ClientBuilder;
///
/// let client = ClientBuilder::new()
///     .with_url("http://localhost:7420/a2a")
///     .with_bearer_token("secret")
///     .build()
///     .unwrap();
/// assert_eq!(client.url(), "http://localhost:7420/a2a");
/// ```
#[derive(Default)]
pub struct ClientBuilder {
    agent_card: Option<AgentCard>,
    url: Option<String>,
    transport: Option<Arc<dyn HttpTransport>>,
    headers: Vec<(String, String)>,
    card_path: Option<String>,
}

impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("url", &self.url)
            .field("has_agent_card", &self.agent_card.is_some())
            .field("has_transport", &self.transport.is_some())
            .field("card_path", &self.card_path)
            .finish_non_exhaustive()
    }
}

impl ClientBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a resolved agent card; its `url` becomes the target.
    pub fn with_agent_card(mut self, card: AgentCard) -> Self {
        self.agent_card = Some(card);
        self
    }

    /// Call this protocol endpoint.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Send requests through a custom transport.
    pub fn with_transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Add a custom HTTP header sent with every request.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Add an Authorization header with a bearer token.
    pub fn with_bearer_token(self, token: impl Into<String>) -> Self {
        let value = format!("Bearer {}", token.into());
        self.with_header("Authorization", value)
    }

    /// Override the agent card path used by lazy card resolution.
    pub fn with_card_path(mut self, path: impl Into<String>) -> Self {
        self.card_path = Some(path.into());
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingTarget`] when neither a card nor a URL was
    /// given, [`ConfigError::InvalidHeader`] when a header cannot be sent.
    pub fn build(self) -> Result<A2AClient, ConfigError> {
        let url = match (self.url, &self.agent_card) {
            (Some(url), _) => url,
            (None, Some(card)) => card.url.clone(),
            (None, None) => return Err(ConfigError::MissingTarget),
        };

        let mut options = RequestOptions::new();
        for (name, value) in &self.headers {
            options.try_insert(name, value)?;
        }

        let transport = self
            .transport
            .unwrap_or_else(|| Arc::new(ReqwestTransport::new()));
        let card_path = self
            .card_path
            .unwrap_or_else(|| AGENT_CARD_WELL_KNOWN_PATH.to_string());

        Ok(A2AClient::from_parts(
            url,
            transport,
            options,
            card_path,
            self.agent_card,
        ))
    }
}
