//! Provider adapters: shape the roster into a prompt for one hosted provider
//! and pull the answer text back out.
//!
//! Adapters make exactly one attempt per call and never cache.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use gestao_llm_sdk::{
    client::LlmClient,
    error::LlmError,
    groq::GroqClient,
    together::TogetherClient,
    types::{CompletionRequest, Message},
};

use crate::classify::{self, COMPACT_SKILL_COLUMNS};
use crate::config::ProvidersConfig;
use crate::roster::Professional;

const MAX_TOKENS: u32 = 1000;
const TEMPERATURE: f32 = 0.7;

const FULL_SYSTEM_PROMPT: &str = "Você é um assistente especializado em análise de dados de RH. \
Analise os dados fornecidos e responda de forma objetiva e útil.";

const COMPACT_SYSTEM_PROMPT: &str = "Você é um assistente especializado em análise de dados de RH. \
Responda em português brasileiro de forma clara e objetiva.";

/// Where an answer came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnswerSource {
    /// Keyless free-tier endpoint
    TogetherFree,
    /// First credential-gated provider
    Groq,
    /// Second credential-gated provider
    TogetherPremium,
    /// Local statistical summarizer
    Offline,
    /// Earlier answer replayed from the cache
    Cache,
}

impl AnswerSource {
    pub fn label(&self) -> &'static str {
        match self {
            AnswerSource::TogetherFree => "Together.xyz Llama 3.3 70B",
            AnswerSource::Groq => "Groq",
            AnswerSource::TogetherPremium => "Together.xyz Premium",
            AnswerSource::Offline => "Análise offline",
            AnswerSource::Cache => "Cache",
        }
    }

    /// Trailing provenance line appended to every answer
    pub fn provenance(&self, elapsed_ms: u64) -> String {
        match self {
            AnswerSource::Offline => format!("Análise offline realizada em {elapsed_ms}ms"),
            other => format!("Resposta via {} ({elapsed_ms}ms)", other.label()),
        }
    }
}

impl std::fmt::Display for AnswerSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One hosted provider behind a uniform contract
#[async_trait]
pub trait AnswerProvider: Send + Sync {
    fn source(&self) -> AnswerSource;

    /// Single attempt; any failure is returned, never retried
    async fn answer(&self, question: &str, roster: &[Professional]) -> Result<String, LlmError>;

    /// Reachability check for configuration time; never errors
    async fn probe(&self) -> bool;
}

/// How much of the roster a provider receives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextStyle {
    /// Every record, pretty-printed JSON in the system prompt
    FullSnapshot,
    /// First `limit` records as `name | seniority | skills` lines
    Compact { limit: usize },
}

/// Adapter over any [`LlmClient`]
pub struct ChatAdapter {
    source: AnswerSource,
    client: Arc<dyn LlmClient>,
    context: ContextStyle,
}

impl ChatAdapter {
    pub fn new(source: AnswerSource, client: Arc<dyn LlmClient>, context: ContextStyle) -> Self {
        Self {
            source,
            client,
            context,
        }
    }

    /// Build the completion request sent for a question
    pub fn request(
        &self,
        question: &str,
        roster: &[Professional],
    ) -> Result<CompletionRequest, LlmError> {
        let messages = match self.context {
            ContextStyle::FullSnapshot => {
                let snapshot = serde_json::to_string_pretty(roster)?;
                vec![
                    Message::system(format!(
                        "{FULL_SYSTEM_PROMPT}\n\nDADOS DOS PROFISSIONAIS:\n{snapshot}\n\n\
                         Responda sempre em português brasileiro de forma clara e direta."
                    )),
                    Message::user(question),
                ]
            }
            ContextStyle::Compact { limit } => vec![
                Message::system(COMPACT_SYSTEM_PROMPT),
                Message::user(format!(
                    "Analise os dados dos {} profissionais da equipe:\n\n{}\n\n\
                     Pergunta: {question}\n\n\
                     Forneça insights úteis e específicos baseados nos dados.",
                    roster.len(),
                    compact_context(roster, limit)
                )),
            ],
        };

        Ok(CompletionRequest::new(messages, MAX_TOKENS).with_temperature(TEMPERATURE))
    }
}

#[async_trait]
impl AnswerProvider for ChatAdapter {
    fn source(&self) -> AnswerSource {
        self.source
    }

    async fn answer(&self, question: &str, roster: &[Professional]) -> Result<String, LlmError> {
        let request = self.request(question, roster)?;
        tracing::debug!(
            provider = self.client.provider_name(),
            model = self.client.model_name(),
            "Querying provider"
        );
        let response = self.client.complete(request).await?;
        let text = response.content.trim();
        if text.is_empty() {
            return Err(LlmError::empty_response("Provider returned blank text"));
        }
        Ok(text.to_string())
    }

    async fn probe(&self) -> bool {
        self.client.probe().await
    }
}

/// `name | seniority | Java, React` lines for the first `limit` records
pub fn compact_context(roster: &[Professional], limit: usize) -> String {
    roster
        .iter()
        .take(limit)
        .map(|professional| {
            let skills: Vec<&str> = COMPACT_SKILL_COLUMNS
                .iter()
                .filter(|column| professional.has_skill(column))
                .filter_map(|column| classify::technology(column).map(|t| t.label))
                .collect();
            format!(
                "{} | {} | {}",
                non_blank(professional.nome_completo.as_deref()),
                non_blank(professional.proficiencia_cargo.as_deref()),
                skills.join(", ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn non_blank(value: Option<&str>) -> &str {
    value.filter(|v| !v.trim().is_empty()).unwrap_or("N/A")
}

/// Adapters for every configured provider, in priority order.
///
/// Missing credentials skip the provider entirely; a client that cannot be
/// constructed is logged and skipped too.
pub fn configured_providers(
    config: &ProvidersConfig,
    groq_api_key: Option<&str>,
    together_api_key: Option<&str>,
) -> Vec<Box<dyn AnswerProvider>> {
    let timeout = Duration::from_secs(config.request_timeout_secs);
    let compact = ContextStyle::Compact {
        limit: config.context_limit,
    };
    let mut providers: Vec<Box<dyn AnswerProvider>> = Vec::new();

    if config.free_tier_enabled {
        let client = TogetherClient::new().and_then(|c| {
            let c = match &config.together_base_url {
                Some(url) => c.with_base_url(url),
                None => c,
            };
            c.with_timeout(timeout)
        });
        push_adapter(
            &mut providers,
            AnswerSource::TogetherFree,
            client,
            ContextStyle::FullSnapshot,
        );
    }

    match groq_api_key {
        Some(key) => {
            let client = GroqClient::new(key).and_then(|c| {
                let c = match &config.groq_base_url {
                    Some(url) => c.with_base_url(url),
                    None => c,
                };
                c.with_timeout(timeout)
            });
            push_adapter(&mut providers, AnswerSource::Groq, client, compact);
        }
        None => tracing::debug!("GROQ_API_KEY not configured, skipping Groq"),
    }

    match together_api_key {
        Some(key) => {
            let client = TogetherClient::with_api_key(key).and_then(|c| {
                let c = match &config.together_base_url {
                    Some(url) => c.with_base_url(url),
                    None => c,
                };
                c.with_timeout(timeout)
            });
            push_adapter(&mut providers, AnswerSource::TogetherPremium, client, compact);
        }
        None => tracing::debug!("TOGETHER_API_KEY not configured, skipping Together premium"),
    }

    providers
}

fn push_adapter<C: LlmClient + 'static>(
    providers: &mut Vec<Box<dyn AnswerProvider>>,
    source: AnswerSource,
    client: Result<C, LlmError>,
    context: ContextStyle,
) {
    match client {
        Ok(client) => providers.push(Box::new(ChatAdapter::new(
            source,
            Arc::new(client),
            context,
        ))),
        Err(e) => tracing::warn!(%source, error = %e, "Could not create provider client"),
    }
}
