//! Fallback orchestrator: cache, then each provider in priority order, then
//! the offline summarizer.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::adapters::{AnswerProvider, AnswerSource};
use crate::cache::{AnswerCache, AnswerEnvelope};
use crate::roster::Professional;
use crate::summarizer;

/// Outcome of one provider attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptReport {
    pub source: AnswerSource,
    /// `None` on success, otherwise the swallowed error
    pub error: Option<String>,
}

/// Result of resolving one question
#[derive(Debug, Clone)]
pub struct Resolution {
    pub envelope: AnswerEnvelope,
    pub source: AnswerSource,
    pub elapsed_ms: u64,
    /// Providers tried for this question, in order
    pub attempts: Vec<AttemptReport>,
}

impl Resolution {
    pub fn answer(&self) -> &str {
        &self.envelope.answer
    }

    pub fn is_cached(&self) -> bool {
        self.source == AnswerSource::Cache
    }
}

/// Ordered provider chain with an infallible offline tail
pub struct AnswerResolver {
    providers: Vec<Box<dyn AnswerProvider>>,
}

impl AnswerResolver {
    pub fn new(providers: Vec<Box<dyn AnswerProvider>>) -> Self {
        Self { providers }
    }

    /// Resolver that always answers offline
    pub fn offline() -> Self {
        Self::new(Vec::new())
    }

    /// Sources that will be attempted, in priority order
    pub fn sources(&self) -> Vec<AnswerSource> {
        self.providers.iter().map(|p| p.source()).collect()
    }

    pub fn providers(&self) -> &[Box<dyn AnswerProvider>] {
        &self.providers
    }

    /// Answer a question, consulting and then extending the cache.
    ///
    /// Never fails: provider errors are logged and skipped, and the offline
    /// summarizer always produces text. A cache hit invokes no provider.
    pub async fn resolve(
        &self,
        question: &str,
        roster: &[Professional],
        cache: &mut AnswerCache,
    ) -> Resolution {
        let question = question.trim();

        if let Some(hit) = cache.find(question) {
            debug!(question, "Answer cache hit");
            return Resolution {
                envelope: hit.refreshed(),
                source: AnswerSource::Cache,
                elapsed_ms: 0,
                attempts: Vec::new(),
            };
        }

        let resolution = self.resolve_uncached(question, roster).await;

        if !question.is_empty() {
            if let Err(e) = cache.append(resolution.envelope.clone()) {
                warn!(error = %e, "Could not persist answer cache");
            }
        }

        resolution
    }

    /// Providers then summarizer, without touching any cache
    pub async fn resolve_uncached(&self, question: &str, roster: &[Professional]) -> Resolution {
        let question = question.trim();
        let started = Instant::now();
        let mut attempts = Vec::new();

        info!(
            question,
            roster = roster.len(),
            providers = self.providers.len(),
            "Resolving question"
        );

        // A blank question has nothing to send upstream
        if !question.is_empty() {
            for provider in &self.providers {
                let source = provider.source();
                match provider.answer(question, roster).await {
                    Ok(answer) => {
                        attempts.push(AttemptReport {
                            source,
                            error: None,
                        });
                        return finish(question, answer, source, started, attempts);
                    }
                    Err(e) => {
                        warn!(%source, error = %e, "Provider failed, falling through");
                        attempts.push(AttemptReport {
                            source,
                            error: Some(e.to_string()),
                        });
                    }
                }
            }
        }

        debug!("Running offline analysis");
        let answer = summarizer::summarize(question, roster);
        finish(question, answer, AnswerSource::Offline, started, attempts)
    }
}

fn finish(
    question: &str,
    answer: String,
    source: AnswerSource,
    started: Instant,
    attempts: Vec<AttemptReport>,
) -> Resolution {
    let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    info!(%source, elapsed_ms, "Question resolved");

    let text = format!(
        "{}\n\n---\n{}",
        answer.trim_end(),
        source.provenance(elapsed_ms)
    );
    Resolution {
        envelope: AnswerEnvelope::new(question, text),
        source,
        elapsed_ms,
        attempts,
    }
}
