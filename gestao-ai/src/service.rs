//! Long-lived answer service owning the provider chain, the cache and the
//! resolution observers.

use std::sync::Arc;

use tracing::{debug, info};

use crate::adapters::{configured_providers, AnswerSource};
use crate::cache::AnswerCache;
use crate::config::AppConfig;
use crate::error::CacheError;
use crate::resolver::{AnswerResolver, Resolution};
use crate::roster::Professional;

/// Published after every resolution, cached or not
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionEvent {
    pub question: String,
    pub source: AnswerSource,
    pub elapsed_ms: u64,
    pub cached: bool,
}

pub trait ResolutionObserver: Send + Sync {
    fn on_resolution(&self, event: &ResolutionEvent);
}

/// Handle returned by [`AnswerService::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// Probe result for one configured provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderStatus {
    pub source: AnswerSource,
    pub reachable: bool,
}

pub struct AnswerService {
    resolver: AnswerResolver,
    cache: AnswerCache,
    observers: Vec<(ObserverId, Arc<dyn ResolutionObserver>)>,
    next_observer: u64,
}

impl AnswerService {
    /// Build the provider chain and load the cache from configuration
    pub fn create(config: &AppConfig) -> Self {
        let providers = configured_providers(
            &config.providers,
            config.groq_api_key(),
            config.together_api_key(),
        );
        let cache = match config.cache_path() {
            Some(path) => AnswerCache::load(path),
            None => AnswerCache::in_memory(),
        };
        info!(
            providers = providers.len(),
            cached_answers = cache.len(),
            "Answer service created"
        );
        Self::with_parts(AnswerResolver::new(providers), cache)
    }

    pub fn with_parts(resolver: AnswerResolver, cache: AnswerCache) -> Self {
        Self {
            resolver,
            cache,
            observers: Vec::new(),
            next_observer: 0,
        }
    }

    pub fn subscribe(&mut self, observer: Arc<dyn ResolutionObserver>) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, observer));
        id
    }

    /// Returns `false` if the id was not subscribed
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer_id, _)| *observer_id != id);
        self.observers.len() != before
    }

    /// Answer a question against the roster; always yields text
    pub async fn ask(&mut self, question: &str, roster: &[Professional]) -> Resolution {
        let resolution = self.resolver.resolve(question, roster, &mut self.cache).await;

        let event = ResolutionEvent {
            question: question.trim().to_string(),
            source: resolution.source,
            elapsed_ms: resolution.elapsed_ms,
            cached: resolution.is_cached(),
        };
        for (_, observer) in &self.observers {
            observer.on_resolution(&event);
        }

        resolution
    }

    /// Probe every configured provider, in priority order
    pub async fn check_providers(&self) -> Vec<ProviderStatus> {
        let mut statuses = Vec::with_capacity(self.resolver.providers().len());
        for provider in self.resolver.providers() {
            let reachable = provider.probe().await;
            debug!(source = %provider.source(), reachable, "Provider probed");
            statuses.push(ProviderStatus {
                source: provider.source(),
                reachable,
            });
        }
        statuses
    }

    pub fn sources(&self) -> Vec<AnswerSource> {
        self.resolver.sources()
    }

    pub fn cache(&self) -> &AnswerCache {
        &self.cache
    }

    pub fn clear_cache(&mut self) -> Result<(), CacheError> {
        self.cache.clear()
    }

    /// Flush the cache and drop every observer
    pub fn dispose(self) -> Result<(), CacheError> {
        debug!(observers = self.observers.len(), "Disposing answer service");
        self.cache.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<ResolutionEvent>>,
    }

    impl ResolutionObserver for Recorder {
        fn on_resolution(&self, event: &ResolutionEvent) {
            self.events.lock().unwrap().push(event.clone());
        }
    }

    fn offline_service() -> AnswerService {
        AnswerService::with_parts(AnswerResolver::offline(), AnswerCache::in_memory())
    }

    #[tokio::test]
    async fn test_observers_see_fresh_and_cached_resolutions() {
        let mut service = offline_service();
        let recorder = Arc::new(Recorder::default());
        service.subscribe(recorder.clone());

        service.ask("  Resumo da equipe ", &[]).await;
        service.ask("resumo da equipe", &[]).await;

        let events = recorder.events.lock().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].question, "Resumo da equipe");
        assert_eq!(events[0].source, AnswerSource::Offline);
        assert!(!events[0].cached);
        assert_eq!(events[1].source, AnswerSource::Cache);
        assert!(events[1].cached);
    }

    #[tokio::test]
    async fn test_unsubscribe_stops_notifications() {
        let mut service = offline_service();
        let recorder = Arc::new(Recorder::default());
        let id = service.subscribe(recorder.clone());

        assert!(service.unsubscribe(id));
        assert!(!service.unsubscribe(id));
        service.ask("Resumo", &[]).await;
        assert!(recorder.events.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_check_providers_without_providers_is_empty() {
        let service = offline_service();
        assert!(service.check_providers().await.is_empty());
    }

    #[tokio::test]
    async fn test_dispose_flushes_cache_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ai_chat_cache.json");

        let mut service =
            AnswerService::with_parts(AnswerResolver::offline(), AnswerCache::load(&path));
        service.ask("Resumo", &[]).await;
        assert_eq!(service.cache().len(), 1);
        service.dispose().unwrap();

        assert_eq!(AnswerCache::load(&path).len(), 1);
    }

    #[tokio::test]
    async fn test_create_respects_disabled_cache_and_free_tier() {
        let mut config = AppConfig::default();
        config.cache.enabled = false;
        config.providers.free_tier_enabled = false;

        let service = AnswerService::create(&config);
        assert!(service.sources().is_empty());
        assert!(service.cache().path().is_none());
    }
}
