use gestao_ai::adapters::{configured_providers, AnswerSource};
use gestao_ai::cache::AnswerCache;
use gestao_ai::config::ProvidersConfig;
use gestao_ai::resolver::AnswerResolver;
use gestao_ai::roster::{parse_roster, Professional};
use gestao_ai::service::AnswerService;
use mockito::Matcher;

const GROQ_BODY: &str = r#"{
    "id": "chatcmpl-groq",
    "object": "chat.completion",
    "model": "llama-3.1-70b-versatile",
    "choices": [
        {"index": 0, "message": {"role": "assistant", "content": "Há 2 profissionais com Java."}, "finish_reason": "stop"}
    ]
}"#;

fn roster() -> Vec<Professional> {
    parse_roster(
        r#"[
            {"nome_completo": "Ana", "proficiencia_cargo": "Sênior", "java": "Avançado"},
            {"nome_completo": "Bruno", "proficiencia_cargo": "Pleno", "java": "true"},
            {"nome_completo": "Carla", "proficiencia_cargo": "Júnior", "java": "Sem conhecimento"}
        ]"#,
    )
    .unwrap()
}

fn config(together: &mockito::ServerGuard, groq: &mockito::ServerGuard) -> ProvidersConfig {
    ProvidersConfig {
        request_timeout_secs: 5,
        together_base_url: Some(together.url()),
        groq_base_url: Some(groq.url()),
        ..ProvidersConfig::default()
    }
}

#[tokio::test]
async fn test_free_tier_500_falls_through_to_groq() {
    let mut together = mockito::Server::new_async().await;
    let mut groq = mockito::Server::new_async().await;

    let free_mock = together
        .mock("POST", "/v1/chat/completions")
        .match_header("authorization", Matcher::Missing)
        .match_body(Matcher::Regex("DADOS DOS PROFISSIONAIS".to_string()))
        .with_status(500)
        .with_body(r#"{"error":{"message":"overloaded"}}"#)
        .expect(1)
        .create_async()
        .await;
    let groq_mock = groq
        .mock("POST", "/v1/chat/completions")
        .match_header("authorization", "Bearer groq-key")
        .match_body(Matcher::Regex("Pergunta: Quantos sabem Java\\?".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(GROQ_BODY)
        .expect(1)
        .create_async()
        .await;

    let providers = configured_providers(&config(&together, &groq), Some("groq-key"), None);
    let resolver = AnswerResolver::new(providers);
    let resolution = resolver
        .resolve_uncached("Quantos sabem Java?", &roster())
        .await;

    assert_eq!(resolution.source, AnswerSource::Groq);
    assert!(resolution.answer().starts_with("Há 2 profissionais com Java."));
    assert!(resolution.answer().contains("Resposta via Groq ("));
    assert_eq!(resolution.attempts.len(), 2);
    assert!(resolution.attempts[0]
        .error
        .as_deref()
        .unwrap_or_default()
        .contains("500"));
    free_mock.assert_async().await;
    groq_mock.assert_async().await;
}

#[tokio::test]
async fn test_free_tier_500_without_keys_uses_summarizer() {
    let mut together = mockito::Server::new_async().await;
    let groq = mockito::Server::new_async().await;

    let free_mock = together
        .mock("POST", "/v1/chat/completions")
        .with_status(500)
        .expect(1)
        .create_async()
        .await;

    let providers = configured_providers(&config(&together, &groq), None, None);
    assert_eq!(providers.len(), 1);
    let mut service = AnswerService::with_parts(AnswerResolver::new(providers), AnswerCache::in_memory());

    let resolution = service.ask("Quantos sabem Java?", &roster()).await;

    assert_eq!(resolution.source, AnswerSource::Offline);
    assert!(resolution.answer().contains("Java: 2 profissionais (67%)"));
    free_mock.assert_async().await;
}

#[tokio::test]
async fn test_blank_provider_text_falls_through() {
    let mut together = mockito::Server::new_async().await;
    let groq = mockito::Server::new_async().await;

    let _mock = together
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"choices":[{"index":0,"message":{"role":"assistant","content":"   "}}]}"#)
        .create_async()
        .await;

    let providers = configured_providers(&config(&together, &groq), None, None);
    let resolution = AnswerResolver::new(providers)
        .resolve_uncached("Resumo", &roster())
        .await;

    assert_eq!(resolution.source, AnswerSource::Offline);
}

#[tokio::test]
async fn test_check_providers_reports_reachability() {
    let mut together = mockito::Server::new_async().await;
    let mut groq = mockito::Server::new_async().await;

    let _free = together
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(GROQ_BODY)
        .create_async()
        .await;
    let _groq = groq
        .mock("POST", "/v1/chat/completions")
        .with_status(401)
        .with_body(r#"{"error":{"message":"Invalid API Key"}}"#)
        .create_async()
        .await;

    let providers = configured_providers(&config(&together, &groq), Some("bad-key"), None);
    let service = AnswerService::with_parts(AnswerResolver::new(providers), AnswerCache::in_memory());
    let statuses: Vec<_> = service
        .check_providers()
        .await
        .into_iter()
        .map(|s| (s.source, s.reachable))
        .collect();

    assert_eq!(
        statuses,
        vec![(AnswerSource::TogetherFree, true), (AnswerSource::Groq, false)]
    );
}
