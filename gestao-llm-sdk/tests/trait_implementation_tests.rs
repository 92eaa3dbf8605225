use gestao_llm_sdk::client::LlmClient;
use gestao_llm_sdk::groq::GroqClient;
use gestao_llm_sdk::together::TogetherClient;

#[test]
fn test_all_clients_implement_trait() {
    fn assert_implements_trait<T: LlmClient>() {}

    assert_implements_trait::<TogetherClient>();
    assert_implements_trait::<GroqClient>();
}

#[test]
fn test_trait_object_usage() {
    let _client: Box<dyn LlmClient> = Box::new(TogetherClient::new().unwrap());
}

#[test]
fn test_provider_and_model_names() {
    let together = TogetherClient::new().unwrap();
    assert_eq!(together.provider_name(), "together");
    assert_eq!(
        together.model_name(),
        "meta-llama/Llama-3.3-70B-Instruct-Turbo-Free"
    );

    let groq = GroqClient::new("test-key")
        .unwrap()
        .with_model("llama-3.3-70b-versatile");
    assert_eq!(groq.provider_name(), "groq");
    assert_eq!(groq.model_name(), "llama-3.3-70b-versatile");
}
