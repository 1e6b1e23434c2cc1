//! Tests for the Groq client

#[cfg(test)]
mod snapshot_tests {
    use crate::client::{ChatResponse, extract_answer};
    use crate::{GroqClient, GroqConfig};
    use insta::assert_yaml_snapshot;
    use yeneta_core::{AnswerService, Error};

    fn client(api_url: &str) -> GroqClient {
        let mut config = GroqConfig::new("gsk_test_redacted");
        config.api_url = api_url.to_string();
        GroqClient::new(config).unwrap()
    }

    #[test]
    fn test_request_messages_snapshot() {
        let client = client("https://api.groq.com/openai/v1/");
        let body = client.request_body("Question: What is a fraction?");

        assert_eq!(client.endpoint(), "https://api.groq.com/openai/v1/chat/completions");
        assert_eq!(body.max_tokens, 2048);
        assert_eq!(body.model, "llama-3.1-8b-instant");
        assert_yaml_snapshot!(body.messages, @r#"
        - role: user
          content: "Question: What is a fraction?"
        "#);
    }

    #[test]
    fn test_model_constants() {
        assert_eq!(GroqClient::LLAMA_3_1_8B_INSTANT, crate::config::DEFAULT_MODEL);
        let config = GroqConfig::new("k").with_model(GroqClient::LLAMA_3_3_70B_VERSATILE);
        assert_eq!(GroqClient::new(config).unwrap().model(), "llama-3.3-70b-versatile");
    }

    #[test]
    fn test_extract_answer() {
        let response: ChatResponse = serde_json::from_str(
            r#"{"choices":[{"index":0,"message":{"role":"assistant","content":"  A fraction is part of a whole. "}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_answer(response).unwrap(), "A fraction is part of a whole.");
    }

    #[test]
    fn test_extract_answer_rejects_empty() {
        let no_choices: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(matches!(
            extract_answer(no_choices),
            Err(Error::AnswerServiceFailure(_))
        ));

        let null_content: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":null}}]}"#).unwrap();
        assert!(matches!(
            extract_answer(null_content),
            Err(Error::AnswerServiceFailure(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_answer_failure() {
        let client = client("http://127.0.0.1:9/v1");
        let err = client.complete("hello").await.unwrap_err();
        assert!(matches!(err, Error::AnswerServiceFailure(_)));
    }
}
