use crate::config::Config;
use crate::error::ClientError;
use crate::models::completion::ChatResponse;
use crate::models::prompt::ChatRequest;
use log::debug;
use reqwest::{header, Client, Url};
use serde_json::Value;

pub const DEFAULT_TEST_MESSAGE: &str = "Hello! This is a test message. Can you respond briefly?";

/// Blank or missing input falls back to the canned greeting.
pub fn resolve_message(message: Option<&str>) -> &str {
    match message.map(str::trim) {
        Some(text) if !text.is_empty() => text,
        _ => DEFAULT_TEST_MESSAGE,
    }
}

pub struct ApiClient {
    client: Client,
    url: Url,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        Self::with_url(config.api_url.clone())
    }

    pub fn with_url(url: Url) -> Result<Self, reqwest::Error> {
        let client = Client::builder().build()?;
        Ok(Self { client, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub async fn send_test_message(&self, message: Option<&str>) -> Result<String, ClientError> {
        let request_body = ChatRequest::user(resolve_message(message));
        debug!("POST {} {:?}", self.url, request_body);

        let response = self
            .client
            .post(self.url.clone())
            .header(header::CONTENT_TYPE, "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!("Response status: {}", status);

        if !status.is_success() {
            return Err(ClientError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        parse_completion(&body)
    }
}

/// Pulls `choices[0].message.content` out of a raw response body.
pub fn parse_completion(body: &str) -> Result<String, ClientError> {
    let value: Value = serde_json::from_str(body).map_err(|e| ClientError::JsonParse {
        reason: e.to_string(),
        body: body.to_owned(),
    })?;

    serde_json::from_value::<ChatResponse>(value.clone())
        .ok()
        .and_then(ChatResponse::into_first_content)
        .ok_or(ClientError::Format { body: value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{body_json, header as header_eq, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ApiClient {
        let url = Url::parse(&format!("{}/chat/completions", server.uri())).unwrap();
        ApiClient::with_url(url).unwrap()
    }

    #[test]
    fn blank_message_resolves_to_default() {
        assert_eq!(resolve_message(None), DEFAULT_TEST_MESSAGE);
        assert_eq!(resolve_message(Some("   ")), DEFAULT_TEST_MESSAGE);
        assert_eq!(resolve_message(Some(" hey ")), "hey");
    }

    #[test]
    fn parse_rejects_non_json() {
        match parse_completion("not-json") {
            Err(ClientError::JsonParse { body, .. }) => assert_eq!(body, "not-json"),
            other => panic!("expected JsonParse, got {:?}", other),
        }
    }

    #[test]
    fn parse_rejects_unexpected_shape() {
        match parse_completion(r#"{"unexpected":"shape"}"#) {
            Err(ClientError::Format { body }) => assert_eq!(body, json!({"unexpected": "shape"})),
            other => panic!("expected Format, got {:?}", other),
        }
    }

    #[test]
    fn parse_rejects_empty_choices() {
        assert!(matches!(
            parse_completion(r#"{"choices":[]}"#),
            Err(ClientError::Format { .. })
        ));
    }

    #[tokio::test]
    async fn returns_first_choice_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header_eq("content-type", "application/json"))
            .and(body_json(json!({
                "messages": [{"role": "user", "content": "say hi"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"content": "hi"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let reply = client_for(&server)
            .send_test_message(Some("say hi"))
            .await
            .unwrap();
        assert_eq!(reply, "hi");
    }

    #[tokio::test]
    async fn none_sends_default_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_json(json!({
                "messages": [{"role": "user", "content": DEFAULT_TEST_MESSAGE}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"content": "ok"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        assert_eq!(client_for(&server).send_test_message(None).await.unwrap(), "ok");
    }

    #[tokio::test]
    async fn server_error_carries_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
            .mount(&server)
            .await;

        match client_for(&server).send_test_message(None).await {
            Err(ClientError::HttpStatus { status, body }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "upstream exploded");
            }
            other => panic!("expected HttpStatus, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn non_json_body_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not-json"))
            .mount(&server)
            .await;

        let result = client_for(&server).send_test_message(None).await;
        assert!(matches!(result, Err(ClientError::JsonParse { .. })));
    }

    #[tokio::test]
    async fn unreachable_host_is_network_error() {
        let url = Url::parse("http://127.0.0.1:1/chat/completions").unwrap();
        let client = ApiClient::with_url(url).unwrap();

        let result = client.send_test_message(None).await;
        assert!(matches!(result, Err(ClientError::Network(_))));
    }
}
