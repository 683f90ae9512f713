use askbot::{
    AskBackend, AskClient, AskError, Config, ConversationController, Sender, ERROR_REPLY,
    NO_RESPONSE,
};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.base_url = server.uri();
    config
}

#[tokio::test]
async fn posts_question_as_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ask"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({"question": "What is the capital of France?"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"answer": "Paris"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut controller = ConversationController::new(AskClient::new(&config_for(&server)).unwrap());
    let reply = controller.submit("What is the capital of France?").await.unwrap();

    assert_eq!(reply.text, "Paris");
    assert_eq!(reply.sender, Sender::Bot);
}

#[tokio::test]
async fn empty_object_gives_no_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ask"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let mut controller = ConversationController::new(AskClient::new(&config_for(&server)).unwrap());
    assert_eq!(controller.submit("hello").await.unwrap().text, NO_RESPONSE);
}

#[tokio::test]
async fn error_status_with_json_body_is_still_read() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ask"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"answer": "Try again later"})))
        .mount(&server)
        .await;

    let client = AskClient::new(&config_for(&server)).unwrap();
    let response = client.ask("hello").await.unwrap();
    assert_eq!(response.answer_text(), "Try again later");
}

#[tokio::test]
async fn unparseable_body_gives_error_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ask"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let client = AskClient::new(&config_for(&server)).unwrap();
    assert!(matches!(client.ask("hello").await, Err(AskError::Decode(_))));

    let mut controller = ConversationController::new(client);
    assert_eq!(controller.submit("hello").await.unwrap().text, ERROR_REPLY);
    assert!(!controller.conversation().is_in_flight());
}

#[tokio::test]
async fn slow_backend_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ask"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"answer": "too late"}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let mut config = config_for(&server);
    config.request_timeout_secs = 1;
    let client = AskClient::new(&config).unwrap();
    assert!(matches!(client.ask("hello").await, Err(AskError::Timeout)));

    let mut controller = ConversationController::new(client);
    assert_eq!(controller.submit("hello").await.unwrap().text, ERROR_REPLY);
}

#[tokio::test]
async fn connection_refused_gives_error_reply() {
    // Bind and drop a listener to get a port nobody is serving
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut config = Config::default();
    config.base_url = format!("http://{}", addr);
    let mut controller = ConversationController::new(AskClient::new(&config).unwrap());

    assert_eq!(controller.submit("anyone there?").await.unwrap().text, ERROR_REPLY);
    assert_eq!(controller.conversation().messages().len(), 2);
}

#[tokio::test]
async fn trailing_slash_in_base_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ask"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"answer": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = config_for(&server);
    config.base_url.push('/');
    let client = AskClient::new(&config).unwrap();
    assert_eq!(client.ask("ping").await.unwrap().answer_text(), "ok");
}

#[tokio::test]
async fn blank_question_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"answer": "?"})))
        .expect(0)
        .mount(&server)
        .await;

    let mut controller = ConversationController::new(AskClient::new(&config_for(&server)).unwrap());
    assert!(controller.submit("   ").await.is_none());
    assert!(controller.conversation().messages().is_empty());
}
