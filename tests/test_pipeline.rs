use reqwest::StatusCode;
use rstest::*;
use serde_json::json;
use sonarqube::errors::DecodeError;
use sonarqube::services::ce::{ActivityOptions, CancelOptions, TaskOptions};
use sonarqube::services::sources::RawOptions;
use sonarqube::types::ServerUrl;
use sonarqube::{SonarClient, SonarError};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod helpers;
use helpers::{client_for, AnyResult, TOKEN_BASIC};

#[rstest]
#[case("true", true)]
#[case("false", false)]
#[case("true\n", true)]
#[tokio::test]
async fn test_is_queue_empty(#[case] body: &str, #[case] expected: bool) -> AnyResult {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/analysis_reports/is_queue_empty"))
        .and(header("accept", "text/plain"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_for(&server);
    assert_eq!(client.analysis_reports().is_queue_empty().await?, expected);
    Ok(())
}

#[tokio::test]
async fn test_is_queue_empty_rejects_other_text() {
    let server = MockServer::start().await;
    Mock::given(path("/api/analysis_reports/is_queue_empty"))
        .respond_with(ResponseTemplate::new(200).set_body_string("maybe"))
        .mount(&server)
        .await;
    let err = client_for(&server)
        .analysis_reports()
        .is_queue_empty()
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::OK));
    assert!(matches!(
        err,
        SonarError::Decode {
            source: DecodeError::Bool(_),
            ..
        }
    ));
}

#[tokio::test]
async fn test_cancel_sends_json_body() -> AnyResult {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/ce/cancel"))
        .and(header("content-type", "application/json"))
        .and(header("authorization", TOKEN_BASIC))
        .and(body_json(json!({"id": "AVAn5RKqYwETbXvgas-I"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    let options = CancelOptions {
        id: "AVAn5RKqYwETbXvgas-I".to_string(),
    };
    client_for(&server).ce().cancel(&options).await?;
    Ok(())
}

#[tokio::test]
async fn test_error_message_from_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/ce/task"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"message": "invalid key"})),
        )
        .mount(&server)
        .await;
    let options = TaskOptions {
        id: "nope".to_string(),
        ..Default::default()
    };
    let err = client_for(&server).ce().task(&options).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    let message = err.to_string();
    assert!(message.contains("invalid key"), "{}", message);
    let prefix = format!("GET {}/api/ce/task: 400 ", server.uri());
    assert!(message.starts_with(&prefix), "{}", message);
    assert!(!message.contains("nope"), "query string leaked: {}", message);
}

#[tokio::test]
async fn test_error_message_from_text_body() {
    let server = MockServer::start().await;
    Mock::given(path("/api/system/ping"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;
    match client_for(&server).system().ping().await.unwrap_err() {
        SonarError::Api(e) => {
            assert_eq!(e.status(), StatusCode::BAD_GATEWAY);
            assert_eq!(e.message, "Bad Gateway");
            assert_eq!(e.response.path, "/api/system/ping");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_none_options_send_no_query() -> AnyResult {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/ce/activity"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"tasks": []})))
        .expect(1)
        .mount(&server)
        .await;
    let res = client_for(&server).ce().activity(None).await?;
    assert!(res.tasks.is_empty());
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.query(), None);
    assert!(requests[0].body.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_list_options_are_comma_joined() -> AnyResult {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/ce/activity"))
        .and(query_param("status", "FAILED,CANCELED"))
        .and(query_param("component", "my_project"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tasks": [{
                "id": "AU-Tpxb--iU5OvuD2FLy",
                "type": "REPORT",
                "status": "FAILED",
                "componentKey": "my_project",
                "submittedAt": "2015-08-13T23:34:59+0200"
            }],
            "paging": {"pageIndex": 1, "pageSize": 100, "total": 1}
        })))
        .expect(1)
        .mount(&server)
        .await;
    let options = ActivityOptions {
        component: Some("my_project".to_string()),
        status: vec!["FAILED".to_string(), "CANCELED".to_string()],
        ..Default::default()
    };
    let res = client_for(&server).ce().activity(Some(&options)).await?;
    assert_eq!(res.tasks.len(), 1);
    assert_eq!(res.tasks[0].id.as_str(), "AU-Tpxb--iU5OvuD2FLy");
    assert!(res.tasks[0].status.is_finished());
    assert!(!res.paging.unwrap().has_next());
    Ok(())
}

#[tokio::test]
async fn test_validation_failure_sends_nothing() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let err = client
        .ce()
        .cancel(&CancelOptions::default())
        .await
        .unwrap_err();
    assert!(err.is_validation());
    assert_eq!(err.status(), None);

    let options = ActivityOptions {
        status: vec!["DONE".to_string()],
        ..Default::default()
    };
    let err = client.ce().activity(Some(&options)).await.unwrap_err();
    assert!(err.is_validation());

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_writer_receives_body() -> AnyResult {
    let server = MockServer::start().await;
    let source = "fn main() {\n    println!(\"hello\");\n}\n";
    Mock::given(method("GET"))
        .and(path("/api/sources/raw"))
        .and(query_param("key", "my_project:src/main.rs"))
        .respond_with(ResponseTemplate::new(200).set_body_string(source))
        .expect(1)
        .mount(&server)
        .await;
    let mut sink: Vec<u8> = Vec::new();
    let res = client_for(&server)
        .sources()
        .raw_to(&RawOptions::new("my_project:src/main.rs"), &mut sink)
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.body().is_empty());
    assert_eq!(sink, source.as_bytes());
    Ok(())
}

#[tokio::test]
async fn test_writer_untouched_on_error() {
    let server = MockServer::start().await;
    Mock::given(path("/api/sources/raw"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "errors": [{"msg": "Component key 'x' not found"}]
        })))
        .mount(&server)
        .await;
    let mut sink: Vec<u8> = Vec::new();
    let err = client_for(&server)
        .sources()
        .raw_to(&RawOptions::new("x"), &mut sink)
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    assert!(err.to_string().contains("{errors: [{msg: Component key 'x' not found}]}"));
    assert!(sink.is_empty());
}

#[rstest]
#[case(200)]
#[case(202)]
#[case(204)]
#[case(304)]
#[tokio::test]
async fn test_success_statuses(#[case] status: u16) -> AnyResult {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/system/restart"))
        .respond_with(ResponseTemplate::new(status))
        .expect(1)
        .mount(&server)
        .await;
    client_for(&server).system().restart().await?;
    Ok(())
}

#[tokio::test]
async fn test_server_url_with_context_path() -> AnyResult {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sonar/api/system/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_string("pong"))
        .expect(1)
        .mount(&server)
        .await;
    let url = ServerUrl::try_from(format!("{}/sonar", server.uri()))?;
    let client = SonarClient::builder(url).build()?;
    assert_eq!(client.system().ping().await?, "pong");
    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
    Ok(())
}

#[tokio::test]
async fn test_basic_and_bearer_auth() -> AnyResult {
    let server = MockServer::start().await;
    Mock::given(path("/api/authentication/validate"))
        .and(header("authorization", "Basic YWRtaW46YWRtaW4="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"valid": true})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(path("/api/authentication/validate"))
        .and(header("authorization", "Bearer squ_456"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"valid": false})))
        .expect(1)
        .mount(&server)
        .await;

    let basic = helpers::builder_for(&server)
        .basic_auth("admin", "admin")
        .build()?;
    assert!(basic.authentication().validate().await?.valid);

    let bearer = helpers::builder_for(&server).bearer("squ_456").build()?;
    assert!(!bearer.authentication().validate().await?.valid);
    Ok(())
}

#[tokio::test]
async fn test_truncated_error_body_keeps_status() -> AnyResult {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let head = "HTTP/1.1 500 Internal Server Error\r\ncontent-length: 100\r\n\r\n{\"mess";
            let _ = socket.write_all(head.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });
    let client = SonarClient::builder(ServerUrl::try_from(format!("http://{}", addr))?).build()?;
    let err = client.system().ping().await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    match err {
        SonarError::Api(e) => {
            assert!(e.message.starts_with("failed to read response body"), "{}", e.message);
            assert_eq!(e.response.path, "/api/system/ping");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    Ok(())
}
