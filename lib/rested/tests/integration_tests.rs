//! Integration tests for `RestClient` over `HyperClient` using wiremock.

use std::time::Duration;

use assert2::let_assert;
use bytes::Bytes;
use rested::{
    ContentType, Error, Headers, HyperClient, Method, RequestOptions, RestClient, decode_fn,
    encode_fn,
};
use serde::{Deserialize, Serialize};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, body_string, header, method, path},
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct Article {
    title: String,
    body: String,
}

fn golang_generics() -> Article {
    Article {
        title: "golang generics".to_string(),
        body: String::new(),
    }
}

fn client() -> RestClient {
    RestClient::new(HyperClient::new())
}

#[tokio::test]
async fn test_get_decodes_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/articles/1"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"title":"golang generics","body":""}"#,
            "application/json",
        ))
        .mount(&mock_server)
        .await;

    let article: Article = client()
        .get(&format!("{}/articles/1", mock_server.uri()), RequestOptions::new())
        .await
        .expect("article");

    assert_eq!(article, golang_generics());
}

#[tokio::test]
async fn test_modify_sends_headers_and_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/articles/1"))
        .and(header("Content-Type", "application/json"))
        .and(header("Authorization", "Bearer secret"))
        .and(body_json(golang_generics()))
        .respond_with(ResponseTemplate::new(200).set_body_json(golang_generics()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let headers = Headers::new()
        .content_type(ContentType::JSON)
        .bearer_auth("secret")
        .build()
        .expect("valid headers");
    let updated: Article = client()
        .modify(
            "put",
            &format!("{}/articles/1", mock_server.uri()),
            RequestOptions::new().headers(headers).body(golang_generics()),
        )
        .await
        .expect("updated");

    assert_eq!(updated, golang_generics());
}

#[tokio::test]
async fn test_modify_rejects_trace_without_network() {
    let mock_server = MockServer::start().await;

    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let result = client()
        .modify::<Article>(
            "TRACE",
            &format!("{}/articles", mock_server.uri()),
            RequestOptions::new(),
        )
        .await;

    let_assert!(Err(err) = result);
    assert_eq!(
        err.to_string(),
        "method not allowed: TRACE, you can use one of [POST, PUT, PATCH]"
    );
}

#[tokio::test]
async fn test_delete_no_content() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/articles/1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    client()
        .delete(&format!("{}/articles/1", mock_server.uri()), RequestOptions::new())
        .await
        .expect("deleted");
}

#[tokio::test]
async fn test_not_found_keeps_body_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/articles/404"))
        .respond_with(ResponseTemplate::new(404).set_body_raw("Not Found", "application/json"))
        .mount(&mock_server)
        .await;

    let result = client()
        .get::<Article>(&format!("{}/articles/404", mock_server.uri()), RequestOptions::new())
        .await;

    let_assert!(Err(Error::Http { status, message }) = result);
    assert_eq!(status, 404);
    assert_eq!(message, "Not Found");
}

#[tokio::test]
async fn test_delete_reports_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&mock_server)
        .await;

    let result = client()
        .delete(&format!("{}/articles/1", mock_server.uri()), RequestOptions::new())
        .await;

    let_assert!(Err(err) = result);
    assert!(err.is_server_error());
    assert_eq!(err.body(), Some("maintenance"));
}

#[tokio::test]
async fn test_empty_body_yields_default() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/articles"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&mock_server)
        .await;

    let created: Article = client()
        .modify(
            "POST",
            &format!("{}/articles", mock_server.uri()),
            RequestOptions::new().body(golang_generics()),
        )
        .await
        .expect("empty body is not an error");

    assert_eq!(created, Article::default());
}

#[tokio::test]
async fn test_string_target_gets_raw_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/raw"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("{ definitely not json", "application/json"),
        )
        .mount(&mock_server)
        .await;

    let text: String = client()
        .get(&format!("{}/raw", mock_server.uri()), RequestOptions::new())
        .await
        .expect("raw text");

    assert_eq!(text, "{ definitely not json");
}

#[tokio::test]
async fn test_xml_round_trip() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/articles"))
        .and(header("Content-Type", "application/xml"))
        .and(body_string("<Article><title>golang generics</title><body>draft</body></Article>"))
        .respond_with(ResponseTemplate::new(201).set_body_raw(
            "<Article><title>golang generics</title><body>created</body></Article>",
            "application/xml; charset=utf-8",
        ))
        .mount(&mock_server)
        .await;

    let created: Article = client()
        .modify(
            "post",
            &format!("{}/articles", mock_server.uri()),
            RequestOptions::new()
                .header("Content-Type", "application/xml")
                .body(Article {
                    title: "golang generics".to_string(),
                    body: "draft".to_string(),
                }),
        )
        .await
        .expect("xml");

    assert_eq!(created.title, "golang generics");
    assert_eq!(created.body, "created");
}

#[tokio::test]
async fn test_form_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .and(header("Content-Type", "application/x-www-form-urlencoded"))
        .and(body_string("title=golang+generics&body="))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let _: () = client()
        .modify(
            "post",
            &format!("{}/login", mock_server.uri()),
            RequestOptions::new()
                .headers(
                    Headers::new()
                        .content_type(ContentType::FORM_URL_ENCODED)
                        .build()
                        .expect("valid headers"),
                )
                .body(golang_generics()),
        )
        .await
        .expect("form accepted");
}

#[tokio::test]
async fn test_unknown_content_types() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/yaml"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("title: x", "application/yaml"))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client();

    let result = client
        .get::<Article>(&format!("{}/yaml", mock_server.uri()), RequestOptions::new())
        .await;
    let_assert!(Err(Error::DecoderNotFound(content_type)) = result);
    assert_eq!(content_type.as_str(), "application/yaml");

    let result = client
        .modify::<Article>(
            "POST",
            &format!("{}/articles", mock_server.uri()),
            RequestOptions::new()
                .header("Content-Type", "custom content type")
                .body(golang_generics()),
        )
        .await;
    assert!(matches!(result, Err(Error::EncoderNotFound(_))));
}

#[tokio::test]
async fn test_overrides_apply_to_one_call() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/articles"))
        .and(body_string("GOLANG GENERICS"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("ignored", "application/json"))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/articles"))
        .and(body_json(golang_generics()))
        .respond_with(ResponseTemplate::new(200).set_body_json(golang_generics()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let shouting = encode_fn(|_| Ok(Bytes::from_static(b"GOLANG GENERICS")));
    let canned = decode_fn(|_, sink| {
        let mut de = serde_json::Deserializer::from_str(r#"{"title":"canned","body":""}"#);
        let mut erased = <dyn erased_serde::Deserializer>::erase(&mut de);
        sink(&mut erased)?;
        Ok(())
    });

    let client = client();
    let url = format!("{}/articles", mock_server.uri());

    let overridden: Article = client
        .modify(
            "POST",
            &url,
            RequestOptions::new()
                .body(golang_generics())
                .marshal_with(shouting)
                .unmarshal_with(canned),
        )
        .await
        .expect("override");
    assert_eq!(overridden.title, "canned");

    let plain: Article = client
        .modify("POST", &url, RequestOptions::new().body(golang_generics()))
        .await
        .expect("plain");
    assert_eq!(plain, golang_generics());
}

#[tokio::test]
async fn test_client_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&mock_server)
        .await;

    let client = RestClient::new(
        HyperClient::builder()
            .timeout(Duration::from_millis(100))
            .build(),
    );

    let result = client
        .get::<Article>(&format!("{}/slow", mock_server.uri()), RequestOptions::new())
        .await;

    let_assert!(Err(err) = result);
    assert!(err.is_timeout());
}

#[tokio::test]
async fn test_per_call_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&mock_server)
        .await;

    let result = client()
        .get::<Article>(
            &format!("{}/slow", mock_server.uri()),
            RequestOptions::new().timeout(Duration::from_millis(100)),
        )
        .await;

    let_assert!(Err(Error::Timeout) = result);
}

#[tokio::test]
async fn test_connection_error() {
    let result = client()
        .get::<Article>("http://127.0.0.1:1/articles", RequestOptions::new())
        .await;

    let_assert!(Err(err) = result);
    assert!(err.is_connection());
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_execute_any_method() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/articles/1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let _: () = client()
        .execute(
            Method::Head,
            &format!("{}/articles/1", mock_server.uri()),
            RequestOptions::new(),
        )
        .await
        .expect("head");
}

#[tokio::test]
async fn test_logging_middleware_passes_through() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(golang_generics()))
        .mount(&mock_server)
        .await;

    let client = RestClient::new(HyperClient::new().with_debug_logging());

    let article: Article = client
        .get(&format!("{}/articles/1", mock_server.uri()), RequestOptions::new())
        .await
        .expect("article");

    assert_eq!(article, golang_generics());
}
