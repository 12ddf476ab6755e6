//! Tests for the process-wide default client and codec registration.

use bytes::Bytes;
use rested::{
    ContentType, Error, RequestOptions, default_decoders, default_encoders, encode_fn,
    register_decoder, register_encoder,
};
use serde::{Deserialize, Serialize};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_string, header, method, path},
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct Article {
    title: String,
    body: String,
}

#[tokio::test]
async fn test_free_functions_use_default_client() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/articles/1"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"title":"golang generics","body":""}"#,
            "application/json; charset=utf-8",
        ))
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/articles/1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = format!("{}/articles/1", mock_server.uri());

    let article: Article = rested::get(&url, RequestOptions::new()).await.expect("article");
    assert_eq!(article.title, "golang generics");

    rested::delete(&url, RequestOptions::new()).await.expect("deleted");

    let result = rested::modify::<Article>("GET", &url, RequestOptions::new()).await;
    assert!(matches!(result, Err(Error::MethodNotAllowed { .. })));
}

#[tokio::test]
async fn test_registered_codecs_apply_to_later_calls() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/articles.csv"))
        .and(header("Content-Type", "text/csv"))
        .and(body_string("golang generics,"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("golang generics,", "text/csv"))
        .mount(&mock_server)
        .await;

    let url = format!("{}/articles.csv", mock_server.uri());
    let options = || {
        RequestOptions::new()
            .header("Content-Type", "text/csv")
            .body(Article {
                title: "golang generics".to_string(),
                body: String::new(),
            })
    };

    let result = rested::modify::<Article>("POST", &url, options()).await;
    assert!(matches!(result, Err(Error::EncoderNotFound(_))));

    let before = default_encoders();
    register_encoder(
        "text/csv; charset=utf-8",
        encode_fn(|value| {
            let json = serde_json::to_value(value)?;
            let title = json["title"].as_str().unwrap_or_default();
            let body = json["body"].as_str().unwrap_or_default();
            Ok(Bytes::from(format!("{title},{body}")))
        }),
    );
    register_decoder(
        ContentType::new("text/csv"),
        rested::decode_fn(|data, sink| {
            let text = std::str::from_utf8(data)?;
            let (title, body) = text.split_once(',').unwrap_or((text, ""));
            let json = serde_json::json!({ "title": title, "body": body });
            let mut erased = <dyn erased_serde::Deserializer>::erase(json);
            sink(&mut erased)?;
            Ok(())
        }),
    );

    assert!(!before.contains(&ContentType::new("text/csv")));
    assert!(default_encoders().contains(&ContentType::new("text/csv")));
    assert!(default_decoders().contains(&ContentType::new("text/csv")));

    let article = rested::modify::<Article>("POST", &url, options())
        .await
        .expect("csv codecs registered");
    assert_eq!(
        article,
        Article {
            title: "golang generics".to_string(),
            body: String::new(),
        }
    );
}
