// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for the Uptime Kuma HTTP client.

#[cfg(test)]
mod tests {
    use crate::errors::BackendError;
    use crate::kuma::client::build_api_url;
    use crate::kuma::{KumaClient, MonitorBackend, MonitorPayload};
    use crate::monitor::MonitorSpec;
    use serde_json::json;
    use wiremock::matchers::{body_json, body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn payload() -> MonitorPayload {
        MonitorPayload::from_spec(&MonitorSpec::new("web-prod", "https://web.example.com"), Some(3))
    }

    // =====================================================
    // URL Tests
    // =====================================================

    #[test]
    fn test_build_api_url_with_scheme() {
        assert_eq!(build_api_url("http://kuma:8000"), "http://kuma:8000");
        assert_eq!(build_api_url("https://kuma.example.com/"), "https://kuma.example.com");
    }

    #[test]
    fn test_build_api_url_without_scheme() {
        assert_eq!(build_api_url("kuma:8000"), "http://kuma:8000");
        assert_eq!(build_api_url("kuma:8000//"), "http://kuma:8000");
    }

    #[test]
    fn test_with_token_rejects_unusable_url() {
        let err = KumaClient::with_token("http://", "token").unwrap_err();
        assert!(matches!(err, BackendError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn test_with_token_keeps_base_url() {
        let client = KumaClient::with_token("kuma:8000/", "token").unwrap();
        assert_eq!(client.base_url(), "http://kuma:8000");
    }

    // =====================================================
    // Login Tests
    // =====================================================

    #[tokio::test]
    async fn test_login_sends_form_and_uses_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login/access-token"))
            .and(body_string_contains("username=admin"))
            .and(body_string_contains("password=secret"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"access_token": "tok", "token_type": "bearer"})),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/monitors"))
            .and(header("authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"monitors": []})))
            .expect(1)
            .mount(&server)
            .await;

        let client = KumaClient::login(&server.uri(), "admin", "secret")
            .await
            .unwrap();

        assert!(client.list_monitors().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_login_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login/access-token"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Incorrect username or password"))
            .mount(&server)
            .await;

        let err = KumaClient::login(&server.uri(), "admin", "wrong")
            .await
            .unwrap_err();

        match err {
            BackendError::Login(message) => {
                assert!(message.contains("401"));
                assert!(message.contains("Incorrect username or password"));
            }
            other => panic!("expected login error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_login_unreachable_backend() {
        let err = KumaClient::login("http://127.0.0.1:1", "admin", "secret")
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::Request { .. }));
    }

    // =====================================================
    // Monitor Operation Tests
    // =====================================================

    #[tokio::test]
    async fn test_list_monitors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/monitors"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "monitors": [
                    {"id": 1, "name": "infra", "url": null, "type": "group", "parent": null},
                    {"id": 2, "name": "web-prod", "url": "https://web.example.com", "type": "http", "parent": 1, "interval": 60}
                ]
            })))
            .mount(&server)
            .await;

        let client = KumaClient::with_token(&server.uri(), "tok").unwrap();
        let monitors = client.list_monitors().await.unwrap();

        assert_eq!(monitors.len(), 2);
        assert!(monitors[0].is_group());
        assert_eq!(monitors[1].name, "web-prod");
        assert_eq!(monitors[1].url.as_deref(), Some("https://web.example.com"));
        assert_eq!(monitors[1].parent, Some(1));
    }

    #[tokio::test]
    async fn test_create_monitor_returns_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/monitors"))
            .and(header("authorization", "Bearer tok"))
            .and(body_json(json!({
                "type": "http",
                "name": "web-prod",
                "url": "https://web.example.com",
                "interval": 60,
                "method": "GET",
                "headers": null,
                "parent": 3
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"msg": "Added Successfully.", "monitorID": 12})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = KumaClient::with_token(&server.uri(), "tok").unwrap();
        assert_eq!(client.create_monitor(&payload()).await.unwrap(), 12);
    }

    #[tokio::test]
    async fn test_update_monitor_patches_by_id() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/monitors/12"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"msg": "Saved."})))
            .expect(1)
            .mount(&server)
            .await;

        let client = KumaClient::with_token(&server.uri(), "tok").unwrap();
        client.update_monitor(12, &payload()).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_monitor_by_id() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/monitors/12"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"msg": "Deleted Successfully."})))
            .expect(1)
            .mount(&server)
            .await;

        let client = KumaClient::with_token(&server.uri(), "tok").unwrap();
        client.delete_monitor(12).await.unwrap();
    }

    #[tokio::test]
    async fn test_error_status_is_reported_with_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/monitors"))
            .respond_with(ResponseTemplate::new(422).set_body_string("interval too small"))
            .mount(&server)
            .await;

        let client = KumaClient::with_token(&server.uri(), "tok").unwrap();
        let err = client.create_monitor(&payload()).await.unwrap_err();

        match err {
            BackendError::Status { status, body, url } => {
                assert_eq!(status, 422);
                assert_eq!(body, "interval too small");
                assert!(url.ends_with("/monitors"));
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unexpected_body_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/monitors"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = KumaClient::with_token(&server.uri(), "tok").unwrap();
        let err = client.create_monitor(&payload()).await.unwrap_err();
        assert!(matches!(err, BackendError::Decode { .. }));
    }

    #[test]
    fn test_payload_omits_absent_status_codes() {
        let value = serde_json::to_value(payload()).unwrap();
        assert!(value.get("accepted_statuscodes").is_none());
        assert_eq!(value["type"], "http");
        assert_eq!(value["parent"], 3);
    }
}
