//! Unit tests for the demo service

#[cfg(test)]
mod config_tests {
    use crate::config::*;
    use std::collections::HashMap;
    use std::net::{IpAddr, Ipv4Addr};

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_port_defaults_to_3000() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.host, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    }

    #[test]
    fn test_empty_port_uses_default() {
        let config = ServerConfig::from_lookup(lookup(&[("PORT", "")])).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn test_port_from_env() {
        let config = ServerConfig::from_lookup(lookup(&[("PORT", "8080")])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.socket_addr().port(), 8080);
    }

    #[test]
    fn test_invalid_port() {
        let result = ServerConfig::from_lookup(lookup(&[("PORT", "http")]));
        assert!(matches!(result, Err(ConfigError::InvalidPort { .. })));

        let result = ServerConfig::from_lookup(lookup(&[("PORT", "70000")]));
        assert!(matches!(result, Err(ConfigError::InvalidPort { .. })));
    }

    #[test]
    fn test_host_from_env() {
        let config = ServerConfig::from_lookup(lookup(&[("HOST", "127.0.0.1")])).unwrap();
        assert_eq!(config.host, IpAddr::V4(Ipv4Addr::LOCALHOST));

        let result = ServerConfig::from_lookup(lookup(&[("HOST", "localhost")]));
        assert!(matches!(result, Err(ConfigError::InvalidHost { .. })));
    }

    #[test]
    fn test_demo_defaults() {
        let config = DemoConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.plaintext, "sUperpassw0rd!");
        assert_eq!(config.decoy, "pass123");
        assert_eq!(config.salt_rounds, 12);
    }

    #[test]
    fn test_salt_rounds() {
        let config = DemoConfig::from_lookup(lookup(&[("SALT_ROUNDS", "6")])).unwrap();
        assert_eq!(config.salt_rounds, 6);

        // Range is checked by the pipeline, not at startup
        let config = DemoConfig::from_lookup(lookup(&[("SALT_ROUNDS", "40")])).unwrap();
        assert_eq!(config.salt_rounds, 40);

        for bad in ["twelve", "-1", "4.5"] {
            let result = DemoConfig::from_lookup(lookup(&[("SALT_ROUNDS", bad)]));
            assert!(
                matches!(result, Err(ConfigError::InvalidSaltRounds { .. })),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_demo_config_debug_redaction() {
        let debug = format!("{:?}", DemoConfig::default());
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("sUperpassw0rd!"));
    }
}

#[cfg(test)]
mod demo_tests {
    use crate::config::DemoConfig;
    use crate::demo::*;
    use platform::password::{ClearTextPassword, HashedPassword, PasswordHashError};

    fn fast_config() -> DemoConfig {
        DemoConfig {
            salt_rounds: 4,
            ..DemoConfig::default()
        }
    }

    fn config_with_rounds(salt_rounds: u32) -> DemoConfig {
        DemoConfig {
            salt_rounds,
            ..DemoConfig::default()
        }
    }

    #[tokio::test]
    async fn test_pipeline_with_default_credentials() {
        let report = run(&DemoConfig::default()).await.unwrap();

        assert!(report.hash.as_hash_string().starts_with("$2b$12$"));
        assert!(report.matches);
        assert!(!report.decoy_matches);
    }

    #[tokio::test]
    async fn test_verify_stage_uses_hash_from_hash_stage() {
        let config = fast_config();
        let hashed = hash_stage(&config).await.unwrap();

        assert!(
            hashed
                .verify(&ClearTextPassword::new("sUperpassw0rd!"))
                .unwrap()
        );
        assert_eq!(verify_stage(&config, &hashed).await.unwrap(), (true, false));
    }

    #[tokio::test]
    async fn test_each_run_salts_differently() {
        let config = fast_config();
        let first = run(&config).await.unwrap();
        let second = run(&config).await.unwrap();

        assert_ne!(first.hash, second.hash);
        assert!(first.matches && second.matches);
    }

    #[test]
    fn test_blocking_pipeline() {
        let report = run_blocking(&fast_config()).unwrap();
        assert!(report.matches);
        assert!(!report.decoy_matches);
        assert_eq!(report.hash.cost().unwrap().get(), 4);
    }

    #[tokio::test]
    async fn test_spawned_pipeline_reports_outcome() {
        let report = spawn(fast_config()).await.unwrap();
        assert!(report.is_some_and(|r| r.matches && !r.decoy_matches));
    }

    #[test]
    fn test_demo_error_display() {
        let err = DemoError::Verify(PasswordHashError::InvalidHashFormat("bad".into()));
        assert_eq!(
            err.to_string(),
            "verification stage failed: Invalid password hash format: bad"
        );
    }

    #[tokio::test]
    async fn test_invalid_cost_fails_hash_stage() {
        let result = run(&config_with_rounds(40)).await;
        assert!(matches!(
            result,
            Err(DemoError::Hash(PasswordHashError::InvalidCost { actual: 40, .. }))
        ));

        let result = run(&config_with_rounds(3)).await;
        assert!(matches!(
            result,
            Err(DemoError::Hash(PasswordHashError::InvalidCost { actual: 3, .. }))
        ));
    }

    #[tokio::test]
    async fn test_spawned_pipeline_swallows_failure() {
        let outcome = spawn(config_with_rounds(40)).await;
        // The task itself completes normally; only the report is missing
        assert!(matches!(outcome, Ok(None)));
    }

    #[test]
    fn test_blocking_pipeline_rejects_invalid_cost() {
        let result = run_blocking(&config_with_rounds(32));
        assert!(matches!(
            result,
            Err(DemoError::Hash(PasswordHashError::InvalidCost { actual: 32, .. }))
        ));
    }

    #[test]
    fn test_malformed_hash_is_rejected_before_verification() {
        let result = "$2b$04$tooshort".parse::<HashedPassword>();
        assert!(matches!(
            result,
            Err(PasswordHashError::InvalidHashFormat(_))
        ));
    }
}

#[cfg(test)]
mod router_tests {
    use crate::app::{build_app, build_router};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = build_router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_unknown_route_is_problem_details() {
        let response = build_app()
            .oneshot(Request::get("/login").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["status"], 404);
        assert_eq!(body["detail"], "No route for /login");
    }

    #[tokio::test]
    async fn test_wrong_method() {
        let response = build_app()
            .oneshot(Request::post("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let body = body_json(response).await;
        assert_eq!(body["title"], "Method Not Allowed");
    }

    #[tokio::test]
    async fn test_app_info_hook() {
        let response = build_app()
            .oneshot(
                Request::get("/_api/app-info")
                    .header("x-test-runner", "1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["name"], "demo-api");
        let headers = body["headers"].as_array().unwrap();
        assert!(headers.iter().any(|h| h == "x-test-runner"));
    }

    #[tokio::test]
    async fn test_cors_is_open_for_harness() {
        let response = build_app()
            .oneshot(
                Request::get("/_api/app-info")
                    .header("origin", "https://runner.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "*"
        );
    }

    #[tokio::test]
    async fn test_hook_is_absent_without_registration() {
        let response = build_router()
            .oneshot(Request::get("/_api/app-info").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

#[cfg(test)]
mod listener_tests {
    use crate::app::build_app;
    use crate::config::ServerConfig;
    use std::net::{IpAddr, Ipv4Addr};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    #[tokio::test]
    async fn test_listener_accepts_connections() {
        let config = ServerConfig {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 0,
        };
        let listener = TcpListener::bind(config.socket_addr()).await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move { axum::serve(listener, build_app()).await });

        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();

        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        assert!(response.starts_with("HTTP/1.1 200 OK"), "{response}");

        server.abort();
    }
}
