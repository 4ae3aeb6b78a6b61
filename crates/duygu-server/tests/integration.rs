//! End-to-end tests over a real TCP listener.

use std::sync::Arc;
use std::time::Duration;

use duygu_classifier::{MockClassifier, SentimentAnalyzer};
use duygu_server::{DuyguServer, ServerConfig};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::time::timeout;

const TIMEOUT: Duration = Duration::from_secs(5);

struct Booted {
    base: String,
    server: Arc<DuyguServer>,
    handle: tokio::task::JoinHandle<std::io::Result<()>>,
    tr: Arc<MockClassifier>,
    en: Arc<MockClassifier>,
}

/// Boot a server on an ephemeral port with mock classifiers.
async fn boot_server() -> Booted {
    let tr = Arc::new(
        MockClassifier::from_pairs(&[("negative", 0.52), ("positive", 0.48)]).with_name("mock:tr"),
    );
    let en = Arc::new(
        MockClassifier::from_pairs(&[
            ("negative", 0.91),
            ("neutral", 0.06),
            ("positive", 0.03),
        ])
        .with_name("mock:en"),
    );
    let analyzer = SentimentAnalyzer::new(tr.clone(), en.clone());
    let handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .build_recorder()
        .handle();
    let server = Arc::new(DuyguServer::new(ServerConfig::default(), analyzer, handle));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let token = server.shutdown().token();
    let serving = server.clone();
    let handle = tokio::spawn(async move { serving.serve(listener, token).await });

    Booted {
        base: format!("http://{addr}"),
        server,
        handle,
        tr,
        en,
    }
}

async fn predict(client: &reqwest::Client, base: &str, body: Value) -> (u16, Value) {
    let resp = timeout(
        TIMEOUT,
        client.post(format!("{base}/api/predict")).json(&body).send(),
    )
    .await
    .unwrap()
    .unwrap();
    let status = resp.status().as_u16();
    (status, resp.json().await.unwrap())
}

#[tokio::test]
async fn near_tie_turkish_is_neutral() {
    let b = boot_server().await;
    let client = reqwest::Client::new();

    let (status, body) = predict(&client, &b.base, json!({"text": "fena değil", "lang": "tr"})).await;
    assert_eq!(status, 200);
    assert_eq!(body["label_tr"], "nötr");
    assert_eq!(body["label_en"], "NEUTRAL (TR)");
    assert_eq!(b.tr.calls(), 1);
}

#[tokio::test]
async fn english_negative() {
    let b = boot_server().await;
    let client = reqwest::Client::new();

    let (status, body) = predict(&client, &b.base, json!({"text": "awful", "lang": "en"})).await;
    assert_eq!(status, 200);
    assert_eq!(body["label_tr"], "negatif");
    assert_eq!(body["label_en"], "NEGATIVE (EN)");
    for key in ["negative", "neutral", "positive"] {
        let p = body["probs"][key].as_f64().unwrap();
        assert!((0.0..=1.0).contains(&p));
    }
    assert_eq!(b.en.calls(), 1);
}

#[tokio::test]
async fn blank_input_sentinel_over_the_wire() {
    let b = boot_server().await;
    let client = reqwest::Client::new();

    let (status, body) = predict(&client, &b.base, json!({"text": "\n  \t"})).await;
    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({"probs": {"error": "Boş giriş"}, "label_tr": "boş", "label_en": "EMPTY"})
    );
    assert_eq!(b.tr.calls() + b.en.calls(), 0);
}

#[tokio::test]
async fn concurrent_requests() {
    let b = boot_server().await;
    let client = reqwest::Client::new();

    let requests = (0..16).map(|i| {
        let lang = if i % 2 == 0 { "tr" } else { "en" };
        predict(&client, &b.base, json!({"text": format!("metin {i}"), "lang": lang}))
    });
    let results = futures::future::join_all(requests).await;
    assert!(results.iter().all(|(status, _)| *status == 200));
    assert_eq!(b.tr.calls(), 8);
    assert_eq!(b.en.calls(), 8);
}

#[tokio::test]
async fn health_and_form_reachable() {
    let b = boot_server().await;
    let client = reqwest::Client::new();

    let health: Value = client
        .get(format!("{}/health", b.base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["status"], "ok");
    assert_eq!(health["models"]["en"], "mock:en");

    let page = client
        .get(format!("{}/", b.base))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("Duygu Analizi API"));
}

#[tokio::test]
async fn graceful_shutdown_stops_serving() {
    let b = boot_server().await;
    b.server.shutdown().shutdown();
    let result = timeout(TIMEOUT, b.handle).await.unwrap().unwrap();
    assert!(result.is_ok());

    let client = reqwest::Client::new();
    assert!(client.get(format!("{}/health", b.base)).send().await.is_err());
}
