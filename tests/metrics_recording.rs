mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use kv_shortener::domain::repositories::KvStore;
use kv_shortener::routes::api_router;
use kv_shortener::telemetry::recorder::{REQUEST_TOTAL, RESPONSE_TOTAL};
use metrics_util::debugging::{DebugValue, DebuggingRecorder};
use tower::ServiceExt;

/// Counter samples as `(name, labels, value)`, sorted by name.
type Samples = Vec<(String, Vec<(String, String)>, u64)>;

fn labels(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn expected(request_type: &str, status: &str) -> Samples {
    vec![
        (
            REQUEST_TOTAL.to_string(),
            labels(&[("request_type", request_type)]),
            1,
        ),
        (
            RESPONSE_TOTAL.to_string(),
            labels(&[("request_type", request_type), ("status", status)]),
            1,
        ),
    ]
}

/// Sends one request through the router under a fresh local recorder and
/// returns the response status with every counter sample it produced.
fn send(seed: Option<(&str, &str)>, request: Request<Body>) -> (StatusCode, Samples) {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();

    let status = metrics::with_local_recorder(&recorder, || {
        runtime.block_on(async {
            let (state, store) = common::create_test_state();
            if let Some((id, url)) = seed {
                store.set(id, url).await.unwrap();
            }

            api_router(state).oneshot(request).await.unwrap().status()
        })
    });

    let mut samples: Samples = snapshotter
        .snapshot()
        .into_vec()
        .into_iter()
        .filter_map(|(composite, _, _, value)| match value {
            DebugValue::Counter(count) => {
                let key = composite.key();
                let labels: Vec<(String, String)> = key
                    .labels()
                    .map(|l| (l.key().to_string(), l.value().to_string()))
                    .collect();
                Some((key.name().to_string(), labels, count))
            }
            _ => None,
        })
        .collect();
    samples.sort_by(|a, b| a.0.cmp(&b.0));

    (status, samples)
}

fn create_request(body: &str) -> Request<Body> {
    Request::post("/create")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[test]
fn test_create_success_counted_once() {
    let (status, samples) = send(None, create_request(r#"{"url":"https://example.com/a"}"#));

    assert_eq!(status, StatusCode::OK);
    assert_eq!(samples, expected("create", "200"));
}

#[test]
fn test_create_invalid_url_counted_once() {
    let (status, samples) = send(None, create_request(r#"{"url":""}"#));

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(samples, expected("create", "400"));
}

#[test]
fn test_create_unreadable_json_counted_once() {
    let (status, samples) = send(None, create_request("{not json"));

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(samples, expected("create", "400"));
}

#[test]
fn test_redirect_success_counted_once() {
    let request = Request::get("/ab12C").body(Body::empty()).unwrap();

    let (status, samples) = send(Some(("ab12C", "https://example.com/target")), request);

    assert_eq!(status, StatusCode::FOUND);
    assert_eq!(samples, expected("redirect", "302"));
}

#[test]
fn test_redirect_not_found_counted_once() {
    let request = Request::get("/nothere").body(Body::empty()).unwrap();

    let (status, samples) = send(None, request);

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(samples, expected("redirect", "404"));
}

#[test]
fn test_health_is_not_counted() {
    let request = Request::get("/health").body(Body::empty()).unwrap();

    let (status, samples) = send(None, request);

    assert_eq!(status, StatusCode::OK);
    assert!(samples.is_empty());
}
