mod common;

use kv_shortener::application::services::ShortenerService;
use kv_shortener::domain::repositories::KvStore;
use kv_shortener::error::AppError;
use kv_shortener::infrastructure::store::MemoryStore;
use std::collections::HashSet;
use std::sync::Arc;

fn service(store: Arc<dyn KvStore>) -> ShortenerService {
    ShortenerService::from_settings(store, &common::test_settings())
}

#[tokio::test]
async fn test_identifiers_are_unique() {
    let store = Arc::new(MemoryStore::new());
    let service = service(store.clone());

    let mut ids = HashSet::new();
    for i in 0..500 {
        let link = service
            .create(&format!("https://example.com/{i}"))
            .await
            .unwrap();
        ids.insert(link.id);
    }

    assert_eq!(ids.len(), 500);
    assert_eq!(store.len().await, 500);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_never_overwrite() {
    let store = Arc::new(MemoryStore::new());
    let service = Arc::new(service(store.clone()));

    let handles: Vec<_> = (0..200)
        .map(|i| {
            let service = service.clone();
            tokio::spawn(async move {
                let url = format!("https://example.com/{i}");
                let link = service.create(&url).await.unwrap();
                (link.id, url)
            })
        })
        .collect();

    let mut created = Vec::new();
    for handle in handles {
        created.push(handle.await.unwrap());
    }

    for (id, url) in &created {
        assert_eq!(&service.resolve(id.as_str()).await.unwrap(), url);
    }
    assert_eq!(store.len().await, created.len());
}

#[tokio::test]
async fn test_round_trip() {
    let service = service(Arc::new(MemoryStore::new()));

    for url in [
        "https://example.com/a",
        "http://example.com",
        "https://example.com/path?query=1&b=%20#frag",
        "https://xn--bcher-kva.example/ü",
    ] {
        let link = service.create(url).await.unwrap();
        assert_eq!(service.resolve(link.id.as_str()).await.unwrap(), url);
    }
}

#[tokio::test]
async fn test_repeated_reads_are_stable() {
    let service = service(Arc::new(MemoryStore::new()));
    let link = service.create("https://example.com/stable").await.unwrap();

    for _ in 0..5 {
        assert_eq!(
            service.resolve(link.id.as_str()).await.unwrap(),
            "https://example.com/stable"
        );
    }
}

#[tokio::test]
async fn test_unknown_identifier_is_absent() {
    let service = service(Arc::new(MemoryStore::new()));

    let result = service.resolve("ab12C").await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_short_url_composition() {
    let service = service(Arc::new(MemoryStore::new()));

    let link = service.create("https://example.com/a").await.unwrap();

    assert_eq!(link.short_url, format!("http://base/{}", link.id));
}

#[tokio::test]
async fn test_saturated_store_fails_fast() {
    let store = Arc::new(common::SaturatedStore::new());
    let service = service(store.clone());

    let result = service.create("https://example.com").await;

    assert!(matches!(
        result,
        Err(AppError::CapacityExhausted { attempts: 10 })
    ));
    assert_eq!(
        store.checks.load(std::sync::atomic::Ordering::SeqCst),
        10
    );
}
