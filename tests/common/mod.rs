#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use catalog::{CatalogError, CatalogStore, Item};
use http_body_util::BodyExt;
use tower::ServiceExt;

/// sends a bodiless request through `router`, returning the status and the body as text
pub async fn send(router: &Router, method: &str, uri: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("valid request");
    let response = router.clone().oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("readable body")
        .to_bytes();
    (status, String::from_utf8(bytes.to_vec()).expect("utf-8 body"))
}

/// `send` with GET
pub async fn get(router: &Router, uri: &str) -> (StatusCode, String) {
    send(router, "GET", uri).await
}

/// the behaviour every storage engine must share. `store` must start out empty.
pub async fn check_store_contract<S: CatalogStore>(store: S) {
    assert!(store.list().await.unwrap().is_empty());
    assert_eq!(store.find("Widget").await.unwrap(), None);

    store.insert(&Item::new("Widget", 9.99)).await.unwrap();
    store.insert(&Item::new("Gadget", 0.0)).await.unwrap();
    store.insert(&Item::new("Gizmo with spaces", 120.5)).await.unwrap();
    assert_eq!(
        store.find("Widget").await.unwrap(),
        Some(Item::new("Widget", 9.99))
    );

    let err = store.insert(&Item::new("Widget", 1.0)).await.unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateKey(_)), "got {:?}", err);

    let mut names: Vec<String> = store
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|item| item.name)
        .collect();
    names.sort();
    assert_eq!(names, vec!["Gadget", "Gizmo with spaces", "Widget"]);

    assert_eq!(store.replace(&Item::new("Widget", 4.25)).await.unwrap(), 1);
    assert_eq!(store.find("Widget").await.unwrap().unwrap().price, 4.25);
    assert_eq!(store.replace(&Item::new("Nothing", 1.0)).await.unwrap(), 0);
    assert_eq!(store.find("Nothing").await.unwrap(), None);

    assert_eq!(store.delete("Gadget").await.unwrap(), 1);
    assert_eq!(store.delete("Gadget").await.unwrap(), 0);
    assert_eq!(store.find("Gadget").await.unwrap(), None);
    assert_eq!(store.list().await.unwrap().len(), 2);
}
