use freyja_core::models::item::ContentItem;
use freyja_core::models::metadata::ItemMetadata;
use freyja_core::models::status::{ContentSource, ContentStatus, ContentType};
use freyja_storage::error::StorageError;
use freyja_storage::memory::MemoryStore;
use freyja_storage::store::ItemStore;

fn item(text: &str) -> ContentItem {
    ContentItem::new(
        text,
        ContentType::Tweet,
        ContentSource::Manual,
        ItemMetadata::default(),
        jiff::Timestamp::now(),
    )
    .unwrap()
}

#[tokio::test]
async fn insert_then_load() {
    let store = MemoryStore::new();
    let item = item("Hello world");
    let etag = store.insert(&item).await.unwrap();

    let loaded = store.load(item.id).await.unwrap().unwrap();
    assert_eq!(loaded.item, item);
    assert_eq!(loaded.etag, etag);
    assert!(store.load(uuid::Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_insert_fails() {
    let store = MemoryStore::new();
    let item = item("Hello world");
    store.insert(&item).await.unwrap();
    let err = store.insert(&item).await.unwrap_err();
    assert!(matches!(err, StorageError::AlreadyExists { .. }));
}

#[tokio::test]
async fn stale_save_is_refused() {
    let store = MemoryStore::new();
    let original = item("Hello world");
    let etag = store.insert(&original).await.unwrap();

    let mut first = original.clone();
    first.approve(Some("first"), jiff::Timestamp::now()).unwrap();
    let new_etag = store.save(&first, &etag).await.unwrap();
    assert_ne!(new_etag, etag);

    let mut second = original.clone();
    second.reject("second", jiff::Timestamp::now()).unwrap();
    let err = store.save(&second, &etag).await.unwrap_err();
    assert!(matches!(err, StorageError::PreconditionFailed { .. }));

    let stored = store.load(original.id).await.unwrap().unwrap();
    assert_eq!(stored.item.status(), ContentStatus::Approved);
    assert_eq!(stored.etag, new_etag);
}

#[tokio::test]
async fn save_of_unknown_item_fails() {
    let store = MemoryStore::new();
    let err = store.save(&item("ghost"), "1").await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound { .. }));
}

#[tokio::test]
async fn list_returns_every_item() {
    let store = MemoryStore::new();
    for text in ["one", "two", "three"] {
        store.insert(&item(text)).await.unwrap();
    }
    let mut contents: Vec<String> = store
        .list()
        .await
        .unwrap()
        .iter()
        .map(|i| i.content().to_string())
        .collect();
    contents.sort();
    assert_eq!(contents, ["one", "three", "two"]);
}

#[tokio::test]
async fn list_by_status_keeps_only_requested_statuses() {
    let store = MemoryStore::new();
    let waiting = item("waiting");
    store.insert(&waiting).await.unwrap();

    let ready = item("ready");
    let etag = store.insert(&ready).await.unwrap();
    let mut approved = ready.clone();
    approved.approve(None, jiff::Timestamp::now()).unwrap();
    store.save(&approved, &etag).await.unwrap();

    let found = store
        .list_by_status(&[ContentStatus::Approved, ContentStatus::Scheduled])
        .await
        .unwrap();
    assert_eq!(found, vec![approved]);
    assert!(store.list_by_status(&[]).await.unwrap().is_empty());
}
