use storage::repository::{CompletionRepository, DEFAULT_PROGRESS_KEY, StorageError};
use storage::sqlite::SqliteRepository;
use tutor_core::model::{CompletionMap, TopicId};

async fn connect(name: &str) -> SqliteRepository {
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    let repo = SqliteRepository::connect(&url).await.expect("connect");
    repo.migrate().await.expect("migrate");
    repo
}

#[tokio::test]
async fn sqlite_missing_slot_is_none() {
    let repo = connect("memdb_missing_slot").await;
    let loaded = repo
        .load_completion(DEFAULT_PROGRESS_KEY)
        .await
        .expect("load");
    assert!(loaded.is_none());
}

#[tokio::test]
async fn sqlite_save_overwrites_whole_slot() {
    let repo = connect("memdb_overwrite").await;

    let mut map = CompletionMap::new();
    map.toggle(TopicId::new("c1t1"));
    map.toggle(TopicId::new("c2t2"));
    repo.save_completion(DEFAULT_PROGRESS_KEY, &map)
        .await
        .expect("first save");

    map.toggle(TopicId::new("c1t1"));
    repo.save_completion(DEFAULT_PROGRESS_KEY, &map)
        .await
        .expect("second save");

    let loaded = repo
        .load_completion(DEFAULT_PROGRESS_KEY)
        .await
        .expect("load")
        .expect("slot present");
    assert_eq!(loaded, map);
    assert!(!loaded.is_completed(&TopicId::new("c1t1")));
    assert!(loaded.is_completed(&TopicId::new("c2t2")));
    assert_eq!(loaded.len(), 2);
}

#[tokio::test]
async fn sqlite_corrupt_slot_reports_serialization_error() {
    let repo = connect("memdb_corrupt").await;
    sqlx::query("INSERT INTO progress_slots (key, value, updated_at) VALUES (?1, ?2, ?3)")
        .bind(DEFAULT_PROGRESS_KEY)
        .bind("{\"c1t1\": tru")
        .bind("2023-11-14T22:13:20Z")
        .execute(repo.pool())
        .await
        .expect("plant corrupt row");

    let err = repo
        .load_completion(DEFAULT_PROGRESS_KEY)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Serialization(_)));
}

#[tokio::test]
async fn sqlite_blank_slot_is_none() {
    let repo = connect("memdb_blank_slot").await;
    sqlx::query("INSERT INTO progress_slots (key, value, updated_at) VALUES (?1, ?2, ?3)")
        .bind(DEFAULT_PROGRESS_KEY)
        .bind("")
        .bind("2023-11-14T22:13:20Z")
        .execute(repo.pool())
        .await
        .expect("plant blank row");

    let loaded = repo
        .load_completion(DEFAULT_PROGRESS_KEY)
        .await
        .expect("load");
    assert!(loaded.is_none());
}

#[tokio::test]
async fn sqlite_clear_removes_slot() {
    let repo = connect("memdb_clear").await;
    let mut map = CompletionMap::new();
    map.toggle(TopicId::new("t1"));
    repo.save_completion("progress", &map).await.expect("save");

    repo.clear_completion("progress").await.expect("clear");
    assert!(repo.load_completion("progress").await.expect("load").is_none());
}

#[tokio::test]
async fn sqlite_migrate_is_idempotent() {
    let repo = connect("memdb_migrate_twice").await;
    repo.migrate().await.expect("second migrate");

    let mut map = CompletionMap::new();
    map.toggle(TopicId::new("t1"));
    repo.save_completion("progress", &map).await.expect("save");
    assert_eq!(
        repo.load_completion("progress").await.expect("load"),
        Some(map)
    );
}
