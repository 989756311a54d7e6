//! Repository Integration Tests
//!
//! Tests for the content services with in-memory SQLite and temp directories.

#[cfg(test)]
mod tests {
    use crate::domain::{AppData, NewPost, TabNode};
    use crate::repository::{
        init_db, ContentService, DocumentRepository, FileBlobStore, MemoryContentService,
        SqliteContentService, DATA_DOC_KEY,
    };
    use std::path::{Path, PathBuf};

    fn setup_service(blob_root: &Path) -> SqliteContentService {
        // Use in-memory database for tests
        let conn = init_db(Path::new(":memory:")).expect("Failed to init test DB");
        let blobs = FileBlobStore::open(blob_root).expect("Failed to open blob store");
        SqliteContentService::new(conn, blobs)
    }

    #[tokio::test]
    async fn test_load_before_first_save_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let service = setup_service(dir.path());

        let loaded = service.load_state().await.expect("Load failed");
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let service = setup_service(dir.path());

        let data = AppData::seed();
        service.save_state(&data).await.expect("Save failed");

        let loaded = service.load_state().await.unwrap().unwrap();
        assert_eq!(loaded, data);
    }

    #[tokio::test]
    async fn test_save_overwrites_whole_document() {
        let dir = tempfile::tempdir().unwrap();
        let service = setup_service(dir.path());

        let first = AppData::seed();
        service.save_state(&first).await.unwrap();

        let mut second = first.clone();
        second.tabs = second.tabs.insert(None, TabNode::new("edu", "Shiksha"));
        second.posts = second.posts.add(
            "edu",
            NewPost {
                content: "new".to_string(),
                ..Default::default()
            },
        );
        service.save_state(&second).await.unwrap();

        let loaded = service.load_state().await.unwrap().unwrap();
        assert_eq!(loaded, second);
        assert_eq!(loaded.posts.len(), 3);
    }

    #[tokio::test]
    async fn test_revision_increments() {
        let conn = init_db(Path::new(":memory:")).unwrap();
        let docs = DocumentRepository::new(conn);

        assert_eq!(docs.save(DATA_DOC_KEY, "{}").await.unwrap(), 1);
        assert_eq!(docs.save(DATA_DOC_KEY, "{\"a\":1}").await.unwrap(), 2);
        let stored = docs.load(DATA_DOC_KEY).await.unwrap().unwrap();
        assert_eq!(stored.body, "{\"a\":1}");
        assert_eq!(stored.revision, 2);
    }

    #[tokio::test]
    async fn test_corrupt_document_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let conn = init_db(Path::new(":memory:")).unwrap();
        DocumentRepository::new(conn.clone())
            .save(DATA_DOC_KEY, "not json")
            .await
            .unwrap();
        let service = SqliteContentService::new(conn, FileBlobStore::open(dir.path()).unwrap());

        assert!(service.load_state().await.is_err());
    }

    #[tokio::test]
    async fn test_upload_then_delete_blob() {
        let dir = tempfile::tempdir().unwrap();
        let service = setup_service(dir.path());

        let url = service.upload_blob(b"jpeg", "images/profile.jpg").await.unwrap();
        assert!(url.starts_with("file://"));
        assert!(url.ends_with(&format!("?v={}", &blake3::hash(b"jpeg").to_hex()[..12])));
        let on_disk = dir.path().join("images").join("profile.jpg");
        assert_eq!(std::fs::read(&on_disk).unwrap(), b"jpeg");

        service.delete_blob("images/profile.jpg").await.unwrap();
        assert!(!on_disk.exists());
    }

    #[tokio::test]
    async fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let db_path: PathBuf = dir.path().join("channel.db");
        let data = AppData::seed();

        {
            let service = SqliteContentService::new(
                init_db(&db_path).unwrap(),
                FileBlobStore::open(dir.path().join("blobs")).unwrap(),
            );
            service.save_state(&data).await.unwrap();
        }

        let reopened = SqliteContentService::new(
            init_db(&db_path).unwrap(),
            FileBlobStore::open(dir.path().join("blobs")).unwrap(),
        );
        assert_eq!(reopened.load_state().await.unwrap(), Some(data));
    }

    #[tokio::test]
    async fn test_memory_service_unavailable() {
        let service = MemoryContentService::new();
        service.set_unavailable(true);
        assert!(service.load_state().await.is_err());
        assert!(service.save_state(&AppData::seed()).await.is_err());
        assert_eq!(service.save_count(), 0);

        service.set_unavailable(false);
        service.save_state(&AppData::seed()).await.unwrap();
        assert_eq!(service.save_count(), 1);
        assert_eq!(service.upload_blob(b"x", "a.png").await.unwrap(), "memory://a.png");
        assert_eq!(service.blob("a.png").await, Some(b"x".to_vec()));
        service.delete_blob("a.png").await.unwrap();
        assert_eq!(service.blob_count().await, 0);
    }

    #[tokio::test]
    async fn test_memory_service_failing_saves() {
        let service = MemoryContentService::new();
        service.set_failing_saves(true);
        assert!(service.save_state(&AppData::seed()).await.is_err());
        assert!(service.load_state().await.unwrap().is_none());
        assert!(service.upload_blob(b"x", "a.png").await.is_ok());
        assert_eq!(service.save_count(), 0);
    }
}
