use course_catalog::{BlobStore, FileBlobStore, MemoryBlobStore, PersistenceError};
use tempfile::tempdir;

fn exercise_store(store: &dyn BlobStore) {
    assert_eq!(store.read_blob("missing").unwrap(), None);

    store.write_blob("favoriteCourses", r#"["A"]"#).unwrap();
    assert_eq!(
        store.read_blob("favoriteCourses").unwrap().as_deref(),
        Some(r#"["A"]"#)
    );

    store.write_blob("favoriteCourses", r#"["A","B"]"#).unwrap();
    assert_eq!(
        store.read_blob("favoriteCourses").unwrap().as_deref(),
        Some(r#"["A","B"]"#)
    );

    store.remove_blob("favoriteCourses").unwrap();
    assert_eq!(store.read_blob("favoriteCourses").unwrap(), None);
    // Removing twice is fine.
    store.remove_blob("favoriteCourses").unwrap();

    for bad in ["", "../up", "a/b", ".hidden", "spaced key"] {
        assert!(
            matches!(store.read_blob(bad), Err(PersistenceError::InvalidKey(_))),
            "key {bad:?} should be rejected"
        );
    }
}

#[test]
fn memory_store_round_trips_blobs() {
    exercise_store(&MemoryBlobStore::new());
}

#[test]
fn file_store_round_trips_blobs() {
    let dir = tempdir().unwrap();
    let store = FileBlobStore::new(dir.path().join("nested/data")).unwrap();
    exercise_store(&store);
    assert!(store.dir().is_dir());
}

#[test]
fn file_store_writes_one_file_per_key() {
    let dir = tempdir().unwrap();
    let store = FileBlobStore::new(dir.path()).unwrap();
    store.write_blob("favoriteCourses", "[]").unwrap();

    let path = store.path_for("favoriteCourses").unwrap();
    assert_eq!(path, dir.path().join("favoriteCourses.json"));
    assert_eq!(std::fs::read_to_string(path).unwrap(), "[]");
    assert!(!dir.path().join("favoriteCourses.json.tmp").exists());
}

#[cfg(feature = "sqlite")]
mod sqlite {
    use super::exercise_store;
    use course_catalog::{BlobStore, FavoritesStore, SqliteBlobStore};
    use tempfile::NamedTempFile;

    #[test]
    fn sqlite_store_round_trips_blobs() {
        exercise_store(&SqliteBlobStore::in_memory().unwrap());
    }

    #[test]
    fn sqlite_store_persists_favorites_across_connections() {
        let file = NamedTempFile::new().unwrap();
        {
            let store = FavoritesStore::open(SqliteBlobStore::new(file.path()).unwrap()).unwrap();
            store.toggle("C5").unwrap();
            store.toggle("C2").unwrap();
        }
        let backend = SqliteBlobStore::new(file.path()).unwrap();
        assert_eq!(
            backend.read_blob("favoriteCourses").unwrap().as_deref(),
            Some(r#"["C5","C2"]"#)
        );
        let store = FavoritesStore::open(backend).unwrap();
        assert!(store.is_favorite("C5"));
        assert!(store.is_favorite("C2"));
    }
}
