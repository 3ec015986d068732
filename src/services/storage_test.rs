use super::*;

// =============================================================================
// file_extension
// =============================================================================

#[test]
fn file_extension_lowercases() {
    assert_eq!(file_extension("Photo.JPG"), Some("jpg".to_owned()));
}

#[test]
fn file_extension_takes_last_segment() {
    assert_eq!(file_extension("archive.tar.gz"), Some("gz".to_owned()));
}

#[test]
fn file_extension_none_for_dotless() {
    assert_eq!(file_extension("README"), None);
}

#[test]
fn file_extension_none_for_trailing_dot() {
    assert_eq!(file_extension("weird."), None);
}

#[test]
fn file_extension_none_for_leading_dot_only() {
    assert_eq!(file_extension(".gitignore"), None);
}

// =============================================================================
// generate_path
// =============================================================================

#[test]
fn generate_path_has_upload_prefix_and_ext() {
    let path = MediaStore::generate_path("logo.png");
    assert!(path.starts_with("uploads/"), "got {path}");
    assert!(path.ends_with(".png"), "got {path}");
}

#[test]
fn generate_path_falls_back_to_bin() {
    let path = MediaStore::generate_path("noext");
    assert!(path.ends_with(".bin"), "got {path}");
}

#[test]
fn generate_path_two_calls_differ() {
    let a = MediaStore::generate_path("a.png");
    let b = MediaStore::generate_path("a.png");
    assert_ne!(a, b);
}

#[test]
fn generate_path_is_safe() {
    let path = MediaStore::generate_path("../../etc/passwd.png");
    assert!(path_is_safe(&path), "got {path}");
}

// =============================================================================
// public_url
// =============================================================================

#[test]
fn public_url_prefixes_media() {
    assert_eq!(MediaStore::public_url("uploads/x.png"), "/media/uploads/x.png");
}

// =============================================================================
// path_is_safe
// =============================================================================

#[test]
fn path_is_safe_accepts_nested_relative() {
    assert!(path_is_safe("uploads/123-abcd.png"));
}

#[test]
fn path_is_safe_rejects_traversal() {
    assert!(!path_is_safe("../secret"));
    assert!(!path_is_safe("uploads/../../secret"));
}

#[test]
fn path_is_safe_rejects_absolute_and_empty() {
    assert!(!path_is_safe("/etc/passwd"));
    assert!(!path_is_safe(""));
}

// =============================================================================
// store / remove round trip
// =============================================================================

#[tokio::test]
async fn store_then_remove_round_trip() {
    let root = std::env::temp_dir().join(format!("media-store-test-{}", uuid::Uuid::new_v4()));
    let store = MediaStore::new(root.clone());

    let path = MediaStore::generate_path("note.txt");
    store.store(&path, b"hello").await.unwrap();
    assert_eq!(tokio::fs::read(root.join(&path)).await.unwrap(), b"hello");

    store.remove(&path).await.unwrap();
    assert!(!root.join(&path).exists());

    tokio::fs::remove_dir_all(&root).await.ok();
}

#[tokio::test]
async fn remove_missing_file_is_error() {
    let root = std::env::temp_dir().join(format!("media-store-test-{}", uuid::Uuid::new_v4()));
    let store = MediaStore::new(root);
    let err = store.remove("uploads/never-written.png").await;
    assert!(err.is_err());
}

#[tokio::test]
async fn store_rejects_traversal_path() {
    let root = std::env::temp_dir().join(format!("media-store-test-{}", uuid::Uuid::new_v4()));
    let store = MediaStore::new(root);
    let err = store.store("../outside.bin", b"x").await;
    assert!(matches!(err, Err(StorageError::UnsafePath(_))));
}
