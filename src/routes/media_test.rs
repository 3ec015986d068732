use super::*;
use crate::services::storage::StorageError;

#[test]
fn not_found_maps_to_404() {
    let err = media::MediaError::NotFound(Uuid::nil());
    assert_eq!(media_error_to_status(&err), StatusCode::NOT_FOUND);
}

#[test]
fn storage_error_maps_to_500() {
    let err = media::MediaError::Storage(StorageError::UnsafePath("../x".into()));
    assert_eq!(media_error_to_status(&err), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn database_error_maps_to_500() {
    let err = media::MediaError::Database(sqlx::Error::PoolClosed);
    assert_eq!(media_error_to_status(&err), StatusCode::INTERNAL_SERVER_ERROR);
}
