use super::*;

#[test]
fn all_catalog_keys_are_recognized() {
    for key in RECOGNIZED_KEYS {
        assert!(is_recognized_key(key), "{key} should be recognized");
    }
}

#[test]
fn unknown_keys_are_rejected() {
    assert!(!is_recognized_key("instagram_url"));
    assert!(!is_recognized_key(""));
    assert!(!is_recognized_key("EMAIL"));
}

#[test]
fn catalog_has_ten_keys() {
    assert_eq!(RECOGNIZED_KEYS.len(), 10);
}
