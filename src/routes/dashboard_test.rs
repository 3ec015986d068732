use super::*;

#[test]
fn stats_serialize_with_expected_fields() {
    let stats = DashboardStats {
        total_leads: 42,
        new_leads: 7,
        total_services: 11,
        active_services: 9,
        recent_leads: vec![],
    };
    let json = serde_json::to_value(&stats).unwrap();
    assert_eq!(json["total_leads"], 42);
    assert_eq!(json["new_leads"], 7);
    assert_eq!(json["total_services"], 11);
    assert_eq!(json["active_services"], 9);
    assert!(json["recent_leads"].as_array().unwrap().is_empty());
}

#[test]
fn recent_feed_is_capped_at_five() {
    assert_eq!(RECENT_LEADS_LIMIT, 5);
}
