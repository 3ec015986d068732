use super::*;
use time::macros::datetime;

fn lead(name: &str, email: &str, company: Option<&str>, status: LeadStatus) -> LeadRow {
    LeadRow {
        id: Uuid::new_v4(),
        name: name.to_owned(),
        email: email.to_owned(),
        phone: None,
        company: company.map(str::to_owned),
        message: Some("hello".to_owned()),
        service_interest: None,
        status,
        created_at: datetime!(2024-03-07 12:30:00 UTC),
    }
}

// =============================================================================
// LeadStatus
// =============================================================================

#[test]
fn status_round_trips_all_values() {
    for s in [
        LeadStatus::New,
        LeadStatus::Contacted,
        LeadStatus::Qualified,
        LeadStatus::Converted,
        LeadStatus::Closed,
    ] {
        assert_eq!(LeadStatus::from_str(s.as_str()), Some(s));
    }
}

#[test]
fn status_rejects_unknown_value() {
    assert_eq!(LeadStatus::from_str("archived"), None);
    assert_eq!(LeadStatus::from_str(""), None);
    assert_eq!(LeadStatus::from_str("New"), None);
}

#[test]
fn status_serializes_lowercase() {
    let json = serde_json::to_string(&LeadStatus::Contacted).unwrap();
    assert_eq!(json, "\"contacted\"");
}

// =============================================================================
// filter_leads
// =============================================================================

#[test]
fn filter_empty_query_and_no_status_keeps_all() {
    let leads = vec![
        lead("Jane", "jane@a.co", None, LeadStatus::New),
        lead("Omar", "omar@b.co", None, LeadStatus::Closed),
    ];
    assert_eq!(filter_leads(leads, "", None).len(), 2);
}

#[test]
fn filter_matches_name_case_insensitive() {
    let leads = vec![
        lead("Jane Doe", "jane@a.co", None, LeadStatus::New),
        lead("Omar", "omar@b.co", None, LeadStatus::New),
    ];
    let out = filter_leads(leads, "JANE", None);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].name, "Jane Doe");
}

#[test]
fn filter_matches_email_substring() {
    let leads = vec![
        lead("A", "ceo@acme.example", None, LeadStatus::New),
        lead("B", "cfo@other.example", None, LeadStatus::New),
    ];
    let out = filter_leads(leads, "acme", None);
    assert_eq!(out.len(), 1);
}

#[test]
fn filter_matches_company_when_present() {
    let leads = vec![
        lead("A", "a@a.co", Some("Globex"), LeadStatus::New),
        lead("B", "b@b.co", None, LeadStatus::New),
    ];
    let out = filter_leads(leads, "globex", None);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].name, "A");
}

#[test]
fn filter_null_company_never_matches_via_company() {
    let leads = vec![lead("A", "a@a.co", None, LeadStatus::New)];
    assert!(filter_leads(leads, "globex", None).is_empty());
}

#[test]
fn filter_status_is_exact() {
    let leads = vec![
        lead("A", "a@a.co", None, LeadStatus::New),
        lead("B", "b@b.co", None, LeadStatus::Contacted),
    ];
    let out = filter_leads(leads, "", Some(LeadStatus::Contacted));
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].name, "B");
}

#[test]
fn filter_combines_query_and_status() {
    let leads = vec![
        lead("Jane", "jane@a.co", None, LeadStatus::New),
        lead("Jane", "jane@b.co", None, LeadStatus::Closed),
    ];
    let out = filter_leads(leads, "jane", Some(LeadStatus::Closed));
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].email, "jane@b.co");
}

// =============================================================================
// export_csv
// =============================================================================

#[test]
fn export_empty_list_is_header_only() {
    let csv = export_csv(&[]);
    assert_eq!(csv.lines().count(), 1);
    assert_eq!(
        csv,
        "\"Name\",\"Email\",\"Phone\",\"Company\",\"Service\",\"Status\",\"Message\",\"Date\""
    );
}

#[test]
fn export_has_n_plus_one_lines() {
    let leads = vec![
        lead("A", "a@a.co", None, LeadStatus::New),
        lead("B", "b@b.co", None, LeadStatus::New),
        lead("C", "c@c.co", None, LeadStatus::New),
    ];
    assert_eq!(export_csv(&leads).lines().count(), 4);
}

#[test]
fn export_quotes_every_field() {
    let leads = vec![lead("Jane", "jane@a.co", Some("Acme"), LeadStatus::New)];
    let csv = export_csv(&leads);
    let row = csv.lines().nth(1).unwrap();
    assert_eq!(
        row,
        "\"Jane\",\"jane@a.co\",\"\",\"Acme\",\"\",\"new\",\"hello\",\"2024-03-07\""
    );
}

#[test]
fn export_preserves_embedded_commas() {
    let mut l = lead("Doe, Jane", "jane@a.co", None, LeadStatus::New);
    l.message = Some("first, second, third".to_owned());
    let csv = export_csv(&[l]);
    let row = csv.lines().nth(1).unwrap();
    assert!(row.starts_with("\"Doe, Jane\""));
    assert!(row.contains("\"first, second, third\""));
    // Still one line per record.
    assert_eq!(csv.lines().count(), 2);
}

#[test]
fn export_doubles_embedded_quotes() {
    let l = lead("Jane \"JD\" Doe", "jane@a.co", None, LeadStatus::New);
    let csv = export_csv(&[l]);
    assert!(csv.contains("\"Jane \"\"JD\"\" Doe\""));
}

#[test]
fn export_missing_optionals_are_empty_fields() {
    let mut l = lead("Jane", "jane@a.co", None, LeadStatus::New);
    l.message = None;
    let csv = export_csv(&[l]);
    let row = csv.lines().nth(1).unwrap();
    assert!(row.contains(",\"\",\"\",\"\",\"new\",\"\","));
}

#[test]
fn export_filename_uses_iso_date() {
    let date = datetime!(2024-03-07 00:00:00 UTC).date();
    assert_eq!(export_filename(date), "leads-2024-03-07.csv");
}
