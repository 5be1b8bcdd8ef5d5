use chrono::NaiveDate;
use lostfound_core::validation::parse_draft;
use lostfound_core::{validate_draft, DraftField, ItemDraft, ItemStatus};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

fn valid_draft() -> ItemDraft {
    ItemDraft {
        name: "Keys".to_string(),
        description: "desc".to_string(),
        date: "2024-01-01".to_string(),
        location: "Lib".to_string(),
        contact_info: "a@b.com".to_string(),
        status: "lost".to_string(),
    }
}

#[test]
fn valid_draft_has_no_errors() {
    let errors = validate_draft(&valid_draft(), today());
    assert!(errors.is_empty(), "unexpected errors: {errors}");
}

#[test]
fn empty_draft_reports_every_field_at_once() {
    let errors = validate_draft(&ItemDraft::default(), today());

    for field in DraftField::ALL {
        assert!(errors.contains(field), "missing error for {field}");
    }
    assert_eq!(errors.len(), DraftField::ALL.len());
    assert_eq!(errors.get(DraftField::Name), Some("Item name is required"));
    assert_eq!(errors.get(DraftField::Status), Some("Status is required"));
    assert_eq!(
        errors.get(DraftField::ContactInfo),
        Some("Contact info is required")
    );
}

#[test]
fn each_missing_required_field_is_reported_individually() {
    let blank: [(DraftField, fn(&mut ItemDraft)); 6] = [
        (DraftField::Name, |d| d.name = "   ".to_string()),
        (DraftField::Description, |d| d.description = "\t".to_string()),
        (DraftField::Date, |d| d.date.clear()),
        (DraftField::Location, |d| d.location.clear()),
        (DraftField::ContactInfo, |d| d.contact_info.clear()),
        (DraftField::Status, |d| d.status.clear()),
    ];

    for (field, clear) in blank {
        let mut draft = valid_draft();
        clear(&mut draft);
        let errors = validate_draft(&draft, today());
        assert!(errors.contains(field), "expected error for {field}");
        assert_eq!(errors.len(), 1, "only {field} should fail: {errors}");
    }
}

#[test]
fn contact_matching_neither_pattern_is_rejected() {
    for contact in ["not-an-email", "a@b", "call me", "12345", "(555) 1234"] {
        let mut draft = valid_draft();
        draft.contact_info = contact.to_string();
        let errors = validate_draft(&draft, today());
        assert_eq!(
            errors.get(DraftField::ContactInfo),
            Some("Please enter a valid email or phone number"),
            "contact `{contact}` should be rejected"
        );
    }
}

#[test]
fn phone_numbers_with_formatting_are_accepted() {
    for contact in ["5551234567", "+1 (555) 123-4567", "555-123-4567", "+44 20 7946 0958"] {
        let mut draft = valid_draft();
        draft.contact_info = contact.to_string();
        assert!(
            validate_draft(&draft, today()).is_empty(),
            "contact `{contact}` should be accepted"
        );
    }
}

#[test]
fn status_must_be_lost_or_found() {
    let mut draft = valid_draft();
    draft.status = "misplaced".to_string();
    let errors = validate_draft(&draft, today());
    assert_eq!(
        errors.get(DraftField::Status),
        Some("Status must be lost or found")
    );
}

#[test]
fn malformed_and_future_dates_are_rejected() {
    let mut draft = valid_draft();
    draft.date = "01/02/2024".to_string();
    assert!(validate_draft(&draft, today())
        .get(DraftField::Date)
        .unwrap()
        .contains("YYYY-MM-DD"));

    draft.date = "2024-06-02".to_string();
    assert_eq!(
        validate_draft(&draft, today()).get(DraftField::Date),
        Some("Date cannot be in the future")
    );

    draft.date = "2024-06-01".to_string();
    assert!(validate_draft(&draft, today()).is_empty());
}

#[test]
fn parse_draft_keeps_text_verbatim_and_types_fields() {
    let mut draft = valid_draft();
    draft.name = "  Keys  ".to_string();
    draft.status = "found".to_string();

    let valid = parse_draft(&draft, today()).unwrap();
    assert_eq!(valid.name, "  Keys  ");
    assert_eq!(valid.status, ItemStatus::Found);
    assert_eq!(valid.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
}

#[test]
fn validation_is_deterministic() {
    let mut draft = valid_draft();
    draft.contact_info = "bad".to_string();
    draft.location.clear();

    let first = validate_draft(&draft, today());
    let second = validate_draft(&draft, today());
    assert_eq!(first, second);
}
