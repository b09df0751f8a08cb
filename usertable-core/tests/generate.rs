use std::collections::HashSet;

use chrono::{Duration, TimeZone, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use usertable_core::generate::{generate, generate_with};

#[test]
fn test_generates_requested_count() {
    assert_eq!(generate(0).len(), 0);
    assert_eq!(generate(500).len(), 500);
}

#[test]
fn test_ids_are_unique_uuids() {
    let records = generate(2_000);
    let ids: HashSet<_> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids.len(), records.len());
    for id in ids {
        let parsed = uuid::Uuid::parse_str(id).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
    }
}

#[test]
fn test_same_seed_same_records() {
    let now = Utc.with_ymd_and_hms(2025, 5, 5, 0, 0, 0).unwrap();
    let a = generate_with(&mut StdRng::seed_from_u64(42), 100, now);
    let b = generate_with(&mut StdRng::seed_from_u64(42), 100, now);
    let c = generate_with(&mut StdRng::seed_from_u64(43), 100, now);
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_fields_within_bounds() {
    let now = Utc.with_ymd_and_hms(2025, 5, 5, 0, 0, 0).unwrap();
    let records = generate_with(&mut StdRng::seed_from_u64(1), 1_000, now);

    for record in &records {
        assert!(!record.first_name.is_empty());
        assert!(!record.last_name.is_empty());
        assert!(record.email.contains('@'));
        assert!(record.email.is_ascii());
        assert!(record.registered_date <= now);
        assert!(record.registered_date > now - Duration::days(5 * 365 + 1));
        if let Some(age) = record.age {
            assert!((18..80).contains(&age));
        }
    }

    // Optional fields are sometimes missing, sometimes present.
    assert!(records.iter().any(|r| r.company.is_none()));
    assert!(records.iter().any(|r| r.company.is_some()));
    assert!(records.iter().any(|r| r.phone.is_none()));
}
