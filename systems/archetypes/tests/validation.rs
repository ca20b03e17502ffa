use std::collections::BTreeSet;

use letter_siege_archetypes::{ArchetypeError, ArchetypeRegistry, EMBEDDED_LETTERS, LETTERS_SCHEMA};
use letter_siege_core::{LetterId, ALL_LETTERS};
use serde_json::{json, Value};

fn embedded_records() -> Vec<Value> {
    match serde_json::from_str(EMBEDDED_LETTERS).expect("embedded data parses") {
        Value::Array(records) => records,
        other => panic!("expected array, got {other:?}"),
    }
}

fn build(records: Vec<Value>) -> Result<ArchetypeRegistry, ArchetypeError> {
    let source = serde_json::to_string(&Value::Array(records)).expect("serialize");
    ArchetypeRegistry::from_json(&source)
}

#[test]
fn duplicate_letter_is_fatal() {
    let mut records = embedded_records();
    records[1]["letter"] = json!("A");

    match build(records) {
        Err(ArchetypeError::Duplicate { letter }) => assert_eq!(letter, LetterId::A),
        other => panic!("expected duplicate error, got {other:?}"),
    }
}

#[test]
fn missing_letters_are_reported() {
    let mut records = embedded_records();
    let _ = records.pop();
    let _ = records.remove(3);

    match build(records) {
        Err(ArchetypeError::Incomplete { missing }) => {
            assert_eq!(missing, vec![LetterId::D, LetterId::Z]);
        }
        other => panic!("expected incomplete error, got {other:?}"),
    }
}

#[test]
fn every_violation_in_the_batch_is_listed() {
    let mut records = embedded_records();
    records[0]["tier"] = json!(9);
    records[2]["tier"] = json!(2.5);
    records[4]["baseHP"] = json!(0);
    records[5]["spriteSet"] = json!([]);
    records[6]["movementId"] = json!("");
    records[7]["speed"] = json!(3);
    let _ = records[8]
        .as_object_mut()
        .expect("record object")
        .remove("attackId");

    let error = build(records).expect_err("schema violations");
    let ArchetypeError::Schema { violations } = &error else {
        panic!("expected schema error, got {error:?}");
    };
    let fields: BTreeSet<(Option<usize>, &str)> = violations
        .iter()
        .map(|violation| (violation.index, violation.field.as_str()))
        .collect();
    assert_eq!(
        fields,
        BTreeSet::from([
            (Some(0), "tier"),
            (Some(2), "tier"),
            (Some(4), "baseHP"),
            (Some(5), "spriteSet"),
            (Some(6), "movementId"),
            (Some(7), "speed"),
            (Some(8), "attackId"),
        ])
    );

    let message = error.to_string();
    assert!(message.starts_with("archetype schema validation failed"));
    assert!(message.contains("/8/attackId is required"));
}

#[test]
fn lower_case_letters_are_rejected() {
    let mut records = embedded_records();
    records[0]["letter"] = json!("a");

    assert!(matches!(build(records), Err(ArchetypeError::Schema { .. })));
}

#[test]
fn malformed_json_is_a_parse_error() {
    assert!(matches!(
        ArchetypeRegistry::from_json("[{"),
        Err(ArchetypeError::Parse(_))
    ));
    assert!(matches!(
        ArchetypeRegistry::from_json("{}"),
        Err(ArchetypeError::Schema { .. })
    ));
}

#[test]
fn tags_are_optional() {
    let mut records = embedded_records();
    let _ = records[5]
        .as_object_mut()
        .expect("record object")
        .remove("tags");

    let registry = build(records).expect("valid without tags");
    assert!(registry.get(LetterId::F).expect("F defined").tags.is_empty());
}

#[test]
fn whitespace_only_text_is_rejected() {
    let mut records = embedded_records();
    records[3]["name"] = json!("   ");

    match build(records) {
        Err(ArchetypeError::Schema { violations }) => {
            assert_eq!(violations.len(), 1);
            assert_eq!(violations[0].index, Some(3));
            assert_eq!(violations[0].field, "name");
        }
        other => panic!("expected schema error, got {other:?}"),
    }
}

#[test]
fn bundled_schema_is_draft_07() {
    let schema: Value = serde_json::from_str(LETTERS_SCHEMA).expect("schema parses");
    assert_eq!(schema["$schema"], json!("http://json-schema.org/draft-07/schema#"));
    assert_eq!(schema["items"]["additionalProperties"], json!(false));
}

#[test]
fn every_letter_resolves() {
    let registry = ArchetypeRegistry::from_json(EMBEDDED_LETTERS).expect("valid data");
    for letter in ALL_LETTERS {
        let archetype = registry.get(letter).expect("letter defined");
        assert_eq!(archetype.letter, letter);
    }
}
