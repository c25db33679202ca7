//! Document Search Tests
//!
//! End-to-end tests through QueryEngine over a MemoryIndex:
//! - Nested paths, escaped keys, array positions and multi-valued fields
//! - Typed keys: null < bool < number < string
//! - Re-indexing and removal are visible to later queries
//! - Rejections and explain output

use keyscan::index::{IndexKey, MemoryIndex};
use keyscan::planner::{EmptyQueryPolicy, Predicate, Query};
use keyscan::query::{EngineConfig, QueryEngine};
use serde_json::json;

// =============================================================================
// Helper Functions
// =============================================================================

fn pets_index() -> MemoryIndex {
    let mut index = MemoryIndex::new();
    let docs = [
        ("doc1", json!({"name": "mike", "age": 40, "pet": ["cat", "dog"], "address": {"city": "lyon"}})),
        ("doc2", json!({"name": "john", "age": 24, "pet": ["cat"], "address": {"city": "paris"}})),
        ("doc3", json!({"name": "john", "age": 110, "pet": ["wombat"], "vip": true})),
        ("doc4", json!({"name": "ann", "age": 33.5, "vip": false, "nick": null})),
    ];
    for (id, body) in docs {
        index.insert_document(id, &body).unwrap();
    }
    index
}

fn search(engine: &QueryEngine<MemoryIndex>, preds: Vec<Predicate>) -> Vec<String> {
    engine
        .search(&Query::from_predicates(preds))
        .unwrap()
        .ids
}

// =============================================================================
// Field Shapes
// =============================================================================

#[test]
fn test_nested_path_equality() {
    let engine = QueryEngine::with_defaults(pets_index());
    let ids = search(&engine, vec![Predicate::eq("address.city", json!("paris"))]);
    assert_eq!(ids, vec!["doc2"]);
}

#[test]
fn test_array_field_matches_any_element() {
    let engine = QueryEngine::with_defaults(pets_index());

    let ids = search(&engine, vec![Predicate::eq("pet", json!("cat"))]);
    assert_eq!(ids, vec!["doc1", "doc2"]);

    // Each bound may be met by a different element
    let ids = search(
        &engine,
        vec![Predicate::eq("pet", json!("cat")), Predicate::eq("age", json!(40))],
    );
    assert_eq!(ids, vec!["doc1"]);
}

#[test]
fn test_literal_dotted_key_is_not_a_nested_path() {
    let mut index = MemoryIndex::new();
    index.insert_document("nested", &json!({"a": {"b": 1}})).unwrap();
    index.insert_document("literal", &json!({"a.b": 1})).unwrap();
    let engine = QueryEngine::with_defaults(index);

    assert_eq!(search(&engine, vec![Predicate::eq("a.b", json!(1))]), vec!["nested"]);
    assert_eq!(search(&engine, vec![Predicate::eq(r"a\.b", json!(1))]), vec!["literal"]);
}

#[test]
fn test_array_element_by_position() {
    let mut index = MemoryIndex::new();
    index
        .insert_document("arrayed", &json!({"arr": [1, 2, "foo", 4]}))
        .unwrap();
    index
        .insert_document("keyed", &json!({"arr": {"2": "foo"}}))
        .unwrap();
    let engine = QueryEngine::with_defaults(index);

    assert_eq!(search(&engine, vec![Predicate::eq("arr.2", json!("foo"))]), vec!["arrayed"]);
    assert_eq!(search(&engine, vec![Predicate::gte("arr.2", json!("a"))]), vec!["arrayed"]);
    assert!(search(&engine, vec![Predicate::eq("arr.1", json!("foo"))]).is_empty());
    assert_eq!(search(&engine, vec![Predicate::eq(r"arr.\2", json!("foo"))]), vec!["keyed"]);
}

#[test]
fn test_nested_array_positions() {
    let mut index = MemoryIndex::new();
    index
        .insert_document(
            "arrayed",
            &json!({"arrs": [
                {"animals": ["cat", "dog", "possum"]},
                {"animals": "shark", "nums": [1, 2, 3, 4, 5]},
            ]}),
        )
        .unwrap();
    index
        .insert_document(
            "arrayed2",
            &json!({"arrs": [
                {"animals": "shark"},
                {"animals": "shark", "nums": [1, 2, 3, 4, 5]},
            ]}),
        )
        .unwrap();
    let engine = QueryEngine::with_defaults(index);

    let eq = |field: &str, v| search(&engine, vec![Predicate::eq(field, v)]);

    assert_eq!(eq("arrs.0.animals.0", json!("cat")), vec!["arrayed"]);
    assert_eq!(eq("arrs.0.animals.2", json!("possum")), vec!["arrayed"]);
    assert!(eq("arrs.1.animals.2", json!("possum")).is_empty());
    assert_eq!(eq("arrs.0.animals", json!("shark")), vec!["arrayed2"]);
    assert_eq!(eq("arrs.1.nums.2", json!(3)), vec!["arrayed", "arrayed2"]);
    assert!(eq("arrs.0.nums.2", json!(3)).is_empty());

    // Any element of a scalar array also matches under the array's path
    assert_eq!(eq("arrs.0.animals", json!("dog")), vec!["arrayed"]);
}

#[test]
fn test_numeric_ranges_mix_ints_and_floats() {
    let engine = QueryEngine::with_defaults(pets_index());

    let ids = search(
        &engine,
        vec![Predicate::gte("age", json!(30)), Predicate::lt("age", json!(100))],
    );
    assert_eq!(ids, vec!["doc1", "doc4"]);

    let ids = search(&engine, vec![Predicate::gt("age", json!(33.5))]);
    assert_eq!(ids, vec!["doc1", "doc3"]);
}

#[test]
fn test_string_ranges() {
    let engine = QueryEngine::with_defaults(pets_index());
    let ids = search(
        &engine,
        vec![Predicate::gte("name", json!("j")), Predicate::lt("name", json!("k"))],
    );
    assert_eq!(ids, vec!["doc2", "doc3"]);
}

#[test]
fn test_bool_and_null_keys() {
    let engine = QueryEngine::with_defaults(pets_index());

    assert_eq!(search(&engine, vec![Predicate::eq("vip", json!(true))]), vec!["doc3"]);
    assert_eq!(search(&engine, vec![Predicate::eq("vip", json!(false))]), vec!["doc4"]);
    assert_eq!(search(&engine, vec![Predicate::eq("nick", json!(null))]), vec!["doc4"]);
}

#[test]
fn test_key_kind_order() {
    assert!(IndexKey::Null < IndexKey::from_bool(false));
    assert!(IndexKey::from_bool(true) < IndexKey::from_int(-1000));
    assert!(IndexKey::from_int(1_000_000) < IndexKey::from_string(""));
}

// =============================================================================
// Index Updates
// =============================================================================

#[test]
fn test_reindex_and_remove_visible_to_queries() {
    let mut engine = QueryEngine::with_defaults(pets_index());

    engine
        .source_mut()
        .insert_document("doc2", &json!({"name": "john", "age": 25}))
        .unwrap();
    assert_eq!(search(&engine, vec![Predicate::eq("pet", json!("cat"))]), vec!["doc1"]);
    assert_eq!(search(&engine, vec![Predicate::eq("age", json!(25))]), vec!["doc2"]);

    assert!(engine.source_mut().remove_document("doc1"));
    assert!(search(&engine, vec![Predicate::eq("pet", json!("cat"))]).is_empty());
}

#[test]
fn test_narrowing_config_same_results() {
    let plain = QueryEngine::with_defaults(pets_index());
    let narrowed = QueryEngine::new(
        pets_index(),
        EngineConfig::from_json(r#"{"executor": {"narrow_by_candidate_bounds": true}}"#).unwrap(),
    );

    let preds = vec![
        Predicate::eq("name", json!("john")),
        Predicate::gt("age", json!(20)),
        Predicate::gte("pet", json!("a")),
    ];
    assert_eq!(search(&plain, preds.clone()), search(&narrowed, preds));
}

// =============================================================================
// Rejections
// =============================================================================

#[test]
fn test_unsupported_operators_rejected() {
    let engine = QueryEngine::with_defaults(pets_index());

    for pred in [
        Predicate::matches("name", "^jo"),
        Predicate::contains("pet", json!("cat")),
        Predicate::is_in("age", vec![json!(24), json!(40)]),
    ] {
        let err = engine.search(&Query::new().with_predicate(pred)).unwrap_err();
        assert!(err.is_rejection());
        assert_eq!(err.code(), "KEYSCAN_UNSUPPORTED_OPERATOR");
    }
    assert_eq!(engine.metrics().queries_rejected, 3);
    assert_eq!(engine.metrics().scans_executed, 0);
}

#[test]
fn test_one_bad_predicate_rejects_whole_query() {
    let engine = QueryEngine::with_defaults(pets_index());
    let query = Query::new()
        .with_predicate(Predicate::eq("name", json!("john")))
        .with_predicate(Predicate::gt("age", json!(10)))
        .with_predicate(Predicate::lt("age", json!("z")));

    let err = engine.search(&query).unwrap_err();
    assert_eq!(err.code(), "KEYSCAN_INCOMPATIBLE_RANGE_TYPES");
}

#[test]
fn test_empty_query_policy() {
    let strict = QueryEngine::with_defaults(pets_index());
    assert_eq!(
        strict.search(&Query::new()).unwrap_err().code(),
        "KEYSCAN_EMPTY_QUERY"
    );

    let mut config = EngineConfig::default();
    config.planner.empty_query = EmptyQueryPolicy::MatchAll;
    let lenient = QueryEngine::new(pets_index(), config);
    let output = lenient.search(&Query::new()).unwrap();
    assert_eq!(output.ids, vec!["doc1", "doc2", "doc3", "doc4"]);
    assert_eq!(output.stats.scans_executed, 1);
}

// =============================================================================
// Explain
// =============================================================================

#[test]
fn test_explain_text() {
    let engine = QueryEngine::with_defaults(pets_index());
    let query = Query::new()
        .with_predicate(Predicate::gte("age", json!(20)))
        .with_predicate(Predicate::lt("age", json!(45)))
        .with_predicate(Predicate::eq("name", json!("john")));

    let text = engine.explain(&query).to_string();
    assert!(text.starts_with("=== EXPLAIN PLAN ===\n"));
    assert!(text.contains("Status: ACCEPTED"));
    assert!(text.contains("Plan: SCAN"));

    let name_pos = text.find("Scan 1: name").unwrap();
    let age_pos = text.find("Scan 2: age in [20, 45)").unwrap();
    assert!(name_pos < age_pos);
}

#[test]
fn test_explain_rejection() {
    let engine = QueryEngine::with_defaults(pets_index());
    let explain = engine.explain(&Query::new());

    assert!(!explain.accepted);
    assert_eq!(explain.rejection_code.as_deref(), Some("KEYSCAN_EMPTY_QUERY"));
    assert!(explain.to_string().contains("Status: REJECTED"));
}

#[test]
fn test_explain_contradiction() {
    let engine = QueryEngine::with_defaults(pets_index());
    let query = Query::new()
        .with_predicate(Predicate::gt("age", json!(50)))
        .with_predicate(Predicate::lt("age", json!(10)));

    let explain = engine.explain(&query);
    assert_eq!(explain.kind.as_deref(), Some("EMPTY"));
    assert_eq!(explain.empty_field.as_deref(), Some("age"));
    assert!(explain.to_string().contains("Scan 1: age in EMPTY"));
}
