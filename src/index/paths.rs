//! Path extraction from JSON documents
//!
//! Every scalar leaf of a document becomes one `(path, key)` pair. Nested
//! object fields are joined with `.`, and array elements are addressed by
//! position, so `{"arr": [1, "foo"]}` yields `arr.0` and `arr.1`.
//!
//! Scalar array elements are also indexed under the array's own path, so a
//! field holding `["cat", "dog"]` matches both `EQ "cat"` and `EQ "dog"`.
//!
//! # Path syntax
//!
//! - `.` separates segments
//! - `\` takes the next character literally, so the object key `"a.b"` is
//!   written `a\.b` and never collides with the nested path `a` → `b`
//! - an unescaped all-digit segment is an array position; an object key
//!   made only of digits is written with a leading `\` (`\2`)

use serde_json::Value;

use super::key::IndexKey;

/// Separator between nested field names
pub const PATH_SEPARATOR: char = '.';

/// Escape character for object keys
pub const PATH_ESCAPE: char = '\\';

/// Escapes one object key for use as a path segment.
pub fn escape_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 1);
    if !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit()) {
        out.push(PATH_ESCAPE);
    }
    for c in key.chars() {
        if c == PATH_SEPARATOR || c == PATH_ESCAPE {
            out.push(PATH_ESCAPE);
        }
        out.push(c);
    }
    out
}

fn child_path(parent: &str, segment: &str) -> String {
    format!("{}{}{}", parent, PATH_SEPARATOR, segment)
}

/// Returns all `(path, key)` pairs of a document, sorted by path then key.
///
/// The top-level value itself has no path and is not indexed unless it is
/// an object.
pub fn path_values(doc: &Value) -> Vec<(String, IndexKey)> {
    let mut acc = Vec::new();
    let mut stack: Vec<(String, &Value)> = Vec::new();

    if let Value::Object(fields) = doc {
        for (k, v) in fields {
            stack.push((escape_key(k), v));
        }
    }

    while let Some((path, value)) = stack.pop() {
        match value {
            Value::Object(fields) => {
                for (k, v) in fields {
                    stack.push((child_path(&path, &escape_key(k)), v));
                }
            }
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    if let Some(key) = IndexKey::from_json(item) {
                        acc.push((path.clone(), key));
                    }
                    stack.push((child_path(&path, &i.to_string()), item));
                }
            }
            scalar => {
                if let Some(key) = IndexKey::from_json(scalar) {
                    acc.push((path, key));
                }
            }
        }
    }

    acc.sort();
    acc.dedup();
    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pairs(pv: &[(String, IndexKey)]) -> Vec<(&str, String)> {
        pv.iter().map(|(p, k)| (p.as_str(), k.to_string())).collect()
    }

    #[test]
    fn test_nested_paths() {
        let doc = json!({
            "name": "John Doe",
            "age": 43,
            "pets": {
                "frankie": {"species": "cat", "age": 3},
            }
        });
        let pv = path_values(&doc);

        assert_eq!(
            pv,
            vec![
                ("age".to_string(), IndexKey::from_int(43)),
                ("name".to_string(), IndexKey::from_string("John Doe")),
                ("pets.frankie.age".to_string(), IndexKey::from_int(3)),
                ("pets.frankie.species".to_string(), IndexKey::from_string("cat")),
            ]
        );
    }

    #[test]
    fn test_array_elements_by_position() {
        let doc = json!({"pet": ["cat", "cat", "dog"]});
        let pv = path_values(&doc);

        assert_eq!(
            pv,
            vec![
                ("pet".to_string(), IndexKey::from_string("cat")),
                ("pet".to_string(), IndexKey::from_string("dog")),
                ("pet.0".to_string(), IndexKey::from_string("cat")),
                ("pet.1".to_string(), IndexKey::from_string("cat")),
                ("pet.2".to_string(), IndexKey::from_string("dog")),
            ]
        );
    }

    #[test]
    fn test_nested_arrays_and_objects_in_arrays() {
        let doc = json!({"phones": [[1, 2], {"home": 3}]});
        let pv = path_values(&doc);

        // Only scalar elements are repeated under the array's own path
        assert_eq!(
            pv,
            vec![
                ("phones.0".to_string(), IndexKey::from_int(1)),
                ("phones.0".to_string(), IndexKey::from_int(2)),
                ("phones.0.0".to_string(), IndexKey::from_int(1)),
                ("phones.0.1".to_string(), IndexKey::from_int(2)),
                ("phones.1.home".to_string(), IndexKey::from_int(3)),
            ]
        );
    }

    #[test]
    fn test_escape_key() {
        assert_eq!(escape_key("name"), "name");
        assert_eq!(escape_key("a.b"), r"a\.b");
        assert_eq!(escape_key(r"a\b"), r"a\\b");
        assert_eq!(escape_key("2"), r"\2");
        assert_eq!(escape_key("2b"), "2b");
        assert_eq!(escape_key(""), "");
    }

    #[test]
    fn test_literal_dot_key_does_not_collide_with_nesting() {
        let nested = path_values(&json!({"a": {"b": 1}}));
        let literal = path_values(&json!({"a.b": 1}));

        assert_eq!(pairs(&nested), vec![("a.b", "1".to_string())]);
        assert_eq!(pairs(&literal), vec![(r"a\.b", "1".to_string())]);
    }

    #[test]
    fn test_digit_key_does_not_collide_with_position() {
        let object = path_values(&json!({"arr": {"2": "foo"}}));
        let array = path_values(&json!({"arr": [1, 2, "foo"]}));

        assert_eq!(object[0].0, r"arr.\2");
        assert!(array.iter().any(|(p, _)| p == "arr.2"));
        assert!(!array.iter().any(|(p, _)| p == r"arr.\2"));
    }

    #[test]
    fn test_null_and_bool_leaves() {
        let pv = path_values(&json!({"a": null, "b": false}));
        assert_eq!(
            pv,
            vec![
                ("a".to_string(), IndexKey::Null),
                ("b".to_string(), IndexKey::Bool(false)),
            ]
        );
    }

    #[test]
    fn test_non_object_document_has_no_paths() {
        assert!(path_values(&json!(42)).is_empty());
        assert!(path_values(&json!(["a"])).is_empty());
    }
}
