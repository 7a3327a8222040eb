//! Structural validation of the manifest document
//!
//! The document is walked as a generic YAML value so that every violation
//! can be collected, not just the first one a typed deserializer would hit.

use super::entry::{DataType, ManifestEntry};
use serde_yaml::{Mapping, Value};
use std::path::{Component, Path};

const REQUIRED: [&str; 2] = ["path", "data_type"];
const KNOWN: [&str; 5] = ["path", "data_type", "prefix", "description", "date"];

/// Validate a parsed manifest, returning its entries in document order or
/// every violation found.
pub fn validate(doc: &Value) -> Result<Vec<ManifestEntry>, Vec<String>> {
    let items = match doc {
        Value::Sequence(items) => items,
        _ => return Err(vec!["manifest must be a list of file entries".to_string()]),
    };

    let mut entries = Vec::with_capacity(items.len());
    let mut violations = Vec::new();

    for (index, item) in items.iter().enumerate() {
        match item {
            Value::Mapping(map) => {
                if let Some(entry) = validate_entry(index, map, &mut violations) {
                    entries.push(entry);
                }
            }
            _ => violations.push(format!("entry {}: must be a mapping", index)),
        }
    }

    if violations.is_empty() {
        Ok(entries)
    } else {
        Err(violations)
    }
}

fn validate_entry(index: usize, map: &Mapping, violations: &mut Vec<String>) -> Option<ManifestEntry> {
    let before = violations.len();

    for key in map.keys() {
        match key.as_str() {
            Some(k) if KNOWN.contains(&k) => {}
            Some(k) => violations.push(format!("entry {}: unexpected property '{}'", index, k)),
            None => violations.push(format!("entry {}: property names must be strings", index)),
        }
    }

    for field in REQUIRED {
        if !map.contains_key(field) {
            violations.push(format!("entry {}: '{}' is a required property", index, field));
        }
    }

    let path = match map.get("path") {
        Some(Value::String(s)) if !s.trim().is_empty() => {
            if stays_under_root(s) {
                Some(s.clone())
            } else {
                violations.push(format!(
                    "entry {}: 'path' must be relative to the data root: {}",
                    index, s
                ));
                None
            }
        }
        Some(_) => {
            violations.push(format!("entry {}: 'path' must be a non-empty string", index));
            None
        }
        None => None,
    };

    let data_type = match map.get("data_type") {
        Some(Value::String(s)) => match s.parse::<DataType>() {
            Ok(t) => Some(t),
            Err(bad) => {
                violations.push(format!(
                    "entry {}: '{}' is not one of ['node', 'edge', 'cluster']",
                    index, bad
                ));
                None
            }
        },
        Some(_) => {
            violations.push(format!("entry {}: 'data_type' must be a string", index));
            None
        }
        None => None,
    };

    let prefix = optional_string(index, map, "prefix", violations);
    let description = optional_string(index, map, "description", violations);
    let date = optional_string(index, map, "date", violations);

    if data_type == Some(DataType::Cluster) && !map.contains_key("prefix") {
        violations.push(format!("entry {}: 'prefix' is required for cluster files", index));
    }

    if violations.len() > before {
        return None;
    }

    Some(ManifestEntry {
        path: path?,
        data_type: data_type?,
        prefix,
        description,
        date,
    })
}

/// Relative, with no `..` component
fn stays_under_root(path: &str) -> bool {
    Path::new(path)
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

fn optional_string(
    index: usize,
    map: &Mapping,
    field: &str,
    violations: &mut Vec<String>,
) -> Option<String> {
    match map.get(field) {
        None => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            violations.push(format!("entry {}: '{}' must be a string", index, field));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> Value {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn accepts_well_formed_entries() {
        let doc = parse(
            r#"
- path: edges.tsv
  data_type: edge
  date: "2020-06-08"
- path: clusters/I2.tsv
  data_type: cluster
  prefix: markov_i2
"#,
        );
        let entries = validate(&doc).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].data_type, DataType::Edge);
        assert_eq!(entries[0].date.as_deref(), Some("2020-06-08"));
        assert_eq!(entries[1].prefix.as_deref(), Some("markov_i2"));
    }

    #[test]
    fn empty_list_is_valid() {
        assert_eq!(validate(&parse("[]")).unwrap(), vec![]);
    }

    #[test]
    fn rejects_non_list_document() {
        let errs = validate(&parse("path: edges.tsv")).unwrap_err();
        assert_eq!(errs, vec!["manifest must be a list of file entries".to_string()]);
        assert!(validate(&Value::Null).is_err());
    }

    #[test]
    fn reports_every_violation() {
        let doc = parse(
            r#"
- data_type: edge
- path: nodes.csv
  data_type: vertex
- path: c.tsv
  data_type: cluster
- path: n.csv
  data_type: node
  colour: blue
- just a string
"#,
        );
        let errs = validate(&doc).unwrap_err();
        assert_eq!(
            errs,
            vec![
                "entry 0: 'path' is a required property".to_string(),
                "entry 1: 'vertex' is not one of ['node', 'edge', 'cluster']".to_string(),
                "entry 2: 'prefix' is required for cluster files".to_string(),
                "entry 3: unexpected property 'colour'".to_string(),
                "entry 4: must be a mapping".to_string(),
            ]
        );
    }

    #[test]
    fn paths_must_stay_under_the_root() {
        let doc = parse(
            r#"
- {path: /tmp/outside.tsv, data_type: edge}
- {path: ../outside.tsv, data_type: edge}
- {path: edges/../../outside.tsv, data_type: edge}
- {path: ./edges/merged.tsv, data_type: edge}
"#,
        );
        let errs = validate(&doc).unwrap_err();
        assert_eq!(
            errs,
            vec![
                "entry 0: 'path' must be relative to the data root: /tmp/outside.tsv".to_string(),
                "entry 1: 'path' must be relative to the data root: ../outside.tsv".to_string(),
                "entry 2: 'path' must be relative to the data root: edges/../../outside.tsv"
                    .to_string(),
            ]
        );
    }

    #[test]
    fn rejects_wrongly_typed_fields() {
        let doc = parse(
            r#"
- path: ""
  data_type: 3
  prefix: [a, b]
"#,
        );
        let errs = validate(&doc).unwrap_err();
        assert_eq!(errs.len(), 3);
        assert!(errs.iter().any(|e| e.contains("'path' must be a non-empty string")));
        assert!(errs.iter().any(|e| e.contains("'data_type' must be a string")));
        assert!(errs.iter().any(|e| e.contains("'prefix' must be a string")));
    }
}
