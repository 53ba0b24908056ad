//! Dotted-path lookup into a loosely-structured YAML document
//!
//! `mkdocs.yml` sections like `plugins` and `markdown_extensions` may be a
//! mapping, or a sequence mixing bare strings with single-key mappings.
//! [`dig`] normalizes the sequence form into a flat mapping while descending,
//! and distinguishes "path not found" (`None`) from a present null value
//! (`Some(Value::Null)`).

use serde_yaml::{Mapping, Value};

/// Resolve a dotted path such as `theme.locale` against a YAML document.
///
/// Returns `None` when any segment is absent or the current value cannot be
/// indexed by key. Sequences are flattened before each descent: single-key
/// mapping elements are merged, bare string elements become keys with an
/// empty mapping as value. Flattening iterates the sequence in reverse with
/// overwriting inserts, so when a name appears more than once the first
/// occurrence in original order wins.
pub fn dig(cfg: &Value, keys: &str) -> Option<Value> {
    let (key, rest) = match keys.split_once('.') {
        Some((head, tail)) => (head, Some(tail)),
        None => (keys, None),
    };
    let mut value = cfg.get(key)?.clone();
    if let Value::Sequence(items) = &value {
        let mut flat = Mapping::new();
        for item in items.iter().rev() {
            match item {
                Value::Mapping(m) if m.len() == 1 => {
                    for (k, v) in m {
                        flat.insert(k.clone(), v.clone());
                    }
                }
                Value::String(s) => {
                    flat.insert(Value::String(s.clone()), Value::Mapping(Mapping::new()));
                }
                _ => {}
            }
        }
        value = Value::Mapping(flat);
    }
    match rest {
        None => Some(value),
        Some(rest) => dig(&value, rest),
    }
}

/// Coerce a dug-up value into the capability names it spells out.
///
/// A bare string is a single name, a mapping contributes its string keys
/// (the flattened `plugins` shape), a sequence its string elements. Anything
/// else names nothing.
pub fn strings(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => vec![s.clone()],
        Value::Sequence(items) => items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_owned))
            .collect(),
        Value::Mapping(m) => m
            .keys()
            .filter_map(|k| k.as_str().map(str::to_owned))
            .collect(),
        _ => Vec::new(),
    }
}
