// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use serde_json::{Map, Value};

// Layer 3: Internal module imports
// (none)

/// Recursively rewrite snake_case object keys to camelCase. Leaves that
/// are not objects (arrays, strings, numbers) are left untouched; array
/// elements are recursed into. Applied only at the envelope boundary
/// (§4.4, §9) — never let this leak into internal representations.
pub fn dict_to_camel(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            for (k, v) in map {
                out.insert(snake_to_camel(&k), dict_to_camel(v));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(dict_to_camel).collect()),
        other => other,
    }
}

fn snake_to_camel(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper_next = false;
    for ch in key.chars() {
        if ch == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

/// Inverse of [`dict_to_camel`]: recursively rewrite camelCase object keys
/// to snake_case. Exists so a deployment accepting camelCased request
/// bodies under `web.case = camel` can normalize them back to the
/// snake_case shape every internal model and store expects (§8 round-trip
/// property: `dict_to_camel(dict_to_snake(x)) == x` for ASCII keys).
pub fn dict_to_snake(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            for (k, v) in map {
                out.insert(camel_to_snake(&k), dict_to_snake(v));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(dict_to_snake).collect()),
        other => other,
    }
}

fn camel_to_snake(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            out.push('_');
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}
