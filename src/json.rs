use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decode `value` as `T`, or return `fallback`.
///
/// Text columns often hold serialized JSON, so a string is parsed before
/// decoding. Nulls, type mismatches and unparsable strings yield `fallback`.
pub fn parse_json_or<T: DeserializeOwned>(value: Option<&Value>, fallback: T) -> T {
    let value = match value {
        None | Some(Value::Null) => return fallback,
        Some(Value::String(s)) => match serde_json::from_str::<Value>(s) {
            Ok(parsed) => parsed,
            Err(_) => return fallback,
        },
        Some(other) => other.clone(),
    };
    serde_json::from_value(value).unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_values_and_embedded_strings() {
        let direct = json!([1, 2, 3]);
        assert_eq!(parse_json_or::<Vec<u32>>(Some(&direct), vec![]), vec![1, 2, 3]);

        let embedded = json!("[4, 5]");
        assert_eq!(parse_json_or::<Vec<u32>>(Some(&embedded), vec![]), vec![4, 5]);
    }

    #[test]
    fn falls_back_on_anything_else() {
        assert_eq!(parse_json_or::<Vec<u32>>(None, vec![9]), vec![9]);
        assert_eq!(parse_json_or::<Vec<u32>>(Some(&Value::Null), vec![9]), vec![9]);
        assert_eq!(parse_json_or::<Vec<u32>>(Some(&json!("not json")), vec![9]), vec![9]);
        assert_eq!(parse_json_or::<Vec<u32>>(Some(&json!({"a": 1})), vec![9]), vec![9]);
    }
}
