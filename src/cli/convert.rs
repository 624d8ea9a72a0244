//! Variable bindings from the command line and JSON

use super::CliError;

/// Parses a `NAME=VALUE` binding.
pub fn parse_binding(text: &str) -> Result<(String, f64), CliError> {
    let invalid = || CliError::InvalidBinding(text.to_string());
    let (name, value) = text.split_once('=').ok_or_else(invalid)?;
    let name = name.trim();
    if name.is_empty() {
        return Err(invalid());
    }
    let value = value.trim().parse::<f64>().map_err(|_| invalid())?;
    Ok((name.to_string(), value))
}

/// Reads bindings from a JSON object of numbers (`{"x": 1, "y": 2.5}`).
/// `null` stands for NaN.
pub fn json_to_bindings(v: serde_json::Value) -> Result<Vec<(String, f64)>, CliError> {
    let serde_json::Value::Object(map) = v else {
        return Err(CliError::InvalidBinding(v.to_string()));
    };
    map.into_iter()
        .map(|(name, value)| match value {
            serde_json::Value::Number(n) => n
                .as_f64()
                .map(|f| (name.clone(), f))
                .ok_or_else(|| CliError::InvalidBinding(format!("{}={}", name, n))),
            serde_json::Value::Null => Ok((name, f64::NAN)),
            other => Err(CliError::InvalidBinding(format!("{}={}", name, other))),
        })
        .collect()
}

/// Merges `--vars` JSON and `NAME=VALUE` pairs, in that order. A later
/// binding for the same name replaces the earlier one.
pub fn collect_bindings(pairs: &[String], json: Option<&str>) -> Result<Vec<(String, f64)>, CliError> {
    let mut bindings: Vec<(String, f64)> = match json {
        Some(text) => json_to_bindings(serde_json::from_str(text)?)?,
        None => Vec::new(),
    };
    for pair in pairs {
        let (name, value) = parse_binding(pair)?;
        match bindings.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => bindings.push((name, value)),
        }
    }
    Ok(bindings)
}

#[test]
fn test_parse_binding() {
    assert_eq!(parse_binding("x=2.5").ok(), Some(("x".to_string(), 2.5)));
    assert_eq!(parse_binding(" y = -1e3 ").ok(), Some(("y".to_string(), -1000.0)));
    assert!(parse_binding("x").is_err());
    assert!(parse_binding("=3").is_err());
    assert!(parse_binding("x=abc").is_err());
}

#[test]
fn test_collect_bindings_overrides_json() {
    let pairs = vec!["y=3".to_string(), "z=1".to_string()];
    let bindings = collect_bindings(&pairs, Some(r#"{"x": 1, "y": 2}"#)).unwrap();
    assert_eq!(
        bindings,
        vec![("x".to_string(), 1.0), ("y".to_string(), 3.0), ("z".to_string(), 1.0)]
    );
    assert!(collect_bindings(&[], Some(r#"{"x": "one"}"#)).is_err());
    assert!(collect_bindings(&[], Some("[1, 2]")).is_err());
}
