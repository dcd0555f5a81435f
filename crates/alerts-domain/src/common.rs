//! Display labels and lenient numeric decoding for budgeting primitives.

use serde::{de::Deserializer, Deserialize};

/// Prefixes `text` with a display emoji, ignoring blank ones.
pub fn emoji_label(emoji: Option<&str>, text: &str) -> String {
    match emoji.map(str::trim) {
        Some(emoji) if !emoji.is_empty() => format!("{emoji} {text}"),
        _ => text.to_string(),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

/// Decodes an amount that may arrive as a number or a numeric string.
///
/// Anything that does not parse to a finite number decodes as `0.0`.
pub fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawAmount>::deserialize(deserializer)?;
    let value = match raw {
        Some(RawAmount::Number(value)) => value,
        Some(RawAmount::Text(text)) => text.trim().parse::<f64>().unwrap_or(0.0),
        Some(RawAmount::Other(_)) | None => 0.0,
    };
    Ok(if value.is_finite() { value } else { 0.0 })
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "super::lenient_amount")]
        value: f64,
    }

    fn decode(json: &str) -> f64 {
        serde_json::from_str::<Row>(json).expect("decode row").value
    }

    #[test]
    fn accepts_numbers_and_numeric_strings() {
        assert_eq!(decode(r#"{"value": 8000}"#), 8000.0);
        assert_eq!(decode(r#"{"value": "6800.50"}"#), 6800.5);
    }

    #[test]
    fn emoji_label_skips_blank_emoji() {
        assert_eq!(super::emoji_label(None, "Food budget"), "Food budget");
        assert_eq!(super::emoji_label(Some("  "), "Food budget"), "Food budget");
        assert_eq!(super::emoji_label(Some("🍔"), "Food budget"), "🍔 Food budget");
    }

    #[test]
    fn malformed_values_decode_as_zero() {
        assert_eq!(decode(r#"{"value": "eight thousand"}"#), 0.0);
        assert_eq!(decode(r#"{"value": null}"#), 0.0);
        assert_eq!(decode(r#"{"value": true}"#), 0.0);
        assert_eq!(decode(r#"{}"#), 0.0);
    }
}
