#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Download {
    Html,
    Pdf,
}

/// Class context from the query string. Anything but a strictly positive
/// integer is treated as absent.
pub fn parse_class_id(raw: Option<&str>) -> Option<i64> {
    raw?.trim().parse::<i64>().ok().filter(|v| *v > 0)
}

pub fn parse_download(raw: Option<&str>) -> Download {
    match raw {
        Some("pdf") => Download::Pdf,
        _ => Download::Html,
    }
}

/// Reads a query parameter that may have arrived as a string or a number.
pub fn query_value(query: Option<&serde_json::Value>, key: &str) -> Option<String> {
    match query?.get(key)? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
