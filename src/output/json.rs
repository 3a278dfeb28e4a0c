use crate::types::ReportData;

#[must_use]
pub fn to_json(data: &ReportData) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_labels_and_repos() {
        let data = ReportData {
            since: "2025-01-10".to_string(),
            until: "2025-01-20".to_string(),
            author: "Alice".to_string(),
            ..ReportData::default()
        };
        let parsed: serde_json::Value =
            serde_json::from_str(&to_json(&data)).expect("valid json");
        assert_eq!(parsed["since"], "2025-01-10");
        assert_eq!(parsed["until"], "2025-01-20");
        assert_eq!(parsed["author"], "Alice");
        assert!(parsed["repos"].as_array().is_some_and(Vec::is_empty));
    }
}
