/// Folds a reference name into its lookup key: invisible marks stripped,
/// whitespace collapsed, lowercased.
pub(crate) fn normalize_key(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::normalize_key;

    #[test]
    fn folds_case_and_whitespace() {
        assert_eq!(normalize_key("\u{feff}  Organic   Cotton "), "organic cotton");
        assert_eq!(normalize_key("Fair Trade "), normalize_key(" fair trade"));
    }

    #[test]
    fn blank_names_collapse_to_empty() {
        assert_eq!(normalize_key(" \t \u{200b}"), "");
    }
}
