use crate::domain::model::Record;
use crate::utils::error::{EtlError, Result};
use regex::Regex;
use scraper::{Html, Selector};

/// Collects the bodies of every inline `script` element carrying the
/// `text/javascript` MIME type, newline-joined.
pub fn collect_script_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let selector = Selector::parse(r#"script[type="text/javascript"]"#).unwrap();
    document
        .select(&selector)
        .map(|element| element.inner_html())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Finds the first substring shaped like `{"i…": "…"}`. The page embeds its
/// record array as consecutive flat objects on one line, so the greedy prefix
/// runs to the last quoted-value-plus-brace on that line and the single match
/// carries the whole array body.
pub fn locate_embedded_json(text: &str) -> Option<&str> {
    let pattern = Regex::new(r#"\{"i.*":\s*"(.*?)"\}"#).unwrap();
    pattern.find(text).map(|m| m.as_str())
}

/// Parses a located payload as a JSON array of flat objects.
pub fn parse_embedded_json(payload: &str) -> Result<Vec<Record>> {
    let wrapped = format!("[{}]", payload);
    let values: Vec<serde_json::Value> =
        serde_json::from_str(&wrapped).map_err(|e| EtlError::Extraction {
            message: format!("embedded payload is not valid JSON: {}", e),
        })?;

    let mut records = Vec::with_capacity(values.len());
    for value in values {
        match value {
            serde_json::Value::Object(fields) => records.push(Record {
                data: fields.into_iter().collect(),
            }),
            _ => {
                return Err(EtlError::Extraction {
                    message: "embedded payload must be an array of objects".to_string(),
                })
            }
        }
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_only_javascript_script_blocks() {
        let html = r#"
            <html><head>
            <script type="text/javascript">var a = 1;</script>
            <script type="module">var b = 2;</script>
            <script>var c = 3;</script>
            </head><body></body></html>
        "#;
        let text = collect_script_text(html);
        assert!(text.contains("var a = 1;"));
        assert!(!text.contains("var b = 2;"));
        assert!(!text.contains("var c = 3;"));
    }

    #[test]
    fn locates_first_payload_fragment() {
        let text = r#"var x = 0; var profs = [{"i":"1","n":"Ana","a":"Lopez","d":"Math","m":"10","c":"9.5"}];"#;
        let payload = locate_embedded_json(text).unwrap();
        assert!(payload.starts_with(r#"{"i"#));
        assert!(payload.ends_with(r#""9.5"}"#));
    }

    #[test]
    fn returns_none_when_no_fragment_matches() {
        assert!(locate_embedded_json("var x = {};").is_none());
        assert!(locate_embedded_json("").is_none());
    }

    #[test]
    fn greedy_match_spans_every_object_on_the_line() {
        let text = concat!(
            r#"var profs = [{"i":"1","n":"Ana","a":"Lopez","d":"Math","m":"10","c":"9.5"}, "#,
            r#"{"i":"2","n":"Luis","a":"Paz","d":"Physics","m":"4","c":"8.1"}];"#
        );
        let payload = locate_embedded_json(text).unwrap();
        let records = parse_embedded_json(payload).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("n").unwrap(), "Ana");
        assert_eq!(records[1].get("n").unwrap(), "Luis");
    }

    #[test]
    fn parses_single_object_payload() {
        let records =
            parse_embedded_json(r#"{"i":"1","n":"Ana","a":"Lopez","d":"Math","m":"10","c":"9.5"}"#)
                .unwrap();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        for key in ["i", "n", "a", "d", "m", "c"] {
            assert!(record.get(key).is_some(), "missing key {}", key);
        }
    }

    #[test]
    fn rejects_payload_that_is_not_valid_json() {
        let err = parse_embedded_json(r#"{"i":"1", broken"#).unwrap_err();
        assert!(matches!(err, EtlError::Extraction { .. }));
    }
}
