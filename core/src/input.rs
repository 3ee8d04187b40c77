use std::collections::HashMap;
use anyhow::{anyhow, Result};

/// Metadata keys understood by the add command (`desc:...`, `due:...`).
pub const KNOWN_KEYS: [&str; 2] = ["description", "due"];

#[derive(Debug, PartialEq)]
pub struct ParsedInput {
    pub text: String,
    pub metadata: HashMap<String, String>,
}

/// Splits `key:value` tokens from the free text of a task.
/// Only keys that resolve against `KNOWN_KEYS` are treated as metadata, so
/// text like "Call Bob at 10:30" survives intact.
pub fn parse_args(args: &[String]) -> ParsedInput {
    let mut text_parts = Vec::new();
    let mut metadata = HashMap::new();

    for arg in args {
        if let Some((key, value)) = arg.split_once(':') {
            if let Ok(full_key) = expand_key(key, &KNOWN_KEYS) {
                metadata.insert(full_key, value.to_string());
                continue;
            }
        }
        text_parts.push(arg.as_str());
    }

    ParsedInput {
        text: text_parts.join(" "),
        metadata,
    }
}

pub fn expand_key(key: &str, candidates: &[&str]) -> Result<String> {
    if key.is_empty() {
        return Err(anyhow!("Empty key"));
    }

    if candidates.contains(&key) {
        return Ok(key.to_string());
    }

    let matches: Vec<&str> = candidates
        .iter()
        .filter(|&&c| c.starts_with(key))
        .cloned()
        .collect();

    match matches.len() {
        1 => Ok(matches[0].to_string()),
        0 => Err(anyhow!("Unknown key: '{}'", key)),
        _ => Err(anyhow!("Ambiguous key: '{}' matches {:?}", key, matches)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_simple() {
        let parsed = parse_args(&args(&["Buy", "milk", "due:tomorrow", "desc:2%"]));
        assert_eq!(parsed.text, "Buy milk");
        assert_eq!(parsed.metadata.get("due"), Some(&"tomorrow".to_string()));
        assert_eq!(parsed.metadata.get("description"), Some(&"2%".to_string()));
    }

    #[test]
    fn test_unknown_keys_stay_in_text() {
        let parsed = parse_args(&args(&["Call", "Bob", "at", "10:30", "project:home"]));
        assert_eq!(parsed.text, "Call Bob at 10:30 project:home");
        assert!(parsed.metadata.is_empty());
    }

    #[test]
    fn test_expand_key() {
        let candidates = ["due", "description", "done"];

        assert_eq!(expand_key("due", &candidates).unwrap(), "due");
        assert_eq!(expand_key("du", &candidates).unwrap(), "due");
        assert_eq!(expand_key("de", &candidates).unwrap(), "description");
        assert_eq!(expand_key("don", &candidates).unwrap(), "done");

        // Ambiguous
        assert!(expand_key("d", &candidates).is_err());

        // Unknown
        assert!(expand_key("x", &candidates).is_err());
        assert!(expand_key("", &candidates).is_err());
    }
}
