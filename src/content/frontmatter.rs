//! Front-matter parsing

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Dates are kept as written; YAML may hand us a bare date or a string
fn date_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_yaml::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_yaml::Value::String(s) => s,
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Null => String::new(),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
    })
}

/// Metadata block at the head of a blog document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogFrontmatter {
    pub title: String,
    pub description: String,
    #[serde(deserialize_with = "date_as_string")]
    pub date: String,
    #[serde(deserialize_with = "string_or_vec")]
    pub tags: Vec<String>,
}

impl BlogFrontmatter {
    /// Split a document into its front-matter and remaining body.
    ///
    /// A document without a `---` block yields default front-matter and the
    /// whole text as body.
    pub fn parse(content: &str) -> Result<(Self, &str), serde_yaml::Error> {
        let content = content.trim_start_matches('\u{feff}').trim_start();

        let Some(rest) = content.strip_prefix("---") else {
            return Ok((Self::default(), content));
        };
        let rest = rest.trim_start_matches(['\n', '\r']);

        let Some(end_pos) = find_closing_fence(rest) else {
            return Ok((Self::default(), content));
        };

        let yaml_content = &rest[..end_pos];
        let remaining = rest[end_pos..]
            .trim_start_matches('-')
            .trim_start_matches(['\n', '\r']);

        if yaml_content.trim().is_empty() {
            return Ok((Self::default(), remaining));
        }

        // A thematic break followed by prose is not front-matter
        if !looks_like_yaml(yaml_content) {
            return Ok((Self::default(), content));
        }

        let fm = serde_yaml::from_str::<BlogFrontmatter>(yaml_content)?;
        Ok((fm, remaining))
    }

    /// Calendar date of the post, if `date` is in a recognised format
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_date_string(&self.date)
    }
}

/// Offset of the closing `---` line within `rest`
fn find_closing_fence(rest: &str) -> Option<usize> {
    if rest.starts_with("---") {
        return Some(0);
    }
    rest.find("\n---").map(|pos| pos + 1)
}

/// At least one `key: value` line with an identifier-like key
fn looks_like_yaml(block: &str) -> bool {
    block.lines().any(|line| {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return false;
        }
        let Some(colon_pos) = trimmed.find(':') else {
            return false;
        };
        let key = &trimmed[..colon_pos];
        let after = &trimmed[colon_pos + 1..];
        !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            && !matches!(key, "http" | "https" | "ftp")
            && (after.is_empty() || after.starts_with(' '))
    })
}

/// Parse a date string in various formats
fn parse_date_string(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    // RFC 3339 keeps the calendar date as written, not shifted to local time
    chrono::DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
description: First post
date: "2024-03-05"
tags:
  - rust
  - web
---

This is the content.
"#;

        let (fm, remaining) = BlogFrontmatter::parse(content).unwrap();
        assert_eq!(fm.title, "Hello World");
        assert_eq!(fm.description, "First post");
        assert_eq!(fm.date, "2024-03-05");
        assert_eq!(fm.tags, vec!["rust", "web"]);
        assert!(remaining.trim_start().starts_with("This is the content."));
    }

    #[test]
    fn test_unquoted_date_and_single_tag() {
        let content = "---\ntitle: Notes\ndate: 2024-01-15\ntags: Notes\n---\nBody\n";

        let (fm, _) = BlogFrontmatter::parse(content).unwrap();
        assert_eq!(fm.date, "2024-01-15");
        assert_eq!(fm.tags, vec!["Notes"]);
        assert_eq!(
            fm.parsed_date(),
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );
    }

    #[test]
    fn test_missing_frontmatter() {
        let (fm, remaining) = BlogFrontmatter::parse("# Just a heading\n").unwrap();
        assert_eq!(fm, BlogFrontmatter::default());
        assert_eq!(remaining, "# Just a heading\n");
    }

    #[test]
    fn test_separator_not_yaml() {
        let content = "---\nSome text with a link https://example.com\n---\nMore\n";

        let (fm, remaining) = BlogFrontmatter::parse(content).unwrap();
        assert_eq!(fm.title, "");
        assert!(remaining.contains("https://example.com"));
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        let content = "---\ntitle: [unclosed\n---\nBody\n";
        assert!(BlogFrontmatter::parse(content).is_err());
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 5);
        assert_eq!(parse_date_string("2024-03-05"), expected);
        assert_eq!(parse_date_string("2024/03/05"), expected);
        assert_eq!(parse_date_string("2024-03-05 10:30:00"), expected);
        assert_eq!(parse_date_string("2024-03-05T23:30:00-08:00"), expected);
        assert_eq!(parse_date_string("next tuesday"), None);
        assert_eq!(parse_date_string(""), None);
    }
}
