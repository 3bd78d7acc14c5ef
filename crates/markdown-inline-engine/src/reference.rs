//! Reference link definitions and the table the inline parser resolves
//! `[text][id]`, `[id][]` and `[id]` against.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

/// A link destination with an optional title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub url: String,
    pub title: Option<String>,
}

impl Link {
    pub fn new(url: impl Into<String>, title: Option<String>) -> Self {
        Self {
            url: url.into(),
            title,
        }
    }
}

/// Normalizes a reference label: trims, collapses inner whitespace runs to a
/// single space and lowercases.
pub fn normalize_label(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Table of reference definitions keyed by normalized label.
#[derive(Debug, Clone, Default)]
pub struct ReferenceLinks {
    links: HashMap<String, Link>,
}

impl ReferenceLinks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a definition. The first definition of a label wins.
    pub fn insert(&mut self, label: &str, link: Link) {
        self.links.entry(normalize_label(label)).or_insert(link);
    }

    pub fn get(&self, label: &str) -> Option<&Link> {
        self.links.get(&normalize_label(label))
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn from_definitions<I>(definitions: I) -> Self
    where
        I: IntoIterator<Item = ReferenceDefinition>,
    {
        let mut links = Self::new();
        for def in definitions {
            links.insert(&def.label, def.link);
        }
        links
    }
}

/// A parsed `[label]: url "title"` definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceDefinition {
    pub label: String,
    pub link: Link,
}

impl ReferenceDefinition {
    /// Parses a whole block of text as a single reference definition.
    ///
    /// The url may be wrapped in `<>`. The title may be quoted with `"`, `'`
    /// or parentheses and may sit on the line after the url.
    pub fn parse(text: &str) -> Option<Self> {
        static DEFINITION: OnceLock<Regex> = OnceLock::new();
        let re = DEFINITION.get_or_init(|| {
            Regex::new(
                r#"\A[ ]{0,3}\[((?:\\\]|[^\]])+)\]:\s*(?:<(\S+)>|(\S+))\s*("[^"]+"|'[^']+'|\([^)]+\)|)\s*\z"#,
            )
            .expect("Invalid reference definition regex")
        });

        let caps = re.captures(text)?;
        let label = caps.get(1)?.as_str();
        if label.trim().is_empty() {
            return None;
        }
        let url = caps.get(2).or_else(|| caps.get(3))?.as_str();
        let title = caps
            .get(4)
            .map(|m| m.as_str())
            .filter(|t| t.len() >= 2)
            .map(|t| t[1..t.len() - 1].to_string());

        Some(Self {
            label: label.to_string(),
            link: Link::new(url, title),
        })
    }
}
