// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Replacement rules applied to rendered log text
//!
//! Rules only change what is printed. The request that goes on the wire and
//! the response handed back to the caller are never touched.

use std::borrow::Cow;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Ordered set of literal `secret -> token` replacements
///
/// Secrets are unique. Iteration follows first insertion; inserting a secret
/// again swaps its token but keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplacementRules {
    rules: Vec<(String, String)>,
}

impl ReplacementRules {
    /// Create an empty rule set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or update a rule, returning the previous token for `secret`
    pub fn insert(&mut self, secret: impl Into<String>, token: impl Into<String>) -> Option<String> {
        let secret = secret.into();
        let token = token.into();
        match self.rules.iter_mut().find(|(s, _)| *s == secret) {
            Some((_, existing)) => Some(std::mem::replace(existing, token)),
            None => {
                self.rules.push((secret, token));
                None
            }
        }
    }

    /// Chainable [`ReplacementRules::insert`]
    pub fn with(mut self, secret: impl Into<String>, token: impl Into<String>) -> Self {
        self.insert(secret, token);
        self
    }

    /// Token configured for `secret`
    pub fn get(&self, secret: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|(s, _)| s == secret)
            .map(|(_, t)| t.as_str())
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether there are no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules in application order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.rules.iter().map(|(s, t)| (s.as_str(), t.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ReplacementRules {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut rules = Self::new();
        for (secret, token) in iter {
            rules.insert(secret, token);
        }
        rules
    }
}

impl Serialize for ReplacementRules {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.rules.len()))?;
        for (secret, token) in &self.rules {
            map.serialize_entry(secret, token)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ReplacementRules {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RulesVisitor;

        impl<'de> Visitor<'de> for RulesVisitor {
            type Value = ReplacementRules;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of secret strings to replacement tokens")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut rules = ReplacementRules::new();
                while let Some((secret, token)) = access.next_entry::<String, String>()? {
                    rules.insert(secret, token);
                }
                Ok(rules)
            }
        }

        deserializer.deserialize_map(RulesVisitor)
    }
}

/// How a matched secret is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedactionMode {
    /// `secret [token]`: the secret stays visible next to its token
    #[default]
    Annotate,
    /// `token`: the secret is swapped out
    Replace,
}

impl RedactionMode {
    fn render(self, secret: &str, token: &str) -> String {
        match self {
            RedactionMode::Annotate => format!("{} [{}]", secret, token),
            RedactionMode::Replace => token.to_string(),
        }
    }
}

/// Applies [`ReplacementRules`] to display text
#[derive(Debug, Clone, Default)]
pub struct Redactor {
    rules: ReplacementRules,
    url_only: bool,
    mode: RedactionMode,
}

impl Redactor {
    /// Create a redactor
    pub fn new(rules: ReplacementRules, url_only: bool, mode: RedactionMode) -> Self {
        Self {
            rules,
            url_only,
            mode,
        }
    }

    /// Configured rules
    pub fn rules(&self) -> &ReplacementRules {
        &self.rules
    }

    /// Whether rules are restricted to URLs
    pub fn url_only(&self) -> bool {
        self.url_only
    }

    /// Rendering mode
    pub fn mode(&self) -> RedactionMode {
        self.mode
    }

    /// Apply every rule, in order, to `text`.
    ///
    /// With a URL-only scope, text that is not a URL is returned as is. Each
    /// rule replaces all non-overlapping occurrences left to right; a later
    /// rule sees the output of the earlier ones.
    pub fn apply<'a>(&self, text: &'a str, is_url: bool) -> Cow<'a, str> {
        if self.url_only && !is_url {
            return Cow::Borrowed(text);
        }

        let mut result = Cow::Borrowed(text);
        for (secret, token) in self.rules.iter() {
            // An empty secret would match between every character
            if !secret.is_empty() && result.contains(secret) {
                let rendered = self.mode.render(secret, token);
                result = Cow::Owned(result.replace(secret, &rendered));
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn redactor(rules: ReplacementRules, url_only: bool, mode: RedactionMode) -> Redactor {
        Redactor::new(rules, url_only, mode)
    }

    #[test]
    fn test_insertion_order_and_update() {
        let mut rules = ReplacementRules::new()
            .with("b", "1")
            .with("a", "2")
            .with("c", "3");
        assert_eq!(rules.insert("a", "20"), Some("2".to_string()));

        let collected: Vec<_> = rules.iter().collect();
        assert_eq!(collected, vec![("b", "1"), ("a", "20"), ("c", "3")]);
        assert_eq!(rules.get("a"), Some("20"));
        assert_eq!(rules.len(), 3);
    }

    #[test]
    fn test_annotate_mode() {
        let r = redactor(
            ReplacementRules::new().with("origin", "***"),
            false,
            RedactionMode::Annotate,
        );
        assert_eq!(
            r.apply(r#"{"origin":"1.2.3.4"}"#, false),
            r#"{"origin [***]":"1.2.3.4"}"#
        );
    }

    #[test]
    fn test_replace_mode() {
        let r = redactor(
            ReplacementRules::new().with("s3cr3t", "<token>"),
            false,
            RedactionMode::Replace,
        );
        assert_eq!(
            r.apply("key=s3cr3t&other=s3cr3t", false),
            "key=<token>&other=<token>"
        );
    }

    #[test]
    fn test_url_only_scope() {
        let r = redactor(
            ReplacementRules::new().with("httpbin", "HB"),
            true,
            RedactionMode::Replace,
        );
        assert_eq!(r.apply("https://httpbin.org/get", true), "https://HB.org/get");

        let body = "served by httpbin";
        let once = r.apply(body, false);
        let twice = r.apply(&once, false);
        assert_eq!(once, body);
        assert_eq!(twice, body);
        assert!(matches!(once, Cow::Borrowed(_)));
    }

    #[test]
    fn test_rules_cascade_in_order() {
        let rules = ReplacementRules::new().with("alpha", "beta").with("beta", "gamma");

        let r = redactor(rules.clone(), false, RedactionMode::Replace);
        assert_eq!(r.apply("alpha", false), "gamma");

        let r = redactor(rules, false, RedactionMode::Annotate);
        assert_eq!(r.apply("alpha", false), "alpha [beta [gamma]]");
    }

    #[test]
    fn test_non_overlapping_left_to_right() {
        let r = redactor(
            ReplacementRules::new().with("aa", "X"),
            false,
            RedactionMode::Replace,
        );
        assert_eq!(r.apply("aaaaa", false), "XXa");
    }

    #[test]
    fn test_no_match_borrows() {
        let r = redactor(
            ReplacementRules::new().with("token", "***"),
            false,
            RedactionMode::Annotate,
        );
        assert!(matches!(r.apply("nothing to hide", false), Cow::Borrowed(_)));
    }

    #[test]
    fn test_empty_secret_is_skipped() {
        let rules = ReplacementRules::new().with("", "X").with("ab", "Y");
        let redactor = redactor(rules, false, RedactionMode::Replace);
        assert_eq!(redactor.apply("abc", false), "Yc");
    }

    #[test]
    fn test_serde_keeps_order() {
        let rules: ReplacementRules =
            serde_json::from_str(r#"{"zeta":"1","alpha":"2","mid":"3"}"#).unwrap();
        let secrets: Vec<_> = rules.iter().map(|(s, _)| s).collect();
        assert_eq!(secrets, vec!["zeta", "alpha", "mid"]);

        let json = serde_json::to_string(&rules).unwrap();
        assert_eq!(json, r#"{"zeta":"1","alpha":"2","mid":"3"}"#);
    }

    #[test]
    fn test_from_iterator_dedups() {
        let rules: ReplacementRules = vec![("a", "1"), ("b", "2"), ("a", "3")].into_iter().collect();
        assert_eq!(rules.iter().collect::<Vec<_>>(), vec![("a", "3"), ("b", "2")]);
    }
}
