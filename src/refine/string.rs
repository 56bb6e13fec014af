//! String refinements: custom checks, blacklists, consecutive-character
//! limits.

use std::sync::Arc;

use serde_json::Value;
use stillwater::Validation;

use crate::issue::Issues;
use crate::path::JsonPath;
use crate::schema::{SchemaLike, StringSchema};

use super::RefineCtx;

type CustomFn = Arc<dyn Fn(&str, &mut RefineCtx) + Send + Sync>;
type MessageFn = Arc<dyn Fn(&str) -> String + Send + Sync>;
type CharMessageFn = Arc<dyn Fn(char) -> String + Send + Sync>;

/// Rejects values matching any of a set of patterns.
///
/// A pattern is an exact match, or a prefix match when it ends with `*`:
/// `"admin*"` blocks `"admin"`, `"administrator"`, and everything in between.
#[derive(Clone)]
pub struct Blacklist {
    patterns: Vec<String>,
    message: Option<MessageFn>,
}

impl Blacklist {
    pub fn new(patterns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            patterns: patterns.into_iter().map(Into::into).collect(),
            message: None,
        }
    }

    /// Custom message builder; receives the offending value.
    pub fn message<F>(mut self, message: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.message = Some(Arc::new(message));
        self
    }

    fn matches(&self, value: &str) -> bool {
        self.patterns.iter().any(|pattern| {
            match pattern.strip_suffix('*') {
                Some(prefix) => value.starts_with(prefix),
                None => value == pattern,
            }
        })
    }

    fn apply(&self, value: &str, ctx: &mut RefineCtx) {
        if self.matches(value) {
            let message = match &self.message {
                Some(f) => f(value),
                None => format!("Value '{}' is blacklisted", value),
            };
            ctx.add_issue(message);
        }
    }
}

/// Rejects values where any of a set of characters appears twice in a row.
#[derive(Clone)]
pub struct NoConsecutive {
    characters: Vec<char>,
    message: Option<CharMessageFn>,
}

impl NoConsecutive {
    pub fn new(characters: impl IntoIterator<Item = char>) -> Self {
        Self {
            characters: characters.into_iter().collect(),
            message: None,
        }
    }

    /// Custom message builder; receives the repeated character.
    pub fn message<F>(mut self, message: F) -> Self
    where
        F: Fn(char) -> String + Send + Sync + 'static,
    {
        self.message = Some(Arc::new(message));
        self
    }

    fn apply(&self, value: &str, ctx: &mut RefineCtx) {
        let mut flagged = Vec::new();
        let mut chars = value.chars().peekable();
        while let Some(c) = chars.next() {
            if chars.peek() == Some(&c) && self.characters.contains(&c) && !flagged.contains(&c) {
                flagged.push(c);
            }
        }
        for c in flagged {
            let message = match &self.message {
                Some(f) => f(c),
                None => format!("Character '{}' cannot appear consecutively", c),
            };
            ctx.add_issue(message);
        }
    }
}

/// The rule set a refined string runs, in order: `custom`, then `blacklist`,
/// then `no_consecutive`.
#[derive(Clone, Default)]
pub struct StringRules {
    custom: Option<CustomFn>,
    blacklist: Option<Blacklist>,
    no_consecutive: Option<NoConsecutive>,
}

impl StringRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// A free-form check reporting through the context.
    pub fn custom<F>(mut self, rule: F) -> Self
    where
        F: Fn(&str, &mut RefineCtx) + Send + Sync + 'static,
    {
        self.custom = Some(Arc::new(rule));
        self
    }

    pub fn blacklist(mut self, blacklist: Blacklist) -> Self {
        self.blacklist = Some(blacklist);
        self
    }

    pub fn no_consecutive(mut self, no_consecutive: NoConsecutive) -> Self {
        self.no_consecutive = Some(no_consecutive);
        self
    }
}

/// A string schema with refinement rules attached.
///
/// Structural constraints and rules see the same trimmed value; their issues
/// accumulate at the string's path. Non-string input fails the base type
/// check alone — rules never run against a value of the wrong type.
pub struct RefinedString {
    base: StringSchema,
    rules: StringRules,
}

/// Attaches rules to a string schema.
///
/// # Example
///
/// ```rust
/// use veto::{refine_string, Blacklist, JsonPath, Schema, SchemaLike, StringRules};
/// use serde_json::json;
///
/// let schema = refine_string(
///     Schema::string(),
///     StringRules::new().blacklist(Blacklist::new(["root", "admin*"])),
/// );
///
/// assert!(schema.validate(&json!("alice"), &JsonPath::root()).is_success());
/// assert!(schema.validate(&json!("administrator"), &JsonPath::root()).is_failure());
/// ```
pub fn refine_string(base: StringSchema, rules: StringRules) -> RefinedString {
    RefinedString { base, rules }
}

impl SchemaLike for RefinedString {
    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Value, Issues> {
        let raw = match value.as_str() {
            Some(s) => s,
            None => return Validation::Failure(Issues::single(self.base.type_issue(value, path))),
        };

        let trimmed = raw.trim();
        let mut issues = self.base.check(trimmed, path);

        let mut ctx = RefineCtx::new(path.clone());
        if let Some(custom) = &self.rules.custom {
            custom(trimmed, &mut ctx);
        }
        if let Some(blacklist) = &self.rules.blacklist {
            blacklist.apply(trimmed, &mut ctx);
        }
        if let Some(no_consecutive) = &self.rules.no_consecutive {
            no_consecutive.apply(trimmed, &mut ctx);
        }
        issues.extend(ctx.into_issues());

        if issues.is_empty() {
            Validation::Success(Value::String(trimmed.to_string()))
        } else {
            Validation::Failure(Issues::from_vec(issues))
        }
    }
}
