//! Active tag sets and field tag expressions.
//!
//! A field opts into redaction with a tag expression such as `"admin,!owner"`.
//! The expression is a comma-separated list of clauses; each clause is either
//! a bare tag name or a tag name negated with a single leading `!`.
//!
//! Evaluation is pure. It never fails: malformed-looking clauses simply name a
//! tag that is unlikely to be active.

use std::collections::HashSet;

/// The set of tags in effect for one redaction call.
///
/// Duplicates collapse and order is irrelevant.
///
/// ```rust
/// use redactif::TagSet;
///
/// let tags: TagSet = ["admin", "export", "admin"].into_iter().collect();
/// assert_eq!(tags.len(), 2);
/// assert!(tags.contains("export"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: HashSet<String>,
}

impl TagSet {
    /// Creates an empty tag set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when `tag` is active.
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Number of distinct active tags.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Returns `true` when no tag is active.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Iterates over the active tags in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }
}

impl<S> FromIterator<S> for TagSet
where
    S: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            tags: iter.into_iter().map(|tag| tag.as_ref().to_owned()).collect(),
        }
    }
}

impl<S> Extend<S> for TagSet
where
    S: AsRef<str>,
{
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.tags
            .extend(iter.into_iter().map(|tag| tag.as_ref().to_owned()));
    }
}

/// A single clause of a [`TagExpr`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Clause<'a> {
    name: &'a str,
    negated: bool,
}

impl<'a> Clause<'a> {
    /// Parses one clause, stripping at most one leading `!`.
    ///
    /// Whitespace is significant: `" a"` names the tag `" a"`.
    #[must_use]
    pub fn parse(raw: &'a str) -> Self {
        match raw.strip_prefix('!') {
            Some(name) => Self {
                name,
                negated: true,
            },
            None => Self {
                name: raw,
                negated: false,
            },
        }
    }

    /// The tag name with any negation marker removed.
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Whether the clause was written as `!name`.
    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// Evaluates the clause against the active tags.
    pub fn matches(&self, tags: &TagSet) -> bool {
        let present = tags.contains(self.name);
        (self.negated && !present) || (!self.negated && present)
    }
}

/// A field tag expression of the form `clause[,clause...]`.
///
/// The expression matches when any of its clauses matches.
///
/// ```rust
/// use redactif::{TagExpr, TagSet};
///
/// let expr = TagExpr::new("a,!b");
/// assert!(expr.matches(&TagSet::new()));
/// assert!(expr.matches(&["a", "b"].into_iter().collect()));
/// assert!(!expr.matches(&["b"].into_iter().collect()));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TagExpr<'a> {
    raw: &'a str,
}

impl<'a> TagExpr<'a> {
    /// Wraps a raw expression. Parsing is deferred to evaluation.
    #[must_use]
    pub const fn new(raw: &'a str) -> Self {
        Self { raw }
    }

    /// The expression exactly as written on the field.
    pub fn as_str(&self) -> &'a str {
        self.raw
    }

    /// Iterates over the clauses in written order.
    pub fn clauses(&self) -> impl Iterator<Item = Clause<'a>> + 'a {
        self.raw.split(',').map(Clause::parse)
    }

    /// Returns `true` when at least one clause matches.
    ///
    /// Every clause is evaluated, even after a match.
    pub fn matches(&self, tags: &TagSet) -> bool {
        self.clauses()
            .fold(false, |matched, clause| clause.matches(tags) | matched)
    }
}
