//! Builder for Ghost NQL filter strings.
//!
//! Clauses are joined with `+` (AND). A group joins its clauses with `,`
//! (OR) and is wrapped in parentheses when it has more than one member.
//!
//! ```rust,ignore
//! let filter = Filter::new()
//!     .any([Clause::contains("title", "圖書館"), Clause::contains("excerpt", "圖書館")])
//!     .eq("visibility", "public");
//! assert_eq!(filter.to_string(), "(title:~'圖書館',excerpt:~'圖書館')+visibility:public");
//! ```

use std::fmt;

/// Comparison used by a single clause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// `field:value`
    Eq,
    /// `field:-value`
    Not,
    /// `field:~'value'`
    Contains,
    /// `field:~^'value'`
    StartsWith,
}

/// One `field<op>value` term
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    field: String,
    op: Op,
    value: String,
}

impl Clause {
    pub fn new(field: impl Into<String>, op: Op, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    pub fn eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, Op::Eq, value)
    }

    pub fn not(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, Op::Not, value)
    }

    pub fn contains(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, Op::Contains, value)
    }

    pub fn starts_with(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, Op::StartsWith, value)
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.op {
            Op::Eq => write!(f, "{}:{}", self.field, literal(&self.value)),
            Op::Not => write!(f, "{}:-{}", self.field, literal(&self.value)),
            Op::Contains => write!(f, "{}:~'{}'", self.field, escape(&self.value)),
            Op::StartsWith => write!(f, "{}:~^'{}'", self.field, escape(&self.value)),
        }
    }
}

/// AND-joined list of OR groups
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    groups: Vec<Vec<Clause>>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// AND a single clause
    pub fn and(mut self, clause: Clause) -> Self {
        self.groups.push(vec![clause]);
        self
    }

    /// AND a group of OR-ed clauses (empty groups are ignored)
    pub fn any(mut self, clauses: impl IntoIterator<Item = Clause>) -> Self {
        let group: Vec<Clause> = clauses.into_iter().collect();
        if !group.is_empty() {
            self.groups.push(group);
        }
        self
    }

    pub fn eq(self, field: &str, value: impl Into<String>) -> Self {
        self.and(Clause::eq(field, value))
    }

    pub fn not(self, field: &str, value: impl Into<String>) -> Self {
        self.and(Clause::not(field, value))
    }

    /// `tag:{slug}`
    pub fn tag(self, slug: impl Into<String>) -> Self {
        self.eq("tag", slug)
    }

    /// `visibility:public`
    pub fn public(self) -> Self {
        self.eq("visibility", "public")
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, group) in self.groups.iter().enumerate() {
            if i > 0 {
                f.write_str("+")?;
            }
            let wrap = group.len() > 1;
            if wrap {
                f.write_str("(")?;
            }
            for (j, clause) in group.iter().enumerate() {
                if j > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{}", clause)?;
            }
            if wrap {
                f.write_str(")")?;
            }
        }
        Ok(())
    }
}

/// Characters with meaning in NQL
const SYNTAX: &[char] = &['\'', '"', '+', ',', '(', ')', '[', ']', ':'];

/// Bare values pass through; anything with NQL syntax characters is quoted
fn literal(value: &str) -> String {
    let needs_quotes = value.is_empty()
        || value
            .chars()
            .any(|c| c.is_whitespace() || SYNTAX.contains(&c));
    if needs_quotes {
        format!("'{}'", escape(value))
    } else {
        value.to_string()
    }
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_and_joins_with_plus() {
        let filter = Filter::new().tag("blog").public();
        assert_eq!(filter.to_string(), "tag:blog+visibility:public");
    }

    #[test]
    fn test_or_group_is_parenthesised() {
        let filter = Filter::new()
            .any([
                Clause::contains("title", "圖書館"),
                Clause::contains("excerpt", "圖書館"),
            ])
            .public();
        assert_eq!(
            filter.to_string(),
            "(title:~'圖書館',excerpt:~'圖書館')+visibility:public"
        );
    }

    #[test]
    fn test_exclude_and_starts_with() {
        let filter = Filter::new()
            .tag("gov")
            .public()
            .not("slug", "current-post");
        assert_eq!(filter.to_string(), "tag:gov+visibility:public+slug:-current-post");

        let eras = Filter::new().and(Clause::starts_with("slug", "era-")).public();
        assert_eq!(eras.to_string(), "slug:~^'era-'+visibility:public");
    }

    #[test]
    fn test_user_text_is_escaped() {
        let filter = Filter::new().and(Clause::contains("title", "it's"));
        assert_eq!(filter.to_string(), "title:~'it\\'s'");

        let filter = Filter::new().tag("a,b");
        assert_eq!(filter.to_string(), "tag:'a,b'");
    }

    #[test]
    fn test_empty_group_ignored() {
        let filter = Filter::new().any(Vec::new()).public();
        assert_eq!(filter.to_string(), "visibility:public");
        assert!(Filter::new().is_empty());
    }
}
