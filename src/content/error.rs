//! Content loading error types.

use owo_colors::OwoColorize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// FrontmatterError
// ============================================================================

/// Frontmatter block could not be parsed.
#[derive(Debug, Error)]
pub enum FrontmatterError {
    #[error("invalid YAML frontmatter: {0}")]
    Yaml(#[source] serde_yaml::Error),

    #[error("invalid TOML frontmatter: {0}")]
    Toml(#[source] toml::de::Error),

    #[error("frontmatter must be a mapping, found {0}")]
    NotAMapping(&'static str),
}

// ============================================================================
// SchemaIssue
// ============================================================================

/// A single schema violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaIssue {
    /// Dotted field path (e.g., `faq.1.answer`)
    pub path: String,
    pub message: String,
}

impl SchemaIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for SchemaIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.cyan(), self.message)
    }
}

/// All violations found in one frontmatter block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaIssues(pub Vec<SchemaIssue>);

impl SchemaIssues {
    pub fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.0.push(SchemaIssue::new(path, message));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SchemaIssue> {
        self.0.iter()
    }

    /// Whether an issue is recorded for `path`.
    pub fn has(&self, path: &str) -> bool {
        self.0.iter().any(|issue| issue.path == path)
    }
}

impl fmt::Display for SchemaIssues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, issue) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {} {issue}", "→".red())?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaIssues {}

// ============================================================================
// ContentError
// ============================================================================

/// Errors raised while loading a content collection.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("IO error when reading `{}`", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    #[error("{}: {source}", path.display())]
    Frontmatter {
        path: PathBuf,
        #[source]
        source: FrontmatterError,
    },

    // NOTE: No #[source] here - issues are printed inline
    #[error("{} does not match the `{collection}` schema:\n{issues}", path.display())]
    Schema {
        path: PathBuf,
        collection: &'static str,
        issues: SchemaIssues,
    },

    #[error("slug `{slug}` is used by both {} and {}", first.display(), second.display())]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },

    /// File name has no characters left after slugifying, so its page
    /// would land on the collection index.
    #[error("cannot derive a slug from `{}`, rename the file", .0.display())]
    EmptySlug(PathBuf),

    #[error("collection directory `{}` does not exist", .0.display())]
    MissingCollection(PathBuf),

    #[error("{}", format_many(.0))]
    Invalid(Vec<ContentError>),
}

impl ContentError {
    /// Flatten a list of errors: a single error is returned as-is.
    pub fn from_many(mut errors: Vec<ContentError>) -> Self {
        if errors.len() == 1 {
            errors.remove(0)
        } else {
            Self::Invalid(errors)
        }
    }

    /// Number of individual failures represented.
    pub fn count(&self) -> usize {
        match self {
            Self::Invalid(errors) => errors.iter().map(Self::count).sum(),
            _ => 1,
        }
    }
}

fn format_many(errors: &[ContentError]) -> String {
    let mut out = String::new();
    for (i, error) in errors.iter().enumerate() {
        if i > 0 {
            out.push_str("\n\n");
        }
        out.push_str(&error.to_string());
    }
    out.push_str(&format!(
        "\n\n{} {} {}",
        "found".dimmed(),
        errors.len().to_string().red().bold(),
        "invalid entries".dimmed()
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_issues_display() {
        let mut issues = SchemaIssues::default();
        issues.push("title", "Required");
        issues.push("faq.0.answer", "Expected string, received number");

        let display = issues.to_string();
        let lines: Vec<_> = display.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("title") && lines[0].ends_with(": Required"));
        assert!(lines[1].contains("faq.0.answer"));
        assert!(issues.has("title"));
        assert!(!issues.has("description"));
    }

    #[test]
    fn test_content_error_display() {
        let err = ContentError::Schema {
            path: PathBuf::from("blog/post.md"),
            collection: "blog",
            issues: SchemaIssues(vec![SchemaIssue::new("title", "Required")]),
        };
        let display = err.to_string();
        assert!(display.starts_with("blog/post.md does not match the `blog` schema:"));
        assert!(display.ends_with(": Required"));
    }

    #[test]
    fn test_from_many() {
        let single = ContentError::from_many(vec![ContentError::MissingCollection("x".into())]);
        assert!(matches!(single, ContentError::MissingCollection(_)));

        let many = ContentError::from_many(vec![
            ContentError::MissingCollection("a".into()),
            ContentError::MissingCollection("b".into()),
        ]);
        assert_eq!(many.count(), 2);
    }
}
