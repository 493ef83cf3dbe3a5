//! The `blog` collection schema.
//!
//! ```yaml
//! title: Designing for failure        # required
//! description: Notes on retries       # required
//! pubDate: 2024-01-01                 # required, coerced to a date
//! updatedDate: 2024-02-01             # optional
//! heroImage: /images/hero.png         # optional
//! faq:                                # optional
//!   - question: Why?
//!     answer: Because.
//! ```

use serde::Serialize;
use serde_json::{Map, Value};

use super::error::SchemaIssues;
use super::schema::{Field, FieldType, Record, Schema};
use crate::utils::date::DateTimeUtc;

/// Collection name, also the directory under the content root.
pub const COLLECTION: &str = "blog";

static FAQ_ITEM: Schema = Schema {
    fields: &[
        Field::required("question", FieldType::String),
        Field::required("answer", FieldType::String),
    ],
};

static BLOG: Schema = Schema {
    fields: &[
        Field::required("title", FieldType::String),
        Field::required("description", FieldType::String),
        Field::required("pubDate", FieldType::Date),
        Field::optional("updatedDate", FieldType::Date),
        Field::optional("heroImage", FieldType::String),
        Field::optional("faq", FieldType::List(&FAQ_ITEM)),
    ],
};

/// Validated frontmatter of a blog post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogFrontmatter {
    pub title: String,
    pub description: String,
    pub pub_date: DateTimeUtc,
    pub updated_date: Option<DateTimeUtc>,
    pub hero_image: Option<String>,
    pub faq: Option<Vec<FaqEntry>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

impl BlogFrontmatter {
    /// Date shown as "last modified": the update date if any, else the
    /// publish date.
    pub fn last_modified(&self) -> DateTimeUtc {
        self.updated_date.unwrap_or(self.pub_date)
    }

    /// FAQ entries, empty when the post has none.
    pub fn faq(&self) -> &[FaqEntry] {
        self.faq.as_deref().unwrap_or_default()
    }
}

/// Validator for the `blog` collection.
pub struct BlogSchema;

impl BlogSchema {
    pub fn validate(raw: &Map<String, Value>) -> Result<BlogFrontmatter, SchemaIssues> {
        let record = BLOG.validate(raw)?;
        Ok(Self::build(record))
    }

    /// Keys that validation strips.
    pub fn unknown_keys(raw: &Map<String, Value>) -> Vec<&str> {
        BLOG.unknown_keys(raw)
    }

    fn build(mut record: Record) -> BlogFrontmatter {
        let faq = record.take_list("faq").map(|items| {
            items
                .into_iter()
                .map(|mut item| FaqEntry {
                    question: item.take_string("question").unwrap_or_default(),
                    answer: item.take_string("answer").unwrap_or_default(),
                })
                .collect()
        });

        BlogFrontmatter {
            title: record.take_string("title").unwrap_or_default(),
            description: record.take_string("description").unwrap_or_default(),
            // Required and validated, the fallback is unreachable
            pub_date: record
                .take_date("pubDate")
                .unwrap_or(DateTimeUtc::from_ymd(1970, 1, 1)),
            updated_date: record.take_date("updatedDate"),
            hero_image: record.take_string("heroImage"),
            faq,
        }
    }
}
