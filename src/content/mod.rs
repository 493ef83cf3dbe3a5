//! Content collections.
//!
//! A collection is a directory of markdown files whose frontmatter is
//! validated against a fixed schema at load time:
//!
//! ```text
//! src/content/blog/
//! ├── first-post.md        -> slug "first-post"
//! └── guides/Setup.mdx     -> slug "guides/setup"
//! ```

pub mod blog;
pub mod collection;
pub mod error;
pub mod frontmatter;
pub mod schema;

pub use blog::{BlogFrontmatter, BlogSchema, COLLECTION, FaqEntry};
pub use collection::{Collection, Entry};
pub use error::{ContentError, SchemaIssue, SchemaIssues};
