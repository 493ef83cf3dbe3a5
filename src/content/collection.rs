//! Loading the `blog` collection from disk.

use jwalk::WalkDir;
use rayon::iter::Either;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde_json::Map;
use std::fs;
use std::path::{Path, PathBuf};

use super::blog::{BlogFrontmatter, BlogSchema, COLLECTION};
use super::error::ContentError;
use super::frontmatter::{parse_frontmatter, split_frontmatter};
use crate::debug;
use crate::utils::slug::slugify_path;

const IGNORED_FILES: &[&str] = &[".DS_Store"];

/// One validated content file.
#[derive(Debug, Clone)]
pub struct Entry {
    /// Path relative to the collection directory, `/`-separated.
    pub id: String,
    /// URL slug derived from `id` without its extension.
    pub slug: String,
    /// Source file on disk.
    pub path: PathBuf,
    pub data: BlogFrontmatter,
    /// Markdown after the frontmatter block.
    pub body: String,
}

/// All entries of a collection, newest first.
#[derive(Debug, Default)]
pub struct Collection {
    pub entries: Vec<Entry>,
}

impl Collection {
    /// Directory of the blog collection under a content root.
    pub fn dir(content_root: &Path) -> PathBuf {
        content_root.join(COLLECTION)
    }

    /// Load and validate every entry under `dir`.
    ///
    /// `.md` files are always loaded; `.mdx` files only when `mdx` is set.
    /// Every invalid file is reported, not just the first one.
    pub fn load(dir: &Path, mdx: bool) -> Result<Self, ContentError> {
        if !dir.is_dir() {
            return Err(ContentError::MissingCollection(dir.to_path_buf()));
        }

        let mut files = collect_entries(dir, mdx);
        files.sort();
        debug!("content"; "found {} files in {}", files.len(), dir.display());

        let (mut entries, mut errors): (Vec<_>, Vec<_>) = files
            .par_iter()
            .map(|path| load_entry(dir, path))
            .partition_map(|result| match result {
                Ok(entry) => Either::Left(entry),
                Err(err) => Either::Right(err),
            });

        errors.extend(find_duplicate_slugs(&entries));
        if !errors.is_empty() {
            return Err(ContentError::from_many(errors));
        }

        entries.sort_by(|a, b| {
            b.data
                .pub_date
                .cmp(&a.data.pub_date)
                .then_with(|| a.id.cmp(&b.id))
        });

        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }
}

/// Whether `path` is a content file for this collection.
fn is_content_file(path: &Path, mdx: bool) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some("md") => true,
        Some("mdx") => mdx,
        _ => false,
    }
}

fn collect_entries(dir: &Path, mdx: bool) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let name = e.file_name().to_str().unwrap_or_default();
            !IGNORED_FILES.contains(&name) && !name.starts_with('_')
        })
        .map(|e| e.path())
        .filter(|path| is_content_file(path, mdx))
        .collect()
}

fn load_entry(dir: &Path, path: &Path) -> Result<Entry, ContentError> {
    let source = fs::read_to_string(path).map_err(|e| ContentError::Io(path.to_path_buf(), e))?;

    let (raw, body) = match split_frontmatter(&source) {
        Some((frontmatter, body)) => {
            let raw = parse_frontmatter(frontmatter).map_err(|err| ContentError::Frontmatter {
                path: path.to_path_buf(),
                source: err,
            })?;
            (raw, body)
        }
        None => (Map::new(), source.as_str()),
    };

    let id = entry_id(dir, path);
    let slug = slug_for(&id);
    if slug.is_empty() {
        return Err(ContentError::EmptySlug(path.to_path_buf()));
    }

    let unknown = BlogSchema::unknown_keys(&raw);
    if !unknown.is_empty() {
        debug!("content"; "{id}: ignoring unknown keys {}", unknown.join(", "));
    }

    let data = BlogSchema::validate(&raw).map_err(|issues| ContentError::Schema {
        path: path.to_path_buf(),
        collection: COLLECTION,
        issues,
    })?;

    Ok(Entry {
        slug,
        id,
        path: path.to_path_buf(),
        data,
        body: body.to_string(),
    })
}

/// `/`-separated path relative to the collection directory.
fn entry_id(dir: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(dir).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Slug from an entry id: extension removed, each segment slugified.
pub fn slug_for(id: &str) -> String {
    let stem = match id.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() && !stem.ends_with('/') => stem,
        _ => id,
    };
    slugify_path(stem)
}

fn find_duplicate_slugs(entries: &[Entry]) -> Vec<ContentError> {
    let mut seen: FxHashMap<&str, &Path> = FxHashMap::default();
    let mut errors = Vec::new();

    let mut sorted: Vec<&Entry> = entries.iter().collect();
    sorted.sort_by(|a, b| a.id.cmp(&b.id));

    for entry in sorted {
        if let Some(first) = seen.insert(&entry.slug, &entry.path) {
            errors.push(ContentError::DuplicateSlug {
                slug: entry.slug.clone(),
                first: first.to_path_buf(),
                second: entry.path.clone(),
            });
        }
    }

    errors
}
