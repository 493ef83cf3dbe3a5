//! Embedded static resources.
//!
//! # Module Structure
//!
//! - `template` - Template types for typed variable injection
//! - `layout` - The page shell every generated page is rendered into
//!
//! # Usage
//!
//! ```ignore
//! use embed::layout::{LAYOUT_HTML, LayoutVars};
//!
//! let html = LAYOUT_HTML.render(&LayoutVars { title: "Post".into(), ..Default::default() });
//! ```

mod template;

pub use template::{Template, TemplateVars};

pub mod layout {
    use super::{Template, TemplateVars};

    /// Variables for layout.html.
    ///
    /// Text fields must already be HTML-escaped; `head`, `main` and
    /// `scripts` are raw markup.
    #[derive(Debug, Default)]
    pub struct LayoutVars {
        pub title: String,
        pub description: String,
        pub site_title: String,
        pub site_description: String,
        /// Link target of the header, the blog index.
        pub home: String,
        pub head: String,
        pub main: String,
        pub scripts: String,
    }

    impl TemplateVars for LayoutVars {
        fn vars(&self) -> Vec<(&'static str, &str)> {
            vec![
                ("TITLE", self.title.as_str()),
                ("DESCRIPTION", self.description.as_str()),
                ("SITE_TITLE", self.site_title.as_str()),
                ("SITE_DESCRIPTION", self.site_description.as_str()),
                ("HOME", self.home.as_str()),
                ("HEAD", self.head.as_str()),
                ("MAIN", self.main.as_str()),
                ("SCRIPTS", self.scripts.as_str()),
            ]
        }
    }

    /// HTML page shell.
    pub const LAYOUT_HTML: Template<LayoutVars> =
        Template::new(include_str!("layout.html"));

}
