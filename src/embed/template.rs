//! Template types for typed variable injection.

use std::marker::PhantomData;

/// Trait for template variable sets
pub trait TemplateVars {
    /// `(NAME, value)` pairs; `__NAME__` in the template is replaced by value.
    fn vars(&self) -> Vec<(&'static str, &str)>;
}

/// Template with typed variable injection
#[derive(Debug, Clone, Copy)]
pub struct Template<V> {
    content: &'static str,
    _marker: PhantomData<V>,
}

impl<V> Template<V> {
    pub const fn new(content: &'static str) -> Self {
        Self {
            content,
            _marker: PhantomData,
        }
    }
}

impl<V: TemplateVars> Template<V> {
    pub fn render(&self, vars: &V) -> String {
        substitute(self.content, &vars.vars())
    }
}

/// Replace `__NAME__` placeholders in a single pass.
///
/// Substituted values are never scanned again, so a value that happens to
/// contain a placeholder is emitted as-is.
pub fn substitute(content: &str, vars: &[(&str, &str)]) -> String {
    let extra: usize = vars.iter().map(|(_, v)| v.len()).sum();
    let mut out = String::with_capacity(content.len() + extra);
    let mut rest = content;

    while let Some(start) = rest.find("__") {
        let after = &rest[start + 2..];
        let hit = vars.iter().find(|(name, _)| {
            after.starts_with(name) && after[name.len()..].starts_with("__")
        });
        match hit {
            Some((name, value)) => {
                out.push_str(&rest[..start]);
                out.push_str(value);
                rest = &after[name.len() + 2..];
            }
            None => {
                out.push_str(&rest[..start + 2]);
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
