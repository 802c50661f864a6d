//! HTML page templates.
//!
//! Pages are plain HTML files with `{{key}}` placeholders. The five pages
//! the site needs ship inside the binary; a directory of `*.html` files
//! can override any of them by file stem (`login.html` → `login`).
//!
//! Every substituted value is HTML-escaped. Display names come straight
//! from visitors.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Greeting for a logged-in visitor. Placeholders: `name`.
pub const GREETINGS: &str = "greetings";
/// Login form. Placeholders: `prompt`, `name`.
pub const LOGIN: &str = "login";
/// Shown after logout.
pub const LOGGED_OUT: &str = "logged-out";
/// Clock page. Placeholders: `time`, `salutation`.
pub const TIME: &str = "time";
/// Fallback page. Placeholders: `path`.
pub const NOT_FOUND: &str = "404";

const BUILTIN: [(&str, &str); 5] = [
    (GREETINGS, include_str!("../templates/greetings.html")),
    (LOGIN, include_str!("../templates/login.html")),
    (LOGGED_OUT, include_str!("../templates/logged-out.html")),
    (TIME, include_str!("../templates/time.html")),
    (NOT_FOUND, include_str!("../templates/404.html")),
];

/// Errors from loading or rendering templates.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// No template is registered under this name.
    #[error("template not found: {0}")]
    NotFound(String),

    /// Reading the template directory or one of its files failed.
    #[error("failed to load templates from {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A set of named templates.
#[derive(Debug, Clone)]
pub struct Templates {
    pages: HashMap<String, String>,
}

impl Templates {
    /// The templates compiled into the binary.
    pub fn builtin() -> Self {
        let pages = BUILTIN
            .iter()
            .map(|(name, body)| ((*name).to_string(), (*body).to_string()))
            .collect();
        Self { pages }
    }

    /// Loads every `*.html` file in `dir` on top of the built-in set.
    ///
    /// # Errors
    /// Returns [`TemplateError::Load`] if the directory or a file in it
    /// cannot be read.
    pub fn load(dir: &Path) -> Result<Self, TemplateError> {
        let mut templates = Self::builtin();
        for entry in std::fs::read_dir(dir).map_err(load_err(dir))? {
            let path = entry.map_err(load_err(dir))?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("html") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let body = std::fs::read_to_string(&path).map_err(load_err(&path))?;
            tracing::debug!(template = name, path = %path.display(), "loaded template");
            templates.insert(name, body);
        }

        Ok(templates)
    }

    /// Registers (or replaces) a template.
    pub fn insert(&mut self, name: &str, body: impl Into<String>) {
        self.pages.insert(name.to_string(), body.into());
    }

    /// Renders template `name`, filling `{{key}}` placeholders from `vars`.
    ///
    /// Placeholders with no matching entry render as empty text.
    ///
    /// # Errors
    /// Returns [`TemplateError::NotFound`] for an unknown template name.
    pub fn render(
        &self,
        name: &str,
        vars: &[(&str, &str)],
    ) -> Result<String, TemplateError> {
        let body = self
            .pages
            .get(name)
            .ok_or_else(|| TemplateError::NotFound(name.to_string()))?;

        let mut out = String::with_capacity(body.len());
        let mut rest = body.as_str();

        while let Some(open) = rest.find("{{") {
            let Some(close) = rest[open + 2..].find("}}") else {
                break;
            };
            out.push_str(&rest[..open]);

            let key = rest[open + 2..open + 2 + close].trim();
            if let Some((_, value)) = vars.iter().find(|(k, _)| *k == key) {
                escape_into(&mut out, value);
            }

            rest = &rest[open + 2 + close + 2..];
        }
        out.push_str(rest);

        Ok(out)
    }
}

fn load_err(path: &Path) -> impl FnOnce(std::io::Error) -> TemplateError {
    let path = path.to_path_buf();
    move |source| TemplateError::Load { path, source }
}

impl Default for Templates {
    fn default() -> Self {
        Self::builtin()
    }
}

fn escape_into(out: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}
