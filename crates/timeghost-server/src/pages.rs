//! HTML page rendering via `minijinja`.
//!
//! Templates are read from disk once at startup so the copy and styling
//! can be edited without recompiling. Names end in `.html`, which turns on
//! minijinja's HTML auto-escaping.

use std::path::Path;

use minijinja::Environment;
use serde::Serialize;

/// Every template the server renders, plus the shared layout.
pub const TEMPLATES: &[&str] = &[
    "base.html",
    "timeghost.html",
    "pick.html",
    "raves.html",
    "error.html",
];

/// Errors from loading or rendering page templates.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// A template file could not be read.
    #[error("failed to read template {path}: {source}")]
    Read {
        /// Path of the template file.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A template failed to compile or render.
    #[error("template {name}: {source}")]
    Render {
        /// Template name.
        name: String,
        /// The underlying minijinja error.
        source: minijinja::Error,
    },
}

/// Pre-loaded page templates.
#[derive(Debug)]
pub struct Pages {
    env: Environment<'static>,
}

impl Pages {
    /// Load every template in [`TEMPLATES`] from `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Read`] for a missing file and
    /// [`TemplateError::Render`] for a template that does not compile.
    pub fn from_dir(dir: &Path) -> Result<Self, TemplateError> {
        let mut env = Environment::new();
        for name in TEMPLATES {
            let path = dir.join(name);
            let source = std::fs::read_to_string(&path).map_err(|source| TemplateError::Read {
                path: path.display().to_string(),
                source,
            })?;
            env.add_template_owned(*name, source)
                .map_err(|source| TemplateError::Render {
                    name: (*name).to_owned(),
                    source,
                })?;
        }
        Ok(Self { env })
    }

    /// Render a template with the given context.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Render`] if the template is unknown or
    /// rendering fails.
    pub fn render<S: Serialize>(&self, name: &str, context: S) -> Result<String, TemplateError> {
        self.env
            .get_template(name)
            .and_then(|template| template.render(context))
            .map_err(|source| TemplateError::Render {
                name: name.to_owned(),
                source,
            })
    }
}
