//! Template transport.
//!
//! A source answers a path with a status and a body, the way a static file
//! server does. Only `fetch` errors are transport failures; a missing file is
//! a regular 404 response.

use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

pub const STATUS_OK: u16 = 200;
pub const STATUS_BAD_REQUEST: u16 = 400;
pub const STATUS_NOT_FOUND: u16 = 404;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateResponse {
    pub status: u16,
    pub body: String,
}

impl TemplateResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: STATUS_OK,
            body: body.into(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport failure while fetching a template.
#[derive(Debug)]
pub struct TemplateFetchError {
    pub path: String,
    pub message: String,
}

impl Display for TemplateFetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "failed to fetch template `{}`: {}", self.path, self.message)
    }
}

impl Error for TemplateFetchError {}

pub trait TemplateSource {
    fn fetch(&self, path: &str) -> Result<TemplateResponse, TemplateFetchError>;
}

/// Serves templates from files below a root directory.
///
/// `/template.json` maps to `<root>/template.json`. Paths escaping the root
/// answer 400.
#[derive(Debug, Clone)]
pub struct DirTemplateSource {
    root: PathBuf,
}

impl DirTemplateSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));
        let confined = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)));
        if !confined || relative.as_os_str().is_empty() {
            return None;
        }
        Some(self.root.join(relative))
    }
}

impl TemplateSource for DirTemplateSource {
    fn fetch(&self, path: &str) -> Result<TemplateResponse, TemplateFetchError> {
        let Some(file) = self.resolve(path) else {
            return Ok(TemplateResponse::status(STATUS_BAD_REQUEST));
        };
        match std::fs::read_to_string(&file) {
            Ok(body) => Ok(TemplateResponse::ok(body)),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Ok(TemplateResponse::status(STATUS_NOT_FOUND))
            }
            Err(err) => Err(TemplateFetchError {
                path: path.to_string(),
                message: err.to_string(),
            }),
        }
    }
}

/// In-memory templates keyed by path, e.g. templates bundled at build time.
#[derive(Debug, Clone, Default)]
pub struct StaticTemplateSource {
    files: HashMap<String, String>,
}

impl StaticTemplateSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<String>, body: impl Into<String>) -> Self {
        self.files.insert(path.into(), body.into());
        self
    }
}

impl TemplateSource for StaticTemplateSource {
    fn fetch(&self, path: &str) -> Result<TemplateResponse, TemplateFetchError> {
        Ok(match self.files.get(path) {
            Some(body) => TemplateResponse::ok(body.clone()),
            None => TemplateResponse::status(STATUS_NOT_FOUND),
        })
    }
}

impl<T: TemplateSource + ?Sized> TemplateSource for &T {
    fn fetch(&self, path: &str) -> Result<TemplateResponse, TemplateFetchError> {
        (**self).fetch(path)
    }
}
