//! Best-effort template loading.
//!
//! # Responsibility
//! - Fetch a named template and import it into `ResumeData`.
//!
//! # Invariants
//! - Loading never returns an error: fetch failures, non-success statuses and
//!   import failures all yield `None`, and callers pick their own default.

mod importer;
mod source;

pub use importer::{decode_export, ExportFileImporter, ImportError, ResumeImporter};
pub use source::{
    DirTemplateSource, StaticTemplateSource, TemplateFetchError, TemplateResponse,
    TemplateSource, STATUS_BAD_REQUEST, STATUS_NOT_FOUND, STATUS_OK,
};

use crate::config::TemplateConfig;
use crate::model::resume::ResumeData;
use log::{info, warn};

pub struct TemplateLoader<S: TemplateSource, I: ResumeImporter = ExportFileImporter> {
    source: S,
    importer: I,
    config: TemplateConfig,
}

impl<S: TemplateSource> TemplateLoader<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            importer: ExportFileImporter,
            config: TemplateConfig::default(),
        }
    }
}

impl<S: TemplateSource, I: ResumeImporter> TemplateLoader<S, I> {
    pub fn with_importer<I2: ResumeImporter>(self, importer: I2) -> TemplateLoader<S, I2> {
        TemplateLoader {
            source: self.source,
            importer,
            config: self.config,
        }
    }

    pub fn with_config(mut self, config: TemplateConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &TemplateConfig {
        &self.config
    }

    /// Loads the template configured as default (`/template.json`).
    pub fn load_default_template(&self) -> Option<ResumeData> {
        self.load_template_from(&self.config.default_path)
    }

    /// Loads the filled-in example template (`/example.json`).
    pub fn load_example_template(&self) -> Option<ResumeData> {
        self.load_template_from(&self.config.example_path)
    }

    pub fn load_template_from(&self, path: &str) -> Option<ResumeData> {
        let response = match self.source.fetch(path) {
            Ok(response) => response,
            Err(err) => {
                warn!("event=template_load module=template status=error stage=fetch path={path} error={err}");
                return None;
            }
        };
        if !response.is_success() {
            warn!(
                "event=template_load module=template status=error stage=fetch path={path} http_status={}",
                response.status
            );
            return None;
        }

        match self.importer.import(&response.body) {
            Ok(data) => {
                info!("event=template_load module=template status=ok path={path}");
                Some(data)
            }
            Err(err) => {
                warn!("event=template_load module=template status=error stage=import path={path} error={err}");
                None
            }
        }
    }
}
