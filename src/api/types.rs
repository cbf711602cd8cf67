//! Shared types for the API layer.

use std::path::PathBuf;
use std::sync::Arc;

use crate::source::RecordSource;

/// Shared context for all API routes and middleware.
#[derive(Clone)]
pub struct ApiContext {
    /// Supplies a fresh record set for every dashboard request.
    pub source: Arc<dyn RecordSource>,
    /// Directory holding `index.html` and the page's scripts. `None`
    /// serves the API only.
    pub static_dir: Option<PathBuf>,
}

impl ApiContext {
    pub fn new(source: Arc<dyn RecordSource>) -> Self {
        Self {
            source,
            static_dir: None,
        }
    }

    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(dir.into());
        self
    }
}
