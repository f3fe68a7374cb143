pub mod svg;

use thiserror::Error;

use glyphwork_core::surface::Scene;

/// Writes a rendered scene somewhere.
pub trait Exporter {
    fn export_scene(&self, scene: &Scene) -> Result<(), Error>;
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Render error: {0}")]
    Render(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
