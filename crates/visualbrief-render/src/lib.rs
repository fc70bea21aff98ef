//! VisualBrief Document Rendering
//!
//! Deterministic layout of a [`CreativeBrief`] on A4 pages and serialization of
//! the result as PDF.
//!
//! Layout and serialization are separate steps: [`render`] produces a
//! [`RenderedDocument`] whose text positions can be inspected, and
//! [`render_pdf`] writes that document with `lopdf`.

pub mod brief;
pub mod error;
pub mod layout;
pub mod metrics;
pub mod pdf;

pub use brief::BriefRenderer;
pub use error::RenderError;
pub use layout::{PageGeometry, RenderedDocument};

use visualbrief_core::CreativeBrief;

/// Lay out the brief.
pub fn render(brief: &CreativeBrief) -> RenderedDocument {
    BriefRenderer::default().render(brief)
}

/// Lay out the brief and write it as PDF.
pub fn render_pdf(brief: &CreativeBrief) -> Result<Vec<u8>, RenderError> {
    let document = render(brief);
    tracing::info!(
        pages = document.page_count(),
        image_count = brief.meta.image_count,
        "Rendering creative brief"
    );
    pdf::write_pdf(&document)
}
