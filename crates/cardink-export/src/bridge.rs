//! Renderer trait and export orchestration.

use cardink_core::blocks::Block;
use cardink_core::design::Background;
use cardink_core::editor::CardEditor;
use cardink_core::measure::Measure;
use thiserror::Error;

/// Output image format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Png,
    Jpeg,
}

impl ExportFormat {
    /// File extension for downloads.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpeg",
        }
    }
}

/// Export quality knobs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportOptions {
    /// Output pixels per logical pixel. 2.0 doubles the logical canvas
    /// resolution for crisp print-ready output.
    pub pixel_ratio: f64,
    /// Encoder quality in 0..=1. Only meaningful for Jpeg.
    pub quality: f64,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            pixel_ratio: 2.0,
            quality: 0.92,
        }
    }
}

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Fonts are not ready for export")]
    FontsNotReady,
    #[error("Render failed: {0}")]
    Render(String),
}

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// External raster renderer.
///
/// Implementations must render at the fixed logical canvas size
/// ([`cardink_core::print::CARD_BASE_W`] ×
/// [`cardink_core::print::CARD_BASE_H`], times `pixel_ratio`),
/// independent of whatever display scale the card is shown at.
pub trait CardRenderer {
    fn render(
        &self,
        blocks: &[Block],
        background: &Background,
        format: ExportFormat,
        options: &ExportOptions,
    ) -> ExportResult<Vec<u8>>;
}

/// Signal that the fonts referenced by the card are loaded, so exported
/// text uses the correct typeface metrics.
pub trait FontReadiness {
    fn ready(&self) -> bool;
}

/// Font readiness for environments where fonts are bundled and always
/// available.
#[derive(Debug, Clone, Copy, Default)]
pub struct FontsAlwaysReady;

impl FontReadiness for FontsAlwaysReady {
    fn ready(&self) -> bool {
        true
    }
}

/// Export bridge over a renderer and a font-readiness signal.
#[derive(Debug, Clone)]
pub struct Exporter<R, F> {
    renderer: R,
    fonts: F,
}

impl<R: CardRenderer> Exporter<R, FontsAlwaysReady> {
    /// Bridge over a renderer with bundled fonts.
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            fonts: FontsAlwaysReady,
        }
    }
}

impl<R: CardRenderer, F: FontReadiness> Exporter<R, F> {
    /// Bridge over a renderer and an explicit font-readiness signal.
    pub fn with_fonts(renderer: R, fonts: F) -> Self {
        Self { renderer, fonts }
    }

    /// Render a committed block list to image bytes.
    ///
    /// The caller is responsible for passing committed state; use
    /// [`export_editor`](Self::export_editor) to resolve a live editor
    /// session first.
    pub fn export(
        &self,
        blocks: &[Block],
        background: &Background,
        format: ExportFormat,
        options: &ExportOptions,
    ) -> ExportResult<Vec<u8>> {
        if !self.fonts.ready() {
            return Err(ExportError::FontsNotReady);
        }
        self.renderer
            .render(blocks, background, format, options)
            .inspect_err(|e| log::warn!("export failed: {e}"))
    }

    /// Export the face currently being edited. Any in-flight edit is
    /// committed first so the renderer never sees a live preview; a
    /// failed render leaves block and history state untouched beyond
    /// that resolution.
    pub fn export_editor<M: Measure>(
        &self,
        editor: &mut CardEditor<M>,
        format: ExportFormat,
        options: &ExportOptions,
    ) -> ExportResult<Vec<u8>> {
        let blocks = editor.export_blocks();
        let background = editor.background().clone();
        self.export(&blocks, &background, format, options)
    }
}
