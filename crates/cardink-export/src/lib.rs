//! Export bridge for CardInk.
//!
//! Rendering blocks and a background into an actual raster image is an
//! external capability behind the [`CardRenderer`] trait; this crate
//! owns the contract around it: the bridge hands the renderer the
//! *committed* block list at the fixed logical canvas size, waits for
//! fonts to be ready first, and propagates render failure without
//! touching any edit state.

mod bridge;

pub use bridge::{
    CardRenderer, ExportError, ExportFormat, ExportOptions, ExportResult, Exporter,
    FontReadiness, FontsAlwaysReady,
};
