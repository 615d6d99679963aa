//! CardInk Core Library
//!
//! Platform-agnostic block editing engine for the CardInk two-sided
//! card editor: positioned text blocks over a background design, with
//! bounded undo/redo, a scale-aware drag transform and an inline
//! text-editing session.

pub mod blocks;
pub mod design;
pub mod editor;
pub mod fonts;
pub mod history;
pub mod input;
pub mod measure;
pub mod print;
pub mod snapshot;
pub mod store;
pub mod viewport;

pub use blocks::{Align, Block, BlockId, FontWeight, ImageBlock, TextBlock};
pub use design::{Background, BackgroundMode, CardDesign, CardFace, DesignKey, SerializableColor};
pub use editor::{CardEditor, EngineState};
pub use fonts::{FONT_SIZE_MAX, FONT_SIZE_MIN, FontKey};
pub use history::{DEFAULT_MAX_HISTORY, History};
pub use input::{HistoryShortcut, KeyEvent, Modifiers, PointerButton, PointerEvent};
pub use measure::{FixedMeasure, Measure};
pub use print::{CARD_BASE_H, CARD_BASE_W};
pub use snapshot::{
    MemorySnapshotStore, SnapshotError, SnapshotPayload, SnapshotResult, SnapshotStore,
};
pub use store::{BlockStore, TextStylePatch};
pub use viewport::{FitOptions, Viewport, fit_scale};
