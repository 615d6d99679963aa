//! Block definitions for card faces.
//!
//! A block is a positioned content unit on one card face. Positions are
//! in logical canvas coordinates (see [`crate::print`]), never screen
//! pixels. `Image` exists as an anticipated variant; only `Text` has
//! editing behavior today, but every consumer matches exhaustively so
//! the variant cannot be silently dropped.

use crate::fonts::{FontKey, clamp_font_size};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable unique identifier for a block. Assigned at creation, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(Uuid);

impl BlockId {
    /// Generate a fresh id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BlockId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BlockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Font weight options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    /// Regular weight (default).
    #[default]
    Normal,
    /// Bold weight.
    Bold,
}

impl FontWeight {
    /// Toggle between Normal and Bold.
    pub fn toggled(self) -> Self {
        match self {
            FontWeight::Normal => FontWeight::Bold,
            FontWeight::Bold => FontWeight::Normal,
        }
    }
}

/// Horizontal text alignment, used by the quick toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// A positioned text block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    pub id: BlockId,
    /// The text content (may be empty).
    pub text: String,
    /// Top-left position in logical canvas coordinates.
    pub position: Point,
    /// Font size in logical pixels, always within 8..=72.
    pub font_size: u32,
    pub font_weight: FontWeight,
    pub font_key: FontKey,
    #[serde(default)]
    pub align: Align,
}

impl TextBlock {
    /// Default font size for new blocks.
    pub const DEFAULT_FONT_SIZE: u32 = 16;

    /// Create a new text block with default styling.
    pub fn new(position: Point, text: impl Into<String>) -> Self {
        Self {
            id: BlockId::new(),
            text: text.into(),
            position,
            font_size: Self::DEFAULT_FONT_SIZE,
            font_weight: FontWeight::default(),
            font_key: FontKey::default(),
            align: Align::default(),
        }
    }

    /// Set the font size (clamped to the allowed range).
    pub fn with_font_size(mut self, size: u32) -> Self {
        self.font_size = clamp_font_size(size as i64);
        self
    }

    /// Set the font weight.
    pub fn with_font_weight(mut self, weight: FontWeight) -> Self {
        self.font_weight = weight;
        self
    }

    /// Set the font family key.
    pub fn with_font_key(mut self, key: FontKey) -> Self {
        self.font_key = key;
        self
    }

    /// Set the alignment.
    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }
}

/// An anticipated image block. Carried as data only; no editing
/// behavior is attached to it yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageBlock {
    pub id: BlockId,
    /// Asset reference.
    pub src: String,
    /// Top-left position in logical canvas coordinates.
    pub position: Point,
    pub width: f64,
    pub height: f64,
}

/// A positioned content unit on one card face.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Block {
    Text(TextBlock),
    Image(ImageBlock),
}

impl Block {
    /// The block's stable id.
    pub fn id(&self) -> BlockId {
        match self {
            Block::Text(t) => t.id,
            Block::Image(i) => i.id,
        }
    }

    /// Top-left position in logical canvas coordinates.
    pub fn position(&self) -> Point {
        match self {
            Block::Text(t) => t.position,
            Block::Image(i) => i.position,
        }
    }

    /// Move the block to a new logical position.
    pub fn set_position(&mut self, position: Point) {
        match self {
            Block::Text(t) => t.position = position,
            Block::Image(i) => i.position = position,
        }
    }

    /// Borrow as a text block, if this is one.
    pub fn as_text(&self) -> Option<&TextBlock> {
        match self {
            Block::Text(t) => Some(t),
            Block::Image(_) => None,
        }
    }

    /// Mutably borrow as a text block, if this is one.
    pub fn as_text_mut(&mut self) -> Option<&mut TextBlock> {
        match self {
            Block::Text(t) => Some(t),
            Block::Image(_) => None,
        }
    }
}

impl From<TextBlock> for Block {
    fn from(t: TextBlock) -> Self {
        Block::Text(t)
    }
}

impl From<ImageBlock> for Block {
    fn from(i: ImageBlock) -> Self {
        Block::Image(i)
    }
}
