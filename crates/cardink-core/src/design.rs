//! Background designs and face templates.
//!
//! One design carries a background plus an initial block list per card
//! face, each with its own editability policy. In the shipped catalog
//! the front is a fixed template and the back is user-editable, but the
//! engine reads the policy off the template instead of assuming that
//! asymmetry.

use crate::blocks::{Block, FontWeight, TextBlock};
use kurbo::Point;
use peniko::Color;
use serde::{Deserialize, Serialize};

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`. Anything else falls back
    /// to white, matching the "background color or default" behavior of
    /// the design catalog.
    pub fn from_hex(hex: &str) -> Self {
        Self::try_from_hex(hex).unwrap_or_else(Self::white)
    }

    fn try_from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#')?;
        if !hex.is_ascii() {
            return None;
        }
        match hex.len() {
            3 => {
                let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
                let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
                let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
                Some(Self::new(r, g, b, 255))
            }
            6 | 8 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                let a = if hex.len() == 8 {
                    u8::from_str_radix(&hex[6..8], 16).ok()?
                } else {
                    255
                };
                Some(Self::new(r, g, b, a))
            }
            _ => None,
        }
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// How a background image is fitted into the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundMode {
    #[default]
    Cover,
    Contain,
}

/// Background descriptor for one design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Background {
    pub color: SerializableColor,
    /// Asset path of an optional background image.
    pub image: Option<String>,
    pub mode: BackgroundMode,
}

impl Background {
    /// A plain color background.
    pub fn solid(color: SerializableColor) -> Self {
        Self {
            color,
            image: None,
            mode: BackgroundMode::default(),
        }
    }

    /// A background image over a base color.
    pub fn with_image(color: SerializableColor, image: impl Into<String>, mode: BackgroundMode) -> Self {
        Self {
            color,
            image: Some(image.into()),
            mode,
        }
    }
}

/// Catalog key for a background design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DesignKey {
    #[default]
    Plain,
    Girl,
    Kinmokusei,
    UsaCarrot,
}

impl DesignKey {
    /// All catalog entries.
    pub fn all() -> &'static [DesignKey] {
        &[
            DesignKey::Plain,
            DesignKey::Girl,
            DesignKey::Kinmokusei,
            DesignKey::UsaCarrot,
        ]
    }
}

/// Initial block list for one card face, with its editability policy.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceTemplate {
    pub editable: bool,
    pub blocks: Vec<Block>,
}

impl FaceTemplate {
    /// A fixed face with the given blocks.
    pub fn fixed(blocks: Vec<Block>) -> Self {
        Self {
            editable: false,
            blocks,
        }
    }

    /// A user-editable face with the given starter blocks.
    pub fn editable(blocks: Vec<Block>) -> Self {
        Self {
            editable: true,
            blocks,
        }
    }
}

/// One background design: background plus both face templates.
#[derive(Debug, Clone, PartialEq)]
pub struct CardDesign {
    pub background: Background,
    pub front: FaceTemplate,
    pub back: FaceTemplate,
}

impl CardDesign {
    /// Pure lookup from the design catalog. Block ids are generated
    /// fresh per call, so two cards from the same design never share
    /// ids.
    pub fn for_key(key: DesignKey) -> Self {
        match key {
            DesignKey::Plain => Self {
                background: Background::solid(SerializableColor::from_hex("#e2c7a3")),
                front: FaceTemplate::fixed(Vec::new()),
                back: FaceTemplate::editable(starter_blocks()),
            },
            DesignKey::Girl => Self {
                background: Background::with_image(
                    SerializableColor::from_hex("#e9edf5"),
                    "/girl.png",
                    BackgroundMode::Cover,
                ),
                front: FaceTemplate::fixed(Vec::new()),
                back: FaceTemplate::editable(starter_blocks()),
            },
            DesignKey::Kinmokusei => Self {
                background: Background::with_image(
                    SerializableColor::from_hex("#fff5e5"),
                    "/kinmokusei.png",
                    BackgroundMode::Cover,
                ),
                front: FaceTemplate::fixed(Vec::new()),
                back: FaceTemplate::editable(starter_blocks()),
            },
            DesignKey::UsaCarrot => Self {
                background: Background::with_image(
                    SerializableColor::from_hex("#ffffff"),
                    "/usa-carrot.png",
                    BackgroundMode::Contain,
                ),
                front: FaceTemplate::fixed(Vec::new()),
                back: FaceTemplate::editable(starter_blocks()),
            },
        }
    }
}

/// One side of the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardFace {
    #[default]
    Front,
    Back,
}

/// Starter name/title blocks for editable back faces.
fn starter_blocks() -> Vec<Block> {
    vec![
        TextBlock::new(Point::new(100.0, 120.0), "山田 太郎")
            .with_font_size(24)
            .with_font_weight(FontWeight::Bold)
            .into(),
        TextBlock::new(Point::new(100.0, 80.0), "デザイナー / Designer")
            .with_font_size(18)
            .into(),
    ]
}
