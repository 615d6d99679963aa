//! Injected geometry measurement.
//!
//! The drag engine needs the on-screen bounding box of the block under
//! the pointer to clamp its position against the canvas edge. Real
//! deployments measure the rendered element; tests and headless use
//! inject fixed sizes. Sizes are in screen pixels, so callers divide by
//! the viewport scale before comparing against logical bounds.

use crate::blocks::BlockId;
use kurbo::Size;
use std::collections::HashMap;

/// Provides the on-screen bounding box of a rendered block.
pub trait Measure {
    /// Width/height of the block's rendered box in screen pixels, or
    /// None when the block has no rendered element (yet).
    fn block_size(&self, id: BlockId) -> Option<Size>;
}

/// Measurement provider backed by a fixed map. For tests and headless
/// use.
#[derive(Debug, Clone, Default)]
pub struct FixedMeasure {
    sizes: HashMap<BlockId, Size>,
}

impl FixedMeasure {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a block's rendered size.
    pub fn insert(&mut self, id: BlockId, size: Size) {
        self.sizes.insert(id, size);
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, id: BlockId, size: Size) -> Self {
        self.insert(id, size);
        self
    }
}

impl Measure for FixedMeasure {
    fn block_size(&self, id: BlockId) -> Option<Size> {
        self.sizes.get(&id).copied()
    }
}
