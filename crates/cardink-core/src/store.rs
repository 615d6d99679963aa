//! Block store: the canonical block list for one card face.
//!
//! Wraps [`History`] with `S = Vec<Block>` and encodes the preview vs
//! commit discipline per operation:
//!
//! | operation           | history effect                         |
//! |---------------------|----------------------------------------|
//! | `preview_text`      | none (per keystroke)                   |
//! | `commit_text`       | one entry, skipped when text unchanged |
//! | `update_font`       | one entry                              |
//! | `update_text_style` | none (live toolbar interaction)        |
//! | `add_block`         | one entry                              |
//! | `remove_block`      | one entry                              |
//! | `update_font_size`  | one entry per call (spinner click)     |
//!
//! Operations that reference a block id no longer present are silent
//! no-ops: ids can transiently go stale across face switches, and the
//! store prefers robustness over surfacing that at the input boundary.
//! A store built from a non-editable face template rejects every
//! mutation the same way.

use crate::blocks::{Align, Block, BlockId, FontWeight, TextBlock};
use crate::design::FaceTemplate;
use crate::fonts::{FontKey, clamp_font_size};
use crate::history::History;
use kurbo::Point;

/// Partial style update applied by the quick toolbar.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextStylePatch {
    pub font_size: Option<u32>,
    pub font_weight: Option<FontWeight>,
    pub align: Option<Align>,
}

/// Canonical block list for one card face, with bounded undo history.
#[derive(Debug, Clone)]
pub struct BlockStore {
    history: History<Vec<Block>>,
    editable: bool,
}

impl BlockStore {
    /// Spawn position for blocks created by `add_block`.
    const NEW_BLOCK_POSITION: Point = Point::new(100.0, 100.0);

    /// Build a store from a face template.
    pub fn from_template(template: FaceTemplate) -> Self {
        Self {
            history: History::new(template.blocks),
            editable: template.editable,
        }
    }

    /// Build an editable store over an explicit block list.
    pub fn new(blocks: Vec<Block>) -> Self {
        Self {
            history: History::new(blocks),
            editable: true,
        }
    }

    /// Whether this face accepts mutations.
    pub fn is_editable(&self) -> bool {
        self.editable
    }

    /// The current block list.
    pub fn blocks(&self) -> &[Block] {
        self.history.present()
    }

    /// Find a block by id.
    pub fn find(&self, id: BlockId) -> Option<&Block> {
        self.blocks().iter().find(|b| b.id() == id)
    }

    /// Find a text block by id.
    pub fn find_text(&self, id: BlockId) -> Option<&TextBlock> {
        self.find(id).and_then(Block::as_text)
    }

    /// Replace the live text of a block without recording history.
    /// Safe to call on every keystroke.
    pub fn preview_text(&mut self, id: BlockId, text: &str) {
        if !self.editable || self.find_text(id).is_none() {
            return;
        }
        self.history.set_with(|blocks| {
            if let Some(t) = find_text_mut(blocks, id) {
                t.text = text.to_owned();
            }
        });
    }

    /// Commit the text of a block as one undo step. Committing the text
    /// a block already has is a no-op, so no empty history entries.
    pub fn commit_text(&mut self, id: BlockId, text: &str) {
        if !self.editable {
            return;
        }
        match self.find_text(id) {
            Some(t) if t.text != text => {}
            _ => return,
        }
        self.history.commit_with(|blocks| {
            if let Some(t) = find_text_mut(blocks, id) {
                t.text = text.to_owned();
            }
        });
    }

    /// Change a block's font family. Discrete action, always committed.
    pub fn update_font(&mut self, id: BlockId, font_key: FontKey) {
        if !self.editable || self.find_text(id).is_none() {
            return;
        }
        self.history.commit_with(|blocks| {
            if let Some(t) = find_text_mut(blocks, id) {
                t.font_key = font_key;
            }
        });
    }

    /// Apply a partial style patch without recording history. Used for
    /// live toolbar interactions; the caller decides when to commit.
    pub fn update_text_style(&mut self, id: BlockId, patch: TextStylePatch) {
        if !self.editable || self.find_text(id).is_none() {
            return;
        }
        self.history.set_with(|blocks| {
            if let Some(t) = find_text_mut(blocks, id) {
                if let Some(size) = patch.font_size {
                    t.font_size = clamp_font_size(size as i64);
                }
                if let Some(weight) = patch.font_weight {
                    t.font_weight = weight;
                }
                if let Some(align) = patch.align {
                    t.align = align;
                }
            }
        });
    }

    /// Append a new text block with fixed defaults. Returns the fresh id.
    pub fn add_block(&mut self) -> Option<BlockId> {
        if !self.editable {
            return None;
        }
        let block = TextBlock::new(Self::NEW_BLOCK_POSITION, "新しいテキスト");
        let id = block.id;
        log::debug!("add_block {id}");
        self.history.commit_with(|blocks| blocks.push(block.into()));
        Some(id)
    }

    /// Remove a block as one undo step.
    pub fn remove_block(&mut self, id: BlockId) {
        if !self.editable || self.find(id).is_none() {
            return;
        }
        self.history.commit_with(|blocks| blocks.retain(|b| b.id() != id));
    }

    /// Set a block's font size as one discrete undo step per call.
    ///
    /// The pre-operation list is committed first and the new value is
    /// then applied outside history. A held spinner button can keep
    /// re-applying via `update_text_style` and still cost one undo step
    /// per click.
    pub fn update_font_size(&mut self, id: BlockId, size: f64) {
        if !self.editable || self.find_text(id).is_none() {
            return;
        }
        let before = self.history.present().clone();
        self.history.commit(before);
        let next = clamp_font_size(size.round() as i64);
        self.history.set_with(|blocks| {
            if let Some(t) = find_text_mut(blocks, id) {
                t.font_size = next;
            }
        });
    }

    /// Nudge a block's font size by a delta, clamped to the valid range.
    pub fn bump_font_size(&mut self, id: BlockId, delta: i32) {
        let current = self
            .find_text(id)
            .map(|t| t.font_size)
            .unwrap_or(TextBlock::DEFAULT_FONT_SIZE);
        self.update_font_size(id, current as f64 + delta as f64);
    }

    /// Replace the whole block list without recording history. Used by
    /// the drag engine for per-frame position updates.
    pub fn set_blocks(&mut self, blocks: Vec<Block>) {
        if !self.editable {
            return;
        }
        self.history.set(blocks);
    }

    /// Update one block's position without recording history.
    pub fn set_position(&mut self, id: BlockId, position: Point) {
        if !self.editable {
            return;
        }
        self.history.set_with(|blocks| {
            if let Some(b) = blocks.iter_mut().find(|b| b.id() == id) {
                b.set_position(position);
            }
        });
    }

    /// Commit an explicit block list as one undo step. Used by the drag
    /// engine to flush the pre-drag snapshot on first movement.
    pub fn commit_blocks(&mut self, blocks: Vec<Block>) {
        if !self.editable {
            return;
        }
        self.history.commit(blocks);
    }

    /// Step back one undo step.
    pub fn undo(&mut self) -> bool {
        self.history.undo()
    }

    /// Step forward one redo step.
    pub fn redo(&mut self) -> bool {
        self.history.redo()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Depth of the undo stack. Exposed for tests and UI badges.
    pub fn past_len(&self) -> usize {
        self.history.past_len()
    }

    /// Depth of the redo stack.
    pub fn future_len(&self) -> usize {
        self.history.future_len()
    }

    /// Drop all history, keeping the current block list.
    pub fn clear_history(&mut self) {
        self.history.clear(None);
    }
}

fn find_text_mut(blocks: &mut [Block], id: BlockId) -> Option<&mut TextBlock> {
    blocks
        .iter_mut()
        .find(|b| b.id() == id)
        .and_then(Block::as_text_mut)
}
