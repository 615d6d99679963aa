//! Card editor: drag engine and inline text editing session.
//!
//! Interaction state lives in a single [`EngineState`] enum, so
//! "dragging while editing" is unrepresentable. The model is
//! single-threaded and event-driven: every mutation runs to completion
//! inside one input-event handler, and the block list has exactly one
//! writer path (`set` or `commit`, chosen per operation).
//!
//! Drag history discipline: the pre-drag snapshot is captured at
//! pointer-down but only committed on the *first* move event. A
//! completed drag therefore costs exactly one undo step no matter how
//! many move events arrive, and a press-with-no-movement (plain
//! click-to-select) costs none.

use crate::blocks::{Block, BlockId};
use crate::design::{Background, CardDesign, CardFace, DesignKey};
use crate::input::{HistoryShortcut, KeyEvent, PointerEvent};
use crate::measure::Measure;
use crate::print::{CARD_BASE_H, CARD_BASE_W};
use crate::store::BlockStore;
use crate::viewport::Viewport;
use kurbo::{Point, Vec2};

/// Live drag state.
#[derive(Debug, Clone)]
pub struct DragState {
    /// The block under the pointer.
    pub block_id: BlockId,
    /// Pointer-to-block-origin offset in logical coordinates, captured
    /// at pointer-down so the block does not jump under the cursor.
    offset: Vec2,
    /// Whether any move event has been processed yet.
    moved: bool,
    /// Snapshot of the whole block list at pointer-down. Flushed to
    /// history on the first move, discarded on release.
    before: Vec<Block>,
}

/// Live inline-editing session.
#[derive(Debug, Clone)]
pub struct EditSession {
    /// The block being text-edited.
    pub block_id: BlockId,
    /// Text at session start, kept for cancellation.
    pub original_text: String,
}

/// Interaction state of the editor. At most one drag or one inline
/// edit can be active at a time.
#[derive(Debug, Clone, Default)]
pub enum EngineState {
    #[default]
    Idle,
    Dragging(DragState),
    Editing(EditSession),
}

/// The block editing engine for one card.
///
/// Owns one [`BlockStore`] per face (each with its template's
/// editability policy), the display transform, and the interaction
/// state machine. Geometry measurement is injected so the engine is
/// testable without a rendering surface.
#[derive(Debug, Clone)]
pub struct CardEditor<M: Measure> {
    design: DesignKey,
    background: Background,
    front: BlockStore,
    back: BlockStore,
    face: CardFace,
    viewport: Viewport,
    measure: M,
    active_block: Option<BlockId>,
    state: EngineState,
}

impl<M: Measure> CardEditor<M> {
    /// Create an editor over the given design, editing the back face
    /// first (the editable face in the shipped catalog).
    pub fn new(design: DesignKey, measure: M) -> Self {
        let CardDesign {
            background,
            front,
            back,
        } = CardDesign::for_key(design);
        Self {
            design,
            background,
            front: BlockStore::from_template(front),
            back: BlockStore::from_template(back),
            face: CardFace::Back,
            viewport: Viewport::default(),
            measure,
            active_block: None,
            state: EngineState::Idle,
        }
    }

    pub fn design(&self) -> DesignKey {
        self.design
    }

    pub fn background(&self) -> &Background {
        &self.background
    }

    pub fn face(&self) -> CardFace {
        self.face
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Update the display transform (scale-to-fit recomputation,
    /// container resize). Does not touch block state.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Replace the measurement provider (e.g. after a re-render).
    pub fn set_measure(&mut self, measure: M) {
        self.measure = measure;
    }

    /// The currently selected block, if any.
    pub fn active_block(&self) -> Option<BlockId> {
        self.active_block
    }

    /// The block list of the face being edited (live, including any
    /// uncommitted preview).
    pub fn blocks(&self) -> &[Block] {
        self.store().blocks()
    }

    /// The block store of the face being edited.
    pub fn store(&self) -> &BlockStore {
        match self.face {
            CardFace::Front => &self.front,
            CardFace::Back => &self.back,
        }
    }

    /// Mutable access to the active face's store, for discrete actions
    /// (font changes, add/remove) driven by panels.
    pub fn store_mut(&mut self) -> &mut BlockStore {
        match self.face {
            CardFace::Front => &mut self.front,
            CardFace::Back => &mut self.back,
        }
    }

    /// Switch which face is presented. Any in-flight edit is committed
    /// first; faces themselves are never destroyed.
    pub fn set_face(&mut self, face: CardFace) {
        self.resolve_session();
        self.face = face;
        self.active_block = None;
    }

    /// Switch the background design, rebuilding both faces from the new
    /// design's templates.
    pub fn set_design(&mut self, design: DesignKey) {
        self.resolve_session();
        let CardDesign {
            background,
            front,
            back,
        } = CardDesign::for_key(design);
        self.design = design;
        self.background = background;
        self.front = BlockStore::from_template(front);
        self.back = BlockStore::from_template(back);
        self.active_block = None;
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, EngineState::Dragging(_))
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, EngineState::Editing(_))
    }

    /// The block under an active inline-editing session, if any.
    pub fn editing_block(&self) -> Option<BlockId> {
        match &self.state {
            EngineState::Editing(session) => Some(session.block_id),
            _ => None,
        }
    }

    // --- pointer protocol -------------------------------------------------

    /// Route a pointer event. `hit` is the block under the pointer for
    /// down events (None = press on empty canvas).
    pub fn handle_pointer(&mut self, event: PointerEvent, hit: Option<BlockId>) {
        match event {
            PointerEvent::Down { position, .. } => match hit {
                Some(id) => self.pointer_down(id, position),
                None => self.pointer_down_outside(),
            },
            PointerEvent::Move { position } => self.pointer_move(position),
            PointerEvent::Up { .. } => self.pointer_up(),
            PointerEvent::Cancel => self.pointer_cancel(),
        }
    }

    /// Begin a potential drag on a block. While an inline edit is
    /// active, the in-flight edit is committed first; the press then
    /// proceeds as a normal drag-begin on the target.
    pub fn pointer_down(&mut self, id: BlockId, position: Point) {
        if self.is_dragging() {
            return;
        }
        if self.is_editing() {
            self.commit_editing();
        }
        self.active_block = Some(id);

        if !self.store().is_editable() {
            return;
        }
        let Some(block) = self.store().find(id) else {
            return;
        };
        let pointer_logical = self.viewport.screen_to_logical(position);
        let offset = pointer_logical - block.position();
        log::trace!("drag begin on {id}");
        self.state = EngineState::Dragging(DragState {
            block_id: id,
            offset,
            moved: false,
            before: self.store().blocks().to_vec(),
        });
    }

    /// Press on empty canvas: commit any in-flight edit and clear the
    /// selection.
    pub fn pointer_down_outside(&mut self) {
        if self.is_editing() {
            self.commit_editing();
        }
        self.active_block = None;
    }

    /// Follow the pointer during a drag. The first move flushes the
    /// pre-drag snapshot to history; every move applies the clamped
    /// position without recording history. A block with no rendered
    /// element yet cannot be clamped, so the frame is skipped outright.
    pub fn pointer_move(&mut self, position: Point) {
        let EngineState::Dragging(drag) = &mut self.state else {
            return;
        };
        let id = drag.block_id;
        let offset = drag.offset;
        let Some(size) = self.measure.block_size(id) else {
            return;
        };
        let baseline = if drag.moved {
            None
        } else {
            drag.moved = true;
            Some(std::mem::take(&mut drag.before))
        };
        if let Some(before) = baseline {
            log::debug!("drag committed pre-drag snapshot for {id}");
            self.store_mut().commit_blocks(before);
        }

        let pointer_logical = self.viewport.screen_to_logical(position);
        let raw = pointer_logical - offset;

        // Measured width comes back in screen pixels.
        let width = self.viewport.screen_len_to_logical(size.width);
        // The vertical clamp uses font size as a stand-in for block
        // height rather than a measured glyph box. Inherited
        // approximation: it prevents gross overflow, nothing more.
        let height = match self.store().find(id) {
            Some(Block::Text(t)) => t.font_size as f64,
            Some(Block::Image(i)) => i.height,
            None => return,
        };

        let max_x = (CARD_BASE_W - width).max(0.0);
        let max_y = (CARD_BASE_H - height).max(0.0);
        let clamped = Point::new(raw.x.clamp(0.0, max_x), raw.y.clamp(0.0, max_y));
        self.store_mut().set_position(id, clamped);
    }

    /// End a drag, discarding the pre-drag snapshot.
    pub fn pointer_up(&mut self) {
        if self.is_dragging() {
            log::trace!("drag end");
            self.state = EngineState::Idle;
        }
    }

    /// The pointer stream was interrupted; same as a clean end without
    /// a final clamp re-check.
    pub fn pointer_cancel(&mut self) {
        self.pointer_up();
    }

    // --- inline editing ---------------------------------------------------

    /// Start text-editing a block. Any previous session is committed
    /// first; stale ids, image blocks and non-editable faces are
    /// refused.
    pub fn start_editing(&mut self, id: BlockId) {
        if self.is_dragging() {
            return;
        }
        if self.is_editing() {
            self.commit_editing();
        }
        if !self.store().is_editable() {
            return;
        }
        let Some(original_text) = self.store().find_text(id).map(|t| t.text.clone()) else {
            return;
        };
        self.active_block = Some(id);
        self.state = EngineState::Editing(EditSession {
            block_id: id,
            original_text,
        });
    }

    /// Apply a keystroke's worth of text as a live preview. No history
    /// growth, no flicker.
    pub fn input_text(&mut self, text: &str) {
        let EngineState::Editing(session) = &self.state else {
            return;
        };
        let id = session.block_id;
        self.store_mut().preview_text(id, text);
    }

    /// Close the session, committing its text as one undo step. If the
    /// text is unchanged from session start this records nothing.
    pub fn commit_editing(&mut self) {
        if !self.is_editing() {
            return;
        }
        let EngineState::Editing(session) = std::mem::take(&mut self.state) else {
            unreachable!();
        };
        let id = session.block_id;
        let Some(latest) = self.store().find_text(id).map(|t| t.text.clone()) else {
            return;
        };
        if latest == session.original_text {
            return;
        }
        // The live preview already wrote the latest text via `set`, so
        // restore the session-start baseline first; the commit then
        // records a pre-edit snapshot undo can return to.
        self.store_mut().preview_text(id, &session.original_text);
        self.store_mut().commit_text(id, &latest);
    }

    /// Close the session, rolling the live preview back to the text at
    /// session start. Nothing was ever committed, so the undo stacks
    /// are untouched.
    pub fn cancel_editing(&mut self) {
        if !self.is_editing() {
            return;
        }
        let EngineState::Editing(session) = std::mem::take(&mut self.state) else {
            unreachable!();
        };
        let id = session.block_id;
        self.store_mut().preview_text(id, &session.original_text);
    }

    /// Commit any in-flight edit and end any drag. Called before face
    /// or design switches and before export.
    pub fn resolve_session(&mut self) {
        match self.state {
            EngineState::Editing(_) => self.commit_editing(),
            EngineState::Dragging(_) => self.pointer_up(),
            EngineState::Idle => {}
        }
    }

    // --- history ----------------------------------------------------------

    /// Undo on the active face. An in-flight edit is committed first so
    /// a live preview cannot fight the restored snapshot.
    pub fn undo(&mut self) -> bool {
        self.resolve_session();
        self.store_mut().undo()
    }

    /// Redo on the active face.
    pub fn redo(&mut self) -> bool {
        self.resolve_session();
        self.store_mut().redo()
    }

    pub fn can_undo(&self) -> bool {
        self.store().can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.store().can_redo()
    }

    /// Handle a key-down event. While editing, Enter (without Shift)
    /// commits and Escape cancels; history shortcuts are suppressed
    /// because focus sits in a text input. Returns true if the event
    /// was consumed.
    pub fn handle_key(&mut self, event: &KeyEvent) -> bool {
        if self.is_editing() {
            match event.key.as_str() {
                "Enter" if !event.modifiers.shift => {
                    self.commit_editing();
                    return true;
                }
                "Escape" => {
                    self.cancel_editing();
                    return true;
                }
                _ => {}
            }
        }
        match HistoryShortcut::from_key(event, self.is_editing()) {
            Some(HistoryShortcut::Undo) => self.undo(),
            Some(HistoryShortcut::Redo) => self.redo(),
            None => false,
        }
    }

    // --- export seam ------------------------------------------------------

    /// The committed block list for export: resolves any live session,
    /// then returns the current list. Export must never see an
    /// in-preview state.
    pub fn export_blocks(&mut self) -> Vec<Block> {
        self.resolve_session();
        self.store().blocks().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::TextBlock;
    use crate::measure::FixedMeasure;
    use kurbo::Size;

    /// Editor over the Plain design with a half-size display scale and
    /// a measured size for the first back-face block.
    fn editor() -> (CardEditor<FixedMeasure>, BlockId) {
        let mut editor = CardEditor::new(DesignKey::Plain, FixedMeasure::new());
        let id = editor.blocks()[0].id();
        // Rendered at scale 0.5: a 120px-wide logical block measures 60
        // screen pixels.
        let mut measure = FixedMeasure::new();
        measure.insert(id, Size::new(60.0, 15.0));
        editor.set_measure(measure);
        editor.set_viewport(Viewport::new(Point::new(10.0, 20.0), 0.5));
        (editor, id)
    }

    fn screen_at(editor: &CardEditor<FixedMeasure>, logical: Point) -> Point {
        editor.viewport().logical_to_screen(logical)
    }

    #[test]
    fn test_drag_collapses_to_one_history_entry() {
        let (mut editor, id) = editor();
        let start = editor.store().find(id).unwrap().position();

        editor.pointer_down(id, screen_at(&editor, start));
        for i in 1..=50 {
            let target = Point::new(start.x + i as f64, start.y);
            editor.pointer_move(screen_at(&editor, target));
        }
        editor.pointer_up();

        assert_eq!(editor.store().past_len(), 1);
        let moved = editor.store().find(id).unwrap().position();
        assert!((moved.x - (start.x + 50.0)).abs() < 1e-9);

        assert!(editor.undo());
        assert_eq!(editor.store().find(id).unwrap().position(), start);
    }

    #[test]
    fn test_click_without_movement_is_undo_neutral() {
        let (mut editor, id) = editor();
        let start = editor.store().find(id).unwrap().position();

        editor.pointer_down(id, screen_at(&editor, start));
        editor.pointer_up();

        assert_eq!(editor.store().past_len(), 0);
        assert_eq!(editor.active_block(), Some(id));
    }

    #[test]
    fn test_drag_clamps_to_canvas() {
        let (mut editor, id) = editor();
        let start = editor.store().find(id).unwrap().position();
        editor.pointer_down(id, screen_at(&editor, start));

        // Far past the top-left corner.
        editor.pointer_move(screen_at(&editor, Point::new(-5000.0, -5000.0)));
        let pos = editor.store().find(id).unwrap().position();
        assert_eq!(pos, Point::ZERO);

        // Far past the bottom-right corner. Width is 60 screen px at
        // scale 0.5 = 120 logical; height stand-in is the font size.
        editor.pointer_move(screen_at(&editor, Point::new(5000.0, 5000.0)));
        let pos = editor.store().find(id).unwrap().position();
        let font_size = editor.store().find_text(id).unwrap().font_size as f64;
        assert!((pos.x - (CARD_BASE_W - 120.0)).abs() < 1e-9);
        assert!((pos.y - (CARD_BASE_H - font_size)).abs() < 1e-9);

        editor.pointer_up();
        assert_eq!(editor.store().past_len(), 1);
    }

    #[test]
    fn test_unmeasured_block_ignores_moves() {
        let mut editor = CardEditor::new(DesignKey::Plain, FixedMeasure::new());
        let id = editor.blocks()[0].id();
        let start = editor.blocks()[0].position();
        editor.pointer_down(id, start);
        editor.pointer_move(Point::new(9999.0, start.y));

        // No rendered element: the block stays put and the pre-drag
        // snapshot is never flushed, so history stays clean.
        assert_eq!(editor.store().find(id).unwrap().position(), start);
        assert_eq!(editor.store().past_len(), 0);
        editor.pointer_up();
    }

    #[test]
    fn test_pointer_cancel_ends_drag() {
        let (mut editor, id) = editor();
        let start = editor.store().find(id).unwrap().position();
        editor.pointer_down(id, screen_at(&editor, start));
        editor.pointer_move(screen_at(&editor, Point::new(start.x + 10.0, start.y)));
        editor.pointer_cancel();
        assert!(!editor.is_dragging());
        assert_eq!(editor.store().past_len(), 1);
    }

    #[test]
    fn test_editing_commit_is_one_undo_step() {
        let (mut editor, id) = editor();
        editor.start_editing(id);
        editor.input_text("山");
        editor.input_text("山田");
        editor.input_text("山田 花子");
        editor.commit_editing();

        assert!(!editor.is_editing());
        assert_eq!(editor.store().find_text(id).unwrap().text, "山田 花子");
        assert_eq!(editor.store().past_len(), 1);

        assert!(editor.undo());
        assert_eq!(editor.store().find_text(id).unwrap().text, "山田 太郎");
    }

    #[test]
    fn test_editing_cancel_never_touches_history() {
        let (mut editor, id) = editor();
        editor.start_editing(id);
        editor.input_text("typo");
        editor.input_text("typoo");
        editor.cancel_editing();

        assert_eq!(editor.store().find_text(id).unwrap().text, "山田 太郎");
        assert_eq!(editor.store().past_len(), 0);
        assert_eq!(editor.store().future_len(), 0);
    }

    #[test]
    fn test_commit_unchanged_text_is_noop() {
        let (mut editor, id) = editor();
        let original = editor.store().find_text(id).unwrap().text.clone();
        editor.start_editing(id);
        editor.input_text("other");
        editor.input_text(&original);
        editor.commit_editing();
        assert_eq!(editor.store().past_len(), 0);
    }

    #[test]
    fn test_pointer_down_while_editing_commits_first() {
        let (mut editor, id) = editor();
        let other = editor.blocks()[1].id();

        editor.start_editing(id);
        editor.input_text("編集中");
        let pos = editor.store().find(other).unwrap().position();
        editor.pointer_down(other, screen_at(&editor, pos));

        assert!(!editor.is_editing());
        assert!(editor.is_dragging());
        assert_eq!(editor.store().find_text(id).unwrap().text, "編集中");
        assert_eq!(editor.store().past_len(), 1);
        editor.pointer_up();
    }

    #[test]
    fn test_start_editing_selects_and_captures_text() {
        let (mut editor, id) = editor();
        editor.start_editing(id);
        assert_eq!(editor.active_block(), Some(id));
        assert_eq!(editor.editing_block(), Some(id));

        // The captured session-start text is what cancel rolls back to.
        editor.input_text("changed");
        editor.cancel_editing();
        assert_eq!(editor.store().find_text(id).unwrap().text, "山田 太郎");
    }

    #[test]
    fn test_start_editing_resolves_previous_session() {
        let (mut editor, id) = editor();
        let other = editor.blocks()[1].id();

        editor.start_editing(id);
        editor.input_text("first");
        editor.start_editing(other);

        assert_eq!(editor.editing_block(), Some(other));
        assert_eq!(editor.store().find_text(id).unwrap().text, "first");
        assert_eq!(editor.store().past_len(), 1);
    }

    #[test]
    fn test_front_face_is_not_draggable() {
        let (mut editor, _) = editor();
        editor.set_face(CardFace::Front);
        // Front template is empty and non-editable; a press on a stale
        // id selects but never starts a drag.
        let ghost = BlockId::new();
        editor.pointer_down(ghost, Point::new(50.0, 50.0));
        assert!(!editor.is_dragging());
        assert_eq!(editor.active_block(), Some(ghost));
    }

    #[test]
    fn test_face_switch_commits_live_edit() {
        let (mut editor, id) = editor();
        editor.start_editing(id);
        editor.input_text("switched away");
        editor.set_face(CardFace::Front);

        assert!(!editor.is_editing());
        assert_eq!(editor.active_block(), None);
        editor.set_face(CardFace::Back);
        assert_eq!(editor.store().find_text(id).unwrap().text, "switched away");
        assert_eq!(editor.store().past_len(), 1);
    }

    #[test]
    fn test_set_design_rebuilds_faces() {
        let (mut editor, _) = editor();
        editor.store_mut().add_block();
        assert_eq!(editor.blocks().len(), 3);

        editor.set_design(DesignKey::Kinmokusei);
        assert_eq!(editor.design(), DesignKey::Kinmokusei);
        assert_eq!(editor.blocks().len(), 2);
        assert!(editor.background().image.is_some());
        assert_eq!(editor.store().past_len(), 0);
    }

    #[test]
    fn test_undo_shortcut_suppressed_while_editing() {
        let (mut editor, id) = editor();
        editor.store_mut().commit_text(id, "committed");
        editor.start_editing(id);

        let undo = KeyEvent::new(
            "z",
            crate::input::Modifiers {
                ctrl: true,
                ..Default::default()
            },
        );
        assert!(!editor.handle_key(&undo));
        assert!(editor.is_editing());
        assert_eq!(editor.store().find_text(id).unwrap().text, "committed");
    }

    #[test]
    fn test_enter_commits_escape_cancels() {
        let (mut editor, id) = editor();
        editor.start_editing(id);
        editor.input_text("done");
        assert!(editor.handle_key(&KeyEvent::new("Enter", Default::default())));
        assert_eq!(editor.store().find_text(id).unwrap().text, "done");
        assert_eq!(editor.store().past_len(), 1);

        editor.start_editing(id);
        editor.input_text("oops");
        assert!(editor.handle_key(&KeyEvent::new("Escape", Default::default())));
        assert_eq!(editor.store().find_text(id).unwrap().text, "done");
        assert_eq!(editor.store().past_len(), 1);
    }

    #[test]
    fn test_shift_enter_stays_in_session() {
        let (mut editor, id) = editor();
        editor.start_editing(id);
        let shift_enter = KeyEvent::new(
            "Enter",
            crate::input::Modifiers {
                shift: true,
                ..Default::default()
            },
        );
        assert!(!editor.handle_key(&shift_enter));
        assert_eq!(editor.editing_block(), Some(id));
    }

    #[test]
    fn test_export_blocks_resolves_live_preview() {
        let (mut editor, id) = editor();
        editor.start_editing(id);
        editor.input_text("輸出");

        let blocks = editor.export_blocks();
        assert!(!editor.is_editing());
        let exported = blocks
            .iter()
            .find(|b| b.id() == id)
            .and_then(Block::as_text)
            .unwrap();
        assert_eq!(exported.text, "輸出");
        // The resolve committed the session, so it is undoable.
        assert_eq!(editor.store().past_len(), 1);
    }

    #[test]
    fn test_handle_pointer_dispatch() {
        let (mut editor, id) = editor();
        let start = editor.store().find(id).unwrap().position();
        let down = PointerEvent::Down {
            position: screen_at(&editor, start),
            button: crate::input::PointerButton::Primary,
        };
        editor.handle_pointer(down, Some(id));
        assert!(editor.is_dragging());
        editor.handle_pointer(
            PointerEvent::Move {
                position: screen_at(&editor, Point::new(start.x + 4.0, start.y)),
            },
            None,
        );
        editor.handle_pointer(
            PointerEvent::Up {
                position: Point::ZERO,
            },
            None,
        );
        assert!(!editor.is_dragging());
        assert_eq!(editor.store().past_len(), 1);
    }

    #[test]
    fn test_outside_press_clears_selection() {
        let (mut editor, id) = editor();
        editor.pointer_down(id, Point::ZERO);
        editor.pointer_up();
        editor.pointer_down_outside();
        assert_eq!(editor.active_block(), None);
    }

    #[test]
    fn test_scenario_spinner_then_undo() {
        // updateFontSize display at 24, three +1 spinner clicks land on
        // 27; three undos walk back to 24.
        let (mut editor, id) = editor();
        for _ in 0..3 {
            editor.store_mut().bump_font_size(id, 1);
        }
        assert_eq!(editor.store().find_text(id).unwrap().font_size, 27);
        for _ in 0..3 {
            assert!(editor.undo());
        }
        assert_eq!(editor.store().find_text(id).unwrap().font_size, 24);
    }
}
