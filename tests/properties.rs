//! Property tests for the pure engines: layout resolution, compositing,
//! scrolling, text reflow, key decoding and focus transitions.

use std::time::{Duration, Instant};

use proptest::prelude::*;
use slate_tui::core::text::styled;
use slate_tui::{
    resolve_size, ActiveElement, ActiveState, CapabilityTable, Cell, InputDecoder, LayoutPolicy,
    Position, Resolution, ScrollConfig, ScrollMode, ScrollModel, SizeSpec, Surface, TextLayout,
    Vec2,
};

// ── Helpers ─────────────────────────────────────────────────────────────

fn vec2(range: std::ops::Range<i32>) -> impl Strategy<Value = Vec2> {
    (range.clone(), range).prop_map(|(x, y)| Vec2::new(x, y))
}

/// A surface with a random mix of opaque and transparent cells.
fn surface_strategy() -> impl Strategy<Value = Surface> {
    (
        1i32..8,
        1i32..8,
        prop::collection::vec(prop::option::of(prop::char::range('a', 'z')), 64),
        vec2(-6..6),
        vec2(0..101),
    )
        .prop_map(|(width, height, glyphs, offset, anchor)| {
            let mut surface = Surface::with_size(width, height)
                .with_position(Position::new(offset, Vec2::ZERO, anchor));
            for y in 0..height {
                for x in 0..width {
                    if let Some(glyph) = glyphs[(y * width + x) as usize % glyphs.len()] {
                        surface.set_cell(Vec2::new(x, y), Cell::new(glyph));
                    }
                }
            }
            surface
        })
}

#[derive(Debug, Clone, Copy)]
enum ScrollOp {
    Content(i32),
    Visible(i32),
    Viewport(i32),
    Top(i32),
    Cursor(i32),
    Move(i32),
    Page(i32),
}

fn scroll_op() -> impl Strategy<Value = ScrollOp> {
    prop_oneof![
        (0i32..60).prop_map(ScrollOp::Content),
        (-2i32..20).prop_map(ScrollOp::Visible),
        (-2i32..20).prop_map(ScrollOp::Viewport),
        (-80i32..80).prop_map(ScrollOp::Top),
        (-80i32..80).prop_map(ScrollOp::Cursor),
        (-30i32..30).prop_map(ScrollOp::Move),
        (-3i32..3).prop_map(ScrollOp::Page),
    ]
}

fn apply(model: &mut ScrollModel, op: ScrollOp) {
    match op {
        ScrollOp::Content(length) => model.set_content_length(length),
        ScrollOp::Visible(length) => model.set_visible_length(length),
        ScrollOp::Viewport(length) => model.set_viewport_length(length),
        ScrollOp::Top(position) => model.set_top(position),
        ScrollOp::Cursor(position) => model.set_cursor(position),
        ScrollOp::Move(delta) => model.move_by(delta),
        ScrollOp::Page(pages) => model.page(pages),
    }
}

fn policy_strategy() -> impl Strategy<Value = LayoutPolicy> {
    (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(wrap, dense_punctuation, control_characters)| LayoutPolicy {
            wrap,
            dense_punctuation,
            control_characters,
        },
    )
}

fn layout(text: &str, width: i32, policy: LayoutPolicy) -> TextLayout {
    let mut layout = TextLayout::new(width, policy);
    layout.set_text(styled(text, Cell::BLANK));
    layout
}

struct Counter {
    state: ActiveState,
    activations: usize,
    deactivations: usize,
}

impl ActiveElement for Counter {
    fn active_state(&self) -> &ActiveState {
        &self.state
    }

    fn active_state_mut(&mut self) -> &mut ActiveState {
        &mut self.state
    }

    fn on_activate(&mut self) {
        self.activations += 1;
    }

    fn on_deactivate(&mut self) {
        self.deactivations += 1;
    }
}

// ── Layout and compositing ──────────────────────────────────────────────

proptest! {
    #[test]
    fn applied_sizes_are_at_least_one_cell(
        fixed in vec2(-50..50),
        percentage in vec2(-100..201),
        parent in vec2(0..200),
    ) {
        let spec = SizeSpec::new(fixed, percentage);
        let mut surface = Surface::new(spec);
        surface.resize(resolve_size(spec, parent));
        prop_assert!(surface.width() >= 1 && surface.height() >= 1, "{:?}", surface.size());
    }

    #[test]
    fn transparent_child_leaves_parent_unchanged(
        parent in surface_strategy(),
        size in vec2(1..10),
        offset in vec2(-10..10),
    ) {
        let mut parent = parent;
        let before = parent.grid().clone();
        let mut child = Surface::with_size(size.x, size.y)
            .with_position(Position::TOP_LEFT.with_offset(offset.x, offset.y));
        parent.insert_surface(&mut child);
        prop_assert_eq!(parent.grid(), &before);
    }

    #[test]
    fn compositing_is_idempotent(parent in surface_strategy(), child in surface_strategy()) {
        let mut parent = parent;
        let mut child = child;
        parent.insert_surface(&mut child);
        let once = parent.grid().clone();
        parent.insert_surface(&mut child);
        prop_assert_eq!(parent.grid(), &once);
    }
}

// ── Scrolling ───────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn scroll_window_stays_in_bounds(
        free in any::<bool>(),
        ops in prop::collection::vec(scroll_op(), 1..40),
    ) {
        let mode = if free { ScrollMode::FreeCursor } else { ScrollMode::Snap };
        let mut model = ScrollModel::new(ScrollConfig { mode, arrows: false });
        for op in ops {
            apply(&mut model, op);

            let content = model.content_length();
            let visible = model.visible_length();
            let top = model.top_position();
            prop_assert!(top >= 0, "{:?}: top {}", op, top);
            prop_assert!(top <= (content - visible).max(0), "{:?}: top {}", op, top);

            let current = model.current_position();
            if free {
                prop_assert!(current >= 0 && current <= (content - 1).max(0));
                prop_assert!(current >= top && current < top + visible.max(1),
                    "{:?}: cursor {} outside window at {}", op, current, top);
            } else {
                prop_assert_eq!(current, top);
            }
        }
    }
}

// ── Text reflow ─────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn position_map_is_ordered_and_invertible(
        text in "[a-z .,\n\t]{0,60}",
        width in 1i32..14,
        policy in policy_strategy(),
    ) {
        let layout = layout(&text, width, policy);
        let map = layout.position_map();
        prop_assert_eq!(map.len(), text.chars().count() + 1);
        for pair in map.windows(2) {
            prop_assert!((pair[0].y, pair[0].x) <= (pair[1].y, pair[1].x), "{:?}", pair);
        }
        for index in 0..map.len() {
            let pos = layout.position_of(index);
            prop_assert!(pos.x >= 0 && pos.x < layout.width());
            prop_assert_eq!(layout.position_of(layout.index_at(pos)), pos);
        }
    }

    #[test]
    fn reflow_depends_only_on_final_width(
        text in "[a-z ]{0,60}",
        first in 1i32..14,
        second in 1i32..14,
        policy in policy_strategy(),
    ) {
        let mut reflowed = layout(&text, first, policy);
        reflowed.set_width(second);
        let fresh = layout(&text, second, policy);
        prop_assert_eq!(reflowed.laid_out(), fresh.laid_out());
        prop_assert_eq!(reflowed.position_map(), fresh.position_map());
    }
}

// ── Key decoding ────────────────────────────────────────────────────────

fn table_strategy() -> impl Strategy<Value = CapabilityTable> {
    prop_oneof![
        Just(CapabilityTable::xterm()),
        Just(CapabilityTable::linux()),
        Just(CapabilityTable::rxvt()),
    ]
}

proptest! {
    #[test]
    fn every_sequence_decodes_even_when_split(
        table in table_strategy(),
        pick in any::<prop::sample::Index>(),
        cut in any::<prop::sample::Index>(),
    ) {
        let entry = table.entries()[pick.index(table.len())].clone();
        let mut decoder = InputDecoder::new(table, Duration::from_millis(25));
        prop_assert_eq!(
            decoder.resolve(&entry.sequence),
            Resolution::Matched { index: pick.index(decoder.table().len()), consumed: entry.sequence.len() }
        );

        let split = 1 + cut.index(entry.sequence.len() - 1);
        let now = Instant::now();
        let mut keys = decoder.feed(&entry.sequence[..split], now);
        keys.extend(decoder.feed(&entry.sequence[split..], now));
        prop_assert_eq!(keys, vec![entry.key], "{}", entry.name);
        prop_assert!(decoder.pending().is_empty());
    }

    #[test]
    fn strict_prefixes_are_incomplete(table in table_strategy(), pick in any::<prop::sample::Index>()) {
        let entry = table.entries()[pick.index(table.len())].clone();
        let decoder = InputDecoder::new(table, Duration::from_millis(25));
        for len in 1..entry.sequence.len() {
            prop_assert_eq!(
                decoder.resolve(&entry.sequence[..len]),
                Resolution::Incomplete,
                "{} cut at {}", entry.name, len
            );
        }
    }

    #[test]
    fn flush_drains_arbitrary_bytes(bytes in prop::collection::vec(any::<u8>(), 0..32)) {
        let mut decoder = InputDecoder::new(CapabilityTable::xterm(), Duration::ZERO);
        let now = Instant::now();
        let mut keys = decoder.feed(&bytes, now);
        keys.extend(decoder.flush_due(now));
        prop_assert!(decoder.pending().is_empty());
        prop_assert!(keys.len() <= bytes.len());
        prop_assert_eq!(decoder.next_timeout(now), None);
    }
}

// ── Focus ───────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn hooks_fire_once_per_transition(steps in prop::collection::vec(any::<bool>(), 0..30)) {
        let mut element = Counter {
            state: ActiveState::default(),
            activations: 0,
            deactivations: 0,
        };
        let mut expected = (0, 0);
        let mut active = false;
        for step in steps {
            match (active, step) {
                (false, true) => expected.0 += 1,
                (true, false) => expected.1 += 1,
                _ => {}
            }
            active = step;
            if step {
                element.activate();
            } else {
                element.deactivate();
            }
            prop_assert_eq!(element.is_active(), step);
        }
        prop_assert_eq!((element.activations, element.deactivations), expected);
    }
}
