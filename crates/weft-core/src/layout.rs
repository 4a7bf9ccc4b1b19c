//! Two-pass layout: bottom-up measurement, then top-down positioning.
//!
//! Measurement looks only at a node's own content and its already-measured
//! children. Positioning hands each child an origin; there is no
//! backtracking. Scroll views offset their content by the *visual* (animated)
//! scroll position, so repeating [`position`] after the animation ticker runs
//! moves content smoothly between whole rows.

use ratatui::layout::Size;
use unicode_width::UnicodeWidthStr;

use crate::toast::TOAST_HEIGHT;
use crate::tree::{Align, Node, NodeKind, SpinnerData, TableData, ToastData, ToastPosition};

/// Fixed top-left corner of every modal.
pub const MODAL_ORIGIN: (i32, i32) = (10, 5);
/// Border plus one blank cell on each side of modal content.
pub const MODAL_INSET: i32 = 2;
/// Width range of a text input's text area, excluding its brackets.
pub const INPUT_TEXT_WIDTH: (i32, i32) = (20, 60);

/// Measure and position a whole tree with its root at the screen origin.
pub fn layout(root: &mut Node, screen: Size) {
    measure(root);
    position(root, 0, 0, screen);
}

/// Compute `width`/`height` for `node` and everything it owns.
pub fn measure(node: &mut Node) {
    for child in &mut node.children {
        measure(child);
    }
    if let Some(content) = node.content_mut() {
        measure(content);
    }
    let (width, height) = intrinsic_size(node);
    node.bounds.width = width;
    node.bounds.height = height;
}

/// Display width of `s` in terminal cells.
pub fn text_width(s: &str) -> i32 {
    s.width() as i32
}

fn intrinsic_size(node: &Node) -> (i32, i32) {
    match &node.kind {
        NodeKind::Text(d) => (text_width(&d.content), 1),
        NodeKind::Button(d) => (text_width(&d.label) + 2, 1),
        NodeKind::TextInput(d) => {
            let len = d.buffer.with(|b| text_width(b));
            let (min, max) = INPUT_TEXT_WIDTH;
            (len.clamp(min, max) + 2, 1)
        }
        NodeKind::List(d) => {
            let width = d.items.iter().map(|i| text_width(i)).max().unwrap_or(0);
            (width, d.items.len().min(d.max_visible) as i32)
        }
        NodeKind::Table(d) => table_size(d),
        NodeKind::Spinner(d) => (spinner_width(d), 1),
        NodeKind::VStack(s) => {
            let width = node.children.iter().map(|c| c.bounds.width).max().unwrap_or(0);
            let height = node.children.iter().map(|c| c.bounds.height).sum::<i32>()
                + gaps(s.spacing, node.children.len());
            (width, height)
        }
        NodeKind::HStack(s) => {
            let width = node.children.iter().map(|c| c.bounds.width).sum::<i32>()
                + gaps(s.spacing, node.children.len());
            let height = node.children.iter().map(|c| c.bounds.height).max().unwrap_or(0);
            (width, height)
        }
        NodeKind::Padding(d) => {
            let i = d.insets;
            (
                d.content.bounds.width + i32::from(i.left) + i32::from(i.right),
                d.content.bounds.height + i32::from(i.top) + i32::from(i.bottom),
            )
        }
        NodeKind::Modal(d) => {
            let title = d.title.as_deref().map_or(0, text_width);
            let inner = title.max(d.content.bounds.width);
            (inner + 2 * MODAL_INSET, d.content.bounds.height + 2 * MODAL_INSET)
        }
        NodeKind::ScrollView(d) => (
            d.content.bounds.width,
            d.content.bounds.height.min(d.max_height as i32),
        ),
        // Spacers do not stretch; toasts are overlays that place themselves.
        NodeKind::Spacer | NodeKind::Toast(_) => (0, 0),
    }
}

fn gaps(spacing: u16, count: usize) -> i32 {
    i32::from(spacing) * (count as i32 - 1).max(0)
}

fn table_size(d: &TableData) -> (i32, i32) {
    let columns = d.column_widths.len() as i32;
    let sum = d.column_widths.iter().sum::<usize>() as i32;
    let rows = d.rows.len() as i32;
    if d.borders {
        // "│ a │ b │": three cells per column plus the closing border.
        (sum + 3 * columns + 1, rows + 4)
    } else {
        (sum + 2 * (columns - 1).max(0), rows + 2)
    }
}

fn spinner_width(d: &SpinnerData) -> i32 {
    let glyph = d.style.frames().iter().map(|f| text_width(f)).max().unwrap_or(1);
    let label = d.label.as_deref().map_or(0, |l| 1 + text_width(l));
    let progress = d.progress_text().map_or(0, |p| text_width(&p));
    glyph + label + progress
}

/// Width and height a toast occupies when shown.
pub fn toast_size(d: &ToastData) -> (i32, i32) {
    (text_width(&d.message) + 4, TOAST_HEIGHT)
}

/// Assign positions top-down starting with `node` at (`x`, `y`).
///
/// Requires a prior [`measure`].
pub fn position(node: &mut Node, x: i32, y: i32, screen: Size) {
    node.bounds.x = x;
    node.bounds.y = y;
    let (width, height) = (node.bounds.width, node.bounds.height);

    match &mut node.kind {
        NodeKind::VStack(s) => {
            let (spacing, align) = (i32::from(s.spacing), s.align);
            let mut cy = y;
            for child in &mut node.children {
                let cx = x + cross_offset(align, width, child.bounds.width);
                position(child, cx, cy, screen);
                cy += child.bounds.height + spacing;
            }
        }
        NodeKind::HStack(s) => {
            let (spacing, align) = (i32::from(s.spacing), s.align);
            let mut cx = x;
            for child in &mut node.children {
                let cy = y + cross_offset(align, height, child.bounds.height);
                position(child, cx, cy, screen);
                cx += child.bounds.width + spacing;
            }
        }
        NodeKind::Padding(d) => {
            let (left, top) = (i32::from(d.insets.left), i32::from(d.insets.top));
            position(&mut d.content, x + left, y + top, screen);
        }
        NodeKind::ScrollView(d) => {
            let offset = d.motion.rows();
            position(&mut d.content, x, y - offset, screen);
        }
        NodeKind::Modal(d) => {
            let (mx, my) = MODAL_ORIGIN;
            node.bounds.x = mx;
            node.bounds.y = my;
            position(&mut d.content, mx + MODAL_INSET, my + MODAL_INSET, screen);
        }
        NodeKind::Toast(d) => {
            if d.lifecycle.is_shown() {
                let (w, h) = toast_size(d);
                let (tx, ty) = toast_origin(d, w, h, screen);
                node.bounds.x = tx;
                node.bounds.y = ty;
                node.bounds.width = w;
                node.bounds.height = h;
            } else {
                node.bounds.width = 0;
                node.bounds.height = 0;
            }
        }
        _ => {}
    }
}

fn cross_offset(align: Align, available: i32, used: i32) -> i32 {
    match align {
        Align::Start => 0,
        Align::Center => (available - used) / 2,
        Align::End => available - used,
    }
}

fn toast_origin(d: &ToastData, w: i32, h: i32, screen: Size) -> (i32, i32) {
    let (sw, sh) = (i32::from(screen.width), i32::from(screen.height));
    let slide = d.lifecycle.slide_offset().round() as i32;
    let top = 1 - slide;
    let bottom = sh - h - 1 + slide;
    match d.position {
        ToastPosition::Top => ((sw - w) / 2, top),
        ToastPosition::Bottom => ((sw - w) / 2, bottom),
        ToastPosition::TopRight => (sw - w - 2, top),
        ToastPosition::BottomRight => (sw - w - 2, bottom),
    }
}
