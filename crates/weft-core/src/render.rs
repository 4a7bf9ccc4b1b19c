//! Drawing a laid-out tree into a ratatui [`Buffer`].
//!
//! The whole screen is repainted on every frame that needs it. Overlays (open
//! modals and shown toasts) are skipped during the main walk and drawn on top
//! afterwards. Scroll views clip their content to the viewport.

use ratatui::buffer::Buffer;
use ratatui::layout::Position;
use ratatui::style::{Modifier, Style};
use ratatui::symbols::{border, line};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tree::{Bounds, InputData, ListData, Node, NodeKind, TableData};

/// Paint `root` into `buf`, returning where the terminal cursor should sit
/// (the focused text input), if anywhere.
pub fn paint(root: &Node, buf: &mut Buffer) -> Option<Position> {
    let area = buf.area;
    let screen = Bounds::new(
        i32::from(area.x),
        i32::from(area.y),
        i32::from(area.width),
        i32::from(area.height),
    );
    let mut painter = Painter { buf, cursor: None };
    let mut overlays = Vec::new();
    painter.node(root, screen, &mut overlays);

    // Overlays may contain overlays of their own; keep draining.
    let mut i = 0;
    while let Some(overlay) = overlays.get(i).copied() {
        painter.overlay(overlay, screen, &mut overlays);
        i += 1;
    }
    painter.cursor
}

struct Painter<'b> {
    buf: &'b mut Buffer,
    cursor: Option<Position>,
}

impl Painter<'_> {
    fn node<'t>(&mut self, node: &'t Node, clip: Bounds, overlays: &mut Vec<&'t Node>) {
        let b = node.bounds;
        let style = node.paint.style();
        match &node.kind {
            NodeKind::Text(d) => {
                self.text(clip, b.x, b.y, &d.content, style);
            }
            NodeKind::Button(d) => {
                let style = if node.focus.focused {
                    style.add_modifier(Modifier::REVERSED)
                } else {
                    style
                };
                self.text(clip, b.x, b.y, &format!("[{}]", d.label), style);
            }
            NodeKind::TextInput(d) => self.input(node, d, clip, style),
            NodeKind::List(d) => self.list(node, d, clip, style),
            NodeKind::Table(d) => self.table(b, d, clip, style),
            NodeKind::Spinner(d) => {
                let mut s = d.glyph().to_string();
                if let Some(label) = &d.label {
                    s.push(' ');
                    s.push_str(label);
                }
                if let Some(progress) = d.progress_text() {
                    s.push_str(&progress);
                }
                self.text(clip, b.x, b.y, &s, style);
            }
            NodeKind::Modal(d) => {
                if d.open.get() {
                    overlays.push(node);
                }
            }
            NodeKind::Toast(d) => {
                if d.lifecycle.is_shown() {
                    overlays.push(node);
                }
            }
            NodeKind::ScrollView(d) => self.node(&d.content, clip.intersect(&b), overlays),
            NodeKind::Padding(d) => self.node(&d.content, clip, overlays),
            NodeKind::Spacer | NodeKind::VStack(_) | NodeKind::HStack(_) => {}
        }
        for child in &node.children {
            self.node(child, clip, overlays);
        }
    }

    fn overlay<'t>(&mut self, node: &'t Node, screen: Bounds, overlays: &mut Vec<&'t Node>) {
        let b = node.bounds;
        let style = node.paint.style();
        match &node.kind {
            NodeKind::Modal(d) => {
                self.fill(screen, b, style);
                self.frame(screen, b, d.title.as_deref(), style);
                self.node(&d.content, screen, overlays);
            }
            NodeKind::Toast(d) => {
                self.fill(screen, b, style);
                self.frame(screen, b, None, style);
                self.text(screen, b.x + 2, b.y + 1, &d.message, style);
            }
            _ => {}
        }
    }

    fn input(&mut self, node: &Node, d: &InputData, clip: Bounds, style: Style) {
        let b = node.bounds;
        let inner = (b.width - 2).max(0) as usize;
        let cursor = d.cursor();
        // Keep the cursor inside the visible window.
        let start = (cursor + 1).saturating_sub(inner);
        let visible: String = d.buffer.with(|s| s.chars().skip(start).collect());
        let bracket = if node.focus.focused {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        };

        self.text(clip, b.x, b.y, "[", bracket);
        self.text(clip, b.x + 1, b.y, &fit(&visible, inner), style);
        self.text(clip, b.x + b.width - 1, b.y, "]", bracket);

        if node.focus.focused {
            let before: String = d
                .buffer
                .with(|s| s.chars().skip(start).take(cursor.saturating_sub(start)).collect());
            let cx = b.x + 1 + before.width() as i32;
            if clip.contains(cx, b.y) && cx >= 0 && b.y >= 0 {
                self.cursor = Some(Position::new(cx as u16, b.y as u16));
            }
        }
    }

    fn list(&mut self, node: &Node, d: &ListData, clip: Bounds, style: Style) {
        let b = node.bounds;
        let first = d.first_visible();
        let selected = d.selected.get();
        for row in 0..b.height {
            let index = first + row as usize;
            let Some(item) = d.items.get(index) else {
                break;
            };
            let item_style = match (index == selected, node.focus.focused) {
                (true, true) => style.add_modifier(Modifier::REVERSED | Modifier::BOLD),
                (true, false) => style.add_modifier(Modifier::REVERSED),
                _ => style,
            };
            self.text(clip, b.x, b.y + row, &fit(item, b.width as usize), item_style);
        }
    }

    fn table(&mut self, b: Bounds, d: &TableData, clip: Bounds, style: Style) {
        let header = style.add_modifier(Modifier::BOLD);
        let mut y = b.y;
        if d.borders {
            let set = border::PLAIN;
            self.rule(clip, b.x, y, &d.column_widths, 2, [set.top_left, line::HORIZONTAL_DOWN, set.top_right], style);
            y += 1;
            self.bordered_row(clip, b.x, y, &d.headers, &d.column_widths, header, style);
            y += 1;
            self.rule(clip, b.x, y, &d.column_widths, 2, [line::VERTICAL_RIGHT, line::CROSS, line::VERTICAL_LEFT], style);
            y += 1;
            for row in &d.rows {
                self.bordered_row(clip, b.x, y, row, &d.column_widths, style, style);
                y += 1;
            }
            self.rule(clip, b.x, y, &d.column_widths, 2, [set.bottom_left, line::HORIZONTAL_UP, set.bottom_right], style);
        } else {
            self.text(clip, b.x, y, &plain_row(&d.headers, &d.column_widths), header);
            y += 1;
            self.text(clip, b.x, y, &line::HORIZONTAL.repeat(b.width.max(0) as usize), style);
            y += 1;
            for row in &d.rows {
                self.text(clip, b.x, y, &plain_row(row, &d.column_widths), style);
                y += 1;
            }
        }
    }

    /// A horizontal table rule: `left`, runs of `─` joined by `join`, `right`.
    #[allow(clippy::too_many_arguments)]
    fn rule(&mut self, clip: Bounds, x: i32, y: i32, widths: &[usize], pad: usize, [left, join, right]: [&str; 3], style: Style) {
        let runs: Vec<String> = widths.iter().map(|w| line::HORIZONTAL.repeat(w + pad)).collect();
        let s = format!("{left}{}{right}", runs.join(join));
        self.text(clip, x, y, &s, style);
    }

    #[allow(clippy::too_many_arguments)]
    fn bordered_row(&mut self, clip: Bounds, x: i32, y: i32, cells: &[String], widths: &[usize], cell_style: Style, style: Style) {
        let mut cx = x;
        cx += self.text(clip, cx, y, line::VERTICAL, style);
        for (cell, w) in cells.iter().zip(widths) {
            cx += self.text(clip, cx, y, &format!(" {} ", fit(cell, *w)), cell_style);
            cx += self.text(clip, cx, y, line::VERTICAL, style);
        }
    }

    /// Box outline with an optional title in the top edge.
    fn frame(&mut self, clip: Bounds, b: Bounds, title: Option<&str>, style: Style) {
        if b.width < 2 || b.height < 2 {
            return;
        }
        let set = border::PLAIN;
        let inner = (b.width - 2) as usize;
        let top = format!("{}{}{}", set.top_left, set.horizontal_top.repeat(inner), set.top_right);
        let bottom = format!("{}{}{}", set.bottom_left, set.horizontal_bottom.repeat(inner), set.bottom_right);
        self.text(clip, b.x, b.y, &top, style);
        for y in b.y + 1..b.y + b.height - 1 {
            self.text(clip, b.x, y, set.vertical_left, style);
            self.text(clip, b.x + b.width - 1, y, set.vertical_right, style);
        }
        self.text(clip, b.x, b.y + b.height - 1, &bottom, style);
        if let Some(title) = title {
            let title = fit(title, inner.saturating_sub(2));
            self.text(clip, b.x + 1, b.y, &format!(" {} ", title.trim_end()), style.add_modifier(Modifier::BOLD));
        }
    }

    fn fill(&mut self, clip: Bounds, b: Bounds, style: Style) {
        let area = clip.intersect(&b);
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                if let Some(cell) = self.cell(x, y) {
                    cell.set_symbol(" ").set_style(style);
                }
            }
        }
    }

    /// Write `s` starting at (`x`, `y`), dropping cells outside `clip`.
    /// Returns the display width of `s`.
    fn text(&mut self, clip: Bounds, x: i32, y: i32, s: &str, style: Style) -> i32 {
        let mut cx = x;
        for ch in s.chars() {
            let w = ch.width().unwrap_or(0) as i32;
            if w == 0 {
                continue;
            }
            if clip.contains(cx, y) && clip.contains(cx + w - 1, y) {
                if let Some(cell) = self.cell(cx, y) {
                    cell.set_char(ch).set_style(style);
                }
            }
            cx += w;
        }
        cx - x
    }

    fn cell(&mut self, x: i32, y: i32) -> Option<&mut ratatui::buffer::Cell> {
        let x = u16::try_from(x).ok()?;
        let y = u16::try_from(y).ok()?;
        self.buf.cell_mut(Position::new(x, y))
    }
}

/// Truncate or pad `s` to exactly `width` columns.
fn fit(s: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push_str(&" ".repeat(width - used));
    out
}

fn plain_row(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, w)| fit(cell, *w))
        .collect::<Vec<_>>()
        .join("  ")
}

#[cfg(test)]
mod tests {
    use ratatui::layout::{Rect, Size};

    use super::*;
    use crate::focus::FocusRouter;
    use crate::layout::layout;
    use crate::shared::Shared;
    use crate::toast::ToastState;
    use crate::tree::*;

    fn draw(root: &mut Node, width: u16, height: u16) -> (Vec<String>, Option<Position>) {
        layout(root, Size::new(width, height));
        FocusRouter::new().rebuild(root);
        let mut buf = Buffer::empty(Rect::new(0, 0, width, height));
        let cursor = paint(root, &mut buf);
        (lines(&buf), cursor)
    }

    fn lines(buf: &Buffer) -> Vec<String> {
        let area = buf.area;
        (0..area.height)
            .map(|y| {
                let row: String = (0..area.width).map(|x| buf[(x, y)].symbol().to_string()).collect();
                row.trim_end().to_string()
            })
            .collect()
    }

    fn text(s: &str) -> Node {
        Node::new(NodeKind::Text(TextData { content: s.into() }))
    }

    fn vstack(children: Vec<Node>) -> Node {
        Node::with_children(NodeKind::VStack(StackData::default()), children)
    }

    #[test]
    fn text_and_button() {
        let mut root = vstack(vec![
            text("Count: 0"),
            Node::new(NodeKind::Button(ButtonData {
                label: "+".into(),
                on_click: None,
            })),
        ]);
        let (out, cursor) = draw(&mut root, 12, 3);
        assert_eq!(out, vec!["Count: 0", "[+]", ""]);
        assert_eq!(cursor, None);
    }

    #[test]
    fn focused_input_places_cursor() {
        let mut root = Node::new(NodeKind::TextInput(InputData {
            buffer: Shared::new("abc".into()),
            capacity: 10,
            cursor: Some(1),
        }));
        let (out, cursor) = draw(&mut root, 30, 1);
        assert_eq!(out[0], format!("[abc{}]", " ".repeat(17)));
        assert_eq!(cursor, Some(Position::new(2, 0)));
    }

    #[test]
    fn bordered_table() {
        let mut root = Node::new(NodeKind::Table(TableData {
            headers: vec!["Name".into(), "Age".into()],
            rows: vec![vec!["Alice".into(), "30".into()]],
            column_widths: vec![5, 3],
            borders: true,
        }));
        let (out, _) = draw(&mut root, 20, 5);
        assert_eq!(
            out,
            vec![
                "┌───────┬─────┐",
                "│ Name  │ Age │",
                "├───────┼─────┤",
                "│ Alice │ 30  │",
                "└───────┴─────┘",
            ]
        );
    }

    #[test]
    fn plain_table() {
        let mut root = Node::new(NodeKind::Table(TableData {
            headers: vec!["A".into(), "B".into()],
            rows: vec![vec!["x".into(), "yy".into()]],
            column_widths: vec![1, 2],
            borders: false,
        }));
        let (out, _) = draw(&mut root, 10, 3);
        assert_eq!(out, vec!["A  B", "─────", "x  yy"]);
    }

    #[test]
    fn list_shows_window_from_offset() {
        let mut root = Node::new(NodeKind::List(ListData {
            items: (0..6).map(|i| format!("item {i}")).collect(),
            selected: Shared::new(3),
            offset: ScrollOffset::Internal(2),
            max_visible: 3,
            on_select: None,
            motion: ScrollMotion::settled(2),
        }));
        let (out, _) = draw(&mut root, 10, 4);
        assert_eq!(out, vec!["item 2", "item 3", "item 4", ""]);
    }

    #[test]
    fn scroll_view_clips_content() {
        let lines_node = vstack((0..10).map(|i| text(&format!("line {i}"))).collect());
        let mut root = vstack(vec![
            Node::new(NodeKind::ScrollView(ScrollViewData {
                content: Box::new(lines_node),
                offset: Shared::new(4),
                max_height: 2,
                motion: ScrollMotion::settled(4),
            })),
            text("footer"),
        ]);
        let (out, _) = draw(&mut root, 10, 4);
        assert_eq!(out, vec!["line 4", "line 5", "footer", ""]);
    }

    #[test]
    fn open_modal_draws_over_background() {
        let open = Shared::new(true);
        let background = vstack((0..12).map(|_| text(&"#".repeat(30))).collect());
        let mut root = vstack(vec![
            background,
            Node::new(NodeKind::Modal(ModalData {
                open: open.clone(),
                title: Some("Hi".into()),
                content: Box::new(text("hello")),
                on_close: None,
            })),
        ]);
        let (out, _) = draw(&mut root, 30, 12);
        let (left, right) = ("#".repeat(10), "#".repeat(11));
        assert_eq!(out[5], format!("{left}┌ Hi ───┐{right}"));
        assert_eq!(out[6], format!("{left}│       │{right}"));
        assert_eq!(out[7], format!("{left}│ hello │{right}"));
        assert_eq!(out[9], format!("{left}└───────┘{right}"));
        assert_eq!(out[4], "#".repeat(30));

        open.set(false);
        let (out, _) = draw(&mut root, 30, 12);
        assert!(out.iter().all(|l| l == &"#".repeat(30)));
    }

    #[test]
    fn visible_toast_is_boxed_at_its_anchor() {
        let mut root = Node::new(NodeKind::Toast(ToastData {
            message: "Saved".into(),
            position: ToastPosition::Bottom,
            visible: Shared::new(true),
            auto_dismiss: None,
            on_close: None,
            lifecycle: crate::toast::ToastLifecycle {
                state: ToastState::Visible,
                ..Default::default()
            },
        }));
        let (out, _) = draw(&mut root, 13, 5);
        assert_eq!(out, vec!["", "  ┌───────┐", "  │ Saved │", "  └───────┘", ""]);
    }
}
