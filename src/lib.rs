#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]

/*!
Widget built to show a tree of named nodes as a collapsible table.

The tree data is a caller-owned [`TreeNode`] supplied wholesale to every
operation. Fold state, the value column count and pending interface events
live in [`TreeTableState`]: call [`TreeTableState::set_data`] whenever a new
tree is supplied, toggle rows from there, and drain
[`TreeTableEvent`]s to learn when an unfolded node wants its subtree
populated. [`TreeTable`] renders the visible rows with right-aligned value
columns.
*/

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, StatefulWidget, Widget};
use unicode_width::UnicodeWidthStr;

mod columns;
mod flatten;
mod node;
mod path;
mod row;
mod tree_state;

#[cfg(feature = "json")]
pub mod json;

pub use crate::columns::max_leaf_columns;
pub use crate::flatten::flatten;
pub use crate::node::{EditCallback, Icon, Scalar, TreeNode, Value};
pub use crate::path::{path_key, TreePath, TreePathBuf};
pub use crate::row::Row;
pub use crate::tree_state::{default_folded, TreeTableEvent, TreeTableState};

/// A tree table which can be rendered.
///
/// Hidden rows (those below a folded ancestor) are skipped; every other row
/// shows its fold toggle, optional glyph icon and name on the left and up to
/// [`TreeTableState::max_leaf_columns`] right-aligned value cells on the
/// right. Cells carrying an edit affordance are prefixed with the edit
/// symbol.
///
/// # Example
///
/// ```
/// # use tui_tree_table::{TreeNode, TreeTable, TreeTableState, Value};
/// # use ratatui::backend::TestBackend;
/// # use ratatui::Terminal;
/// # use ratatui::widgets::Block;
/// # let mut terminal = Terminal::new(TestBackend::new(32, 32)).unwrap();
/// let tree = TreeNode::branch(
///     "Device",
///     vec![TreeNode::values("Beh", vec![Value::new(1)])],
/// );
///
/// let mut state = TreeTableState::default();
/// state.set_data(Some(&tree));
///
/// terminal.draw(|frame| {
///     let widget = TreeTable::new(Some(&tree)).block(Block::bordered().title("Tree Table"));
///     frame.render_stateful_widget(widget, frame.size(), &mut state);
/// })?;
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct TreeTable<'a> {
    root: Option<&'a TreeNode>,

    block: Option<Block<'a>>,
    /// Style used as a base style for the widget
    style: Style,

    /// Symbol in front of a folded row (children currently hidden)
    folded_symbol: &'a str,
    /// Symbol in front of an unfolded row (children currently shown)
    unfolded_symbol: &'a str,
    /// Symbol in front of a row without declared children
    no_toggle_symbol: &'a str,
    /// Symbol in front of a value cell carrying an edit affordance
    edit_symbol: &'a str,

    /// Text shown instead of the table when no tree is supplied
    no_data_text: &'a str,
    /// Columns between value cells
    column_spacing: u16,
}

impl<'a> TreeTable<'a> {
    #[must_use]
    pub const fn new(root: Option<&'a TreeNode>) -> Self {
        Self {
            root,
            block: None,
            style: Style::new(),
            folded_symbol: "\u{25b6} ",   // Arrow to right
            unfolded_symbol: "\u{25bc} ", // Arrow down
            no_toggle_symbol: "  ",
            edit_symbol: "\u{270e} ", // Pencil
            no_data_text: "No data provided",
            column_spacing: 2,
        }
    }

    #[allow(clippy::missing_const_for_fn)]
    #[must_use]
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    #[must_use]
    pub const fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub const fn folded_symbol(mut self, symbol: &'a str) -> Self {
        self.folded_symbol = symbol;
        self
    }

    #[must_use]
    pub const fn unfolded_symbol(mut self, symbol: &'a str) -> Self {
        self.unfolded_symbol = symbol;
        self
    }

    #[must_use]
    pub const fn no_toggle_symbol(mut self, symbol: &'a str) -> Self {
        self.no_toggle_symbol = symbol;
        self
    }

    #[must_use]
    pub const fn edit_symbol(mut self, symbol: &'a str) -> Self {
        self.edit_symbol = symbol;
        self
    }

    #[must_use]
    pub const fn no_data_text(mut self, text: &'a str) -> Self {
        self.no_data_text = text;
        self
    }

    #[must_use]
    pub const fn column_spacing(mut self, spacing: u16) -> Self {
        self.column_spacing = spacing;
        self
    }
}

impl<'a> StatefulWidget for TreeTable<'a> {
    type State = TreeTableState;

    #[allow(clippy::cast_possible_truncation, clippy::too_many_lines)]
    fn render(self, full_area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        buf.set_style(full_area, self.style);

        // Get the inner area inside a possible block, otherwise use the full area
        let area = self.block.map_or(full_area, |block| {
            let inner_area = block.inner(full_area);
            block.render(full_area, buf);
            inner_area
        });

        if area.width < 1 || area.height < 1 {
            return;
        }

        let Some(root) = self.root else {
            buf.set_stringn(
                area.x,
                area.y,
                self.no_data_text,
                area.width as usize,
                self.style,
            );
            return;
        };

        let visible = state.visible_rows(Some(root));
        let max_leaf_cols = state.max_leaf_columns();

        // Size each value column to its widest visible cell
        let mut column_widths = vec![0_usize; max_leaf_cols];
        for row in &visible {
            for (column, cell) in row.cells(max_leaf_cols).enumerate() {
                if let Some(cell) = cell {
                    let mut width = cell.val.to_string().width();
                    if cell.has_edit() {
                        width += self.edit_symbol.width();
                    }
                    column_widths[column] = column_widths[column].max(width);
                }
            }
        }
        let values_width = column_widths
            .iter()
            .filter(|width| **width > 0)
            .map(|width| width + self.column_spacing as usize)
            .sum::<usize>();
        let name_width = (area.width as usize).saturating_sub(values_width);

        for (line, row) in visible.iter().take(area.height as usize).enumerate() {
            let y = area.y + line as u16;

            let indent_width = row.depth * 2;
            let (x, _) = buf.set_stringn(
                area.x,
                y,
                " ".repeat(indent_width),
                name_width,
                self.style,
            );

            let symbol = if row.has_toggle() {
                if row.folded {
                    self.folded_symbol
                } else {
                    self.unfolded_symbol
                }
            } else {
                self.no_toggle_symbol
            };
            let remaining = name_width.saturating_sub((x - area.x) as usize);
            let (x, _) = buf.set_stringn(x, y, symbol, remaining, self.style);

            let x = if let Some(Icon::Glyph(glyph)) = &row.node.icon {
                let remaining = name_width.saturating_sub((x - area.x) as usize);
                let (x, _) = buf.set_stringn(x, y, format!("{glyph} "), remaining, self.style);
                x
            } else {
                x
            };

            let remaining = name_width.saturating_sub((x - area.x) as usize);
            buf.set_stringn(x, y, &row.node.name, remaining, self.style);

            // Value cells are laid out from the right edge, each right-aligned
            let cells = row.cells(max_leaf_cols).collect::<Vec<_>>();
            let mut right = area.right();
            for column in (0..max_leaf_cols).rev() {
                let column_width = column_widths[column];
                if column_width == 0 {
                    continue;
                }
                let Some(cell_x) = right
                    .checked_sub(column_width as u16)
                    .filter(|cell_x| *cell_x >= area.x)
                else {
                    break;
                };
                if let Some(cell) = cells[column] {
                    let text = cell.val.to_string();
                    let mut cell_width = text.width();
                    if cell.has_edit() {
                        cell_width += self.edit_symbol.width();
                    }
                    let x = cell_x + column_width.saturating_sub(cell_width) as u16;
                    let x = if cell.has_edit() {
                        let (x, _) = buf.set_stringn(x, y, self.edit_symbol, column_width, self.style);
                        x
                    } else {
                        x
                    };
                    buf.set_stringn(x, y, text, column_width, self.style);
                }
                right = cell_x.saturating_sub(self.column_spacing);
            }
        }
    }
}
