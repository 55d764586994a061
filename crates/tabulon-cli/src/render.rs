//! Text rendering of a table view.
//!
//! Column widths come from the view's width tokens: fixed tokens are taken
//! as-is, percentages are shares of the available width, and `auto`
//! columns size to their content and shrink to fit what is left. Cells
//! wider than their column are truncated with `…`.

use clap::ValueEnum;
use console::Style;
use tabulon::{Dir, HeaderRow, RowSet, RowViewModel, TableView, WidthToken};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Width of the leading checkbox column.
const CHECKBOX_WIDTH: usize = 3;

/// Separator between columns when the table has no border.
const PLAIN_SEPARATOR: &str = "  ";

/// Border style for table decoration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum BorderStyle {
    /// No borders.
    #[default]
    None,
    /// ASCII borders: +, -, |
    Ascii,
    /// Light Unicode box-drawing characters.
    Light,
    /// Rounded corners with light lines.
    Rounded,
}

impl BorderStyle {
    fn chars(&self) -> Option<BorderChars> {
        match self {
            BorderStyle::None => None,
            BorderStyle::Ascii => Some(BorderChars {
                horizontal: '-',
                vertical: '|',
                top: ['+', '+', '+'],
                middle: ['+', '+', '+'],
                bottom: ['+', '+', '+'],
            }),
            BorderStyle::Light => Some(BorderChars {
                horizontal: '─',
                vertical: '│',
                top: ['┌', '┬', '┐'],
                middle: ['├', '┼', '┤'],
                bottom: ['└', '┴', '┘'],
            }),
            BorderStyle::Rounded => Some(BorderChars {
                horizontal: '─',
                vertical: '│',
                top: ['╭', '┬', '╮'],
                middle: ['├', '┼', '┤'],
                bottom: ['╰', '┴', '╯'],
            }),
        }
    }
}

/// Box-drawing characters; each line is (left, joint, right).
#[derive(Clone, Copy, Debug)]
struct BorderChars {
    horizontal: char,
    vertical: char,
    top: [char; 3],
    middle: [char; 3],
    bottom: [char; 3],
}

/// Renders table views as text.
#[derive(Clone, Debug)]
pub struct TableRenderer {
    total_width: usize,
    border: BorderStyle,
    styled: bool,
}

impl TableRenderer {
    /// Create a renderer for the given total width.
    pub fn new(total_width: usize) -> Self {
        TableRenderer {
            total_width,
            border: BorderStyle::None,
            styled: false,
        }
    }

    /// Set the border style.
    pub fn border(mut self, border: BorderStyle) -> Self {
        self.border = border;
        self
    }

    /// Apply ANSI styles: bold header, reverse-video selected rows.
    pub fn styled(mut self, styled: bool) -> Self {
        self.styled = styled;
        self
    }

    /// Render the complete table.
    pub fn render(&self, view: &TableView) -> String {
        let header = header_cells(&view.header);
        let rows: Vec<Vec<String>> = view
            .rows
            .rows()
            .iter()
            .map(|row| row_cells(row, view.header.select_all))
            .collect();

        let tokens = column_tokens(&view.header);
        let mut widths = self.resolve_widths(&tokens, &header, &rows);
        if let Some(placeholder) = view.rows.placeholder() {
            self.fit_placeholder(&mut widths, placeholder.text.width());
        }

        let mut output = Vec::new();
        output.extend(self.horizontal_line(&widths, Line::Top));
        output.push(self.styled_line(&self.format_row(&header, &widths), &Style::new().bold()));
        output.extend(self.horizontal_line(&widths, Line::Middle));

        match &view.rows {
            RowSet::Rows(models) => {
                for (cells, model) in rows.iter().zip(models) {
                    let line = self.format_row(cells, &widths);
                    if model.is_selected {
                        output.push(self.styled_line(&line, &Style::new().reverse()));
                    } else {
                        output.push(line);
                    }
                }
            }
            RowSet::Placeholder(placeholder) => {
                output.push(self.format_spanning(&placeholder.text, &widths));
            }
        }

        output.extend(self.horizontal_line(&widths, Line::Bottom));
        output.join("\n")
    }

    fn styled_line(&self, line: &str, style: &Style) -> String {
        if self.styled {
            style.clone().force_styling(true).apply_to(line).to_string()
        } else {
            line.to_string()
        }
    }

    /// Display width taken by borders and separators for `columns` columns.
    fn overhead(&self, columns: usize) -> usize {
        match self.border {
            BorderStyle::None => columns.saturating_sub(1) * PLAIN_SEPARATOR.len(),
            _ => 1 + columns * 3,
        }
    }

    fn resolve_widths(
        &self,
        tokens: &[WidthToken],
        header: &[String],
        rows: &[Vec<String>],
    ) -> Vec<usize> {
        let available = self.total_width.saturating_sub(self.overhead(tokens.len()));

        let mut natural: Vec<usize> = header.iter().map(|h| h.width()).collect();
        for row in rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(w) = natural.get_mut(i) {
                    *w = (*w).max(cell.width());
                }
            }
        }

        let mut widths: Vec<usize> = Vec::with_capacity(tokens.len());
        let mut auto_indices = Vec::new();
        let mut used = 0;
        for (i, token) in tokens.iter().enumerate() {
            let width = match token {
                WidthToken::Fixed(n) => *n,
                WidthToken::Percent(pct) => (available as f64 * pct / 100.0).floor() as usize,
                WidthToken::Auto => {
                    auto_indices.push(i);
                    natural[i]
                }
            };
            if !matches!(token, WidthToken::Auto) {
                used += width;
            }
            widths.push(width.max(1));
        }

        let remaining = available.saturating_sub(used);
        let auto_total: usize = auto_indices.iter().map(|&i| widths[i]).sum();
        if auto_total > remaining {
            for &i in &auto_indices {
                widths[i] = (widths[i] * remaining / auto_total).max(1);
            }
        }
        log::trace!("resolved column widths {:?} within {}", widths, available);
        widths
    }

    /// Widens the last column so a spanning cell of `needed` columns fits.
    fn fit_placeholder(&self, widths: &mut Vec<usize>, needed: usize) {
        if widths.is_empty() {
            widths.push(needed.min(self.total_width.saturating_sub(self.overhead(1))).max(1));
            return;
        }
        let interior = self.interior_width(widths);
        let spare = self
            .total_width
            .saturating_sub(widths.iter().sum::<usize>() + self.overhead(widths.len()));
        if let Some(last) = widths.last_mut() {
            *last += needed.saturating_sub(interior).min(spare);
        }
    }

    /// Width of a cell spanning every column.
    fn interior_width(&self, widths: &[usize]) -> usize {
        widths.iter().sum::<usize>()
            + self
                .overhead(widths.len())
                .saturating_sub(self.overhead(1))
    }

    fn format_row(&self, cells: &[String], widths: &[usize]) -> String {
        let padded: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(i, &w)| pad(&truncate_to_width(cells.get(i).map_or("", String::as_str), w), w))
            .collect();
        self.wrap(&padded)
    }

    fn format_spanning(&self, text: &str, widths: &[usize]) -> String {
        let span = self.interior_width(widths).max(1);
        self.wrap(&[pad(&truncate_to_width(text, span), span)])
    }

    fn wrap(&self, padded: &[String]) -> String {
        match self.border.chars() {
            None => padded.join(PLAIN_SEPARATOR),
            Some(chars) => {
                let sep = format!(" {} ", chars.vertical);
                format!("{} {} {}", chars.vertical, padded.join(&sep), chars.vertical)
            }
        }
    }

    fn horizontal_line(&self, widths: &[usize], line: Line) -> Option<String> {
        let chars = self.border.chars()?;
        let [left, joint, right] = match line {
            Line::Top => chars.top,
            Line::Middle => chars.middle,
            Line::Bottom => chars.bottom,
        };
        let segments: Vec<String> = widths
            .iter()
            .map(|w| std::iter::repeat_n(chars.horizontal, w + 2).collect())
            .collect();
        Some(format!(
            "{}{}{}",
            left,
            segments.join(&joint.to_string()),
            right
        ))
    }
}

#[derive(Clone, Copy)]
enum Line {
    Top,
    Middle,
    Bottom,
}

fn column_tokens(header: &HeaderRow) -> Vec<WidthToken> {
    let checkbox = header
        .select_all
        .then_some(WidthToken::Fixed(CHECKBOX_WIDTH));
    checkbox
        .into_iter()
        .chain(header.cells.iter().map(|cell| cell.width))
        .collect()
}

fn header_cells(header: &HeaderRow) -> Vec<String> {
    let checkbox = header.select_all.then(|| "[ ]".to_string());
    checkbox
        .into_iter()
        .chain(header.cells.iter().map(|cell| match cell.sort_direction {
            Some(Dir::Asc) => format!("{} ▲", cell.label),
            Some(Dir::Desc) => format!("{} ▼", cell.label),
            None => cell.label.clone(),
        }))
        .collect()
}

fn row_cells(row: &RowViewModel, multi_selectable: bool) -> Vec<String> {
    let checkbox = multi_selectable.then(|| {
        if row.is_multi_select_checked {
            "[x]".to_string()
        } else {
            "[ ]".to_string()
        }
    });
    checkbox
        .into_iter()
        .chain(row.cells.iter().map(|cell| cell.value.to_string()))
        .collect()
}

/// Truncates `s` to `max_width` display columns, ending with `…` when cut.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(fill))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabulon::{record, DataTable, FilterSpec, SortSpec, TableConfig};

    fn people_view(config: TableConfig) -> TableView {
        DataTable::new(
            vec![
                record! { "name" => "Sue", "age" => 25 },
                record! { "name" => "Frank", "age" => 20 },
            ],
            config,
        )
        .view()
    }

    #[test]
    fn truncates_with_ellipsis() {
        assert_eq!(truncate_to_width("Hello", 10), "Hello");
        assert_eq!(truncate_to_width("Hello World", 6), "Hello…");
        assert_eq!(truncate_to_width("Hello", 1), "…");
    }

    #[test]
    fn plain_table() {
        let out = TableRenderer::new(80).render(&people_view(TableConfig::new()));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines, ["name   age", "Sue    25 ", "Frank  20 "]);
    }

    #[test]
    fn sort_arrow_in_header() {
        let out = TableRenderer::new(80).render(&people_view(
            TableConfig::new().sort(SortSpec::desc("age")),
        ));
        assert_eq!(out.lines().next(), Some("name   age ▼"));
        assert_eq!(out.lines().nth(1), Some("Sue    25   "));
    }

    #[test]
    fn light_border() {
        let out = TableRenderer::new(80)
            .border(BorderStyle::Light)
            .render(&people_view(TableConfig::new().include(["name"])));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            [
                "┌───────┐",
                "│ name  │",
                "├───────┤",
                "│ Sue   │",
                "│ Frank │",
                "└───────┘",
            ]
        );
    }

    #[test]
    fn fixed_width_truncates() {
        let out = TableRenderer::new(80).render(&people_view(
            TableConfig::new()
                .include(["name"])
                .widths([WidthToken::Fixed(3)]),
        ));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines, ["na…", "Sue", "Fr…"]);
    }

    #[test]
    fn checkbox_column() {
        let out = TableRenderer::new(80).render(&people_view(
            TableConfig::new()
                .include(["name"])
                .multi_selectable(true)
                .select([1]),
        ));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines, ["[ ]  name ", "[ ]  Sue  ", "[x]  Frank"]);
    }

    #[test]
    fn placeholder_row() {
        let out = TableRenderer::new(80).border(BorderStyle::Ascii).render(&people_view(
            TableConfig::new()
                .include(["name"])
                .filter(FilterSpec::new([record! { "name" => "Nobody" }]))
                .no_records_text("Empty"),
        ));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[1], "| name  |");
        assert_eq!(lines[3], "| Empty |");
    }

    #[test]
    fn placeholder_without_columns() {
        let view = DataTable::new(Vec::new(), TableConfig::new()).view();
        let out = TableRenderer::new(80).render(&view);
        assert_eq!(out.lines().last(), Some("No records found."));
    }

    #[test]
    fn styled_selection_uses_ansi() {
        let out = TableRenderer::new(80)
            .styled(true)
            .render(&people_view(TableConfig::new().select([0])));
        assert!(out.contains("\u{1b}["));
        let plain = TableRenderer::new(80).render(&people_view(TableConfig::new().select([0])));
        assert!(!plain.contains("\u{1b}["));
    }

    #[test]
    fn auto_columns_shrink_to_fit() {
        let view = DataTable::new(
            vec![record! { "a" => "x".repeat(40), "b" => "y".repeat(40) }],
            TableConfig::new(),
        )
        .view();
        let out = TableRenderer::new(22).render(&view);
        for line in out.lines() {
            assert!(line.width() <= 22, "{:?} is too wide", line);
        }
    }
}
