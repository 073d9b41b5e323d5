use crate::terminal::{CursorPos, TerminalSize};
use crate::ui::span::{Span, SpanLine};
use crate::ui::style::Style;
use unicode_width::UnicodeWidthChar;

/// Screen area that routes a mouse click to a dialog element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitRegion {
    pub row: u16,
    pub col: u16,
    pub width: u16,
    pub element: String,
}

impl HitRegion {
    pub fn contains(&self, col: u16, row: u16) -> bool {
        self.row == row && col >= self.col && col < self.col.saturating_add(self.width)
    }
}

#[derive(Debug, Default, Clone)]
pub struct RenderFrame {
    pub lines: Vec<SpanLine>,
    pub cursor: Option<CursorPos>,
    pub hits: Vec<HitRegion>,
}

impl RenderFrame {
    pub fn element_at(&self, col: u16, row: u16) -> Option<&str> {
        self.hits
            .iter()
            .rev()
            .find(|hit| hit.contains(col, row))
            .map(|hit| hit.element.as_str())
    }

    /// Frame text with styling dropped and trailing blanks trimmed.
    pub fn plain_lines(&self) -> Vec<String> {
        self.lines
            .iter()
            .map(|line| {
                let text: String = line.iter().map(|span| span.text.as_str()).collect();
                text.trim_end().to_string()
            })
            .collect()
    }
}

#[derive(Clone, Copy)]
struct Cell {
    ch: char,
    style: Style,
    element: Option<usize>,
    continuation: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: Style::default(),
            element: None,
            continuation: false,
        }
    }
}

/// Fixed-size cell grid that dialogs are composed onto before being turned
/// back into span lines for the terminal.
pub struct Canvas {
    width: usize,
    rows: Vec<Vec<Cell>>,
    elements: Vec<String>,
}

impl Canvas {
    pub fn new(size: TerminalSize) -> Self {
        let width = size.width as usize;
        Self {
            width,
            rows: vec![vec![Cell::default(); width]; size.height as usize],
            elements: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Draws `line` at (`row`, `col`), clipped to `max_width` columns.
    pub fn draw_line(&mut self, row: usize, col: usize, line: &[Span], max_width: usize) {
        if row >= self.rows.len() {
            return;
        }
        let limit = col.saturating_add(max_width).min(self.width);
        let mut x = col;

        for span in line {
            let element = span.element.as_ref().map(|element| {
                self.elements.push(element.clone());
                self.elements.len() - 1
            });

            for ch in span.text.chars() {
                let char_width = UnicodeWidthChar::width(ch).unwrap_or(0);
                if char_width == 0 {
                    continue;
                }
                if x.saturating_add(char_width) > limit {
                    return;
                }
                let cells = &mut self.rows[row];
                cells[x] = Cell {
                    ch,
                    style: span.style,
                    element,
                    continuation: false,
                };
                for offset in 1..char_width {
                    cells[x + offset] = Cell {
                        ch: ' ',
                        style: span.style,
                        element,
                        continuation: true,
                    };
                }
                x += char_width;
            }
        }
    }

    pub fn fill(&mut self, row: usize, col: usize, width: usize, style: Style) {
        let Some(cells) = self.rows.get_mut(row) else {
            return;
        };
        let end = col.saturating_add(width).min(cells.len());
        for cell in cells.iter_mut().take(end).skip(col) {
            *cell = Cell {
                style,
                ..Cell::default()
            };
        }
    }

    /// Draws a bordered box with `title` set into the top edge and blanks
    /// its interior.
    pub fn draw_box(
        &mut self,
        row: usize,
        col: usize,
        width: usize,
        height: usize,
        title: &str,
        border: Style,
    ) {
        if width < 2 || height < 2 {
            return;
        }
        let inner = width - 2;

        let mut top = String::from("┌");
        let mut used = 0;
        if !title.is_empty() && inner >= 4 {
            let mut label = String::from(" ");
            for ch in title.chars() {
                let w = UnicodeWidthChar::width(ch).unwrap_or(0);
                if used + w + 2 > inner - 1 {
                    break;
                }
                label.push(ch);
                used += w;
            }
            label.push(' ');
            used += 2;
            top.push('─');
            top.push_str(&label);
            used += 1;
        }
        top.push_str(&"─".repeat(inner.saturating_sub(used)));
        top.push('┐');
        self.draw_line(row, col, &[Span::styled(top, border)], width);

        for offset in 1..height - 1 {
            self.fill(row + offset, col, width, Style::default());
            self.draw_line(row + offset, col, &[Span::styled("│", border)], 1);
            self.draw_line(
                row + offset,
                col + width - 1,
                &[Span::styled("│", border)],
                1,
            );
        }

        let bottom = format!("└{}┘", "─".repeat(inner));
        self.draw_line(row + height - 1, col, &[Span::styled(bottom, border)], width);
    }

    pub fn into_frame(self, cursor: Option<CursorPos>) -> RenderFrame {
        let mut lines = Vec::with_capacity(self.rows.len());
        let mut hits = Vec::new();

        for (row, cells) in self.rows.iter().enumerate() {
            lines.push(cells_to_span_line(cells));
            collect_hits(row, cells, &self.elements, &mut hits);
        }

        RenderFrame {
            lines,
            cursor,
            hits,
        }
    }
}

fn cells_to_span_line(cells: &[Cell]) -> SpanLine {
    let mut out = Vec::<Span>::new();
    let mut current_style: Option<Style> = None;
    let mut current_text = String::new();

    for cell in cells.iter().filter(|cell| !cell.continuation) {
        if let Some(style) = current_style
            && style != cell.style
        {
            out.push(Span::styled(std::mem::take(&mut current_text), style));
        }
        current_style = Some(cell.style);
        current_text.push(cell.ch);
    }

    if !current_text.is_empty() {
        out.push(Span::styled(current_text, current_style.unwrap_or_default()));
    }
    out
}

fn collect_hits(row: usize, cells: &[Cell], elements: &[String], hits: &mut Vec<HitRegion>) {
    let mut start: Option<(usize, usize)> = None;

    for (col, cell) in cells.iter().enumerate() {
        match (start, cell.element) {
            (Some((_, open)), Some(current)) if open == current => {}
            (open, current) => {
                if let Some((from, index)) = open {
                    hits.push(hit(row, from, col, &elements[index]));
                }
                start = current.map(|index| (col, index));
            }
        }
    }

    if let Some((from, index)) = start {
        hits.push(hit(row, from, cells.len(), &elements[index]));
    }
}

fn hit(row: usize, from: usize, to: usize, element: &str) -> HitRegion {
    HitRegion {
        row: row.min(u16::MAX as usize) as u16,
        col: from.min(u16::MAX as usize) as u16,
        width: to.saturating_sub(from).min(u16::MAX as usize) as u16,
        element: element.to_string(),
    }
}
