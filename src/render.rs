//! ASCII plan view of a packed container, looking down the height axis.
//! Columns follow width, rows follow depth.

use crate::types::{Dimensions, PackedItems};

const MAX_COLS: f64 = 80.0;
const MAX_ROWS: f64 = 40.0;

struct Canvas {
    cells: Vec<Vec<char>>,
}

impl Canvas {
    fn new(cols: usize, rows: usize) -> Self {
        Self {
            cells: vec![vec![' '; cols + 1]; rows + 1],
        }
    }

    fn put(&mut self, col: usize, row: usize, edge: char) {
        let Some(cell) = self.cells.get_mut(row).and_then(|r| r.get_mut(col)) else {
            return;
        };
        *cell = match (*cell, edge) {
            ('+', _) => '+',
            ('|', '-') | ('-', '|') => '+',
            _ => edge,
        };
    }

    fn frame(&mut self, col: usize, row: usize, cols: usize, rows: usize) {
        for c in col..=col + cols {
            self.put(c, row, '-');
            self.put(c, row + rows, '-');
        }
        for r in row..=row + rows {
            self.put(col, r, '|');
            self.put(col + cols, r, '|');
        }
        for (c, r) in [(col, row), (col + cols, row), (col, row + rows), (col + cols, row + rows)] {
            if let Some(cell) = self.cells.get_mut(r).and_then(|line| line.get_mut(c)) {
                *cell = '+';
            }
        }
    }

    /// Writes `text` centred inside the frame, clipped to its interior.
    fn label(&mut self, col: usize, row: usize, cols: usize, rows: usize, text: &str) {
        if cols <= 2 || rows == 0 {
            return;
        }
        let cy = row + rows / 2;
        let start = (col + cols / 2).saturating_sub(text.chars().count() / 2);
        for (i, ch) in text.chars().enumerate() {
            let x = start + i;
            if x > col
                && x < col + cols
                && cy > row
                && cy < row + rows
                && let Some(cell) = self.cells.get_mut(cy).and_then(|line| line.get_mut(x))
            {
                *cell = ch;
            }
        }
    }

    fn into_string(self) -> String {
        let mut out = String::new();
        for row in self.cells {
            let line: String = row.into_iter().collect();
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }
}

/// Draws every block's footprint. Blocks stacked at different heights are
/// drawn over each other.
pub fn render_box(container: Dimensions, blocks: &[PackedItems]) -> String {
    let scale = f64::min(MAX_COLS / container.width, MAX_ROWS / container.depth);
    let to_grid = |v: f64| (v * scale).round() as usize;

    let cols = to_grid(container.width);
    let rows = to_grid(container.depth);
    if cols == 0 || rows == 0 {
        return String::new();
    }

    let mut canvas = Canvas::new(cols, rows);
    canvas.frame(0, 0, cols, rows);

    for block in blocks {
        let col = to_grid(block.offset.x);
        let row = to_grid(block.offset.z);
        let w = to_grid(block.dimensions.width);
        let d = to_grid(block.dimensions.depth);
        if w == 0 || d == 0 {
            continue;
        }
        canvas.frame(col, row, w, d);
        canvas.label(col, row, w, d, &block.pattern.to_string());
    }

    canvas.into_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Item, ItemGroup, Orientation, Pattern, Point};

    fn block(offset: Point, dimensions: Dimensions, pattern: Pattern) -> PackedItems {
        let cell = Dimensions::new(
            dimensions.width / pattern.wide as f64,
            dimensions.height / pattern.high as f64,
            dimensions.depth / pattern.deep as f64,
        );
        let item = Item::new("i", "i", cell);
        PackedItems {
            box_index: 0,
            item_groups: vec![ItemGroup::new(item, pattern.count() as u32)],
            offset,
            dimensions,
            pattern,
            canonical: cell,
            orientation: Orientation::Front,
        }
    }

    #[test]
    fn test_render_full_block() {
        let container = Dimensions::new(100.0, 10.0, 50.0);
        let output = render_box(
            container,
            &[block(Point::origin(), container, Pattern::new(2, 1, 1))],
        );
        assert!(output.contains('+'));
        assert!(output.contains('-'));
        assert!(output.contains('|'));
        assert!(output.contains("2x1x1"));
    }

    #[test]
    fn test_render_side_by_side() {
        let container = Dimensions::new(100.0, 100.0, 100.0);
        let half = Dimensions::new(50.0, 100.0, 100.0);
        let output = render_box(
            container,
            &[
                block(Point::origin(), half, Pattern::new(1, 1, 1)),
                block(Point::new(50.0, 0.0, 0.0), half, Pattern::new(1, 1, 3)),
            ],
        );
        assert!(output.contains("1x1x1"));
        assert!(output.contains("1x1x3"));
    }

    #[test]
    fn test_render_empty() {
        let output = render_box(Dimensions::new(100.0, 100.0, 100.0), &[]);
        // the container outline is still drawn
        assert!(output.contains('+'));
        assert_eq!(output.lines().count(), 41);
    }
}
