use std::io::Write;

/// Terminal size in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub rows: usize,
    pub cols: usize,
}

impl Viewport {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Converts signed cell coordinates, dropping anything off screen.
    pub fn clip(&self, row: i32, col: i32) -> Option<(usize, usize)> {
        if row < 0 || col < 0 {
            return None;
        }
        let (row, col) = (row as usize, col as usize);
        (row < self.rows && col < self.cols).then_some((row, col))
    }
}

/// One screen's worth of glyphs, composed each frame and then presented.
pub struct FrameBuffer {
    viewport: Viewport,
    cells: Vec<char>,
    output_buf: Vec<u8>,
}

impl FrameBuffer {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            cells: vec![' '; viewport.rows * viewport.cols],
            output_buf: Vec::with_capacity(viewport.rows * (viewport.cols + 2) + 8),
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.cells = vec![' '; viewport.rows * viewport.cols];
    }

    pub fn clear(&mut self) {
        self.cells.fill(' ');
    }

    /// Writes a glyph. Callers clip first; see [`Viewport::clip`].
    pub fn put(&mut self, row: usize, col: usize, glyph: char) {
        debug_assert!(row < self.viewport.rows && col < self.viewport.cols);
        self.cells[row * self.viewport.cols + col] = glyph;
    }

    #[cfg(test)]
    pub fn get(&self, row: usize, col: usize) -> Option<char> {
        if row < self.viewport.rows && col < self.viewport.cols {
            Some(self.cells[row * self.viewport.cols + col])
        } else {
            None
        }
    }

    /// Coordinates of every non-blank cell, row-major.
    #[cfg(test)]
    pub fn lit_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c != ' ')
            .map(|(i, _)| (i / self.viewport.cols, i % self.viewport.cols))
            .collect()
    }

    /// Encodes the whole frame as a cursor-home followed by every row.
    pub fn encode(&mut self) -> &[u8] {
        self.output_buf.clear();
        self.output_buf.extend_from_slice(b"\x1b[H");

        let mut glyph = [0u8; 4];
        for (y, row) in self.cells.chunks(self.viewport.cols.max(1)).enumerate() {
            for c in row {
                self.output_buf
                    .extend_from_slice(c.encode_utf8(&mut glyph).as_bytes());
            }
            if y + 1 < self.viewport.rows {
                self.output_buf.extend_from_slice(b"\r\n");
            }
        }

        &self.output_buf
    }

    pub fn write_to<W: Write>(&mut self, out: &mut W) -> std::io::Result<()> {
        out.write_all(self.encode())?;
        out.flush()
    }
}
