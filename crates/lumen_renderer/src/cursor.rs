//! Row-major pixel cursor shared by render workers.
//!
//! Pixels are handed out one at a time, left to right and top to bottom.
//! The cursor also tracks how much of the image has been handed out, so the
//! caller can report progress milestones without a separate counter.

/// A pixel handed out by the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pixel {
    /// Column, 0 at the left edge
    pub col: u32,
    /// Row, 0 at the top edge
    pub row: u32,
    /// Set when handing out this pixel crossed a whole percent of the image
    pub milestone: Option<u32>,
}

/// Cursor over every pixel of an `nx` by `ny` image.
#[derive(Debug, Clone)]
pub struct PixelCursor {
    nx: u32,
    ny: u32,
    col: u32,
    row: u32,
    handed_out: u64,
    percent: u32,
}

impl PixelCursor {
    /// Create a cursor at the top-left pixel.
    pub fn new(nx: u32, ny: u32) -> Self {
        Self {
            nx,
            ny,
            col: 0,
            row: 0,
            handed_out: 0,
            percent: 0,
        }
    }

    /// Get the total number of pixels.
    pub fn total(&self) -> u64 {
        self.nx as u64 * self.ny as u64
    }

    /// Get the number of pixels handed out so far.
    pub fn handed_out(&self) -> u64 {
        self.handed_out
    }

    /// Take the next pixel, or `None` once the image is exhausted.
    pub fn next_pixel(&mut self) -> Option<Pixel> {
        if self.nx == 0 || self.row >= self.ny {
            return None;
        }

        let (col, row) = (self.col, self.row);
        self.col += 1;
        if self.col == self.nx {
            self.col = 0;
            self.row += 1;
        }

        self.handed_out += 1;
        let percent = (self.handed_out * 100 / self.total()) as u32;
        let milestone = (percent > self.percent).then(|| {
            self.percent = percent;
            percent
        });

        Some(Pixel {
            col,
            row,
            milestone,
        })
    }

    /// Stop handing out pixels.
    pub fn finish(&mut self) {
        self.col = 0;
        self.row = self.ny;
    }
}

impl Iterator for PixelCursor {
    type Item = Pixel;

    fn next(&mut self) -> Option<Pixel> {
        self.next_pixel()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_major_order() {
        let pixels: Vec<(u32, u32)> = PixelCursor::new(3, 2).map(|p| (p.col, p.row)).collect();
        assert_eq!(pixels, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
    }

    #[test]
    fn test_exhausted_cursor_stays_empty() {
        let mut cursor = PixelCursor::new(2, 2);
        assert_eq!(cursor.by_ref().count(), 4);
        assert_eq!(cursor.next_pixel(), None);
        assert_eq!(cursor.handed_out(), 4);
    }

    #[test]
    fn test_empty_image() {
        assert_eq!(PixelCursor::new(0, 5).next_pixel(), None);
        assert_eq!(PixelCursor::new(5, 0).next_pixel(), None);
    }

    #[test]
    fn test_milestones_every_percent() {
        let milestones: Vec<u32> = PixelCursor::new(20, 10).filter_map(|p| p.milestone).collect();
        assert_eq!(milestones, (1..=100).collect::<Vec<_>>());
    }

    #[test]
    fn test_milestones_small_image() {
        // Three pixels jump a third of the image each
        let milestones: Vec<u32> = PixelCursor::new(3, 1).filter_map(|p| p.milestone).collect();
        assert_eq!(milestones, vec![33, 66, 100]);
    }

    #[test]
    fn test_finish_stops_early() {
        let mut cursor = PixelCursor::new(4, 4);
        cursor.next_pixel();
        cursor.finish();
        assert_eq!(cursor.next_pixel(), None);
    }
}
