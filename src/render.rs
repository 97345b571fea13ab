//! Observer interface and a plain-text renderer
//!
//! The simulation never draws; anything that wants to show a run reads
//! a `Snapshot` through `FrameObserver`.

use crate::sim::{RunState, Snapshot};

/// Consumer of per-frame snapshots
pub trait FrameObserver {
    fn observe(&mut self, snapshot: &Snapshot);
}

/// Renders a snapshot as a fixed-width ASCII strip
///
/// Rows are stacked top to bottom from the highest visible cell down to
/// the ground line; world y=ground maps to the row just above the ground.
#[derive(Debug, Clone)]
pub struct TextRenderer {
    /// Columns in the strip
    pub cols: usize,
    /// Rows above the ground line
    pub rows: usize,
    /// World units per row
    pub cell_height: f32,
    /// Last rendered frame
    pub last_frame: String,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new(80, 8, 30.0)
    }
}

impl TextRenderer {
    pub fn new(cols: usize, rows: usize, cell_height: f32) -> Self {
        Self {
            cols: cols.max(1),
            rows: rows.max(1),
            cell_height,
            last_frame: String::new(),
        }
    }

    /// Cells of size `cell` overlapping `[lo, hi)`, clipped to `0..count`
    fn cells(lo: f32, hi: f32, cell: f32, count: usize) -> std::ops::Range<usize> {
        if !(cell > 0.0 && cell.is_finite() && lo.is_finite() && hi.is_finite()) {
            return 0..0;
        }
        let start = (lo / cell).floor().max(0.0);
        let end = (hi / cell).ceil().min(count as f32);
        if end <= start {
            return 0..0;
        }
        start as usize..end as usize
    }

    /// Fill the cells covered by `[x0, x1) × [y0, y1)` (heights above ground)
    fn fill(&self, grid: &mut [Vec<char>], x: (f32, f32), y: (f32, f32), play_width: f32, glyph: char) {
        let cell_width = play_width / self.cols as f32;
        let cols = Self::cells(x.0, x.1, cell_width, self.cols);
        for level in Self::cells(y.0, y.1, self.cell_height, self.rows) {
            let row = &mut grid[self.rows - 1 - level];
            for c in cols.clone() {
                row[c] = glyph;
            }
        }
    }

    pub fn render(&self, snap: &Snapshot) -> String {
        let mut grid = vec![vec![' '; self.cols]; self.rows];

        for o in &snap.obstacles {
            self.fill(&mut grid, (o.x, o.x + o.width), (0.0, o.height), snap.play_width, '#');
        }
        let player_glyph = if snap.state == RunState::GameOver {
            'X'
        } else {
            'H'
        };
        self.fill(
            &mut grid,
            (snap.player_x, snap.player_x + snap.player_width),
            (snap.player_offset, snap.player_offset + snap.player_height),
            snap.play_width,
            player_glyph,
        );

        let mut out = String::with_capacity((self.cols + 1) * (self.rows + 2));
        for row in grid {
            out.extend(row);
            out.push('\n');
        }
        out.push_str(&"=".repeat(self.cols));
        out.push('\n');

        match snap.overlay {
            Some(overlay) => {
                out.push_str(&format!("{} | {} | {}", overlay.title(), overlay.body(), overlay.hint()));
            }
            None => {
                out.push_str(&format!(
                    "score {:>6}  speed {:>6.1}  jumps {:>3}",
                    snap.score, snap.speed, snap.jump_count
                ));
            }
        }
        out
    }
}

impl FrameObserver for TextRenderer {
    fn observe(&mut self, snapshot: &Snapshot) {
        self.last_frame = self.render(snapshot);
    }
}
