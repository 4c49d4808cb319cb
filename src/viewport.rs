//! Camera over the unbounded world.
//!
//! Three coordinate spaces are involved:
//!
//! - *world* pixels, where a cell at grid position `(x, y)` covers
//!   `[x * w, (x + 1) * w) × [y * w, (y + 1) * w)` for the cell pixel width `w`;
//! - the *surface*, a world-sized canvas whose top-left corner sits at `pan` and which extends
//!   `window_size * zoom` world pixels;
//! - *screen* (window) pixels, which the presentation layer obtains by scaling the surface by
//!   `1 / zoom`.
//!
//! Cells cache their surface rectangle. The cache only depends on `pan`, so it is rebuilt on
//! `refresh` after panning or zooming marks the viewport dirty.

use crate::{Cell, CellState, Config, Grid, GridPos, ScreenRect, ZoomConfig};
use boolinator::Boolinator;
use glam::DVec2;
use log::{debug, trace};

/// A live cell that intersects the visible surface.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VisibleCell {
    pub position: GridPos,
    pub state: CellState,
    pub rect: ScreenRect,
}

#[derive(Clone, Debug)]
pub struct Viewport {
    pan: DVec2,
    zoom: f64,
    zoom_config: ZoomConfig,
    cell_pixel_width: i32,
    window_size: (u32, u32),
    mouse: Option<DVec2>,
    dirty: bool,
}

impl Viewport {
    pub fn new(config: &Config) -> Self {
        Viewport {
            pan: DVec2::ZERO,
            zoom: config.zoom.clamp(1.0),
            zoom_config: config.zoom,
            cell_pixel_width: config.cell_pixel_width,
            window_size: config.window_size,
            mouse: None,
            dirty: true,
        }
    }

    /// World position of the surface's top-left corner.
    #[inline]
    pub fn pan(&self) -> DVec2 {
        self.pan
    }

    #[inline]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    #[inline]
    pub fn cell_pixel_width(&self) -> i32 {
        self.cell_pixel_width
    }

    #[inline]
    pub fn window_size(&self) -> (u32, u32) {
        self.window_size
    }

    /// Whether cached cell rectangles are stale.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Extent of the zoomed surface, in world pixels.
    pub fn surface_size(&self) -> DVec2 {
        DVec2::new(self.window_size.0 as f64, self.window_size.1 as f64) * self.zoom
    }

    /// The visible surface in surface coordinates.
    pub fn surface_rect(&self) -> ScreenRect {
        let size = self.surface_size();
        ScreenRect::new(0.0, 0.0, size.x, size.y)
    }

    pub fn resize(&mut self, window_size: (u32, u32)) {
        if window_size != self.window_size {
            self.window_size = window_size;
            self.dirty = true;
        }
    }

    /// Move the camera by a distance given in screen pixels.
    ///
    /// The distance is scaled by the zoom so the world moves at the same visual speed at every zoom
    /// level. Dragging the world along with the pointer means passing the negated pointer motion.
    pub fn pan_by(&mut self, delta: DVec2) {
        if delta == DVec2::ZERO {
            return;
        }
        self.pan += delta * self.zoom;
        self.dirty = true;
    }

    /// Multiply the zoom by the configured step, `steps` times (negative steps divide).
    ///
    /// Returns whether the clamped zoom actually changed. `pan` is left alone, so the top-left
    /// corner of the view stays fixed.
    pub fn zoom_by(&mut self, steps: i32) -> bool {
        let zoom = self
            .zoom_config
            .clamp(self.zoom * self.zoom_config.step.powi(steps));
        let changed = zoom != self.zoom;
        if changed {
            debug!("zoom {} -> {}", self.zoom, zoom);
            self.zoom = zoom;
            self.dirty = true;
        }
        changed
    }

    /// Zoom like `zoom_by`, keeping the world point under `anchor` (screen pixels) in place.
    pub fn zoom_at(&mut self, steps: i32, anchor: DVec2) -> bool {
        let world = self.screen_to_world(anchor);
        let changed = self.zoom_by(steps);
        if changed {
            self.pan = world - anchor * self.zoom;
        }
        changed
    }

    #[inline]
    pub fn screen_to_world(&self, screen: DVec2) -> DVec2 {
        screen * self.zoom + self.pan
    }

    #[inline]
    pub fn world_to_screen(&self, world: DVec2) -> DVec2 {
        (world - self.pan) / self.zoom
    }

    /// Grid position of the cell covering a world point. Uses floor division, so `-0.5` lands in
    /// cell `-1`.
    #[inline]
    pub fn world_to_grid(&self, world: DVec2) -> GridPos {
        let cells = (world / self.cell_pixel_width as f64).floor();
        (cells.x as i64, cells.y as i64)
    }

    /// World position of a cell's top-left corner.
    #[inline]
    pub fn grid_to_world(&self, pos: GridPos) -> DVec2 {
        DVec2::new(pos.0 as f64, pos.1 as f64) * self.cell_pixel_width as f64
    }

    /// Rectangle of a cell on the surface at the current pan.
    pub fn cell_rect(&self, pos: GridPos) -> ScreenRect {
        let corner = self.grid_to_world(pos) - self.pan;
        let width = self.cell_pixel_width as f64;
        ScreenRect::new(corner.x, corner.y, width, width)
    }

    /// Record the pointer position in screen pixels, or `None` when the window lost the pointer.
    pub fn set_mouse_position(&mut self, screen: Option<DVec2>) {
        self.mouse = screen;
    }

    #[inline]
    pub fn mouse_position(&self) -> Option<DVec2> {
        self.mouse
    }

    /// Grid position under the pointer.
    pub fn mouse_grid_position(&self) -> Option<GridPos> {
        self.mouse
            .map(|screen| self.world_to_grid(self.screen_to_world(screen)))
    }

    /// World position of the top-left corner of the cell under the pointer.
    pub fn mouse_position_snapped(&self) -> Option<DVec2> {
        self.mouse_grid_position()
            .map(|pos| self.grid_to_world(pos))
    }

    /// Surface rectangle of the cell under the pointer, for drawing the highlight.
    pub fn highlight_rect(&self) -> Option<ScreenRect> {
        self.mouse_grid_position().map(|pos| self.cell_rect(pos))
    }

    /// Bring cached cell rectangles up to date.
    ///
    /// A dirty viewport recaches every cell. Otherwise only cells placed since the last refresh are
    /// filled in. Returns the number of cells written.
    pub fn refresh(&mut self, grid: &mut Grid) -> usize {
        let uncached = grid.take_uncached();
        let mut written = 0;
        if self.dirty {
            for cell in grid.cells_mut() {
                cell.screen_rect = Some(self.cell_rect(cell.position()));
                written += 1;
            }
            self.dirty = false;
            trace!("recached {} cells", written);
        } else {
            for pos in uncached {
                if let Some(cell) = grid.get_mut(pos) {
                    cell.screen_rect = Some(self.cell_rect(pos));
                    written += 1;
                }
            }
        }
        written
    }

    /// Inclusive range of grid positions that can overlap the visible surface.
    pub fn visible_range(&self) -> (GridPos, GridPos) {
        let min = self.world_to_grid(self.pan);
        let max = self.world_to_grid(self.pan + self.surface_size());
        (min, max)
    }

    /// Cells whose cached rectangles intersect the visible surface.
    ///
    /// Candidates come from the grid's chunk index, so the cost follows the visible area rather than
    /// the total number of cells. Cells without a cached rectangle are skipped; call `refresh`
    /// first.
    pub fn visible_cells(&self, grid: &Grid) -> Vec<VisibleCell> {
        let (min, max) = self.visible_range();
        let surface = self.surface_rect();
        grid.cells_in_range(min, max)
            .filter_map(|cell| Self::visible(cell, &surface))
            .collect()
    }

    /// `visible_cells` by scanning every live cell.
    pub fn visible_cells_linear(&self, grid: &Grid) -> Vec<VisibleCell> {
        let surface = self.surface_rect();
        grid.cells()
            .filter_map(|cell| Self::visible(cell, &surface))
            .collect()
    }

    fn visible(cell: &Cell, surface: &ScreenRect) -> Option<VisibleCell> {
        let rect = cell.screen_rect()?;
        rect.intersects(surface).as_some(VisibleCell {
            position: cell.position(),
            state: cell.state(),
            rect,
        })
    }

    /// Surface positions of the visible vertical (x) and horizontal (y) grid lines.
    pub fn grid_lines(&self) -> (Vec<f64>, Vec<f64>) {
        let width = self.cell_pixel_width as f64;
        let size = self.surface_size();
        let lines = |pan: f64, extent: f64| -> Vec<f64> {
            let first = (pan / width).ceil() as i64;
            let last = ((pan + extent) / width).floor() as i64;
            (first..=last).map(|k| k as f64 * width - pan).collect()
        };
        (lines(self.pan.x, size.x), lines(self.pan.y, size.y))
    }
}
