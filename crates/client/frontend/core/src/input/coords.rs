//! Screen-to-grid coordinate mapping.

use game_core::GridCell;

use crate::config::LayoutConfig;

/// Raw pointer position in page coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerEvent {
    pub page_x: f64,
    pub page_y: f64,
}

impl PointerEvent {
    pub const fn new(page_x: f64, page_y: f64) -> Self {
        Self { page_x, page_y }
    }
}

/// Position on the drawing canvas, clamped to its bounds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PixelPosition {
    pub x: u32,
    pub y: u32,
}

/// Grid cell shown at the top-left corner of the viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Camera {
    pub grid_x: i32,
    pub grid_y: i32,
}

impl Camera {
    pub const fn new(grid_x: i32, grid_y: i32) -> Self {
        Self { grid_x, grid_y }
    }
}

/// Pointer position resolved to both canvas pixel and grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputSnapshot {
    pub pixel: PixelPosition,
    pub cell: GridCell,
}

/// Where the canvas sits on the page and how it is scaled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenLayout {
    pub canvas_left: f64,
    pub canvas_top: f64,
    pub zoom: f64,
    pub width: u32,
    pub height: u32,
    pub tile_size: u32,
    pub drawing_scale: u32,
}

impl ScreenLayout {
    pub fn from_config(config: &LayoutConfig) -> Self {
        Self {
            canvas_left: 0.0,
            canvas_top: 0.0,
            zoom: 1.0,
            width: config.width,
            height: config.height,
            tile_size: config.tile_size,
            drawing_scale: config.drawing_scale,
        }
    }

    /// Edge of one grid cell in canvas pixels.
    pub fn cell_pixels(&self) -> u32 {
        (self.tile_size * self.drawing_scale).max(1)
    }

    /// Maps a page position onto the canvas, clamping to `[0, size - 1]`.
    pub fn to_pixel(&self, event: PointerEvent) -> PixelPosition {
        let zoom = if self.zoom > 0.0 { self.zoom } else { 1.0 };
        PixelPosition {
            x: clamp_axis((event.page_x - self.canvas_left) / zoom, self.width),
            y: clamp_axis((event.page_y - self.canvas_top) / zoom, self.height),
        }
    }

    pub fn to_cell(&self, pixel: PixelPosition, camera: Camera) -> GridCell {
        let scale = self.cell_pixels();
        GridCell::new(
            camera.grid_x + (pixel.x / scale) as i32,
            camera.grid_y + (pixel.y / scale) as i32,
        )
    }
}

fn clamp_axis(value: f64, size: u32) -> u32 {
    let max = f64::from(size.saturating_sub(1));
    value.round().clamp(0.0, max) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> ScreenLayout {
        ScreenLayout {
            canvas_left: 10.0,
            canvas_top: 20.0,
            zoom: 2.0,
            width: 960,
            height: 480,
            tile_size: 16,
            drawing_scale: 3,
        }
    }

    #[test]
    fn pixels_are_unzoomed_and_rounded() {
        let pixel = layout().to_pixel(PointerEvent::new(110.6, 120.0));
        assert_eq!(pixel, PixelPosition { x: 50, y: 50 });
    }

    #[test]
    fn pixels_clamp_to_canvas() {
        let layout = layout();
        assert_eq!(
            layout.to_pixel(PointerEvent::new(5000.0, 5000.0)),
            PixelPosition { x: 959, y: 479 }
        );
        assert_eq!(
            layout.to_pixel(PointerEvent::new(-40.0, 0.0)),
            PixelPosition { x: 0, y: 0 }
        );
    }

    #[test]
    fn cells_offset_by_camera() {
        let layout = layout();
        let cell = layout.to_cell(PixelPosition { x: 100, y: 47 }, Camera::new(30, -4));
        assert_eq!(cell, GridCell::new(32, -4));
    }
}
