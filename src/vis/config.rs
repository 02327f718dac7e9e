//! Chart appearance settings

/// Settings shared by all rendered charts
#[derive(Debug, Clone)]
pub struct PlotSettings {
    /// Width of the image (pixels)
    pub width: u32,
    /// Height of the image (pixels)
    pub height: u32,
    /// Show grid lines
    pub show_grid: bool,
    /// Color palette, cycled per series
    pub color_palette: Vec<(u8, u8, u8)>,
}

impl Default for PlotSettings {
    fn default() -> Self {
        PlotSettings {
            width: 1024,
            height: 640,
            show_grid: true,
            color_palette: vec![
                (0, 123, 255),  // Blue
                (46, 204, 113), // Green
                (255, 99, 71),  // Red
                (243, 156, 18), // Orange
                (142, 68, 173), // Purple
                (52, 152, 219), // Cyan
            ],
        }
    }
}

impl PlotSettings {
    /// Settings with an explicit image size
    pub fn sized(width: u32, height: u32) -> Self {
        PlotSettings {
            width,
            height,
            ..Default::default()
        }
    }

    /// Palette color for a series index, cycling through the palette
    pub fn color(&self, index: usize) -> (u8, u8, u8) {
        self.color_palette[index % self.color_palette.len()]
    }
}
