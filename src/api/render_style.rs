use smallvec::{SmallVec, smallvec};

use crate::error::{DashboardError, DashboardResult};
use crate::render::Color;

/// On/off lengths in pixels; empty means a solid stroke.
pub type DashPattern = SmallVec<[f64; 4]>;

/// Qualitative palette cycled per region (line mode) or transport (stacked mode).
pub const SERIES_PALETTE: [Color; 10] = [
    Color::from_rgb_u32(0x636EFA),
    Color::from_rgb_u32(0xEF553B),
    Color::from_rgb_u32(0x00CC96),
    Color::from_rgb_u32(0xAB63FA),
    Color::from_rgb_u32(0xFFA15A),
    Color::from_rgb_u32(0x19D3F3),
    Color::from_rgb_u32(0xFF6692),
    Color::from_rgb_u32(0xB6E880),
    Color::from_rgb_u32(0xFF97FF),
    Color::from_rgb_u32(0xFECB52),
];

/// Dash pattern cycled per transport in line mode.
#[must_use]
pub fn dash_pattern(transport_index: usize) -> DashPattern {
    match transport_index % 6 {
        0 => SmallVec::new(),
        1 => smallvec![2.0, 3.0],
        2 => smallvec![8.0, 4.0],
        3 => smallvec![14.0, 4.0],
        4 => smallvec![8.0, 3.0, 2.0, 3.0],
        _ => smallvec![14.0, 3.0, 2.0, 3.0],
    }
}

/// Colors, sizes, and margins shared by every chart frame builder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashboardStyle {
    pub axis_line_color: Color,
    pub grid_line_color: Color,
    pub axis_label_color: Color,
    pub axis_title_color: Color,
    pub bar_sum_color: Color,
    pub axis_line_width: f64,
    pub grid_line_width: f64,
    pub series_line_width: f64,
    pub marker_size_px: f64,
    pub tick_label_font_size_px: f64,
    pub axis_title_font_size_px: f64,
    pub legend_font_size_px: f64,
    pub legend_swatch_px: f64,
    pub legend_row_height_px: f64,
    pub legend_width_px: f64,
    pub margin_left_px: f64,
    pub margin_right_px: f64,
    pub margin_top_px: f64,
    pub margin_bottom_px: f64,
    /// Share of each category band occupied by its bar.
    pub bar_width_ratio: f64,
    pub min_category_label_spacing_px: f64,
    pub value_tick_target_spacing_px: f64,
}

impl Default for DashboardStyle {
    fn default() -> Self {
        Self {
            axis_line_color: Color::rgb(0.35, 0.38, 0.44),
            grid_line_color: Color::rgb(0.89, 0.92, 0.95),
            axis_label_color: Color::rgb(0.16, 0.18, 0.22),
            axis_title_color: Color::rgb(0.10, 0.12, 0.16),
            bar_sum_color: SERIES_PALETTE[0],
            axis_line_width: 1.0,
            grid_line_width: 1.0,
            series_line_width: 2.0,
            marker_size_px: 6.0,
            tick_label_font_size_px: 11.0,
            axis_title_font_size_px: 13.0,
            legend_font_size_px: 11.0,
            legend_swatch_px: 10.0,
            legend_row_height_px: 18.0,
            legend_width_px: 180.0,
            margin_left_px: 84.0,
            margin_right_px: 16.0,
            margin_top_px: 16.0,
            margin_bottom_px: 56.0,
            bar_width_ratio: 0.7,
            min_category_label_spacing_px: 44.0,
            value_tick_target_spacing_px: 48.0,
        }
    }
}

impl DashboardStyle {
    #[must_use]
    pub fn series_color(index: usize) -> Color {
        SERIES_PALETTE[index % SERIES_PALETTE.len()]
    }

    pub fn validate(&self) -> DashboardResult<()> {
        for color in [
            self.axis_line_color,
            self.grid_line_color,
            self.axis_label_color,
            self.axis_title_color,
            self.bar_sum_color,
        ] {
            color.validate()?;
        }

        for (name, value) in [
            ("axis_line_width", self.axis_line_width),
            ("grid_line_width", self.grid_line_width),
            ("series_line_width", self.series_line_width),
            ("marker_size_px", self.marker_size_px),
            ("tick_label_font_size_px", self.tick_label_font_size_px),
            ("axis_title_font_size_px", self.axis_title_font_size_px),
            ("legend_font_size_px", self.legend_font_size_px),
            ("legend_swatch_px", self.legend_swatch_px),
            ("legend_row_height_px", self.legend_row_height_px),
            ("value_tick_target_spacing_px", self.value_tick_target_spacing_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(DashboardError::InvalidData(format!(
                    "style `{name}` must be finite and > 0"
                )));
            }
        }

        for (name, value) in [
            ("legend_width_px", self.legend_width_px),
            ("margin_left_px", self.margin_left_px),
            ("margin_right_px", self.margin_right_px),
            ("margin_top_px", self.margin_top_px),
            ("margin_bottom_px", self.margin_bottom_px),
            ("min_category_label_spacing_px", self.min_category_label_spacing_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(DashboardError::InvalidData(format!(
                    "style `{name}` must be finite and >= 0"
                )));
            }
        }

        if !self.bar_width_ratio.is_finite()
            || self.bar_width_ratio <= 0.0
            || self.bar_width_ratio > 1.0
        {
            return Err(DashboardError::InvalidData(
                "style `bar_width_ratio` must be in (0, 1]".to_owned(),
            ));
        }

        Ok(())
    }
}
