use crate::core::Viewport;
use crate::error::DashboardResult;
use crate::render::{LinePrimitive, RectPrimitive, RenderFrame};

use super::chart_frame_builder::{
    ChartLayout, LegendEntry, append_axes, append_dashed_line, append_legend, value_extent,
};
use super::render_style::{DashboardStyle, dash_pattern};
use super::{LineChartData, VALUE_AXIS_LABEL};

/// Lines over the categorical year axis: color per region, dash per
/// transport, round markers on every present value. Non-finite values are
/// gaps, like missing ones.
pub(super) fn build_line_chart_frame(
    data: &LineChartData,
    viewport: Viewport,
    style: &DashboardStyle,
) -> DashboardResult<RenderFrame> {
    let extent = value_extent(
        data.series
            .iter()
            .flat_map(|series| series.points.iter().filter_map(|point| point.value)),
    );
    let layout = ChartLayout::new(viewport, style, data.years.len(), extent, true)?;

    let mut frame = RenderFrame::new(viewport);
    append_axes(&mut frame, &layout, style, &data.years, VALUE_AXIS_LABEL)?;

    let mut legend = Vec::with_capacity(data.series.len());
    for series in &data.series {
        let color = DashboardStyle::series_color(series.region_index);
        let pattern = dash_pattern(series.transport_index);

        let mut mapped = Vec::with_capacity(series.points.len());
        for point in &series.points {
            let y = match point.value {
                Some(value) => layout.data_value_to_y(value)?,
                None => None,
            };
            let position = match y {
                Some(y) => Some((layout.category_x(point.category)?, y)),
                None => None,
            };
            mapped.push(position);
        }

        for pair in mapped.windows(2) {
            if let (Some((x1, y1)), Some((x2, y2))) = (pair[0], pair[1]) {
                append_dashed_line(
                    &mut frame,
                    LinePrimitive::new(x1, y1, x2, y2, style.series_line_width, color),
                    &pattern,
                );
            }
        }

        let half = style.marker_size_px / 2.0;
        for (x, y) in mapped.iter().flatten() {
            frame.rects.push(
                RectPrimitive::new(x - half, y - half, style.marker_size_px, style.marker_size_px, color)
                    .with_corner_radius(half),
            );
        }

        legend.push(LegendEntry {
            label: format!("{}, {}", series.region, series.transport),
            color,
            dash: Some(pattern),
        });
    }

    append_legend(&mut frame, &layout, style, &legend);
    Ok(frame)
}
