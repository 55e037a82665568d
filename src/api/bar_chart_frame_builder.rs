use tracing::debug;

use crate::core::{Viewport, YearTotal};
use crate::error::DashboardResult;
use crate::render::{RectPrimitive, RenderFrame};

use super::chart_frame_builder::{
    ChartLayout, LegendEntry, append_axes, append_legend, value_extent,
};
use super::render_style::DashboardStyle;
use super::{StackedBarData, TOTAL_AXIS_LABEL, VALUE_AXIS_LABEL};

/// One bar per year, spanning from zero to the year's total.
pub(super) fn build_bar_sum_frame(
    totals: &[YearTotal],
    viewport: Viewport,
    style: &DashboardStyle,
) -> DashboardResult<RenderFrame> {
    let extent = value_extent(totals.iter().map(|total| total.total));
    let layout = ChartLayout::new(viewport, style, totals.len(), extent, false)?;
    let years: Vec<String> = totals.iter().map(|total| total.year.clone()).collect();

    let mut frame = RenderFrame::new(viewport);
    append_axes(&mut frame, &layout, style, &years, TOTAL_AXIS_LABEL)?;

    let bar_width = layout.band_width() * style.bar_width_ratio;
    let zero_y = layout.value_to_y(0.0)?;
    for (index, total) in totals.iter().enumerate() {
        let Some(y) = layout.data_value_to_y(total.total)? else {
            debug!(year = %total.year, total = total.total, "skipping non-finite bar");
            continue;
        };
        let x = layout.category_x(index)? - bar_width / 2.0;
        frame.rects.push(RectPrimitive::new(
            x,
            y.min(zero_y),
            bar_width,
            (y - zero_y).abs(),
            style.bar_sum_color,
        ));
    }

    Ok(frame)
}

/// Bars per year with one segment per transport. Positive totals stack
/// upward from zero, negative totals downward. A segment whose stack end is
/// not finite is skipped.
pub(super) fn build_stacked_bar_frame(
    data: &StackedBarData,
    viewport: Viewport,
    style: &DashboardStyle,
) -> DashboardResult<RenderFrame> {
    let stacks = stack_extents(data);
    let extent = value_extent(stacks.iter().flat_map(|(low, high)| [*low, *high]));
    let layout = ChartLayout::new(viewport, style, data.years.len(), extent, true)?;

    let mut frame = RenderFrame::new(viewport);
    append_axes(&mut frame, &layout, style, &data.years, VALUE_AXIS_LABEL)?;

    let bar_width = layout.band_width() * style.bar_width_ratio;
    for (year_index, year) in data.years.iter().enumerate() {
        let x = layout.category_x(year_index)? - bar_width / 2.0;
        let mut positive_base = 0.0;
        let mut negative_base = 0.0;

        for (transport_index, transport) in data.transports.iter().enumerate() {
            let Some(segment) = data
                .segments
                .iter()
                .find(|segment| segment.year == *year && segment.transport == *transport)
            else {
                continue;
            };

            let base = if segment.total >= 0.0 {
                &mut positive_base
            } else {
                &mut negative_base
            };
            let from = *base;
            let to = from + segment.total;
            let (Some(from_y), Some(to_y)) =
                (layout.data_value_to_y(from)?, layout.data_value_to_y(to)?)
            else {
                debug!(
                    year = %segment.year,
                    transport = %segment.transport,
                    total = segment.total,
                    "skipping non-finite stacked segment"
                );
                continue;
            };
            *base = to;

            frame.rects.push(RectPrimitive::new(
                x,
                from_y.min(to_y),
                bar_width,
                (to_y - from_y).abs(),
                DashboardStyle::series_color(transport_index),
            ));
        }
    }

    let legend: Vec<LegendEntry> = data
        .transports
        .iter()
        .enumerate()
        .map(|(index, transport)| LegendEntry {
            label: transport.clone(),
            color: DashboardStyle::series_color(index),
            dash: None,
        })
        .collect();
    append_legend(&mut frame, &layout, style, &legend);

    Ok(frame)
}

/// Per-year (negative stack bottom, positive stack top).
fn stack_extents(data: &StackedBarData) -> Vec<(f64, f64)> {
    data.years
        .iter()
        .map(|year| {
            data.segments
                .iter()
                .filter(|segment| segment.year == *year && segment.total.is_finite())
                .fold((0.0, 0.0), |(low, high), segment| {
                    if segment.total >= 0.0 {
                        (low, high + segment.total)
                    } else {
                        (low + segment.total, high)
                    }
                })
        })
        .collect()
}
