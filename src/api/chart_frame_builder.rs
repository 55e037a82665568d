use std::f64::consts::FRAC_PI_2;

use ordered_float::OrderedFloat;

use crate::core::{BandScale, LinearScale, PlotRect, Viewport};
use crate::error::{DashboardError, DashboardResult};
use crate::render::{Color, LinePrimitive, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive};

use super::axis_ticks::{
    VALUE_AXIS_MAX_TICKS, VALUE_AXIS_MIN_TICKS, ValueAxisTicks, axis_tick_target_count,
    format_tick_value, select_ticks_with_min_spacing, value_axis_ticks,
};
use super::bar_chart_frame_builder::{build_bar_sum_frame, build_stacked_bar_frame};
use super::line_chart_frame_builder::build_line_chart_frame;
use super::render_style::{DashPattern, DashboardStyle};
use super::{ChartView, TOTAL_AXIS_LABEL, VALUE_AXIS_LABEL, YEAR_AXIS_LABEL};

/// Lays out the chart for `view`. A warning view draws nothing and yields `None`.
pub fn build_chart_frame(
    view: &ChartView,
    viewport: Viewport,
    style: &DashboardStyle,
) -> DashboardResult<Option<RenderFrame>> {
    style.validate()?;
    let frame = match view {
        ChartView::Warning(_) => return Ok(None),
        ChartView::Line(data) => build_line_chart_frame(data, viewport, style)?,
        ChartView::BarSum(totals) => build_bar_sum_frame(totals, viewport, style)?,
        ChartView::StackedBar(data) => build_stacked_bar_frame(data, viewport, style)?,
    };
    Ok(Some(frame))
}

/// Plot rectangle plus the category and value scales of one chart.
#[derive(Debug, Clone)]
pub(super) struct ChartLayout {
    pub(super) plot: PlotRect,
    categories: BandScale,
    values: LinearScale,
    value_ticks: ValueAxisTicks,
}

impl ChartLayout {
    pub(super) fn new(
        viewport: Viewport,
        style: &DashboardStyle,
        category_count: usize,
        value_extent: Option<(f64, f64)>,
        with_legend: bool,
    ) -> DashboardResult<Self> {
        if !viewport.is_valid() {
            return Err(DashboardError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let legend_width = if with_legend { style.legend_width_px } else { 0.0 };
        let plot = PlotRect {
            left: style.margin_left_px,
            top: style.margin_top_px,
            right: f64::from(viewport.width) - style.margin_right_px - legend_width,
            bottom: f64::from(viewport.height) - style.margin_bottom_px,
        };
        if !plot.is_valid() {
            return Err(DashboardError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let tick_count = axis_tick_target_count(
            plot.height(),
            style.value_tick_target_spacing_px,
            VALUE_AXIS_MIN_TICKS,
            VALUE_AXIS_MAX_TICKS,
        );
        let (min, max) = value_extent.unwrap_or((0.0, 1.0));
        let value_ticks = value_axis_ticks(min, max, tick_count);
        let values = LinearScale::new(value_ticks.domain.0, value_ticks.domain.1)?;
        let categories = BandScale::new(category_count.max(1), (plot.left, plot.right))?;

        Ok(Self {
            plot,
            categories,
            values,
            value_ticks,
        })
    }

    pub(super) fn value_to_y(&self, value: f64) -> DashboardResult<f64> {
        self.values
            .domain_to_pixel(value, (self.plot.bottom, self.plot.top))
    }

    /// Pixel row for a data value, or `None` when the value or its pixel is
    /// not finite. Such values are left out of the chart.
    pub(super) fn data_value_to_y(&self, value: f64) -> DashboardResult<Option<f64>> {
        if !value.is_finite() {
            return Ok(None);
        }
        let y = self.value_to_y(value)?;
        Ok(y.is_finite().then_some(y))
    }

    pub(super) fn category_x(&self, index: usize) -> DashboardResult<f64> {
        self.categories.center(index)
    }

    pub(super) fn band_width(&self) -> f64 {
        self.categories.band_width()
    }
}

/// Min/max over finite values, or `None` when there are none.
pub(super) fn value_extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    let mut extent: Option<(OrderedFloat<f64>, OrderedFloat<f64>)> = None;
    for value in values.into_iter().filter(|value| value.is_finite()) {
        let value = OrderedFloat(value);
        extent = Some(match extent {
            Some((min, max)) => (min.min(value), max.max(value)),
            None => (value, value),
        });
    }
    extent.map(|(min, max)| (min.into_inner(), max.into_inner()))
}

/// Grid, axis lines, tick labels, category labels, and both axis titles.
pub(super) fn append_axes(
    frame: &mut RenderFrame,
    layout: &ChartLayout,
    style: &DashboardStyle,
    categories: &[String],
    value_axis_title: &str,
) -> DashboardResult<()> {
    let plot = layout.plot;

    for tick in &layout.value_ticks.ticks {
        let y = layout.value_to_y(*tick)?;
        frame.lines.push(LinePrimitive::new(
            plot.left,
            y,
            plot.right,
            y,
            style.grid_line_width,
            style.grid_line_color,
        ));
        frame.texts.push(TextPrimitive::new(
            format_tick_value(*tick, layout.value_ticks.step),
            plot.left - 6.0,
            y - style.tick_label_font_size_px * 0.6,
            style.tick_label_font_size_px,
            style.axis_label_color,
            TextHAlign::Right,
        ));
    }

    frame.lines.push(LinePrimitive::new(
        plot.left,
        plot.bottom,
        plot.right,
        plot.bottom,
        style.axis_line_width,
        style.axis_line_color,
    ));
    frame.lines.push(LinePrimitive::new(
        plot.left,
        plot.top,
        plot.left,
        plot.bottom,
        style.axis_line_width,
        style.axis_line_color,
    ));

    let mut category_ticks = Vec::with_capacity(categories.len());
    for index in 0..categories.len() {
        category_ticks.push((index, layout.category_x(index)?));
    }
    for (index, x) in
        select_ticks_with_min_spacing(category_ticks, style.min_category_label_spacing_px)
    {
        let label = &categories[index];
        if label.is_empty() {
            continue;
        }
        frame.lines.push(LinePrimitive::new(
            x,
            plot.bottom,
            x,
            plot.bottom + 4.0,
            style.axis_line_width,
            style.axis_line_color,
        ));
        frame.texts.push(TextPrimitive::new(
            label.clone(),
            x,
            plot.bottom + 6.0,
            style.tick_label_font_size_px,
            style.axis_label_color,
            TextHAlign::Center,
        ));
    }

    frame.texts.push(TextPrimitive::new(
        YEAR_AXIS_LABEL,
        (plot.left + plot.right) / 2.0,
        plot.bottom + 6.0 + style.tick_label_font_size_px * 1.6,
        style.axis_title_font_size_px,
        style.axis_title_color,
        TextHAlign::Center,
    ));
    frame.texts.push(
        TextPrimitive::new(
            value_axis_title,
            style.margin_left_px * 0.15,
            (plot.top + plot.bottom) / 2.0,
            style.axis_title_font_size_px,
            style.axis_title_color,
            TextHAlign::Center,
        )
        .rotated(-FRAC_PI_2),
    );

    Ok(())
}

/// One legend row: swatch (solid or dashed line) followed by its label.
#[derive(Debug, Clone)]
pub(super) struct LegendEntry {
    pub(super) label: String,
    pub(super) color: Color,
    pub(super) dash: Option<DashPattern>,
}

pub(super) fn append_legend(
    frame: &mut RenderFrame,
    layout: &ChartLayout,
    style: &DashboardStyle,
    entries: &[LegendEntry],
) {
    let left = layout.plot.right + style.margin_right_px;
    let swatch = style.legend_swatch_px;

    for (row, entry) in entries.iter().enumerate() {
        let top = layout.plot.top + style.legend_row_height_px * row as f64;
        if top + style.legend_row_height_px > layout.plot.bottom {
            break;
        }
        let center_y = top + style.legend_row_height_px / 2.0;

        match &entry.dash {
            Some(pattern) => append_dashed_line(
                frame,
                LinePrimitive::new(
                    left,
                    center_y,
                    left + swatch * 2.0,
                    center_y,
                    style.series_line_width,
                    entry.color,
                ),
                pattern,
            ),
            None => frame.rects.push(RectPrimitive::new(
                left,
                center_y - swatch / 2.0,
                swatch * 2.0,
                swatch,
                entry.color,
            )),
        }

        if !entry.label.is_empty() {
            frame.texts.push(TextPrimitive::new(
                entry.label.clone(),
                left + swatch * 2.0 + 6.0,
                center_y - style.legend_font_size_px * 0.6,
                style.legend_font_size_px,
                style.axis_label_color,
                TextHAlign::Left,
            ));
        }
    }
}

/// Splits `line` into the "on" pieces of `pattern`. An empty pattern draws the
/// line whole.
pub(super) fn append_dashed_line(frame: &mut RenderFrame, line: LinePrimitive, pattern: &[f64]) {
    let length = line.length();
    let period: f64 = pattern.iter().sum();
    if pattern.is_empty() || length <= 0.0 || period <= 0.0 {
        frame.lines.push(line);
        return;
    }

    let (dx, dy) = ((line.x2 - line.x1) / length, (line.y2 - line.y1) / length);
    let mut offset = 0.0;
    let mut slot = 0usize;
    while offset < length {
        let run = pattern[slot % pattern.len()];
        let end = (offset + run).min(length);
        if slot % 2 == 0 && end > offset {
            frame.lines.push(LinePrimitive::new(
                line.x1 + dx * offset,
                line.y1 + dy * offset,
                line.x1 + dx * end,
                line.y1 + dy * end,
                line.stroke_width,
                line.color,
            ));
        }
        offset = end;
        slot += 1;
    }
}

/// Value-axis title for each drawable view.
#[must_use]
pub fn value_axis_title(view: &ChartView) -> Option<&'static str> {
    match view {
        ChartView::Line(_) | ChartView::StackedBar(_) => Some(VALUE_AXIS_LABEL),
        ChartView::BarSum(_) => Some(TOTAL_AXIS_LABEL),
        ChartView::Warning(_) => None,
    }
}
