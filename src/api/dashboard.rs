use std::sync::Arc;

use tracing::{debug, info, trace};

use crate::core::{EncodingTag, LongTable, MeltColumns, RawTable, Viewport, melt};
use crate::error::{DashboardError, DashboardResult};
use crate::render::{RenderFrame, Renderer};

use super::{
    ChartMode, ChartView, ColumnSelection, DashboardConfig, DashboardSnapshot, DashboardStyle,
    FilterSelection, TableCache, TableView, build_chart_frame, shared_table_cache,
};

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

/// Everything the page shows below the sidebar for the current state.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub encoding: EncodingTag,
    pub raw_preview: TableView,
    pub chart_mode: ChartMode,
    pub chart: ChartView,
    pub long_table: LongTable,
}

impl DashboardView {
    #[must_use]
    pub fn long_table_view(&self) -> TableView {
        TableView::long_table(&self.long_table)
    }
}

/// One dashboard session: the loaded table plus all widget state.
///
/// Every setter leaves the session consistent; [`Self::view`] recomputes the
/// long table and the chart from scratch.
pub struct Dashboard<R: Renderer> {
    renderer: R,
    config: DashboardConfig,
    style: DashboardStyle,
    table: Arc<RawTable>,
    columns: ColumnSelection,
    filters: FilterSelection,
    chart_mode: ChartMode,
}

impl<R: Renderer> Dashboard<R> {
    /// Loads `config.csv_path` through the process-wide table cache.
    pub fn open(renderer: R, config: DashboardConfig) -> DashboardResult<Self> {
        Self::open_with_cache(renderer, config, shared_table_cache())
    }

    pub fn open_with_cache(
        renderer: R,
        config: DashboardConfig,
        cache: &TableCache,
    ) -> DashboardResult<Self> {
        config.validate()?;
        let table = cache.get_or_load(&config.csv_path)?;
        Self::from_table(renderer, config, table)
    }

    /// Starts a session over an already loaded table.
    pub fn from_table(
        renderer: R,
        config: DashboardConfig,
        table: Arc<RawTable>,
    ) -> DashboardResult<Self> {
        config.validate()?;
        let columns = ColumnSelection::guess(table.columns(), &config.column_hints())?;
        let filters = FilterSelection::with_defaults(
            &table,
            columns.year_column(),
            columns.region_column(),
            &columns.transport_candidates(),
            config.selection_defaults(),
        )?;
        info!(
            encoding = %table.encoding(),
            rows = table.row_count(),
            columns = table.columns().len(),
            "dashboard session started"
        );

        Ok(Self {
            renderer,
            chart_mode: config.initial_chart_mode,
            config,
            style: DashboardStyle::default(),
            table,
            columns,
            filters,
        })
    }

    #[must_use]
    pub fn table(&self) -> &RawTable {
        &self.table
    }

    #[must_use]
    pub fn encoding(&self) -> EncodingTag {
        self.table.encoding()
    }

    #[must_use]
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    #[must_use]
    pub fn columns(&self) -> &ColumnSelection {
        &self.columns
    }

    #[must_use]
    pub fn filters(&self) -> &FilterSelection {
        &self.filters
    }

    #[must_use]
    pub fn chart_mode(&self) -> ChartMode {
        self.chart_mode
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.config.viewport
    }

    #[must_use]
    pub fn style(&self) -> DashboardStyle {
        self.style
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    pub fn set_style(&mut self, style: DashboardStyle) -> DashboardResult<()> {
        style.validate()?;
        self.style = style;
        Ok(())
    }

    pub fn set_viewport(&mut self, viewport: Viewport) -> DashboardResult<()> {
        if !viewport.is_valid() {
            return Err(DashboardError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        self.config.viewport = viewport;
        Ok(())
    }

    /// Changes the year column. A different choice resets every filter.
    pub fn set_year_column(&mut self, name: &str) -> DashboardResult<()> {
        if self.columns.set_year_column(name)? {
            self.rebuild_filters()?;
        }
        Ok(())
    }

    /// Changes the region column. A different choice resets every filter.
    pub fn set_region_column(&mut self, name: &str) -> DashboardResult<()> {
        if self.columns.set_region_column(name)? {
            self.rebuild_filters()?;
        }
        Ok(())
    }

    pub fn set_selected_years<I, S>(&mut self, values: I) -> DashboardResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.filters.years.set_selected(values)
    }

    pub fn set_selected_regions<I, S>(&mut self, values: I) -> DashboardResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.filters.regions.set_selected(values)
    }

    pub fn set_selected_transports<I, S>(&mut self, values: I) -> DashboardResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.filters.transports.set_selected(values)
    }

    pub fn toggle_year(&mut self, value: &str, selected: bool) -> DashboardResult<()> {
        self.filters.years.toggle(value, selected)
    }

    pub fn toggle_region(&mut self, value: &str, selected: bool) -> DashboardResult<()> {
        self.filters.regions.toggle(value, selected)
    }

    pub fn toggle_transport(&mut self, value: &str, selected: bool) -> DashboardResult<()> {
        self.filters.transports.toggle(value, selected)
    }

    pub fn set_chart_mode(&mut self, mode: ChartMode) {
        if self.chart_mode != mode {
            debug!(from = ?self.chart_mode, to = ?mode, "chart mode changed");
        }
        self.chart_mode = mode;
    }

    /// First `preview_rows` rows of the raw table. Available even when the
    /// rest of the page cannot be computed.
    #[must_use]
    pub fn raw_preview(&self) -> TableView {
        TableView::raw_preview(&self.table, self.config.preview_rows)
    }

    /// Filtered and melted table over every transport candidate, coerced to
    /// numbers.
    pub fn long_table(&self) -> DashboardResult<LongTable> {
        let transports = self.columns.require_transport_candidates()?;
        let melted = melt(
            &self.table,
            MeltColumns {
                year: self.columns.year_column(),
                region: self.columns.region_column(),
                transports: &transports,
            },
            |year, region| self.filters.keeps_row(year, region),
        )?;
        let long_table = LongTable::coerce(melted);
        trace!(
            records = long_table.len(),
            present = long_table.present_value_count(),
            "recomputed long table"
        );
        Ok(long_table)
    }

    pub fn view(&self) -> DashboardResult<DashboardView> {
        let long_table = self.long_table()?;
        let chart = ChartView::build(
            &long_table,
            &self.filters.transports.selected(),
            self.chart_mode,
        );

        Ok(DashboardView {
            encoding: self.encoding(),
            raw_preview: self.raw_preview(),
            chart_mode: self.chart_mode,
            chart,
            long_table,
        })
    }

    /// Chart frame for the current state; `None` when the chart shows a warning.
    pub fn chart_frame(&self) -> DashboardResult<Option<RenderFrame>> {
        let view = self.view()?;
        build_chart_frame(&view.chart, self.config.viewport, &self.style)
    }

    /// Draws the chart. Returns whether a frame was drawn.
    pub fn render(&mut self) -> DashboardResult<bool> {
        let Some(frame) = self.chart_frame()? else {
            return Ok(false);
        };
        self.renderer.render(&frame)?;
        trace!(
            lines = frame.lines.len(),
            rects = frame.rects.len(),
            texts = frame.texts.len(),
            "chart rendered"
        );
        Ok(true)
    }

    /// Draws the chart into an external cairo context (GTK draw callbacks).
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(&mut self, context: &cairo::Context) -> DashboardResult<bool>
    where
        R: CairoContextRenderer,
    {
        let Some(frame) = self.chart_frame()? else {
            return Ok(false);
        };
        self.renderer.render_on_cairo_context(context, &frame)?;
        Ok(true)
    }

    #[must_use]
    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            encoding: self.encoding(),
            year_column: self.columns.year_column().to_owned(),
            region_column: self.columns.region_column().to_owned(),
            selected_years: self.filters.years.selected(),
            selected_regions: self.filters.regions.selected(),
            selected_transports: self.filters.transports.selected(),
            chart_mode: self.chart_mode,
        }
    }

    /// Restores widget state. Nothing changes when any column or option is
    /// unknown.
    pub fn apply_snapshot(&mut self, snapshot: &DashboardSnapshot) -> DashboardResult<()> {
        let mut columns = self.columns.clone();
        columns.set_year_column(&snapshot.year_column)?;
        columns.set_region_column(&snapshot.region_column)?;

        let mut filters = FilterSelection::with_defaults(
            &self.table,
            columns.year_column(),
            columns.region_column(),
            &columns.transport_candidates(),
            self.config.selection_defaults(),
        )?;
        filters.years.set_selected(&snapshot.selected_years)?;
        filters.regions.set_selected(&snapshot.selected_regions)?;
        filters.transports.set_selected(&snapshot.selected_transports)?;

        self.columns = columns;
        self.filters = filters;
        self.chart_mode = snapshot.chart_mode;
        debug!(
            year = %self.columns.year_column(),
            region = %self.columns.region_column(),
            mode = ?self.chart_mode,
            "applied snapshot"
        );
        Ok(())
    }

    fn rebuild_filters(&mut self) -> DashboardResult<()> {
        self.filters = FilterSelection::with_defaults(
            &self.table,
            self.columns.year_column(),
            self.columns.region_column(),
            &self.columns.transport_candidates(),
            self.config.selection_defaults(),
        )?;
        Ok(())
    }
}
