//! GTK4 rendition of the dashboard page: a filter sidebar next to the
//! preview table, the chart, and the long table.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gtk4 as gtk;
use gtk4::prelude::*;
use tracing::warn;

use crate::api::page_text::{
    CHART_HEADER, CHART_MODE_LABEL, LONG_TABLE_LABEL, PAGE_CAPTION, PAGE_TITLE,
    REGION_COLUMN_LABEL, REGION_SELECT_LABEL, SIDEBAR_HEADER, TABLES_HEADER,
    TRANSPORT_SECTION_LABEL, TRANSPORT_SELECT_LABEL, WINDOW_TITLE, YEAR_COLUMN_LABEL,
    YEAR_SELECT_LABEL, encoding_line, halting_message, preview_header,
};
use crate::api::{ChartMode, Dashboard, DashboardConfig, MultiSelect, TableView};
use crate::core::Viewport;
use crate::error::DashboardResult;
use crate::render::CairoRenderer;

pub const APPLICATION_ID: &str = "rs.transit_viz.dashboard";

const SIDEBAR_WIDTH_PX: i32 = 300;
const LONG_TABLE_MAX_HEIGHT_PX: i32 = 420;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FilterKind {
    Year,
    Region,
    Transport,
}

struct PageState {
    dashboard: RefCell<Dashboard<CairoRenderer>>,
    sidebar: gtk::Box,
    main: gtk::Box,
}

/// Top-level window of the dashboard page.
pub struct DashboardWindow {
    window: gtk::ApplicationWindow,
    state: Option<Rc<PageState>>,
}

impl DashboardWindow {
    /// Builds the page for `config`. A load failure yields a window that only
    /// shows the error message.
    #[must_use]
    pub fn new(app: &gtk::Application, config: DashboardConfig) -> Self {
        let viewport = config.viewport;
        let window = gtk::ApplicationWindow::builder()
            .application(app)
            .title(WINDOW_TITLE)
            .default_width(viewport.width as i32 + SIDEBAR_WIDTH_PX + 48)
            .default_height(900)
            .build();

        let dashboard = CairoRenderer::new(viewport.width as i32, viewport.height as i32)
            .and_then(|renderer| Dashboard::open(renderer, config));
        let dashboard = match dashboard {
            Ok(dashboard) => dashboard,
            Err(err) => {
                warn!(error = %err, "dashboard failed to start");
                let page = gtk::Box::new(gtk::Orientation::Vertical, 12);
                page.set_margin_top(24);
                page.set_margin_start(24);
                page.append(&heading(PAGE_TITLE, "title-1"));
                page.append(&error_label(&halting_message(&err)));
                window.set_child(Some(&page));
                return Self {
                    window,
                    state: None,
                };
            }
        };

        let sidebar = gtk::Box::new(gtk::Orientation::Vertical, 8);
        sidebar.set_margin_top(16);
        sidebar.set_margin_bottom(16);
        sidebar.set_margin_start(16);
        sidebar.set_margin_end(16);
        let main = gtk::Box::new(gtk::Orientation::Vertical, 10);
        main.set_margin_top(16);
        main.set_margin_bottom(16);
        main.set_margin_start(16);
        main.set_margin_end(16);

        let sidebar_scroll = gtk::ScrolledWindow::builder()
            .child(&sidebar)
            .hscrollbar_policy(gtk::PolicyType::Never)
            .min_content_width(SIDEBAR_WIDTH_PX)
            .build();
        let main_scroll = gtk::ScrolledWindow::builder()
            .child(&main)
            .hexpand(true)
            .vexpand(true)
            .build();

        let root = gtk::Box::new(gtk::Orientation::Horizontal, 0);
        root.append(&sidebar_scroll);
        root.append(&gtk::Separator::new(gtk::Orientation::Vertical));
        root.append(&main_scroll);
        window.set_child(Some(&root));

        let state = Rc::new(PageState {
            dashboard: RefCell::new(dashboard),
            sidebar,
            main,
        });
        rebuild_sidebar(&state);
        rebuild_main(&state);

        Self {
            window,
            state: Some(state),
        }
    }

    #[must_use]
    pub fn window(&self) -> &gtk::ApplicationWindow {
        &self.window
    }

    /// Whether the table loaded and the page is interactive.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.state.is_some()
    }

    pub fn present(&self) {
        self.window.present();
    }
}

/// Runs the GTK application until its window closes.
pub fn run_dashboard_app(config: DashboardConfig) -> gtk::glib::ExitCode {
    let app = gtk::Application::builder()
        .application_id(APPLICATION_ID)
        .build();
    app.connect_activate(move |app| {
        DashboardWindow::new(app, config.clone()).present();
    });
    app.run_with_args::<&str>(&[])
}

fn rebuild_sidebar(state: &Rc<PageState>) {
    clear_box(&state.sidebar);
    let dashboard = state.dashboard.borrow();
    let sidebar = &state.sidebar;

    sidebar.append(&heading(SIDEBAR_HEADER, "title-3"));
    sidebar.append(&text_label(&encoding_line(dashboard.encoding().label())));

    let columns = dashboard.columns().columns().to_vec();
    let year_index = position_of(&columns, dashboard.columns().year_column());
    let region_index = position_of(&columns, dashboard.columns().region_column());
    sidebar.append(&text_label(YEAR_COLUMN_LABEL));
    sidebar.append(&column_dropdown(state, &columns, year_index, set_year_column));
    sidebar.append(&text_label(REGION_COLUMN_LABEL));
    sidebar.append(&column_dropdown(state, &columns, region_index, set_region_column));

    if dashboard.columns().transport_candidates().is_empty() {
        return;
    }

    let filters = dashboard.filters();
    sidebar.append(&text_label(TRANSPORT_SECTION_LABEL));
    for (title, select, kind) in [
        (TRANSPORT_SELECT_LABEL, &filters.transports, FilterKind::Transport),
        (YEAR_SELECT_LABEL, &filters.years, FilterKind::Year),
        (REGION_SELECT_LABEL, &filters.regions, FilterKind::Region),
    ] {
        sidebar.append(&filter_list(state, title, select, kind));
    }
}

fn rebuild_main(state: &Rc<PageState>) {
    clear_box(&state.main);
    let dashboard = state.dashboard.borrow();
    let main = &state.main;

    main.append(&heading(PAGE_TITLE, "title-1"));
    main.append(&text_label(&preview_header(dashboard.config().preview_rows)));
    main.append(&table_widget(&dashboard.raw_preview(), None));

    let view = match dashboard.view() {
        Ok(view) => view,
        Err(err) => {
            main.append(&error_label(&halting_message(&err)));
            return;
        }
    };

    main.append(&heading(CHART_HEADER, "title-2"));
    main.append(&text_label(CHART_MODE_LABEL));
    main.append(&chart_mode_radios(state, view.chart_mode));

    match view.chart.warning() {
        Some(message) => main.append(&warning_label(message)),
        None => main.append(&chart_area(state, dashboard.viewport())),
    }

    main.append(&heading(TABLES_HEADER, "title-2"));
    main.append(&text_label(LONG_TABLE_LABEL));
    main.append(&table_widget(&view.long_table_view(), Some(LONG_TABLE_MAX_HEIGHT_PX)));

    let caption = text_label(PAGE_CAPTION);
    caption.add_css_class("dim-label");
    main.append(&caption);
}

fn set_year_column(dashboard: &mut Dashboard<CairoRenderer>, name: &str) -> DashboardResult<()> {
    dashboard.set_year_column(name)
}

fn set_region_column(dashboard: &mut Dashboard<CairoRenderer>, name: &str) -> DashboardResult<()> {
    dashboard.set_region_column(name)
}

fn column_dropdown(
    state: &Rc<PageState>,
    columns: &[String],
    selected: u32,
    apply: fn(&mut Dashboard<CairoRenderer>, &str) -> DashboardResult<()>,
) -> gtk::DropDown {
    let names: Vec<&str> = columns.iter().map(String::as_str).collect();
    let dropdown = gtk::DropDown::from_strings(&names);
    dropdown.set_selected(selected);

    let weak = Rc::downgrade(state);
    let columns = columns.to_vec();
    dropdown.connect_selected_notify(move |dropdown| {
        let Some(state) = weak.upgrade() else {
            return;
        };
        let Some(name) = columns.get(dropdown.selected() as usize) else {
            return;
        };
        let result = apply(&mut state.dashboard.borrow_mut(), name);
        if let Err(err) = result {
            warn!(error = %err, column = %name, "column change rejected");
        }
        schedule_rebuild(&weak, true);
    });
    dropdown
}

fn filter_list(
    state: &Rc<PageState>,
    title: &str,
    select: &MultiSelect,
    kind: FilterKind,
) -> gtk::Box {
    let list = gtk::Box::new(gtk::Orientation::Vertical, 2);
    list.set_margin_top(6);
    list.append(&text_label(title));

    for option in select.options() {
        let check = gtk::CheckButton::with_label(option);
        check.set_active(select.is_selected(option));

        let weak = Rc::downgrade(state);
        let option = option.clone();
        check.connect_toggled(move |check| {
            let Some(state) = weak.upgrade() else {
                return;
            };
            let active = check.is_active();
            let result = {
                let mut dashboard = state.dashboard.borrow_mut();
                match kind {
                    FilterKind::Year => dashboard.toggle_year(&option, active),
                    FilterKind::Region => dashboard.toggle_region(&option, active),
                    FilterKind::Transport => dashboard.toggle_transport(&option, active),
                }
            };
            if let Err(err) = result {
                warn!(error = %err, option = %option, "filter change rejected");
            }
            schedule_rebuild(&weak, false);
        });
        list.append(&check);
    }
    list
}

fn chart_mode_radios(state: &Rc<PageState>, current: ChartMode) -> gtk::Box {
    let row = gtk::Box::new(gtk::Orientation::Horizontal, 12);
    let mut group: Option<gtk::CheckButton> = None;

    for mode in ChartMode::ALL {
        let radio = gtk::CheckButton::with_label(mode.label());
        if let Some(first) = &group {
            radio.set_group(Some(first));
        } else {
            group = Some(radio.clone());
        }
        radio.set_active(mode == current);

        let weak = Rc::downgrade(state);
        radio.connect_toggled(move |radio| {
            if !radio.is_active() {
                return;
            }
            let Some(state) = weak.upgrade() else {
                return;
            };
            state.dashboard.borrow_mut().set_chart_mode(mode);
            schedule_rebuild(&weak, false);
        });
        row.append(&radio);
    }
    row
}

fn chart_area(state: &Rc<PageState>, viewport: Viewport) -> gtk::DrawingArea {
    let area = gtk::DrawingArea::new();
    area.set_hexpand(true);
    area.set_content_height(viewport.height as i32);

    let weak = Rc::downgrade(state);
    area.set_draw_func(move |_widget, context, width, height| {
        if width <= 0 || height <= 0 {
            return;
        }
        let Some(state) = weak.upgrade() else {
            return;
        };
        let Ok(mut dashboard) = state.dashboard.try_borrow_mut() else {
            return;
        };

        let viewport = Viewport::new(width as u32, height as u32);
        if dashboard.viewport() != viewport {
            let _ = dashboard.set_viewport(viewport);
        }
        if let Err(err) = dashboard.render_on_cairo_context(context) {
            warn!(error = %err, "chart draw failed");
        }
    });
    area
}

fn table_widget(table: &TableView, max_height: Option<i32>) -> gtk::ScrolledWindow {
    let grid = gtk::Grid::builder()
        .column_spacing(16)
        .row_spacing(2)
        .build();

    for (column, name) in table.columns.iter().enumerate() {
        let header = text_label(name);
        header.add_css_class("heading");
        grid.attach(&header, column as i32 + 1, 0, 1, 1);
    }
    for (row, (label, cells)) in table.index.iter().zip(&table.rows).enumerate() {
        let index = text_label(&label.to_string());
        index.add_css_class("dim-label");
        grid.attach(&index, 0, row as i32 + 1, 1, 1);
        for (column, cell) in cells.iter().enumerate() {
            grid.attach(&text_label(cell), column as i32 + 1, row as i32 + 1, 1, 1);
        }
    }

    let scroll = gtk::ScrolledWindow::builder()
        .child(&grid)
        .vscrollbar_policy(gtk::PolicyType::Never)
        .propagate_natural_height(true)
        .build();
    if let Some(max_height) = max_height {
        scroll.set_vscrollbar_policy(gtk::PolicyType::Automatic);
        scroll.set_max_content_height(max_height);
    }
    scroll
}

/// Rebuilds on idle so the widget that emitted the signal is not destroyed
/// inside its own handler.
fn schedule_rebuild(weak: &Weak<PageState>, sidebar_too: bool) {
    let weak = weak.clone();
    gtk::glib::idle_add_local_once(move || {
        let Some(state) = weak.upgrade() else {
            return;
        };
        if sidebar_too {
            rebuild_sidebar(&state);
        }
        rebuild_main(&state);
    });
}

fn clear_box(container: &gtk::Box) {
    while let Some(child) = container.first_child() {
        container.remove(&child);
    }
}

fn position_of(columns: &[String], name: &str) -> u32 {
    columns
        .iter()
        .position(|column| column == name)
        .unwrap_or_default() as u32
}

fn text_label(text: &str) -> gtk::Label {
    let label = gtk::Label::new(Some(text));
    label.set_xalign(0.0);
    label.set_wrap(true);
    label.set_selectable(true);
    label
}

fn heading(text: &str, css_class: &str) -> gtk::Label {
    let label = text_label(text);
    label.add_css_class(css_class);
    label.set_margin_top(8);
    label
}

fn error_label(text: &str) -> gtk::Label {
    let label = text_label(text);
    label.add_css_class("error");
    label
}

fn warning_label(text: &str) -> gtk::Label {
    let label = text_label(text);
    label.add_css_class("warning");
    label
}
