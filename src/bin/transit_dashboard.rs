use transit_viz::api::page_text::{
    CHART_HEADER, LONG_TABLE_LABEL, PAGE_CAPTION, PAGE_TITLE, TABLES_HEADER, encoding_line,
    halting_message, preview_header,
};
use transit_viz::api::{ChartView, Dashboard, DashboardConfig, TableView};
use transit_viz::core::format_float;
use transit_viz::render::NullRenderer;

/// Forces the text page in desktop builds (for terminals without a display).
#[cfg(feature = "desktop")]
const TEXT_PAGE_ENV_VAR: &str = "TRANSIT_VIZ_TEXT";

#[cfg(feature = "desktop")]
fn main() -> gtk4::glib::ExitCode {
    let _ = transit_viz::telemetry::init_default_tracing();
    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return gtk4::glib::ExitCode::FAILURE;
        }
    };
    if std::env::var_os(TEXT_PAGE_ENV_VAR).is_some() {
        print_text_page(config);
        return gtk4::glib::ExitCode::SUCCESS;
    }
    transit_viz::platform_gtk::run_dashboard_app(config)
}

#[cfg(not(feature = "desktop"))]
fn main() -> std::process::ExitCode {
    let _ = transit_viz::telemetry::init_default_tracing();
    match load_config() {
        Ok(config) => {
            print_text_page(config);
            std::process::ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::ExitCode::FAILURE
        }
    }
}

/// Config from the environment; a first positional argument replaces the CSV path.
fn load_config() -> transit_viz::DashboardResult<DashboardConfig> {
    let mut config = DashboardConfig::from_env()?;
    if let Some(path) = std::env::args_os().nth(1) {
        config.csv_path = path.into();
    }
    Ok(config)
}

/// Prints the page top to bottom. Halting conditions print their message
/// and end the page early.
fn print_text_page(config: DashboardConfig) {
    println!("{PAGE_TITLE}\n");

    let dashboard = match Dashboard::open(NullRenderer::default(), config) {
        Ok(dashboard) => dashboard,
        Err(err) => {
            println!("{}", halting_message(&err));
            return;
        }
    };

    println!("{}\n", encoding_line(dashboard.encoding().label()));
    println!("{}", preview_header(dashboard.config().preview_rows));
    print_table(&dashboard.raw_preview());

    let view = match dashboard.view() {
        Ok(view) => view,
        Err(err) => {
            println!("\n{}", halting_message(&err));
            return;
        }
    };

    println!("\n{CHART_HEADER} [{}]", view.chart_mode.label());
    print_chart_summary(&view.chart);

    println!("\n{TABLES_HEADER}");
    println!("{LONG_TABLE_LABEL}");
    print_table(&view.long_table_view());
    println!("\n{PAGE_CAPTION}");
}

fn print_chart_summary(chart: &ChartView) {
    match chart {
        ChartView::Warning(message) => println!("! {message}"),
        ChartView::Line(data) => {
            println!("x: {}", data.years.join(", "));
            for series in &data.series {
                let values: Vec<String> = series
                    .points
                    .iter()
                    .map(|point| point.value.map_or_else(|| "-".to_owned(), format_float))
                    .collect();
                println!(
                    "  {} / {}: {}",
                    series.region,
                    series.transport,
                    values.join(", ")
                );
            }
        }
        ChartView::BarSum(totals) => {
            for total in totals {
                println!("  {}: {}", total.year, format_float(total.total));
            }
        }
        ChartView::StackedBar(data) => {
            for segment in &data.segments {
                println!(
                    "  {} / {}: {}",
                    segment.year,
                    segment.transport,
                    format_float(segment.total)
                );
            }
        }
    }
}

fn print_table(table: &TableView) {
    let index_width = table
        .index
        .iter()
        .map(|index| index.to_string().chars().count())
        .max()
        .unwrap_or(0);
    let widths: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .map(|(column, name)| {
            table
                .rows
                .iter()
                .filter_map(|row| row.get(column))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(name.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut header = format!("{:index_width$}", "");
    for (name, width) in table.columns.iter().zip(widths.iter().copied()) {
        header.push_str(&format!("  {name:>width$}"));
    }
    println!("{header}");

    for (index, row) in table.index.iter().zip(&table.rows) {
        let mut line = format!("{index:>index_width$}");
        for (cell, width) in row.iter().zip(widths.iter().copied()) {
            line.push_str(&format!("  {cell:>width$}"));
        }
        println!("{line}");
    }
}
