use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::Viewport;
use crate::error::{DashboardError, DashboardResult};

use super::{
    ChartMode, ColumnHints, DEFAULT_REGION_COLUMN_HINT, DEFAULT_REGION_SELECTION_COUNT,
    DEFAULT_TRANSPORT_SELECTION_COUNT, DEFAULT_YEAR_COLUMN_HINT, SelectionDefaults,
};

/// Environment variable naming a JSON config file.
pub const CONFIG_ENV_VAR: &str = "TRANSIT_VIZ_CONFIG";

pub const DEFAULT_CSV_PATH: &str =
    "/mnt/data/대중교통현황조사(2011~ )_시도별 대중교통 접근수단 (2018 ~ 2024).csv";

pub const DEFAULT_PREVIEW_ROWS: usize = 10;

/// Dashboard bootstrap configuration.
///
/// Every field is optional in JSON; absent fields take the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_csv_path")]
    pub csv_path: PathBuf,
    #[serde(default)]
    pub viewport: Viewport,
    #[serde(default = "default_preview_rows")]
    pub preview_rows: usize,
    #[serde(default = "default_region_count")]
    pub default_region_count: usize,
    #[serde(default = "default_transport_count")]
    pub default_transport_count: usize,
    #[serde(default = "default_year_column_hint")]
    pub year_column_hint: String,
    #[serde(default = "default_region_column_hint")]
    pub region_column_hint: String,
    #[serde(default)]
    pub initial_chart_mode: ChartMode,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self::new(default_csv_path())
    }
}

impl DashboardConfig {
    /// Default config reading `csv_path`.
    #[must_use]
    pub fn new(csv_path: impl Into<PathBuf>) -> Self {
        Self {
            csv_path: csv_path.into(),
            viewport: Viewport::default(),
            preview_rows: DEFAULT_PREVIEW_ROWS,
            default_region_count: DEFAULT_REGION_SELECTION_COUNT,
            default_transport_count: DEFAULT_TRANSPORT_SELECTION_COUNT,
            year_column_hint: default_year_column_hint(),
            region_column_hint: default_region_column_hint(),
            initial_chart_mode: ChartMode::default(),
        }
    }

    #[must_use]
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    #[must_use]
    pub fn with_initial_chart_mode(mut self, mode: ChartMode) -> Self {
        self.initial_chart_mode = mode;
        self
    }

    #[must_use]
    pub fn with_column_hints(mut self, hints: ColumnHints) -> Self {
        self.year_column_hint = hints.year;
        self.region_column_hint = hints.region;
        self
    }

    #[must_use]
    pub fn column_hints(&self) -> ColumnHints {
        ColumnHints {
            year: self.year_column_hint.clone(),
            region: self.region_column_hint.clone(),
        }
    }

    #[must_use]
    pub fn selection_defaults(&self) -> SelectionDefaults {
        SelectionDefaults {
            regions: self.default_region_count,
            transports: self.default_transport_count,
        }
    }

    pub fn validate(&self) -> DashboardResult<()> {
        if !self.viewport.is_valid() {
            return Err(DashboardError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        if self.preview_rows == 0 {
            return Err(DashboardError::Config(
                "preview_rows must be > 0".to_owned(),
            ));
        }
        Ok(())
    }

    pub fn from_json_str(input: &str) -> DashboardResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| DashboardError::Config(format!("failed to parse config json: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> DashboardResult<Self> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path).map_err(|e| {
            DashboardError::Config(format!("failed to read `{}`: {e}", path.display()))
        })?;
        let config = Self::from_json_str(&input)?;
        info!(path = %path.display(), csv = %config.csv_path.display(), "loaded config");
        Ok(config)
    }

    /// Reads the file named by [`CONFIG_ENV_VAR`], or returns the defaults
    /// when the variable is unset.
    pub fn from_env() -> DashboardResult<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) if !path.is_empty() => Self::load_from_path(PathBuf::from(path)),
            _ => {
                debug!("{CONFIG_ENV_VAR} not set; using default config");
                Ok(Self::default())
            }
        }
    }

    pub fn to_json_pretty(&self) -> DashboardResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| DashboardError::Config(format!("failed to serialize config json: {e}")))
    }
}

fn default_csv_path() -> PathBuf {
    PathBuf::from(DEFAULT_CSV_PATH)
}

fn default_preview_rows() -> usize {
    DEFAULT_PREVIEW_ROWS
}

fn default_region_count() -> usize {
    DEFAULT_REGION_SELECTION_COUNT
}

fn default_transport_count() -> usize {
    DEFAULT_TRANSPORT_SELECTION_COUNT
}

fn default_year_column_hint() -> String {
    DEFAULT_YEAR_COLUMN_HINT.to_owned()
}

fn default_region_column_hint() -> String {
    DEFAULT_REGION_COLUMN_HINT.to_owned()
}
