pub mod aggregate;
pub mod cell;
pub mod coerce;
pub mod encoding;
pub mod reshape;
pub mod scale;
pub mod table;
pub mod types;

pub use aggregate::{StackedSegment, YearTotal, sum_by_year, sum_by_year_and_transport};
pub use cell::{Cell, ColumnKind, format_float, infer_column_kind, parse_cell};
pub use coerce::{parse_grouped_number, to_numeric};
pub use encoding::EncodingTag;
pub use reshape::{LongRecord, LongTable, MeltColumns, MeltedRecord, melt};
pub use scale::{BandScale, LinearScale};
pub use table::RawTable;
pub use types::{PlotRect, Viewport};
