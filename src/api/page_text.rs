//! Fixed page strings shared by the GTK page and the text page.

use crate::error::DashboardError;

pub const PAGE_TITLE: &str = "대중교통 접근수단 (2018 - 2024) — 시도별/유형별 시각화";
pub const WINDOW_TITLE: &str = "대중교통 접근수단 (2018-2024) 시각화";
pub const SIDEBAR_HEADER: &str = "데이터 정보 / 필터";
pub const YEAR_COLUMN_LABEL: &str = "연도(Year) 컬럼 선택";
pub const REGION_COLUMN_LABEL: &str = "지역(시도) 컬럼 선택";
pub const TRANSPORT_SECTION_LABEL: &str = "교통수단(컬럼)";
pub const TRANSPORT_SELECT_LABEL: &str = "표시할 교통수단 선택";
pub const YEAR_SELECT_LABEL: &str = "표시할 연도 선택";
pub const REGION_SELECT_LABEL: &str = "표시할 시도 선택";
pub const CHART_HEADER: &str = "시도별 추이 (라인 차트)";
pub const CHART_MODE_LABEL: &str = "차트 종류";
pub const TABLES_HEADER: &str = "원본 / 가공 데이터 확인";
pub const LONG_TABLE_LABEL: &str = "긴 형식 (region / year / transport / value)";
pub const NO_TRANSPORT_MESSAGE: &str =
    "교통수단으로 사용할 컬럼을 자동으로 찾지 못했습니다. CSV 구조를 확인해 주세요.";
pub const PAGE_CAPTION: &str = "참고: 이 템플릿은 CSV 구조(컬럼명)에 맞춰 자동 추정합니다. 필요하면 연도 추출 규칙·숫자 변환 규칙·레이블을 조정하세요.";

#[must_use]
pub fn encoding_line(label: &str) -> String {
    format!("읽은 인코딩: {label}")
}

#[must_use]
pub fn preview_header(rows: usize) -> String {
    format!("원본 데이터 미리보기 (상위 {rows}행)")
}

/// User-facing message for an error that stops the page. Errors other than
/// the two halting conditions are reported as generic page errors.
#[must_use]
pub fn halting_message(error: &DashboardError) -> String {
    match error {
        DashboardError::NoTransportColumns => NO_TRANSPORT_MESSAGE.to_owned(),
        DashboardError::Load { source, .. } => {
            format!("CSV 파일을 불러오지 못했습니다: {source}")
        }
        other => format!("페이지를 표시하지 못했습니다: {other}"),
    }
}
