use crate::error::{DashboardError, DashboardResult};

/// Continuous value scale mapped onto a pixel range.
///
/// `range.0` receives `domain_start` and `range.1` receives `domain_end`, so a
/// vertical axis passes `(bottom, top)` to grow upward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> DashboardResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(DashboardError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    pub fn domain_to_pixel(self, value: f64, range: (f64, f64)) -> DashboardResult<f64> {
        validate_range(range)?;
        if !value.is_finite() {
            return Err(DashboardError::InvalidData("value must be finite".to_owned()));
        }

        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        Ok(range.0 + normalized * (range.1 - range.0))
    }
}

/// Evenly spaced categorical bands over a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandScale {
    count: usize,
    range: (f64, f64),
}

impl BandScale {
    pub fn new(count: usize, range: (f64, f64)) -> DashboardResult<Self> {
        if count == 0 {
            return Err(DashboardError::InvalidData(
                "band scale needs at least one category".to_owned(),
            ));
        }
        validate_range(range)?;
        Ok(Self { count, range })
    }

    #[must_use]
    pub fn count(self) -> usize {
        self.count
    }

    #[must_use]
    pub fn band_width(self) -> f64 {
        (self.range.1 - self.range.0) / self.count as f64
    }

    pub fn center(self, index: usize) -> DashboardResult<f64> {
        if index >= self.count {
            return Err(DashboardError::InvalidData(format!(
                "category index {index} out of range (count={})",
                self.count
            )));
        }
        Ok(self.range.0 + self.band_width() * (index as f64 + 0.5))
    }
}

fn validate_range(range: (f64, f64)) -> DashboardResult<()> {
    if !range.0.is_finite() || !range.1.is_finite() || range.0 == range.1 {
        return Err(DashboardError::InvalidData(
            "pixel range must be finite and non-empty".to_owned(),
        ));
    }
    Ok(())
}
