pub(super) const VALUE_AXIS_MIN_TICKS: usize = 2;
pub(super) const VALUE_AXIS_MAX_TICKS: usize = 10;

pub(super) fn axis_tick_target_count(
    axis_span_px: f64,
    target_spacing_px: f64,
    min_ticks: usize,
    max_ticks: usize,
) -> usize {
    if !axis_span_px.is_finite() || axis_span_px <= 0.0 {
        return min_ticks;
    }
    if !target_spacing_px.is_finite() || target_spacing_px <= 0.0 {
        return min_ticks;
    }

    let raw = (axis_span_px / target_spacing_px).floor() as usize + 1;
    raw.clamp(min_ticks, max_ticks)
}

/// Smallest step from {1, 2, 2.5, 5} × 10^k giving at most `target_count`
/// intervals over `span`.
pub(super) fn nice_step(span: f64, target_count: usize) -> f64 {
    if !span.is_finite() || span <= 0.0 {
        return 1.0;
    }
    let intervals = target_count.saturating_sub(1).max(1) as f64;
    let raw = span / intervals;
    let magnitude = 10f64.powi(raw.log10().floor() as i32);
    for multiplier in [1.0, 2.0, 2.5, 5.0, 10.0] {
        let step = multiplier * magnitude;
        if step >= raw {
            return step;
        }
    }
    10.0 * magnitude
}

/// Value-axis layout: a domain widened to whole steps plus its tick values.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct ValueAxisTicks {
    pub(super) domain: (f64, f64),
    pub(super) step: f64,
    pub(super) ticks: Vec<f64>,
}

/// Covers `[min, max]` (always including zero) with nice ticks.
pub(super) fn value_axis_ticks(min: f64, max: f64, target_count: usize) -> ValueAxisTicks {
    let mut low = min.min(0.0);
    let mut high = max.max(0.0);
    if !low.is_finite() || !high.is_finite() {
        low = 0.0;
        high = 1.0;
    }
    if low == high {
        high = low + 1.0;
    }

    let step = nice_step(high - low, target_count);
    let start = (low / step).floor() * step;
    let end = (high / step).ceil() * step;
    let count = ((end - start) / step).round() as usize + 1;
    let ticks = (0..count).map(|index| start + step * index as f64).collect();

    ValueAxisTicks {
        domain: (start, end),
        step,
        ticks,
    }
}

/// Keeps `(id, pixel)` ticks that are at least `min_spacing_px` apart,
/// preferring to keep the last tick visible.
pub(super) fn select_ticks_with_min_spacing<T: Copy>(
    mut ticks: Vec<(T, f64)>,
    min_spacing_px: f64,
) -> Vec<(T, f64)> {
    if ticks.is_empty() {
        return ticks;
    }

    ticks.sort_by(|left, right| left.1.total_cmp(&right.1));
    if ticks.len() == 1 || !min_spacing_px.is_finite() || min_spacing_px <= 0.0 {
        return ticks;
    }

    let mut selected: Vec<(T, f64)> = Vec::with_capacity(ticks.len());
    selected.push(ticks[0]);

    for tick in ticks.iter().copied().skip(1) {
        let last_px = selected[selected.len() - 1].1;
        if tick.1 - last_px >= min_spacing_px {
            selected.push(tick);
        }
    }

    let last_tick = ticks[ticks.len() - 1];
    let selected_last = selected[selected.len() - 1];
    if (selected_last.1 - last_tick.1).abs() > 1e-9 {
        if selected.len() == 1 {
            // A single label on a narrow axis: show the latest category.
            selected[0] = last_tick;
        } else {
            let penultimate = selected[selected.len() - 2];
            if last_tick.1 - penultimate.1 >= min_spacing_px {
                let last_index = selected.len() - 1;
                selected[last_index] = last_tick;
            }
        }
    }

    selected
}

/// Tick label with thousands separators and as many decimals as `step` needs.
pub(super) fn format_tick_value(value: f64, step: f64) -> String {
    let rendered = format!("{:.*}", step_decimals(step), value);
    let (sign, unsigned) = match rendered.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rendered.as_str()),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if grouped.chars().all(|digit| digit == '0' || digit == ',')
        && fraction.is_none_or(|fraction| fraction.chars().all(|digit| digit == '0'))
    {
        ""
    } else {
        sign
    };
    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}

fn step_decimals(step: f64) -> usize {
    if !step.is_finite() || step <= 0.0 {
        return 0;
    }
    (0..=6)
        .find(|decimals| {
            let scaled = step * 10f64.powi(*decimals);
            (scaled - scaled.round()).abs() < 1e-6
        })
        .map_or(6, |decimals| decimals as usize)
}

#[cfg(test)]
mod tests {
    use super::{
        format_tick_value, nice_step, select_ticks_with_min_spacing, value_axis_ticks,
    };

    #[test]
    fn nice_step_rounds_up_to_friendly_multiples() {
        assert_eq!(nice_step(440_000.0, 6), 100_000.0);
        assert_eq!(nice_step(10.0, 5), 2.5);
        assert_eq!(nice_step(0.9, 4), 0.5);
    }

    #[test]
    fn value_axis_includes_zero_and_covers_range() {
        let axis = value_axis_ticks(120_000.0, 440_000.0, 6);
        assert_eq!(axis.domain.0, 0.0);
        assert!(axis.domain.1 >= 440_000.0);
        assert_eq!(axis.ticks.first().copied(), Some(0.0));
        assert_eq!(axis.ticks.last().copied(), Some(axis.domain.1));
    }

    #[test]
    fn degenerate_range_still_produces_a_span() {
        let axis = value_axis_ticks(0.0, 0.0, 5);
        assert!(axis.domain.1 > axis.domain.0);
    }

    #[test]
    fn spacing_filter_keeps_last_category() {
        let selected = select_ticks_with_min_spacing(
            vec![(0usize, 0.0), (1, 10.0), (2, 20.0), (3, 30.0), (4, 40.0)],
            25.0,
        );
        let ids: Vec<usize> = selected.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![0, 4]);
    }

    #[test]
    fn tick_labels_are_grouped() {
        assert_eq!(format_tick_value(420_000.0, 100_000.0), "420,000");
        assert_eq!(format_tick_value(-1_500.0, 500.0), "-1,500");
        assert_eq!(format_tick_value(0.5, 0.5), "0.5");
        assert_eq!(format_tick_value(1.25, 0.25), "1.25");
        assert_eq!(format_tick_value(0.0, 1.0), "0");
    }
}
