use num_traits::Zero;
use ordered_float::NotNan;

/// Replaces NaN, infinities and negative numbers with zero.
pub fn sanitize(f: f64) -> f64 {
    let x = match NotNan::new(f) {
        Ok(x) => x,
        Err(_) => NotNan::zero(),
    };
    if x.is_finite() && x > NotNan::zero() {
        x.into_inner()
    } else {
        0.0
    }
}

/// Formats seconds as `m:ss`, unknown values show as `0:00`.
pub fn format_time(seconds: f64) -> String {
    let int = sanitize(seconds) as u64;
    format!("{}:{:02}", int / 60, int % 60)
}

/// How far `position` is into `total`, in percent.
pub fn percent_of(position: f64, total: f64) -> f64 {
    let total = sanitize(total);
    if total == 0.0 {
        return 0.0;
    }
    sanitize(position / total * 100.0).min(100.0)
}

/// The position that `percent` of `total` corresponds to.
pub fn position_at(percent: f64, total: f64) -> f64 {
    clamp_position(sanitize(percent) / 100.0 * sanitize(total), total)
}

/// Clamps into `[0, total]`. An unknown total only bounds from below.
pub fn clamp_position(position: f64, total: f64) -> f64 {
    let position = sanitize(position);
    let total = sanitize(total);
    if total == 0.0 {
        position
    } else {
        position.min(total)
    }
}

/// Where a skip of `delta` seconds from `position` lands. Skipping forward is
/// `None` while the total duration is not known yet.
pub fn skip_target(position: f64, delta: f64, total: f64) -> Option<f64> {
    if delta > 0.0 && sanitize(total) == 0.0 {
        return None;
    }
    Some(clamp_position(sanitize(position) + delta, total))
}
