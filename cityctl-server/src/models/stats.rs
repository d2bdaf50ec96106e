//! Resolution-time statistics and the agency benchmark comparison

use sqlx::FromRow;

/// Complaint count for one complaint-type topic
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct TypeCount {
    pub topic: String,
    pub count: i64,
}

/// Mean resolution time over resolved complaints, and how many there were
#[derive(Debug, Clone, Copy, Default, PartialEq, FromRow)]
pub struct ResolutionStats {
    /// `None` when no complaint in scope has both timestamps
    pub avg_days: Option<f64>,
    pub resolved: i64,
}

/// Sum of grouped counts, i.e. every complaint in scope, open or closed.
pub fn total_count(counts: &[TypeCount]) -> i64 {
    counts.iter().map(|c| c.count).sum()
}

/// Round a mean resolution time to two decimals; no qualifying rows is 0.
pub fn round_days(avg_days: Option<f64>) -> f64 {
    match avg_days {
        Some(days) if days.is_finite() => (days * 100.0).round() / 100.0,
        _ => 0.0,
    }
}

/// Compare an agency's mean resolution time against the city-wide mean.
///
/// Both inputs are already rounded. Lower is faster.
pub fn performance_text(agency_avg: f64, citywide_avg: f64) -> String {
    if citywide_avg <= 0.0 {
        return "N/A".to_owned();
    }

    let diff = agency_avg - citywide_avg;
    if diff < 0.0 {
        format!("{:.2} days faster than city average", diff.abs())
    } else if diff > 0.0 {
        format!("{:.2} days slower than city average", diff)
    } else {
        "Matches city average".to_owned()
    }
}
