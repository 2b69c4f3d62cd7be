use crate::models::{PlayerResults, REGULAR_SEASON_WEEKS};

/// Mean of recorded points for weeks strictly before `target_week`.
///
/// Unrecorded weeks are skipped, not counted as zero. `None` means no
/// history at all, which callers may need to tell apart from a real 0.0.
pub fn prior_history(results: &PlayerResults, target_week: u8) -> Option<f64> {
    let (sum, count) = results
        .recorded()
        .filter(|(week, _)| week.number() < target_week)
        .fold((0u32, 0u32), |(sum, count), (_, r)| (sum + u32::from(r.points), count + 1));

    (count > 0).then(|| f64::from(sum) / f64::from(count))
}

/// [`prior_history`] with 0.0 standing in for "no history".
pub fn prior_average(results: &PlayerResults, target_week: u8) -> f64 {
    prior_history(results, target_week).unwrap_or(0.0)
}

/// Average across every recorded regular-season week.
pub fn season_average(results: &PlayerResults) -> f64 {
    prior_average(results, REGULAR_SEASON_WEEKS + 1)
}
