//! Derived statistics
//!
//! Pure functions turning store query results into presentation-ready
//! numbers. Nothing here touches storage.

use crate::config::WEEKLY_SERIES_DAYS;
use crate::database::{DailyTotal, DrinkEvent, DrinkType};
use serde::Serialize;
use std::collections::BTreeMap;

/// Progress towards the daily goal
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyProgress {
    pub total: i64,
    pub goal: i64,
    /// Percentage of the goal reached, clamped to 100
    pub percentage: f64,
    /// Millilitres left to drink. Negative once the goal is exceeded.
    pub remaining: i64,
    pub goal_reached: bool,
}

impl DailyProgress {
    pub fn rounded_percentage(&self) -> i64 {
        self.percentage.round() as i64
    }
}

pub fn daily_progress(total: i64, goal: i64) -> DailyProgress {
    let percentage = if goal > 0 {
        (total as f64 / goal as f64 * 100.0).min(100.0)
    } else if total > 0 {
        100.0
    } else {
        0.0
    };
    let remaining = goal - total;

    DailyProgress {
        total,
        goal,
        percentage,
        remaining,
        goal_reached: remaining <= 0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeeklySummary {
    pub total: i64,
    pub average: i64,
}

/// Total and daily average over a weekly series.
///
/// The average always divides by seven, even when the store holds
/// fewer days of data.
pub fn weekly_summary(series: &[DailyTotal]) -> WeeklySummary {
    let total: i64 = series.iter().map(|day| day.hydration).sum();
    let average = (total as f64 / WEEKLY_SERIES_DAYS as f64).round() as i64;

    WeeklySummary { total, average }
}

/// All-time hydration per drink type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct Breakdown {
    pub totals: BTreeMap<DrinkType, i64>,
    pub percentages: BTreeMap<DrinkType, i64>,
    pub total: i64,
}

pub fn type_breakdown(events: &[DrinkEvent]) -> Breakdown {
    let mut totals = BTreeMap::new();
    for event in events {
        *totals.entry(event.drink_type).or_insert(0) += event.hydration;
    }
    breakdown_from_totals(totals)
}

/// Build percentages from per-type totals. The denominator is floored at
/// 1 so an empty store yields an empty breakdown instead of NaN.
pub fn breakdown_from_totals(totals: BTreeMap<DrinkType, i64>) -> Breakdown {
    let total: i64 = totals.values().sum();
    let denominator = total.max(1) as f64;

    let percentages = totals
        .iter()
        .map(|(&drink_type, &hydration)| {
            let pct = (hydration as f64 / denominator * 100.0).round() as i64;
            (drink_type, pct)
        })
        .collect();

    Breakdown {
        totals,
        percentages,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn event(id: i64, drink_type: DrinkType, hydration: i64) -> DrinkEvent {
        DrinkEvent {
            id,
            drink_type,
            amount: hydration,
            hydration,
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            time: "08:00:00".to_string(),
            created_at: Utc::now(),
        }
    }

    fn series(values: [i64; 7]) -> Vec<DailyTotal> {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, &hydration)| DailyTotal {
                date: start + chrono::Duration::days(i as i64),
                hydration,
            })
            .collect()
    }

    #[test]
    fn test_daily_progress_partial() {
        let progress = daily_progress(680, 2000);
        assert_eq!(progress.rounded_percentage(), 34);
        assert_eq!(progress.remaining, 1320);
        assert!(!progress.goal_reached);
    }

    #[test]
    fn test_daily_progress_clamped_when_exceeded() {
        let progress = daily_progress(2600, 2000);
        assert_eq!(progress.percentage, 100.0);
        assert_eq!(progress.remaining, -600);
        assert!(progress.goal_reached);
    }

    #[test]
    fn test_daily_progress_zero_goal() {
        assert_eq!(daily_progress(0, 0).percentage, 0.0);
        assert_eq!(daily_progress(10, 0).percentage, 100.0);
    }

    #[test]
    fn test_weekly_average_divides_by_seven() {
        let summary = weekly_summary(&series([0, 0, 0, 0, 0, 0, 1400]));
        assert_eq!(summary.total, 1400);
        assert_eq!(summary.average, 200);

        let summary = weekly_summary(&series([1000, 2000, 1500, 0, 0, 500, 10]));
        assert_eq!(summary.total, 5010);
        assert_eq!(summary.average, 716);
    }

    #[test]
    fn test_breakdown_percentages() {
        let events = vec![
            event(1, DrinkType::Water, 500),
            event(2, DrinkType::Coffee, 180),
        ];

        let breakdown = type_breakdown(&events);
        assert_eq!(breakdown.total, 680);
        assert_eq!(breakdown.totals[&DrinkType::Water], 500);
        assert_eq!(breakdown.percentages[&DrinkType::Water], 74);
        assert_eq!(breakdown.percentages[&DrinkType::Coffee], 26);
    }

    #[test]
    fn test_breakdown_sums_same_type() {
        let events = vec![
            event(1, DrinkType::Tea, 90),
            event(2, DrinkType::Tea, 180),
        ];

        let breakdown = type_breakdown(&events);
        assert_eq!(breakdown.totals[&DrinkType::Tea], 270);
        assert_eq!(breakdown.percentages[&DrinkType::Tea], 100);
    }

    #[test]
    fn test_breakdown_empty() {
        let breakdown = type_breakdown(&[]);
        assert_eq!(breakdown, Breakdown::default());
    }
}
