//! Statistics commands

use super::print_json;
use crate::app::AppState;
use crate::error::Result;
use crate::services::WeeklyReport;
use crate::stats::{Breakdown, DailyProgress};

/// Goal line shown under the daily progress
pub fn goal_message(progress: &DailyProgress) -> String {
    if progress.remaining > 0 {
        format!("You are {} ml away from your goal", progress.remaining)
    } else {
        "Goal achieved!".to_string()
    }
}

fn render_progress(progress: &DailyProgress) -> String {
    format!(
        "{} / {} ml ({}%)\n{}",
        progress.total,
        progress.goal,
        progress.rounded_percentage(),
        goal_message(progress)
    )
}

fn render_week(report: &WeeklyReport) -> String {
    let mut lines: Vec<String> = report
        .series
        .iter()
        .map(|day| format!("{}  {:>5} ml", day.date.format("%a %Y-%m-%d"), day.hydration))
        .collect();
    lines.push(format!(
        "Total: {} ml, average: {} ml/day",
        report.summary.total, report.summary.average
    ));
    lines.join("\n")
}

fn render_breakdown(breakdown: &Breakdown) -> String {
    if breakdown.totals.is_empty() {
        return "No drinks recorded yet".to_string();
    }

    breakdown
        .totals
        .iter()
        .map(|(drink_type, hydration)| {
            let pct = breakdown.percentages.get(drink_type).copied().unwrap_or(0);
            format!("{:<7} {:>6} ml  {:>3}%", drink_type, hydration, pct)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub async fn today(state: &AppState, json: bool) -> Result<()> {
    let progress = state.drinks().await?.today_progress().await?;

    if json {
        return print_json(&progress);
    }

    println!("{}", render_progress(&progress));
    Ok(())
}

pub async fn week(state: &AppState, json: bool) -> Result<()> {
    let report = state.drinks().await?.weekly().await?;

    if json {
        return print_json(&report);
    }

    println!("{}", render_week(&report));
    Ok(())
}

pub async fn breakdown(state: &AppState, json: bool) -> Result<()> {
    let breakdown = state.drinks().await?.breakdown().await?;

    if json {
        return print_json(&breakdown);
    }

    println!("{}", render_breakdown(&breakdown));
    Ok(())
}
