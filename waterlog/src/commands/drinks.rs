//! Drink-related commands

use super::print_json;
use crate::app::AppState;
use crate::database::DrinkEvent;
use crate::error::Result;
use chrono::{Local, NaiveDate};
use clap::Args;

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Drink type: water, tea, juice, milk, coffee, soda or other
    pub drink_type: String,
    /// Amount in millilitres (1-5000)
    pub amount: f64,
}

#[derive(Debug, Args)]
pub struct LogArgs {
    /// Day to list, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// ID of the drink to delete
    pub id: i64,
}

fn describe(event: &DrinkEvent) -> String {
    format!(
        "#{:<5} {}  {:<7} {:>5} ml  ({} ml hydration)",
        event.id, event.time, event.drink_type, event.amount, event.hydration
    )
}

pub async fn add(state: &AppState, args: AddArgs, json: bool) -> Result<()> {
    let event = state
        .drinks()
        .await?
        .add_drink(&args.drink_type, args.amount)
        .await?;

    if json {
        return print_json(&event);
    }

    println!(
        "Recorded {} ml {} ({} ml hydration), id {}",
        event.amount, event.drink_type, event.hydration, event.id
    );
    Ok(())
}

pub async fn log(state: &AppState, args: LogArgs, json: bool) -> Result<()> {
    let date = args.date.unwrap_or_else(|| Local::now().date_naive());
    let events = state.drinks().await?.events_for_date(date).await?;

    if json {
        return print_json(&events);
    }

    if events.is_empty() {
        println!("No drinks recorded on {}", date);
        return Ok(());
    }

    for event in &events {
        println!("{}", describe(event));
    }
    Ok(())
}

pub async fn undo(state: &AppState, json: bool) -> Result<()> {
    let event = state.drinks().await?.undo_last().await?;

    if json {
        return print_json(&event);
    }

    println!("Removed {}", describe(&event));
    Ok(())
}

pub async fn delete(state: &AppState, args: DeleteArgs, json: bool) -> Result<()> {
    state.drinks().await?.delete(args.id).await?;

    if json {
        return print_json(&serde_json::json!({ "deleted": args.id }));
    }

    println!("Deleted drink {}", args.id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::DrinkType;
    use chrono::Utc;

    #[test]
    fn test_describe_event() {
        let event = DrinkEvent {
            id: 7,
            drink_type: DrinkType::Coffee,
            amount: 300,
            hydration: 180,
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            time: "09:15:00".to_string(),
            created_at: Utc::now(),
        };

        assert_eq!(
            describe(&event),
            "#7     09:15:00  coffee    300 ml  (180 ml hydration)"
        );
    }
}
