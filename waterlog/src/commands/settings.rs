//! Settings-related commands
//!
//! Commands for viewing and changing the daily goal, the notification
//! flag and the stored location.

use super::print_json;
use crate::app::AppState;
use crate::database::Settings;
use crate::error::Result;
use clap::{Args, Subcommand, ValueEnum};

#[derive(Debug, Args)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub action: Option<SettingsAction>,
}

#[derive(Debug, Subcommand)]
pub enum SettingsAction {
    /// Show current settings
    Show,
    /// Set the daily goal in millilitres (500-5000)
    Goal { ml: i64 },
    /// Turn hydration reminders on or off
    Notifications { state: Toggle },
    /// Store the current location
    Location {
        #[arg(allow_negative_numbers = true)]
        lat: f64,
        #[arg(allow_negative_numbers = true)]
        lon: f64,
        #[arg(long, default_value = "")]
        city: String,
        #[arg(long, default_value = "")]
        country: String,
    },
    /// Forget the stored location
    ClearLocation,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

fn render(settings: &Settings) -> String {
    let mut lines = vec![
        format!("Daily goal:    {} ml", settings.daily_goal),
        format!(
            "Notifications: {}",
            if settings.notifications_enabled { "on" } else { "off" }
        ),
    ];

    match &settings.location {
        Some(location) if !location.city.is_empty() => lines.push(format!(
            "Location:      {}, {} ({:.4}, {:.4})",
            location.city, location.country, location.lat, location.lon
        )),
        Some(location) => lines.push(format!(
            "Location:      {:.4}, {:.4}",
            location.lat, location.lon
        )),
        None => lines.push("Location:      not set".to_string()),
    }

    lines.join("\n")
}

pub async fn execute(state: &AppState, args: SettingsArgs, json: bool) -> Result<()> {
    let service = state.settings().await?;

    let settings = match args.action.unwrap_or(SettingsAction::Show) {
        SettingsAction::Show => service.get().await?,
        SettingsAction::Goal { ml } => service.set_daily_goal(ml).await?,
        SettingsAction::Notifications { state } => {
            service
                .set_notifications_enabled(matches!(state, Toggle::On))
                .await?
        }
        SettingsAction::Location {
            lat,
            lon,
            city,
            country,
        } => service.set_location(lat, lon, city, country).await?,
        SettingsAction::ClearLocation => service.clear_location().await?,
    };

    if json {
        return print_json(&settings);
    }

    println!("{}", render(&settings));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_defaults() {
        assert_eq!(
            render(&Settings::default()),
            "Daily goal:    2000 ml\nNotifications: off\nLocation:      not set"
        );
    }
}
