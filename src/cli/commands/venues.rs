use chrono::NaiveDate;
use clap::Subcommand;
use futures::future::join_all;
use serde_json::json;

use crate::cli::context::AppContext;
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::models::venue::LatLng;
use crate::models::{Amenities, PriceOverride, VenueDraft, VenuePatch, VenueType};
use crate::router::Route;
use crate::views::{format_price, VenueCard, View};

#[derive(Subcommand)]
pub enum VenueCommands {
    #[command(about = "Check availability and price of a venue on one or more dates")]
    Availability {
        #[arg(help = "Venue ID")]
        venue_id: String,
        #[arg(required = true, help = "Dates (YYYY-MM-DD)")]
        dates: Vec<String>,
    },

    #[command(about = "Register a new venue (venue owners)")]
    Register {
        #[arg(long, help = "Venue name")]
        name: String,
        #[arg(long = "type", help = "Hall, Auditorium, Banquet or Lawn")]
        venue_type: VenueType,
        #[arg(long, help = "Street address")]
        address: String,
        #[arg(long, allow_hyphen_values = true, help = "Latitude")]
        lat: f64,
        #[arg(long, allow_hyphen_values = true, help = "Longitude")]
        lng: f64,
        #[arg(long, help = "Guest capacity")]
        capacity: u32,
        #[arg(long = "date", help = "Available date (repeatable)")]
        dates: Vec<String>,
        #[arg(long = "price", help = "Date-specific price as DATE=AMOUNT (repeatable)")]
        prices: Vec<String>,
        #[arg(long, help = "Space in square feet")]
        space: Option<f64>,
        #[arg(long = "amenity", help = "Amenity flag, e.g. parking_valet (repeatable)")]
        amenities: Vec<String>,
        #[arg(long, help = "Additional description")]
        description: Option<String>,
        #[arg(long = "picture", help = "Picture URL (repeatable)")]
        pictures: Vec<String>,
    },

    #[command(about = "Update fields of a venue you own")]
    Update {
        #[arg(help = "Venue ID")]
        venue_id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long = "type")]
        venue_type: Option<VenueType>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        capacity: Option<u32>,
        #[arg(long = "date", help = "Replace available dates (repeatable)")]
        dates: Vec<String>,
        #[arg(long = "price", help = "Replace date-specific prices, DATE=AMOUNT (repeatable)")]
        prices: Vec<String>,
        #[arg(long)]
        space: Option<f64>,
    },
}

pub async fn handle(cmd: VenueCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let ctx = AppContext::load()?;

    match cmd {
        VenueCommands::Availability { venue_id, dates } => {
            for date in &dates {
                parse_date(date)?;
            }

            let checks = dates.iter().map(|date| ctx.gateway.venue_availability(&venue_id, date));
            let results = join_all(checks).await;

            let mut rows = Vec::with_capacity(dates.len());
            for (date, result) in dates.iter().zip(results) {
                let availability = require_success(result)?;
                rows.push((date.clone(), availability));
            }

            match output_format {
                OutputFormat::Json => {
                    let rows: Vec<_> = rows
                        .iter()
                        .map(|(date, a)| json!({ "date": date, "available": a.available, "price": a.price }))
                        .collect();
                    println!("{}", serde_json::to_string_pretty(&json!({ "venue_id": venue_id, "availability": rows }))?);
                }
                OutputFormat::Text => {
                    println!("{:<12} {:<12} {}", "DATE", "AVAILABLE", "PRICE");
                    println!("{}", "-".repeat(40));
                    for (date, a) in &rows {
                        let price = a
                            .price
                            .map(|p| format_price(p, ctx.currency()))
                            .unwrap_or_else(|| "-".to_string());
                        println!("{:<12} {:<12} {}", date, if a.available { "yes" } else { "no" }, price);
                    }
                }
            }
            Ok(())
        }
        VenueCommands::Register {
            name,
            venue_type,
            address,
            lat,
            lng,
            capacity,
            dates,
            prices,
            space,
            amenities,
            description,
            pictures,
        } => {
            ctx.require(Route::OwnerVenues).await?;

            let draft = VenueDraft {
                venue_name: name,
                venue_type,
                address,
                maps_location: LatLng { lat, lng },
                capacity,
                dates_available: parse_dates(&dates)?,
                price_with_dates: parse_prices(&prices)?,
                space,
                amenities: parse_amenities(&amenities)?,
                additional_description: description,
                pictures,
                videos: Vec::new(),
            };

            let registered = require_success(ctx.gateway.register_venue(&draft).await)?;
            output_success(
                &output_format,
                &format!("Venue '{}' registered ({})", draft.venue_name, registered.venue_id),
                Some(json!({ "venue_id": registered.venue_id })),
            )
        }
        VenueCommands::Update { venue_id, name, venue_type, address, capacity, dates, prices, space } => {
            ctx.require(Route::OwnerVenues).await?;

            let patch = VenuePatch {
                venue_name: name,
                venue_type,
                address,
                capacity,
                dates_available: if dates.is_empty() { None } else { Some(parse_dates(&dates)?) },
                price_with_dates: if prices.is_empty() { None } else { Some(parse_prices(&prices)?) },
                space,
                ..Default::default()
            };
            if patch.is_empty() {
                return Err(anyhow::anyhow!("Nothing to update; pass at least one field"));
            }

            let venue = require_success(ctx.gateway.update_venue(&venue_id, &patch).await)?;
            let card = VenueCard::new(&venue, None, ctx.currency());
            match output_format {
                OutputFormat::Json => output_view(&output_format, &card),
                OutputFormat::Text => {
                    output_success(&output_format, "Venue updated", None)?;
                    println!("{}", card.render_text());
                    Ok(())
                }
            }
        }
    }
}

fn parse_date(raw: &str) -> anyhow::Result<String> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|_| raw.to_string())
        .map_err(|_| anyhow::anyhow!("Invalid date '{}'; expected YYYY-MM-DD", raw))
}

fn parse_dates(raw: &[String]) -> anyhow::Result<Vec<String>> {
    raw.iter().map(|d| parse_date(d)).collect()
}

fn parse_prices(raw: &[String]) -> anyhow::Result<Vec<PriceOverride>> {
    raw.iter()
        .map(|entry| {
            let (date, amount) = entry
                .split_once('=')
                .ok_or_else(|| anyhow::anyhow!("Invalid price '{}'; expected DATE=AMOUNT", entry))?;
            let price: f64 = amount
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid amount '{}' for {}", amount, date))?;
            Ok(PriceOverride { date: parse_date(date)?, price })
        })
        .collect()
}

fn parse_amenities(raw: &[String]) -> anyhow::Result<Amenities> {
    let mut amenities = Amenities::default();
    for name in raw {
        match name.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "parking_valet" => amenities.parking_valet = true,
            "entry_package" => amenities.entry_package = true,
            "water" => amenities.water = true,
            "air_conditioner" => amenities.air_conditioner = true,
            "partition_facility" => amenities.partition_facility = true,
            "sound_system" => amenities.sound_system = true,
            other => return Err(anyhow::anyhow!("Unknown amenity '{}'", other)),
        }
    }
    Ok(amenities)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prices_parse_as_date_amount_pairs() {
        let prices = parse_prices(&["2024-05-01=50000".to_string()]).unwrap();
        assert_eq!(prices, vec![PriceOverride { date: "2024-05-01".into(), price: 50000.0 }]);

        assert!(parse_prices(&["2024-05-01:50000".to_string()]).is_err());
        assert!(parse_prices(&["2024-13-01=1".to_string()]).is_err());
    }

    #[test]
    fn amenity_names_accept_dashes() {
        let amenities = parse_amenities(&["sound-system".to_string(), "water".to_string()]).unwrap();
        assert!(amenities.sound_system && amenities.water);
        assert!(!amenities.parking_valet);
        assert!(parse_amenities(&["pool".to_string()]).is_err());
    }
}
