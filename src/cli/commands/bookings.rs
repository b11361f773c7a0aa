use clap::Subcommand;
use serde_json::json;

use crate::cli::context::AppContext;
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::models::{BookingStatus, NewBooking};
use crate::router::Route;
use crate::views::{format_price, BookingListing};

#[derive(Subcommand)]
pub enum BookingCommands {
    #[command(about = "List your bookings")]
    List,

    #[command(about = "List the booking requests you made")]
    Mine,

    #[command(about = "List booking requests for venues you own")]
    Owner {
        #[arg(long, help = "Only requests with this status")]
        status: Option<BookingStatus>,
    },

    #[command(about = "Request a booking")]
    Create {
        #[arg(help = "Venue ID")]
        venue_id: String,
        #[arg(help = "Event date (YYYY-MM-DD)")]
        date: String,
        #[arg(long, help = "Expected number of guests")]
        guests: u32,
        #[arg(long, help = "Notes for the venue owner")]
        notes: Option<String>,
    },

    #[command(about = "Cancel one of your bookings")]
    Cancel {
        #[arg(help = "Booking ID")]
        booking_id: String,
    },

    #[command(about = "Confirm or reject a booking request (venue owners), or cancel your own")]
    Status {
        #[arg(help = "Booking ID")]
        booking_id: String,
        #[arg(help = "New status: confirmed, rejected or cancelled")]
        status: BookingStatus,
    },
}

pub async fn handle(cmd: BookingCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let ctx = AppContext::load()?;

    match cmd {
        BookingCommands::List => {
            ctx.require(Route::Bookings).await?;
            let bookings = require_success(ctx.gateway.list_bookings().await)?;
            output_view(&output_format, &BookingListing::new("My Bookings", bookings, ctx.currency()))
        }
        BookingCommands::Mine => {
            ctx.require(Route::Bookings).await?;
            let bookings = require_success(ctx.gateway.my_booking_requests().await)?;
            output_view(&output_format, &BookingListing::new("My Booking Requests", bookings, ctx.currency()))
        }
        BookingCommands::Owner { status } => {
            ctx.require(Route::OwnerVenues).await?;
            let bookings = require_success(ctx.gateway.bookings_for_my_venues(status).await)?;
            let title = match status {
                Some(status) => format!("Requests for My Venues ({})", status),
                None => "Requests for My Venues".to_string(),
            };
            output_view(&output_format, &BookingListing::new(title, bookings, ctx.currency()))
        }
        BookingCommands::Create { venue_id, date, guests, notes } => {
            ctx.require(Route::Bookings).await?;
            let booking = NewBooking {
                venue_id,
                date: date.trim().to_string(),
                guests_count: guests,
                notes,
            };
            let receipt = require_success(ctx.gateway.create_booking(&booking).await)?;

            let price = receipt
                .price
                .map(|p| format!(" at {}", format_price(p, ctx.currency())))
                .unwrap_or_default();
            output_success(
                &output_format,
                &format!("Booking {} for {} is {}{}", receipt.booking_id, booking.date, receipt.status, price),
                Some(json!({ "booking": receipt })),
            )
        }
        BookingCommands::Cancel { booking_id } => {
            ctx.require(Route::Bookings).await?;
            let cancelled = require_success(ctx.gateway.cancel_booking(&booking_id).await)?;
            if !cancelled {
                return Err(anyhow::anyhow!("Booking '{}' was not cancelled", booking_id));
            }
            output_success(
                &output_format,
                &format!("Booking '{}' cancelled", booking_id),
                Some(json!({ "booking_id": booking_id, "cancelled": true })),
            )
        }
        BookingCommands::Status { booking_id, status } => {
            ctx.require(status_route(status)).await?;
            let booking = require_success(ctx.gateway.update_booking_status(&booking_id, status).await)?;
            output_success(
                &output_format,
                &format!("Booking '{}' is now {}", booking.id, booking.status),
                Some(json!({ "booking": booking })),
            )
        }
    }
}

/// Any signed-in user may cancel their own booking; other transitions are the owner's
fn status_route(status: BookingStatus) -> Route {
    match status {
        BookingStatus::Cancelled => Route::Bookings,
        _ => Route::OwnerVenues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancelling_needs_only_a_login() {
        assert_eq!(status_route(BookingStatus::Cancelled), Route::Bookings);
        assert_eq!(status_route(BookingStatus::Confirmed), Route::OwnerVenues);
        assert_eq!(status_route(BookingStatus::Rejected), Route::OwnerVenues);
    }
}
