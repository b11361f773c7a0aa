use serde_json::json;

use crate::cli::context::AppContext;
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::router::{Navigation, Route};
use crate::session::Session;
use crate::views::{BookingListing, HomeView, Layout, SearchView, View};

/// `halls open <location>`: route, guard and render like the browser would
pub async fn open(location: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    let ctx = AppContext::load()?;
    let (session, nav) = ctx.enter(location).await?;

    match nav {
        Navigation::Render { route, query } => render(&ctx, &session, route, query.as_deref(), &output_format).await,
        Navigation::Loading { route } => Err(anyhow::anyhow!("Session still loading for {}", route)),
        Navigation::Redirect { from, to } => Err(anyhow::anyhow!("{} redirected to {}", from, to)),
    }
}

/// `halls home`
pub async fn home(output_format: OutputFormat) -> anyhow::Result<()> {
    open(Route::Home.path(), output_format).await
}

async fn render(
    ctx: &AppContext,
    session: &Session,
    route: Route,
    query: Option<&str>,
    output_format: &OutputFormat,
) -> anyhow::Result<()> {
    let layout = Layout::from_session(session);

    match route {
        Route::Home => {
            let home = HomeView::from_session(session);
            output_page(output_format, &[("layout", &layout as &dyn View), ("home", &home as &dyn View)])
        }
        Route::Search => {
            // First render runs the search for whatever the location carried
            let mut view = SearchView::from_query(query.unwrap_or(""), ctx.currency());
            view.load(&*ctx.gateway).await;
            output_page(output_format, &[("layout", &layout as &dyn View), ("search", &view as &dyn View)])
        }
        Route::Bookings => {
            let bookings = require_success(ctx.gateway.list_bookings().await)?;
            let listing = BookingListing::new(route.title(), bookings, ctx.currency());
            output_page(output_format, &[("layout", &layout as &dyn View), ("bookings", &listing as &dyn View)])
        }
        Route::OwnerVenues => {
            let bookings = require_success(ctx.gateway.bookings_for_my_venues(None).await)?;
            let listing = BookingListing::new("Booking requests for My Venues", bookings, ctx.currency());
            output_page(output_format, &[("layout", &layout as &dyn View), ("owner", &listing as &dyn View)])
        }
        Route::Login | Route::Signup => {
            let hint = if session.is_authenticated() {
                "You are already logged in.".to_string()
            } else if route == Route::Login {
                "Run 'halls auth login <email> --password <password>' or 'halls auth google <id-token>'.".to_string()
            } else {
                "Run 'halls auth signup <email> --password <password> [--owner]'.".to_string()
            };
            if let OutputFormat::Text = output_format {
                println!("{}\n", layout.render_text());
            }
            output_success(output_format, &hint, Some(json!({ "layout": layout.to_json() })))
        }
    }
}
