use clap::Args;

use crate::cli::context::AppContext;
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::router::Route;
use crate::views::{Layout, SearchView, View};

/// Filters are taken as raw strings; values that do not parse are dropped
#[derive(Args, Debug, Default)]
pub struct SearchArgs {
    #[arg(long = "type", help = "Venue type: Hall, Auditorium, Banquet or Lawn")]
    pub venue_type: Option<String>,
    #[arg(long, help = "Minimum capacity")]
    pub capacity_min: Option<String>,
    #[arg(long, help = "Maximum capacity")]
    pub capacity_max: Option<String>,
    #[arg(long, help = "Event date (YYYY-MM-DD)")]
    pub date: Option<String>,
    #[arg(long, help = "Minimum price")]
    pub price_min: Option<String>,
    #[arg(long, help = "Maximum price")]
    pub price_max: Option<String>,
    #[arg(long, help = "Latitude to search near")]
    pub near_lat: Option<String>,
    #[arg(long, help = "Longitude to search near")]
    pub near_lng: Option<String>,
    #[arg(long, help = "Radius in km around near-lat/near-lng")]
    pub near_km: Option<String>,
    #[arg(long, help = "Start from a query string, e.g. 'type=Hall&capacity_min=100'")]
    pub query: Option<String>,
    #[arg(long, help = "Ignore all filters and search everything")]
    pub clear: bool,
}

impl SearchArgs {
    fn pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("type", &self.venue_type),
            ("capacity_min", &self.capacity_min),
            ("capacity_max", &self.capacity_max),
            ("date", &self.date),
            ("price_min", &self.price_min),
            ("price_max", &self.price_max),
            ("near_lat", &self.near_lat),
            ("near_lng", &self.near_lng),
            ("near_km", &self.near_km),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_deref().map(|v| (key, v)))
        .collect()
    }
}

pub async fn handle(args: SearchArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let ctx = AppContext::load()?;
    let (session, _) = ctx.enter(Route::Search.path()).await?;

    let mut view = SearchView::from_query(args.query.as_deref().unwrap_or(""), ctx.currency());
    if args.clear {
        view.clear(&*ctx.gateway).await;
    } else {
        for (key, value) in args.pairs() {
            view.filter_mut().set(key, value);
        }
        view.submit(&*ctx.gateway).await;
    }

    let layout = Layout::from_session(&session);
    output_page(&output_format, &[("layout", &layout as &dyn View), ("search", &view as &dyn View)])
}
