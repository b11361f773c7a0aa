use clap::Subcommand;
use serde_json::json;
use url::Url;

use crate::cli::config::*;
use crate::cli::context::AppContext;
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::config::config;

#[derive(Subcommand)]
pub enum ServerCommands {
    #[command(about = "Switch to an API base URL (persistent selection)")]
    Use {
        #[arg(help = "API base URL, e.g. http://localhost:5000")]
        url: String,
    },

    #[command(about = "Show the API base URL in use")]
    Current,

    #[command(about = "Check server health from the API /health endpoint")]
    Health,
}

pub async fn handle(cmd: ServerCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        ServerCommands::Use { url } => {
            let parsed = Url::parse(url.trim()).map_err(|e| anyhow::anyhow!("Invalid server URL '{}': {}", url, e))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(anyhow::anyhow!("Server URL must be http or https, got '{}'", parsed.scheme()));
            }
            let url = parsed.as_str().trim_end_matches('/').to_string();

            let mut env_config = load_environment_config()?;
            env_config.select(&url);
            save_environment_config(&env_config)?;

            output_success(
                &output_format,
                &format!("Switched to server '{}'", url),
                Some(json!({ "current_server": url })),
            )
        }
        ServerCommands::Current => {
            let env_config = load_environment_config()?;
            let source = if env_config.api_url.is_some() { "selected" } else { "configured" };
            let url = env_config.api_url_or(config());

            let details = json!({
                "url": url,
                "source": source,
                "selected_at": env_config.selected_at,
                "recents": env_config.recents,
            });
            output_current_item(&output_format, "server", &url, details)
        }
        ServerCommands::Health => {
            let ctx = AppContext::load()?;
            let result = ctx.gateway.health().await;
            let status = if result.is_success() { ServerStatus::Up } else { ServerStatus::Down };

            match output_format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&json!({
                        "server": ctx.gateway.base_url(),
                        "status": status,
                        "error": result.error,
                    }))?);
                }
                OutputFormat::Text if result.is_success() => println!("✓ {} is up", ctx.gateway.base_url()),
                OutputFormat::Text => {}
            }

            if !result.is_success() {
                return Err(anyhow::anyhow!("{} is down: {}", ctx.gateway.base_url(), result.error_message()));
            }
            Ok(())
        }
    }
}
