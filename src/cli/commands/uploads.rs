use clap::Subcommand;
use serde_json::json;

use crate::cli::context::AppContext;
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::models::{UploadMode, UploadSignatureRequest};
use crate::router::Route;

#[derive(Subcommand)]
pub enum UploadCommands {
    #[command(about = "Get parameters for a direct upload of venue media")]
    Sign {
        #[arg(long, help = "Target folder")]
        folder: Option<String>,
        #[arg(long, help = "Public ID for the uploaded asset")]
        public_id: Option<String>,
        #[arg(long, help = "Resource type, e.g. image or video")]
        resource_type: Option<String>,
    },
}

pub async fn handle(cmd: UploadCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let ctx = AppContext::load()?;

    match cmd {
        UploadCommands::Sign { folder, public_id, resource_type } => {
            ctx.require(Route::OwnerVenues).await?;

            let request = UploadSignatureRequest { folder, public_id, resource_type };
            let signature = require_success(ctx.gateway.sign_upload(&request).await)?;

            match output_format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&json!({ "upload": signature }))?);
                }
                OutputFormat::Text => {
                    let mode = match signature.mode {
                        UploadMode::Signed => "signed",
                        UploadMode::Unsigned => "unsigned",
                    };
                    println!("Upload URL: {} ({})", signature.upload_url, mode);
                    for (key, value) in &signature.params {
                        match value.as_str() {
                            Some(s) => println!("  {} = {}", key, s),
                            None => println!("  {} = {}", key, value),
                        }
                    }
                }
            }
            Ok(())
        }
    }
}
