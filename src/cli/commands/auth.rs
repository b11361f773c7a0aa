use clap::Subcommand;
use serde_json::json;

use crate::cli::context::AppContext;
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::models::{GoogleLoginRequest, Profile, SignupRequest};
use crate::session::{claims, SessionStatus};

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Login with email and password")]
    Login {
        #[arg(help = "Email")]
        email: String,
        #[arg(long, help = "Password")]
        password: String,
    },

    #[command(about = "Create an account")]
    Signup {
        #[arg(help = "Email")]
        email: String,
        #[arg(long, help = "Password")]
        password: String,
        #[arg(long, help = "Full name")]
        name: Option<String>,
        #[arg(long, help = "Contact number")]
        contact: Option<String>,
        #[arg(long, help = "Register as a venue owner")]
        owner: bool,
    },

    #[command(about = "Login with a Google ID token")]
    Google {
        #[arg(help = "Google ID token")]
        id_token: String,
        #[arg(long, help = "Register as a venue owner on first login")]
        owner: bool,
        #[arg(long, help = "Contact number")]
        contact: Option<String>,
    },

    #[command(about = "Logout and forget the stored credential")]
    Logout,

    #[command(about = "Show current authentication status")]
    Status,

    #[command(about = "Fetch the current profile from the server")]
    Whoami,

    #[command(about = "Request a password reset email")]
    ForgotPassword {
        #[arg(help = "Email")]
        email: String,
    },

    #[command(about = "Set a new password using a reset token")]
    ResetPassword {
        #[arg(help = "Reset token from the email")]
        token: String,
        #[arg(long, help = "New password")]
        password: String,
    },
}

pub async fn handle(cmd: AuthCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let ctx = AppContext::load()?;

    match cmd {
        AuthCommands::Login { email, password } => {
            let profile = ctx.session.login(&email, &password).await?;
            output_profile(&output_format, "Logged in", &profile)
        }
        AuthCommands::Signup { email, password, name, contact, owner } => {
            let request = SignupRequest {
                email: email.trim().to_string(),
                password,
                full_name: name,
                contact_number: contact,
                is_venue_owner: owner,
            };
            let profile = ctx.session.signup(&request).await?;
            output_profile(&output_format, "Account created", &profile)
        }
        AuthCommands::Google { id_token, owner, contact } => {
            let request = GoogleLoginRequest {
                id_token,
                is_venue_owner: owner.then_some(true),
                contact_number: contact,
            };
            let profile = ctx.session.google_login(&request).await?;
            output_profile(&output_format, "Logged in with Google", &profile)
        }
        AuthCommands::Logout => {
            ctx.session.logout()?;
            output_success(&output_format, "Logged out", None)
        }
        AuthCommands::Status => {
            let status = ctx.boot().await;
            let session = ctx.session.snapshot();
            let token = session.credential().and_then(|t| claims::peek(t).ok());

            match output_format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&json!({
                        "status": status,
                        "api_url": ctx.gateway.base_url(),
                        "profile": session.profile(),
                        "expires_at": token.as_ref().and_then(|c| c.expires_at()),
                    }))?);
                }
                OutputFormat::Text => {
                    println!("API: {}", ctx.gateway.base_url());
                    match (status, session.profile()) {
                        (SessionStatus::Authenticated, Some(profile)) => {
                            let role = if profile.owner { "venue owner" } else { "guest" };
                            println!("Logged in as {} ({})", profile.label(), role);
                            if let Some(exp) = token.as_ref().and_then(|c| c.expires_at()) {
                                println!("Credential expires: {}", exp.format("%Y-%m-%d %H:%M UTC"));
                            }
                        }
                        _ => println!("Not logged in"),
                    }
                }
            }
            Ok(())
        }
        AuthCommands::Whoami => {
            let profile = ctx.session.refresh_profile().await?;
            match output_format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&json!({ "profile": profile }))?),
                OutputFormat::Text => {
                    println!("Name: {}", profile.label());
                    println!("Email: {}", profile.email);
                    if !profile.contact_number.is_empty() {
                        println!("Contact: {}", profile.contact_number);
                    }
                    println!("Venue owner: {}", if profile.owner { "yes" } else { "no" });
                    println!("Sign-in: {}", profile.auth_provider);
                }
            }
            Ok(())
        }
        AuthCommands::ForgotPassword { email } => {
            let envelope = require_success(ctx.gateway.forgot_password(email.trim()).await)?;
            output_success(&output_format, &envelope.message, None)
        }
        AuthCommands::ResetPassword { token, password } => {
            let envelope = require_success(ctx.gateway.reset_password(&token, &password).await)?;
            output_success(&output_format, &envelope.message, None)
        }
    }
}

fn output_profile(output_format: &OutputFormat, message: &str, profile: &Profile) -> anyhow::Result<()> {
    let text = if profile.owner {
        format!("{} as {} [Owner]", message, profile.label())
    } else {
        format!("{} as {}", message, profile.label())
    };
    output_success(output_format, &text, Some(json!({ "profile": profile })))
}
