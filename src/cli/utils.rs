use serde_json::{json, Value};
use crate::cli::OutputFormat;
use crate::views::View;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(target), Some(Value::Object(extra))) = (response.as_object_mut(), data) {
                target.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output a rendered view
pub fn output_view(output_format: &OutputFormat, view: &dyn View) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&view.to_json())?),
        OutputFormat::Text => println!("{}", view.render_text()),
    }
    Ok(())
}

/// Output several views as one document, e.g. the layout above a page
pub fn output_page(output_format: &OutputFormat, views: &[(&str, &dyn View)]) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let page: serde_json::Map<String, Value> = views
                .iter()
                .map(|(name, view)| (name.to_string(), view.to_json()))
                .collect();
            println!("{}", serde_json::to_string_pretty(&Value::Object(page))?);
        }
        OutputFormat::Text => {
            let parts: Vec<String> = views.iter().map(|(_, view)| view.render_text()).collect();
            println!("{}", parts.join("\n\n"));
        }
    }
    Ok(())
}

/// Output current item information in the appropriate format
pub fn output_current_item(
    output_format: &OutputFormat,
    item_type: &str,
    name: &str,
    details: Value,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({
                format!("current_{}", item_type): details
            }))?);
        }
        OutputFormat::Text => {
            println!("Current {}: {}", item_type, name);
            if let Some(source) = details.get("source").and_then(Value::as_str) {
                println!("Source: {}", source);
            }
            if let Some(recents) = details.get("recents").and_then(Value::as_array) {
                let recents: Vec<&str> = recents.iter().filter_map(Value::as_str).collect();
                if !recents.is_empty() {
                    println!("Recent: {}", recents.join(", "));
                }
            }
        }
    }
    Ok(())
}

/// Turn a failed gateway result into a CLI error carrying its message
pub fn require_success<T>(result: crate::api::ApiResult<T>) -> anyhow::Result<T> {
    result.into_result().map_err(anyhow::Error::from)
}
