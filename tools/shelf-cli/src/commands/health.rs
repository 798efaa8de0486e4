//! Catalog service health check.

use anyhow::{bail, Result};
use serde_json::json;

use crate::context::Context;
use crate::output::status_badge;

/// Run the health command.
pub async fn run(ctx: &Context) -> Result<()> {
    let api = ctx.catalog()?;
    let target = if ctx.offline {
        "offline sample catalog".to_string()
    } else {
        ctx.base_url()
    };

    let spinner = ctx.output.spinner(&format!("Checking {}...", target));
    let result = api.health().await;
    spinner.finish_and_clear();

    let (status, healthy, detail) = match &result {
        Ok(health) if health.is_healthy() => ("healthy", true, None),
        Ok(health) => ("unhealthy", false, Some(health.message.clone())),
        Err(e) => ("unreachable", false, Some(e.to_string())),
    };

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "target": target,
            "status": status,
            "detail": detail,
        }));
    } else {
        ctx.output.header("Catalog Service");
        ctx.output.kv("Target", &target);
        ctx.output.kv("Status", &status_badge(status));
        if let Some(detail) = &detail {
            ctx.output.kv("Detail", detail);
        }
    }

    if !healthy {
        bail!("Catalog service is {}", status);
    }
    Ok(())
}
