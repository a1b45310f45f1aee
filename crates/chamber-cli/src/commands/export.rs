use anyhow::Context;
use chamber_core::export::{businesses_csv, receipts_csv};
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{ExportArgs, ExportKind};
use crate::context::AppContext;
use crate::output::{output, output_text};

/// Handle `chamber export`. Admin only.
pub async fn handle(args: &ExportArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.viewer.require_admin()?;

    let (csv, rows) = match args.kind {
        ExportKind::Businesses => {
            let businesses = ctx.service.list_businesses(false).await?;
            (businesses_csv(&businesses), businesses.len())
        }
        ExportKind::Receipts => {
            let receipts = ctx.service.list_receipts(None).await?;
            (receipts_csv(&receipts), receipts.len())
        }
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, &csv).with_context(|| format!("failed to write {path}"))?;
            output(&json!({ "written": path, "rows": rows }), flags.format)
        }
        None => {
            output_text(&csv);
            Ok(())
        }
    }
}
