use chamber_storage::UploadResponse;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::UploadArgs;
use crate::commands::shared::files::read_upload;
use crate::context::AppContext;
use crate::output::output;

/// Handle `chamber upload`. Signed-in users only.
pub async fn handle(args: &UploadArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.viewer.require_signed_in()?;
    let request = read_upload(&args.file, &args.folder)?;
    let store = ctx.uploads()?;

    match store.handle(&request).await {
        response @ UploadResponse::Url { .. } => output(&response, flags.format),
        UploadResponse::Error { error } => anyhow::bail!("upload failed: {error}"),
    }
}
