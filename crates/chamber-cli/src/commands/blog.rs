use chamber_core::errors::CoreError;
use chamber_core::forms::BlogPostForm;
use chamber_core::validation::Validate;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::BlogCommands;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

/// Handle `chamber blog`.
pub async fn handle(action: &BlogCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        BlogCommands::Create { title, body, publish } => {
            let author = ctx.viewer.require_admin()?;
            let form = BlogPostForm {
                title: title.clone(),
                body: body.clone(),
                publish: *publish,
            };
            let new = form.validate().into_result()?;
            let post = ctx.service.create_blog_post(&author.user_id, &new).await?;
            output(&post, flags.format)
        }
        BlogCommands::Publish { slug } => {
            ctx.viewer.require_admin()?;
            let post = ctx.service.publish_blog_post(slug).await?;
            output(&post, flags.format)
        }
        BlogCommands::List => {
            let limit = effective_limit(None, flags.limit, ctx.config.directory.default_limit);
            let posts = ctx.service.list_published_posts(limit).await?;
            output(&posts, flags.format)
        }
        BlogCommands::Get { slug } => {
            let post = ctx.service.get_blog_post_by_slug(slug).await?;
            // Drafts exist only for admins.
            if post.published_at.is_none() && ctx.viewer.require_admin().is_err() {
                return Err(CoreError::not_found("blog post", slug).into());
            }
            output(&post, flags.format)
        }
    }
}
