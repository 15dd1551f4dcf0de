pub mod eb;
pub mod leaderboard;
pub mod messages;
pub mod register;
pub mod removeid;

use soulboard_core::{Context, Error};

/// Reply visible only to the invoking user.
pub(crate) async fn reply_ephemeral(ctx: Context<'_>, content: impl Into<String>) -> Result<(), Error> {
    ctx.send(
        poise::CreateReply::default()
            .ephemeral(true)
            .content(content),
    )
    .await?;
    Ok(())
}
