use soulboard_core::{Context, Error};
use soulboard_database::{impls::users::remove_user_owned, model::users::RemoveOutcome};
use soulboard_utils::parse::normalize_game_id;

use crate::CommandMeta;
use crate::eggs::messages::{
    invalid_id_message, no_record_message, not_owner_message, removed_message,
};
use crate::eggs::reply_ephemeral;

pub const META: CommandMeta = CommandMeta {
    name: "removeid",
    desc: "Remove an Egg, Inc. user ID from the bot.",
    category: "eggs",
    usage: "/removeid <id>",
};

/// Remove an Egg, Inc. user ID from the bot
#[poise::command(prefix_command, slash_command, category = "Eggs")]
pub async fn removeid(
    ctx: Context<'_>,
    #[description = "Your Egg, Inc. user ID"] id: String,
) -> Result<(), Error> {
    let Some(game_id) = normalize_game_id(&id) else {
        reply_ephemeral(ctx, invalid_id_message()).await?;
        return Ok(());
    };

    let outcome = remove_user_owned(&ctx.data().db, &game_id, &ctx.author().name).await?;
    let message = match outcome {
        RemoveOutcome::Removed => removed_message(),
        RemoveOutcome::NotFound => no_record_message(),
        RemoveOutcome::NotOwner => not_owner_message(),
    };

    reply_ephemeral(ctx, message).await?;
    Ok(())
}
