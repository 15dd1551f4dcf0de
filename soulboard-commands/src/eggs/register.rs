use soulboard_api::ingest::{backup_game_id, new_user_from_backup};
use soulboard_core::{Context, Error};
use soulboard_database::impls::users::register_user;
use soulboard_utils::parse::normalize_game_id;
use tracing::{info, warn};

use crate::CommandMeta;
use crate::eggs::messages::{
    invalid_id_message, lookup_failed_message, registered_message, unrecognized_id_message,
};
use crate::eggs::reply_ephemeral;

pub const META: CommandMeta = CommandMeta {
    name: "register",
    desc: "Register an Egg, Inc. user ID with the bot.",
    category: "eggs",
    usage: "/register <id>",
};

/// Register an Egg, Inc. user ID with the bot
#[poise::command(prefix_command, slash_command, category = "Eggs")]
pub async fn register(
    ctx: Context<'_>,
    #[description = "Your Egg, Inc. user ID"] id: String,
) -> Result<(), Error> {
    let Some(game_id) = normalize_game_id(&id) else {
        reply_ephemeral(ctx, invalid_id_message()).await?;
        return Ok(());
    };

    ctx.defer_ephemeral().await?;

    let backup = match ctx.data().api.fetch_backup(&game_id).await {
        Ok(backup) => backup,
        Err(err) => {
            warn!(?err, game_id = %game_id, "backup lookup failed");
            reply_ephemeral(ctx, lookup_failed_message(&err)).await?;
            return Ok(());
        }
    };

    if backup_game_id(&backup) != game_id {
        reply_ephemeral(ctx, unrecognized_id_message(&game_id)).await?;
        return Ok(());
    }

    let new_user = new_user_from_backup(&backup, &ctx.author().name);
    let record = register_user(&ctx.data().db, &new_user).await?;
    info!(
        game_id = %record.game_id,
        soul_eggs = record.progress.soul_egg_count,
        "registration stored"
    );

    reply_ephemeral(ctx, registered_message(&game_id)).await?;
    Ok(())
}
