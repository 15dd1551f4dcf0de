use soulboard_core::{Context, Error};
use tracing::warn;

use crate::CommandMeta;

pub const META: CommandMeta = CommandMeta {
    name: "ping",
    desc: "Checks that the bot and its database are alive.",
    category: "utility",
    usage: "/ping",
};

#[poise::command(prefix_command, slash_command, category = "Utility")]
pub async fn ping(ctx: Context<'_>) -> Result<(), Error> {
    if ctx.data().db.ping().await {
        ctx.say("Pong!").await?;
    } else {
        warn!("database ping failed");
        ctx.say("Pong! (but I can't reach my database right now)")
            .await?;
    }
    Ok(())
}
