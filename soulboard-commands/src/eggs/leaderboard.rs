use poise::serenity_prelude as serenity;
use soulboard_core::leaderboard::rank_leaderboard;
use soulboard_core::{Context, Error};
use soulboard_database::impls::users::leaderboard_users;
use soulboard_utils::embed::error_embed;
use soulboard_utils::pagination::{PageStyle, chunk_pages, paginate_embed_pages_with_style};
use tracing::error;

use crate::CommandMeta;
use crate::eggs::messages::{empty_leaderboard_message, leaderboard_entry_text, unformattable_message};

pub const META: CommandMeta = CommandMeta {
    name: "leaderboard",
    desc: "Show registered players ranked by soul eggs.",
    category: "eggs",
    usage: "/leaderboard [page]",
};

pub const LEADERBOARD_TITLE: &str = "Soul Egg Leaderboard";
const ENTRIES_PER_PAGE: usize = 10;

/// Show registered players ranked by soul eggs
#[poise::command(prefix_command, slash_command, category = "Eggs")]
pub async fn leaderboard(
    ctx: Context<'_>,
    #[description = "Page to start on"] page: Option<usize>,
) -> Result<(), Error> {
    let users = leaderboard_users(&ctx.data().db).await?;

    let entries = match rank_leaderboard(&users) {
        Ok(entries) => entries,
        Err(err) => {
            error!(?err, users = users.len(), "leaderboard could not be formatted");
            ctx.send(
                poise::CreateReply::default()
                    .embed(error_embed(LEADERBOARD_TITLE, unformattable_message(&err))),
            )
            .await?;
            return Ok(());
        }
    };

    if entries.is_empty() {
        ctx.say(empty_leaderboard_message()).await?;
        return Ok(());
    }

    let lines: Vec<String> = entries.iter().map(leaderboard_entry_text).collect();
    let pages = chunk_pages(&lines, ENTRIES_PER_PAGE, "\n\n");

    paginate_embed_pages_with_style(
        ctx,
        LEADERBOARD_TITLE,
        &pages,
        page.unwrap_or(1),
        PageStyle {
            footer_note: Some("Last updated"),
            timestamp: Some(serenity::Timestamp::now()),
            ephemeral: false,
        },
    )
    .await?;
    Ok(())
}
