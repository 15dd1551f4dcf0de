use soulboard_core::earnings::EarningsSummary;
use soulboard_core::{Context, Error};
use soulboard_database::impls::users::{first_user_by_discord_name, user_by_game_id};
use soulboard_utils::parse::normalize_game_id;

use crate::CommandMeta;
use crate::eggs::messages::{
    earnings_info_message, invalid_id_message, no_record_message, unformattable_message,
};
use crate::eggs::reply_ephemeral;

pub const META: CommandMeta = CommandMeta {
    name: "eb",
    desc: "Show the earnings bonus and soul eggs of a registered account.",
    category: "eggs",
    usage: "/eb [id]",
};

/// Which account `/eb` reports on.
#[derive(Clone, Debug, PartialEq, Eq)]
enum EbTarget {
    /// The caller's earliest registration.
    Own,
    Game(String),
    Invalid,
}

fn eb_target(id: Option<&str>) -> EbTarget {
    match id {
        None => EbTarget::Own,
        Some(raw) => normalize_game_id(raw).map_or(EbTarget::Invalid, EbTarget::Game),
    }
}

/// Show the earnings bonus and soul eggs of a registered account
#[poise::command(prefix_command, slash_command, category = "Eggs")]
pub async fn eb(
    ctx: Context<'_>,
    #[description = "Egg, Inc. user ID (defaults to your own)"] id: Option<String>,
) -> Result<(), Error> {
    let target = eb_target(id.as_deref());
    if target == EbTarget::Invalid {
        reply_ephemeral(ctx, invalid_id_message()).await?;
        return Ok(());
    }

    let mut tx = ctx.data().db.begin().await?;
    let record = match &target {
        EbTarget::Game(game_id) => user_by_game_id(&mut tx, game_id).await?,
        _ => first_user_by_discord_name(&mut tx, &ctx.author().name).await?,
    };
    tx.commit().await?;

    let Some(record) = record else {
        ctx.say(no_record_message()).await?;
        return Ok(());
    };

    let message = match EarningsSummary::from_user(&record) {
        Ok(summary) => earnings_info_message(&record.discord_name, &summary),
        Err(err) => unformattable_message(&err),
    };

    ctx.say(message).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{EbTarget, eb_target};

    #[test]
    fn missing_id_means_the_callers_account() {
        assert_eq!(eb_target(None), EbTarget::Own);
    }

    #[test]
    fn supplied_id_is_normalized() {
        assert_eq!(
            eb_target(Some("  EI1234567890123456 ")),
            EbTarget::Game("EI1234567890123456".to_owned())
        );
    }

    #[test]
    fn malformed_ids_do_not_fall_back_to_the_caller() {
        assert_eq!(eb_target(Some("   ")), EbTarget::Invalid);
        assert_eq!(eb_target(Some("EI 123")), EbTarget::Invalid);
    }
}
