use std::time::Duration;

use poise::serenity_prelude as serenity;
use tracing::debug;

use crate::embed::{DEFAULT_EMBED_COLOR, page_footer_text};

pub const PAGINATION_TIMEOUT_SECS: u64 = 60 * 3;

/// Look of every page in one paginated reply.
#[derive(Clone, Debug, Default)]
pub struct PageStyle<'a> {
    pub footer_note: Option<&'a str>,
    pub timestamp: Option<serenity::Timestamp>,
    pub ephemeral: bool,
}

fn build_page_embed(
    title: &str,
    description: &str,
    page: usize,
    total_pages: usize,
    style: &PageStyle<'_>,
) -> serenity::CreateEmbed {
    let mut embed = serenity::CreateEmbed::new()
        .title(title.to_owned())
        .color(DEFAULT_EMBED_COLOR)
        .description(description.to_owned());

    let footer = page_footer_text(page, total_pages, style.footer_note);
    if !footer.is_empty() {
        embed = embed.footer(serenity::CreateEmbedFooter::new(footer));
    }

    if let Some(timestamp) = style.timestamp.clone() {
        embed = embed.timestamp(timestamp);
    }

    embed
}

fn pagination_components(
    prev_id: &str,
    next_id: &str,
    current_page: usize,
    total_pages: usize,
) -> Vec<serenity::CreateActionRow> {
    let is_first_page = current_page == 0;
    let is_last_page = current_page + 1 >= total_pages;

    vec![serenity::CreateActionRow::Buttons(vec![
        serenity::CreateButton::new(prev_id)
            .label("Prev")
            .disabled(is_first_page)
            .style(serenity::ButtonStyle::Secondary),
        serenity::CreateButton::new(next_id)
            .label("Next")
            .disabled(is_last_page)
            .style(serenity::ButtonStyle::Secondary),
    ])]
}

pub async fn paginate_embed_pages<U, E>(
    ctx: poise::Context<'_, U, E>,
    title: &str,
    pages: &[String],
    start_page: usize,
) -> Result<(), serenity::Error>
where
    U: Send + Sync,
    E: Send + Sync,
{
    paginate_embed_pages_with_style(ctx, title, pages, start_page, PageStyle::default()).await
}

/// Send `pages` as one embed with Prev/Next buttons for the invoking author.
pub async fn paginate_embed_pages_with_style<U, E>(
    ctx: poise::Context<'_, U, E>,
    title: &str,
    pages: &[String],
    start_page: usize,
    style: PageStyle<'_>,
) -> Result<(), serenity::Error>
where
    U: Send + Sync,
    E: Send + Sync,
{
    if pages.is_empty() {
        return Ok(());
    }

    let total_pages = pages.len();
    let mut current_page = start_page.clamp(1, total_pages) - 1;

    if total_pages <= 1 {
        ctx.send(
            poise::CreateReply::default()
                .ephemeral(style.ephemeral)
                .embed(build_page_embed(
                    title,
                    &pages[current_page],
                    current_page + 1,
                    total_pages,
                    &style,
                )),
        )
        .await?;

        return Ok(());
    }

    let ctx_id = ctx.id();
    let prev_button_id = format!("{}_prev", ctx_id);
    let next_button_id = format!("{}_next", ctx_id);

    let reply = ctx
        .send(
            poise::CreateReply::default()
                .ephemeral(style.ephemeral)
                .embed(build_page_embed(
                    title,
                    &pages[current_page],
                    current_page + 1,
                    total_pages,
                    &style,
                ))
                .components(pagination_components(
                    &prev_button_id,
                    &next_button_id,
                    current_page,
                    total_pages,
                )),
        )
        .await?;

    let message_id = reply.message().await?.id;

    while let Some(press) = serenity::collector::ComponentInteractionCollector::new(ctx)
        .filter({
            let prefix = format!("{}", ctx_id);
            let author_id = ctx.author().id;
            move |interaction| {
                interaction.data.custom_id.starts_with(&prefix)
                    && interaction.user.id == author_id
                    && interaction.message.id == message_id
            }
        })
        .timeout(Duration::from_secs(PAGINATION_TIMEOUT_SECS))
        .await
    {
        if press.data.custom_id == next_button_id {
            current_page = (current_page + 1).min(total_pages - 1);
        } else if press.data.custom_id == prev_button_id {
            current_page = current_page.saturating_sub(1);
        } else {
            continue;
        }

        press
            .create_response(
                ctx.http(),
                serenity::CreateInteractionResponse::UpdateMessage(
                    serenity::CreateInteractionResponseMessage::new()
                        .embed(build_page_embed(
                            title,
                            &pages[current_page],
                            current_page + 1,
                            total_pages,
                            &style,
                        ))
                        .components(pagination_components(
                            &prev_button_id,
                            &next_button_id,
                            current_page,
                            total_pages,
                        )),
                ),
            )
            .await?;
    }

    debug!(title, page = current_page + 1, "pagination collector timed out");

    // Drop the buttons once nobody can press them any more.
    let _ = reply
        .edit(
            ctx,
            poise::CreateReply::default()
                .embed(build_page_embed(
                    title,
                    &pages[current_page],
                    current_page + 1,
                    total_pages,
                    &style,
                ))
                .components(Vec::new()),
        )
        .await;

    Ok(())
}

/// Split rendered entries into page bodies of at most `per_page` entries.
pub fn chunk_pages(entries: &[String], per_page: usize, separator: &str) -> Vec<String> {
    entries
        .chunks(per_page.max(1))
        .map(|chunk| chunk.join(separator))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::chunk_pages;

    #[test]
    fn chunks_entries_into_pages() {
        let entries: Vec<String> = (1..=5).map(|n| format!("entry {n}")).collect();

        assert_eq!(
            chunk_pages(&entries, 2, "\n"),
            vec!["entry 1\nentry 2", "entry 3\nentry 4", "entry 5"]
        );
    }

    #[test]
    fn zero_per_page_is_treated_as_one() {
        let entries = vec!["a".to_owned(), "b".to_owned()];
        assert_eq!(chunk_pages(&entries, 0, "\n"), vec!["a", "b"]);
        assert!(chunk_pages(&[], 10, "\n").is_empty());
    }
}
