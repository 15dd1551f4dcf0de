use poise::serenity_prelude as serenity;

/// Default embed color used across the bot UI (button purple).
pub const DEFAULT_EMBED_COLOR: u32 = 0x87_00_C3;

/// Color for embeds reporting a failure.
pub const ERROR_EMBED_COLOR: u32 = 0xC3_00_2A;

/// Footer text for a page, e.g. `Page 2/5 • Last updated`.
pub fn page_footer_text(page: usize, total_pages: usize, footer_note: Option<&str>) -> String {
    let page = page.max(1);
    let total_pages = total_pages.max(1);
    let note = footer_note.filter(|note| !note.is_empty());

    match (total_pages > 1, note) {
        (true, Some(note)) => format!("Page {}/{} • {}", page, total_pages, note),
        (true, None) => format!("Page {}/{}", page, total_pages),
        (false, Some(note)) => note.to_owned(),
        (false, None) => String::new(),
    }
}

/// Build an error embed with a title and description.
pub fn error_embed(title: &str, description: impl Into<String>) -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .title(title.to_owned())
        .description(description)
        .color(ERROR_EMBED_COLOR)
}

#[cfg(test)]
mod tests {
    use super::page_footer_text;

    #[test]
    fn single_page_footer_only_shows_note() {
        assert_eq!(page_footer_text(1, 1, Some("Last updated")), "Last updated");
        assert_eq!(page_footer_text(1, 1, None), "");
        assert_eq!(page_footer_text(1, 0, Some("")), "");
    }

    #[test]
    fn multi_page_footer_shows_position() {
        assert_eq!(page_footer_text(2, 5, None), "Page 2/5");
        assert_eq!(
            page_footer_text(0, 3, Some("Last updated")),
            "Page 1/3 • Last updated"
        );
    }
}
