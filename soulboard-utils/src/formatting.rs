/// Make a user-controlled name safe to drop into embed markdown.
///
/// Markdown control characters are escaped and mentions are broken with a
/// zero-width space. Blank names render as `unknown`.
pub fn escape_display_name(raw: &str) -> String {
    let name = raw.trim().replace('\n', " ");
    if name.is_empty() {
        return "unknown".to_owned();
    }

    let mut out = String::with_capacity(name.len());
    for ch in name.chars() {
        match ch {
            '*' | '_' | '~' | '`' | '|' | '>' | '\\' => {
                out.push('\\');
                out.push(ch);
            }
            '@' => out.push_str("@\u{200B}"),
            _ => out.push(ch),
        }
    }

    out
}

/// Bold headline followed by a detail line, the shape of one leaderboard entry.
pub fn headline_with_detail(headline: &str, detail: &str) -> String {
    format!("**{}**\n{}", headline, detail)
}
