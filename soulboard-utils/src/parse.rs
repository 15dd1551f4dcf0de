/// Normalize a user-supplied game account id.
///
/// Surrounding whitespace is dropped. Empty ids and ids with inner
/// whitespace or control characters are rejected.
pub fn normalize_game_id(raw: &str) -> Option<String> {
    let id = raw.trim();
    if id.is_empty() {
        return None;
    }

    if id
        .chars()
        .any(|ch| ch.is_whitespace() || ch.is_control())
    {
        return None;
    }

    Some(id.to_owned())
}
