use soulboard_core::earnings::EarningsSummary;
use soulboard_core::leaderboard::LeaderboardEntry;
use soulboard_core::magnitude::MagnitudeError;
use soulboard_utils::formatting::{escape_display_name, headline_with_detail};

pub fn invalid_id_message() -> String {
    ":exclamation: Please provide your Egg, Inc. user ID (it looks like `EI1234567890123456`).".to_owned()
}

pub fn unrecognized_id_message(game_id: &str) -> String {
    format!(":exclamation: '{}' isn't a recognized user ID :exclamation:", game_id)
}

pub fn lookup_failed_message(error: &anyhow::Error) -> String {
    format!(":exclamation: I couldn't look up that account: {:#}", error)
}

pub fn registered_message(game_id: &str) -> String {
    format!(
        ":tada: Congratulations! You've successfully registered {} with the bot :tada:",
        game_id
    )
}

pub fn removed_message() -> String {
    ":frowning2: Sad to see you go, but your account has been successfully removed from the bot :frowning2:".to_owned()
}

pub fn no_record_message() -> String {
    "I don't have a record of you".to_owned()
}

pub fn not_owner_message() -> String {
    "Your Discord user is not associated with the ID you provided".to_owned()
}

pub fn empty_leaderboard_message() -> String {
    "Nobody has registered yet. Use `/register` to claim the top spot!".to_owned()
}

pub fn unformattable_message(error: &MagnitudeError) -> String {
    match error {
        MagnitudeError::OutOfRange { .. } => {
            format!("A number is too large to display: {}", error)
        }
        MagnitudeError::Undefined { .. } => {
            format!("Someone's account has no soul eggs to rank yet: {}", error)
        }
    }
}

/// The `eb` summary, e.g. `Info for krohmag:` followed by EB and SE lines.
pub fn earnings_info_message(display_name: &str, summary: &EarningsSummary) -> String {
    format!(
        "Info for {}:\n--> EB: {}\n--> SE: {}",
        escape_display_name(display_name),
        summary.bonus,
        summary.soul_eggs
    )
}

/// One leaderboard entry as embed markdown.
pub fn leaderboard_entry_text(entry: &LeaderboardEntry) -> String {
    let escaped = LeaderboardEntry {
        display_name: escape_display_name(&entry.display_name),
        ..entry.clone()
    };

    headline_with_detail(&escaped.title_line(), &escaped.detail_line())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_leaderboard_entries_with_escaped_names() {
        let entry = LeaderboardEntry {
            rank: 3,
            display_name: "egg_lord".to_owned(),
            formatted_bonus: "84.800Q".to_owned(),
            formatted_soul_eggs: "1.000Q".to_owned(),
        };

        assert_eq!(
            leaderboard_entry_text(&entry),
            "**3. egg\\_lord 84.800Q**\n1.000Q soul eggs"
        );
    }

    #[test]
    fn renders_earnings_info() {
        let summary = EarningsSummary {
            raw_bonus: 8.48e19,
            bonus: "84.800Q".to_owned(),
            soul_eggs: "1.000Q".to_owned(),
        };

        assert_eq!(
            earnings_info_message("krohmag", &summary),
            "Info for krohmag:\n--> EB: 84.800Q\n--> SE: 1.000Q"
        );
    }

    #[test]
    fn explains_formatting_failures() {
        let message = unformattable_message(&MagnitudeError::OutOfRange {
            value: 1e36,
            index: 12,
        });
        assert!(message.starts_with("A number is too large to display"));

        let message = unformattable_message(&MagnitudeError::Undefined { value: 0.0 });
        assert!(message.contains("no soul eggs"));
    }

    #[test]
    fn unrecognized_id_quotes_the_id() {
        assert_eq!(
            unrecognized_id_message("EI42"),
            ":exclamation: 'EI42' isn't a recognized user ID :exclamation:"
        );
    }
}
