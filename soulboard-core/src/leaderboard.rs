use soulboard_database::model::users::UserRecord;
use tracing::debug;

use crate::earnings::EarningsSummary;
use crate::magnitude::MagnitudeError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub display_name: String,
    pub formatted_bonus: String,
    pub formatted_soul_eggs: String,
}

impl LeaderboardEntry {
    /// Headline line, e.g. `1. krohmag 84.800Q`.
    pub fn title_line(&self) -> String {
        format!(
            "{}. {} {}",
            self.rank, self.display_name, self.formatted_bonus
        )
    }

    /// Detail line, e.g. `1.000Q soul eggs`.
    pub fn detail_line(&self) -> String {
        format!("{} soul eggs", self.formatted_soul_eggs)
    }
}

/// Rank users by soul eggs, highest first.
///
/// Users with equal soul eggs keep their input order. If any entry cannot be
/// formatted the whole ranking fails.
pub fn rank_leaderboard(users: &[UserRecord]) -> Result<Vec<LeaderboardEntry>, MagnitudeError> {
    let mut ordered: Vec<&UserRecord> = users.iter().collect();
    // sort_by is stable, ties stay in input order.
    ordered.sort_by(|left, right| {
        right
            .progress
            .soul_egg_count
            .total_cmp(&left.progress.soul_egg_count)
    });

    let entries = ordered
        .into_iter()
        .enumerate()
        .map(|(position, user)| {
            let summary = EarningsSummary::from_user(user)?;
            Ok(LeaderboardEntry {
                rank: position + 1,
                display_name: user.discord_name.clone(),
                formatted_bonus: summary.bonus,
                formatted_soul_eggs: summary.soul_eggs,
            })
        })
        .collect::<Result<Vec<_>, MagnitudeError>>()?;

    debug!(entries = entries.len(), "leaderboard ranked");
    Ok(entries)
}
