use soulboard_database::model::users::{NewUser, ProgressSnapshot};

use crate::proto::{Backup, ResearchItem};

/// Epic research id of the "Soul Food" upgrade.
pub const SOUL_FOOD_RESEARCH_ID: &str = "soul_eggs";
/// Epic research id of the "Prophecy Bonus" upgrade.
pub const PROPHECY_BONUS_RESEARCH_ID: &str = "prophecy_bonus";

/// Pull the four progress fields out of a backup. Missing data reads as zero.
pub fn progress_from_backup(backup: &Backup) -> ProgressSnapshot {
    let Some(game) = backup.game.as_ref() else {
        return ProgressSnapshot::default();
    };

    let mut progress = ProgressSnapshot {
        soul_egg_count: game.soul_eggs_d.unwrap_or_default(),
        prophecy_egg_count: game
            .eggs_of_prophecy
            .map_or(0, |count| u32::try_from(count).unwrap_or(u32::MAX)),
        ..Default::default()
    };

    for research in &game.epic_research {
        match research.id.as_deref() {
            Some(SOUL_FOOD_RESEARCH_ID) => progress.soul_food_level = research_level(research),
            Some(PROPHECY_BONUS_RESEARCH_ID) => {
                progress.prophecy_bonus_level = research_level(research)
            }
            _ => {}
        }
    }

    progress
}

/// Registration payload for a backup claimed by a Discord user.
pub fn new_user_from_backup(backup: &Backup, discord_name: &str) -> NewUser {
    NewUser {
        game_id: backup_game_id(backup).to_owned(),
        discord_name: discord_name.to_owned(),
        game_account_name: backup.user_name.clone().unwrap_or_default(),
        progress: progress_from_backup(backup),
    }
}

pub fn backup_game_id(backup: &Backup) -> &str {
    backup.ei_user_id.as_deref().unwrap_or_default()
}

fn research_level(research: &ResearchItem) -> u32 {
    research.level.unwrap_or_default()
}
