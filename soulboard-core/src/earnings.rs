use soulboard_database::model::users::{ProgressSnapshot, UserRecord};

use crate::magnitude::{MagnitudeError, format_magnitude};

const BASE_SOUL_EGG_BONUS: f64 = 0.10;
const SOUL_FOOD_STEP: f64 = 0.01;
const BASE_PROPHECY_BONUS: f64 = 0.05;
const PROPHECY_BONUS_STEP: f64 = 0.01;

/// Earnings bonus of a progress snapshot, as a raw multiplier-weighted egg count.
///
/// Inputs are not validated; negative fields are the caller's problem.
pub fn compute_bonus(progress: &ProgressSnapshot) -> f64 {
    let soul_food_percent =
        (BASE_SOUL_EGG_BONUS + f64::from(progress.soul_food_level) * SOUL_FOOD_STEP) * 100.0;
    let prophecy_percent = (1.0
        + BASE_PROPHECY_BONUS
        + f64::from(progress.prophecy_bonus_level) * PROPHECY_BONUS_STEP)
        .powf(f64::from(progress.prophecy_egg_count))
        * 100.0;
    let combined_percent = (soul_food_percent * prophecy_percent) / 100.0;

    combined_percent * progress.soul_egg_count
}

/// Display-ready earnings bonus and soul egg count for one player.
#[derive(Clone, Debug, PartialEq)]
pub struct EarningsSummary {
    pub raw_bonus: f64,
    pub bonus: String,
    pub soul_eggs: String,
}

impl EarningsSummary {
    pub fn from_progress(progress: &ProgressSnapshot) -> Result<Self, MagnitudeError> {
        let raw_bonus = compute_bonus(progress);

        Ok(Self {
            raw_bonus,
            bonus: format_magnitude(raw_bonus)?,
            soul_eggs: format_magnitude(progress.soul_egg_count)?,
        })
    }

    pub fn from_user(user: &UserRecord) -> Result<Self, MagnitudeError> {
        Self::from_progress(&user.progress)
    }
}
