use serde::{Deserialize, Serialize};

/// Progress fields copied out of a player's game backup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub soul_food_level: u32,
    pub prophecy_bonus_level: u32,
    pub soul_egg_count: f64,
    pub prophecy_egg_count: u32,
}

/// A registration about to be written. Empty names keep the stored value on update.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub game_id: String,
    pub discord_name: String,
    pub game_account_name: String,
    pub progress: ProgressSnapshot,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub game_id: String,
    pub discord_name: String,
    pub game_account_name: String,
    pub progress: ProgressSnapshot,
    pub created_at: u64,
    pub updated_at: u64,
    pub deleted_at: Option<u64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    NotFound,
    NotOwner,
}
