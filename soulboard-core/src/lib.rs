pub mod earnings;
pub mod leaderboard;
pub mod magnitude;

use soulboard_api::ApiClient;
use soulboard_database::Database;

pub type Error = anyhow::Error;

#[derive(Clone, Debug)]
pub struct Data {
    pub db: Database,
    pub api: ApiClient,
}

pub type Context<'a> = poise::Context<'a, Data, Error>;
