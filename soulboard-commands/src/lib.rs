pub mod eggs;
pub mod utility;

use soulboard_core::{Data, Error};

pub struct CommandMeta {
    pub name: &'static str,
    pub desc: &'static str,
    pub category: &'static str,
    pub usage: &'static str,
}

pub const COMMANDS: &[CommandMeta] = &[
    utility::ping::META,
    utility::help::META,
    utility::usage::META,
    eggs::register::META,
    eggs::removeid::META,
    eggs::leaderboard::META,
    eggs::eb::META,
];

pub fn commands() -> Vec<poise::Command<Data, Error>> {
    vec![
        utility::ping::ping(),
        utility::help::help(),
        utility::usage::usage(),
        eggs::register::register(),
        eggs::removeid::removeid(),
        eggs::leaderboard::leaderboard(),
        eggs::eb::eb(),
    ]
}
