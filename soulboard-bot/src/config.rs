use std::env;

use anyhow::Context as _;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://soulboard.sqlite?mode=rwc";
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 5;

/// Startup settings read from the process environment.
#[derive(Clone, Debug)]
pub struct BotConfig {
    pub token: String,
    pub guild_id: u64,
    pub database_url: String,
    pub database_max_connections: u32,
    pub auto_run_migrations: bool,
}

impl BotConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let token = env::var("DISCORD_TOKEN").context("DISCORD_TOKEN is not set")?;
        let guild_id = env::var("DISCORD_GUILD_ID")
            .context("DISCORD_GUILD_ID is not set")?
            .trim()
            .parse::<u64>()
            .context("DISCORD_GUILD_ID is not a valid guild id")?;

        let database_url = env::var("DATABASE_URL")
            .ok()
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned());

        let database_max_connections = u32::try_from(env_u64(
            "DATABASE_MAX_CONNECTIONS",
            u64::from(DEFAULT_DATABASE_MAX_CONNECTIONS),
        ))
        .unwrap_or(DEFAULT_DATABASE_MAX_CONNECTIONS)
        .max(1);

        Ok(Self {
            token,
            guild_id,
            database_url,
            database_max_connections,
            auto_run_migrations: env_bool("AUTO_RUN_MIGRATIONS", true),
        })
    }
}

fn env_bool(key: &str, default: bool) -> bool {
    parse_bool(env::var(key).ok().as_deref(), default)
}

fn env_u64(key: &str, default: u64) -> u64 {
    parse_u64(env::var(key).ok().as_deref(), default)
}

fn parse_bool(value: Option<&str>, default: bool) -> bool {
    match value {
        Some(value) => matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        ),
        None => default,
    }
}

fn parse_u64(value: Option<&str>, default: u64) -> u64 {
    value
        .and_then(|value| value.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::{parse_bool, parse_u64};

    #[test]
    fn parses_truthy_values() {
        for value in ["1", "true", "TRUE", " yes ", "on"] {
            assert!(parse_bool(Some(value), false), "{value} should be true");
        }
        for value in ["0", "false", "off", "nope", ""] {
            assert!(!parse_bool(Some(value), true), "{value} should be false");
        }
    }

    #[test]
    fn missing_values_fall_back_to_default() {
        assert!(parse_bool(None, true));
        assert!(!parse_bool(None, false));
        assert_eq!(parse_u64(None, 5), 5);
    }

    #[test]
    fn unparsable_numbers_fall_back_to_default() {
        assert_eq!(parse_u64(Some(" 12 "), 5), 12);
        assert_eq!(parse_u64(Some("twelve"), 5), 5);
        assert_eq!(parse_u64(Some("-3"), 5), 5);
    }
}
