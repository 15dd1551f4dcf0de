use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context as _, anyhow};
use sqlx::AnyConnection;
use tracing::{debug, info};

use crate::{
    database::Database,
    model::users::{NewUser, ProgressSnapshot, RemoveOutcome, UserRecord},
};

const USER_COLUMNS: &str = "game_id, discord_name, game_account_name, soul_food_level, \
     prophecy_bonus_level, soul_egg_count, prophecy_egg_count, created_at, updated_at, deleted_at";

#[derive(sqlx::FromRow)]
struct UserRow {
    game_id: String,
    discord_name: String,
    game_account_name: String,
    soul_food_level: i64,
    prophecy_bonus_level: i64,
    soul_egg_count: f64,
    prophecy_egg_count: i64,
    created_at: i64,
    updated_at: i64,
    deleted_at: Option<i64>,
}

/// Insert a user, or update the live or soft-deleted row with the same game id.
///
/// Progress always overwrites. Empty `discord_name` / `game_account_name`
/// keep whatever is stored. A soft-deleted row is brought back.
pub async fn upsert_user(conn: &mut AnyConnection, user: &NewUser) -> anyhow::Result<UserRecord> {
    let progress = &user.progress;
    let now = i64::try_from(now_unix_secs()).context("now out of i64 range")?;

    let row: UserRow = sqlx::query_as(&format!(
        "INSERT INTO users (
            game_id,
            discord_name,
            game_account_name,
            soul_food_level,
            prophecy_bonus_level,
            soul_egg_count,
            prophecy_egg_count,
            created_at,
            updated_at
         ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
         ON CONFLICT (game_id) DO UPDATE SET
            discord_name = CASE WHEN excluded.discord_name = '' THEN users.discord_name ELSE excluded.discord_name END,
            game_account_name = CASE WHEN excluded.game_account_name = '' THEN users.game_account_name ELSE excluded.game_account_name END,
            soul_food_level = excluded.soul_food_level,
            prophecy_bonus_level = excluded.prophecy_bonus_level,
            soul_egg_count = excluded.soul_egg_count,
            prophecy_egg_count = excluded.prophecy_egg_count,
            updated_at = excluded.updated_at,
            deleted_at = NULL
         RETURNING {USER_COLUMNS}"
    ))
    .bind(user.game_id.as_str())
    .bind(user.discord_name.as_str())
    .bind(user.game_account_name.as_str())
    .bind(i64::from(progress.soul_food_level))
    .bind(i64::from(progress.prophecy_bonus_level))
    .bind(progress.soul_egg_count)
    .bind(i64::from(progress.prophecy_egg_count))
    .bind(now)
    .bind(now)
    .fetch_one(&mut *conn)
    .await
    .with_context(|| format!("failed to upsert user {}", user.game_id))?;

    to_user_record(row)
}

/// Every live user, oldest registration first.
pub async fn list_users(conn: &mut AnyConnection) -> anyhow::Result<Vec<UserRecord>> {
    let rows: Vec<UserRow> = sqlx::query_as(&format!(
        "SELECT {USER_COLUMNS}
         FROM users
         WHERE deleted_at IS NULL
         ORDER BY created_at ASC, game_id ASC"
    ))
    .fetch_all(&mut *conn)
    .await?;

    rows.into_iter().map(to_user_record).collect()
}

/// Live users owned by a Discord name. Having none is an error.
pub async fn users_by_discord_name(
    conn: &mut AnyConnection,
    discord_name: &str,
) -> anyhow::Result<Vec<UserRecord>> {
    let rows: Vec<UserRow> = sqlx::query_as(&format!(
        "SELECT {USER_COLUMNS}
         FROM users
         WHERE discord_name = $1 AND deleted_at IS NULL
         ORDER BY created_at ASC, game_id ASC"
    ))
    .bind(discord_name)
    .fetch_all(&mut *conn)
    .await?;

    if rows.is_empty() {
        return Err(anyhow!(
            "no records found for provided Discord name: {}",
            discord_name
        ));
    }

    rows.into_iter().map(to_user_record).collect()
}

/// Earliest live registration owned by a Discord name, if any.
pub async fn first_user_by_discord_name(
    conn: &mut AnyConnection,
    discord_name: &str,
) -> anyhow::Result<Option<UserRecord>> {
    let row: Option<UserRow> = sqlx::query_as(&format!(
        "SELECT {USER_COLUMNS}
         FROM users
         WHERE discord_name = $1 AND deleted_at IS NULL
         ORDER BY created_at ASC, game_id ASC
         LIMIT 1"
    ))
    .bind(discord_name)
    .fetch_optional(&mut *conn)
    .await?;

    row.map(to_user_record).transpose()
}

pub async fn user_by_game_id(
    conn: &mut AnyConnection,
    game_id: &str,
) -> anyhow::Result<Option<UserRecord>> {
    let row: Option<UserRow> = sqlx::query_as(&format!(
        "SELECT {USER_COLUMNS}
         FROM users
         WHERE game_id = $1 AND deleted_at IS NULL"
    ))
    .bind(game_id)
    .fetch_optional(&mut *conn)
    .await?;

    row.map(to_user_record).transpose()
}

/// Mark a user as deleted. Returns false when no live row matched.
pub async fn soft_delete_user(conn: &mut AnyConnection, game_id: &str) -> anyhow::Result<bool> {
    let now = i64::try_from(now_unix_secs()).context("now out of i64 range")?;

    let updated = sqlx::query(
        "UPDATE users
         SET deleted_at = $1, updated_at = $2
         WHERE game_id = $3 AND deleted_at IS NULL",
    )
    .bind(now)
    .bind(now)
    .bind(game_id)
    .execute(&mut *conn)
    .await?
    .rows_affected();

    Ok(updated > 0)
}

/// Create or refresh a registration in its own transaction.
pub async fn register_user(db: &Database, user: &NewUser) -> anyhow::Result<UserRecord> {
    let mut tx = db.begin().await?;
    let record = upsert_user(&mut tx, user).await?;
    tx.commit().await?;

    info!(game_id = %record.game_id, discord_name = %record.discord_name, "user registered");
    Ok(record)
}

/// Remove a registration, provided the requester owns it.
pub async fn remove_user_owned(
    db: &Database,
    game_id: &str,
    discord_name: &str,
) -> anyhow::Result<RemoveOutcome> {
    let mut tx = db.begin().await?;

    let Some(existing) = user_by_game_id(&mut tx, game_id).await? else {
        return Ok(RemoveOutcome::NotFound);
    };

    if existing.discord_name != discord_name {
        debug!(game_id, requester = discord_name, "removal refused, requester is not the owner");
        return Ok(RemoveOutcome::NotOwner);
    }

    if !soft_delete_user(&mut tx, game_id).await? {
        return Ok(RemoveOutcome::NotFound);
    }

    tx.commit().await?;
    info!(game_id, discord_name, "user removed");
    Ok(RemoveOutcome::Removed)
}

/// Snapshot of every live user for the leaderboard.
pub async fn leaderboard_users(db: &Database) -> anyhow::Result<Vec<UserRecord>> {
    let mut tx = db.begin().await?;
    let users = list_users(&mut tx).await?;
    tx.commit().await?;
    Ok(users)
}

pub fn game_ids(users: &[UserRecord]) -> Vec<String> {
    users.iter().map(|user| user.game_id.clone()).collect()
}

pub fn now_unix_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_secs())
}

fn to_user_record(row: UserRow) -> anyhow::Result<UserRecord> {
    Ok(UserRecord {
        game_id: row.game_id,
        discord_name: row.discord_name,
        game_account_name: row.game_account_name,
        progress: ProgressSnapshot {
            soul_food_level: u32::try_from(row.soul_food_level)
                .context("soul_food_level row out of u32 range")?,
            prophecy_bonus_level: u32::try_from(row.prophecy_bonus_level)
                .context("prophecy_bonus_level row out of u32 range")?,
            soul_egg_count: row.soul_egg_count,
            prophecy_egg_count: u32::try_from(row.prophecy_egg_count)
                .context("prophecy_egg_count row out of u32 range")?,
        },
        created_at: u64::try_from(row.created_at).context("created_at row out of u64 range")?,
        updated_at: u64::try_from(row.updated_at).context("updated_at row out of u64 range")?,
        deleted_at: row
            .deleted_at
            .map(u64::try_from)
            .transpose()
            .context("deleted_at row out of u64 range")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn migrated_db() -> anyhow::Result<Database> {
        let db = Database::in_memory().await?;
        db.migrate().await?;
        Ok(db)
    }

    fn owned_by(game_id: &str, discord_name: &str) -> NewUser {
        NewUser {
            game_id: game_id.to_owned(),
            discord_name: discord_name.to_owned(),
            game_account_name: String::new(),
            progress: ProgressSnapshot::default(),
        }
    }

    fn progress_update(game_id: &str) -> NewUser {
        NewUser {
            game_id: game_id.to_owned(),
            discord_name: String::new(),
            game_account_name: "akroh".to_owned(),
            progress: ProgressSnapshot {
                soul_food_level: 1,
                prophecy_bonus_level: 1,
                soul_egg_count: 1.0,
                prophecy_egg_count: 1,
            },
        }
    }

    #[tokio::test]
    async fn rolled_back_upserts_leave_nothing_behind() -> anyhow::Result<()> {
        let db = migrated_db().await?;

        let mut tx = db.begin().await?;
        let created = upsert_user(&mut tx, &owned_by("EI100", "krohmag")).await?;
        assert_eq!(created.discord_name, "krohmag");

        let updated = upsert_user(&mut tx, &progress_update("EI100")).await?;
        assert_eq!(updated.progress.soul_egg_count, 1.0);
        tx.rollback().await?;

        let mut tx = db.begin().await?;
        assert!(user_by_game_id(&mut tx, "EI100").await?.is_none());
        assert!(list_users(&mut tx).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn committed_upsert_updates_progress_and_keeps_owner() -> anyhow::Result<()> {
        let db = migrated_db().await?;

        let mut tx = db.begin().await?;
        upsert_user(&mut tx, &owned_by("EI200", "krohmag")).await?;
        let updated = upsert_user(&mut tx, &progress_update("EI200")).await?;
        tx.commit().await?;

        assert_eq!(updated.discord_name, "krohmag");
        assert_eq!(updated.game_account_name, "akroh");
        assert_eq!(updated.progress.prophecy_bonus_level, 1);

        let mut tx = db.begin().await?;
        let fetched = user_by_game_id(&mut tx, "EI200")
            .await?
            .expect("user should exist after commit");
        assert_eq!(fetched.progress.prophecy_bonus_level, 1);

        let by_name = users_by_discord_name(&mut tx, "krohmag").await?;
        assert_eq!(by_name[0].progress.soul_food_level, 1);

        let everyone = list_users(&mut tx).await?;
        assert_eq!(game_ids(&everyone), vec!["EI200".to_owned()]);
        Ok(())
    }

    #[tokio::test]
    async fn soft_deleted_users_are_hidden_but_kept() -> anyhow::Result<()> {
        let db = migrated_db().await?;
        register_user(&db, &progress_update("EI300")).await?;

        let mut tx = db.begin().await?;
        assert!(soft_delete_user(&mut tx, "EI300").await?);
        assert!(!soft_delete_user(&mut tx, "EI300").await?);
        tx.commit().await?;

        let mut tx = db.begin().await?;
        assert!(user_by_game_id(&mut tx, "EI300").await?.is_none());
        assert!(list_users(&mut tx).await?.is_empty());

        let prophecy_eggs: i64 = sqlx::query_scalar(
            "SELECT prophecy_egg_count FROM users WHERE game_id = $1 AND deleted_at IS NOT NULL",
        )
        .bind("EI300")
        .fetch_one(&mut *tx)
        .await?;
        assert_eq!(prophecy_eggs, 1);
        Ok(())
    }

    #[tokio::test]
    async fn reregistering_revives_a_removed_user() -> anyhow::Result<()> {
        let db = migrated_db().await?;
        register_user(&db, &owned_by("EI400", "krohmag")).await?;
        assert_eq!(
            remove_user_owned(&db, "EI400", "krohmag").await?,
            RemoveOutcome::Removed
        );

        let revived = register_user(&db, &owned_by("EI400", "krohmag")).await?;
        assert_eq!(revived.deleted_at, None);
        assert_eq!(leaderboard_users(&db).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn removal_requires_matching_owner() -> anyhow::Result<()> {
        let db = migrated_db().await?;
        register_user(&db, &owned_by("EI500", "krohmag")).await?;

        assert_eq!(
            remove_user_owned(&db, "EI500", "someone_else").await?,
            RemoveOutcome::NotOwner
        );
        assert_eq!(
            remove_user_owned(&db, "EI999", "krohmag").await?,
            RemoveOutcome::NotFound
        );
        assert_eq!(leaderboard_users(&db).await?.len(), 1);

        assert_eq!(
            remove_user_owned(&db, "EI500", "krohmag").await?,
            RemoveOutcome::Removed
        );
        assert!(leaderboard_users(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn first_user_by_discord_name_picks_the_oldest_live_row() -> anyhow::Result<()> {
        let db = migrated_db().await?;
        let mut tx = db.begin().await?;

        assert!(first_user_by_discord_name(&mut tx, "krohmag").await?.is_none());

        for (game_id, created_at, deleted_at) in [
            ("EI703", 10_i64, None),
            ("EI702", 20, None),
            ("EI701", 5, Some(6_i64)),
        ] {
            sqlx::query(
                "INSERT INTO users (game_id, discord_name, created_at, updated_at, deleted_at)
                 VALUES ($1, 'krohmag', $2, $2, $3)",
            )
            .bind(game_id)
            .bind(created_at)
            .bind(deleted_at)
            .execute(&mut *tx)
            .await?;
        }

        let first = first_user_by_discord_name(&mut tx, "krohmag")
            .await?
            .expect("krohmag has live rows");
        assert_eq!(first.game_id, "EI703");
        Ok(())
    }

    #[tokio::test]
    async fn same_second_registrations_are_ordered_by_game_id() -> anyhow::Result<()> {
        let db = migrated_db().await?;
        let mut tx = db.begin().await?;

        for game_id in ["EI802", "EI801", "EI800"] {
            sqlx::query(
                "INSERT INTO users (game_id, discord_name, created_at, updated_at)
                 VALUES ($1, 'krohmag', 42, 42)",
            )
            .bind(game_id)
            .execute(&mut *tx)
            .await?;
        }

        let everyone = list_users(&mut tx).await?;
        assert_eq!(game_ids(&everyone), ["EI800", "EI801", "EI802"]);
        Ok(())
    }

    #[tokio::test]
    async fn accounts_without_a_game_name_can_coexist() -> anyhow::Result<()> {
        let db = migrated_db().await?;
        register_user(&db, &owned_by("EI900", "krohmag")).await?;
        register_user(&db, &owned_by("EI901", "someone_else")).await?;

        let users = leaderboard_users(&db).await?;
        assert_eq!(users.len(), 2);
        assert!(users.iter().all(|user| user.game_account_name.is_empty()));
        Ok(())
    }

    #[tokio::test]
    async fn looking_up_an_unknown_discord_name_fails() -> anyhow::Result<()> {
        let db = migrated_db().await?;
        let mut tx = db.begin().await?;

        let err = users_by_discord_name(&mut tx, "nobody")
            .await
            .expect_err("no users are registered");
        assert!(err.to_string().contains("nobody"));
        Ok(())
    }
}
