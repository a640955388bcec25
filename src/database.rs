use std::fs;
use std::path::{Path, PathBuf};

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::routes::ScoreRecord;

const DATABASE_NAME: &str = "tutor.sqlite3";

/// Seed row created on first initialization so the leaderboard is never empty
const SEED_NAME: &str = "user";

pub fn get_db_path() -> PathBuf {
    use directories::ProjectDirs;

    let proj_dirs = ProjectDirs::from("", "", "tutor").expect("Unable to find user directory");
    let data_dir = proj_dirs.data_local_dir();

    fs::create_dir_all(data_dir).expect("Failed to create local data dir");

    data_dir.join(DATABASE_NAME)
}

pub async fn init_db(db_path: impl AsRef<Path>) -> sqlx::Result<SqlitePool> {
    let db_url = format!("sqlite://{}?mode=rwc", db_path.as_ref().display()); // rwc = read/write/create
    let db_pool = SqlitePoolOptions::new()
        .max_connections(2)
        .connect(&db_url)
        .await?;

    // PRAGMA statements cannot run inside a transaction
    for pragma_sql in &[
        "PRAGMA busy_timeout = 2000;", // 2 seconds timeout for lock contention
        "PRAGMA journal_mode = WAL;",  // Write-Ahead Logging for better concurrency
        "PRAGMA synchronous = NORMAL;", // Balance between safety and performance
    ] {
        sqlx::query(pragma_sql).execute(&db_pool).await?;
    }

    // Idempotent schema migration: runs once at startup, never in request paths
    let mut tx = db_pool.begin().await?;

    for sql in &[
        r"
        CREATE TABLE IF NOT EXISTS scores (
            name   TEXT    NOT NULL PRIMARY KEY,
            score  INTEGER NOT NULL DEFAULT 0
        );",
        "INSERT OR IGNORE INTO scores (name, score) VALUES ('user', 0);",
    ] {
        sqlx::query(sql).execute(tx.as_mut()).await?;
    }

    tx.commit().await?;

    log::info!("Initialized database at {}", db_path.as_ref().display());

    Ok(db_pool)
}

pub fn remove_db(db_path: impl AsRef<Path>) {
    // Remove WAL and SHM files (ignore errors as they might not exist)
    let wal_path = format!("{}-wal", db_path.as_ref().display());
    let shm_path = format!("{}-shm", db_path.as_ref().display());
    let _ = fs::remove_file(wal_path);
    let _ = fs::remove_file(shm_path);

    if let Err(e) = std::fs::remove_file(&db_path) {
        log::warn!(
            "Unable to remove database at {}: {e}",
            db_path.as_ref().display()
        );
    } else {
        log::info!("Removed database at {}", db_path.as_ref().display());
    }
}

/// Insert-or-add-to-existing write keyed by the unique `name` column.
///
/// A single conflict-clause statement keeps the increment atomic under
/// concurrent callers; duplicate names resolve through the increment path
/// and can never produce a second row.
pub async fn upsert_increment(
    name: &str,
    delta: i64,
    pool: &SqlitePool,
) -> sqlx::Result<ScoreRecord> {
    sqlx::query_as::<_, ScoreRecord>(
        r"
        INSERT INTO scores (name, score) VALUES (?, ?)
        ON CONFLICT(name) DO UPDATE SET score = score + excluded.score
        RETURNING name, score
        ",
    )
    .bind(name)
    .bind(delta)
    .fetch_one(pool)
    .await
}

/// Top `n` records by score descending, insertion order as tiebreak
pub async fn top_scores(n: i64, pool: &SqlitePool) -> sqlx::Result<Vec<ScoreRecord>> {
    sqlx::query_as::<_, ScoreRecord>(
        r"
        SELECT name, score FROM scores
        ORDER BY score DESC, rowid ASC
        LIMIT ?
        ",
    )
    .bind(n)
    .fetch_all(pool)
    .await
}

/// Fetch the seeded default row, if present
pub async fn seed_record(pool: &SqlitePool) -> sqlx::Result<Option<ScoreRecord>> {
    sqlx::query_as::<_, ScoreRecord>("SELECT name, score FROM scores WHERE name = ?")
        .bind(SEED_NAME)
        .fetch_optional(pool)
        .await
}
