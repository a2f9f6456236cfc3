use anyhow::{Context, Result};
use rusqlite::{params, Connection};

struct Migration {
    version: &'static str,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "001",
        name: "initial",
        sql: include_str!("migrations/001_initial.sql"),
    },
    Migration {
        version: "002",
        name: "lookup_indexes",
        sql: include_str!("migrations/002_lookup_indexes.sql"),
    },
];

pub fn run_migrations(conn: &Connection) -> Result<()> {
    apply_pending(conn, MIGRATIONS)
}

fn apply_pending(conn: &Connection, migrations: &[Migration]) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            applied_at TEXT NOT NULL
        )",
    )
    .context("Failed to create schema_migrations table")?;

    let applied = get_applied_migrations(conn)?;

    for migration in migrations {
        if !applied.iter().any(|v| v == migration.version) {
            apply_migration(conn, migration)?;
        }
    }

    Ok(())
}

fn get_applied_migrations(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT version FROM schema_migrations ORDER BY version")?;
    let versions = stmt
        .query_map([], |row| row.get(0))?
        .collect::<Result<Vec<String>, _>>()?;
    Ok(versions)
}

fn apply_migration(conn: &Connection, migration: &Migration) -> Result<()> {
    tracing::info!(
        "Applying migration {}: {}",
        migration.version,
        migration.name
    );

    let context = || {
        format!(
            "Failed to apply migration {}: {}",
            migration.version, migration.name
        )
    };

    // Schema change and bookkeeping row commit together; dropping the
    // transaction on error rolls both back.
    let tx = conn.unchecked_transaction().with_context(context)?;
    tx.execute_batch(migration.sql).with_context(context)?;
    tx.execute(
        "INSERT INTO schema_migrations (version, name, applied_at) VALUES (?1, ?2, ?3)",
        params![
            migration.version,
            migration.name,
            chrono::Utc::now().to_rfc3339()
        ],
    )
    .with_context(context)?;
    tx.commit().with_context(context)?;

    tracing::info!("Migration {} applied successfully", migration.version);
    Ok(())
}
