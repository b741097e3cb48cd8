use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;

use crate::models::Draw;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS draws (
    draw_no  INTEGER PRIMARY KEY,
    n1       INTEGER NOT NULL,
    n2       INTEGER NOT NULL,
    n3       INTEGER NOT NULL,
    n4       INTEGER NOT NULL,
    n5       INTEGER NOT NULL,
    n6       INTEGER NOT NULL,
    bonus    INTEGER NOT NULL
);
";

pub fn db_path() -> std::path::PathBuf {
    let mut path = std::env::current_dir().unwrap_or_default();
    path.push("data");
    path.push("lotto645.db");
    path
}

pub fn open_db(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Impossible de créer le répertoire {:?}", parent))?;
    }
    let conn = Connection::open(path)
        .with_context(|| format!("Impossible d'ouvrir la base {:?}", path))?;
    Ok(conn)
}

pub fn migrate(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)
        .context("Échec de la migration")?;
    Ok(())
}

pub fn insert_draw(conn: &Connection, draw: &Draw) -> Result<bool> {
    let changed = conn.execute(
        "INSERT OR IGNORE INTO draws (draw_no, n1, n2, n3, n4, n5, n6, bonus)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        rusqlite::params![
            draw.draw_no,
            draw.numbers[0],
            draw.numbers[1],
            draw.numbers[2],
            draw.numbers[3],
            draw.numbers[4],
            draw.numbers[5],
            draw.bonus,
        ],
    ).context("Échec de l'insertion")?;
    Ok(changed > 0)
}

fn row_to_draw(row: &rusqlite::Row<'_>) -> rusqlite::Result<Draw> {
    Ok(Draw {
        draw_no: row.get(0)?,
        numbers: [
            row.get::<_, u8>(1)?,
            row.get::<_, u8>(2)?,
            row.get::<_, u8>(3)?,
            row.get::<_, u8>(4)?,
            row.get::<_, u8>(5)?,
            row.get::<_, u8>(6)?,
        ],
        bonus: row.get(7)?,
    })
}

/// Tirages du plus récent au plus ancien.
pub fn fetch_last_draws(conn: &Connection, limit: u32) -> Result<Vec<Draw>> {
    let mut stmt = conn.prepare(
        "SELECT draw_no, n1, n2, n3, n4, n5, n6, bonus
         FROM draws ORDER BY draw_no DESC LIMIT ?1"
    )?;
    let draws = stmt.query_map([limit], |row| row_to_draw(row))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(draws)
}

pub fn fetch_draw(conn: &Connection, draw_no: u32) -> Result<Option<Draw>> {
    let draw = conn.query_row(
        "SELECT draw_no, n1, n2, n3, n4, n5, n6, bonus
         FROM draws WHERE draw_no = ?1",
        [draw_no],
        |row| row_to_draw(row),
    ).optional()?;
    Ok(draw)
}

pub fn count_draws(conn: &Connection) -> Result<u32> {
    let count: u32 = conn.query_row("SELECT COUNT(*) FROM draws", [], |row| row.get(0))?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_draw(draw_no: u32) -> Draw {
        Draw {
            draw_no,
            numbers: [3, 11, 18, 24, 35, 42],
            bonus: 7,
        }
    }

    #[test]
    fn test_insert_and_count() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();
        assert_eq!(count_draws(&conn).unwrap(), 0);

        insert_draw(&conn, &test_draw(1)).unwrap();
        assert_eq!(count_draws(&conn).unwrap(), 1);
    }

    #[test]
    fn test_duplicate_ignored() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();

        let inserted = insert_draw(&conn, &test_draw(1)).unwrap();
        assert!(inserted);
        let inserted = insert_draw(&conn, &test_draw(1)).unwrap();
        assert!(!inserted);
        assert_eq!(count_draws(&conn).unwrap(), 1);
    }

    #[test]
    fn test_fetch_order_most_recent_first() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();

        insert_draw(&conn, &test_draw(1)).unwrap();
        insert_draw(&conn, &test_draw(3)).unwrap();
        insert_draw(&conn, &test_draw(2)).unwrap();

        let draws = fetch_last_draws(&conn, 10).unwrap();
        assert_eq!(draws.len(), 3);
        assert_eq!(draws[0].draw_no, 3);
        assert_eq!(draws[1].draw_no, 2);
        assert_eq!(draws[2].draw_no, 1);
    }

    #[test]
    fn test_fetch_draw_found() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();

        insert_draw(&conn, &test_draw(42)).unwrap();
        let draw = fetch_draw(&conn, 42).unwrap();
        assert!(draw.is_some());
        assert_eq!(draw.unwrap().numbers, [3, 11, 18, 24, 35, 42]);
    }

    #[test]
    fn test_fetch_draw_absent() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();

        let draw = fetch_draw(&conn, 99).unwrap();
        assert!(draw.is_none());
    }
}
