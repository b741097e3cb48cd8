use std::path::Path;

use anyhow::{Context, Result};
use lotto645_db::rusqlite::Connection;

use lotto645_db::db::insert_draw;
use lotto645_db::models::{validate_draw, Draw};

fn parse_record(record: &csv::StringRecord) -> Result<Draw> {
    let get = |idx: usize| -> Result<String> {
        record
            .get(idx)
            .map(|s| s.trim().to_string())
            .with_context(|| format!("Champ manquant à l'index {}", idx))
    };

    let get_u8 = |idx: usize| -> Result<u8> {
        let s = get(idx)?;
        s.parse::<u8>()
            .with_context(|| format!("Impossible de parser '{}' (index {})", s, idx))
    };

    let draw_no: u32 = get(0)?
        .parse()
        .with_context(|| format!("Numéro de tirage invalide : '{}'", record.get(0).unwrap_or("")))?;

    let numbers: [u8; 6] = [
        get_u8(1)?,
        get_u8(2)?,
        get_u8(3)?,
        get_u8(4)?,
        get_u8(5)?,
        get_u8(6)?,
    ];
    let bonus = get_u8(7)?;

    validate_draw(&numbers, bonus)?;

    Ok(Draw {
        draw_no,
        numbers,
        bonus,
    })
}

pub struct ImportResult {
    pub total_records: u32,
    pub inserted: u32,
    pub skipped: u32,
    pub errors: u32,
}

/// Importe un historique CSV au format `DrwNo,N1,...,N6,Bonus` (avec en-tête).
pub fn import_csv(conn: &Connection, path: &Path) -> Result<ImportResult> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Impossible d'ouvrir {:?}", path))?;

    let tx = conn.unchecked_transaction()
        .context("Impossible de démarrer la transaction")?;

    let mut result = ImportResult {
        total_records: 0,
        inserted: 0,
        skipped: 0,
        errors: 0,
    };

    for record_result in reader.records() {
        result.total_records += 1;
        match record_result {
            Ok(record) => {
                match parse_record(&record) {
                    Ok(draw) => {
                        match insert_draw(&tx, &draw) {
                            Ok(true) => result.inserted += 1,
                            Ok(false) => result.skipped += 1,
                            Err(e) => {
                                eprintln!("Erreur insertion tirage {}: {}", result.total_records, e);
                                result.errors += 1;
                            }
                        }
                    }
                    Err(e) => {
                        eprintln!("Erreur parsing ligne {}: {}", result.total_records, e);
                        result.errors += 1;
                    }
                }
            }
            Err(e) => {
                eprintln!("Erreur lecture ligne {}: {}", result.total_records, e);
                result.errors += 1;
            }
        }
    }

    tx.commit().context("Échec du commit")?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(fields: &[&str]) -> csv::StringRecord {
        csv::StringRecord::from(fields.to_vec())
    }

    #[test]
    fn test_parse_record_ok() {
        let draw = parse_record(&record(&["1101", "3", "11", "18", "24", "35", "42", "7"])).unwrap();
        assert_eq!(draw.draw_no, 1101);
        assert_eq!(draw.numbers, [3, 11, 18, 24, 35, 42]);
        assert_eq!(draw.bonus, 7);
    }

    #[test]
    fn test_parse_record_trims_whitespace() {
        let draw = parse_record(&record(&[" 12 ", " 3", "11", "18", "24", "35", "42 ", " 7"])).unwrap();
        assert_eq!(draw.draw_no, 12);
        assert_eq!(draw.bonus, 7);
    }

    #[test]
    fn test_parse_record_missing_field() {
        assert!(parse_record(&record(&["1101", "3", "11", "18", "24", "35"])).is_err());
    }

    #[test]
    fn test_parse_record_out_of_range_number() {
        assert!(parse_record(&record(&["1101", "3", "11", "18", "24", "35", "46", "7"])).is_err());
    }

    #[test]
    fn test_parse_record_duplicate_number() {
        assert!(parse_record(&record(&["1101", "3", "3", "18", "24", "35", "42", "7"])).is_err());
    }

    #[test]
    fn test_parse_record_not_a_number() {
        assert!(parse_record(&record(&["abc", "3", "11", "18", "24", "35", "42", "7"])).is_err());
    }
}
