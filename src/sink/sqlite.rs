//! Relational sink: the `hotels` table, replaced wholesale per run.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OpenFlags};

use crate::model::{DatasetRow, HotelRecord};
use crate::sink::SinkError;

/// Database file name inside the output directory.
pub const DATABASE_FILE: &str = "hotels.sqlite";

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS hotels (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    uri TEXT NOT NULL,
    stars REAL NOT NULL,
    address TEXT NULL,
    contact TEXT NULL,
    phone TEXT NULL
)";

const INSERT_HOTEL: &str = "INSERT INTO hotels (name, uri, stars, address, contact, phone)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

const SELECT_HOTELS: &str =
    "SELECT name, address, stars, uri, contact, phone FROM hotels ORDER BY name ASC";

fn database_error(path: &Path, err: rusqlite::Error) -> SinkError {
    SinkError::Database { path: path.to_path_buf(), detail: err.to_string() }
}

/// Replace the stored dataset with `records`.
///
/// Schema creation is idempotent. The delete and every insert run in one
/// transaction, so a failed run leaves the previous dataset in place. The
/// surrogate `id` keys are reassigned on every run and carry no meaning
/// across runs.
pub fn replace_dataset(records: &[HotelRecord], db_path: &Path) -> Result<PathBuf, SinkError> {
    let mut conn = Connection::open(db_path).map_err(|err| database_error(db_path, err))?;
    conn.execute(CREATE_TABLE, [])
        .map_err(|err| database_error(db_path, err))?;

    let tx = conn.transaction().map_err(|err| database_error(db_path, err))?;
    tx.execute("DELETE FROM hotels", [])
        .map_err(|err| database_error(db_path, err))?;
    {
        let mut insert = tx.prepare(INSERT_HOTEL).map_err(|err| database_error(db_path, err))?;
        for hotel in records {
            insert
                .execute(params![
                    hotel.name,
                    hotel.uri,
                    hotel.stars,
                    hotel.address,
                    hotel.contact,
                    hotel.phone,
                ])
                .map_err(|err| database_error(db_path, err))?;
        }
    }
    tx.commit().map_err(|err| database_error(db_path, err))?;
    Ok(db_path.to_path_buf())
}

/// Read the published dataset ordered by hotel name. An absent database
/// file is an empty dataset, not an error.
pub fn fetch_dataset(db_path: &Path) -> Result<Vec<DatasetRow>, SinkError> {
    if !db_path.exists() {
        return Ok(Vec::new());
    }
    let conn = Connection::open_with_flags(db_path, OpenFlags::SQLITE_OPEN_READ_ONLY)
        .map_err(|err| database_error(db_path, err))?;
    let mut select = conn.prepare(SELECT_HOTELS).map_err(|err| database_error(db_path, err))?;
    let rows = select
        .query_map([], |row| {
            Ok(DatasetRow {
                name: row.get(0)?,
                address: row.get(1)?,
                stars: row.get(2)?,
                uri: row.get(3)?,
                contact: row.get(4)?,
                phone: row.get(5)?,
            })
        })
        .map_err(|err| database_error(db_path, err))?;

    let mut hotels = Vec::new();
    for row in rows {
        hotels.push(row.map_err(|err| database_error(db_path, err))?);
    }
    Ok(hotels)
}
