use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// Domain model for a tradable symbol. Instruments are seeded out of band
/// and read-only to the ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instrument {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Database model for instruments
#[derive(Queryable, Selectable, Identifiable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::instruments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct InstrumentDB {
    pub id: String,
    pub name: String,
    pub created_at: NaiveDateTime,
}

impl From<InstrumentDB> for Instrument {
    fn from(db: InstrumentDB) -> Self {
        Instrument {
            id: db.id,
            name: db.name,
            created_at: DateTime::from_naive_utc_and_offset(db.created_at, Utc),
        }
    }
}
