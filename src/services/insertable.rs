use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::services::restaurant::TableChanges;
use crate::types::TableId;

#[derive(Deserialize, Clone)]
pub struct NewTable {
    pub name: String,
    pub seats: i32,
}

#[derive(Deserialize, Clone, Default)]
pub struct TableEdit {
    pub name: Option<String>,
    pub seats: Option<i32>,
}

impl From<TableEdit> for TableChanges {
    fn from(edit: TableEdit) -> Self {
        TableChanges { name: edit.name, seats: edit.seats }
    }
}

#[derive(Deserialize, Clone)]
pub struct NewBooking {
    pub table_id: TableId,
    pub guest_name: String,
    pub guest_phone: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

fn default_min_seats() -> i32 {
    1
}

#[derive(Deserialize, Clone)]
pub struct AvailabilityQuery {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    #[serde(default = "default_min_seats")]
    pub min_seats: i32,
}

fn default_active_only() -> bool {
    true
}

#[derive(Deserialize, Clone)]
pub struct BookingsQuery {
    #[serde(default = "default_active_only")]
    pub active_only: bool,
}
