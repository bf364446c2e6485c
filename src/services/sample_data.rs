use chrono::Duration;
use tracing::{info, warn};

use crate::services::restaurant::Restaurant;

const SAMPLE_TABLES: [(&str, i32); 8] = [
    ("Window 1", 2),
    ("Window 2", 2),
    ("Center 1", 4),
    ("Center 2", 4),
    ("VIP 1", 6),
    ("VIP 2", 8),
    ("Bar Counter 1", 1),
    ("Bar Counter 2", 1),
];

/// Adds the demo tables and two bookings relative to the current time.
///
/// Bookings go to the 1st and 3rd table added by this call; ones that
/// cannot be placed are skipped.
pub fn populate(restaurant: &mut Restaurant) {
    let mut table_ids = vec![];
    for (name, seats) in SAMPLE_TABLES {
        match restaurant.add_table(name, seats) {
            Ok(table) => table_ids.push(table.id()),
            Err(err) => warn!(name, %err, "sample table skipped"),
        }
    }

    let now = restaurant.now();
    let bookings = [
        ("Ryan Gosling", "+79161234567", 0, Duration::hours(2), Duration::hours(3)),
        ("Jane Doe", "+79167654321", 2, Duration::hours(1), Duration::hours(2)),
    ];

    for (guest, phone, table_idx, from, to) in bookings {
        let Some(&table_id) = table_ids.get(table_idx) else {
            continue;
        };

        if let Err(err) = restaurant.create_booking(table_id, guest, phone, now + from, now + to) {
            warn!(guest, %err, "sample booking skipped");
        }
    }

    info!(tables = table_ids.len(), "sample data loaded");
}
