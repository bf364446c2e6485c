use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::types::{BookingId, RestaurantError, RestaurantResult, TableId};

/// Minimum count of digits and `+` signs in an acceptable phone number
pub const MIN_PHONE_CHARS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestaurantTable {
    id: TableId,
    name: String,
    seats: i32,
    is_occupied: bool,
}

impl RestaurantTable {
    pub fn new(id: TableId, name: &str, seats: i32) -> RestaurantResult<Self> {
        Ok(Self {
            id,
            name: checked_table_name(name)?,
            seats: checked_seats(seats)?,
            is_occupied: false,
        })
    }

    pub fn id(&self) -> TableId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn seats(&self) -> i32 {
        self.seats
    }

    pub fn is_occupied(&self) -> bool {
        self.is_occupied
    }

    pub fn rename(&mut self, name: &str) -> RestaurantResult<()> {
        self.name = checked_table_name(name)?;
        Ok(())
    }

    pub fn resize(&mut self, seats: i32) -> RestaurantResult<()> {
        self.seats = checked_seats(seats)?;
        Ok(())
    }

    /// Marks the table as taken by walk-in guests.
    pub fn occupy(&mut self) -> RestaurantResult<()> {
        if self.is_occupied {
            return Err(RestaurantError::invalid_state(format!("Table '{}' is already occupied", self.name)));
        }

        self.is_occupied = true;
        Ok(())
    }

    /// Frees the table. Releasing a free table is an error, not a no-op.
    pub fn release(&mut self) -> RestaurantResult<()> {
        if !self.is_occupied {
            return Err(RestaurantError::invalid_state(format!("Table '{}' is not occupied", self.name)));
        }

        self.is_occupied = false;
        Ok(())
    }
}

fn checked_table_name(name: &str) -> RestaurantResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(RestaurantError::validation("Table name cannot be empty"));
    }

    Ok(name.to_owned())
}

fn checked_seats(seats: i32) -> RestaurantResult<i32> {
    if seats <= 0 {
        return Err(RestaurantError::validation(format!("Number of seats must be positive, got {seats}")));
    }

    Ok(seats)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BookingStatus {
    Active,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Booking {
    id: BookingId,
    table_id: TableId,
    // kept so cancelled or past bookings still render after their table is removed
    table_name: String,
    guest_name: String,
    guest_phone: String,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    status: BookingStatus,
}

impl Booking {
    pub fn new(
        id: BookingId,
        table: &RestaurantTable,
        guest_name: &str,
        guest_phone: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> RestaurantResult<Self> {
        check_interval(start, end)?;

        let guest_name = guest_name.trim();
        if guest_name.is_empty() {
            return Err(RestaurantError::validation("Guest name cannot be empty"));
        }

        let guest_phone = guest_phone.trim();
        if !is_valid_phone(guest_phone) {
            return Err(RestaurantError::validation(format!("Phone number '{guest_phone}' is not valid")));
        }

        Ok(Self {
            id,
            table_id: table.id(),
            table_name: table.name().to_owned(),
            guest_name: guest_name.to_owned(),
            guest_phone: guest_phone.to_owned(),
            start,
            end,
            status: BookingStatus::Active,
        })
    }

    pub fn id(&self) -> BookingId {
        self.id
    }

    pub fn table_id(&self) -> TableId {
        self.table_id
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn guest_name(&self) -> &str {
        &self.guest_name
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn status(&self) -> BookingStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == BookingStatus::Active
    }

    /// Half-open interval test: `[a, b)` and `[c, d)` intersect iff `a < d && c < b`.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start < end && start < self.end
    }

    pub fn cancel(&mut self) -> RestaurantResult<()> {
        if !self.is_active() {
            return Err(RestaurantError::invalid_state(format!("Booking #{} is already cancelled", self.id)));
        }

        self.status = BookingStatus::Cancelled;
        Ok(())
    }
}

pub fn check_interval(start: DateTime<Utc>, end: DateTime<Utc>) -> RestaurantResult<()> {
    if end <= start {
        return Err(RestaurantError::validation("End time must be after start time"));
    }

    Ok(())
}

/// Basic format check: only digits and `+` are counted, separators are ignored.
pub fn is_valid_phone(phone: &str) -> bool {
    phone.chars().filter(|c| c.is_ascii_digit() || *c == '+').count() >= MIN_PHONE_CHARS
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RestaurantStatus {
    pub total_tables: usize,
    pub occupied_tables: usize,
    pub free_tables: usize,
    pub active_bookings: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BookingWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}
