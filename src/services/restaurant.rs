use chrono::{DateTime, Duration, DurationRound, Utc};
use tracing::{debug, info};

use crate::services::models::{check_interval, Booking, BookingWindow, RestaurantStatus, RestaurantTable};
use crate::types::{BookingId, RestaurantError, RestaurantResult, TableId};

pub trait Clock: Send {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Optional edits applied by [`Restaurant::update_table`]
#[derive(Debug, Clone, Default)]
pub struct TableChanges {
    pub name: Option<String>,
    pub seats: Option<i32>,
}

/// In-memory owner of every table and booking.
///
/// Bookings reference tables by id only. The manual occupancy flag of a table
/// and its time-bound bookings are tracked independently: booking a table never
/// occupies it, and an occupied table still shows up in availability searches.
pub struct Restaurant {
    tables: Vec<RestaurantTable>,
    bookings: Vec<Booking>,
    next_table_id: TableId,
    next_booking_id: BookingId,
    clock: Box<dyn Clock>,
}

impl Default for Restaurant {
    fn default() -> Self {
        Self::new()
    }
}

impl Restaurant {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            tables: vec![],
            bookings: vec![],
            next_table_id: 1,
            next_booking_id: 1,
            clock: Box::new(clock),
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn list_tables(&self) -> &[RestaurantTable] {
        &self.tables
    }

    pub fn list_bookings(&self, active_only: bool) -> Vec<&Booking> {
        self.bookings
            .iter()
            .filter(|b| !active_only || b.is_active())
            .collect()
    }

    pub fn table(&self, table_id: TableId) -> RestaurantResult<&RestaurantTable> {
        self.tables
            .iter()
            .find(|t| t.id() == table_id)
            .ok_or_else(|| RestaurantError::table_not_found(table_id))
    }

    fn table_mut(&mut self, table_id: TableId) -> RestaurantResult<&mut RestaurantTable> {
        self.tables
            .iter_mut()
            .find(|t| t.id() == table_id)
            .ok_or_else(|| RestaurantError::table_not_found(table_id))
    }

    pub fn booking(&self, booking_id: BookingId) -> RestaurantResult<&Booking> {
        self.bookings
            .iter()
            .find(|b| b.id() == booking_id)
            .ok_or_else(|| RestaurantError::booking_not_found(booking_id))
    }

    pub fn add_table(&mut self, name: &str, seats: i32) -> RestaurantResult<RestaurantTable> {
        let table = RestaurantTable::new(self.next_table_id, name, seats)?;

        self.next_table_id += 1;
        self.tables.push(table.clone());
        info!(table_id = table.id(), seats, "table added");

        Ok(table)
    }

    pub fn update_table(&mut self, table_id: TableId, changes: TableChanges) -> RestaurantResult<RestaurantTable> {
        let table = self.table_mut(table_id)?;

        // edit a copy so a rejected field leaves the stored table untouched
        let mut edited = table.clone();
        if let Some(name) = &changes.name {
            edited.rename(name)?;
        }
        if let Some(seats) = changes.seats {
            edited.resize(seats)?;
        }

        *table = edited.clone();
        info!(table_id, "table updated");

        Ok(edited)
    }

    /// Removes a table unless it is occupied or still has an active booking
    /// that has not ended yet. Bookings are never cascaded.
    pub fn remove_table(&mut self, table_id: TableId) -> RestaurantResult<RestaurantTable> {
        let table = self.table(table_id)?;

        if table.is_occupied() {
            return Err(RestaurantError::conflict(format!(
                "Table '{}' is occupied and cannot be removed",
                table.name()
            )));
        }

        let now = self.now();
        if let Some(booking) = self
            .bookings
            .iter()
            .find(|b| b.table_id() == table_id && b.is_active() && b.end() > now)
        {
            return Err(RestaurantError::conflict(format!(
                "Table '{}' has an active booking #{} and cannot be removed",
                table.name(),
                booking.id()
            )));
        }

        let position = self
            .tables
            .iter()
            .position(|t| t.id() == table_id)
            .ok_or_else(|| RestaurantError::table_not_found(table_id))?;
        let removed = self.tables.remove(position);
        info!(table_id, "table removed");

        Ok(removed)
    }

    pub fn occupy_table(&mut self, table_id: TableId) -> RestaurantResult<RestaurantTable> {
        let table = self.table_mut(table_id)?;
        table.occupy()?;
        info!(table_id, "table occupied");

        Ok(table.clone())
    }

    pub fn release_table(&mut self, table_id: TableId) -> RestaurantResult<RestaurantTable> {
        let table = self.table_mut(table_id)?;
        table.release()?;
        info!(table_id, "table released");

        Ok(table.clone())
    }

    fn is_booked(&self, table_id: TableId, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.bookings
            .iter()
            .any(|b| b.table_id() == table_id && b.is_active() && b.overlaps(start, end))
    }

    /// Tables with at least `min_seats` seats and no active booking overlapping `[start, end)`.
    pub fn find_available_tables(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        min_seats: i32,
    ) -> RestaurantResult<Vec<RestaurantTable>> {
        check_interval(start, end)?;

        let available: Vec<RestaurantTable> = self
            .tables
            .iter()
            .filter(|t| t.seats() >= min_seats && !self.is_booked(t.id(), start, end))
            .cloned()
            .collect();
        debug!(%start, %end, min_seats, found = available.len(), "availability checked");

        Ok(available)
    }

    pub fn create_booking(
        &mut self,
        table_id: TableId,
        guest_name: &str,
        guest_phone: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> RestaurantResult<Booking> {
        let table = self.table(table_id)?;
        let booking = Booking::new(self.next_booking_id, table, guest_name, guest_phone, start, end)?;

        if start < self.now() {
            return Err(RestaurantError::validation("Start time cannot be in the past"));
        }

        if self.is_booked(table_id, start, end) {
            return Err(RestaurantError::conflict(format!(
                "Table '{}' is already booked between {start} and {end}",
                table.name()
            )));
        }

        self.next_booking_id += 1;
        self.bookings.push(booking.clone());
        info!(
            booking_id = booking.id(),
            table_id,
            guest = booking.guest_name(),
            start = %booking.start(),
            "booking created"
        );

        Ok(booking)
    }

    /// Marks the booking cancelled; it stays in the history.
    pub fn cancel_booking(&mut self, booking_id: BookingId) -> RestaurantResult<Booking> {
        let booking = self
            .bookings
            .iter_mut()
            .find(|b| b.id() == booking_id)
            .ok_or_else(|| RestaurantError::booking_not_found(booking_id))?;

        booking.cancel()?;
        info!(booking_id, table = booking.table_name(), status = ?booking.status(), "booking cancelled");

        Ok(booking.clone())
    }

    pub fn status(&self) -> RestaurantStatus {
        let occupied_tables = self.tables.iter().filter(|t| t.is_occupied()).count();

        RestaurantStatus {
            total_tables: self.tables.len(),
            occupied_tables,
            free_tables: self.tables.len() - occupied_tables,
            active_bookings: self.bookings.iter().filter(|b| b.is_active()).count(),
        }
    }

    /// The next full hour after one hour from now, one hour long.
    ///
    /// Truncation happens on UTC hours. In zones with a non-whole-hour offset
    /// (e.g. UTC+05:30) the window therefore does not start on a local hour.
    pub fn default_booking_window(&self) -> BookingWindow {
        let from = self.now() + Duration::hours(1);
        let start = from.duration_trunc(Duration::hours(1)).unwrap_or(from);

        BookingWindow { start, end: start + Duration::hours(1) }
    }
}
