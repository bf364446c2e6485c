use actix::Message;
use chrono::{DateTime, Utc};

use crate::services::models::{Booking, BookingWindow, RestaurantStatus, RestaurantTable};
use crate::services::restaurant::TableChanges;
use crate::types::{BookingId, RestaurantResult, TableId};

#[derive(Message)]
#[rtype(result = "Vec<RestaurantTable>")]
pub struct FetchTables;

#[derive(Message)]
#[rtype(result = "RestaurantResult<RestaurantTable>")]
pub struct FetchTable(pub TableId);

#[derive(Message)]
#[rtype(result = "RestaurantResult<RestaurantTable>")]
pub struct AddTable {
    pub name: String,
    pub seats: i32,
}

#[derive(Message)]
#[rtype(result = "RestaurantResult<RestaurantTable>")]
pub struct UpdateTable {
    pub table_id: TableId,
    pub changes: TableChanges,
}

#[derive(Message)]
#[rtype(result = "RestaurantResult<RestaurantTable>")]
pub struct RemoveTable(pub TableId);

#[derive(Message)]
#[rtype(result = "RestaurantResult<RestaurantTable>")]
pub struct OccupyTable(pub TableId);

#[derive(Message)]
#[rtype(result = "RestaurantResult<RestaurantTable>")]
pub struct ReleaseTable(pub TableId);

/// Missing bounds fall back to the default booking window
#[derive(Message)]
#[rtype(result = "RestaurantResult<Vec<RestaurantTable>>")]
pub struct FindAvailableTables {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub min_seats: i32,
}

#[derive(Message)]
#[rtype(result = "Vec<Booking>")]
pub struct FetchBookings {
    pub active_only: bool,
}

#[derive(Message)]
#[rtype(result = "RestaurantResult<Booking>")]
pub struct FetchBooking(pub BookingId);

#[derive(Message)]
#[rtype(result = "RestaurantResult<Booking>")]
pub struct CreateBooking {
    pub table_id: TableId,
    pub guest_name: String,
    pub guest_phone: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

#[derive(Message)]
#[rtype(result = "RestaurantResult<Booking>")]
pub struct CancelBooking(pub BookingId);

#[derive(Message)]
#[rtype(result = "RestaurantStatus")]
pub struct FetchStatus;

#[derive(Message)]
#[rtype(result = "BookingWindow")]
pub struct FetchDefaultWindow;

#[derive(Message)]
#[rtype(result = "RestaurantStatus")]
pub struct LoadSampleData;
