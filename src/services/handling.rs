use actix::{Handler, MessageResult};

use crate::services::messages::{
    AddTable, CancelBooking, CreateBooking, FetchBooking, FetchBookings, FetchDefaultWindow, FetchStatus, FetchTable,
    FetchTables, FindAvailableTables, LoadSampleData, OccupyTable, ReleaseTable, RemoveTable, UpdateTable,
};
use crate::services::models::{Booking, RestaurantTable};
use crate::services::sample_data;
use crate::services::state::RestaurantActor;
use crate::types::RestaurantResult;

impl Handler<FetchTables> for RestaurantActor {
    type Result = Vec<RestaurantTable>;

    fn handle(&mut self, _msg: FetchTables, _ctx: &mut Self::Context) -> Self::Result {
        self.0.list_tables().to_vec()
    }
}

impl Handler<FetchTable> for RestaurantActor {
    type Result = RestaurantResult<RestaurantTable>;

    fn handle(&mut self, msg: FetchTable, _ctx: &mut Self::Context) -> Self::Result {
        self.0.table(msg.0).cloned()
    }
}

impl Handler<AddTable> for RestaurantActor {
    type Result = RestaurantResult<RestaurantTable>;

    fn handle(&mut self, msg: AddTable, _ctx: &mut Self::Context) -> Self::Result {
        self.0.add_table(&msg.name, msg.seats)
    }
}

impl Handler<UpdateTable> for RestaurantActor {
    type Result = RestaurantResult<RestaurantTable>;

    fn handle(&mut self, msg: UpdateTable, _ctx: &mut Self::Context) -> Self::Result {
        self.0.update_table(msg.table_id, msg.changes)
    }
}

impl Handler<RemoveTable> for RestaurantActor {
    type Result = RestaurantResult<RestaurantTable>;

    fn handle(&mut self, msg: RemoveTable, _ctx: &mut Self::Context) -> Self::Result {
        self.0.remove_table(msg.0)
    }
}

impl Handler<OccupyTable> for RestaurantActor {
    type Result = RestaurantResult<RestaurantTable>;

    fn handle(&mut self, msg: OccupyTable, _ctx: &mut Self::Context) -> Self::Result {
        self.0.occupy_table(msg.0)
    }
}

impl Handler<ReleaseTable> for RestaurantActor {
    type Result = RestaurantResult<RestaurantTable>;

    fn handle(&mut self, msg: ReleaseTable, _ctx: &mut Self::Context) -> Self::Result {
        self.0.release_table(msg.0)
    }
}

impl Handler<FindAvailableTables> for RestaurantActor {
    type Result = RestaurantResult<Vec<RestaurantTable>>;

    fn handle(&mut self, msg: FindAvailableTables, _ctx: &mut Self::Context) -> Self::Result {
        let window = self.0.default_booking_window();

        self.0.find_available_tables(
            msg.start.unwrap_or(window.start),
            msg.end.unwrap_or(window.end),
            msg.min_seats,
        )
    }
}

impl Handler<FetchBookings> for RestaurantActor {
    type Result = Vec<Booking>;

    fn handle(&mut self, msg: FetchBookings, _ctx: &mut Self::Context) -> Self::Result {
        self.0.list_bookings(msg.active_only).into_iter().cloned().collect()
    }
}

impl Handler<FetchBooking> for RestaurantActor {
    type Result = RestaurantResult<Booking>;

    fn handle(&mut self, msg: FetchBooking, _ctx: &mut Self::Context) -> Self::Result {
        self.0.booking(msg.0).cloned()
    }
}

impl Handler<CreateBooking> for RestaurantActor {
    type Result = RestaurantResult<Booking>;

    fn handle(&mut self, msg: CreateBooking, _ctx: &mut Self::Context) -> Self::Result {
        self.0
            .create_booking(msg.table_id, &msg.guest_name, &msg.guest_phone, msg.start, msg.end)
    }
}

impl Handler<CancelBooking> for RestaurantActor {
    type Result = RestaurantResult<Booking>;

    fn handle(&mut self, msg: CancelBooking, _ctx: &mut Self::Context) -> Self::Result {
        self.0.cancel_booking(msg.0)
    }
}

impl Handler<FetchStatus> for RestaurantActor {
    type Result = MessageResult<FetchStatus>;

    fn handle(&mut self, _msg: FetchStatus, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(self.0.status())
    }
}

impl Handler<FetchDefaultWindow> for RestaurantActor {
    type Result = MessageResult<FetchDefaultWindow>;

    fn handle(&mut self, _msg: FetchDefaultWindow, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(self.0.default_booking_window())
    }
}

impl Handler<LoadSampleData> for RestaurantActor {
    type Result = MessageResult<LoadSampleData>;

    fn handle(&mut self, _msg: LoadSampleData, _ctx: &mut Self::Context) -> Self::Result {
        sample_data::populate(&mut self.0);

        MessageResult(self.0.status())
    }
}
