use actix_web::{error, get, web, HttpRequest, HttpResponse, Responder};

use crate::types::RestaurantError;

pub mod handling;
pub mod insertable;
pub mod messages;
pub mod models;
pub mod restaurant;
pub mod sample_data;
pub mod state;

#[get("/")]
pub async fn home_page() -> impl Responder {
    HttpResponse::Ok().body("Restaurant table booking service")
}

#[get("/status")]
pub async fn restaurant_status(state: web::Data<state::AppState>) -> impl Responder {
    match state.restaurant.send(messages::FetchStatus).await {
        Ok(resp) => HttpResponse::Ok().json(resp),
        Err(err) => HttpResponse::InternalServerError().json(format!("Unable to fetch status: {err}")),
    }
}

// malformed bodies, queries and ids get the same JSON envelope as core validation errors
fn json_error(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    RestaurantError::validation(err.to_string()).into()
}

fn query_error(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    RestaurantError::validation(err.to_string()).into()
}

fn path_error(err: error::PathError, _req: &HttpRequest) -> actix_web::Error {
    RestaurantError::validation(err.to_string()).into()
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::QueryConfig::default().error_handler(query_error))
        .app_data(web::PathConfig::default().error_handler(path_error))
        .service(home_page)
        .service(restaurant_status)
        .service(
            web::scope("/tables")
                .service(tables_route::fetch_tables)
                .service(tables_route::add_table)
                .service(tables_route::find_available_tables)
                .service(tables_route::get_table)
                .service(tables_route::update_table)
                .service(tables_route::remove_table)
                .service(tables_route::occupy_table)
                .service(tables_route::release_table),
        )
        .service(
            web::scope("/bookings")
                .service(bookings_route::fetch_bookings)
                .service(bookings_route::create_booking)
                .service(bookings_route::default_window)
                .service(bookings_route::get_booking)
                .service(bookings_route::cancel_booking),
        )
        .service(
            web::scope("/test")
                .service(test_route::healthcheck)
                .service(test_route::load_sample_data),
        );
}

// sub-route "/tables"
pub mod tables_route {
    use actix_web::web::{Data, Json, Path, Query};
    use actix_web::{delete, get, patch, post, HttpResponse, Responder, ResponseError};

    use crate::services::insertable::{AvailabilityQuery, NewTable, TableEdit};
    use crate::services::messages::{
        AddTable, FetchTable, FetchTables, FindAvailableTables, OccupyTable, ReleaseTable, RemoveTable, UpdateTable,
    };
    use crate::services::state::AppState;

    #[get("")]
    pub async fn fetch_tables(state: Data<AppState>) -> impl Responder {
        match state.restaurant.send(FetchTables).await {
            Ok(resp) => HttpResponse::Ok().json(resp),
            Err(err) => HttpResponse::InternalServerError().json(format!("Unable to retrieve tables: {err}")),
        }
    }

    #[post("")]
    pub async fn add_table(state: Data<AppState>, body: Json<NewTable>) -> impl Responder {
        let body = body.into_inner();

        match state.restaurant.send(AddTable { name: body.name, seats: body.seats }).await {
            Ok(Ok(resp)) => HttpResponse::Created().json(resp),
            Ok(Err(err)) => err.error_response(),
            Err(err) => HttpResponse::InternalServerError().json(format!("Unable to insert new table: {err}")),
        }
    }

    #[get("/available")]
    pub async fn find_available_tables(state: Data<AppState>, query: Query<AvailabilityQuery>) -> impl Responder {
        let query = query.into_inner();

        match state
            .restaurant
            .send(FindAvailableTables { start: query.start, end: query.end, min_seats: query.min_seats })
            .await
        {
            Ok(Ok(resp)) => HttpResponse::Ok().json(resp),
            Ok(Err(err)) => err.error_response(),
            Err(err) => HttpResponse::InternalServerError().json(format!("Unable to search tables: {err}")),
        }
    }

    #[get("/{table_id}")]
    pub async fn get_table(state: Data<AppState>, path: Path<i64>) -> impl Responder {
        match state.restaurant.send(FetchTable(path.into_inner())).await {
            Ok(Ok(resp)) => HttpResponse::Ok().json(resp),
            Ok(Err(err)) => err.error_response(),
            Err(err) => HttpResponse::InternalServerError().json(format!("Unable to fetch table: {err}")),
        }
    }

    #[patch("/{table_id}")]
    pub async fn update_table(state: Data<AppState>, path: Path<i64>, body: Json<TableEdit>) -> impl Responder {
        let msg = UpdateTable { table_id: path.into_inner(), changes: body.into_inner().into() };

        match state.restaurant.send(msg).await {
            Ok(Ok(resp)) => HttpResponse::Ok().json(resp),
            Ok(Err(err)) => err.error_response(),
            Err(err) => HttpResponse::InternalServerError().json(format!("Unable to update table: {err}")),
        }
    }

    #[delete("/{table_id}")]
    pub async fn remove_table(state: Data<AppState>, path: Path<i64>) -> impl Responder {
        match state.restaurant.send(RemoveTable(path.into_inner())).await {
            Ok(Ok(resp)) => HttpResponse::Ok().json(resp),
            Ok(Err(err)) => err.error_response(),
            Err(err) => HttpResponse::InternalServerError().json(format!("Unable to remove table: {err}")),
        }
    }

    #[post("/{table_id}/occupy")]
    pub async fn occupy_table(state: Data<AppState>, path: Path<i64>) -> impl Responder {
        match state.restaurant.send(OccupyTable(path.into_inner())).await {
            Ok(Ok(resp)) => HttpResponse::Ok().json(resp),
            Ok(Err(err)) => err.error_response(),
            Err(err) => HttpResponse::InternalServerError().json(format!("Unable to perform action: {err}")),
        }
    }

    #[post("/{table_id}/release")]
    pub async fn release_table(state: Data<AppState>, path: Path<i64>) -> impl Responder {
        match state.restaurant.send(ReleaseTable(path.into_inner())).await {
            Ok(Ok(resp)) => HttpResponse::Ok().json(resp),
            Ok(Err(err)) => err.error_response(),
            Err(err) => HttpResponse::InternalServerError().json(format!("Unable to perform action: {err}")),
        }
    }
}

// sub-route "/bookings"
pub mod bookings_route {
    use actix_web::web::{Data, Json, Path, Query};
    use actix_web::{get, post, HttpResponse, Responder, ResponseError};

    use crate::services::insertable::{BookingsQuery, NewBooking};
    use crate::services::messages::{CancelBooking, CreateBooking, FetchBooking, FetchBookings, FetchDefaultWindow};
    use crate::services::state::AppState;

    #[get("")]
    pub async fn fetch_bookings(state: Data<AppState>, query: Query<BookingsQuery>) -> impl Responder {
        match state.restaurant.send(FetchBookings { active_only: query.active_only }).await {
            Ok(resp) => HttpResponse::Ok().json(resp),
            Err(err) => HttpResponse::InternalServerError().json(format!("Unable to retrieve bookings: {err}")),
        }
    }

    #[post("")]
    pub async fn create_booking(state: Data<AppState>, body: Json<NewBooking>) -> impl Responder {
        let body = body.into_inner();

        match state
            .restaurant
            .send(CreateBooking {
                table_id: body.table_id,
                guest_name: body.guest_name,
                guest_phone: body.guest_phone,
                start: body.start,
                end: body.end,
            })
            .await
        {
            Ok(Ok(resp)) => HttpResponse::Created().json(resp),
            Ok(Err(err)) => err.error_response(),
            Err(err) => HttpResponse::InternalServerError().json(format!("Unable to create booking: {err}")),
        }
    }

    #[get("/default-window")]
    pub async fn default_window(state: Data<AppState>) -> impl Responder {
        match state.restaurant.send(FetchDefaultWindow).await {
            Ok(resp) => HttpResponse::Ok().json(resp),
            Err(err) => HttpResponse::InternalServerError().json(format!("Unable to perform action: {err}")),
        }
    }

    #[get("/{booking_id}")]
    pub async fn get_booking(state: Data<AppState>, path: Path<i64>) -> impl Responder {
        match state.restaurant.send(FetchBooking(path.into_inner())).await {
            Ok(Ok(resp)) => HttpResponse::Ok().json(resp),
            Ok(Err(err)) => err.error_response(),
            Err(err) => HttpResponse::InternalServerError().json(format!("Unable to fetch booking: {err}")),
        }
    }

    #[post("/{booking_id}/cancel")]
    pub async fn cancel_booking(state: Data<AppState>, path: Path<i64>) -> impl Responder {
        let booking_id = path.into_inner();

        match state.restaurant.send(CancelBooking(booking_id)).await {
            Ok(Ok(resp)) => HttpResponse::Ok().json(resp),
            Ok(Err(err)) => err.error_response(),
            Err(err) => HttpResponse::InternalServerError().json(format!("Unable to cancel booking {booking_id}: {err}")),
        }
    }
}

// sub-route "/test"
pub mod test_route {
    use actix_web::web::Data;
    use actix_web::{get, post, HttpResponse, Responder};

    use crate::services::messages::LoadSampleData;
    use crate::services::state::AppState;

    #[get("/healthcheck")]
    pub async fn healthcheck() -> impl Responder {
        HttpResponse::Ok().body("I'm alive!")
    }

    #[post("/sample-data")]
    pub async fn load_sample_data(state: Data<AppState>) -> impl Responder {
        match state.restaurant.send(LoadSampleData).await {
            Ok(resp) => HttpResponse::Ok().json(resp),
            Err(err) => HttpResponse::InternalServerError().json(format!("Unable to load sample data: {err}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use actix::Actor;
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App};
    use serde_json::{json, Value};

    use super::configure;
    use crate::services::restaurant::tests::{at, FixedClock};
    use crate::services::restaurant::Restaurant;
    use crate::services::state::{AppState, RestaurantActor};

    fn app_state() -> web::Data<AppState> {
        let restaurant = Restaurant::with_clock(FixedClock(at(8, 0)));

        web::Data::new(AppState { restaurant: RestaurantActor(restaurant).start() })
    }

    fn booking_body(table_id: i64, start: &str, end: &str) -> Value {
        json!({
            "table_id": table_id,
            "guest_name": "Ryan Gosling",
            "guest_phone": "+79161234567",
            "start": start,
            "end": end,
        })
    }

    #[actix_web::test]
    async fn healthcheck_is_alive() {
        let app = test::init_service(App::new().app_data(app_state()).configure(configure)).await;

        let req = test::TestRequest::get().uri("/test/healthcheck").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn add_and_list_tables() {
        let app = test::init_service(App::new().app_data(app_state()).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/tables")
            .set_json(json!({ "name": "Window 1", "seats": 2 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let req = test::TestRequest::get().uri("/tables").to_request();
        let tables: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(tables[0]["id"], 1);
        assert_eq!(tables[0]["name"], "Window 1");
        assert_eq!(tables[0]["is_occupied"], false);
    }

    #[actix_web::test]
    async fn invalid_seats_is_bad_request() {
        let app = test::init_service(App::new().app_data(app_state()).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/tables")
            .set_json(json!({ "name": "Broken", "seats": 0 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "validation");
    }

    #[actix_web::test]
    async fn unknown_table_is_not_found() {
        let app = test::init_service(App::new().app_data(app_state()).configure(configure)).await;

        let req = test::TestRequest::get().uri("/tables/42").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::delete().uri("/tables/42").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn booking_conflicts_and_removal_flow() {
        let app = test::init_service(App::new().app_data(app_state()).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/tables")
            .set_json(json!({ "name": "T", "seats": 4 }))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::post()
            .uri("/bookings")
            .set_json(booking_body(1, "2030-05-17T10:00:00Z", "2030-05-17T11:00:00Z"))
            .to_request();
        let booking: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(booking["status"], "Active");
        assert_eq!(booking["table_name"], "T");

        let req = test::TestRequest::post()
            .uri("/bookings")
            .set_json(booking_body(1, "2030-05-17T10:30:00Z", "2030-05-17T11:30:00Z"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let req = test::TestRequest::delete().uri("/tables/1").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

        let req = test::TestRequest::post().uri("/bookings/1/cancel").to_request();
        let cancelled: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(cancelled["status"], "Cancelled");

        let req = test::TestRequest::post().uri("/bookings/1/cancel").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let req = test::TestRequest::delete().uri("/tables/1").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri("/bookings").to_request();
        let active: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(active.as_array().map(Vec::len), Some(0));

        let req = test::TestRequest::get().uri("/bookings?active_only=false").to_request();
        let history: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(history.as_array().map(Vec::len), Some(1));
    }

    #[actix_web::test]
    async fn reversed_interval_is_bad_request() {
        let app = test::init_service(App::new().app_data(app_state()).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/tables")
            .set_json(json!({ "name": "T", "seats": 4 }))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::post()
            .uri("/bookings")
            .set_json(booking_body(1, "2030-05-17T11:00:00Z", "2030-05-17T10:00:00Z"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn available_tables_filters_by_seats_and_bookings() {
        let app = test::init_service(App::new().app_data(app_state()).configure(configure)).await;

        let req = test::TestRequest::post().uri("/test/sample-data").to_request();
        let status: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(status["total_tables"], 8);
        assert_eq!(status["active_bookings"], 2);

        // Center 1 (id 3) is booked 09:00-10:00 by the sample data
        let req = test::TestRequest::get()
            .uri("/tables/available?start=2030-05-17T09:30:00Z&end=2030-05-17T10:30:00Z&min_seats=4")
            .to_request();
        let tables: Value = test::call_and_read_body_json(&app, req).await;
        let ids: Vec<i64> = tables
            .as_array()
            .map(|list| list.iter().filter_map(|t| t["id"].as_i64()).collect())
            .unwrap_or_default();

        assert_eq!(ids, [4, 5, 6]);
    }

    #[actix_web::test]
    async fn occupy_release_and_status() {
        let app = test::init_service(App::new().app_data(app_state()).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/tables")
            .set_json(json!({ "name": "T", "seats": 4 }))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::post().uri("/tables/1/release").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let req = test::TestRequest::post().uri("/tables/1/occupy").to_request();
        let table: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(table["is_occupied"], true);

        let req = test::TestRequest::get().uri("/status").to_request();
        let status: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(status["occupied_tables"], 1);
        assert_eq!(status["free_tables"], 0);
    }

    #[actix_web::test]
    async fn malformed_requests_use_the_error_envelope() {
        let app = test::init_service(App::new().app_data(app_state()).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/bookings")
            .set_json(json!({ "table_id": 1 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "validation");

        let req = test::TestRequest::post()
            .uri("/bookings")
            .set_json(booking_body(1, "tomorrow at ten", "2030-05-17T11:00:00Z"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "validation");

        let req = test::TestRequest::get().uri("/tables/available?min_seats=abc").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "validation");

        let req = test::TestRequest::get().uri("/bookings/first").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "validation");
    }

    #[actix_web::test]
    async fn available_tables_default_to_next_window_and_one_seat() {
        let app = test::init_service(App::new().app_data(app_state()).configure(configure)).await;

        let req = test::TestRequest::post().uri("/test/sample-data").to_request();
        test::call_service(&app, req).await;

        // default window is 09:00-10:00, when Center 1 (id 3) is booked
        let req = test::TestRequest::get().uri("/tables/available").to_request();
        let tables: Value = test::call_and_read_body_json(&app, req).await;
        let ids: Vec<i64> = tables
            .as_array()
            .map(|list| list.iter().filter_map(|t| t["id"].as_i64()).collect())
            .unwrap_or_default();

        assert_eq!(ids, [1, 2, 4, 5, 6, 7, 8]);
    }

    #[actix_web::test]
    async fn unknown_booking_is_not_found() {
        let app = test::init_service(App::new().app_data(app_state()).configure(configure)).await;

        let req = test::TestRequest::get().uri("/bookings/999").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "not_found");
    }

    #[actix_web::test]
    async fn update_table_and_default_window() {
        let app = test::init_service(App::new().app_data(app_state()).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/tables")
            .set_json(json!({ "name": "T", "seats": 4 }))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::patch()
            .uri("/tables/1")
            .set_json(json!({ "seats": 6 }))
            .to_request();
        let table: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(table["name"], "T");
        assert_eq!(table["seats"], 6);

        let req = test::TestRequest::get().uri("/bookings/default-window").to_request();
        let window: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(window["start"], "2030-05-17T09:00:00Z");
        assert_eq!(window["end"], "2030-05-17T10:00:00Z");
    }
}
