use actix::Actor;
use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use dotenv::dotenv;
use tracing::{info, Level};

use services::restaurant::Restaurant;
use services::sample_data;
use services::state::{AppState, RestaurantActor};
use settings::Settings;

mod services;
mod settings;
mod types;

fn init_logging(level: &str) {
    tracing_subscriber::fmt()
        .with_max_level(level.parse().unwrap_or(Level::INFO))
        .with_target(false)
        .init();
}

fn init_restaurant(settings: &Settings) -> RestaurantActor {
    let mut restaurant = Restaurant::new();
    if settings.restaurant.seed_sample_data {
        sample_data::populate(&mut restaurant);
    }

    RestaurantActor(restaurant)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    let settings = Settings::load()?;
    init_logging(&settings.log.level);

    let restaurant = init_restaurant(&settings).start();
    let address = settings.bind_address();
    info!(host = %address.0, port = address.1, "starting restaurant service");

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .app_data(Data::new(AppState { restaurant: restaurant.clone() }))
            .configure(services::configure)
    })
        .bind(address)?
        .run()
        .await
}
