use actix::{Actor, Addr, Context};

use crate::services::restaurant::Restaurant;

/// Single owner of the restaurant; every route goes through its mailbox.
pub struct RestaurantActor(pub Restaurant);

pub struct AppState {
    pub restaurant: Addr<RestaurantActor>,
}

impl Actor for RestaurantActor {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        tracing::debug!(tables = self.0.list_tables().len(), "restaurant actor started");
    }
}
