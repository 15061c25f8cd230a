pub mod config;
pub mod db;
pub mod dtos;
pub mod error;
pub mod handler;
pub mod mail;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;
pub mod utils;

use std::sync::Arc;

use config::Config;
use db::DBClient;
use service::{
    notification_service::NotificationService, rental_service::RentalService,
    trust_service::TrustService,
};

#[derive(Debug, Clone)]
pub struct AppState {
    pub env: Config,
    pub db_client: Arc<DBClient>,
    pub rental_service: Arc<RentalService>,
    pub trust_service: Arc<TrustService>,
    pub notification_service: Arc<NotificationService>,
}

impl AppState {
    pub fn new(db_client: DBClient, env: Config) -> Self {
        let db_client = Arc::new(db_client);

        AppState {
            rental_service: Arc::new(RentalService::new(db_client.clone())),
            trust_service: Arc::new(TrustService::new(db_client.clone())),
            notification_service: Arc::new(NotificationService::new(&env)),
            db_client,
            env,
        }
    }
}
