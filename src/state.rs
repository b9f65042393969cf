use std::sync::Arc;

use crate::auth::JwtManager;
use crate::metrics::HttpMetrics;
use crate::service::{CarService, EngineService};

#[derive(Clone)]
pub struct AppState {
    pub cars: CarService,
    pub engines: EngineService,
    pub jwt: JwtManager,
    pub metrics: Arc<HttpMetrics>,
}

impl AppState {
    pub fn new(
        cars: CarService,
        engines: EngineService,
        jwt: JwtManager,
        metrics: Arc<HttpMetrics>,
    ) -> Self {
        Self {
            cars,
            engines,
            jwt,
            metrics,
        }
    }
}
