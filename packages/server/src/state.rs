use crate::config::AppConfig;
use crate::service::TopService;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub tops: TopService,
}
