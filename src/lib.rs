use std::sync::Arc;

use config::Config;

use crate::cache::SessionRegistry;
use crate::google::{AuthorizationFlow, CalendarApi, GoogleCalendar, GoogleOAuth, ProviderError};

pub mod cache;
pub mod config;
pub mod error;
pub mod google;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod utils;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub registry: Arc<SessionRegistry>,
    pub oauth: Arc<dyn AuthorizationFlow>,
    pub calendar: Arc<dyn CalendarApi>,
}

impl AppState {
    /// 使用 Google 适配器创建应用状态
    pub fn new(config: Config) -> Result<Self, ProviderError> {
        let http = google::http_client(config.http_timeout())?;
        let oauth = GoogleOAuth::new(&config, http.clone());
        let calendar = GoogleCalendar::new(config.calendar_api_base.clone(), http);
        Ok(Self::with_adapters(config, Arc::new(oauth), Arc::new(calendar)))
    }

    pub fn with_adapters(
        config: Config,
        oauth: Arc<dyn AuthorizationFlow>,
        calendar: Arc<dyn CalendarApi>,
    ) -> Self {
        Self {
            config,
            registry: Arc::new(SessionRegistry::new()),
            oauth,
            calendar,
        }
    }
}
