//! Google 授权与日历接口适配

mod calendar;
mod error;
mod oauth;
mod secrets;

pub use calendar::{CalendarApi, GoogleCalendar, UPCOMING_EVENT_LIMIT};
pub use error::ProviderError;
pub use oauth::{AuthorizationFlow, GoogleOAuth, refresh_credential};
pub use secrets::ClientSecrets;

use std::time::Duration;

/// 两个适配器共用的 HTTP 客户端
pub fn http_client(timeout: Duration) -> Result<reqwest::Client, ProviderError> {
    Ok(reqwest::Client::builder().timeout(timeout).build()?)
}
