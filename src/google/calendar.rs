use std::borrow::Cow;

use chrono::{SecondsFormat, Utc};
use futures_util::future::BoxFuture;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::cache::StoredCredential;

use super::error::ProviderError;
use super::oauth::refresh_credential;

/// Google 对主日历的别名
const PRIMARY_CALENDAR_ID: &str = "primary";

/// 每次返回的事件数量
pub const UPCOMING_EVENT_LIMIT: usize = 5;

/// 日历查询适配器
pub trait CalendarApi: Send + Sync {
    /// 按开始时间排序，返回最近的几个事件，保持接口原始的 JSON 结构
    fn upcoming_events<'a>(
        &'a self,
        credential: &'a StoredCredential,
    ) -> BoxFuture<'a, Result<Vec<Value>, ProviderError>>;
}

#[derive(Debug, Clone)]
pub struct GoogleCalendar {
    http: reqwest::Client,
    api_base: String,
}

#[derive(Debug, Deserialize)]
struct EventListResponse {
    #[serde(default)]
    items: Vec<Value>,
}

impl GoogleCalendar {
    pub fn new(api_base: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            http,
            api_base: api_base.into().trim_end_matches('/').to_string(),
        }
    }

    async fn list_upcoming(
        &self,
        credential: &StoredCredential,
    ) -> Result<Vec<Value>, ProviderError> {
        // 过期且可刷新时先续期；续期结果不写回注册表
        let mut credential = Cow::Borrowed(credential);
        let mut refreshed = false;
        if credential.is_expired() && credential.can_refresh() {
            debug!("Access token expired, refreshing before listing events");
            credential = Cow::Owned(refresh_credential(&self.http, &credential).await?);
            refreshed = true;
        }

        let mut response = self.request_events(&credential.token).await?;

        // 令牌在到期前失效时续期后重试一次
        if response.status() == reqwest::StatusCode::UNAUTHORIZED
            && !refreshed
            && credential.can_refresh()
        {
            debug!("Access token rejected, refreshing and retrying once");
            let renewed = refresh_credential(&self.http, &credential).await?;
            response = self.request_events(&renewed.token).await?;
        }

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(ProviderError::Unauthorized(format!(
                "calendar API returned {}",
                status
            )));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let mut list: EventListResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::InvalidResponse(format!("invalid event list: {}", e)))?;
        list.items.truncate(UPCOMING_EVENT_LIMIT);

        info!("Fetched {} upcoming events", list.items.len());
        Ok(list.items)
    }

    async fn request_events(&self, access_token: &str) -> Result<reqwest::Response, ProviderError> {
        let url = format!("{}/calendars/{}/events", self.api_base, PRIMARY_CALENDAR_ID);
        let time_min = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);

        Ok(self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .query(&[
                ("maxResults", UPCOMING_EVENT_LIMIT.to_string()),
                ("singleEvents", "true".to_string()),
                ("orderBy", "startTime".to_string()),
                ("timeMin", time_min),
            ])
            .send()
            .await?)
    }
}

impl CalendarApi for GoogleCalendar {
    fn upcoming_events<'a>(
        &'a self,
        credential: &'a StoredCredential,
    ) -> BoxFuture<'a, Result<Vec<Value>, ProviderError>> {
        Box::pin(self.list_upcoming(credential))
    }
}
