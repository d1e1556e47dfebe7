use reqwest::Url;
use uuid::Uuid;

/// 生成 OAuth 回调使用的一次性 state
pub fn new_state_token() -> String {
    Uuid::new_v4().to_string()
}

/// 授权完成后跳转回前端，带上 `user_id`
pub fn ui_redirect_url(ui_url: &str, user_id: &str) -> Result<String, String> {
    let mut url = Url::parse(ui_url).map_err(|e| format!("invalid UI url {}: {}", ui_url, e))?;
    url.query_pairs_mut().append_pair("user_id", user_id);
    Ok(url.into())
}
