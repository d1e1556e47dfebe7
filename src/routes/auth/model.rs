use serde::Deserialize;

/// 授权回调携带的参数
#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub state: Option<String>,
    pub code: Option<String>,
    /// 用户拒绝授权时 Google 返回 `error=access_denied`
    pub error: Option<String>,
}
