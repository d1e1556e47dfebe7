/// 会话认证状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthStatus {
    /// 指定的会话已持有凭证
    Session(String),
    /// 未指定或未命中会话，但注册表中存在凭证
    AvailableUsers(Vec<String>),
    Unauthenticated,
}
