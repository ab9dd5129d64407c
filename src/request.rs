use crate::error::Error;

/// htmlなどのソースをページ単位でリクエストするためのトレイト
#[async_trait::async_trait]
pub trait PageRequest {
    /// `cursor`が`None`の場合は最初のページをリクエストする．
    async fn request(&self, username: &str, cursor: Option<&str>) -> Result<String, Error>;
}
