use crate::error::Error;
use crate::PageRequest;

use reqwest::{Client, StatusCode};
use tracing::info;

pub const DEFAULT_NITTER_URL: &str = "https://nitter.net";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Nitterのインスタンスに対するリクエスト
#[derive(Debug, Clone)]
pub struct NitterRequest {
    client: Client,
    base_url: String,
}

impl NitterRequest {
    pub fn new<S: Into<String>>(base_url: S) -> Result<Self, Error> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        let base_url: String = base_url.into();

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// カーソルはページ中のhrefから取ったものなのでエンコード済み
    fn page_url(&self, username: &str, cursor: Option<&str>) -> String {
        match cursor {
            Some(cursor) => format!("{}/{}?cursor={}", self.base_url, username, cursor),
            None => format!("{}/{}", self.base_url, username),
        }
    }
}

#[async_trait::async_trait]
impl PageRequest for NitterRequest {
    async fn request(&self, username: &str, cursor: Option<&str>) -> Result<String, Error> {
        let url = self.page_url(username, cursor);

        info!("Attempting request to {}.", url);
        let res = self.client.get(&url).send().await?;

        match res.status() {
            StatusCode::NOT_FOUND => {
                return Err(Error::NotFound {
                    username: username.to_string(),
                })
            }
            status if !status.is_success() => {
                return Err(Error::RequestError(format!(
                    "{} responded with {}",
                    url, status
                )))
            }
            _ => {}
        }

        let text = res.text().await?;

        info!("Finished request to {}.", url);
        Ok(text)
    }
}
