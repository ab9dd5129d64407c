pub mod collector;
pub mod error;
pub mod feed;
mod parser;
mod platform;
pub mod platforms;
mod request;

pub use collector::{output_file_name, CollectRequest, Collector};
pub use feed::{FeedSource, PostStream};
pub use parser::{Page, PageParser};
pub use platform::{PlatForm, PlatformFeed, PlatformStream};
pub use request::PageRequest;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// プラットフォームが付与するポストのID．整数か文字列．
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PostId {
    Int(u64),
    Str(String),
}

impl From<u64> for PostId {
    fn from(value: u64) -> Self {
        Self::Int(value)
    }
}

impl From<String> for PostId {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

/// フィードから取得したポスト
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub timestamp: DateTime<FixedOffset>,
    pub content: String,
    pub url: String,
}

pub type Posts = Vec<Post>;

/// jsonに書き出す一要素．フィールドの順番がそのまま出力の順番になる．
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    pub date: String,
    pub id: PostId,
    pub content: String,
    pub url: String,
}

impl From<Post> for PostRecord {
    fn from(value: Post) -> Self {
        let Post {
            id,
            timestamp,
            content,
            url,
        } = value;

        Self {
            date: timestamp.to_rfc3339(),
            id,
            content,
            url,
        }
    }
}
