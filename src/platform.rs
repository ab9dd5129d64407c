use crate::error::Error;
use crate::parser::PageParser;
use crate::request::PageRequest;
use crate::{FeedSource, Post, PostStream};

use std::collections::VecDeque;
use std::marker::PhantomData;
use tracing::{debug, info};

/// プラットフォームやバージョン管理用のトレイト
pub trait PlatForm: Send + Sync + 'static {
    type Parser: PageParser;
    type Requester: PageRequest + Clone + Send + Sync;
}

/// ページ送りを行うプラットフォームをFeedSourceとして扱う．
pub struct PlatformFeed<P: PlatForm> {
    requester: P::Requester,
    _platform: PhantomData<P>,
}

impl<P: PlatForm> PlatformFeed<P> {
    pub fn new(requester: P::Requester) -> Self {
        Self {
            requester,
            _platform: PhantomData,
        }
    }
}

#[async_trait::async_trait]
impl<P: PlatForm> FeedSource for PlatformFeed<P> {
    type Stream = PlatformStream<P>;

    async fn open(&self, username: &str) -> Result<Self::Stream, Error> {
        Ok(PlatformStream {
            requester: self.requester.clone(),
            username: username.to_string(),
            buffer: VecDeque::new(),
            next_cursor: None,
            exhausted: false,
            _platform: PhantomData,
        })
    }
}

/// バッファが空になったときだけ次のページをリクエストする列．
pub struct PlatformStream<P: PlatForm> {
    requester: P::Requester,
    username: String,
    buffer: VecDeque<Post>,
    next_cursor: Option<String>,
    exhausted: bool,
    _platform: PhantomData<P>,
}

#[async_trait::async_trait]
impl<P: PlatForm> PostStream for PlatformStream<P> {
    async fn next_post(&mut self) -> Result<Option<Post>, Error> {
        if let Some(post) = self.buffer.pop_front() {
            return Ok(Some(post));
        }
        if self.exhausted {
            return Ok(None);
        }

        let source = self
            .requester
            .request(&self.username, self.next_cursor.as_deref())
            .await?;
        let page = P::Parser::parse(source)?;

        debug!(
            "page for {}: {} posts, next cursor: {:?}",
            self.username,
            page.posts.len(),
            page.next_cursor
        );

        // 空のページや同じカーソルの繰り返しは終端とみなす
        let repeated_cursor = page.next_cursor.is_some() && page.next_cursor == self.next_cursor;
        if page.posts.is_empty() || page.next_cursor.is_none() || repeated_cursor {
            info!("Reached the end of the feed for {}.", self.username);
            self.exhausted = true;
        }
        self.next_cursor = page.next_cursor;
        self.buffer.extend(page.posts);

        Ok(self.buffer.pop_front())
    }
}
