use crate::error::Error;
use crate::{FeedSource, PostRecord, PostStream};

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 一回分の収集の指定
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CollectRequest {
    pub username: String,
    pub limit: usize,
}

impl CollectRequest {
    pub fn new<S: Into<String>>(username: S, limit: usize) -> Self {
        Self {
            username: username.into(),
            limit,
        }
    }
}

/// 出力ファイル名．ユーザー名はそのまま使う．
pub fn output_file_name(username: &str) -> String {
    format!("{}_tweets.json", username)
}

/// FeedSourceからポストを取得してjsonに保存する．
pub struct Collector<S: FeedSource> {
    source: S,
    dir_path: PathBuf,
}

impl<S: FeedSource> Collector<S> {
    pub fn new<'a, P: Into<Cow<'a, Path>>>(source: S, dir_path: P) -> Self {
        let dir_path: Cow<'a, Path> = dir_path.into();

        Self {
            source,
            dir_path: dir_path.into_owned(),
        }
    }

    pub fn output_path(&self, username: &str) -> PathBuf {
        self.dir_path.join(output_file_name(username))
    }

    /// 先頭から最大`limit`個のポストを取得する．`limit`個を超えて取り出すことはない．
    pub async fn collect(&self, username: &str, limit: usize) -> Result<Vec<PostRecord>, Error> {
        info!("Collecting up to {} posts for {}.", limit, username);
        let mut stream = self.source.open(username).await?;
        let mut records = Vec::with_capacity(limit.min(1024));

        while records.len() < limit {
            match stream.next_post().await? {
                Some(post) => {
                    debug!("post {:?} at {}", post.id, post.timestamp);
                    records.push(PostRecord::from(post));
                }
                None => break,
            }
        }

        Ok(records)
    }

    /// 収集してから`<username>_tweets.json`に上書き保存し，書き込んだ件数を返す．
    ///
    /// 収集の途中で失敗した場合はファイルを書かない．
    pub async fn collect_and_save(&self, username: &str, limit: usize) -> Result<usize, Error> {
        let records = self.collect(username, limit).await?;
        let json_string = serde_json::to_string_pretty(&records)?;

        let file_path = self.output_path(username);

        info!("Creating and saving into: {:?}", file_path);
        let mut file = File::create(&file_path)?;
        file.write_all(json_string.as_bytes())?;

        info!("Saved {} posts to {:?}", records.len(), file_path);
        Ok(records.len())
    }

    /// 順番に収集する．最初の失敗で残りは実行しない．
    ///
    /// `on_saved`は保存が終わるたびに，その要求と書き込んだ件数で呼ばれる．
    pub async fn run<F>(
        &self,
        requests: &[CollectRequest],
        mut on_saved: F,
    ) -> Result<Vec<(PathBuf, usize)>, Error>
    where
        F: FnMut(&CollectRequest, usize),
    {
        let mut written = Vec::with_capacity(requests.len());

        for request in requests.iter() {
            let count = self
                .collect_and_save(&request.username, request.limit)
                .await?;
            on_saved(request, count);
            written.push((self.output_path(&request.username), count));
        }

        Ok(written)
    }
}
