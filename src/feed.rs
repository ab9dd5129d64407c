use crate::error::Error;
use crate::Post;

/// ユーザー名からポストの列を開くためのトレイト．
#[async_trait::async_trait]
pub trait FeedSource {
    type Stream: PostStream + Send;

    /// ポストの列を開く．ネットワークへのアクセスは最初の`next_post`まで遅延してよい．
    async fn open(&self, username: &str) -> Result<Self::Stream, Error>;
}

/// 新しい順に一つずつポストを取り出す，一度きりの有限な列．
#[async_trait::async_trait]
pub trait PostStream {
    /// 次のポストを取得する．列の終わりでは`None`を返す．
    async fn next_post(&mut self) -> Result<Option<Post>, Error>;
}
