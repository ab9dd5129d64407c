use crate::error::Error;
use crate::Posts;

/// 一回のリクエストで得られるポストと，次のページへのカーソル
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Page {
    pub posts: Posts,
    pub next_cursor: Option<String>,
}

/// 各プラットフォームごとにページをパースするためのトレイト．
pub trait PageParser {
    /// パースしてPageを取得する．
    fn parse(source: String) -> Result<Page, Error>;
}
