mod nitter_parser;
mod nitter_request;

pub use nitter_parser::NitterParser;
pub use nitter_request::{NitterRequest, DEFAULT_NITTER_URL};

use crate::PlatForm;

/// Nitterのタイムラインからポストを取得する．
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Nitter;

impl PlatForm for Nitter {
    type Parser = NitterParser;
    type Requester = NitterRequest;
}
