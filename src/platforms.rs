mod nitter;

pub use nitter::{Nitter, NitterParser, NitterRequest, DEFAULT_NITTER_URL};
