/// 設定ファイルについて
mod config {
    use tweet_collect::platforms::DEFAULT_NITTER_URL;
    use tweet_collect::CollectRequest;

    use serde::{Deserialize, Serialize};

    /// Config読み込みのエラー
    #[derive(Debug, thiserror::Error)]
    #[error("ConfigError: {0}")]
    pub struct ConfigError(pub String);

    /// Configファイルの全体．省略されたフィールドはデフォルトになる．
    #[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
    #[serde(default)]
    pub struct AppConfig {
        /// NitterインスタンスのURL
        pub feed_url: String,
        /// 出力先のディレクトリ
        pub out_dir: String,
        /// 上から順に実行される
        pub requests: Vec<CollectRequest>,
    }

    impl Default for AppConfig {
        fn default() -> Self {
            Self {
                feed_url: DEFAULT_NITTER_URL.to_string(),
                out_dir: ".".to_string(),
                requests: vec![
                    CollectRequest::new("tiinyhost", 500),
                    CollectRequest::new("_baretto", 500),
                ],
            }
        }
    }

    impl AppConfig {
        /// jsonから読み込む．エラーにはjson中のパスを含める．
        pub fn from_json(json: &str) -> Result<Self, ConfigError> {
            let mut deserializer = serde_json::Deserializer::from_str(json);
            serde_path_to_error::deserialize(&mut deserializer)
                .map_err(|e| ConfigError(e.to_string()))
        }
    }

    #[cfg(test)]
    mod test {
        use super::{AppConfig, CollectRequest, DEFAULT_NITTER_URL};

        #[tracing_test::traced_test]
        #[test]
        fn test_deserialize() {
            let config_json = r#"
{
    "feed_url": "https://nitter.example.org",
    "requests": [
        {"username": "alice", "limit": 500},
        {"username": "bob", "limit": 5}
    ]
}
            "#;

            let config = AppConfig {
                feed_url: "https://nitter.example.org".to_string(),
                out_dir: ".".to_string(),
                requests: vec![CollectRequest::new("alice", 500), CollectRequest::new("bob", 5)],
            };

            assert_eq!(AppConfig::from_json(config_json).unwrap(), config);
        }

        #[tracing_test::traced_test]
        #[test]
        fn test_default() {
            let config = AppConfig::from_json("{}").unwrap();

            assert_eq!(config.feed_url, DEFAULT_NITTER_URL);
            assert_eq!(
                config.requests,
                vec![
                    CollectRequest::new("tiinyhost", 500),
                    CollectRequest::new("_baretto", 500),
                ]
            );
        }

        #[tracing_test::traced_test]
        #[test]
        fn test_error_path() {
            let err = AppConfig::from_json(r#"{"requests": [{"username": "alice", "limit": -1}]}"#)
                .unwrap_err();

            assert!(err.0.starts_with("requests[0].limit"), "{}", err);
        }
    }
}

use clap::Parser;

#[derive(Debug, Parser)]
struct Arg {
    /// config file path. defaults to the built-in request list.
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use config::AppConfig;
    use tweet_collect::platforms::{Nitter, NitterRequest};
    use tweet_collect::{output_file_name, Collector, PlatformFeed};

    use tracing::info;
    use tracing_subscriber::FmtSubscriber;

    // tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let Arg { config } = Arg::parse();

    let AppConfig {
        feed_url,
        out_dir,
        requests,
    } = match config {
        Some(path) => {
            info!("Reading config from {:?}.", path);
            AppConfig::from_json(&std::fs::read_to_string(&path)?)?
        }
        None => AppConfig::default(),
    };

    let feed = PlatformFeed::<Nitter>::new(NitterRequest::new(feed_url)?);
    let collector = Collector::new(feed, std::path::Path::new(&out_dir));

    // 一件ずつ保存して報告する．失敗した時点で終了する．
    collector
        .run(&requests, |request, count| {
            println!(
                "✅ Saved {} tweets to {}",
                count,
                output_file_name(&request.username)
            );
        })
        .await?;

    info!("all collections finished.");
    Ok(())
}
