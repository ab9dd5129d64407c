use crate::error::Error;
use crate::{Page, PageParser, Post, PostId, Posts};

use chrono::{DateTime, FixedOffset, Month, NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use tracing::{debug, info};

const PERMALINK_BASE: &str = "https://twitter.com";

static STATUS_PAT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^/([^/?#]+)/status/(\d+)").unwrap());
static CURSOR_PAT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[?&]cursor=([^&#]+)").unwrap());
static DATETIME_PAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z]{3}) (\d{1,2}), (\d{4}) · (\d{1,2}):(\d{2}) ([AP]M) UTC$").unwrap()
});

/// "Jan 5, 2024 · 3:04 PM UTC" のような日時のパーサー．NitterはUTCで表示する．
fn nitter_time_parser(datetime_str: &str) -> Result<DateTime<FixedOffset>, Error> {
    let trimmed = datetime_str.trim();

    let captures = DATETIME_PAT.captures(trimmed).ok_or(Error::ParseDatetimeError(format!(
        "Unexpected string: {}",
        trimmed
    )))?;
    debug!("captures: {:?}", captures);

    let date = {
        let month = captures[1]
            .parse::<Month>()
            .map_err(|_| Error::ParseDatetimeError(format!("unexpected month: {}", &captures[1])))?;
        let day = captures[2]
            .parse::<u32>()
            .map_err(|e| Error::ParseDatetimeError(e.to_string()))?;
        let year = captures[3]
            .parse::<i32>()
            .map_err(|e| Error::ParseDatetimeError(e.to_string()))?;
        NaiveDate::from_ymd_opt(year, month.number_from_month(), day)
            .ok_or(Error::ParseDatetimeError("unexpected date".to_string()))?
    };
    let time = {
        let hour12 = captures[4]
            .parse::<u32>()
            .map_err(|e| Error::ParseDatetimeError(e.to_string()))?;
        let min = captures[5]
            .parse::<u32>()
            .map_err(|e| Error::ParseDatetimeError(e.to_string()))?;
        let hour = match (&captures[6], hour12) {
            ("AM", 12) => 0,
            ("AM", h) => h,
            ("PM", 12) => 12,
            (_, h) => h + 12,
        };
        NaiveTime::from_hms_opt(hour, min, 0)
            .ok_or(Error::ParseDatetimeError("unexpected time".to_string()))?
    };

    Ok(NaiveDateTime::new(date, time).and_utc().fixed_offset())
}

/// Nitterのタイムラインのパーサー
pub struct NitterParser;

impl PageParser for NitterParser {
    fn parse(source: String) -> Result<Page, Error> {
        info!("Parsing html source");
        let document = Html::parse_document(&source);

        let item_selector = Selector::parse(r#"div.timeline-item"#)?;
        let link_selector = Selector::parse(r#"a.tweet-link"#)?;
        let date_selector = Selector::parse(r#"span.tweet-date > a"#)?;
        let content_selector = Selector::parse(r#"div.tweet-content"#)?;
        let show_more_selector = Selector::parse(r#"div.show-more:not(.timeline-item) > a"#)?;

        let mut posts: Posts = Vec::new();

        for item in document.select(&item_selector) {
            // "Load newest"などのポストでない要素
            let Some(link) = item.select(&link_selector).next() else {
                debug!("skipping timeline item without a tweet link");
                continue;
            };

            let href = link.value().attr("href").unwrap_or_default();
            let captures = STATUS_PAT
                .captures(href)
                .ok_or(Error::UnexpectedStructureError {
                    selector: "div.timeline-item a.tweet-link[href]".to_string(),
                })?;
            let author = &captures[1];
            let id = captures[2]
                .parse::<u64>()
                .map_err(|e| Error::ScraperError(e.to_string()))?;

            let date = item
                .select(&date_selector)
                .next()
                .and_then(|date| date.value().attr("title"))
                .ok_or(Error::UnexpectedStructureError {
                    selector: "div.timeline-item span.tweet-date > a[title]".to_string(),
                })?;
            let content = item.select(&content_selector).next().ok_or(
                Error::UnexpectedStructureError {
                    selector: "div.timeline-item div.tweet-content".to_string(),
                },
            )?;

            let mut content_buffer = String::new();

            for content_text in content.text() {
                content_buffer.push_str(content_text);
            }

            posts.push(Post {
                id: PostId::Int(id),
                timestamp: nitter_time_parser(date)?,
                content: content_buffer,
                url: format!("{}/{}/status/{}", PERMALINK_BASE, author, id),
            });
        }

        let next_cursor = document
            .select(&show_more_selector)
            .filter_map(|a| a.value().attr("href"))
            .find_map(|href| CURSOR_PAT.captures(href).map(|c| c[1].to_string()));

        info!("Finished parsing source html. {} posts found.", posts.len());

        Ok(Page { posts, next_cursor })
    }
}

#[cfg(test)]
mod test {
    use super::{nitter_time_parser, NitterParser};
    use crate::error::Error;
    use crate::{PageParser, PostId};
    use tracing_test::traced_test;

    const TIMELINE_HTML: &str = r#"
<html><body>
<div class="timeline">
  <div class="timeline-item show-more"><a href="/tiinyhost">Load newest</a></div>
  <div class="timeline-item " data-username="tiinyhost">
    <a class="tweet-link" href="/tiinyhost/status/1742301234567890123#m"></a>
    <div class="tweet-body">
      <div>
        <div class="tweet-header">
          <a class="username" href="/tiinyhost" title="@tiinyhost">@tiinyhost</a>
          <span class="tweet-date"><a href="/tiinyhost/status/1742301234567890123#m" title="Jan 5, 2024 · 3:04 PM UTC">Jan 5</a></span>
        </div>
      </div>
      <div class="tweet-content media-body" dir="auto">Host a site in seconds ⚡ <a href="https://tiiny.host">tiiny.host</a></div>
    </div>
  </div>
  <div class="timeline-item " data-username="someone">
    <a class="tweet-link" href="/someone/status/1700000000000000001#m"></a>
    <div class="tweet-body">
      <div class="retweet-header"><span>tiinyhost retweeted</span></div>
      <div>
        <div class="tweet-header">
          <span class="tweet-date"><a href="/someone/status/1700000000000000001#m" title="Sep 8, 2023 · 12:30 AM UTC">Sep 8, 2023</a></span>
        </div>
      </div>
      <div class="tweet-content media-body" dir="auto">日本語のポスト</div>
    </div>
  </div>
  <div class="show-more"><a href="?cursor=DAABCgABF%3D%3D">Load more</a></div>
</div>
</body></html>
"#;

    #[traced_test]
    #[test]
    fn test_parse_timeline() {
        let page = NitterParser::parse(TIMELINE_HTML.to_string()).unwrap();

        assert_eq!(page.posts.len(), 2);
        assert_eq!(page.next_cursor, Some("DAABCgABF%3D%3D".to_string()));

        let first = &page.posts[0];
        assert_eq!(first.id, PostId::Int(1742301234567890123));
        assert_eq!(first.timestamp.to_rfc3339(), "2024-01-05T15:04:00+00:00");
        assert_eq!(first.content, "Host a site in seconds ⚡ tiiny.host");
        assert_eq!(
            first.url,
            "https://twitter.com/tiinyhost/status/1742301234567890123"
        );

        let second = &page.posts[1];
        assert_eq!(second.timestamp.to_rfc3339(), "2023-09-08T00:30:00+00:00");
        assert_eq!(second.content, "日本語のポスト");
        assert_eq!(
            second.url,
            "https://twitter.com/someone/status/1700000000000000001"
        );
    }

    #[traced_test]
    #[test]
    fn test_parse_last_page() {
        let html = r#"<div class="timeline"><div class="timeline-item show-more"><a href="/x">Load newest</a></div><h2 class="timeline-end">No more items</h2></div>"#;
        let page = NitterParser::parse(html.to_string()).unwrap();

        assert!(page.posts.is_empty());
        assert_eq!(page.next_cursor, None);
    }

    #[traced_test]
    #[test]
    fn test_parse_missing_date() {
        let html = r#"<div class="timeline-item"><a class="tweet-link" href="/a/status/1#m"></a><div class="tweet-content">x</div></div>"#;

        assert!(matches!(
            NitterParser::parse(html.to_string()),
            Err(Error::UnexpectedStructureError { .. })
        ));
    }

    #[traced_test]
    #[test]
    fn test_time_parser() {
        assert_eq!(
            nitter_time_parser("Mar 21, 2006 · 8:50 PM UTC")
                .unwrap()
                .to_rfc3339(),
            "2006-03-21T20:50:00+00:00"
        );
        assert_eq!(
            nitter_time_parser(" Dec 31, 2023 · 12:00 PM UTC\n")
                .unwrap()
                .to_rfc3339(),
            "2023-12-31T12:00:00+00:00"
        );
        assert_eq!(
            nitter_time_parser("Feb 1, 2024 · 12:59 AM UTC")
                .unwrap()
                .to_rfc3339(),
            "2024-02-01T00:59:00+00:00"
        );
        assert!(nitter_time_parser("5分前").is_err());
        assert!(nitter_time_parser("Feb 30, 2024 · 1:00 AM UTC").is_err());
    }
}
