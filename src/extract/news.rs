use scraper::ElementRef;
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info};

use crate::config::NewsSettings;
use crate::output::Record;
use crate::page::{element_text, DocumentOrder, Page};

/// One item of the "Latest News" rail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsRow {
    /// Best effort: a `datetime` attribute, nearby span text, or empty
    pub timestamp: String,
    pub title: String,
    pub link: String,
}

impl Record for NewsRow {
    const HEADERS: &'static [&'static str] = &["LatestNews-timestamp", "title", "link"];

    fn fields(&self) -> Vec<&str> {
        vec![
            self.timestamp.as_str(),
            self.title.as_str(),
            self.link.as_str(),
        ]
    }
}

/// Collect headline links from the container around the news marker text.
pub fn extract_news(page: &Page, settings: &NewsSettings) -> Vec<NewsRow> {
    let Some(anchors) = page.anchors_near_text(&settings.marker, settings.container_depth) else {
        info!(marker = %settings.marker, "News marker not found");
        return Vec::new();
    };
    debug!(anchors = anchors.len(), "Anchors inside news container");

    let order = page.document_order();
    let mut seen = HashSet::new();
    let mut rows = Vec::new();

    for anchor in anchors {
        let title = element_text(anchor);
        if title.is_empty() || title.chars().count() < settings.min_title_chars {
            continue;
        }
        let href = anchor.value().attr("href").unwrap_or_default();
        let link = resolve_link(href, &settings.site_origin);

        if !seen.insert((title.clone(), link.clone())) {
            continue;
        }

        rows.push(NewsRow {
            timestamp: timestamp_for(&order, anchor),
            title,
            link,
        });
    }

    rows
}

/// Prefix site-relative paths with `origin`; everything else passes through.
pub fn resolve_link(href: &str, origin: &str) -> String {
    if href.starts_with('/') && !href.starts_with("//") {
        format!("{}{}", origin.trim_end_matches('/'), href)
    } else {
        href.to_string()
    }
}

fn timestamp_for<'a>(order: &DocumentOrder<'a>, anchor: ElementRef<'a>) -> String {
    let datetime = order
        .preceding(anchor, "time")
        .and_then(|time| time.value().attr("datetime"))
        .filter(|value| !value.is_empty());
    match datetime {
        Some(value) => value.to_string(),
        None => order
            .preceding(anchor, "span")
            .map(element_text)
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(html: &str) -> Vec<NewsRow> {
        extract_news(&Page::parse(html), &NewsSettings::default())
    }

    #[test]
    fn test_resolves_site_relative_links() {
        assert_eq!(
            resolve_link("/world/markets", "https://www.cnbc.com"),
            "https://www.cnbc.com/world/markets"
        );
        assert_eq!(
            resolve_link("https://external.com/x", "https://www.cnbc.com"),
            "https://external.com/x"
        );
        assert_eq!(
            resolve_link("//cdn.example.com/a", "https://www.cnbc.com"),
            "//cdn.example.com/a"
        );
        assert_eq!(
            resolve_link("/a", "https://www.cnbc.com/"),
            "https://www.cnbc.com/a"
        );
    }

    #[test]
    fn test_no_marker_yields_nothing() {
        let rows = extract(r#"<div><a href="/a">A perfectly long headline</a></div>"#);
        assert!(rows.is_empty());
    }

    #[test]
    fn test_marker_is_case_sensitive() {
        let rows = extract(r#"<div><h3>LATEST NEWS</h3><a href="/a">A perfectly long headline</a></div>"#);
        assert!(rows.is_empty());
    }

    #[test]
    fn test_title_length_boundary() {
        let rows = extract(
            r#"<div><h3>Latest News</h3>
               <a href="/nine">123456789</a>
               <a href="/ten">1234567890</a>
               <a href="/icon">  <img src="x.png">  </a>
            </div>"#,
        );
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "1234567890");
        assert_eq!(rows[0].link, "https://www.cnbc.com/ten");
    }

    #[test]
    fn test_empty_titles_skipped_without_minimum() {
        let settings = NewsSettings {
            min_title_chars: 0,
            ..NewsSettings::default()
        };
        let page = Page::parse(
            r#"<div><h3>Latest News</h3>
               <a href="/icon"><img src="icon.png"></a>
               <a href="/short">Hi</a>
            </div>"#,
        );
        let rows = extract_news(&page, &settings);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "Hi");
    }

    #[test]
    fn test_time_without_datetime_falls_back_to_span_not_earlier_time() {
        let rows = extract(
            r#"<div><h3>Latest News</h3>
               <time datetime="2025-01-30T09:00:00+0000">earlier</time>
               <span>12 Min Ago</span>
               <time>no attribute</time>
               <a href="/one">Headline number one</a>
            </div>"#,
        );
        assert_eq!(rows[0].timestamp, "12 Min Ago");
    }

    #[test]
    fn test_title_length_counts_characters() {
        // nine characters, eleven bytes
        let rows = extract(r#"<div><h3>Latest News</h3><a href="/x">Ações sob</a></div>"#);
        assert!(rows.is_empty());
    }

    #[test]
    fn test_duplicates_keep_first_occurrence() {
        let rows = extract(
            r#"<div><h3>Latest News</h3>
               <a href="/b">Second headline here</a>
               <a href="https://www.cnbc.com/b">Second headline here</a>
               <a href="/b">Second   headline here </a>
               <a href="/c">Second headline here</a>
            </div>"#,
        );
        let links: Vec<&str> = rows.iter().map(|r| r.link.as_str()).collect();
        assert_eq!(
            links,
            vec!["https://www.cnbc.com/b", "https://www.cnbc.com/c"]
        );
    }

    #[test]
    fn test_timestamp_prefers_time_datetime() {
        let rows = extract(
            r#"<div><h3>Latest News</h3>
               <ul>
                 <li><span>ignored</span><time datetime="2025-01-30T14:05:00+0000">2 Hours Ago</time>
                     <a href="/one">Headline number one</a></li>
               </ul>
            </div>"#,
        );
        assert_eq!(rows[0].timestamp, "2025-01-30T14:05:00+0000");
    }

    #[test]
    fn test_timestamp_falls_back_to_span_text() {
        let rows = extract(
            r#"<div><h3>Latest News</h3>
               <time>no attribute</time>
               <span class="LatestNews-timestamp">
                 32 Min Ago
               </span>
               <a href="/one">Headline number one</a>
            </div>"#,
        );
        assert_eq!(rows[0].timestamp, "32 Min Ago");
    }

    #[test]
    fn test_timestamp_empty_when_nothing_precedes() {
        let rows = extract(
            r#"<div><a href="/one">Headline number one</a><h3>Latest News</h3></div>"#,
        );
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].timestamp, "");
    }

    #[test]
    fn test_fixture_emits_four_rows_in_order() {
        let html = include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/tests/fixtures/cnbc_world.html"
        ));
        let rows = extract_news(&Page::parse(html), &NewsSettings::default());
        let titles: Vec<&str> = rows.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Stocks rally as investors weigh Fed remarks",
                "Oil slides after OPEC+ signals output increase",
                "Europe markets close higher; DAX hits record",
                "Read the full analysis from our correspondents",
            ]
        );
        assert_eq!(rows[0].timestamp, "2025-01-30T14:05:00+0000");
        assert_eq!(rows[1].link, "https://www.cnbc.com/2025/01/30/oil-slides.html");
        assert_eq!(rows[3].link, "https://external.com/analysis");
        assert_eq!(rows[3].timestamp, "45 Min Ago");
    }
}
