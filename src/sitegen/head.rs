//! `<head>` rewriting for static page shells.

use regex::Regex;
use std::sync::OnceLock;

static LINK_REGEX: OnceLock<Regex> = OnceLock::new();
static TITLE_REGEX: OnceLock<Regex> = OnceLock::new();
static DESCRIPTION_REGEX: OnceLock<Regex> = OnceLock::new();
static HEAD_CLOSE_REGEX: OnceLock<Regex> = OnceLock::new();

/// `<link rel="alternate" hreflang=..>` target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alternate {
    pub hreflang: String,
    pub href: String,
}

/// Everything written into a page head.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadTags {
    pub title: Option<String>,
    pub description: Option<String>,
    pub canonical: String,
    pub alternates: Vec<Alternate>,
}

/// Escape text for use in HTML/XML content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

impl HeadTags {
    fn link_tags(&self) -> String {
        let mut tags = format!(
            r#"<link rel="canonical" href="{}" />"#,
            escape(&self.canonical)
        );
        for alternate in &self.alternates {
            tags.push_str(&format!(
                r#"<link rel="alternate" hreflang="{}" href="{}" />"#,
                escape(&alternate.hreflang),
                escape(&alternate.href)
            ));
        }
        tags
    }
}

/// Rewrite `template` so its head carries exactly `tags`.
///
/// Only the part before `</head>` is touched. Existing canonical and
/// hreflang links are dropped, `<title>` and the meta description are
/// replaced (or added), and the link tags go right before `</head>`.
/// Returns `None` when the template has no `</head>`.
pub fn inject_head(template: &str, tags: &HeadTags) -> Option<String> {
    let head_close = HEAD_CLOSE_REGEX.get_or_init(|| Regex::new(r"(?i)</head\s*>").unwrap());
    let close = head_close.find(template)?.start();
    let (head, rest) = template.split_at(close);

    // Feed links (`rel="alternate" type="application/rss+xml"`) carry no
    // hreflang and are kept
    let links = LINK_REGEX.get_or_init(|| {
        Regex::new(r#"(?i)<link(?:[^>]+rel=["']canonical["']|[^>]+\shreflang=)[^>]*>\s*"#)
            .unwrap()
    });
    let mut head = links.replace_all(head, "").into_owned();

    let mut additions = String::new();

    if let Some(title) = &tags.title {
        let element = format!("<title>{}</title>", escape(title));
        let title_regex =
            TITLE_REGEX.get_or_init(|| Regex::new(r"(?is)<title[^>]*>.*?</title\s*>").unwrap());
        if title_regex.is_match(&head) {
            head = title_regex
                .replace(&head, regex::NoExpand(&element))
                .into_owned();
        } else {
            additions.push_str(&element);
        }
    }

    if let Some(description) = &tags.description {
        let element = format!(
            r#"<meta name="description" content="{}" />"#,
            escape(description)
        );
        let description_regex = DESCRIPTION_REGEX.get_or_init(|| {
            Regex::new(r#"(?i)<meta[^>]+name=["']description["'][^>]*>"#).unwrap()
        });
        if description_regex.is_match(&head) {
            head = description_regex
                .replace(&head, regex::NoExpand(&element))
                .into_owned();
        } else {
            additions.push_str(&element);
        }
    }

    additions.push_str(&tags.link_tags());

    let mut html = String::with_capacity(head.len() + additions.len() + rest.len() + 1);
    html.push_str(&head);
    html.push_str(&additions);
    html.push('\n');
    html.push_str(rest);
    Some(html)
}
