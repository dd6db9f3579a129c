//! XML sitemaps with hreflang annotations.

use crate::sitegen::head::{escape, Alternate};
use chrono::NaiveDate;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlEntry {
    pub loc: String,
    pub lastmod: Option<NaiveDate>,
    pub changefreq: &'static str,
    pub priority: &'static str,
    pub alternates: Vec<Alternate>,
}

/// Render a complete `<urlset>` document.
pub fn render_urlset(entries: &[UrlEntry]) -> String {
    let mut xml = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"{}\" xmlns:xhtml=\"{}\">\n",
        SITEMAP_NS, XHTML_NS
    );

    for entry in entries {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape(&entry.loc)));
        for alternate in &entry.alternates {
            xml.push_str(&format!(
                "    <xhtml:link rel=\"alternate\" hreflang=\"{}\" href=\"{}\" />\n",
                escape(&alternate.hreflang),
                escape(&alternate.href)
            ));
        }
        if let Some(lastmod) = entry.lastmod {
            xml.push_str(&format!(
                "    <lastmod>{}</lastmod>\n",
                lastmod.format("%Y-%m-%d")
            ));
        }
        xml.push_str(&format!(
            "    <changefreq>{}</changefreq>\n    <priority>{}</priority>\n",
            entry.changefreq, entry.priority
        ));
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

/// Render a `<sitemapindex>` over the given sitemap URLs.
pub fn render_index(sitemaps: &[String]) -> String {
    let mut xml = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<sitemapindex xmlns=\"{}\">\n",
        SITEMAP_NS
    );
    for loc in sitemaps {
        xml.push_str(&format!(
            "  <sitemap>\n    <loc>{}</loc>\n  </sitemap>\n",
            escape(loc)
        ));
    }
    xml.push_str("</sitemapindex>\n");
    xml
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> UrlEntry {
        UrlEntry {
            loc: "https://yourbusinessinitaly.com/en/blog/tax-&-vat".into(),
            lastmod: NaiveDate::from_ymd_opt(2024, 5, 20),
            changefreq: "weekly",
            priority: "0.8",
            alternates: vec![Alternate {
                hreflang: "it".into(),
                href: "https://yourbusinessinitaly.com/it/blog/tasse".into(),
            }],
        }
    }

    #[test]
    fn test_urlset_is_closed_and_escaped() {
        let xml = render_urlset(&[entry()]);

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("xmlns:xhtml=\"http://www.w3.org/1999/xhtml\""));
        assert!(xml.contains("<loc>https://yourbusinessinitaly.com/en/blog/tax-&amp;-vat</loc>"));
        assert!(xml.contains("<lastmod>2024-05-20</lastmod>"));
        assert!(xml.trim_end().ends_with("</urlset>"));
        assert_eq!(xml.matches("<url>").count(), xml.matches("</url>").count());
    }

    #[test]
    fn test_empty_urlset_is_still_closed() {
        let xml = render_urlset(&[]);
        assert!(xml.contains("<urlset"));
        assert!(xml.trim_end().ends_with("</urlset>"));
    }

    #[test]
    fn test_entry_without_lastmod() {
        let mut entry = entry();
        entry.lastmod = None;
        entry.alternates.clear();

        let xml = render_urlset(&[entry]);
        assert!(!xml.contains("<lastmod>"));
        assert!(!xml.contains("xhtml:link"));
    }

    #[test]
    fn test_index_lists_sitemaps() {
        let xml = render_index(&[
            "https://yourbusinessinitaly.com/sitemap-it.xml".to_string(),
            "https://yourbusinessinitaly.com/sitemap-en.xml".to_string(),
        ]);

        assert_eq!(xml.matches("<sitemap>").count(), 2);
        assert!(xml.trim_end().ends_with("</sitemapindex>"));
    }
}
