//! Image sitemap XML rendering.
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"
//!         xmlns:image="http://www.google.com/schemas/sitemap-image/1.1">
//!   <url>
//!     <loc>https://example.com/post</loc>
//!     <image:image>
//!       <image:loc>https://example.com/img/cat.png</image:loc>
//!       <image:caption>A cat</image:caption>
//!       <image:title>A cat</image:title>
//!     </image:image>
//!   </url>
//! </urlset>
//! ```
//!
//! Lines are joined with `\n`; there is no trailing newline.

use super::collect::SitemapRecord;
use std::borrow::Cow;

pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
pub const IMAGE_NS: &str = "http://www.google.com/schemas/sitemap-image/1.1";

/// Escape the five reserved XML characters. `&` is replaced first so the
/// entities introduced afterwards are not escaped again.
pub fn escape_xml(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
    )
}

/// Render records as an image sitemap document.
pub fn render(records: &[SitemapRecord]) -> String {
    let mut lines = vec![
        r#"<?xml version="1.0" encoding="UTF-8"?>"#.to_string(),
        format!(r#"<urlset xmlns="{SITEMAP_NS}""#),
        format!(r#"        xmlns:image="{IMAGE_NS}">"#),
    ];

    for record in records {
        lines.push("  <url>".to_string());
        lines.push(format!("    <loc>{}</loc>", escape_xml(&record.url)));
        for image in &record.images {
            lines.push("    <image:image>".to_string());
            lines.push(format!(
                "      <image:loc>{}</image:loc>",
                escape_xml(&image.url)
            ));
            if let Some(caption) = &image.caption {
                lines.push(format!(
                    "      <image:caption>{}</image:caption>",
                    escape_xml(caption)
                ));
            }
            if let Some(title) = &image.title {
                lines.push(format!(
                    "      <image:title>{}</image:title>",
                    escape_xml(title)
                ));
            }
            lines.push("    </image:image>".to_string());
        }
        lines.push("  </url>".to_string());
    }

    lines.push("</urlset>".to_string());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_sitemap::ImageReference;
    use quick_xml::Reader;
    use quick_xml::events::Event;

    fn record(url: &str, images: Vec<ImageReference>) -> SitemapRecord {
        SitemapRecord {
            url: url.to_string(),
            images,
        }
    }

    /// Text content of every element named `name`, unescaped.
    fn texts_of(xml: &str, name: &[u8]) -> Vec<String> {
        let mut reader = Reader::from_str(xml);
        let mut inside = false;
        let mut out = Vec::new();
        loop {
            match reader.read_event().unwrap() {
                Event::Start(e) if e.name().as_ref() == name => {
                    inside = true;
                    out.push(String::new());
                }
                Event::Text(t) if inside => {
                    out.last_mut().unwrap().push_str(&t.unescape().unwrap());
                }
                Event::End(e) if e.name().as_ref() == name => inside = false,
                Event::Eof => break,
                _ => {}
            }
        }
        out
    }

    #[test]
    fn escape_plain_text_is_borrowed() {
        assert!(matches!(escape_xml("hello"), Cow::Borrowed("hello")));
    }

    #[test]
    fn escape_each_reserved_char() {
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml("<tag>"), "&lt;tag&gt;");
        assert_eq!(escape_xml(r#"say "hi""#), "say &quot;hi&quot;");
        assert_eq!(escape_xml("it's"), "it&apos;s");
    }

    #[test]
    fn escape_does_not_double_escape() {
        assert_eq!(escape_xml("&lt;"), "&amp;lt;");
        assert_eq!(escape_xml("<&>"), "&lt;&amp;&gt;");
    }

    #[test]
    fn empty_sitemap() {
        let xml = render(&[]);
        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\"\n        \
             xmlns:image=\"http://www.google.com/schemas/sitemap-image/1.1\">\n\
             </urlset>"
        );
    }

    #[test]
    fn full_layout() {
        let xml = render(&[record(
            "https://example.com/post",
            vec![
                ImageReference {
                    url: "https://example.com/a.png".into(),
                    caption: Some("Cap".into()),
                    title: Some("Tit".into()),
                },
                ImageReference {
                    url: "https://example.com/b.png".into(),
                    caption: None,
                    title: None,
                },
            ],
        )]);
        let expected = [
            r#"<?xml version="1.0" encoding="UTF-8"?>"#,
            r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9""#,
            r#"        xmlns:image="http://www.google.com/schemas/sitemap-image/1.1">"#,
            "  <url>",
            "    <loc>https://example.com/post</loc>",
            "    <image:image>",
            "      <image:loc>https://example.com/a.png</image:loc>",
            "      <image:caption>Cap</image:caption>",
            "      <image:title>Tit</image:title>",
            "    </image:image>",
            "    <image:image>",
            "      <image:loc>https://example.com/b.png</image:loc>",
            "    </image:image>",
            "  </url>",
            "</urlset>",
        ]
        .join("\n");
        assert_eq!(xml, expected);
    }

    #[test]
    fn caption_with_reserved_chars_round_trips() {
        let caption = r#"Tom & Jerry <"best"> 'ever'"#;
        let xml = render(&[record(
            "https://example.com/?a=1&b=2",
            vec![ImageReference {
                url: "https://example.com/x.png".into(),
                caption: Some(caption.into()),
                title: Some(caption.into()),
            }],
        )]);

        assert_eq!(texts_of(&xml, b"image:caption"), vec![caption]);
        assert_eq!(texts_of(&xml, b"image:title"), vec![caption]);
        assert_eq!(texts_of(&xml, b"loc"), vec!["https://example.com/?a=1&b=2"]);
    }

    #[test]
    fn records_keep_their_order() {
        let xml = render(&[
            record("https://e/1", vec![]),
            record("https://e/2", vec![]),
            record("https://e/3", vec![]),
        ]);
        assert_eq!(texts_of(&xml, b"loc"), vec!["https://e/1", "https://e/2", "https://e/3"]);
    }
}
