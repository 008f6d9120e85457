//! Static HTML documents served in place of a redirect
//!
//! Three documents: the cloaking wrapper (destination in an iframe so the
//! short URL stays in the address bar), the crawler preview (Open Graph +
//! Twitter card tags, no redirect), and an empty shell for crawlers when
//! previews are turned off.

use crate::storage::{LinkMetadata, LinkRecord};

/// Minimal HTML entity escaping for text and attribute positions.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Cloaking document: full-viewport iframe onto the destination.
pub fn cloak_page(record: &LinkRecord, path: &str) -> String {
    let metadata = record.metadata.clone().unwrap_or_default();
    let title = escape_html(metadata.title.as_deref().unwrap_or(path));
    let url = escape_html(&record.url);

    let mut head_extra = String::new();
    if let Some(description) = metadata.description.as_deref() {
        head_extra.push_str(&format!(
            "<meta name=\"description\" content=\"{}\">\n",
            escape_html(description)
        ));
    }
    if let Some(image) = metadata.image.as_deref() {
        head_extra.push_str(&format!(
            "<link rel=\"icon\" href=\"{}\">\n",
            escape_html(image)
        ));
    }

    format!(
        "<!doctype html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n{head_extra}\
         <style>html,body{{margin:0;padding:0;height:100%;overflow:hidden}}\
         iframe{{display:block;width:100%;height:100%;border:0}}</style>\n\
         </head>\n<body>\n<iframe src=\"{url}\"></iframe>\n</body>\n</html>\n"
    )
}

/// Crawler preview document: Open Graph and Twitter card tags only.
pub fn preview_page(record: &LinkRecord, metadata: &LinkMetadata, short_url: &str) -> String {
    let title = escape_html(metadata.title.as_deref().unwrap_or(""));
    let description = escape_html(metadata.description.as_deref().unwrap_or(""));
    let url = escape_html(&record.url);
    let short_url = escape_html(short_url);

    let mut tags = String::new();
    tags.push_str(&format!(
        "<meta property=\"og:title\" content=\"{title}\">\n\
         <meta property=\"og:description\" content=\"{description}\">\n\
         <meta property=\"og:url\" content=\"{short_url}\">\n\
         <meta property=\"og:type\" content=\"website\">\n"
    ));

    let card = if let Some(image) = metadata.image.as_deref() {
        let image = escape_html(image);
        tags.push_str(&format!(
            "<meta property=\"og:image\" content=\"{image}\">\n\
             <meta name=\"twitter:image\" content=\"{image}\">\n"
        ));
        "summary_large_image"
    } else {
        "summary"
    };

    tags.push_str(&format!(
        "<meta name=\"twitter:card\" content=\"{card}\">\n\
         <meta name=\"twitter:title\" content=\"{title}\">\n\
         <meta name=\"twitter:description\" content=\"{description}\">\n"
    ));

    format!(
        "<!doctype html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n{tags}\
         </head>\n<body>\n<p><a href=\"{url}\">{url}</a></p>\n</body>\n</html>\n"
    )
}

/// Served to crawlers when the creator disabled previews.
pub fn empty_shell() -> String {
    "<!doctype html>\n<html>\n<head><meta charset=\"utf-8\"></head>\n<body></body>\n</html>\n"
        .to_string()
}
