//! Link-preview page served to chat clients.
use crate::utils::escape_html;

/// Renders the page whose Open Graph image is the QR code for the link.
pub fn render_preview_page(title: &str, page_url: &str, qr_url: &str) -> String {
    let title = escape_html(title);
    let page_url = escape_html(page_url);
    let qr_url = escape_html(qr_url);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <title>{title}</title>
    <meta property="og:type" content="website">
    <meta property="og:title" content="{title}">
    <meta property="og:url" content="{page_url}">
    <meta property="og:image" content="{qr_url}">
    <meta name="twitter:card" content="summary_large_image">
    <meta name="twitter:title" content="{title}">
    <meta name="twitter:image" content="{qr_url}">
  </head>
  <body>
    <img src="{qr_url}" alt="{title}">
  </body>
</html>
"#
    )
}
