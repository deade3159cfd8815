//! Server-rendered HTML.

mod layout;

pub use layout::{render_root, search_replaces_history};

/// Escape text for use in HTML element content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Wrap a body fragment in the document shell.
pub fn document(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="stylesheet" href="/app.css">
<script src="/app.js" defer></script>
</head>
<body>
{body}
</body>
</html>
"#,
        title = escape(title),
    )
}

/// Full-page error view.
pub fn error_page(heading: &str, message: &str) -> String {
    document(
        heading,
        &format!(
            r#"<div id="error-page">
<h1>{}</h1>
<p><i>{}</i></p>
<p><a href="/">Back to contacts</a></p>
</div>"#,
            escape(heading),
            escape(message),
        ),
    )
}
