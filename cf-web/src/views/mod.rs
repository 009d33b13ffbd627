//! HTML pages
//!
//! Pages are rendered with `format!` into a shared layout. Every value that
//! comes from the database or the request goes through [`escape`].

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};

use crate::AppState;

pub mod detail;
pub mod index;
pub mod results;

pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index::index_page))
        .route("/proteins", get(results::results_page))
        .route("/proteins/:protein_id", get(detail::detail_page))
}

/// Escape text for HTML element and attribute content
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

/// Optional text, escaped, with a dash for missing values
pub fn text_or_dash(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => escape(v),
        _ => "-".to_string(),
    }
}

/// Fixed-precision number, dash when missing
pub fn number_or_dash(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", decimals, v),
        None => "-".to_string(),
    }
}

/// Link to a vendor page, or a dash when there is no column
pub fn column_link(name: Option<&str>, url: &str) -> String {
    match name {
        Some(name) if !url.is_empty() => format!(
            r#"<a href="{}" target="_blank" rel="noopener">{}</a>"#,
            escape(url),
            escape(name)
        ),
        Some(name) => escape(name),
        None => "-".to_string(),
    }
}

/// Inline error banner
pub fn error_banner(message: Option<&str>) -> String {
    match message {
        Some(msg) => format!(r#"<div class="error">{}</div>"#, escape(msg)),
        None => String::new(),
    }
}

/// Wrap page content in the common layout
pub fn layout(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - Column Finder</title>
    <style>
        body {{
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            background-color: #1a1a1a;
            color: #e0e0e0;
            line-height: 1.6;
            margin: 0;
        }}
        header {{
            background-color: #2a2a2a;
            border-bottom: 1px solid #3a3a3a;
            padding: 16px 20px;
        }}
        header a {{ color: #4a9eff; text-decoration: none; font-size: 22px; }}
        main {{ padding: 20px; }}
        a {{ color: #4a9eff; }}
        table {{ border-collapse: collapse; width: 100%; }}
        th, td {{ border-bottom: 1px solid #3a3a3a; padding: 6px 8px; text-align: left; }}
        th {{ color: #888; font-weight: 600; }}
        .error {{ background: #4a1f1f; border: 1px solid #a33; padding: 10px; margin-bottom: 16px; }}
        .bar {{ background: #2a2a2a; height: 8px; width: 120px; position: relative; }}
        .bar span {{ background: #4a9eff; position: absolute; top: 0; bottom: 0; left: 0; }}
        .stats {{ display: flex; gap: 40px; flex-wrap: wrap; }}
        .muted {{ color: #888; }}
        input, select, button {{ background: #2a2a2a; color: #e0e0e0; border: 1px solid #3a3a3a; padding: 6px; }}
    </style>
</head>
<body>
    <header><a href="/">Column Finder</a></header>
    <main>
{content}
    </main>
</body>
</html>
"#,
        title = escape(title),
        content = content,
    )
}

/// Full error page with the given status
pub fn error_page(status: StatusCode, message: &str) -> Response {
    let content = format!(
        r#"<h1>{}</h1>
{}
<p><a href="/proteins">Back to proteins</a></p>"#,
        status.as_u16(),
        error_banner(Some(message))
    );
    (status, Html(layout("Error", &content))).into_response()
}
