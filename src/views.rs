use crate::notice::Notice;

const INDEX_HTML: &str = include_str!("../templates/index.html");
const NEW_TRAINING_HTML: &str = include_str!("../templates/new_training.html");
const NOTICE_SLOT: &str = "{{ notice }}";

pub fn dashboard_page() -> &'static str {
    INDEX_HTML
}

pub fn new_training_page(notice: Option<&Notice>) -> String {
    let alert = notice
        .map(|n| {
            format!(
                r#"<div class="alert alert-{}" role="alert">{}</div>"#,
                n.level.as_str(),
                escape_html(&n.message)
            )
        })
        .unwrap_or_default();
    NEW_TRAINING_HTML.replace(NOTICE_SLOT, &alert)
}

// Notices can echo user input back (e.g. a bad duration string).
fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
