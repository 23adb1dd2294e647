//! The HTML form page.

const FORM_TEMPLATE: &str = include_str!("../../static/index.html");
const ERROR_PLACEHOLDER: &str = "{{error}}";

/// Minimal escaping for text placed inside HTML element content.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn render_form_page(error: Option<&str>) -> String {
    let banner = match error {
        Some(message) => format!(
            "<div class=\"error\" role=\"alert\">Error: {}</div>",
            escape_html(message)
        ),
        None => String::new(),
    };
    FORM_TEMPLATE.replace(ERROR_PLACEHOLDER, &banner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_page_has_no_banner() {
        let page = render_form_page(None);
        assert!(!page.contains(ERROR_PLACEHOLDER));
        assert!(!page.contains("class=\"error\""));
        assert!(page.contains("name=\"attendance_excel\""));
    }

    #[test]
    fn test_error_is_escaped() {
        let page = render_form_page(Some("bad <script>"));
        assert!(page.contains("Error: bad &lt;script&gt;"));
    }
}
