const PAGE_HEAD: &str = r#"<!doctype html>
<html lang="hi">
<head>
<meta charset="utf-8">
<title>Hindi Text → Video</title>
</head>
<body>
<h2>Hindi Text → Subtitled Video Converter</h2>
<form method="post" action="/">
  <textarea name="text" rows="6" cols="80" placeholder="हिंदी टेक्स्ट यहाँ लिखें" required></textarea><br><br>
  <button type="submit">Convert ➜ Video</button>
</form>
"#;

const PAGE_FOOT: &str = r#"<p style="font-size:small;color:#666;">Speech · FFmpeg · axum</p>
</body>
</html>
"#;

/// The input page, optionally with an error paragraph under the form.
pub fn render_form(error: Option<&str>) -> String {
    let mut page = String::with_capacity(PAGE_HEAD.len() + PAGE_FOOT.len() + 128);
    page.push_str(PAGE_HEAD);
    if let Some(message) = error {
        page.push_str(r#"<p class="error" style="color:red;">"#);
        page.push_str(&escape_html(message));
        page.push_str("</p>\n");
    }
    page.push_str(PAGE_FOOT);
    page
}

pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_form_has_no_error() {
        let page = render_form(None);
        assert!(page.contains(r#"<textarea name="text""#));
        assert!(!page.contains("class=\"error\""));
    }

    #[test]
    fn error_is_escaped() {
        let page = render_form(Some("<script>alert('x')</script>"));
        assert!(page.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
        assert!(!page.contains("<script>"));
    }
}
