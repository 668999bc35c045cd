//! Visible-text extraction from article HTML
//!
//! Single-pass tag scanner — no DOM build. Script and style contents are
//! suppressed, common entities decoded, and all whitespace collapsed to
//! single spaces.

/// Extract the text of `<p>` elements only, space-joined
///
/// This is the preferred article body source; pages that put their copy
/// elsewhere fall back to [`page_text`].
pub fn paragraph_text(html: &str) -> String {
    scan_text(html, true)
}

/// Extract all visible text on the page
pub fn page_text(html: &str) -> String {
    scan_text(html, false)
}

fn scan_text(html: &str, paragraphs_only: bool) -> String {
    let mut text = String::new();
    let mut in_tag = false;
    let mut in_script = false;
    let mut in_style = false;
    let mut p_depth: u32 = 0;
    let mut tag_name = String::new();
    let mut building_tag = false;

    for ch in html.chars() {
        if ch == '<' {
            in_tag = true;
            building_tag = true;
            tag_name.clear();
            continue;
        }
        if ch == '>' {
            in_tag = false;
            building_tag = false;

            let tag_lower = tag_name.to_lowercase();
            match tag_lower.as_str() {
                "script" => in_script = true,
                "/script" => in_script = false,
                "style" => in_style = true,
                "/style" => in_style = false,
                "p" => p_depth += 1,
                "/p" => p_depth = p_depth.saturating_sub(1),
                _ => {}
            }

            // Tag boundaries separate words
            text.push(' ');
            continue;
        }
        if in_tag {
            if building_tag && (ch.is_alphanumeric() || ch == '/') {
                tag_name.push(ch);
            } else {
                building_tag = false;
            }
            continue;
        }
        if in_script || in_style {
            continue;
        }
        if paragraphs_only && p_depth == 0 {
            continue;
        }
        text.push(ch);
    }

    let decoded = text
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ");

    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}
