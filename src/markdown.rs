//! Light markdown-to-HTML conversion for bot replies.
//!
//! Only a small subset is understood: bold, italic, links, line breaks and
//! flat bullet lists. Anything else passes through literally, and the input is
//! never escaped, so the caller must trust the text it renders.

use std::sync::LazyLock;

use regex::Regex;

const LINE_BREAK: &str = "<br>";

// Span content: anything up to a line terminator (\n, \r, U+2028, U+2029).
static BOLD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*([^\n\r\x{2028}\x{2029}]+?)\*\*").expect("bold pattern is valid")
});
static ITALIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*([^\n\r\x{2028}\x{2029}]+?)\*").expect("italic pattern is valid")
});
static LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\n\r\x{2028}\x{2029}]+?)\]\(([^\n\r\x{2028}\x{2029}]+?)\)")
        .expect("link pattern is valid")
});

/// Converts reply text into an HTML fragment.
///
/// Rules run in a fixed order and each one sees the output of the previous
/// one: bold, italic, links, line breaks, then list grouping over the
/// `<br>`-delimited lines. Never fails; text without markdown only has its
/// newlines turned into `<br>`.
pub fn format_markdown(text: &str) -> String {
    let html = BOLD.replace_all(text, "<strong>${1}</strong>");
    let html = ITALIC.replace_all(&html, "<em>${1}</em>");
    let html = LINK.replace_all(
        &html,
        r#"<a href="${2}" target="_blank" rel="noopener">${1}</a>"#,
    );
    let html = html.replace('\n', LINE_BREAK);

    group_lists(&html)
}

// Collapses each run of bullet lines into one <ul>. The <br> separators
// touching a list block are dropped since <ul> already breaks the line.
fn group_lists(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut items: Vec<&str> = Vec::new();

    for (index, line) in html.split(LINE_BREAK).enumerate() {
        if let Some(item) = bullet_item(line) {
            items.push(item);
            continue;
        }

        if items.is_empty() {
            if index > 0 {
                out.push_str(LINE_BREAK);
            }
        } else {
            flush_list(&mut out, &mut items);
        }
        out.push_str(line);
    }

    if !items.is_empty() {
        flush_list(&mut out, &mut items);
    }

    out
}

/// Returns the item text when `line` is a bullet line: a `-` or `*` marker
/// after optional indentation, then whitespace, then at least one character.
fn bullet_item(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    let rest = trimmed.strip_prefix(['-', '*'])?;
    let item = rest.trim_start();

    if item.len() == rest.len() || item.is_empty() {
        return None;
    }
    Some(item)
}

fn flush_list(out: &mut String, items: &mut Vec<&str>) {
    out.push_str("<ul>");
    for item in items.drain(..) {
        out.push_str("<li>");
        out.push_str(item);
        out.push_str("</li>");
    }
    out.push_str("</ul>");
}
