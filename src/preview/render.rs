use std::sync::LazyLock;

use regex::Regex;

static STRONG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("strong pattern"));
static EMPHASIS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*(.+?)\*").expect("emphasis pattern"));
static UNDERLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__(.+?)__").expect("underline pattern"));
static HEADING2: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^## (.+)$").expect("h2 pattern"));
static HEADING3: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^### (.+)$").expect("h3 pattern"));
static LIST_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(?:• |\d+\. )(.+)$").expect("list pattern"));

/// Tags that open a line-level block after the heading and list passes.
const BLOCK_OPENERS: [&str; 3] = ["<h2>", "<h3>", "<li>"];

/// Escape the characters that would otherwise read as markup.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render clause text to preview markup.
///
/// Each pass runs over the whole buffer and feeds the next, in this order:
/// strong, emphasis, underline, level-2 heading, level-3 heading, list
/// item, then paragraphs. Inline patterns never cross a line break.
/// Unbalanced markers are left as literal text.
pub fn render(text: &str) -> String {
    let out = escape(text);
    let out = STRONG.replace_all(&out, "<strong>${1}</strong>");
    let out = EMPHASIS.replace_all(&out, "<em>${1}</em>");
    let out = UNDERLINE.replace_all(&out, "<u>${1}</u>");
    let out = HEADING2.replace_all(&out, "<h2>${1}</h2>");
    let out = HEADING3.replace_all(&out, "<h3>${1}</h3>");
    let out = LIST_ITEM.replace_all(&out, "<li>${1}</li>");
    wrap_paragraphs(&out)
}

/// Group runs of plain lines, split by blank lines or block lines, into
/// `<p>` blocks joined with `<br/>`.
fn wrap_paragraphs(text: &str) -> String {
    let mut blocks: Vec<String> = Vec::new();
    let mut run: Vec<&str> = Vec::new();

    let flush = |run: &mut Vec<&str>, blocks: &mut Vec<String>| {
        if !run.is_empty() {
            blocks.push(format!("<p>{}</p>", run.join("<br/>")));
            run.clear();
        }
    };

    for line in text.lines() {
        if line.trim().is_empty() {
            flush(&mut run, &mut blocks);
        } else if BLOCK_OPENERS.iter().any(|tag| line.starts_with(tag)) {
            flush(&mut run, &mut blocks);
            blocks.push(line.to_string());
        } else {
            run.push(line);
        }
    }
    flush(&mut run, &mut blocks);
    blocks.join("\n")
}
