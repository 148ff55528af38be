//! リッチテキストのサニタイズ
//!
//! Analysis B の HTML はAIが生成したもので信頼できない。
//! 許可するのはハイライト用の `<span class="...">` と `<br>` だけで、
//! それ以外はすべてエスケープして文字として表示する。
//! 文字参照（`&amp;` `&nbsp;` `&#8594;` など）は正しいHTMLなのでそのまま通す。

use regex::Regex;

lazy_static::lazy_static! {
    static ref TAG_RE: Regex = Regex::new(
        r#"(?i)<span\s+class\s*=\s*(?:"([^"<>]*)"|'([^'<>]*)')\s*>|</span\s*>|<br\s*/?>"#
    ).unwrap();
    static ref CHAR_REF_RE: Regex = Regex::new(
        r"&(?:[A-Za-z][A-Za-z0-9]*|#[0-9]+|#[xX][0-9A-Fa-f]+);"
    ).unwrap();
}

/// 許可するspanクラス
pub const ALLOWED_CLASSES: &[&str] = &[
    "kw-problem",
    "kw-entity",
    "kw-action",
    "diff-added",
    "diff-removed",
];

fn escape_into(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}

/// テキスト部分のエスケープ（文字参照は残し、裸の `&` だけエスケープ）
fn escape_text_into(out: &mut String, text: &str) {
    let mut last = 0;
    for reference in CHAR_REF_RE.find_iter(text) {
        escape_into(out, &text[last..reference.start()]);
        out.push_str(reference.as_str());
        last = reference.end();
    }
    escape_into(out, &text[last..]);
}

/// 許可タグだけを残したHTMLを返す
///
/// - 許可クラスのspanは `<span class="kw-problem">` の正規形で出力
/// - 対応する開きタグがない `</span>` はエスケープ
/// - 閉じられていないspanは末尾で閉じる
pub fn sanitize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    // true: 出力したspan / false: エスケープしたspan
    let mut stack: Vec<bool> = Vec::new();
    let mut last = 0;

    for caps in TAG_RE.captures_iter(input) {
        let Some(tag) = caps.get(0) else { continue };
        escape_text_into(&mut out, &input[last..tag.start()]);
        let raw = tag.as_str();

        if let Some(class) = caps.get(1).or_else(|| caps.get(2)) {
            let class = class.as_str().trim().to_ascii_lowercase();
            if ALLOWED_CLASSES.contains(&class.as_str()) {
                out.push_str("<span class=\"");
                out.push_str(&class);
                out.push_str("\">");
                stack.push(true);
            } else {
                escape_into(&mut out, raw);
                stack.push(false);
            }
        } else if raw.starts_with("</") {
            match stack.pop() {
                Some(true) => out.push_str("</span>"),
                _ => escape_into(&mut out, raw),
            }
        } else {
            out.push_str("<br>");
        }

        last = tag.end();
    }

    escape_text_into(&mut out, &input[last..]);
    for emitted in stack.into_iter().rev() {
        if emitted {
            out.push_str("</span>");
        }
    }
    out
}
