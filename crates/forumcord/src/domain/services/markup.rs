//! Markup translation: forum BBCode -> Discord markdown
//!
//! Ordered substitution passes over the whole string. Raw HTML is stripped
//! unconditionally first; the unwrap-unknown-tags fallback runs last.
//! Re-running the translation on its own output is a no-op.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    // Tag must open with a letter or slash; mention tokens like <@123> survive
    static ref HTML_TAG: Regex = Regex::new(r"(?s)</?[A-Za-z][^>]*>").unwrap();
    static ref BOLD: Regex = Regex::new(r"(?is)\[b\](.*?)\[/b\]").unwrap();
    static ref ITALIC: Regex = Regex::new(r"(?is)\[i\](.*?)\[/i\]").unwrap();
    static ref UNDERLINE: Regex = Regex::new(r"(?is)\[u\](.*?)\[/u\]").unwrap();
    static ref STRIKE: Regex = Regex::new(r"(?is)\[s\](.*?)\[/s\]").unwrap();
    static ref URL: Regex = Regex::new(r"(?is)\[url=(.*?)\](.*?)\[/url\]").unwrap();
    static ref CODE: Regex = Regex::new(r"(?is)\[code\](.*?)\[/code\]").unwrap();
    static ref PHP: Regex = Regex::new(r"(?is)\[php\](.*?)\[/php\]").unwrap();
    static ref UNORDERED_LIST: Regex = Regex::new(r"(?is)\[list\](.*?)\[/list\]").unwrap();
    static ref ORDERED_LIST: Regex = Regex::new(r"(?is)\[list=1\](.*?)\[/list\]").unwrap();
    static ref LIST_ITEM: Regex = Regex::new(r"(?i)\[\*\]").unwrap();
    static ref IMG: Regex = Regex::new(r"(?is)\[img\](.*?)\[/img\]").unwrap();
    static ref MENTION_TOKEN: Regex =
        Regex::new(r"(<@&\d+>|<@\d+>|<#\d+>|@here|@everyone)").unwrap();
    static ref UNKNOWN_TAG: Regex =
        Regex::new(r"(?is)\[\w+(?:=[^\]]*)?\](.*?)\[/\w+\]").unwrap();
    static ref HTML_IMG_SRC: Regex = Regex::new(r#"(?i)src\s*=\s*["']([^"']*)["']"#).unwrap();
}

/// Convert forum markup to Discord markdown.
///
/// With `embeds_enabled` the output is destined for an embed description:
/// inline images are dropped (the embed carries its image in a dedicated
/// field) and raw mention tokens are removed from the body (they are
/// surfaced separately through the allowed-mentions content).
pub fn translate(text: &str, embeds_enabled: bool) -> String {
    let mut text = HTML_TAG.replace_all(text, "").into_owned();

    text = BOLD.replace_all(&text, "**${1}**").into_owned();
    text = ITALIC.replace_all(&text, "*${1}*").into_owned();
    text = UNDERLINE.replace_all(&text, "__${1}__").into_owned();
    text = STRIKE.replace_all(&text, "~~${1}~~").into_owned();
    text = URL.replace_all(&text, "[${2}](${1})").into_owned();
    text = CODE.replace_all(&text, "```${1}```").into_owned();
    text = PHP.replace_all(&text, "```php\n${1}```").into_owned();

    text = ORDERED_LIST
        .replace_all(&text, |caps: &Captures| render_list(&caps[1], true))
        .into_owned();
    text = UNORDERED_LIST
        .replace_all(&text, |caps: &Captures| render_list(&caps[1], false))
        .into_owned();

    if embeds_enabled {
        text = IMG.replace_all(&text, "").into_owned();
        text = MENTION_TOKEN.replace_all(&text, "").into_owned();
    } else {
        text = IMG.replace_all(&text, "${1}").into_owned();
    }

    // Anything still looking like a tag pair collapses to its inner text
    UNKNOWN_TAG.replace_all(&text, "${1}").into_owned()
}

fn render_list(inner: &str, ordered: bool) -> String {
    let mut lines = Vec::new();
    let mut index = 1;
    for item in LIST_ITEM.split(inner) {
        let item = item.trim();
        if item.is_empty() {
            continue;
        }
        if ordered {
            lines.push(format!("{}. {}", index, item));
            index += 1;
        } else {
            lines.push(format!("- {}", item));
        }
    }
    lines.join("\n")
}

/// First image reference in the raw body: BBCode `[img]` wins, then an
/// HTML `src=` attribute when the forum allows raw HTML.
pub fn extract_image_url(message: &str, allow_html: bool) -> String {
    if let Some(caps) = IMG.captures(message) {
        let url = caps[1].trim();
        if !url.is_empty() {
            return url.to_string();
        }
    }

    if allow_html {
        if let Some(caps) = HTML_IMG_SRC.captures(message) {
            return caps[1].to_string();
        }
    }

    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emphasis_pairs() {
        assert_eq!(translate("[b]x[/b]", false), "**x**");
        assert_eq!(translate("[i]x[/i]", false), "*x*");
        assert_eq!(translate("[u]x[/u]", false), "__x__");
        assert_eq!(translate("[s]x[/s]", false), "~~x~~");
    }

    #[test]
    fn test_link_with_label() {
        assert_eq!(
            translate("[url=https://example.com]home[/url]", false),
            "[home](https://example.com)"
        );
    }

    #[test]
    fn test_code_blocks() {
        assert_eq!(translate("[code]let x = 1;[/code]", false), "```let x = 1;```");
        assert_eq!(translate("[php]echo 1;[/php]", false), "```php\necho 1;```");
    }

    #[test]
    fn test_ordered_list() {
        assert_eq!(translate("[list=1][*]a[*]b[/list]", false), "1. a\n2. b");
    }

    #[test]
    fn test_unordered_list_skips_blank_items() {
        assert_eq!(translate("[list][*]a[*]  [*]b[/list]", false), "- a\n- b");
    }

    #[test]
    fn test_image_unwrapped_without_embeds() {
        assert_eq!(
            translate("[img]https://example.com/a.png[/img]", false),
            "https://example.com/a.png"
        );
    }

    #[test]
    fn test_image_removed_in_embeds() {
        assert_eq!(translate("x [img]https://example.com/a.png[/img]", true), "x ");
    }

    #[test]
    fn test_mentions_removed_in_embeds_only() {
        assert_eq!(translate("hi <@123> @everyone", true), "hi  ");
        assert_eq!(translate("hi <@123>", false), "hi <@123>");
    }

    #[test]
    fn test_unknown_tag_unwrapped() {
        assert_eq!(translate("[quote=alice]said[/quote]", false), "said");
        assert_eq!(translate("[size=3]big[/size]", false), "big");
    }

    #[test]
    fn test_html_stripped() {
        assert_eq!(translate("a <span>b</span>", false), "a b");
    }

    #[test]
    fn test_idempotent_on_translated_text() {
        let samples = [
            "[b]x[/b] [i]y[/i] [url=https://e.com]z[/url]",
            "[list=1][*]a[*]b[/list]",
            "[code]fn main() {}[/code]",
            "plain text with [img]https://e.com/p.png[/img]",
        ];
        for sample in samples {
            let once = translate(sample, true);
            assert_eq!(translate(&once, true), once, "not stable: {}", sample);
        }
    }

    #[test]
    fn test_extract_image_url() {
        assert_eq!(
            extract_image_url("see [img]https://e.com/a.png[/img]", false),
            "https://e.com/a.png"
        );
        assert_eq!(
            extract_image_url(r#"<img src="https://e.com/b.png">"#, true),
            "https://e.com/b.png"
        );
        assert_eq!(extract_image_url(r#"<img src="https://e.com/b.png">"#, false), "");
        assert_eq!(extract_image_url("no image", true), "");
    }
}
