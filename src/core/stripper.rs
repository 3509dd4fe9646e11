use crate::utils::error::Result;
use regex::Regex;

/// `<aside>` 區塊與 og:title 的正則，編譯一次後供所有工作任務共用。
///
/// Matching is intentionally regex-based rather than DOM-based: the corpus is
/// machine-generated static pages, and a non-greedy dot-matches-newline
/// pattern is enough. Nested asides strip to the first closing tag.
#[derive(Debug, Clone)]
pub struct AsideStripper {
    aside: Regex,
    og_title: Regex,
}

impl AsideStripper {
    pub fn new() -> Result<Self> {
        Ok(Self {
            aside: Regex::new(r"(?s)<aside.*?>.*?</aside>")?,
            og_title: Regex::new(
                r#"property="og:title" content="([\x{4e00}-\x{9fa5}\s()]+)""#,
            )?,
        })
    }

    /// 移除所有 aside 區塊，回傳 (清理後內容, 移除數量)
    pub fn strip(&self, html: &str) -> (String, usize) {
        let removed = self.aside.find_iter(html).count();
        if removed == 0 {
            return (html.to_string(), 0);
        }
        (self.aside.replace_all(html, "").into_owned(), removed)
    }

    /// 從 og:title meta 標籤取出頁面名稱
    pub fn page_title(&self, html: &str) -> Option<String> {
        self.og_title
            .captures(html)
            .map(|caps| caps[1].to_string())
    }
}

/// UTF-8 編碼大小差
pub fn byte_delta(original: &str, stripped: &str) -> u64 {
    (original.len() - stripped.len()) as u64
}
