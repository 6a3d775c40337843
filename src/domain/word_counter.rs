//! 字数统计
//!
//! 中英混排文本的字数规则：
//! - 每个 CJK 字符计 1 字（U+4E00–U+9FFF、U+3000–U+303F、U+FF00–U+FFEF）
//! - 每个连续的 ASCII 字母串计 1 词（等价于 `[a-zA-Z]+`）
//! - 数字、标点、其他文字均不计数
//!
//! 空白先折叠为单个空格再统计，因此 U+3000 全角空格不计入字数。

/// 是否为计数的 CJK 字符
#[inline]
fn is_cjk(ch: char) -> bool {
    matches!(ch, '\u{4E00}'..='\u{9FFF}' | '\u{3000}'..='\u{303F}' | '\u{FF00}'..='\u{FFEF}')
}

/// 统计字数
pub fn count_words(content: &str) -> usize {
    let mut count = 0;
    let mut in_word = false;

    for ch in content.chars() {
        if ch.is_whitespace() {
            in_word = false;
        } else if is_cjk(ch) {
            count += 1;
            in_word = false;
        } else if ch.is_ascii_alphabetic() {
            if !in_word {
                count += 1;
                in_word = true;
            }
        } else {
            in_word = false;
        }
    }

    count
}

/// 统计可选内容的字数，`None` 计为 0
pub fn count_words_opt(content: Option<&str>) -> usize {
    content.map(count_words).unwrap_or(0)
}
