//! Japanese text helpers.

/// CJK unified ideographs, including extension A.
fn is_kanji(ch: char) -> bool {
    ('\u{3400}'..='\u{9FFF}').contains(&ch)
}

pub fn has_kanji(text: &str) -> bool {
    text.chars().any(is_kanji)
}

/// The kanji in `text`, in order, duplicates kept.
pub fn kanji_chars(text: &str) -> Vec<char> {
    text.chars().filter(|ch| is_kanji(*ch)).collect()
}

/// Convert katakana to hiragana; everything else passes through.
pub fn kata_to_hira(text: &str) -> String {
    text.chars()
        .map(|ch| {
            if ('\u{30A1}'..='\u{30FA}').contains(&ch) {
                char::from_u32(ch as u32 - 0x60).unwrap_or(ch)
            } else {
                ch
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_kanji() {
        assert!(has_kanji("食べる"));
        assert!(!has_kanji("たべる"));
        assert!(!has_kanji("タベル"));
        assert!(!has_kanji(""));
    }

    #[test]
    fn kanji_chars_keeps_order() {
        assert_eq!(kanji_chars("日本の日"), vec!['日', '本', '日']);
    }

    #[test]
    fn katakana_becomes_hiragana() {
        assert_eq!(kata_to_hira("タベル"), "たべる");
        assert_eq!(kata_to_hira("ヴァ"), "ゔぁ");
        // Long-vowel mark is outside the shifted range.
        assert_eq!(kata_to_hira("ラーメン"), "らーめん");
        assert_eq!(kata_to_hira("abc漢"), "abc漢");
    }
}
