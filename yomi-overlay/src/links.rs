//! External dictionary links.

use crate::text::has_kanji;

const HANJA_DICT: &str = "https://hanja.dict.naver.com/hanja?q=";
const JA_DICT: &str = "https://ja.dict.naver.com/#/search?range=all&query=";

pub fn hanja_url(kanji: &str) -> String {
    format!("{HANJA_DICT}{}", urlencoding::encode(kanji))
}

pub fn ja_dict_url(term: &str) -> String {
    format!("{JA_DICT}{}", urlencoding::encode(term))
}

/// Link for a token header. A lone kanji goes to the hanja dictionary,
/// anything else is looked up by lemma (or surface when the lemma is empty).
pub fn token_url(surface: &str, lemma: &str) -> String {
    let mut chars = surface.chars();
    let single_char = matches!((chars.next(), chars.next()), (Some(_), None));
    let single_kanji = single_char && has_kanji(surface);
    if single_kanji {
        hanja_url(surface)
    } else if lemma.is_empty() {
        ja_dict_url(surface)
    } else {
        ja_dict_url(lemma)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_kanji_goes_to_hanja() {
        assert_eq!(
            token_url("猫", "猫"),
            "https://hanja.dict.naver.com/hanja?q=%E7%8C%AB"
        );
    }

    #[test]
    fn words_use_lemma() {
        assert_eq!(
            token_url("食べ", "食べる"),
            "https://ja.dict.naver.com/#/search?range=all&query=%E9%A3%9F%E3%81%B9%E3%82%8B"
        );
    }

    #[test]
    fn single_kana_is_not_hanja() {
        assert!(token_url("は", "").starts_with(JA_DICT));
        assert!(token_url("は", "").ends_with("%E3%81%AF"));
    }
}
