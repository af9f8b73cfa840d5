use crate::result::{CoreError, CoreResult};

/// 客户端支持的显示语言
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub name: &'static str,
    pub tag: &'static str, // 形如 "ll_CC"
}

/// 按界面显示顺序排列的语言目录
pub const LANGUAGES: &[Language] = &[
    Language { name: "English (US)", tag: "en_US" },
    Language { name: "Português", tag: "pt_BR" },
    Language { name: "Türkçe", tag: "tr_TR" },
    Language { name: "English (GB)", tag: "en_GB" },
    Language { name: "Deutsch", tag: "de_DE" },
    Language { name: "Español (ES)", tag: "es_ES" },
    Language { name: "Français", tag: "fr_FR" },
    Language { name: "Italiano", tag: "it_IT" },
    Language { name: "Čeština", tag: "cs_CZ" },
    Language { name: "Ελληνικά", tag: "el_GR" },
    Language { name: "Magyar", tag: "hu_HU" },
    Language { name: "Polski", tag: "pl_PL" },
    Language { name: "Română", tag: "ro_RO" },
    Language { name: "Русский", tag: "ru_RU" },
    Language { name: "Español (MX)", tag: "es_MX" },
    Language { name: "English (AU)", tag: "en_AU" },
    Language { name: "日本語", tag: "ja_JP" },
];

pub fn languages() -> &'static [Language] {
    LANGUAGES
}

/// 按标签精确查找，找不到视为目录查找失败
pub fn find_by_tag(tag: &str) -> CoreResult<&'static Language> {
    LANGUAGES
        .iter()
        .find(|l| l.tag == tag)
        .ok_or_else(|| CoreError::CatalogLookup(tag.to_string()))
}

/// 按标签或显示名称查找（名称不区分大小写），用于命令行输入
pub fn find(query: &str) -> CoreResult<&'static Language> {
    let query = query.trim();
    LANGUAGES
        .iter()
        .find(|l| l.tag == query)
        .or_else(|| {
            let lowered = query.to_lowercase();
            LANGUAGES.iter().find(|l| l.name.to_lowercase() == lowered)
        })
        .ok_or_else(|| CoreError::UnknownLanguage(query.to_string()))
}
