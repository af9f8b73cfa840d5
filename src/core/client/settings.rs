use crate::config::config::WriteMode;
use crate::core::client::catalog::{self, Language};
use crate::result::CoreResult;
use crate::utils::file_ops::write_text;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

// locale: "ll_CC"
static LOCALE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"locale: "([a-z]{2}_[A-Z]{2})""#).unwrap());

/// 文本中第一个 locale 字段的值
pub fn extract_tag(text: &str) -> Option<&str> {
    LOCALE_REGEX
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// 当前语言；没有 locale 字段时为 `None`，标签不在目录里则报错
pub fn extract_language(text: &str) -> CoreResult<Option<&'static Language>> {
    extract_tag(text).map(catalog::find_by_tag).transpose()
}

/// 只替换第一个 locale 字段的值，其余字节保持不变。没有该字段时返回 `None`。
pub fn apply_language(text: &str, language: &Language) -> Option<String> {
    let value = LOCALE_REGEX.captures(text)?.get(1)?;

    let mut updated = String::with_capacity(text.len());
    updated.push_str(&text[..value.start()]);
    updated.push_str(language.tag);
    updated.push_str(&text[value.end()..]);
    Some(updated)
}

/// 磁盘上的客户端设置文件
#[derive(Debug, Clone)]
pub struct SettingsFile {
    path: PathBuf,
    write_mode: WriteMode,
}

impl SettingsFile {
    pub fn new(path: PathBuf, write_mode: WriteMode) -> Self {
        Self { path, write_mode }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> CoreResult<String> {
        let text = fs::read_to_string(&self.path)?;
        debug!("Loaded {} ({} bytes)", self.path.display(), text.len());
        Ok(text)
    }

    pub fn save(&self, text: &str) -> CoreResult<()> {
        write_text(&self.path, text, self.write_mode)?;
        info!(
            "Saved {} ({} bytes, {:?})",
            self.path.display(),
            text.len(),
            self.write_mode
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::CoreError;

    const DOC: &str = "install:\n  globals:\n    locale: \"en_US\"\n    region: \"EUW\"\n  patchline: live\n";

    fn lang(tag: &str) -> &'static Language {
        catalog::find_by_tag(tag).unwrap()
    }

    #[test]
    fn test_extract_language() {
        assert_eq!(extract_language(DOC).unwrap(), Some(lang("en_US")));
    }

    #[test]
    fn test_missing_field_is_unknown() {
        assert_eq!(extract_language("region: \"EUW\"\n").unwrap(), None);
        // 格式不完整的值不算 locale 字段
        assert_eq!(extract_language("locale: \"en_us\"\nlocale: en_US\n").unwrap(), None);
    }

    #[test]
    fn test_unlisted_tag_fails_lookup() {
        match extract_language("locale: \"zh_CN\"\n") {
            Err(CoreError::CatalogLookup(tag)) => assert_eq!(tag, "zh_CN"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_apply_touches_only_the_value() {
        let updated = apply_language(DOC, lang("pt_BR")).unwrap();
        assert_eq!(extract_language(&updated).unwrap(), Some(lang("pt_BR")));

        let start = DOC.find("en_US").unwrap();
        assert_eq!(updated.len(), DOC.len());
        assert_eq!(&updated[..start], &DOC[..start]);
        assert_eq!(&updated[start + 5..], &DOC[start + 5..]);
    }

    #[test]
    fn test_apply_same_language_is_identity() {
        assert_eq!(apply_language(DOC, lang("en_US")).unwrap(), DOC);
    }

    #[test]
    fn test_apply_replaces_first_occurrence_only() {
        let doc = "locale: \"en_US\"\nbackup:\n  locale: \"en_US\"\n";
        let updated = apply_language(doc, lang("ja_JP")).unwrap();
        assert_eq!(updated, "locale: \"ja_JP\"\nbackup:\n  locale: \"en_US\"\n");
    }

    #[test]
    fn test_apply_without_field() {
        assert_eq!(apply_language("region: \"EUW\"\n", lang("de_DE")), None);
    }

    #[test]
    fn test_apply_keeps_crlf_and_unicode() {
        let doc = "name: \"Çağrı\"\r\nlocale: \"tr_TR\"\r\n";
        let updated = apply_language(doc, lang("ru_RU")).unwrap();
        assert_eq!(updated, "name: \"Çağrı\"\r\nlocale: \"ru_RU\"\r\n");
    }

    #[test]
    fn test_settings_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("LeagueClientSettings.yaml");
        fs::write(&path, DOC).unwrap();

        for mode in [WriteMode::Overwrite, WriteMode::Atomic] {
            let file = SettingsFile::new(path.clone(), mode);
            let text = file.load().unwrap();
            file.save(&apply_language(&text, lang("fr_FR")).unwrap()).unwrap();
            assert_eq!(extract_tag(&file.load().unwrap()), Some("fr_FR"));
            file.save(DOC).unwrap();
        }
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = SettingsFile::new(dir.path().join("gone.yaml"), WriteMode::Overwrite);
        assert!(matches!(file.load(), Err(CoreError::Io(_))));
    }
}
