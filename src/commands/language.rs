use crate::core::client::catalog::{self, Language};
use crate::core::client::context::{AppContext, LanguageChange};
use crate::core::client::prompt::ReadLine;
use crate::result::{CoreError, CoreResult};
use std::io::{self, Write};
use tracing::info;

/// 打印语言目录，`current` 对应行加 `*` 标记
pub fn list_languages<W: Write>(
    out: &mut W,
    current: Option<&'static Language>,
) -> io::Result<()> {
    for (index, lang) in catalog::languages().iter().enumerate() {
        let marker = if current == Some(lang) { '*' } else { ' ' };
        writeln!(out, "{} {:>2}. {}  {}", marker, index + 1, lang.tag, lang.name)?;
    }
    Ok(())
}

pub fn show_current<W: Write>(ctx: &mut AppContext, out: &mut W) -> CoreResult<()> {
    let current = ctx.current_language()?;
    match current {
        Some(lang) => writeln!(out, "{} ({})", lang.name, lang.tag)?,
        None => writeln!(out, "unknown")?,
    }
    Ok(())
}

/// 按标签或显示名称设置语言，成功后通知用户
pub fn set_language(ctx: &mut AppContext, query: &str) -> CoreResult<LanguageChange> {
    let language = catalog::find(query)?;
    let change = ctx.apply_language(language.tag)?;
    info!(
        "Language changed: {} -> {} ({})",
        change.old.map(|l| l.tag).unwrap_or("unknown"),
        change.new.tag,
        change.path.display()
    );
    ctx.prompter().notify_language_changed(&change.message());
    Ok(change)
}

/// 终端选择器：列出目录并读取序号、标签或名称，空输入保持当前语言
pub fn pick_language<R: ReadLine, W: Write>(
    ctx: &mut AppContext,
    input: &mut R,
    out: &mut W,
) -> CoreResult<Option<LanguageChange>> {
    let current = ctx.current_language()?;
    list_languages(out, current)?;

    loop {
        write!(out, "Select a language (number, tag or name, empty to cancel): ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let answer = line.trim();
        if answer.is_empty() {
            return Ok(None);
        }

        let selected = match answer.parse::<usize>() {
            Ok(n) if (1..=catalog::languages().len()).contains(&n) => {
                Ok(&catalog::languages()[n - 1])
            }
            Ok(n) => Err(CoreError::UnknownLanguage(n.to_string())),
            Err(_) => catalog::find(answer),
        };

        match selected {
            Ok(lang) => return set_language(ctx, lang.tag).map(Some),
            Err(CoreError::UnknownLanguage(query)) => {
                writeln!(out, "Unknown language '{}'.", query)?;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::config::Config;
    use crate::core::client::paths::tests::{install, layout, FakeHost, FakePrompter};
    use std::fs;
    use std::io::Cursor;
    use std::path::PathBuf;

    fn setup(content: &str) -> (tempfile::TempDir, PathBuf, AppContext, FakePrompter) {
        let dir = tempfile::tempdir().unwrap();
        let drive = dir.path().join("C");
        let game = layout().default_install_dir(&drive);
        install(&game, content);

        let prompter = FakePrompter::default();
        let host = FakeHost { drives: vec![drive], ..Default::default() };
        let ctx = AppContext::new(Config::default(), Box::new(host), Box::new(prompter.clone()));
        (dir, layout().settings_path(&game), ctx, prompter)
    }

    #[test]
    fn test_list_marks_current() {
        let mut out = Vec::new();
        list_languages(&mut out, catalog::find_by_tag("pt_BR").ok()).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text.lines().count(), catalog::languages().len());
        assert!(text.lines().next().unwrap().starts_with("   1. en_US  English (US)"));
        assert!(text.contains("*  2. pt_BR  Português"));
    }

    #[test]
    fn test_show_current_unknown() {
        let (_dir, _path, mut ctx, _) = setup("region: \"EUW\"\n");
        let mut out = Vec::new();
        show_current(&mut ctx, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "unknown\n");
    }

    #[test]
    fn test_set_by_name_notifies() {
        let (_dir, path, mut ctx, prompter) = setup("other: 1\nlocale: \"tr_TR\"\nother2: 2\n");

        let change = set_language(&mut ctx, "Deutsch").unwrap();
        assert_eq!(change.new.tag, "de_DE");
        assert_eq!(
            fs::read_to_string(path).unwrap(),
            "other: 1\nlocale: \"de_DE\"\nother2: 2\n"
        );
        assert_eq!(
            prompter.calls(),
            vec!["notify Language changed from Türkçe to Deutsch."]
        );
    }

    #[test]
    fn test_set_unknown_language_writes_nothing() {
        let (_dir, path, mut ctx, prompter) = setup("locale: \"en_US\"\n");
        assert!(matches!(
            set_language(&mut ctx, "Klingon"),
            Err(CoreError::UnknownLanguage(_))
        ));
        assert_eq!(fs::read_to_string(path).unwrap(), "locale: \"en_US\"\n");
        assert!(prompter.calls().is_empty());
    }

    #[test]
    fn test_picker_retries_until_valid() {
        let (_dir, path, mut ctx, _) = setup("locale: \"en_US\"\n");
        let mut input = Cursor::new(b"99\nKlingon\n17\n".to_vec());
        let mut out = Vec::new();

        let change = pick_language(&mut ctx, &mut input, &mut out).unwrap().unwrap();
        assert_eq!(change.new.tag, "ja_JP");
        assert_eq!(fs::read_to_string(path).unwrap(), "locale: \"ja_JP\"\n");

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("*  1. en_US"));
        assert!(text.contains("Unknown language '99'."));
        assert!(text.contains("Unknown language 'Klingon'."));
    }

    #[test]
    fn test_picker_empty_input_cancels() {
        let (_dir, path, mut ctx, _) = setup("locale: \"en_US\"\n");
        let mut input = Cursor::new(b"\n".to_vec());
        let mut out = Vec::new();

        assert!(pick_language(&mut ctx, &mut input, &mut out).unwrap().is_none());
        assert_eq!(fs::read_to_string(path).unwrap(), "locale: \"en_US\"\n");
    }
}
