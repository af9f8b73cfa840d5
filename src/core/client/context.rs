use crate::config::config::Config;
use crate::core::client::catalog::{self, Language};
use crate::core::client::host::Host;
use crate::core::client::paths::{ClientLayout, PathResolver};
use crate::core::client::prompt::Prompter;
use crate::core::client::settings::{self, SettingsFile};
use crate::result::{CoreError, CoreResult};
use once_cell::unsync::OnceCell;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 一次语言修改的结果
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageChange {
    pub old: Option<&'static Language>,
    pub new: &'static Language,
    pub path: PathBuf,
}

impl LanguageChange {
    pub fn message(&self) -> String {
        format!(
            "Language changed from {} to {}.",
            self.old.map(|l| l.name).unwrap_or("unknown"),
            self.new.name
        )
    }
}

/// 进程内共享的状态：安装目录只查找一次，设置文件首次使用时读取
pub struct AppContext {
    config: Config,
    layout: ClientLayout,
    host: Box<dyn Host>,
    prompter: Box<dyn Prompter>,
    install_dir: OnceCell<PathBuf>,
    document: Option<String>,
    current: Option<&'static Language>,
}

impl AppContext {
    pub fn new(config: Config, host: Box<dyn Host>, prompter: Box<dyn Prompter>) -> Self {
        let layout = ClientLayout::from(&config.client);
        Self {
            config,
            layout,
            host,
            prompter,
            install_dir: OnceCell::new(),
            document: None,
            current: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn prompter(&self) -> &dyn Prompter {
        self.prompter.as_ref()
    }

    /// 安装目录，结果在整个进程内缓存
    pub fn resolve_path(&self) -> CoreResult<&Path> {
        let dir = self.install_dir.get_or_try_init(|| {
            PathResolver::new(
                &self.layout,
                self.config.discovery.heuristics,
                self.host.as_ref(),
                self.prompter.as_ref(),
            )
            .resolve()
        })?;
        Ok(dir.as_path())
    }

    fn settings_file(&self) -> CoreResult<SettingsFile> {
        let path = self.layout.settings_path(self.resolve_path()?);
        Ok(SettingsFile::new(path, self.config.settings.write_mode))
    }

    fn ensure_loaded(&mut self) -> CoreResult<()> {
        if self.document.is_none() {
            let text = self.settings_file()?.load()?;
            self.current = settings::extract_language(&text)?;
            info!(
                "Current client language: {}",
                self.current.map(|l| l.tag).unwrap_or("unknown")
            );
            self.document = Some(text);
        }
        Ok(())
    }

    /// 设置文件中的当前语言，`None` 表示未知
    pub fn current_language(&mut self) -> CoreResult<Option<&'static Language>> {
        self.ensure_loaded()?;
        Ok(self.current)
    }

    /// 写入新的语言标签，并从写入后的文本重新读取当前语言
    pub fn apply_language(&mut self, tag: &str) -> CoreResult<LanguageChange> {
        let language = catalog::find_by_tag(tag)?;
        self.ensure_loaded()?;

        let file = self.settings_file()?;
        let old = self.current;
        let document = self.document.as_deref().unwrap_or_default();
        let updated = settings::apply_language(document, language)
            .ok_or_else(|| CoreError::LocaleFieldMissing(file.path().to_path_buf()))?;

        file.save(&updated)?;
        self.current = settings::extract_language(&updated)?;
        self.document = Some(updated);
        debug!("Applied {} to {}", language.tag, file.path().display());

        let new = self
            .current
            .ok_or_else(|| CoreError::LocaleFieldMissing(file.path().to_path_buf()))?;
        Ok(LanguageChange {
            old,
            new,
            path: file.path().to_path_buf(),
        })
    }
}
