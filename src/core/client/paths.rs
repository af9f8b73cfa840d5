use crate::config::config::{ClientConfig, HeuristicsMode};
use crate::core::client::host::Host;
use crate::core::client::prompt::{Prompter, FOLDER_DESCRIPTION};
use crate::result::{CoreError, CoreResult};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// 客户端在磁盘上的布局
#[derive(Debug, Clone)]
pub struct ClientLayout {
    pub vendor_folder: String,
    pub product_folder: String,
    pub shortcut_name: String,
    pub settings_file: String,
}

impl From<&ClientConfig> for ClientLayout {
    fn from(config: &ClientConfig) -> Self {
        Self {
            vendor_folder: config.vendor_folder.clone(),
            product_folder: config.product_folder.clone(),
            shortcut_name: config.shortcut_name.clone(),
            settings_file: config.settings_file.clone(),
        }
    }
}

impl ClientLayout {
    /// `folder` 下设置文件的完整路径
    pub fn settings_path(&self, folder: &Path) -> PathBuf {
        self.settings_file
            .split(['/', '\\'])
            .filter(|part| !part.is_empty())
            .fold(folder.to_path_buf(), |path, part| path.join(part))
    }

    /// 设置文件存在且可读
    pub fn has_settings_file(&self, folder: &Path) -> bool {
        if folder.as_os_str().is_empty() {
            return false;
        }
        let path = self.settings_path(folder);
        path.is_file() && File::open(&path).is_ok()
    }

    /// 驱动器上的默认安装路径 `<drive>\<vendor>\<product>`
    pub fn default_install_dir(&self, drive: &Path) -> PathBuf {
        drive.join(&self.vendor_folder).join(&self.product_folder)
    }
}

/// 系统盘优先，其余按盘符名排序
pub fn order_drives(mut drives: Vec<PathBuf>, system_dir: Option<&Path>) -> Vec<PathBuf> {
    let is_system = |drive: &Path| system_dir.is_some_and(|dir| dir.starts_with(drive));
    drives.sort_by_cached_key(|d| (!is_system(d), d.to_string_lossy().to_lowercase()));
    drives
}

/// 查找包含设置文件的安装目录
pub struct PathResolver<'a> {
    layout: &'a ClientLayout,
    mode: HeuristicsMode,
    host: &'a dyn Host,
    prompter: &'a dyn Prompter,
}

impl<'a> PathResolver<'a> {
    pub fn new(
        layout: &'a ClientLayout,
        mode: HeuristicsMode,
        host: &'a dyn Host,
        prompter: &'a dyn Prompter,
    ) -> Self {
        Self { layout, mode, host, prompter }
    }

    pub fn resolve(&self) -> CoreResult<PathBuf> {
        if self.mode == HeuristicsMode::Enabled {
            if let Some(folder) = self.from_shortcut() {
                info!("Install folder found via desktop shortcut: {}", folder.display());
                return Ok(folder);
            }
            if let Some(folder) = self.from_drives() {
                info!("Install folder found on fixed drive: {}", folder.display());
                return Ok(folder);
            }
        }

        self.from_picker()
    }

    fn from_shortcut(&self) -> Option<PathBuf> {
        let target = self.host.desktop_shortcut_target(&self.layout.shortcut_name)?;
        let folder = target.parent()?.to_path_buf();
        debug!("Desktop shortcut points into {}", folder.display());
        self.layout.has_settings_file(&folder).then_some(folder)
    }

    fn from_drives(&self) -> Option<PathBuf> {
        let system_dir = self.host.system_directory();
        let candidates: Vec<PathBuf> = order_drives(self.host.fixed_drives(), system_dir.as_deref())
            .iter()
            .map(|drive| self.layout.default_install_dir(drive))
            .filter(|folder| self.layout.has_settings_file(folder))
            .collect();
        debug!("Drive candidates with settings file: {:?}", candidates);

        match candidates.as_slice() {
            [] => None,
            [only] => Some(only.clone()),
            many => many
                .iter()
                .find(|folder| self.prompter.confirm_install_folder(folder))
                .cloned(),
        }
    }

    fn from_picker(&self) -> CoreResult<PathBuf> {
        loop {
            if let Some(selected) = self.prompter.pick_folder(FOLDER_DESCRIPTION) {
                if self.layout.has_settings_file(&selected) {
                    return Ok(selected);
                }

                let nested = selected.join(&self.layout.product_folder);
                if self.layout.has_settings_file(&nested) {
                    return Ok(nested);
                }
                warn!("No settings file under {}", selected.display());
            }

            if !self.prompter.retry_missing_settings(&self.layout.settings_file) {
                info!("User abandoned the install folder search");
                return Err(CoreError::DiscoveryAbandoned);
            }
        }
    }
}
