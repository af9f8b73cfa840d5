use crate::result::CoreResult;
use crate::utils::file_ops::app_subdir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// 安装目录查找策略：A = 启发式 + 手动选择，B = 仅手动选择
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum HeuristicsMode {
    #[default]
    Enabled,
    Disabled,
}

/// 用户放弃查找安装目录时的处理方式
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AbandonPolicy {
    /// 静默退出，退出码 0
    #[default]
    Exit,
    /// 弹出错误并以失败状态退出
    Fatal,
}

/// 设置文件的写入方式
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum WriteMode {
    /// 直接覆盖原文件
    #[default]
    Overwrite,
    /// 先写临时文件再重命名替换
    Atomic,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Launcher {
    pub debug: bool,
    pub console: bool, // 使用终端提示代替原生对话框
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct DiscoveryConfig {
    pub heuristics: HeuristicsMode,
    pub on_abandon: AbandonPolicy,
}

/// 客户端安装布局
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ClientConfig {
    pub vendor_folder: String,
    pub product_folder: String,
    pub shortcut_name: String,
    pub settings_file: String, // 相对安装目录，使用 '/' 分隔
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            vendor_folder: "Riot Games".to_string(),
            product_folder: "League of Legends".to_string(),
            shortcut_name: "League of Legends".to_string(),
            settings_file: "Config/LeagueClientSettings.yaml".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct SettingsConfig {
    pub write_mode: WriteMode,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Config {
    pub launcher: Launcher,
    pub discovery: DiscoveryConfig,
    pub client: ClientConfig,
    pub settings: SettingsConfig,
}

pub fn get_config_file_path() -> PathBuf {
    app_subdir("config").join("settings.toml")
}

pub fn get_default_config() -> Config {
    Config::default()
}

/// 读取配置文件，不存在时写入默认配置
pub fn read_config_from(config_file: &Path) -> CoreResult<Config> {
    ensure_config_file(config_file)?;

    let content = fs::read_to_string(config_file)?;

    let config: Config = match toml::from_str(&content) {
        Ok(parsed_config) => parsed_config,
        Err(err) => {
            error!("Failed to parse config on first attempt: {:?}", err);

            // 缺失或类型错误的键用默认值补齐，然后回写
            let default_config = get_default_config();
            if let Ok(existing_table) = toml::from_str::<toml::Table>(&content) {
                if let toml::Value::Table(default_table) = toml::Value::try_from(&default_config)? {
                    let merged_config = merge_tables(default_table, existing_table);
                    let updated_content = toml::to_string(&toml::Value::Table(merged_config))?;
                    fs::write(config_file, updated_content)?;
                }
            }

            let updated_content = fs::read_to_string(config_file)?;
            toml::from_str(&updated_content).unwrap_or_else(|second_err| {
                error!("Failed to parse config on second attempt: {:?}", second_err);
                get_default_config()
            })
        }
    };

    debug!("Read and updated config: {:?}", config);
    Ok(config)
}

fn ensure_config_file(config_file: &Path) -> CoreResult<()> {
    if let Some(dir) = config_file.parent() {
        fs::create_dir_all(dir)?;
    }
    if !config_file.exists() {
        write_config_to(config_file, &get_default_config())?;
    }
    Ok(())
}

fn merge_tables(
    mut default: toml::map::Map<String, toml::Value>,
    existing: toml::map::Map<String, toml::Value>,
) -> toml::map::Map<String, toml::Value> {
    for (key, existing_value) in existing {
        match default.get_mut(&key) {
            Some(default_value) => {
                if let (toml::Value::Table(default_table), toml::Value::Table(existing_table)) =
                    (default_value.clone(), existing_value.clone())
                {
                    // 递归合并嵌套表
                    *default_value = toml::Value::Table(merge_tables(default_table, existing_table));
                } else if std::mem::discriminant(&*default_value) == std::mem::discriminant(&existing_value) {
                    *default_value = existing_value;
                }
                // 类型不一致时保留默认值
            }
            None => {
                default.insert(key, existing_value);
            }
        }
    }
    default
}

pub fn write_config_to(config_file: &Path, config: &Config) -> CoreResult<()> {
    let toml_content = toml::to_string(config)?;
    fs::write(config_file, toml_content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config").join("settings.toml");

        let config = read_config_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.discovery.heuristics, HeuristicsMode::Enabled);
        assert_eq!(config.discovery.on_abandon, AbandonPolicy::Exit);
        assert_eq!(config.settings.write_mode, WriteMode::Overwrite);
        assert_eq!(config.client.settings_file, "Config/LeagueClientSettings.yaml");
    }

    #[test]
    fn test_partial_file_is_merged_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(
            &path,
            "[discovery]\nheuristics = \"disabled\"\n\n[settings]\nwrite_mode = \"atomic\"\n",
        )
        .unwrap();

        let config = read_config_from(&path).unwrap();
        assert_eq!(config.discovery.heuristics, HeuristicsMode::Disabled);
        assert_eq!(config.discovery.on_abandon, AbandonPolicy::Exit);
        assert_eq!(config.settings.write_mode, WriteMode::Atomic);
        assert_eq!(config.client.vendor_folder, "Riot Games");

        // 合并后的内容已经回写，可直接解析
        let rewritten = fs::read_to_string(&path).unwrap();
        assert!(toml::from_str::<Config>(&rewritten).is_ok());
    }

    #[test]
    fn test_wrong_typed_value_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "[launcher]\ndebug = \"yes\"\nconsole = true\n").unwrap();

        let config = read_config_from(&path).unwrap();
        assert!(!config.launcher.debug);
        assert!(config.launcher.console);
    }
}
