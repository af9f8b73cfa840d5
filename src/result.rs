use std::path::PathBuf;
use thiserror::Error;

/// 核心错误类型
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 设置文件中的语言标签不在目录里（文件损坏或不支持的语言）
    #[error("Locale '{0}' is not in the language catalog")]
    CatalogLookup(String),

    /// 用户放弃继续查找安装目录
    #[error("Installation folder search abandoned by user")]
    DiscoveryAbandoned,

    #[error("No locale field found in {0}")]
    LocaleFieldMissing(PathBuf),

    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for CoreError {
    fn from(err: toml::de::Error) -> Self {
        CoreError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for CoreError {
    fn from(err: toml::ser::Error) -> Self {
        CoreError::Config(err.to_string())
    }
}

/// 核心结果类型
pub type CoreResult<T = ()> = Result<T, CoreError>;
