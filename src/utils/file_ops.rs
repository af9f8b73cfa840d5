use crate::config::config::WriteMode;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

pub fn exe_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn app_dir() -> PathBuf {
    exe_dir().join("LanguageChanger")
}

pub fn app_subdir<P: AsRef<Path>>(rel: P) -> PathBuf {
    app_dir().join(rel)
}

pub fn create_initial_directories() {
    let dirs = [app_dir(), app_subdir("logs"), app_subdir("config")];

    for dir in dirs {
        if let Err(e) = fs::create_dir_all(&dir) {
            eprintln!("Failed to create directory '{}': {}", dir.display(), e);
        }
    }
}

/// 将文本完整写入 `path`
///
/// `Overwrite` 直接截断原文件后写入；`Atomic` 先写入同目录下的临时文件，
/// 刷盘后再重命名覆盖原文件，中途失败时原文件保持不变。
pub fn write_text(path: &Path, content: &str, mode: WriteMode) -> io::Result<()> {
    match mode {
        WriteMode::Overwrite => fs::write(path, content),
        WriteMode::Atomic => {
            let tmp_path = temp_sibling(path);
            debug!("Writing {} via {}", path.display(), tmp_path.display());

            let result = (|| -> io::Result<()> {
                let mut file = fs::File::create(&tmp_path)?;
                file.write_all(content.as_bytes())?;
                file.sync_all()?;
                fs::rename(&tmp_path, path)
            })();

            if result.is_err() {
                let _ = fs::remove_file(&tmp_path);
            }
            result
        }
    }
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
