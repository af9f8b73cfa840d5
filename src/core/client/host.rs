use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// 安装目录查找所依赖的系统信息，测试中可替换
pub trait Host {
    /// 固定（不可移动）驱动器的根目录
    fn fixed_drives(&self) -> Vec<PathBuf>;

    /// 系统目录，例如 `C:\Windows\System32`
    fn system_directory(&self) -> Option<PathBuf>;

    /// 桌面上名为 `name` 的快捷方式所指向的目标
    fn desktop_shortcut_target(&self, name: &str) -> Option<PathBuf>;
}

/// 真实系统实现
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemHost;

impl Host for SystemHost {
    fn fixed_drives(&self) -> Vec<PathBuf> {
        let drives = platform::fixed_drives();
        debug!("Fixed drives: {:?}", drives);
        drives
    }

    fn system_directory(&self) -> Option<PathBuf> {
        platform::system_directory()
    }

    fn desktop_shortcut_target(&self, name: &str) -> Option<PathBuf> {
        let desktop = dirs::desktop_dir()?;
        platform::shortcut_target(&desktop, name)
    }
}

#[cfg(windows)]
mod platform {
    use super::*;
    use windows::core::{Interface, HSTRING};
    use windows::Win32::Storage::FileSystem::{GetDriveTypeW, GetLogicalDrives};
    use windows::Win32::System::Com::{
        CoCreateInstance, CoInitializeEx, CoUninitialize, IPersistFile, CLSCTX_INPROC_SERVER,
        COINIT_APARTMENTTHREADED, STGM_READ,
    };
    use windows::Win32::System::SystemInformation::GetSystemDirectoryW;
    use windows::Win32::UI::Shell::{IShellLinkW, ShellLink};

    // GetDriveTypeW 返回值
    const DRIVE_FIXED: u32 = 3;
    const MAX_PATH: usize = 260;

    pub fn fixed_drives() -> Vec<PathBuf> {
        let mask = unsafe { GetLogicalDrives() };
        (0..26u8)
            .filter(|i| mask & (1u32 << i) != 0)
            .map(|i| format!("{}:\\", (b'A' + i) as char))
            .filter(|root| unsafe { GetDriveTypeW(&HSTRING::from(root.as_str())) } == DRIVE_FIXED)
            .map(PathBuf::from)
            .collect()
    }

    pub fn system_directory() -> Option<PathBuf> {
        let mut buf = [0u16; MAX_PATH];
        let len = unsafe { GetSystemDirectoryW(Some(&mut buf)) } as usize;
        if len == 0 || len > buf.len() {
            return None;
        }
        Some(PathBuf::from(String::from_utf16_lossy(&buf[..len])))
    }

    pub fn shortcut_target(desktop: &Path, name: &str) -> Option<PathBuf> {
        let lnk = desktop.join(format!("{}.lnk", name));
        if !lnk.is_file() {
            return None;
        }

        match resolve_lnk(&lnk) {
            Ok(target) if !target.as_os_str().is_empty() => Some(target),
            Ok(_) => None,
            Err(e) => {
                warn!("Failed to resolve shortcut {}: {}", lnk.display(), e);
                None
            }
        }
    }

    fn resolve_lnk(lnk: &Path) -> windows::core::Result<PathBuf> {
        unsafe {
            let init = CoInitializeEx(None, COINIT_APARTMENTTHREADED);

            let result = (|| -> windows::core::Result<PathBuf> {
                let link: IShellLinkW = CoCreateInstance(&ShellLink, None, CLSCTX_INPROC_SERVER)?;
                let persist: IPersistFile = link.cast()?;
                persist.Load(&HSTRING::from(lnk.to_string_lossy().as_ref()), STGM_READ)?;

                let mut buf = [0u16; MAX_PATH];
                link.GetPath(&mut buf, std::ptr::null_mut(), 0)?;
                let len = buf.iter().position(|&c| c == 0).unwrap_or(buf.len());
                Ok(PathBuf::from(String::from_utf16_lossy(&buf[..len])))
            })();

            if init.is_ok() {
                CoUninitialize();
            }
            result
        }
    }
}

#[cfg(not(windows))]
mod platform {
    use super::*;
    use sysinfo::Disks;

    pub fn fixed_drives() -> Vec<PathBuf> {
        let disks = Disks::new_with_refreshed_list();
        let mut roots: Vec<PathBuf> = disks
            .list()
            .iter()
            .filter(|d| !d.is_removable())
            .map(|d| d.mount_point().to_path_buf())
            .collect();
        roots.sort();
        roots.dedup();
        roots
    }

    pub fn system_directory() -> Option<PathBuf> {
        Some(PathBuf::from("/"))
    }

    // 桌面上的符号链接视为快捷方式
    pub fn shortcut_target(desktop: &Path, name: &str) -> Option<PathBuf> {
        let link = desktop.join(name);
        match std::fs::read_link(&link) {
            Ok(target) if target.is_relative() => Some(desktop.join(target)),
            Ok(target) => Some(target),
            Err(e) => {
                if link.exists() {
                    warn!("Failed to read shortcut {}: {}", link.display(), e);
                }
                None
            }
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_desktop_symlink_is_a_shortcut() {
        let dir = tempfile::tempdir().unwrap();
        let game = dir.path().join("Riot Games").join("League of Legends");
        std::fs::create_dir_all(&game).unwrap();
        let exe = game.join("LeagueClient");
        std::fs::write(&exe, "").unwrap();

        let desktop = dir.path().join("Desktop");
        std::fs::create_dir_all(&desktop).unwrap();
        std::os::unix::fs::symlink(&exe, desktop.join("League of Legends")).unwrap();

        assert_eq!(platform::shortcut_target(&desktop, "League of Legends"), Some(exe));
        assert_eq!(platform::shortcut_target(&desktop, "Valorant"), None);
    }

    #[test]
    fn test_root_is_system_drive() {
        assert_eq!(SystemHost.system_directory(), Some(PathBuf::from("/")));
    }
}
