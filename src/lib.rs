pub mod commands;
pub mod config;
pub mod core;
pub mod result;
pub mod utils;

use crate::config::config::AbandonPolicy;
use crate::result::CoreError;
use tracing::{error, info};

/// 弹出原生错误框（非 Windows 平台输出到 stderr）
pub fn show_windows_error(title: &str, message: &str) {
    #[cfg(windows)]
    {
        use crate::utils::utils::to_wstr;
        use windows::core::PCWSTR;
        use windows::Win32::UI::WindowsAndMessaging::{MessageBoxW, MB_ICONERROR, MB_OK};

        let title = to_wstr(title);
        let message = to_wstr(message);
        unsafe {
            MessageBoxW(
                None,
                PCWSTR(message.as_ptr()),
                PCWSTR(title.as_ptr()),
                MB_OK | MB_ICONERROR,
            );
        }
    }

    #[cfg(not(windows))]
    eprintln!("{}: {}", title, message);
}

/// 根据错误类型决定退出码
///
/// 用户放弃查找安装目录时：`Exit` 策略静默退出 (0)，`Fatal` 策略记录并报告错误 (1)。
/// 其它错误都是致命的。
pub fn exit_code_for(err: &CoreError, policy: AbandonPolicy) -> i32 {
    match (err, policy) {
        (CoreError::DiscoveryAbandoned, AbandonPolicy::Exit) => {
            info!("Install folder search cancelled, exiting.");
            0
        }
        _ => {
            error!("Program failed: {}", err);
            1
        }
    }
}
