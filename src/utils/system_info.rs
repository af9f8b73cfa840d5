use sysinfo::System;

/// 启动日志使用的系统摘要
pub fn describe_system() -> String {
    let sys_name = System::name().unwrap_or_else(|| "Unknown system".to_string());
    let kernel_version = System::kernel_version().unwrap_or_else(|| "Unknown kernel".to_string());
    let os_version = System::os_version().unwrap_or_else(|| "Unknown OS version".to_string());

    format!(
        "System: {} | Kernel: {} | OS Version: {} | CPU Architecture: {}",
        sys_name,
        kernel_version,
        os_version,
        std::env::consts::ARCH
    )
}
