use std::iter::once;

pub fn to_wstr(s: &str) -> Vec<u16> {
    // 统一换行到 Windows 风格，避免对话框渲染异常
    let s = s.replace("\r\n", "\n").replace('\n', "\r\n");
    s.encode_utf16().chain(once(0)).collect()
}
