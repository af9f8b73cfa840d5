use std::cell::RefCell;
use std::io::{self, BufRead, Cursor, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

/// 与用户交互的对话框。关闭对话框一律视为“否”。
pub trait Prompter {
    /// “`folder` 是否为安装目录？”
    fn confirm_install_folder(&self, folder: &Path) -> bool;

    /// 选择文件夹，取消时返回 `None`
    fn pick_folder(&self, description: &str) -> Option<PathBuf>;

    /// 设置文件不存在，是否重新选择
    fn retry_missing_settings(&self, settings_file: &str) -> bool;

    fn notify_language_changed(&self, message: &str);

    fn show_error(&self, title: &str, message: &str);
}

pub const FOLDER_TITLE: &str = "League of Legends folder";
pub const FOLDER_DESCRIPTION: &str = "Select your League of Legends folder";

pub fn confirm_folder_question(folder: &Path) -> String {
    format!("Is '{}' your League of Legends installation folder?", folder.display())
}

pub fn missing_settings_question(settings_file: &str) -> String {
    format!(
        "Settings file '{}' not found. Do you want to select a new folder?",
        settings_file
    )
}

/// 按行读取输入
pub trait ReadLine {
    /// 与 `BufRead::read_line` 相同，返回 0 表示 EOF
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize>;
}

/// 标准输入。每次读取单独加锁并共用全局缓冲区，可同时交给多个使用者。
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinLines;

impl ReadLine for StdinLines {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        io::stdin().read_line(buf)
    }
}

impl<T: AsRef<[u8]>> ReadLine for Cursor<T> {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        BufRead::read_line(self, buf)
    }
}

/// 原生对话框
#[derive(Debug, Default, Clone, Copy)]
pub struct DialogPrompter;

impl Prompter for DialogPrompter {
    fn confirm_install_folder(&self, folder: &Path) -> bool {
        let answer = rfd::MessageDialog::new()
            .set_title(FOLDER_TITLE)
            .set_description(confirm_folder_question(folder))
            .set_level(rfd::MessageLevel::Info)
            .set_buttons(rfd::MessageButtons::YesNo)
            .show();
        answer == rfd::MessageDialogResult::Yes
    }

    fn pick_folder(&self, description: &str) -> Option<PathBuf> {
        rfd::FileDialog::new()
            .set_title(description)
            .set_can_create_directories(false)
            .pick_folder()
    }

    fn retry_missing_settings(&self, settings_file: &str) -> bool {
        let answer = rfd::MessageDialog::new()
            .set_title("Error")
            .set_description(missing_settings_question(settings_file))
            .set_level(rfd::MessageLevel::Error)
            .set_buttons(rfd::MessageButtons::YesNo)
            .show();
        answer == rfd::MessageDialogResult::Yes
    }

    fn notify_language_changed(&self, message: &str) {
        rfd::MessageDialog::new()
            .set_title("Success")
            .set_description(message)
            .set_level(rfd::MessageLevel::Info)
            .set_buttons(rfd::MessageButtons::Ok)
            .show();
    }

    fn show_error(&self, title: &str, message: &str) {
        rfd::MessageDialog::new()
            .set_title(title)
            .set_description(message)
            .set_level(rfd::MessageLevel::Error)
            .set_buttons(rfd::MessageButtons::Ok)
            .show();
    }
}

/// 终端交互，读写任意流
pub struct ConsolePrompter<R, W> {
    input: RefCell<R>,
    output: RefCell<W>,
}

impl ConsolePrompter<StdinLines, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(StdinLines, io::stdout())
    }
}

impl<R: ReadLine, W: Write> ConsolePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input: RefCell::new(input),
            output: RefCell::new(output),
        }
    }

    pub fn into_output(self) -> W {
        self.output.into_inner()
    }

    fn ask(&self, question: &str) -> Option<String> {
        let mut output = self.output.borrow_mut();
        if let Err(e) = write!(output, "{} ", question).and_then(|_| output.flush()) {
            warn!("Failed to write prompt: {}", e);
            return None;
        }

        let mut line = String::new();
        match self.input.borrow_mut().read_line(&mut line) {
            Ok(0) => None, // EOF
            Ok(_) => Some(line.trim().to_string()),
            Err(e) => {
                warn!("Failed to read answer: {}", e);
                None
            }
        }
    }

    fn ask_yes_no(&self, question: &str) -> bool {
        matches!(
            self.ask(&format!("{} [y/N]", question)).as_deref().map(str::to_lowercase).as_deref(),
            Some("y") | Some("yes")
        )
    }

    fn say(&self, message: &str) {
        if let Err(e) = writeln!(self.output.borrow_mut(), "{}", message) {
            warn!("Failed to write message: {}", e);
        }
    }
}

impl<R: ReadLine, W: Write> Prompter for ConsolePrompter<R, W> {
    fn confirm_install_folder(&self, folder: &Path) -> bool {
        self.ask_yes_no(&confirm_folder_question(folder))
    }

    fn pick_folder(&self, description: &str) -> Option<PathBuf> {
        // 资源管理器“复制为路径”会带上双引号
        self.ask(&format!("{}:", description))
            .map(|answer| answer.trim_matches('"').trim().to_string())
            .filter(|answer| !answer.is_empty())
            .map(PathBuf::from)
    }

    fn retry_missing_settings(&self, settings_file: &str) -> bool {
        self.ask_yes_no(&missing_settings_question(settings_file))
    }

    fn notify_language_changed(&self, message: &str) {
        self.say(message);
    }

    fn show_error(&self, title: &str, message: &str) {
        self.say(&format!("{}: {}", title, message));
    }
}
