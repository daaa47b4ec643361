
use colored::*;

use std::io::{self, Write};


pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    fn label(&self) -> ColoredString {
        match self {
            Level::Debug => "DEBUG".truecolor(120, 120, 255),
            Level::Info  => "INFO".green(),
            Level::Warn  => "WARN".truecolor(255, 130, 0),
            Level::Error => "ERROR".truecolor(255, 20, 0),
        }
    }
}

pub struct Logger {}

impl Logger {

    fn log(level: Level, label: &str, content: Option<&str>, inline: bool) {
        let time = chrono::Local::now().format("%H:%M:%S").to_string();
        let content = match content {
            Some(content) => format!("{}: {}", label.truecolor(140, 140, 140), content),
            None          => label.to_string()
        };
        let line = format!("{} [{}] {}", time.dimmed(), level.label(), content);
        match (inline, level) {
            (true, _)                         => print!("{}", line),
            (false, Level::Warn | Level::Error) => eprintln!("{}", line),
            (false, _)                        => println!("{}", line),
        }
    }

    #[allow(unused)]
    pub fn debug(label: &str, content: &str) {
        #[cfg(feature = "debug")]
        Logger::log(Level::Debug, label, Some(content), false);
    }

    #[allow(unused)]
    pub fn info(label: &str) {
        Logger::log(Level::Info, label, None, false);
    }

    #[allow(unused)]
    pub fn warn(label: &str) {
        Logger::log(Level::Warn, label, None, false);
    }

    #[allow(unused)]
    pub fn err(label: &str) {
        Logger::log(Level::Error, label, None, false);
    }

    #[allow(unused)]
    pub fn info_long(label: &str, content: &str) {
        Logger::log(Level::Info, label, Some(content), false);
    }

    #[allow(unused)]
    pub fn warn_long(label: &str, content: &str) {
        Logger::log(Level::Warn, label, Some(content), false);
    }

    #[allow(unused)]
    pub fn err_long(label: &str, content: &str) {
        Logger::log(Level::Error, label, Some(content), false);
    }

    /// Prompts on stdout and reads one trimmed line; `None` once stdin is closed.
    #[allow(unused)]
    pub fn input(label: &str) -> Option<String> {
        Logger::log(Level::Info, label, Some(""), true);
        let _ = io::stdout().flush();
        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) | Err(_) => None,
            Ok(_)          => Some(input.trim().to_string()),
        }
    }

}
