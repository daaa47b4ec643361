
use tokio::runtime::Runtime;

use std::thread;

use crate::databases::*;
use crate::utility::logger::Logger;
use crate::utility::traits::Singleton;


#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Keys,
    Get(String),
    GetAll(String),
    Set(String, String),
    Append(String, String),
    Remove(String),
}

/// `ls`, `get <key>`, `get all <key>`, `set <key> <value...>`, `append <key> <value...>`, `rm <key>`.
pub fn parse_console(line: &str) -> Result<ConsoleCommand, String> {
    let words = line.split_whitespace().collect::<Vec<_>>();
    let value = || words[2..].join(" ");
    match words.as_slice() {
        ["ls"] | ["get"]                 => Ok(ConsoleCommand::Keys),
        ["get", "all", key]              => Ok(ConsoleCommand::GetAll(key.to_string())),
        ["get", key]                     => Ok(ConsoleCommand::Get(key.to_string())),
        ["set", key, _, ..]              => Ok(ConsoleCommand::Set(key.to_string(), value())),
        ["append", key, _, ..]           => Ok(ConsoleCommand::Append(key.to_string(), value())),
        ["rm", key]                      => Ok(ConsoleCommand::Remove(key.to_string())),
        ["set" | "append", ..]           => Err("Too few parameters".to_string()),
        ["get" | "rm", ..]               => Err("Too many parameters".to_string()),
        []                               => Err("Empty command".to_string()),
        [other, ..]                      => Err(format!("Unknown command `{}`", other)),
    }
}

async fn run_console_command(database: &ConfigDB, command: ConsoleCommand) {
    match command {
        ConsoleCommand::Keys => match database.get_keys().await {
            Ok(keys) => Logger::info_long("Keys", &keys.join(", ")),
            Err(why) => Logger::err(&why),
        },
        ConsoleCommand::Get(key) => match database.get(&key).await {
            Ok(entry) => Logger::info_long(&format!("Value of {}", key), &entry.value),
            Err(why)  => Logger::err(&why),
        },
        ConsoleCommand::GetAll(key) => match database.get_all(&key).await {
            Ok(entries) => {
                let values = entries.iter().map(|entry| entry.value.as_str()).collect::<Vec<_>>();
                Logger::info_long(&format!("Values of {}", key), &values.join(", "));
            }
            Err(why) => Logger::err(&why),
        },
        ConsoleCommand::Set(key, value) => match database.set(&key, &value).await {
            Ok(())   => Logger::info_long(&format!("Set value for {}", key), &value),
            Err(why) => Logger::err(&why),
        },
        ConsoleCommand::Append(key, value) => match database.append(&key, &value).await {
            Ok(())   => Logger::info_long(&format!("Appended value to {}", key), &value),
            Err(why) => Logger::err(&why),
        },
        ConsoleCommand::Remove(key) => match database.delete(&key).await {
            Ok(())   => Logger::info_long("Removed key", &key),
            Err(why) => Logger::err(&why),
        },
    }
}

/// Reads configuration commands from stdin on a dedicated thread until stdin closes.
pub fn spawn_console() {
    thread::spawn(|| {
        let runtime = match Runtime::new() {
            Ok(runtime) => runtime,
            Err(why) => {
                Logger::err_long("Could not start console", &why.to_string());
                return;
            }
        };
        Logger::info_long("Connected to database", "config");
        runtime.block_on(async {
            while let Some(line) = Logger::input("Enter a command") {
                match parse_console(&line) {
                    Ok(command) => run_console_command(ConfigDB::get_instance(), command).await,
                    Err(why)    => Logger::warn(&why),
                }
            }
        });
    });
}
