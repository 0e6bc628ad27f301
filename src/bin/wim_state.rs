use anyhow::{anyhow, Result};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use wim_os_lib::{FileSlot, ManagerConfig, PersistenceAdapter};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() -> Result<()> {
    wim_os_lib::init_tracing();

    let mut args: Vec<String> = env::args().skip(1).collect();
    let dir = take_option(&mut args, "--dir")?
        .map(PathBuf::from)
        .unwrap_or_else(FileSlot::default_dir);
    let config = ManagerConfig::load(&ManagerConfig::default_path());

    let slot = FileSlot::new(dir);
    let Some(command) = args.first() else {
        print_help();
        return Ok(());
    };

    match command.as_str() {
        "show" => show(&slot, &config)?,
        "clear" => {
            adapter(&slot, &config).clear()?;
            println!("Cleared {}", slot.path_for(&config.storage_key).display());
        }
        "path" => println!("{}", slot.path_for(&config.storage_key).display()),
        "version" | "-v" | "--version" => println!("wim-state {}", VERSION),
        "help" | "-h" | "--help" => print_help(),
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_help();
            std::process::exit(1);
        }
    }

    Ok(())
}

fn adapter(slot: &FileSlot, config: &ManagerConfig) -> PersistenceAdapter {
    PersistenceAdapter::new(Arc::new(slot.clone()), config.storage_key.clone())
}

fn show(slot: &FileSlot, config: &ManagerConfig) -> Result<()> {
    let entries = adapter(slot, config).load();
    if entries.is_empty() {
        println!("No saved windows");
        return Ok(());
    }

    println!("{:<40} {:<10} {:<24} {:>14} {:>12}", "ID", "KIND", "TITLE", "POSITION", "SIZE");
    for entry in &entries {
        let title = if entry.is_maximized {
            format!("{} [max]", entry.title)
        } else {
            entry.title.clone()
        };
        println!(
            "{:<40} {:<10} {:<24} {:>14} {:>12}",
            entry.id,
            entry.kind,
            title,
            format!("{},{}", entry.position.x, entry.position.y),
            format!("{}x{}", entry.size.width, entry.size.height),
        );
    }
    Ok(())
}

/// Remove `--name <value>` from `args`, returning the value
fn take_option(args: &mut Vec<String>, name: &str) -> Result<Option<String>> {
    let Some(index) = args.iter().position(|a| a == name) else {
        return Ok(None);
    };
    if index + 1 >= args.len() {
        return Err(anyhow!("{} requires a value", name));
    }
    let value = args.remove(index + 1);
    args.remove(index);
    Ok(Some(value))
}

fn print_help() {
    println!(
        r#"wim-state - Inspect the saved WIM OS window session

USAGE:
    wim-state [--dir <path>] <command>

COMMANDS:
    show       List the windows that will be restored next session
    clear      Forget the saved session
    path       Print the file holding the saved session
    version    Print version information
    help       Print this help message

EXAMPLES:
    wim-state show
    wim-state --dir ~/.local/share/wim-os clear
"#
    );
}
