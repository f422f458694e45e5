/*!
# diary - a plain-text daily journal

Each day gets its own entry file, named from the date by a configurable
format. A new entry is seeded from the most recent entry of the previous two
weeks: section headings are copied, todos are carried over unchecked and
everything else is left behind.

## Usage

```text
diary [OPTIONS] [COMMAND]

Commands:
  create  Create today's entry from the latest previous one and print its path
  write   Create today's entry if needed and open it in your editor
  help    Print this message or the help of the given subcommand(s)

Options:
  -v, --verbose                  Print verbose output
      --log-format <LOG_FORMAT>  Format of diagnostic logs on stderr [env: DIARY_LOG_FORMAT=] [default: text]
  -h, --help                     Print help
  -V, --version                  Print version
```

## Configuration

- `DIARY_CONFIG`: the TOML configuration file (defaults to `diary.toml`)
- `DIARY_EDITOR` or `EDITOR`: the editor for `write` (defaults to `nano`)
- `RUST_LOG`: overrides the log filter
*/

use chrono::{Local, NaiveDate};
use clap::CommandFactory;
use diary::cli::{CliArgs, Command};
use diary::config::Config;
use diary::editor::SystemEditor;
use diary::errors::AppResult;
use diary::journal_io::FileSystemStore;
use diary::{logging, ops};
use std::process::ExitCode;
use tracing::debug;

fn main() -> ExitCode {
    // Obtain the current date once at the beginning
    let today = Local::now().date_naive();

    let args = CliArgs::parse();
    logging::init(args.verbose, args.log_format);
    debug!("CLI arguments: {:?}", args);

    match run(args, today) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Logged once here, at the application boundary
            debug!("Command failed: {:?}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: CliArgs, today: NaiveDate) -> AppResult<()> {
    let Some(command) = args.command else {
        CliArgs::command().print_help()?;
        return Ok(());
    };

    let config = Config::load()?;
    debug!("Loaded configuration: {:?}", config);
    let store = FileSystemStore::from_config(&config);

    match command {
        Command::Create => {
            let outcome = ops::create_todays_entry(&config, &store, today)?;
            println!("{}", outcome.path.display());
        }
        Command::Write => {
            let editor = SystemEditor::from_env()?;
            ops::write_todays_entry(&config, &store, &editor, today)?;
        }
    }

    Ok(())
}
