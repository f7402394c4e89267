use anyhow::{Context, Result};
use colored::Colorize;
use dcmaui_bridge::stub::StubContainer;
use dcmaui_bridge::{Bridge, BridgeConfig, Command, CommandOutput, PropertySet};
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

/// Replay a recorded command stream. Returns the number of failed commands.
///
/// One JSON command per line; blank lines and lines starting with `#` are
/// skipped. Events raised along the way are printed as they reach the sink.
pub fn replay(config: BridgeConfig, file: &Path, tree: bool, strict: bool) -> Result<usize> {
    let reader: Box<dyn BufRead> = if file.as_os_str() == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        let f = std::fs::File::open(file)
            .with_context(|| format!("failed to open {}", file.display()))?;
        Box::new(BufReader::new(f))
    };

    let mut bridge = Bridge::new(config)?;
    bridge.set_root_container(Box::new(StubContainer::new()));
    bridge.set_event_sink(Arc::new(print_event));

    let mut failures = 0;
    for (n, line) in reader.lines().enumerate() {
        let line = line.context("failed to read command stream")?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let lineno = n + 1;

        let command: Command = match serde_json::from_str(line) {
            Ok(command) => command,
            Err(err) => {
                failures += 1;
                println!("{} line {lineno}: unreadable command: {err}", "error".red());
                if strict {
                    break;
                }
                continue;
            }
        };

        let method = command.method();
        match bridge.execute(command) {
            Ok(output) => print_output(lineno, method, output),
            Err(err) => {
                failures += 1;
                println!(
                    "{} line {lineno}: {method} {}: {err}",
                    "error".red(),
                    err.code().yellow()
                );
                if strict {
                    break;
                }
            }
        }
    }

    // Flush whatever a queued bridge is still holding.
    bridge.dispatch_events();

    if tree {
        print!("{}", bridge.describe_tree());
    }
    Ok(failures)
}

fn print_output(lineno: usize, method: &str, output: CommandOutput) {
    match output {
        CommandOutput::Done => println!("{} line {lineno}: {method}", "ok".green()),
        CommandOutput::Dispatched(count) => {
            println!("{} line {lineno}: {method} ({count} events)", "ok".green())
        }
        CommandOutput::ViewInfo(info) => println!(
            "{} line {lineno}: {method} {}",
            "ok".green(),
            serde_json::to_string(&info).unwrap_or_default()
        ),
        CommandOutput::Tree(tree) => {
            println!("{} line {lineno}: {method}", "ok".green());
            print!("{tree}");
        }
    }
}

fn print_event(view_id: &str, event_type: &str, data: &PropertySet) {
    println!(
        "{} {view_id} {event_type} {}",
        "event".cyan(),
        serde_json::to_string(data).unwrap_or_default()
    );
}
