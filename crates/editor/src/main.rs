use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use scene_editor_lib::command::{execute_json, execute_json_batch, CommandResponse};
use scene_editor_lib::state::EditorSettings;
use scene_editor_lib::EditorSession;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scene_editor=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = match parse_path_arg("--settings") {
        Some(path) => EditorSettings::load_from(&path).unwrap_or_else(|e| {
            tracing::error!("{e}");
            EditorSettings::default()
        }),
        None => EditorSettings::load(),
    };
    let mut session = EditorSession::new(settings);

    match parse_path_arg("--script") {
        Some(path) => run_script(&mut session, &path),
        None => run_stdin(&mut session),
    }
}

/// Execute a JSON array of commands from a file
fn run_script(session: &mut EditorSession, path: &Path) {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!("Failed to read script {}: {e}", path.display());
            std::process::exit(1);
        }
    };
    match execute_json_batch(session, &json) {
        Ok(responses) => {
            tracing::info!("Ran {} commands from {}", responses.len(), path.display());
            for response in &responses {
                print_response(response);
            }
        }
        Err(e) => {
            print_response(&CommandResponse::err(e));
            std::process::exit(1);
        }
    }
}

/// Execute one JSON command per line until EOF
fn run_stdin(session: &mut EditorSession) {
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::error!("Failed to read stdin: {e}");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        let response = execute_json(session, &line).unwrap_or_else(CommandResponse::err);
        print_response(&response);
    }
}

fn print_response(response: &CommandResponse) {
    let json = serde_json::to_string(response).unwrap_or_default();
    let mut stdout = std::io::stdout().lock();
    if let Err(e) = writeln!(stdout, "{json}").and_then(|()| stdout.flush()) {
        tracing::error!("Failed to write response: {e}");
    }
}

fn parse_path_arg(flag: &str) -> Option<PathBuf> {
    let args: Vec<String> = std::env::args().collect();
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|i| args.get(i + 1))
        .map(PathBuf::from)
}
