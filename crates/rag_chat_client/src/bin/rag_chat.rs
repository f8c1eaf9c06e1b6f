//! rag-chat: terminal chat front-end for the RAG answer service.
//! Reads config, starts the health probe, and runs an interactive chat loop
//! on stdin/stdout. With a positional question argument it submits once,
//! prints the reply, and exits.

use std::io::Write as _;
use std::path::PathBuf;
use std::process;
use std::sync::{Arc, Mutex};

use rag_chat_client::{config, ApiClient, ChatController, HealthMonitor, Sender, SessionState};
use tokio::io::AsyncBufReadExt;

fn resolve_config_path(args: &[String]) -> PathBuf {
    // 1. --config <path> flag
    if let Some(pos) = args.iter().position(|a| a == "--config") {
        if let Some(path) = args.get(pos + 1) {
            return PathBuf::from(path);
        }
    }
    // 2. RAG_CHAT_CONFIG env var
    if let Ok(val) = std::env::var("RAG_CHAT_CONFIG") {
        return PathBuf::from(val);
    }
    // 3. Default path (~/.rag-chat/config.yaml)
    config::default_config_path().unwrap_or_else(|| {
        eprintln!("Error: unable to determine config path (set --config or RAG_CHAT_CONFIG)");
        process::exit(1);
    })
}

/// First argument that is not the --config flag or its value: the one-shot
/// question.
fn positional_question(args: &[String]) -> Option<String> {
    let mut skip_next = false;
    for arg in &args[1..] {
        if skip_next {
            skip_next = false;
            continue;
        }
        if arg == "--config" {
            skip_next = true;
            continue;
        }
        return Some(arg.clone());
    }
    None
}

/// Print bot entries appended since `printed`, advancing it past every
/// entry seen. User entries are skipped: the user already typed them.
fn print_new_bot_entries(state: &Arc<Mutex<SessionState>>, printed: &mut usize) {
    let state = state.lock().expect("session state lock poisoned");
    let transcript = state.transcript();
    for entry in &transcript[*printed..] {
        if entry.sender == Sender::Bot {
            println!("{}", entry.text);
        }
    }
    *printed = transcript.len();
}

fn print_prompt(state: &Arc<Mutex<SessionState>>) {
    let online = state
        .lock()
        .expect("session state lock poisoned")
        .is_server_online();
    let status = if online { "online" } else { "offline" };
    print!("[{}] > ", status);
    let _ = std::io::stdout().flush();
}

#[tokio::main]
async fn main() {
    // Diagnostics go to stderr so they never interleave with the chat;
    // silent unless RUST_LOG is set.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let config_path = resolve_config_path(&args);

    let cfg = match config::load(&config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!(
                "Error: failed to load config from {}: {}",
                config_path.display(),
                e
            );
            process::exit(1);
        }
    };

    let base_url = match cfg.api.base_url.as_deref() {
        Some(url) if !url.trim().is_empty() => url.to_string(),
        _ => {
            eprintln!("Error: api.base_url missing in {}", config_path.display());
            process::exit(1);
        }
    };

    let api = ApiClient::new(&base_url);
    let controller = ChatController::new(api.clone());
    let state = controller.state();
    let monitor = HealthMonitor::start(api, controller.state(), cfg.probe_interval());

    let mut printed = 0usize;

    // One-shot mode: submit the positional question and print the reply.
    if let Some(question) = positional_question(&args) {
        controller.submit(&question).await;
        print_new_bot_entries(&state, &mut printed);
        monitor.stop();
        return;
    }

    if state
        .lock()
        .expect("session state lock poisoned")
        .show_welcome()
    {
        println!("Welcome to the chat! Start a conversation to begin.");
    }

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    print_prompt(&state);
    while let Ok(Some(line)) = lines.next_line().await {
        if line.trim().is_empty() {
            print_prompt(&state);
            continue;
        }
        {
            let mut state = state.lock().expect("session state lock poisoned");
            state.set_draft(line.as_str());
        }
        println!("Thinking...");
        controller.submit(&line).await;
        print_new_bot_entries(&state, &mut printed);
        print_prompt(&state);
    }

    monitor.stop();
}
