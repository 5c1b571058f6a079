//! Interactive chat session.
//!
//! The session layer owns everything the stateless core does not: the
//! substance snapshot (materialized once at startup), the selected filters,
//! the conversation transcript, and the per-turn log fan-out.

use std::error::Error;
use std::io::{BufRead, Write};
use std::sync::Arc;

use ai_llm_service::service_profiles::LlmServiceProfiles;
use chat_core::{ChatConfig, ChatCore};
use chat_log::{ChatLogEntry, ChatLogger, CsvFileSink, SheetsSink};
use colored::Colorize;
use tracing::info;

/// One finished turn kept for transcript re-printing.
struct ChatTurn {
    question: String,
    answer: String,
}

/// Runs the REPL until `:quit` or end of input.
pub async fn run(svc: Arc<LlmServiceProfiles>) -> Result<(), Box<dyn Error>> {
    let core = ChatCore::new(ChatConfig::from_env(), svc)?;
    let logger = build_logger()?;

    // Session-immutable snapshot; rebuilt only on the next startup.
    let substances = core.store().substances().await?;
    info!("substance snapshot holds {} entries", substances.len());

    println!("Safety-sheet chatbot. {} substances indexed.", substances.len());
    println!("Commands: :list, :substances A;B, :history, :quit");

    let mut selected: Vec<String> = Vec::new();
    let mut history: Vec<ChatTurn> = Vec::new();

    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();

        match line {
            "" => continue,
            ":quit" | ":q" => break,
            ":list" => print_substances(&substances),
            ":history" => print_history(&history),
            _ if line.starts_with(":substances") => {
                selected = parse_selection(line, &substances);
                if selected.is_empty() {
                    println!("Substance filter cleared.");
                } else {
                    println!("Filtering by: {}", selected.join("; "));
                }
            }
            question => {
                let outcome = match core.answer_question(question, &selected).await {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        eprintln!("{}", format!("turn failed: {e}").red());
                        continue;
                    }
                };

                println!("{}", format!("You: {question}").blue());
                println!("{}", format!("Bot: {}", outcome.answer).green());

                let entry = ChatLogEntry::new(
                    selected.clone(),
                    question,
                    outcome.answer.clone(),
                    outcome.retrieved_files.clone(),
                );
                logger.append_all(&entry).await;

                history.push(ChatTurn {
                    question: question.to_string(),
                    answer: outcome.answer,
                });
            }
        }
    }

    Ok(())
}

/// Builds the log fan-out: the CSV file always, the spreadsheet when
/// configured. A configured spreadsheet without its credential is a startup
/// error, not a silent skip.
fn build_logger() -> Result<ChatLogger, Box<dyn Error>> {
    let mut logger = ChatLogger::new();

    let path = std::env::var("CHAT_LOG_PATH").unwrap_or_else(|_| "chat_log.csv".to_string());
    logger.push(Box::new(CsvFileSink::new(path)));

    if let Ok(spreadsheet_id) = std::env::var("SHEETS_SPREADSHEET_ID") {
        if !spreadsheet_id.trim().is_empty() {
            let token = std::env::var("SHEETS_ACCESS_TOKEN").map_err(|_| {
                "SHEETS_ACCESS_TOKEN must be set when SHEETS_SPREADSHEET_ID is configured"
            })?;
            logger.push(Box::new(SheetsSink::new(spreadsheet_id, token)));
        }
    }

    info!("{} chat-log sink(s) configured", logger.len());
    Ok(logger)
}

/// Parses `:substances A;B;C` against the snapshot, preserving input order.
/// Unknown names are dropped with a notice.
fn parse_selection(line: &str, substances: &[String]) -> Vec<String> {
    let rest = line.trim_start_matches(":substances").trim();
    let mut selected = Vec::new();
    for raw in rest.split(';') {
        let name = raw.trim();
        if name.is_empty() {
            continue;
        }
        if substances.iter().any(|s| s == name) {
            selected.push(name.to_string());
        } else {
            println!("Unknown substance: {name}");
        }
    }
    selected
}

fn print_substances(substances: &[String]) {
    if substances.is_empty() {
        println!("No substances indexed yet; run `sds-chat ingest <dir>` first.");
        return;
    }
    for s in substances {
        println!("  {s}");
    }
}

fn print_history(history: &[ChatTurn]) {
    for turn in history {
        println!("{}", format!("You: {}", turn.question).blue());
        println!("{}", format!("Bot: {}", turn.answer).green());
    }
}
