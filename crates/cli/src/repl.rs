//! Interactive question loop and one-shot answering.
//!
//! The loop reads one question per line, skips blank input, and exits on
//! `quit`/`exit` (case-insensitive) or end of input. Failures arrive as
//! normal answers, so the loop keeps serving after any of them.

use grounded_core::{AppError, AppResult};
use grounded_llm::{AnswerService, Source};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Answer a single question and print the result.
pub async fn ask_once(service: &AnswerService, question: &str, json: bool) -> AppResult<()> {
    if question.trim().is_empty() {
        return Err(AppError::Config("No question provided".to_string()));
    }

    let answer = service.answer(question).await;

    if json {
        let output = serde_json::json!({
            "answer": answer.text,
            "sources": answer.sources,
        });

        let json = serde_json::to_string_pretty(&output)
            .map_err(|e| AppError::Serialization(e.to_string()))?;
        println!("{}", json);
    } else {
        println!("{}", answer.text);
        print_sources(&answer.sources);
    }

    Ok(())
}

/// Run the interactive question loop until quit/exit or end of input.
pub async fn run(service: &AnswerService, model: &str) -> AppResult<()> {
    println!("{}", "-".repeat(50));
    println!("Welcome to the Grounded Q&A system");
    println!("Model: {} (web-search grounding enabled)", model);
    println!("{}", "-".repeat(50));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("\nEnter your question (or type 'quit' to exit):\n> ");
        std::io::stdout().flush()?;

        // None means end of input; treat it like quit
        let Some(line) = lines.next_line().await? else {
            println!("\nExiting Q&A system. Goodbye!");
            break;
        };

        let question = line.trim();

        if question.eq_ignore_ascii_case("quit") || question.eq_ignore_ascii_case("exit") {
            println!("Exiting Q&A system. Goodbye!");
            break;
        }

        if question.is_empty() {
            continue;
        }

        // Display only; the raw question is what gets sent
        println!("\n[Processed question]: {}", preprocess_question(question));
        println!("\n[Thinking...]");

        let answer = service.answer(question).await;

        println!("\n{}", "=".repeat(50));
        println!("[Answer]");
        println!("{}", answer.text);
        println!("{}", "=".repeat(50));

        print_sources(&answer.sources);
    }

    Ok(())
}

/// Print an enumerated source list, if any sources were attributed.
fn print_sources(sources: &[Source]) {
    if sources.is_empty() {
        return;
    }

    println!("\n[Sources used]:");
    for (i, source) in sources.iter().enumerate() {
        println!("  {}. {} ({})", i + 1, source.title, source.uri);
    }
}

/// Lowercase a question, strip punctuation, and collapse whitespace.
///
/// Shown next to the echoed question so the user sees what was asked
/// minus typing noise. Not applied to the question sent to the model.
fn preprocess_question(question: &str) -> String {
    let lowered = question.to_lowercase();
    let cleaned: String = lowered
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '_')
        .collect();

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preprocess_lowercases_and_strips_punctuation() {
        assert_eq!(
            preprocess_question("What is Rust's ownership model?!"),
            "what is rusts ownership model"
        );
    }

    #[test]
    fn test_preprocess_collapses_whitespace() {
        assert_eq!(preprocess_question("  spaced \t out  "), "spaced out");
    }

    #[test]
    fn test_preprocess_keeps_underscores_and_digits() {
        assert_eq!(preprocess_question("what is foo_bar 42?"), "what is foo_bar 42");
    }
}
