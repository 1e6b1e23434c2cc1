//! Terminal rendering and line input for the tutor REPL

use colored::*;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, size},
};
use std::io::{self, IsTerminal, Write};

use yeneta_core::{Error, Language, RetrievalMode, Result, SourceRef};
use yeneta_rag::{TutorAnswer, ValidationReport};

use crate::state::ConversationState;

const PROMPT: &str = "yeneta>";

/// Display startup banner
pub fn display_banner() {
    let terminal_width = size().map(|(w, _)| w as usize).unwrap_or(80);
    let banner_width = std::cmp::min(64, terminal_width.saturating_sub(4)).max(40);
    let inner = banner_width - 2;

    let boxed = |text: &str| {
        let padding = inner.saturating_sub(text.chars().count() + 2);
        format!("│  {}{}│", text, " ".repeat(padding))
    };

    println!();
    println!("{}", format!("┌{}┐", "─".repeat(inner)).blue());
    println!("{}", boxed("").blue());
    println!("{}", boxed("Yeneta - AI Study Assistant").blue().bold());
    println!("{}", boxed("").blue());

    let feature_lines = [
        "Ask questions about your course material",
        "",
        "Features:",
        "• Answers grounded in ranked course passages",
        "• Beginner, intermediate and advanced levels",
        "• English, Amharic, Afaan Oromo, Tigrigna,",
        "  Yoruba and Swahili",
        "",
        "v0.1.0 • Powered by Groq",
    ];
    for line in feature_lines {
        println!("{}", boxed(line).blue());
    }

    println!("{}", boxed("").blue());
    println!("{}", format!("└{}┘", "─".repeat(inner)).blue());
    println!();
    println!(
        "{}",
        "💡 Tip: Type a question, or 'help' for commands".dimmed()
    );
    println!();
}

/// Display help message
pub fn print_help() {
    println!("{}", "Available commands:".bold());
    println!("  {} - Ask the tutor a question", "<question>".green());
    println!(
        "  {} - Set the learning level (beginner, intermediate, advanced)",
        ":level <level>".green()
    );
    println!(
        "  {} - Set the answer language, or detect it per question",
        ":lang <code|auto>".green()
    );
    println!("  {} - Restrict answers to one subject", ":subject <name|none>".green());
    println!("  {} - Show the sources behind the last answer", ":sources".green());
    println!("  {} - Show this help message", "help".green());
    println!("  {} - Exit the application", "exit/quit".green());
    println!();
    println!("{}", "Languages:".bold());
    for language in Language::all() {
        println!(
            "  {}  {} ({})",
            language.code().cyan(),
            language.display_name(),
            language.native_name()
        );
    }
}

/// Show the current conversation settings
pub fn print_settings(state: &ConversationState) {
    let language = state
        .language
        .map(|l| l.display_name().to_string())
        .unwrap_or_else(|| "auto-detect".to_string());
    let subject = state.subject.as_deref().unwrap_or("all subjects");
    println!(
        "{} level: {} • language: {} • subject: {}",
        "⚙".cyan(),
        state.difficulty.display_name().bold(),
        language.bold(),
        subject.bold()
    );
}

/// Print an answer with its retrieval mode and citations
pub fn render_answer(answer: &TutorAnswer) {
    println!();
    println!("{}", answer.answer);
    println!();

    match answer.retrieval_mode {
        RetrievalMode::Hybrid => {}
        RetrievalMode::LexicalOnly => println!(
            "{}",
            "⚠ Semantic search was unavailable; sources were matched by keywords only.".yellow()
        ),
        RetrievalMode::NoContext => println!(
            "{}",
            "⚠ Course material was unavailable; this answer is from general knowledge.".yellow()
        ),
    }

    if answer.prompt.grounded {
        let ids = answer.prompt.included_sources.join(", ");
        println!("{} {}", "Sources:".dimmed(), ids.dimmed());
    } else if answer.retrieval_mode != RetrievalMode::NoContext {
        println!(
            "{}",
            "No matching course material was found; treat this answer with care.".dimmed()
        );
    }
    if let Some(summary) = answer_check_summary(&answer.validation) {
        println!("{} {}", "Answer check:".yellow(), summary.dimmed());
    }
    println!();
}

/// One line describing failed answer checks and safety issues, if any
pub fn answer_check_summary(report: &ValidationReport) -> Option<String> {
    if report.passed() && report.safety_issues.is_empty() {
        return None;
    }
    let mut parts = Vec::new();
    let failed = report.failed_checks();
    if !failed.is_empty() {
        parts.push(format!("failed {}", failed.join(", ")));
    }
    if !report.safety_issues.is_empty() {
        parts.push(format!(
            "safety {:.1} ({})",
            report.safety_score,
            report.safety_issues.join("; ")
        ));
    }
    Some(parts.join(" • "))
}

/// List the sources of the previous answer with their scores
pub fn render_sources(sources: &[SourceRef]) {
    if sources.is_empty() {
        println!("{}", "No sources for the last answer.".dimmed());
        return;
    }
    println!("{}", "Sources of the last answer:".bold());
    for (i, source) in sources.iter().enumerate() {
        let score = format!("(score {:.2})", source.score);
        println!("  {}. {} {}", i + 1, source.passage_id.green(), score.dimmed());
    }
}

pub fn render_error(error: &Error) {
    eprintln!("{} {}", "✗".red(), error.to_string().red());
}

fn redraw(input: &[char]) -> Result<()> {
    let line: String = input.iter().collect();
    print!("\r\x1b[2K{} {}", PROMPT.green().bold(), line);
    io::stdout().flush()?;
    Ok(())
}

/// Read one line with command history navigation
///
/// Returns `None` at end of input.
pub fn read_line_with_history(history: &mut Vec<String>) -> Result<Option<String>> {
    if !io::stdin().is_terminal() {
        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            return Ok(None);
        }
        let input = input.trim().to_string();
        if !input.is_empty() {
            history.push(input.clone());
        }
        return Ok(Some(input));
    }

    enable_raw_mode()?;
    let result = read_raw_line(history);
    disable_raw_mode()?;
    println!();
    result
}

fn read_raw_line(history: &mut Vec<String>) -> Result<Option<String>> {
    let mut input: Vec<char> = Vec::new();
    let mut history_index: Option<usize> = None;

    redraw(&input)?;

    loop {
        let Event::Key(key_event) = event::read()? else {
            continue;
        };
        if key_event.kind != KeyEventKind::Press {
            continue;
        }

        match key_event.code {
            KeyCode::Enter => {
                let line: String = input.iter().collect();
                let line = line.trim().to_string();
                if !line.is_empty() {
                    history.push(line.clone());
                }
                return Ok(Some(line));
            }
            KeyCode::Char(c) => {
                if c == 'd' && key_event.modifiers.contains(event::KeyModifiers::CONTROL) {
                    return Ok(None);
                }
                if c == 'c' && key_event.modifiers.contains(event::KeyModifiers::CONTROL) {
                    return Ok(Some("exit".to_string()));
                }
                input.push(c);
            }
            KeyCode::Backspace => {
                input.pop();
            }
            KeyCode::Up => {
                if history.is_empty() {
                    continue;
                }
                let new_index = match history_index {
                    None => history.len() - 1,
                    Some(idx) => idx.saturating_sub(1),
                };
                history_index = Some(new_index);
                input = history[new_index].chars().collect();
            }
            KeyCode::Down => {
                if let Some(idx) = history_index {
                    if idx + 1 < history.len() {
                        history_index = Some(idx + 1);
                        input = history[idx + 1].chars().collect();
                    } else {
                        history_index = None;
                        input.clear();
                    }
                }
            }
            KeyCode::Esc => {
                input.clear();
                history_index = None;
            }
            _ => continue,
        }
        redraw(&input)?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yeneta_rag::validate_answer;

    #[test]
    fn test_passing_answer_has_no_check_line() {
        let report = validate_answer(
            "Good question! Let me explain how fractions work, with an example of a pizza cut into four slices.",
        );
        assert_eq!(answer_check_summary(&report), None);
    }

    #[test]
    fn test_check_line_lists_failures_and_issues() {
        let report = validate_answer("It is always four.");
        let summary = answer_check_summary(&report).unwrap();
        insta::assert_snapshot!(summary, @"failed length, educational value, encouraging tone • safety 0.8 (potentially misleading absolute: always)");
    }
}
