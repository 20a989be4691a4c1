//! Terminal output formatting.

use std::time::Duration;

use anyhow::Result;
use colored::{ColoredString, Colorize};
use indicatif::{ProgressBar, ProgressStyle};
use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use truthlens_core::{AnalysisResult, Failure, FailureKind, Outcome, Severity};
use unicode_width::UnicodeWidthStr;

const BAR_WIDTH: usize = 20;

/// Spinner shown while a model call is outstanding.
pub fn spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", " "])
        .template("{spinner:.cyan} {msg}")
    {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Print a settled outcome, as JSON or for a human.
pub fn print_outcome(outcome: &Outcome, as_json: bool) -> Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
        return Ok(());
    }

    match outcome {
        Outcome::Displayed { result } => print_result(result),
        Outcome::Failed(failure) => print_failure(failure),
    }
    Ok(())
}

/// Print a displayed result.
pub fn print_result(result: &AnalysisResult) {
    println!();
    match result {
        AnalysisResult::Article(article) => {
            println!(
                "{}: {}",
                "Classification".bold(),
                verdict(article.classification.as_str(), article.classification.severity())
            );
            println!(
                "{}: {} {}",
                "Confidence".bold(),
                format_confidence(article.confidence),
                confidence_bar(article.confidence, BAR_WIDTH).dimmed()
            );
            print_section("Explanation", &article.explanation);
        }
        AnalysisResult::Credibility(credibility) => {
            println!(
                "{}: {}",
                "Credibility Rating".bold(),
                verdict(credibility.rating.as_str(), credibility.rating.severity())
            );
            print_section("Summary", &credibility.summary);
        }
        AnalysisResult::FreeText(free) => {
            print_section(free.tool.title(), &free.body);
        }
    }
}

/// Print a failure. Parse failures also show what the model said.
pub fn print_failure(failure: &Failure) {
    let marker = match failure.kind {
        FailureKind::Input => "!".yellow().bold(),
        _ => "✗".red().bold(),
    };
    eprintln!("{} {}", marker, failure.message);

    if let Some(raw) = &failure.raw_text {
        eprintln!();
        eprintln!("{}", "Raw response:".dimmed());
        eprintln!("{}", raw);
    }
}

fn print_section(title: &str, markdown: &str) {
    println!();
    println!("{}", title.cyan().bold());
    println!("{}", "─".repeat(term_width().min(60)).dimmed());
    println!("{}", render_markdown(markdown));
}

/// Color a verdict label by its severity.
pub fn verdict(label: &str, severity: Severity) -> ColoredString {
    match severity {
        Severity::Alarm => label.red().bold(),
        Severity::Ok => label.green().bold(),
        Severity::Caution => label.yellow().bold(),
    }
}

/// Confidence as a percentage with one decimal.
pub fn format_confidence(confidence: f64) -> String {
    format!("{:.1}%", confidence * 100.0)
}

/// Horizontal bar for a confidence score, clamped to `[0, 1]`.
pub fn confidence_bar(confidence: f64, width: usize) -> String {
    let clamped = if confidence.is_finite() {
        confidence.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = (clamped * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Get terminal width, defaulting to 80.
fn term_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80)
}

/// Pad a plain string to a given visual width (right-padded).
pub fn pad_right(s: &str, width: usize) -> String {
    let visual = UnicodeWidthStr::width(s);
    if visual >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visual))
    }
}

enum Inline {
    Heading,
    Strong,
    Emphasis,
    Link(String),
}

/// Markdown to styled terminal text.
struct TerminalRenderer {
    out: String,
    inline: Vec<(Inline, String)>,
    lists: Vec<Option<u64>>,
    in_code_block: bool,
}

impl TerminalRenderer {
    fn new() -> Self {
        Self {
            out: String::new(),
            inline: Vec::new(),
            lists: Vec::new(),
            in_code_block: false,
        }
    }

    fn push(&mut self, text: &str) {
        match self.inline.last_mut() {
            Some((_, buf)) => buf.push_str(text),
            None => self.out.push_str(text),
        }
    }

    fn line_start(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with('\n') {
            self.out.push('\n');
        }
    }

    fn open(&mut self, kind: Inline) {
        self.inline.push((kind, String::new()));
    }

    fn close(&mut self) {
        let Some((kind, buf)) = self.inline.pop() else {
            return;
        };
        let styled = match kind {
            Inline::Heading => {
                self.push(&buf.bold().underline().to_string());
                self.out.push_str("\n\n");
                return;
            }
            Inline::Strong => buf.bold().to_string(),
            Inline::Emphasis => buf.italic().to_string(),
            Inline::Link(url) if url == buf || url.is_empty() => buf.blue().to_string(),
            Inline::Link(url) => format!("{} ({})", buf, url.blue()),
        };
        self.push(&styled);
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(Tag::Heading { .. }) => {
                self.line_start();
                self.open(Inline::Heading);
            }
            Event::End(TagEnd::Heading(_)) => self.close(),
            Event::Start(Tag::Strong) => self.open(Inline::Strong),
            Event::Start(Tag::Emphasis) => self.open(Inline::Emphasis),
            Event::Start(Tag::Link { dest_url, .. }) => self.open(Inline::Link(dest_url.to_string())),
            Event::End(TagEnd::Strong | TagEnd::Emphasis | TagEnd::Link) => self.close(),
            Event::End(TagEnd::Paragraph) => {
                if self.lists.is_empty() {
                    self.out.push_str("\n\n");
                } else {
                    self.line_start();
                }
            }
            Event::Start(Tag::List(start)) => {
                self.line_start();
                self.lists.push(start);
            }
            Event::End(TagEnd::List(_)) => {
                self.lists.pop();
                if self.lists.is_empty() {
                    self.out.push('\n');
                }
            }
            Event::Start(Tag::Item) => {
                self.line_start();
                let depth = self.lists.len().saturating_sub(1);
                let bullet = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let bullet = format!("{}. ", n);
                        *n += 1;
                        bullet
                    }
                    _ => "• ".to_string(),
                };
                self.out.push_str(&"  ".repeat(depth));
                self.out.push_str(&bullet);
            }
            Event::End(TagEnd::Item) => self.line_start(),
            Event::Start(Tag::CodeBlock(_)) => {
                self.line_start();
                self.in_code_block = true;
            }
            Event::End(TagEnd::CodeBlock) => {
                self.in_code_block = false;
                self.out.push('\n');
            }
            Event::Text(text) if self.in_code_block => {
                for line in text.lines() {
                    self.out.push_str(&format!("    {}\n", line.dimmed()));
                }
            }
            Event::Text(text) => self.push(&text),
            Event::Code(code) => self.push(&code.yellow().to_string()),
            Event::SoftBreak => self.push(" "),
            Event::HardBreak => self.push("\n"),
            Event::Rule => {
                self.line_start();
                self.out.push_str(&"─".repeat(40));
                self.out.push_str("\n\n");
            }
            _ => {}
        }
    }

    fn finish(self) -> String {
        self.out.trim_end().to_string()
    }
}

/// Render model markdown for the terminal.
pub fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let mut renderer = TerminalRenderer::new();
    for event in Parser::new_ext(markdown, options) {
        renderer.event(event);
    }
    renderer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_format_confidence_one_decimal() {
        assert_eq!(format_confidence(0.95), "95.0%");
        assert_eq!(format_confidence(0.123), "12.3%");
        assert_eq!(format_confidence(1.2), "120.0%");
    }

    #[test]
    fn test_confidence_bar_clamps() {
        assert_eq!(confidence_bar(0.5, 4), "██░░");
        assert_eq!(confidence_bar(1.7, 4), "████");
        assert_eq!(confidence_bar(-0.2, 4), "░░░░");
        assert_eq!(confidence_bar(f64::NAN, 2), "░░");
    }

    #[test]
    fn test_verdict_keeps_label_text() {
        plain();
        assert_eq!(verdict("FAKE", Severity::Alarm).to_string(), "FAKE");
        assert_eq!(
            verdict("Mixed Credibility", Severity::Caution).to_string(),
            "Mixed Credibility"
        );
    }

    #[test]
    fn test_render_heading_and_bullets() {
        plain();
        let rendered = render_markdown("### Findings\n\n- **Loaded** words\n- Second point\n");
        assert_eq!(rendered, "Findings\n\n• Loaded words\n• Second point");
    }

    #[test]
    fn test_render_ordered_and_nested_lists() {
        plain();
        let rendered = render_markdown("1. one\n2. two\n   - inner\n");
        assert_eq!(rendered, "1. one\n2. two\n  • inner");
    }

    #[test]
    fn test_render_paragraphs_and_links() {
        plain();
        let rendered =
            render_markdown("First *point*.\n\nSee [the report](https://example.org/r).");
        assert_eq!(
            rendered,
            "First point.\n\nSee the report (https://example.org/r)."
        );
    }

    #[test]
    fn test_pad_right_uses_visual_width() {
        assert_eq!(pad_right("ab", 4), "ab  ");
        assert_eq!(pad_right("abcdef", 4), "abcdef");
    }
}
