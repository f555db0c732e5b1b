// UI layer: the interactive session built on `dialoguer` prompts.
// Menu answers are parsed by small pure functions so bad input always maps
// to a default instead of an error.

use crate::api::WordSupplier;
use crate::composer::{clamp_count, BatchEvent, Composer, GenerationRequest, GenerationResult, Method};
use crate::report::{resolve_filename, rule, write_report, Statistics};
use crate::words::Theme;
use anyhow::{Context, Result};
use chrono::Local;
use crossterm::style::Stylize;
use dialoguer::{Confirm, Input};
use indicatif::{ProgressBar, ProgressStyle};
use rand::seq::SliceRandom;
use rand::Rng;
use std::io::{self, Write};

/// Quantity used when the answer is not a number.
pub const DEFAULT_QUANTITY: usize = 10;

pub const CANCELLED_MESSAGE: &str = "⚠️  Operation cancelled by user";

/// Route Ctrl-C outside of prompts (during generation or pacing) to
/// `on_cancel`. Can only be installed once per process.
pub fn install_interrupt_handler<F>(on_cancel: F) -> Result<()>
where
    F: FnMut() + Send + 'static,
{
    ctrlc::set_handler(on_cancel).context("Failed to install Ctrl-C handler")
}

/// True when `err` comes from Ctrl-C at a prompt.
pub fn is_cancellation(err: &anyhow::Error) -> bool {
    err.chain()
        .filter_map(|cause| cause.downcast_ref::<io::Error>())
        .any(|e| e.kind() == io::ErrorKind::Interrupted)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodChoice {
    Local,
    Api,
    Hybrid,
    Themed,
    ShowInfo,
}

/// `1`-`5`; anything else means hybrid.
pub fn parse_method_choice(input: &str) -> MethodChoice {
    match input.trim() {
        "1" => MethodChoice::Local,
        "2" => MethodChoice::Api,
        "3" => MethodChoice::Hybrid,
        "4" => MethodChoice::Themed,
        "5" => MethodChoice::ShowInfo,
        _ => MethodChoice::Hybrid,
    }
}

/// `1`-`8` in menu order; anything else means fantasy.
pub fn parse_theme_choice(input: &str) -> Theme {
    input
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| Theme::MENU.get(i).cloned())
        .unwrap_or(Theme::Fantasy)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordCountChoice {
    Fixed(usize),
    /// 5 or 6, drawn once for the whole batch.
    Random,
}

impl WordCountChoice {
    pub fn resolve<R: Rng + ?Sized>(self, rng: &mut R) -> usize {
        match self {
            WordCountChoice::Fixed(n) => n,
            WordCountChoice::Random => *[5, 6].choose(rng).unwrap_or(&5),
        }
    }
}

/// `2` means six words, `3` a random pick, anything else five.
pub fn parse_word_count_choice(input: &str) -> WordCountChoice {
    match input.trim() {
        "2" => WordCountChoice::Fixed(6),
        "3" => WordCountChoice::Random,
        _ => WordCountChoice::Fixed(5),
    }
}

/// Clamped quantity, or `None` when the answer is not an integer.
pub fn parse_quantity(input: &str) -> Option<usize> {
    let text = input.trim();
    if let Ok(n) = text.parse::<i64>() {
        return Some(clamp_count(n));
    }
    // Integers too large for i64 still clamp by sign.
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(clamp_count(if negative { i64::MIN } else { i64::MAX }))
}

pub fn print_banner() {
    let banner = r#"
╔═══════════════════════════════════════════════╗
║     RANDOM USERNAME GENERATOR                 ║
║     Create unique 5-6 word usernames          ║
║     No numbers, pure words!                   ║
╚═══════════════════════════════════════════════╝
"#;
    println!("{}", banner.cyan());
}

pub fn print_api_info() {
    println!("\n{}", "📡 FREE APIs USED:".bold());
    println!("{}", rule('-'));
    println!("1. Random Word API");
    println!("   URL: https://random-word-api.herokuapp.com");
    println!("   Purpose: Generate random English words");
    println!("   Rate Limit: Generous, no key required");
    println!();
    println!("2. Datamuse API");
    println!("   URL: https://api.datamuse.com");
    println!("   Purpose: Get related words, synonyms");
    println!("   Rate Limit: 100,000 requests/day, no key required");
    println!("{}", rule('-'));
}

fn ask(prompt: &str) -> Result<String> {
    let answer: String = Input::new().with_prompt(prompt).allow_empty(true).interact_text()?;
    Ok(answer)
}

/// Run one interactive session: gather the request, generate, list, offer
/// to save, print statistics.
pub fn session<S, R>(composer: &Composer<S>, rng: &mut R) -> Result<()>
where
    S: WordSupplier,
    R: Rng + ?Sized,
{
    print_banner();

    let method = select_method()?;
    let word_count = select_word_count(rng)?;
    let count = select_quantity()?;
    let request = GenerationRequest::new(count as i64, word_count, method)?;

    println!("\n{}", rule('='));
    let result = generate(composer, &request, rng)?;

    print_listing(&result);
    offer_export(&result)?;
    print_statistics(&result);
    Ok(())
}

fn select_method() -> Result<Method> {
    println!("\n{}", "🎯 GENERATION METHOD:".bold());
    println!("1. Local (Fast, uses built-in word lists)");
    println!("2. API (Creative, uses online word APIs)");
    println!("3. Hybrid (Best of both, recommended)");
    println!("4. Themed (Choose a theme)");
    println!("5. Show API Info");

    let mut choice = parse_method_choice(&ask("\nSelect method (1-5)")?);
    if choice == MethodChoice::ShowInfo {
        print_api_info();
        ask("\nPress Enter to continue...")?;
        choice = match parse_method_choice(&ask("\nSelect method (1-4)")?) {
            MethodChoice::ShowInfo => MethodChoice::Hybrid,
            other => other,
        };
    }

    Ok(match choice {
        MethodChoice::Local => Method::Local,
        MethodChoice::Api => Method::Api,
        MethodChoice::Themed => Method::Themed(select_theme()?),
        MethodChoice::Hybrid | MethodChoice::ShowInfo => Method::Hybrid,
    })
}

fn select_theme() -> Result<Theme> {
    println!("\n{}", "🎨 AVAILABLE THEMES:".bold());
    for (i, theme) in Theme::MENU.iter().enumerate() {
        println!("{}. {} ({})", i + 1, theme, theme.hint());
    }
    let theme = parse_theme_choice(&ask("\nSelect theme (1-8)")?);
    println!("{} Selected theme: {theme}", "✅".green());
    Ok(theme)
}

fn select_word_count<R: Rng + ?Sized>(rng: &mut R) -> Result<usize> {
    println!("\n{}", "📝 WORD COUNT:".bold());
    println!("1. 5 words (shorter)");
    println!("2. 6 words (longer)");
    println!("3. Random (mix of 5 and 6)");

    let choice = parse_word_count_choice(&ask("\nSelect word count (1-3)")?);
    let word_count = choice.resolve(rng);
    if choice == WordCountChoice::Random {
        println!("{} Random: {word_count} words selected", "✅".green());
    }
    Ok(word_count)
}

fn select_quantity() -> Result<usize> {
    match parse_quantity(&ask("\nHow many usernames to generate (1-100)")?) {
        Some(count) => Ok(count),
        None => {
            println!("{}  Invalid input, generating {DEFAULT_QUANTITY} usernames", "⚠️".yellow());
            Ok(DEFAULT_QUANTITY)
        }
    }
}

fn generate<S, R>(composer: &Composer<S>, request: &GenerationRequest, rng: &mut R) -> Result<GenerationResult>
where
    S: WordSupplier,
    R: Rng + ?Sized,
{
    println!(
        "\n🎲 Generating {} usernames with {} words each...",
        request.count(),
        request.word_count()
    );
    println!("{}", rule('-'));

    let progress = ProgressBar::new(request.count() as u64);
    progress.set_style(ProgressStyle::with_template("{spinner} [{bar:40}] {pos}/{len}")?.progress_chars("=> "));

    let result = run_with_progress(composer, request, rng, &progress, &mut io::stdout())?;
    progress.finish_and_clear();
    Ok(result)
}

/// Run the batch, writing one `[i/count]` line per item to `out`.
///
/// The bar only tracks the position; item lines are written with the bar
/// suspended so they land on `out` even when the bar is hidden.
pub fn run_with_progress<S, R, W>(
    composer: &Composer<S>,
    request: &GenerationRequest,
    rng: &mut R,
    progress: &ProgressBar,
    out: &mut W,
) -> io::Result<GenerationResult>
where
    S: WordSupplier,
    R: Rng + ?Sized,
    W: Write,
{
    let mut failure = None;
    let result = composer.generate_with(request, rng, |event| {
        if failure.is_none() {
            if let Err(e) = progress.suspend(|| writeln!(out, "{}", item_line(&event))) {
                failure = Some(e);
            }
        }
        progress.inc(1);
    });
    match failure {
        Some(e) => Err(e),
        None => Ok(result),
    }
}

/// Progress line for one batch item.
pub fn item_line(event: &BatchEvent<'_>) -> String {
    match event {
        BatchEvent::Generated { index, total, username } => {
            format!("  [{index}/{total}] {} {username}", "✅".green())
        }
        BatchEvent::Failed { index, total, error } => {
            format!("  [{index}/{total}] {} Error: {error}", "❌".red())
        }
    }
}

fn print_listing(result: &GenerationResult) {
    println!("\n{}", rule('='));
    println!("{}", "📋 GENERATED USERNAMES".bold());
    println!("{}", rule('='));

    for (idx, username) in result.usernames.iter().enumerate() {
        println!("{:>3}. {username}", idx + 1);
    }

    println!("\n{}", rule('='));
    match Statistics::from_usernames(&result.usernames) {
        Some(stats) => {
            println!("{} Successfully generated {} usernames!", "✅".green(), stats.total);
            println!("📊 Average length: {} characters", stats.average_len);
        }
        None => println!("{} No usernames were generated.", "⚠️".yellow()),
    }
    println!("{}", rule('='));
}

fn offer_export(result: &GenerationResult) -> Result<()> {
    let save = Confirm::new().with_prompt("\n💾 Save to file?").default(false).interact()?;
    if !save {
        return Ok(());
    }

    let answer = ask("Enter filename (blank for usernames_<timestamp>.txt)")?;
    let path = resolve_filename(&answer, &Local::now());
    match write_report(&path, result) {
        Ok(()) => println!("{} Saved to: {}", "✅".green(), path.display()),
        Err(e) => println!("{} Error saving file: {e:#}", "❌".red()),
    }
    Ok(())
}

fn print_statistics(result: &GenerationResult) {
    println!("\n{}", "📊 STATISTICS:".bold());
    println!("{}", rule('-'));
    println!("Total usernames: {}", result.usernames.len());
    println!("Word count: {}", result.request.word_count());
    if let Some(stats) = Statistics::from_usernames(&result.usernames) {
        println!("Shortest: {} ({} chars)", stats.shortest, stats.shortest_len());
        println!("Longest: {} ({} chars)", stats.longest, stats.longest_len());
    }
    println!("{}", rule('-'));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockWordSupplier;
    use crate::composer::GenerateError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn item_lines_reach_output_with_hidden_bar() {
        let composer = Composer::new(MockWordSupplier::new()).with_pacing(Duration::ZERO);
        let request = GenerationRequest::new(3, 5, Method::Local).unwrap();
        let progress = ProgressBar::hidden();
        let mut out = Vec::new();

        let result =
            run_with_progress(&composer, &request, &mut StdRng::seed_from_u64(6), &progress, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        for (i, line) in lines.iter().enumerate() {
            assert!(line.starts_with(&format!("  [{}/3]", i + 1)), "{line}");
            assert!(line.ends_with(&result.usernames[i]), "{line}");
        }
        assert_eq!(progress.position(), 3);
    }

    #[test]
    fn failed_item_line_carries_the_error() {
        let error = GenerateError::EmptyCategory("Nouns");
        let line = item_line(&BatchEvent::Failed { index: 2, total: 4, error: &error });
        assert!(line.starts_with("  [2/4]"));
        assert!(line.ends_with("Error: word category Nouns is empty"));
    }

    #[test]
    fn prompt_interrupt_counts_as_cancellation() {
        let interrupted = anyhow::Error::new(io::Error::from(io::ErrorKind::Interrupted)).context("reading method");
        assert!(is_cancellation(&interrupted));

        let broken = anyhow::Error::new(io::Error::from(io::ErrorKind::BrokenPipe));
        assert!(!is_cancellation(&broken));
        assert!(!is_cancellation(&anyhow::anyhow!("boom")));
    }

    #[cfg(unix)]
    #[test]
    fn sigint_reaches_the_interrupt_handler() {
        let (tx, rx) = mpsc::channel();
        install_interrupt_handler(move || {
            let _ = tx.send(());
        })
        .unwrap();

        let status = std::process::Command::new("kill")
            .args(["-INT", &std::process::id().to_string()])
            .status()
            .unwrap();
        assert!(status.success());
        rx.recv_timeout(Duration::from_secs(5)).unwrap();
    }

    #[test]
    fn method_menu_defaults_to_hybrid() {
        assert_eq!(parse_method_choice("1"), MethodChoice::Local);
        assert_eq!(parse_method_choice(" 2 "), MethodChoice::Api);
        assert_eq!(parse_method_choice("4"), MethodChoice::Themed);
        assert_eq!(parse_method_choice("5"), MethodChoice::ShowInfo);
        assert_eq!(parse_method_choice("9"), MethodChoice::Hybrid);
        assert_eq!(parse_method_choice(""), MethodChoice::Hybrid);
    }

    #[test]
    fn theme_menu_defaults_to_fantasy() {
        assert_eq!(parse_theme_choice("5"), Theme::Royal);
        assert_eq!(parse_theme_choice("8"), Theme::Light);
        assert_eq!(parse_theme_choice("0"), Theme::Fantasy);
        assert_eq!(parse_theme_choice("9"), Theme::Fantasy);
        assert_eq!(parse_theme_choice("dark"), Theme::Fantasy);
    }

    #[test]
    fn word_count_menu() {
        assert_eq!(parse_word_count_choice("2"), WordCountChoice::Fixed(6));
        assert_eq!(parse_word_count_choice("1"), WordCountChoice::Fixed(5));
        assert_eq!(parse_word_count_choice("x"), WordCountChoice::Fixed(5));
        assert_eq!(parse_word_count_choice("3"), WordCountChoice::Random);

        let mut rng = StdRng::seed_from_u64(12);
        for _ in 0..20 {
            assert!([5, 6].contains(&WordCountChoice::Random.resolve(&mut rng)));
        }
    }

    #[test]
    fn quantity_is_clamped() {
        assert_eq!(parse_quantity("150"), Some(100));
        assert_eq!(parse_quantity("0"), Some(1));
        assert_eq!(parse_quantity("-3"), Some(1));
        assert_eq!(parse_quantity(" 42 "), Some(42));
        assert_eq!(parse_quantity("99999999999999999999999"), Some(100));
        assert_eq!(parse_quantity("-99999999999999999999999"), Some(1));
    }

    #[test]
    fn quantity_rejects_non_numbers() {
        assert_eq!(parse_quantity("ten"), None);
        assert_eq!(parse_quantity(""), None);
        assert_eq!(parse_quantity("4.5"), None);
        assert_eq!(parse_quantity("-"), None);
    }
}
