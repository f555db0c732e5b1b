// Reporting helpers: summary statistics and the plain-text export format.

use crate::composer::GenerationResult;
use crate::words::char_len;
use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use std::fs;
use std::path::{Path, PathBuf};

/// Horizontal rule used by both the terminal output and the export file.
pub const RULE_WIDTH: usize = 60;
pub const REPORT_EXTENSION: &str = ".txt";

pub fn rule(c: char) -> String {
    std::iter::repeat(c).take(RULE_WIDTH).collect()
}

/// Aggregate figures for a finished batch. Lengths are in characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statistics {
    pub total: usize,
    /// Average length, rounded down.
    pub average_len: usize,
    pub shortest: String,
    pub longest: String,
}

impl Statistics {
    /// `None` for an empty batch. Ties keep the earliest username.
    pub fn from_usernames(usernames: &[String]) -> Option<Self> {
        let first = usernames.first()?;
        let mut shortest = first;
        let mut longest = first;
        let mut total_len = 0;
        for username in usernames {
            let len = char_len(username);
            total_len += len;
            if len < char_len(shortest) {
                shortest = username;
            }
            if len > char_len(longest) {
                longest = username;
            }
        }
        Some(Statistics {
            total: usernames.len(),
            average_len: total_len / usernames.len(),
            shortest: shortest.clone(),
            longest: longest.clone(),
        })
    }

    pub fn shortest_len(&self) -> usize {
        char_len(&self.shortest)
    }

    pub fn longest_len(&self) -> usize {
        char_len(&self.longest)
    }
}

/// Render the export file contents.
pub fn render_report(result: &GenerationResult, generated_at: NaiveDateTime) -> String {
    let request = &result.request;
    let mut out = String::new();

    push_line(&mut out, "GENERATED USERNAMES");
    push_line(&mut out, &rule('='));
    push_line(&mut out, &format!("Generated: {}", generated_at.format("%Y-%m-%d %H:%M:%S")));
    push_line(&mut out, &format!("Method: {}", request.method()));
    if let Some(theme) = request.method().theme() {
        push_line(&mut out, &format!("Theme: {theme}"));
    }
    push_line(&mut out, &format!("Word Count: {}", request.word_count()));
    push_line(&mut out, &format!("Total: {}", result.usernames.len()));
    push_line(&mut out, &rule('='));
    out.push('\n');

    for (idx, username) in result.usernames.iter().enumerate() {
        push_line(&mut out, &format!("{:>3}. {username}", idx + 1));
    }

    out.push('\n');
    push_line(&mut out, &rule('='));
    push_line(&mut out, "Generated by Random Username Generator");
    out
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

/// Fallback export name, `usernames_<unix-seconds>.txt`.
pub fn default_filename<Tz: TimeZone>(now: &DateTime<Tz>) -> String {
    format!("usernames_{}{REPORT_EXTENSION}", now.timestamp())
}

/// Turn what the user typed into the export path: blank input gets the
/// timestamped default, and `.txt` is appended when missing.
pub fn resolve_filename<Tz: TimeZone>(input: &str, now: &DateTime<Tz>) -> PathBuf {
    let name = input.trim();
    if name.is_empty() {
        return PathBuf::from(default_filename(now));
    }
    if name.ends_with(REPORT_EXTENSION) {
        PathBuf::from(name)
    } else {
        PathBuf::from(format!("{name}{REPORT_EXTENSION}"))
    }
}

/// Write the report for `result` to `path`, stamped with the local time.
/// The whole report is rendered before the file is touched.
pub fn write_report(path: &Path, result: &GenerationResult) -> Result<()> {
    let contents = render_report(result, Local::now().naive_local());
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn statistics_floor_the_average() {
        let stats = Statistics::from_usernames(&["Ab".to_string(), "Abcdef".to_string()]).unwrap();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.average_len, 4);
        assert_eq!((stats.shortest.as_str(), stats.shortest_len()), ("Ab", 2));
        assert_eq!((stats.longest.as_str(), stats.longest_len()), ("Abcdef", 6));

        let stats = Statistics::from_usernames(&["Abc".to_string(), "Abcdef".to_string()]).unwrap();
        assert_eq!(stats.average_len, 4);
    }

    #[test]
    fn statistics_keep_first_on_ties() {
        let names: Vec<String> = ["Wolf", "Bear", "Lion"].map(String::from).to_vec();
        let stats = Statistics::from_usernames(&names).unwrap();
        assert_eq!(stats.shortest, "Wolf");
        assert_eq!(stats.longest, "Wolf");
    }

    #[test]
    fn statistics_of_nothing() {
        assert_eq!(Statistics::from_usernames(&[]), None);
    }

    #[test]
    fn filenames_get_extension_and_default() {
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        assert_eq!(resolve_filename("", &now), PathBuf::from("usernames_1700000000.txt"));
        assert_eq!(resolve_filename("  ", &now), PathBuf::from("usernames_1700000000.txt"));
        assert_eq!(resolve_filename("mine", &now), PathBuf::from("mine.txt"));
        assert_eq!(resolve_filename("mine.txt", &now), PathBuf::from("mine.txt"));
        assert_eq!(resolve_filename("names.csv", &now), PathBuf::from("names.csv.txt"));
    }
}
