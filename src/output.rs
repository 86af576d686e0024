//! Output formatting for search results

use crate::error::Diagnostic;
use crate::index::types::{EntryType, SearchResult};
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Longest description shown on a result line, in characters
const DESCRIPTION_WIDTH: usize = 72;

/// Print results one per line: type badge, name, score, description
pub fn print_results(results: &[SearchResult], color: bool) -> io::Result<()> {
    let choice = if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(choice);
    write_results(&mut stdout, results)
}

/// Write results to any color-capable writer
pub fn write_results(out: &mut impl WriteColor, results: &[SearchResult]) -> io::Result<()> {
    if results.is_empty() {
        out.set_color(ColorSpec::new().set_dimmed(true))?;
        writeln!(out, "no results")?;
        out.reset()?;
        return Ok(());
    }

    let name_width = results
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0);

    for result in results {
        write_badge(out, result.entry_type)?;
        write!(out, " ")?;

        out.set_color(ColorSpec::new().set_bold(true))?;
        write!(out, "{:width$}", result.name, width = name_width)?;
        out.reset()?;

        out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        write!(out, " {:>5.1}", result.score)?;
        out.reset()?;

        if let Some(description) = &result.description {
            write!(out, "  {}", truncate(description, DESCRIPTION_WIDTH))?;
        }
        writeln!(out)?;
    }

    Ok(())
}

/// Print results as a JSON array
pub fn print_json(results: &[SearchResult]) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, results).map_err(io::Error::other)?;
    writeln!(out)
}

/// Print build diagnostics to stderr
pub fn print_diagnostics(diagnostics: &[Diagnostic], color: bool) -> io::Result<()> {
    let choice = if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stderr = StandardStream::stderr(choice);

    for diagnostic in diagnostics {
        stderr.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true))?;
        write!(stderr, "warning")?;
        stderr.reset()?;
        writeln!(stderr, ": {}", diagnostic)?;
    }
    Ok(())
}

fn write_badge(out: &mut impl WriteColor, entry_type: EntryType) -> io::Result<()> {
    let color = match entry_type {
        EntryType::Creature => Color::Red,
        EntryType::Item => Color::Yellow,
        EntryType::Ability => Color::Magenta,
        EntryType::Move => Color::Blue,
    };
    out.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
    write!(out, "{:<8}", entry_type.as_str())?;
    out.reset()
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(3)).collect();
    cut.push_str("...");
    cut
}
