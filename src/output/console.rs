//! Human-readable report output

use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use super::config::OutputConfig;
use crate::fix::{InputSource, RewriteReport, WriteMode};

/// Writes run summaries and warnings with optional colors.
pub struct ReportFormatter {
    config: OutputConfig,
}

impl ReportFormatter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    fn color_choice(&self) -> ColorChoice {
        if self.config.use_color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        }
    }

    /// Print the summary to stdout, or to stderr when stdout carries the
    /// rewritten text.
    pub fn print(&self, report: &RewriteReport) -> io::Result<()> {
        if self.config.mode == WriteMode::Stdout {
            let mut stderr = StandardStream::stderr(self.color_choice());
            self.write_summary(&mut stderr, report)
        } else {
            let mut stdout = StandardStream::stdout(self.color_choice());
            self.write_summary(&mut stdout, report)
        }
    }

    /// Print one warning per leftover loader call to stderr.
    pub fn print_leftovers(&self, report: &RewriteReport) -> io::Result<()> {
        let mut stderr = StandardStream::stderr(self.color_choice());
        self.write_leftovers(&mut stderr, report)
    }

    pub fn write_summary<W: WriteColor>(&self, out: &mut W, report: &RewriteReport) -> io::Result<()> {
        let count = report.converted.len();

        if count == 0 {
            writeln!(out, "No lazy imports found in {}", report.path.display())?;
            if report.written {
                write_copied_line(out, report)?;
            }
            return Ok(());
        }

        let headline = match (self.config.mode, report.written) {
            (WriteMode::DryRun, _) => format!("Would rewrite {} lazy import(s) in", count),
            (WriteMode::Write, true) => format!("Rewrote {} lazy import(s) in", count),
            (WriteMode::Write, false) => format!("Found {} lazy import(s) in", count),
            (WriteMode::Stdout, _) => format!("Rewrote {} lazy import(s) from", count),
        };
        let target = if report.written {
            &report.output
        } else {
            &report.path
        };

        out.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true))?;
        write!(out, "{}", headline)?;
        out.reset()?;
        writeln!(out, " {}", target.display())?;

        if self.config.show_imports {
            for import in &report.converted {
                out.set_color(ColorSpec::new().set_fg(Some(Color::White)))?;
                write!(out, "  {:>5}  ", import.line)?;
                out.reset()?;
                writeln!(out, "{}", import.to_eager().statement.trim())?;
            }
        }

        if !report.duplicates_removed.is_empty() {
            let lines: Vec<String> = report
                .duplicates_removed
                .iter()
                .map(usize::to_string)
                .collect();
            writeln!(
                out,
                "Removed {} duplicate import(s) (line {})",
                report.duplicates_removed.len(),
                lines.join(", ")
            )?;
        }

        if report.loader_import_pruned {
            writeln!(out, "Dropped `{}` from its import line", report.loader)?;
        }

        if report.written && report.source != InputSource::WorkingTree {
            write_copied_line(out, report)?;
        }

        Ok(())
    }

    pub fn write_leftovers<W: WriteColor>(&self, out: &mut W, report: &RewriteReport) -> io::Result<()> {
        for leftover in &report.leftovers {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true))?;
            write!(out, "delazy: warning:")?;
            out.reset()?;
            writeln!(
                out,
                " line {} still calls `{}`: {}",
                leftover.line, report.loader, leftover.content
            )?;
        }
        Ok(())
    }
}

fn write_copied_line<W: WriteColor>(out: &mut W, report: &RewriteReport) -> io::Result<()> {
    match &report.source {
        InputSource::Revision(rev) => writeln!(
            out,
            "Wrote {} as of {}",
            report.output.display(),
            rev
        ),
        InputSource::WorkingTree => writeln!(out, "Wrote {}", report.output.display()),
    }
}
