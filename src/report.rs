//! Console report of a channel snapshot.

use std::io::{self, Write};

use crate::{
    error::ExtractError,
    snapshot::{ChannelSnapshot, Field},
};

// ANSI escape codes.
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// Prints `Label: value` lines, values highlighted in green and failures in
/// red.
#[derive(Debug, Clone, Copy)]
pub struct ReportPrinter {
    color: bool,
}

impl Default for ReportPrinter {
    fn default() -> Self {
        Self { color: true }
    }
}

impl ReportPrinter {
    /// A printer that emits no escape codes.
    pub fn plain() -> Self {
        Self { color: false }
    }

    /// A printer that colors values only when `color` is set.
    pub fn with_color(color: bool) -> Self {
        Self { color }
    }

    /// Writes the full report for `snapshot` to `out`.
    pub fn write_report<W: Write>(
        &self,
        snapshot: &ChannelSnapshot,
        out: &mut W,
    ) -> io::Result<()> {
        writeln!(out, "YouTube Scraper Successful! Data retrieved.")?;

        for field in Field::ALL {
            let value = match field {
                Field::Username => Ok(snapshot.username.as_str()),
                Field::SubscriberCount => Ok(snapshot.subscriber_count.as_str()),
                Field::ViewCount => Ok(snapshot.view_count.as_str()),
                Field::VideoCount => Ok(snapshot.video_count.as_str()),
                Field::JoinDate => snapshot.join_date.as_deref(),
                Field::Location => snapshot.location.as_deref(),
                Field::Description => snapshot.description.as_deref(),
                Field::ExternalLinks => {
                    self.write_links(snapshot, out)?;
                    continue;
                }
            };
            self.write_field(out, field.label(), value)?;
        }

        Ok(())
    }

    /// Writes the generic message for a run that aborted before any report.
    pub fn write_failure<W: Write>(&self, err: &ExtractError, out: &mut W) -> io::Result<()> {
        writeln!(out, "Error retrieving channel data: {err}")
    }

    fn write_links<W: Write>(&self, snapshot: &ChannelSnapshot, out: &mut W) -> io::Result<()> {
        let label = Field::ExternalLinks.label();
        match &snapshot.external_links {
            Err(err) => self.write_field(out, label, Err(err)),
            Ok(links) if links.is_empty() => writeln!(out, "{label}: (none)"),
            Ok(links) => {
                writeln!(out, "{label}:")?;
                for link in links {
                    writeln!(out, "  - {}: {}", link.text, self.paint(GREEN, &link.url))?;
                }
                Ok(())
            }
        }
    }

    fn write_field<W: Write>(
        &self,
        out: &mut W,
        label: &str,
        value: Result<&str, &ExtractError>,
    ) -> io::Result<()> {
        match value {
            Ok(text) => writeln!(out, "{label}: {}", self.paint(GREEN, text)),
            Err(err) => writeln!(out, "{label}: {}", self.paint(RED, &format!("Error: {err}"))),
        }
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.color {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}
