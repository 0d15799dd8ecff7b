//! Rendering of check results
//!
//! A result is shown in two places: a compact [`StatusLine`] right
//! under the address field, and a [`DetailPanel`] with the full
//! breakdown. Both are plain data; [`fmt::Display`] gives a terminal
//! rendering and [`DetailPanel::to_html`] the card markup used by the
//! web form.

use crate::model::{DmarcPolicy, DomainCheckResult};
use html_escape::encode_text;
use std::fmt::{self, Write as _};

pub const CHECKING_TEXT: &str = "Checking...";
pub const ERROR_TEXT: &str = "Error checking domain";
pub const SPOOFABLE_TEXT: &str = "✅ Domain can be spoofed";
pub const PROTECTED_TEXT: &str = "⚠️ Domain difficult to spoof";
pub const NOT_FOUND_TEXT: &str = "Not found";

/// Visual emphasis of a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    Info,
    Success,
    Warning,
    Danger,
    Muted,
}

impl Tone {
    /// Bootstrap contextual class suffix (`text-success`, ...).
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Danger => "danger",
            Self::Muted => "muted",
        }
    }
}

/// The short status message displayed next to the address field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub tone: Tone,
    pub bold: bool,
}

impl StatusLine {
    #[must_use]
    pub fn checking() -> Self {
        Self {
            text: CHECKING_TEXT.to_string(),
            tone: Tone::Info,
            bold: false,
        }
    }

    #[must_use]
    pub fn error() -> Self {
        Self {
            text: ERROR_TEXT.to_string(),
            tone: Tone::Danger,
            bold: false,
        }
    }

    /// Success/fail label for a resolved check.
    #[must_use]
    pub fn resolved(result: &DomainCheckResult) -> Self {
        if result.spoofable {
            Self {
                text: SPOOFABLE_TEXT.to_string(),
                tone: Tone::Success,
                bold: true,
            }
        } else {
            Self {
                text: PROTECTED_TEXT.to_string(),
                tone: Tone::Danger,
                bold: true,
            }
        }
    }

    /// CSS classes for the status `<span>`.
    #[must_use]
    pub fn classes(&self) -> String {
        let mut classes = format!("domain-status-message text-{}", self.tone.class());
        if self.bold {
            classes.push_str(" fw-bold");
        }
        classes
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// One of the SPF / DKIM / DMARC lines of the detail panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRow {
    pub label: &'static str,
    pub found: bool,
    /// Everything after the found/not-found marker.
    pub detail: String,
    pub tone: Tone,
}

impl DetailRow {
    fn not_found(label: &'static str, tone: Tone) -> Self {
        Self {
            label,
            found: false,
            detail: String::new(),
            tone,
        }
    }

    fn marker(&self) -> &'static str {
        if self.found { "Found" } else { NOT_FOUND_TEXT }
    }
}

impl fmt::Display for DetailRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}{}", self.label, self.marker(), self.detail)
    }
}

/// A raw DNS record shown verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordBlock {
    pub label: &'static str,
    pub record: String,
}

/// Closing advice, whose tone follows the spoofability verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    pub spoofable: bool,
    pub headline: &'static str,
    pub note: Option<String>,
}

impl Recommendation {
    fn for_result(result: &DomainCheckResult) -> Self {
        if result.spoofable {
            let note = result.dmarc.is_monitor_only().then(|| {
                let mut note = "Note: DMARC exists but is in monitoring mode only".to_string();
                if let Some(sp) = result.dmarc.subdomain_policy.filter(|sp| sp.is_enforcing()) {
                    let _ = write!(note, " (subdomains have stricter policy: {sp})");
                }
                note
            });
            Self {
                spoofable: true,
                headline: "✅ This domain can likely be spoofed",
                note,
            }
        } else {
            Self {
                spoofable: false,
                headline: "⚠️ This domain is difficult to spoof",
                note: Some(
                    "Consider using a different sender domain or ensure your \
                     mail-envelope domain has proper SPF records"
                        .to_string(),
                ),
            }
        }
    }
}

/// Full breakdown of a check result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailPanel {
    pub domain: String,
    pub spf: DetailRow,
    pub dkim: DetailRow,
    pub dmarc: DetailRow,
    pub records: Vec<RecordBlock>,
    pub recommendation: Recommendation,
    /// Free text supplied by the server.
    pub message: String,
}

impl DetailPanel {
    #[must_use]
    pub fn from_result(domain: &str, result: &DomainCheckResult) -> Self {
        let spf = if result.spf.exists {
            DetailRow {
                label: "SPF",
                found: true,
                detail: format!(" - {}", result.spf.status),
                tone: Tone::Success,
            }
        } else {
            DetailRow::not_found("SPF", Tone::Danger)
        };

        let dkim = if result.dkim.exists {
            DetailRow {
                label: "DKIM",
                found: true,
                detail: format!(
                    " (selector: {})",
                    result.dkim.selector.as_deref().unwrap_or("unknown")
                ),
                tone: Tone::Success,
            }
        } else {
            DetailRow::not_found("DKIM", Tone::Warning)
        };

        let dmarc = if result.dmarc.exists {
            let mut detail = format!(
                " - Main Policy: {}",
                result.dmarc.policy.map_or("Unknown", DmarcPolicy::as_str)
            );
            if let Some(sp) = result.dmarc.distinct_subdomain_policy() {
                let _ = write!(detail, " / Subdomain Policy: {sp}");
            }
            DetailRow {
                label: "DMARC",
                found: true,
                detail,
                tone: policy_tone(result.dmarc.policy),
            }
        } else {
            DetailRow::not_found("DMARC", Tone::Danger)
        };

        let records = [
            ("SPF Record", result.spf.record.as_ref()),
            ("DMARC Record", result.dmarc.record.as_ref()),
        ]
        .into_iter()
        .filter_map(|(label, record)| {
            record.map(|record| RecordBlock {
                label,
                record: record.clone(),
            })
        })
        .collect();

        Self {
            domain: domain.to_string(),
            spf,
            dkim,
            dmarc,
            records,
            recommendation: Recommendation::for_result(result),
            message: result.message.clone(),
        }
    }

    #[must_use]
    pub fn rows(&self) -> [&DetailRow; 3] {
        [&self.spf, &self.dkim, &self.dmarc]
    }

    /// Render the panel as the HTML body of the domain details card.
    ///
    /// All server-supplied text is escaped.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut html = format!(
            r#"<h6 class="mb-2">Security Details for {}</h6>"#,
            encode_text(&self.domain)
        );

        for row in self.rows() {
            let _ = write!(
                html,
                r#"<div class="mb-1"><strong>{}:</strong> <span class="text-{}">{}</span>{}</div>"#,
                row.label,
                row.tone.class(),
                row.marker(),
                encode_text(&row.detail)
            );
        }

        for block in &self.records {
            let _ = write!(
                html,
                r#"<div class="mt-2 small"><strong>{}:</strong><br><code>{}</code></div>"#,
                block.label,
                encode_text(&block.record)
            );
        }

        let rec = &self.recommendation;
        let _ = write!(
            html,
            r#"<div class="mt-3 p-2 bg-{} bg-opacity-10 rounded"><strong>{}</strong>"#,
            if rec.spoofable { "success" } else { "danger" },
            rec.headline
        );
        if let Some(note) = &rec.note {
            let _ = write!(html, "<br><small>{}</small>", encode_text(note));
        }
        html.push_str("</div>");

        let _ = write!(
            html,
            r#"<div class="mt-3 small text-muted">{}</div>"#,
            encode_text(&self.message)
        );
        html
    }
}

const fn policy_tone(policy: Option<DmarcPolicy>) -> Tone {
    match policy {
        Some(DmarcPolicy::None) => Tone::Warning,
        _ => Tone::Success,
    }
}

impl fmt::Display for DetailPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Security Details for {}", self.domain)?;
        for row in self.rows() {
            writeln!(f, "{row}")?;
        }
        for block in &self.records {
            writeln!(f, "{}:\n  {}", block.label, block.record)?;
        }
        writeln!(f, "{}", self.recommendation.headline)?;
        if let Some(note) = &self.recommendation.note {
            writeln!(f, "  {note}")?;
        }
        if !self.message.is_empty() {
            write!(f, "{}", self.message)?;
        }
        Ok(())
    }
}
