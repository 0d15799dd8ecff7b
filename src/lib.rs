//! Sender-domain spoofability checker
//!
//! Watches the free-text sender address of an email composition form,
//! asks a security-evaluation service whether the address's domain can
//! be spoofed, and renders the SPF / DKIM / DMARC findings.
//!
//! Edits go through [`DomainChecker::request`], which debounces them;
//! only the response to the latest request is ever displayed.

mod address;
mod api;
mod checker;
mod config;
mod debounce;
mod error;
mod mode;
mod model;
mod notify;
mod render;
mod view;

pub use address::{domain_of, suggest_spoof_domain};
pub use api::{DomainCheckApi, HttpCheckApi};
pub use checker::{CheckerState, DomainChecker};
pub use config::CheckerConfig;
pub use debounce::Debouncer;
pub use error::{Error, Result};
pub use mode::FieldMode;
pub use model::{CheckReport, DkimResult, DmarcPolicy, DmarcResult, DomainCheckResult, SpfResult};
pub use notify::{Level, Notification, Notifier, NullNotifier, TracingNotifier};
pub use render::{
    CHECKING_TEXT, DetailPanel, DetailRow, ERROR_TEXT, NOT_FOUND_TEXT, PROTECTED_TEXT,
    Recommendation, RecordBlock, SPOOFABLE_TEXT, StatusLine, Tone,
};
pub use view::{CheckerView, MemoryView, ViewSnapshot};
