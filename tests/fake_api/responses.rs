//! Scripted answers for the fake evaluation service
//!
//! ```ignore
//! let responses = ResponsesBuilder::new()
//!     .domain("example.com")
//!         .json(r#"{"spoofable":true,"message":"ok"}"#)
//!     .domain("slow.test")
//!         .delay_ms(800)
//!         .json(r#"{"spoofable":false,"message":"late"}"#)
//!     .domain("broken.test")
//!         .status(500)
//!     .build();
//! ```
//!
//! Domains without a script get `404` and an `{"error": ...}` body,
//! which the client must treat as a failure.

use std::time::Duration;

/// What the server sends back for one domain.
#[derive(Debug, Clone)]
pub struct Scripted {
    pub domain: String,
    pub status: u16,
    pub body: String,
    pub delay: Duration,
}

/// All scripted answers.
#[derive(Debug, Clone, Default)]
pub struct Responses {
    pub entries: Vec<Scripted>,
}

impl Responses {
    /// Look up the answer for a domain (exact match).
    pub fn get(&self, domain: &str) -> Option<&Scripted> {
        self.entries.iter().find(|e| e.domain == domain)
    }
}

/// Builder for `Responses`.
///
/// `.domain(name)` starts a new entry (default: `200`, empty JSON
/// object, no delay); the following calls configure that entry.
pub struct ResponsesBuilder {
    entries: Vec<Scripted>,
}

#[allow(dead_code)]
impl ResponsesBuilder {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn domain(mut self, name: &str) -> Self {
        self.entries.push(Scripted {
            domain: name.to_string(),
            status: 200,
            body: "{}".to_string(),
            delay: Duration::ZERO,
        });
        self
    }

    pub fn json(self, body: &str) -> Self {
        self.with_last(|e| e.body = body.to_string())
    }

    pub fn status(self, status: u16) -> Self {
        self.with_last(|e| e.status = status)
    }

    pub fn delay_ms(self, ms: u64) -> Self {
        self.with_last(|e| e.delay = Duration::from_millis(ms))
    }

    pub fn build(self) -> Responses {
        Responses {
            entries: self.entries,
        }
    }

    /// # Panics
    ///
    /// Panics if called before any `.domain()` call.
    fn with_last(mut self, f: impl FnOnce(&mut Scripted)) -> Self {
        f(self
            .entries
            .last_mut()
            .expect("call .domain() before configuring a response"));
        self
    }
}
