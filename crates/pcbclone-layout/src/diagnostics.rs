use pcbclone_board::NetCode;
use serde::Serialize;

use crate::CloneError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
    Fatal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticCode {
    Progress,
    OutsideTemplateArea,
    UnexpectedInTemplate,
    NonUnanimousNet,
    UnknownNet,
    InvalidConfig,
    InvalidDesignator,
    MissingMarkerZone,
    MultipleMarkerZones,
    MissingClone,
    FootprintMismatch,
    PadMismatch,
    Document,
}

/// The board item a diagnostic is about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum EntityRef {
    Footprint(String),
    Net(NetCode),
    Zone(usize),
    Track(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: DiagnosticCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<EntityRef>,
}

/// Collects everything a run reports and mirrors it to `tracing`.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    events: Vec<Diagnostic>,
}

impl Diagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        let code = diagnostic.code;
        match diagnostic.severity {
            Severity::Info => tracing::info!(?code, "{}", diagnostic.message),
            Severity::Warning => tracing::warn!(?code, "{}", diagnostic.message),
            Severity::Error | Severity::Fatal => {
                tracing::error!(?code, "{}", diagnostic.message)
            }
        }
        self.events.push(diagnostic);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Diagnostic {
            severity: Severity::Info,
            code: DiagnosticCode::Progress,
            message: message.into(),
            entity: None,
        });
    }

    pub fn warn(&mut self, code: DiagnosticCode, message: impl Into<String>, entity: EntityRef) {
        self.push(Diagnostic {
            severity: Severity::Warning,
            code,
            message: message.into(),
            entity: Some(entity),
        });
    }

    pub fn error(&mut self, code: DiagnosticCode, message: impl Into<String>, entity: EntityRef) {
        self.push(Diagnostic {
            severity: Severity::Error,
            code,
            message: message.into(),
            entity: Some(entity),
        });
    }

    /// Record the condition that aborted the run.
    pub fn fatal(&mut self, err: &CloneError) {
        self.push(Diagnostic {
            severity: Severity::Fatal,
            code: err.code(),
            message: err.to_string(),
            entity: None,
        });
    }

    #[must_use]
    pub fn events(&self) -> &[Diagnostic] {
        &self.events
    }

    /// Events at `Warning` severity or above.
    pub fn problems(&self) -> impl Iterator<Item = &Diagnostic> {
        self.events
            .iter()
            .filter(|d| d.severity >= Severity::Warning)
    }

    pub fn with_code(&self, code: DiagnosticCode) -> impl Iterator<Item = &Diagnostic> {
        self.events.iter().filter(move |d| d.code == code)
    }

    #[must_use]
    pub fn into_events(self) -> Vec<Diagnostic> {
        self.events
    }
}
