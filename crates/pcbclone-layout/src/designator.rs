use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::CloneError;

fn designator_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([A-Za-z]+)([0-9]+)$").expect("valid designator regex"))
}

/// A component reference split into its letter prefix and numeric index, e.g. `D201`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Designator {
    pub prefix: String,
    pub index: u32,
}

impl Designator {
    pub fn parse(s: &str) -> Result<Self, CloneError> {
        let invalid = || CloneError::InvalidDesignator(s.to_string());
        let caps = designator_re().captures(s).ok_or_else(invalid)?;
        let index = caps[2].parse::<u32>().map_err(|_| invalid())?;
        Ok(Self {
            prefix: caps[1].to_string(),
            index,
        })
    }

    /// Same prefix, index moved up by `by`.
    #[must_use]
    pub fn offset(&self, by: u32) -> Self {
        Self {
            prefix: self.prefix.clone(),
            index: self.index.saturating_add(by),
        }
    }
}

impl fmt::Display for Designator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix, self.index)
    }
}
