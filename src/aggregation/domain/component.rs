use crate::shared::error::VerdictError;
use std::fmt;
use std::str::FromStr;

/// NVR identifier of a software component, split into its three parts
///
/// Parsing is purely syntactic: the last two hyphen-delimited tokens are
/// the version and the release, every preceding token (rejoined with
/// hyphens) is the name. Nothing is validated against a registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComponentIdentifier {
    name: String,
    version: String,
    release: String,
}

impl ComponentIdentifier {
    /// Parses an NVR string such as `python-requests-2.6.0-1.el7`
    ///
    /// # Errors
    /// Returns `VerdictError::InvalidNvr` when the input has fewer than
    /// three hyphen-separated tokens or any of the parts comes out empty.
    pub fn parse(nvr: &str) -> Result<Self, VerdictError> {
        let mut tokens = nvr.rsplitn(3, '-');
        let release = tokens.next().unwrap_or_default();
        let version = tokens.next().unwrap_or_default();
        let name = tokens.next().unwrap_or_default();

        if name.is_empty() || version.is_empty() || release.is_empty() {
            return Err(VerdictError::InvalidNvr {
                nvr: nvr.to_string(),
                reason: "expected at least three hyphen-separated tokens".to_string(),
            });
        }

        Ok(Self {
            name: name.to_string(),
            version: version.to_string(),
            release: release.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn release(&self) -> &str {
        &self.release
    }
}

impl FromStr for ComponentIdentifier {
    type Err = VerdictError;

    fn from_str(nvr: &str) -> Result<Self, Self::Err> {
        Self::parse(nvr)
    }
}

impl fmt::Display for ComponentIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.name, self.version, self.release)
    }
}
