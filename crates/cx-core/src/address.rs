//! Content addresses and their canonical string form
//!
//! Every content unit is keyed by a [`ContentAddress`]. The canonical form is
//! `i4x://<org>/<course>/<category>/<name>[@<revision>]`.

use crate::error::{CourseExportError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Tag carried by every content address
pub const ADDRESS_TAG: &str = "i4x";

/// Revision name used for unpublished content
pub const DRAFT_REVISION: &str = "draft";

/// Hierarchical address of a content unit
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentAddress {
    org: String,
    course: String,
    category: String,
    name: String,
    revision: Option<String>,
}

impl ContentAddress {
    /// Create an address, validating every component
    pub fn new(
        org: impl Into<String>,
        course: impl Into<String>,
        category: impl Into<String>,
        name: impl Into<String>,
        revision: Option<String>,
    ) -> Result<Self> {
        let address = Self {
            org: org.into(),
            course: course.into(),
            category: category.into(),
            name: name.into(),
            revision,
        };
        address.validate()?;
        Ok(address)
    }

    fn validate(&self) -> Result<()> {
        let mut parts = vec![
            ("org", self.org.as_str()),
            ("course", self.course.as_str()),
            ("category", self.category.as_str()),
            ("name", self.name.as_str()),
        ];
        if let Some(revision) = &self.revision {
            parts.push(("revision", revision.as_str()));
        }

        for (label, value) in parts {
            if value.is_empty() {
                return Err(CourseExportError::MalformedAddress(format!(
                    "empty {} component",
                    label
                )));
            }
            if value
                .chars()
                .any(|c| c == '/' || c == '@' || c.is_whitespace())
            {
                return Err(CourseExportError::MalformedAddress(format!(
                    "invalid character in {} component: {:?}",
                    label, value
                )));
            }
        }
        Ok(())
    }

    /// Encode to the canonical string form
    pub fn encode(&self) -> String {
        self.to_string()
    }

    /// Decode from the canonical string form
    pub fn decode(s: &str) -> Result<Self> {
        let malformed = || CourseExportError::MalformedAddress(s.to_string());

        let prefix = format!("{}://", ADDRESS_TAG);
        let rest = s.strip_prefix(&prefix).ok_or_else(malformed)?;

        let parts: Vec<&str> = rest.split('/').collect();
        if parts.len() != 4 {
            return Err(malformed());
        }

        let (name, revision) = match parts[3].split_once('@') {
            Some((name, revision)) => (name, Some(revision.to_string())),
            None => (parts[3], None),
        };

        Self::new(parts[0], parts[1], parts[2], name, revision)
            .map_err(|_| malformed())
    }

    pub fn org(&self) -> &str {
        &self.org
    }

    pub fn course(&self) -> &str {
        &self.course
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn revision(&self) -> Option<&str> {
        self.revision.as_deref()
    }

    /// Whether this address points at unpublished content
    pub fn is_draft(&self) -> bool {
        self.revision.as_deref() == Some(DRAFT_REVISION)
    }

    /// The same address with the revision dropped
    pub fn without_revision(&self) -> Self {
        Self {
            revision: None,
            ..self.clone()
        }
    }

    /// The same address at the given revision
    pub fn with_revision(&self, revision: impl Into<String>) -> Result<Self> {
        Self::new(
            self.org.clone(),
            self.course.clone(),
            self.category.clone(),
            self.name.clone(),
            Some(revision.into()),
        )
    }

    /// Course identifier `<org>/<course>/<run>` for a course address
    pub fn course_id(&self) -> String {
        format!("{}/{}/{}", self.org, self.course, self.name)
    }
}

impl fmt::Display for ContentAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}://{}/{}/{}/{}",
            ADDRESS_TAG, self.org, self.course, self.category, self.name
        )?;
        if let Some(revision) = &self.revision {
            write!(f, "@{}", revision)?;
        }
        Ok(())
    }
}

impl FromStr for ContentAddress {
    type Err = CourseExportError;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

impl Serialize for ContentAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for ContentAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::decode(&s).map_err(serde::de::Error::custom)
    }
}
