//! Search dispatch by filter object class.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use common::{AppError, AppResult};
use domain::DirectoryEntry;

use crate::directory::EntrySynthesizer;

/// Object classes the backend can answer for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterClass {
    /// Organizational units, then groups, then users
    Top,
    OrganizationalUnit,
    PosixGroup,
    /// Also selected by a filter without an object class
    PosixAccount,
}

impl FromStr for FilterClass {
    type Err = AppError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.to_ascii_lowercase().as_str() {
            "top" => Ok(FilterClass::Top),
            "organizationalunit" => Ok(FilterClass::OrganizationalUnit),
            "posixgroup" => Ok(FilterClass::PosixGroup),
            "posixaccount" | "" => Ok(FilterClass::PosixAccount),
            other => Err(AppError::operations(format!(
                "unhandled filter type: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for FilterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            FilterClass::Top => "top",
            FilterClass::OrganizationalUnit => "organizationalunit",
            FilterClass::PosixGroup => "posixgroup",
            FilterClass::PosixAccount => "posixaccount",
        };
        f.write_str(token)
    }
}

/// Selects the synthesis routines for a filter class.
pub struct SearchDispatcher<'a> {
    synth: EntrySynthesizer<'a>,
}

impl<'a> SearchDispatcher<'a> {
    pub fn new(synth: EntrySynthesizer<'a>) -> Self {
        Self { synth }
    }

    /// Entries for an object-class token produced by the filter parser
    pub fn search(&self, object_class: &str) -> AppResult<Vec<DirectoryEntry>> {
        let class: FilterClass = object_class.parse()?;
        Ok(self.dispatch(class))
    }

    pub fn dispatch(&self, class: FilterClass) -> Vec<DirectoryEntry> {
        debug!("Dispatching search for object class {}", class);
        match class {
            FilterClass::Top => {
                let mut entries = self.synth.organizational_units();
                entries.extend(self.synth.groups());
                entries.extend(self.synth.users());
                entries
            }
            FilterClass::OrganizationalUnit => self.synth.organizational_units(),
            FilterClass::PosixGroup => self.synth.groups(),
            FilterClass::PosixAccount => self.synth.users(),
        }
    }
}
