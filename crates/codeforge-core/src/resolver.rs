//! Package manager resolution
//!
//! Precedence:
//! 1. An invocation hint wins, even when that manager was not found on the host
//! 2. No managers available is an error
//! 3. A single available manager is selected without asking
//! 4. Several available managers need a choice, made by the user or by
//!    [`SelectionPolicy::First`]

use crate::error::{Error, Result};
use crate::types::{AvailableManagers, PackageManager, SelectionPolicy};
use tracing::debug;

/// How the package manager was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Named by the launching package manager
    Hinted,
    /// The only one installed
    OnlyAvailable,
    /// First in priority order among several
    FirstAvailable,
    /// Picked by the user among several
    UserChoice,
}

/// Outcome of [`resolve`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A manager was chosen
    Selected {
        manager: PackageManager,
        selection: Selection,
    },
    /// The caller must ask the user to choose among these candidates
    Choose(Vec<PackageManager>),
}

/// Resolve the package manager to use
pub fn resolve(
    hint: Option<PackageManager>,
    available: &AvailableManagers,
    policy: SelectionPolicy,
) -> Result<Resolution> {
    if let Some(manager) = hint {
        if !available.is_empty() && !available.contains(manager) {
            debug!("Hinted manager {} was not found on the search path", manager);
        }
        return Ok(Resolution::Selected {
            manager,
            selection: Selection::Hinted,
        });
    }

    match (available.as_slice(), policy) {
        ([], _) => Err(Error::NoManagerFound),
        ([only], _) => Ok(Resolution::Selected {
            manager: *only,
            selection: Selection::OnlyAvailable,
        }),
        ([first, ..], SelectionPolicy::First) => Ok(Resolution::Selected {
            manager: *first,
            selection: Selection::FirstAvailable,
        }),
        (candidates, SelectionPolicy::Prompt) => Ok(Resolution::Choose(candidates.to_vec())),
    }
}

/// Apply the user's pick to the candidates of [`Resolution::Choose`]
pub fn choose(candidates: &[PackageManager], index: usize) -> Result<Resolution> {
    let manager = candidates.get(index).copied().ok_or_else(|| {
        Error::prompt(format!(
            "selection {} is out of range for {} package managers",
            index,
            candidates.len()
        ))
    })?;

    Ok(Resolution::Selected {
        manager,
        selection: Selection::UserChoice,
    })
}
