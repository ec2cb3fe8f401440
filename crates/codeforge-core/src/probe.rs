//! Environment probing
//!
//! Detects which package manager launched the tool and which package
//! managers are installed on the host.

use crate::host::ExecutableResolver;
use crate::types::{AvailableManagers, PackageManager};
use tracing::{debug, warn};

/// Environment variable set by npm, yarn, and pnpm for spawned scripts
pub const USER_AGENT_ENV: &str = "npm_config_user_agent";

/// Infer the launching package manager from a user agent string
///
/// User agents look like `pnpm/9.1.0 npm/? node/v20.11.0 linux x64`; only
/// the leading product name is considered.
pub fn hint_from_user_agent(user_agent: Option<&str>) -> Option<PackageManager> {
    let agent = user_agent?;
    [PackageManager::Yarn, PackageManager::Pnpm, PackageManager::Npm]
        .into_iter()
        .find(|pm| agent.starts_with(pm.as_str()))
}

/// Infer the launching package manager from the process environment
pub fn detect_invocation_hint() -> Option<PackageManager> {
    let agent = std::env::var(USER_AGENT_ENV).ok();
    let hint = hint_from_user_agent(agent.as_deref());
    debug!("Invocation hint from {}: {:?}", USER_AGENT_ENV, hint);
    hint
}

/// Probe the search path for each package manager in priority order
///
/// Managers that cannot be resolved are logged and left out; an empty
/// result is valid.
pub fn detect_available_managers(resolver: &dyn ExecutableResolver) -> AvailableManagers {
    let mut found = Vec::new();

    for pm in PackageManager::all() {
        match resolver.which(pm.as_str()) {
            Ok(path) => {
                debug!("Found {} at {}", pm, path.display());
                found.push(pm);
            }
            Err(e) => warn!("{}", e),
        }
    }

    AvailableManagers::new(found)
}
