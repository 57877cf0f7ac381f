//! Party fixture loader.
//!
//! Parties normally come from the character system; fixtures let the
//! headless simulator and tests run without it.

use std::path::Path;

use delve_core::{PartyMember, RuntimePartyState};
use tracing::debug;

use crate::loaders::{LoadResult, parse_ron};

/// Loader for `party.ron`: a list of party members.
pub struct PartyLoader;

impl PartyLoader {
    pub fn load(path: &Path) -> LoadResult<RuntimePartyState> {
        let members: Vec<PartyMember> = parse_ron(path, "party")?;
        let party = RuntimePartyState::new(members)
            .map_err(|e| anyhow::anyhow!("Invalid party in {}: {}", path.display(), e))?;
        debug!(members = party.len(), "loaded party fixture");
        Ok(party)
    }
}
