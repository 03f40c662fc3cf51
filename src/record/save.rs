//! Binary save format for resuming a match.
//!
//! Layout: 4-byte magic `RLLY`, little-endian `u32` version, then the
//! bincode-encoded `MatchState` (history included).

use thiserror::Error;

use crate::core::{MatchState, TeamId};

/// Current save format version.
pub const SAVE_VERSION: u32 = 1;

const MAGIC: &[u8; 4] = b"RLLY";
const HEADER_LEN: usize = 8;

#[derive(Error, Debug)]
pub enum SaveError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("Not a match save")]
    BadMagic,

    #[error("Save data truncated: {len} bytes")]
    Truncated { len: usize },

    #[error("Version mismatch: found {found}, expected {expected}")]
    VersionMismatch { found: u32, expected: u32 },

    #[error("Invalid positions for {team} ({location})")]
    InvalidPositions { team: TeamId, location: String },
}

/// Encode a state for storage.
pub fn encode_state(state: &MatchState) -> Result<Vec<u8>, SaveError> {
    let body = bincode::serialize(state)?;

    let mut bytes = Vec::with_capacity(HEADER_LEN + body.len());
    bytes.extend_from_slice(MAGIC);
    bytes.extend_from_slice(&SAVE_VERSION.to_le_bytes());
    bytes.extend_from_slice(&body);

    tracing::debug!(bytes = bytes.len(), history = state.history.len(), "match state encoded");
    Ok(bytes)
}

/// Decode a state written by `encode_state`.
pub fn decode_state(bytes: &[u8]) -> Result<MatchState, SaveError> {
    if bytes.len() < HEADER_LEN {
        return Err(SaveError::Truncated { len: bytes.len() });
    }

    let (header, body) = bytes.split_at(HEADER_LEN);
    if &header[..4] != MAGIC {
        return Err(SaveError::BadMagic);
    }

    let mut version = [0u8; 4];
    version.copy_from_slice(&header[4..]);
    let found = u32::from_le_bytes(version);
    if found != SAVE_VERSION {
        return Err(SaveError::VersionMismatch {
            found,
            expected: SAVE_VERSION,
        });
    }

    let state: MatchState = bincode::deserialize(body)?;
    check_positions(&state)?;

    tracing::debug!(history = state.history.len(), "match state decoded");
    Ok(state)
}

/// Every position pair, live and in history, must hold each player once.
fn check_positions(state: &MatchState) -> Result<(), SaveError> {
    let live = std::iter::once((None, &state.team_positions));
    let snapshots = state
        .history
        .iter()
        .enumerate()
        .map(|(i, snapshot)| (Some(i), &snapshot.team_positions));

    for (snapshot, positions) in live.chain(snapshots) {
        if let Some((team, _)) = positions.iter().find(|(_, pair)| !pair.is_permutation()) {
            let location = match snapshot {
                Some(i) => format!("history entry {i}"),
                None => "live state".to_string(),
            };
            tracing::warn!(%team, %location, "rejected save with invalid positions");
            return Err(SaveError::InvalidPositions { team, location });
        }
    }

    Ok(())
}
