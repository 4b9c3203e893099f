//! Serializable snapshots of a match.
//!
//! [`MatchState`] is the read model handed to presentation layers.
//! [`MatchRecord`] carries everything needed to rebuild a [`crate::game::Match`],
//! as JSON or wrapped in a checksummed binary envelope.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::config::RuleConfig;
use crate::error::RecordError;
use crate::types::{MatchId, MoveRecord, PlayerId, Square};

const MAGIC: &[u8; 4] = b"DRGT";
const VERSION: u32 = 1;
const HEADER_SIZE: usize = 16;

/// Public game state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchState {
    pub id: Option<MatchId>,
    pub dark_player: PlayerId,
    pub light_player: PlayerId,
    /// Numeric wire encoding, `board[row][col]`.
    pub board: Board,
    pub current_player: PlayerId,
    pub winner: Option<PlayerId>,
    pub wager: u64,
    pub wager_locked: bool,
    pub started: bool,
    pub over: bool,
    pub move_count: usize,
}

/// Full persisted form of a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub id: Option<MatchId>,
    pub dark_player: PlayerId,
    pub light_player: PlayerId,
    pub board: Board,
    pub current_player: PlayerId,
    pub winner: Option<PlayerId>,
    pub wager: u64,
    pub wager_locked: bool,
    pub started: bool,
    pub over: bool,
    #[serde(default)]
    pub move_history: Vec<MoveRecord>,
    #[serde(default)]
    pub pending_capture: Option<Square>,
    #[serde(default)]
    pub rules: RuleConfig,
}

impl MatchRecord {
    pub fn to_json(&self) -> Result<String, RecordError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, RecordError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Binary envelope:
    /// magic (4) | version u32 LE | payload length u32 LE | CRC32 u32 LE | JSON payload.
    pub fn to_bytes(&self) -> Result<Vec<u8>, RecordError> {
        let payload = serde_json::to_vec(self)?;
        let mut out = Vec::with_capacity(HEADER_SIZE + payload.len());
        out.extend_from_slice(MAGIC);
        out.extend_from_slice(&VERSION.to_le_bytes());
        out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        out.extend_from_slice(&crc32fast::hash(&payload).to_le_bytes());
        out.extend_from_slice(&payload);
        Ok(out)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, RecordError> {
        if data.len() < HEADER_SIZE {
            return Err(RecordError::TooShort {
                expected: HEADER_SIZE,
                actual: data.len(),
            });
        }

        if &data[0..4] != MAGIC {
            return Err(RecordError::BadMagic);
        }

        let version = read_u32_le(data, 4);
        if version != VERSION {
            return Err(RecordError::UnsupportedVersion {
                expected: VERSION,
                actual: version,
            });
        }

        let payload = &data[HEADER_SIZE..];
        let declared = read_u32_le(data, 8) as usize;
        if declared != payload.len() {
            return Err(RecordError::LengthMismatch {
                expected: declared,
                actual: payload.len(),
            });
        }

        let expected_crc = read_u32_le(data, 12);
        let actual_crc = crc32fast::hash(payload);
        if actual_crc != expected_crc {
            return Err(RecordError::Checksum {
                expected: expected_crc,
                actual: actual_crc,
            });
        }

        Ok(serde_json::from_slice(payload)?)
    }
}

/// Caller guarantees `offset + 4 <= data.len()`.
fn read_u32_le(data: &[u8], offset: usize) -> u32 {
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&data[offset..offset + 4]);
    u32::from_le_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Match;

    fn sample() -> MatchRecord {
        let mut game = Match::new(PlayerId::new("alice"), PlayerId::new("bob"), 100);
        game.set_id(MatchId(7));
        game.start();
        game.apply_move(2, 1, 3, 0).unwrap();
        game.to_record()
    }

    #[test]
    fn json_uses_camel_case_and_numeric_board() {
        let json = sample().to_json().unwrap();

        assert!(json.contains("\"darkPlayer\":\"alice\""));
        assert!(json.contains("\"currentPlayer\":\"bob\""));
        assert!(json.contains("\"wagerLocked\":true"));
        assert!(json.contains("\"board\":[[0,1,0,1,0,1,0,1],"));
        assert!(json.contains("\"piece\":1"));
    }

    #[test]
    fn json_without_optional_sections_still_loads() {
        let record = sample();
        let mut value = serde_json::to_value(&record).unwrap();
        let object = value.as_object_mut().unwrap();
        object.remove("moveHistory");
        object.remove("pendingCapture");
        object.remove("rules");

        let loaded = MatchRecord::from_json(&value.to_string()).unwrap();

        assert!(loaded.move_history.is_empty());
        assert_eq!(loaded.pending_capture, None);
        assert_eq!(loaded.rules, RuleConfig::default());
        assert_eq!(loaded.board, record.board);
    }

    #[test]
    fn bytes_envelope_reloads_identically() {
        let record = sample();

        let bytes = record.to_bytes().unwrap();

        assert_eq!(&bytes[0..4], MAGIC);
        assert_eq!(MatchRecord::from_bytes(&bytes).unwrap(), record);
    }

    #[test]
    fn corrupted_payload_fails_checksum() {
        let mut bytes = sample().to_bytes().unwrap();
        let last = bytes.len() - 2;
        bytes[last] ^= 0x20;

        let err = MatchRecord::from_bytes(&bytes).unwrap_err();

        assert!(matches!(err, RecordError::Checksum { .. }));
    }

    #[test]
    fn malformed_headers_are_rejected() {
        let bytes = sample().to_bytes().unwrap();

        assert!(matches!(
            MatchRecord::from_bytes(&bytes[..10]),
            Err(RecordError::TooShort { actual: 10, .. })
        ));

        let mut bad_magic = bytes.clone();
        bad_magic[0] = b'X';
        assert!(matches!(
            MatchRecord::from_bytes(&bad_magic),
            Err(RecordError::BadMagic)
        ));

        let mut bad_version = bytes.clone();
        bad_version[4] = 9;
        assert!(matches!(
            MatchRecord::from_bytes(&bad_version),
            Err(RecordError::UnsupportedVersion { actual: 9, .. })
        ));

        assert!(matches!(
            MatchRecord::from_bytes(&bytes[..bytes.len() - 1]),
            Err(RecordError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn invalid_board_code_is_a_decode_error() {
        let mut value = serde_json::to_value(sample()).unwrap();
        value["board"][3][0] = serde_json::json!(7);

        let err = MatchRecord::from_json(&value.to_string()).unwrap_err();

        assert!(matches!(err, RecordError::Json(_)));
    }
}
