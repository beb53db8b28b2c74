//! Room sequence configuration
//!
//! The four-room progression ships as built-in defaults and can be
//! overridden by a `rooms.ron` file next to the binary. RON keeps the file
//! hand-editable; validation rejects sequences that would break the state
//! machine (gaps in numbering, zero breakables, absurd time limits) before
//! the game starts.

use std::fs;
use std::path::Path;
use serde::{Serialize, Deserialize};

/// Validation limits for room sequence files
pub mod limits {
    /// Maximum number of rooms in a sequence
    pub const MAX_ROOMS: usize = 16;
    /// Maximum time limit per room in seconds
    pub const MAX_TIME_LIMIT_SECS: u32 = 3600;
    /// Maximum breakables per room
    pub const MAX_BREAKABLES: u32 = 128;
}

/// Error type for configuration loading
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    ValidationError(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::ParseError(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
            ConfigError::ValidationError(e) => write!(f, "Validation error: {}", e),
        }
    }
}

/// Room difficulty tier. Display strings feed the door signs and the HUD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Medium => "MEDIUM",
            Difficulty::Hard => "HARD",
            Difficulty::Expert => "EXPERT",
        }
    }
}

/// One room in the progression. Immutable after load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomConfig {
    /// Room number, 1-based, contiguous
    pub number: usize,
    pub difficulty: Difficulty,
    pub time_limit_secs: u32,
    pub breakable_count: u32,
}

/// The built-in four-room progression.
pub fn standard_rooms() -> Vec<RoomConfig> {
    vec![
        RoomConfig { number: 1, difficulty: Difficulty::Easy, time_limit_secs: 120, breakable_count: 10 },
        RoomConfig { number: 2, difficulty: Difficulty::Medium, time_limit_secs: 100, breakable_count: 14 },
        RoomConfig { number: 3, difficulty: Difficulty::Hard, time_limit_secs: 80, breakable_count: 18 },
        RoomConfig { number: 4, difficulty: Difficulty::Expert, time_limit_secs: 60, breakable_count: 22 },
    ]
}

/// Validate a room sequence.
pub fn validate_rooms(rooms: &[RoomConfig]) -> Result<(), ConfigError> {
    if rooms.is_empty() {
        return Err(ConfigError::ValidationError("no rooms defined".to_string()));
    }
    if rooms.len() > limits::MAX_ROOMS {
        return Err(ConfigError::ValidationError(format!(
            "too many rooms ({} > {})", rooms.len(), limits::MAX_ROOMS
        )));
    }

    for (i, room) in rooms.iter().enumerate() {
        let context = format!("room[{}]", i);

        // Numbering must be 1, 2, 3, ...: the state machine advances by one
        if room.number != i + 1 {
            return Err(ConfigError::ValidationError(format!(
                "{}: expected number {} but found {}", context, i + 1, room.number
            )));
        }
        if room.time_limit_secs == 0 {
            return Err(ConfigError::ValidationError(format!(
                "{}: time limit must be at least 1 second", context
            )));
        }
        if room.time_limit_secs > limits::MAX_TIME_LIMIT_SECS {
            return Err(ConfigError::ValidationError(format!(
                "{}: time limit too large ({} > {})",
                context, room.time_limit_secs, limits::MAX_TIME_LIMIT_SECS
            )));
        }
        if room.breakable_count == 0 {
            return Err(ConfigError::ValidationError(format!(
                "{}: breakable count must be at least 1", context
            )));
        }
        if room.breakable_count > limits::MAX_BREAKABLES {
            return Err(ConfigError::ValidationError(format!(
                "{}: too many breakables ({} > {})",
                context, room.breakable_count, limits::MAX_BREAKABLES
            )));
        }
    }

    Ok(())
}

/// Load and validate a room sequence from a RON file.
pub fn load_rooms<P: AsRef<Path>>(path: P) -> Result<Vec<RoomConfig>, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let rooms: Vec<RoomConfig> = ron::from_str(&contents)?;
    validate_rooms(&rooms)?;
    Ok(rooms)
}

/// Load the room sequence: `rooms.ron` if present, built-in defaults
/// otherwise. A present-but-invalid file is an error, not a fallback:
/// silently ignoring a broken override would be worse than not starting.
pub fn load_rooms_or_default<P: AsRef<Path>>(path: P) -> Result<Vec<RoomConfig>, ConfigError> {
    if path.as_ref().exists() {
        let rooms = load_rooms(&path)?;
        println!("Loaded {} rooms from {}", rooms.len(), path.as_ref().display());
        Ok(rooms)
    } else {
        Ok(standard_rooms())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_standard_rooms_are_valid() {
        let rooms = standard_rooms();
        assert_eq!(rooms.len(), 4);
        validate_rooms(&rooms).unwrap();

        // Room 1 matches the advertised starting difficulty
        assert_eq!(rooms[0].number, 1);
        assert_eq!(rooms[0].difficulty, Difficulty::Easy);
        assert_eq!(rooms[0].time_limit_secs, 120);
        assert_eq!(rooms[0].breakable_count, 10);

        // Later rooms get harder: less time, more to break
        for pair in rooms.windows(2) {
            assert!(pair[1].time_limit_secs < pair[0].time_limit_secs);
            assert!(pair[1].breakable_count > pair[0].breakable_count);
        }
    }

    #[test]
    fn test_empty_sequence_rejected() {
        assert!(validate_rooms(&[]).is_err());
    }

    #[test]
    fn test_gap_in_numbering_rejected() {
        let mut rooms = standard_rooms();
        rooms[2].number = 5;
        let err = validate_rooms(&rooms).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_zero_breakables_rejected() {
        let mut rooms = standard_rooms();
        rooms[1].breakable_count = 0;
        assert!(validate_rooms(&rooms).is_err());
    }

    #[test]
    fn test_zero_time_limit_rejected() {
        let mut rooms = standard_rooms();
        rooms[0].time_limit_secs = 0;
        assert!(validate_rooms(&rooms).is_err());
    }

    #[test]
    fn test_ron_round_trip() {
        let rooms = standard_rooms();
        let text = ron::to_string(&rooms).unwrap();
        let parsed: Vec<RoomConfig> = ron::from_str(&text).unwrap();
        assert_eq!(parsed, rooms);
    }

    #[test]
    fn test_load_from_file() {
        let rooms = standard_rooms();
        let text = ron::to_string(&rooms).unwrap();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();

        let loaded = load_rooms(file.path()).unwrap();
        assert_eq!(loaded, rooms);
    }

    #[test]
    fn test_load_garbage_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not ron at all [").unwrap();
        assert!(load_rooms(file.path()).is_err());
    }

    #[test]
    fn test_missing_override_falls_back_to_defaults() {
        let rooms = load_rooms_or_default("definitely/not/here.ron").unwrap();
        assert_eq!(rooms, standard_rooms());
    }
}
