use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{SetupError, START_BOX};

/// A display color, written as `#rrggbb`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// The error type for the [`FromStr`] instance of [`Rgb`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RgbFromStrErr {
    MissingHash,
    WrongLength { len: usize },
    InvalidHexDigit,
}

impl std::error::Error for RgbFromStrErr {}

impl std::fmt::Display for RgbFromStrErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RgbFromStrErr::MissingHash => write!(f, "Color must start with '#'"),
            RgbFromStrErr::WrongLength { len } => {
                write!(f, "Color must have six hex digits, found {}", len)
            }
            RgbFromStrErr::InvalidHexDigit => write!(f, "Color contains a non-hex digit"),
        }
    }
}

impl FromStr for Rgb {
    type Err = RgbFromStrErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('#').ok_or(RgbFromStrErr::MissingHash)?;
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(RgbFromStrErr::WrongLength {
                len: digits.chars().count(),
            });
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| RgbFromStrErr::InvalidHexDigit)
        };
        Ok(Rgb {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }
}

impl TryFrom<String> for Rgb {
    type Error = RgbFromStrErr;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(rgb: Rgb) -> String {
        rgb.to_string()
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// A player token on the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: u8,
    pub name: String,
    pub color: Rgb,
    /// The box the token is standing on, `1..=BOARD_SIZE`.
    pub position: u8,
}

impl Player {
    /// A new player standing on the start box.
    pub fn new(id: u8, name: &str, color: Rgb) -> Self {
        Self {
            id,
            name: String::from(name),
            color,
            position: START_BOX,
        }
    }
}

/// How a player is described in a players file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub name: String,
    pub color: Rgb,
}

impl PlayerConfig {
    /// Reads a players file: a JSON array of `{"name": ..., "color": "#rrggbb"}`.
    pub fn load(path: &Path) -> anyhow::Result<Vec<Player>> {
        let configs: Vec<PlayerConfig> =
            serde_json::from_reader(BufReader::new(File::open(path)?))?;
        players_from_configs(&configs).map_err(|err| {
            anyhow::anyhow!("Players file '{}' is unusable: {}", path.display(), err)
        })
    }
}

/// Turns configs into players with ids counting up from 1.
pub fn players_from_configs(configs: &[PlayerConfig]) -> Result<Vec<Player>, SetupError> {
    if configs.is_empty() {
        return Err(SetupError::NoPlayers);
    }
    configs
        .iter()
        .enumerate()
        .map(|(i, config)| {
            u8::try_from(i + 1)
                .map(|id| Player::new(id, &config.name, config.color))
                .map_err(|_| SetupError::TooManyPlayers {
                    count: configs.len(),
                })
        })
        .collect()
}

/// The two teams of the classroom setup.
pub fn default_players() -> Vec<Player> {
    vec![
        Player::new(1, "Boys", Rgb { r: 0x00, g: 0x68, b: 0x84 }),
        Player::new(2, "Girls", Rgb { r: 0xFC, g: 0x6C, b: 0x85 }),
    ]
}
