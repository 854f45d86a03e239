//! Glyph faces for label text.
//!
//! A face maps each input character to the single-width glyph drawn in the
//! terminal and fixes the metrics used to lay words out in world space.

use std::fmt;

pub(crate) const DEFAULT_FACE: &str = "plain";
const FACES: [&str; 3] = ["plain", "runic", "smallcaps"];

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub(crate) enum FontError {
    #[error("unknown font face {name:?} (available: {available})")]
    Unknown { name: String, available: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mapping {
    Plain,
    Runic,
    SmallCaps,
}

#[derive(Clone, Debug)]
pub(crate) struct Typeface {
    name: &'static str,
    mapping: Mapping,
    runes: Vec<char>,
    /// Em size in world units.
    pub(crate) size: f32,
}

impl Typeface {
    pub(crate) fn load(name: &str) -> Result<Self, FontError> {
        let (name, mapping) = match name.to_ascii_lowercase().as_str() {
            "plain" => (FACES[0], Mapping::Plain),
            "runic" => (FACES[1], Mapping::Runic),
            "smallcaps" | "small-caps" => (FACES[2], Mapping::SmallCaps),
            _ => {
                return Err(FontError::Unknown {
                    name: name.to_string(),
                    available: FACES.join(", "),
                })
            }
        };
        let runes = if mapping == Mapping::Runic {
            "ᚠᚢᚦᚨᚱᚲᚷᚹᚺᚾᛁᛃᛇᛈᛉᛋᛏᛒᛖᛗᛚᛜᛞᛟᛠᛡᛢᛣᛤᛥᛦ".chars().collect()
        } else {
            Vec::new()
        };
        Ok(Self {
            name,
            mapping,
            runes,
            size: 2.4,
        })
    }

    pub(crate) fn name(&self) -> &'static str {
        self.name
    }

    /// Horizontal distance between glyph centers, in world units.
    pub(crate) fn advance(&self) -> f32 {
        self.size * 0.6
    }

    pub(crate) fn shape(&self, text: &str) -> Vec<char> {
        text.chars().map(|ch| self.glyph(ch)).collect()
    }

    fn glyph(&self, ch: char) -> char {
        match self.mapping {
            Mapping::Plain => ch,
            Mapping::Runic => {
                if ch.is_whitespace() {
                    return ' ';
                }
                let idx = (ch.to_ascii_lowercase() as u32).wrapping_mul(2654435761) as usize;
                self.runes[idx % self.runes.len()]
            }
            Mapping::SmallCaps => small_cap(ch),
        }
    }
}

impl fmt::Display for Typeface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:.1}", self.name, self.size)
    }
}

fn small_cap(ch: char) -> char {
    const CAPS: [char; 26] = [
        'ᴀ', 'ʙ', 'ᴄ', 'ᴅ', 'ᴇ', 'ꜰ', 'ɢ', 'ʜ', 'ɪ', 'ᴊ', 'ᴋ', 'ʟ', 'ᴍ', 'ɴ', 'ᴏ', 'ᴘ', 'ǫ', 'ʀ', 'ꜱ',
        'ᴛ', 'ᴜ', 'ᴠ', 'ᴡ', 'x', 'ʏ', 'ᴢ',
    ];
    if ch.is_ascii_lowercase() {
        CAPS[(ch as u8 - b'a') as usize]
    } else {
        ch
    }
}
