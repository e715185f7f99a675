//! Historical interpreters disagree on a handful of opcodes.
//! Each disagreement is a named flag here.

use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quirks {
    /// 8XY6 and 8XYE shift VX in place instead of copying VY into VX first.
    pub shift: bool,
    /// FX55 and FX65 leave I pointing past the last register they touched.
    pub load_store: bool,
    /// BNNN jumps to XNN + VX instead of NNN + V0.
    pub jump: bool,
    /// DXY0 draws a 16x16 sprite in lores mode too.
    pub wide_sprites: bool,
    /// DXY0 draws an 8x16 sprite in lores mode.
    pub tall_sprites: bool,
}

impl Quirks {
    /// What the original terminal interpreter did.
    pub fn baseline() -> Quirks {
        Quirks {
            shift: true,
            load_store: false,
            jump: false,
            wide_sprites: false,
            tall_sprites: false,
        }
    }

    /// The COSMAC VIP interpreter.
    pub fn chip8() -> Quirks {
        Quirks {
            shift: false,
            load_store: true,
            jump: false,
            wide_sprites: false,
            tall_sprites: false,
        }
    }

    pub fn schip() -> Quirks {
        Quirks {
            shift: true,
            load_store: false,
            jump: true,
            wide_sprites: false,
            tall_sprites: true,
        }
    }

    pub fn xochip() -> Quirks {
        Quirks {
            shift: false,
            load_store: true,
            jump: false,
            wide_sprites: true,
            tall_sprites: false,
        }
    }
}

impl Default for Quirks {
    fn default() -> Self {
        Self::baseline()
    }
}

#[derive(Debug, PartialEq, Eq, Error)]
#[error("unknown quirk profile '{0}', expected one of baseline, chip8, schip, xochip")]
pub struct UnknownProfile(String);

impl FromStr for Quirks {
    type Err = UnknownProfile;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "baseline" => Ok(Quirks::baseline()),
            "chip8" | "chip-8" | "vip" => Ok(Quirks::chip8()),
            "schip" | "superchip" => Ok(Quirks::schip()),
            "xochip" | "xo-chip" => Ok(Quirks::xochip()),
            _ => Err(UnknownProfile(s.to_string())),
        }
    }
}
