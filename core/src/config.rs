/// Behaviours that differ between historical interpreters.
///
/// The defaults follow the original COSMAC VIP interpreter.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Quirks {
    /// `Fx1E` also sets VF to 1 when I moves past 0x0FFF, and to 0 otherwise.
    /// Some legacy ROMs (Spacefight 2091!) depend on it.
    pub add_i_overflow_flag: bool,
}

/// How a `Chip8` is set up.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    pub quirks: Quirks,
    /// Seed for the random source behind `Cxkk`; seeded from entropy when `None`.
    pub seed: Option<u64>,
}

impl Config {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_quirks(mut self, quirks: Quirks) -> Self {
        self.quirks = quirks;
        self
    }
}
