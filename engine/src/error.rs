use thiserror::Error;

/// Failures reading or writing a save file.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("save data is missing required key `{0}`")]
    MissingKey(&'static str),

    #[error("save key `{key}` has a non-numeric value `{value}`")]
    InvalidNumber { key: &'static str, value: String },

    #[error("save key `{key}` has an unknown value `{value}`")]
    UnknownLabel { key: &'static str, value: String },

    #[error("save key `{key}` is out of range: {value}")]
    OutOfRange { key: &'static str, value: i32 },

    #[error("save file i/o: {0}")]
    Io(#[from] std::io::Error),
}

impl SaveError {
    /// True for malformed save content, false for filesystem failures.
    pub fn is_format(&self) -> bool {
        !matches!(self, SaveError::Io(_))
    }
}

#[derive(Debug, Error)]
pub enum CombatError {
    #[error("no monster named '{0}' in the bestiary")]
    UnknownMonster(String),
}
