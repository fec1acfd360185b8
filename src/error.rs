//! Errors surfaced to the host
//!
//! The simulation is closed and in-memory, so everything here is caller misuse:
//! bad material names, bad material tables, out-of-range settings, or
//! malformed JSON config.

/// Errors returned by simulation setup and host-facing writes.
#[derive(thiserror::Error, Debug)]
pub enum SimError {
    /// A material was selected by a name the table doesn't know. State is unchanged.
    #[error("unknown material: {0}")]
    InvalidMaterial(String),

    /// A material definition has coefficients outside their legal range.
    #[error("material {name} is invalid: {reason}")]
    InvalidMaterialSpec { name: String, reason: &'static str },

    /// The same material name was registered twice.
    #[error("material {0} is registered more than once")]
    DuplicateMaterial(String),

    /// A table without materials can't give players a default.
    #[error("material table is empty")]
    EmptyMaterialTable,

    /// A settings value is out of range. The match is not created.
    #[error("setting {field} is invalid: {reason}")]
    InvalidSettings {
        field: &'static str,
        reason: &'static str,
    },

    /// Settings or material JSON couldn't be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = SimError::from(serde_json::from_str::<f32>("{").unwrap_err());
        assert!(err.to_string().starts_with("invalid configuration: "));

        let err = SimError::InvalidSettings {
            field: "vert_length",
            reason: "must fit the field height",
        };
        assert_eq!(err.to_string(), "setting vert_length is invalid: must fit the field height");
        assert_eq!(SimError::InvalidMaterial("glass".into()).to_string(), "unknown material: glass");
    }
}
