//! Errors for the compact string encodings accepted on the command line.
use thiserror::Error;

/// A malformed traffic spec, secret target, or `name=value` pair.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Fewer than two or more than three `:`-separated fields
    #[error("invalid traffic spec `{spec}`: expected target:percent[:name]")]
    TrafficFields { spec: String },

    #[error("invalid traffic spec `{spec}`: target name is empty")]
    EmptyTarget { spec: String },

    #[error("invalid traffic percent `{value}` in `{spec}`: {reason}")]
    Percent {
        spec: String,
        value: String,
        reason: String,
    },

    #[error("traffic percent {percent} in `{spec}` is outside 0..=100")]
    PercentRange { spec: String, percent: i64 },

    #[error("unrecognised secret target type: {kind}")]
    UnknownSecretTarget { kind: String },

    #[error("invalid secret target `{spec}`: expected git:host or docker:host")]
    SecretTarget { spec: String },

    #[error("invalid `{spec}`: expected name=value")]
    KeyValue { spec: String },
}
