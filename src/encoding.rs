//! Parsers for the compact strings taken on the command line.
//!
//! - traffic: `target:percent[:name]`
//! - secret target: `git:host` or `docker:host` (host may carry a port)
//! - template args and env: `name=value`, split on the first `=`
use crate::error::ParseError;

/// A parsed traffic spec. `name` is empty when the spec had no third field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrafficSpec {
    pub name: String,
    pub target: String,
    pub percent: u32,
}

/// Which host annotation a secret target adds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SecretTarget {
    Git(String),
    Docker(String),
}

pub fn parse_traffic_spec(spec: &str) -> Result<TrafficSpec, ParseError> {
    let fields: Vec<&str> = spec.split(':').collect();
    let (target, raw_percent, name) = match fields.as_slice() {
        [target, percent] => (*target, *percent, ""),
        [target, percent, name] => (*target, *percent, *name),
        _ => {
            return Err(ParseError::TrafficFields {
                spec: spec.to_string(),
            })
        }
    };
    if target.is_empty() {
        return Err(ParseError::EmptyTarget {
            spec: spec.to_string(),
        });
    }
    let percent: i64 = raw_percent.parse().map_err(|err: std::num::ParseIntError| {
        ParseError::Percent {
            spec: spec.to_string(),
            value: raw_percent.to_string(),
            reason: err.to_string(),
        }
    })?;
    let percent = u32::try_from(percent)
        .ok()
        .filter(|percent| *percent <= 100)
        .ok_or_else(|| ParseError::PercentRange {
            spec: spec.to_string(),
            percent,
        })?;
    Ok(TrafficSpec {
        name: name.to_string(),
        target: target.to_string(),
        percent,
    })
}

pub fn parse_secret_target(spec: &str) -> Result<SecretTarget, ParseError> {
    let (kind, host) = spec.split_once(':').unwrap_or((spec, ""));
    let target = match kind {
        "git" => SecretTarget::Git(host.to_string()),
        "docker" => SecretTarget::Docker(host.to_string()),
        _ => {
            return Err(ParseError::UnknownSecretTarget {
                kind: kind.to_string(),
            })
        }
    };
    // The host keeps everything after the kind, so registry ports survive.
    if host.is_empty() {
        return Err(ParseError::SecretTarget {
            spec: spec.to_string(),
        });
    }
    Ok(target)
}

/// Split `name=value` on the first `=`; the value may contain more `=`.
pub fn parse_key_value(spec: &str) -> Result<(String, String), ParseError> {
    match spec.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(ParseError::KeyValue {
            spec: spec.to_string(),
        }),
    }
}

/// Parse a list of `name=value` pairs. A repeated name keeps its first
/// position and takes the last value.
pub fn parse_key_values<S: AsRef<str>>(specs: &[S]) -> Result<Vec<(String, String)>, ParseError> {
    let mut pairs: Vec<(String, String)> = Vec::with_capacity(specs.len());
    for spec in specs {
        let (name, value) = parse_key_value(spec.as_ref())?;
        match pairs.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = value,
            None => pairs.push((name, value)),
        }
    }
    Ok(pairs)
}

#[cfg(test)]
#[path = "encoding_tests.rs"]
mod tests;
