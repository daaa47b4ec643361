
use std::fmt;


pub const MAX_TIMEOUT: u64 = 14 * 24 * 60 * 60;
pub const MAX_DELETION_WINDOW: u64 = 7 * 24 * 60 * 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DurationError {
    Empty,
    MissingUnit(String),
    UnknownUnit(char),
    InvalidNumber(String),
}

impl fmt::Display for DurationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DurationError::Empty              => write!(f, "no duration given"),
            DurationError::MissingUnit(rest)  => write!(f, "`{}` is missing a unit (s, m, h, d, w)", rest),
            DurationError::UnknownUnit(unit)  => write!(f, "`{}` is not a known unit (s, m, h, d, w)", unit),
            DurationError::InvalidNumber(tok) => write!(f, "`{}` is not a valid amount", tok),
        }
    }
}

impl std::error::Error for DurationError {}

fn unit_seconds(unit: char) -> Option<u64> {
    match unit {
        's' => Some(1),
        'm' => Some(60),
        'h' => Some(60 * 60),
        'd' => Some(24 * 60 * 60),
        'w' => Some(7 * 24 * 60 * 60),
        _   => None,
    }
}

/// Parses compact durations such as `10m` or `2h30m` into seconds.
///
/// Every alphabetic character closes a token, so the input must end on a unit;
/// units are lowercase only.
pub fn parse_duration(raw: &str) -> Result<u64, DurationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(DurationError::Empty);
    }

    let mut tokens = Vec::new();
    let mut current = String::new();
    for c in raw.chars() {
        current.push(c);
        if c.is_alphabetic() {
            tokens.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        return Err(DurationError::MissingUnit(current));
    }

    tokens.iter().try_fold(0u64, |total, token| {
        let mut chars = token.chars();
        let unit = chars.next_back().ok_or(DurationError::Empty)?;
        let multiplier = unit_seconds(unit).ok_or(DurationError::UnknownUnit(unit))?;
        let amount = chars.as_str().parse::<u64>()
            .map_err(|_| DurationError::InvalidNumber(token.clone()))?;
        amount.checked_mul(multiplier)
            .and_then(|seconds| total.checked_add(seconds))
            .ok_or_else(|| DurationError::InvalidNumber(token.clone()))
    })
}

/// Renders seconds the way moderators read them, e.g. `2 hours and 30 minutes`.
pub fn humanize_duration(seconds: u64) -> String {
    let units = [
        ("day", 24 * 60 * 60),
        ("hour", 60 * 60),
        ("minute", 60),
        ("second", 1),
    ];

    let mut rest = seconds;
    let mut parts = Vec::new();
    for (name, size) in units {
        let amount = rest / size;
        rest %= size;
        if amount > 0 {
            let plural = if amount == 1 { "" } else { "s" };
            parts.push(format!("{} {}{}", amount, name, plural));
        }
    }

    match parts.len() {
        0 => "0 seconds".to_string(),
        1 => parts.remove(0),
        _ => {
            let last = parts.pop().unwrap_or_default();
            format!("{} and {}", parts.join(", "), last)
        }
    }
}
