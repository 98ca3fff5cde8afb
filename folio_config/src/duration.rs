use std::ops::Deref;

use serde::Deserialize;

/// A duration written as whitespace separated parts like `"1m 30s"` or
/// `"800ms"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duration(pub std::time::Duration);

impl From<Duration> for std::time::Duration {
    fn from(value: Duration) -> Self {
        value.0
    }
}

impl Deref for Duration {
    type Target = std::time::Duration;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.split_whitespace()
            .try_fold(std::time::Duration::ZERO, |out, part| {
                parse_part(part).map(|x| out + x)
            })
            .map(Self)
            .ok_or_else(|| serde::de::Error::custom("Invalid duration"))
    }
}

fn parse_part(part: &str) -> Option<std::time::Duration> {
    let split = part.find(|c: char| !c.is_ascii_digit())?;
    let (value, unit) = part.split_at(split);
    let value = value.parse::<u64>().ok()?;
    let millis = match unit {
        "ms" => 1,
        "s" => 1000,
        "m" => 60 * 1000,
        "h" => 60 * 60 * 1000,
        "d" => 24 * 60 * 60 * 1000,
        _ => return None,
    };
    value
        .checked_mul(millis)
        .map(std::time::Duration::from_millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_duration() {
        for (input, expected) in [
            ("13s", Some(13_000)),
            ("800ms", Some(800)),
            ("42m", Some(42 * 60_000)),
            ("7h", Some(7 * 60 * 60_000)),
            ("20d", Some(20 * 24 * 60 * 60_000)),
            ("", Some(0)),
            ("1d 2h 3m 4s 5ms", Some((((24 + 2) * 60 + 3) * 60 + 4) * 1000 + 5)),
            ("xyz", None),
            ("7dd", None),
            ("s", None),
            ("12", None),
            ("5us", None),
        ] {
            let input = serde_json::Value::String(input.into());
            let output = serde_json::from_value::<Duration>(input.clone())
                .ok()
                .map(|x| x.0.as_millis() as u64);
            assert_eq!(output, expected, "{input}");
        }
    }
}
