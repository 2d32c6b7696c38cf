// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Location addressing policies.
//!
//! A source's configured `location` string decides the `environment.<path>` prefix of its
//! output values and which key its humidity is published under. Two schemes exist, one per
//! configuration version, and exactly one is active for a given pipeline:
//!
//! | Policy | Default | Empty location | Humidity key |
//! |--------|---------|----------------|--------------|
//! | [`LocationPolicy::ShortLocation`] | `inside` | `outside` | `humidity` only when outside |
//! | [`LocationPolicy::DottedPath`] | `inside.mainCabin` | default path | `humidity` only under `outside.` |
//!
//! Both policies strip leading periods left over from older configuration versions.

use serde::{Deserialize, Serialize};

/// Longest accepted location string, after legacy periods are stripped.
pub const MAX_LOCATION_LEN: usize = 20;

const OUTSIDE: &str = "outside";
const INSIDE: &str = "inside";

/// Key under which a source publishes its humidity value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HumidityKey {
    /// Outdoor sources: `environment.outside.humidity`
    Humidity,
    /// Indoor sources: `environment.inside.<x>.relativeHumidity`
    RelativeHumidity,
}

impl HumidityKey {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Humidity => "humidity",
            Self::RelativeHumidity => "relativeHumidity",
        }
    }
}

/// A configured location resolved into an output path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocation {
    /// Dotted path below `environment.`, e.g. `inside.mainCabin`
    pub path: String,
    pub humidity_key: HumidityKey,
}

/// Selects how location strings are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LocationPolicy {
    /// Location is a bare instance id below `inside`; empty means outside.
    #[default]
    ShortLocation,
    /// Location is a fully qualified dotted path; the `outside.` prefix marks outdoor sources.
    DottedPath,
}

impl LocationPolicy {
    /// Location assigned to a newly discovered source.
    pub const fn default_location(self) -> &'static str {
        match self {
            Self::ShortLocation => INSIDE,
            Self::DottedPath => "inside.mainCabin",
        }
    }

    /// Pattern advertised to configuration editors.
    pub const fn location_pattern(self) -> &'static str {
        match self {
            Self::ShortLocation => "^[a-zA-Z0-9]*$",
            Self::DottedPath => "^[a-zA-Z0-9.]*$",
        }
    }

    /// Checks a user-supplied location against this policy's alphabet and length.
    ///
    /// Leading periods are ignored: they are a legacy artifact, not a user error. Dotted
    /// paths must not contain empty segments such as `inside..cabin` or `inside.`.
    pub fn validate_location(self, location: &str) -> Result<(), String> {
        let location = strip_legacy_period(location);
        if location.chars().count() > MAX_LOCATION_LEN {
            return Err(format!("exceeds {MAX_LOCATION_LEN} characters"));
        }
        let allowed = |c: char| match self {
            Self::ShortLocation => c.is_ascii_alphanumeric(),
            Self::DottedPath => c.is_ascii_alphanumeric() || c == '.',
        };
        if !location.chars().all(allowed) {
            return Err(format!("contains characters outside {}", self.location_pattern()));
        }
        if self == Self::DottedPath
            && !location.is_empty()
            && location.split('.').any(str::is_empty)
        {
            return Err("contains an empty path segment".to_string());
        }
        Ok(())
    }

    /// Resolves a configured location into its output path and humidity key.
    pub fn resolve(self, location: &str) -> ResolvedLocation {
        let location = strip_legacy_period(location);
        match self {
            Self::ShortLocation => resolve_short(location),
            Self::DottedPath => resolve_dotted(location),
        }
    }
}

fn strip_legacy_period(location: &str) -> &str {
    location.trim_start_matches('.')
}

fn resolve_short(location: &str) -> ResolvedLocation {
    if location.is_empty() {
        return ResolvedLocation {
            path: OUTSIDE.to_string(),
            humidity_key: HumidityKey::Humidity,
        };
    }

    let path = if location.eq_ignore_ascii_case(INSIDE) {
        INSIDE.to_string()
    } else {
        format!("{INSIDE}.{location}")
    };

    ResolvedLocation {
        path,
        humidity_key: HumidityKey::RelativeHumidity,
    }
}

fn resolve_dotted(location: &str) -> ResolvedLocation {
    let path = if location.is_empty() {
        LocationPolicy::DottedPath.default_location()
    } else {
        location
    };

    let outdoors = path == OUTSIDE || path.starts_with("outside.");
    ResolvedLocation {
        path: path.to_string(),
        humidity_key: if outdoors {
            HumidityKey::Humidity
        } else {
            HumidityKey::RelativeHumidity
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_location_empty_is_outside() {
        let resolved = LocationPolicy::ShortLocation.resolve("");
        assert_eq!(resolved.path, "outside");
        assert_eq!(resolved.humidity_key, HumidityKey::Humidity);
    }

    #[test]
    fn short_location_inside_word_adds_no_segment() {
        assert_eq!(LocationPolicy::ShortLocation.resolve("Inside").path, "inside");
        assert_eq!(LocationPolicy::ShortLocation.resolve("inside").path, "inside");
    }

    #[test]
    fn short_location_instance_goes_below_inside() {
        let resolved = LocationPolicy::ShortLocation.resolve("mainCabin");
        assert_eq!(resolved.path, "inside.mainCabin");
        assert_eq!(resolved.humidity_key, HumidityKey::RelativeHumidity);
    }

    #[test]
    fn legacy_leading_period_is_stripped() {
        assert_eq!(
            LocationPolicy::ShortLocation.resolve(".mainCabin").path,
            "inside.mainCabin"
        );
        assert_eq!(
            LocationPolicy::DottedPath.resolve(".outside.deck").path,
            "outside.deck"
        );
        assert!(LocationPolicy::ShortLocation
            .validate_location(".mainCabin")
            .is_ok());
    }

    #[test]
    fn dotted_path_selects_humidity_key_by_prefix() {
        let outside = LocationPolicy::DottedPath.resolve("outside.flybridge");
        assert_eq!(outside.path, "outside.flybridge");
        assert_eq!(outside.humidity_key, HumidityKey::Humidity);

        let inside = LocationPolicy::DottedPath.resolve("inside.mainCabin");
        assert_eq!(inside.humidity_key, HumidityKey::RelativeHumidity);

        let lookalike = LocationPolicy::DottedPath.resolve("outsideLocker");
        assert_eq!(lookalike.humidity_key, HumidityKey::RelativeHumidity);
    }

    #[test]
    fn dotted_path_empty_falls_back_to_default() {
        let resolved = LocationPolicy::DottedPath.resolve("");
        assert_eq!(resolved.path, "inside.mainCabin");
        assert_eq!(resolved.humidity_key, HumidityKey::RelativeHumidity);
    }

    #[test]
    fn validation_follows_policy_alphabet() {
        assert!(LocationPolicy::ShortLocation
            .validate_location("inside.cabin")
            .is_err());
        assert!(LocationPolicy::DottedPath
            .validate_location("inside.cabin")
            .is_ok());
        assert!(LocationPolicy::DottedPath
            .validate_location("inside.averyveryverylongname")
            .is_err());
    }

    #[test]
    fn dotted_path_rejects_empty_segments() {
        let policy = LocationPolicy::DottedPath;
        assert!(policy.validate_location("inside..cabin").is_err());
        assert!(policy.validate_location("inside.").is_err());
        assert!(policy.validate_location("..inside.cabin").is_ok());
        assert!(policy.validate_location("").is_ok());
    }
}
