pub mod errors;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::GetSizeError;
use crate::files::check_file_exists_and_readable;
use errors::DeviceSpecError;

/// Device configuration the APKs are matched against.
///
/// Every field may be missing from a partial spec file; missing fields keep
/// their default (empty list or zero).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct DeviceSpec {
    pub supported_abis: Vec<String>,
    pub supported_locales: Vec<String>,
    pub device_features: Vec<String>,
    pub gl_extensions: Vec<String>,
    pub screen_density: u32,
    pub sdk_version: u32,
}

impl DeviceSpec {
    pub fn is_default(&self) -> bool {
        *self == DeviceSpec::default()
    }

    fn check_complete(&self, path: &Path) -> Result<(), DeviceSpecError> {
        let missing = [
            ("sdkVersion", self.sdk_version == 0),
            ("screenDensity", self.screen_density == 0),
            ("supportedAbis", self.supported_abis.is_empty()),
            ("supportedLocales", self.supported_locales.is_empty()),
        ]
        .into_iter()
        .filter_map(|(field, is_missing)| is_missing.then_some(field))
        .collect::<Vec<_>>();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(DeviceSpecError::Incomplete {
                path: path.display().to_string(),
                reason: format!("missing {}", missing.join(", ")),
            })
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpecFormat {
    Json,
    Yaml,
    Toml,
}

impl SpecFormat {
    fn from_path(path: &Path) -> Result<Self, DeviceSpecError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "json" => Ok(SpecFormat::Json),
            "yaml" | "yml" => Ok(SpecFormat::Yaml),
            "toml" => Ok(SpecFormat::Toml),
            _ => Err(DeviceSpecError::UnsupportedExtension(
                path.display().to_string(),
            )),
        }
    }
}

fn load_device_spec(path: &Path) -> Result<DeviceSpec, DeviceSpecError> {
    let format = SpecFormat::from_path(path)?;
    let contents = fs::read_to_string(path).map_err(|e| DeviceSpecError::Read {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let malformed = |reason: String| DeviceSpecError::Malformed {
        path: path.display().to_string(),
        reason,
    };

    match format {
        SpecFormat::Json => serde_json::from_str(&contents).map_err(|e| malformed(e.to_string())),
        SpecFormat::Yaml => serde_yaml::from_str(&contents).map_err(|e| malformed(e.to_string())),
        SpecFormat::Toml => toml::from_str(&contents).map_err(|e| malformed(e.to_string())),
    }
}

/// Parses a spec file in which any field may be left out.
pub fn parse_partial_device_spec(path: &Path) -> Result<DeviceSpec, DeviceSpecError> {
    let spec = load_device_spec(path)?;
    tracing::debug!(path = %path.display(), ?spec, "parsed partial device spec");
    Ok(spec)
}

/// Parses a spec file describing a real device, as written by
/// `get-device-spec`: SDK version, screen density, ABIs and locales must all
/// be present.
pub fn parse_device_spec(path: &Path) -> Result<DeviceSpec, DeviceSpecError> {
    let spec = load_device_spec(path)?;
    spec.check_complete(path)?;
    Ok(spec)
}

/// Returns the spec at `path`, or the default spec when no path is given.
///
/// A supplied path must exist, be readable and parse; failures are never
/// replaced by the default.
pub fn resolve(path: Option<&Path>) -> Result<DeviceSpec, GetSizeError> {
    let Some(path) = path else {
        tracing::debug!("no device spec given, using the default spec");
        return Ok(DeviceSpec::default());
    };

    check_file_exists_and_readable(path)?;
    Ok(parse_partial_device_spec(path)?)
}
