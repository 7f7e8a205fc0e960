use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use super::{BUILD_APKS_COMMAND_NAME, GET_DEVICE_SPEC_COMMAND_NAME};
use crate::device::{self, DeviceSpec};
use crate::dimension::{self, Dimension};
use crate::error::GetSizeError;
use crate::files::check_file_exists_and_readable;
use crate::flags::{Flag, ParsedFlags};
use crate::help::{CommandDescription, CommandHelp, FlagDescription};

pub const COMMAND_NAME: &str = "get-size";

pub const APKS_ARCHIVE_FILE_FLAG: Flag<PathBuf> = Flag::path("apks");
pub const DEVICE_SPEC_FLAG: Flag<PathBuf> = Flag::path("device-spec");
pub const MODULES_FLAG: Flag<BTreeSet<String>> = Flag::string_set("modules");
pub const INSTANT_FLAG: Flag<bool> = Flag::boolean("instant");
pub const DIMENSIONS_FLAG: Flag<BTreeSet<Dimension>> = Flag::enum_set("dimensions");

/// Resolved request for the over-the-wire sizes of the APKs served from an
/// APK Set.
///
/// Only built through [`GetSizeCommand::build`] and the flag entry points, so
/// every instance has a validated archive path and an expanded dimension set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetSizeCommand {
    apks_archive_path: PathBuf,
    device_spec: DeviceSpec,
    modules: Option<BTreeSet<String>>,
    dimensions: BTreeSet<Dimension>,
    instant: bool,
}

impl GetSizeCommand {
    /// Tokenizes raw `--name=value` arguments and resolves them.
    pub fn from_args<I, S>(args: I) -> Result<Self, GetSizeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut flags = ParsedFlags::parse(args)?;
        Self::from_flags(&mut flags)
    }

    pub fn from_flags(flags: &mut ParsedFlags) -> Result<Self, GetSizeError> {
        let apks_archive_path = APKS_ARCHIVE_FILE_FLAG.required_value(flags)?;
        let device_spec_path = DEVICE_SPEC_FLAG.value(flags)?;
        let modules = MODULES_FLAG.value(flags)?;
        let instant = INSTANT_FLAG.value(flags)?;
        let dimensions = DIMENSIONS_FLAG.value(flags)?.unwrap_or_default();
        flags.check_no_unknown_flags()?;

        Self::build(
            apks_archive_path,
            device_spec_path.as_deref(),
            modules,
            dimensions,
            instant,
        )
    }

    /// Validates the inputs and assembles the command. Absent optional inputs
    /// take their defaults: the default device spec, all first-download
    /// modules, no dimensions and installable (non-instant) APKs.
    pub fn build(
        apks_archive_path: impl Into<PathBuf>,
        device_spec_path: Option<&Path>,
        modules: Option<BTreeSet<String>>,
        dimensions: BTreeSet<Dimension>,
        instant: Option<bool>,
    ) -> Result<Self, GetSizeError> {
        let apks_archive_path = apks_archive_path.into();
        check_file_exists_and_readable(&apks_archive_path)?;

        let device_spec = device::resolve(device_spec_path)?;
        let dimensions = dimension::expand(&dimensions);

        let command = Self {
            apks_archive_path,
            device_spec,
            modules,
            dimensions,
            instant: instant.unwrap_or(false),
        };
        tracing::info!(%command, "resolved get-size request");
        Ok(command)
    }

    pub fn apks_archive_path(&self) -> &Path {
        &self.apks_archive_path
    }

    pub fn device_spec(&self) -> &DeviceSpec {
        &self.device_spec
    }

    /// `None` stands for every module installed during the first download,
    /// which is not the same as `Some` of an empty set.
    pub fn modules(&self) -> Option<&BTreeSet<String>> {
        self.modules.as_ref()
    }

    pub fn dimensions(&self) -> &BTreeSet<Dimension> {
        &self.dimensions
    }

    /// Whether instant APKs are used for the size calculation instead of the
    /// installable ones.
    pub fn instant(&self) -> bool {
        self.instant
    }

    pub fn help() -> CommandHelp {
        let all_dimensions = Dimension::VALUES
            .iter()
            .map(Dimension::as_str)
            .collect::<Vec<_>>()
            .join(",");

        CommandHelp {
            command_name: COMMAND_NAME,
            description: CommandDescription {
                short_description: "Gets the over-the-wire sizes (sorted desc) of APKs served to \
                    different devices configurations from an APK Set."
                    .to_string(),
            },
            flags: vec![
                FlagDescription {
                    flag_name: APKS_ARCHIVE_FILE_FLAG.name(),
                    example_value: Some("archive.apks".to_string()),
                    optional: false,
                    description: format!(
                        "Path to the archive file generated by the '{}' command.",
                        BUILD_APKS_COMMAND_NAME
                    ),
                },
                FlagDescription {
                    flag_name: DEVICE_SPEC_FLAG.name(),
                    example_value: Some("device-spec.json".to_string()),
                    optional: true,
                    description: format!(
                        "Path to the device spec file to be used for matching (defaults to empty \
                         device spec). Note that partial specifications are allowed in the file \
                         as opposed to the spec generated by '{}'.",
                        GET_DEVICE_SPEC_COMMAND_NAME
                    ),
                },
                FlagDescription {
                    flag_name: DIMENSIONS_FLAG.name(),
                    example_value: Some(all_dimensions),
                    optional: true,
                    description: "Specifies which dimensions to expand the sizes in the output \
                        against. Note that ALL is a shortcut to all other dimensions and \
                        including ALL here would cause the output to be expanded over all \
                        possible dimensions."
                        .to_string(),
                },
                FlagDescription {
                    flag_name: MODULES_FLAG.name(),
                    example_value: Some("base,module1,module2".to_string()),
                    optional: true,
                    description: "List of modules to run this report on (defaults to all the \
                        modules installed during the first download). Note that the dependent \
                        modules will also be considered. Standalone APKs are ignored for size \
                        calculation when this flag is set."
                        .to_string(),
                },
                FlagDescription {
                    flag_name: INSTANT_FLAG.name(),
                    example_value: None,
                    optional: true,
                    description: "When set, APKs of the instant modules will be considered \
                        instead of the installable APKs. Defaults to false."
                        .to_string(),
                },
            ],
        }
    }
}

impl fmt::Display for GetSizeCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let modules = match &self.modules {
            None => "first-download".to_string(),
            Some(modules) => format!("[{}]", join(modules.iter().map(String::as_str))),
        };
        let device_spec = if self.device_spec.is_default() {
            "default"
        } else {
            "custom"
        };

        write!(
            f,
            "{} apks={} device-spec={} modules={} dimensions=[{}] instant={}",
            COMMAND_NAME,
            self.apks_archive_path.display(),
            device_spec,
            modules,
            join(self.dimensions.iter().map(Dimension::as_str)),
            self.instant
        )
    }
}

fn join<'a>(items: impl Iterator<Item = &'a str>) -> String {
    items.collect::<Vec<_>>().join(",")
}
