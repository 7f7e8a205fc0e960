use std::io::{self, Write};

use comfy_table::{Attribute, Cell, ContentArrangement, Table};

use crate::args::OutputFormat;
use crate::commands::get_size::GetSizeCommand;
use crate::device::DeviceSpec;
use crate::dimension::Dimension;

pub fn write_command(
    out: &mut impl Write,
    command: &GetSizeCommand,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => writeln!(out, "{}", render_table(command)),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, command)?;
            writeln!(out)
        }
    }
}

pub fn render_table(command: &GetSizeCommand) -> Table {
    let mut table = Table::new();
    table
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("get-size request")
                .add_attribute(Attribute::Bold)
                .set_alignment(comfy_table::CellAlignment::Left),
            Cell::new(""),
        ]);

    table.add_row(vec![
        "APK Set".to_string(),
        command.apks_archive_path().display().to_string(),
    ]);
    table.add_row(vec![
        "Device spec".to_string(),
        format_device_spec(command.device_spec()),
    ]);
    table.add_row(vec![
        "Modules".to_string(),
        match command.modules() {
            None => "all first-download modules".to_string(),
            Some(modules) if modules.is_empty() => "none".to_string(),
            Some(modules) => modules.iter().cloned().collect::<Vec<_>>().join(", "),
        },
    ]);
    table.add_row(vec![
        "Dimensions".to_string(),
        format_dimensions(command.dimensions().iter().copied()),
    ]);
    table.add_row(vec!["Instant".to_string(), command.instant().to_string()]);

    table
}

fn format_device_spec(spec: &DeviceSpec) -> String {
    if spec.is_default() {
        return "default (empty)".to_string();
    }

    let mut parts = Vec::new();
    if spec.sdk_version != 0 {
        parts.push(format!("sdk {}", spec.sdk_version));
    }
    if spec.screen_density != 0 {
        parts.push(format!("{} dpi", spec.screen_density));
    }
    if !spec.supported_abis.is_empty() {
        parts.push(format!("abis {}", spec.supported_abis.join("/")));
    }
    if !spec.supported_locales.is_empty() {
        parts.push(format!("locales {}", spec.supported_locales.join("/")));
    }
    if !spec.device_features.is_empty() {
        parts.push(format!("{} features", spec.device_features.len()));
    }
    if !spec.gl_extensions.is_empty() {
        parts.push(format!("{} GL extensions", spec.gl_extensions.len()));
    }
    parts.join(", ")
}

fn format_dimensions(dimensions: impl Iterator<Item = Dimension>) -> String {
    let names: Vec<&str> = dimensions.map(|d| d.as_str()).collect();
    if names.is_empty() {
        "none".to_string()
    } else {
        names.join(", ")
    }
}
