use comfy_table::{Attribute, Cell, ContentArrangement, Table};

/// Descriptive metadata for one command. Pure data: nothing here is consulted
/// when flags are validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandHelp {
    pub command_name: &'static str,
    pub description: CommandDescription,
    pub flags: Vec<FlagDescription>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDescription {
    pub short_description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagDescription {
    pub flag_name: &'static str,
    pub example_value: Option<String>,
    pub optional: bool,
    pub description: String,
}

impl FlagDescription {
    /// `--name=<example>`, bracketed when optional.
    pub fn usage(&self) -> String {
        let flag = match &self.example_value {
            Some(example) => format!("--{}=<{}>", self.flag_name, example),
            None => format!("--{}", self.flag_name),
        };
        if self.optional {
            format!("[{}]", flag)
        } else {
            flag
        }
    }
}

impl CommandHelp {
    pub fn synopsis(&self) -> String {
        std::iter::once(self.command_name.to_string())
            .chain(self.flags.iter().map(FlagDescription::usage))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
impl CommandHelp {
    pub(crate) fn flag(&self, name: &str) -> Option<&FlagDescription> {
        self.flags.iter().find(|f| f.flag_name == name)
    }
}

pub fn render(help: &CommandHelp) -> String {
    let mut table = Table::new();
    table
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Flag").add_attribute(Attribute::Bold),
            Cell::new("Example").add_attribute(Attribute::Bold),
            Cell::new("Required").add_attribute(Attribute::Bold),
            Cell::new("Description").add_attribute(Attribute::Bold),
        ]);

    for flag in &help.flags {
        table.add_row(vec![
            Cell::new(format!("--{}", flag.flag_name)),
            Cell::new(flag.example_value.as_deref().unwrap_or("")),
            Cell::new(if flag.optional { "no" } else { "yes" }),
            Cell::new(&flag.description),
        ]);
    }

    format!(
        "{}\n\n{}\n\nSynopsis:\n    {}\n\n{}",
        help.command_name,
        help.description.short_description,
        help.synopsis(),
        table
    )
}
