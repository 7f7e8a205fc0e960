pub mod errors;

use indexmap::IndexMap;
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::marker::PhantomData;
use std::path::PathBuf;
use std::str::FromStr;

use errors::FlagError;

/// Raw `--name[=value]` flags of a single command invocation.
///
/// Every lookup marks the flag as read, so that once a command has extracted
/// all the flags it knows about, [`ParsedFlags::check_no_unknown_flags`] can
/// report whatever is left over in one go.
#[derive(Debug, Clone, Default)]
pub struct ParsedFlags {
    flags: IndexMap<String, Option<String>>,
    accessed: HashSet<String>,
}

impl ParsedFlags {
    pub fn parse<I, S>(args: I) -> Result<Self, FlagError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut flags: IndexMap<String, Option<String>> = IndexMap::new();

        for arg in args {
            let arg = arg.as_ref();
            let Some(body) = arg.strip_prefix("--") else {
                return Err(FlagError::UnexpectedPositional(arg.to_string()));
            };

            let (name, value) = match body.split_once('=') {
                Some((name, value)) => (name, Some(value.to_string())),
                None => (body, None),
            };

            if name.is_empty() {
                return Err(FlagError::InvalidFlagName(arg.to_string()));
            }
            if flags.contains_key(name) {
                return Err(FlagError::DuplicateFlag(name.to_string()));
            }

            tracing::trace!(flag = name, "tokenized flag");
            flags.insert(name.to_string(), value);
        }

        Ok(Self {
            flags,
            accessed: HashSet::new(),
        })
    }

    /// Outer `None` when the flag is absent, inner `None` for a bare `--name`.
    fn take(&mut self, name: &str) -> Option<Option<&str>> {
        self.accessed.insert(name.to_string());
        self.flags.get(name).map(|value| value.as_deref())
    }

    /// Fails with every flag that was supplied but never read, in
    /// command-line order.
    pub fn check_no_unknown_flags(&self) -> Result<(), FlagError> {
        let unknown: Vec<String> = self
            .flags
            .keys()
            .filter(|name| !self.accessed.contains(name.as_str()))
            .cloned()
            .collect();

        if unknown.is_empty() {
            Ok(())
        } else {
            Err(FlagError::UnrecognizedArgument(unknown))
        }
    }
}

type FlagParser<T> = fn(&str, Option<&str>) -> Result<T, FlagError>;

/// Typed descriptor for a single named flag.
pub struct Flag<T> {
    name: &'static str,
    parser: FlagParser<T>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Flag<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Flag<T> {}

impl<T> fmt::Debug for Flag<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flag").field("name", &self.name).finish()
    }
}

impl<T> Flag<T> {
    const fn new(name: &'static str, parser: FlagParser<T>) -> Self {
        Self {
            name,
            parser,
            _marker: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn value(&self, flags: &mut ParsedFlags) -> Result<Option<T>, FlagError> {
        match flags.take(self.name) {
            Some(raw) => {
                let value = (self.parser)(self.name, raw)?;
                tracing::debug!(flag = self.name, "extracted flag");
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    pub fn required_value(&self, flags: &mut ParsedFlags) -> Result<T, FlagError> {
        self.value(flags)?
            .ok_or_else(|| FlagError::MissingArgument(self.name.to_string()))
    }
}

impl Flag<PathBuf> {
    pub const fn path(name: &'static str) -> Self {
        Self::new(name, parse_path)
    }
}

impl Flag<bool> {
    pub const fn boolean(name: &'static str) -> Self {
        Self::new(name, parse_bool)
    }
}

impl Flag<BTreeSet<String>> {
    pub const fn string_set(name: &'static str) -> Self {
        Self::new(name, parse_string_set)
    }
}

impl<E: FromStr + Ord> Flag<BTreeSet<E>> {
    pub const fn enum_set(name: &'static str) -> Self {
        Self::new(name, parse_enum_set::<E>)
    }
}

fn invalid(flag: &str, reason: impl Into<String>) -> FlagError {
    FlagError::InvalidValue {
        flag: flag.to_string(),
        reason: reason.into(),
    }
}

fn require_value<'a>(flag: &str, raw: Option<&'a str>) -> Result<&'a str, FlagError> {
    raw.ok_or_else(|| invalid(flag, "a value is required, use --flag=value"))
}

fn parse_path(flag: &str, raw: Option<&str>) -> Result<PathBuf, FlagError> {
    let raw = require_value(flag, raw)?;
    if raw.is_empty() {
        return Err(invalid(flag, "path must not be empty"));
    }
    Ok(PathBuf::from(raw))
}

fn parse_bool(flag: &str, raw: Option<&str>) -> Result<bool, FlagError> {
    match raw {
        None => Ok(true),
        Some(v) if v.eq_ignore_ascii_case("true") => Ok(true),
        Some(v) if v.eq_ignore_ascii_case("false") => Ok(false),
        Some(v) => Err(invalid(
            flag,
            format!("expected 'true' or 'false', got '{}'", v),
        )),
    }
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|item| !item.is_empty())
}

fn parse_string_set(flag: &str, raw: Option<&str>) -> Result<BTreeSet<String>, FlagError> {
    let raw = require_value(flag, raw)?;
    Ok(split_list(raw).map(str::to_string).collect())
}

fn parse_enum_set<E: FromStr + Ord>(
    flag: &str,
    raw: Option<&str>,
) -> Result<BTreeSet<E>, FlagError> {
    let raw = require_value(flag, raw)?;
    split_list(raw)
        .map(|item| {
            item.parse::<E>()
                .map_err(|_| invalid(flag, format!("unknown value '{}'", item)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAME: Flag<PathBuf> = Flag::path("name");
    const ENABLED: Flag<bool> = Flag::boolean("enabled");
    const ITEMS: Flag<BTreeSet<String>> = Flag::string_set("items");
    const NUMBERS: Flag<BTreeSet<u8>> = Flag::enum_set("numbers");

    #[test]
    fn parses_attached_and_bare_flags() {
        let mut flags = ParsedFlags::parse(["--name=a.apks", "--enabled"]).unwrap();
        assert_eq!(
            NAME.value(&mut flags).unwrap(),
            Some(PathBuf::from("a.apks"))
        );
        assert_eq!(ENABLED.value(&mut flags).unwrap(), Some(true));
        flags.check_no_unknown_flags().unwrap();
    }

    #[test]
    fn value_keeps_everything_after_first_equals() {
        let mut flags = ParsedFlags::parse(["--name=a=b"]).unwrap();
        assert_eq!(NAME.value(&mut flags).unwrap(), Some(PathBuf::from("a=b")));
    }

    #[test]
    fn absent_optional_flag_is_none() {
        let mut flags = ParsedFlags::parse(Vec::<String>::new()).unwrap();
        assert_eq!(ENABLED.value(&mut flags).unwrap(), None);
        assert_eq!(ITEMS.value(&mut flags).unwrap(), None);
        flags.check_no_unknown_flags().unwrap();
    }

    #[test]
    fn absent_required_flag_is_missing_argument() {
        let mut flags = ParsedFlags::parse(["--enabled"]).unwrap();
        assert_eq!(
            NAME.required_value(&mut flags),
            Err(FlagError::MissingArgument("name".to_string()))
        );
    }

    #[test]
    fn rejects_positional_arguments() {
        let err = ParsedFlags::parse(["--name", "a.apks"]).unwrap_err();
        assert_eq!(err, FlagError::UnexpectedPositional("a.apks".to_string()));
    }

    #[test]
    fn rejects_duplicate_and_empty_names() {
        assert_eq!(
            ParsedFlags::parse(["--enabled", "--enabled=false"]).unwrap_err(),
            FlagError::DuplicateFlag("enabled".to_string())
        );
        assert_eq!(
            ParsedFlags::parse(["--=x"]).unwrap_err(),
            FlagError::InvalidFlagName("--=x".to_string())
        );
    }

    #[test]
    fn unknown_flags_reported_together_in_order() {
        let mut flags =
            ParsedFlags::parse(["--zeta=1", "--name=a", "--alpha", "--enabled"]).unwrap();
        NAME.value(&mut flags).unwrap();
        ENABLED.value(&mut flags).unwrap();

        let err = flags.check_no_unknown_flags().unwrap_err();
        assert_eq!(
            err,
            FlagError::UnrecognizedArgument(vec!["zeta".to_string(), "alpha".to_string()])
        );
        assert_eq!(err.to_string(), "Unrecognized flags: --zeta, --alpha.");
    }

    #[test]
    fn absent_lookup_still_counts_as_known() {
        let mut flags = ParsedFlags::parse(["--name=a"]).unwrap();
        assert_eq!(ITEMS.value(&mut flags).unwrap(), None);
        NAME.value(&mut flags).unwrap();
        flags.check_no_unknown_flags().unwrap();
    }

    #[test]
    fn boolean_values() {
        let mut flags = ParsedFlags::parse(["--enabled=FALSE"]).unwrap();
        assert_eq!(ENABLED.value(&mut flags).unwrap(), Some(false));

        let mut flags = ParsedFlags::parse(["--enabled=yes"]).unwrap();
        assert!(matches!(
            ENABLED.value(&mut flags),
            Err(FlagError::InvalidValue { .. })
        ));
    }

    #[test]
    fn non_boolean_flags_need_a_value() {
        let mut flags = ParsedFlags::parse(["--name", "--items"]).unwrap();
        assert!(matches!(
            NAME.value(&mut flags),
            Err(FlagError::InvalidValue { .. })
        ));
        assert!(matches!(
            ITEMS.value(&mut flags),
            Err(FlagError::InvalidValue { .. })
        ));
    }

    #[test]
    fn string_set_drops_empty_items_and_duplicates() {
        let mut flags = ParsedFlags::parse(["--items=b,a,,b, c"]).unwrap();
        let items = ITEMS.value(&mut flags).unwrap().unwrap();
        assert_eq!(
            items.into_iter().collect::<Vec<_>>(),
            vec!["a".to_string(), "b".to_string(), "c".to_string()]
        );
    }

    #[test]
    fn empty_string_set_is_present_but_empty() {
        let mut flags = ParsedFlags::parse(["--items="]).unwrap();
        assert_eq!(ITEMS.value(&mut flags).unwrap(), Some(BTreeSet::new()));
    }

    #[test]
    fn enum_set_rejects_unknown_members() {
        let mut flags = ParsedFlags::parse(["--numbers=1,2,2"]).unwrap();
        assert_eq!(
            NUMBERS.value(&mut flags).unwrap(),
            Some(BTreeSet::from([1u8, 2]))
        );

        let mut flags = ParsedFlags::parse(["--numbers=1,x"]).unwrap();
        let err = NUMBERS.value(&mut flags).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value for flag --numbers: unknown value 'x'."
        );
    }
}
