use std::path::MAIN_SEPARATOR;

const EXE_SUFFIX: &str = ".exe";

/// Normalized view of an executable reference, used for dispatch only.
///
/// `basename` has the directory prefix and any `.exe` suffix removed,
/// `name` is the basename with its trailing version stripped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Executable {
    pub basename: String,
    pub name: String,
    pub version: String,
}

impl Executable {
    pub fn parse(execute_path: &str) -> Self {
        let basename = strip_exe_suffix(remove_file_path(trim_quotes(execute_path))).to_string();
        let (name, version) = split_version(&basename);

        Self {
            name: name.to_string(),
            version: version.to_string(),
            basename,
        }
    }

    pub fn has_version(&self) -> bool {
        !self.version.is_empty()
    }
}

pub fn trim_quotes(s: &str) -> &str {
    s.trim_matches('"')
}

fn is_separator(c: char) -> bool {
    c == '/' || c == MAIN_SEPARATOR
}

/// Returns the last path element, ignoring trailing separators
pub fn remove_file_path(s: &str) -> &str {
    let trimmed = s.trim_end_matches(is_separator);
    if trimmed.is_empty() {
        return s;
    }
    trimmed.rsplit(is_separator).next().unwrap_or(trimmed)
}

/// Removes a trailing `.exe`, whatever its case
pub fn strip_exe_suffix(s: &str) -> &str {
    let split = s.len().saturating_sub(EXE_SUFFIX.len());
    match s.get(split..) {
        Some(suffix) if suffix.eq_ignore_ascii_case(EXE_SUFFIX) => &s[..split],
        _ => s,
    }
}

/// Splits a trailing run of digits and dots off `s`: `python2.7` -> (`python`, `2.7`)
pub fn split_version(s: &str) -> (&str, &str) {
    let prefix = s.trim_end_matches(|c: char| c.is_ascii_digit() || c == '.');
    s.split_at(prefix.len())
}
