/// Validates an instance identifier string.
///
/// Checks:
/// - Non-empty
/// - No path separators (/, \)
/// - Not "." or ".."
/// - Characters are ASCII alphanumeric, '-', or '_'
pub fn validate_identifier(id: &str) -> bool {
    if id.is_empty() {
        return false;
    }
    if id.contains('/') || id.contains('\\') {
        return false;
    }
    if id == "." || id == ".." {
        return false;
    }
    id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Maximum length `useradd` accepts for an account name.
pub const MAX_ACCOUNT_NAME_LEN: usize = 32;

/// Validates an owner identifier, which doubles as the OS account name.
///
/// Portable account names start with a letter or underscore and contain only
/// ASCII alphanumerics, '-', and '_'.
pub fn validate_account_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if name.len() > MAX_ACCOUNT_NAME_LEN {
        return false;
    }
    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Validates a JVM heap size such as `512M`, `2G`, or `1048576`.
pub fn validate_memory_size(value: &str) -> bool {
    let digits = value.strip_suffix(['K', 'k', 'M', 'm', 'G', 'g']).unwrap_or(value);
    !digits.is_empty()
        && digits.chars().all(|c| c.is_ascii_digit())
        && digits.chars().any(|c| c != '0')
}
