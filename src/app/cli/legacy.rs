use std::ffi::OsString;

/// Rewrite single-dash long flags (`-userID`) to their double-dash form.
///
/// Only arguments of the form `-<letter><more>` are touched, so short flags
/// such as `-h` and negative numbers pass through unchanged.
pub fn normalize_legacy_flags<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .enumerate()
        .map(|(index, arg)| if index == 0 { arg } else { normalize(arg) })
        .collect()
}

fn normalize(arg: OsString) -> OsString {
    let Some(text) = arg.to_str() else {
        return arg;
    };
    let mut chars = text.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some('-'), Some(second), Some(_)) if second.is_ascii_alphabetic() => {
            OsString::from(format!("-{text}"))
        }
        _ => arg,
    }
}
