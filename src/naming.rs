//! Asset name normalization
//!
//! Turns a local filesystem path into the public ID an asset is stored
//! under: a relative, slash-delimited path without extension.

const SEPARATOR: char = '/';

/// Compute the public ID for `path`.
///
/// `base_path` is stripped from the front of `path` when it is a prefix on a
/// segment boundary; a base path that does not match leaves `path` untouched
/// apart from its leading separator. A non-empty `prepend` becomes the first
/// segment of the result. Surrounding whitespace is ignored on all inputs.
pub fn normalize(path: &str, base_path: &str, prepend: &str) -> String {
    let path = to_slashes(path.trim());
    let base_path = to_slashes(base_path.trim());
    let base_path = base_path.trim_end_matches(SEPARATOR);
    let prepend = to_slashes(prepend.trim());
    let prepend = prepend.trim_matches(SEPARATOR);

    let name = strip_base(&path, base_path).trim_start_matches(SEPARATOR);
    let name = strip_extension(name);

    if prepend.is_empty() {
        name.to_string()
    } else {
        format!("{}{}{}", prepend, SEPARATOR, name)
    }
}

fn to_slashes(s: &str) -> String {
    if std::path::MAIN_SEPARATOR == SEPARATOR {
        s.to_string()
    } else {
        s.replace(std::path::MAIN_SEPARATOR, "/")
    }
}

fn strip_base<'a>(path: &'a str, base_path: &str) -> &'a str {
    if base_path.is_empty() {
        return path;
    }
    match path.strip_prefix(base_path) {
        Some(rest) if rest.is_empty() || rest.starts_with(SEPARATOR) => rest,
        _ => path,
    }
}

// Dotfiles keep their name: ".bashrc" has no extension.
fn strip_extension(name: &str) -> &str {
    let segment_start = name.rfind(SEPARATOR).map_or(0, |i| i + 1);
    match name[segment_start..].rfind('.') {
        Some(dot) if dot > 0 => &name[..segment_start + dot],
        _ => name,
    }
}
