//! Path string helpers shared by the backends and the coordinator.
//!
//! These operate on local-style path strings rather than `Path`, because a
//! remote entry's path is not a path on this host. Separators are `/` on
//! every backend this crate knows about.

/// Last path component. The filesystem root is its own base name.
pub fn base_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/";
    }
    match trimmed.rfind('/') {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    }
}

/// Containing directory portion, without a trailing separator (except for
/// the root itself). An empty string means the path had no directory part.
pub fn dir_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/";
    }
    match trimmed.rfind('/') {
        Some(0) => "/",
        Some(idx) => &trimmed[..idx],
        None => "",
    }
}

/// Join a directory and a child name with exactly one separator.
pub fn join(dir: &str, name: &str) -> String {
    let name = name.trim_start_matches('/');
    if dir.is_empty() {
        return name.to_string();
    }
    let dir = dir.trim_end_matches('/');
    if dir.is_empty() {
        format!("/{name}")
    } else {
        format!("{dir}/{name}")
    }
}

/// Compute the target path for renaming `old_path` to a new base name.
///
/// The new name is whitespace-trimmed, joined onto the old path's parent
/// directory, and stripped of trailing separators. A rename target must
/// never end in a separator, so one typed by the user is normalized away
/// rather than rejected.
pub fn rename_target(old_path: &str, new_base: &str) -> String {
    let joined = join(dir_name(old_path), new_base.trim());
    let stripped = joined.trim_end_matches('/');
    if stripped.is_empty() {
        "/".to_string()
    } else {
        stripped.to_string()
    }
}

/// Split a base name at its last extension boundary. The extension keeps
/// its leading dot; interior dots belong to the stem. A leading dot alone
/// (dotfiles) is not an extension boundary.
pub fn split_extension(base: &str) -> (&str, &str) {
    match base.rfind('.') {
        Some(idx) if idx > 0 => (&base[..idx], &base[idx..]),
        _ => (base, ""),
    }
}

/// Default name for a duplicate of `base`: the suffix goes between the stem
/// and the last extension (`report.v2.txt` → `report.v2-copy.txt`).
pub fn duplicate_name(base: &str, suffix: &str) -> String {
    let (stem, ext) = split_extension(base);
    format!("{stem}{suffix}{ext}")
}

/// Char range covering only the filename stem of `value`, excluding any
/// directory prefix and the extension. Used to pre-select the editable part
/// of a name in rename/duplicate dialogs.
pub fn basename_selection(value: &str) -> (usize, usize) {
    let base = base_name(value);
    let (stem, _ext) = split_extension(base);
    // Offset within the separator-trimmed value, so a trailing `/` does
    // not push the range past the stem.
    let trimmed = value.trim_end_matches('/');
    let start = if trimmed.is_empty() {
        0
    } else {
        trimmed.chars().count() - base.chars().count()
    };
    (start, start + stem.chars().count())
}
