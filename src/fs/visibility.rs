/// Returns true iff the name begins with a dot.
///
/// The check is purely lexical: literal `.` and `..` segments count as
/// hidden too.
pub fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Returns true iff any segment of the slash-separated path is hidden.
pub fn path_contains_hidden(path: &str) -> bool {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .any(is_hidden)
}
