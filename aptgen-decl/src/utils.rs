//! Utility functions for qualified names

use std::path::PathBuf;

/// Join a package and a simple name; the default package has no prefix.
pub fn qualify(package: &str, simple_name: &str) -> String {
    if package.is_empty() {
        simple_name.to_string()
    } else {
        format!("{}.{}", package, simple_name)
    }
}

/// Split `a.b.Name` into (`a.b`, `Name`)
pub fn split_qualified(qualified_name: &str) -> (&str, &str) {
    match qualified_name.rsplit_once('.') {
        Some((package, simple)) => (package, simple),
        None => ("", qualified_name),
    }
}

/// Relative source path for a qualified type name, e.g. `app/App_Impl.java`.
pub fn source_path(qualified_name: &str, extension: &str) -> PathBuf {
    let mut path: PathBuf = qualified_name.split('.').collect();
    path.set_extension(extension);
    path
}
