use std::ffi::OsStr;
use std::path::Path;

/// Check if a directory is listed in a PATH-style value
pub fn is_directory_in(directory: &Path, path_var: &OsStr) -> bool {
    std::env::split_paths(path_var).any(|entry| entry == directory)
}

/// Check if a directory is in PATH
pub fn is_directory_in_path(directory: &Path) -> bool {
    std::env::var_os("PATH").is_some_and(|path| is_directory_in(directory, &path))
}
