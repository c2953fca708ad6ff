//! Title normalization shared by the matcher.
//!
//! Every function here case-folds its output, so results can be compared with
//! plain string equality.

use std::sync::LazyLock;

use regex::Regex;

/// Optional leading track number and dash: "03 - Song", "03 Song", "-Song".
static TRACK_NUMBER_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\d+)?\s*-?\s*(.+)$").unwrap());

/// A trailing extension: "Song.mp3" captures "Song".
static FILE_EXTENSION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(.+)\.\w+$").unwrap());

fn path_segments(path: &str) -> impl DoubleEndedIterator<Item = &str> {
    path.split(['/', '\\'])
}

/// Title derived from the file name at the end of `path`, extension removed.
///
/// A file name without an extension is used as is.
pub fn derive_filename_title(path: &str) -> String {
    let file = path_segments(path).next_back().unwrap_or(path);
    match FILE_EXTENSION.captures(file) {
        Some(captures) => captures[1].to_lowercase(),
        None => file.to_lowercase(),
    }
}

/// Name of the folder containing the file, which in most libraries is the album.
pub fn derive_folder_album(path: &str) -> Option<String> {
    let mut segments = path_segments(path);
    segments.next_back()?;
    segments.next_back().map(str::to_lowercase)
}

/// Title with any leading track number and separator removed.
pub fn derive_comparable_title(title: &str) -> String {
    match TRACK_NUMBER_PREFIX.captures(title) {
        Some(captures) => captures[1].to_lowercase(),
        None => title.to_lowercase(),
    }
}
