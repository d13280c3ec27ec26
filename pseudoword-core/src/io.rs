use std::fs;
use std::io;
use std::path::Path;

/// Reads a whole dictionary file as text.
///
/// Invalid UTF-8 is reported as `InvalidData`.
pub(crate) fn read_text<P: AsRef<Path>>(path: P) -> io::Result<String> {
	fs::read_to_string(path)
}

/// Name a dictionary is known by: its file name without extension.
///
/// - `"./dictionaries/owl2.txt"` → `"owl2"`
/// - `"sowpods"` → `"sowpods"`
pub(crate) fn dictionary_name<P: AsRef<Path>>(path: P) -> io::Result<String> {
	path.as_ref()
		.file_stem()
		.map(|stem| stem.to_string_lossy().into_owned())
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Dictionary path has no file name"))
}
