use std::fs::File;
use std::io;
use std::io::Read;
use std::path::Path;

/// Reads a whole text file into a `String`.
///
/// Invalid UTF-8 sequences are replaced with `U+FFFD` rather than
/// rejected: any text is acceptable input for counting.
pub fn read_text<P: AsRef<Path>>(filename: P) -> io::Result<String> {
	let mut bytes = Vec::new();
	File::open(filename)?.read_to_end(&mut bytes)?;
	Ok(match String::from_utf8(bytes) {
		Ok(text) => text,
		Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_read_text_replaces_invalid_utf8() {
		let path = std::env::temp_dir().join(format!("rs-cloud-io-{}.txt", std::process::id()));
		std::fs::write(&path, b"caf\xff rust").unwrap();
		let text = read_text(&path).unwrap();
		std::fs::remove_file(&path).unwrap();
		assert_eq!(text, "caf\u{FFFD} rust");
	}
}
