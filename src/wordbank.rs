use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::Path;

pub const EMBEDDED_WORDBANK: &str = include_str!("resources/words.txt");

fn is_valid_word(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_alphabetic())
}

pub fn load_wordbank_from_str(data: &str) -> Vec<String> {
    data.lines()
        .map(str::trim)
        .filter(|word| is_valid_word(word))
        .map(ToString::to_string)
        .collect()
}

pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<String>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let word = line.trim();
        if is_valid_word(word) {
            words.push(word.to_string());
        }
    }
    Ok(words)
}

/// Concatenate every word list in `dir`, in file name order.
pub fn load_wordbank_from_dir<P: AsRef<Path>>(dir: P) -> io::Result<Vec<String>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    let mut words = Vec::new();
    for path in paths {
        words.extend(load_wordbank_from_file(&path)?);
    }
    Ok(words)
}

/// Load the dictionary named on the command line: a single list, a directory
/// of lists, or the embedded list when nothing is given.
pub fn load_dictionary(path: Option<&Path>) -> io::Result<Vec<String>> {
    match path {
        Some(path) if path.is_dir() => load_wordbank_from_dir(path),
        Some(path) => load_wordbank_from_file(path),
        None => Ok(load_wordbank_from_str(EMBEDDED_WORDBANK)),
    }
}
