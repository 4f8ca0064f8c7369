//! Text dictionary loading.
//!
//! The first line holds the number of entries, followed by that many
//! `word frequency` lines. Broken lines are reported and skipped.

use std::io::BufRead;

use tracing::{debug, info, warn};

use super::dictionary::Dictionary;
use super::entry::Entry;
use super::error::{Error, LineError, Result};

const MAX_PREALLOCATED_ENTRIES: usize = 1 << 20;

pub fn parse_line(line: &str) -> std::result::Result<Entry, LineError> {
    let parts: Vec<&str> = line.split(' ').collect();
    let (word, frequency) = match parts.as_slice() {
        [word, frequency] => (*word, *frequency),
        _ => return Err(LineError::Malformed(line.to_string())),
    };
    let frequency: i64 = frequency
        .parse()
        .map_err(|_| LineError::InvalidFrequency(frequency.to_string()))?;
    if frequency < 0 {
        return Err(LineError::NegativeFrequency {
            word: word.to_string(),
            frequency,
        });
    }
    Ok(Entry::new(word, frequency as u64))
}

/// Reads one line as raw bytes without its terminator. `false` at end of input.
fn read_line_bytes<R: BufRead>(input: &mut R, buffer: &mut Vec<u8>) -> Result<bool> {
    buffer.clear();
    if input.read_until(b'\n', buffer)? == 0 {
        return Ok(false);
    }
    while matches!(buffer.last(), Some(b'\n') | Some(b'\r')) {
        buffer.pop();
    }
    Ok(true)
}

fn decode_line(bytes: &[u8]) -> std::result::Result<&str, LineError> {
    std::str::from_utf8(bytes)
        .map_err(|_| LineError::InvalidEncoding(String::from_utf8_lossy(bytes).into_owned()))
}

/// Reads a dictionary from `input`, consuming exactly the header line and the
/// entry lines it announces, so that `input` can be read further afterwards.
pub fn load<R: BufRead>(input: &mut R) -> Result<Dictionary> {
    debug!("dictionary loading started");
    let mut buffer = Vec::new();
    if !read_line_bytes(input, &mut buffer)? {
        return Err(Error::MissingHeader);
    }
    let header = String::from_utf8_lossy(&buffer);
    let count: usize = header
        .trim()
        .parse()
        .map_err(|_| Error::InvalidHeader(header.to_string()))?;

    let mut entries = Vec::with_capacity(count.min(MAX_PREALLOCATED_ENTRIES));
    let mut skipped = 0;
    for number in 0..count {
        if !read_line_bytes(input, &mut buffer)? {
            warn!(expected = count, read = number, "dictionary ended before the announced entry count");
            break;
        }
        match decode_line(&buffer).and_then(parse_line) {
            Ok(entry) => entries.push(entry),
            Err(err) => {
                skipped += 1;
                warn!(line = number + 2, "{}", err);
            }
        }
    }
    if entries.is_empty() {
        return Err(Error::EmptyDictionary);
    }
    info!(entries = entries.len(), skipped, "dictionary loading completed");

    debug!("dictionary sorting started");
    let dictionary = Dictionary::new(entries);
    debug!("dictionary sorting completed");
    Ok(dictionary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn words(dict: &Dictionary) -> Vec<(&str, u64)> {
        dict.iter().map(|e| (e.word(), e.frequency())).collect()
    }

    #[test]
    fn parse_line_accepts_word_and_frequency() {
        assert_eq!(parse_line("kare 12"), Ok(Entry::new("kare", 12)));
        assert_eq!(parse_line("zero 0"), Ok(Entry::new("zero", 0)));
    }

    #[test]
    fn parse_line_rejects_broken_lines() {
        assert_eq!(parse_line("kare"), Err(LineError::Malformed("kare".to_string())));
        assert_eq!(
            parse_line("kare 1 2"),
            Err(LineError::Malformed("kare 1 2".to_string()))
        );
        assert_eq!(
            parse_line("kare many"),
            Err(LineError::InvalidFrequency("many".to_string()))
        );
        assert_eq!(
            parse_line("kare -3"),
            Err(LineError::NegativeFrequency {
                word: "kare".to_string(),
                frequency: -3
            })
        );
    }

    #[test]
    fn load_sorts_entries() {
        let mut input = Cursor::new("3\nbb 10\nabb 3\naaa 5\n");
        let dict = load(&mut input).unwrap();
        assert_eq!(words(&dict), vec![("aaa", 5), ("abb", 3), ("bb", 10)]);
    }

    #[test]
    fn load_skips_broken_lines() {
        let mut input = Cursor::new("4\r\nkare 10\r\nbroken\r\nkarta x\r\nkarp 2\r\n");
        let dict = load(&mut input).unwrap();
        assert_eq!(words(&dict), vec![("kare", 10), ("karp", 2)]);
    }

    #[test]
    fn load_skips_lines_with_invalid_utf8() {
        let mut input = Cursor::new(&b"3\nkare 10\nk\xffx 5\nkarp 2\n"[..]);
        let dict = load(&mut input).unwrap();
        assert_eq!(words(&dict), vec![("kare", 10), ("karp", 2)]);
    }

    #[test]
    fn decode_line_reports_invalid_utf8() {
        assert_eq!(decode_line(b"kare 1"), Ok("kare 1"));
        assert!(matches!(decode_line(b"k\xffx 5"), Err(LineError::InvalidEncoding(_))));
    }

    #[test]
    fn load_leaves_the_rest_of_the_input() {
        let mut input = Cursor::new("1\nkare 10\n2\nk\nka\n");
        load(&mut input).unwrap();
        let mut rest = String::new();
        std::io::Read::read_to_string(&mut input, &mut rest).unwrap();
        assert_eq!(rest, "2\nk\nka\n");
    }

    #[test]
    fn load_tolerates_short_input() {
        let mut input = Cursor::new("5\nkare 10\n");
        let dict = load(&mut input).unwrap();
        assert_eq!(dict.len(), 1);
    }

    #[test]
    fn load_fails_without_valid_entries() {
        let mut input = Cursor::new("2\nbroken\nalso broken\n");
        assert!(matches!(load(&mut input), Err(Error::EmptyDictionary)));
        let mut input = Cursor::new("0\n");
        assert!(matches!(load(&mut input), Err(Error::EmptyDictionary)));
    }

    #[test]
    fn load_fails_on_bad_header() {
        assert!(matches!(load(&mut Cursor::new("")), Err(Error::MissingHeader)));
        assert!(matches!(
            load(&mut Cursor::new("lots\nkare 1\n")),
            Err(Error::InvalidHeader(_))
        ));
    }
}
