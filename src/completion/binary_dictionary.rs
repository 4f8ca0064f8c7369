use std::io::{Cursor, Read};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use tracing::debug;

use super::dictionary::Dictionary;
use super::entry::Entry;
use super::error::{Error, Result};

// Layout, all integers big endian:
//   u32 entry count
//   per entry: u32 word length in bytes, word bytes (UTF-8), u64 frequency

/// Converts a count or byte length to the u32 the layout stores.
fn length_u32(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| Error::TooLarge(len))
}

pub fn encode(dictionary: &Dictionary) -> Result<Vec<u8>> {
    let data_size = 4 + dictionary
        .iter()
        .map(|entry| 4 + entry.word().len() + 8)
        .sum::<usize>();
    let mut output_data: Vec<u8> = Vec::with_capacity(data_size);

    output_data.write_u32::<BigEndian>(length_u32(dictionary.len())?)?;
    for entry in dictionary {
        output_data.write_u32::<BigEndian>(length_u32(entry.word().len())?)?;
        output_data.extend_from_slice(entry.word().as_bytes());
        output_data.write_u64::<BigEndian>(entry.frequency())?;
    }
    debug_assert_eq!(output_data.len(), data_size);
    Ok(output_data)
}

fn read_entry(cursor: &mut Cursor<&[u8]>) -> Result<Entry> {
    let word_len = cursor.read_u32::<BigEndian>()? as usize;
    let remaining = cursor.get_ref().len() - cursor.position() as usize;
    if word_len > remaining {
        return Err(Error::Io(std::io::ErrorKind::UnexpectedEof.into()));
    }
    let mut word = vec![0; word_len];
    cursor.read_exact(&mut word)?;
    let word = String::from_utf8(word)?;
    let frequency = cursor.read_u64::<BigEndian>()?;
    Ok(Entry::new(word, frequency))
}

pub fn decode(buffer: &[u8]) -> Result<Dictionary> {
    let mut cursor = Cursor::new(buffer);
    let count = cursor.read_u32::<BigEndian>()? as usize;
    // every entry takes at least 12 bytes, which bounds the preallocation
    let mut entries = Vec::with_capacity(count.min(buffer.len() / 12));
    for _ in 0..count {
        entries.push(read_entry(&mut cursor)?);
    }
    let trailing = buffer.len() - cursor.position() as usize;
    if trailing != 0 {
        return Err(Error::TrailingBytes(trailing));
    }
    if entries.is_empty() {
        return Err(Error::EmptyDictionary);
    }
    debug!(entries = entries.len(), "binary dictionary decoded");
    Ok(Dictionary::new(entries))
}
