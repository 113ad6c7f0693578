//! Header block entries and their wire representations (RFC 7541 §6).
use std::io::Write;
use tracing::trace;

use crate::hpack::literal::{self, Encoding};
use crate::hpack::table::{self, DynamicTable, Header, DYNAMIC_TABLE_OFFSET};
use crate::io::SliceReader;
use crate::{ErrorKind, Result};

/// How a header field is represented in a header block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Representation {
    /// Indexed Header Field (RFC 7541 §6.1).
    Indexed,

    /// Literal Header Field with Incremental Indexing (RFC 7541 §6.2.1).
    IncrementalIndexing,

    /// Literal Header Field without Indexing (RFC 7541 §6.2.2).
    WithoutIndexing,

    /// Literal Header Field Never Indexed (RFC 7541 §6.2.3).
    NeverIndexed,
}
impl Representation {
    /// Returns the wire prefix pattern of this representation.
    pub fn prefix(self) -> PrefixPattern {
        match self {
            Representation::Indexed => PrefixPattern::Indexed,
            Representation::IncrementalIndexing => PrefixPattern::IncrementalIndexing,
            Representation::WithoutIndexing => PrefixPattern::WithoutIndexing,
            Representation::NeverIndexed => PrefixPattern::NeverIndexed,
        }
    }
}

/// The five bit patterns that start a header block entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum PrefixPattern {
    Indexed = 0b1000_0000,
    IncrementalIndexing = 0b0100_0000,
    SizeUpdate = 0b0010_0000,
    NeverIndexed = 0b0001_0000,
    WithoutIndexing = 0b0000_0000,
}
impl PrefixPattern {
    /// Classifies the first octet of an entry.
    ///
    /// Patterns are tested from the highest to the lowest, so the first set
    /// bit among the top four decides.
    pub fn classify(octet: u8) -> Self {
        if octet & 0b1000_0000 != 0 {
            PrefixPattern::Indexed
        } else if octet & 0b0100_0000 != 0 {
            PrefixPattern::IncrementalIndexing
        } else if octet & 0b0010_0000 != 0 {
            PrefixPattern::SizeUpdate
        } else if octet & 0b0001_0000 != 0 {
            PrefixPattern::NeverIndexed
        } else {
            PrefixPattern::WithoutIndexing
        }
    }

    /// Width of the integer prefix that follows the pattern bits.
    pub fn prefix_bits(self) -> u8 {
        match self {
            PrefixPattern::Indexed => 7,
            PrefixPattern::IncrementalIndexing => 6,
            PrefixPattern::SizeUpdate => 5,
            PrefixPattern::NeverIndexed | PrefixPattern::WithoutIndexing => 4,
        }
    }

    /// The pattern bits shifted down to the lowest position.
    fn pattern_value(self) -> u8 {
        ((self as u16) >> self.prefix_bits()) as u8
    }

    fn representation(self) -> Option<Representation> {
        match self {
            PrefixPattern::Indexed => Some(Representation::Indexed),
            PrefixPattern::IncrementalIndexing => Some(Representation::IncrementalIndexing),
            PrefixPattern::SizeUpdate => None,
            PrefixPattern::NeverIndexed => Some(Representation::NeverIndexed),
            PrefixPattern::WithoutIndexing => Some(Representation::WithoutIndexing),
        }
    }
}

/// One element of a header block.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HeaderBlockEntry {
    /// A header field.
    Field {
        /// How the field is (or is to be) represented on the wire.
        representation: Representation,

        /// The field.
        header: Header,
    },

    /// Dynamic Table Size Update (RFC 7541 §6.3).
    SizeUpdate {
        /// The new maximum size of the dynamic table.
        max_size: usize,
    },
}
impl HeaderBlockEntry {
    /// Makes a `Field` entry.
    pub fn field(representation: Representation, header: Header) -> Self {
        HeaderBlockEntry::Field {
            representation,
            header,
        }
    }

    /// Returns the wire prefix pattern of this entry.
    pub fn prefix(&self) -> PrefixPattern {
        match *self {
            HeaderBlockEntry::Field { representation, .. } => representation.prefix(),
            HeaderBlockEntry::SizeUpdate { .. } => PrefixPattern::SizeUpdate,
        }
    }

    /// Returns the header field carried by this entry, if any.
    pub fn header(&self) -> Option<&Header> {
        match *self {
            HeaderBlockEntry::Field { ref header, .. } => Some(header),
            HeaderBlockEntry::SizeUpdate { .. } => None,
        }
    }

    /// Returns the change this entry makes to the dynamic table.
    ///
    /// Both peers must apply it before the next entry of the same block is processed.
    pub fn table_update(&self) -> Option<TableUpdate> {
        match *self {
            HeaderBlockEntry::Field {
                representation: Representation::IncrementalIndexing,
                ref header,
            } => Some(TableUpdate::Insert(header.clone())),
            HeaderBlockEntry::Field { .. } => None,
            HeaderBlockEntry::SizeUpdate { max_size } => Some(TableUpdate::Resize(max_size)),
        }
    }
}

/// A pending change to a dynamic table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableUpdate {
    /// Insert the header as the newest entry.
    Insert(Header),

    /// Change the maximum table size.
    Resize(usize),
}
impl TableUpdate {
    /// Applies the change to `table`.
    pub fn apply(self, table: &mut DynamicTable) {
        match self {
            TableUpdate::Insert(header) => table.push(header),
            TableUpdate::Resize(max_size) => table.update_table_size(max_size),
        }
    }
}

/// Builds outgoing entries for `headers`, all using `representation`.
///
/// Headers that exactly match a static table entry with a non-empty value
/// are promoted to `Representation::Indexed`.
pub fn make_header_block<I>(representation: Representation, headers: I) -> Vec<HeaderBlockEntry>
where
    I: IntoIterator<Item = Header>,
{
    headers
        .into_iter()
        .map(|header| {
            let representation = if static_exact_index(&header).is_some() {
                Representation::Indexed
            } else {
                representation
            };
            HeaderBlockEntry::field(representation, header)
        })
        .collect()
}

fn static_exact_index(header: &Header) -> Option<usize> {
    if header.value.is_empty() {
        None
    } else {
        table::static_index(&header.name, &header.value)
    }
}

fn exact_index(header: &Header, dynamic_table: &DynamicTable) -> Option<usize> {
    static_exact_index(header).or_else(|| {
        dynamic_table
            .find(header)
            .map(|position| DYNAMIC_TABLE_OFFSET + position)
    })
}

/// Writes one entry and returns it as actually emitted.
///
/// A field with an exact match in either table is always emitted as
/// `Representation::Indexed`. `dynamic_table` is only read; applying
/// [`HeaderBlockEntry::table_update`] is up to the caller.
pub fn encode_entry<W: Write>(
    mut writer: W,
    entry: &HeaderBlockEntry,
    encoding: Encoding,
    dynamic_table: &DynamicTable,
) -> Result<HeaderBlockEntry> {
    let (representation, header) = match *entry {
        HeaderBlockEntry::SizeUpdate { max_size } => {
            let pattern = PrefixPattern::SizeUpdate;
            track!(literal::encode_int(
                writer,
                pattern.pattern_value(),
                pattern.prefix_bits(),
                max_size
            ))?;
            return Ok(entry.clone());
        }
        HeaderBlockEntry::Field {
            representation,
            ref header,
        } => (representation, header),
    };

    if let Some(index) = exact_index(header, dynamic_table) {
        let pattern = PrefixPattern::Indexed;
        track!(literal::encode_int(
            writer,
            pattern.pattern_value(),
            pattern.prefix_bits(),
            index
        ))?;
        return Ok(HeaderBlockEntry::field(
            Representation::Indexed,
            header.clone(),
        ));
    }
    track_assert_ne!(
        representation,
        Representation::Indexed,
        ErrorKind::InvalidInput,
        "No table entry matches {}",
        header
    );

    let pattern = representation.prefix();
    let name_index = table::static_name_index(&header.name).unwrap_or(0);
    track!(literal::encode_int(
        &mut writer,
        pattern.pattern_value(),
        pattern.prefix_bits(),
        name_index
    ))?;
    if name_index == 0 {
        track!(literal::encode_string(&mut writer, &header.name, encoding))?;
    }
    track!(literal::encode_string(&mut writer, &header.value, encoding))?;
    Ok(entry.clone())
}

/// Reads one entry from `reader`.
///
/// `dynamic_table` is only read; applying [`HeaderBlockEntry::table_update`]
/// is up to the caller.
pub fn decode_entry(
    reader: &mut SliceReader,
    dynamic_table: &DynamicTable,
) -> Result<HeaderBlockEntry> {
    let pattern = PrefixPattern::classify(track!(reader.peek_u8())?);
    let (_, index) = track!(literal::decode_int(&mut *reader, pattern.prefix_bits()))?;
    let entry = match pattern.representation() {
        None => HeaderBlockEntry::SizeUpdate { max_size: index },
        Some(Representation::Indexed) => {
            track_assert_ne!(index, 0, ErrorKind::InvalidInput);
            let header = track!(table::entry(index, dynamic_table))?;
            HeaderBlockEntry::field(Representation::Indexed, header)
        }
        Some(representation) => {
            let mut name = if index == 0 {
                Vec::new()
            } else {
                track!(table::entry(index, dynamic_table))?.name
            };
            if name.is_empty() {
                name = track!(literal::decode_string(reader))?;
            }
            let value = track!(literal::decode_string(reader))?;
            HeaderBlockEntry::field(representation, Header { name, value })
        }
    };
    trace!("decode_entry: {:?} (offset={})", entry, reader.offset());
    Ok(entry)
}

/// Reads one entry from the head of `bytes`, returning it with the number of octets consumed.
pub fn decode_entry_slice(
    bytes: &[u8],
    dynamic_table: &DynamicTable,
) -> Result<(HeaderBlockEntry, usize)> {
    let mut reader = SliceReader::new(bytes);
    let entry = track!(decode_entry(&mut reader, dynamic_table))?;
    Ok((entry, reader.offset()))
}
