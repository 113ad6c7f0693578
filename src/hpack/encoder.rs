use std::io::Write;

use crate::hpack::field::{self, HeaderBlockEntry};
use crate::hpack::literal::Encoding;
use crate::hpack::table::DynamicTable;
use crate::Result;

/// Encoder of a single header block.
///
/// Each entry's dynamic table update is applied as soon as the entry is
/// written, so later entries of the same block can refer to it.
#[derive(Debug)]
pub struct HeaderBlockEncoder<'a, W> {
    table: &'a mut DynamicTable,
    writer: W,
    encoding: Encoding,
    emitted: Vec<HeaderBlockEntry>,
}
impl<'a, W: Write> HeaderBlockEncoder<'a, W> {
    /// Makes a new `HeaderBlockEncoder` instance.
    pub fn new(writer: W, encoding: Encoding, table: &'a mut DynamicTable) -> Self {
        HeaderBlockEncoder {
            table,
            writer,
            encoding,
            emitted: Vec::new(),
        }
    }

    /// Returns the dynamic table as it stands after the entries written so far.
    pub fn table(&self) -> &DynamicTable {
        &self.table
    }

    /// Writes `entry` and applies its table update.
    pub fn encode_entry(&mut self, entry: &HeaderBlockEntry) -> Result<()> {
        let emitted = track!(field::encode_entry(
            &mut self.writer,
            entry,
            self.encoding,
            self.table
        ))?;
        if let Some(update) = emitted.table_update() {
            update.apply(self.table);
        }
        self.emitted.push(emitted);
        Ok(())
    }

    /// Finishes the block, returning the writer and the entries as emitted.
    pub fn finish(self) -> (W, Vec<HeaderBlockEntry>) {
        (self.writer, self.emitted)
    }
}

/// Encodes `entries` as one header block.
///
/// Returns the block octets and the entries as actually emitted (static and
/// dynamic exact matches become indexed). `table` is left untouched on error.
pub fn encode_block(
    entries: &[HeaderBlockEntry],
    encoding: Encoding,
    table: &mut DynamicTable,
) -> Result<(Vec<u8>, Vec<HeaderBlockEntry>)> {
    let mut scratch = table.clone();
    let (block, emitted) = {
        let mut encoder = HeaderBlockEncoder::new(Vec::new(), encoding, &mut scratch);
        for entry in entries {
            track!(encoder.encode_entry(entry))?;
        }
        encoder.finish()
    };
    *table = scratch;
    Ok((block, emitted))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::hpack::{Header, Representation};
    use crate::ErrorKind;

    #[test]
    fn entries_see_earlier_insertions() {
        let header = Header::new("hoge", "fuga");
        let entries = vec![
            HeaderBlockEntry::field(Representation::IncrementalIndexing, header.clone()),
            HeaderBlockEntry::field(Representation::WithoutIndexing, header.clone()),
        ];
        let mut table = DynamicTable::default();
        let (block, emitted) = track_try_unwrap!(encode_block(&entries, Encoding::Raw, &mut table));

        assert_eq!(block.last(), Some(&0xbe));
        assert_eq!(block.len(), 12);
        assert_eq!(emitted[0], entries[0]);
        assert_eq!(
            emitted[1],
            HeaderBlockEntry::field(Representation::Indexed, header.clone())
        );
        assert_eq!(table.entries(), &[header]);
    }

    #[test]
    fn size_update_applies_in_order() {
        let entries = vec![
            HeaderBlockEntry::SizeUpdate { max_size: 0 },
            HeaderBlockEntry::field(
                Representation::IncrementalIndexing,
                Header::new("hoge", "fuga"),
            ),
        ];
        let mut table = DynamicTable::default();
        track_try_unwrap!(encode_block(&entries, Encoding::Raw, &mut table));
        assert_eq!(table.max_table_size(), 0);
        assert!(table.is_empty());
    }

    #[test]
    fn failed_block_leaves_table_untouched() {
        let entries = vec![
            HeaderBlockEntry::field(
                Representation::IncrementalIndexing,
                Header::new("hoge", "fuga"),
            ),
            HeaderBlockEntry::field(Representation::Indexed, Header::new("foo", "bar")),
        ];
        let mut table = DynamicTable::default();
        let e = encode_block(&entries, Encoding::Raw, &mut table).err().unwrap();
        assert_eq!(*e.kind(), ErrorKind::InvalidInput);
        assert!(table.is_empty());
    }
}
