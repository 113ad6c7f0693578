use crate::hpack::field::{self, HeaderBlockEntry};
use crate::hpack::table::DynamicTable;
use crate::io::SliceReader;
use crate::Result;

/// Iterator over the entries of a single header block.
///
/// Each entry's dynamic table update is applied before the next entry is
/// read. Iteration stops after the first error.
#[derive(Debug)]
pub struct HeaderBlockDecoder<'a, 'b> {
    table: &'a mut DynamicTable,
    reader: SliceReader<'b>,
    failed: bool,
}
impl<'a, 'b> HeaderBlockDecoder<'a, 'b> {
    /// Makes a new `HeaderBlockDecoder` instance.
    pub fn new(block: &'b [u8], table: &'a mut DynamicTable) -> Self {
        HeaderBlockDecoder {
            table,
            reader: SliceReader::new(block),
            failed: false,
        }
    }

    /// Returns the dynamic table as it stands after the entries read so far.
    pub fn table(&self) -> &DynamicTable {
        &self.table
    }
}
impl<'a, 'b> Iterator for HeaderBlockDecoder<'a, 'b> {
    type Item = Result<HeaderBlockEntry>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.reader.eos() {
            return None;
        }
        match track!(field::decode_entry(&mut self.reader, self.table)) {
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
            Ok(entry) => {
                if let Some(update) = entry.table_update() {
                    update.apply(self.table);
                }
                Some(Ok(entry))
            }
        }
    }
}

/// Decodes a complete header block.
///
/// `table` is updated only if the whole block decodes successfully.
pub fn decode_block(block: &[u8], table: &mut DynamicTable) -> Result<Vec<HeaderBlockEntry>> {
    let mut scratch = table.clone();
    let entries = track!(HeaderBlockDecoder::new(block, &mut scratch).collect::<Result<Vec<_>>>())?;
    *table = scratch;
    Ok(entries)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::hpack::{Header, Representation};
    use crate::ErrorKind;

    #[test]
    fn entries_see_earlier_insertions() {
        let mut block = vec![0x40, 4, b'h', b'o', b'g', b'e', 4, b'f', b'u', b'g', b'a'];
        block.push(0xbe);
        let mut table = DynamicTable::default();
        let entries = track_try_unwrap!(decode_block(&block, &mut table));

        let header = Header::new("hoge", "fuga");
        assert_eq!(
            entries,
            [
                HeaderBlockEntry::field(Representation::IncrementalIndexing, header.clone()),
                HeaderBlockEntry::field(Representation::Indexed, header.clone()),
            ]
        );
        assert_eq!(table.entries(), &[header]);
    }

    #[test]
    fn empty_block() {
        let mut table = DynamicTable::default();
        assert!(track_try_unwrap!(decode_block(&[], &mut table)).is_empty());
    }

    #[test]
    fn failed_block_leaves_table_untouched() {
        let block = [0x40, 4, b'h', b'o', b'g', b'e', 4, b'f', b'u', b'g', b'a', 0xbf];
        let mut table = DynamicTable::default();
        let e = decode_block(&block, &mut table).err().unwrap();
        assert_eq!(*e.kind(), ErrorKind::InvalidInput);
        assert!(table.is_empty());
    }

    #[test]
    fn iteration_stops_after_error() {
        let block = [0x80, 0x82];
        let mut table = DynamicTable::default();
        let mut decoder = HeaderBlockDecoder::new(&block, &mut table);
        assert!(decoder.next().map_or(false, |r| r.is_err()));
        assert!(decoder.next().is_none());
    }
}
