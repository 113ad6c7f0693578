//! Static and dynamic header tables (RFC 7541 §2.3).
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::OnceLock;
use tracing::debug;

use crate::{ErrorKind, Result};

/// Maximum dynamic table size a connection starts with (RFC 7540 §6.5.2).
pub const DEFAULT_TABLE_SIZE: usize = 4096;

/// Per-entry overhead added to `name.len() + value.len()` (RFC 7541 §4.1).
pub const ENTRY_OVERHEAD: usize = 32;

/// Number of entries in the static table.
pub const STATIC_TABLE_LEN: usize = 61;

/// Combined index of the newest dynamic table entry.
pub const DYNAMIC_TABLE_OFFSET: usize = STATIC_TABLE_LEN + 1;

/// A header field: a name/value pair of octet strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Header {
    /// Field name.
    pub name: Vec<u8>,

    /// Field value.
    pub value: Vec<u8>,
}
impl Header {
    /// Makes a new `Header` instance.
    pub fn new<N, V>(name: N, value: V) -> Self
    where
        N: Into<Vec<u8>>,
        V: Into<Vec<u8>>,
    {
        Header {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Returns the size this header occupies in a dynamic table.
    pub fn size(&self) -> usize {
        self.name.len() + self.value.len() + ENTRY_OVERHEAD
    }
}
impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}: {}",
            String::from_utf8_lossy(&self.name),
            String::from_utf8_lossy(&self.value)
        )
    }
}

/// An entry of the static table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticEntry {
    /// Field name.
    pub name: &'static [u8],

    /// Field value (empty for name-only entries).
    pub value: &'static [u8],
}
impl StaticEntry {
    /// Converts the entry into an owned `Header`.
    pub fn to_header(&self) -> Header {
        Header::new(self.name, self.value)
    }
}

macro_rules! entry {
    ($name:expr, $value: expr) => {
        StaticEntry {
            name: $name,
            value: $value,
        }
    };
    ($name:expr) => {
        StaticEntry {
            name: $name,
            value: b"",
        }
    };
}

/// The static table (RFC 7541 Appendix A); `STATIC_TABLE[i]` has index `i + 1`.
pub const STATIC_TABLE: &[StaticEntry; STATIC_TABLE_LEN] = &[
    entry!(b":authority"),
    entry!(b":method", b"GET"),
    entry!(b":method", b"POST"),
    entry!(b":path", b"/"),
    entry!(b":path", b"/index.html"),
    entry!(b":scheme", b"http"),
    entry!(b":scheme", b"https"),
    entry!(b":status", b"200"),
    entry!(b":status", b"204"),
    entry!(b":status", b"206"),
    entry!(b":status", b"304"),
    entry!(b":status", b"400"),
    entry!(b":status", b"404"),
    entry!(b":status", b"500"),
    entry!(b"accept-charset"),
    entry!(b"accept-encoding", b"gzip, deflate"),
    entry!(b"accept-language"),
    entry!(b"accept-ranges"),
    entry!(b"accept"),
    entry!(b"access-control-allow-origin"),
    entry!(b"age"),
    entry!(b"allow"),
    entry!(b"authorization"),
    entry!(b"cache-control"),
    entry!(b"content-disposition"),
    entry!(b"content-encoding"),
    entry!(b"content-language"),
    entry!(b"content-length"),
    entry!(b"content-location"),
    entry!(b"content-range"),
    entry!(b"content-type"),
    entry!(b"cookie"),
    entry!(b"date"),
    entry!(b"etag"),
    entry!(b"expect"),
    entry!(b"expires"),
    entry!(b"from"),
    entry!(b"host"),
    entry!(b"if-match"),
    entry!(b"if-modified-since"),
    entry!(b"if-none-match"),
    entry!(b"if-range"),
    entry!(b"if-unmodified-since"),
    entry!(b"last-modified"),
    entry!(b"link"),
    entry!(b"location"),
    entry!(b"max-forwards"),
    entry!(b"proxy-authenticate"),
    entry!(b"proxy-authorization"),
    entry!(b"range"),
    entry!(b"referer"),
    entry!(b"refresh"),
    entry!(b"retry-after"),
    entry!(b"server"),
    entry!(b"set-cookie"),
    entry!(b"strict-transport-security"),
    entry!(b"transfer-encoding"),
    entry!(b"user-agent"),
    entry!(b"vary"),
    entry!(b"via"),
    entry!(b"www-authenticate"),
];

#[derive(Debug)]
struct StaticName {
    first_index: usize,
    by_value: HashMap<&'static [u8], usize>,
}

fn reverse_static_table() -> &'static HashMap<&'static [u8], StaticName> {
    static TABLE: OnceLock<HashMap<&'static [u8], StaticName>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table = HashMap::new();
        for (i, entry) in STATIC_TABLE.iter().enumerate() {
            let name = table.entry(entry.name).or_insert_with(|| StaticName {
                first_index: i + 1,
                by_value: HashMap::new(),
            });
            name.by_value.entry(entry.value).or_insert(i + 1);
        }
        table
    })
}

/// Returns the static table entry at `index` (1-origin).
pub fn static_entry(index: usize) -> Option<&'static StaticEntry> {
    index.checked_sub(1).and_then(|i| STATIC_TABLE.get(i))
}

/// Looks up the static index of the exact `(name, value)` pair.
///
/// An empty `value` is a name-only key: it matches the lowest index that
/// carries `name`, whatever that entry's value is.
pub fn static_index(name: &[u8], value: &[u8]) -> Option<usize> {
    let entry = reverse_static_table().get(name)?;
    if value.is_empty() {
        Some(entry.first_index)
    } else {
        entry.by_value.get(value).copied()
    }
}

/// Looks up the lowest static index whose name is `name`.
pub fn static_name_index(name: &[u8]) -> Option<usize> {
    static_index(name, b"")
}

/// Resolves a combined index: `1..=61` address the static table, `62..` the dynamic one.
pub fn entry(index: usize, dynamic_table: &DynamicTable) -> Result<Header> {
    if index < DYNAMIC_TABLE_OFFSET {
        let entry = track_assert_some!(
            static_entry(index),
            ErrorKind::InvalidInput,
            "Invalid header table index: {}",
            index
        );
        Ok(entry.to_header())
    } else {
        let entry = track_assert_some!(
            dynamic_table.at(index - DYNAMIC_TABLE_OFFSET),
            ErrorKind::InvalidInput,
            "Header table index out of range: index={}, dynamic_table.len={}",
            index,
            dynamic_table.len()
        );
        Ok(entry.clone())
    }
}

/// A size bounded, FIFO evicted header table (RFC 7541 §2.3.2, §4).
///
/// Entries are kept newest first; `at(0)` is the most recently pushed one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamicTable {
    entries: VecDeque<Header>,
    size: usize,
    max_size: usize,
}
impl DynamicTable {
    /// Makes a new empty table whose size is capped by `max_size`.
    pub fn new(max_size: usize) -> Self {
        DynamicTable {
            entries: VecDeque::new(),
            size: 0,
            max_size,
        }
    }

    /// Returns the entries, newest first.
    pub fn entries(&self) -> &VecDeque<Header> {
        &self.entries
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the sum of the sizes of all entries.
    pub fn table_size(&self) -> usize {
        self.size
    }

    /// Returns the current maximum table size.
    pub fn max_table_size(&self) -> usize {
        self.max_size
    }

    /// Returns the entry at `position` (0 is the newest).
    pub fn at(&self, position: usize) -> Option<&Header> {
        self.entries.get(position)
    }

    /// Returns the position of the newest entry equal to `header`.
    pub fn find(&self, header: &Header) -> Option<usize> {
        self.entries.iter().position(|e| e == header)
    }

    /// Inserts `header` as the newest entry and evicts the oldest entries
    /// until the table fits within its maximum size.
    ///
    /// A header larger than the maximum size empties the table and is not kept.
    pub fn push(&mut self, header: Header) {
        self.size += header.size();
        self.entries.push_front(header);
        self.evict_exceeded_entries();
    }

    /// Changes the maximum table size, evicting entries as needed.
    pub fn update_table_size(&mut self, max_size: usize) {
        self.max_size = max_size;
        self.evict_exceeded_entries();
    }

    fn evict_exceeded_entries(&mut self) {
        while self.size > self.max_size {
            match self.entries.pop_back() {
                Some(evicted) => {
                    debug!("Evicted from the dynamic table: {}", evicted);
                    self.size -= evicted.size();
                }
                None => {
                    debug_assert_eq!(self.size, 0);
                    self.size = 0;
                }
            }
        }
    }
}
impl Default for DynamicTable {
    fn default() -> Self {
        DynamicTable::new(DEFAULT_TABLE_SIZE)
    }
}
impl fmt::Display for DynamicTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "=== DYNAMIC TABLE ({}/{}) ===", self.size, self.max_size)?;
        for (i, entry) in self.entries.iter().enumerate() {
            writeln!(f, "[{}] -> {}", DYNAMIC_TABLE_OFFSET + i, entry)?;
        }
        Ok(())
    }
}
