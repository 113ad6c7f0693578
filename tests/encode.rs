extern crate h2_codec;
#[macro_use]
extern crate trackable;

use h2_codec::hpack::{
    encode_block, make_header_block, DynamicTable, Encoding, Header, HeaderBlockEntry,
    Representation,
};

fn encode(table: &mut DynamicTable, encoding: Encoding, headers: &[(&str, &str)]) -> Vec<u8> {
    let entries = make_header_block(
        Representation::IncrementalIndexing,
        headers.iter().map(|&(name, value)| Header::new(name, value)),
    );
    let (block, _) = track_try_unwrap!(encode_block(&entries, encoding, table));
    block
}

const FIRST_REQUEST: &[(&str, &str)] = &[
    (":method", "GET"),
    (":scheme", "http"),
    (":path", "/"),
    (":authority", "www.example.com"),
];
const SECOND_REQUEST: &[(&str, &str)] = &[
    (":method", "GET"),
    (":scheme", "http"),
    (":path", "/"),
    (":authority", "www.example.com"),
    ("cache-control", "no-cache"),
];
const THIRD_REQUEST: &[(&str, &str)] = &[
    (":method", "GET"),
    (":scheme", "https"),
    (":path", "/index.html"),
    (":authority", "www.example.com"),
    ("custom-key", "custom-value"),
];

const FIRST_RESPONSE: &[(&str, &str)] = &[
    (":status", "302"),
    ("cache-control", "private"),
    ("date", "Mon, 21 Oct 2013 20:13:21 GMT"),
    ("location", "https://www.example.com"),
];
const SECOND_RESPONSE: &[(&str, &str)] = &[
    (":status", "307"),
    ("cache-control", "private"),
    ("date", "Mon, 21 Oct 2013 20:13:21 GMT"),
    ("location", "https://www.example.com"),
];
const THIRD_RESPONSE: &[(&str, &str)] = &[
    (":status", "200"),
    ("cache-control", "private"),
    ("date", "Mon, 21 Oct 2013 20:13:22 GMT"),
    ("location", "https://www.example.com"),
    ("content-encoding", "gzip"),
    (
        "set-cookie",
        "foo=ASDJKHQKBZXOQWEOPIUAXQWEOIU; max-age=3600; version=1",
    ),
];

#[test]
/// https://tools.ietf.org/html/rfc7541#appendix-C.3
fn request_examples_without_huffman_coding() {
    let mut table = DynamicTable::new(4096);

    // C.3.1. First Request
    let block = encode(&mut table, Encoding::Raw, FIRST_REQUEST);
    assert_eq!(hex::encode(block), "828684410f7777772e6578616d706c652e636f6d");
    assert_eq!(table.table_size(), 57);

    // C.3.2. Second Request
    let block = encode(&mut table, Encoding::Raw, SECOND_REQUEST);
    assert_eq!(hex::encode(block), "828684be58086e6f2d6361636865");
    assert_eq!(table.table_size(), 110);

    // C.3.3. Third Request
    let block = encode(&mut table, Encoding::Raw, THIRD_REQUEST);
    assert_eq!(
        hex::encode(block),
        "828785bf400a637573746f6d2d6b65790c637573746f6d2d76616c7565"
    );
    assert_eq!(table.table_size(), 164);
}

#[test]
/// https://tools.ietf.org/html/rfc7541#appendix-C.4
fn request_examples_with_huffman_coding() {
    let mut table = DynamicTable::new(4096);

    // C.4.1. First Request
    let block = encode(&mut table, Encoding::Huffman, FIRST_REQUEST);
    assert_eq!(hex::encode(block), "828684418cf1e3c2e5f23a6ba0ab90f4ff");
    assert_eq!(table.table_size(), 57);

    // C.4.2. Second Request
    let block = encode(&mut table, Encoding::Huffman, SECOND_REQUEST);
    assert_eq!(hex::encode(block), "828684be5886a8eb10649cbf");
    assert_eq!(table.table_size(), 110);

    // C.4.3. Third Request
    let block = encode(&mut table, Encoding::Huffman, THIRD_REQUEST);
    assert_eq!(
        hex::encode(block),
        "828785bf408825a849e95ba97d7f8925a849e95bb8e8b4bf"
    );
    assert_eq!(table.table_size(), 164);
}

#[test]
/// https://tools.ietf.org/html/rfc7541#appendix-C.5
fn response_examples_without_huffman_coding() {
    let mut table = DynamicTable::new(256);

    // C.5.1. First Response
    let block = encode(&mut table, Encoding::Raw, FIRST_RESPONSE);
    assert_eq!(
        hex::encode(block),
        "4803333032580770726976617465611d4d6f6e2c203231204f637420323031332032303a31333a32312047\
         4d546e1768747470733a2f2f7777772e6578616d706c652e636f6d"
    );
    assert_eq!(table.table_size(), 222);

    // C.5.2. Second Response
    let block = encode(&mut table, Encoding::Raw, SECOND_RESPONSE);
    assert_eq!(hex::encode(block), "4803333037c1c0bf");
    assert_eq!(table.table_size(), 222);

    // C.5.3. Third Response
    let block = encode(&mut table, Encoding::Raw, THIRD_RESPONSE);
    assert_eq!(
        hex::encode(block),
        "88c1611d4d6f6e2c203231204f637420323031332032303a31333a323220474d54c05a04677a69707738666f\
         6f3d4153444a4b48514b425a584f5157454f50495541585157454f49553b206d61782d6167653d333630303b\
         2076657273696f6e3d31"
    );
    assert_eq!(table.table_size(), 215);
    assert_eq!(table.len(), 3);
}

#[test]
/// https://tools.ietf.org/html/rfc7541#appendix-C.6
fn response_examples_with_huffman_coding() {
    let mut table = DynamicTable::new(256);

    // C.6.1. First Response
    let block = encode(&mut table, Encoding::Huffman, FIRST_RESPONSE);
    assert_eq!(
        hex::encode(block),
        "488264025885aec3771a4b6196d07abe941054d444a8200595040b8166e082a62d1bff6e919d29ad171863c7\
         8f0b97c8e9ae82ae43d3"
    );
    assert_eq!(table.table_size(), 222);

    // C.6.2. Second Response
    let block = encode(&mut table, Encoding::Huffman, SECOND_RESPONSE);
    assert_eq!(hex::encode(block), "4883640effc1c0bf");
    assert_eq!(table.table_size(), 222);

    // C.6.3. Third Response
    let block = encode(&mut table, Encoding::Huffman, THIRD_RESPONSE);
    assert_eq!(
        hex::encode(block),
        "88c16196d07abe941054d444a8200595040b8166e084a62d1bffc05a839bd9ab77ad94e7821dd7f2e6c7b335\
         dfdfcd5b3960d5af27087f3672c1ab270fb5291f9587316065c003ed4ee5b1063d5007"
    );
    assert_eq!(table.table_size(), 215);
}

#[test]
fn emitted_entries_report_indexing() {
    let mut table = DynamicTable::default();
    let entries = make_header_block(
        Representation::IncrementalIndexing,
        vec![Header::new(":method", "GET"), Header::new("hoge", "fuga")],
    );
    let (block, emitted) = track_try_unwrap!(encode_block(&entries, Encoding::Huffman, &mut table));
    assert_eq!(hex::encode(block), "8240839cf3178396d987");
    assert_eq!(emitted, entries);

    let (block, emitted) = track_try_unwrap!(encode_block(&entries, Encoding::Huffman, &mut table));
    assert_eq!(block, [0x82, 0xbe]);
    assert_eq!(
        emitted[1],
        HeaderBlockEntry::field(Representation::Indexed, Header::new("hoge", "fuga"))
    );
}

#[test]
fn size_update_shrinks_the_table() {
    let mut table = DynamicTable::default();
    encode(&mut table, Encoding::Raw, FIRST_REQUEST);
    assert_eq!(table.len(), 1);

    let entries = vec![HeaderBlockEntry::SizeUpdate { max_size: 0 }];
    let (block, _) = track_try_unwrap!(encode_block(&entries, Encoding::Raw, &mut table));
    assert_eq!(block, [0x20]);
    assert!(table.is_empty());
    assert_eq!(table.max_table_size(), 0);
}
