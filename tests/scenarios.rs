//! Literal end-to-end scenarios from the spec this crate implements.

mod common;

use lazy_mmap_csv::{LazyCsvOptions, Sequence};

fn header_bytes(reader: &lazy_mmap_csv::LazyCsv) -> Vec<&[u8]> {
    reader.headers().iter().map(|h| h.as_ref()).collect()
}

fn column_bytes(values: &[bstr::BString]) -> Vec<&[u8]> {
    values.iter().map(|v| v.as_ref()).collect()
}

#[test]
fn basic_three_by_two() {
    let (reader, _file) = common::open(b"a,b,c\n1,2,3\n4,5,6\n");

    assert_eq!(reader.rows(), 2);
    assert_eq!(reader.cols(), 3);
    assert_eq!(header_bytes(&reader), vec![b"a".as_ref(), b"b", b"c"]);
    assert_eq!(reader.get(0, 0).unwrap().as_ref(), b"1");
    assert_eq!(reader.get(1, 2).unwrap().as_ref(), b"6");

    let col1 = reader.sequence(Sequence::col(1)).unwrap().to_list();
    assert_eq!(column_bytes(&col1), vec![b"2".as_ref(), b"5"]);
}

#[test]
fn unquote_strips_outer_quotes() {
    let (reader, _file) = common::open(b"a,b\n\"x,y\",\"q\"\n");

    assert_eq!(reader.get(0, 0).unwrap().as_ref(), b"x,y");
    assert_eq!(reader.get(0, 1).unwrap().as_ref(), b"q");
}

#[test]
fn unquote_disabled_keeps_quotes() {
    let (reader, _file) =
        common::open_with(b"a,b\n\"x,y\",\"q\"\n", LazyCsvOptions::new().unquote(false));

    assert_eq!(reader.get(0, 0).unwrap().as_ref(), b"\"x,y\"");
}

#[test]
fn crlf_no_trailing_empty_row() {
    let (reader, _file) = common::open(b"h\r\n1\r\n2\r\n");

    assert_eq!(reader.rows(), 2);
    assert_eq!(reader.cols(), 1);
    assert_eq!(header_bytes(&reader), vec![b"h".as_ref()]);
    assert_eq!(reader.get(1, 0).unwrap().as_ref(), b"2");
}

#[test]
fn column_overflow_truncates() {
    let (reader, _file) = common::open(b"a,b,c\n1,2,3,4\n5,6,7\n");

    assert_eq!(reader.get(0, 0).unwrap().as_ref(), b"1");
    assert_eq!(reader.get(0, 1).unwrap().as_ref(), b"2");
    assert_eq!(reader.get(0, 2).unwrap().as_ref(), b"3");
    assert_eq!(reader.get(1, 0).unwrap().as_ref(), b"5");
    assert_eq!(reader.get(1, 1).unwrap().as_ref(), b"6");
    assert_eq!(reader.get(1, 2).unwrap().as_ref(), b"7");
}

#[test]
fn column_underflow_pads_empty() {
    let (reader, _file) = common::open(b"a,b,c\n1,2\n");

    assert_eq!(reader.get(0, 0).unwrap().as_ref(), b"1");
    assert_eq!(reader.get(0, 1).unwrap().as_ref(), b"2");
    assert_eq!(reader.get(0, 2).unwrap().as_ref(), b"");
}
