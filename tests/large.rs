//! A CSV large enough that hand-checking every cell isn't practical: builds
//! indices smaller than the input and answers column projections that match
//! a naive split (spec §8 scenario 6).

mod common;

use lazy_mmap_csv::Sequence;
use rand::Rng;

const ROWS: usize = 5_000;
const COLS: usize = 10;

fn build_csv() -> (Vec<u8>, Vec<Vec<String>>) {
    let mut rng = rand::rng();
    let mut csv = Vec::new();
    csv.extend_from_slice(b"c0,c1,c2,c3,c4,c5,c6,c7,c8,c9\n");

    let mut body = Vec::with_capacity(ROWS);
    for r in 0..ROWS {
        let mut row = Vec::with_capacity(COLS);
        for c in 0..COLS {
            let value = format!("{r}-{c}-{}", rng.random_range(0..1_000_000u32));
            row.push(value);
        }
        csv.extend_from_slice(row.join(",").as_bytes());
        csv.push(b'\n');
        body.push(row);
    }

    (csv, body)
}

#[test]
fn indices_are_smaller_than_the_input_and_answer_column_projections() {
    let (csv, body) = build_csv();
    let input_len = csv.len();
    let (reader, _file) = common::open(&csv);

    assert_eq!(reader.rows(), ROWS);
    assert_eq!(reader.cols(), COLS);

    // Comma index: W=2 bytes * (cols+1) slots * rows, well under the
    // input size for rows of this length; anchor/newline entries are 16
    // bytes each and stay sparse since row lengths never approach 2^16.
    let comma_index_size = 2 * (COLS + 1) * ROWS;
    assert!(comma_index_size < input_len);

    let projected = reader
        .sequence(Sequence::col(5))
        .unwrap()
        .to_list()
        .into_iter()
        .map(|v| String::from_utf8(v.to_vec()).unwrap())
        .collect::<Vec<_>>();
    let expected: Vec<String> = body.iter().map(|row| row[5].clone()).collect();

    assert_eq!(projected, expected);
}

#[test]
fn random_cell_lookups_match_the_naive_split() {
    let (csv, body) = build_csv();
    let (reader, _file) = common::open(&csv);
    let mut rng = rand::rng();

    for _ in 0..500 {
        let r = rng.random_range(0..ROWS);
        let c = rng.random_range(0..COLS);
        let got = reader.get(r as isize, c as isize).unwrap();
        assert_eq!(got.as_ref(), body[r][c].as_bytes());
    }
}
