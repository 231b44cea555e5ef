use burstsort::prelude::*;
use rand::Rng;
use std::time::Instant;

fn byte_views<'a>(rows: &'a [Vec<u8>]) -> Vec<ByteView<'a>> {
    rows.iter().map(|r| ByteView::from(r.as_slice())).collect()
}

#[test]
fn test_sort_1m() {
    let count = 1_000_000;
    let mut rng = rand::rng();
    let mut input: Vec<Vec<u8>> = Vec::with_capacity(count);
    for _ in 0..count {
        let len = rng.random_range(4..16);
        let mut row = vec![0u8; len];
        rng.fill(&mut row[..]);
        input.push(row);
    }

    let mut views = byte_views(&input);
    let start = Instant::now();
    burstsort_parallel(&mut views).unwrap();
    let duration = start.elapsed();
    eprintln!("sorted {} rows in {:?}", count, duration);

    assert_eq!(views.len(), count);
    for w in views.windows(2) {
        assert!(w[0].0 <= w[1].0, "output is not sorted");
    }
}

#[test]
#[ignore]
fn test_sort_1b() {
    // Requires significant RAM (32GB+): 1B rows of 8 bytes each is 8GB of
    // data, plus the trie's tail-bucket storage and the output copy.
    let count = 1_000_000_000;
    let mut rng = rand::rng();

    let mut data = vec![0u8; count * 8];
    rng.fill(&mut data[..]);
    let rows: Vec<Vec<u8>> = data.chunks(8).map(|c| c.to_vec()).collect();

    let mut views = byte_views(&rows);
    let start = Instant::now();
    burstsort_parallel(&mut views).unwrap();
    let duration = start.elapsed();
    eprintln!("sorted {} rows in {:?}", count, duration);

    assert_eq!(views.len(), count);
    for i in (0..count - 1).step_by(10_000) {
        assert!(views[i].0 <= views[i + 1].0, "sort failed at index {}", i);
    }
}
