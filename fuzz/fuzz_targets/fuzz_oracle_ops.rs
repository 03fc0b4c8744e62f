#![no_main]
use libfuzzer_sys::{fuzz_target, arbitrary::{Arbitrary, Unstructured}};
use track_oracle::{OracleCore, RowHandle, TrackField};

#[derive(Debug, Arbitrary)]
enum Op {
    Create,
    Delete(u8),
    SetNumber(u8, u64),
    SetLabel(u8, String),
    Remove(u8),
    Copy(u8, u8),
    AddFrame(u8, u8),
    Detach(u8),
}

// Random op sequences must never panic, and deleted rows must never read back values
fuzz_target!(|input: &[u8]| {
    let mut u = Unstructured::new(input);

    let ops: Vec<Op> = match u.arbitrary() {
        Ok(ops) => ops,
        Err(_) => return,
    };

    let mut oracle = OracleCore::new();
    let number = match TrackField::<u64>::register(&mut oracle, "number") {
        Ok(f) => f,
        Err(_) => return,
    };
    let label = match TrackField::<String>::register(&mut oracle, "label") {
        Ok(f) => f,
        Err(_) => return,
    };
    let mut rows: Vec<RowHandle> = Vec::new();
    let pick = |rows: &[RowHandle], idx: u8| rows.get(idx as usize % rows.len().max(1)).copied();

    for op in ops.iter().take(256) {
        match op {
            Op::Create => rows.push(oracle.create_row()),
            Op::Delete(i) => {
                if let Some(row) = pick(&rows, *i) {
                    if oracle.delete_row(row).is_ok() && !oracle.is_live(row) {
                        assert!(number.get_at(&oracle, row).is_err());
                        assert!(label.exists_at(&oracle, row).is_err());
                    }
                }
            }
            Op::SetNumber(i, v) => {
                if let Some(row) = pick(&rows, *i) {
                    if number.set_at(&mut oracle, row, *v).is_ok() {
                        assert_eq!(number.get_at(&oracle, row).ok().flatten(), Some(*v));
                    }
                }
            }
            Op::SetLabel(i, s) => {
                if let Some(row) = pick(&rows, *i) {
                    let _ = label.set_at(&mut oracle, row, s.clone());
                }
            }
            Op::Remove(i) => {
                if let Some(row) = pick(&rows, *i) {
                    let _ = number.remove_at_row(&mut oracle, row);
                }
            }
            Op::Copy(a, b) => {
                if let (Some(src), Some(dst)) = (pick(&rows, *a), pick(&rows, *b)) {
                    let _ = label.copy_value(&mut oracle, src, dst);
                }
            }
            Op::AddFrame(a, b) => {
                if let (Some(track), Some(frame)) = (pick(&rows, *a), pick(&rows, *b)) {
                    let _ = oracle.add_frame(track, frame);
                }
            }
            Op::Detach(i) => {
                if let Some(row) = pick(&rows, *i) {
                    let _ = oracle.detach_frame(row);
                }
            }
        }
    }

    let stats = oracle.stats();
    assert_eq!(stats.live_rows, oracle.live_rows().count());
});
