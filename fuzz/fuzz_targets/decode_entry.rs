use honggfuzz::fuzz;
use strtool::{decode_entry, encode_entry, CodecOptions, CodepageTable, EntryStore};

fn main() {
    let table = CodepageTable::from_units((1u16..513).collect());
    loop {
        fuzz!(|data: &[u8]| {
            if let Ok((text, _)) = decode_entry(&table, data) {
                // Anything that decodes must re-encode into a readable entry.
                let bytes = match encode_entry(&table, &text, &CodecOptions::default()) {
                    Ok(b) => b,
                    Err(_) => return,
                };
                let mut store = EntryStore::new();
                if store.append(&bytes).is_ok() {
                    assert!(matches!(store.get(0).map(|e| decode_entry(&table, e)), Some(Ok(_))));
                }
            }
        });
    }
}
