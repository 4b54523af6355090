use honggfuzz::fuzz;
use strtool::{container, CodepageTable, StrFile};

fn main() {
    let table = CodepageTable::from_units((0u16..256).collect());
    loop {
        fuzz!(|data: &[u8]| {
            if let Ok((header, store)) = container::parse(data) {
                let bytes = container::to_bytes(header.file_id, &store);
                assert!(container::parse(&bytes).is_ok());
            }
            let _ = StrFile::decode(data, &table);
        });
    }
}
