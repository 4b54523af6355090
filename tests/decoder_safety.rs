use quickcheck::quickcheck;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use strtool::{container, decode_entry, ChunkReader, CodecOptions, CodepageTable, StrFile};

fn table() -> CodepageTable {
    CodepageTable::from_units((0u16..300).collect())
}

quickcheck! {
    fn decode_never_panics(data: Vec<u8>) -> bool {
        match decode_entry(&table(), &data) {
            Ok((_, consumed)) => consumed <= data.len() + 3,
            Err(_) => true,
        }
    }

    fn chunk_reader_stays_in_bounds(data: Vec<u8>) -> bool {
        let mut reader = ChunkReader::new(&data);
        let mut ok = true;
        for chunk in reader.by_ref() {
            if let Ok(c) = chunk {
                ok &= c.offset + 4 + c.payload.len() <= data.len();
            }
        }
        ok && reader.position() <= data.len() + 3
    }

    fn container_never_panics(data: Vec<u8>) -> bool {
        let mut bytes = b"BFST".to_vec();
        bytes.extend_from_slice(&data);
        if let Ok((_, store)) = container::parse(&bytes) {
            for i in 0..store.len() {
                if let Some(entry) = store.get(i) {
                    assert!(entry.len() <= store.arena().len());
                }
            }
        }
        let _ = StrFile::decode(&bytes, &table());
        true
    }
}

#[test]
fn corrupted_containers_fail_cleanly() {
    let table = table();
    let mut rng = StdRng::seed_from_u64(42);
    let file = StrFile {
        file_id: 77,
        entries: ["greetings", "%1 gold", "line\\none", "tab\\tstop", "last"]
            .iter()
            .map(|s| s.encode_utf16().collect())
            .collect(),
    };
    let clean = file.to_bytes(&table, &CodecOptions::default()).unwrap();
    for _ in 0..2000 {
        let mut bytes = clean.clone();
        for _ in 0..rng.gen_range(1..4) {
            let pos = rng.gen_range(4..bytes.len());
            bytes[pos] = rng.gen();
        }
        if rng.gen_bool(0.3) {
            let keep = rng.gen_range(0..bytes.len());
            bytes.truncate(keep);
        }
        let _ = StrFile::decode(&bytes, &table);
    }
}
