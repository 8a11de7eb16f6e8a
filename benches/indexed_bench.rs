#![feature(test)]
extern crate test;

use serde_json::json;
use test::Bencher;

use std::sync::Arc;

use ixstore::{store::MemStore, Config, IndexedStore};

fn new_indexed(atomic: bool) -> IndexedStore<MemStore> {
    let store = Arc::new(MemStore::new("bench"));
    let mut config = Config::new("bench");
    config.set_atomic(atomic).add_index("username").add_index("email");
    IndexedStore::new(config, store).unwrap()
}

#[bench]
fn bench_put_atomic(b: &mut Bencher) {
    let db = new_indexed(true);
    let mut key = 0_u64;
    b.iter(|| {
        key += 1;
        let doc = json!({"username": format!("u{}", key % 1000), "email": "a@b"});
        db.put(key % 1000, doc).unwrap()
    });
}

#[bench]
fn bench_put_sequential(b: &mut Bencher) {
    let db = new_indexed(false);
    let mut key = 0_u64;
    b.iter(|| {
        key += 1;
        let doc = json!({"username": format!("u{}", key % 1000), "email": "a@b"});
        db.put(key % 1000, doc).unwrap()
    });
}

#[bench]
fn bench_by(b: &mut Bencher) {
    let db = new_indexed(true);
    for key in 0..1000_u64 {
        db.put(key, json!({"username": format!("u{}", key)})).unwrap();
    }
    let mut key = 0_u64;
    b.iter(|| {
        key = (key + 1) % 1000;
        db.by("username", format!("u{}", key)).unwrap()
    });
}

#[bench]
fn bench_find_miss(b: &mut Bencher) {
    let db = new_indexed(true);
    b.iter(|| db.find("nobody").unwrap_err());
}
