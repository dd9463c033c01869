use std::sync::atomic::{AtomicUsize, Ordering};

use routeloom::{Export, Module};

pub static HITS: AtomicUsize = AtomicUsize::new(0);

routeloom::register_module!(export);

fn export() -> Export {
    Module::new()
        .get(|| async {
            HITS.fetch_add(1, Ordering::SeqCst);
            "pong"
        })
        .into()
}
