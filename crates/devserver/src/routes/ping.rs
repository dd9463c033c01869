use routeloom::{Export, Module};

routeloom::register_module!(export);

fn export() -> Export {
    Module::new().get(|| async { "pong" }).into()
}
