//! Class-style export: the module is built from a constructed value.

use std::collections::HashMap;

use axum::extract::Query;

use routeloom::{Export, Module};

routeloom::register_module!(export);

fn export() -> Export {
    Export::class(|| Echo::new("echo").into_module())
}

struct Echo {
    prefix: String,
}

impl Echo {
    fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    fn into_module(self) -> Module {
        let prefix = self.prefix;
        Module::new().get(move |Query(params): Query<HashMap<String, String>>| {
            let prefix = prefix.clone();
            async move {
                let msg = params.get("msg").map(String::as_str).unwrap_or_default();
                format!("{prefix}: {msg}")
            }
        })
    }
}
