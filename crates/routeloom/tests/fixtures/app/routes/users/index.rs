use axum::http::{HeaderValue, StatusCode};
use axum::Json;
use serde_json::{json, Value};

use routeloom::{Export, Module};

routeloom::register_module!(export);

fn export() -> Export {
    Export::wrap(Export::class(users))
}

fn users() -> Module {
    Module::new()
        .get(|| async { Json(json!(["ada", "grace"])) })
        .post(|Json(body): Json<Value>| async move { (StatusCode::CREATED, Json(body)) })
        .before(|req| {
            req.headers_mut()
                .insert("x-before", HeaderValue::from_static("1"));
        })
        .after(|head, res| {
            if head.headers.contains_key("x-before") {
                res.headers_mut()
                    .insert("x-hooked", HeaderValue::from_static("before,after"));
            }
        })
}
