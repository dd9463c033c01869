use axum::http::HeaderValue;
use axum::response::Response;

use routeloom::{App, Export, Module};

routeloom::register_module!(export);

fn export() -> Export {
    Module::config(|app: &mut App| {
        app.layer(axum::middleware::map_response(stamp));
    })
    .into()
}

async fn stamp(mut res: Response) -> Response {
    res.headers_mut()
        .insert("x-app", HeaderValue::from_static("fixtures"));
    res
}
