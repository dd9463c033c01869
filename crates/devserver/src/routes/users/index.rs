//! `/users`: list and create users in the shared store.

use axum::http::{HeaderValue, StatusCode};
use axum::{Extension, Json};
use serde::Deserialize;
use tracing::debug;

use common::ServiceError;
use routeloom::{Export, Module};

use crate::error::ApiError;
use crate::store::{User, UserStore};

routeloom::register_module!(export);

#[derive(Debug, Deserialize)]
struct NewUser {
    name: String,
}

fn export() -> Export {
    Export::wrap(
        Module::new()
            .get(list)
            .post(create)
            .before(|req| debug!(method = %req.method(), "users request"))
            .after(|_head, res| {
                res.headers_mut()
                    .insert("cache-control", HeaderValue::from_static("no-store"));
            })
            .into(),
    )
}

async fn list(Extension(store): Extension<UserStore>) -> Json<Vec<User>> {
    Json(store.list().await)
}

async fn create(
    Extension(store): Extension<UserStore>,
    Json(new): Json<NewUser>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let name = new.name.trim();
    if name.is_empty() {
        return Err(ServiceError::BadRequest("name must not be empty".into()).into());
    }
    let user = store.insert(name.to_owned()).await;
    Ok((StatusCode::CREATED, Json(user)))
}
