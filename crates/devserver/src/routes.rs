//! Route modules. Paths follow the files: `routes/ping.rs` → `/ping`,
//! `routes/users/index.rs` → `/users`.

mod echo;
mod ping;

#[path = "routes/users/index.rs"]
mod users;
