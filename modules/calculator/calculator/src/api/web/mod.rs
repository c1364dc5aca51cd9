//! Form/redirect binding: plain HTML forms, session kept in a cookie.

pub mod handlers;
pub mod page;
pub mod routes;
pub mod session;
