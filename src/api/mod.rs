use rocket::{Catcher, Route};

mod admin;
mod catchers;
mod common;
mod nominee;

pub fn routes() -> Vec<Route> {
    let mut routes = Vec::new();
    routes.extend(nominee::routes());
    routes.extend(admin::routes());
    routes
}

pub fn catchers() -> Vec<Catcher> {
    catchers::catchers()
}
