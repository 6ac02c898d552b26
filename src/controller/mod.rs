use rocket::{catchers, routes, Catcher, Route};

pub mod catcher;
pub mod convert;
pub mod list;

/// Routes served under `/api`.
pub fn routes() -> Vec<Route> {
    routes![
        convert::post,
        convert::get,
        convert::put,
        convert::delete,
        convert::patch,
        convert::options,
        list::get,
        list::post,
        list::put,
        list::delete,
        list::patch,
        list::options,
    ]
}

pub fn catchers() -> Vec<Catcher> {
    catchers![catcher::default]
}
