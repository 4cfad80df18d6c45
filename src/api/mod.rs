#[macro_use]
mod macros;

mod error;
mod fallback;
mod health;
mod normalize;

#[cfg(test)]
pub mod test;

use actix_web::web;

pub use error::APIError;

pub fn configure(cfg: &mut web::ServiceConfig) {
    health::configure(cfg);
    normalize::configure(cfg);
    fallback::configure(cfg);
}
