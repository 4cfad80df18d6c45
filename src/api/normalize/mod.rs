use actix_web::web;

mod get_normalization;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(get_normalization::get_normalization_v1);
}
