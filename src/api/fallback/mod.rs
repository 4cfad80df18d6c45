use actix_web::web;

mod forward_page;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.default_service(web::to(forward_page::forward_page));
}
