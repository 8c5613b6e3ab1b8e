use actix_web::web;

use crate::handlers::{home::home, system::route_not_found};

mod contact;
mod education;
mod system;
mod json_error;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(json_error::config_routes);

    cfg.service(home);

    cfg.service(
        web::scope("/api")
            .configure(contact::config_routes)
            .configure(education::config_routes)
            .configure(system::config_routes)
    );

    cfg.default_service(web::to(route_not_found));
}
