use actix_web::web;

use crate::handlers::education;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/education")
            .route(web::get().to(education::list_education))
    );
}
