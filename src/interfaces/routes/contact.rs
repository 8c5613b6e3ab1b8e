use actix_web::web;

use crate::handlers::contact;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/contact")
            .route(web::post().to(contact::create_contact))
    )
    .service(
        web::resource("/contacts")
            .route(web::get().to(contact::list_contacts))
    )
    .service(
        web::resource("/contact/{contact_id}")
            .route(web::get().to(contact::get_contact))
            .route(web::delete().to(contact::delete_contact))
    );
}
