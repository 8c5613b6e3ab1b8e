use actix_web::{web, Either, HttpRequest, HttpResponse, Responder};

use crate::{
    entities::contact::ContactForm,
    errors::AppError,
    utils::get_client_ip::request_provenance,
    AppState,
};

pub async fn create_contact(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: Either<web::Json<ContactForm>, web::Form<ContactForm>>,
) -> Result<impl Responder, AppError> {
    let provenance = request_provenance(&req, state.trust_x_forwarded_for);

    // Plain HTML forms post url-encoded bodies
    let form = match body {
        Either::Left(json) => json.into_inner(),
        Either::Right(form) => form.into_inner(),
    };

    let response = state.contact_handler
        .submit_contact(form, provenance)
        .await?;

    Ok(HttpResponse::Created().json(response))
}

pub async fn list_contacts(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let response = state.contact_handler.list_contacts().await?;

    Ok(HttpResponse::Ok().json(response))
}

pub async fn get_contact(
    state: web::Data<AppState>,
    contact_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let response = state.contact_handler
        .get_contact_by_id(&contact_id)
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

pub async fn delete_contact(
    state: web::Data<AppState>,
    contact_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let response = state.contact_handler
        .delete_contact(&contact_id)
        .await?;

    Ok(HttpResponse::Ok().json(response))
}
