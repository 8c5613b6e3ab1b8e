use actix_web::{web, HttpResponse, Responder};

use crate::{errors::AppError, AppState};

pub async fn list_education(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let response = state.education_handler.list_education().await?;

    Ok(HttpResponse::Ok().json(response))
}
