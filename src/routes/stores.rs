use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::forms::stores::{CreateStoreForm, StoresQuery, UpdateStoreForm};
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::stores;

#[get("/stores")]
/// Return a filtered, paginated JSON list of stores.
pub async fn show_stores(
    params: web::Query<StoresQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match stores::list_stores(repo.get_ref(), params.into_inner()) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => error_response(&err),
    }
}

#[post("/stores")]
/// Create a store.
pub async fn add_store(
    form: web::Json<CreateStoreForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match stores::create_store(repo.get_ref(), form.into_inner()) {
        Ok(view) => HttpResponse::Created().json(view),
        Err(err) => error_response(&err),
    }
}

#[get("/stores/{id}")]
/// Return one store.
pub async fn show_store(path: web::Path<i32>, repo: web::Data<DieselRepository>) -> impl Responder {
    match stores::find_store_by_id(repo.get_ref(), path.into_inner()) {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(err) => error_response(&err),
    }
}

#[put("/stores/{id}")]
/// Replace a store's description.
pub async fn update_store(
    path: web::Path<i32>,
    form: web::Json<UpdateStoreForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match stores::update_store(repo.get_ref(), path.into_inner(), form.into_inner()) {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(err) => error_response(&err),
    }
}

#[delete("/stores/{id}")]
/// Delete a store and, by cascade, the prices referencing it.
pub async fn delete_store(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match stores::delete_store(repo.get_ref(), path.into_inner()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(&err),
    }
}
