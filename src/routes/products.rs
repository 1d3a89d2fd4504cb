use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::forms::products::{CreateProductForm, ProductsQuery, UpdateProductForm};
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::products;

#[get("/products")]
/// Return a filtered, paginated JSON list of products.
pub async fn show_products(
    params: web::Query<ProductsQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match products::list_products(repo.get_ref(), params.into_inner()) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => error_response(&err),
    }
}

#[post("/products")]
/// Create a product together with its initial store prices.
pub async fn add_product(
    form: web::Json<CreateProductForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match products::create_product(repo.get_ref(), form.into_inner()) {
        Ok(view) => HttpResponse::Created().json(view),
        Err(err) => error_response(&err),
    }
}

#[get("/products/{id}")]
/// Return one product with its store prices resolved.
pub async fn show_product(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match products::find_product_by_id(repo.get_ref(), path.into_inner()) {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(err) => error_response(&err),
    }
}

#[put("/products/{id}")]
/// Update a product's scalar fields and reconcile its store prices when a
/// desired set is supplied.
pub async fn update_product(
    path: web::Path<i32>,
    form: web::Json<UpdateProductForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match products::update_product(repo.get_ref(), path.into_inner(), form.into_inner()) {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(err) => error_response(&err),
    }
}

#[delete("/products/{id}")]
/// Delete a product and, by cascade, all of its store prices.
pub async fn delete_product(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match products::delete_product(repo.get_ref(), path.into_inner()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(&err),
    }
}
