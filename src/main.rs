use std::env;

use actix_web::{App, HttpServer, middleware, web};
use dotenvy::dotenv;

use pricebook::db::establish_connection_pool;
use pricebook::repository::DieselRepository;
use pricebook::routes::products::{
    add_product, delete_product, show_product, show_products, update_product,
};
use pricebook::routes::stores::{add_store, delete_store, show_store, show_stores, update_store};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let database_url = env::var("DATABASE_URL").unwrap_or("app.db".to_string());
    let port = env::var("PORT").unwrap_or("8080".to_string());
    let port = port.parse::<u16>().unwrap_or(8080);
    let address = env::var("ADDRESS").unwrap_or("127.0.0.1".to_string());

    let pool = match establish_connection_pool(&database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(show_products)
            .service(add_product)
            .service(show_product)
            .service(update_product)
            .service(delete_product)
            .service(show_stores)
            .service(add_store)
            .service(show_store)
            .service(update_store)
            .service(delete_store)
            .app_data(web::Data::new(repo.clone()))
    })
    .bind((address, port))?
    .run()
    .await
}
