use actix_cors::Cors;
use actix_files::Files;
use actix_web::{web, App, HttpServer};
use std::path::PathBuf;
use tracing::info;

use crate::api::{init_routes, AppState};

/// Run the HTTP server until it is shut down
pub async fn run_server(
    state: AppState,
    host: &str,
    port: u16,
    static_dir: Option<PathBuf>,
) -> std::io::Result<()> {
    let state = web::Data::new(state);
    info!("Serving {} nodes on http://{}:{}", state.features.len(), host, port);
    if let Some(dir) = &static_dir {
        info!("Serving static files from {} under /static", dir.display());
    }

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET"])
            .max_age(3600);

        let mut app = App::new()
            .wrap(cors)
            .app_data(state.clone())
            .configure(init_routes);
        if let Some(dir) = &static_dir {
            app = app.service(Files::new("/static", dir.clone()));
        }
        app
    })
    .bind((host, port))?
    .run()
    .await
}
