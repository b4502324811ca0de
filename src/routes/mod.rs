pub mod auth;
pub mod health;
pub mod projects;
pub mod tasks;

use actix_web::web;

use crate::auth::AuthMiddleware;

/// Mounts the API routes. Expected to be nested under `/api`.
///
/// `/auth` is public; `/projects` and `/tasks` sit behind `AuthMiddleware`.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(auth::login)
            .service(auth::register),
    )
    .service(
        web::scope("/projects")
            .wrap(AuthMiddleware)
            .service(projects::create_project)
            .service(projects::get_projects)
            .service(projects::add_task_to_project)
            .service(projects::get_project_tasks)
            .service(projects::delete_project),
    )
    .service(
        web::scope("/tasks")
            .wrap(AuthMiddleware)
            .service(tasks::update_task)
            .service(tasks::delete_task),
    );
}
