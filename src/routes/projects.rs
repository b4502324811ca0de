use crate::{
    auth::AuthenticatedIdentity,
    error::AppError,
    models::{ProjectInput, TaskInput},
    store::{ProjectStore, TaskStore},
};
use actix_web::{delete, get, post, web, HttpResponse, Responder};
use validator::Validate;

/// Creates a project owned by the caller.
///
/// ## Responses:
/// - `201 Created`: the new project.
/// - `422 Unprocessable Entity`: title or description fails validation.
#[post("")]
pub async fn create_project(
    projects: web::Data<dyn ProjectStore>,
    project_data: web::Json<ProjectInput>,
    identity: AuthenticatedIdentity,
) -> Result<impl Responder, AppError> {
    project_data.validate()?;

    let project = projects
        .create_project(identity.account_id, project_data.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(project))
}

/// Lists the caller's projects.
#[get("")]
pub async fn get_projects(
    projects: web::Data<dyn ProjectStore>,
    identity: AuthenticatedIdentity,
) -> Result<impl Responder, AppError> {
    let projects = projects.list_projects(identity.account_id).await?;
    Ok(HttpResponse::Ok().json(projects))
}

/// Lists the tasks of one of the caller's projects.
///
/// ## Responses:
/// - `200 OK`: JSON array of tasks.
/// - `404 Not Found`: no such project, or it belongs to another account.
#[get("/{id}")]
pub async fn get_project_tasks(
    tasks: web::Data<dyn TaskStore>,
    project_id: web::Path<i32>,
    identity: AuthenticatedIdentity,
) -> Result<impl Responder, AppError> {
    match tasks
        .list_tasks(identity.account_id, project_id.into_inner())
        .await?
    {
        Some(tasks) => Ok(HttpResponse::Ok().json(tasks)),
        None => Err(AppError::NotFound("Project not found".into())),
    }
}

/// Deletes one of the caller's projects together with its tasks.
///
/// ## Responses:
/// - `204 No Content`: deleted.
/// - `404 Not Found`: no such project, or it belongs to another account.
#[delete("/{id}")]
pub async fn delete_project(
    projects: web::Data<dyn ProjectStore>,
    project_id: web::Path<i32>,
    identity: AuthenticatedIdentity,
) -> Result<impl Responder, AppError> {
    if !projects
        .delete_project(identity.account_id, project_id.into_inner())
        .await?
    {
        return Err(AppError::NotFound("Project not found".into()));
    }
    Ok(HttpResponse::NoContent().finish())
}

/// Adds a task to one of the caller's projects.
///
/// ## Responses:
/// - `201 Created`: the new task.
/// - `404 Not Found`: no such project, or it belongs to another account.
/// - `422 Unprocessable Entity`: the title fails validation.
#[post("/{project_id}/tasks")]
pub async fn add_task_to_project(
    tasks: web::Data<dyn TaskStore>,
    project_id: web::Path<i32>,
    task_data: web::Json<TaskInput>,
    identity: AuthenticatedIdentity,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    match tasks
        .add_task(
            identity.account_id,
            project_id.into_inner(),
            task_data.into_inner(),
        )
        .await?
    {
        Some(task) => Ok(HttpResponse::Created().json(task)),
        None => Err(AppError::NotFound("Project not found".into())),
    }
}
