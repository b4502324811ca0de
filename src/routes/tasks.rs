use crate::{
    auth::AuthenticatedIdentity, error::AppError, models::TaskInput, store::TaskStore,
};
use actix_web::{delete, put, web, HttpResponse, Responder};
use validator::Validate;

/// Updates a task in one of the caller's projects.
///
/// ## Responses:
/// - `200 OK`: the updated task.
/// - `404 Not Found`: no such task, or its project belongs to another account.
/// - `422 Unprocessable Entity`: the title fails validation.
#[put("/{id}")]
pub async fn update_task(
    tasks: web::Data<dyn TaskStore>,
    task_id: web::Path<i32>,
    task_data: web::Json<TaskInput>,
    identity: AuthenticatedIdentity,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    match tasks
        .update_task(
            identity.account_id,
            task_id.into_inner(),
            task_data.into_inner(),
        )
        .await?
    {
        Some(task) => Ok(HttpResponse::Ok().json(task)),
        None => Err(AppError::NotFound("Task not found".into())),
    }
}

/// Deletes a task in one of the caller's projects.
///
/// ## Responses:
/// - `204 No Content`: deleted.
/// - `404 Not Found`: no such task, or its project belongs to another account.
#[delete("/{id}")]
pub async fn delete_task(
    tasks: web::Data<dyn TaskStore>,
    task_id: web::Path<i32>,
    identity: AuthenticatedIdentity,
) -> Result<impl Responder, AppError> {
    if !tasks
        .delete_task(identity.account_id, task_id.into_inner())
        .await?
    {
        return Err(AppError::NotFound("Task not found".into()));
    }
    Ok(HttpResponse::NoContent().finish())
}
