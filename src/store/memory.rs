use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use super::{AccountStore, ProjectStore, TaskStore, USERNAME_TAKEN};
use crate::error::AppError;
use crate::models::{Account, Project, ProjectInput, Task, TaskInput};

#[derive(Default)]
struct State {
    accounts: Vec<Account>,
    projects: Vec<Project>,
    tasks: Vec<Task>,
    next_account_id: i32,
    next_project_id: i32,
    next_task_id: i32,
}

impl State {
    fn owns_project(&self, owner_id: i32, project_id: i32) -> bool {
        self.projects
            .iter()
            .any(|p| p.id == project_id && p.user_id == owner_id)
    }
}

fn next_id(counter: &mut i32) -> i32 {
    *counter += 1;
    *counter
}

/// In-process store implementing every store trait behind one async mutex.
///
/// Check-then-insert on registration happens under the lock, so concurrent signups for
/// the same username cannot both succeed.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, AppError> {
        let state = self.state.lock().await;
        Ok(state
            .accounts
            .iter()
            .find(|a| a.matches_username(username))
            .cloned())
    }

    async fn create_account(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<Account, AppError> {
        let mut state = self.state.lock().await;
        if state.accounts.iter().any(|a| a.matches_username(username)) {
            return Err(AppError::Conflict(USERNAME_TAKEN.into()));
        }
        let account = Account {
            id: next_id(&mut state.next_account_id),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
        };
        state.accounts.push(account.clone());
        Ok(account)
    }
}

#[async_trait]
impl ProjectStore for MemoryStore {
    async fn create_project(
        &self,
        owner_id: i32,
        input: ProjectInput,
    ) -> Result<Project, AppError> {
        let mut state = self.state.lock().await;
        let project = Project {
            id: next_id(&mut state.next_project_id),
            title: input.title,
            description: input.description,
            creation_date: Utc::now(),
            user_id: owner_id,
        };
        state.projects.push(project.clone());
        Ok(project)
    }

    async fn list_projects(&self, owner_id: i32) -> Result<Vec<Project>, AppError> {
        let state = self.state.lock().await;
        Ok(state
            .projects
            .iter()
            .filter(|p| p.user_id == owner_id)
            .cloned()
            .collect())
    }

    async fn find_project(
        &self,
        owner_id: i32,
        project_id: i32,
    ) -> Result<Option<Project>, AppError> {
        let state = self.state.lock().await;
        Ok(state
            .projects
            .iter()
            .find(|p| p.id == project_id && p.user_id == owner_id)
            .cloned())
    }

    async fn delete_project(&self, owner_id: i32, project_id: i32) -> Result<bool, AppError> {
        let mut state = self.state.lock().await;
        if !state.owns_project(owner_id, project_id) {
            return Ok(false);
        }
        state.projects.retain(|p| p.id != project_id);
        state.tasks.retain(|t| t.project_id != project_id);
        Ok(true)
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn list_tasks(
        &self,
        owner_id: i32,
        project_id: i32,
    ) -> Result<Option<Vec<Task>>, AppError> {
        let state = self.state.lock().await;
        if !state.owns_project(owner_id, project_id) {
            return Ok(None);
        }
        Ok(Some(
            state
                .tasks
                .iter()
                .filter(|t| t.project_id == project_id)
                .cloned()
                .collect(),
        ))
    }

    async fn add_task(
        &self,
        owner_id: i32,
        project_id: i32,
        input: TaskInput,
    ) -> Result<Option<Task>, AppError> {
        let mut state = self.state.lock().await;
        if !state.owns_project(owner_id, project_id) {
            return Ok(None);
        }
        let task = Task::new(next_id(&mut state.next_task_id), project_id, input);
        state.tasks.push(task.clone());
        Ok(Some(task))
    }

    async fn update_task(
        &self,
        owner_id: i32,
        task_id: i32,
        input: TaskInput,
    ) -> Result<Option<Task>, AppError> {
        let mut state = self.state.lock().await;
        let project_id = match state.tasks.iter().find(|t| t.id == task_id) {
            Some(task) => task.project_id,
            None => return Ok(None),
        };
        if !state.owns_project(owner_id, project_id) {
            return Ok(None);
        }
        let task = state.tasks.iter_mut().find(|t| t.id == task_id);
        Ok(task.map(|task| {
            task.apply(input);
            task.clone()
        }))
    }

    async fn delete_task(&self, owner_id: i32, task_id: i32) -> Result<bool, AppError> {
        let mut state = self.state.lock().await;
        let project_id = match state.tasks.iter().find(|t| t.id == task_id) {
            Some(task) => task.project_id,
            None => return Ok(false),
        };
        if !state.owns_project(owner_id, project_id) {
            return Ok(false);
        }
        state.tasks.retain(|t| t.id != task_id);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn project_input(title: &str) -> ProjectInput {
        ProjectInput {
            title: title.to_string(),
            description: None,
        }
    }

    fn task_input(title: &str) -> TaskInput {
        TaskInput {
            title: title.to_string(),
            due_date: None,
            is_completed: false,
        }
    }

    #[actix_rt::test]
    async fn test_usernames_are_unique_ignoring_case() {
        let store = MemoryStore::new();
        let alice = store.create_account("Alice", "hash").await.unwrap();
        assert_eq!(alice.id, 1);

        let dup = store.create_account("aLiCe", "other").await;
        assert!(matches!(dup, Err(AppError::Conflict(_))));

        let found = store.find_by_username("ALICE").await.unwrap().unwrap();
        assert_eq!(found.id, alice.id);
        assert_eq!(found.username, "Alice");
    }

    #[actix_rt::test]
    async fn test_concurrent_registrations_only_one_wins() {
        let store = Arc::new(MemoryStore::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    let name = if i % 2 == 0 { "bob" } else { "BOB" };
                    store.create_account(name, "hash").await
                })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => created += 1,
                Err(AppError::Conflict(msg)) => assert_eq!(msg, USERNAME_TAKEN),
                Err(e) => panic!("unexpected error: {:?}", e),
            }
        }
        assert_eq!(created, 1);
    }

    #[actix_rt::test]
    async fn test_projects_are_scoped_to_owner() {
        let store = MemoryStore::new();
        let mine = store.create_project(1, project_input("Mine")).await.unwrap();
        store.create_project(2, project_input("Theirs")).await.unwrap();

        let listed = store.list_projects(1).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title, "Mine");

        assert!(store.find_project(2, mine.id).await.unwrap().is_none());
        assert!(!store.delete_project(2, mine.id).await.unwrap());
        assert!(store.delete_project(1, mine.id).await.unwrap());
        assert!(store.find_project(1, mine.id).await.unwrap().is_none());
    }

    #[actix_rt::test]
    async fn test_deleting_project_removes_its_tasks() {
        let store = MemoryStore::new();
        let project = store.create_project(1, project_input("Chores")).await.unwrap();
        let task = store
            .add_task(1, project.id, task_input("Sweep"))
            .await
            .unwrap()
            .unwrap();

        assert!(store.delete_project(1, project.id).await.unwrap());
        assert!(!store.delete_task(1, task.id).await.unwrap());
        assert!(store.list_tasks(1, project.id).await.unwrap().is_none());
    }

    #[actix_rt::test]
    async fn test_tasks_follow_project_ownership() {
        let store = MemoryStore::new();
        let project = store.create_project(1, project_input("Chores")).await.unwrap();

        assert!(store
            .add_task(2, project.id, task_input("Intrude"))
            .await
            .unwrap()
            .is_none());

        let task = store
            .add_task(1, project.id, task_input("Sweep"))
            .await
            .unwrap()
            .unwrap();

        let mut done = task_input("Sweep floor");
        done.is_completed = true;
        assert!(store.update_task(2, task.id, done.clone()).await.unwrap().is_none());

        let updated = store.update_task(1, task.id, done).await.unwrap().unwrap();
        assert_eq!(updated.title, "Sweep floor");
        assert!(updated.is_completed);

        assert!(!store.delete_task(2, task.id).await.unwrap());
        assert!(store.delete_task(1, task.id).await.unwrap());
        let remaining = store.list_tasks(1, project.id).await.unwrap().unwrap();
        assert!(remaining.is_empty());
    }
}
