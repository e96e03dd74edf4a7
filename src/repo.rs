use crate::domain::{MainTask, Project, SubTask, TaskView};
use crate::error::{Result, TaskError};
use crate::persistence::{Database, Store};
use chrono::{DateTime, Local};
use uuid::Uuid;

/// CRUD and aggregate-consistency boundary for main tasks and sub-tasks.
///
/// Owns the record store; the one aggregate rule it maintains is that a main
/// task's `total_duration` equals the sum of its sub-tasks' estimates after
/// every mutating operation. The recompute happens inside the same
/// transaction as the insert, so the two can never diverge.
pub struct TaskRepository {
    store: Store,
}

impl TaskRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// All main tasks for a user, ordered by start time, each with its
    /// project resolved and sub-tasks sorted by timeline rank.
    pub fn list_main_tasks(&self, user_id: &str) -> Result<Vec<TaskView>> {
        if user_id.is_empty() {
            return Err(TaskError::InvalidRequest("user id is required".to_string()));
        }

        Ok(self.store.read(|db| {
            let mut tasks: Vec<MainTask> = db
                .main_tasks
                .iter()
                .filter(|t| t.user_id == user_id)
                .cloned()
                .collect();
            tasks.sort_by_key(|t| t.start_time);

            tasks
                .into_iter()
                .map(|task| assemble_view(db, task))
                .collect()
        }))
    }

    /// Create a main task with no sub-tasks and a zero total duration
    pub fn create_main_task(
        &mut self,
        title: String,
        description: Option<String>,
        start_time: DateTime<Local>,
        project_id: Option<Uuid>,
        user_id: String,
    ) -> Result<TaskView> {
        if user_id.is_empty() {
            return Err(TaskError::InvalidRequest("user id is required".to_string()));
        }
        if let Some(pid) = project_id {
            if !self.store.read(|db| db.projects.iter().any(|p| p.id == pid)) {
                return Err(TaskError::not_found("project", pid));
            }
        }

        let task = MainTask::new(title, description, start_time, project_id, user_id);
        let created = self.store.transact(|db| {
            db.main_tasks.push(task.clone());
            Ok(task)
        })?;

        Ok(self.store.read(|db| assemble_view(db, created)))
    }

    /// Create a sub-task and recompute the owning main task's total duration
    /// as the sum over all of its sub-tasks, in one transaction.
    pub fn create_sub_task(
        &mut self,
        title: String,
        description: Option<String>,
        estimated_time: i64,
        main_task_id: Uuid,
        order: f64,
    ) -> Result<SubTask> {
        if estimated_time <= 0 {
            return Err(TaskError::InvalidRequest(
                "estimated time must be positive".to_string(),
            ));
        }

        self.store.transact(|db| {
            if !db.main_tasks.iter().any(|t| t.id == main_task_id) {
                return Err(TaskError::not_found("main task", main_task_id));
            }

            let sub = SubTask::new(title, description, estimated_time, main_task_id, order);
            db.sub_tasks.push(sub.clone());
            recompute_total_duration(db, main_task_id);
            Ok(sub)
        })
    }

    /// Mutate only the two today fields of a sub-task. Promotion never
    /// changes total time, so no duration recompute happens here.
    pub fn update_sub_task_today_state(
        &mut self,
        id: Uuid,
        is_in_today: bool,
        today_order: Option<i64>,
    ) -> Result<SubTask> {
        self.store.transact(|db| {
            let sub = db
                .sub_tasks
                .iter_mut()
                .find(|st| st.id == id)
                .ok_or_else(|| TaskError::not_found("sub-task", id))?;
            sub.is_in_today = is_in_today;
            sub.today_order = today_order;
            Ok(sub.clone())
        })
    }

    /// Create a project (only ever resolved back into list output)
    pub fn create_project(&mut self, title: String, color: String) -> Result<Project> {
        let project = Project::new(title, color);
        self.store.transact(|db| {
            db.projects.push(project.clone());
            Ok(project)
        })
    }

    pub fn get_main_task(&self, id: Uuid) -> Result<MainTask> {
        self.store
            .read(|db| db.main_tasks.iter().find(|t| t.id == id).cloned())
            .ok_or_else(|| TaskError::not_found("main task", id))
    }

    pub fn get_sub_task(&self, id: Uuid) -> Result<SubTask> {
        self.store
            .read(|db| db.sub_tasks.iter().find(|st| st.id == id).cloned())
            .ok_or_else(|| TaskError::not_found("sub-task", id))
    }

    /// Every sub-task currently in the focus list, in rank order
    pub fn today_list(&self) -> Vec<SubTask> {
        self.store.read(|db| {
            crate::domain::today_list(&db.sub_tasks)
                .into_iter()
                .cloned()
                .collect()
        })
    }

    /// The highest rank currently assigned in the focus list
    pub fn max_today_order(&self) -> i64 {
        self.store.read(|db| {
            db.sub_tasks
                .iter()
                .filter_map(|st| st.today_order)
                .max()
                .unwrap_or(0)
        })
    }

    /// Resolve a unique id prefix to a sub-task, for CLI convenience
    pub fn resolve_sub_task(&self, prefix: &str) -> Result<SubTask> {
        self.store.read(|db| {
            resolve_by_prefix(prefix, db.sub_tasks.iter().map(|st| (st.id, st)), "sub-task")
                .map(SubTask::clone)
        })
    }

    /// Resolve a unique id prefix to a main task, for CLI convenience
    pub fn resolve_main_task(&self, prefix: &str) -> Result<MainTask> {
        self.store.read(|db| {
            resolve_by_prefix(prefix, db.main_tasks.iter().map(|t| (t.id, t)), "main task")
                .map(MainTask::clone)
        })
    }

    /// Resolve a unique id prefix to a project, for CLI convenience
    pub fn resolve_project(&self, prefix: &str) -> Result<Project> {
        self.store.read(|db| {
            resolve_by_prefix(prefix, db.projects.iter().map(|p| (p.id, p)), "project")
                .map(Project::clone)
        })
    }

    /// Run a mutating closure against the store transactionally. Used by the
    /// splitter and today-list manager for their multi-record writes.
    pub(crate) fn transact<T>(&mut self, f: impl FnOnce(&mut Database) -> Result<T>) -> Result<T> {
        self.store.transact(f)
    }
}

/// Attach the resolved project and ordered sub-tasks to a main task
fn assemble_view(db: &Database, task: MainTask) -> TaskView {
    let mut sub_tasks: Vec<SubTask> = db
        .sub_tasks
        .iter()
        .filter(|st| st.main_task_id == task.id)
        .cloned()
        .collect();
    sub_tasks.sort_by(|a, b| a.order.total_cmp(&b.order));

    let project = task
        .project_id
        .and_then(|pid| db.projects.iter().find(|p| p.id == pid).cloned());

    TaskView {
        task,
        project,
        sub_tasks,
    }
}

/// Sum the estimates of a main task's sub-tasks into its total duration
pub(crate) fn recompute_total_duration(db: &mut Database, main_task_id: Uuid) {
    let total = crate::domain::sum_estimates(
        db.sub_tasks.iter().filter(|st| st.main_task_id == main_task_id),
    );

    if let Some(task) = db.main_tasks.iter_mut().find(|t| t.id == main_task_id) {
        task.total_duration = total;
    }
}

fn resolve_by_prefix<'a, T>(
    prefix: &str,
    items: impl Iterator<Item = (Uuid, &'a T)>,
    kind: &'static str,
) -> Result<&'a T> {
    if prefix.is_empty() {
        return Err(TaskError::InvalidRequest("id prefix is required".to_string()));
    }

    let mut matches: Vec<&T> = Vec::new();
    for (id, item) in items {
        if id.to_string().starts_with(prefix) {
            matches.push(item);
        }
    }

    match matches.len() {
        0 => Err(TaskError::NotFound {
            kind,
            id: prefix.to_string(),
        }),
        1 => Ok(matches[0]),
        _ => Err(TaskError::InvalidRequest(format!(
            "ambiguous {} id prefix: {}",
            kind, prefix
        ))),
    }
}
