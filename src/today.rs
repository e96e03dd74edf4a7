use crate::domain::{FocusState, SubTask};
use crate::error::{Result, TaskError};
use crate::repo::TaskRepository;
use uuid::Uuid;

/// Pull a sub-task into the daily focus list.
///
/// Appends to the end of the list: the new rank is one past the highest rank
/// currently assigned, so gaps left by demotions can never cause a collision.
/// Promoting an already-focused sub-task is a no-op that returns the current
/// row unchanged.
pub fn promote(repo: &mut TaskRepository, sub_task_id: Uuid) -> Result<SubTask> {
    let sub = repo.get_sub_task(sub_task_id)?;
    if sub.focus_state() == FocusState::Focused {
        return Ok(sub);
    }

    let rank = repo.max_today_order() + 1;
    repo.update_sub_task_today_state(sub_task_id, true, Some(rank))
}

/// Return a sub-task from the focus list to its main task's timeline.
///
/// `main_task_id` names the owning task, as the drop gesture resolves it;
/// a mismatch is treated as a missing entity. The remaining focus-list ranks
/// are not renumbered, so gaps are expected. Demoting an already-scheduled
/// sub-task is a no-op that returns the current row unchanged.
pub fn demote(repo: &mut TaskRepository, sub_task_id: Uuid, main_task_id: Uuid) -> Result<SubTask> {
    let sub = repo.get_sub_task(sub_task_id)?;
    if sub.main_task_id != main_task_id {
        return Err(TaskError::not_found("sub-task", sub_task_id));
    }
    if sub.focus_state() == FocusState::Scheduled {
        return Ok(sub);
    }

    repo.update_sub_task_today_state(sub_task_id, false, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::Store;
    use chrono::Local;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn temp_repo(dir: &tempfile::TempDir) -> (TaskRepository, Uuid) {
        let mut repo = TaskRepository::new(Store::open(dir.path().join("tasks.json")).unwrap());
        let view = repo
            .create_main_task(
                "Website build".to_string(),
                None,
                Local::now(),
                None,
                "local".to_string(),
            )
            .unwrap();
        (repo, view.task.id)
    }

    fn add_sub(repo: &mut TaskRepository, task_id: Uuid, title: &str, order: f64) -> SubTask {
        repo.create_sub_task(title.to_string(), None, 60, task_id, order)
            .unwrap()
    }

    #[test]
    fn test_promote_appends_to_end() {
        let dir = tempdir().unwrap();
        let (mut repo, task_id) = temp_repo(&dir);
        let a = add_sub(&mut repo, task_id, "a", 1.0);
        let b = add_sub(&mut repo, task_id, "b", 2.0);

        let a = promote(&mut repo, a.id).unwrap();
        let b = promote(&mut repo, b.id).unwrap();
        assert_eq!(a.today_order, Some(1));
        assert_eq!(b.today_order, Some(2));

        let titles: Vec<String> = repo.today_list().iter().map(|st| st.title.clone()).collect();
        assert_eq!(titles, vec!["a", "b"]);
    }

    #[test]
    fn test_promote_is_idempotent() {
        let dir = tempdir().unwrap();
        let (mut repo, task_id) = temp_repo(&dir);
        let sub = add_sub(&mut repo, task_id, "a", 1.0);

        let first = promote(&mut repo, sub.id).unwrap();
        let again = promote(&mut repo, sub.id).unwrap();
        assert_eq!(again.today_order, first.today_order);
        assert_eq!(repo.today_list().len(), 1);
    }

    #[test]
    fn test_promote_unknown_sub_task() {
        let dir = tempdir().unwrap();
        let (mut repo, _) = temp_repo(&dir);
        assert!(matches!(
            promote(&mut repo, Uuid::new_v4()),
            Err(TaskError::NotFound { .. })
        ));
    }

    #[test]
    fn test_demote_clears_today_fields() {
        let dir = tempdir().unwrap();
        let (mut repo, task_id) = temp_repo(&dir);
        let sub = add_sub(&mut repo, task_id, "a", 1.0);

        promote(&mut repo, sub.id).unwrap();
        let demoted = demote(&mut repo, sub.id, task_id).unwrap();
        assert!(!demoted.is_in_today);
        assert!(demoted.today_order.is_none());
        assert_eq!(demoted.focus_state(), FocusState::Scheduled);
        assert_eq!(demoted.estimated_time, 60);
        assert!(repo.today_list().is_empty());
    }

    #[test]
    fn test_demote_is_idempotent() {
        let dir = tempdir().unwrap();
        let (mut repo, task_id) = temp_repo(&dir);
        let sub = add_sub(&mut repo, task_id, "a", 1.0);

        let demoted = demote(&mut repo, sub.id, task_id).unwrap();
        assert!(!demoted.is_in_today);
        assert!(demoted.today_order.is_none());
    }

    #[test]
    fn test_demote_checks_ownership() {
        let dir = tempdir().unwrap();
        let (mut repo, task_id) = temp_repo(&dir);
        let sub = add_sub(&mut repo, task_id, "a", 1.0);
        promote(&mut repo, sub.id).unwrap();

        assert!(matches!(
            demote(&mut repo, sub.id, Uuid::new_v4()),
            Err(TaskError::NotFound { .. })
        ));
        // The failed demote must not have touched the row
        assert!(repo.get_sub_task(sub.id).unwrap().is_in_today);
    }

    #[test]
    fn test_demote_leaves_gaps_and_promote_skips_them() {
        let dir = tempdir().unwrap();
        let (mut repo, task_id) = temp_repo(&dir);
        let a = add_sub(&mut repo, task_id, "a", 1.0);
        let b = add_sub(&mut repo, task_id, "b", 2.0);
        let c = add_sub(&mut repo, task_id, "c", 3.0);

        promote(&mut repo, a.id).unwrap();
        promote(&mut repo, b.id).unwrap();
        demote(&mut repo, a.id, task_id).unwrap();

        // b keeps rank 2; the next promotion appends after it
        assert_eq!(repo.get_sub_task(b.id).unwrap().today_order, Some(2));
        let c = promote(&mut repo, c.id).unwrap();
        assert_eq!(c.today_order, Some(3));

        let titles: Vec<String> = repo.today_list().iter().map(|st| st.title.clone()).collect();
        assert_eq!(titles, vec!["b", "c"]);
    }

    #[test]
    fn test_promote_then_demote_roundtrip() {
        let dir = tempdir().unwrap();
        let (mut repo, task_id) = temp_repo(&dir);
        let sub = add_sub(&mut repo, task_id, "a", 1.0);

        let promoted = promote(&mut repo, sub.id).unwrap();
        assert_eq!(promoted.focus_state(), FocusState::Focused);

        let back = demote(&mut repo, sub.id, task_id).unwrap();
        assert_eq!(back.focus_state(), FocusState::Scheduled);
        assert_eq!(back.estimated_time, sub.estimated_time);
        assert_eq!(back.order, sub.order);
    }
}
