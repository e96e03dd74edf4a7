use crate::domain::SubTask;
use crate::error::{Result, TaskError};
use crate::repo::TaskRepository;
use uuid::Uuid;

/// The two rows a cut produces: the original, trimmed in place, and the
/// freshly inserted continuation.
#[derive(Debug, Clone)]
pub struct CutOutcome {
    pub updated_original: SubTask,
    pub new_sub_task: SubTask,
}

/// Split one sub-task into two contiguous parts.
///
/// The original row keeps its id, is trimmed to `cut_time` minutes and marked
/// as part 1; a new row carries the remainder as part 2, inherits the
/// description and owning task, slots in at `order + 0.5` (immediately after
/// the original, ahead of any integer-ranked sibling) and points back at the
/// original via `parent_id`. The two estimates always sum to the pre-cut
/// value, so the owning task's total duration is untouched.
///
/// Both writes happen in a single transaction; a failure leaves both rows in
/// their pre-cut form.
pub fn cut(repo: &mut TaskRepository, sub_task_id: Uuid, cut_time: i64) -> Result<CutOutcome> {
    let original = repo.get_sub_task(sub_task_id)?;

    // Strict on both sides: a zero-minute part is never created
    if cut_time <= 0 || cut_time >= original.estimated_time {
        return Err(TaskError::InvalidCutTime {
            cut_time,
            estimated_time: original.estimated_time,
        });
    }

    repo.transact(|db| {
        let first = db
            .sub_tasks
            .iter_mut()
            .find(|st| st.id == sub_task_id)
            .ok_or_else(|| TaskError::not_found("sub-task", sub_task_id))?;

        first.estimated_time = cut_time;
        first.title = format!("{} (Part 1)", original.title);
        let updated_original = first.clone();

        let mut second = SubTask::new(
            format!("{} (Part 2)", original.title),
            original.description.clone(),
            original.estimated_time - cut_time,
            original.main_task_id,
            original.order + 0.5,
        );
        second.parent_id = Some(sub_task_id);
        db.sub_tasks.push(second.clone());

        Ok(CutOutcome {
            updated_original,
            new_sub_task: second,
        })
    })
}
