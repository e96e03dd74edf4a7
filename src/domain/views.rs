use super::task::{MainTask, Project, SubTask};

/// A main task assembled for display: project resolved, sub-tasks ordered
#[derive(Debug, Clone)]
pub struct TaskView {
    pub task: MainTask,
    pub project: Option<Project>,
    /// Sub-tasks sorted by `order` ascending
    pub sub_tasks: Vec<SubTask>,
}

impl TaskView {
    /// Sub-tasks still on the timeline (not pulled into the focus list)
    pub fn scheduled(&self) -> impl Iterator<Item = &SubTask> {
        self.sub_tasks.iter().filter(|st| !st.is_in_today)
    }
}

/// Sum of estimated minutes over a set of sub-tasks
pub fn sum_estimates<'a>(subs: impl IntoIterator<Item = &'a SubTask>) -> i64 {
    subs.into_iter().map(|st| st.estimated_time).sum()
}

/// Project the focus list out of a set of sub-tasks: FOCUSED items sorted by
/// `today_order` ascending. The sort is stable, so items sharing a rank keep
/// their insertion order.
pub fn today_list(subs: &[SubTask]) -> Vec<&SubTask> {
    let mut focused: Vec<&SubTask> = subs.iter().filter(|st| st.is_in_today).collect();
    focused.sort_by_key(|st| st.today_order.unwrap_or(i64::MAX));
    focused
}

/// Allocate `width` cells proportionally to each sub-task's estimate.
///
/// Every sub-task gets at least one cell; leftover cells after flooring go to
/// the blocks with the largest fractional remainders, so the total equals
/// `width` whenever `width >= subs.len()`.
pub fn block_widths(subs: &[&SubTask], width: usize) -> Vec<usize> {
    if subs.is_empty() {
        return Vec::new();
    }

    let total: i64 = subs.iter().map(|st| st.estimated_time).sum();
    if total <= 0 {
        return vec![1; subs.len()];
    }

    let mut widths = Vec::with_capacity(subs.len());
    let mut remainders: Vec<(usize, f64)> = Vec::with_capacity(subs.len());
    let mut used = 0usize;

    for (i, st) in subs.iter().enumerate() {
        let exact = st.estimated_time as f64 / total as f64 * width as f64;
        let floored = (exact.floor() as usize).max(1);
        remainders.push((i, exact - exact.floor()));
        widths.push(floored);
        used += floored;
    }

    // Hand out any remaining cells by largest fractional part
    if used < width {
        remainders.sort_by(|a, b| b.1.total_cmp(&a.1));
        let mut left = width - used;
        for (i, _) in remainders {
            if left == 0 {
                break;
            }
            widths[i] += 1;
            left -= 1;
        }
    }

    widths
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn sub(title: &str, estimate: i64, order: f64) -> SubTask {
        SubTask::new(title.to_string(), None, estimate, Uuid::new_v4(), order)
    }

    #[test]
    fn test_sum_estimates() {
        let subs = vec![sub("a", 60, 1.0), sub("b", 30, 2.0)];
        assert_eq!(sum_estimates(&subs), 90);
    }

    #[test]
    fn test_today_list_sorted_by_rank() {
        let mut a = sub("a", 60, 1.0);
        let mut b = sub("b", 30, 2.0);
        let c = sub("c", 10, 3.0);
        a.is_in_today = true;
        a.today_order = Some(2);
        b.is_in_today = true;
        b.today_order = Some(1);

        let subs = vec![a, b, c];
        let list = today_list(&subs);
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].title, "b");
        assert_eq!(list[1].title, "a");
    }

    #[test]
    fn test_today_list_ties_keep_insertion_order() {
        let mut a = sub("first", 60, 1.0);
        let mut b = sub("second", 30, 2.0);
        a.is_in_today = true;
        a.today_order = Some(1);
        b.is_in_today = true;
        b.today_order = Some(1);

        let subs = vec![a, b];
        let list = today_list(&subs);
        assert_eq!(list[0].title, "first");
        assert_eq!(list[1].title, "second");
    }

    #[test]
    fn test_block_widths_proportional() {
        let a = sub("a", 120, 1.0);
        let b = sub("b", 240, 2.0);
        let c = sub("c", 120, 3.0);
        let refs = vec![&a, &b, &c];

        let widths = block_widths(&refs, 48);
        assert_eq!(widths, vec![12, 24, 12]);
        assert_eq!(widths.iter().sum::<usize>(), 48);
    }

    #[test]
    fn test_block_widths_minimum_one_cell() {
        let a = sub("a", 1, 1.0);
        let b = sub("b", 1000, 2.0);
        let refs = vec![&a, &b];

        let widths = block_widths(&refs, 40);
        assert!(widths[0] >= 1);
        assert!(widths[1] > widths[0]);
    }

    #[test]
    fn test_block_widths_empty() {
        let refs: Vec<&SubTask> = Vec::new();
        assert!(block_widths(&refs, 40).is_empty());
    }
}
