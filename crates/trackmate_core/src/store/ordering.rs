//! Pure ordering helpers over an owned task sequence.
//!
//! # Invariants
//! - After any helper returns, `tasks[i].order == i` for every `i`.
//! - Helpers never change `updated_at`; position is not content.

use crate::model::task::Task;
use std::collections::HashSet;

/// Reassigns every task's `order` to its zero-based position.
pub fn renumber(tasks: &mut [Task]) {
    for (index, task) in tasks.iter_mut().enumerate() {
        task.order = index;
    }
}

/// Returns whether `order` already mirrors position for every task.
pub fn is_dense(tasks: &[Task]) -> bool {
    tasks.iter().enumerate().all(|(index, task)| task.order == index)
}

/// Inserts `task` at the front and shifts everything else back by one.
pub fn prepend(tasks: &mut Vec<Task>, task: Task) {
    tasks.insert(0, task);
    renumber(tasks);
}

/// Moves the element at `from` so that it lands at index `to`.
///
/// Elements between the two positions shift by one. This is a single-element
/// move, not a swap. Out-of-range indices leave the sequence untouched and
/// return `false`.
pub fn move_to(tasks: &mut Vec<Task>, from: usize, to: usize) -> bool {
    if from >= tasks.len() || to >= tasks.len() {
        return false;
    }
    let moved = tasks.remove(from);
    tasks.insert(to, moved);
    renumber(tasks);
    true
}

/// Counts of records repaired while loading a persisted collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadRepairs {
    pub dropped_duplicates: usize,
    pub dropped_blank_titles: usize,
    pub retrimmed_titles: usize,
    pub clamped_timestamps: usize,
    pub renumbered: bool,
}

impl LoadRepairs {
    pub fn is_clean(&self) -> bool {
        *self == Self::default()
    }
}

/// Restores collection invariants on data read back from storage.
///
/// Storage position is authoritative. Later duplicates of an id and records
/// whose title is blank are dropped. Other titles are trimmed but kept even
/// when their length falls outside the accepted range, so no saved task is
/// lost. `updated_at` is raised to `created_at` where it lags, and `order` is
/// renumbered densely.
pub fn repair_loaded(tasks: Vec<Task>) -> (Vec<Task>, LoadRepairs) {
    let mut repairs = LoadRepairs::default();
    let mut seen = HashSet::with_capacity(tasks.len());
    let mut kept = Vec::with_capacity(tasks.len());

    for mut task in tasks {
        if !seen.insert(task.id.clone()) {
            repairs.dropped_duplicates += 1;
            continue;
        }
        let trimmed = task.title.trim();
        if trimmed.is_empty() {
            repairs.dropped_blank_titles += 1;
            continue;
        }
        if trimmed.len() != task.title.len() {
            task.title = trimmed.to_string();
            repairs.retrimmed_titles += 1;
        }
        if task.updated_at < task.created_at {
            task.updated_at = task.created_at;
            repairs.clamped_timestamps += 1;
        }
        kept.push(task);
    }

    if !is_dense(&kept) {
        renumber(&mut kept);
        repairs.renumbered = true;
    }

    (kept, repairs)
}

#[cfg(test)]
mod tests {
    use super::{is_dense, move_to, prepend, repair_loaded};
    use crate::model::task::{Task, TaskId};
    use chrono::{Duration, TimeZone, Utc};

    fn tasks(titles: &[&str]) -> Vec<Task> {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut tasks: Vec<Task> = titles
            .iter()
            .map(|title| Task::with_id(TaskId::from(*title), format!("task {title}"), now))
            .collect();
        super::renumber(&mut tasks);
        tasks
    }

    fn ids(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|task| task.id.as_str()).collect()
    }

    #[test]
    fn move_forward_shifts_intermediate_tasks_back() {
        let mut list = tasks(&["A", "B", "C", "D"]);
        assert!(move_to(&mut list, 0, 2));
        assert_eq!(ids(&list), ["B", "C", "A", "D"]);
        assert!(is_dense(&list));
    }

    #[test]
    fn move_backward_shifts_intermediate_tasks_forward() {
        let mut list = tasks(&["A", "B", "C", "D"]);
        assert!(move_to(&mut list, 3, 1));
        assert_eq!(ids(&list), ["A", "D", "B", "C"]);
        assert!(is_dense(&list));
    }

    #[test]
    fn move_out_of_range_is_rejected() {
        let mut list = tasks(&["A", "B"]);
        assert!(!move_to(&mut list, 0, 2));
        assert_eq!(ids(&list), ["A", "B"]);
    }

    #[test]
    fn prepend_renumbers_existing_tasks() {
        let mut list = tasks(&["A", "B"]);
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        prepend(&mut list, Task::with_id(TaskId::from("Z"), "task Z", now));
        assert_eq!(ids(&list), ["Z", "A", "B"]);
        assert_eq!(
            list.iter().map(|task| task.order).collect::<Vec<_>>(),
            [0, 1, 2]
        );
    }

    #[test]
    fn repair_drops_duplicates_and_blank_titles_and_closes_gaps() {
        let mut list = tasks(&["A", "B", "C", "D"]);
        list[1].order = 7;
        list[2].title = "   ".to_string();
        list[3].title = "  padded  ".to_string();
        let mut duplicate = list[0].clone();
        duplicate.title = "shadow".to_string();
        list.push(duplicate);
        list[0].updated_at = list[0].created_at - Duration::seconds(5);

        let (repaired, repairs) = repair_loaded(list);
        assert_eq!(ids(&repaired), ["A", "B", "D"]);
        assert_eq!(repaired[0].title, "task A");
        assert_eq!(repaired[2].title, "padded");
        assert_eq!(repaired[0].updated_at, repaired[0].created_at);
        assert!(is_dense(&repaired));
        assert_eq!(repairs.dropped_duplicates, 1);
        assert_eq!(repairs.dropped_blank_titles, 1);
        assert_eq!(repairs.retrimmed_titles, 1);
        assert_eq!(repairs.clamped_timestamps, 1);
        assert!(repairs.renumbered);
    }

    #[test]
    fn repair_keeps_titles_outside_length_rules() {
        let mut list = tasks(&["A", "B"]);
        list[0].title = "ab".to_string();
        list[1].title = "😀a".to_string();

        let (repaired, repairs) = repair_loaded(list);
        assert_eq!(ids(&repaired), ["A", "B"]);
        assert_eq!(repaired[0].title, "ab");
        assert_eq!(repaired[1].title, "😀a");
        assert!(repairs.is_clean());
    }

    #[test]
    fn repair_of_clean_collection_reports_nothing() {
        let (_, repairs) = repair_loaded(tasks(&["A", "B"]));
        assert!(repairs.is_clean());
    }
}
