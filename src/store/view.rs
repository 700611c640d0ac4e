//! The derived view of the task list: which tasks are visible under the
//! current search text and category filter. Pure functions, recomputed on
//! demand; the result is never stored.

use crate::model::task::Task;

/// Whether a single task passes the filters: its text must contain
/// `search` (case-sensitive substring) and, when `category` is non-empty,
/// its category must match exactly.
fn matches(task: &Task, search: &str, category: &str) -> bool {
    task.text.contains(search) && (category.is_empty() || task.category == category)
}

/// Positions (into the full list) of the visible tasks, in list order.
///
/// The UI deletes through a filtered view, so it needs the original
/// positions, not just the surviving tasks.
pub fn visible_indices(tasks: &[Task], search: &str, category: &str) -> Vec<usize> {
    tasks
        .iter()
        .enumerate()
        .filter(|(_, task)| matches(task, search, category))
        .map(|(i, _)| i)
        .collect()
}

/// The visible subset itself: an order-preserving subsequence of `tasks`.
pub fn visible<'a>(tasks: &'a [Task], search: &str, category: &str) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|task| matches(task, search, category))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::Priority;

    fn task(text: &str, category: &str) -> Task {
        Task {
            text: text.into(),
            priority: Priority::Low,
            due_date: String::new(),
            due_time: String::new(),
            category: category.into(),
        }
    }

    #[test]
    fn no_filters_is_identity() {
        let tasks = vec![task("a", ""), task("b", "Work"), task("c", "Home")];
        let all: Vec<&Task> = tasks.iter().collect();
        assert_eq!(visible(&tasks, "", ""), all);
        assert_eq!(visible_indices(&tasks, "", ""), vec![0, 1, 2]);
    }

    #[test]
    fn search_is_case_sensitive_substring() {
        let tasks = vec![task("Buy milk", ""), task("buy bread", ""), task("Milk run", "")];
        let hits = visible(&tasks, "milk", "");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].text, "Buy milk");

        assert!(visible(&tasks, "MILK", "").is_empty());
    }

    #[test]
    fn category_filter_is_exact() {
        let tasks = vec![
            task("a", "Work"),
            task("b", "work"),
            task("c", "Workout"),
            task("d", ""),
        ];
        let hits = visible(&tasks, "", "Work");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].text, "a");
    }

    #[test]
    fn filters_combine_with_and() {
        let tasks = vec![
            task("pay rent", "Home"),
            task("pay invoices", "Work"),
            task("file taxes", "Home"),
        ];
        let hits = visible(&tasks, "pay", "Home");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].text, "pay rent");
    }

    #[test]
    fn result_preserves_list_order() {
        let tasks = vec![
            task("x one", ""),
            task("two", ""),
            task("x three", ""),
            task("x four", ""),
        ];
        assert_eq!(visible_indices(&tasks, "x", ""), vec![0, 2, 3]);
        let texts: Vec<&str> = visible(&tasks, "x", "")
            .iter()
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(texts, vec!["x one", "x three", "x four"]);
    }

    #[test]
    fn empty_list_yields_empty_view() {
        assert!(visible(&[], "", "").is_empty());
        assert!(visible_indices(&[], "anything", "Work").is_empty());
    }
}
