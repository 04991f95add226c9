#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use doable::libs::stats::{statistics, PriorityCounts};
    use doable::libs::task::{is_overdue, priority_label, Priority, Task};

    fn at(raw: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn task(id: i64, priority: Priority, completed: bool, due: Option<&str>) -> Task {
        let created = at("2024-01-01 09:00:00");
        Task {
            id,
            title: format!("Task {}", id),
            description: None,
            due_date: due.map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap()),
            priority,
            completed,
            category_id: None,
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn test_priority_labels() {
        assert_eq!(priority_label(1), "Low");
        assert_eq!(priority_label(2), "Medium");
        assert_eq!(priority_label(3), "High");
        assert_eq!(priority_label(0), "Medium");
        assert_eq!(priority_label(99), "Medium");
        assert_eq!(Priority::High.to_string(), "High");
    }

    #[test]
    fn test_priority_from_value() {
        assert_eq!(Priority::try_from(1i64), Ok(Priority::Low));
        assert_eq!(Priority::try_from(3i64), Ok(Priority::High));
        assert!(Priority::try_from(7i64).is_err());
        assert_eq!(Priority::from_value(7), None);
        assert_eq!(i64::from(Priority::High), 3);
    }

    #[test]
    fn test_is_overdue() {
        let now = at("2024-03-10 12:00:00");

        assert!(is_overdue(&task(1, Priority::Medium, false, Some("2024-03-09")), now));
        assert!(!is_overdue(&task(2, Priority::Medium, true, Some("2024-03-09")), now));
        assert!(!is_overdue(&task(3, Priority::Medium, false, Some("2024-03-11")), now));
        assert!(!is_overdue(&task(4, Priority::Medium, false, None), now));
    }

    #[test]
    fn test_is_overdue_at_start_of_due_day() {
        let due = task(1, Priority::Low, false, Some("2024-03-10"));

        assert!(!due.is_overdue(at("2024-03-10 00:00:00")));
        assert!(due.is_overdue(at("2024-03-10 00:00:01")));
    }

    #[test]
    fn test_statistics_empty() {
        let stats = statistics(&[], at("2024-03-10 12:00:00"));

        assert_eq!(stats.total, 0);
        assert_eq!(stats.completed, 0);
        assert_eq!(stats.pending, 0);
        assert_eq!(stats.completion_rate, 0.0);
        assert_eq!(stats.overdue, 0);
        assert_eq!(stats.by_priority, PriorityCounts::default());
    }

    #[test]
    fn test_statistics_mixed() {
        let tasks = vec![
            task(1, Priority::High, true, Some("2024-01-01")),
            task(2, Priority::High, false, Some("2024-01-01")),
            task(3, Priority::Low, false, Some("2099-01-01")),
            task(4, Priority::Medium, false, None),
        ];

        let stats = statistics(&tasks, at("2024-03-10 12:00:00"));

        assert_eq!(stats.total, 4);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.pending, 3);
        assert_eq!(stats.completion_rate, 25.0);
        assert_eq!(stats.overdue, 1);
        assert_eq!(stats.by_priority.get(Priority::High), 2);
        assert_eq!(stats.by_priority.get(Priority::Medium), 1);
        assert_eq!(stats.by_priority.get(Priority::Low), 1);
    }

    #[test]
    fn test_statistics_serialize() {
        let stats = statistics(&[task(1, Priority::Low, true, None)], at("2024-03-10 12:00:00"));
        let json = serde_json::to_value(&stats).unwrap();

        assert_eq!(json["completion_rate"], 100.0);
        assert_eq!(json["by_priority"]["low"], 1);
        assert_eq!(json["by_priority"]["high"], 0);
    }
}
