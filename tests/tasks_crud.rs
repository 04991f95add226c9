#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use doable::db::categories::Categories;
    use doable::db::db::Db;
    use doable::db::tasks::Tasks;
    use doable::db::StoreError;
    use doable::libs::task::{NewTask, Priority, TaskFilter, TaskPatch};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct TaskTestContext {
        db: Db,
        temp_dir: TempDir,
    }

    impl TestContext for TaskTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::open(temp_dir.path().join("doable.db")).unwrap();
            TaskTestContext { db, temp_dir }
        }
    }

    fn date(raw: &str) -> NaiveDate {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_create_and_get_task(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db);

        let created = tasks
            .create(&NewTask {
                description: Some("2 litres".to_string()),
                due_date: Some("2024-06-01".to_string()),
                priority: Priority::High,
                ..NewTask::new("  Buy milk  ")
            })
            .unwrap();

        assert!(created.id > 0);
        assert_eq!(created.title, "Buy milk");
        assert_eq!(created.due_date, Some(date("2024-06-01")));
        assert_eq!(created.priority, Priority::High);
        assert!(!created.completed);
        assert_eq!(created.category_id, None);

        let fetched = tasks.get(created.id).unwrap().unwrap();
        assert_eq!(fetched, created);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_get_missing_task_is_none(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db);
        assert!(tasks.get(999).unwrap().is_none());
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_create_rejects_blank_title(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db);

        let result = tasks.create(&NewTask::new("   "));
        assert!(matches!(result, Err(StoreError::Validation(_))));
        assert!(tasks.list().unwrap().is_empty());
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_create_drops_invalid_due_date(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db);

        let task = tasks
            .create(&NewTask {
                due_date: Some("2024-02-30".to_string()),
                ..NewTask::new("Impossible deadline")
            })
            .unwrap();

        assert_eq!(task.due_date, None);
        assert_eq!(tasks.list().unwrap().len(), 1);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_create_with_unknown_category_fails(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db);

        let result = tasks.create(&NewTask {
            category_id: Some(42),
            ..NewTask::new("Orphan")
        });
        assert!(matches!(result, Err(StoreError::Validation(_))));
        assert!(tasks.list().unwrap().is_empty());
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_partial_update_keeps_other_fields(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db);
        let finance = Categories::new(&ctx.db).create("Finance", None).unwrap();
        let original = tasks
            .create(&NewTask {
                description: Some("Quarterly".to_string()),
                due_date: Some("2024-04-15".to_string()),
                priority: Priority::Low,
                category_id: Some(finance.id),
                ..NewTask::new("File taxes")
            })
            .unwrap();

        let patch = TaskPatch {
            completed: Some(true),
            ..Default::default()
        };
        let updated = tasks.update(original.id, &patch).unwrap().unwrap();

        assert!(updated.completed);
        assert_eq!(updated.title, original.title);
        assert_eq!(updated.description, original.description);
        assert_eq!(updated.due_date, original.due_date);
        assert_eq!(updated.priority, original.priority);
        assert_eq!(updated.category_id, Some(finance.id));
        assert_eq!(updated.category_id, original.category_id);
        assert_eq!(updated.created_at, original.created_at);
        assert!(updated.updated_at >= original.updated_at);

        let stored = tasks.get(original.id).unwrap().unwrap();
        assert_eq!(stored, updated);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_update_with_invalid_date_applies_other_fields(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db);
        let task = tasks
            .create(&NewTask {
                due_date: Some("2024-03-01".to_string()),
                ..NewTask::new("Renew passport")
            })
            .unwrap();

        let patch = TaskPatch {
            title: Some("Renew passport and ID".to_string()),
            due_date: Some(Some("2024-02-30".to_string())),
            ..Default::default()
        };
        let updated = tasks.update(task.id, &patch).unwrap().unwrap();

        assert_eq!(updated.title, "Renew passport and ID");
        assert_eq!(updated.due_date, Some(date("2024-03-01")));
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_update_clears_nullable_fields(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db);
        let task = tasks
            .create(&NewTask {
                description: Some("Details".to_string()),
                due_date: Some("2024-03-01".to_string()),
                ..NewTask::new("Clear me")
            })
            .unwrap();

        let patch = TaskPatch {
            description: Some(None),
            due_date: Some(None),
            ..Default::default()
        };
        let updated = tasks.update(task.id, &patch).unwrap().unwrap();

        assert_eq!(updated.description, None);
        assert_eq!(updated.due_date, None);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_update_rejects_blank_title(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db);
        let task = tasks.create(&NewTask::new("Keep me")).unwrap();

        let patch = TaskPatch {
            title: Some("".to_string()),
            completed: Some(true),
            ..Default::default()
        };
        assert!(matches!(tasks.update(task.id, &patch), Err(StoreError::Validation(_))));

        let stored = tasks.get(task.id).unwrap().unwrap();
        assert_eq!(stored.title, "Keep me");
        assert!(!stored.completed);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_update_missing_task_is_none(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db);
        let patch = TaskPatch {
            completed: Some(true),
            ..Default::default()
        };
        assert!(tasks.update(404, &patch).unwrap().is_none());
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_json_patch_ignores_unknown_keys(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db);
        let task = tasks.create(&NewTask::new("Water plants")).unwrap();

        let patch = TaskPatch::from_json(r#"{"completed": true, "colour": "green", "due_date": null}"#).unwrap();
        assert_eq!(patch.ignored.keys().collect::<Vec<_>>(), vec!["colour"]);
        assert_eq!(patch.due_date, Some(None));
        assert_eq!(patch.title, None);

        let updated = tasks.update(task.id, &patch).unwrap().unwrap();
        assert!(updated.completed);
        assert_eq!(updated.title, "Water plants");
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_out_of_range_priority_keeps_stored_value(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db);
        let task = tasks
            .create(&NewTask {
                priority: Priority::High,
                ..NewTask::new("Fix the roof")
            })
            .unwrap();

        let patch = TaskPatch::from_json(r#"{"priority": 0, "title": "Fix the roof today"}"#).unwrap();
        assert_eq!(patch.priority, None);

        let updated = tasks.update(task.id, &patch).unwrap().unwrap();
        assert_eq!(updated.priority, Priority::High);
        assert_eq!(updated.title, "Fix the roof today");
        assert_eq!(tasks.get(task.id).unwrap().unwrap().priority, Priority::High);

        let patch = TaskPatch::from_json(r#"{"priority": 1}"#).unwrap();
        assert_eq!(tasks.update(task.id, &patch).unwrap().unwrap().priority, Priority::Low);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_delete_task(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db);
        let task = tasks.create(&NewTask::new("Temporary")).unwrap();

        assert!(tasks.delete(task.id).unwrap());
        assert!(tasks.get(task.id).unwrap().is_none());
        assert!(!tasks.delete(task.id).unwrap());
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_toggle_task(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db);
        let task = tasks.create(&NewTask::new("Flip me")).unwrap();

        assert!(tasks.toggle(task.id).unwrap().unwrap().completed);
        assert!(!tasks.toggle(task.id).unwrap().unwrap().completed);
        assert!(tasks.toggle(12345).unwrap().is_none());
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_list_order(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db);

        let done_early = tasks
            .create(&NewTask {
                due_date: Some("2023-01-01".to_string()),
                ..NewTask::new("Done long ago")
            })
            .unwrap();
        tasks.toggle(done_early.id).unwrap();
        let undated = tasks.create(&NewTask::new("Someday")).unwrap();
        let later = tasks
            .create(&NewTask {
                due_date: Some("2024-05-01".to_string()),
                ..NewTask::new("Later")
            })
            .unwrap();
        let sooner = tasks
            .create(&NewTask {
                due_date: Some("2024-01-01".to_string()),
                ..NewTask::new("Sooner")
            })
            .unwrap();

        let ids: Vec<i64> = tasks.list().unwrap().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![sooner.id, later.id, undated.id, done_early.id]);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_list_filters(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db);
        let work = Categories::new(&ctx.db).create("Work", None).unwrap();

        let report = tasks
            .create(&NewTask {
                category_id: Some(work.id),
                ..NewTask::new("Write report")
            })
            .unwrap();
        let shipped = tasks
            .create(&NewTask {
                category_id: Some(work.id),
                ..NewTask::new("Ship release")
            })
            .unwrap();
        tasks.toggle(shipped.id).unwrap();
        tasks.create(&NewTask::new("Call mom")).unwrap();

        let pending = tasks
            .list_filtered(TaskFilter {
                hide_completed: true,
                ..TaskFilter::all()
            })
            .unwrap();
        assert_eq!(pending.len(), 2);
        assert!(pending.iter().all(|t| !t.completed));

        let in_work = tasks
            .list_filtered(TaskFilter {
                category_id: Some(work.id),
                ..TaskFilter::all()
            })
            .unwrap();
        assert_eq!(in_work.len(), 2);

        let pending_work = tasks
            .list_filtered(TaskFilter {
                hide_completed: true,
                category_id: Some(work.id),
            })
            .unwrap();
        assert_eq!(pending_work.iter().map(|t| t.id).collect::<Vec<_>>(), vec![report.id]);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_tasks_survive_reopen(ctx: &mut TaskTestContext) {
        let path = ctx.temp_dir.path().join("doable.db");
        let id = Tasks::new(&ctx.db).create(&NewTask::new("Persist me")).unwrap().id;

        let reopened = Db::open(&path).unwrap();
        let task = Tasks::new(&reopened).get(id).unwrap().unwrap();
        assert_eq!(task.title, "Persist me");
    }
}
