#[cfg(test)]
mod tests {
    use doable::db::db::Db;
    use doable::db::migrations::{get_db_version, needs_migration, MigrationManager};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct MigrationTestContext {
        temp_dir: TempDir,
    }

    impl TestContext for MigrationTestContext {
        fn setup() -> Self {
            MigrationTestContext {
                temp_dir: tempfile::tempdir().unwrap(),
            }
        }
    }

    impl MigrationTestContext {
        fn db_path(&self) -> std::path::PathBuf {
            self.temp_dir.path().join("doable.db")
        }
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_migrations_run_automatically(ctx: &mut MigrationTestContext) {
        // Opening the database applies every migration
        let db = Db::open(ctx.db_path()).unwrap();

        let version = get_db_version(&db.conn).unwrap();
        assert_eq!(version, MigrationManager::new().latest_version());
        assert!(!needs_migration(&db.conn).unwrap());
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_fresh_database_needs_migration(ctx: &mut MigrationTestContext) {
        let conn = Db::open_without_migrations(ctx.db_path()).unwrap();

        assert_eq!(get_db_version(&conn).unwrap(), 0);
        assert!(needs_migration(&conn).unwrap());

        let manager = MigrationManager::new();
        let pending: Vec<u32> = manager.pending_after(0).iter().map(|(version, _)| *version).collect();
        assert_eq!(pending, vec![1, 2, 3]);
        assert!(manager.pending_after(manager.latest_version()).is_empty());
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_migration_history(ctx: &mut MigrationTestContext) {
        let mut conn = Db::open_without_migrations(ctx.db_path()).unwrap();
        let manager = MigrationManager::new();

        manager.run_migrations(&mut conn).unwrap();

        let history = manager.get_migration_history(&conn).unwrap();
        let names: Vec<&str> = history.iter().map(|(_, name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["create_categories", "create_tasks", "add_task_indices"]);

        // Versions are recorded in order
        for (i, (version, _, _)) in history.iter().enumerate() {
            assert_eq!(*version as usize, i + 1);
        }
        assert!(manager.is_migration_applied(&conn, 2).unwrap());
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_migration_idempotency(ctx: &mut MigrationTestContext) {
        let mut conn = Db::open_without_migrations(ctx.db_path()).unwrap();
        let manager = MigrationManager::new();

        // Run migrations twice
        manager.run_migrations(&mut conn).unwrap();
        let version_after_first = get_db_version(&conn).unwrap();
        manager.run_migrations(&mut conn).unwrap();

        assert_eq!(get_db_version(&conn).unwrap(), version_after_first);
        assert_eq!(manager.get_migration_history(&conn).unwrap().len(), 3);
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_unreadable_migrations_table_is_an_error(ctx: &mut MigrationTestContext) {
        let mut conn = Db::open_without_migrations(ctx.db_path()).unwrap();
        conn.execute("CREATE TABLE migrations (id INTEGER PRIMARY KEY, label TEXT)", []).unwrap();

        assert!(get_db_version(&conn).is_err());
        assert!(needs_migration(&conn).is_err());
        assert!(MigrationManager::new().run_migrations(&mut conn).is_err());
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_foreign_keys_enabled(ctx: &mut MigrationTestContext) {
        let db = Db::open(ctx.db_path()).unwrap();

        let enabled: i64 = db.conn.query_row("PRAGMA foreign_keys", [], |row| row.get(0)).unwrap();
        assert_eq!(enabled, 1);
    }
}
