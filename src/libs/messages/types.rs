#[derive(Debug, Clone)]
pub enum Message {
    // === TASK MESSAGES ===
    TaskCreated(String),    // title
    TaskUpdated(String),    // title
    TaskCompleted(String),  // title
    TaskReopened(String),   // title
    TaskDeleted(i64),       // id
    TaskNotFound(i64),      // id
    DueDateIgnored(String),   // raw input
    TasksHeader,
    NoTasksFound,
    EditingTask(String), // title
    NoChangesDetected,
    ConfirmDeleteTask(String), // title
    UnknownTaskFieldsIgnored(Vec<String>),

    // === CATEGORY MESSAGES ===
    CategoryCreated(String), // name
    CategoryUpdated(String), // name
    CategoryDeleted(String), // name
    CategoryDeletedById(i64),
    CategoryNotFound(String), // name or id
    CategoryAlreadyExists(String),
    CategoryListHeader,
    NoCategoriesFound,
    EditingCategory(String), // name
    ConfirmDeleteCategory(String),
    ConfirmDeleteCategoryWithTasks(String, usize), // name, task count
    SelectCategoryAction,
    SelectCategoryToEdit,
    SelectCategoryToDelete,

    // === STATISTICS MESSAGES ===
    StatisticsHeader,

    // === EVENT MESSAGES ===
    InvalidEventPayload(String), // parse error
    EditFormFor(String),         // title

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigNotPresent,
    InvalidColorKeptDefault(String),

    // === PROMPTS ===
    PromptTaskTitle,
    PromptTaskDescription,
    PromptTaskDueDate,
    PromptTaskPriority,
    PromptTaskCategory,
    PromptCategoryName,
    PromptCategoryColor,
    PromptDatabasePath,
    PromptHideCompleted,
    PromptDefaultColor,
    NoCategoryOption,

    // === GENERAL MESSAGES ===
    OperationCancelled,

    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),        // count
    RunningMigration(u32, String), // version, name
    MigrationCompleted(u32),       // version
    MigrationFailed(u32, String),  // version, error
    AllMigrationsCompleted,
    DatabaseVersion(u32, u32), // current, latest
    DatabaseUpToDate,
    MigrationHistory,
}
