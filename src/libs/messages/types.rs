#[derive(Debug, Clone)]
pub enum Message {
    // === ACTIVITY MESSAGES ===
    ActivityCreated(String),
    ActivityDeleted(String),
    ActivityNotFound(String),
    ActivityAlreadyExists(String),
    NoActivitiesFound,
    ActivitiesHeader,
    ConfirmDeleteActivity(String),
    CreateActivityFirst,

    // === TRACKING MESSAGES ===
    TrackingStarted(String), // activity name
    TrackingStopped(String), // formatted duration
    TrackingAlreadyActive,
    TrackingNotActive,
    TrackingPaused,
    TrackingResumed,
    TrackingForeground,
    TrackingStopRequested,
    ElapsedTime(String), // formatted elapsed

    // === SESSION RECOVERY MESSAGES ===
    SessionRestored(String),          // activity id
    SessionSnapshotCorrupted(String), // error
    EntriesRestored(usize),
    EntryRestoreSkipped(String), // error

    // === TICKER MESSAGES ===
    TickFailed { attempt: u32, error: String },
    TickerHalted(u32), // consecutive failure count
    TickerStopTimeout,

    // === LISTENER MESSAGES ===
    ListenerPanicked(String), // panic payload
    ListenerEvicted,

    // === BACKUP MESSAGES ===
    BackupFailed(String, String),      // key, error
    RestoreFailed(String, String),     // key, error
    BackupClearFailed(String, String), // key, error

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigParseError,
    ConfigSaveError,
    ConfigModuleTracker,

    // === REPORT MESSAGES ===
    ReportHeader(String),          // date
    NoEntriesForDate(String),      // date
    DailyTotal(String),            // formatted duration
    ActivityTotal(String, String), // activity name, formatted duration

    // === STATUS MESSAGES ===
    StatusHeader,
    StatusIdle,

    // === PROMPTS ===
    PromptActivityName,
    PromptActivityCategory,
    PromptActivityDescription,
    PromptTickInterval,
    PromptRetryDelay,
    PromptMaxTickFailures,
    PromptBackupInterval,
    PromptStopTimeout,
    PromptSelectModules,

    // === GENERAL MESSAGES ===
    OperationCancelled,
    InvalidInput,
}
