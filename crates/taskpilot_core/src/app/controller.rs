use super::notification::{NotificationBanner, NotificationLevel};
use super::panel::{Appearance, Panel};
use crate::ai::{ActivitySnapshot, AiAdapter};
use crate::config::AppConfig;
use crate::db::schema::{ensure_schema, SchemaReport};
use crate::db::Gateway;
use crate::model::list::NewTaskList;
use crate::model::task::{Importance, NewTask};
use crate::model::{RecordId, ValidationError};
use crate::repo::list_repo::{ListRepository, SqliteListRepository};
use crate::repo::reminder_repo::SqliteReminderRepository;
use crate::repo::task_repo::{SqliteTaskRepository, TaskRepository};
use crate::repo::RepoError;
use crate::runner::{BackgroundRunner, UiQueue};
use crate::view::{RenderedViews, TaskDetails, ViewKey, ViewSynchronizer};
use log::{error, info, warn};
use std::time::{Duration, Instant};

pub const TOPIC_IDLE_TEXT: &str = "Press the button to get a topic.";
pub const TOPIC_PENDING_TEXT: &str = "Generating topic, please wait...";
pub const TOPIC_RESULT_PREFIX: &str = "Topic of the day: ";
pub const ANALYSIS_PENDING_TEXT: &str =
    "Analyzing your information and generating a professional summary...";
const WORKER_SPAWN_FAILED: &str = "Could not start the background request.";

/// Everything the window displays. Owned by the UI thread.
#[derive(Debug, Clone)]
pub struct AppState {
    pub current_panel: Option<Panel>,
    pub views: RenderedViews,
    pub banner: NotificationBanner,
    pub study_topic: String,
    pub analysis_text: String,
    pub task_details: Option<TaskDetails>,
    pub appearance: Appearance,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            current_panel: None,
            views: RenderedViews::default(),
            banner: NotificationBanner::default(),
            study_topic: TOPIC_IDLE_TEXT.to_string(),
            analysis_text: String::new(),
            task_details: None,
            appearance: Appearance::default(),
        }
    }
}

/// Handler layer behind every button of the window.
pub struct AppController {
    tasks: SqliteTaskRepository,
    lists: SqliteListRepository,
    reminders: SqliteReminderRepository,
    sync: ViewSynchronizer<SqliteTaskRepository, SqliteListRepository>,
    adapter: AiAdapter,
    queue: UiQueue<AppState>,
    runner: BackgroundRunner<AppState>,
    schema: SchemaReport,
    state: AppState,
}

impl AppController {
    /// Wires every component from configuration.
    ///
    /// An unreachable store is logged and the app starts degraded.
    pub fn from_config(config: &AppConfig) -> Self {
        let gateway = Gateway::new(config.store.clone());
        if let Err(err) = gateway.ping() {
            error!(
                "event=app_init module=app status=degraded error_kind={} error={}",
                err.kind().as_str(),
                err
            );
        }
        Self::new(gateway, AiAdapter::from_config(&config.ai))
    }

    /// Ensures the schema and builds the controller on the calling thread.
    pub fn new(gateway: Gateway, adapter: AiAdapter) -> Self {
        let schema = ensure_schema(&gateway);
        let tasks = SqliteTaskRepository::new(gateway.clone());
        let lists = SqliteListRepository::new(gateway.clone());
        let reminders = SqliteReminderRepository::new(gateway);
        let queue = UiQueue::new();
        let runner = BackgroundRunner::new(queue.handle());

        Self {
            sync: ViewSynchronizer::new(tasks.clone(), lists.clone()),
            tasks,
            lists,
            reminders,
            adapter,
            runner,
            queue,
            schema,
            state: AppState::default(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn schema_report(&self) -> &SchemaReport {
        &self.schema
    }

    /// Switches panels; Tasks and Lists are re-queried on every switch.
    pub fn show_panel(&mut self, panel: Panel) {
        self.state.current_panel = Some(panel);
        match panel {
            Panel::Tasks => self.refresh(ViewKey::Tasks),
            Panel::Lists => self.refresh(ViewKey::Lists),
            Panel::AiAnalysis => self.state.analysis_text.clear(),
            Panel::Dashboard | Panel::Settings => {}
        }
    }

    pub fn set_appearance(&mut self, appearance: Appearance) {
        self.state.appearance = appearance;
    }

    pub fn add_task(&mut self, name: &str, importance: Importance, notes: &str) -> bool {
        let task = NewTask::new(name)
            .with_importance(importance)
            .with_notes(notes);
        match self.tasks.create_task(&task) {
            Ok(id) => {
                info!("event=task_create module=app status=ok task_id={id}");
                self.notify(
                    format!("Task added: '{}'", name.trim()),
                    NotificationLevel::Success,
                );
                self.refresh(ViewKey::Tasks);
                true
            }
            Err(RepoError::Validation(ValidationError::EmptyTaskName)) => {
                self.notify("Task name is empty.", NotificationLevel::Error);
                false
            }
            Err(err) => {
                self.report_failure("task_create", "Failed to add the task", &err);
                false
            }
        }
    }

    pub fn toggle_task(&mut self, id: RecordId) -> bool {
        match self.tasks.toggle_completed(id) {
            Ok(()) => {
                info!("event=task_toggle module=app status=ok task_id={id}");
                self.refresh(ViewKey::Tasks);
                true
            }
            Err(err) => {
                self.report_failure("task_toggle", "Failed to update the task status", &err);
                false
            }
        }
    }

    pub fn delete_task(&mut self, id: RecordId) -> bool {
        match self.tasks.delete_task(id) {
            Ok(()) => {
                info!("event=task_delete module=app status=ok task_id={id}");
                if self
                    .state
                    .task_details
                    .as_ref()
                    .is_some_and(|details| details.id == id)
                {
                    self.state.task_details = None;
                }
                self.notify("Task deleted.", NotificationLevel::Info);
                self.refresh(ViewKey::Tasks);
                true
            }
            Err(err) => {
                self.report_failure("task_delete", "Failed to delete the task", &err);
                false
            }
        }
    }

    /// Opens the read-only detail view for one task.
    pub fn open_task_details(&mut self, id: RecordId) -> Option<&TaskDetails> {
        match self.tasks.get_task(id) {
            Ok(Some(task)) => {
                self.state.task_details = Some(TaskDetails::from_task(&task));
            }
            Ok(None) => {
                self.report_failure(
                    "task_details",
                    "Could not open the task",
                    &RepoError::NotFound(id),
                );
                self.state.task_details = None;
            }
            Err(err) => {
                self.report_failure("task_details", "Could not open the task", &err);
                self.state.task_details = None;
            }
        }
        self.state.task_details.as_ref()
    }

    pub fn close_task_details(&mut self) {
        self.state.task_details = None;
    }

    /// Creates a list from a title and free text, one element per line.
    pub fn add_list(&mut self, title: &str, raw_elements: &str) -> bool {
        let list = NewTaskList::from_raw(title, raw_elements);
        match self.lists.create_list(&list) {
            Ok(id) => {
                info!(
                    "event=list_create module=app status=ok list_id={id} elements={}",
                    list.elements.len()
                );
                self.notify(
                    format!("List '{}' created.", title.trim()),
                    NotificationLevel::Success,
                );
                self.refresh(ViewKey::Lists);
                true
            }
            Err(RepoError::Validation(ValidationError::EmptyListTitle)) => {
                self.notify("List title cannot be empty.", NotificationLevel::Error);
                false
            }
            Err(err) => {
                self.report_failure("list_create", "Failed to create the list", &err);
                false
            }
        }
    }

    pub fn delete_list(&mut self, id: RecordId) -> bool {
        match self.lists.delete_list(id) {
            Ok(()) => {
                info!("event=list_delete module=app status=ok list_id={id}");
                self.notify("List deleted.", NotificationLevel::Info);
                self.refresh(ViewKey::Lists);
                true
            }
            Err(err) => {
                self.report_failure("list_delete", "Failed to delete the list", &err);
                false
            }
        }
    }

    /// Starts a topic request; the label updates when the worker reports back.
    pub fn request_study_topic(&mut self) {
        self.state.study_topic = TOPIC_PENDING_TEXT.to_string();
        let adapter = self.adapter.clone();
        let spawned = self.runner.spawn(
            "topic",
            move || adapter.suggest_topic(),
            |state: &mut AppState, topic: String| {
                state.study_topic = format!("{TOPIC_RESULT_PREFIX}{topic}");
            },
        );
        if spawned.is_err() {
            self.state.study_topic = TOPIC_IDLE_TEXT.to_string();
            self.notify(WORKER_SPAWN_FAILED, NotificationLevel::Error);
        }
    }

    /// Starts an activity analysis; the store is read on the worker thread.
    pub fn request_analysis(&mut self) {
        self.state.analysis_text = ANALYSIS_PENDING_TEXT.to_string();
        let adapter = self.adapter.clone();
        let tasks = self.tasks.clone();
        let lists = self.lists.clone();
        let reminders = self.reminders.clone();
        let spawned = self.runner.spawn(
            "analysis",
            move || {
                let snapshot = ActivitySnapshot::gather(&tasks, &lists, &reminders);
                adapter.summarize_activity(&snapshot)
            },
            |state: &mut AppState, analysis: String| {
                state.analysis_text = analysis;
            },
        );
        if spawned.is_err() {
            self.state.analysis_text.clear();
            self.notify(WORKER_SPAWN_FAILED, NotificationLevel::Error);
        }
    }

    /// Applies every completed background result; returns how many ran.
    pub fn pump_events(&mut self) -> usize {
        self.queue.drain(&mut self.state)
    }

    /// Waits up to `timeout` for a background result, then applies all pending.
    pub fn wait_for_events(&mut self, timeout: Duration) -> usize {
        self.queue.wait_and_drain(&mut self.state, timeout)
    }

    fn refresh(&mut self, view: ViewKey) {
        self.sync.refresh(view, &mut self.state.views);
    }

    fn notify(&mut self, message: impl Into<String>, level: NotificationLevel) {
        self.state.banner.show(message, level, Instant::now());
    }

    fn report_failure(&mut self, event: &str, action: &str, err: &RepoError) {
        match err {
            RepoError::NotFound(_) => warn!(
                "event={event} module=app status=error error_kind={} error={err}",
                err.kind()
            ),
            _ => error!(
                "event={event} module=app status=error error_kind={} error={err}",
                err.kind()
            ),
        }

        let message = match err {
            RepoError::NotFound(_) => format!("{action}: it no longer exists."),
            _ if err.is_unavailable() => format!("{action}: the database is unavailable."),
            _ => format!("{action}. Check the logs for details."),
        };
        self.notify(message, NotificationLevel::Error);
    }
}
