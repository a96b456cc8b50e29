//! Full-rebuild refresh of the Tasks and Lists panels.

use super::rows::{
    ListCard, TaskRow, ViewItem, EMPTY_LISTS_PLACEHOLDER, EMPTY_TASKS_PLACEHOLDER,
};
use crate::repo::list_repo::ListRepository;
use crate::repo::task_repo::TaskRepository;
use log::{debug, error};
use std::time::Instant;

/// Panel whose items are backed by a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKey {
    Tasks,
    Lists,
}

impl ViewKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tasks => "tasks",
            Self::Lists => "lists",
        }
    }
}

/// Destination for rendered items; the UI toolkit implements this.
pub trait ViewSink {
    /// Discards every displayed item of `view`.
    fn clear(&mut self, view: ViewKey);
    fn push(&mut self, view: ViewKey, item: ViewItem);
}

/// In-memory sink used by headless front-ends and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedViews {
    tasks: Vec<ViewItem>,
    lists: Vec<ViewItem>,
}

impl RenderedViews {
    pub fn items(&self, view: ViewKey) -> &[ViewItem] {
        match view {
            ViewKey::Tasks => &self.tasks,
            ViewKey::Lists => &self.lists,
        }
    }

    pub fn task_rows(&self) -> Vec<&TaskRow> {
        self.tasks
            .iter()
            .filter_map(|item| match item {
                ViewItem::Task(row) => Some(row),
                _ => None,
            })
            .collect()
    }

    pub fn list_cards(&self) -> Vec<&ListCard> {
        self.lists
            .iter()
            .filter_map(|item| match item {
                ViewItem::List(card) => Some(card),
                _ => None,
            })
            .collect()
    }

    /// Placeholder text when the view rendered no rows.
    pub fn placeholder(&self, view: ViewKey) -> Option<&'static str> {
        match self.items(view) {
            [ViewItem::Placeholder(text)] => Some(*text),
            _ => None,
        }
    }
}

impl ViewSink for RenderedViews {
    fn clear(&mut self, view: ViewKey) {
        match view {
            ViewKey::Tasks => self.tasks.clear(),
            ViewKey::Lists => self.lists.clear(),
        }
    }

    fn push(&mut self, view: ViewKey, item: ViewItem) {
        match view {
            ViewKey::Tasks => self.tasks.push(item),
            ViewKey::Lists => self.lists.push(item),
        }
    }
}

/// Re-queries the store and rebuilds a panel on every call.
#[derive(Debug, Clone)]
pub struct ViewSynchronizer<T, L> {
    tasks: T,
    lists: L,
}

impl<T: TaskRepository, L: ListRepository> ViewSynchronizer<T, L> {
    pub fn new(tasks: T, lists: L) -> Self {
        Self { tasks, lists }
    }

    /// Clears `view`, queries its rows and renders them in query order.
    ///
    /// A failed read renders the empty placeholder. Returns the number of
    /// entity rows rendered.
    pub fn refresh(&self, view: ViewKey, sink: &mut dyn ViewSink) -> usize {
        let started_at = Instant::now();
        sink.clear(view);

        let (items, placeholder) = match view {
            ViewKey::Tasks => (
                self.tasks.list_tasks().map(|tasks| {
                    tasks
                        .iter()
                        .map(|task| ViewItem::Task(TaskRow::from_task(task)))
                        .collect::<Vec<_>>()
                }),
                EMPTY_TASKS_PLACEHOLDER,
            ),
            ViewKey::Lists => (
                self.lists.list_lists().map(|lists| {
                    lists
                        .iter()
                        .map(|list| ViewItem::List(ListCard::from_list(list)))
                        .collect::<Vec<_>>()
                }),
                EMPTY_LISTS_PLACEHOLDER,
            ),
        };

        let items = match items {
            Ok(items) => items,
            Err(err) => {
                error!(
                    "event=view_refresh module=view status=error view={} error_kind={} error={}",
                    view.as_str(),
                    err.kind(),
                    err
                );
                Vec::new()
            }
        };

        let rendered = items.len();
        if items.is_empty() {
            sink.push(view, ViewItem::Placeholder(placeholder));
        } else {
            for item in items {
                sink.push(view, item);
            }
        }

        debug!(
            "event=view_refresh module=view status=ok view={} rows={} duration_ms={}",
            view.as_str(),
            rendered,
            started_at.elapsed().as_millis()
        );
        rendered
    }
}
