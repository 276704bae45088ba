use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::cache::RenderCache;
use crate::render::{Margin, RenderContext};
use crate::theme::{Semantic, Theme};
use crate::width::{pad_to_width, truncate_to_width};

use super::{Memoized, Panel};

const ACTIONS: &str = "[Add Task (a)] [Move (m)] [Done (d)] [Filter] [Sort]";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    P0,
    P1,
    P2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Block reference such as `^task-001`.
    pub id: String,
    pub title: String,
    pub priority: Priority,
    pub status: TaskStatus,
}

type TaskFilter = Box<dyn Fn(&Task) -> bool + Send + Sync>;

pub struct TaskColumn {
    pub id: String,
    pub title: String,
    filter: TaskFilter,
}

impl TaskColumn {
    pub fn new<F>(id: impl Into<String>, title: impl Into<String>, filter: F) -> Self
    where
        F: Fn(&Task) -> bool + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            title: title.into(),
            filter: Box::new(filter),
        }
    }

    pub fn by_status(id: impl Into<String>, title: impl Into<String>, status: TaskStatus) -> Self {
        Self::new(id, title, move |task| task.status == status)
    }

    pub fn accepts(&self, task: &Task) -> bool {
        (self.filter)(task)
    }
}

/// What the host should do in response to a key. The board never mutates
/// tasks itself; the host applies the action and calls [`TaskBoard::set_tasks`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardAction {
    None,
    View(String),
    Complete(String),
    Move { task_id: String, to_column: String },
    Add,
    Close,
}

/// Kanban view with keyboard selection.
pub struct TaskBoard {
    tasks: Vec<Task>,
    columns: Vec<TaskColumn>,
    selected_column: usize,
    selected_card: usize,
    cache: RenderCache,
}

impl TaskBoard {
    pub fn new(tasks: Vec<Task>, columns: Vec<TaskColumn>) -> Self {
        Self {
            tasks,
            columns,
            selected_column: 0,
            selected_card: 0,
            cache: RenderCache::new(),
        }
    }

    /// To Do / In Progress / Done.
    pub fn default_columns() -> Vec<TaskColumn> {
        vec![
            TaskColumn::by_status("todo", "To Do", TaskStatus::Todo),
            TaskColumn::by_status("in-progress", "In Progress", TaskStatus::InProgress),
            TaskColumn::by_status("done", "Done", TaskStatus::Done),
        ]
    }

    pub fn set_tasks(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        let len = self.column_tasks(self.selected_column).len();
        self.selected_card = self.selected_card.min(len.saturating_sub(1));
        self.cache.invalidate();
    }

    pub fn selection(&self) -> (usize, usize) {
        (self.selected_column, self.selected_card)
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.column_tasks(self.selected_column)
            .get(self.selected_card)
            .copied()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> BoardAction {
        if key.kind == KeyEventKind::Release {
            return BoardAction::None;
        }
        match key.code {
            KeyCode::Left => self.move_column(-1),
            KeyCode::Right => self.move_column(1),
            KeyCode::Up => self.move_card(-1),
            KeyCode::Down => self.move_card(1),
            KeyCode::Enter => self
                .selected_task()
                .map(|task| BoardAction::View(task.id.clone()))
                .unwrap_or(BoardAction::None),
            KeyCode::Char('d') => self
                .selected_task()
                .map(|task| BoardAction::Complete(task.id.clone()))
                .unwrap_or(BoardAction::None),
            KeyCode::Char('m') => self.move_selected(),
            KeyCode::Char('a') => BoardAction::Add,
            KeyCode::Esc => BoardAction::Close,
            _ => BoardAction::None,
        }
    }

    fn column_tasks(&self, index: usize) -> Vec<&Task> {
        match self.columns.get(index) {
            Some(column) => self.tasks.iter().filter(|t| column.accepts(t)).collect(),
            None => Vec::new(),
        }
    }

    fn move_column(&mut self, delta: isize) -> BoardAction {
        if self.columns.is_empty() {
            return BoardAction::None;
        }
        let last = self.columns.len() - 1;
        let next = self.selected_column.saturating_add_signed(delta).min(last);
        if next != self.selected_column {
            self.selected_column = next;
            self.selected_card = 0;
            self.cache.invalidate();
        }
        BoardAction::None
    }

    fn move_card(&mut self, delta: isize) -> BoardAction {
        let len = self.column_tasks(self.selected_column).len();
        if len == 0 {
            return BoardAction::None;
        }
        let next = self.selected_card.saturating_add_signed(delta).min(len - 1);
        if next != self.selected_card {
            self.selected_card = next;
            self.cache.invalidate();
        }
        BoardAction::None
    }

    fn move_selected(&self) -> BoardAction {
        let Some(task) = self.selected_task() else {
            return BoardAction::None;
        };
        let next = (self.selected_column + 1) % self.columns.len();
        BoardAction::Move {
            task_id: task.id.clone(),
            to_column: self.columns[next].id.clone(),
        }
    }

    fn column_width(&self, inner: usize) -> usize {
        let count = self.columns.len();
        if count == 0 {
            return 0;
        }
        inner.saturating_sub(count - 1) / count
    }

    fn header_row(&self, column_width: usize, theme: &dyn Theme) -> String {
        self.columns
            .iter()
            .enumerate()
            .map(|(index, column)| {
                let header = format!("{} ({})", column.title, self.column_tasks(index).len());
                let cell = pad_to_width(&truncate_to_width(&header, column_width, Some("…")), column_width);
                if index == self.selected_column {
                    theme.fg(Semantic::Accent, &theme.bold(&cell))
                } else {
                    theme.fg(Semantic::Text, &cell)
                }
            })
            .collect::<Vec<_>>()
            .join("│")
    }

    fn card_row(&self, row: usize, column_width: usize, theme: &dyn Theme) -> String {
        (0..self.columns.len())
            .map(|index| match self.column_tasks(index).get(row) {
                None => " ".repeat(column_width),
                Some(task) => {
                    let selected = index == self.selected_column && row == self.selected_card;
                    let prefix = if selected { "> " } else { "  " };
                    let text = format!("{prefix}{}", task.title);
                    let cell = pad_to_width(&truncate_to_width(&text, column_width, Some("…")), column_width);
                    if selected {
                        theme.fg(Semantic::Accent, &theme.bold(&cell))
                    } else {
                        theme.fg(Semantic::Text, &cell)
                    }
                }
            })
            .collect::<Vec<_>>()
            .join("│")
    }
}

impl Memoized for TaskBoard {
    fn cache(&mut self) -> &mut RenderCache {
        &mut self.cache
    }

    fn compose(&self, width: usize, ctx: &RenderContext<'_>) -> Vec<String> {
        let theme = ctx.theme;
        let mut writer = ctx.writer(self.name(), width);
        writer.top(&theme.fg(Semantic::Accent, &theme.bold("Task Board")));

        if self.columns.is_empty() {
            writer.line_with(&theme.fg(Semantic::Dim, "No columns configured"), Margin::Single);
        } else {
            let column_width = self.column_width(writer.inner_width(Margin::Single));
            let separator = vec!["─".repeat(column_width); self.columns.len()].join("┼");
            writer
                .line_with(&self.header_row(column_width, theme), Margin::Single)
                .line_with(&separator, Margin::Single);

            let rows = (0..self.columns.len())
                .map(|index| self.column_tasks(index).len())
                .max()
                .unwrap_or(0)
                .max(1);
            for row in 0..rows {
                writer.line_with(&self.card_row(row, column_width, theme), Margin::Single);
            }
        }

        writer.blank().hint(ACTIONS).bottom();
        writer.finish()
    }
}

impl Panel for TaskBoard {
    fn name(&self) -> &str {
        "TaskBoard"
    }

    fn render(&mut self, width: usize, ctx: &RenderContext<'_>) -> Vec<String> {
        self.render_cached(width, ctx)
    }

    fn invalidate(&mut self) {
        self.cache.invalidate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guard::WidthGuard;
    use crate::logging::{Logger, MemorySink};
    use crate::theme::{AnsiTheme, PlainTheme};
    use crate::width::visible_width;
    use crossterm::event::KeyModifiers;

    fn task(id: &str, title: &str, status: TaskStatus) -> Task {
        Task {
            id: id.to_string(),
            title: title.to_string(),
            priority: Priority::P1,
            status,
        }
    }

    fn board() -> TaskBoard {
        TaskBoard::new(
            vec![
                task("^task-001", "Draft Q3 plan", TaskStatus::Todo),
                task("^task-002", "Review hiring loop feedback", TaskStatus::Todo),
                task("^task-003", "Ship vault sync", TaskStatus::InProgress),
            ],
            TaskBoard::default_columns(),
        )
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn navigation_clamps_to_columns_and_cards() {
        let mut board = board();
        board.handle_key(press(KeyCode::Left));
        assert_eq!(board.selection(), (0, 0));
        board.handle_key(press(KeyCode::Down));
        board.handle_key(press(KeyCode::Down));
        assert_eq!(board.selection(), (0, 1));
        board.handle_key(press(KeyCode::Right));
        assert_eq!(board.selection(), (1, 0));
        board.handle_key(press(KeyCode::Right));
        board.handle_key(press(KeyCode::Right));
        assert_eq!(board.selection(), (2, 0));
        assert_eq!(board.handle_key(press(KeyCode::Down)), BoardAction::None);
        assert!(board.selected_task().is_none());
    }

    #[test]
    fn keys_map_to_actions() {
        let mut board = board();
        assert_eq!(
            board.handle_key(press(KeyCode::Enter)),
            BoardAction::View("^task-001".to_string())
        );
        assert_eq!(
            board.handle_key(press(KeyCode::Char('d'))),
            BoardAction::Complete("^task-001".to_string())
        );
        assert_eq!(
            board.handle_key(press(KeyCode::Char('m'))),
            BoardAction::Move {
                task_id: "^task-001".to_string(),
                to_column: "in-progress".to_string(),
            }
        );
        assert_eq!(board.handle_key(press(KeyCode::Char('a'))), BoardAction::Add);
        assert_eq!(board.handle_key(press(KeyCode::Esc)), BoardAction::Close);
        assert_eq!(board.handle_key(press(KeyCode::Char('z'))), BoardAction::None);
    }

    #[test]
    fn move_wraps_from_last_column() {
        let mut board = board();
        board.set_tasks(vec![task("^task-009", "Celebrate", TaskStatus::Done)]);
        board.handle_key(press(KeyCode::Right));
        board.handle_key(press(KeyCode::Right));
        assert_eq!(
            board.handle_key(press(KeyCode::Char('m'))),
            BoardAction::Move {
                task_id: "^task-009".to_string(),
                to_column: "todo".to_string(),
            }
        );
    }

    #[test]
    fn board_is_exact_at_every_width() {
        let sink = MemorySink::new();
        let guard = WidthGuard::with_logger(Logger::new(sink.clone()));
        let theme = AnsiTheme::new();
        let ctx = RenderContext::new(&theme, &guard);
        let mut board = board();

        for width in [8, 20, 47, 80, 200] {
            let lines = board.render(width, &ctx);
            assert!(lines.iter().all(|l| visible_width(l) == width), "width {width}");
        }
        assert!(sink.events().is_empty());
    }

    #[test]
    fn board_layout() {
        let guard = WidthGuard::disabled();
        let ctx = RenderContext::new(&PlainTheme, &guard);
        let mut board = board();
        let lines = board.render(52, &ctx);

        // inner 48: three columns of 15, two separators, one column of slack
        let header = ["To Do (2)", "In Progress (1)", "Done (0)"]
            .map(|cell| pad_to_width(cell, 15))
            .join("│");
        assert_eq!(lines[1], format!("│ {header}  │"));
        let rule = ["─".repeat(15), "─".repeat(15), "─".repeat(15)].join("┼");
        assert_eq!(lines[2], format!("│ {rule}  │"));
        assert!(lines[3].starts_with("│ > Draft Q3 plan│  Ship vault s…│"));
        assert!(lines[4].starts_with("│   Review hirin…│"));
        assert_eq!(lines.len(), 8);
    }

    #[test]
    fn selection_change_rerenders() {
        let guard = WidthGuard::disabled();
        let ctx = RenderContext::new(&PlainTheme, &guard);
        let mut board = board();
        let before = board.render(60, &ctx);
        board.handle_key(press(KeyCode::Down));
        let after = board.render(60, &ctx);
        assert_ne!(before, after);
        assert!(after[4].contains("> Review hiring"));
    }

    #[test]
    fn empty_board_still_renders() {
        let guard = WidthGuard::disabled();
        let ctx = RenderContext::new(&PlainTheme, &guard);
        let mut board = TaskBoard::new(Vec::new(), Vec::new());
        let lines = board.render(30, &ctx);
        assert!(lines.iter().all(|l| visible_width(l) == 30));
        assert_eq!(board.handle_key(press(KeyCode::Char('m'))), BoardAction::None);
    }
}
