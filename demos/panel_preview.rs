use std::io::{self, Write};
use std::time::Duration;

use crossterm::ExecutableCommand;
use crossterm::cursor;
use crossterm::event::{self, Event};
use crossterm::terminal::{self, Clear, ClearType};
use dex_panels::widgets::{
    CompetencyProgress, CompetencyStatus, GapAnalysis, Priority, PriorityProgress,
    PriorityStatus, ReadinessStatus, TaskStatus, TopTask, WeekPriority,
};
use dex_panels::{
    AnsiTheme, BoardAction, CareerReadiness, CareerReadinessGauge, DashboardData, DashboardWidget,
    GuardConfig, Panel, ProgressIndicator, ProgressOptions, RenderContext, Result, ScoutProgress,
    ScoutStatus, Task, TaskBoard, WeekProgress, WeekProgressBar, WidthGuard,
    terminal_width_or_default,
};

fn main() -> Result<()> {
    let config = GuardConfig::from_env()?;
    let guard = WidthGuard::new(&config);
    let theme = AnsiTheme::new();
    let ctx = RenderContext::new(&theme, &guard).with_frame(
        dex_panels::Frame::default().with_mode(config.width_mode),
    );

    if std::env::args().any(|arg| arg == "--board") {
        return run_board(&ctx);
    }

    let width = terminal_width_or_default();
    let mut stdout = io::stdout();
    for panel in preview_panels().iter_mut() {
        for line in panel.render(width, &ctx) {
            writeln!(stdout, "{line}")?;
        }
        writeln!(stdout)?;
    }

    let mut footer = WeekProgressBar::new(week());
    writeln!(stdout, "{}", footer.render_compact(&ctx))?;

    guard.emit_metrics();
    Ok(())
}

fn run_board(ctx: &RenderContext<'_>) -> Result<()> {
    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout
        .execute(terminal::EnterAlternateScreen)?
        .execute(cursor::Hide)?;

    let result = board_loop(&mut stdout, ctx);

    stdout.execute(cursor::Show).ok();
    stdout.execute(terminal::LeaveAlternateScreen).ok();
    terminal::disable_raw_mode().ok();
    result
}

fn board_loop(stdout: &mut impl Write, ctx: &RenderContext<'_>) -> Result<()> {
    let mut tasks = tasks();
    let mut board = TaskBoard::new(tasks.clone(), TaskBoard::default_columns());
    let mut next_id = tasks.len() + 1;

    loop {
        let width = terminal_width_or_default();
        stdout
            .execute(Clear(ClearType::All))?
            .execute(cursor::MoveTo(0, 0))?;
        for line in board.render(width, ctx) {
            write!(stdout, "{line}\r\n")?;
        }
        stdout.flush()?;

        if !event::poll(Duration::from_millis(250))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        match board.handle_key(key) {
            BoardAction::Close => return Ok(()),
            BoardAction::Complete(id) => set_status(&mut tasks, &id, TaskStatus::Done),
            BoardAction::Move { task_id, to_column } => {
                let status = match to_column.as_str() {
                    "todo" => TaskStatus::Todo,
                    "in-progress" => TaskStatus::InProgress,
                    _ => TaskStatus::Done,
                };
                set_status(&mut tasks, &task_id, status);
            }
            BoardAction::Add => {
                tasks.push(Task {
                    id: format!("^task-{next_id:03}"),
                    title: format!("New task {next_id}"),
                    priority: Priority::P2,
                    status: TaskStatus::Todo,
                });
                next_id += 1;
            }
            BoardAction::View(_) | BoardAction::None => continue,
        }
        board.set_tasks(tasks.clone());
    }
}

fn set_status(tasks: &mut [Task], id: &str, status: TaskStatus) {
    if let Some(task) = tasks.iter_mut().find(|task| task.id == id) {
        task.status = status;
    }
}

fn preview_panels() -> Vec<Box<dyn Panel>> {
    vec![
        Box::new(DashboardWidget::new(dashboard())),
        Box::new(ProgressIndicator::new(scouts(), ProgressOptions::default())),
        Box::new(WeekProgressBar::new(week())),
        Box::new(CareerReadinessGauge::new(readiness())),
        Box::new(TaskBoard::new(tasks(), TaskBoard::default_columns())),
    ]
}

fn dashboard() -> DashboardData {
    DashboardData {
        week_priorities: vec![
            WeekPriority {
                text: "Finalize Q3 roadmap".to_string(),
                completed: true,
            },
            WeekPriority {
                text: "Close platform hiring loop".to_string(),
                completed: false,
            },
        ],
        top_tasks: tasks()
            .into_iter()
            .filter(|task| task.status != TaskStatus::Done)
            .map(|task| TopTask {
                text: task.title,
                priority: task.priority,
            })
            .collect(),
        focus_hours: 2.5,
    }
}

fn scouts() -> Vec<ScoutProgress> {
    vec![
        ScoutProgress {
            status: ScoutStatus::Complete,
            progress: 100.0,
            duration: Some(Duration::from_millis(1400)),
            ..ScoutProgress::pending("calendar-scout")
        },
        ScoutProgress {
            status: ScoutStatus::Running,
            progress: 60.0,
            ..ScoutProgress::pending("inbox-scout")
        },
        ScoutProgress {
            status: ScoutStatus::Error,
            error: Some("vault locked".to_string()),
            ..ScoutProgress::pending("notes-scout")
        },
        ScoutProgress::pending("tasks-scout"),
    ]
}

fn week() -> WeekProgress {
    WeekProgress {
        day_of_week: 3,
        priorities: vec![
            PriorityProgress {
                name: "Priority 1".to_string(),
                progress: 75.0,
                status: PriorityStatus::OnTrack,
            },
            PriorityProgress {
                name: "Priority 2".to_string(),
                progress: 30.0,
                status: PriorityStatus::Behind,
            },
            PriorityProgress {
                name: "Priority 3".to_string(),
                progress: 0.0,
                status: PriorityStatus::NotStarted,
            },
        ],
    }
}

fn readiness() -> CareerReadiness {
    CareerReadiness {
        overall_score: 68.0,
        status: ReadinessStatus::Building,
        competencies: vec![
            CompetencyProgress {
                name: "Technical Depth".to_string(),
                score: 82.0,
                status: CompetencyStatus::Strong,
                evidence_count: 14,
            },
            CompetencyProgress {
                name: "Mentorship".to_string(),
                score: 55.0,
                status: CompetencyStatus::OnTrack,
                evidence_count: 6,
            },
            CompetencyProgress {
                name: "Strategy".to_string(),
                score: 30.0,
                status: CompetencyStatus::Weak,
                evidence_count: 2,
            },
        ],
        gaps: vec![GapAnalysis {
            competency: "Strategy".to_string(),
            recommendation: "Write the H2 roadmap proposal".to_string(),
        }],
        current_level: Some("IC4".to_string()),
        target_level: Some("IC5".to_string()),
    }
}

fn tasks() -> Vec<Task> {
    [
        ("^task-001", "Draft quarterly goals", Priority::P0, TaskStatus::Todo),
        ("^task-002", "Review design doc", Priority::P1, TaskStatus::Todo),
        ("^task-003", "Ship weekly digest", Priority::P1, TaskStatus::InProgress),
        ("^task-004", "Book 1:1s", Priority::P2, TaskStatus::Done),
    ]
    .into_iter()
    .map(|(id, title, priority, status)| Task {
        id: id.to_string(),
        title: title.to_string(),
        priority,
        status,
    })
    .collect()
}
