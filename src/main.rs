//! Centy Forms - terminal front-end for the cascading form engine
//!
//! Usage: `centy-forms [issue|pr] [--edit]`

mod app;
mod ui;

use anyhow::{bail, Result};
use app::App;
use centy_forms::config::{FormKind, FormsConfig};
use centy_forms::state::{
    FileStorage, FormEngine, FormMode, FormPatch, FormSchema, IssueAssignmentForm, NoopStorage,
    PrReviewForm, SessionStorage,
};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "centy_forms=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = FormsConfig::load()?;

    let mut kind = config.default_form.unwrap_or_default();
    let mut mode = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--edit" => mode = Some(FormMode::Edit),
            other => match FormKind::parse(other) {
                Some(k) => kind = k,
                None => bail!("unknown argument `{other}` (expected issue, pr or --edit)"),
            },
        }
    }

    let mut app = App::new(build_engine(&config, kind, mode)?);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    if let Some(payload) = app.submitted {
        println!("{}", serde_json::to_string_pretty(&payload)?);
    }

    Ok(())
}

/// `requested` is the mode named on the command line; without one a restored
/// session keeps its own mode
fn build_engine(
    config: &FormsConfig,
    kind: FormKind,
    requested: Option<FormMode>,
) -> Result<FormEngine> {
    let storage: Box<dyn SessionStorage> = match config.session_dir() {
        Some(dir) if config.persist_sessions() => Box::new(FileStorage::new(dir)),
        _ => Box::new(NoopStorage),
    };

    let mode = requested.unwrap_or_default();
    let (mut engine, existing): (FormEngine, FormPatch) = match kind {
        FormKind::IssueAssignment => (
            rehydrate(IssueAssignmentForm::new(), mode, storage),
            app::demo_assignment().into(),
        ),
        FormKind::PrReview => (
            rehydrate(PrReviewForm::new(), mode, storage),
            app::demo_review().into(),
        ),
    };

    let options = config.load_options()?.unwrap_or_else(app::demo_options);
    engine.set_options_lookup(options);

    app::prepare_session(&mut engine, requested, existing);
    Ok(engine)
}

fn rehydrate(
    schema: impl FormSchema + 'static,
    mode: FormMode,
    storage: Box<dyn SessionStorage>,
) -> FormEngine {
    let engine = FormEngine::rehydrate(schema, mode, storage);
    tracing::info!(
        form = engine.schema().storage_key(),
        mode = engine.mode().label(),
        "form session started"
    );
    engine
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        // Draw the UI
        terminal.draw(|frame| ui::draw(frame, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                app.handle_key(key)?;
            }
        }

        // Check if app wants to quit
        if app.should_quit() {
            return Ok(());
        }
    }
}
