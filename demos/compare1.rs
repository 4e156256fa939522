use anyhow::anyhow;
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use log::debug;
use rat_compare::event::{ct_event, try_flow, CompareOutcome, HandleEvent, Outcome, Regular};
use rat_compare::focus::{Focus, FocusBuilder};
use rat_compare::slider::{CompareSlider, CompareSliderState, CompareSliderStyle};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph, StatefulWidget, Widget, Wrap};
use ratatui::{Frame, Terminal};
use std::fs;
use std::io::{stdout, Stdout};
use std::path::PathBuf;
use std::time::Duration;

fn main() -> Result<(), anyhow::Error> {
    setup_logging()?;

    let mut state = State {
        portrait: false,
        preset: 1,
        compare: CompareSliderState::named("compare"),
        status: String::new(),
        quit: false,
    };
    state.compare.set_long_step(5.0);
    state
        .compare
        .set_on_position_change(Some(Box::new(|v: f64| debug!("position {:.2}", v))));

    run_ui(&mut state)
}

struct State {
    portrait: bool,
    preset: usize,
    compare: CompareSliderState,
    status: String,
    quit: bool,
}

// Consecutive presets differ, so each one overrides the dragged position.
const PRESETS: [f64; 3] = [25.0, 50.0, 75.0];

const BEFORE: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. \
    Sed do eiusmod tempor incididunt ut labore et dolore magna aliqua. \
    Ut enim ad minim veniam, quis nostrud exercitation ullamco laboris \
    nisi ut aliquip ex ea commodo consequat.";

const AFTER: &str = "LOREM IPSUM DOLOR SIT AMET, CONSECTETUR ADIPISCING ELIT. \
    SED DO EIUSMOD TEMPOR INCIDIDUNT UT LABORE ET DOLORE MAGNA ALIQUA. \
    UT ENIM AD MINIM VENIAM, QUIS NOSTRUD EXERCITATION ULLAMCO LABORIS \
    NISI UT ALIQUIP EX EA COMMODO CONSEQUAT.";

fn run_ui(state: &mut State) -> Result<(), anyhow::Error> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let r = event_loop(&mut terminal, state);

    disable_raw_mode()?;
    stdout().execute(DisableMouseCapture)?;
    stdout().execute(LeaveAlternateScreen)?;

    r
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state: &mut State,
) -> Result<(), anyhow::Error> {
    loop {
        terminal.draw(|frame| repaint(frame, state))?;

        if !crossterm::event::poll(Duration::from_millis(100))? {
            continue;
        }
        let event = crossterm::event::read()?;

        let o = handle(&event, state)?;
        if o == Outcome::Changed {
            state.status = format!("position {:.1}", state.compare.position());
        }
        if state.quit {
            return Ok(());
        }
    }
}

fn repaint(frame: &mut Frame<'_>, state: &mut State) {
    let l = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).split(frame.area());
    let l0 = Layout::horizontal([Constraint::Percentage(15), Constraint::Fill(1)]).split(l[0]);

    let styles = CompareSliderStyle {
        style: Style::new().fg(Color::Gray),
        line: Some(Style::new().fg(Color::Yellow)),
        focus: Some(Style::new().black().on_yellow()),
        drag: Some(Style::new().black().on_light_red()),
        ..Default::default()
    };

    CompareSlider::new(
        Paragraph::new(BEFORE)
            .wrap(Wrap { trim: true })
            .style(Style::new().fg(Color::LightCyan)),
        Paragraph::new(AFTER)
            .wrap(Wrap { trim: true })
            .style(Style::new().fg(Color::LightGreen)),
    )
    .styles(styles)
    .portrait(state.portrait)
    .position(PRESETS[state.preset])
    .block(Block::bordered().title("compare"))
    .render(l0[1], frame.buffer_mut(), &mut state.compare);

    let help = [
        "F2 portrait",
        "F3 next preset",
        "Tab focus",
        "q quit",
        "",
        if state.compare.is_dragging() {
            "dragging"
        } else {
            ""
        },
    ];
    for (i, txt) in help.iter().enumerate() {
        let area = Rect::new(l0[0].x, l0[0].y + i as u16, l0[0].width, 1).intersection(l0[0]);
        Line::from(*txt).render(area, frame.buffer_mut());
    }

    Line::from(state.status.as_str())
        .style(Style::new().white().on_blue())
        .render(l[1], frame.buffer_mut());
}

fn focus(state: &State) -> Focus {
    let mut fb = FocusBuilder::default();
    fb.widget(&state.compare);
    fb.build()
}

fn handle(event: &Event, state: &mut State) -> Result<Outcome, anyhow::Error> {
    let mut focus = focus(state);
    try_flow!(focus.handle(event, Regular));

    try_flow!(match event {
        ct_event!(key press 'q') => {
            state.quit = true;
            Outcome::Changed
        }
        ct_event!(keycode press F(2)) => {
            state.portrait = !state.portrait;
            Outcome::Changed
        }
        ct_event!(keycode press F(3)) => {
            state.preset = (state.preset + 1) % PRESETS.len();
            Outcome::Changed
        }
        Event::Key(KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            ..
        }) => return Err(anyhow!("ctrl-c")),
        _ => Outcome::Continue,
    });

    try_flow!(match state.compare.handle(event, Regular) {
        CompareOutcome::Position => {
            state.status = format!("position {:.1}", state.compare.position());
            Outcome::Changed
        }
        r => r.into(),
    });

    Ok(Outcome::Continue)
}

fn setup_logging() -> Result<(), anyhow::Error> {
    let log = PathBuf::from("compare1.log");
    if log.exists() {
        fs::remove_file(&log)?;
    }
    fern::Dispatch::new()
        .format(|out, message, _record| out.finish(format_args!("{}", message)))
        .level(log::LevelFilter::Debug)
        .chain(fern::log_file(&log)?)
        .apply()?;
    Ok(())
}
