use crate::calendar;
use crate::input::{TextField, TimeField};
use crate::model::{Event, EventIndex};
use crate::nav::NavigationController;
use crate::storage::{save_events, EventsLocation};
use anyhow::Result;
use chrono::{Datelike, Local, NaiveDate};
use crossterm::event::{self, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Alignment, Color, Modifier, Rect, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Terminal;
use std::io::{stdout, Stdout};
use std::time::Duration;

pub fn run(index: EventIndex, location: EventsLocation) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let mut app = App::new(index, location);
    let result = app.event_loop(&mut terminal);
    teardown_terminal(&mut terminal)?;
    result
}

struct App {
    index: EventIndex,
    location: EventsLocation,
    nav: NavigationController,
    today: NaiveDate,
    mode: Mode,
    status: String,
}

enum Mode {
    Calendar,
    Events {
        selected: usize,
    },
    Picking {
        intent: PickIntent,
        selected: usize,
    },
    Creating(EventForm),
    Editing {
        original: Event,
        form: EventForm,
    },
    ConfirmDelete {
        event: Event,
    },
    SearchEntry(TextField),
    SearchResults {
        query: String,
        results: Vec<Event>,
        selected: usize,
    },
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum PickIntent {
    Edit,
    Delete,
}

struct EventForm {
    time: TimeField,
    description: TextField,
    field: FormField,
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum FormField {
    Time,
    Description,
}

impl EventForm {
    fn new() -> Self {
        EventForm {
            time: TimeField::new(),
            description: TextField::default(),
            field: FormField::Time,
        }
    }

    fn from_event(event: &Event) -> Self {
        EventForm {
            time: TimeField::with_time(event.time),
            description: TextField::new(&event.description),
            field: FormField::Time,
        }
    }

    fn toggle_field(&mut self) {
        self.field = match self.field {
            FormField::Time => FormField::Description,
            FormField::Description => FormField::Time,
        };
    }
}

impl App {
    fn new(index: EventIndex, location: EventsLocation) -> Self {
        let today = Local::now().date_naive();
        let status = format!(
            "Loaded {} event(s) from {}",
            index.len(),
            location.path.display()
        );
        App {
            index,
            location,
            nav: NavigationController::new(today),
            today,
            mode: Mode::Calendar,
            status,
        }
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;
            if event::poll(Duration::from_millis(200))? {
                if let TermEvent::Key(key) = event::read()? {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key)? {
                        break;
                    }
                }
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        match self.mode {
            Mode::Calendar => self.handle_calendar_key(key),
            Mode::Events { .. } => self.handle_events_key(key),
            Mode::Picking { .. } => self.handle_picking_key(key),
            Mode::Creating(_) | Mode::Editing { .. } => self.handle_form_key(key),
            Mode::ConfirmDelete { .. } => self.handle_confirm_key(key),
            Mode::SearchEntry(_) => self.handle_search_entry_key(key),
            Mode::SearchResults { .. } => self.handle_search_results_key(key),
        }
    }

    fn handle_calendar_key(&mut self, key: KeyEvent) -> Result<bool> {
        match key.code {
            KeyCode::Char('q') => return Ok(true),
            KeyCode::Left | KeyCode::Char('h') => self.nav.move_left(),
            KeyCode::Right | KeyCode::Char('l') => self.nav.move_right(),
            KeyCode::Up | KeyCode::Char('k') => self.nav.move_up(),
            KeyCode::Down | KeyCode::Char('j') => self.nav.move_down(),
            KeyCode::Char('b') => self.nav.shift_month_backward(),
            KeyCode::Char('n') => self.nav.shift_month_forward(),
            KeyCode::Char('t') => {
                self.nav.reset_to_current();
                self.today = self.nav.selection();
                self.status = "Back to today".into();
            }
            KeyCode::Enter => {
                self.mode = Mode::Events { selected: 0 };
            }
            KeyCode::Char('a') => {
                self.mode = Mode::Creating(EventForm::new());
                self.status = format!(
                    "New event on {} (Tab switch field, Enter save, Esc cancel)",
                    calendar::format_date(self.nav.selection())
                );
            }
            KeyCode::Char('e') => self.start_pick(PickIntent::Edit),
            KeyCode::Char('d') => self.start_pick(PickIntent::Delete),
            KeyCode::Char('/') | KeyCode::Char('f') => {
                self.mode = Mode::SearchEntry(TextField::default());
                self.status = "Search events (Enter to run, Esc to cancel)".into();
            }
            _ => {}
        }
        Ok(false)
    }

    fn handle_events_key(&mut self, key: KeyEvent) -> Result<bool> {
        let events = self.index.events_for_date(self.nav.selection());
        let selected = match &mut self.mode {
            Mode::Events { selected } => selected,
            _ => return Ok(false),
        };
        match key.code {
            KeyCode::Char('q') => return Ok(true),
            KeyCode::Esc | KeyCode::Enter => {
                self.mode = Mode::Calendar;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                *selected = selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if *selected + 1 < events.len() {
                    *selected += 1;
                }
            }
            KeyCode::Char('a') => {
                self.mode = Mode::Creating(EventForm::new());
            }
            KeyCode::Char('e') => {
                if let Some(event) = events.get(*selected) {
                    self.mode = Mode::Editing {
                        original: event.clone(),
                        form: EventForm::from_event(event),
                    };
                } else {
                    self.status = "No event selected to edit".into();
                }
            }
            KeyCode::Char('d') => {
                if let Some(event) = events.get(*selected) {
                    self.mode = Mode::ConfirmDelete {
                        event: event.clone(),
                    };
                } else {
                    self.status = "No event selected to delete".into();
                }
            }
            _ => {}
        }
        Ok(false)
    }

    fn start_pick(&mut self, intent: PickIntent) {
        let mut events = self.index.events_for_date(self.nav.selection());
        let verb = match intent {
            PickIntent::Edit => "edit",
            PickIntent::Delete => "delete",
        };
        match events.len() {
            0 => self.status = format!("No events to {} on this date", verb),
            1 => {
                let event = events.remove(0);
                self.dispatch_pick(intent, event);
            }
            _ => {
                self.mode = Mode::Picking {
                    intent,
                    selected: 0,
                };
                self.status = format!("Select an event to {} (Enter confirm, Esc cancel)", verb);
            }
        }
    }

    fn dispatch_pick(&mut self, intent: PickIntent, event: Event) {
        match intent {
            PickIntent::Edit => {
                self.mode = Mode::Editing {
                    form: EventForm::from_event(&event),
                    original: event,
                };
            }
            PickIntent::Delete => {
                self.mode = Mode::ConfirmDelete { event };
            }
        }
    }

    fn handle_picking_key(&mut self, key: KeyEvent) -> Result<bool> {
        let events = self.index.events_for_date(self.nav.selection());
        let (intent, selected) = match &mut self.mode {
            Mode::Picking { intent, selected } => (*intent, selected),
            _ => return Ok(false),
        };
        match key.code {
            KeyCode::Char('q') => return Ok(true),
            KeyCode::Esc => {
                self.mode = Mode::Calendar;
                self.status = "Canceled".into();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                *selected = selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if *selected + 1 < events.len() {
                    *selected += 1;
                }
            }
            KeyCode::Enter => {
                if let Some(event) = events.get(*selected) {
                    let event = event.clone();
                    self.dispatch_pick(intent, event);
                } else {
                    self.mode = Mode::Calendar;
                }
            }
            _ => {}
        }
        Ok(false)
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Result<bool> {
        let mut close_form = false;
        let mut mode = std::mem::replace(&mut self.mode, Mode::Calendar);
        match &mut mode {
            Mode::Creating(form) => {
                close_form = self.process_form_key(None, form, key)?;
            }
            Mode::Editing { original, form } => {
                let original = original.clone();
                close_form = self.process_form_key(Some(original), form, key)?;
            }
            _ => {}
        }
        self.mode = if close_form { Mode::Calendar } else { mode };
        Ok(false)
    }

    fn process_form_key(
        &mut self,
        original: Option<Event>,
        form: &mut EventForm,
        key: KeyEvent,
    ) -> Result<bool> {
        match key.code {
            KeyCode::Esc => {
                self.status = "Canceled".into();
                return Ok(true);
            }
            KeyCode::Tab | KeyCode::BackTab => form.toggle_field(),
            KeyCode::Enter => return self.try_submit(original, form),
            KeyCode::Backspace => match form.field {
                FormField::Time => form.time.backspace(),
                FormField::Description => form.description.backspace(),
            },
            KeyCode::Left => {
                if form.field == FormField::Description {
                    form.description.move_left();
                }
            }
            KeyCode::Right => {
                if form.field == FormField::Description {
                    form.description.move_right();
                }
            }
            KeyCode::Char(c) => {
                if key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
                {
                    return Ok(false);
                }
                match form.field {
                    // Invalid digits are swallowed; the buffer stays put.
                    FormField::Time => {
                        form.time.accept_digit(c);
                    }
                    FormField::Description => form.description.insert_char(c),
                }
            }
            _ => {}
        }
        Ok(false)
    }

    fn try_submit(&mut self, original: Option<Event>, form: &mut EventForm) -> Result<bool> {
        let time = match form.time.value() {
            Some(time) => time,
            None => {
                self.status = if form.time.is_empty() {
                    "Enter a time (HH:MM)".into()
                } else {
                    "Time is incomplete (HH:MM)".into()
                };
                return Ok(false);
            }
        };
        if form.description.is_blank() {
            self.status = "Description cannot be empty".into();
            return Ok(false);
        }
        let event = match Event::new(self.nav.selection(), time, form.description.value().trim()) {
            Ok(event) => event,
            Err(err) => {
                self.status = format!("Could not save: {}", err);
                return Ok(false);
            }
        };
        match original {
            None => {
                self.index.add(event.clone());
                self.persist(format!("Added {}  {}", event.time_string(), event.description))?;
            }
            Some(old) => {
                if let Err(err) = self.index.replace(&old, event.clone()) {
                    self.status = format!("Could not edit: {}", err);
                    return Ok(false);
                }
                self.persist(format!(
                    "Updated {}  {}",
                    event.time_string(),
                    event.description
                ))?;
            }
        }
        Ok(true)
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) -> Result<bool> {
        let target = match &self.mode {
            Mode::ConfirmDelete { event } => event.clone(),
            _ => return Ok(false),
        };
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                match self.index.remove(&target) {
                    Ok(()) => self.persist(format!(
                        "Deleted {}  {}",
                        target.time_string(),
                        target.description
                    ))?,
                    Err(err) => self.status = format!("Delete failed: {}", err),
                }
                self.mode = Mode::Calendar;
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                self.status = "Delete canceled".into();
                self.mode = Mode::Calendar;
            }
            _ => {}
        }
        Ok(false)
    }

    fn handle_search_entry_key(&mut self, key: KeyEvent) -> Result<bool> {
        let query = match &mut self.mode {
            Mode::SearchEntry(query) => query,
            _ => return Ok(false),
        };
        match key.code {
            KeyCode::Esc => {
                self.mode = Mode::Calendar;
                self.status = "Search canceled".into();
            }
            KeyCode::Enter => {
                let text = query.value().trim().to_string();
                if text.is_empty() {
                    self.mode = Mode::Calendar;
                    self.status = "Search canceled".into();
                } else {
                    let results = self.index.search(&text);
                    self.status = format!("{} match(es) for \"{}\"", results.len(), text);
                    self.mode = Mode::SearchResults {
                        query: text,
                        results,
                        selected: 0,
                    };
                }
            }
            KeyCode::Backspace => query.backspace(),
            KeyCode::Left => query.move_left(),
            KeyCode::Right => query.move_right(),
            KeyCode::Char(c) => {
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
                {
                    query.insert_char(c);
                }
            }
            _ => {}
        }
        Ok(false)
    }

    fn handle_search_results_key(&mut self, key: KeyEvent) -> Result<bool> {
        let (results, selected) = match &mut self.mode {
            Mode::SearchResults {
                results, selected, ..
            } => (results, selected),
            _ => return Ok(false),
        };
        match key.code {
            KeyCode::Char('q') => return Ok(true),
            KeyCode::Esc => {
                self.mode = Mode::Calendar;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                *selected = selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if *selected + 1 < results.len() {
                    *selected += 1;
                }
            }
            KeyCode::Enter => {
                if let Some(event) = results.get(*selected) {
                    let date = event.date;
                    self.nav.jump_to(date);
                    self.status = format!("Jumped to {}", calendar::format_date(date));
                    self.mode = Mode::Calendar;
                }
            }
            _ => {}
        }
        Ok(false)
    }

    fn persist(&mut self, message: impl Into<String>) -> Result<()> {
        save_events(&self.location, self.index.all())?;
        self.status = message.into();
        Ok(())
    }

    fn draw(&mut self, f: &mut ratatui::Frame<'_>) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(9),
                Constraint::Min(5),
                Constraint::Length(4),
            ])
            .split(f.size());

        self.draw_header(f, layout[0]);
        self.draw_months(f, layout[1]);
        self.draw_event_pane(f, layout[2]);
        self.draw_footer(f, layout[3]);

        match &self.mode {
            Mode::Creating(form) => self.draw_form(f, "New Event", form),
            Mode::Editing { form, .. } => self.draw_form(f, "Edit Event", form),
            Mode::ConfirmDelete { event } => self.draw_confirm(f, event),
            Mode::SearchEntry(query) => self.draw_search_prompt(f, query),
            Mode::SearchResults {
                query,
                results,
                selected,
            } => draw_search_results(f, query, results, *selected),
            _ => {}
        }
    }

    fn draw_header(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let title = Line::from(vec![
            Span::styled(
                "almanac ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                calendar::format_date(self.nav.selection()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  •  "),
            Span::styled(
                format!("{} event(s)", self.index.len()),
                Style::default().fg(Color::Green),
            ),
            Span::raw("  •  "),
            Span::styled(
                format!("{}", self.location.path.display()),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray));
        f.render_widget(
            Paragraph::new(title).alignment(Alignment::Center).block(block),
            area,
        );
    }

    fn draw_months(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let window = self.nav.window();
        let months = [
            window.previous_month(),
            window.center(),
            window.next_month(),
        ];
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(33),
                Constraint::Percentage(34),
                Constraint::Percentage(33),
            ])
            .split(area);
        for (idx, month) in months.iter().enumerate() {
            self.draw_month(f, chunks[idx], *month, idx == 1);
        }
    }

    fn draw_month(&self, f: &mut ratatui::Frame<'_>, area: Rect, month: NaiveDate, center: bool) {
        let selection = self.nav.selection();
        let mut lines = Vec::new();
        let headings = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];
        let header_spans: Vec<Span<'static>> = headings
            .iter()
            .map(|h| Span::styled(format!("{:>3}", h), Style::default().fg(Color::Cyan)))
            .collect();
        lines.push(Line::from(header_spans));

        for week in calendar::month_weeks(month.year(), month.month()) {
            let mut spans = Vec::new();
            for day in week {
                if day == 0 {
                    spans.push(Span::raw("   "));
                    continue;
                }
                if let Some(date) = NaiveDate::from_ymd_opt(month.year(), month.month(), day) {
                    let is_selected = date == selection;
                    let is_today = date == self.today;
                    let mut style = Style::default();
                    if self.index.has_events_for_date(date) {
                        style = style.fg(Color::Green);
                    }
                    if is_today {
                        style = style.fg(Color::Yellow).add_modifier(Modifier::BOLD);
                    }
                    if is_selected {
                        style = style
                            .bg(if is_today { Color::Cyan } else { Color::Blue })
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD);
                    }
                    spans.push(Span::styled(format!("{:>3}", day), style));
                }
            }
            lines.push(Line::from(spans));
        }

        let title_style = if center {
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let block = Block::default()
            .title(Span::styled(
                format!("{} {}", month.format("%B"), month.year()),
                title_style,
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if center {
                Color::Magenta
            } else {
                Color::DarkGray
            }));
        f.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center).block(block),
            area,
        );
    }

    fn draw_event_pane(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let date = self.nav.selection();
        let events = self.index.events_for_date(date);
        let highlighted = match &self.mode {
            Mode::Events { selected } => Some(*selected),
            Mode::Picking { selected, .. } => Some(*selected),
            _ => None,
        };

        let items: Vec<ListItem<'static>> = if events.is_empty() {
            vec![ListItem::new("No events for this date")]
        } else {
            events.iter().map(event_list_item).collect()
        };
        let mut state = ListState::default();
        if let Some(selected) = highlighted {
            if !events.is_empty() {
                state.select(Some(selected.min(events.len() - 1)));
            }
        }

        let focused = highlighted.is_some();
        let block = Block::default()
            .title(Span::styled(
                format!("Events — {}", calendar::format_date(date)),
                Style::default()
                    .fg(if focused { Color::Cyan } else { Color::Gray })
                    .add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if focused {
                Color::Cyan
            } else {
                Color::DarkGray
            }));
        let list = List::new(items).block(block).highlight_style(
            Style::default()
                .bg(Color::LightCyan)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        );
        f.render_stateful_widget(list, area, &mut state);
    }

    fn draw_footer(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Length(2)])
            .split(area);

        let help = Paragraph::new(self.footer_help_line())
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::TOP)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
        f.render_widget(help, rows[0]);

        let status = Paragraph::new(self.status.clone()).wrap(Wrap { trim: true }).block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        f.render_widget(status, rows[1]);
    }

    fn footer_help_line(&self) -> Line<'static> {
        let mut spans = Vec::new();
        match self.mode {
            Mode::Calendar => spans.extend([
                Span::styled("←↑↓→ / h j k l", Style::default().fg(Color::LightCyan)),
                Span::raw(" move  "),
                Span::styled("b/n", Style::default().fg(Color::LightGreen)),
                Span::raw(" month  "),
                Span::styled("t", Style::default().fg(Color::LightGreen)),
                Span::raw(" today  "),
                Span::styled("Enter", Style::default().fg(Color::LightYellow)),
                Span::raw(" events  "),
                Span::styled("a", Style::default().fg(Color::LightMagenta)),
                Span::raw(" add  "),
                Span::styled("e", Style::default().fg(Color::LightYellow)),
                Span::raw(" edit  "),
                Span::styled("d", Style::default().fg(Color::LightRed)),
                Span::raw(" delete  "),
                Span::styled("/", Style::default().fg(Color::LightCyan)),
                Span::raw(" search  "),
                Span::styled("q", Style::default().fg(Color::LightRed)),
                Span::raw(" quit"),
            ]),
            Mode::Events { .. } | Mode::Picking { .. } | Mode::SearchResults { .. } => spans
                .extend([
                    Span::styled("↑↓ / k j", Style::default().fg(Color::LightCyan)),
                    Span::raw(" browse  "),
                    Span::styled("Enter", Style::default().fg(Color::LightYellow)),
                    Span::raw(" confirm  "),
                    Span::styled("Esc", Style::default().fg(Color::LightRed)),
                    Span::raw(" back"),
                ]),
            Mode::Creating(_) | Mode::Editing { .. } | Mode::SearchEntry(_) => spans.extend([
                Span::styled("Tab", Style::default().fg(Color::LightCyan)),
                Span::raw(" switch field  "),
                Span::styled("Enter", Style::default().fg(Color::LightYellow)),
                Span::raw(" save  "),
                Span::styled("Esc", Style::default().fg(Color::LightRed)),
                Span::raw(" cancel"),
            ]),
            Mode::ConfirmDelete { .. } => spans.extend([
                Span::styled("y/Enter", Style::default().fg(Color::LightRed)),
                Span::raw(" confirm  "),
                Span::styled("n/Esc", Style::default().fg(Color::LightGreen)),
                Span::raw(" cancel"),
            ]),
        }
        Line::from(spans)
    }

    fn draw_form(&self, f: &mut ratatui::Frame<'_>, title: &str, form: &EventForm) {
        let area = centered_rect(60, 40, f.size());
        let time_active = form.field == FormField::Time;
        let time_text = form.time.display();
        let lines = vec![
            Line::from(Span::styled(
                format!("Date: {}", calendar::format_date(self.nav.selection())),
                Style::default().fg(Color::Gray),
            )),
            Line::from(""),
            field_line("Time (HH:MM)", &time_text, time_active),
            Line::from(""),
            field_line(
                "Description",
                &if form.field == FormField::Description {
                    form.description.with_caret()
                } else {
                    form.description.value().to_string()
                },
                form.field == FormField::Description,
            ),
            Line::from(""),
            Line::from(Span::styled(
                "Enter to save • Esc to cancel • Tab to switch field",
                Style::default().fg(Color::Gray),
            )),
        ];
        let dialog = Paragraph::new(lines)
            .block(
                Block::default()
                    .title(Span::styled(
                        title.to_string(),
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .wrap(Wrap { trim: true });
        f.render_widget(Clear, area);
        f.render_widget(dialog, area);
    }

    fn draw_confirm(&self, f: &mut ratatui::Frame<'_>, event: &Event) {
        let area = centered_rect(50, 30, f.size());
        let body = vec![
            Line::from(Span::styled(
                format!("Delete {}  {}?", event.time_string(), event.description),
                Style::default()
                    .fg(Color::LightRed)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Press y or Enter to confirm, n or Esc to cancel"),
        ];
        let dialog = Paragraph::new(body).alignment(Alignment::Center).block(
            Block::default()
                .title(Span::styled(
                    "Confirm Delete",
                    Style::default()
                        .fg(Color::LightRed)
                        .add_modifier(Modifier::BOLD),
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::LightRed)),
        );
        f.render_widget(Clear, area);
        f.render_widget(dialog, area);
    }

    fn draw_search_prompt(&self, f: &mut ratatui::Frame<'_>, query: &TextField) {
        let area = centered_rect(60, 20, f.size());
        let lines = vec![
            field_line("Search", &query.with_caret(), true),
            Line::from(""),
            Line::from(Span::styled(
                "Enter to search • Esc to cancel",
                Style::default().fg(Color::Gray),
            )),
        ];
        let dialog = Paragraph::new(lines).block(
            Block::default()
                .title(Span::styled(
                    "Search Events",
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
        f.render_widget(Clear, area);
        f.render_widget(dialog, area);
    }
}

fn draw_search_results(
    f: &mut ratatui::Frame<'_>,
    query: &str,
    results: &[Event],
    selected: usize,
) {
    let area = centered_rect(70, 60, f.size());
    let items: Vec<ListItem<'static>> = if results.is_empty() {
        vec![ListItem::new("No matching events")]
    } else {
        results
            .iter()
            .map(|event| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        event.date_string(),
                        Style::default().fg(Color::LightYellow),
                    ),
                    Span::raw(" "),
                    Span::styled(event.time_string(), Style::default().fg(Color::Cyan)),
                    Span::raw("  "),
                    Span::styled(event.description.clone(), Style::default().fg(Color::White)),
                ]))
            })
            .collect()
    };
    let mut state = ListState::default();
    if !results.is_empty() {
        state.select(Some(selected.min(results.len() - 1)));
    }
    let list = List::new(items)
        .block(
            Block::default()
                .title(Span::styled(
                    format!("Search: \"{}\"", query),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::LightCyan)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(Clear, area);
    f.render_stateful_widget(list, area, &mut state);
}

fn event_list_item(event: &Event) -> ListItem<'static> {
    ListItem::new(Line::from(vec![
        Span::styled(
            event.time_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(event.description.clone(), Style::default().fg(Color::White)),
    ]))
}

fn field_line(label: &str, value: &str, active: bool) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{}: ", label),
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::BOLD | Modifier::DIM),
        ),
        Span::styled(
            value.to_string(),
            Style::default().fg(if active { Color::Cyan } else { Color::White }),
        ),
    ])
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn teardown_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ]
            .as_ref(),
        )
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ]
            .as_ref(),
        )
        .split(popup_layout[1])[1]
}
