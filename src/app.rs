//! Root application state and every transition the key handler can trigger.
//!
//! The four records (flags, UI, results, detail) are owned by [`App`] and only
//! change through its methods. Work that leaves the process (git calls,
//! clipboard writes) is queued as pending requests and drained by the event
//! loop, so every transition stays synchronous and testable.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::command::{self, CompiledCommand};
use crate::commit_line;
use crate::flags::{FlagControl, FlagDefinition, FlagState};
use crate::git_loader::GitResult;
use crate::keymap;
use crate::scroll::{self, SIDEBAR_MARGIN};
use crate::sidebar::{self, SidebarItem};

pub const SIDEBAR_WIDTH: u16 = 34;
pub const COMMAND_BAR_HEIGHT: u16 = 1;
pub const FOOTER_HEIGHT: u16 = 1;
pub const BORDER_TOTAL: u16 = 2;
pub const INPUT_BAR_HEIGHT: u16 = 3;
pub const HELP_MARGIN_V: u16 = 2;
pub const HELP_MARGIN_H: u16 = 5;

const STATUS_TTL: Duration = Duration::from_secs(2);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Main,
    Detail,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pane {
    Sidebar,
    Results,
}

/// Row capacity of each scrollable pane for the current terminal size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub sidebar_rows: usize,
    pub results_rows: usize,
    pub detail_rows: usize,
    pub help_rows: usize,
}

impl Viewport {
    pub fn for_terminal(height: u16) -> Self {
        let content = height.saturating_sub(COMMAND_BAR_HEIGHT + FOOTER_HEIGHT);
        let pane = content.saturating_sub(BORDER_TOTAL) as usize;
        Self {
            sidebar_rows: pane,
            results_rows: pane,
            detail_rows: height.saturating_sub(FOOTER_HEIGHT + BORDER_TOTAL) as usize,
            // One row at the bottom holds the close hint.
            help_rows: height.saturating_sub(2 * HELP_MARGIN_V + BORDER_TOTAL + 1) as usize,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UiState {
    pub view: View,
    pub sidebar_visible: bool,
    pub focused_pane: Pane,
    /// Focus to restore when the sidebar is shown again.
    pub hidden_focus: Option<Pane>,
    /// Dense selectable index into the sidebar controls.
    pub selected_flag: usize,
    pub sidebar_scroll: usize,
    pub selected_result: usize,
    pub results_scroll: usize,
    pub input_target: Option<&'static FlagDefinition>,
    pub input_value: String,
    pub show_help: bool,
    pub help_scroll: usize,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            view: View::Main,
            sidebar_visible: true,
            focused_pane: Pane::Sidebar,
            hidden_focus: None,
            selected_flag: 0,
            sidebar_scroll: 0,
            selected_result: 0,
            results_scroll: 0,
            input_target: None,
            input_value: String::new(),
            show_help: false,
            help_scroll: 0,
        }
    }
}

impl UiState {
    pub fn input_mode(&self) -> bool {
        self.input_target.is_some()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResultsState {
    pub output: String,
    pub lines: Vec<String>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Splits raw output into display lines, dropping trailing blank lines.
pub fn split_output_lines(output: &str) -> Vec<String> {
    let mut lines: Vec<String> = output.lines().map(str::to_string).collect();
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DetailState {
    pub commit_hash: Option<String>,
    pub output: String,
    pub lines: Vec<String>,
    pub scroll: usize,
}

/// A git call the event loop should start.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PendingFetch {
    Log { request_id: u64, args: Vec<String> },
    Show { request_id: u64, hash: String },
}

pub struct App {
    pub flags: FlagState,
    pub ui: UiState,
    pub results: ResultsState,
    pub detail: DetailState,
    pub viewport: Viewport,
    pub sidebar_items: Vec<SidebarItem>,
    pub command: CompiledCommand,
    pub status_message: Option<(String, Instant)>,
    pub should_quit: bool,
    next_request_id: u64,
    latest_log_request: u64,
    latest_show_request: u64,
    pending_fetches: Vec<PendingFetch>,
    pending_clipboard: Option<String>,
}

impl App {
    /// Fresh state with catalogue defaults; the first log fetch is queued.
    pub fn new(viewport: Viewport) -> Self {
        let flags = FlagState::default();
        let command = command::compile(&flags);
        let mut app = Self {
            flags,
            ui: UiState::default(),
            results: ResultsState::default(),
            detail: DetailState::default(),
            viewport,
            sidebar_items: sidebar::build_flat_list(),
            command,
            status_message: None,
            should_quit: false,
            next_request_id: 0,
            latest_log_request: 0,
            latest_show_request: 0,
            pending_fetches: Vec::new(),
            pending_clipboard: None,
        };
        app.request_log();
        app
    }

    pub fn selected_flag(&self) -> Option<&'static FlagDefinition> {
        sidebar::flag_at_selectable_index(self.ui.selected_flag)
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        if self.viewport == viewport {
            return;
        }
        self.viewport = viewport;
        self.sync_sidebar_scroll();
        self.sync_results_scroll();
        self.detail.scroll = self
            .detail
            .scroll
            .min(self.detail.lines.len().saturating_sub(viewport.detail_rows));
        self.ui.help_scroll = self.ui.help_scroll.min(self.max_help_scroll());
    }

    // ----- pending work -------------------------------------------------

    fn next_request_id(&mut self) -> u64 {
        self.next_request_id += 1;
        self.next_request_id
    }

    fn request_log(&mut self) {
        let request_id = self.next_request_id();
        self.latest_log_request = request_id;
        self.results.loading = true;
        self.results.error = None;
        let args = self.command.args.clone();
        debug!(request_id, ?args, "log fetch queued");
        self.pending_fetches
            .push(PendingFetch::Log { request_id, args });
    }

    pub fn take_pending_fetches(&mut self) -> Vec<PendingFetch> {
        std::mem::take(&mut self.pending_fetches)
    }

    pub fn request_copy_to_clipboard<S: Into<String>>(&mut self, text: S) {
        self.pending_clipboard = Some(text.into());
    }

    pub fn take_pending_clipboard(&mut self) -> Option<String> {
        self.pending_clipboard.take()
    }

    pub fn set_status<S: Into<String>>(&mut self, msg: S) {
        self.status_message = Some((msg.into(), Instant::now()));
    }

    pub fn maybe_expire_status(&mut self) -> bool {
        let should_clear = self
            .status_message
            .as_ref()
            .is_some_and(|(_, t)| t.elapsed() >= STATUS_TTL);
        if should_clear {
            self.status_message = None;
        }
        should_clear
    }

    // ----- flag mutation ------------------------------------------------

    /// Applies `edit` and, when the flags actually changed, recompiles the
    /// command and queues a fresh log fetch.
    pub fn update_flags<F: FnOnce(&mut FlagState)>(&mut self, edit: F) {
        let before = self.flags.clone();
        edit(&mut self.flags);
        if self.flags == before {
            return;
        }
        self.command = command::compile(&self.flags);
        self.request_log();
    }

    /// Space/Enter on the focused sidebar control.
    pub fn activate_selected_flag(&mut self) {
        let Some(def) = self.selected_flag() else {
            return;
        };
        debug!(id = def.id, kind = %def.kind(), "flag activated");
        match def.control {
            FlagControl::Toggle { flag, .. } => self.update_flags(|f| f.flip(flag)),
            FlagControl::Text(_) | FlagControl::Number(_) => self.begin_input(def),
            FlagControl::SingleSelect(select) => self.update_flags(|f| f.cycle(select)),
            FlagControl::MultiSelect(filter) => {
                self.update_flags(|f| f.diff_filter.toggle(filter))
            }
        }
    }

    pub fn clear_selected_flag(&mut self) {
        let Some(def) = self.selected_flag() else {
            return;
        };
        if def.is_editable() {
            self.update_flags(|f| {
                f.clear(def.control);
            });
        }
    }

    // ----- input editing ------------------------------------------------

    fn begin_input(&mut self, def: &'static FlagDefinition) {
        self.ui.input_target = Some(def);
        self.ui.input_value.clear();
        self.sync_sidebar_scroll();
    }

    pub fn input_push(&mut self, ch: char) {
        self.ui.input_value.push(ch);
    }

    pub fn input_backspace(&mut self) {
        self.ui.input_value.pop();
    }

    pub fn cancel_input(&mut self) {
        self.ui.input_target = None;
        self.ui.input_value.clear();
        self.sync_sidebar_scroll();
    }

    /// Commits the buffer to the edited entry. A number that does not parse
    /// is committed as absent.
    pub fn commit_input(&mut self) {
        let Some(def) = self.ui.input_target.take() else {
            return;
        };
        let value = std::mem::take(&mut self.ui.input_value);
        let value = value.trim();
        match def.control {
            FlagControl::Number(field) => {
                let parsed = value.parse::<u32>().ok();
                self.update_flags(|f| f.set_number(field, parsed));
            }
            FlagControl::Text(field) => {
                let text = (!value.is_empty()).then(|| value.to_string());
                self.update_flags(|f| f.set_text(field, text));
            }
            FlagControl::Toggle { .. }
            | FlagControl::SingleSelect(_)
            | FlagControl::MultiSelect(_) => {}
        }
        self.sync_sidebar_scroll();
    }

    // ----- sidebar and focus --------------------------------------------

    pub fn sidebar_capacity(&self) -> usize {
        let input = if self.ui.input_mode() {
            INPUT_BAR_HEIGHT as usize
        } else {
            0
        };
        self.viewport.sidebar_rows.saturating_sub(input)
    }

    pub fn sync_sidebar_scroll(&mut self) {
        let position = sidebar::position_of_selectable_index(&self.sidebar_items, self.ui.selected_flag);
        self.ui.sidebar_scroll = scroll::scroll_offset(
            self.sidebar_items.len(),
            self.sidebar_capacity(),
            position,
            self.ui.sidebar_scroll,
            SIDEBAR_MARGIN,
        );
    }

    pub fn move_flag_selection(&mut self, delta: isize) {
        let max = sidebar::selectable_count().saturating_sub(1);
        self.ui.selected_flag = self.ui.selected_flag.saturating_add_signed(delta).min(max);
        self.sync_sidebar_scroll();
    }

    /// Moves the selection to the first control of the next (or previous)
    /// section, wrapping around.
    pub fn jump_section(&mut self, forward: bool) {
        let current = sidebar::section_of_selectable_index(self.ui.selected_flag);
        let target = if forward { current.next() } else { current.prev() };
        self.ui.selected_flag = sidebar::first_selectable_index_of(target);
        self.sync_sidebar_scroll();
    }

    pub fn toggle_sidebar(&mut self) {
        if self.ui.sidebar_visible {
            self.hide_sidebar();
        } else {
            self.show_sidebar();
        }
    }

    fn hide_sidebar(&mut self) {
        if !self.ui.sidebar_visible {
            return;
        }
        self.ui.sidebar_visible = false;
        self.ui.hidden_focus = Some(self.ui.focused_pane);
        self.ui.focused_pane = Pane::Results;
    }

    fn show_sidebar(&mut self) {
        self.ui.sidebar_visible = true;
        if let Some(pane) = self.ui.hidden_focus.take() {
            self.ui.focused_pane = pane;
        }
    }

    pub fn focus_sidebar(&mut self) {
        if self.ui.sidebar_visible {
            self.ui.focused_pane = Pane::Sidebar;
        }
    }

    pub fn focus_results(&mut self) {
        self.ui.focused_pane = Pane::Results;
    }

    // ----- results ------------------------------------------------------

    fn sync_results_scroll(&mut self) {
        self.ui.results_scroll = scroll::scroll_offset(
            self.results.lines.len(),
            self.viewport.results_rows,
            self.ui.selected_result,
            self.ui.results_scroll,
            0,
        );
    }

    pub fn move_result_selection(&mut self, delta: isize) {
        let max = self.results.lines.len().saturating_sub(1);
        self.ui.selected_result = self.ui.selected_result.saturating_add_signed(delta).min(max);
        let visible = self.ui.results_scroll..self.ui.results_scroll + self.viewport.results_rows;
        if !visible.contains(&self.ui.selected_result) {
            self.sync_results_scroll();
        }
    }

    pub fn selected_result_line(&self) -> Option<&str> {
        self.results
            .lines
            .get(self.ui.selected_result)
            .map(String::as_str)
    }

    /// Enter on the results pane: queue `git show` for a commit line.
    pub fn open_selected_commit(&mut self) {
        let Some(hash) = self
            .selected_result_line()
            .and_then(commit_line::extract_commit_hash)
            .map(str::to_string)
        else {
            return;
        };
        let request_id = self.next_request_id();
        self.latest_show_request = request_id;
        debug!(request_id, %hash, "show fetch queued");
        self.pending_fetches
            .push(PendingFetch::Show { request_id, hash });
    }

    // ----- detail view --------------------------------------------------

    fn enter_detail(&mut self, hash: String, output: String) {
        self.hide_sidebar();
        self.ui.view = View::Detail;
        self.detail = DetailState {
            commit_hash: Some(hash),
            lines: output.lines().map(str::to_string).collect(),
            output,
            scroll: 0,
        };
    }

    pub fn exit_detail(&mut self) {
        self.ui.view = View::Main;
        self.show_sidebar();
    }

    pub fn scroll_detail_down(&mut self) {
        self.detail.scroll = scroll::scroll_down(
            self.detail.scroll,
            self.detail.lines.len(),
            self.viewport.detail_rows,
        );
    }

    pub fn scroll_detail_up(&mut self) {
        self.detail.scroll = scroll::scroll_up(self.detail.scroll);
    }

    pub fn yank_commit_hash(&mut self) {
        if let Some(hash) = self.detail.commit_hash.clone() {
            self.set_status(format!("Copied {}", hash));
            self.request_copy_to_clipboard(hash);
        }
    }

    pub fn yank_command(&mut self) {
        self.request_copy_to_clipboard(self.command.display.clone());
        self.set_status("Copied command");
    }

    // ----- help overlay -------------------------------------------------

    pub fn toggle_help(&mut self) {
        self.ui.show_help = !self.ui.show_help;
        if self.ui.show_help {
            self.ui.help_scroll = 0;
        }
    }

    fn max_help_scroll(&self) -> usize {
        keymap::help_line_count().saturating_sub(self.viewport.help_rows)
    }

    pub fn scroll_help(&mut self, delta: isize) {
        self.ui.help_scroll = self
            .ui
            .help_scroll
            .saturating_add_signed(delta)
            .min(self.max_help_scroll());
    }

    // ----- git results --------------------------------------------------

    pub fn handle_git_result(&mut self, result: GitResult) {
        match result {
            GitResult::Log { request_id, result } => {
                if request_id != self.latest_log_request {
                    debug!(request_id, latest = self.latest_log_request, "stale log result dropped");
                    return;
                }
                match result {
                    Ok(output) => {
                        info!(request_id, bytes = output.len(), "log loaded");
                        self.results = ResultsState {
                            lines: split_output_lines(&output),
                            output,
                            loading: false,
                            error: None,
                        };
                        self.ui.selected_result = 0;
                        self.ui.results_scroll = 0;
                    }
                    Err(e) => {
                        info!(request_id, error = %e, "log failed");
                        self.results.error = Some(e);
                        self.results.loading = false;
                    }
                }
            }
            GitResult::Show {
                request_id,
                hash,
                result,
            } => {
                if request_id != self.latest_show_request {
                    debug!(request_id, "stale show result dropped");
                    return;
                }
                match result {
                    Ok(output) => {
                        let browsing = self.ui.view == View::Main
                            && !self.ui.show_help
                            && !self.ui.input_mode();
                        if browsing {
                            self.enter_detail(hash, output);
                        } else {
                            debug!(%hash, "show result arrived outside main view; dropped");
                        }
                    }
                    Err(e) => {
                        info!(%hash, error = %e, "show failed");
                        self.results.error = Some(e);
                        self.results.loading = false;
                    }
                }
            }
            GitResult::Cancelled => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::{Section, TextField};

    fn app() -> App {
        App::new(Viewport::for_terminal(30))
    }

    fn load(app: &mut App, output: &str) {
        let request_id = app.latest_log_request;
        app.handle_git_result(GitResult::Log {
            request_id,
            result: Ok(output.to_string()),
        });
    }

    #[test]
    fn test_viewport_for_terminal() {
        let v = Viewport::for_terminal(30);
        assert_eq!(v.results_rows, 26);
        assert_eq!(v.sidebar_rows, 26);
        assert_eq!(v.detail_rows, 27);
        assert_eq!(v.help_rows, 23);
        assert_eq!(Viewport::for_terminal(0).results_rows, 0);
    }

    #[test]
    fn test_initial_fetch_is_queued() {
        let mut app = app();
        assert!(app.results.loading);
        let pending = app.take_pending_fetches();
        assert_eq!(
            pending,
            vec![PendingFetch::Log {
                request_id: 1,
                args: app.command.args.clone()
            }]
        );
        assert!(app.take_pending_fetches().is_empty());
    }

    #[test]
    fn test_split_output_drops_trailing_blank_lines() {
        assert_eq!(
            split_output_lines("a1b2c3d one\n\nb2c3d4e two\n\n\n"),
            vec!["a1b2c3d one", "", "b2c3d4e two"]
        );
        assert!(split_output_lines("").is_empty());
    }

    #[test]
    fn test_log_result_replaces_results() {
        let mut app = app();
        app.ui.selected_result = 3;
        app.ui.results_scroll = 2;
        load(&mut app, "a1b2c3d one\nb2c3d4e two\n");
        assert_eq!(app.results.lines.len(), 2);
        assert!(!app.results.loading);
        assert_eq!(app.results.error, None);
        assert_eq!(app.ui.selected_result, 0);
        assert_eq!(app.ui.results_scroll, 0);
    }

    #[test]
    fn test_log_error_keeps_stale_lines() {
        let mut app = app();
        load(&mut app, "a1b2c3d one\n");
        app.update_flags(|f| f.set_text(TextField::Since, Some("garbage".to_string())));
        assert!(app.results.loading);
        let request_id = app.latest_log_request;
        app.handle_git_result(GitResult::Log {
            request_id,
            result: Err("fatal: bad date".to_string()),
        });
        assert!(!app.results.loading);
        assert_eq!(app.results.error.as_deref(), Some("fatal: bad date"));
        assert_eq!(app.results.lines, vec!["a1b2c3d one"]);
    }

    #[test]
    fn test_stale_log_result_is_dropped() {
        let mut app = app();
        let first = app.latest_log_request;
        app.update_flags(|f| f.graph = true);
        app.handle_git_result(GitResult::Log {
            request_id: first,
            result: Ok("a1b2c3d stale\n".to_string()),
        });
        assert!(app.results.loading);
        assert!(app.results.lines.is_empty());
    }

    #[test]
    fn test_unchanged_edit_does_not_refetch() {
        let mut app = app();
        app.take_pending_fetches();
        app.update_flags(|f| f.author = None);
        assert!(app.take_pending_fetches().is_empty());
        app.update_flags(|f| f.all = true);
        assert_eq!(app.take_pending_fetches().len(), 1);
        assert!(app.command.display.contains("--all"));
    }

    #[test]
    fn test_jump_section_wraps() {
        let mut app = app();
        app.jump_section(false);
        assert_eq!(
            sidebar::section_of_selectable_index(app.ui.selected_flag),
            Section::DateFmt
        );
        app.jump_section(true);
        assert_eq!(app.ui.selected_flag, 0);
        app.jump_section(true);
        assert_eq!(app.ui.selected_flag, sidebar::first_selectable_index_of(Section::Filter));
    }

    #[test]
    fn test_sidebar_scroll_follows_selection() {
        let mut app = App::new(Viewport::for_terminal(14));
        let capacity = app.sidebar_capacity();
        for _ in 0..sidebar::selectable_count() {
            app.move_flag_selection(1);
            let pos = sidebar::position_of_selectable_index(&app.sidebar_items, app.ui.selected_flag);
            assert!(pos >= app.ui.sidebar_scroll && pos < app.ui.sidebar_scroll + capacity);
        }
        assert_eq!(app.ui.selected_flag, sidebar::selectable_count() - 1);
        assert_eq!(app.ui.sidebar_scroll, app.sidebar_items.len() - capacity);
    }

    #[test]
    fn test_results_scroll_keeps_selection_visible() {
        let mut app = App::new(Viewport::for_terminal(10));
        let output: String = (0..40).map(|i| format!("{:07x} commit {}\n", i + 0xa000000, i)).collect();
        load(&mut app, &output);
        let rows = app.viewport.results_rows;
        for _ in 0..rows {
            app.move_result_selection(1);
        }
        assert_eq!(app.ui.selected_result, rows);
        assert_eq!(app.ui.results_scroll, 1);
        app.move_result_selection(-1);
        assert_eq!(app.ui.results_scroll, 1);
    }

    #[test]
    fn test_show_result_outside_main_is_dropped() {
        let mut app = app();
        load(&mut app, "a1b2c3d one\n");
        app.ui.focused_pane = Pane::Results;
        app.open_selected_commit();
        app.toggle_help();
        let request_id = app.latest_show_request;
        app.handle_git_result(GitResult::Show {
            request_id,
            hash: "a1b2c3d".to_string(),
            result: Ok("commit a1b2c3d".to_string()),
        });
        assert_eq!(app.ui.view, View::Main);
        assert!(app.ui.show_help);
    }

    #[test]
    fn test_show_error_surfaces_in_results() {
        let mut app = app();
        load(&mut app, "a1b2c3d one\n");
        app.open_selected_commit();
        let request_id = app.latest_show_request;
        app.handle_git_result(GitResult::Show {
            request_id,
            hash: "a1b2c3d".to_string(),
            result: Err("fatal: bad object".to_string()),
        });
        assert_eq!(app.ui.view, View::Main);
        assert_eq!(app.results.error.as_deref(), Some("fatal: bad object"));
    }

    #[test]
    fn test_help_scroll_resets_on_open() {
        let mut app = App::new(Viewport::for_terminal(12));
        app.toggle_help();
        app.scroll_help(100);
        assert_eq!(app.ui.help_scroll, keymap::help_line_count() - app.viewport.help_rows);
        app.toggle_help();
        app.toggle_help();
        assert_eq!(app.ui.help_scroll, 0);
    }
}
