#![forbid(unsafe_code)]

//! Headless command palette.
//!
//! The palette owns an input line and a ranked option list. Every input
//! change starts a new request and asks each [`CommandSource`] for hits;
//! hits tagged with an older request are dropped, so a slow source can never
//! repopulate the list for text the user has already replaced.
//!
//! # Usage
//!
//! ```
//! use trellis_palette::{CommandPalette, PaletteAction, PaletteKey, StaticSource};
//!
//! let mut palette = CommandPalette::new();
//! palette.add_source(StaticSource::new(["Open File", "Save File", "Quit"]));
//!
//! palette.set_input("fil");
//! assert!(palette.is_list_visible());
//! assert_eq!(palette.options().len(), 2);
//!
//! palette.handle_key(PaletteKey::Down);
//! let action = palette.handle_key(PaletteKey::Enter);
//! assert_eq!(action, Some(PaletteAction::Execute("Save File".into())));
//! assert_eq!(palette.input(), "Save File");
//! assert!(!palette.is_list_visible());
//! ```
//!
//! # Submodules
//!
//! - [`matcher`]: case-insensitive scoring of a query against one candidate
//! - [`source`]: the [`CommandSource`] trait and a static phrase source

pub mod matcher;
pub mod source;

pub use matcher::{Match, MatchKind, Matcher};
pub use source::{CommandSource, Hit, PROVERBS, StaticSource};

use trellis_core::{debug, debug_span, trace};

// ---------------------------------------------------------------------------
// Actions and Keys
// ---------------------------------------------------------------------------

/// Outcome of a palette interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteAction {
    /// The user chose a command (its text).
    Execute(String),
    /// The user dismissed the palette.
    Dismiss,
}

/// Keys the palette binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaletteKey {
    /// Move the highlight down one option.
    Down,
    /// Move the highlight up one option.
    Up,
    /// Move the highlight down one page.
    PageDown,
    /// Move the highlight up one page.
    PageUp,
    /// Choose the highlighted option.
    Enter,
    /// Dismiss the palette.
    Escape,
}

/// Identifies one hunt. Hits delivered under any other id are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RequestId(u64);

impl RequestId {
    /// The raw counter value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Palette tuning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteConfig {
    /// Options skipped by a page up/down.
    pub page_size: usize,
    /// Options kept after ranking; lower-ranked hits are discarded.
    pub max_options: usize,
    /// Text shown while the input is empty.
    pub placeholder: String,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            max_options: 100,
            placeholder: "Search for commands".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Command Palette
// ---------------------------------------------------------------------------

/// Input line plus ranked command options.
///
/// # Invariants
///
/// 1. The list is visible only while the trimmed input is non-empty and no
///    option has been chosen since the last edit.
/// 2. `highlighted` is `None` exactly when `options` is empty, and otherwise
///    indexes into it.
/// 3. Options are sorted by descending score, ties by command text, and
///    never exceed `max_options`.
pub struct CommandPalette {
    config: PaletteConfig,
    sources: Vec<Box<dyn CommandSource>>,
    input: String,
    options: Vec<Hit>,
    highlighted: Option<usize>,
    list_visible: bool,
    current: RequestId,
}

impl std::fmt::Debug for CommandPalette {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandPalette")
            .field("config", &self.config)
            .field("sources", &self.sources.len())
            .field("input", &self.input)
            .field("options", &self.options)
            .field("highlighted", &self.highlighted)
            .field("list_visible", &self.list_visible)
            .field("current", &self.current)
            .finish()
    }
}

impl Default for CommandPalette {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandPalette {
    /// Create a palette with no sources and the default configuration.
    pub fn new() -> Self {
        Self::with_config(PaletteConfig::default())
    }

    /// Create a palette with `config`.
    pub fn with_config(config: PaletteConfig) -> Self {
        Self {
            config,
            sources: Vec::new(),
            input: String::new(),
            options: Vec::new(),
            highlighted: None,
            list_visible: false,
            current: RequestId::default(),
        }
    }

    /// Register a source consulted on every input change.
    pub fn add_source(&mut self, source: impl CommandSource + 'static) -> &mut Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Builder form of [`add_source`](Self::add_source).
    #[must_use]
    pub fn with_source(mut self, source: impl CommandSource + 'static) -> Self {
        self.add_source(source);
        self
    }

    // --- Accessors ---

    /// Active configuration.
    pub fn config(&self) -> &PaletteConfig {
        &self.config
    }

    /// Placeholder text for an empty input.
    pub fn placeholder(&self) -> &str {
        &self.config.placeholder
    }

    /// Current input text, untrimmed.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Whether the option list is shown.
    pub fn is_list_visible(&self) -> bool {
        self.list_visible
    }

    /// Ranked options for the current request.
    pub fn options(&self) -> &[Hit] {
        &self.options
    }

    /// Index of the highlighted option.
    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// The highlighted option.
    pub fn highlighted_option(&self) -> Option<&Hit> {
        self.highlighted.and_then(|i| self.options.get(i))
    }

    /// Id of the request whose hits are currently accepted.
    pub fn current_request(&self) -> RequestId {
        self.current
    }

    // --- Input ---

    /// Replace the input text and hunt for matching commands.
    ///
    /// Clears the options and starts a new request even when the trimmed
    /// text is empty, so hits still in flight for the old text are dropped.
    /// Registered sources are hunted immediately; the returned id lets other
    /// producers [`deliver`](Self::deliver) hits for this input later.
    pub fn set_input(&mut self, text: &str) -> RequestId {
        self.input.clear();
        self.input.push_str(text);
        self.options.clear();
        self.highlighted = None;
        let request = self.next_request();

        let query = text.trim();
        self.list_visible = !query.is_empty();
        if !self.list_visible {
            return request;
        }

        let span = debug_span!(
            "palette_hunt",
            request = request.get(),
            query_len = query.len(),
            sources = self.sources.len()
        );
        let _guard = span.enter();

        let mut hits = Vec::new();
        for source in &self.sources {
            source.hunt(query, &mut hits);
        }
        self.deliver(request, hits);
        request
    }

    /// Add hits produced for `request`.
    ///
    /// Returns `false` and leaves the options untouched when `request` is
    /// stale.
    pub fn deliver(&mut self, request: RequestId, hits: Vec<Hit>) -> bool {
        if request != self.current {
            debug!(
                stale = request.get(),
                current = self.current.get(),
                dropped = hits.len(),
                "dropping stale palette hits"
            );
            return false;
        }

        let keep = self
            .highlighted_option()
            .map(|hit| hit.command.clone());

        self.options.extend(hits);
        self.options.sort_by(Hit::rank);
        self.options.truncate(self.config.max_options);

        self.highlighted = if self.options.is_empty() {
            None
        } else {
            keep.and_then(|command| self.options.iter().position(|h| h.command == command))
                .or(Some(0))
        };
        trace!(options = self.options.len(), "palette options updated");
        true
    }

    // --- Navigation ---

    /// Dispatch a bound key.
    pub fn handle_key(&mut self, key: PaletteKey) -> Option<PaletteAction> {
        match key {
            PaletteKey::Down => self.cursor_down(),
            PaletteKey::Up => self.cursor_up(),
            PaletteKey::PageDown => self.page_down(),
            PaletteKey::PageUp => self.page_up(),
            PaletteKey::Enter => return self.select(),
            PaletteKey::Escape => return Some(self.escape()),
        }
        None
    }

    /// Highlight the next option, stopping at the last.
    pub fn cursor_down(&mut self) {
        self.move_highlight(|i, last, _| (i + 1).min(last));
    }

    /// Highlight the previous option, stopping at the first.
    pub fn cursor_up(&mut self) {
        self.move_highlight(|i, _, _| i.saturating_sub(1));
    }

    /// Move the highlight down by a page.
    pub fn page_down(&mut self) {
        self.move_highlight(|i, last, page| i.saturating_add(page).min(last));
    }

    /// Move the highlight up by a page.
    pub fn page_up(&mut self) {
        self.move_highlight(|i, _, page| i.saturating_sub(page));
    }

    fn move_highlight(&mut self, step: impl Fn(usize, usize, usize) -> usize) {
        if !self.list_visible {
            return;
        }
        if let (Some(i), Some(last)) = (self.highlighted, self.options.len().checked_sub(1)) {
            self.highlighted = Some(step(i, last, self.config.page_size.max(1)));
        }
    }

    /// Choose the highlighted option.
    ///
    /// Writes the command into the input without starting a hunt, hides the
    /// list, and returns [`PaletteAction::Execute`]. Returns `None` when the
    /// list is hidden or empty.
    pub fn select(&mut self) -> Option<PaletteAction> {
        if !self.list_visible {
            return None;
        }
        let command = self.highlighted_option()?.command.clone();
        debug!(command = %command, "palette command selected");

        self.input.clone_from(&command);
        self.list_visible = false;
        self.next_request();
        Some(PaletteAction::Execute(command))
    }

    /// Dismiss the palette.
    pub fn escape(&mut self) -> PaletteAction {
        self.list_visible = false;
        self.next_request();
        PaletteAction::Dismiss
    }

    fn next_request(&mut self) -> RequestId {
        self.current = RequestId(self.current.0.wrapping_add(1));
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette(phrases: &[&str]) -> CommandPalette {
        CommandPalette::new().with_source(StaticSource::new(phrases.iter().copied()))
    }

    fn commands(p: &CommandPalette) -> Vec<&str> {
        p.options().iter().map(|h| h.command.as_str()).collect()
    }

    fn hit(score: f64, command: &str) -> Hit {
        Hit {
            score,
            command: command.into(),
            highlights: Vec::new(),
        }
    }

    // --- Visibility ---

    #[test]
    fn starts_hidden_and_empty() {
        let p = CommandPalette::new();
        assert!(!p.is_list_visible());
        assert!(p.options().is_empty());
        assert_eq!(p.highlighted(), None);
        assert_eq!(p.placeholder(), "Search for commands");
    }

    #[test]
    fn blank_input_hides_list() {
        let mut p = palette(&["Open File"]);
        p.set_input("open");
        assert!(p.is_list_visible());
        p.set_input("   ");
        assert!(!p.is_list_visible());
        assert!(p.options().is_empty());
        assert_eq!(p.input(), "   ");
    }

    #[test]
    fn input_is_trimmed_for_hunting() {
        let mut p = palette(&["Open File", "Quit"]);
        p.set_input("  quit  ");
        assert_eq!(commands(&p), vec!["Quit"]);
        assert_eq!(p.options()[0].highlights, vec![0..4]);
    }

    #[test]
    fn no_matches_keeps_list_visible_but_empty() {
        let mut p = palette(&["Open File"]);
        p.set_input("zzz");
        assert!(p.is_list_visible());
        assert!(p.options().is_empty());
        assert_eq!(p.highlighted(), None);
    }

    // --- Ranking ---

    #[test]
    fn options_ranked_by_score() {
        let mut p = palette(&["Asset Manager", "Settings", "Set"]);
        p.set_input("set");
        assert_eq!(commands(&p), vec!["Set", "Settings", "Asset Manager"]);
        assert_eq!(p.highlighted(), Some(0));
    }

    #[test]
    fn max_options_truncates() {
        let config = PaletteConfig {
            max_options: 2,
            ..PaletteConfig::default()
        };
        let mut p = CommandPalette::with_config(config)
            .with_source(StaticSource::new(["aa", "ab", "ac", "ad"]));
        p.set_input("a");
        assert_eq!(p.options().len(), 2);
    }

    #[test]
    fn multiple_sources_merge() {
        let mut p = palette(&["Open File"]);
        p.add_source(StaticSource::new(["Open Folder"]));
        p.set_input("open f");
        assert_eq!(commands(&p), vec!["Open File", "Open Folder"]);
    }

    #[test]
    fn proverbs_source_feeds_palette() {
        let mut p = CommandPalette::new().with_source(StaticSource::proverbs());
        p.set_input("never");
        assert!(!p.options().is_empty());
        let matcher = Matcher::new("never");
        assert!(p.options().iter().all(|h| matcher.matches(&h.command)));
        assert!(
            p.options()
                .windows(2)
                .all(|w| w[0].score >= w[1].score)
        );
    }

    // --- Requests ---

    #[test]
    fn stale_hits_are_dropped() {
        let mut p = CommandPalette::new();
        let old = p.set_input("a");
        let new = p.set_input("b");
        assert_ne!(old, new);

        assert!(!p.deliver(old, vec![hit(0.9, "stale")]));
        assert!(p.options().is_empty());

        assert!(p.deliver(new, vec![hit(0.5, "fresh")]));
        assert_eq!(commands(&p), vec!["fresh"]);
    }

    #[test]
    fn clearing_input_invalidates_pending_request() {
        let mut p = CommandPalette::new();
        let pending = p.set_input("a");
        p.set_input("");
        assert!(!p.deliver(pending, vec![hit(0.9, "late")]));
        assert!(p.options().is_empty());
    }

    #[test]
    fn late_delivery_merges_and_keeps_highlight() {
        let mut p = CommandPalette::new();
        let req = p.set_input("x");
        p.deliver(req, vec![hit(0.5, "b"), hit(0.4, "c")]);
        p.cursor_down();
        assert_eq!(p.highlighted_option().map(|h| h.command.as_str()), Some("c"));

        p.deliver(req, vec![hit(0.9, "a")]);
        assert_eq!(commands(&p), vec!["a", "b", "c"]);
        assert_eq!(p.highlighted_option().map(|h| h.command.as_str()), Some("c"));
    }

    // --- Navigation ---

    #[test]
    fn cursor_clamps_at_ends() {
        let mut p = CommandPalette::new();
        let req = p.set_input("x");
        p.deliver(req, vec![hit(0.9, "a"), hit(0.8, "b"), hit(0.7, "c")]);

        p.cursor_up();
        assert_eq!(p.highlighted(), Some(0));
        p.cursor_down();
        p.cursor_down();
        p.cursor_down();
        assert_eq!(p.highlighted(), Some(2));
        p.cursor_up();
        assert_eq!(p.highlighted(), Some(1));
    }

    #[test]
    fn paging_moves_by_page_size() {
        let config = PaletteConfig {
            page_size: 3,
            ..PaletteConfig::default()
        };
        let mut p = CommandPalette::with_config(config);
        let req = p.set_input("x");
        let hits = (0..8).map(|i| hit(1.0 - f64::from(i) * 0.1, &format!("c{i}")));
        p.deliver(req, hits.collect());

        p.page_down();
        assert_eq!(p.highlighted(), Some(3));
        p.page_down();
        p.page_down();
        assert_eq!(p.highlighted(), Some(7));
        p.page_up();
        assert_eq!(p.highlighted(), Some(4));
        p.page_up();
        p.page_up();
        assert_eq!(p.highlighted(), Some(0));
    }

    #[test]
    fn navigation_ignored_when_hidden_or_empty() {
        let mut p = CommandPalette::new();
        p.cursor_down();
        p.page_down();
        assert_eq!(p.highlighted(), None);

        p.set_input("x");
        p.cursor_down();
        assert_eq!(p.highlighted(), None);
    }

    // --- Selection ---

    #[test]
    fn select_writes_input_and_hides_list() {
        let mut p = palette(&["Open File", "Save File"]);
        p.set_input("file");
        p.cursor_down();
        let action = p.select();
        assert_eq!(action, Some(PaletteAction::Execute("Save File".into())));
        assert_eq!(p.input(), "Save File");
        assert!(!p.is_list_visible());
        // Options are not re-hunted for the written text.
        assert_eq!(commands(&p), vec!["Open File", "Save File"]);
    }

    #[test]
    fn select_drops_pending_hits() {
        let mut p = CommandPalette::new();
        let req = p.set_input("x");
        p.deliver(req, vec![hit(0.5, "a")]);
        p.select();
        assert!(!p.deliver(req, vec![hit(0.9, "late")]));
    }

    #[test]
    fn select_without_options_is_none() {
        let mut p = CommandPalette::new();
        assert_eq!(p.select(), None);
        p.set_input("x");
        assert_eq!(p.select(), None);
        assert_eq!(p.input(), "x");
    }

    #[test]
    fn escape_dismisses() {
        let mut p = palette(&["Quit"]);
        p.set_input("q");
        assert_eq!(p.handle_key(PaletteKey::Escape), Some(PaletteAction::Dismiss));
        assert!(!p.is_list_visible());
    }

    #[test]
    fn key_bindings_dispatch() {
        let mut p = palette(&["a1", "a2", "a3"]);
        p.set_input("a");
        assert_eq!(p.handle_key(PaletteKey::Down), None);
        assert_eq!(p.handle_key(PaletteKey::PageDown), None);
        assert_eq!(p.highlighted(), Some(2));
        assert_eq!(p.handle_key(PaletteKey::Up), None);
        assert_eq!(p.handle_key(PaletteKey::PageUp), None);
        assert_eq!(p.highlighted(), Some(0));
        assert_eq!(
            p.handle_key(PaletteKey::Enter),
            Some(PaletteAction::Execute("a1".into()))
        );
    }
}
