//! Flag catalogue and the typed record of current flag values.
//!
//! The catalogue is the single ordered source for the sidebar, the section
//! navigation order and the command compiler. Every entry carries a closed
//! [`FlagControl`] that ties it to exactly one field of [`FlagState`].

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    Format,
    Filter,
    Search,
    Date,
    Diff,
    Order,
    DateFmt,
}

impl Section {
    /// Sidebar grouping order, also the cycle used by `[` and `]`.
    pub const ALL: [Section; 7] = [
        Section::Format,
        Section::Filter,
        Section::Search,
        Section::Date,
        Section::Diff,
        Section::Order,
        Section::DateFmt,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Section::Format => "FORMAT",
            Section::Filter => "FILTER",
            Section::Search => "SEARCH",
            Section::Date => "DATE",
            Section::Diff => "DIFF",
            Section::Order => "ORDER",
            Section::DateFmt => "DATE FMT",
        }
    }

    pub fn index(self) -> usize {
        Section::ALL
            .iter()
            .position(|s| *s == self)
            .unwrap_or(0)
    }

    pub fn next(self) -> Section {
        Section::ALL[(self.index() + 1) % Section::ALL.len()]
    }

    pub fn prev(self) -> Section {
        let len = Section::ALL.len();
        Section::ALL[(self.index() + len - 1) % len]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Toggle {
    Oneline,
    Graph,
    Decorate,
    Stat,
    Shortstat,
    NameOnly,
    NameStatus,
    AbbrevCommit,
    NoMerges,
    Merges,
    FirstParent,
    Reverse,
    All,
    Follow,
}

impl Toggle {
    /// The literal argument this toggle contributes when on.
    pub fn arg(self) -> &'static str {
        match self {
            Toggle::Oneline => "--oneline",
            Toggle::Graph => "--graph",
            Toggle::Decorate => "--decorate",
            Toggle::Stat => "--stat",
            Toggle::Shortstat => "--shortstat",
            Toggle::NameOnly => "--name-only",
            Toggle::NameStatus => "--name-status",
            Toggle::AbbrevCommit => "--abbrev-commit",
            Toggle::NoMerges => "--no-merges",
            Toggle::Merges => "--merges",
            Toggle::FirstParent => "--first-parent",
            Toggle::Reverse => "--reverse",
            Toggle::All => "--all",
            Toggle::Follow => "--follow",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextField {
    Author,
    Committer,
    Grep,
    PickaxeS,
    PickaxeG,
    Path,
    Since,
    Until,
}

/// How a text value is spelled on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Spelling {
    /// `--name=value`, one argument.
    Assign(&'static str),
    /// `-X value`, two arguments.
    Separate(&'static str),
    /// `-- value`, always emitted last.
    Trailing,
}

impl TextField {
    pub fn spelling(self) -> Spelling {
        match self {
            TextField::Author => Spelling::Assign("--author"),
            TextField::Committer => Spelling::Assign("--committer"),
            TextField::Grep => Spelling::Assign("--grep"),
            TextField::PickaxeS => Spelling::Separate("-S"),
            TextField::PickaxeG => Spelling::Separate("-G"),
            TextField::Path => Spelling::Trailing,
            TextField::Since => Spelling::Assign("--since"),
            TextField::Until => Spelling::Assign("--until"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NumberField {
    MaxCount,
}

impl NumberField {
    pub fn arg(self) -> &'static str {
        match self {
            NumberField::MaxCount => "-n",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Select {
    Order,
    DateFormat,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OrderType {
    #[default]
    Default,
    Date,
    AuthorDate,
    Topo,
}

impl OrderType {
    pub const CYCLE: [OrderType; 4] = [
        OrderType::Default,
        OrderType::Date,
        OrderType::AuthorDate,
        OrderType::Topo,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OrderType::Default => "default",
            OrderType::Date => "date",
            OrderType::AuthorDate => "author-date",
            OrderType::Topo => "topo",
        }
    }

    pub fn next(self) -> OrderType {
        let i = OrderType::CYCLE.iter().position(|o| *o == self).unwrap_or(0);
        OrderType::CYCLE[(i + 1) % OrderType::CYCLE.len()]
    }

    /// `--<value>-order`, or nothing for the default order.
    pub fn arg(self) -> Option<String> {
        match self {
            OrderType::Default => None,
            other => Some(format!("--{}-order", other.as_str())),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DateFormat {
    #[default]
    Default,
    Relative,
    Short,
    Human,
}

impl DateFormat {
    pub const CYCLE: [DateFormat; 4] = [
        DateFormat::Default,
        DateFormat::Relative,
        DateFormat::Short,
        DateFormat::Human,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DateFormat::Default => "default",
            DateFormat::Relative => "relative",
            DateFormat::Short => "short",
            DateFormat::Human => "human",
        }
    }

    pub fn next(self) -> DateFormat {
        let i = DateFormat::CYCLE
            .iter()
            .position(|d| *d == self)
            .unwrap_or(0);
        DateFormat::CYCLE[(i + 1) % DateFormat::CYCLE.len()]
    }

    pub fn arg(self) -> Option<String> {
        match self {
            DateFormat::Default => None,
            other => Some(format!("--date={}", other.as_str())),
        }
    }
}

/// One letter of the `--diff-filter` alphabet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiffFilter {
    Added,
    Deleted,
    Modified,
    Renamed,
}

impl DiffFilter {
    /// Canonical emission order.
    pub const ALL: [DiffFilter; 4] = [
        DiffFilter::Added,
        DiffFilter::Deleted,
        DiffFilter::Modified,
        DiffFilter::Renamed,
    ];

    pub fn letter(self) -> char {
        match self {
            DiffFilter::Added => 'A',
            DiffFilter::Deleted => 'D',
            DiffFilter::Modified => 'M',
            DiffFilter::Renamed => 'R',
        }
    }

    fn bit(self) -> u8 {
        match self {
            DiffFilter::Added => 1,
            DiffFilter::Deleted => 1 << 1,
            DiffFilter::Modified => 1 << 2,
            DiffFilter::Renamed => 1 << 3,
        }
    }
}

/// Set over the four diff-filter letters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DiffFilterSet(u8);

impl DiffFilterSet {
    pub fn contains(self, filter: DiffFilter) -> bool {
        self.0 & filter.bit() != 0
    }

    pub fn toggle(&mut self, filter: DiffFilter) {
        self.0 ^= filter.bit();
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = DiffFilter> {
        DiffFilter::ALL.into_iter().filter(move |f| self.contains(*f))
    }

    /// Member letters in alphabet order, e.g. `"AM"`.
    pub fn letters(self) -> String {
        self.iter().map(DiffFilter::letter).collect()
    }
}

/// Closed set of control kinds; each variant names the state field it edits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlagControl {
    Toggle { flag: Toggle, default: bool },
    Text(TextField),
    Number(NumberField),
    SingleSelect(Select),
    MultiSelect(DiffFilter),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlagKind {
    Toggle,
    Text,
    Number,
    SingleSelect,
    MultiSelect,
}

impl fmt::Display for FlagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FlagKind::Toggle => "toggle",
            FlagKind::Text => "text",
            FlagKind::Number => "number",
            FlagKind::SingleSelect => "single-select",
            FlagKind::MultiSelect => "multi-select",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlagDefinition {
    pub id: &'static str,
    pub label: &'static str,
    pub section: Section,
    pub placeholder: Option<&'static str>,
    pub control: FlagControl,
}

impl FlagDefinition {
    pub fn kind(&self) -> FlagKind {
        match self.control {
            FlagControl::Toggle { .. } => FlagKind::Toggle,
            FlagControl::Text(_) => FlagKind::Text,
            FlagControl::Number(_) => FlagKind::Number,
            FlagControl::SingleSelect(_) => FlagKind::SingleSelect,
            FlagControl::MultiSelect(_) => FlagKind::MultiSelect,
        }
    }

    pub fn is_editable(&self) -> bool {
        matches!(self.control, FlagControl::Text(_) | FlagControl::Number(_))
    }
}

const fn toggle(
    id: &'static str,
    label: &'static str,
    section: Section,
    flag: Toggle,
    default: bool,
) -> FlagDefinition {
    FlagDefinition {
        id,
        label,
        section,
        placeholder: None,
        control: FlagControl::Toggle { flag, default },
    }
}

const fn text(
    id: &'static str,
    label: &'static str,
    section: Section,
    field: TextField,
    placeholder: &'static str,
) -> FlagDefinition {
    FlagDefinition {
        id,
        label,
        section,
        placeholder: Some(placeholder),
        control: FlagControl::Text(field),
    }
}

const fn diff(id: &'static str, label: &'static str, filter: DiffFilter) -> FlagDefinition {
    FlagDefinition {
        id,
        label,
        section: Section::Diff,
        placeholder: None,
        control: FlagControl::MultiSelect(filter),
    }
}

pub static CATALOGUE: [FlagDefinition; 29] = [
    toggle("oneline", "--oneline", Section::Format, Toggle::Oneline, true),
    toggle("graph", "--graph", Section::Format, Toggle::Graph, false),
    toggle("decorate", "--decorate", Section::Format, Toggle::Decorate, true),
    toggle("stat", "--stat", Section::Format, Toggle::Stat, false),
    toggle("shortstat", "--shortstat", Section::Format, Toggle::Shortstat, false),
    toggle("nameOnly", "--name-only", Section::Format, Toggle::NameOnly, false),
    toggle("nameStatus", "--name-status", Section::Format, Toggle::NameStatus, false),
    toggle("abbrevCommit", "--abbrev-commit", Section::Format, Toggle::AbbrevCommit, true),
    toggle("noMerges", "--no-merges", Section::Filter, Toggle::NoMerges, false),
    toggle("merges", "--merges", Section::Filter, Toggle::Merges, false),
    toggle("firstParent", "--first-parent", Section::Filter, Toggle::FirstParent, false),
    toggle("reverse", "--reverse", Section::Filter, Toggle::Reverse, false),
    toggle("all", "--all", Section::Filter, Toggle::All, false),
    toggle("follow", "--follow", Section::Filter, Toggle::Follow, false),
    text("author", "--author=", Section::Search, TextField::Author, "author name or email"),
    text(
        "committer",
        "--committer=",
        Section::Search,
        TextField::Committer,
        "committer name or email",
    ),
    text("grep", "--grep=", Section::Search, TextField::Grep, "commit message pattern"),
    text("pickaxeS", "-S", Section::Search, TextField::PickaxeS, "string to search in diff"),
    text("pickaxeG", "-G", Section::Search, TextField::PickaxeG, "regex to search in diff"),
    text("path", "-- <path>", Section::Search, TextField::Path, "file or directory path"),
    text("since", "--since=", Section::Date, TextField::Since, "1 week ago, 2024-01-01"),
    text("until", "--until=", Section::Date, TextField::Until, "yesterday, 2024-12-31"),
    FlagDefinition {
        id: "maxCount",
        label: "-n",
        section: Section::Date,
        placeholder: Some("number of commits"),
        control: FlagControl::Number(NumberField::MaxCount),
    },
    diff("diffFilterA", "Added (A)", DiffFilter::Added),
    diff("diffFilterD", "Deleted (D)", DiffFilter::Deleted),
    diff("diffFilterM", "Modified (M)", DiffFilter::Modified),
    diff("diffFilterR", "Renamed (R)", DiffFilter::Renamed),
    FlagDefinition {
        id: "order",
        label: "Sort order",
        section: Section::Order,
        placeholder: None,
        control: FlagControl::SingleSelect(Select::Order),
    },
    FlagDefinition {
        id: "dateFormat",
        label: "Date format",
        section: Section::DateFmt,
        placeholder: None,
        control: FlagControl::SingleSelect(Select::DateFormat),
    },
];

pub fn all_flags() -> &'static [FlagDefinition] {
    &CATALOGUE
}

pub fn flags_in_section(section: Section) -> impl Iterator<Item = &'static FlagDefinition> {
    CATALOGUE.iter().filter(move |f| f.section == section)
}

#[cfg(test)]
pub fn find_flag(id: &str) -> Option<&'static FlagDefinition> {
    CATALOGUE.iter().find(|f| f.id == id)
}

/// Current value of every catalogue entry.
///
/// The four diff-filter entries share the single `diff_filter` set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlagState {
    pub oneline: bool,
    pub graph: bool,
    pub decorate: bool,
    pub stat: bool,
    pub shortstat: bool,
    pub name_only: bool,
    pub name_status: bool,
    pub abbrev_commit: bool,
    pub no_merges: bool,
    pub merges: bool,
    pub first_parent: bool,
    pub reverse: bool,
    pub all: bool,
    pub follow: bool,
    pub author: Option<String>,
    pub committer: Option<String>,
    pub grep: Option<String>,
    pub pickaxe_s: Option<String>,
    pub pickaxe_g: Option<String>,
    pub path: Option<String>,
    pub since: Option<String>,
    pub until: Option<String>,
    pub max_count: Option<u32>,
    pub order: OrderType,
    pub date_format: DateFormat,
    pub diff_filter: DiffFilterSet,
}

impl Default for FlagState {
    fn default() -> Self {
        let mut state = Self {
            oneline: false,
            graph: false,
            decorate: false,
            stat: false,
            shortstat: false,
            name_only: false,
            name_status: false,
            abbrev_commit: false,
            no_merges: false,
            merges: false,
            first_parent: false,
            reverse: false,
            all: false,
            follow: false,
            author: None,
            committer: None,
            grep: None,
            pickaxe_s: None,
            pickaxe_g: None,
            path: None,
            since: None,
            until: None,
            max_count: None,
            order: OrderType::Default,
            date_format: DateFormat::Default,
            diff_filter: DiffFilterSet::default(),
        };
        for def in all_flags() {
            if let FlagControl::Toggle { flag, default } = def.control {
                state.set_toggle(flag, default);
            }
        }
        state
    }
}

impl FlagState {
    pub fn toggle(&self, flag: Toggle) -> bool {
        match flag {
            Toggle::Oneline => self.oneline,
            Toggle::Graph => self.graph,
            Toggle::Decorate => self.decorate,
            Toggle::Stat => self.stat,
            Toggle::Shortstat => self.shortstat,
            Toggle::NameOnly => self.name_only,
            Toggle::NameStatus => self.name_status,
            Toggle::AbbrevCommit => self.abbrev_commit,
            Toggle::NoMerges => self.no_merges,
            Toggle::Merges => self.merges,
            Toggle::FirstParent => self.first_parent,
            Toggle::Reverse => self.reverse,
            Toggle::All => self.all,
            Toggle::Follow => self.follow,
        }
    }

    fn toggle_mut(&mut self, flag: Toggle) -> &mut bool {
        match flag {
            Toggle::Oneline => &mut self.oneline,
            Toggle::Graph => &mut self.graph,
            Toggle::Decorate => &mut self.decorate,
            Toggle::Stat => &mut self.stat,
            Toggle::Shortstat => &mut self.shortstat,
            Toggle::NameOnly => &mut self.name_only,
            Toggle::NameStatus => &mut self.name_status,
            Toggle::AbbrevCommit => &mut self.abbrev_commit,
            Toggle::NoMerges => &mut self.no_merges,
            Toggle::Merges => &mut self.merges,
            Toggle::FirstParent => &mut self.first_parent,
            Toggle::Reverse => &mut self.reverse,
            Toggle::All => &mut self.all,
            Toggle::Follow => &mut self.follow,
        }
    }

    pub fn set_toggle(&mut self, flag: Toggle, on: bool) {
        *self.toggle_mut(flag) = on;
    }

    pub fn flip(&mut self, flag: Toggle) {
        let v = self.toggle_mut(flag);
        *v = !*v;
    }

    pub fn text(&self, field: TextField) -> Option<&str> {
        let value = match field {
            TextField::Author => &self.author,
            TextField::Committer => &self.committer,
            TextField::Grep => &self.grep,
            TextField::PickaxeS => &self.pickaxe_s,
            TextField::PickaxeG => &self.pickaxe_g,
            TextField::Path => &self.path,
            TextField::Since => &self.since,
            TextField::Until => &self.until,
        };
        value.as_deref()
    }

    /// Stores `value`; an empty string is stored as absent.
    pub fn set_text(&mut self, field: TextField, value: Option<String>) {
        let slot = match field {
            TextField::Author => &mut self.author,
            TextField::Committer => &mut self.committer,
            TextField::Grep => &mut self.grep,
            TextField::PickaxeS => &mut self.pickaxe_s,
            TextField::PickaxeG => &mut self.pickaxe_g,
            TextField::Path => &mut self.path,
            TextField::Since => &mut self.since,
            TextField::Until => &mut self.until,
        };
        *slot = value.filter(|v| !v.is_empty());
    }

    pub fn number(&self, field: NumberField) -> Option<u32> {
        match field {
            NumberField::MaxCount => self.max_count,
        }
    }

    pub fn set_number(&mut self, field: NumberField, value: Option<u32>) {
        match field {
            NumberField::MaxCount => self.max_count = value,
        }
    }

    pub fn cycle(&mut self, select: Select) {
        match select {
            Select::Order => self.order = self.order.next(),
            Select::DateFormat => self.date_format = self.date_format.next(),
        }
    }

    /// Clears a text or number entry. Returns false for any other kind.
    pub fn clear(&mut self, control: FlagControl) -> bool {
        match control {
            FlagControl::Text(field) => {
                self.set_text(field, None);
                true
            }
            FlagControl::Number(field) => {
                self.set_number(field, None);
                true
            }
            FlagControl::Toggle { .. }
            | FlagControl::SingleSelect(_)
            | FlagControl::MultiSelect(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalogue_ids_are_unique() {
        let ids: HashSet<&str> = CATALOGUE.iter().map(|f| f.id).collect();
        assert_eq!(ids.len(), CATALOGUE.len());
    }

    #[test]
    fn test_multi_select_entries_form_the_diff_group() {
        let multi: Vec<_> = CATALOGUE
            .iter()
            .filter(|f| f.kind() == FlagKind::MultiSelect)
            .collect();
        assert_eq!(multi.len(), DiffFilter::ALL.len());
        assert!(multi.iter().all(|f| f.section == Section::Diff));
    }

    #[test]
    fn test_catalogue_is_grouped_in_section_order() {
        let order: Vec<usize> = CATALOGUE.iter().map(|f| f.section.index()).collect();
        let mut sorted = order.clone();
        sorted.sort();
        assert_eq!(order, sorted);
        for section in Section::ALL {
            assert!(flags_in_section(section).next().is_some(), "{:?} empty", section);
        }
    }

    #[test]
    fn test_defaults_follow_catalogue() {
        let state = FlagState::default();
        assert!(state.oneline);
        assert!(state.decorate);
        assert!(state.abbrev_commit);
        assert!(!state.graph);
        assert!(!state.all);
        assert_eq!(state.author, None);
        assert_eq!(state.max_count, None);
        assert_eq!(state.order, OrderType::Default);
        assert_eq!(state.date_format, DateFormat::Default);
        assert!(state.diff_filter.is_empty());
    }

    #[test]
    fn test_section_cycle_wraps() {
        assert_eq!(Section::Format.prev(), Section::DateFmt);
        assert_eq!(Section::DateFmt.next(), Section::Format);
        assert_eq!(Section::Search.next(), Section::Date);
        assert_eq!(Section::Search.prev(), Section::Filter);
    }

    #[test]
    fn test_order_cycle_returns_to_default() {
        let mut state = FlagState::default();
        let mut seen = Vec::new();
        for _ in 0..4 {
            state.cycle(Select::Order);
            seen.push(state.order);
        }
        assert_eq!(
            seen,
            vec![
                OrderType::Date,
                OrderType::AuthorDate,
                OrderType::Topo,
                OrderType::Default
            ]
        );
    }

    #[test]
    fn test_date_format_cycle_returns_to_default() {
        let mut state = FlagState::default();
        for _ in 0..4 {
            state.cycle(Select::DateFormat);
        }
        assert_eq!(state.date_format, DateFormat::Default);
    }

    #[test]
    fn test_diff_filter_toggle_is_involution() {
        let mut set = DiffFilterSet::default();
        set.toggle(DiffFilter::Modified);
        let before = set;
        set.toggle(DiffFilter::Added);
        set.toggle(DiffFilter::Added);
        assert_eq!(set, before);
        assert_eq!(set.letters(), "M");
    }

    #[test]
    fn test_diff_filter_letters_are_canonical() {
        let mut set = DiffFilterSet::default();
        set.toggle(DiffFilter::Renamed);
        set.toggle(DiffFilter::Added);
        set.toggle(DiffFilter::Modified);
        assert_eq!(set.letters(), "AMR");
    }

    #[test]
    fn test_empty_text_is_stored_as_absent() {
        let mut state = FlagState::default();
        state.set_text(TextField::Grep, Some(String::new()));
        assert_eq!(state.text(TextField::Grep), None);
        state.set_text(TextField::Grep, Some("fix".to_string()));
        assert_eq!(state.text(TextField::Grep), Some("fix"));
    }

    #[test]
    fn test_clear_only_applies_to_editable_entries() {
        let mut state = FlagState::default();
        state.max_count = Some(3);
        assert!(state.clear(FlagControl::Number(NumberField::MaxCount)));
        assert_eq!(state.max_count, None);
        assert!(!state.clear(FlagControl::SingleSelect(Select::Order)));
    }

    #[test]
    fn test_single_select_cycles() {
        let labels: Vec<&str> = OrderType::CYCLE.iter().map(|o| o.as_str()).collect();
        assert_eq!(labels, vec!["default", "date", "author-date", "topo"]);
        let labels: Vec<&str> = DateFormat::CYCLE.iter().map(|d| d.as_str()).collect();
        assert_eq!(labels, vec!["default", "relative", "short", "human"]);
        assert!(find_flag("order").is_some_and(|f| f.kind() == FlagKind::SingleSelect));
    }
}
