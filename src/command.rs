//! Compiles a [`FlagState`] into the previewed command line and the argument
//! vector handed to `git log`.

use crate::flags::{self, FlagControl, FlagState, Spelling};

/// Literal program and subcommand that prefix the display string.
pub const COMMAND_PREFIX: &str = "git log";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompiledCommand {
    /// Human-readable preview, values quoted.
    pub display: String,
    /// Arguments following `log`, one element per argument, unquoted.
    pub args: Vec<String>,
}

/// One active flag in both representations.
struct Fragment {
    display: String,
    args: Vec<String>,
}

impl Fragment {
    fn literal(arg: impl Into<String>) -> Self {
        let arg = arg.into();
        Self {
            display: arg.clone(),
            args: vec![arg],
        }
    }
}

fn text_fragment(spelling: Spelling, value: &str) -> Fragment {
    match spelling {
        Spelling::Assign(name) => Fragment {
            display: format!("{}=\"{}\"", name, value),
            args: vec![format!("{}={}", name, value)],
        },
        Spelling::Separate(name) => Fragment {
            display: format!("{} \"{}\"", name, value),
            args: vec![name.to_string(), value.to_string()],
        },
        Spelling::Trailing => Fragment {
            display: format!("-- {}", value),
            args: vec!["--".to_string(), value.to_string()],
        },
    }
}

/// Walks the catalogue once, in declared order, and collects every active
/// flag. The path clause is held back and appended last.
pub fn compile(state: &FlagState) -> CompiledCommand {
    let mut fragments: Vec<Fragment> = Vec::new();
    let mut trailing: Option<Fragment> = None;
    let mut diff_filter_done = false;

    for def in flags::all_flags() {
        match def.control {
            FlagControl::Toggle { flag, .. } => {
                if state.toggle(flag) {
                    fragments.push(Fragment::literal(flag.arg()));
                }
            }
            FlagControl::Text(field) => {
                let Some(value) = state.text(field).filter(|v| !v.is_empty()) else {
                    continue;
                };
                let spelling = field.spelling();
                let fragment = text_fragment(spelling, value);
                if spelling == Spelling::Trailing {
                    trailing = Some(fragment);
                } else {
                    fragments.push(fragment);
                }
            }
            FlagControl::Number(field) => {
                // Zero means no limit.
                if let Some(n) = state.number(field).filter(|n| *n != 0) {
                    fragments.push(Fragment {
                        display: format!("{} {}", field.arg(), n),
                        args: vec![field.arg().to_string(), n.to_string()],
                    });
                }
            }
            FlagControl::MultiSelect(_) => {
                if diff_filter_done {
                    continue;
                }
                diff_filter_done = true;
                if !state.diff_filter.is_empty() {
                    fragments.push(Fragment::literal(format!(
                        "--diff-filter={}",
                        state.diff_filter.letters()
                    )));
                }
            }
            FlagControl::SingleSelect(select) => {
                let arg = match select {
                    flags::Select::Order => state.order.arg(),
                    flags::Select::DateFormat => state.date_format.arg(),
                };
                if let Some(arg) = arg {
                    fragments.push(Fragment::literal(arg));
                }
            }
        }
    }

    fragments.extend(trailing);

    let mut display = String::from(COMMAND_PREFIX);
    let mut args = Vec::new();
    for fragment in fragments {
        display.push(' ');
        display.push_str(&fragment.display);
        args.extend(fragment.args);
    }
    CompiledCommand { display, args }
}
