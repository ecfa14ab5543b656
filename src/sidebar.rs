//! Flat sidebar list: section headers interleaved with selectable controls.
//!
//! Selection is tracked as a dense index over controls only. Headers occupy
//! rows in the flat list but never receive an index.

use crate::flags::{self, FlagDefinition, Section};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SidebarItem {
    Header(Section),
    Control {
        flag: &'static FlagDefinition,
        index: usize,
    },
}

pub fn build_flat_list() -> Vec<SidebarItem> {
    let mut items = Vec::with_capacity(flags::all_flags().len() + Section::ALL.len());
    let mut index = 0usize;
    for section in Section::ALL {
        items.push(SidebarItem::Header(section));
        for flag in flags::flags_in_section(section) {
            items.push(SidebarItem::Control { flag, index });
            index += 1;
        }
    }
    items
}

pub fn selectable_count() -> usize {
    flags::all_flags().len()
}

/// Controls in dense-index order.
fn selectable_flags() -> impl Iterator<Item = &'static FlagDefinition> {
    Section::ALL
        .into_iter()
        .flat_map(flags::flags_in_section)
}

pub fn flag_at_selectable_index(i: usize) -> Option<&'static FlagDefinition> {
    selectable_flags().nth(i)
}

/// Section owning dense index `i`; the first section when `i` is out of range.
pub fn section_of_selectable_index(i: usize) -> Section {
    flag_at_selectable_index(i)
        .map(|f| f.section)
        .unwrap_or(Section::ALL[0])
}

/// Dense index of the first control in `section`.
pub fn first_selectable_index_of(section: Section) -> usize {
    selectable_flags()
        .position(|f| f.section == section)
        .unwrap_or(0)
}

/// Row of the control with dense index `i` in `items`, or 0 when absent.
pub fn position_of_selectable_index(items: &[SidebarItem], i: usize) -> usize {
    items
        .iter()
        .position(|item| matches!(item, SidebarItem::Control { index, .. } if *index == i))
        .unwrap_or(0)
}
