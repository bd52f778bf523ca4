//! List, table, and heading block bookkeeping.

use crate::bytes::skip_blanks;
use crate::context::ListSlot;
use crate::error::EngineResult;
use crate::format::HOOK_LEVEL_PAR;
use crate::options::ProcessOptions;
use crate::parser::{slot_marker_str, Engine, State};

/// How many heading levels get numbered.
pub(crate) const MAX_NUMBERED_HEADING_LEVELS: usize = 2;

/// How many heading levels participate in section tracking.
const MAX_SECTION_LEVELS: i32 = 4;

/// Advances the heading numbering to a new heading at `level`: marks the
/// section open, closes deeper sections, bumps this level's counter, and
/// resets the deeper counters.
pub(crate) fn next_heading(
    heading_flags: &mut u32,
    heading_num: &mut [i32; MAX_NUMBERED_HEADING_LEVELS],
    level: i32,
) {
    if (1..=MAX_SECTION_LEVELS).contains(&level) {
        *heading_flags |= 1 << (level - 1);
        *heading_flags &= !(u32::MAX << level);
    }
    if (1..=MAX_NUMBERED_HEADING_LEVELS as i32).contains(&level) {
        heading_num[(level - 1) as usize] += 1;
        for i in level as usize..MAX_NUMBERED_HEADING_LEVELS {
            heading_num[i] = 0;
        }
    }
}

impl<'a, 'h> Engine<'a, 'h> {
    /// Closes every heading-delimited section deeper than `level` through
    /// the division hook.
    pub(crate) fn close_sections_above(
        &mut self,
        level: i32,
        from: i32,
        i0: usize,
    ) -> EngineResult<()> {
        let mut open = from;
        while open > level {
            if (self.heading_flags >> (open - 1)) & 1 == 1 {
                self.hook_div(open, 0, false, "=", i0)?;
            }
            open -= 1;
        }
        Ok(())
    }

    /// Bumps the numbering and emits the heading-begin fragment.
    pub(crate) fn begin_heading(&mut self, level: i32, i0: usize) -> EngineResult<()> {
        next_heading(&mut self.heading_flags, &mut self.heading_num, level);
        self.ctx.level = level;
        let numbered = level >= 1
            && level <= MAX_NUMBERED_HEADING_LEVELS as i32
            && self.ctx.options.contains(if level == 1 {
                ProcessOptions::H1_NUM
            } else {
                ProcessOptions::H2_NUM
            });
        self.ctx.item = if numbered {
            self.heading_num[(level - 1) as usize]
        } else {
            0
        };
        let item = self.ctx.item;
        self.hook_div(level, item, true, "=", i0)?;
        self.hook_par(level, item, true, "=", i0)?;
        self.ctx.write_fragment(self.ctx.format.begin_heading)?;
        self.ctx.level = 0;
        self.state = State::Heading;
        skip_blanks(&self.src[..self.ctx.src_len], &mut self.ctx.src_index);
        Ok(())
    }

    /// Opens one missing list level; the kind comes from the corresponding
    /// marker character of the item run just consumed.
    pub(crate) fn open_list_level(&mut self, item_nesting: usize, i0: usize) -> EngineResult<()> {
        let marker = self.src[self.ctx.src_index - item_nesting + self.ctx.nesting];
        let slot = match marker {
            b'*' => ListSlot::Unordered,
            b';' => ListSlot::DefinitionTitle,
            b':' => ListSlot::Indented,
            _ => ListSlot::Ordered(1),
        };
        self.ctx.list_num[self.ctx.nesting] = slot;
        self.ctx.nesting += 1;
        self.ctx.level = self.ctx.nesting as i32;
        self.hook_div(self.ctx.nesting as i32, 0, true, slot_marker_str(slot), i0)?;
        self.ctx.write_fragment(match slot {
            ListSlot::Unordered => self.ctx.format.begin_ul,
            ListSlot::DefinitionTitle => self.ctx.format.begin_dl,
            ListSlot::Indented => self.ctx.format.begin_indented,
            _ => self.ctx.format.begin_ol,
        })?;
        self.ctx.level = 0;
        Ok(())
    }

    /// Emits the item-begin fragment for the innermost open list level.
    pub(crate) fn begin_list_item(&mut self, i0: usize) -> EngineResult<()> {
        let slot = self.ctx.list_num[self.ctx.nesting - 1];
        self.ctx
            .set_context(self.ctx.nesting as i32, slot.item_number());
        let level = self.ctx.level;
        let item = self.ctx.item;
        let marker = match slot {
            ListSlot::Unordered => "*",
            ListSlot::DefinitionTitle => ";",
            ListSlot::Indented => ":",
            _ => "#",
        };
        self.hook_par(level, item, true, marker, i0)?;
        self.ctx.write_fragment(match slot {
            ListSlot::Unordered => self.ctx.format.begin_ul_item,
            ListSlot::DefinitionTitle => self.ctx.format.begin_dt,
            ListSlot::Indented => self.ctx.format.begin_indented_par,
            _ => self.ctx.format.begin_ol_item,
        })?;
        self.ctx.set_context(0, 0);
        Ok(())
    }

    /// Ends the current paragraph, list item, or table cell; with
    /// `force_end_of_list`, also closes every open list and table.
    pub(crate) fn add_end_par(&mut self, force_end_of_list: bool) -> EngineResult<()> {
        if self.ctx.nesting == 0 {
            self.ctx.write_fragment(self.ctx.format.end_par)?;
            self.ctx.check_wordwrap()?;
            let pos = self.ctx.src_index;
            self.hook_par(HOOK_LEVEL_PAR, 0, false, "p", pos)?;
            return Ok(());
        }

        let level0 = self.ctx.level;
        let item0 = self.ctx.item;
        let slot = self.ctx.list_num[self.ctx.nesting - 1];
        self.ctx
            .set_context(self.ctx.nesting as i32, slot.item_number());

        match slot {
            ListSlot::Ordered(n) => {
                self.ctx.list_num[self.ctx.nesting - 1] = ListSlot::Ordered(n + 1);
                self.ctx.write_fragment(self.ctx.format.end_ol_item)?;
                self.ctx.check_wordwrap()?;
                let (level, item, pos) = (self.ctx.level, self.ctx.item, self.ctx.src_index);
                self.hook_par(level, item, false, "#", pos)?;
            }
            ListSlot::TableCell | ListSlot::TableHeadingCell => {
                self.ctx.write_fragment(if slot == ListSlot::TableCell {
                    self.ctx.format.end_table_cell
                } else {
                    self.ctx.format.end_table_hcell
                })?;
                self.ctx.check_wordwrap()?;
                let pos = self.ctx.src_index;
                self.hook_par(
                    HOOK_LEVEL_PAR,
                    0,
                    false,
                    if slot == ListSlot::TableCell { "|" } else { "|=" },
                    pos,
                )?;
                self.ctx.write_fragment(self.ctx.format.end_table_row)?;
                self.ctx.check_wordwrap()?;
            }
            _ => {
                self.ctx.write_fragment(match slot {
                    ListSlot::Unordered => self.ctx.format.end_ul_item,
                    ListSlot::DefinitionTitle => self.ctx.format.end_dt,
                    ListSlot::Definition => self.ctx.format.end_dd,
                    _ => self.ctx.format.end_indented_par,
                })?;
                self.ctx.check_wordwrap()?;
                let (level, item, pos) = (self.ctx.level, self.ctx.item, self.ctx.src_index);
                self.hook_par(
                    level,
                    item,
                    false,
                    match slot {
                        ListSlot::Unordered => "*",
                        ListSlot::DefinitionTitle => ";",
                        ListSlot::Definition => ";:",
                        _ => ":",
                    },
                    pos,
                )?;
            }
        }

        if force_end_of_list {
            while self.ctx.nesting > 0 {
                let slot = self.ctx.list_num[self.ctx.nesting - 1];
                self.ctx
                    .set_context(self.ctx.nesting as i32, slot.item_number());
                self.ctx.write_fragment(match slot {
                    ListSlot::Unordered => self.ctx.format.end_ul,
                    ListSlot::DefinitionTitle | ListSlot::Definition => self.ctx.format.end_dl,
                    ListSlot::Indented => self.ctx.format.end_indented,
                    ListSlot::TableCell | ListSlot::TableHeadingCell => self.ctx.format.end_table,
                    ListSlot::Ordered(_) => self.ctx.format.end_ol,
                })?;
                self.ctx.check_wordwrap()?;
                let div_level = if slot.is_table() {
                    HOOK_LEVEL_PAR
                } else {
                    self.ctx.level
                };
                let pos = self.ctx.src_index;
                self.hook_div(div_level, 0, false, slot_marker_str(slot), pos)?;
                self.ctx.nesting -= 1;
            }
        }

        self.ctx.set_context(level0, item0);
        Ok(())
    }
}
