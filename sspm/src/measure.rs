use std::cmp::Ordering;
use std::fmt;


/// One slot of a finite measure: a bit together with the level it belongs to.
///
/// Levels run from 0 (the coarsest priority class) down to `h - 1`; the tag
/// `h` marks slots buried below the deepest level, which every comparison
/// treats as part of an ε group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slot {
    pub bit: bool,
    pub level: i32,
}

/// An adaptive progress measure: either the maximal element ⊤ or a sequence
/// of `l` bit slots partitioned into contiguous level groups.
///
/// The level tags of a finite measure are non-decreasing in slot order. The
/// bits tagged with one level, read in slot order, form that level's digit
/// string; a level owning no slots reads as the empty string ε. Digit strings
/// are ordered with 0 below ε below 1 on the first diverging slot, so a
/// string is refined towards smaller values by appending 0 and towards larger
/// values by appending 1.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Measure {
    Top,
    Finite(Vec<Slot>),
}

impl Measure {
    /// The least measure: every slot holds a 0 bit at the root level.
    pub fn min(l: usize) -> Self {
        Measure::Finite(vec![Slot { bit: false, level: 0 }; l])
    }

    pub fn is_top(&self) -> bool {
        matches!(self, Measure::Top)
    }

    /// Round down to the least measure that compares equal to this one at
    /// levels up to `pindex`. Idempotent, and a no-op on ⊤.
    pub fn truncate(&mut self, pindex: i32) {
        let Measure::Finite(slots) = self else { return };
        for slot in slots.iter_mut().rev() {
            if slot.level <= pindex {
                break;
            }
            *slot = Slot { bit: false, level: pindex + 1 };
        }
    }

    /// Advance to the least measure strictly greater than this one at levels
    /// up to `pindex`, or to ⊤ when the bit budget below the cut is
    /// exhausted. A no-op on ⊤.
    pub fn successor(&mut self, pindex: i32, h: i32) {
        let Measure::Finite(slots) = self else { return };
        if !step(slots, pindex, h) {
            *self = Measure::Top;
        }
    }

    /// Total order cut at `pindex`: once both measures have moved past the
    /// cut they compare equal, deeper content being irrelevant to the caller.
    /// ⊤ exceeds every finite measure.
    pub fn cmp_up_to(&self, other: &Measure, pindex: i32) -> Ordering {
        let (lhs, rhs) = match (self, other) {
            (Measure::Top, Measure::Top) => return Ordering::Equal,
            (Measure::Top, _) => return Ordering::Greater,
            (_, Measure::Top) => return Ordering::Less,
            (Measure::Finite(lhs), Measure::Finite(rhs)) => (lhs, rhs),
        };

        for (a, b) in std::iter::zip(lhs, rhs) {
            if a.level > pindex && b.level > pindex {
                return Ordering::Equal;
            }
            // When the tags diverge one measure reads ε where the other still
            // has bits; the latter is ordered by its own bit.
            match a.level.cmp(&b.level) {
                Ordering::Less => {
                    return match a.bit {
                        false => Ordering::Less,
                        true => Ordering::Greater,
                    }
                }
                Ordering::Greater => {
                    return match b.bit {
                        false => Ordering::Greater,
                        true => Ordering::Less,
                    }
                }
                Ordering::Equal => match (a.bit, b.bit) {
                    (false, true) => return Ordering::Less,
                    (true, false) => return Ordering::Greater,
                    _ => {}
                },
            }
        }

        Ordering::Equal
    }

    /// Render the level groups as in `{ 010,ε,11 }`.
    pub fn display(&self, h: i32) -> MeasureDisplay<'_> {
        MeasureDisplay { measure: self, h }
    }
}

/// Strict successor on the slots of a finite measure. Returns `false` when
/// the value overflows to ⊤.
fn step(slots: &mut [Slot], pindex: i32, h: i32) -> bool {
    // Slots buried past the cut are free: reclaim them as a "10…0" group at
    // `pindex`, the least extension that grows the value.
    if slots.last().is_some_and(|slot| slot.level > pindex) {
        let start = slots.iter().rposition(|slot| slot.level <= pindex).map_or(0, |i| i + 1);
        for slot in &mut slots[start..] {
            *slot = Slot { bit: false, level: pindex };
        }
        slots[start].bit = true;
        return true;
    }

    // No free slots: binary increment, carrying towards shallower levels.
    // Trailing 1 bits are cleared on the way down to the pivot slot.
    for i in (0..slots.len()).rev() {
        let Slot { bit, level } = slots[i];
        if !bit {
            if level == h {
                // A 0 in the filler below the deepest level cannot be buried
                // any further; flip it instead.
                slots[i].bit = true;
            } else {
                // Bury the tail one level deeper: the group ends in ε here,
                // the least value past any digit string ending in 0.
                for slot in &mut slots[i..] {
                    slot.level = level + 1;
                }
            }
            return true;
        } else if i == 0 {
            if level == 0 {
                // Carry out of the root level: the counter is exhausted.
                return false;
            }
            // The shallowest occupied level holds only 1 bits: merge the
            // whole measure into a single 1 one level up.
            for slot in slots.iter_mut() {
                slot.level = level - 1;
            }
            return true;
        } else if slots[i - 1].level != level {
            // This level group holds only 1 bits: promote its 1 into the
            // next shallower level.
            for slot in &mut slots[i..] {
                slot.level = level - 1;
            }
            return true;
        } else {
            slots[i].bit = false;
        }
    }

    true
}

pub struct MeasureDisplay<'a> {
    measure: &'a Measure,
    h: i32,
}

impl fmt::Display for MeasureDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Measure::Finite(slots) = self.measure else { return write!(f, "Top") };

        write!(f, "{{ ")?;
        let mut next = 0;
        for level in 0..self.h {
            if level > 0 {
                write!(f, ",")?;
            }
            let group = slots[next..].iter().take_while(|slot| slot.level == level).count();
            if group == 0 {
                write!(f, "ε")?;
            }
            for slot in &slots[next..next + group] {
                write!(f, "{}", slot.bit as u8)?;
            }
            next += group;
        }
        write!(f, " }}")
    }
}
