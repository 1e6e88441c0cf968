//! Day-mask handling. Every card encodes its weekday placement as a binary
//! string, but the source never documents which end of the string is
//! Monday, and deployments differ. The direction is therefore guessed once
//! per dump from the unambiguous evidence: cards with exactly one set bit.

/// Which end of a mask corresponds to the first day of the day table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskDirection {
    Left,
    Right,
}

/// Guess the bit ordering from the masks of all cards in the dump.
/// Each singleton mask votes for the day index it would land on under both
/// readings; the reading whose histogram has the taller peak wins. Zero
/// singletons or a tie fall back to left-to-right. Pure function of its
/// input.
pub fn detect_mask_direction<'a, I>(masks: I, days_count: usize) -> MaskDirection
where
    I: IntoIterator<Item = &'a str>,
{
    if days_count == 0 {
        return MaskDirection::Left;
    }

    let mut left = vec![0u32; days_count];
    let mut right = vec![0u32; days_count];
    let mut singles = 0u32;

    for raw in masks {
        let mask = clean_mask(raw);
        if mask.bytes().filter(|b| *b == b'1').count() != 1 {
            continue;
        }
        singles += 1;
        let fitted_left = fit_left(&mask, days_count);
        let fitted_right = fit_right(&mask, days_count);
        if let Some(index) = fitted_left.find('1') {
            left[index] += 1;
        }
        if let Some(index) = fitted_right.rfind('1') {
            right[days_count - 1 - index] += 1;
        }
    }

    if singles == 0 {
        return MaskDirection::Left;
    }
    let left_max = left.iter().max().copied().unwrap_or(0);
    let right_max = right.iter().max().copied().unwrap_or(0);
    if left_max >= right_max {
        MaskDirection::Left
    } else {
        MaskDirection::Right
    }
}

/// Decode a mask into the day names it selects. Empty or invalid masks
/// decode to an empty list; the caller decides on a fallback.
pub fn mask_to_days(mask: &str, day_names: &[String], direction: MaskDirection) -> Vec<String> {
    let mask = clean_mask(mask);
    if mask.is_empty() || day_names.is_empty() {
        return Vec::new();
    }
    let count = day_names.len();
    let fitted = match direction {
        MaskDirection::Left => fit_left(&mask, count),
        MaskDirection::Right => fit_right(&mask, count).chars().rev().collect(),
    };
    fitted
        .bytes()
        .enumerate()
        .filter(|(_, b)| *b == b'1')
        .map(|(index, _)| day_names[index].clone())
        .collect()
}

/// Keep only the `0`/`1` characters of a raw mask value.
fn clean_mask(mask: &str) -> String {
    mask.trim()
        .chars()
        .filter(|c| *c == '0' || *c == '1')
        .collect()
}

/// Pad on the right when short, keep the trailing `count` bits when long.
fn fit_left(mask: &str, count: usize) -> String {
    if mask.len() < count {
        format!("{:0<width$}", mask, width = count)
    } else {
        mask[mask.len() - count..].to_string()
    }
}

/// Pad on the left when short, keep the trailing `count` bits when long.
fn fit_right(mask: &str, count: usize) -> String {
    if mask.len() < count {
        format!("{:0>width$}", mask, width = count)
    } else {
        mask[mask.len() - count..].to_string()
    }
}
