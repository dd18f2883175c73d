use std::cmp::Ordering;

use crate::categorizer::Element;
use crate::policy::KeyOrder;

/// True when `following` may not come right after `current`.
pub fn out_of_order(current: &Element<'_>, following: &Element<'_>, key_order: KeyOrder) -> bool {
    match current.priority.cmp(&following.priority) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => {
            !current.sort_key.is_empty()
                && !following.sort_key.is_empty()
                && key_order.compare(&current.sort_key, &following.sort_key) == Ordering::Greater
        }
    }
}

/// Elements that sit out of place, found by comparing each adjacent pair once.
/// Each element is reported at most once, in source order.
pub fn find_violations<'e, 'a>(
    elements: &[&'e Element<'a>],
    key_order: KeyOrder,
) -> Vec<&'e Element<'a>> {
    elements
        .windows(2)
        .filter(|pair| out_of_order(pair[0], pair[1], key_order))
        .map(|pair| pair[1])
        .collect()
}
