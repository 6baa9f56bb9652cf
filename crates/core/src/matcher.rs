use crate::{Event, EventBus, FeedbackKind, MatchRule, Symbol, Tray};

/// Clear every resolvable group from the tray and return the score earned.
///
/// Each pass scans the slots in order and clears one group: the qualifying
/// symbol whose first occurrence sits at the lowest slot index. The tray is
/// compacted after the clear and the scan restarts, so concentrations
/// exposed by compaction cascade until a full pass clears nothing.
pub fn resolve_matches(tray: &mut Tray, rule: &MatchRule, events: &mut EventBus) -> u32 {
    let mut scored = 0;
    while let Some((symbol, slots)) = find_group(tray, rule) {
        for &slot in &slots {
            tray.clear_slot(slot);
        }
        tray.compact();
        scored += rule.match_score;
        events.push(Event::MatchCleared {
            symbol,
            slots,
            score: rule.match_score,
        });
        events.push(Event::Feedback(FeedbackKind::MatchSuccess));
    }
    scored
}

fn find_group(tray: &Tray, rule: &MatchRule) -> Option<(Symbol, Vec<usize>)> {
    if rule.group_size == 0 {
        return None;
    }
    // Occurrence lists keyed in first-occurrence order; the first list to
    // fill up wins, which makes resolution deterministic when several
    // symbols qualify at once.
    let mut groups: Vec<(Symbol, Vec<usize>)> = Vec::new();
    for (slot, symbol) in tray.occupants() {
        match groups.iter_mut().find(|(existing, _)| *existing == symbol) {
            Some((_, slots)) => slots.push(slot),
            None => groups.push((symbol, vec![slot])),
        }
    }
    groups.into_iter().find_map(|(symbol, slots)| {
        (slots.len() >= rule.group_size).then(|| (symbol, slots[..rule.group_size].to_vec()))
    })
}
