//! Leaderboard ranking and pagination
//!
//! The ranking service returns raw entries; ranks are computed here.

use serde::{Deserialize, Serialize};

use crate::consts::LEADERBOARD_PAGE_SIZE;
use crate::score_client::ScoreEntry;

/// A leaderboard row with its computed rank (1-indexed)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub rank: usize,
    pub name: String,
    pub stars: u32,
    pub time: u32,
}

/// Sort by stars (desc), then time (desc), and assign ranks.
///
/// An entry with the same (stars, time) as the row just above it shares that
/// row's rank; otherwise its rank is its 1-indexed position. Sorting is
/// stable, so equal entries keep the service's order and are adjacent.
pub fn rank_entries(mut entries: Vec<ScoreEntry>) -> Vec<RankedEntry> {
    entries.sort_by(|a, b| b.stars.cmp(&a.stars).then(b.time.cmp(&a.time)));

    let mut ranked: Vec<RankedEntry> = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        let rank = match ranked.last() {
            Some(prev) if prev.stars == entry.stars && prev.time == entry.time => prev.rank,
            _ => index + 1,
        };
        ranked.push(RankedEntry {
            rank,
            name: entry.name,
            stars: entry.stars,
            time: entry.time,
        });
    }
    ranked
}

/// Ranked entries shown a page at a time
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Leaderboard {
    entries: Vec<RankedEntry>,
    page: usize,
}

impl Leaderboard {
    /// Rank `entries` and start on the first page
    pub fn new(entries: Vec<ScoreEntry>) -> Self {
        Self::from_ranked(rank_entries(entries))
    }

    pub fn from_ranked(entries: Vec<RankedEntry>) -> Self {
        Self { entries, page: 0 }
    }

    pub fn entries(&self) -> &[RankedEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current page index (0-based)
    pub fn page(&self) -> usize {
        self.page
    }

    /// Number of pages (at least 1, even when empty)
    pub fn page_count(&self) -> usize {
        self.entries.len().div_ceil(LEADERBOARD_PAGE_SIZE).max(1)
    }

    /// Index of the first row on the current page
    pub fn start_index(&self) -> usize {
        self.page * LEADERBOARD_PAGE_SIZE
    }

    /// Rows on the current page
    pub fn current_page(&self) -> &[RankedEntry] {
        let start = self.start_index().min(self.entries.len());
        let end = (start + LEADERBOARD_PAGE_SIZE).min(self.entries.len());
        &self.entries[start..end]
    }

    pub fn has_next(&self) -> bool {
        self.start_index() + LEADERBOARD_PAGE_SIZE < self.entries.len()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    /// Advance one page if another exists. Returns true if the page changed.
    pub fn next_page(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.page += 1;
        true
    }

    /// Go back one page unless on the first. Returns true if the page changed.
    pub fn previous_page(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.page -= 1;
        true
    }

    /// First row matching a submitted score, for highlighting the player
    pub fn find(&self, name: &str, stars: u32, time: u32) -> Option<&RankedEntry> {
        self.entries
            .iter()
            .find(|e| e.name == name && e.stars == stars && e.time == time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, stars: u32, time: u32) -> ScoreEntry {
        ScoreEntry {
            name: name.to_string(),
            stars,
            time,
        }
    }

    fn summary(ranked: &[RankedEntry]) -> Vec<(&str, usize)> {
        ranked.iter().map(|e| (e.name.as_str(), e.rank)).collect()
    }

    #[test]
    fn test_rank_with_ties() {
        let ranked = rank_entries(vec![
            entry("A", 3, 50),
            entry("B", 5, 20),
            entry("C", 5, 20),
            entry("D", 1, 99),
        ]);
        assert_eq!(
            summary(&ranked),
            vec![("B", 1), ("C", 1), ("A", 3), ("D", 4)]
        );
    }

    #[test]
    fn test_time_breaks_star_ties_descending() {
        let ranked = rank_entries(vec![entry("short", 4, 10), entry("long", 4, 90)]);
        assert_eq!(summary(&ranked), vec![("long", 1), ("short", 2)]);
    }

    #[test]
    fn test_three_way_tie_after_leader() {
        let ranked = rank_entries(vec![
            entry("x", 2, 5),
            entry("lead", 9, 9),
            entry("y", 2, 5),
            entry("z", 2, 5),
        ]);
        assert_eq!(
            summary(&ranked),
            vec![("lead", 1), ("x", 2), ("y", 2), ("z", 2)]
        );
    }

    #[test]
    fn test_rank_empty() {
        assert!(rank_entries(Vec::new()).is_empty());
    }

    fn twelve() -> Leaderboard {
        Leaderboard::new(
            (0..12)
                .map(|i| entry(&format!("p{i}"), 100 - i, 0))
                .collect(),
        )
    }

    #[test]
    fn test_pagination_of_twelve() {
        let mut board = twelve();
        assert_eq!(board.page_count(), 3);

        assert_eq!(board.page(), 0);
        assert!(!board.has_previous());
        assert!(board.has_next());
        let ranks: Vec<usize> = board.current_page().iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5]);

        assert!(board.next_page());
        let ranks: Vec<usize> = board.current_page().iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![6, 7, 8, 9, 10]);

        assert!(board.next_page());
        let ranks: Vec<usize> = board.current_page().iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![11, 12]);
        assert!(!board.has_next());
        assert!(!board.next_page());
        assert_eq!(board.page(), 2);

        assert!(board.previous_page());
        assert!(board.previous_page());
        assert!(!board.previous_page());
        assert_eq!(board.page(), 0);
    }

    #[test]
    fn test_exact_page_multiple_has_no_empty_page() {
        let mut board = Leaderboard::new((0..10).map(|i| entry("p", i, 0)).collect());
        assert_eq!(board.page_count(), 2);
        assert!(board.next_page());
        assert!(!board.has_next());
    }

    #[test]
    fn test_empty_board() {
        let mut board = Leaderboard::default();
        assert!(board.current_page().is_empty());
        assert!(!board.next_page());
        assert!(!board.previous_page());
        assert_eq!(board.page_count(), 1);
    }

    #[test]
    fn test_find_player_row() {
        let board = Leaderboard::new(vec![entry("me", 3, 40), entry("you", 5, 10)]);
        assert_eq!(board.find("me", 3, 40).map(|e| e.rank), Some(2));
        assert!(board.find("me", 3, 41).is_none());
    }
}
