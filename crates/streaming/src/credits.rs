use std::collections::HashSet;

use crate::tile::Tile;

/// Separator between credits inside one tile's attribution string.
pub const CREDIT_SEPARATOR: char = ';';
/// Separator used when displaying the aggregated credits.
pub const CREDIT_JOINER: &str = "; ";

/// Unique credits in first-seen order.
///
/// Tokens are compared verbatim: no trimming, no case folding. Empty tokens
/// (from `"A;;B"` or a trailing `;`) carry no credit and are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreditSet {
    ordered: Vec<String>,
    seen: HashSet<String>,
}

impl CreditSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tiles(tiles: &[Tile]) -> Self {
        let mut set = Self::new();
        for tile in tiles {
            let Some(attribution) = tile.attribution() else {
                continue;
            };
            for token in attribution.split(CREDIT_SEPARATOR) {
                set.insert(token);
            }
        }
        set
    }

    /// Returns `true` if the credit was not present yet.
    pub fn insert(&mut self, credit: &str) -> bool {
        if credit.is_empty() || self.seen.contains(credit) {
            return false;
        }
        self.seen.insert(credit.to_string());
        self.ordered.push(credit.to_string());
        true
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ordered.iter().map(|s| s.as_str())
    }

    pub fn display(&self) -> String {
        self.ordered.join(CREDIT_JOINER)
    }
}

/// Holds the credit line for the most recent traversal.
///
/// Each traversal rebuilds the set from scratch, so credits of tiles that
/// scrolled out of view disappear and memory stays bounded by one traversal.
#[derive(Debug, Clone, Default)]
pub struct CreditAggregator {
    current: CreditSet,
    display: String,
}

impl CreditAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the displayed credits with those of `tiles`.
    pub fn on_traversal_complete(&mut self, tiles: &[Tile]) -> &str {
        self.current = CreditSet::from_tiles(tiles);
        self.display = self.current.display();
        &self.display
    }

    pub fn credits(&self) -> &CreditSet {
        &self.current
    }

    pub fn display(&self) -> &str {
        &self.display
    }
}

#[cfg(test)]
mod tests {
    use super::{CreditAggregator, CreditSet};
    use crate::tile::Tile;
    use pretty_assertions::assert_eq;

    #[test]
    fn merges_overlapping_attributions_once_each() {
        let tiles = vec![Tile::loaded("1", "A;B"), Tile::loaded("2", "B;C")];
        let mut agg = CreditAggregator::new();
        assert_eq!(agg.on_traversal_complete(&tiles), "A; B; C");
        assert_eq!(agg.credits().len(), 3);
    }

    #[test]
    fn repeated_traversal_is_idempotent() {
        let tiles = vec![Tile::loaded("1", "Google;Airbus"), Tile::loaded("2", "Google")];
        let mut agg = CreditAggregator::new();
        let first = agg.on_traversal_complete(&tiles).to_string();
        let second = agg.on_traversal_complete(&tiles).to_string();
        assert_eq!(first, second);
        assert_eq!(first, "Google; Airbus");
    }

    #[test]
    fn new_traversal_drops_stale_credits() {
        let mut agg = CreditAggregator::new();
        agg.on_traversal_complete(&[Tile::loaded("1", "Old Survey;Google")]);
        let shown = agg.on_traversal_complete(&[Tile::loaded("9", "Google")]);
        assert_eq!(shown, "Google");
        assert!(!agg.credits().iter().any(|c| c == "Old Survey"));
    }

    #[test]
    fn tokens_are_case_and_whitespace_sensitive() {
        let set = CreditSet::from_tiles(&[Tile::loaded("1", "Google; Google;google")]);
        let credits: Vec<&str> = set.iter().collect();
        assert_eq!(credits, vec!["Google", " Google", "google"]);
    }

    #[test]
    fn unloaded_tiles_and_empty_tokens_contribute_nothing() {
        let tiles = vec![
            Tile::pending("0"),
            Tile::loaded("1", "A;;B;"),
            Tile::loaded("2", ""),
        ];
        let mut agg = CreditAggregator::new();
        assert_eq!(agg.on_traversal_complete(&tiles), "A; B");
        assert_eq!(agg.on_traversal_complete(&[]), "");
    }
}
