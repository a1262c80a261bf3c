use serde::Serialize;
use tracing::{debug, warn};

use crate::config::MarketSettings;
use crate::error::{Result, ScrapeError};
use crate::output::Record;
use crate::page::{element_text, Page};

/// One market banner card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarketRow {
    pub symbol: String,
    pub position: String,
    pub change_pct: String,
}

impl Record for MarketRow {
    const HEADERS: &'static [&'static str] = &[
        "marketCard_symbol",
        "marketCard_stockPosition",
        "marketCard-changePct",
    ];

    fn fields(&self) -> Vec<&str> {
        vec![
            self.symbol.as_str(),
            self.position.as_str(),
            self.change_pct.as_str(),
        ]
    }
}

/// How to handle selections of different lengths.
///
/// Cards are correlated by position only, so a stray node in one list shifts
/// every later row. `Truncate` keeps the first `min(counts)` rows; `Strict`
/// refuses to pair lists of different lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Truncate,
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MarketCounts {
    pub symbols: usize,
    pub positions: usize,
    pub changes: usize,
}

impl MarketCounts {
    pub fn rows(&self) -> usize {
        self.symbols.min(self.positions).min(self.changes)
    }

    pub fn is_aligned(&self) -> bool {
        self.symbols == self.positions && self.positions == self.changes
    }

    /// Selected nodes left unpaired after truncation.
    pub fn dropped(&self) -> usize {
        self.symbols + self.positions + self.changes - 3 * self.rows()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketExtraction {
    pub rows: Vec<MarketRow>,
    pub counts: MarketCounts,
}

/// Pair symbol, position and change nodes by index.
pub fn extract_market(
    page: &Page,
    settings: &MarketSettings,
    alignment: Alignment,
) -> Result<MarketExtraction> {
    let symbols = page.select_class(&settings.symbol_class)?;
    let positions = page.select_class(&settings.position_class)?;
    let changes = page.select_class(&settings.change_class)?;

    let counts = MarketCounts {
        symbols: symbols.len(),
        positions: positions.len(),
        changes: changes.len(),
    };
    debug!(?counts, "Selected market card nodes");

    if !counts.is_aligned() {
        if alignment == Alignment::Strict {
            return Err(ScrapeError::MisalignedMarketCards {
                symbols: counts.symbols,
                positions: counts.positions,
                changes: counts.changes,
            }
            .into());
        }
        warn!(
            symbols = counts.symbols,
            positions = counts.positions,
            changes = counts.changes,
            dropped = counts.dropped(),
            "Market card lists differ in length; truncating to the shortest"
        );
    }

    let rows = symbols
        .into_iter()
        .zip(positions)
        .zip(changes)
        .map(|((symbol, position), change)| MarketRow {
            symbol: element_text(symbol),
            position: element_text(position),
            change_pct: element_text(change),
        })
        .collect();

    Ok(MarketExtraction { rows, counts })
}
