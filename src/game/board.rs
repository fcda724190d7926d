//! Board topology: the fixed 22-tile loop.

use crate::game::InsuranceKind;

/// Number of tiles on the loop.
pub const BOARD_SIZE: usize = 22;

/// Tile crediting the salary when crossed or landed on.
pub const SALARY_TILE: usize = 0;

/// Tile debiting the rent when crossed or landed on.
pub const RENT_TILE: usize = 11;

/// Corner tiles where token animation lingers.
///
/// Presentation data only; the engine itself never branches on corners.
pub const CORNER_TILES: [usize; 4] = [0, 7, 11, 18];

/// What a tile does when reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileKind {
    /// No effect.
    Neutral,
    /// Salary credit, on crossing or landing.
    Salary,
    /// Rent debit, on crossing or landing.
    Rent,
    /// One-time purchase offer for an insurance line, on landing.
    InsuranceOffer(InsuranceKind),
    /// Effect drawn from the external event supplier, on landing.
    ExternalEvent,
}

impl TileKind {
    /// Whether this tile's effect also fires when merely passed over.
    ///
    /// Only the lap tiles (salary and rent) trigger on a pass; everything
    /// else waits for a landing.
    #[must_use]
    pub const fn triggers_on_pass(self) -> bool {
        matches!(self, TileKind::Salary | TileKind::Rent)
    }
}

/// The fixed circular board.
///
/// One canonical table maps every index to its kind; the lap, offer, and
/// external designations cannot overlap by construction.
#[derive(Debug, Clone, Copy)]
pub struct Board {
    tiles: [TileKind; BOARD_SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl Board {
    /// The standard layout: salary at 0, rent at 11, each insurance line
    /// offered on two opposite tiles, external events in between.
    #[must_use]
    pub const fn standard() -> Self {
        use InsuranceKind::{Car, Health, Home, Liability, Life, Savings, Travel};
        Self {
            tiles: [
                TileKind::Salary,                    // 0
                TileKind::InsuranceOffer(Health),    // 1
                TileKind::ExternalEvent,             // 2
                TileKind::InsuranceOffer(Life),      // 3
                TileKind::InsuranceOffer(Car),       // 4
                TileKind::ExternalEvent,             // 5
                TileKind::InsuranceOffer(Travel),    // 6
                TileKind::ExternalEvent,             // 7
                TileKind::InsuranceOffer(Home),      // 8
                TileKind::InsuranceOffer(Liability), // 9
                TileKind::InsuranceOffer(Savings),   // 10
                TileKind::Rent,                      // 11
                TileKind::InsuranceOffer(Health),    // 12
                TileKind::ExternalEvent,             // 13
                TileKind::InsuranceOffer(Life),      // 14
                TileKind::InsuranceOffer(Car),       // 15
                TileKind::ExternalEvent,             // 16
                TileKind::InsuranceOffer(Travel),    // 17
                TileKind::ExternalEvent,             // 18
                TileKind::InsuranceOffer(Home),      // 19
                TileKind::InsuranceOffer(Liability), // 20
                TileKind::InsuranceOffer(Savings),   // 21
            ],
        }
    }

    /// Number of tiles.
    #[must_use]
    pub const fn size(&self) -> usize {
        BOARD_SIZE
    }

    /// Tile kind at an index; indices wrap around the loop.
    #[must_use]
    pub fn kind(&self, index: usize) -> TileKind {
        self.tiles[index % BOARD_SIZE]
    }

    /// Whether the tile carries a fixed lap effect (salary or rent).
    #[must_use]
    pub fn is_lap_tile(&self, index: usize) -> bool {
        self.kind(index).triggers_on_pass()
    }

    /// Number of tiles crossed moving forward from `from` to `to`.
    #[must_use]
    pub const fn distance_forward(from: usize, to: usize) -> usize {
        ((to % BOARD_SIZE) + BOARD_SIZE - (from % BOARD_SIZE)) % BOARD_SIZE
    }

    /// Whether the token animation should linger on this tile.
    #[must_use]
    pub fn is_corner(index: usize) -> bool {
        CORNER_TILES.contains(&(index % BOARD_SIZE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_layout_kinds() {
        let board = Board::standard();
        assert_eq!(board.kind(SALARY_TILE), TileKind::Salary);
        assert_eq!(board.kind(RENT_TILE), TileKind::Rent);
        assert_eq!(
            board.kind(1),
            TileKind::InsuranceOffer(InsuranceKind::Health)
        );
        assert_eq!(board.kind(18), TileKind::ExternalEvent);
    }

    #[test]
    fn test_every_insurance_line_has_two_tiles() {
        let board = Board::standard();
        for kind in InsuranceKind::ALL {
            let count = (0..BOARD_SIZE)
                .filter(|&i| board.kind(i) == TileKind::InsuranceOffer(kind))
                .count();
            assert_eq!(count, 2, "{kind} should appear on exactly two tiles");
        }
    }

    #[test]
    fn test_layout_tile_counts() {
        let board = Board::standard();
        let externals = (0..BOARD_SIZE)
            .filter(|&i| board.kind(i) == TileKind::ExternalEvent)
            .count();
        let laps = (0..BOARD_SIZE).filter(|&i| board.is_lap_tile(i)).count();
        assert_eq!(externals, 6);
        assert_eq!(laps, 2);
    }

    #[test]
    fn test_index_wraps() {
        let board = Board::standard();
        assert_eq!(board.kind(22), TileKind::Salary);
        assert_eq!(board.kind(33), TileKind::Rent);
    }

    #[test]
    fn test_distance_forward() {
        assert_eq!(Board::distance_forward(0, 5), 5);
        assert_eq!(Board::distance_forward(20, 1), 3);
        assert_eq!(Board::distance_forward(11, 11), 0);
    }

    #[test]
    fn test_corners() {
        assert!(Board::is_corner(0));
        assert!(Board::is_corner(18));
        assert!(!Board::is_corner(3));
    }
}
