// Copyright 2020 Zachary Stewart
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::iter;

use crate::ships::ShipKind;

/// Number of ships of each kind in a fleet, in the order of [`ShipKind::ALL`]:
/// carriers, battleships, cruisers, destroyers, submarines.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct FleetCounts([usize; 5]);

impl FleetCounts {
    /// Construct the counts for a fleet.
    pub fn new(
        carriers: usize,
        battleships: usize,
        cruisers: usize,
        destroyers: usize,
        submarines: usize,
    ) -> Self {
        FleetCounts([carriers, battleships, cruisers, destroyers, submarines])
    }

    /// Number of ships of the given kind.
    pub fn count(&self, kind: ShipKind) -> usize {
        self.0[kind.index()]
    }

    /// Get an iterator over every ship of the fleet, all carriers first, then all
    /// battleships, and so on down to the submarines.
    pub fn ships<'a>(&'a self) -> impl 'a + Iterator<Item = ShipKind> {
        ShipKind::ALL
            .iter()
            .flat_map(move |&kind| iter::repeat(kind).take(self.count(kind)))
    }

    /// Total number of ships. Saturates at `usize::MAX`.
    pub fn ship_count(&self) -> usize {
        self.0.iter().fold(0, |total, &count| total.saturating_add(count))
    }

    /// Total length of all ships, which is also the initial health of the fleet.
    /// Saturates at `usize::MAX`, which no ocean can hold.
    pub fn total_length(&self) -> usize {
        ShipKind::ALL.iter().fold(0, |total, &kind| {
            total.saturating_add(self.count(kind).saturating_mul(kind.len()))
        })
    }
}

impl From<[usize; 5]> for FleetCounts {
    fn from(counts: [usize; 5]) -> Self {
        FleetCounts(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_longest_first() {
        let fleet = FleetCounts::new(1, 0, 2, 0, 1);
        let ships: Vec<_> = fleet.ships().collect();
        assert_eq!(
            ships,
            vec![
                ShipKind::Carrier,
                ShipKind::Cruiser,
                ShipKind::Cruiser,
                ShipKind::Submarine
            ]
        );
        assert_eq!(fleet.ship_count(), 4);
        assert_eq!(fleet.total_length(), 12);
    }

    #[test]
    fn totals_saturate() {
        let fleet = FleetCounts::new(usize::MAX / 5 + 1, 0, 0, 0, 0);
        assert_eq!(fleet.ship_count(), usize::MAX / 5 + 1);
        assert_eq!(fleet.total_length(), usize::MAX);

        let fleet = FleetCounts::new(usize::MAX, 0, 0, 0, 1);
        assert_eq!(fleet.ship_count(), usize::MAX);
    }
}
