use serde::{Deserialize, Serialize};
use chrono::{Datelike, Duration, NaiveDate};

use crate::models::ActivityMap;
use super::ColorTier;

pub const GRID_WEEKS: usize = 52;
pub const GRID_ROWS: usize = 7;
pub const GRID_DAYS: usize = GRID_WEEKS * GRID_ROWS;

/// The 364 calendar days ending at `today` inclusive, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayGrid {
    days: Vec<NaiveDate>,
}

impl DayGrid {
    pub fn ending_at(today: NaiveDate) -> Self {
        let first = today - Duration::days(GRID_DAYS as i64 - 1);
        let days = (0..GRID_DAYS as i64)
            .map(|offset| first + Duration::days(offset))
            .collect();
        Self { days }
    }

    pub fn days(&self) -> &[NaiveDate] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn first(&self) -> NaiveDate {
        self.days[0]
    }

    pub fn last(&self) -> NaiveDate {
        self.days[GRID_DAYS - 1]
    }

    /// Column-major position of a day index: `(col, row)`
    pub fn position(index: usize) -> (usize, usize) {
        (index / GRID_ROWS, index % GRID_ROWS)
    }
}

/// Cell size, spacing and outer offset in canvas units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridGeometry {
    pub cell: u32,
    pub gap: u32,
    pub margin: u32,
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self {
            cell: 12,
            gap: 4,
            margin: 20,
        }
    }
}

impl GridGeometry {
    pub fn pitch(&self) -> u32 {
        self.cell + self.gap
    }

    pub fn origin(&self, col: usize, row: usize) -> (u32, u32) {
        (
            self.margin + col as u32 * self.pitch(),
            self.margin + row as u32 * self.pitch(),
        )
    }

    pub fn canvas(&self) -> (u32, u32) {
        (
            GRID_WEEKS as u32 * self.pitch() + self.margin,
            GRID_ROWS as u32 * self.pitch() + self.margin,
        )
    }

    /// `canvas` without overflow, `None` when a dimension does not fit in `u32`
    pub fn checked_canvas(&self) -> Option<(u32, u32)> {
        let pitch = self.cell.checked_add(self.gap)?;
        let extent = |count: usize| (count as u32).checked_mul(pitch)?.checked_add(self.margin);
        Some((extent(GRID_WEEKS)?, extent(GRID_ROWS)?))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub date: NaiveDate,
    pub count: u32,
    pub col: usize,
    pub row: usize,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub tier: ColorTier,
}

impl Cell {
    pub fn color(&self) -> &'static str {
        self.tier.color()
    }
}

/// Renderer-agnostic description of the heatmap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatmapLayout {
    pub geometry: GridGeometry,
    pub cells: Vec<Cell>,
    pub width: u32,
    pub height: u32,
}

impl HeatmapLayout {
    pub fn compute(activity: &ActivityMap, today: NaiveDate, geometry: GridGeometry) -> Self {
        let grid = DayGrid::ending_at(today);
        let cells = grid
            .days()
            .iter()
            .enumerate()
            .map(|(index, &date)| {
                let count = activity.get(date);
                let (col, row) = DayGrid::position(index);
                let (x, y) = geometry.origin(col, row);
                Cell {
                    date,
                    count,
                    col,
                    row,
                    x,
                    y,
                    width: geometry.cell,
                    height: geometry.cell,
                    tier: ColorTier::for_count(count),
                }
            })
            .collect();

        let (width, height) = geometry.canvas();
        Self {
            geometry,
            cells,
            width,
            height,
        }
    }

    pub fn active_days(&self) -> usize {
        self.cells.iter().filter(|c| c.count > 0).count()
    }

    pub fn total(&self) -> u64 {
        self.cells.iter().map(|c| c.count as u64).sum()
    }

    /// First column of each calendar month, for month labels
    pub fn month_starts(&self) -> Vec<(usize, NaiveDate)> {
        let mut starts: Vec<(usize, NaiveDate)> = Vec::new();
        for cell in self.cells.iter().filter(|c| c.row == 0) {
            let is_new_month = match starts.last() {
                Some((_, previous)) => previous.month() != cell.date.month(),
                None => true,
            };
            if is_new_month {
                starts.push((cell.col, cell.date));
            }
        }
        starts
    }
}
