//! Property-based tests for the row windowing invariants.
//!
//! Tests validate:
//! 1. Placed rows always equal the rows overlapping the viewport
//! 2. Sub-row scrolls fill only the rows entering the viewport
//! 3. The scrollable range follows the item count
//! 4. A pass with nothing changed fills nothing
//! 5. Fill-in indices ascend within a pass

mod common;

use common::{drain, expected_window, placed, table};
use proptest::prelude::*;

/// Table geometry whose pool always covers the viewport.
#[derive(Debug, Clone, Copy)]
struct Geometry {
    rows: usize,
    columns: usize,
    count: usize,
    cell_height: u32,
    /// Lines past `rows * cell_height`; fewer than one row.
    extra: u32,
}

impl Geometry {
    fn height(&self) -> u32 {
        self.rows as u32 * self.cell_height + self.extra
    }

    fn width(&self) -> u32 {
        self.columns as u32 * 8
    }

    fn virtual_rows(&self) -> usize {
        self.count.div_ceil(self.columns)
    }

    fn upper(&self) -> u64 {
        self.virtual_rows() as u64 * u64::from(self.cell_height)
    }

    fn max_value(&self) -> u64 {
        self.upper().saturating_sub(u64::from(self.height()))
    }

    fn window(&self, value: u64) -> Vec<usize> {
        expected_window(
            value,
            u64::from(self.height()),
            u64::from(self.cell_height),
            self.virtual_rows(),
        )
    }
}

// ===== Arbitrary Strategies =====

fn geometry() -> impl Strategy<Value = Geometry> {
    (1usize..6, 1usize..5, 0usize..400, 1u32..16).prop_flat_map(
        |(rows, columns, count, cell_height)| {
            let max_extra = (rows as u32).min(cell_height);
            (0..max_extra).prop_map(move |extra| Geometry {
                rows,
                columns,
                count,
                cell_height,
                extra,
            })
        },
    )
}

// ===== Property 1: Window Coverage =====

proptest! {
    #[test]
    fn placed_rows_match_viewport(
        geo in geometry(),
        targets in prop::collection::vec(0u64..2_000, 1..20),
    ) {
        let (mut table, _log) = table(geo.rows, geo.columns, geo.count, geo.width(), geo.height());
        prop_assert_eq!(table.cell_height(), geo.cell_height);

        for target in targets {
            let value = table.scroll_to(target);
            prop_assert_eq!(value, target.min(geo.max_value()));
            prop_assert_eq!(placed(&table), geo.window(value), "value {}", value);
            prop_assert!(table.fault().is_none());
        }
    }

    #[test]
    fn aligned_offsets_place_exactly_visible_rows(
        geo in geometry().prop_map(|g| Geometry { extra: 0, ..g }),
        row in 0u64..60,
    ) {
        let (mut table, _log) = table(geo.rows, geo.columns, geo.count, geo.width(), geo.height());
        // With no extra lines the last offset is row aligned too
        let value = (row * u64::from(geo.cell_height)).min(geo.max_value());

        table.scroll_to(value);

        let head = (value / u64::from(geo.cell_height)) as usize;
        let end = (head + geo.rows).min(geo.virtual_rows());
        prop_assert_eq!(placed(&table), (head..end).collect::<Vec<_>>());
    }
}

// ===== Property 2: Minimal Churn =====

/// A row-aligned start offset and a scroll of less than one row from it,
/// both within range.
fn churn_case() -> impl Strategy<Value = (Geometry, u64, u64)> {
    geometry()
        .prop_map(|g| Geometry {
            cell_height: g.cell_height.max(2),
            count: g.count.max((g.rows + 2) * g.columns),
            ..g
        })
        .prop_flat_map(|g| {
            let height = u64::from(g.cell_height);
            (Just(g), 1..height)
        })
        .prop_flat_map(|(g, delta)| {
            let last_row = (g.max_value() - delta) / u64::from(g.cell_height);
            (Just(g), 0..=last_row, Just(delta))
        })
        .prop_map(|(g, row, delta)| (g, row * u64::from(g.cell_height), delta))
}

proptest! {
    #[test]
    fn sub_row_scroll_fills_only_entering_rows((geo, start, delta) in churn_case()) {
        let (mut table, log) = table(geo.rows, geo.columns, geo.count, geo.width(), geo.height());
        table.scroll_to(start);
        drain(&log);

        table.scroll_to(start + delta);

        let before = geo.window(start);
        let entering: Vec<usize> = geo
            .window(start + delta)
            .into_iter()
            .filter(|r| !before.contains(r))
            .flat_map(|r| r * geo.columns..(r + 1) * geo.columns)
            .collect();
        prop_assert_eq!(drain(&log), entering);
    }
}

// ===== Property 3: Range Invariants =====

proptest! {
    #[test]
    fn set_count_keeps_range_consistent(
        geo in geometry(),
        target in 0u64..2_000,
        new_count in 0usize..400,
    ) {
        let (mut table, _log) = table(geo.rows, geo.columns, geo.count, geo.width(), geo.height());
        table.scroll_to(target);

        table.set_count(new_count);

        let values = table.adjustment().values();
        let upper = new_count.div_ceil(geo.columns) as u64 * u64::from(geo.cell_height);
        prop_assert_eq!(values.upper, upper);
        prop_assert_eq!(values.lower, 0);
        prop_assert!(values.value <= upper.saturating_sub(values.page_size));
        prop_assert_eq!(table.virtual_rows(), new_count.div_ceil(geo.columns));
    }
}

// ===== Property 4: Idempotence =====

proptest! {
    #[test]
    fn repeated_pass_fills_nothing(geo in geometry(), target in 0u64..2_000) {
        let (mut table, log) = table(geo.rows, geo.columns, geo.count, geo.width(), geo.height());
        table.scroll_to(target);
        drain(&log);

        table.on_position_changed();

        prop_assert!(drain(&log).is_empty());
        prop_assert_eq!(placed(&table), geo.window(table.adjustment().value()));
    }
}

// ===== Property 5: Fill Ordering =====

proptest! {
    #[test]
    fn fill_indices_ascend_within_a_pass(
        geo in geometry(),
        targets in prop::collection::vec(0u64..2_000, 1..20),
    ) {
        let (mut table, log) = table(geo.rows, geo.columns, geo.count, geo.width(), geo.height());

        for target in targets {
            table.scroll_to(target);
            let filled = drain(&log);
            prop_assert!(
                filled.windows(2).all(|pair| pair[0] < pair[1]),
                "not ascending: {:?}",
                filled
            );
        }
    }
}
