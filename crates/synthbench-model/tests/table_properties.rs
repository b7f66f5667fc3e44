// SPDX-License-Identifier: Apache-2.0

use proptest::prelude::*;
use serde_json::{Map, Value};
use synthbench_model::CaseTable;

type RawRows = Vec<Vec<(String, i64)>>;

fn rows_strategy() -> impl Strategy<Value = RawRows> {
    prop::collection::vec(
        prop::collection::vec(("[a-d]{1,4}", any::<i64>()), 0..5),
        0..8,
    )
}

fn to_ndjson(rows: &RawRows) -> String {
    rows.iter()
        .map(|fields| {
            let object: Map<String, Value> = fields
                .iter()
                .map(|(name, cell)| (name.clone(), Value::from(*cell)))
                .collect();
            serde_json::to_string(&Value::Object(object)).expect("encode row")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

proptest! {
    #[test]
    fn concat_row_count_is_the_sum_of_both_sides(left in rows_strategy(), right in rows_strategy()) {
        let a = CaseTable::from_ndjson(&to_ndjson(&left)).expect("left table");
        let b = CaseTable::from_ndjson(&to_ndjson(&right)).expect("right table");
        let (a_rows, b_rows) = (a.row_count(), b.row_count());
        let merged = a.clone().concat(b.clone());
        prop_assert_eq!(merged.row_count(), a_rows + b_rows);
        for column in a.columns().iter().chain(b.columns().iter()) {
            prop_assert!(merged.has_column(column));
        }
    }

    #[test]
    fn with_column_reaches_every_row(rows in rows_strategy(), flag in any::<bool>()) {
        let table = CaseTable::from_ndjson(&to_ndjson(&rows))
            .expect("table")
            .with_column("edge_case", Value::Bool(flag));
        prop_assert!(table.has_column("edge_case"));
        for row in table.rows() {
            prop_assert_eq!(row.value("edge_case"), &Value::Bool(flag));
        }
    }

    #[test]
    fn rename_preserves_row_count_and_drops_the_source_column(rows in rows_strategy()) {
        let table = CaseTable::from_ndjson(&to_ndjson(&rows)).expect("table");
        let rows_before = table.row_count();
        let had_source = table.has_column("a");
        let renamed = table.rename_column("a", "zz");
        prop_assert_eq!(renamed.row_count(), rows_before);
        prop_assert!(!renamed.has_column("a"));
        prop_assert_eq!(renamed.has_column("zz"), had_source);
    }
}
