#[cfg(test)]
mod tests {
    use vigil::pivot::{pivot, Aggregation, PivotError, PivotSpec};
    use vigil::table::{TableResult, Value};

    fn spec(group: &str, metric: &str, agg: Aggregation) -> PivotSpec {
        PivotSpec {
            group_column: group.to_string(),
            metric_column: metric.to_string(),
            aggregation: agg,
        }
    }

    /// A small exploration result: fact rows joined to a channel dimension.
    fn transactions() -> TableResult {
        TableResult::new(
            vec![
                "transaction_id".into(),
                "channel_type".into(),
                "risk_level".into(),
                "amount".into(),
            ],
            vec![
                vec![
                    Value::Int(1),
                    Value::Text("Online".into()),
                    Value::Text("High".into()),
                    Value::Float(12000.0),
                ],
                vec![
                    Value::Int(2),
                    Value::Text("Branch".into()),
                    Value::Text("Low".into()),
                    Value::Float(250.5),
                ],
                vec![
                    Value::Int(3),
                    Value::Text("Online".into()),
                    Value::Text("High".into()),
                    Value::Float(8000.0),
                ],
                vec![
                    Value::Int(4),
                    Value::Text("ATM".into()),
                    Value::Text("Low".into()),
                    Value::Null,
                ],
                vec![
                    Value::Int(5),
                    Value::Text("Online".into()),
                    Value::Text("Medium".into()),
                    Value::Float(99.99),
                ],
            ],
        )
        .with_row_id("transaction_id")
    }

    #[test]
    fn test_sum_by_channel() {
        let result = pivot(
            &transactions(),
            &spec("channel_type", "amount", Aggregation::Sum),
        )
        .unwrap();

        assert_eq!(result.group_column, "channel_type");
        assert_eq!(result.value_column, "sum_amount");
        // First-appearance order, one row per distinct channel
        let groups: Vec<_> = result.rows.iter().map(|r| r.group.clone()).collect();
        assert_eq!(
            groups,
            vec![
                Value::Text("Online".into()),
                Value::Text("Branch".into()),
                Value::Text("ATM".into()),
            ]
        );
        assert_eq!(result.rows[0].value, Value::Float(20099.99));
        assert_eq!(result.rows[1].value, Value::Float(250.5));
        // Only a null amount in this partition
        assert_eq!(result.rows[2].value, Value::Null);
    }

    #[test]
    fn test_every_aggregation_over_one_partition() {
        let table = transactions();
        let online = |agg| {
            pivot(&table, &spec("channel_type", "amount", agg)).unwrap().rows[0]
                .value
                .clone()
        };

        assert_eq!(online(Aggregation::Sum), Value::Float(20099.99));
        assert_eq!(
            online(Aggregation::Mean),
            Value::Float(20099.99 / 3.0)
        );
        assert_eq!(online(Aggregation::Count), Value::Int(3));
        assert_eq!(online(Aggregation::Min), Value::Float(99.99));
        assert_eq!(online(Aggregation::Max), Value::Float(12000.0));
    }

    #[test]
    fn test_row_counts_are_conserved() {
        // Every input row lands in exactly one partition
        let table = transactions();
        let result = pivot(&table, &spec("risk_level", "amount", Aggregation::Count)).unwrap();
        // Count aggregates skip the null amount, so compare against the
        // non-null metric count
        let non_null = table
            .rows()
            .iter()
            .filter(|r| !r[3].is_null())
            .count() as i64;
        let total: i64 = result
            .rows
            .iter()
            .map(|r| match r.value {
                Value::Int(n) => n,
                _ => 0,
            })
            .sum();
        assert_eq!(total, non_null);
    }

    #[test]
    fn test_group_sums_add_up_to_column_total() {
        let table = transactions();
        let column_total: f64 = table
            .rows()
            .iter()
            .filter_map(|row| row[3].as_f64())
            .sum();

        for group in ["channel_type", "risk_level"] {
            let result = pivot(&table, &spec(group, "amount", Aggregation::Sum)).unwrap();
            let group_total: f64 = result
                .rows
                .iter()
                .filter_map(|row| row.value.as_f64())
                .sum();
            assert!(
                (group_total - column_total).abs() < 1e-9,
                "grouped by {}: {} != {}",
                group,
                group_total,
                column_total
            );
        }
    }

    #[test]
    fn test_partition_sizes_add_up_to_row_count() {
        // Null-free metric column, so per-group counts are partition sizes
        let table = TableResult::new(
            vec!["region".into(), "amount".into()],
            vec![
                vec![Value::Text("A".into()), Value::Int(10)],
                vec![Value::Text("B".into()), Value::Int(20)],
                vec![Value::Text("A".into()), Value::Int(30)],
                vec![Value::Null, Value::Int(40)],
                vec![Value::Text("B".into()), Value::Int(50)],
            ],
        );
        let result = pivot(&table, &spec("region", "amount", Aggregation::Count)).unwrap();
        let partitioned: i64 = result
            .rows
            .iter()
            .map(|row| match row.value {
                Value::Int(n) => n,
                _ => panic!("count is always an integer"),
            })
            .sum();
        assert_eq!(partitioned as usize, table.row_count());
    }

    #[test]
    fn test_grouping_by_row_id_is_rejected() {
        let err = pivot(
            &transactions(),
            &spec("transaction_id", "amount", Aggregation::Sum),
        )
        .unwrap_err();
        assert_eq!(
            err,
            PivotError::InvalidGroupColumn("transaction_id".into())
        );
    }

    #[test]
    fn test_unknown_columns_are_rejected() {
        let table = transactions();
        assert_eq!(
            pivot(&table, &spec("merchant", "amount", Aggregation::Sum)).unwrap_err(),
            PivotError::InvalidGroupColumn("merchant".into())
        );
        assert_eq!(
            pivot(&table, &spec("channel_type", "fee", Aggregation::Sum)).unwrap_err(),
            PivotError::NonNumericMetric("fee".into())
        );
    }

    #[test]
    fn test_text_metric_is_rejected() {
        let err = pivot(
            &transactions(),
            &spec("channel_type", "risk_level", Aggregation::Mean),
        )
        .unwrap_err();
        assert_eq!(err, PivotError::NonNumericMetric("risk_level".into()));
    }

    #[test]
    fn test_empty_input_yields_empty_result() {
        let table = TableResult::new(vec!["g".into(), "m".into()], vec![]);
        let result = pivot(&table, &spec("g", "m", Aggregation::Sum)).unwrap();
        assert!(result.rows.is_empty());
        assert_eq!(result.value_column, "sum_m");
    }

    #[test]
    fn test_single_group() {
        let table = TableResult::new(
            vec!["g".into(), "m".into()],
            vec![
                vec![Value::Text("only".into()), Value::Int(2)],
                vec![Value::Text("only".into()), Value::Int(3)],
            ],
        );
        let result = pivot(&table, &spec("g", "m", Aggregation::Sum)).unwrap();
        assert_eq!(result.rows.len(), 1);
        assert_eq!(result.rows[0].value, Value::Int(5));
    }

    #[test]
    fn test_numeric_groups_stay_typed() {
        // Int(1) and Text("1") are different groups
        let table = TableResult::new(
            vec!["code".into(), "m".into()],
            vec![
                vec![Value::Int(1), Value::Int(10)],
                vec![Value::Text("1".into()), Value::Int(20)],
            ],
        );
        let result = pivot(&table, &spec("code", "m", Aggregation::Sum)).unwrap();
        assert_eq!(result.rows.len(), 2);
    }

    #[test]
    fn test_integer_sums_stay_integral() {
        let table = TableResult::new(
            vec!["g".into(), "m".into()],
            vec![
                vec![Value::Text("a".into()), Value::Int(i64::MAX)],
                vec![Value::Text("a".into()), Value::Int(1)],
                vec![Value::Text("b".into()), Value::Int(7)],
            ],
        );
        let result = pivot(&table, &spec("g", "m", Aggregation::Sum)).unwrap();
        // Overflow promotes rather than wrapping or panicking
        assert_eq!(result.rows[0].value, Value::Float(i64::MAX as f64 + 1.0));
        assert_eq!(result.rows[1].value, Value::Int(7));
    }

    #[test]
    fn test_decimal_strings_aggregate() {
        // DECIMAL columns surfaced as text still behave as metrics
        let table = TableResult::new(
            vec!["g".into(), "m".into()],
            vec![
                vec![Value::Text("a".into()), Value::Text("10.25".into())],
                vec![Value::Text("a".into()), Value::Text("0.75".into())],
            ],
        );
        let result = pivot(&table, &spec("g", "m", Aggregation::Sum)).unwrap();
        assert_eq!(result.rows[0].value, Value::Float(11.0));
    }

    #[test]
    fn test_result_serializes_with_names() {
        let result = pivot(
            &transactions(),
            &spec("risk_level", "amount", Aggregation::Max),
        )
        .unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["group_column"], "risk_level");
        assert_eq!(json["value_column"], "max_amount");
        assert_eq!(json["rows"][0]["group"], "High");
        assert_eq!(json["rows"][0]["value"], 12000.0);
    }
}
