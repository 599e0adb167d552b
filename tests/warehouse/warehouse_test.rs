#[cfg(test)]
mod tests {
    use vigil::explorer;
    use vigil::export::{pivot_to_csv, table_to_csv};
    use vigil::kpi::KpiReport;
    use vigil::pivot::{pivot, Aggregation, PivotError, PivotSpec};
    use vigil::schema::StarSchema;
    use vigil::table::Value;
    use vigil::warehouse::{SqliteWarehouse, Warehouse};

    /// An in-memory warehouse seeded with a small star schema.
    fn warehouse() -> SqliteWarehouse {
        let wh = SqliteWarehouse::open_in_memory().unwrap();
        wh.execute_batch(
            "
            CREATE TABLE date_dim (
                date_id INTEGER PRIMARY KEY,
                year INTEGER NOT NULL,
                month INTEGER NOT NULL
            );
            CREATE TABLE customer_dim (
                customer_id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                risk_level TEXT NOT NULL,
                kyc_status TEXT NOT NULL
            );
            CREATE TABLE account_dim (
                account_id INTEGER PRIMARY KEY,
                account_type TEXT NOT NULL
            );
            CREATE TABLE channel_dim (
                channel_id INTEGER PRIMARY KEY,
                channel_type TEXT NOT NULL
            );
            CREATE TABLE product_dim (
                product_id INTEGER PRIMARY KEY,
                product_type TEXT NOT NULL
            );
            CREATE TABLE transaction_fact (
                transaction_id INTEGER PRIMARY KEY,
                date_id INTEGER,
                customer_id INTEGER,
                account_id INTEGER,
                channel_id INTEGER,
                product_id INTEGER,
                origin_country TEXT,
                destination_country TEXT,
                amount REAL
            );

            INSERT INTO date_dim VALUES (1, 2026, 1), (2, 2026, 2);
            INSERT INTO customer_dim VALUES
                (1, 'Alice', 'High', 'Incomplete'),
                (2, 'Bob', 'Low', 'Complete');
            INSERT INTO account_dim VALUES (1, 'Checking'), (2, 'Savings');
            INSERT INTO channel_dim VALUES (1, 'Online'), (2, 'Branch');
            INSERT INTO product_dim VALUES (1, 'Wire'), (2, 'Card');

            INSERT INTO transaction_fact VALUES
                (1, 1, 1, 1, 1, 1, 'US', 'US', 12000.0),
                (2, 1, 2, 2, 2, 2, 'US', 'GB', 300.0),
                (3, 2, 1, 1, 1, 1, 'US', 'FR', 6000.0),
                (4, 2, 2, 2, 1, 2, 'US', 'US', 80.0),
                (5, 2, 1, 2, 2, 1, 'DE', 'US', 950.0);
            ",
        )
        .unwrap();
        wh
    }

    #[test]
    fn test_explore_then_pivot_then_export() {
        let wh = warehouse();
        let schema = StarSchema::aml_fraud();

        let table = explorer::fetch(&wh, &schema, &["Customer", "Channel"]).unwrap();
        assert_eq!(table.row_count(), 5);
        assert_eq!(table.row_id(), Some("transaction_id"));
        // Fact columns first, then every dimension column
        let names = table.column_names();
        assert_eq!(names[0], "transaction_id");
        assert_eq!(names[1], "amount");
        assert!(names.contains(&"risk_level"));
        assert!(names.contains(&"channel_type"));

        let result = pivot(
            &table,
            &PivotSpec {
                group_column: "risk_level".into(),
                metric_column: "amount".into(),
                aggregation: Aggregation::Sum,
            },
        )
        .unwrap();
        assert_eq!(result.rows.len(), 2);
        assert_eq!(result.rows[0].group, Value::Text("High".into()));
        assert_eq!(result.rows[0].value, Value::Float(18950.0));
        assert_eq!(result.rows[1].value, Value::Float(380.0));

        assert_eq!(
            pivot_to_csv(&result),
            "risk_level,sum_amount\nHigh,18950.0\nLow,380.0\n"
        );
    }

    #[test]
    fn test_grouping_by_transaction_id_rejected_end_to_end() {
        let wh = warehouse();
        let table = explorer::fetch(&wh, &StarSchema::aml_fraud(), &["Date"]).unwrap();
        let err = pivot(
            &table,
            &PivotSpec {
                group_column: "transaction_id".into(),
                metric_column: "amount".into(),
                aggregation: Aggregation::Count,
            },
        )
        .unwrap_err();
        assert_eq!(err, PivotError::InvalidGroupColumn("transaction_id".into()));
    }

    #[test]
    fn test_kpi_summary() {
        let wh = warehouse();
        let table = KpiReport::Summary
            .fetch(&wh, &StarSchema::aml_fraud())
            .unwrap();

        assert_eq!(table.row_count(), 1);
        let row = &table.rows()[0];
        let idx = |name| table.column_index(name).unwrap();
        assert_eq!(row[idx("total_txn_count")], Value::Int(5));
        assert_eq!(row[idx("total_txn_amount")], Value::Float(19330.0));
        // One transaction above 10000
        assert_eq!(row[idx("high_value_count")], Value::Int(1));
        assert_eq!(row[idx("high_value_amount")], Value::Float(12000.0));
        // Alice is KYC-incomplete with two transactions above 5000
        assert_eq!(row[idx("suspicious_count")], Value::Int(2));
        assert_eq!(row[idx("suspicious_amount")], Value::Float(18000.0));
    }

    #[test]
    fn test_kpi_monthly_trends() {
        let wh = warehouse();
        let table = KpiReport::MonthlyTrends
            .fetch(&wh, &StarSchema::aml_fraud())
            .unwrap();

        assert_eq!(table.column_names(), ["year", "month", "txn_count", "total_amount"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows()[0][1], Value::Int(1));
        assert_eq!(table.rows()[0][2], Value::Int(2));
        assert_eq!(table.rows()[1][1], Value::Int(2));
        assert_eq!(table.rows()[1][2], Value::Int(3));
    }

    #[test]
    fn test_kpi_distributions() {
        let wh = warehouse();
        let schema = StarSchema::aml_fraud();

        let risk = KpiReport::RiskDistribution.fetch(&wh, &schema).unwrap();
        // Most active level first
        assert_eq!(risk.rows()[0][0], Value::Text("High".into()));
        assert_eq!(risk.rows()[0][1], Value::Int(3));

        let channel = KpiReport::ChannelDistribution.fetch(&wh, &schema).unwrap();
        assert_eq!(channel.column_names(), ["channel_type", "txn_count", "total_amount"]);
        assert_eq!(channel.rows()[0][1], Value::Int(3));
    }

    #[test]
    fn test_kpi_top_customers() {
        let wh = warehouse();
        let table = KpiReport::TopCustomers
            .fetch(&wh, &StarSchema::aml_fraud())
            .unwrap();

        assert_eq!(table.rows()[0][0], Value::Text("Alice".into()));
        assert_eq!(table.rows()[0][2], Value::Int(3));
        assert_eq!(table.rows()[1][0], Value::Text("Bob".into()));
    }

    #[test]
    fn test_kpi_foreign_transactions() {
        let wh = warehouse();
        let table = KpiReport::ForeignTransactions
            .fetch(&wh, &StarSchema::aml_fraud())
            .unwrap();

        // Three cross-border rows, largest amount first
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.rows()[0][1], Value::Float(6000.0));
        assert_eq!(table.rows()[1][1], Value::Float(950.0));
        assert_eq!(table.rows()[2][1], Value::Float(300.0));
        assert_eq!(
            table.column_names(),
            [
                "transaction_id",
                "amount",
                "origin_country",
                "destination_country",
                "customer_name"
            ]
        );
    }

    #[test]
    fn test_csv_export_of_query_result() {
        let wh = warehouse();
        let table = wh
            .fetch_sql("SELECT name, risk_level FROM customer_dim ORDER BY customer_id")
            .unwrap();
        assert_eq!(
            table_to_csv(&table),
            "name,risk_level\nAlice,High\nBob,Low\n"
        );
    }

    #[test]
    fn test_row_cap_applies() {
        let wh = warehouse();
        let mut inserts = String::new();
        for i in 6..=5100 {
            inserts.push_str(&format!(
                "INSERT INTO transaction_fact VALUES ({}, 1, 1, 1, 1, 1, 'US', 'US', 1.0);\n",
                i
            ));
        }
        wh.execute_batch(&inserts).unwrap();

        let table = explorer::fetch(&wh, &StarSchema::aml_fraud(), &["Date"]).unwrap();
        assert_eq!(table.row_count() as u64, explorer::ROW_CAP);
    }
}
