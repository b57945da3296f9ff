use sql_gateway::prelude::*;

async fn gateway(db_name: &str) -> Result<QueryGateway, SqlGatewayError> {
    let provider =
        ConnectionProvider::sqlite_builder(format!("file:{db_name}?mode=memory&cache=shared"))
            .max_connections(2)
            .build()
            .await?;
    provider
        .execute_batch(
            "CREATE TABLE items (id INTEGER PRIMARY KEY, qty INTEGER NOT NULL);
             INSERT INTO items VALUES (1, 10);
             INSERT INTO items VALUES (2, 20);",
        )
        .await?;
    Ok(QueryGateway::new(provider))
}

#[tokio::test]
async fn write_smuggled_into_a_subquery_fails_at_parse_time() -> Result<(), SqlGatewayError> {
    let gw = gateway("reject_smuggle").await?;

    let err = gw
        .execute("SELECT * FROM (UPDATE items SET qty = 0)", 5)
        .await
        .unwrap_err();
    assert!(
        matches!(err, SqlGatewayError::ExecutionError(_)),
        "expected execution failure, got {err:?}"
    );
    assert_eq!(err.reason_code(), "execution-failure");

    // No write happened.
    let rs = gw
        .execute("SELECT qty FROM items WHERE id = 1", 5)
        .await?;
    assert_eq!(rs.rows()[0].get("qty").unwrap().as_int(), Some(&10));
    Ok(())
}

#[tokio::test]
async fn chained_statements_fail_inside_the_wrapper() -> Result<(), SqlGatewayError> {
    let gw = gateway("reject_chain").await?;

    // Passes the prefix gate, but the interior semicolon is invalid inside
    // the bounding subquery.
    let err = gw
        .execute("SELECT 1; DROP TABLE items", 5)
        .await
        .unwrap_err();
    assert!(matches!(err, SqlGatewayError::ExecutionError(_)));

    let rs = gw.execute("SELECT count(*) AS n FROM items", 5).await?;
    assert_eq!(rs.rows()[0].get("n").unwrap().as_int(), Some(&2));
    Ok(())
}

#[tokio::test]
async fn missing_table_diagnostic_names_the_table() -> Result<(), SqlGatewayError> {
    let gw = gateway("reject_missing").await?;
    let err = gw
        .execute("select * from nonexistent_table", 5)
        .await
        .unwrap_err();
    match err {
        SqlGatewayError::ExecutionError(detail) => {
            assert!(
                detail.contains("nonexistent_table"),
                "diagnostic should mention the missing table: {detail}"
            );
        }
        other => panic!("expected ExecutionError, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn malformed_sql_is_an_execution_failure() -> Result<(), SqlGatewayError> {
    let gw = gateway("reject_malformed").await?;
    let err = gw.execute("SELECT FROM WHERE", 5).await.unwrap_err();
    assert!(matches!(err, SqlGatewayError::ExecutionError(_)));
    assert!(!err.is_retryable());
    Ok(())
}

#[tokio::test]
async fn unknown_column_is_an_execution_failure() -> Result<(), SqlGatewayError> {
    let gw = gateway("reject_column").await?;
    let err = gw
        .execute("SELECT no_such_column FROM items", 5)
        .await
        .unwrap_err();
    match err {
        SqlGatewayError::ExecutionError(detail) => {
            assert!(detail.contains("no_such_column"), "got: {detail}");
        }
        other => panic!("expected ExecutionError, got {other:?}"),
    }
    Ok(())
}
