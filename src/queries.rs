// src/queries.rs
//
// Read-only aggregates over the Olist warehouse schema
// (orders, order_reviews, order_items, sellers, products).
// Column names and aliases are part of the API response shape.

/// Average review score and order count, split by on-time vs. late delivery.
/// A delivery is late only when it arrived strictly after the estimate.
pub const RATING_SUMMARY: &str = r#"
    SELECT
        CASE WHEN o.order_delivered_customer_date > o.order_estimated_delivery_date
             THEN 'Late Delivery'
             ELSE 'On Time'
        END AS delivery_status,
        ROUND(AVG(r.review_score)::numeric, 2)::float8 AS avg_review_score,
        COUNT(o.order_id) AS total_orders
    FROM orders o
    JOIN order_reviews r ON o.order_id = r.order_id
    WHERE o.order_status = 'delivered' AND o.order_delivered_customer_date IS NOT NULL
    GROUP BY 1
"#;

/// Delay rate and average product weight per seller city, for cities with
/// more than ten delivered order items, heaviest first.
pub const DELAY_CORRELATION: &str = r#"
    WITH cte AS (
        SELECT
            s.seller_city, s.seller_state,
            COUNT(o.order_id) AS "total",
            SUM(CASE WHEN o.order_estimated_delivery_date < o.order_delivered_customer_date
                     THEN 1 ELSE 0 END) AS "late_orders",
            ROUND(AVG(p.product_weight_g)::numeric, 2) AS "avg_weight_per_order"
        FROM orders o
        JOIN order_items oi ON o.order_id = oi.order_id
        JOIN sellers s ON oi.seller_id = s.seller_id
        JOIN products p ON oi.product_id = p.product_id
        WHERE o.order_status = 'delivered' AND o.order_delivered_customer_date IS NOT NULL
        GROUP BY 1, 2
    )
    SELECT
        seller_city,
        seller_state,
        total,
        late_orders,
        avg_weight_per_order::float8 AS "avg_weight_per_order",
        ROUND(((late_orders::numeric / total) * 100), 2)::float8 AS "Delay_Rate"
    FROM cte
    WHERE total > 10
    ORDER BY "avg_weight_per_order" DESC
"#;

pub const PING: &str = "SELECT 1";

/// Qualifying groups must have strictly more than this many rows.
pub const MIN_GROUP_SIZE: i64 = 10;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_query_uses_strict_late_comparison() {
        assert!(RATING_SUMMARY
            .contains("o.order_delivered_customer_date > o.order_estimated_delivery_date"));
        assert!(RATING_SUMMARY.contains("o.order_status = 'delivered'"));
    }

    #[test]
    fn correlation_query_keeps_contract_columns() {
        for col in [
            "seller_city",
            "seller_state",
            "\"total\"",
            "\"late_orders\"",
            "\"avg_weight_per_order\"",
            "\"Delay_Rate\"",
        ] {
            assert!(DELAY_CORRELATION.contains(col), "missing {col}");
        }
        assert!(DELAY_CORRELATION.contains(&format!("WHERE total > {MIN_GROUP_SIZE}")));
        assert!(DELAY_CORRELATION.contains("DESC"));
    }
}
