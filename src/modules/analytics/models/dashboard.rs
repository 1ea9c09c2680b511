// Shapes consumed by the admin dashboard chart widgets. Field names follow
// the JSON the frontend expects (camelCase at the top level, short
// lowercase keys inside the slices).

use rust_decimal::Decimal;
use serde::Serialize;

use super::records::LowStockProduct;

// Chart widgets consume plain JSON numbers, so every monetary field here
// serializes through the arbitrary-precision module instead of the default
// string form.

/// One point of the gapless time series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    /// Short axis label, e.g. "Jan 5" or "Jan"
    pub name: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub revenue: Decimal,
    pub orders: i64,
    /// Bucket key, `YYYY-MM-DD` or `YYYY-MM`
    pub date: String,
}

/// Units and revenue sold per category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySlice {
    pub name: String,
    /// Units sold
    pub value: i64,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub revenue: Decimal,
}

/// Units and revenue sold per product (top 5)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSlice {
    pub name: String,
    /// Units sold
    pub sales: i64,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub revenue: Decimal,
}

/// Completed-vs-cancelled split; zero-count entries are omitted
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusSlice {
    pub name: String,
    pub value: i64,
}

/// Units and revenue sold per gender tag
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenderSlice {
    pub name: String,
    /// Units sold
    pub value: i64,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub revenue: Decimal,
}

/// One star of the fixed 5→1 rating histogram
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingBucket {
    pub rating: i32,
    pub count: i64,
}

/// Everything the admin dashboard renders for one reporting window
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total_revenue: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total_commissions: Decimal,
    pub total_orders: i64,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub average_order_value: Decimal,
    pub new_customers_count: i64,
    pub low_stock_products: Vec<LowStockProduct>,
    pub chart_data: Vec<ChartPoint>,
    pub category_data: Vec<CategorySlice>,
    pub product_data: Vec<ProductSlice>,
    pub status_data: Vec<StatusSlice>,
    pub gender_data: Vec<GenderSlice>,
    pub total_reviews: i64,
    pub average_rating: f64,
    pub rating_distribution: Vec<RatingBucket>,
}
