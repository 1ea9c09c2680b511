// Builds the admin dashboard summary for a reporting window.
//
// The pipeline is fetch -> one forward pass over orders -> calendar gap
// fill -> sort/truncate into chart shapes. The aggregation itself is a pure
// function of the fetched rows and "now", so it is tested without a
// database.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::info;

use crate::core::Result;
use crate::modules::analytics::models::{
    CategorySlice, ChartPoint, DashboardSummary, GenderSlice, LowStockProduct, OrderRecord,
    Period, ProductSlice, RatingBucket, StatusSlice, TimeBucket,
};
use crate::modules::analytics::repositories::AnalyticsRepository;
use crate::modules::catalog::models::Gender;
use crate::modules::orders::models::OrderStatus;

/// Products with stock below this are flagged on the dashboard
pub const LOW_STOCK_THRESHOLD: i32 = 10;
/// Low-stock list and top-product breakdown are both capped at this
pub const TOP_LIMIT: usize = 5;

const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Default)]
struct SeriesAccumulator {
    revenue: Decimal,
    orders: i64,
}

#[derive(Default)]
struct BreakdownAccumulator {
    units: i64,
    revenue: Decimal,
}

/// Service producing the dashboard summary
pub struct AnalyticsService {
    analytics_repo: Arc<dyn AnalyticsRepository>,
}

impl AnalyticsService {
    pub fn new(analytics_repo: Arc<dyn AnalyticsRepository>) -> Self {
        Self { analytics_repo }
    }

    /// Fetch the window and aggregate it into the dashboard summary
    ///
    /// The four reads are independent of each other and run concurrently.
    pub async fn dashboard(&self, period: Period) -> Result<DashboardSummary> {
        let now = Utc::now();
        let start = period.start_from(now);

        info!(period = %period, start = %start, "Building dashboard summary");

        let (orders, new_customers_count, low_stock_products, ratings) = tokio::try_join!(
            self.analytics_repo.orders_since(start),
            self.analytics_repo.new_customers_since(start),
            self.analytics_repo
                .low_stock_products(LOW_STOCK_THRESHOLD, TOP_LIMIT as i64),
            self.analytics_repo.ratings_since(start),
        )?;

        Ok(Self::aggregate(
            period,
            now,
            &orders,
            new_customers_count,
            low_stock_products,
            &ratings,
        ))
    }

    /// Pure aggregation of one reporting window
    ///
    /// A single forward pass over the orders tallies statuses, counts every
    /// non-cancelled order, and accrues revenue, commission, the time
    /// series and the category/product/gender breakdowns from delivered
    /// orders only. Cancelled orders contribute nothing beyond their status
    /// tally, whatever their stored total.
    pub fn aggregate(
        period: Period,
        now: DateTime<Utc>,
        orders: &[OrderRecord],
        new_customers_count: i64,
        low_stock_products: Vec<LowStockProduct>,
        ratings: &[i32],
    ) -> DashboardSummary {
        let bucket = period.bucket();
        let start = period.start_from(now);

        let mut total_revenue = Decimal::ZERO;
        let mut total_commissions = Decimal::ZERO;
        let mut total_orders: i64 = 0;

        // Ordered mapping for the series keeps the emit order deterministic;
        // the other breakdowns are sorted explicitly afterwards
        let mut series: BTreeMap<String, SeriesAccumulator> = BTreeMap::new();
        let mut status_counts: HashMap<OrderStatus, i64> = HashMap::new();
        let mut categories: HashMap<String, BreakdownAccumulator> = HashMap::new();
        let mut products: HashMap<String, BreakdownAccumulator> = HashMap::new();
        let mut genders: HashMap<Gender, BreakdownAccumulator> = HashMap::new();

        for order in orders {
            *status_counts.entry(order.status).or_default() += 1;

            if !order.status.counts_as_order() {
                continue;
            }
            total_orders += 1;

            if !order.status.contributes_to_revenue() {
                continue;
            }
            total_revenue += order.total;
            total_commissions += order.commission;

            let point = series
                .entry(bucket.key(order.created_at.date_naive()))
                .or_default();
            point.revenue += order.total;
            point.orders += 1;

            for line in &order.items {
                let revenue = line.revenue();
                let units = i64::from(line.quantity);

                let category = categories
                    .entry(
                        line.category_name
                            .clone()
                            .unwrap_or_else(|| UNCATEGORIZED.to_string()),
                    )
                    .or_default();
                category.units += units;
                category.revenue += revenue;

                let product = products.entry(line.product_name.clone()).or_default();
                product.units += units;
                product.revenue += revenue;

                let gender = genders.entry(line.gender.unwrap_or_default()).or_default();
                gender.units += units;
                gender.revenue += revenue;
            }
        }

        let average_order_value = if total_orders > 0 {
            total_revenue / Decimal::from(total_orders)
        } else {
            Decimal::ZERO
        };

        let chart_data =
            Self::fill_series(bucket, start.date_naive(), now.date_naive(), &series);

        let mut category_data: Vec<CategorySlice> = categories
            .into_iter()
            .map(|(name, acc)| CategorySlice {
                name,
                value: acc.units,
                revenue: acc.revenue,
            })
            .collect();
        category_data.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.name.cmp(&b.name)));

        let mut product_data: Vec<ProductSlice> = products
            .into_iter()
            .map(|(name, acc)| ProductSlice {
                name,
                sales: acc.units,
                revenue: acc.revenue,
            })
            .collect();
        product_data.sort_by(|a, b| b.sales.cmp(&a.sales).then_with(|| a.name.cmp(&b.name)));
        product_data.truncate(TOP_LIMIT);

        let mut gender_data: Vec<GenderSlice> = genders
            .into_iter()
            .map(|(gender, acc)| GenderSlice {
                name: gender.to_string(),
                value: acc.units,
                revenue: acc.revenue,
            })
            .collect();
        gender_data.sort_by(|a, b| {
            b.revenue
                .cmp(&a.revenue)
                .then_with(|| a.name.cmp(&b.name))
        });

        // Only the two labels the widget knows, and only when non-zero
        let mut status_data = Vec::new();
        let delivered = status_counts
            .get(&OrderStatus::Delivered)
            .copied()
            .unwrap_or(0);
        if delivered > 0 {
            status_data.push(StatusSlice {
                name: "Completed".to_string(),
                value: delivered,
            });
        }
        let cancelled = status_counts
            .get(&OrderStatus::Cancelled)
            .copied()
            .unwrap_or(0);
        if cancelled > 0 {
            status_data.push(StatusSlice {
                name: "Cancelled".to_string(),
                value: cancelled,
            });
        }

        let total_reviews = ratings.len() as i64;
        let average_rating = if ratings.is_empty() {
            0.0
        } else {
            ratings.iter().map(|r| f64::from(*r)).sum::<f64>() / ratings.len() as f64
        };
        let rating_distribution = (1..=5)
            .rev()
            .map(|star| RatingBucket {
                rating: star,
                count: ratings.iter().filter(|r| **r == star).count() as i64,
            })
            .collect();

        DashboardSummary {
            total_revenue,
            total_commissions,
            total_orders,
            average_order_value,
            new_customers_count,
            low_stock_products,
            chart_data,
            category_data,
            product_data,
            status_data,
            gender_data,
            total_reviews,
            average_rating,
            rating_distribution,
        }
    }

    /// Walk every calendar unit from `start` through `end` inclusive,
    /// substituting zero points where the window has no delivered orders.
    /// The series length therefore always matches the calendar, however
    /// sparse the data.
    fn fill_series(
        bucket: TimeBucket,
        start: NaiveDate,
        end: NaiveDate,
        series: &BTreeMap<String, SeriesAccumulator>,
    ) -> Vec<ChartPoint> {
        let mut points = Vec::new();
        let mut cursor = start;

        while cursor <= end {
            let key = bucket.key(cursor);
            let acc = series.get(&key);

            points.push(ChartPoint {
                name: bucket.label(cursor),
                revenue: acc.map_or(Decimal::ZERO, |a| a.revenue),
                orders: acc.map_or(0, |a| a.orders),
                date: key,
            });

            match bucket.advance(cursor) {
                Some(next) => cursor = next,
                None => break,
            }
        }

        points
    }
}
