mod dashboard;
mod period;
mod records;

pub use dashboard::{
    CategorySlice, ChartPoint, DashboardSummary, GenderSlice, ProductSlice, RatingBucket,
    StatusSlice,
};
pub use period::{Period, TimeBucket};
pub use records::{LineRecord, LineRecordRow, LowStockProduct, OrderRecord, OrderRecordRow};
