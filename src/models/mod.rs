mod broker;
mod chip;
mod company;
mod history;
mod quote;

pub use broker::BrokerRecord;
pub use chip::{ChipDataRecord, ChipEntry};
pub use company::{CompanyRecord, ListingVenue};
pub use history::{BranchHistoryRow, BrokerHistoryRecord, DailyBar};
pub use quote::StockQuote;
