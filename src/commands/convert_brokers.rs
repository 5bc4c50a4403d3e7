use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::services::broker_convert;

pub fn run(snapshot: &Path, contacts: Option<&Path>, output: &Path) -> Result<()> {
    let count = broker_convert::convert(snapshot, contacts, output)?;
    info!(count, "Broker registry conversion finished");
    println!("轉換完成，{} 筆分點資料已保存到 {}", count, output.display());
    Ok(())
}
