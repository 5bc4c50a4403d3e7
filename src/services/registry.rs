//! Reference data registries
//!
//! Two read-only tables loaded once at startup and shared behind `Arc`:
//! the merged listed/OTC company registry (two CSV files) and the broker
//! branch directory (`brokers.json`). Lookups are exact, first match in load
//! order wins; there is deliberately no fuzzy matching or ranking.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::info;

use crate::constants::STOCK_CODE_WIDTH;
use crate::error::{AppError, Result};
use crate::models::{BrokerRecord, CompanyRecord, ListingVenue};

pub const TWSE_COMPANIES_FILE: &str = "twse_companies.csv";
pub const OTC_COMPANIES_FILE: &str = "otc_companies.csv";
pub const BROKERS_FILE: &str = "brokers.json";

/// Zero-pad an all-digit identifier to the 4-digit stock code form.
pub fn pad_stock_code(input: &str) -> String {
    format!("{:0>width$}", input, width = STOCK_CODE_WIDTH)
}

#[derive(Debug, Default)]
pub struct CompanyRegistry {
    records: Vec<CompanyRecord>,
}

impl CompanyRegistry {
    pub fn from_records(records: Vec<CompanyRecord>) -> Self {
        Self { records }
    }

    /// Load and merge the listed and OTC registries, listed first.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let mut records = Vec::new();
        read_company_csv(
            &data_dir.join(TWSE_COMPANIES_FILE),
            ListingVenue::Listed,
            &mut records,
        )?;
        read_company_csv(
            &data_dir.join(OTC_COMPANIES_FILE),
            ListingVenue::Otc,
            &mut records,
        )?;
        info!(companies = records.len(), "Loaded company registry");
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Resolve either a stock code (all digits, zero-padded before the exact
    /// match) or free text (substring containment against the company name,
    /// first match in load order).
    pub fn resolve(&self, input: &str) -> Option<&CompanyRecord> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }
        if input.chars().all(|c| c.is_ascii_digit()) {
            let code = pad_stock_code(input);
            self.records.iter().find(|r| r.code == code)
        } else {
            self.records.iter().find(|r| r.name.contains(input))
        }
    }
}

fn read_company_csv(
    path: &Path,
    venue: ListingVenue,
    records: &mut Vec<CompanyRecord>,
) -> Result<()> {
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| AppError::Io(format!("{}: {}", path.display(), e)))?;
    for result in reader.records() {
        let record = result?;
        let industry = record.get(3).unwrap_or("").trim().to_string();
        records.push(CompanyRecord {
            code: pad_stock_code(record.get(0).unwrap_or("").trim()),
            name: record.get(1).unwrap_or("").trim().to_string(),
            short_name: record.get(2).unwrap_or("").trim().to_string(),
            industry: if industry.is_empty() { None } else { Some(industry) },
            address: record.get(4).unwrap_or("").trim().to_string(),
            venue,
            transfer_agent: record.get(5).unwrap_or("").trim().to_string(),
        });
    }
    Ok(())
}

#[derive(Debug, Default)]
pub struct BrokerRegistry {
    records: Vec<BrokerRecord>,
}

impl BrokerRegistry {
    pub fn from_records(records: Vec<BrokerRecord>) -> Self {
        Self { records }
    }

    pub fn load(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(BROKERS_FILE);
        let file =
            File::open(&path).map_err(|e| AppError::Io(format!("{}: {}", path.display(), e)))?;
        let records: Vec<BrokerRecord> = serde_json::from_reader(BufReader::new(file))?;
        info!(branches = records.len(), "Loaded broker registry");
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Resolve a broker identifier: exact house-code match first, then exact
    /// branch-name match. First record in load order wins either way.
    pub fn resolve(&self, input: &str) -> Option<&BrokerRecord> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }
        self.records
            .iter()
            .find(|r| r.house_code == input)
            .or_else(|| self.records.iter().find(|r| r.branch_name == input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn company(code: &str, name: &str) -> CompanyRecord {
        CompanyRecord {
            code: code.to_string(),
            name: name.to_string(),
            short_name: name.to_string(),
            industry: None,
            address: String::new(),
            venue: ListingVenue::Listed,
            transfer_agent: String::new(),
        }
    }

    fn broker(house_code: &str, branch: &str) -> BrokerRecord {
        BrokerRecord {
            bhid: "9600".to_string(),
            house_name: "富邦".to_string(),
            branch_name: branch.to_string(),
            house_code: house_code.to_string(),
            address: None,
            phone: None,
        }
    }

    #[test]
    fn numeric_input_is_zero_padded_and_matched_exactly() {
        let registry = CompanyRegistry::from_records(vec![
            company("0050", "元大台灣卓越50基金"),
            company("2330", "台灣積體電路製造股份有限公司"),
        ]);
        assert_eq!(registry.resolve("50").unwrap().code, "0050");
        assert_eq!(registry.resolve("2330").unwrap().code, "2330");
        assert!(registry.resolve("9999").is_none());
    }

    #[test]
    fn text_input_matches_by_name_substring_first_wins() {
        let registry = CompanyRegistry::from_records(vec![
            company("1101", "台灣水泥股份有限公司"),
            company("2330", "台灣積體電路製造股份有限公司"),
        ]);
        // Both names contain 台灣; load order decides.
        assert_eq!(registry.resolve("台灣").unwrap().code, "1101");
        assert_eq!(registry.resolve("積體電路").unwrap().code, "2330");
        assert!(registry.resolve("不存在的公司").is_none());
    }

    #[test]
    fn broker_house_code_beats_branch_name() {
        let registry = BrokerRegistry::from_records(vec![
            broker("9217", "凱基台北"),
            broker("9661", "永豐金城中"),
        ]);
        assert_eq!(registry.resolve("9661").unwrap().branch_name, "永豐金城中");
        assert_eq!(registry.resolve("凱基台北").unwrap().house_code, "9217");
        assert!(registry.resolve("999999").is_none());
    }

    #[test]
    fn registry_loads_from_csv_files() {
        let dir = tempfile::tempdir().unwrap();
        let header = "code,name,short_name,industry,address,transfer_agent\n";
        let mut twse = std::fs::File::create(dir.path().join(TWSE_COMPANIES_FILE)).unwrap();
        writeln!(
            twse,
            "{header}2330,台灣積體電路製造股份有限公司,台積電,半導體業,新竹市力行六路8號,中國信託"
        )
        .unwrap();
        let mut otc = std::fs::File::create(dir.path().join(OTC_COMPANIES_FILE)).unwrap();
        writeln!(otc, "{header}5483,中美矽晶製品股份有限公司,中美晶,半導體業,新竹科學園區,元大")
            .unwrap();

        let registry = CompanyRegistry::load(dir.path()).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.resolve("2330").unwrap().venue, ListingVenue::Listed);
        assert_eq!(registry.resolve("5483").unwrap().venue, ListingVenue::Otc);
    }
}
