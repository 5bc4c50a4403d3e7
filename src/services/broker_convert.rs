//! Offline broker registry conversion
//!
//! One-time step that builds `brokers.json` from an HTML snapshot of the
//! upstream branch picker plus a contacts CSV. The picker is a set of
//! `select[name=sel_BrokerBranch]` elements, one per broker house: the first
//! option's value is the house's BHID and its text (before the `-`) the
//! house name, and every option is one branch.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::info;

use crate::error::{AppError, Result};
use crate::models::BrokerRecord;
use crate::services::normalize::clean;

static BRANCH_SELECTS: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"select[name="sel_BrokerBranch"]"#)
        .expect("Failed to parse branch select selector")
});
static OPTIONS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("option").expect("Failed to parse option selector"));

/// Parse the branch picker snapshot into broker records (no contact fields).
pub fn parse_broker_options(html: &str) -> Vec<BrokerRecord> {
    let document = Html::parse_document(html);
    let mut records = Vec::new();

    for select in document.select(&BRANCH_SELECTS) {
        let options: Vec<_> = select.select(&OPTIONS).collect();
        let Some(first) = options.first() else {
            continue;
        };
        let bhid = first.value().attr("value").unwrap_or_default().to_string();
        let first_text = clean(&first.text().collect::<String>());
        let house_name = first_text
            .split('-')
            .next()
            .unwrap_or(&first_text)
            .to_string();

        for option in &options {
            let branch_name = clean(&option.text().collect::<String>());
            let house_code = option.value().attr("value").unwrap_or_default().to_string();
            if branch_name.is_empty() || house_code.is_empty() {
                continue;
            }
            records.push(BrokerRecord {
                bhid: bhid.clone(),
                house_name: house_name.clone(),
                branch_name,
                house_code,
                address: None,
                phone: None,
            });
        }
    }

    records
}

/// Fill address/phone from a contacts CSV (`branch_name,address,phone`),
/// keyed by exact branch name. Branches without a contact row stay null.
pub fn merge_contacts(records: &mut [BrokerRecord], contacts_csv: &Path) -> Result<()> {
    let mut reader = csv::Reader::from_path(contacts_csv)
        .map_err(|e| AppError::Io(format!("{}: {}", contacts_csv.display(), e)))?;

    let mut contacts: HashMap<String, (String, String)> = HashMap::new();
    for result in reader.records() {
        let record = result?;
        let branch = record.get(0).unwrap_or("").trim().to_string();
        let address = record.get(1).unwrap_or("").trim().to_string();
        let phone = record.get(2).unwrap_or("").trim().to_string();
        if !branch.is_empty() {
            contacts.entry(branch).or_insert((address, phone));
        }
    }

    for record in records.iter_mut() {
        if let Some((address, phone)) = contacts.get(&record.branch_name) {
            if !address.is_empty() {
                record.address = Some(address.clone());
            }
            if !phone.is_empty() {
                record.phone = Some(phone.clone());
            }
        }
    }
    Ok(())
}

/// Run the full conversion: snapshot + contacts CSV in, `brokers.json` out.
pub fn convert(snapshot: &Path, contacts_csv: Option<&Path>, output: &Path) -> Result<usize> {
    let html = fs::read_to_string(snapshot)
        .map_err(|e| AppError::Io(format!("{}: {}", snapshot.display(), e)))?;
    let mut records = parse_broker_options(&html);
    if let Some(csv_path) = contacts_csv {
        merge_contacts(&mut records, csv_path)?;
    }
    let json = serde_json::to_string_pretty(&records)?;
    fs::write(output, json)?;
    info!(branches = records.len(), output = %output.display(), "Wrote broker registry");
    Ok(records.len())
}
