use serde::Serialize;
use tw_core::pagination::PageResult;
use tw_models::{CountySummary, EntitySummary, Investigation, PublicReport, Supplier, Tender};

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

/// One tab-separated line of plain-text output
pub trait Listing {
    fn row(&self) -> String;
}

impl Listing for Tender {
    fn row(&self) -> String {
        let worst = self
            .worst_flag()
            .map_or_else(|| "-".to_string(), |severity| severity.to_string());
        format!(
            "{}\t{}\t{}\t{}\t{}\t{:.0}\t{}",
            self.id, self.tender_number, self.status, self.risk_score, worst, self.amount, self.title
        )
    }
}

impl Listing for Supplier {
    fn row(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}",
            self.id, self.registration_number, self.verification_status, self.risk_score, self.name
        )
    }
}

impl Listing for Investigation {
    fn row(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}",
            self.case_number, self.status, self.priority, self.opened_date, self.title
        )
    }
}

impl Listing for PublicReport {
    fn row(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}",
            self.tracking_id,
            self.status,
            self.severity,
            self.submitted_date,
            self.title.as_deref().unwrap_or("-")
        )
    }
}

impl Listing for EntitySummary {
    fn row(&self) -> String {
        format!(
            "{}\t{}\t{}\t{:.0}\t{:.1}",
            self.name, self.county, self.tender_count, self.total_spent, self.average_risk
        )
    }
}

impl Listing for CountySummary {
    fn row(&self) -> String {
        format!(
            "{}\t{}\t{}\t{:.0}%\t{:.0}\t{:.1}",
            self.county,
            self.total_tenders,
            self.flagged_tenders,
            self.flagged_rate() * 100.0,
            self.total_value,
            self.average_risk
        )
    }
}

pub fn print_json<T: Serialize>(data: T) -> anyhow::Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(&JsonOut { ok: true, data })?
    );
    Ok(())
}

pub fn print_page<T: Serialize + Listing>(json: bool, page: &PageResult<&T>) -> anyhow::Result<()> {
    if json {
        return print_json(page);
    }

    for item in &page.items {
        println!("{}", item.row());
    }
    println!(
        "page {}/{} ({} matched)",
        page.page, page.total_pages, page.total_matched
    );
    Ok(())
}
