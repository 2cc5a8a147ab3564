mod error;

pub use error::{Error, Result};

use std::{
	env, fs,
	path::{Path, PathBuf},
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use serde_json::Value;

use rbc_config::{Config, Data, Pagination, Search, Security, Service};
use rbc_domain::{PolicyRecord, PolicyStatus, Priority, ReportRecord};

pub const REPORTS_FILE: &str = "req_reports_list.csv";
pub const POLICIES_FILE: &str = "policies.json";

/// A scratch directory holding fixture files for one test. Removed on drop.
pub struct FixtureDir {
	path: PathBuf,
	cleaned: bool,
}
impl FixtureDir {
	pub fn new(prefix: &str) -> Result<Self> {
		static COUNTER: AtomicU64 = AtomicU64::new(0);

		let nanos = SystemTime::now()
			.duration_since(UNIX_EPOCH)
			.map_err(|err| Error::Message(format!("System time is before the epoch: {err}.")))?
			.as_nanos();
		let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
		let pid = std::process::id();
		let path = env::temp_dir().join(format!("{prefix}_{nanos}_{pid}_{ordinal}"));

		fs::create_dir_all(&path)?;

		Ok(Self { path, cleaned: false })
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	pub fn reports_path(&self) -> PathBuf {
		self.path.join(REPORTS_FILE)
	}

	pub fn policies_path(&self) -> PathBuf {
		self.path.join(POLICIES_FILE)
	}

	pub fn write(&self, name: &str, contents: impl AsRef<[u8]>) -> Result<PathBuf> {
		let path = self.path.join(name);

		fs::write(&path, contents)?;

		Ok(path)
	}

	/// Writes `records` as the reports sheet, headers included.
	pub fn write_reports(&self, records: &[ReportRecord]) -> Result<PathBuf> {
		let path = self.reports_path();
		let mut writer = csv::Writer::from_path(&path)?;

		for record in records {
			writer.serialize(record)?;
		}

		writer.flush()?;

		Ok(path)
	}

	pub fn write_policies(&self, register: &Value) -> Result<PathBuf> {
		self.write(POLICIES_FILE, serde_json::to_vec_pretty(register)?)
	}

	/// Config pointing at this directory's fixtures, bound to ephemeral loopback ports.
	pub fn config(&self) -> Config {
		config_at(&self.path)
	}

	pub fn cleanup(mut self) -> Result<()> {
		self.cleanup_inner()
	}

	fn cleanup_inner(&mut self) -> Result<()> {
		if self.cleaned {
			return Ok(());
		}

		fs::remove_dir_all(&self.path)?;

		self.cleaned = true;

		Ok(())
	}
}
impl Drop for FixtureDir {
	fn drop(&mut self) {
		if let Err(err) = self.cleanup_inner() {
			eprintln!("Fixture directory cleanup failed: {err}.");
		}
	}
}

/// Config whose fixture paths live under `dir`, bound to ephemeral loopback ports. The files
/// need not exist when the catalog is built in memory.
pub fn config_at(dir: &Path) -> Config {
	Config {
		service: Service {
			http_bind: "127.0.0.1:0".to_string(),
			admin_bind: "127.0.0.1:0".to_string(),
			log_level: "info".to_string(),
		},
		data: Data { reports_csv: dir.join(REPORTS_FILE), policies_json: dir.join(POLICIES_FILE) },
		search: Search::default(),
		pagination: Pagination::default(),
		security: Security::default(),
	}
}

pub fn report(category: &str, title: &str, frequency: &str) -> ReportRecord {
	ReportRecord {
		category: category.to_string(),
		form_no: String::new(),
		mor_ref: String::new(),
		title: title.to_string(),
		frequency: frequency.to_string(),
		submission_deadline: String::new(),
		submission_procedure: String::new(),
	}
}

/// `count` reports cycling through `categories` and a few frequencies, titled `Report NN`.
pub fn sample_reports(count: usize, categories: &[&str]) -> Vec<ReportRecord> {
	const FREQUENCIES: [&str; 3] = ["Quarterly", "Monthly", "Annually"];

	(0..count)
		.map(|index| {
			let category = categories.get(index % categories.len().max(1)).copied().unwrap_or("");
			let mut record =
				report(category, &format!("Report {:02}", index + 1), FREQUENCIES[index % 3]);

			record.form_no = format!("FORM-{:03}", index + 1);
			record.submission_procedure = format!("Email to reports{}@bsp.gov.ph", index + 1);

			record
		})
		.collect()
}

/// A small, realistic directory of BSP reports for search tests.
pub fn bsp_reports() -> Vec<ReportRecord> {
	let rows = [
		("Prudential", "FRP", "Sec. 171", "Financial Reporting Package", "Quarterly", "15 banking days after end of quarter", "Upload via the BSP portal"),
		("Prudential", "CAR", "Sec. 121", "Capital Adequacy Ratio Report", "Quarterly", "30 banking days after end of quarter", "E-mail to dsa@bsp.gov.ph"),
		("AML", "CTR", "Sec. 921", "Covered Transaction Report", "Weekly", "Within 5 working days", "Submit to AMLC portal"),
		("Statistical", "DSR", "Sec. 104", "Deposit Survey Report", "Monthly", "10th banking day of the following month", "E-mail to dsr@bsp.gov.ph"),
		("Governance", "GIS", "Sec. 132", "General Information Sheet", "Annually", "30 days after annual meeting", "Hand-carry to the supervising department"),
		("Prudential", "LR", "Sec. 145", "Liquidity Ratio Report", "Semestral", "15 days after end of semester", "Upload via the BSP portal"),
	];

	rows.into_iter()
		.map(|(category, form_no, mor_ref, title, frequency, deadline, procedure)| ReportRecord {
			category: category.to_string(),
			form_no: form_no.to_string(),
			mor_ref: mor_ref.to_string(),
			title: title.to_string(),
			frequency: frequency.to_string(),
			submission_deadline: deadline.to_string(),
			submission_procedure: procedure.to_string(),
		})
		.collect()
}

pub fn policy(id: &str, title: &str, status: PolicyStatus) -> PolicyRecord {
	PolicyRecord {
		id: id.to_string(),
		title: title.to_string(),
		subject: None,
		category: None,
		status,
		supporting_text: String::new(),
		policy: None,
		priority: None,
		last_reviewed: None,
		next_deadline: None,
		effective_date: None,
		bsp_reference: String::new(),
		bsp_issuance: None,
	}
}

/// A revised-vocabulary register with every optional field exercised somewhere.
pub fn sample_policies() -> Vec<PolicyRecord> {
	let mut aml = policy("p1", "RB-AML-001", PolicyStatus::FullyCompliant);

	aml.subject = Some("Money Laundering Prevention Program".to_string());
	aml.category = Some("AML/CFT".to_string());
	aml.supporting_text = "MTPP approved by the board in 2024.".to_string();
	aml.priority = Some(Priority::High);
	aml.last_reviewed = Some("2024-11-15".to_string());
	aml.next_deadline = Some("2025-11-15".to_string());
	aml.bsp_reference = "BSP Circular No. 950".to_string();
	aml.bsp_issuance = Some("C950".to_string());

	let mut governance = policy("p2", "RB-GOV-004", PolicyStatus::SlightlyCompliant);

	governance.subject = Some("Corporate Governance".to_string());
	governance.category = Some("Governance".to_string());
	governance.supporting_text = "No board-level compliance committee yet.".to_string();
	governance.priority = Some(Priority::Medium);
	governance.last_reviewed = Some("March 3, 2024".to_string());
	governance.next_deadline = Some("2025-01-31".to_string());
	governance.bsp_reference = "BSP Circular No. 1129".to_string();

	let mut it = policy("p3", "RB-IT-002", PolicyStatus::NonExistent);

	it.subject = Some("Information Technology Risk Management".to_string());
	it.category = Some("Operations".to_string());
	it.supporting_text = "Information only; no IT outsourcing.".to_string();
	it.priority = Some(Priority::Low);
	it.bsp_reference = "BSP Circular No. 982".to_string();

	let mut consumer = policy("p4", "RB-CP-010", PolicyStatus::FullyCompliant);

	consumer.subject = Some("Financial Consumer Protection".to_string());
	consumer.category = Some("Governance".to_string());
	consumer.supporting_text = "Complaint desk logs reviewed monthly.".to_string();
	consumer.priority = Some(Priority::High);
	consumer.last_reviewed = Some("2023-06-30".to_string());
	consumer.next_deadline = Some("2024-06-30".to_string());
	consumer.bsp_reference = "BSP Circular No. 1160".to_string();

	vec![aml, governance, it, consumer]
}
