use crate::infra::{parse_answer, StaticCatalogRepository};
use clap::Args;
use quote_desk::error::AppError;
use quote_desk::workflows::quoting::{IntegrityIssue, QuoteReport, QuoteRequest, QuoteService};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct CatalogSourceArgs {
    /// Catalog export (JSON). Defaults to the bundled seed catalog.
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Rule sheet (CSV) that replaces the catalog's rules
    #[arg(long)]
    pub(crate) rules: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct QuoteArgs {
    /// Client state code, e.g. CA
    #[arg(long)]
    pub(crate) state: String,
    #[arg(long, default_value = "")]
    pub(crate) first_name: String,
    #[arg(long, default_value = "")]
    pub(crate) last_name: String,
    #[arg(long)]
    pub(crate) age: Option<u8>,
    /// Health condition id the client has (repeatable)
    #[arg(long = "condition")]
    pub(crate) conditions: Vec<String>,
    /// Medication id the client takes (repeatable)
    #[arg(long = "medication")]
    pub(crate) medications: Vec<String>,
    /// Underwriting answer as QUESTION=yes|no (repeatable)
    #[arg(long = "answer", value_parser = parse_answer)]
    pub(crate) answers: Vec<(String, Option<bool>)>,
    /// Print the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
    #[command(flatten)]
    pub(crate) source: CatalogSourceArgs,
}

#[derive(Args, Debug, Default)]
pub(crate) struct CatalogArgs {
    /// Print issues as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
    #[command(flatten)]
    pub(crate) source: CatalogSourceArgs,
}

impl QuoteArgs {
    fn request(&self) -> QuoteRequest {
        QuoteRequest {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            age: self.age,
            state: self.state.clone(),
            conditions: self.conditions.clone(),
            medications: self.medications.clone(),
            answers: self.answers.iter().cloned().collect(),
        }
    }
}

fn service_for(
    source: &CatalogSourceArgs,
) -> Result<QuoteService<StaticCatalogRepository>, AppError> {
    let repository =
        StaticCatalogRepository::load(source.catalog.as_deref(), source.rules.as_deref())?;
    Ok(QuoteService::new(Arc::new(repository)))
}

pub(crate) fn run_quote(args: QuoteArgs) -> Result<(), AppError> {
    let service = service_for(&args.source)?;
    let report = service.quote(args.request())?;

    if args.json {
        println!("{}", to_json(&report));
    } else {
        print!("{}", render_quote(&report));
    }
    Ok(())
}

pub(crate) fn run_catalog_audit(args: CatalogArgs) -> Result<(), AppError> {
    let service = service_for(&args.source)?;
    let issues = service.audit()?;

    if args.json {
        println!("{}", to_json(&issues));
    } else {
        print!("{}", render_audit(&issues));
    }
    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|err| format!("{{\"error\": \"serialization failed: {err}\"}}"))
}

pub(crate) fn render_quote(report: &QuoteReport) -> String {
    let mut out = String::new();
    let name = if report.client.name.is_empty() {
        "Client"
    } else {
        report.client.name.as_str()
    };
    let age = report
        .client
        .age
        .map(|age| format!(", age {age}"))
        .unwrap_or_default();

    out.push_str(&format!(
        "Quote for {name} ({}{age}) generated {}\n",
        report.client.state,
        report.generated_at.format("%Y-%m-%d %H:%M UTC")
    ));

    out.push_str(&format!("\nEligible plans ({})\n", report.eligible_plans.len()));
    if report.eligible_by_company.is_empty() {
        out.push_str("  none\n");
    }
    for group in &report.eligible_by_company {
        out.push_str(&format!("  {}\n", group.company));
        for plan in &group.plans {
            out.push_str(&format!("    - {} [{}]\n", plan.name, plan.plan_type));
        }
    }

    out.push_str(&format!(
        "\nIneligible plans ({})\n",
        report.ineligible_plans.len()
    ));
    if report.ineligible_plans.is_empty() {
        out.push_str("  none\n");
    }
    for plan in &report.ineligible_plans {
        out.push_str(&format!(
            "  - {} ({}): {}\n",
            plan.name, plan.company, plan.reason
        ));
    }

    out
}

pub(crate) fn render_audit(issues: &[IntegrityIssue]) -> String {
    if issues.is_empty() {
        return "Catalog integrity: no issues found\n".to_string();
    }

    let mut out = format!("Catalog integrity: {} issue(s)\n", issues.len());
    for issue in issues {
        out.push_str(&format!("  - {}\n", issue.summary()));
    }
    out
}
